use log::warn;
use std::collections::HashMap;

use super::markup::{render_comment, MarkupContext};
use crate::models::comment::{Comment, CommentId};

/// Where a comment ended up after insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Prepended to the top-level list.
    Top,
    /// Appended after the parent's existing replies; `position` is its index.
    Reply { parent: CommentId, position: usize },
    /// A reply whose parent is not on the page; prepended to the top-level list.
    Orphan { parent: Option<CommentId> },
    /// Id already on the page; nothing changed.
    Duplicate,
}

#[derive(Debug, Clone)]
struct Node {
    comment: Comment,
    /// `None` until the first reply creates the container.
    replies: Option<Vec<CommentId>>,
}

/// The rendered comment tree of one post.
///
/// Top-level comments are most-recent-first, replies oldest-first.
#[derive(Debug, Clone, Default)]
pub struct CommentTree {
    nodes: HashMap<CommentId, Node>,
    roots: Vec<CommentId>,
}

impl CommentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the tree the server rendered. `top_level` is in page order;
    /// `replies` in creation order. Comments from the server template carry
    /// no replies container unless they already have replies.
    pub fn from_rendered(top_level: Vec<Comment>, replies: Vec<Comment>) -> Self {
        let mut tree = CommentTree::new();
        for c in top_level {
            let id = c.id;
            if tree.nodes.contains_key(&id) {
                continue;
            }
            tree.nodes.insert(id, Node { comment: c, replies: None });
            tree.roots.push(id);
        }
        for r in replies {
            tree.append_reply(r);
        }
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: CommentId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: CommentId) -> Option<&Comment> {
        self.nodes.get(&id).map(|n| &n.comment)
    }

    /// Direct children of the comment list, in display order.
    pub fn top_level(&self) -> &[CommentId] {
        &self.roots
    }

    /// Replies of `id` in display order; `None` when the container does not exist yet.
    pub fn replies(&self, id: CommentId) -> Option<&[CommentId]> {
        self.nodes.get(&id).and_then(|n| n.replies.as_deref())
    }

    /// Put a comment at the top of the list.
    pub fn prepend_top(&mut self, comment: Comment) -> Placement {
        let id = comment.id;
        if self.nodes.contains_key(&id) {
            warn!("Comment {} already rendered, ignoring", id);
            return Placement::Duplicate;
        }
        self.nodes.insert(id, Node { comment, replies: Some(Vec::new()) });
        self.roots.insert(0, id);
        Placement::Top
    }

    /// Append a reply under its parent, creating the container if needed.
    /// Falls back to the top of the list when the parent is not rendered.
    pub fn append_reply(&mut self, comment: Comment) -> Placement {
        let id = comment.id;
        if self.nodes.contains_key(&id) {
            warn!("Comment {} already rendered, ignoring", id);
            return Placement::Duplicate;
        }
        let parent = comment.parent_id;
        if let Some(parent_id) = parent {
            if let Some(node) = self.nodes.get_mut(&parent_id) {
                let replies = node.replies.get_or_insert_with(|| {
                    log::debug!("Created replies container for comment {}", parent_id);
                    Vec::new()
                });
                replies.push(id);
                let position = replies.len() - 1;
                self.nodes.insert(id, Node { comment, replies: Some(Vec::new()) });
                return Placement::Reply { parent: parent_id, position };
            }
        }

        warn!("Parent comment not found for reply {}: {:?}", id, parent);
        self.nodes.insert(id, Node { comment, replies: Some(Vec::new()) });
        self.roots.insert(0, id);
        Placement::Orphan { parent }
    }

    /// Render the content of `#comments-list`. `open_form` is the comment
    /// whose reply form is showing, if any.
    pub fn render(&self, ctx: &MarkupContext, open_form: Option<CommentId>) -> String {
        let mut html = String::new();
        for id in &self.roots {
            self.render_node(&mut html, *id, ctx, open_form);
        }
        html
    }

    fn render_node(&self, html: &mut String, id: CommentId, ctx: &MarkupContext, open_form: Option<CommentId>) {
        let node = match self.nodes.get(&id) {
            Some(n) => n,
            None => return,
        };
        let inner = node.replies.as_ref().map(|children| {
            let mut inner = String::new();
            for child in children {
                self.render_node(&mut inner, *child, ctx, open_form);
            }
            inner
        });
        render_comment(html, &node.comment, ctx, open_form == Some(id), inner.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Session;

    fn c(id: i64, parent: Option<i64>) -> Comment {
        Comment {
            id,
            parent_id: parent,
            author: format!("user{}", id),
            avatar_url: None,
            created_at: String::new(),
            content: format!("comment {}", id),
        }
    }

    #[test]
    fn top_level_is_most_recent_first() {
        let mut tree = CommentTree::new();
        for id in 1..=3 {
            assert_eq!(tree.prepend_top(c(id, None)), Placement::Top);
        }
        assert_eq!(tree.top_level(), &[3, 2, 1]);
    }

    #[test]
    fn replies_are_oldest_first() {
        let mut tree = CommentTree::new();
        tree.prepend_top(c(1, None));
        assert_eq!(tree.append_reply(c(2, Some(1))), Placement::Reply { parent: 1, position: 0 });
        assert_eq!(tree.append_reply(c(3, Some(1))), Placement::Reply { parent: 1, position: 1 });
        assert_eq!(tree.replies(1), Some(&[2, 3][..]));
        assert_eq!(tree.top_level(), &[1]);
    }

    #[test]
    fn container_is_created_lazily() {
        let tree = CommentTree::from_rendered(vec![c(1, None)], vec![]);
        assert_eq!(tree.replies(1), None);

        let mut tree = tree;
        tree.append_reply(c(2, Some(1)));
        assert_eq!(tree.replies(1), Some(&[2][..]));
    }

    #[test]
    fn orphan_reply_goes_to_top() {
        let mut tree = CommentTree::new();
        tree.prepend_top(c(1, None));
        assert_eq!(tree.append_reply(c(5, Some(99))), Placement::Orphan { parent: Some(99) });
        assert_eq!(tree.top_level(), &[5, 1]);
    }

    #[test]
    fn duplicate_ids_are_ignored() {
        let mut tree = CommentTree::new();
        tree.prepend_top(c(1, None));
        assert_eq!(tree.prepend_top(c(1, None)), Placement::Duplicate);
        assert_eq!(tree.append_reply(c(1, Some(1))), Placement::Duplicate);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn from_rendered_threads_nested_replies() {
        let tree = CommentTree::from_rendered(
            vec![c(1, None), c(2, None)],
            vec![c(3, Some(1)), c(4, Some(3)), c(5, Some(1))],
        );
        assert_eq!(tree.top_level(), &[1, 2]);
        assert_eq!(tree.replies(1), Some(&[3, 5][..]));
        assert_eq!(tree.replies(3), Some(&[4][..]));
    }

    #[test]
    fn render_nests_replies_inside_parent() {
        let mut tree = CommentTree::new();
        tree.prepend_top(c(1, None));
        tree.append_reply(c(2, Some(1)));
        let session = Session::default();
        let ctx = MarkupContext { session: &session, post_id: Some(1), csrf_token: None };
        let html = tree.render(&ctx, Some(2));

        let parent_at = html.find("id=\"comment-1\"").unwrap();
        let replies_at = html.find("<div class=\"replies\"><div class=\"comment comment-reply-item\" id=\"comment-2\"").unwrap();
        assert!(parent_at < replies_at);
        assert!(html.contains("id=\"reply-form-2\" style=\"display: block;\""));
        assert!(html.contains("id=\"reply-form-1\" style=\"display: none;\""));
    }
}
