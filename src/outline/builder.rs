use super::scan::Heading;
use crate::render::html_escape;

/// A nested list of the outline. `level` is the heading level the list was
/// opened for; the root list starts at 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutlineList {
    pub level: u8,
    pub items: Vec<OutlineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineItem {
    Entry(Heading),
    /// A sublist, placed after the entry it follows.
    List(OutlineList),
}

/// Heading with its nested children, for callers that want a plain tree
/// instead of list markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    pub level: u8,
    pub id: String,
    pub text: String,
    pub children: Vec<OutlineNode>,
}

type ListId = usize;

#[derive(Default)]
struct Arena {
    lists: Vec<(u8, Vec<Slot>)>,
}

enum Slot {
    Entry(Heading),
    List(ListId),
}

impl Arena {
    fn open(&mut self, level: u8) -> ListId {
        self.lists.push((level, Vec::new()));
        self.lists.len() - 1
    }

    fn push(&mut self, list: ListId, slot: Slot) {
        self.lists[list].1.push(slot);
    }

    fn take(&mut self, id: ListId) -> OutlineList {
        let (level, slots) = std::mem::take(&mut self.lists[id]);
        let items = slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Entry(h) => OutlineItem::Entry(h),
                Slot::List(child) => OutlineItem::List(self.take(child)),
            })
            .collect();
        OutlineList { level, items }
    }
}

/// Nest headings with a stack of `(level, list)` pairs.
///
/// Same level appends to the top list. A deeper level opens exactly one new
/// list inside the current one. A shallower level pops while more than one
/// list remains and the heading is above the top's level; if only the root
/// is left, the root's level drops to the heading's.
pub fn build(headings: &[Heading]) -> OutlineList {
    let mut arena = Arena::default();
    let root = arena.open(0);
    let mut stack: Vec<(u8, ListId)> = vec![(0, root)];

    for heading in headings {
        let level = heading.level;
        let (top_level, top) = match stack.last() {
            Some(&pair) => pair,
            None => break,
        };

        if level == top_level {
            arena.push(top, Slot::Entry(heading.clone()));
        } else if level > top_level {
            let list = arena.open(level);
            arena.push(top, Slot::List(list));
            arena.push(list, Slot::Entry(heading.clone()));
            stack.push((level, list));
        } else {
            while stack.len() > 1 && stack.last().map_or(false, |&(l, _)| level < l) {
                stack.pop();
            }
            if stack.len() == 1 && level < stack[0].0 {
                stack[0].0 = level;
                arena.lists[root].0 = level;
            }
            let (_, top) = stack[stack.len() - 1];
            arena.push(top, Slot::Entry(heading.clone()));
        }
    }

    arena.take(root)
}

impl OutlineList {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every entry in document order.
    pub fn entries(&self) -> Vec<&Heading> {
        let mut out = Vec::new();
        collect_entries(self, &mut out);
        out
    }

    /// Fold sublists into the entry before them. A sublist with no entry
    /// before it lends its children to the enclosing level.
    pub fn forest(&self) -> Vec<OutlineNode> {
        let mut out: Vec<OutlineNode> = Vec::new();
        for item in &self.items {
            match item {
                OutlineItem::Entry(h) => out.push(OutlineNode {
                    level: h.level,
                    id: h.id.clone(),
                    text: h.text.clone(),
                    children: Vec::new(),
                }),
                OutlineItem::List(list) => {
                    let kids = list.forest();
                    match out.last_mut() {
                        Some(prev) => prev.children.extend(kids),
                        None => out.extend(kids),
                    }
                }
            }
        }
        out
    }

    /// Inner HTML of the TOC container; `active` marks one link.
    pub fn render(&self, active: Option<&str>) -> String {
        let mut html = String::new();
        render_items(&mut html, &self.items, active);
        html
    }
}

fn collect_entries<'a>(list: &'a OutlineList, out: &mut Vec<&'a Heading>) {
    for item in &list.items {
        match item {
            OutlineItem::Entry(h) => out.push(h),
            OutlineItem::List(l) => collect_entries(l, out),
        }
    }
}

fn render_items(html: &mut String, items: &[OutlineItem], active: Option<&str>) {
    for item in items {
        match item {
            OutlineItem::Entry(h) => {
                let class = if active == Some(h.id.as_str()) { " class=\"active\"" } else { "" };
                html.push_str(&format!(
                    "<li class=\"toc-h{}\"><a href=\"#{}\"{}>{}</a></li>",
                    h.level,
                    html_escape(&h.id),
                    class,
                    html_escape(&h.text)
                ));
            }
            OutlineItem::List(list) => {
                html.push_str(&format!(
                    "<ul class=\"toc-sublist-level-{}\" data-level=\"{}\">",
                    list.level.saturating_sub(1),
                    list.level
                ));
                render_items(html, &list.items, active);
                html.push_str("</ul>");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings(levels: &[u8]) -> Vec<Heading> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &level)| Heading {
                level,
                id: format!("h{}", i),
                text: format!("Heading {}", i),
            })
            .collect()
    }

    fn shape(list: &OutlineList) -> String {
        list.items
            .iter()
            .map(|item| match item {
                OutlineItem::Entry(h) => h.level.to_string(),
                OutlineItem::List(l) => format!("[{}]", shape(l)),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn flat_headings_share_one_sublist() {
        let outline = build(&headings(&[2, 2, 2]));
        assert_eq!(shape(&outline), "[2 2 2]");
    }

    #[test]
    fn mixed_levels_follow_the_stack() {
        let outline = build(&headings(&[2, 3, 3, 2, 4, 3]));
        // the trailing h3 pops the h4 list and lands beside the h2 entries
        assert_eq!(shape(&outline), "[2 [3 3] 2 [4] 3]");

        let forest = outline.forest();
        assert_eq!(forest.len(), 3);
        assert_eq!(forest[0].children.iter().map(|n| n.level).collect::<Vec<_>>(), vec![3, 3]);
        assert_eq!(forest[1].children.len(), 1);
        assert_eq!(forest[1].children[0].level, 4);
        assert_eq!(forest[2].level, 3);
    }

    #[test]
    fn deeper_by_two_opens_a_single_list() {
        let outline = build(&headings(&[2, 4]));
        assert_eq!(shape(&outline), "[2 [4]]");
    }

    #[test]
    fn shallower_than_first_heading_lands_in_root() {
        let outline = build(&headings(&[3, 2]));
        // the h2 pops the h3 list and is appended to the root itself
        assert_eq!(shape(&outline), "[3] 2");
        assert_eq!(outline.level, 0);
    }

    #[test]
    fn entries_keep_document_order() {
        let outline = build(&headings(&[2, 3, 4, 2]));
        let ids: Vec<&str> = outline.entries().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["h0", "h1", "h2", "h3"]);
    }

    #[test]
    fn render_tags_levels_and_active_link() {
        let outline = build(&headings(&[2, 3]));
        let html = outline.render(Some("h1"));
        assert_eq!(
            html,
            "<ul class=\"toc-sublist-level-1\" data-level=\"2\">\
<li class=\"toc-h2\"><a href=\"#h0\">Heading 0</a></li>\
<ul class=\"toc-sublist-level-2\" data-level=\"3\">\
<li class=\"toc-h3\"><a href=\"#h1\" class=\"active\">Heading 1</a></li>\
</ul></ul>"
        );
    }

    #[test]
    fn empty_input_gives_empty_outline() {
        let outline = build(&[]);
        assert!(outline.is_empty());
        assert_eq!(outline.render(None), "");
    }
}
