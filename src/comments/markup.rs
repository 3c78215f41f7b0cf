use crate::config::Session;
use crate::models::comment::Comment;
use crate::render::{display_attr, html_escape, text_with_breaks};

/// Page-level inputs every reply form needs.
#[derive(Debug, Clone, Copy)]
pub struct MarkupContext<'a> {
    pub session: &'a Session,
    pub post_id: Option<i64>,
    pub csrf_token: Option<&'a str>,
}

/// Name and email inputs. Signed-in visitors get them filled and read-only;
/// anonymous visitors must give a name, the email stays optional.
fn identity_inputs(session: &Session) -> (String, String) {
    if session.authenticated {
        (
            format!(
                "<input type=\"text\" name=\"name\" placeholder=\"Name\" value=\"{}\" readonly>",
                html_escape(&session.full_name)
            ),
            format!(
                "<input type=\"email\" name=\"email\" placeholder=\"Email (Optional)\" value=\"{}\" readonly>",
                html_escape(&session.email)
            ),
        )
    } else {
        (
            "<input type=\"text\" name=\"name\" placeholder=\"Name\" value=\"\" required>".to_string(),
            "<input type=\"email\" name=\"email\" placeholder=\"Email (Optional)\" value=\"\">".to_string(),
        )
    }
}

fn reply_form(html: &mut String, comment: &Comment, ctx: &MarkupContext, visible: bool) {
    let (name_input, email_input) = identity_inputs(ctx.session);
    let csrf_input = match ctx.csrf_token {
        Some(token) => format!(
            "<input type=\"hidden\" name=\"csrfmiddlewaretoken\" value=\"{}\">",
            html_escape(token)
        ),
        None => String::new(),
    };
    let post_id = ctx.post_id.map(|id| id.to_string()).unwrap_or_default();

    html.push_str(&format!(
        "<div class=\"comment-reply-form\" id=\"reply-form-{id}\"{display}>\
<form class=\"reply-inner-form\" data-comment-id=\"{id}\">\
{csrf_input}\
<h3>Reply to {author}</h3>\
<div class=\"form-group\"><textarea name=\"content\" placeholder=\"Write your reply...\" required></textarea></div>\
<div class=\"form-row\"><div class=\"form-group\">{name_input}</div><div class=\"form-group\">{email_input}</div></div>\
<input type=\"hidden\" name=\"parent\" value=\"{id}\">\
<input type=\"hidden\" name=\"post\" value=\"{post_id}\">\
<div class=\"reply-actions\">\
<button type=\"button\" class=\"btn btn-secondary cancel-reply\">Cancel</button>\
<button type=\"submit\" class=\"btn btn-primary submit-reply\">Post Reply</button>\
</div></form></div>",
        id = comment.id,
        display = display_attr(visible, "block"),
        csrf_input = csrf_input,
        author = html_escape(&comment.author),
        name_input = name_input,
        email_input = email_input,
        post_id = post_id,
    ));
}

/// Render one comment: header, body, reply button, its reply form and,
/// when `replies` is given, the replies container holding that inner HTML.
/// `None` means the comment has no replies container yet.
pub fn render_comment(
    html: &mut String,
    comment: &Comment,
    ctx: &MarkupContext,
    form_visible: bool,
    replies: Option<&str>,
) {
    let reply_class = if comment.is_reply() { " comment-reply-item" } else { "" };
    let author = html_escape(&comment.author);

    html.push_str(&format!(
        "<div class=\"comment{reply_class}\" id=\"comment-{id}\">\
<div class=\"comment-header\">\
<img src=\"{avatar}\" alt=\"{author}\" class=\"comment-avatar\">\
<div><span class=\"comment-author\">{author}</span><span class=\"comment-date\">{date}</span></div>\
</div>\
<div class=\"comment-body\"><p>{body}</p></div>\
<button class=\"comment-reply\" data-comment-id=\"{id}\">Reply</button>",
        reply_class = reply_class,
        id = comment.id,
        avatar = html_escape(comment.avatar()),
        author = author,
        date = html_escape(&comment.created_at),
        body = text_with_breaks(&comment.content),
    ));

    reply_form(html, comment, ctx, form_visible);

    if let Some(inner) = replies {
        html.push_str("<div class=\"replies\">");
        html.push_str(inner);
        html.push_str("</div>");
    }
    html.push_str("</div>");
}

/// Fragment for a freshly posted comment: hidden reply form, empty replies container.
pub fn comment_fragment(comment: &Comment, ctx: &MarkupContext) -> String {
    let mut html = String::new();
    render_comment(&mut html, comment, ctx, false, Some(""));
    html
}
