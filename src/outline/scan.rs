use log::debug;
use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::anchor::anchor_id;
use crate::render::{decode_entities, html_escape};

/// One h2–h4 heading of the content region, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub id: String,
    pub text: String,
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<h([2-4])(\s[^>]*)?>(.*?)</h([2-4])\s*>").expect("valid regex")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"))
}

fn id_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\s+id\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).expect("valid regex")
    })
}

/// Text content of a heading: tags dropped, entities decoded.
pub fn text_content(inner_html: &str) -> String {
    decode_entities(&tag_re().replace_all(inner_html, ""))
}

/// Find the h2–h4 headings of `content_html`, give each a generated id and
/// write the ids back onto the tags. Returns the rewritten HTML and the
/// headings in document order.
pub fn annotate(content_html: &str) -> (String, Vec<Heading>) {
    let mut headings = Vec::new();
    let rewritten = heading_re().replace_all(content_html, |caps: &Captures| {
        let open = &caps[1];
        if open != &caps[4] {
            // <h2>..</h3>: leave malformed markup untouched
            return caps[0].to_string();
        }
        let level: u8 = open.parse().unwrap_or(2);
        let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let attrs = id_attr_re().replace_all(attrs, "");
        let inner = &caps[3];
        let text = text_content(inner);
        let id = anchor_id(level, headings.len(), &text);
        debug!("heading h{} -> #{}", level, id);
        let tag = format!("<h{}{} id=\"{}\">{}</h{}>", level, attrs, html_escape(&id), inner, level);
        headings.push(Heading { level, id, text });
        tag
    });
    (rewritten.into_owned(), headings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_levels_two_to_four_in_order() {
        let html = "<h1>Title</h1><h2>Intro</h2><p>x</p><h3>Detail</h3><h5>skip</h5><h4>Deep</h4>";
        let (_, headings) = annotate(html);
        let levels: Vec<u8> = headings.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![2, 3, 4]);
        assert_eq!(headings[0].id, "heading-h2-0-intro");
        assert_eq!(headings[2].id, "heading-h4-2-deep");
    }

    #[test]
    fn replaces_existing_ids_and_keeps_other_attrs() {
        let html = r#"<h2 class="lead" id="old">Getting <em>started</em></h2>"#;
        let (out, headings) = annotate(html);
        assert_eq!(headings[0].text, "Getting started");
        assert_eq!(
            out,
            r#"<h2 class="lead" id="heading-h2-0-getting-started">Getting <em>started</em></h2>"#
        );
    }

    #[test]
    fn decodes_entities_before_slugging() {
        let (_, headings) = annotate("<H3>Q&amp;A&nbsp;time</H3>");
        assert_eq!(headings[0].level, 3);
        assert_eq!(headings[0].text, "Q&A\u{a0}time");
        assert_eq!(headings[0].id, "heading-h3-0-q-a-time");
    }

    #[test]
    fn typographic_entities_decode_to_characters() {
        let (_, headings) = annotate("<h2>What&rsquo;s new</h2><h2>Rock &#8217;n&#8217; roll</h2>");
        assert_eq!(headings[0].text, "What\u{2019}s new");
        assert_eq!(headings[0].id, "heading-h2-0-what-s-new");
        assert_eq!(headings[1].text, "Rock \u{2019}n\u{2019} roll");
        assert_eq!(headings[1].id, "heading-h2-1-rock-n-roll");
    }

    #[test]
    fn mismatched_close_is_skipped() {
        let (out, headings) = annotate("<h2>broken</h3><h2>fine</h2>");
        assert_eq!(headings.len(), 1);
        assert!(out.starts_with("<h2>broken</h3>"));
        assert_eq!(headings[0].id, "heading-h2-0-fine");
    }
}
