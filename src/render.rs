//! Small HTML helpers shared by the page components.

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape text and turn line breaks into `<br>`.
pub fn text_with_breaks(s: &str) -> String {
    html_escape(&s.replace("\r\n", "\n")).replace('\n', "<br>")
}

/// Decode named and numeric character references the way a browser's
/// `textContent` does. `&nbsp;` becomes U+00A0.
pub fn decode_entities(s: &str) -> String {
    ::html_escape::decode_html_entities(s).into_owned()
}

/// ` style="display: none;"` when hidden, empty otherwise.
pub fn display_attr(visible: bool, shown_as: &str) -> String {
    if visible {
        if shown_as.is_empty() {
            String::new()
        } else {
            format!(" style=\"display: {};\"", shown_as)
        }
    } else {
        " style=\"display: none;\"".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_text() {
        assert_eq!(
            html_escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn line_breaks_render_as_br() {
        assert_eq!(text_with_breaks("one\ntwo\r\n<three>"), "one<br>two<br>&lt;three&gt;");
    }

    #[test]
    fn entity_decode_is_single_pass() {
        assert_eq!(decode_entities("a &amp;lt; b&nbsp;&amp; c"), "a &lt; b\u{a0}& c");
    }

    #[test]
    fn entity_decode_named_and_numeric() {
        assert_eq!(decode_entities("What&rsquo;s new &mdash; v2"), "What\u{2019}s new \u{2014} v2");
        assert_eq!(decode_entities("Rock &#8217;n&#x2019; roll"), "Rock \u{2019}n\u{2019} roll");
        assert_eq!(decode_entities("&lt;T&gt; &quot;x&quot; &#39;y&#39;"), "<T> \"x\" 'y'");
    }

    #[test]
    fn display_attr_variants() {
        assert_eq!(display_attr(false, "block"), " style=\"display: none;\"");
        assert_eq!(display_attr(true, "block"), " style=\"display: block;\"");
        assert_eq!(display_attr(true, ""), "");
    }
}
