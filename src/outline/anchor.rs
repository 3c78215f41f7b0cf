use regex::Regex;
use std::sync::OnceLock;

const SLUG_MAX: usize = 30;

fn non_alnum() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"))
}

/// Lower-case the text, collapse every run of non `[a-z0-9]` into `-`,
/// trim dashes at both ends, then keep the first 30 characters.
/// Truncation happens last, so the slug may end in a dash.
pub fn slug_fragment(text: &str) -> String {
    let lowered = text.to_lowercase();
    let dashed = non_alnum().replace_all(&lowered, "-");
    dashed.trim_matches('-').chars().take(SLUG_MAX).collect()
}

/// `heading-h<level>-<index>-<slug>`. The document-order index keeps ids
/// unique even when two headings share their text.
pub fn anchor_id(level: u8, index: usize, text: &str) -> String {
    format!("heading-h{}-{}-{}", level, index, slug_fragment(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_and_trims() {
        assert_eq!(slug_fragment("  Hello, World!  "), "hello-world");
        assert_eq!(slug_fragment("C++ & Rust: FFI"), "c-rust-ffi");
        assert_eq!(slug_fragment("???"), "");
    }

    #[test]
    fn slug_truncates_after_trimming() {
        let text = "Understanding the borrow checker in depth";
        let slug = slug_fragment(text);
        assert_eq!(slug.len(), 30);
        assert_eq!(slug, "understanding-the-borrow-check");

        // cut lands right after a separator
        assert_eq!(slug_fragment("abcdefghijklmnopqrstuvwxyz012 tail"), "abcdefghijklmnopqrstuvwxyz012-");
    }

    #[test]
    fn non_ascii_letters_become_separators() {
        assert_eq!(slug_fragment("Café Über"), "caf-ber");
    }

    #[test]
    fn identical_text_still_unique() {
        let a = anchor_id(2, 0, "Setup");
        let b = anchor_id(2, 3, "Setup");
        assert_eq!(a, "heading-h2-0-setup");
        assert_ne!(a, b);
    }
}
