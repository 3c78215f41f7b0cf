use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::FolioError;

/// Share buttons of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    Twitter,
    LinkedIn,
    Facebook,
    /// Copy the page link to the clipboard.
    CopyLink,
}

impl FromStr for ShareTarget {
    type Err = FolioError;

    /// Accepts the button's class name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twitter" => Ok(ShareTarget::Twitter),
            "linkedin" => Ok(ShareTarget::LinkedIn),
            "facebook" => Ok(ShareTarget::Facebook),
            "copy-link" => Ok(ShareTarget::CopyLink),
            other => Err(FolioError::Config(format!("unknown share target: {}", other))),
        }
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShareTarget::Twitter => "twitter",
            ShareTarget::LinkedIn => "linkedin",
            ShareTarget::Facebook => "facebook",
            ShareTarget::CopyLink => "copy-link",
        };
        write!(f, "{}", s)
    }
}

/// The page address as shared: everything before the first `#`.
pub fn canonical_page_url(page_url: &str) -> &str {
    page_url.split('#').next().unwrap_or(page_url)
}

/// Where the share button sends the visitor. For `CopyLink` this is the
/// page address itself.
pub fn share_url(target: ShareTarget, page_url: &str, title: &str) -> Result<String, FolioError> {
    let page = canonical_page_url(page_url);
    let url = match target {
        ShareTarget::Twitter => {
            Url::parse_with_params("https://twitter.com/intent/tweet", &[("url", page), ("text", title)])?
        }
        ShareTarget::LinkedIn => Url::parse_with_params(
            "https://www.linkedin.com/shareArticle",
            &[("mini", "true"), ("url", page), ("title", title)],
        )?,
        ShareTarget::Facebook => {
            Url::parse_with_params("https://www.facebook.com/sharer/sharer.php", &[("u", page)])?
        }
        ShareTarget::CopyLink => return Ok(page.to_string()),
    };
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://blog.example/blog/rust-tips/#heading-h2-0-intro";

    #[test]
    fn fragment_is_dropped() {
        assert_eq!(canonical_page_url(PAGE), "https://blog.example/blog/rust-tips/");
        assert_eq!(canonical_page_url("https://a.example/"), "https://a.example/");
    }

    #[test]
    fn twitter_carries_url_and_text() {
        let url = share_url(ShareTarget::Twitter, PAGE, "Rust & tips").unwrap();
        assert_eq!(
            url,
            "https://twitter.com/intent/tweet?url=https%3A%2F%2Fblog.example%2Fblog%2Frust-tips%2F&text=Rust+%26+tips"
        );
    }

    #[test]
    fn linkedin_and_facebook_shapes() {
        let li = share_url(ShareTarget::LinkedIn, PAGE, "T").unwrap();
        assert!(li.starts_with("https://www.linkedin.com/shareArticle?mini=true&url="));
        assert!(li.ends_with("&title=T"));
        let fb = share_url(ShareTarget::Facebook, PAGE, "ignored").unwrap();
        assert_eq!(
            fb,
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fblog.example%2Fblog%2Frust-tips%2F"
        );
    }

    #[test]
    fn copy_link_is_the_page() {
        assert_eq!(share_url(ShareTarget::CopyLink, PAGE, "x").unwrap(), "https://blog.example/blog/rust-tips/");
    }

    #[test]
    fn parses_button_classes() {
        assert_eq!("linkedin".parse::<ShareTarget>().unwrap(), ShareTarget::LinkedIn);
        assert!("myspace".parse::<ShareTarget>().is_err());
        assert_eq!(ShareTarget::CopyLink.to_string(), "copy-link");
    }
}
