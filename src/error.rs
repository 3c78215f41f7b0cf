/// Errors raised while talking to the site or loading page configuration.
///
/// Submission outcomes the server reports in its JSON body (validation
/// errors, `success: false`) are not errors at this level; they are decoded
/// into response structs and turned into toasts by the page components.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("HTTP error! status: {status} {reason}")]
    Http { status: u16, reason: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for FolioError {
    fn from(e: reqwest::Error) -> Self {
        FolioError::Transport(e.to_string())
    }
}

impl From<toml::de::Error> for FolioError {
    fn from(e: toml::de::Error) -> Self {
        FolioError::Config(e.to_string())
    }
}

impl From<url::ParseError> for FolioError {
    fn from(e: url::ParseError) -> Self {
        FolioError::Config(format!("invalid url: {}", e))
    }
}

impl FolioError {
    /// True for failures where no usable response came back at all
    /// (connection refused, unreadable body). These surface as the generic
    /// "network error" notice.
    pub fn is_network(&self) -> bool {
        matches!(self, FolioError::Transport(_) | FolioError::Decode(_))
    }
}
