use serde::Deserialize;

use super::FieldErrors;

/// Body of the contact endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
}

/// Contact form fields. `subject` may be blank; the server fills a default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactDraft {
    pub fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("name".into(), self.name.clone()),
            ("email".into(), self.email.clone()),
            ("subject".into(), self.subject.clone()),
            ("message".into(), self.message.clone()),
        ]
    }
}
