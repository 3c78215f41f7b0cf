pub mod comment;
pub mod contact;
pub mod like;
pub mod project;

use indexmap::IndexMap;

/// Per-field validation messages, in the order the server listed them.
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// Compose one `Field: msg1, msg2` line per field, newline separated.
/// The field name gets its first letter upper-cased.
pub fn describe_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, msgs)| format!("{}: {}", capitalize(field), msgs.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_keep_server_order() {
        let errors: FieldErrors = serde_json::from_str(
            r#"{"name": ["Name is required for anonymous comments."], "content": ["This field is required.", "Too short."]}"#,
        )
        .unwrap();
        assert_eq!(
            describe_field_errors(&errors),
            "Name: Name is required for anonymous comments.\nContent: This field is required., Too short."
        );
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("émail"), "Émail");
    }
}
