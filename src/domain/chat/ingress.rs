//! Ingress rules shared by the web form and the credentialed API.

use crate::domain::foundation::ValidationError;

use super::message::MessageType;

/// Decides whether message content is a bot command.
///
/// Owned by the bot side of the system; ingress only asks the question.
pub trait CommandClassifier: Send + Sync {
    fn is_command(&self, content: &str) -> bool;

    /// Message type to stamp on new content.
    fn classify(&self, content: &str) -> MessageType {
        if self.is_command(content) {
            MessageType::Command
        } else {
            MessageType::Text
        }
    }
}

/// Commands look like `/name ...`: a slash followed by a word character.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixCommandClassifier;

impl CommandClassifier for PrefixCommandClassifier {
    fn is_command(&self, content: &str) -> bool {
        let mut chars = content.chars();
        chars.next() == Some('/') && chars.next().is_some_and(is_word_char)
    }
}

/// Rejects empty message content.
pub fn validate_content(content: Option<&str>) -> Result<&str, ValidationError> {
    match content {
        Some(c) if !c.is_empty() => Ok(c),
        _ => Err(ValidationError::empty_field("content")),
    }
}

/// Trims a web-form nickname and checks it starts with a word character.
pub fn validate_nickname(nickname: Option<&str>) -> Result<String, ValidationError> {
    let nickname = nickname.unwrap_or_default().trim();
    if nickname.is_empty() {
        return Err(ValidationError::empty_field("nickname"));
    }
    if !nickname.chars().next().is_some_and(is_word_char) {
        return Err(ValidationError::invalid_format(
            "nickname",
            "must start with a word character",
        ));
    }
    Ok(nickname.to_string())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_word_is_a_command() {
        let classifier = PrefixCommandClassifier;
        assert!(classifier.is_command("/help"));
        assert!(classifier.is_command("/pia someone"));
        assert_eq!(classifier.classify("/help"), MessageType::Command);
    }

    #[test]
    fn plain_text_and_bare_slashes_are_text() {
        let classifier = PrefixCommandClassifier;
        assert!(!classifier.is_command("hello /help"));
        assert!(!classifier.is_command("/ spaced"));
        assert!(!classifier.is_command("/"));
        assert!(!classifier.is_command(""));
        assert_eq!(classifier.classify("hi"), MessageType::Text);
    }

    #[test]
    fn content_must_be_present_and_non_empty() {
        assert!(validate_content(None).is_err());
        assert!(validate_content(Some("")).is_err());
        assert_eq!(validate_content(Some(" ")).unwrap(), " ");
    }

    #[test]
    fn nickname_is_trimmed() {
        assert_eq!(validate_nickname(Some("  alice ")).unwrap(), "alice");
    }

    #[test]
    fn nickname_accepts_unicode_word_start() {
        assert_eq!(validate_nickname(Some("小明")).unwrap(), "小明");
        assert_eq!(validate_nickname(Some("_bot")).unwrap(), "_bot");
    }

    #[test]
    fn nickname_missing_or_blank_is_empty_field() {
        assert_eq!(
            validate_nickname(None),
            Err(ValidationError::empty_field("nickname"))
        );
        assert_eq!(
            validate_nickname(Some("   ")),
            Err(ValidationError::empty_field("nickname"))
        );
    }

    #[test]
    fn nickname_starting_with_symbol_is_invalid() {
        let err = validate_nickname(Some("<script>")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }
}
