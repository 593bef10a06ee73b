use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

/// Node label: trimmed, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Trim `text` and refuse the result if nothing is left.
    pub fn new(text: impl AsRef<str>) -> DomainResult<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyLabel);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Label {
    type Error = DomainError;

    fn try_from(value: &str) -> DomainResult<Self> {
        Label::new(value)
    }
}

impl TryFrom<String> for Label {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Label::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_padded_text_when_creating_label_then_trims() {
        let label = Label::new("  docs/ \t").unwrap();
        assert_eq!(label.as_str(), "docs/");
    }

    #[test]
    fn given_whitespace_only_when_creating_label_then_refuses() {
        assert_eq!(Label::new(" \t\n "), Err(DomainError::EmptyLabel));
        assert_eq!(Label::new(""), Err(DomainError::EmptyLabel));
    }

    #[test]
    fn given_inner_whitespace_when_creating_label_then_keeps_it() {
        let label = Label::try_from("my  file.txt").unwrap();
        assert_eq!(label.to_string(), "my  file.txt");
    }
}
