use std::fmt;

/// A line of user input that is guaranteed to be trimmed and non-blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputString(String);

impl InputString {
    /// Returns `None` when `text` is empty or only whitespace.
    pub fn new(text: impl AsRef<str>) -> Option<InputString> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return None;
        }

        Some(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for InputString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for InputString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input() {
        assert_eq!(InputString::new(""), None);
        assert_eq!(InputString::new("   "), None);
        assert_eq!(InputString::new(" \t\r\n "), None);
    }

    #[test]
    fn trims_input() {
        let input = InputString::new("  GET foo \n").unwrap();
        assert_eq!(input.as_str(), "GET foo");
    }

    #[test]
    fn keeps_inner_whitespace() {
        let input = InputString::new("SET  foo\tbar").unwrap();
        assert_eq!(input.to_string(), "SET  foo\tbar");
    }
}
