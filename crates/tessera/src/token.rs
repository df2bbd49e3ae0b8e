//! The issued token value.

use std::fmt;

/// A signed token: `<timestamp>.<payload>.<signature>`.
///
/// Opaque to holders. Only [`Authenticator::decode`](crate::Authenticator::decode)
/// can tell whether its contents are trustworthy.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub(crate) const fn new(text: String) -> Self {
        Self(text)
    }

    /// Token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Token text as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Consume into the token text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length of the token text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for issued tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Tokens are bearer credentials; keep them out of debug logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for Token {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_text_without_debug_leak() {
        let token = Token::new("1700000000.ZGF0YQ.c2ln".to_string());
        assert_eq!(token.as_str(), "1700000000.ZGF0YQ.c2ln");
        assert_eq!(token.to_string(), token.as_str());
        assert_eq!(token.as_bytes(), b"1700000000.ZGF0YQ.c2ln");
        assert_eq!(token.len(), 22);
        assert!(!format!("{token:?}").contains("ZGF0YQ"));
        assert_eq!(String::from(token), "1700000000.ZGF0YQ.c2ln");
    }
}
