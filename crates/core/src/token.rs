//! Anti-forgery (CSRF) credential.

use crate::error::DomainError;

/// Per-session anti-forgery token sent with state-changing requests.
///
/// `Debug` is redacted so the value never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::validation("csrf token cannot be empty"));
        }
        Ok(Self(raw))
    }

    /// The raw header value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("CsrfToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let token = CsrfToken::new("s3cr3t").unwrap();
        assert_eq!(format!("{token:?}"), "CsrfToken(***)");
        assert_eq!(token.expose(), "s3cr3t");
    }

    #[test]
    fn blank_token_is_rejected() {
        assert!(CsrfToken::new("   ").is_err());
    }
}
