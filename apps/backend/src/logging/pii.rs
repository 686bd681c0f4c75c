use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Vetted regex literals used for log redaction.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Phone numbers as users type them: optional `+`, then 7+ digits that
    /// may be separated by spaces, dashes or parentheses.
    pub fn phone() -> &'static Regex {
        static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\+?\(?\d[\d\s()-]{5,}\d").unwrap()
        });
        &PHONE_REGEX
    }

    /// Base64-like runs of 16+ chars (JWT segments, provider keys)
    pub fn base64_token() -> &'static Regex {
        static BASE64_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}\b").unwrap()
        });
        &BASE64_TOKEN_REGEX
    }

    /// Hex runs of 16+ chars (signatures)
    pub fn hex_token() -> &'static Regex {
        static HEX_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Fa-f0-9]{16,}\b").unwrap()
        });
        &HEX_TOKEN_REGEX
    }
}

/// Mask emails, opaque tokens and phone numbers.
///
/// Emails keep the first character of the local part and the domain. Tokens
/// become `[REDACTED_TOKEN]`, phone numbers `[REDACTED_PHONE]`. Emails go
/// first so their domains are not mistaken for tokens.
pub fn redact(input: &str) -> String {
    let email_redacted = PiiRegexRegistry::email().replace_all(input, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.find('@') {
            Some(0) | None => full_match.to_string(),
            Some(at_pos) => {
                let first_char: String = full_match.chars().take(1).collect();
                format!("{first_char}***{}", &full_match[at_pos..])
            }
        }
    });

    let base64_redacted =
        PiiRegexRegistry::base64_token().replace_all(&email_redacted, "[REDACTED_TOKEN]");
    let hex_redacted =
        PiiRegexRegistry::hex_token().replace_all(&base64_redacted, "[REDACTED_TOKEN]");

    PiiRegexRegistry::phone()
        .replace_all(&hex_redacted, "[REDACTED_PHONE]")
        .to_string()
}

/// Display wrapper that redacts its contents when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
