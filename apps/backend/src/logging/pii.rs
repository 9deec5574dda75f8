//! Redaction helpers for log fields that may carry emails or bearer tokens.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)]
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap());

// JWT segments and other opaque credentials: long runs of base64url/hex.
#[allow(clippy::unwrap_used)]
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_\-+/=.]{24,}").unwrap());

/// Mask emails (first character of the local part kept) and long opaque tokens.
pub fn redact(input: &str) -> String {
    let emails = EMAIL.replace_all(input, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{domain}", &local[..1])
            }
            _ => full.to_string(),
        }
    });
    TOKEN.replace_all(&emails, "[REDACTED_TOKEN]").into_owned()
}

/// Display wrapper applying [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
