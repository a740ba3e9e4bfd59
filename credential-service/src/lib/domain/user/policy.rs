use regex::Regex;
use regex::RegexBuilder;

use crate::domain::user::errors::UsernameError;
use crate::domain::user::models::Username;

/// Alphanumeric, with optional interior hyphens or underscores.
pub const DEFAULT_USERNAME_ALLOWED_PATTERN: &str = r"[A-Za-z0-9](?:[A-Za-z0-9_-]*[A-Za-z0-9])?";

/// Names that can never be registered, matched case-insensitively.
pub const DEFAULT_USERNAME_RESERVED_PATTERN: &str = "root|admin";

/// Username allow and reserved rules.
///
/// Both patterns must match the whole name, not a substring of it.
#[derive(Debug, Clone)]
pub struct UsernamePolicy {
    allowed: Regex,
    reserved: Regex,
}

impl UsernamePolicy {
    /// Compile a policy from raw patterns.
    ///
    /// # Arguments
    /// * `allowed` - Pattern a username must fully match
    /// * `reserved` - Pattern (case-insensitive) of names that are never available
    ///
    /// # Errors
    /// * `regex::Error` - Either pattern does not compile
    pub fn new(allowed: &str, reserved: &str) -> Result<Self, regex::Error> {
        let allowed = Regex::new(&anchored(allowed))?;
        let reserved = RegexBuilder::new(&anchored(reserved))
            .case_insensitive(true)
            .build()?;

        Ok(Self { allowed, reserved })
    }

    /// Validate a candidate username.
    ///
    /// # Returns
    /// Validated Username value object
    ///
    /// # Errors
    /// * `Malformed` - Name does not match the allow pattern
    /// * `Reserved` - Name matches the reserved pattern
    pub fn validate(&self, name: &str) -> Result<Username, UsernameError> {
        if !self.allowed.is_match(name) {
            return Err(UsernameError::Malformed(name.to_string()));
        }

        if self.reserved.is_match(name) {
            return Err(UsernameError::Reserved(name.to_string()));
        }

        Ok(Username::new(name.to_string()))
    }
}

impl Default for UsernamePolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_USERNAME_ALLOWED_PATTERN,
            DEFAULT_USERNAME_RESERVED_PATTERN,
        )
        .expect("default username patterns compile")
    }
}

fn anchored(pattern: &str) -> String {
    format!("^(?:{})$", pattern)
}
