use serde::Deserialize;
use serde::Serialize;

/// JWT claim set asserting a username.
///
/// Only `sub` is signed. Expiry is advertised next to the token by the
/// caller and is not part of the payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
}

impl Claims {
    /// Create claims for a subject.
    pub fn for_subject(sub: impl ToString) -> Self {
        Self {
            sub: sub.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_only_subject() {
        let claims = Claims::for_subject("alice");
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json, serde_json::json!({ "sub": "alice" }));
    }
}
