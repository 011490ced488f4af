use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Identity carried by a verified bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn new(user_id: &str, email: Option<&str>, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            email: email.map(str::to_string),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new("uid-42", Some("student@example.com"), 24);

        assert_eq!(claims.user_id(), "uid-42");
        assert_eq!(claims.email.as_deref(), Some("student@example.com"));
        assert!(claims.exp > claims.iat);
    }
}
