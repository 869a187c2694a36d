use serde::{Deserialize, Serialize};

/// The authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    /// `Name <email>` for status lines
    pub fn display(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_without_avatar() {
        let json = r#"{"id": 1, "name": "Admin", "email": "admin@example.com", "email_verified_at": null}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.avatar, None);
        assert_eq!(user.display(), "Admin <admin@example.com>");
    }

    #[test]
    fn test_parse_user_rejects_missing_email() {
        let json = r#"{"id": 1, "name": "Admin"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }
}
