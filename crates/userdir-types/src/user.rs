use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Int(id) => write!(f, "{}", id),
            UserId::Str(id) => write!(f, "{}", id),
        }
    }
}

/// Account status as it appears in the source document.
///
/// Only `"Active"` and `"Inactive"` are recognized. Any other string is kept
/// verbatim so it can be shown as-is; such a status never matches a specific
/// filter and is styled like an inactive account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Active,
    Inactive,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
            Status::Other(raw) => raw,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Status::Active)
    }
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Active" => Status::Active,
            "Inactive" => Status::Inactive,
            _ => Status::Other(raw),
        }
    }
}

impl From<&str> for Status {
    fn from(raw: &str) -> Self {
        Status::from(raw.to_string())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    pub status: Status,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, status: impl Into<Status>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            mobile: String::new(),
            status: status.into(),
        }
    }

    pub fn with_contact(mut self, email: impl Into<String>, mobile: impl Into<String>) -> Self {
        self.email = email.into();
        self.mobile = mobile.into();
        self
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Int(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Str(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId::Str(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_json() {
        let json = r#"{"id": 7, "name": "Alice Smith", "email": "alice@example.com", "mobile": "555-0100", "status": "Active"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, UserId::Int(7));
        assert_eq!(user.name, "Alice Smith");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.mobile, "555-0100");
        assert_eq!(user.status, Status::Active);
    }

    #[test]
    fn test_string_ids_are_accepted() {
        let json = r#"{"id": "u-42", "name": "Bob", "email": "", "mobile": "", "status": "Inactive"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, UserId::Str("u-42".to_string()));
        assert_eq!(user.id.to_string(), "u-42");
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let json = r#"{"id": 1, "name": "Carol", "status": "Suspended"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.status, Status::Other("Suspended".to_string()));
        assert!(!user.status.is_active());

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["status"], "Suspended");
    }

    #[test]
    fn test_status_is_case_sensitive() {
        assert_eq!(Status::from("active"), Status::Other("active".to_string()));
        assert!(!Status::from("active").is_active());
        assert!(Status::from("Active").is_active());
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let json = r#"{"id": 1, "status": "Active"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }
}
