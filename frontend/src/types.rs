use leptos::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Professor,
    Student,
    Secretary,
    Leader,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Professor,
        Role::Student,
        Role::Secretary,
        Role::Leader,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Professor => "professor",
            Role::Student => "student",
            Role::Secretary => "secretary",
            Role::Leader => "leader",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Professor => "Professor",
            Role::Student => "Student",
            Role::Secretary => "Secretary",
            Role::Leader => "Leader",
        }
    }

    /// Landing view an identity with this role is sent to.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Professor => "/dashboard/professor",
            Role::Student => "/dashboard/student",
            Role::Secretary => "/dashboard/secretary",
            Role::Leader => "/dashboard/leader",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("Unknown role: {}", value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "emailDerived")]
    pub email: String,
    pub role: Role,
}

/// Username/role pre-fill kept for the login form when "remember me" was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RememberedLogin {
    pub username: String,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Too many failed attempts. Try again in {remaining_minutes} minute(s).")]
    AccountLocked { remaining_minutes: u32 },
    #[error("Invalid username, password or role. {attempts_remaining} attempt(s) remaining.")]
    InvalidCredentials { attempts_remaining: u32 },
    #[error("{0}")]
    Validation(String),
}

impl AuthError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AuthError::Validation(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::AccountLocked { .. } => "ACCOUNT_LOCKED",
            AuthError::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            AuthError::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<AuthError> for String {
    fn from(error: AuthError) -> Self {
        error.to_string()
    }
}

impl IntoView for AuthError {
    fn into_view(self) -> View {
        self.to_string().into_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively_and_rejects_unknown() {
        assert_eq!("Professor".parse::<Role>(), Ok(Role::Professor));
        assert_eq!(" leader ".parse::<Role>(), Ok(Role::Leader));
        assert!("admin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn role_home_paths_are_distinct_per_role() {
        let mut paths: Vec<_> = Role::ALL.iter().map(|r| r.home_path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 4);
        assert_eq!(Role::Student.home_path(), "/dashboard/student");
    }

    #[test]
    fn identity_serializes_with_persisted_field_names() {
        let identity = Identity {
            id: "id-1".into(),
            display_name: "student1".into(),
            email: "student1@campus.edu".into(),
            role: Role::Student,
        };
        let value = serde_json::to_value(&identity).unwrap();
        assert_eq!(value["displayName"], "student1");
        assert_eq!(value["emailDerived"], "student1@campus.edu");
        assert_eq!(value["role"], "student");

        let parsed: Identity = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, identity);
    }

    #[test]
    fn auth_error_codes_and_messages() {
        let locked = AuthError::AccountLocked {
            remaining_minutes: 15,
        };
        assert_eq!(locked.code(), "ACCOUNT_LOCKED");
        assert!(locked.to_string().contains("15 minute"));

        let invalid = AuthError::InvalidCredentials {
            attempts_remaining: 4,
        };
        assert_eq!(invalid.code(), "INVALID_CREDENTIALS");

        let raw: String = AuthError::validation("Username is required").into();
        assert_eq!(raw, "Username is required");
    }
}
