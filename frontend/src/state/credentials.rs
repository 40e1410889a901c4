//! Credential check consulted by the session store during login.
//!
//! This is the single seam standing in for a real identity provider. Nothing
//! else in the crate inspects passwords.

use crate::types::Role;

pub trait CredentialValidator {
    fn validate(&self, username: &str, password: &str, role: Role) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialMode {
    /// Only the allow-list is accepted; username, password and role must all match.
    Restricted,
    /// Any non-empty username/password pair is accepted for any role.
    #[default]
    Unrestricted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedAccount {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl AllowedAccount {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AllowListValidator {
    accounts: Vec<AllowedAccount>,
    mode: CredentialMode,
}

impl AllowListValidator {
    pub fn new(accounts: Vec<AllowedAccount>, mode: CredentialMode) -> Self {
        Self { accounts, mode }
    }

    /// One demo account per role.
    pub fn demo_accounts(mode: CredentialMode) -> Self {
        let accounts = Role::ALL
            .into_iter()
            .map(|role| {
                AllowedAccount::new(
                    format!("{}1", role.as_str()),
                    format!("{}123", role.as_str()),
                    role,
                )
            })
            .collect();
        Self::new(accounts, mode)
    }

    pub fn mode(&self) -> CredentialMode {
        self.mode
    }
}

impl CredentialValidator for AllowListValidator {
    fn validate(&self, username: &str, password: &str, role: Role) -> bool {
        let username = username.trim();
        match self.mode {
            CredentialMode::Unrestricted => !username.is_empty() && !password.is_empty(),
            CredentialMode::Restricted => self.accounts.iter().any(|account| {
                account.username == username && account.password == password && account.role == role
            }),
        }
    }
}
