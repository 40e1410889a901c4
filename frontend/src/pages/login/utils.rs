use crate::{
    state::{auth::validate_login_input, lockout::LockoutStatus},
    types::{AuthError, Role},
};

pub fn validate_credentials(username: &str, password: &str) -> Result<(), AuthError> {
    validate_login_input(username, password)
}

/// Role chosen in the form; anything unrecognised falls back to student.
pub fn parse_role(raw: &str) -> Role {
    raw.parse().unwrap_or(Role::Student)
}

pub fn role_options() -> Vec<(&'static str, &'static str)> {
    Role::ALL
        .into_iter()
        .map(|role| (role.as_str(), role.label()))
        .collect()
}

pub fn lockout_message(status: &LockoutStatus) -> Option<String> {
    if !status.locked {
        return None;
    }
    Some(match status.remaining_minutes {
        Some(1) => "Sign-in is locked. Try again in 1 minute.".to_string(),
        Some(minutes) => format!("Sign-in is locked. Try again in {} minutes.", minutes),
        None => "Sign-in is temporarily locked.".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn validate_credentials_requires_both_fields() {
        assert!(validate_credentials("", "pw").is_err());
        assert!(validate_credentials("student1", "").is_err());
        assert!(validate_credentials("student1", "pw").is_ok());
    }

    #[wasm_bindgen_test]
    fn parse_role_falls_back_to_student() {
        assert_eq!(parse_role("leader"), Role::Leader);
        assert_eq!(parse_role("unknown"), Role::Student);
    }

    #[wasm_bindgen_test]
    fn role_options_list_every_role() {
        let options = role_options();
        assert_eq!(options.len(), 4);
        assert!(options.contains(&("secretary", "Secretary")));
    }

    #[wasm_bindgen_test]
    fn lockout_message_pluralizes_minutes() {
        assert_eq!(lockout_message(&LockoutStatus::default()), None);
        let one = LockoutStatus {
            locked: true,
            remaining_minutes: Some(1),
        };
        assert_eq!(
            lockout_message(&one).as_deref(),
            Some("Sign-in is locked. Try again in 1 minute.")
        );
        let many = LockoutStatus {
            locked: true,
            remaining_minutes: Some(15),
        };
        assert!(lockout_message(&many).unwrap().contains("15 minutes"));
    }
}
