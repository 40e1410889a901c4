#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use std::{cell::Cell, rc::Rc};

    use crate::{
        state::{
            auth::{AuthState, SessionSettings, SessionStore},
            credentials::{AllowListValidator, CredentialMode, CredentialValidator},
        },
        types::{Identity, Role},
        utils::{storage::MemoryStorage, time::Clock},
    };

    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Rc<Cell<i64>>,
    }

    impl ManualClock {
        pub fn new(start_ms: i64) -> Self {
            Self {
                now: Rc::new(Cell::new(start_ms)),
            }
        }

        pub fn advance(&self, ms: i64) {
            self.now.set(self.now.get() + ms);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.now.get()
        }
    }

    /// Allow-list validator that records how often it was consulted.
    #[derive(Clone)]
    pub struct CountingValidator {
        inner: AllowListValidator,
        calls: Rc<Cell<u32>>,
    }

    impl CountingValidator {
        pub fn restricted() -> Self {
            Self {
                inner: AllowListValidator::demo_accounts(CredentialMode::Restricted),
                calls: Rc::new(Cell::new(0)),
            }
        }

        pub fn calls(&self) -> u32 {
            self.calls.get()
        }
    }

    impl CredentialValidator for CountingValidator {
        fn validate(&self, username: &str, password: &str, role: Role) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.inner.validate(username, password, role)
        }
    }

    fn test_settings() -> SessionSettings {
        SessionSettings {
            login_latency_ms: 0,
            ..SessionSettings::default()
        }
    }

    pub fn build_store(
        storage: &MemoryStorage,
        clock: &ManualClock,
        mode: CredentialMode,
    ) -> SessionStore {
        SessionStore::new(
            Rc::new(storage.clone()),
            Rc::new(clock.clone()),
            Rc::new(AllowListValidator::demo_accounts(mode)),
            test_settings(),
        )
    }

    pub fn build_store_with_validator(
        storage: &MemoryStorage,
        clock: &ManualClock,
        validator: CountingValidator,
    ) -> SessionStore {
        SessionStore::new(
            Rc::new(storage.clone()),
            Rc::new(clock.clone()),
            Rc::new(validator),
            test_settings(),
        )
    }

    pub fn identity(role: Role) -> Identity {
        let username = format!("{}1", role.as_str());
        Identity {
            id: format!("u-{}", role.as_str()),
            email: format!("{}@campus.edu", username),
            display_name: username,
            role,
        }
    }

    pub fn signed_in(role: Role) -> AuthState {
        AuthState {
            identity: Some(identity(role)),
            expires_at: Some(i64::MAX),
            remember: false,
            loading: false,
        }
    }

    pub fn signed_out() -> AuthState {
        AuthState::default()
    }

    pub fn loading() -> AuthState {
        AuthState {
            loading: true,
            ..AuthState::default()
        }
    }
}
