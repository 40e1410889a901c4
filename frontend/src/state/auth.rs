//! Session state for the dashboard.
//!
//! `SessionStore` owns the current identity and its expiry. localStorage is the
//! canonical copy and the reactive `AuthState` signal is a cache of it:
//! `initialize` fills the cache at startup and every revalidation tick
//! re-reads storage before touching it.

use std::rc::Rc;

use leptos::*;
use uuid::Uuid;

use crate::{
    config::{self, RuntimeConfig},
    state::{
        credentials::{AllowListValidator, CredentialValidator},
        lockout::{LockoutDecision, LockoutStatus, LoginAttemptGovernor},
    },
    types::{AuthError, Identity, RememberedLogin, Role},
    utils::{
        storage::{BrowserStorage, KeyValueStore, UnavailableStorage},
        time::{Clock, SystemClock, DAY_MS, HOUR_MS},
    },
};

pub const SESSION_TTL_MS: i64 = 2 * HOUR_MS;
pub const REMEMBERED_SESSION_TTL_MS: i64 = 7 * DAY_MS;

pub const SESSION_USER_KEY: &str = "campusboard.session.user";
pub const SESSION_EXPIRES_AT_KEY: &str = "campusboard.session.expires_at";
pub const SESSION_REMEMBER_KEY: &str = "campusboard.session.remember";
pub const REMEMBERED_USERNAME_KEY: &str = "campusboard.remember.username";
pub const REMEMBERED_ROLE_KEY: &str = "campusboard.remember.role";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub identity: Option<Identity>,
    pub expires_at: Option<i64>,
    pub remember: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|identity| identity.role)
    }

    fn signed_out(loading: bool) -> Self {
        Self {
            loading,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub login_latency_ms: u32,
    pub revalidate_interval_ms: u32,
    pub email_domain: String,
}

impl SessionSettings {
    pub fn from_config(cfg: &RuntimeConfig) -> Self {
        Self {
            login_latency_ms: cfg.login_latency_ms(),
            revalidate_interval_ms: cfg.revalidate_interval_ms(),
            email_domain: cfg.email_domain(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub remember: bool,
}

/// Rejects malformed input before any lockout or credential bookkeeping.
pub fn validate_login_input(username: &str, password: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() {
        return Err(AuthError::validation("Username is required"));
    }
    if password.is_empty() {
        return Err(AuthError::validation("Password is required"));
    }
    Ok(())
}

enum PersistedSession {
    Absent,
    Expired,
    Corrupt,
    Valid {
        identity: Identity,
        expires_at: i64,
        remember: bool,
    },
}

/// Handle on the periodic expiry check. Dropping it stops the timer.
pub struct RevalidationTask {
    #[cfg(target_arch = "wasm32")]
    interval: Option<gloo_timers::callback::Interval>,
}

impl RevalidationTask {
    pub fn is_active(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.interval.is_some()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for RevalidationTask {
    fn drop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(interval) = self.interval.take() {
                drop(interval);
                log::debug!("session revalidation stopped");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn simulate_latency(ms: u32) {
    if ms > 0 {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn simulate_latency(_ms: u32) {}

/// Read-only view for guards and views that only render from the session.
#[derive(Clone, Copy)]
pub struct SessionReader {
    state: ReadSignal<AuthState>,
}

impl SessionReader {
    pub fn from_signal(state: ReadSignal<AuthState>) -> Self {
        Self { state }
    }

    pub fn get(&self) -> AuthState {
        self.state.get()
    }
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    validator: Rc<dyn CredentialValidator>,
    governor: LoginAttemptGovernor,
    settings: Rc<SessionSettings>,
    state: RwSignal<AuthState>,
}

impl SessionStore {
    pub fn new(
        storage: Rc<dyn KeyValueStore>,
        clock: Rc<dyn Clock>,
        validator: Rc<dyn CredentialValidator>,
        settings: SessionSettings,
    ) -> Self {
        let governor = LoginAttemptGovernor::new(storage.clone(), clock.clone());
        Self {
            storage,
            clock,
            validator,
            governor,
            settings: Rc::new(settings),
            state: create_rw_signal(AuthState::signed_out(true)),
        }
    }

    pub fn reader(&self) -> SessionReader {
        SessionReader {
            state: self.state.read_only(),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.get_untracked()
    }

    pub fn governor(&self) -> &LoginAttemptGovernor {
        &self.governor
    }

    pub fn lockout_status(&self) -> LockoutStatus {
        self.governor.current_status()
    }

    pub fn initialize(&self) {
        let next = self.load_persisted();
        self.state.set(next);
        if let Some(identity) = self.state.get_untracked().identity {
            log::info!("restored session for {} ({})", identity.display_name, identity.role);
        }
    }

    /// Periodic expiry check. Reads the persisted session rather than the
    /// in-memory copy, so logins and logouts made elsewhere are picked up.
    pub fn revalidate(&self) {
        let current = self.state.get_untracked();
        let mut next = self.load_persisted();
        next.loading = current.loading;
        if next != current {
            if current.is_authenticated() && !next.is_authenticated() {
                log::info!("session ended during revalidation");
            }
            self.state.set(next);
        }
    }

    pub fn start_revalidation(&self) -> RevalidationTask {
        #[cfg(target_arch = "wasm32")]
        {
            let store = self.clone();
            let interval = gloo_timers::callback::Interval::new(
                self.settings.revalidate_interval_ms,
                move || store.revalidate(),
            );
            RevalidationTask {
                interval: Some(interval),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            log::debug!(
                "session revalidation every {} ms skipped outside the browser",
                self.settings.revalidate_interval_ms
            );
            RevalidationTask {}
        }
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
        role: Role,
        remember: bool,
    ) -> Result<Identity, AuthError> {
        validate_login_input(username, password)?;

        let status = self.governor.current_status();
        if status.locked {
            return Err(AuthError::AccountLocked {
                remaining_minutes: status.remaining_minutes.unwrap_or(1),
            });
        }

        simulate_latency(self.settings.login_latency_ms).await;

        if !self.validator.validate(username, password, role) {
            log::info!("login rejected for {}", username.trim());
            return Err(match self.governor.record_failure() {
                LockoutDecision::Locked {
                    remaining_minutes, ..
                } => AuthError::AccountLocked { remaining_minutes },
                LockoutDecision::Allowed { remaining } => AuthError::InvalidCredentials {
                    attempts_remaining: remaining,
                },
            });
        }

        self.governor.record_success();
        let identity = self.synthesize_identity(username, role);
        let ttl = if remember {
            REMEMBERED_SESSION_TTL_MS
        } else {
            SESSION_TTL_MS
        };
        let expires_at = self.clock.now_ms() + ttl;
        self.persist_session(&identity, expires_at, remember);
        if remember {
            self.storage.set(REMEMBERED_USERNAME_KEY, &identity.display_name);
            self.storage.set(REMEMBERED_ROLE_KEY, role.as_str());
        } else {
            self.forget_remembered_login();
        }

        self.state.set(AuthState {
            identity: Some(identity.clone()),
            expires_at: Some(expires_at),
            remember,
            loading: false,
        });
        log::info!("signed in {} as {}", identity.display_name, role);
        Ok(identity)
    }

    pub fn logout(&self) {
        self.purge_session();
        self.forget_remembered_login();
        if self.state.get_untracked().is_authenticated() {
            log::info!("signed out");
        }
        self.state.set(AuthState::signed_out(false));
    }

    pub fn remembered_login(&self) -> Option<RememberedLogin> {
        let username = self
            .storage
            .get(REMEMBERED_USERNAME_KEY)
            .filter(|name| !name.trim().is_empty())?;
        let role = self
            .storage
            .get(REMEMBERED_ROLE_KEY)
            .and_then(|raw| raw.parse::<Role>().ok());
        Some(RememberedLogin { username, role })
    }

    fn synthesize_identity(&self, username: &str, role: Role) -> Identity {
        let username = username.trim();
        Identity {
            id: Uuid::new_v4().to_string(),
            display_name: username.to_string(),
            email: format!(
                "{}@{}",
                username.to_lowercase(),
                self.settings.email_domain
            ),
            role,
        }
    }

    fn read_persisted(&self) -> PersistedSession {
        let raw_user = self.storage.get(SESSION_USER_KEY);
        let raw_expiry = self.storage.get(SESSION_EXPIRES_AT_KEY);
        let (raw_user, raw_expiry) = match (raw_user, raw_expiry) {
            (None, None) => return PersistedSession::Absent,
            (Some(user), Some(expiry)) => (user, expiry),
            _ => return PersistedSession::Corrupt,
        };
        let Ok(expires_at) = raw_expiry.trim().parse::<i64>() else {
            return PersistedSession::Corrupt;
        };
        if expires_at <= self.clock.now_ms() {
            return PersistedSession::Expired;
        }
        match serde_json::from_str::<Identity>(&raw_user) {
            Ok(identity) => PersistedSession::Valid {
                identity,
                expires_at,
                remember: self.storage.get(SESSION_REMEMBER_KEY).as_deref() == Some("true"),
            },
            Err(err) => {
                log::warn!("discarding unreadable session: {}", err);
                PersistedSession::Corrupt
            }
        }
    }

    /// Signed-out state (purging storage) unless a live session is persisted.
    fn load_persisted(&self) -> AuthState {
        match self.read_persisted() {
            PersistedSession::Valid {
                identity,
                expires_at,
                remember,
            } => AuthState {
                identity: Some(identity),
                expires_at: Some(expires_at),
                remember,
                loading: false,
            },
            PersistedSession::Absent => AuthState::signed_out(false),
            PersistedSession::Expired => {
                log::info!("persisted session expired");
                self.purge_session();
                AuthState::signed_out(false)
            }
            PersistedSession::Corrupt => {
                self.purge_session();
                AuthState::signed_out(false)
            }
        }
    }

    fn persist_session(&self, identity: &Identity, expires_at: i64, remember: bool) {
        match serde_json::to_string(identity) {
            Ok(json) => self.storage.set(SESSION_USER_KEY, &json),
            Err(err) => log::warn!("failed to serialize identity: {}", err),
        }
        self.storage.set(SESSION_EXPIRES_AT_KEY, &expires_at.to_string());
        if remember {
            self.storage.set(SESSION_REMEMBER_KEY, "true");
        } else {
            self.storage.remove(SESSION_REMEMBER_KEY);
        }
    }

    fn purge_session(&self) {
        self.storage.remove(SESSION_USER_KEY);
        self.storage.remove(SESSION_EXPIRES_AT_KEY);
        self.storage.remove(SESSION_REMEMBER_KEY);
    }

    fn forget_remembered_login(&self) {
        self.storage.remove(REMEMBERED_USERNAME_KEY);
        self.storage.remove(REMEMBERED_ROLE_KEY);
    }
}

fn create_session_store() -> SessionStore {
    let cfg = config::current();
    let validator = AllowListValidator::demo_accounts(cfg.credential_mode());
    SessionStore::new(
        Rc::new(BrowserStorage),
        Rc::new(SystemClock),
        Rc::new(validator),
        SessionSettings::from_config(&cfg),
    )
}

#[component]
pub fn AuthProvider(#[prop(optional)] store: Option<SessionStore>, children: Children) -> impl IntoView {
    let store = store.unwrap_or_else(create_session_store);
    store.initialize();

    let revalidation = store.start_revalidation();
    on_cleanup(move || revalidation.cancel());

    provide_context(store.reader());
    provide_context(store);
    view! { <>{children()}</> }
}

pub fn use_session() -> SessionStore {
    use_context::<SessionStore>().unwrap_or_else(|| {
        let store = SessionStore::new(
            Rc::new(UnavailableStorage),
            Rc::new(SystemClock),
            Rc::new(AllowListValidator::demo_accounts(Default::default())),
            SessionSettings::default(),
        );
        store.initialize();
        store
    })
}

pub fn use_session_reader() -> SessionReader {
    use_context::<SessionReader>().unwrap_or_else(|| use_session().reader())
}

pub fn use_login_action() -> Action<LoginRequest, Result<Identity, AuthError>> {
    let store = use_session();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let store = store.clone();
        async move {
            store
                .login(
                    &payload.username,
                    &payload.password,
                    payload.role,
                    payload.remember,
                )
                .await
        }
    })
}

pub fn use_logout_action() -> Action<(), ()> {
    let store = use_session();

    create_action(move |_: &()| {
        let store = store.clone();
        async move { store.logout() }
    })
}
