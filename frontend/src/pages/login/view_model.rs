use super::utils;
use crate::{
    state::{
        auth::{self, use_session, LoginRequest},
        lockout::LockoutStatus,
    },
    types::{AuthError, Identity, RememberedLogin, Role},
    utils::navigation::redirect_to,
};
use leptos::*;

const LOCKOUT_REFRESH_MS: u32 = 30_000;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
    pub role: RwSignal<Role>,
    pub remember: RwSignal<bool>,
}

impl LoginFormState {
    pub fn new(remembered: Option<RememberedLogin>) -> Self {
        let remember = remembered.is_some();
        let (username, role) = remembered
            .map(|login| (login.username, login.role.unwrap_or(Role::Student)))
            .unwrap_or_else(|| (String::new(), Role::Student));
        Self {
            username: create_rw_signal(username),
            password: create_rw_signal(String::new()),
            role: create_rw_signal(role),
            remember: create_rw_signal(remember),
        }
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            username: self.username.get_untracked(),
            password: self.password.get_untracked(),
            role: self.role.get_untracked(),
            remember: self.remember.get_untracked(),
        }
    }
}

#[derive(Clone)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<AuthError>>,
    pub lockout: RwSignal<LockoutStatus>,
    pub login_action: Action<LoginRequest, Result<Identity, AuthError>>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        let request = self.form.to_request();
        if let Err(err) = utils::validate_credentials(&request.username, &request.password) {
            self.error.set(Some(err));
            return;
        }
        self.error.set(None);
        self.login_action.dispatch(request);
    }

    pub fn is_locked(&self) -> Signal<bool> {
        let lockout = self.lockout;
        Signal::derive(move || lockout.get().locked)
    }
}

#[cfg(target_arch = "wasm32")]
fn refresh_every(
    ms: u32,
    callback: impl FnMut() + 'static,
) -> Option<gloo_timers::callback::Interval> {
    Some(gloo_timers::callback::Interval::new(ms, callback))
}

#[cfg(not(target_arch = "wasm32"))]
fn refresh_every(_ms: u32, _callback: impl FnMut() + 'static) -> Option<()> {
    None
}

pub fn use_login_view_model() -> LoginViewModel {
    let store = use_session();
    let form = LoginFormState::new(store.remembered_login());
    let error = create_rw_signal(None::<AuthError>);
    let lockout = create_rw_signal(store.lockout_status());
    let login_action = auth::use_login_action();

    // Keeps the countdown current; dropped with the page.
    let countdown_store = store.clone();
    let _countdown = store_value(refresh_every(LOCKOUT_REFRESH_MS, move || {
        lockout.set(countdown_store.lockout_status());
    }));

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            form.password.set(String::new());
            lockout.set(store.lockout_status());
            match result {
                Ok(identity) => {
                    error.set(None);
                    redirect_to(identity.role.home_path());
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        lockout,
        login_action,
    }
}
