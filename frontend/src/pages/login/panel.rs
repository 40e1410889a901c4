use crate::{
    pages::login::{components::form::LoginForm, view_model::use_login_view_model},
    state::auth::use_session_reader,
    utils::navigation::redirect_to,
};
use leptos::{ev::SubmitEvent, Callback, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let session = use_session_reader();
    let vm = use_login_view_model();
    let pending = vm.login_action.pending();

    // Someone who is already signed in goes straight to their landing view.
    create_effect(move |_| {
        let state = session.get();
        if state.loading {
            return;
        }
        if let Some(identity) = state.identity {
            redirect_to(identity.role.home_path());
        }
    });

    let handle_submit = {
        let vm = vm.clone();
        Callback::new(move |ev: SubmitEvent| {
            ev.prevent_default();
            vm.submit();
        })
    };

    view! {
        <LoginForm
            form=vm.form
            error=vm.error.into()
            lockout=vm.lockout.into()
            pending=pending.into()
            on_submit=handle_submit
        />
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        state::{
            auth::{REMEMBERED_ROLE_KEY, REMEMBERED_USERNAME_KEY},
            credentials::CredentialMode,
            lockout::{FAILED_ATTEMPTS_KEY, LOCKOUT_UNTIL_KEY},
        },
        test_support::{
            helpers::{build_store, ManualClock},
            ssr::render_to_string,
        },
        utils::storage::{KeyValueStore, MemoryStorage},
    };

    fn render_with_storage(storage: MemoryStorage) -> String {
        render_to_string(move || {
            let store = build_store(&storage, &ManualClock::new(0), CredentialMode::Restricted);
            store.initialize();
            provide_context(store.reader());
            provide_context(store);
            view! { <LoginPanel /> }
        })
    }

    #[test]
    fn renders_form_with_role_choices() {
        let html = render_with_storage(MemoryStorage::new());
        assert!(html.contains("Sign in to Campusboard"));
        for role in ["professor", "student", "secretary", "leader"] {
            assert!(html.contains(&format!("value=\"{}\"", role)));
        }
        assert!(html.contains("Remember me for 7 days"));
        assert!(!html.contains("Sign-in is locked"));
    }

    #[test]
    fn renders_prefilled_username() {
        let storage = MemoryStorage::new();
        storage.set(REMEMBERED_USERNAME_KEY, "secretary1");
        storage.set(REMEMBERED_ROLE_KEY, "secretary");
        let html = render_with_storage(storage);
        assert!(html.contains("secretary1"));
    }

    #[test]
    fn renders_lockout_countdown() {
        let storage = MemoryStorage::new();
        storage.set(FAILED_ATTEMPTS_KEY, "5");
        storage.set(LOCKOUT_UNTIL_KEY, "900000");
        let html = render_with_storage(storage);
        assert!(html.contains("Try again in 15 minutes"));
    }
}
