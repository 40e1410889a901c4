use crate::{
    components::layout::LoadingSpinner,
    state::auth::{use_session_reader, AuthState},
    types::Role,
    utils::navigation::{current_path, login_url, redirect_to},
};
use leptos::*;

/// What a protected view asks of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessRequirement {
    pub require_auth: bool,
    pub required_role: Option<Role>,
}

impl AccessRequirement {
    pub fn public() -> Self {
        Self::default()
    }

    pub fn authenticated() -> Self {
        Self {
            require_auth: true,
            required_role: None,
        }
    }

    pub fn role(role: Role) -> Self {
        Self {
            require_auth: true,
            required_role: Some(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Wait,
    /// `return_to` is advisory; login does not have to honour it.
    RedirectToLogin { return_to: Option<String> },
    RedirectToHome(Role),
    Render,
}

impl AccessDecision {
    pub fn redirect_target(&self) -> Option<String> {
        match self {
            AccessDecision::RedirectToLogin { return_to } => Some(login_url(return_to.as_deref())),
            AccessDecision::RedirectToHome(role) => Some(role.home_path().to_string()),
            AccessDecision::Wait | AccessDecision::Render => None,
        }
    }
}

pub fn evaluate_access(
    requirement: &AccessRequirement,
    state: &AuthState,
    requested_path: Option<&str>,
) -> AccessDecision {
    if state.loading {
        return AccessDecision::Wait;
    }
    let to_login = || AccessDecision::RedirectToLogin {
        return_to: requested_path.map(str::to_string),
    };
    let identity = state.identity.as_ref();
    if requirement.require_auth && identity.is_none() {
        return to_login();
    }
    if let Some(required) = requirement.required_role {
        return match identity {
            None => to_login(),
            Some(identity) if identity.role != required => {
                AccessDecision::RedirectToHome(identity.role)
            }
            Some(_) => AccessDecision::Render,
        };
    }
    AccessDecision::Render
}

#[component]
pub fn RequireAccess(requirement: AccessRequirement, children: ChildrenFn) -> impl IntoView {
    let session = use_session_reader();
    let decision = create_memo(move |_| evaluate_access(&requirement, &session.get(), None));
    create_effect(move |_| {
        let state = session.get();
        let decision = evaluate_access(&requirement, &state, current_path().as_deref());
        if let Some(target) = decision.redirect_target() {
            redirect_to(&target);
        }
    });
    view! {
        <Show
            when=move || decision.get() == AccessDecision::Render
            fallback=move || {
                if decision.get() == AccessDecision::Wait {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::{AccessRequirement, RequireAccess};
    use crate::test_support::helpers::{loading, signed_in, signed_out};
    use crate::test_support::ssr::{provide_session_state, render_to_string};
    use crate::types::Role;
    use leptos::*;

    fn render_guarded(
        state: crate::state::auth::AuthState,
        requirement: AccessRequirement,
    ) -> String {
        render_to_string(move || {
            provide_session_state(state);
            view! {
                <RequireAccess requirement=requirement>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAccess>
            }
        })
    }

    #[test]
    fn renders_children_for_matching_role() {
        let html = render_guarded(signed_in(Role::Leader), AccessRequirement::role(Role::Leader));
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn hides_children_for_other_roles() {
        let html = render_guarded(signed_in(Role::Student), AccessRequirement::role(Role::Leader));
        assert!(!html.contains("protected-content"));
        assert!(!html.contains("animate-spin"));
    }

    #[test]
    fn hides_children_when_signed_out() {
        let html = render_guarded(signed_out(), AccessRequirement::authenticated());
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn shows_spinner_while_loading() {
        let html = render_guarded(loading(), AccessRequirement::role(Role::Professor));
        assert!(html.contains("animate-spin"));
        assert!(!html.contains("protected-content"));
    }
}
