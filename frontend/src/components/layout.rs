use crate::{
    state::auth::{self, use_session_reader},
    utils::{
        navigation::{redirect_to, LOGIN_PATH},
        time::format_timestamp,
    },
};
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let session = use_session_reader();
    let identity = move || session.get().identity;
    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();
    {
        create_effect(move |_| {
            if logout_action.value().get().is_some() {
                redirect_to(LOGIN_PATH);
            }
        });
    }
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        logout_action.dispatch(());
    };
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center">
                        <h1 class="text-xl font-semibold text-fg">
                            "Campusboard"
                        </h1>
                    </div>
                    <Show when=move || identity().is_some()>
                        <nav class="flex items-center space-x-4">
                            <a
                                href=move || identity().map(|i| i.role.home_path()).unwrap_or("/")
                                class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                            >
                                "Dashboard"
                            </a>
                            <span class="text-sm text-fg-muted">
                                {move || identity().map(|i| format!("{} ({})", i.display_name, i.role.label())).unwrap_or_default()}
                            </span>
                            <button
                                on:click=on_logout
                                class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium disabled:opacity-50 hover:bg-action-ghost-bg-hover"
                                disabled={move || logout_pending.get()}
                            >
                                "Sign out"
                            </button>
                        </nav>
                    </Show>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                <SessionExpiryNotice/>
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn SessionExpiryNotice() -> impl IntoView {
    let session = use_session_reader();
    let message = move || {
        let state = session.get();
        state
            .expires_at
            .filter(|_| state.is_authenticated())
            .map(|at| {
                if state.remember {
                    format!("Signed in until {} (remembered on this device)", format_timestamp(at))
                } else {
                    format!("Signed in until {}", format_timestamp(at))
                }
            })
    };
    view! {
        <Show when=move || message().is_some()>
            <p class="text-xs text-fg-muted mb-4">{move || message().unwrap_or_default()}</p>
        </Show>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}
