use crate::{pages::login::utils::lockout_message, state::lockout::LockoutStatus, types::AuthError};
use leptos::*;

#[component]
pub fn InlineErrorMessage(error: Signal<Option<AuthError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div
                class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded"
                data-code=move || error.get().map(|e| e.code()).unwrap_or_default()
            >
                {move || error.get().map(|e| e.to_string()).unwrap_or_default()}
            </div>
        </Show>
    }
}

#[component]
pub fn LockoutNotice(status: Signal<LockoutStatus>) -> impl IntoView {
    let message = move || lockout_message(&status.get());
    view! {
        <Show when=move || message().is_some() fallback=|| ()>
            <div class="bg-status-warning-bg border border-status-warning-border text-status-warning-text px-4 py-3 rounded">
                {move || message().unwrap_or_default()}
            </div>
        </Show>
    }
}
