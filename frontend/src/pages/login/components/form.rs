use crate::{
    pages::login::{
        components::messages::{InlineErrorMessage, LockoutNotice},
        utils,
        view_model::LoginFormState,
    },
    state::lockout::LockoutStatus,
    types::AuthError,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginForm(
    form: LoginFormState,
    error: Signal<Option<AuthError>>,
    lockout: Signal<LockoutStatus>,
    pending: Signal<bool>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    let locked = Signal::derive(move || lockout.get().locked);
    let submit_disabled = move || pending.get() || locked.get();

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">
                        "Sign in to Campusboard"
                    </h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">
                        "Courses, schedules and notices in one place"
                    </p>
                </div>
                <form class="mt-8 space-y-6" on:submit=move |ev| on_submit.call(ev)>
                    <div class="rounded-md shadow-sm space-y-2">
                        <div>
                            <label for="username" class="sr-only">"Username"</label>
                            <input
                                id="username"
                                name="username"
                                type="text"
                                autocomplete="username"
                                required
                                class="appearance-none relative block w-full px-3 py-2 border border-border rounded-md placeholder-fg-muted text-fg focus:outline-none focus:ring-action-primary-bg sm:text-sm"
                                placeholder="Username"
                                value=form.username.get_untracked()
                                prop:value=form.username
                                on:input=move |ev| form.username.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label for="password" class="sr-only">"Password"</label>
                            <input
                                id="password"
                                name="password"
                                type="password"
                                autocomplete="current-password"
                                required
                                class="appearance-none relative block w-full px-3 py-2 border border-border rounded-md placeholder-fg-muted text-fg focus:outline-none focus:ring-action-primary-bg sm:text-sm"
                                placeholder="Password"
                                prop:value=form.password
                                on:input=move |ev| form.password.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label for="role" class="block text-sm font-medium text-fg-muted">"Sign in as"</label>
                            <select
                                id="role"
                                name="role"
                                class="mt-1 block w-full px-3 py-2 border border-border rounded-md text-fg sm:text-sm"
                                on:change=move |ev| form.role.set(utils::parse_role(&event_target_value(&ev)))
                            >
                                {utils::role_options()
                                    .into_iter()
                                    .map(|(value, label)| {
                                        view! {
                                            <option
                                                value=value
                                                selected=move || form.role.get().as_str() == value
                                            >
                                                {label}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="flex items-center">
                            <input
                                id="remember"
                                name="remember"
                                type="checkbox"
                                class="h-4 w-4 rounded border-border"
                                checked=form.remember.get_untracked()
                                prop:checked=form.remember
                                on:change=move |ev| form.remember.set(event_target_checked(&ev))
                            />
                            <label for="remember" class="ml-2 block text-sm text-fg-muted">
                                "Remember me for 7 days"
                            </label>
                        </div>
                    </div>

                    <LockoutNotice status=lockout />
                    <InlineErrorMessage error=error />

                    <div>
                        <button
                            type="submit"
                            disabled=submit_disabled
                            class="group relative w-full flex justify-center py-2 px-4 border border-transparent text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover disabled:opacity-50"
                        >
                            {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
