use leptos::*;
use leptos_router::*;

pub mod components;
pub mod config;
pub mod pages;
pub mod state;
#[cfg(test)]
mod test_support;
pub mod types;
pub mod utils;

use components::guard::{AccessRequirement, RequireAccess};
use pages::{
    dashboard::{DashboardPage, RoleDashboardPage},
    home::HomePage,
    login::LoginPage,
};
use state::auth::AuthProvider;
use types::Role;

/// Loads runtime config, then mounts the app. Config has to be resolved first
/// because it decides which credentials the session store accepts.
#[cfg(target_arch = "wasm32")]
pub fn run() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Starting Campusboard frontend: initializing runtime config");

    wasm_bindgen_futures::spawn_local(async move {
        config::init().await;
        log::info!("Runtime config initialized");
        mount_to_body(App);
    });
}

#[component]
pub fn App() -> impl IntoView {
    leptos_meta::provide_meta_context();
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/dashboard" view=ProtectedDashboard/>
                    <Route path="/dashboard/professor" view=ProfessorDashboard/>
                    <Route path="/dashboard/student" view=StudentDashboard/>
                    <Route path="/dashboard/secretary" view=SecretaryDashboard/>
                    <Route path="/dashboard/leader" view=LeaderDashboard/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAccess requirement=AccessRequirement::authenticated()><DashboardPage/></RequireAccess> }
}

#[component]
fn ProfessorDashboard() -> impl IntoView {
    view! { <RoleLanding role=Role::Professor/> }
}

#[component]
fn StudentDashboard() -> impl IntoView {
    view! { <RoleLanding role=Role::Student/> }
}

#[component]
fn SecretaryDashboard() -> impl IntoView {
    view! { <RoleLanding role=Role::Secretary/> }
}

#[component]
fn LeaderDashboard() -> impl IntoView {
    view! { <RoleLanding role=Role::Leader/> }
}

#[component]
fn RoleLanding(role: Role) -> impl IntoView {
    view! {
        <RequireAccess requirement=AccessRequirement::role(role)>
            <RoleDashboardPage role=role/>
        </RequireAccess>
    }
}
