use crate::{
    components::layout::{Layout, LoadingSpinner},
    state::auth::use_session_reader,
    types::Role,
    utils::navigation::redirect_to,
};
use leptos::*;
use leptos_meta::Title;

/// Sections listed on each role's landing view.
pub fn role_sections(role: Role) -> &'static [&'static str] {
    match role {
        Role::Professor => &["My courses", "Grading", "Office hours"],
        Role::Student => &["My schedule", "Assignments", "Grades"],
        Role::Secretary => &["Enrollment", "Room bookings", "Notices"],
        Role::Leader => &["Department overview", "Staff", "Reports"],
    }
}

/// `/dashboard`: forwards a signed-in user to their own landing view.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session_reader();
    create_effect(move |_| {
        if let Some(role) = session.get().role() {
            redirect_to(role.home_path());
        }
    });
    view! { <LoadingSpinner /> }
}

#[component]
pub fn RoleDashboardPage(role: Role) -> impl IntoView {
    let session = use_session_reader();
    let greeting = move || {
        session
            .get()
            .identity
            .map(|identity| format!("Welcome, {}", identity.display_name))
            .unwrap_or_default()
    };
    view! {
        <Title text=format!("{} dashboard | Campusboard", role.label()) />
        <Layout>
            <div class="space-y-6">
                <div>
                    <h1 class="text-2xl font-bold text-fg">{format!("{} dashboard", role.label())}</h1>
                    <p class="mt-1 text-sm text-fg-muted">{greeting}</p>
                </div>
                <div class="grid grid-cols-1 gap-6 lg:grid-cols-3">
                    {role_sections(role)
                        .iter()
                        .map(|section| {
                            view! {
                                <div class="bg-surface-elevated shadow rounded-lg p-6">
                                    <h3 class="text-lg font-medium text-fg">{*section}</h3>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </Layout>
    }
}
