mod auth;
mod dashboard;

pub use auth::AuthScreen;
pub use dashboard::DashboardPage;

use yew::prelude::*;

/// Titled dashboard section with optional header actions.
fn section_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <section class="dashboard-section">
            <div class="section-header">
                <h2>{ title }</h2>
                { actions }
            </div>
            <div class="section-body">
                { children }
            </div>
        </section>
    }
}
