use yew::prelude::*;

use crate::api::BrowserClient;
use crate::config::AppConfig;
use crate::pages::{AuthScreen, DashboardPage};

#[derive(Clone, Copy, Debug, PartialEq)]
enum AuthStatus {
    Authenticated,
    Unauthenticated,
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: AppConfig,
}

/// Root component: shows the dashboard while a token is stored, the auth
/// screen otherwise.
#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let client = {
        let config = props.config.clone();
        use_state(move || BrowserClient::browser(config))
    };
    let auth_status = {
        let client = (*client).clone();
        use_state(move || {
            if client.is_authenticated() {
                AuthStatus::Authenticated
            } else {
                AuthStatus::Unauthenticated
            }
        })
    };

    // Any 401 from the backend drops us back to the auth screen.
    {
        let client = (*client).clone();
        let auth_status = auth_status.clone();
        use_effect_with_deps(
            move |_| {
                client
                    .session()
                    .set_expiry_hook(move || auth_status.set(AuthStatus::Unauthenticated));
                || ()
            },
            (),
        );
    }

    let on_logout = {
        let client = (*client).clone();
        let auth_status = auth_status.clone();
        Callback::from(move |_: ()| {
            client.logout();
            tracing::info!("logged out");
            auth_status.set(AuthStatus::Unauthenticated);
        })
    };

    match *auth_status {
        AuthStatus::Authenticated => html! {
            <DashboardPage client={(*client).clone()} {on_logout} />
        },
        AuthStatus::Unauthenticated => {
            let on_authenticated = {
                let auth_status = auth_status.clone();
                Callback::from(move |_: ()| auth_status.set(AuthStatus::Authenticated))
            };
            html! { <AuthScreen client={(*client).clone()} {on_authenticated} /> }
        }
    }
}
