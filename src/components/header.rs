use yew::prelude::*;

use crate::components::icons::{icon_log_out, icon_wallet};

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub user_name: Option<String>,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <header class="dashboard-header">
            <div class="header-content">
                <div class="header-left">
                    <h1 class="logo">{ icon_wallet() }{" Extraa"}</h1>
                    if let Some(name) = &props.user_name {
                        <span class="welcome-text">{ format!("Welcome back, {}!", name) }</span>
                    }
                </div>
                <button class="logout-btn" onclick={on_logout}>
                    { icon_log_out() }
                    <span>{"Logout"}</span>
                </button>
            </div>
        </header>
    }
}
