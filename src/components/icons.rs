use yew::prelude::*;

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
pub fn icon_alert() -> Html {
    icon_base("M12 8v4m0 4h.01M12 2a10 10 0 100 20 10 10 0 000-20z")
}
pub fn icon_check() -> Html {
    icon_base("M8 12l3 3 5-6")
}
