use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::forms::FormErrors;

/// `oninput` handler that writes the input's value into one field of a
/// form held in `use_state`.
pub fn on_input<F>(state: &UseStateHandle<F>, apply: fn(&mut F, String)) -> Callback<InputEvent>
where
    F: Clone + 'static,
{
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*state).clone();
        apply(&mut next, input.value());
        state.set(next);
    })
}

pub fn on_select<F>(state: &UseStateHandle<F>, apply: fn(&mut F, String)) -> Callback<Event>
where
    F: Clone + 'static,
{
    let state = state.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        let mut next = (*state).clone();
        apply(&mut next, select.value());
        state.set(next);
    })
}

pub fn field_class(errors: &FormErrors, field: &str) -> &'static str {
    if errors.get(field).is_some() {
        "error"
    } else {
        ""
    }
}

pub fn field_error(errors: &FormErrors, field: &str) -> Html {
    match errors.get(field) {
        Some(message) => html! { <span class="error-message">{ message.to_string() }</span> },
        None => html! {},
    }
}
