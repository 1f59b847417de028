use chrono::{Datelike, NaiveDate};
use yew::prelude::*;

use crate::components::inputs::{field_class, field_error, on_input};
use crate::forms::{BudgetForm, FormErrors};
use crate::models::NewBudget;

#[derive(Properties, PartialEq)]
pub struct AddBudgetModalProps {
    pub on_close: Callback<()>,
    pub on_add: Callback<NewBudget>,
    pub saving: bool,
}

/// Current calendar month, as the starting suggestion.
fn this_month() -> BudgetForm {
    let today = chrono::Local::now().date_naive();
    let start = today.with_day(1).unwrap_or(today);
    let end = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .and_then(|first| first.checked_add_months(chrono::Months::new(1)))
        .and_then(|next| next.pred_opt())
        .unwrap_or(today);
    BudgetForm {
        amount: String::new(),
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: end.format("%Y-%m-%d").to_string(),
    }
}

#[function_component(AddBudgetModal)]
pub fn add_budget_modal(props: &AddBudgetModalProps) -> Html {
    let form = use_state(this_month);
    let errors = use_state(FormErrors::default);

    let on_submit = {
        let form = form.clone();
        let errors = errors.clone();
        let on_add = props.on_add.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match form.validate() {
                Ok(budget) => {
                    errors.set(FormErrors::default());
                    on_add.emit(budget);
                }
                Err(found) => errors.set(found),
            }
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-overlay" onclick={close.clone()}>
            <div class="modal-content" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="modal-header">
                    <h2>{"Create Budget"}</h2>
                    <button class="modal-close" onclick={close.clone()}>{"×"}</button>
                </div>

                <form onsubmit={on_submit} class="modal-form">
                    <div class="form-group">
                        <label>{"Budget Amount (₹) *"}</label>
                        <input
                            type="number"
                            min="0"
                            class={field_class(&errors, "amount")}
                            value={form.amount.clone()}
                            oninput={on_input(&form, |f: &mut BudgetForm, v: String| f.amount = v)}
                        />
                        { field_error(&errors, "amount") }
                    </div>
                    <div class="form-row">
                        <div class="form-group">
                            <label>{"Start Date *"}</label>
                            <input
                                type="date"
                                class={field_class(&errors, "startDate")}
                                value={form.start_date.clone()}
                                oninput={on_input(&form, |f: &mut BudgetForm, v: String| f.start_date = v)}
                            />
                            { field_error(&errors, "startDate") }
                        </div>
                        <div class="form-group">
                            <label>{"End Date *"}</label>
                            <input
                                type="date"
                                class={field_class(&errors, "endDate")}
                                value={form.end_date.clone()}
                                oninput={on_input(&form, |f: &mut BudgetForm, v: String| f.end_date = v)}
                            />
                            { field_error(&errors, "endDate") }
                        </div>
                    </div>

                    <div class="modal-actions">
                        <button type="button" class="btn-secondary" onclick={close}>{"Cancel"}</button>
                        <button type="submit" class="btn-primary" disabled={props.saving}>
                            { if props.saving { "Saving..." } else { "Create Budget" } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
