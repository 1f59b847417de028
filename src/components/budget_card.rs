use yew::prelude::*;

use crate::components::inputs::{field_class, field_error, on_input};
use crate::format::{format_currency, format_day, format_percent};
use crate::forms::{BudgetForm, FormErrors};
use crate::models::{Budget, BudgetPatch};

#[derive(Properties, PartialEq)]
pub struct BudgetCardProps {
    pub budget: Budget,
    pub on_update: Callback<BudgetPatch>,
    pub on_delete: Callback<()>,
    pub busy: bool,
}

#[function_component(BudgetCard)]
pub fn budget_card(props: &BudgetCardProps) -> Html {
    let editing = use_state(|| false);
    let form = {
        let budget = props.budget.clone();
        use_state(move || BudgetForm::from_budget(&budget))
    };
    let errors = use_state(FormErrors::default);

    let budget = &props.budget;
    let remaining = budget.remaining();
    let over = budget.is_over_budget();
    let percent = budget.percent_used();

    let start_edit = {
        let editing = editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        let budget = budget.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(BudgetForm::from_budget(&budget));
            errors.set(FormErrors::default());
            editing.set(true);
        })
    };

    let on_save = {
        let editing = editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        let on_update = props.on_update.clone();
        Callback::from(move |_: MouseEvent| match form.validate_patch() {
            Ok(patch) => {
                on_update.emit(patch);
                editing.set(false);
            }
            Err(found) => errors.set(found),
        })
    };

    let on_cancel = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(false))
    };

    let on_delete = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(()))
    };

    html! {
        <div class="budget-card">
            <div class="budget-card-header">
                <h3>{"📅 Your Budget"}</h3>
                <div class="budget-actions">
                    if *editing {
                        <button class="btn-small btn-primary" onclick={on_save} disabled={props.busy}>{"Save"}</button>
                        <button class="btn-small" onclick={on_cancel}>{"Cancel"}</button>
                    } else {
                        <button class="btn-icon" title="Edit budget" onclick={start_edit} disabled={props.busy}>{"✏️"}</button>
                        <button class="btn-icon btn-danger" title="Delete budget" onclick={on_delete} disabled={props.busy}>{"🗑️"}</button>
                    }
                </div>
            </div>

            <div class="budget-card-body">
                if *editing {
                    <div class="budget-edit-form">
                        <div class="form-group">
                            <label>{"Budget Amount"}</label>
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
                                <label>{"Start Date"}</label>
                                <input
                                    type="date"
                                    class={field_class(&errors, "startDate")}
                                    value={form.start_date.clone()}
                                    oninput={on_input(&form, |f: &mut BudgetForm, v: String| f.start_date = v)}
                                />
                                { field_error(&errors, "startDate") }
                            </div>
                            <div class="form-group">
                                <label>{"End Date"}</label>
                                <input
                                    type="date"
                                    class={field_class(&errors, "endDate")}
                                    value={form.end_date.clone()}
                                    oninput={on_input(&form, |f: &mut BudgetForm, v: String| f.end_date = v)}
                                />
                                { field_error(&errors, "endDate") }
                            </div>
                        </div>
                    </div>
                } else {
                    <div class="budget-stats">
                        <div class="stat">
                            <span class="stat-label">{"Total Budget"}</span>
                            <span class="stat-value">{ format_currency(budget.amount) }</span>
                        </div>
                        <div class="stat">
                            <span class="stat-label">{"Spent"}</span>
                            <span class={classes!("stat-value", over.then_some("over-budget"))}>
                                { format_currency(budget.amount_used) }
                            </span>
                        </div>
                        <div class="stat">
                            <span class="stat-label">{"Remaining"}</span>
                            <span class={classes!("stat-value", if over { "over-budget" } else { "remaining-positive" })}>
                                { format_currency(remaining) }
                            </span>
                        </div>
                    </div>

                    <div class="budget-progress">
                        <div class="progress-bar">
                            <div
                                class={classes!("progress-fill", over.then_some("over-budget"))}
                                style={format!("width: {}%", percent.min(100.0))}
                            ></div>
                        </div>
                        <span class="progress-text">{ format!("{} used", format_percent(percent)) }</span>
                    </div>

                    <div class="budget-period">
                        <span>{ format!("📆 {} - {}", format_day(budget.start_date), format_day(budget.end_date)) }</span>
                    </div>
                }
            </div>
        </div>
    }
}
