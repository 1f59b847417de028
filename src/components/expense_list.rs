use yew::prelude::*;

use crate::components::inputs::{field_class, field_error, on_input, on_select};
use crate::format::{format_currency, format_day};
use crate::forms::{ExpenseForm, FormErrors};
use crate::models::{Category, Expense, ExpensePatch, PaymentMethod};

#[derive(Properties, PartialEq)]
pub struct ExpenseListProps {
    /// Already sorted newest first.
    pub expenses: Vec<Expense>,
    pub on_update: Callback<(i64, ExpensePatch)>,
    pub on_delete: Callback<i64>,
}

#[function_component(ExpenseList)]
pub fn expense_list(props: &ExpenseListProps) -> Html {
    if props.expenses.is_empty() {
        return html! {
            <div class="no-expenses">
                <span class="no-expenses-icon">{"📭"}</span>
                <h3>{"No expenses yet"}</h3>
                <p>{"Start tracking by adding your first expense"}</p>
            </div>
        };
    }

    html! {
        <div class="expense-list">
            { for props.expenses.iter().filter(|e| e.id.is_some()).map(|expense| html! {
                <ExpenseRow
                    key={expense.id.unwrap_or_default()}
                    expense={expense.clone()}
                    on_update={props.on_update.clone()}
                    on_delete={props.on_delete.clone()}
                />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ExpenseRowProps {
    expense: Expense,
    on_update: Callback<(i64, ExpensePatch)>,
    on_delete: Callback<i64>,
}

#[function_component(ExpenseRow)]
fn expense_row(props: &ExpenseRowProps) -> Html {
    let editing = use_state(|| false);
    let form = {
        let expense = props.expense.clone();
        use_state(move || ExpenseForm::from_expense(&expense))
    };
    let errors = use_state(FormErrors::default);
    let expense = &props.expense;
    let id = expense.id.unwrap_or_default();

    let start_edit = {
        let editing = editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        let expense = expense.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(ExpenseForm::from_expense(&expense));
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
                on_update.emit((id, patch));
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
        Callback::from(move |_: MouseEvent| on_delete.emit(id))
    };

    if *editing {
        return html! {
            <div class="expense-item">
                <div class="expense-edit-form">
                    <div class="form-row">
                        <div class="form-group">
                            <label>{"Amount (₹)"}</label>
                            <input
                                type="number"
                                min="0"
                                class={field_class(&errors, "amount")}
                                value={form.amount.clone()}
                                oninput={on_input(&form, |f: &mut ExpenseForm, v: String| f.amount = v)}
                            />
                            { field_error(&errors, "amount") }
                        </div>
                        <div class="form-group">
                            <label>{"Date"}</label>
                            <input
                                type="date"
                                class={field_class(&errors, "date")}
                                value={form.date.clone()}
                                oninput={on_input(&form, |f: &mut ExpenseForm, v: String| f.date = v)}
                            />
                            { field_error(&errors, "date") }
                        </div>
                    </div>
                    <div class="form-row">
                        <div class="form-group">
                            <label>{"Description"}</label>
                            <input
                                type="text"
                                placeholder="What was this for?"
                                class={field_class(&errors, "description")}
                                value={form.description.clone()}
                                oninput={on_input(&form, |f: &mut ExpenseForm, v: String| f.description = v)}
                            />
                            { field_error(&errors, "description") }
                        </div>
                    </div>
                    <div class="form-row">
                        <div class="form-group">
                            <label>{"Type"}</label>
                            <select onchange={on_select(&form, |f: &mut ExpenseForm, v: String| f.category = Category::parse(&v))}>
                                { for Category::ALL.iter().map(|c| html! {
                                    <option value={c.as_str()} selected={*c == form.category}>{ c.as_str() }</option>
                                }) }
                            </select>
                        </div>
                        <div class="form-group">
                            <label>{"Payment Method"}</label>
                            <select onchange={on_select(&form, |f: &mut ExpenseForm, v: String| f.payment_method = PaymentMethod::parse(&v))}>
                                { for PaymentMethod::ALL.iter().map(|m| html! {
                                    <option value={m.as_str()} selected={*m == form.payment_method}>{ m.label() }</option>
                                }) }
                            </select>
                        </div>
                    </div>
                    <div class="form-actions">
                        <button class="btn-small btn-primary" onclick={on_save}>{"Save"}</button>
                        <button class="btn-small" onclick={on_cancel}>{"Cancel"}</button>
                    </div>
                </div>
            </div>
        };
    }

    html! {
        <div class="expense-item">
            <div class="expense-icon">{ expense.category.icon() }</div>
            <div class="expense-details">
                <h4>{ expense.description.clone() }</h4>
                <div class="expense-meta">
                    <span class="expense-type">{ expense.category.as_str() }</span>
                    <span class="expense-payment">
                        { format!("{} {}", expense.payment_method.icon(), expense.payment_method.label()) }
                    </span>
                    <span class="expense-date">{ format_day(expense.date) }</span>
                </div>
            </div>
            <div class="expense-amount">{ format_currency(expense.amount) }</div>
            <div class="expense-actions">
                <button class="btn-icon" title="Edit" onclick={start_edit}>{"✏️"}</button>
                <button class="btn-icon btn-danger" title="Delete" onclick={on_delete}>{"🗑️"}</button>
            </div>
        </div>
    }
}
