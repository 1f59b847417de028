use yew::prelude::*;

use crate::components::inputs::{field_class, field_error, on_input, on_select};
use crate::forms::{ExpenseForm, FormErrors};
use crate::models::{Category, NewExpense, PaymentMethod};

#[derive(Properties, PartialEq)]
pub struct AddExpenseModalProps {
    pub on_close: Callback<()>,
    pub on_add: Callback<NewExpense>,
    pub saving: bool,
}

#[function_component(AddExpenseModal)]
pub fn add_expense_modal(props: &AddExpenseModalProps) -> Html {
    let form = use_state(|| ExpenseForm::new(chrono::Local::now().date_naive()));
    let errors = use_state(FormErrors::default);

    let on_submit = {
        let form = form.clone();
        let errors = errors.clone();
        let on_add = props.on_add.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match form.validate() {
                Ok(expense) => {
                    errors.set(FormErrors::default());
                    on_add.emit(expense);
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
                    <h2>{"Add New Expense"}</h2>
                    <button class="modal-close" onclick={close.clone()}>{"×"}</button>
                </div>

                <form onsubmit={on_submit} class="modal-form">
                    <div class="form-group">
                        <label>{"Amount (₹) *"}</label>
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
                        <label>{"Date *"}</label>
                        <input
                            type="date"
                            class={field_class(&errors, "date")}
                            value={form.date.clone()}
                            oninput={on_input(&form, |f: &mut ExpenseForm, v: String| f.date = v)}
                        />
                        { field_error(&errors, "date") }
                    </div>

                    <div class="form-group">
                        <label>{"Description *"}</label>
                        <input
                            type="text"
                            placeholder="What did you spend on?"
                            class={field_class(&errors, "description")}
                            value={form.description.clone()}
                            oninput={on_input(&form, |f: &mut ExpenseForm, v: String| f.description = v)}
                        />
                        { field_error(&errors, "description") }
                    </div>

                    <div class="form-group">
                        <label>{"Category"}</label>
                        <select onchange={on_select(&form, |f: &mut ExpenseForm, v: String| f.category = Category::parse(&v))}>
                            { for Category::ALL.iter().map(|c| html! {
                                <option value={c.as_str()} selected={*c == form.category}>
                                    { format!("{} {}", c.icon(), c.as_str()) }
                                </option>
                            }) }
                        </select>
                    </div>

                    <div class="form-group">
                        <label>{"Payment Method"}</label>
                        <select onchange={on_select(&form, |f: &mut ExpenseForm, v: String| f.payment_method = PaymentMethod::parse(&v))}>
                            { for PaymentMethod::ALL.iter().map(|m| html! {
                                <option value={m.as_str()} selected={*m == form.payment_method}>
                                    { format!("{} {}", m.icon(), m.label()) }
                                </option>
                            }) }
                        </select>
                    </div>

                    <div class="modal-actions">
                        <button type="button" class="btn-secondary" onclick={close}>{"Cancel"}</button>
                        <button type="submit" class="btn-primary" disabled={props.saving}>
                            { if props.saving { "Saving..." } else { "Add Expense" } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
