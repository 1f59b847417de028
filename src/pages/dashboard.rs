use std::future::Future;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::BrowserClient;
use crate::components::icons::{icon_alert, icon_plus};
use crate::components::{AddBudgetModal, AddExpenseModal, BudgetCard, ExpenseList, Header};
use crate::dashboard::actions::{self, alert, BrowserConfirm};
use crate::dashboard::{DashboardAction, DashboardState, DashboardView, Mutation, MutationGate};
use crate::errors::{ApiError, ApiResult};
use crate::models::{BudgetPatch, ExpensePatch, NewBudget, NewExpense};

use super::section_shell;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub client: BrowserClient,
    pub on_logout: Callback<()>,
}

/// Runs one mutation through `idle -> pending -> idle`.
///
/// Does nothing if the gate already holds the same mutation. Failures are
/// reported with a blocking alert, except 401s which end the session.
fn run_mutation<Fut>(
    state: &UseReducerHandle<DashboardState>,
    gate: &Rc<MutationGate>,
    mutation: Mutation,
    fallback: &'static str,
    on_success: impl FnOnce() + 'static,
    task: Fut,
) where
    Fut: Future<Output = ApiResult<Option<DashboardAction>>> + 'static,
{
    if !gate.try_claim(mutation) {
        tracing::debug!(?mutation, "ignored, already pending");
        return;
    }
    state.dispatch(DashboardAction::Started(mutation));

    let state = state.clone();
    let gate = gate.clone();
    spawn_local(async move {
        let outcome = task.await;
        gate.release(&mutation);
        match outcome {
            Ok(Some(action)) => {
                state.dispatch(action);
                on_success();
            }
            Ok(None) => state.dispatch(DashboardAction::Settled(mutation)),
            Err(err) => {
                state.dispatch(DashboardAction::Settled(mutation));
                if !matches!(err, ApiError::Unauthorized { .. }) {
                    alert(&err.message_or(fallback));
                }
            }
        }
    });
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let state = use_reducer(DashboardState::default);
    let gate = use_state(|| Rc::new(MutationGate::default()));
    let reload = use_state(|| 0u32);
    let show_budget_modal = use_state(|| false);
    let show_expense_modal = use_state(|| false);

    {
        let state = state.clone();
        let client = props.client.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let loaded = actions::load(&client).await;
                    state.dispatch(DashboardAction::Loaded(loaded));
                });
                || ()
            },
            *reload,
        );
    }

    let on_retry = {
        let state = state.clone();
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| {
            state.dispatch(DashboardAction::Reload);
            reload.set(reload.wrapping_add(1));
        })
    };

    let on_dismiss = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(DashboardAction::DismissBanner))
    };

    let on_create_budget = {
        let state = state.clone();
        let gate = (*gate).clone();
        let client = props.client.clone();
        let show = show_budget_modal.clone();
        Callback::from(move |budget: NewBudget| {
            let client = client.clone();
            let show = show.clone();
            run_mutation(
                &state,
                &gate,
                Mutation::CreateBudget,
                "Failed to create budget",
                move || show.set(false),
                async move { actions::create_budget(&client, &budget).await.map(Some) },
            );
        })
    };

    let on_update_budget = {
        let state = state.clone();
        let gate = (*gate).clone();
        let client = props.client.clone();
        Callback::from(move |patch: BudgetPatch| {
            let client = client.clone();
            run_mutation(
                &state,
                &gate,
                Mutation::UpdateBudget,
                "Failed to update budget",
                || (),
                async move { actions::update_budget(&client, &patch).await.map(Some) },
            );
        })
    };

    let on_delete_budget = {
        let state = state.clone();
        let gate = (*gate).clone();
        let client = props.client.clone();
        Callback::from(move |_: ()| {
            let client = client.clone();
            run_mutation(
                &state,
                &gate,
                Mutation::DeleteBudget,
                "Failed to delete budget",
                || (),
                async move { actions::delete_budget(&client, &BrowserConfirm).await },
            );
        })
    };

    let on_add_expense = {
        let state = state.clone();
        let gate = (*gate).clone();
        let client = props.client.clone();
        let show = show_expense_modal.clone();
        Callback::from(move |expense: NewExpense| {
            let client = client.clone();
            let show = show.clone();
            let prior = state.budget.clone();
            run_mutation(
                &state,
                &gate,
                Mutation::AddExpense,
                "Failed to add expense. Make sure you have a budget first.",
                move || show.set(false),
                async move {
                    actions::add_expense(&client, &expense, prior.as_ref())
                        .await
                        .map(Some)
                },
            );
        })
    };

    let on_update_expense = {
        let state = state.clone();
        let gate = (*gate).clone();
        let client = props.client.clone();
        Callback::from(move |(id, patch): (i64, ExpensePatch)| {
            let client = client.clone();
            let prior = state.budget.clone();
            run_mutation(
                &state,
                &gate,
                Mutation::UpdateExpense(id),
                "Failed to update expense",
                || (),
                async move {
                    actions::update_expense(&client, id, &patch, prior.as_ref())
                        .await
                        .map(Some)
                },
            );
        })
    };

    let on_delete_expense = {
        let state = state.clone();
        let gate = (*gate).clone();
        let client = props.client.clone();
        Callback::from(move |id: i64| {
            let client = client.clone();
            let prior = state.budget.clone();
            run_mutation(
                &state,
                &gate,
                Mutation::DeleteExpense(id),
                "Failed to delete expense",
                || (),
                async move {
                    actions::delete_expense(&client, id, prior.as_ref(), &BrowserConfirm).await
                },
            );
        })
    };

    let open = |flag: &UseStateHandle<bool>| {
        let flag = flag.clone();
        Callback::from(move |_: MouseEvent| flag.set(true))
    };
    let close = |flag: &UseStateHandle<bool>| {
        let flag = flag.clone();
        Callback::from(move |_: ()| flag.set(false))
    };

    let body = match state.view() {
        DashboardView::Loading => html! {
            <div class="loading-container">
                <div class="spinner"></div>
                <p>{"Loading your expenses..."}</p>
            </div>
        },
        DashboardView::NoBudget => html! {
            <div class="no-budget-card">
                <span class="no-budget-icon">{"💰"}</span>
                <h2>{"No Budget Set"}</h2>
                <p>{"Create a budget to start tracking your expenses"}</p>
                <button class="btn-primary" onclick={open(&show_budget_modal)}>
                    { icon_plus() }{" Create Your First Budget"}
                </button>
            </div>
        },
        DashboardView::HasBudget(budget) => html! {
            <BudgetCard
                budget={budget.clone()}
                on_update={on_update_budget}
                on_delete={on_delete_budget}
                busy={state.is_pending(&Mutation::UpdateBudget) || state.is_pending(&Mutation::DeleteBudget)}
            />
        },
    };

    let has_budget = state.budget.is_some();
    let expenses = if matches!(state.view(), DashboardView::Loading) {
        html! {}
    } else {
        section_shell(
            "Recent Expenses",
            if has_budget {
                html! {
                    <button class="btn-primary" onclick={open(&show_expense_modal)}>
                        { icon_plus() }{" Add Expense"}
                    </button>
                }
            } else {
                html! {}
            },
            html! {
                <ExpenseList
                    expenses={state.expenses.clone()}
                    on_update={on_update_expense}
                    on_delete={on_delete_expense}
                />
            },
        )
    };

    html! {
        <div class="dashboard">
            <Header user_name={props.client.stored_user_name()} on_logout={props.on_logout.clone()} />
            <main class="dashboard-main">
                if let Some(message) = &state.banner {
                    <div class="error-banner">
                        { icon_alert() }
                        <span>{ message.clone() }</span>
                        <button class="btn-small" onclick={on_retry}>{"Retry"}</button>
                        <button class="banner-close" onclick={on_dismiss}>{"×"}</button>
                    </div>
                }
                { body }
                { expenses }
            </main>

            if *show_budget_modal {
                <AddBudgetModal
                    on_close={close(&show_budget_modal)}
                    on_add={on_create_budget}
                    saving={state.is_pending(&Mutation::CreateBudget)}
                />
            }
            if *show_expense_modal {
                <AddExpenseModal
                    on_close={close(&show_expense_modal)}
                    on_add={on_add_expense}
                    saving={state.is_pending(&Mutation::AddExpense)}
                />
            }
        </div>
    }
}
