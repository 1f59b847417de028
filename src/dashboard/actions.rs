//! Network side of the dashboard: each operation talks to the backend and
//! returns the action to dispatch once the server has confirmed the change.

use crate::api::ApiClient;
use crate::errors::ApiResult;
use crate::models::{Budget, BudgetPatch, ExpensePatch, NewBudget, NewExpense};
use crate::transport::HttpTransport;

use super::{DashboardAction, Loaded, Mutation};

pub const DELETE_BUDGET_PROMPT: &str =
    "Are you sure you want to delete your budget? This will also delete all associated expenses.";
pub const DELETE_EXPENSE_PROMPT: &str = "Are you sure you want to delete this expense?";

/// Asks the user to go ahead with a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// `window.confirm`; a missing window counts as "no".
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}

/// Blocking `window.alert`, used for failed mutations.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Fetches budget and expenses concurrently and waits for both.
pub async fn load<T: HttpTransport>(client: &ApiClient<T>) -> Loaded {
    let (budget, expenses) = futures::join!(client.get_budget(), client.get_all_expenses());
    if let Err(err) = &budget {
        tracing::warn!(error = %err, "budget failed to load");
    }
    if let Err(err) = &expenses {
        tracing::warn!(error = %err, "expenses failed to load");
    }
    Loaded { budget, expenses }
}

/// Re-reads the budget after an expense change so `amountUsed` matches the
/// server.
///
/// A 404 means the budget no longer exists and yields `None`. Any other
/// failure is treated as transient: the last known budget is kept (or stays
/// `None` if there was none) and nothing is shown to the user.
pub async fn refresh_budget<T: HttpTransport>(
    client: &ApiClient<T>,
    prior: Option<&Budget>,
) -> Option<Budget> {
    match client.get_budget().await {
        Ok(budget) => budget,
        Err(err) => {
            tracing::warn!(error = %err, "budget refresh failed, keeping last known budget");
            prior.cloned()
        }
    }
}

pub async fn create_budget<T: HttpTransport>(
    client: &ApiClient<T>,
    budget: &NewBudget,
) -> ApiResult<DashboardAction> {
    let created = client.create_budget(budget).await?;
    tracing::info!(id = ?created.id, amount = created.amount, "budget created");
    Ok(DashboardAction::BudgetSaved(Mutation::CreateBudget, created))
}

pub async fn update_budget<T: HttpTransport>(
    client: &ApiClient<T>,
    patch: &BudgetPatch,
) -> ApiResult<DashboardAction> {
    let updated = client.update_budget(patch).await?;
    Ok(DashboardAction::BudgetSaved(Mutation::UpdateBudget, updated))
}

/// `Ok(None)` when the user declined; no request is made in that case.
pub async fn delete_budget<T: HttpTransport>(
    client: &ApiClient<T>,
    confirm: &dyn Confirm,
) -> ApiResult<Option<DashboardAction>> {
    if !confirm.confirm(DELETE_BUDGET_PROMPT) {
        return Ok(None);
    }
    client.delete_budget().await?;
    tracing::info!("budget deleted");
    Ok(Some(DashboardAction::BudgetDeleted))
}

pub async fn add_expense<T: HttpTransport>(
    client: &ApiClient<T>,
    expense: &NewExpense,
    prior: Option<&Budget>,
) -> ApiResult<DashboardAction> {
    let created = client.add_expense(expense).await?;
    let budget = refresh_budget(client, prior).await;
    Ok(DashboardAction::ExpenseAdded {
        expense: created,
        budget,
    })
}

pub async fn update_expense<T: HttpTransport>(
    client: &ApiClient<T>,
    id: i64,
    patch: &ExpensePatch,
    prior: Option<&Budget>,
) -> ApiResult<DashboardAction> {
    let updated = client.update_expense(id, patch).await?;
    let budget = refresh_budget(client, prior).await;
    Ok(DashboardAction::ExpenseUpdated {
        id,
        expense: updated,
        budget,
    })
}

pub async fn delete_expense<T: HttpTransport>(
    client: &ApiClient<T>,
    id: i64,
    prior: Option<&Budget>,
    confirm: &dyn Confirm,
) -> ApiResult<Option<DashboardAction>> {
    if !confirm.confirm(DELETE_EXPENSE_PROMPT) {
        return Ok(None);
    }
    client.delete_expense(id).await?;
    let budget = refresh_budget(client, prior).await;
    Ok(Some(DashboardAction::ExpenseDeleted { id, budget }))
}
