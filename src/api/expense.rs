use crate::errors::ApiResult;
use crate::models::{Expense, ExpensePatch, NewExpense};
use crate::transport::{HttpTransport, Method};

use super::{decode, decode_required, ApiClient};

const EXPENSES_PATH: &str = "/api/expenses";

fn expense_path(id: i64) -> String {
    format!("{}/{}", EXPENSES_PATH, id)
}

impl<T: HttpTransport> ApiClient<T> {
    /// Fails server-side when the user has no budget yet.
    pub async fn add_expense(&self, expense: &NewExpense) -> ApiResult<Expense> {
        let response = self.execute_json(Method::Post, EXPENSES_PATH, expense).await?;
        decode_required(&response)
    }

    /// In whatever order the backend returns them.
    pub async fn get_all_expenses(&self) -> ApiResult<Vec<Expense>> {
        let response = self.execute(Method::Get, EXPENSES_PATH, None).await?;
        decode(&response)
    }

    pub async fn get_expense(&self, id: i64) -> ApiResult<Expense> {
        let response = self.execute(Method::Get, &expense_path(id), None).await?;
        decode_required(&response)
    }

    pub async fn update_expense(&self, id: i64, patch: &ExpensePatch) -> ApiResult<Expense> {
        let response = self
            .execute_json(Method::Put, &expense_path(id), patch)
            .await?;
        decode_required(&response)
    }

    pub async fn delete_expense(&self, id: i64) -> ApiResult<()> {
        self.execute(Method::Delete, &expense_path(id), None).await?;
        Ok(())
    }
}
