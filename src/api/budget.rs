use crate::errors::{ApiError, ApiResult};
use crate::models::{Budget, BudgetPatch, NewBudget};
use crate::transport::{HttpTransport, Method};

use super::{decode_optional, decode_required, ApiClient};

const BUDGETS_PATH: &str = "/api/budgets";

impl<T: HttpTransport> ApiClient<T> {
    pub async fn create_budget(&self, budget: &NewBudget) -> ApiResult<Budget> {
        let response = self.execute_json(Method::Post, BUDGETS_PATH, budget).await?;
        decode_required(&response)
    }

    /// The user's budget, or `None` when the backend answers 404 or an
    /// empty body.
    pub async fn get_budget(&self) -> ApiResult<Option<Budget>> {
        match self.execute(Method::Get, BUDGETS_PATH, None).await {
            Ok(response) => decode_optional(&response),
            Err(ApiError::Server { status: 404, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn update_budget(&self, patch: &BudgetPatch) -> ApiResult<Budget> {
        let response = self.execute_json(Method::Put, BUDGETS_PATH, patch).await?;
        decode_required(&response)
    }

    /// Server-side this also removes every expense of the budget.
    pub async fn delete_budget(&self) -> ApiResult<()> {
        self.execute(Method::Delete, BUDGETS_PATH, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::BudgetForm;
    use crate::models::parse_day;
    use crate::session::Session;
    use crate::testing::{block_on, signed_in, FakeBackend, RecordingTransport};

    fn january(amount: &str) -> NewBudget {
        BudgetForm {
            amount: amount.into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-01-31".into(),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn create_echoes_dates_with_zero_used() {
        let client = signed_in(FakeBackend::with_user("asha", "secret1"));
        let budget = block_on(client.create_budget(&january("5000"))).unwrap();

        assert!(budget.id.is_some());
        assert_eq!(budget.amount, 5000);
        assert_eq!(budget.amount_used, 0);
        assert_eq!(budget.start_date, parse_day("2024-01-01").unwrap());
        assert_eq!(budget.end_date, parse_day("2024-01-31").unwrap());
    }

    #[test]
    fn missing_budget_is_none_not_error() {
        let client = signed_in(FakeBackend::with_user("asha", "secret1"));
        assert_eq!(block_on(client.get_budget()).unwrap(), None);
    }

    #[test]
    fn repeated_reads_are_equal() {
        let client = signed_in(FakeBackend::with_user("asha", "secret1"));
        block_on(client.create_budget(&january("5000"))).unwrap();

        let first = block_on(client.get_budget()).unwrap();
        let second = block_on(client.get_budget()).unwrap();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn server_errors_other_than_404_propagate() {
        let client = ApiClient::new(RecordingTransport::default(), Session::in_memory());
        client
            .transport()
            .respond(500, r#"{"message":"Database unavailable"}"#);
        let err = block_on(client.get_budget()).unwrap_err();
        assert_eq!(err.status(), 500);
        assert_eq!(err.message(), "Database unavailable");
    }

    #[test]
    fn update_sends_partial_fields_and_returns_full_budget() {
        let client = signed_in(FakeBackend::with_user("asha", "secret1"));
        block_on(client.create_budget(&january("5000"))).unwrap();

        let updated = block_on(client.update_budget(&BudgetPatch {
            amount: Some(8000),
            ..Default::default()
        }))
        .unwrap();

        assert_eq!(updated.amount, 8000);
        assert_eq!(updated.start_date, parse_day("2024-01-01").unwrap());
        let sent = client.transport().requests().last().cloned().unwrap();
        assert_eq!(sent.body.as_deref(), Some(r#"{"amount":8000}"#));
    }

    #[test]
    fn empty_body_means_no_budget() {
        let client = ApiClient::new(RecordingTransport::default(), Session::in_memory());
        client.transport().respond(200, "");
        assert_eq!(block_on(client.get_budget()).unwrap(), None);

        client.transport().respond(200, "null");
        assert_eq!(block_on(client.get_budget()).unwrap(), None);
    }

    #[test]
    fn empty_update_response_uses_caller_fallback() {
        let client = ApiClient::new(RecordingTransport::default(), Session::in_memory());
        client.transport().respond(200, "");
        let err = block_on(client.update_budget(&BudgetPatch {
            amount: Some(10),
            ..Default::default()
        }))
        .unwrap_err();
        assert_eq!(err.message_or("Failed to update budget"), "Failed to update budget");
    }

    #[test]
    fn delete_removes_budget() {
        let client = signed_in(FakeBackend::with_user("asha", "secret1"));
        block_on(client.create_budget(&january("5000"))).unwrap();
        block_on(client.delete_budget()).unwrap();
        assert_eq!(block_on(client.get_budget()).unwrap(), None);
    }
}
