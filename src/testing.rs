//! Test doubles for the HTTP seam.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::ApiClient;
use crate::errors::TransportError;
use crate::models::{parse_day, Budget, Expense, User};
use crate::session::Session;
use crate::transport::{ApiRequest, HttpTransport, Method, RawResponse};

pub fn block_on<F: Future>(future: F) -> F::Output {
    futures::executor::block_on(future)
}

/// Client already holding a valid token for the backend's first user.
pub fn signed_in(backend: FakeBackend) -> ApiClient<FakeBackend> {
    let session = Session::in_memory();
    let (user_name, token) = backend
        .first_login()
        .expect("backend seeded with a user");
    session.begin(&token, &user_name);
    ApiClient::new(backend, session)
}

/// Replays scripted responses in order and records every request.
/// With nothing scripted it answers `200` with an empty body.
#[derive(Default)]
pub struct RecordingTransport {
    requests: RefCell<Vec<ApiRequest>>,
    scripted: RefCell<VecDeque<Result<RawResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn respond(&self, status: u16, body: &str) {
        self.scripted.borrow_mut().push_back(Ok(RawResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, err: TransportError) {
        self.scripted.borrow_mut().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.scripted.borrow_mut().pop_front().unwrap_or(Ok(RawResponse {
            status: 200,
            body: String::new(),
        }))
    }
}

#[derive(Default)]
struct BackendState {
    users: Vec<(User, String)>,
    budget: Option<Budget>,
    expenses: Vec<Expense>,
    next_id: i64,
}

impl BackendState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory stand-in for the backend: one budget per user, expenses tied
/// to it, `amountUsed` aggregated server-side.
#[derive(Default)]
pub struct FakeBackend {
    state: RefCell<BackendState>,
    requests: RefCell<Vec<ApiRequest>>,
    failures: RefCell<Vec<(Method, String, TransportError)>>,
    offline: Cell<bool>,
}

fn token_for(user_name: &str) -> String {
    format!("token-{}", user_name)
}

fn respond(status: u16, body: Value) -> RawResponse {
    RawResponse {
        status,
        body: if body.is_null() {
            String::new()
        } else {
            body.to_string()
        },
    }
}

fn error(status: u16, message: &str) -> RawResponse {
    respond(
        status,
        json!({ "status": status, "error": "Error", "message": message }),
    )
}

impl FakeBackend {
    pub fn with_user(user_name: &str, password: &str) -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state.borrow_mut();
            let id = state.allocate_id();
            state.users.push((
                User {
                    id,
                    user_name: user_name.to_string(),
                    email: format!("{}@example.com", user_name),
                },
                password.to_string(),
            ));
        }
        backend
    }

    fn first_login(&self) -> Option<(String, String)> {
        let state = self.state.borrow();
        let (user, _) = state.users.first()?;
        Some((user.user_name.clone(), token_for(&user.user_name)))
    }

    /// Seeds a budget as if it had been created earlier.
    pub fn seed_budget(&self, amount: i64, amount_used: i64) {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        state.budget = Some(Budget {
            id: Some(id),
            start_date: parse_day("2024-01-01").expect("valid date"),
            end_date: parse_day("2024-01-31").expect("valid date"),
            amount,
            amount_used,
            user: None,
        });
    }

    pub fn budget(&self) -> Option<Budget> {
        self.state.borrow().budget.clone()
    }

    /// The next request matching `method` and `path` fails without a response.
    pub fn fail_next(&self, method: Method, path: &str, err: TransportError) {
        self.failures
            .borrow_mut()
            .push((method, path.to_string(), err));
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn take_failure(&self, request: &ApiRequest) -> Option<TransportError> {
        let mut failures = self.failures.borrow_mut();
        let index = failures
            .iter()
            .position(|(method, path, _)| *method == request.method && *path == request.path)?;
        Some(failures.remove(index).2)
    }

    fn authorized(&self, request: &ApiRequest) -> bool {
        let state = self.state.borrow();
        match &request.bearer {
            Some(token) => state
                .users
                .iter()
                .any(|(user, _)| token_for(&user.user_name) == *token),
            None => false,
        }
    }

    fn route(&self, request: &ApiRequest) -> RawResponse {
        let body: Value = request
            .body
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or(Value::Null);

        match (request.method, request.path.as_str()) {
            (Method::Post, "/login") => self.login(&body),
            (Method::Post, "/register") => self.register(&body),
            _ if !self.authorized(request) => respond(401, Value::Null),
            (Method::Get, "/api/budgets") => match self.budget() {
                Some(budget) => respond(200, json!(budget)),
                None => error(404, "Budget not found"),
            },
            (Method::Post, "/api/budgets") => self.create_budget(&body),
            (Method::Put, "/api/budgets") => self.update_budget(&body),
            (Method::Delete, "/api/budgets") => {
                let mut state = self.state.borrow_mut();
                state.budget = None;
                state.expenses.clear();
                respond(200, Value::Null)
            }
            (Method::Get, "/api/expenses") => respond(200, json!(self.state.borrow().expenses)),
            (Method::Post, "/api/expenses") => self.add_expense(&body),
            (method, path) => match path
                .strip_prefix("/api/expenses/")
                .and_then(|id| id.parse::<i64>().ok())
            {
                Some(id) => self.expense_by_id(method, id, &body),
                None => error(404, "No handler"),
            },
        }
    }

    fn login(&self, body: &Value) -> RawResponse {
        let state = self.state.borrow();
        let name = body["userName"].as_str().unwrap_or_default();
        let password = body["password"].as_str().unwrap_or_default();
        let matched = state
            .users
            .iter()
            .any(|(user, pw)| user.user_name == name && pw == password);
        RawResponse {
            status: 200,
            body: if matched {
                token_for(name)
            } else {
                "fail".to_string()
            },
        }
    }

    fn register(&self, body: &Value) -> RawResponse {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        let user = User {
            id,
            user_name: body["userName"].as_str().unwrap_or_default().to_string(),
            email: body["email"].as_str().unwrap_or_default().to_string(),
        };
        let password = body["password"].as_str().unwrap_or_default().to_string();
        state.users.push((user.clone(), password));
        respond(200, json!(user))
    }

    fn create_budget(&self, body: &Value) -> RawResponse {
        let mut state = self.state.borrow_mut();
        let (Some(start), Some(end)) = (
            body["startDate"].as_str().and_then(parse_day),
            body["endDate"].as_str().and_then(parse_day),
        ) else {
            return error(400, "Invalid budget");
        };
        let id = state.allocate_id();
        let user = state.users.first().map(|(user, _)| user.clone());
        let budget = Budget {
            id: Some(id),
            start_date: start,
            end_date: end,
            amount: body["amount"].as_i64().unwrap_or_default(),
            amount_used: 0,
            user,
        };
        state.budget = Some(budget.clone());
        respond(200, json!(budget))
    }

    fn update_budget(&self, body: &Value) -> RawResponse {
        let mut state = self.state.borrow_mut();
        let Some(budget) = state.budget.as_mut() else {
            return error(404, "Budget not found");
        };
        if let Some(amount) = body["amount"].as_i64() {
            budget.amount = amount;
        }
        if let Some(start) = body["startDate"].as_str().and_then(parse_day) {
            budget.start_date = start;
        }
        if let Some(end) = body["endDate"].as_str().and_then(parse_day) {
            budget.end_date = end;
        }
        respond(200, json!(budget))
    }

    fn add_expense(&self, body: &Value) -> RawResponse {
        let mut state = self.state.borrow_mut();
        if state.budget.is_none() {
            return error(500, "No budget found for user");
        }
        let Ok(mut expense) = serde_json::from_value::<Expense>(body.clone()) else {
            return error(400, "Invalid expense");
        };
        expense.id = Some(state.allocate_id());
        if let Some(budget) = state.budget.as_mut() {
            budget.amount_used += expense.amount;
        }
        state.expenses.push(expense.clone());
        respond(200, json!(expense))
    }

    fn expense_by_id(&self, method: Method, id: i64, body: &Value) -> RawResponse {
        let mut state = self.state.borrow_mut();
        let Some(index) = state.expenses.iter().position(|e| e.id == Some(id)) else {
            return error(404, "Expense not found");
        };
        match method {
            Method::Get => respond(200, json!(state.expenses[index])),
            Method::Put => {
                let previous = state.expenses[index].amount;
                let expense = &mut state.expenses[index];
                if let Some(amount) = body["amount"].as_i64() {
                    expense.amount = amount;
                }
                if let Some(date) = body["date"].as_str().and_then(parse_day) {
                    expense.date = date;
                }
                if let Some(description) = body["description"].as_str() {
                    expense.description = description.to_string();
                }
                if let Some(category) = body["type"].as_str() {
                    expense.category = category.to_string().into();
                }
                if let Some(method) = body["payment_Method"].as_str() {
                    expense.payment_method = method.to_string().into();
                }
                let updated = expense.clone();
                if let Some(budget) = state.budget.as_mut() {
                    budget.amount_used += updated.amount - previous;
                }
                respond(200, json!(updated))
            }
            Method::Delete => {
                let removed = state.expenses.remove(index);
                if let Some(budget) = state.budget.as_mut() {
                    budget.amount_used -= removed.amount;
                }
                respond(200, Value::Null)
            }
            Method::Post => error(405, "Method not allowed"),
        }
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        if self.offline.get() {
            return Err(TransportError::Network("offline".into()));
        }
        if let Some(err) = self.take_failure(&request) {
            return Err(err);
        }
        Ok(self.route(&request))
    }
}
