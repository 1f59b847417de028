//! Form state and client-side validation.
//!
//! Data-access calls only accept the validated types produced here, so a
//! form that fails validation can never reach the network.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{
    parse_day, Budget, BudgetPatch, Category, Credentials, Expense, ExpensePatch, NewBudget,
    NewExpense, PaymentMethod, Registration,
};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles")
});

const MIN_PASSWORD_LEN: usize = 6;

/// Field name to message; empty means the form may be submitted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn add(&mut self, field: &'static str, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            self.reject()
        }
    }

    fn reject<T>(self) -> Result<T, FormErrors> {
        tracing::debug!(fields = self.len(), "form rejected");
        Err(self)
    }
}

fn parse_amount(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseForm {
    pub amount: String,
    pub date: String,
    pub description: String,
    pub category: Category,
    pub payment_method: PaymentMethod,
}

impl ExpenseForm {
    /// Blank form dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            amount: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            description: String::new(),
            category: Category::default(),
            payment_method: PaymentMethod::default(),
        }
    }

    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_string(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            description: expense.description.clone(),
            category: expense.category,
            payment_method: expense.payment_method,
        }
    }

    fn check(&self) -> (FormErrors, Option<(i64, NaiveDate, String)>) {
        let mut errors = FormErrors::default();

        let amount = parse_amount(&self.amount);
        match amount {
            Some(value) if value > 0 => {}
            _ => errors.add("amount", "Amount must be greater than 0"),
        }

        let description = self.description.trim().to_string();
        if description.is_empty() {
            errors.add("description", "Description is required");
        }

        let date = parse_day(&self.date);
        if date.is_none() {
            errors.add("date", "Date is required");
        }

        let fields = match (amount, date) {
            (Some(amount), Some(date)) if errors.is_empty() => Some((amount, date, description)),
            _ => None,
        };
        (errors, fields)
    }

    pub fn validate(&self) -> Result<NewExpense, FormErrors> {
        let (errors, fields) = self.check();
        match fields {
            Some((amount, date, description)) => errors.into_result(|| NewExpense {
                amount,
                date,
                description,
                category: self.category,
                payment_method: self.payment_method,
            }),
            None => errors.reject(),
        }
    }

    /// Edits send every field back, like the add form.
    pub fn validate_patch(&self) -> Result<ExpensePatch, FormErrors> {
        self.validate().map(|expense| ExpensePatch {
            amount: Some(expense.amount),
            date: Some(expense.date),
            description: Some(expense.description),
            category: Some(expense.category),
            payment_method: Some(expense.payment_method),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BudgetForm {
    pub amount: String,
    pub start_date: String,
    pub end_date: String,
}

impl BudgetForm {
    pub fn from_budget(budget: &Budget) -> Self {
        Self {
            amount: budget.amount.to_string(),
            start_date: budget.start_date.format("%Y-%m-%d").to_string(),
            end_date: budget.end_date.format("%Y-%m-%d").to_string(),
        }
    }

    fn check(&self) -> Result<(i64, NaiveDate, NaiveDate), FormErrors> {
        let mut errors = FormErrors::default();

        let amount = parse_amount(&self.amount);
        match amount {
            Some(value) if value >= 0 => {}
            _ => errors.add("amount", "Budget amount must be 0 or more"),
        }

        let start = parse_day(&self.start_date);
        if start.is_none() {
            errors.add("startDate", "Start date is required");
        }
        let end = parse_day(&self.end_date);
        if end.is_none() {
            errors.add("endDate", "End date is required");
        }
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                errors.add("endDate", "End date cannot be before start date");
            }
        }

        match (amount, start, end) {
            (Some(amount), Some(start), Some(end)) if errors.is_empty() => Ok((amount, start, end)),
            _ => errors.reject(),
        }
    }

    pub fn validate(&self) -> Result<NewBudget, FormErrors> {
        self.check()
            .map(|(amount, start, end)| NewBudget::new(start, end, amount))
    }

    pub fn validate_patch(&self) -> Result<BudgetPatch, FormErrors> {
        self.check().map(|(amount, start, end)| BudgetPatch {
            amount: Some(amount),
            start_date: Some(start),
            end_date: Some(end),
        })
    }
}

fn check_password(errors: &mut FormErrors, password: &str) {
    if password.trim().is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 6 characters");
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub user_name: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FormErrors> {
        let mut errors = FormErrors::default();
        if self.user_name.trim().is_empty() {
            errors.add("userName", "Username is required");
        }
        check_password(&mut errors, &self.password);
        errors.into_result(|| Credentials {
            user_name: self.user_name.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterForm {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Registration, FormErrors> {
        let mut errors = FormErrors::default();
        if self.user_name.trim().is_empty() {
            errors.add("userName", "Username is required");
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "Email is required");
        } else if !EMAIL_PATTERN.is_match(email) {
            errors.add("email", "Please enter a valid email address");
        }
        check_password(&mut errors, &self.password);
        errors.into_result(|| Registration {
            user_name: self.user_name.trim().to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}
