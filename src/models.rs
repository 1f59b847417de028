use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
    /// Serialized from the entity's `getId()`; older payloads use `userid`.
    #[serde(rename = "id", alias = "userid", default)]
    pub id: i64,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Budget {
    #[serde(
        rename = "budgetId",
        alias = "budgetid",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    pub amount: i64,
    #[serde(rename = "amountUsed", default)]
    pub amount_used: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Budget {
    /// Negative when the budget is overspent.
    pub fn remaining(&self) -> i64 {
        self.amount - self.amount_used
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining() < 0
    }

    pub fn percent_used(&self) -> f64 {
        if self.amount > 0 {
            self.amount_used as f64 / self.amount as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Body of `POST /api/budgets`. Built by `BudgetForm::validate`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewBudget {
    #[serde(rename = "startDate")]
    pub(crate) start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub(crate) end_date: NaiveDate,
    pub(crate) amount: i64,
    #[serde(rename = "amountUsed")]
    pub(crate) amount_used: i64,
}

impl NewBudget {
    pub(crate) fn new(start_date: NaiveDate, end_date: NaiveDate, amount: i64) -> Self {
        Self {
            start_date,
            end_date,
            amount,
            amount_used: 0,
        }
    }
}

/// Body of `PUT /api/budgets`; absent fields are left untouched by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BudgetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Shopping,
    Utilities,
    Health,
    Education,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Utilities,
        Category::Health,
        Category::Education,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "🍔",
            Category::Transport => "🚗",
            Category::Entertainment => "🎬",
            Category::Shopping => "🛍️",
            Category::Utilities => "💡",
            Category::Health => "💊",
            Category::Education => "📚",
            Category::Other => "📝",
        }
    }

    /// Case-insensitive; anything unrecognised is `Other`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or_default()
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::parse(&raw)
    }
}

impl From<Category> for &'static str {
    fn from(category: Category) -> Self {
        category.as_str()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "&'static str")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
    NetBanking,
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Upi,
        PaymentMethod::NetBanking,
        PaymentMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::NetBanking => "NetBanking",
            PaymentMethod::Other => "Other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::NetBanking => "Net Banking",
            other => other.as_str(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "💵",
            PaymentMethod::Card => "💳",
            PaymentMethod::Upi => "📱",
            PaymentMethod::NetBanking => "🏦",
            PaymentMethod::Other => "💰",
        }
    }

    pub fn parse(raw: &str) -> Self {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(&compact))
            .unwrap_or(PaymentMethod::Other)
    }
}

impl From<String> for PaymentMethod {
    fn from(raw: String) -> Self {
        PaymentMethod::parse(&raw)
    }
}

impl From<PaymentMethod> for &'static str {
    fn from(method: PaymentMethod) -> Self {
        method.as_str()
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Expense {
    #[serde(rename = "expenseid", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub amount: i64,
    #[serde(with = "day_date")]
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "type", default)]
    pub category: Category,
    #[serde(rename = "payment_Method", default)]
    pub payment_method: PaymentMethod,
}

/// Body of `POST /api/expenses`. Built by `ExpenseForm::validate`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewExpense {
    pub(crate) amount: i64,
    #[serde(with = "day_date")]
    pub(crate) date: NaiveDate,
    pub(crate) description: String,
    #[serde(rename = "type")]
    pub(crate) category: Category,
    #[serde(rename = "payment_Method")]
    pub(crate) payment_method: PaymentMethod,
}

impl NewExpense {
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExpensePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(rename = "payment_Method", skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Registration {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Newest first; expenses sharing a date keep their relative order.
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Day part of a `yyyy-MM-dd` or ISO-8601 timestamp string.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().split('T').next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Expense dates come back either as `yyyy-MM-dd`, as a full timestamp or as
/// epoch milliseconds depending on the backend's Jackson settings.
mod day_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Text(String),
        Millis(i64),
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        match RawDate::deserialize(deserializer)? {
            RawDate::Text(text) => super::parse_day(&text)
                .ok_or_else(|| de::Error::custom(format!("invalid date `{text}`"))),
            RawDate::Millis(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
                .map(|instant| instant.date_naive())
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(raw: &str) -> NaiveDate {
        parse_day(raw).unwrap()
    }

    #[test]
    fn budget_reads_backend_shape() {
        let budget: Budget = serde_json::from_str(
            r#"{"budgetId":3,"startDate":"2024-01-01","endDate":"2024-01-31","amount":5000,"amountUsed":1200,
                "user":{"id":9,"userName":"asha","email":"asha@example.com","username":"asha",
                        "enabled":true,"authorities":[],"accountNonLocked":true}}"#,
        )
        .unwrap();

        assert_eq!(budget.id, Some(3));
        assert_eq!(budget.start_date, day("2024-01-01"));
        assert_eq!(budget.remaining(), 3800);
        let user = budget.user.unwrap();
        assert_eq!(user.id, 9);
        assert_eq!(user.user_name, "asha");
    }

    #[test]
    fn lowercase_id_spellings_are_accepted() {
        let budget: Budget = serde_json::from_value(json!({
            "budgetid": 4, "startDate": "2024-02-01", "endDate": "2024-02-29",
            "amount": 100, "amountUsed": 0,
            "user": { "userid": 7, "userName": "ravi", "email": "ravi@example.com" }
        }))
        .unwrap();
        assert_eq!(budget.id, Some(4));
        assert_eq!(budget.user.map(|u| u.id), Some(7));
    }

    #[test]
    fn registered_user_without_id_still_decodes() {
        let user: User = serde_json::from_str(r#"{"userName":"ravi","email":"ravi@example.com"}"#).unwrap();
        assert_eq!(user.id, 0);
        assert_eq!(user.user_name, "ravi");
    }

    #[test]
    fn overspent_budget_has_negative_remaining() {
        let budget = Budget {
            id: Some(1),
            start_date: day("2024-01-01"),
            end_date: day("2024-01-31"),
            amount: 1000,
            amount_used: 1250,
            user: None,
        };
        assert_eq!(budget.remaining(), -250);
        assert!(budget.is_over_budget());
        assert!((budget.percent_used() - 125.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_amount_budget_reports_zero_percent() {
        let budget = Budget {
            id: None,
            start_date: day("2024-01-01"),
            end_date: day("2024-01-31"),
            amount: 0,
            amount_used: 40,
            user: None,
        };
        assert_eq!(budget.percent_used(), 0.0);
    }

    #[test]
    fn new_budget_sends_zero_amount_used() {
        let body = serde_json::to_value(NewBudget::new(day("2024-01-01"), day("2024-01-31"), 5000)).unwrap();
        assert_eq!(
            body,
            json!({ "startDate": "2024-01-01", "endDate": "2024-01-31", "amount": 5000, "amountUsed": 0 })
        );
    }

    #[test]
    fn budget_patch_omits_absent_fields() {
        let patch = BudgetPatch {
            amount: Some(7000),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(patch).unwrap(), json!({ "amount": 7000 }));
    }

    #[test]
    fn expense_date_accepts_timestamps() {
        let iso: Expense = serde_json::from_value(json!({
            "expenseid": 1, "amount": 300, "date": "2024-01-15T00:00:00.000+00:00",
            "description": "Groceries", "type": "food", "payment_Method": "UPI"
        }))
        .unwrap();
        assert_eq!(iso.date, day("2024-01-15"));
        assert_eq!(iso.category, Category::Food);
        assert_eq!(iso.payment_method, PaymentMethod::Upi);

        let millis: Expense = serde_json::from_value(json!({
            "expenseid": 2, "amount": 80, "date": 1_705_276_800_000_i64,
            "description": "Bus", "type": "Transport", "payment_Method": "Cash"
        }))
        .unwrap();
        assert_eq!(millis.date, day("2024-01-15"));
    }

    #[test]
    fn unknown_enum_values_fall_back() {
        assert_eq!(Category::parse("Rent"), Category::Other);
        assert_eq!(Category::parse(" health "), Category::Health);
        assert_eq!(PaymentMethod::parse("Net Banking"), PaymentMethod::NetBanking);
        assert_eq!(PaymentMethod::parse("cheque"), PaymentMethod::Other);
    }

    #[test]
    fn missing_enums_use_defaults() {
        let expense: Expense = serde_json::from_value(json!({
            "amount": 10, "date": "2024-02-01", "description": "Tea"
        }))
        .unwrap();
        assert_eq!(expense.category, Category::Other);
        assert_eq!(expense.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn new_expense_uses_backend_field_names() {
        let expense = NewExpense {
            amount: 300,
            date: day("2024-01-20"),
            description: "Dinner".into(),
            category: Category::Food,
            payment_method: PaymentMethod::NetBanking,
        };
        assert_eq!(
            serde_json::to_value(expense).unwrap(),
            json!({
                "amount": 300, "date": "2024-01-20", "description": "Dinner",
                "type": "Food", "payment_Method": "NetBanking"
            })
        );
    }

    #[test]
    fn sorting_is_newest_first_and_stable() {
        let make = |id: i64, date: &str| Expense {
            id: Some(id),
            amount: 1,
            date: day(date),
            description: format!("e{id}"),
            category: Category::Other,
            payment_method: PaymentMethod::Cash,
        };
        let mut expenses = vec![
            make(1, "2024-01-02"),
            make(2, "2024-01-05"),
            make(3, "2024-01-02"),
            make(4, "2024-01-03"),
        ];
        sort_newest_first(&mut expenses);
        let ids: Vec<_> = expenses.iter().filter_map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }
}
