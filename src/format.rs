use chrono::NaiveDate;

pub const CURRENCY_SYMBOL: &str = "₹";

/// `1234567` -> `1,234,567`
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole rupees with the sign ahead of the symbol: `-₹250`.
pub fn format_currency(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}{}", sign, CURRENCY_SYMBOL, group_digits(amount.unsigned_abs()))
}

/// `15 Jan 2024`
pub fn format_day(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
