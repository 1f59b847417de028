mod budget_card;
mod budget_modal;
mod expense_list;
mod expense_modal;
mod header;
pub mod icons;
pub(crate) mod inputs;

pub use budget_card::BudgetCard;
pub use budget_modal::AddBudgetModal;
pub use expense_list::ExpenseList;
pub use expense_modal::AddExpenseModal;
pub use header::Header;
