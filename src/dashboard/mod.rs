//! Dashboard state machine.
//!
//! `Loading -> Ready`, where `Ready` shows either the no-budget card or the
//! budget, and an error banner can sit on top of whatever has loaded.
//! Mutating actions pass through `idle -> pending -> idle`; a mutation that
//! is already pending is not started again.

pub mod actions;

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use yew::Reducible;

use crate::errors::ApiError;
use crate::models::{sort_newest_first, Budget, Expense};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mutation {
    CreateBudget,
    UpdateBudget,
    DeleteBudget,
    AddExpense,
    UpdateExpense(i64),
    DeleteExpense(i64),
}

/// Mutations with a request on the wire, claimed and released in the event
/// handler itself. The reducer's `in_flight` only catches up on the next
/// render and is used for display.
#[derive(Debug, Default)]
pub struct MutationGate {
    claimed: RefCell<BTreeSet<Mutation>>,
}

impl MutationGate {
    /// `false` if the mutation is already running.
    pub fn try_claim(&self, mutation: Mutation) -> bool {
        self.claimed.borrow_mut().insert(mutation)
    }

    pub fn release(&self, mutation: &Mutation) {
        self.claimed.borrow_mut().remove(mutation);
    }
}

/// What the dashboard should render.
#[derive(Debug, PartialEq)]
pub enum DashboardView<'a> {
    Loading,
    NoBudget,
    HasBudget(&'a Budget),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    pub phase: Phase,
    pub budget: Option<Budget>,
    /// Newest first.
    pub expenses: Vec<Expense>,
    pub banner: Option<String>,
    in_flight: BTreeSet<Mutation>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            phase: Phase::Loading,
            budget: None,
            expenses: Vec::new(),
            banner: None,
            in_flight: BTreeSet::new(),
        }
    }
}

impl DashboardState {
    pub fn view(&self) -> DashboardView<'_> {
        match (self.phase, &self.budget) {
            (Phase::Loading, _) => DashboardView::Loading,
            (Phase::Ready, None) => DashboardView::NoBudget,
            (Phase::Ready, Some(budget)) => DashboardView::HasBudget(budget),
        }
    }

    pub fn is_pending(&self, mutation: &Mutation) -> bool {
        self.in_flight.contains(mutation)
    }
}

/// Result of the initial load; each half may fail on its own.
#[derive(Debug)]
pub struct Loaded {
    pub budget: Result<Option<Budget>, ApiError>,
    pub expenses: Result<Vec<Expense>, ApiError>,
}

#[derive(Debug)]
pub enum DashboardAction {
    Reload,
    Loaded(Loaded),
    DismissBanner,
    Started(Mutation),
    /// Back to idle with nothing changed: the call failed or was declined.
    Settled(Mutation),
    BudgetSaved(Mutation, Budget),
    BudgetDeleted,
    ExpenseAdded {
        expense: Expense,
        budget: Option<Budget>,
    },
    /// `id` is the one the update was issued for.
    ExpenseUpdated {
        id: i64,
        expense: Expense,
        budget: Option<Budget>,
    },
    ExpenseDeleted {
        id: i64,
        budget: Option<Budget>,
    },
}

impl Reducible for DashboardState {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DashboardAction::Reload => {
                next.phase = Phase::Loading;
                next.banner = None;
            }
            DashboardAction::Loaded(loaded) => {
                next.phase = Phase::Ready;
                let mut failures = Vec::new();
                match loaded.budget {
                    Ok(budget) => next.budget = budget,
                    Err(err) => failures.push(err),
                }
                match loaded.expenses {
                    Ok(mut expenses) => {
                        sort_newest_first(&mut expenses);
                        next.expenses = expenses;
                    }
                    Err(err) => failures.push(err),
                }
                next.banner = failures
                    .first()
                    .map(|err| err.message_or("Failed to load data"));
            }
            DashboardAction::DismissBanner => next.banner = None,
            DashboardAction::Started(mutation) => {
                if !next.in_flight.insert(mutation) {
                    return self;
                }
            }
            DashboardAction::Settled(mutation) => {
                next.in_flight.remove(&mutation);
            }
            DashboardAction::BudgetSaved(mutation, budget) => {
                next.in_flight.remove(&mutation);
                next.budget = Some(budget);
            }
            DashboardAction::BudgetDeleted => {
                next.in_flight.remove(&Mutation::DeleteBudget);
                next.budget = None;
                next.expenses.clear();
            }
            DashboardAction::ExpenseAdded { expense, budget } => {
                next.in_flight.remove(&Mutation::AddExpense);
                next.expenses.push(expense);
                sort_newest_first(&mut next.expenses);
                next.budget = budget;
            }
            DashboardAction::ExpenseUpdated {
                id,
                mut expense,
                budget,
            } => {
                next.in_flight.remove(&Mutation::UpdateExpense(id));
                expense.id.get_or_insert(id);
                if let Some(slot) = next.expenses.iter_mut().find(|e| e.id == Some(id)) {
                    *slot = expense;
                }
                sort_newest_first(&mut next.expenses);
                next.budget = budget;
            }
            DashboardAction::ExpenseDeleted { id, budget } => {
                next.in_flight.remove(&Mutation::DeleteExpense(id));
                next.expenses.retain(|e| e.id != Some(id));
                next.budget = budget;
            }
        }
        Rc::new(next)
    }
}
