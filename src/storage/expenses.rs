//! Ordered expense collection
//!
//! Storage order is insertion order with the newest record first. Mutations
//! consume the store and return the updated one, so a caller always holds a
//! complete snapshot.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Expense, ExpenseId};

/// The expense collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `expenses` in the given storage order
    pub fn from_vec(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    /// Store with `expense` prepended
    pub fn append(mut self, expense: Expense) -> Self {
        self.expenses.insert(0, expense);
        self
    }

    /// Store without the record carrying `id`
    ///
    /// Removes exactly one record when present and is a no-op otherwise.
    pub fn remove(mut self, id: &ExpenseId) -> Self {
        if let Some(pos) = self.expenses.iter().position(|e| &e.id == id) {
            self.expenses.remove(pos);
        }
        self
    }

    pub fn contains(&self, id: &ExpenseId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter()
    }

    /// All records in storage order
    pub fn as_slice(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Records in display order: newest timestamp first
    ///
    /// The sort is stable, so records sharing a timestamp keep storage order.
    pub fn sorted_by_date_desc(&self) -> Vec<&Expense> {
        let mut sorted: Vec<&Expense> = self.expenses.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Identifier for a record created at `now`
    ///
    /// Derived from the creation time in milliseconds and bumped one
    /// millisecond at a time until it is unused.
    pub fn next_id(&self, now: DateTime<Utc>) -> ExpenseId {
        let mut instant = now;
        loop {
            let id = ExpenseId::from_instant(instant);
            if !self.contains(&id) {
                return id;
            }
            instant += Duration::milliseconds(1);
        }
    }
}

impl IntoIterator for ExpenseStore {
    type Item = Expense;
    type IntoIter = std::vec::IntoIter<Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.expenses.into_iter()
    }
}

impl FromIterator<Expense> for ExpenseStore {
    fn from_iter<I: IntoIterator<Item = Expense>>(iter: I) -> Self {
        Self {
            expenses: iter.into_iter().collect(),
        }
    }
}
