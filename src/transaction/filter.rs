//! Month filtering and aggregation over the transaction ledger.

use time::{Date, Month};

use super::model::{Transaction, TransactionKind};

/// The (year, month) pair that determines which transactions are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFilter {
    /// The calendar year.
    pub year: i32,
    /// The calendar month.
    pub month: Month,
}

impl MonthFilter {
    /// The filter for the month containing `date`.
    pub fn for_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The filter for the month before this one.
    pub fn previous(self) -> Self {
        match self.month.previous() {
            Month::December => Self {
                year: self.year - 1,
                month: Month::December,
            },
            month => Self { month, ..self },
        }
    }

    /// The filter for the month after this one.
    pub fn next(self) -> Self {
        match self.month.next() {
            Month::January => Self {
                year: self.year + 1,
                month: Month::January,
            },
            month => Self { month, ..self },
        }
    }
}

/// The aggregate totals over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts.
    pub total_expense: f64,
    /// `total_income - total_expense`.
    pub balance: f64,
}

/// The transactions whose date falls within the filter's calendar year and
/// month, in their original order.
pub fn filter_by_month(transactions: &[Transaction], filter: MonthFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.date.year() == filter.year && transaction.date.month() == filter.month
        })
        .cloned()
        .collect()
}

/// Sort transactions by date, most recent first.
///
/// The sort is stable: transactions with equal dates keep their relative
/// order, so same-day entries stay in insertion order.
pub fn sort_by_date_descending(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Compute income, expense and balance totals over `transactions`.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary::default();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => summary.total_income += transaction.amount,
            TransactionKind::Expense => summary.total_expense += transaction.amount,
        }
    }

    summary.balance = summary.total_income - summary.total_expense;

    summary
}
