use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response body for deletes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    /// Request body for creating or replacing a transaction.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        /// Amount in minor units (cents). Must be > 0.
        pub amount_minor: i64,
        pub description: String,
        /// Calendar date, `YYYY-MM-DD`.
        pub date: NaiveDate,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        /// Display name from the vocabulary of `type`,
        /// e.g. "Food & Dining" or "Salary".
        pub category: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub amount_minor: i64,
        pub description: String,
        pub date: NaiveDate,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub category: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod budget {
    use super::*;

    /// Request body for creating or replacing a budget.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        /// Expense category display name.
        pub category: String,
        /// Monthly cap in minor units (cents). Must be > 0.
        pub amount_minor: i64,
        /// `YYYY-MM`.
        pub month: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub category: String,
        pub amount_minor: i64,
        pub month: String,
        /// Derived: sum of matching expense transactions, recomputed
        /// by the server on every read and write.
        pub spent_minor: i64,
        /// Derived: spent / cap, in percent.
        pub percentage_used: f64,
        /// Derived: true once spent exceeds the cap.
        pub over_budget: bool,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}
