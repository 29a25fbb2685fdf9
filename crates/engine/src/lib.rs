//! Core engine: transaction CRUD and budget reconciliation over the
//! database.
//!
//! The interesting part lives in the budget operations: `spent_minor`
//! on a budget is a cached aggregate of the expense transactions for
//! that (category, month) pair, recomputed on every read and before
//! every write. Uniqueness of the pair is checked here for a friendly
//! error, but the database unique index is the true arbiter against
//! concurrent creates.

use chrono::Utc;
use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, SqlErr, Statement, prelude::*,
};
use uuid::Uuid;

pub use budgets::{Budget, BudgetDraft};
pub use categories::{Category, ExpenseCategory, IncomeCategory};
pub use error::EngineError;
pub use month::Month;
pub use transactions::{Transaction, TransactionDraft, TransactionKind};

mod budgets;
mod categories;
mod error;
mod month;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Lists all transactions, newest date first.
    pub async fn list_transactions(&self) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Transaction::try_from).collect()
    }

    /// Validates and persists a new transaction.
    pub async fn create_transaction(&self, draft: TransactionDraft) -> ResultEngine<Transaction> {
        let tx = Transaction::new(draft)?;
        transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;
        Ok(tx)
    }

    /// Replaces all fields of an existing transaction.
    pub async fn update_transaction(
        &self,
        id: Uuid,
        draft: TransactionDraft,
    ) -> ResultEngine<Transaction> {
        let model = transactions::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction".to_string()))?;

        let mut tx = Transaction::new(draft)?;
        tx.id = id;
        tx.created_at = model.created_at;
        tx.updated_at = Utc::now();

        transactions::ActiveModel::from(&tx)
            .update(&self.database)
            .await?;
        Ok(tx)
    }

    /// Deletes a transaction. Budgets are not touched here; their
    /// `spent_minor` catches up on the next read.
    pub async fn delete_transaction(&self, id: Uuid) -> ResultEngine<()> {
        let result = transactions::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("transaction".to_string()));
        }
        Ok(())
    }

    /// Sums expense transactions for `category` inside `month`,
    /// bounds included. Returns 0 when there are no matches.
    pub async fn compute_spent(
        &self,
        category: ExpenseCategory,
        month: Month,
    ) -> ResultEngine<i64> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT COALESCE(SUM(amount_minor), 0) AS sum \
             FROM transactions \
             WHERE kind = ? AND category = ? AND date >= ? AND date <= ?",
            vec![
                TransactionKind::Expense.as_str().into(),
                category.as_str().into(),
                month.first_day().into(),
                month.last_day().into(),
            ],
        );
        let row = self.database.query_one(stmt).await?;
        Ok(row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0))
    }

    /// Lists the budgets of `month`, each with `spent_minor` freshly
    /// recomputed and written back.
    pub async fn list_budgets_for_month(&self, month: Month) -> ResultEngine<Vec<Budget>> {
        let models = budgets::Entity::find()
            .filter(budgets::Column::Month.eq(month.to_string()))
            .order_by_asc(budgets::Column::Category)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(self.refresh_budget(model).await?);
        }
        Ok(out)
    }

    /// Creates a budget for a (category, month) pair.
    ///
    /// The pair is checked for uniqueness up front; a constraint
    /// violation at insert time (two concurrent creates) is translated
    /// to the same [`EngineError::DuplicateBudget`].
    pub async fn create_budget(&self, draft: BudgetDraft) -> ResultEngine<Budget> {
        let mut budget = Budget::new(draft)?;

        if self
            .budget_pair_taken(budget.category, budget.month, None)
            .await?
        {
            return Err(duplicate_pair(budget.category, budget.month));
        }

        budget.spent_minor = self.compute_spent(budget.category, budget.month).await?;

        match budgets::ActiveModel::from(&budget).insert(&self.database).await {
            Ok(_) => Ok(budget),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(duplicate_pair(budget.category, budget.month))
                }
                _ => Err(err.into()),
            },
        }
    }

    /// Replaces category, cap and month of an existing budget,
    /// recomputing `spent_minor` for the new pair.
    ///
    /// The uniqueness check excludes the budget's own id, so re-saving
    /// an unchanged (category, month) succeeds.
    pub async fn update_budget(&self, id: Uuid, draft: BudgetDraft) -> ResultEngine<Budget> {
        let model = budgets::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("budget".to_string()))?;

        let mut budget = Budget::new(draft)?;
        budget.id = id;
        budget.created_at = model.created_at;
        budget.updated_at = Utc::now();

        if self
            .budget_pair_taken(budget.category, budget.month, Some(id))
            .await?
        {
            return Err(duplicate_pair(budget.category, budget.month));
        }

        budget.spent_minor = self.compute_spent(budget.category, budget.month).await?;

        match budgets::ActiveModel::from(&budget).update(&self.database).await {
            Ok(_) => Ok(budget),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(duplicate_pair(budget.category, budget.month))
                }
                _ => Err(err.into()),
            },
        }
    }

    /// Deletes a budget. Transactions are not cascaded.
    pub async fn delete_budget(&self, id: Uuid) -> ResultEngine<()> {
        let result = budgets::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("budget".to_string()));
        }
        Ok(())
    }

    /// True if some other budget already owns the (category, month)
    /// pair. `exclude_id` skips the record being updated.
    async fn budget_pair_taken(
        &self,
        category: ExpenseCategory,
        month: Month,
        exclude_id: Option<Uuid>,
    ) -> ResultEngine<bool> {
        let mut query = budgets::Entity::find()
            .filter(budgets::Column::Category.eq(category.as_str()))
            .filter(budgets::Column::Month.eq(month.to_string()));
        if let Some(id) = exclude_id {
            query = query.filter(budgets::Column::Id.ne(id.to_string()));
        }
        Ok(query.one(&self.database).await?.is_some())
    }

    /// Recomputes `spent_minor` from transactions and writes it back
    /// when the stored value is stale. Idempotent.
    async fn refresh_budget(&self, model: budgets::Model) -> ResultEngine<Budget> {
        let mut budget = Budget::try_from(model)?;
        let spent = self.compute_spent(budget.category, budget.month).await?;

        if spent != budget.spent_minor {
            budget.spent_minor = spent;
            budget.updated_at = Utc::now();
            let stale = budgets::ActiveModel {
                id: ActiveValue::Set(budget.id.to_string()),
                spent_minor: ActiveValue::Set(budget.spent_minor),
                updated_at: ActiveValue::Set(budget.updated_at),
                ..Default::default()
            };
            stale.update(&self.database).await?;
        }

        Ok(budget)
    }
}

fn duplicate_pair(category: ExpenseCategory, month: Month) -> EngineError {
    EngineError::DuplicateBudget(format!("{} in {}", category.as_str(), month))
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}
