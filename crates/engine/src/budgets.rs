//! Budget primitives.
//!
//! A `Budget` caps spending for one expense category in one calendar
//! month. `spent_minor` is a cached value derived from the expense
//! transactions of that (category, month) pair; the engine recomputes
//! it on every read and before every write.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ExpenseCategory, Month, ResultEngine};

/// Unvalidated budget fields as they arrive from the outside.
#[derive(Clone, Debug)]
pub struct BudgetDraft {
    pub category: String,
    pub amount_minor: i64,
    pub month: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub category: ExpenseCategory,
    pub amount_minor: i64,
    pub month: Month,
    pub spent_minor: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Validates a draft into a budget with `spent_minor` still unset.
    ///
    /// Checks run in field order and stop at the first violation:
    /// amount, month format, category against the expense vocabulary.
    pub fn new(draft: BudgetDraft) -> ResultEngine<Self> {
        if draft.amount_minor <= 0 {
            return Err(EngineError::Validation(
                "amount: must be > 0".to_string(),
            ));
        }
        let month = Month::parse(&draft.month)?;
        let category = ExpenseCategory::try_from(draft.category.as_str())?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            category,
            amount_minor: draft.amount_minor,
            month,
            spent_minor: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// True once the recorded spending exceeds the cap.
    pub fn over_budget(&self) -> bool {
        self.spent_minor > self.amount_minor
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub category: String,
    pub amount_minor: i64,
    pub month: String,
    pub spent_minor: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Budget> for ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(budget.id.to_string()),
            category: ActiveValue::Set(budget.category.as_str().to_string()),
            amount_minor: ActiveValue::Set(budget.amount_minor),
            month: ActiveValue::Set(budget.month.to_string()),
            spent_minor: ActiveValue::Set(budget.spent_minor),
            created_at: ActiveValue::Set(budget.created_at),
            updated_at: ActiveValue::Set(budget.updated_at),
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("budget".to_string()))?,
            category: ExpenseCategory::try_from(model.category.as_str())?,
            amount_minor: model.amount_minor,
            month: Month::parse(&model.month)?,
            spent_minor: model.spent_minor,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> BudgetDraft {
        BudgetDraft {
            category: "Food & Dining".to_string(),
            amount_minor: 50_000,
            month: "2024-03".to_string(),
        }
    }

    #[test]
    fn accepts_valid_draft() {
        let budget = Budget::new(draft()).unwrap();
        assert_eq!(budget.category, ExpenseCategory::FoodAndDining);
        assert_eq!(budget.spent_minor, 0);
        assert!(!budget.over_budget());
    }

    #[test]
    fn rejects_non_positive_amount() {
        let mut bad = draft();
        bad.amount_minor = 0;
        assert!(matches!(
            Budget::new(bad),
            Err(EngineError::Validation(msg)) if msg.starts_with("amount")
        ));
    }

    #[test]
    fn rejects_malformed_month() {
        let mut bad = draft();
        bad.month = "2024-13".to_string();
        assert!(matches!(
            Budget::new(bad),
            Err(EngineError::Validation(msg)) if msg.starts_with("month")
        ));
    }

    #[test]
    fn rejects_income_category() {
        let mut bad = draft();
        bad.category = "Salary".to_string();
        assert!(Budget::new(bad).is_err());
    }

    #[test]
    fn over_budget_when_spent_exceeds_cap() {
        let mut budget = Budget::new(draft()).unwrap();
        budget.spent_minor = budget.amount_minor;
        assert!(!budget.over_budget());
        budget.spent_minor = budget.amount_minor + 1;
        assert!(budget.over_budget());
    }
}
