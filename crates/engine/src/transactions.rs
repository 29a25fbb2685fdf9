//! Transaction primitives.
//!
//! A `Transaction` is a single dated money movement, tagged income or
//! expense with a category from the matching vocabulary.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::Validation(format!(
                "type: \"{other}\" is not income or expense"
            ))),
        }
    }
}

/// Unvalidated transaction fields as they arrive from the outside.
#[derive(Clone, Debug)]
pub struct TransactionDraft {
    pub amount_minor: i64,
    pub description: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub amount_minor: i64,
    pub description: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Validates a draft into a transaction.
    ///
    /// Checks run in field order and stop at the first violation:
    /// amount, description, date (valid by construction), kind (typed),
    /// category against the kind's vocabulary.
    pub fn new(draft: TransactionDraft) -> ResultEngine<Self> {
        if draft.amount_minor <= 0 {
            return Err(EngineError::Validation(
                "amount: must be > 0".to_string(),
            ));
        }
        if draft.description.trim().is_empty() {
            return Err(EngineError::Validation(
                "description: must not be empty".to_string(),
            ));
        }
        let category = Category::for_kind(draft.kind, &draft.category)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            amount_minor: draft.amount_minor,
            description: draft.description.trim().to_string(),
            date: draft.date,
            kind: draft.kind,
            category,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub amount_minor: i64,
    pub description: String,
    pub date: Date,
    pub kind: String,
    pub category: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            amount_minor: ActiveValue::Set(tx.amount_minor),
            description: ActiveValue::Set(tx.description.clone()),
            date: ActiveValue::Set(tx.date),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            category: ActiveValue::Set(tx.category.as_str().to_string()),
            created_at: ActiveValue::Set(tx.created_at),
            updated_at: ActiveValue::Set(tx.updated_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let kind = TransactionKind::try_from(model.kind.as_str())?;
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("transaction".to_string()))?,
            amount_minor: model.amount_minor,
            description: model.description,
            date: model.date,
            kind,
            category: Category::for_kind(kind, &model.category)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
