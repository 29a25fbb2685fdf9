//! Category vocabularies.
//!
//! Each transaction kind has its own closed set of categories. The
//! sets are validated at the boundary: an expense-only category on an
//! income transaction is rejected, and vice versa. "Other" exists in
//! both vocabularies and is valid for either kind.

use serde::{Deserialize, Serialize};

use crate::{EngineError, transactions::TransactionKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    FoodAndDining,
    Transportation,
    Housing,
    Utilities,
    Shopping,
    Entertainment,
    Healthcare,
    Education,
    PersonalCare,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::PersonalCare => "Personal Care",
            Self::Other => "Other",
        }
    }
}

impl TryFrom<&str> for ExpenseCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Food & Dining" => Ok(Self::FoodAndDining),
            "Transportation" => Ok(Self::Transportation),
            "Housing" => Ok(Self::Housing),
            "Utilities" => Ok(Self::Utilities),
            "Shopping" => Ok(Self::Shopping),
            "Entertainment" => Ok(Self::Entertainment),
            "Healthcare" => Ok(Self::Healthcare),
            "Education" => Ok(Self::Education),
            "Personal Care" => Ok(Self::PersonalCare),
            "Other" => Ok(Self::Other),
            other => Err(EngineError::Validation(format!(
                "category: \"{other}\" is not an expense category"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    Salary,
    Business,
    Investments,
    Freelance,
    Gifts,
    Other,
}

impl IncomeCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Business => "Business",
            Self::Investments => "Investments",
            Self::Freelance => "Freelance",
            Self::Gifts => "Gifts",
            Self::Other => "Other",
        }
    }
}

impl TryFrom<&str> for IncomeCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Salary" => Ok(Self::Salary),
            "Business" => Ok(Self::Business),
            "Investments" => Ok(Self::Investments),
            "Freelance" => Ok(Self::Freelance),
            "Gifts" => Ok(Self::Gifts),
            "Other" => Ok(Self::Other),
            other => Err(EngineError::Validation(format!(
                "category: \"{other}\" is not an income category"
            ))),
        }
    }
}

/// A category tagged with the kind it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Expense(ExpenseCategory),
    Income(IncomeCategory),
}

impl Category {
    /// Resolves a category name against the vocabulary of `kind`.
    pub fn for_kind(kind: TransactionKind, name: &str) -> Result<Self, EngineError> {
        match kind {
            TransactionKind::Expense => ExpenseCategory::try_from(name).map(Self::Expense),
            TransactionKind::Income => IncomeCategory::try_from(name).map(Self::Income),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense(category) => category.as_str(),
            Self::Income(category) => category.as_str(),
        }
    }

    pub fn kind(self) -> TransactionKind {
        match self {
            Self::Expense(_) => TransactionKind::Expense,
            Self::Income(_) => TransactionKind::Income,
        }
    }
}
