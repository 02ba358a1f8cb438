//! Credit card model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A revolving credit line with its current balance owed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    pub name: String,
    /// Amount currently owed
    pub balance: Money,
    /// Credit limit
    pub limit: Money,
}

impl CreditCard {
    pub fn new(name: impl Into<String>, balance: Money, limit: Money) -> Self {
        Self {
            name: name.into(),
            balance,
            limit,
        }
    }

    /// Remaining credit; negative when the card is over its limit
    pub fn available_credit(&self) -> Money {
        self.limit - self.balance
    }

    pub fn is_over_limit(&self) -> bool {
        self.balance > self.limit
    }
}

impl fmt::Display for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} / {})", self.name, self.balance, self.limit)
    }
}
