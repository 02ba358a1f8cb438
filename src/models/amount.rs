//! Amount resolution at the system boundary
//!
//! Records arriving from storage or HTTP bodies may carry either a
//! pre-computed `amount_cents` integer or a legacy decimal `amount`. This
//! module turns that ambiguity into an explicit [`AmountInput`] before
//! anything reaches the money engine.

use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::{FinanceError, FinanceResult};

/// An amount in one of the representations accepted at the boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountInput {
    /// Integer minor units
    Cents(i64),
    /// Major units as a decimal string, e.g. `"19.99"`
    MajorUnits(String),
    /// Major units as a native float, e.g. a JSON number `19.99`
    MajorUnitsFloat(f64),
}

impl AmountInput {
    /// Convert to cents through the money engine's boundary rules
    pub fn resolve(&self) -> FinanceResult<Money> {
        match self {
            Self::Cents(cents) => Money::try_from_cents(*cents),
            Self::MajorUnits(text) => Money::parse(text),
            Self::MajorUnitsFloat(value) => Money::from_major_f64(*value),
        }
    }
}

/// A legacy decimal amount, as either a JSON string or a JSON number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyAmount {
    Text(String),
    Number(f64),
}

/// The raw amount fields of an incoming record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountFields {
    #[serde(default, alias = "amountCents")]
    pub amount_cents: Option<i64>,
    #[serde(default)]
    pub amount: Option<LegacyAmount>,
}

impl AmountFields {
    pub fn from_cents(cents: i64) -> Self {
        Self {
            amount_cents: Some(cents),
            amount: None,
        }
    }

    pub fn from_major_units(amount: impl Into<String>) -> Self {
        Self {
            amount_cents: None,
            amount: Some(LegacyAmount::Text(amount.into())),
        }
    }

    /// Pick the representation to trust; `amount_cents` wins when both exist
    pub fn to_input(&self) -> FinanceResult<AmountInput> {
        match (&self.amount_cents, &self.amount) {
            (Some(cents), _) => Ok(AmountInput::Cents(*cents)),
            (None, Some(LegacyAmount::Text(text))) => Ok(AmountInput::MajorUnits(text.clone())),
            (None, Some(LegacyAmount::Number(value))) => Ok(AmountInput::MajorUnitsFloat(*value)),
            (None, None) => Err(FinanceError::InvalidAmount(
                "record has neither amount_cents nor amount".to_string(),
            )),
        }
    }
}

/// Resolve a record's amount fields to cents
///
/// # Examples
/// ```
/// use finance_core::models::{resolve_amount_cents, AmountFields};
/// let legacy = AmountFields::from_major_units("19.99");
/// assert_eq!(resolve_amount_cents(&legacy).unwrap().cents(), 1999);
/// assert_eq!(resolve_amount_cents(&AmountFields::from_cents(1999)).unwrap().cents(), 1999);
/// ```
pub fn resolve_amount_cents(fields: &AmountFields) -> FinanceResult<Money> {
    fields.to_input()?.resolve()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_take_precedence() {
        let fields = AmountFields {
            amount_cents: Some(1500),
            amount: Some(LegacyAmount::Text("99.99".into())),
        };
        assert_eq!(resolve_amount_cents(&fields).unwrap().cents(), 1500);
    }

    #[test]
    fn test_legacy_amounts() {
        assert_eq!(
            resolve_amount_cents(&AmountFields::from_major_units("-42.10")).unwrap().cents(),
            -4210
        );
        let float = AmountFields {
            amount_cents: None,
            amount: Some(LegacyAmount::Number(19.99)),
        };
        assert_eq!(resolve_amount_cents(&float).unwrap().cents(), 1999);
    }

    #[test]
    fn test_missing_amount_is_invalid() {
        let err = resolve_amount_cents(&AmountFields::default()).unwrap_err();
        assert!(err.is_invalid_amount());
    }

    #[test]
    fn test_unsafe_cents_rejected() {
        let err = resolve_amount_cents(&AmountFields::from_cents(i64::MAX)).unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_deserialize_mixed_records() {
        let with_cents: AmountFields = serde_json::from_str(r#"{"amountCents": 2599}"#).unwrap();
        assert_eq!(resolve_amount_cents(&with_cents).unwrap().cents(), 2599);

        let with_number: AmountFields = serde_json::from_str(r#"{"amount": 25.99}"#).unwrap();
        assert_eq!(resolve_amount_cents(&with_number).unwrap().cents(), 2599);

        let with_text: AmountFields = serde_json::from_str(r#"{"amount": "25.99"}"#).unwrap();
        assert_eq!(resolve_amount_cents(&with_text).unwrap().cents(), 2599);

        let bad: AmountFields = serde_json::from_str(r#"{"amount": "abc"}"#).unwrap();
        assert!(resolve_amount_cents(&bad).unwrap_err().is_invalid_amount());
    }

    #[test]
    fn test_tagged_input_serialization() {
        let json = serde_json::to_string(&AmountInput::MajorUnits("1.50".into())).unwrap();
        assert_eq!(json, r#"{"major_units":"1.50"}"#);
        let parsed: AmountInput = serde_json::from_str(r#"{"cents":150}"#).unwrap();
        assert_eq!(parsed.resolve().unwrap().cents(), 150);
    }
}
