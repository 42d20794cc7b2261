use serde::{Deserialize, Serialize};

use super::DEFAULT_CURRENCY;

/// Money amount with currency. Amounts are non-negative by convention;
/// aggregates validate that on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Money {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0)
    }

    pub fn is_set(&self) -> bool {
        self.amount > 0.0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_money_is_zero_aed() {
        let m = Money::default();
        assert_eq!(m.amount, 0.0);
        assert_eq!(m.currency, "AED");
    }

    #[test]
    fn deserializes_with_default_currency() {
        let m: Money = serde_json::from_str(r#"{"amount": 500}"#).unwrap();
        assert_eq!(m.amount, 500.0);
        assert_eq!(m.currency, "AED");
    }
}
