//! # Money Types
//!
//! Currency and price types for the store. All arithmetic happens in the
//! smallest currency unit (centavos for BRL) to keep totals exact.

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    BRL,
    USD,
    EUR,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::BRL => "brl",
            Currency::USD => "usd",
            Currency::EUR => "eur",
        }
    }

    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u8 {
        2
    }

    /// Convert a decimal amount to the smallest currency unit (centavos, cents)
    pub fn to_smallest_unit(&self, amount: f64) -> i64 {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        (amount * multiplier).round() as i64
    }

    /// Convert from smallest unit back to decimal
    pub fn from_smallest_unit(&self, amount: i64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::BRL
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (centavos for BRL)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a new price from a decimal amount
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self {
            amount: currency.to_smallest_unit(amount),
            currency,
        }
    }

    /// Create a price from the smallest unit (centavos)
    pub fn from_cents(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// A zero price in the given currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: 0,
            currency,
        }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.currency.from_smallest_unit(self.amount)
    }

    /// Multiply by a quantity, `None` on overflow
    pub fn checked_mul(&self, quantity: u32) -> Option<Self> {
        Some(Self {
            amount: self.amount.checked_mul(i64::from(quantity))?,
            currency: self.currency,
        })
    }

    /// Format for display. BRL uses the Brazilian comma decimal
    /// separator (e.g., "R$ 12,50").
    pub fn display(&self) -> String {
        match self.currency {
            Currency::BRL => {
                format!("R$ {:.2}", self.as_decimal()).replace('.', ",")
            }
            Currency::USD => format!("${:.2}", self.as_decimal()),
            Currency::EUR => format!("€{:.2}", self.as_decimal()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_conversion() {
        let brl = Currency::BRL;
        assert_eq!(brl.to_smallest_unit(10.99), 1099);
        assert_eq!(brl.from_smallest_unit(1099), 10.99);
    }

    #[test]
    fn test_price_display() {
        let price = Price::new(29.99, Currency::BRL);
        assert_eq!(price.display(), "R$ 29,99");

        let price_usd = Price::new(19.99, Currency::USD);
        assert_eq!(price_usd.display(), "$19.99");
    }

    #[test]
    fn test_checked_mul() {
        let price = Price::from_cents(1099, Currency::BRL);
        assert_eq!(price.checked_mul(3).map(|p| p.amount), Some(3297));
        assert!(Price::from_cents(i64::MAX, Currency::BRL)
            .checked_mul(2)
            .is_none());
    }
}
