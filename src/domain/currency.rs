use crate::domain::amount::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry namespace every currency identifier lives under.
pub const CURRENCY_NAMESPACE: &str = "mintpay";

/// A namespaced, case-insensitive currency identifier.
///
/// Stored lowercase as `mintpay:<name>` so lookups and map keys are
/// canonical regardless of how the user spelled the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurrencyId(String);

impl CurrencyId {
    /// Canonicalizes a user-supplied currency name into a namespaced id.
    pub fn from_user_input(name: &str) -> Self {
        Self(format!("{}:{}", CURRENCY_NAMESPACE, name.to_lowercase()))
    }

    /// Wraps an already-namespaced identifier.
    pub fn new(namespaced: &str) -> Self {
        Self(namespaced.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A currency definition: canonical identifier, display name, and symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub id: CurrencyId,
    pub name: String,
    pub symbol: String,
}

impl Currency {
    pub fn new(name: &str, symbol: &str) -> Self {
        Self {
            id: CurrencyId::from_user_input(name),
            name: name.to_string(),
            symbol: symbol.to_string(),
        }
    }

    /// Formats an amount under this currency's display rule.
    ///
    /// The sign, if any, is part of the numeric rendering; callers that need
    /// a magnitude strip it themselves.
    pub fn format(&self, amount: Amount) -> String {
        format!("{}{}", self.symbol, amount.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_case_insensitive_and_namespaced() {
        assert_eq!(
            CurrencyId::from_user_input("GOLD"),
            CurrencyId::from_user_input("gold")
        );
        assert_eq!(CurrencyId::from_user_input("Gold").as_str(), "mintpay:gold");
        assert_eq!(CurrencyId::new("MINTPAY:Gold").as_str(), "mintpay:gold");
    }

    #[test]
    fn test_format_keeps_scale_and_sign() {
        let dollar = Currency::new("dollar", "$");
        assert_eq!(dollar.format(Amount::parse("50").unwrap()), "$50.00");
        assert_eq!(dollar.format(Amount::parse("-12.5").unwrap()), "$-12.50");
    }
}
