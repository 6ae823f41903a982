use crate::domain::amount::{Amount, Balance};
use crate::domain::currency::CurrencyId;
use crate::domain::grant::TransactionStatus;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable unique identifier of a player in the economy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The administrative context invoking a grant. Never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub name: String,
}

impl Actor {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// The player receiving a grant.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    pub id: PlayerId,
    pub name: String,
}

impl Recipient {
    pub fn new(id: PlayerId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Frozen,
}

/// Ledger-side state of a player: status plus per-currency balances.
///
/// Lives behind the [`Ledger`](crate::domain::ports::Ledger) port;
/// the grant engine never touches it directly.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PlayerAccount {
    pub player: PlayerId,
    pub status: AccountStatus,
    pub balances: HashMap<CurrencyId, Balance>,
}

impl PlayerAccount {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            status: AccountStatus::Active,
            balances: HashMap::new(),
        }
    }

    /// Applies a signed credit to the balance held in `currency`.
    ///
    /// The balance changes only when the result classifies as
    /// [`TransactionStatus::Success`]; frozen accounts and credits that
    /// would drive the balance below zero leave the account untouched.
    pub fn credit(&mut self, currency: &CurrencyId, amount: Amount) -> TransactionStatus {
        if self.status == AccountStatus::Frozen {
            return TransactionStatus::AccountFrozen;
        }
        let current = self.balances.get(currency).copied().unwrap_or_default();
        let next = current + Balance::from(amount);
        if next.is_negative() {
            return TransactionStatus::Overdraft;
        }
        self.balances.insert(currency.clone(), next);
        TransactionStatus::Success
    }

    pub fn balance(&self, currency: &CurrencyId) -> Option<Balance> {
        self.balances.get(currency).copied()
    }
}

/// One row of a ledger balance report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub player: PlayerId,
    pub currency: CurrencyId,
    pub balance: Balance,
}
