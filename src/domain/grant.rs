use crate::domain::account::PlayerId;
use crate::domain::amount::Amount;
use crate::domain::currency::{Currency, CurrencyId};
use serde::{Deserialize, Serialize};

/// Ledger classification of a single credit attempt.
///
/// Anything other than `Success` means the ledger refused the mutation and
/// left the account untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Success,
    AccountFrozen,
    Overdraft,
}

impl TransactionStatus {
    pub fn is_success(self) -> bool {
        matches!(self, TransactionStatus::Success)
    }
}

/// Attribution for the administrative context behind a ledger mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditContext {
    pub initiator: String,
}

impl AuditContext {
    pub fn new(initiator: &str) -> Self {
        Self {
            initiator: initiator.to_string(),
        }
    }
}

/// A journaled record of an applied credit, attributed to its initiator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub player: PlayerId,
    pub currency: CurrencyId,
    pub amount: Amount,
    pub initiator: String,
}

/// The applied outcome of a successful grant: the resolved currency and the
/// normalized amount the ledger confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct GrantReceipt {
    pub currency: Currency,
    pub amount: Amount,
}
