use super::account::{Actor, BalanceEntry, PlayerId};
use super::amount::{Amount, Balance};
use super::currency::{Currency, CurrencyId};
use super::grant::{AuditContext, TransactionStatus};
use super::message::{Message, MessageParams, TemplateKey};
use crate::error::Result;
use async_trait::async_trait;

/// The system of record holding per-currency balances.
///
/// `credit` is the single atomic mutation entry point: implementations
/// resolve or create the recipient's account and apply the signed amount
/// under their own synchronization. Callers never read-modify-write a
/// balance themselves.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn credit(
        &self,
        recipient: PlayerId,
        currency: &Currency,
        amount: Amount,
        ctx: &AuditContext,
    ) -> Result<TransactionStatus>;

    async fn balance(&self, player: PlayerId, currency: &CurrencyId) -> Result<Option<Balance>>;

    /// Snapshot of every stored balance, for reporting.
    async fn balances(&self) -> Result<Vec<BalanceEntry>>;
}

/// Lookup of currency definitions by canonical identifier.
#[async_trait]
pub trait CurrencyRegistry: Send + Sync {
    async fn lookup(&self, id: &CurrencyId) -> Result<Option<Currency>>;

    /// The registry's designated default instance, used when the caller
    /// names no currency.
    async fn default_currency(&self) -> Result<Currency>;
}

/// Renders notification templates into deliverable messages.
pub trait MessageCatalog: Send + Sync {
    fn render(&self, key: TemplateKey, params: &MessageParams) -> Message;
}

/// Message delivery and presence.
///
/// Lookups and sends are best-effort: failures degrade to "offline" or a
/// dropped message rather than aborting an already-committed mutation.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_to_actor(&self, actor: &Actor, message: Message);

    async fn is_online(&self, player: PlayerId) -> bool;

    /// Delivers only when the player has an active session.
    async fn send_if_online(&self, player: PlayerId, message: Message);
}

pub type LedgerBox = Box<dyn Ledger>;
pub type CurrencyRegistryBox = Box<dyn CurrencyRegistry>;
pub type MessageCatalogBox = Box<dyn MessageCatalog>;
pub type MessengerBox = Box<dyn Messenger>;
