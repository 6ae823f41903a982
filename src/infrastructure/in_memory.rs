use crate::domain::account::{
    AccountStatus, Actor, BalanceEntry, PlayerAccount, PlayerId,
};
use crate::domain::amount::{Amount, Balance};
use crate::domain::currency::{Currency, CurrencyId};
use crate::domain::grant::{AuditContext, JournalEntry, TransactionStatus};
use crate::domain::message::Message;
use crate::domain::ports::{CurrencyRegistry, Ledger, Messenger};
use crate::error::{GrantError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger.
///
/// Uses `Arc<RwLock<HashMap<PlayerId, PlayerAccount>>>` to allow shared
/// concurrent access; accounts are created on first credit. `Clone` shares
/// the underlying state, which lets callers keep a handle to a ledger owned
/// by an engine.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    accounts: Arc<RwLock<HashMap<PlayerId, PlayerAccount>>>,
    journal: Arc<RwLock<Vec<JournalEntry>>>,
}

impl InMemoryLedger {
    /// Creates a new, empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Freezes a player's account; further credits classify as failures.
    pub async fn freeze(&self, player: PlayerId) {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .entry(player)
            .or_insert_with(|| PlayerAccount::new(player));
        account.status = AccountStatus::Frozen;
    }

    /// Applied-credit journal, in application order.
    pub async fn journal(&self) -> Vec<JournalEntry> {
        self.journal.read().await.clone()
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn credit(
        &self,
        recipient: PlayerId,
        currency: &Currency,
        amount: Amount,
        ctx: &AuditContext,
    ) -> Result<TransactionStatus> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .entry(recipient)
            .or_insert_with(|| PlayerAccount::new(recipient));
        let status = account.credit(&currency.id, amount);

        if status.is_success() {
            self.journal.write().await.push(JournalEntry {
                player: recipient,
                currency: currency.id.clone(),
                amount,
                initiator: ctx.initiator.clone(),
            });
        }

        Ok(status)
    }

    async fn balance(&self, player: PlayerId, currency: &CurrencyId) -> Result<Option<Balance>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&player).and_then(|a| a.balance(currency)))
    }

    async fn balances(&self) -> Result<Vec<BalanceEntry>> {
        let accounts = self.accounts.read().await;
        let mut entries: Vec<BalanceEntry> = accounts
            .values()
            .flat_map(|account| {
                account.balances.iter().map(move |(currency, balance)| BalanceEntry {
                    player: account.player,
                    currency: currency.clone(),
                    balance: *balance,
                })
            })
            .collect();
        entries.sort_by(|a, b| (a.player, &a.currency).cmp(&(b.player, &b.currency)));
        Ok(entries)
    }
}

#[derive(Deserialize)]
struct RegistryFile {
    default: String,
    currencies: Vec<CurrencyDef>,
}

#[derive(Deserialize)]
struct CurrencyDef {
    name: String,
    symbol: String,
}

/// Case-insensitive, namespaced currency registry with a designated default.
///
/// The set of currencies is fixed at construction; lookups clone the stored
/// definitions.
#[derive(Clone)]
pub struct InMemoryCurrencyRegistry {
    currencies: HashMap<CurrencyId, Currency>,
    default_id: CurrencyId,
}

impl InMemoryCurrencyRegistry {
    pub fn new(default_currency: Currency) -> Self {
        let default_id = default_currency.id.clone();
        let mut currencies = HashMap::new();
        currencies.insert(default_id.clone(), default_currency);
        Self {
            currencies,
            default_id,
        }
    }

    pub fn register(&mut self, currency: Currency) {
        self.currencies.insert(currency.id.clone(), currency);
    }

    /// Registry preloaded with the stock currencies: `dollar` (default)
    /// and `gold`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new(Currency::new("dollar", "$"));
        registry.register(Currency::new("gold", "g"));
        registry
    }

    /// Loads a registry from a JSON file of the form
    /// `{"default": "dollar", "currencies": [{"name": ..., "symbol": ...}]}`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let parsed: RegistryFile = serde_json::from_reader(file)
            .map_err(|e| GrantError::InternalError(Box::new(e)))?;

        let default_id = CurrencyId::from_user_input(&parsed.default);
        let mut currencies = HashMap::new();
        for def in parsed.currencies {
            let currency = Currency::new(&def.name, &def.symbol);
            currencies.insert(currency.id.clone(), currency);
        }
        if !currencies.contains_key(&default_id) {
            return Err(GrantError::InternalError(Box::new(std::io::Error::other(
                "Default currency missing from registry file",
            ))));
        }

        Ok(Self {
            currencies,
            default_id,
        })
    }
}

#[async_trait]
impl CurrencyRegistry for InMemoryCurrencyRegistry {
    async fn lookup(&self, id: &CurrencyId) -> Result<Option<Currency>> {
        Ok(self.currencies.get(id).cloned())
    }

    async fn default_currency(&self) -> Result<Currency> {
        self.currencies
            .get(&self.default_id)
            .cloned()
            .ok_or_else(|| {
                GrantError::InternalError(Box::new(std::io::Error::other(
                    "Default currency missing from registry",
                )))
            })
    }
}

/// Delivery target of a recorded message.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Actor(String),
    Player(PlayerId),
}

/// A capturing messenger: records every delivery and reports presence from
/// a configurable online set. Used by tests as the session-service double.
#[derive(Default, Clone)]
pub struct RecordingMessenger {
    online: Arc<RwLock<HashSet<PlayerId>>>,
    sent: Arc<RwLock<Vec<(Delivery, Message)>>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_online(&self, player: PlayerId) {
        self.online.write().await.insert(player);
    }

    /// Every recorded delivery, in send order.
    pub async fn sent(&self) -> Vec<(Delivery, Message)> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_to_actor(&self, actor: &Actor, message: Message) {
        self.sent
            .write()
            .await
            .push((Delivery::Actor(actor.name.clone()), message));
    }

    async fn is_online(&self, player: PlayerId) -> bool {
        self.online.read().await.contains(&player)
    }

    async fn send_if_online(&self, player: PlayerId, message: Message) {
        if self.is_online(player).await {
            self.sent
                .write()
                .await
                .push((Delivery::Player(player), message));
        }
    }
}
