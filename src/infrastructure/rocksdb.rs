use crate::domain::account::{BalanceEntry, PlayerAccount, PlayerId};
use crate::domain::amount::{Amount, Balance};
use crate::domain::currency::{Currency, CurrencyId};
use crate::domain::grant::{AuditContext, JournalEntry, TransactionStatus};
use crate::domain::ports::Ledger;
use crate::error::{GrantError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Column Family for storing account states.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column Family for storing the applied-credit journal.
pub const CF_JOURNAL: &str = "journal";

/// A persistent ledger implementation using RocksDB.
///
/// Accounts and journal entries are stored as JSON in separate Column
/// Families. The credit path is a read-modify-write of a single account
/// record; the engine's one-call-per-invocation contract keeps it the only
/// writer for that invocation.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbLedger {
    db: Arc<DB>,
    journal_seq: Arc<AtomicU64>,
}

impl RocksDbLedger {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("accounts" and "journal")
    /// exist, and restores the journal sequence from the last stored entry.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let cf_journal = ColumnFamilyDescriptor::new(CF_JOURNAL, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_accounts, cf_journal])?;

        let journal_cf = db.cf_handle(CF_JOURNAL).ok_or_else(|| {
            GrantError::InternalError(Box::new(std::io::Error::other(
                "Journal column family not found",
            )))
        })?;
        let next_seq = match db.iterator_cf(journal_cf, IteratorMode::End).next() {
            Some(item) => {
                let (key, _value) = item?;
                let bytes: [u8; 8] = key.as_ref().try_into().map_err(|_| {
                    GrantError::InternalError(Box::new(std::io::Error::other(
                        "Malformed journal key",
                    )))
                })?;
                u64::from_be_bytes(bytes) + 1
            }
            None => 0,
        };

        Ok(Self {
            db: Arc::new(db),
            journal_seq: Arc::new(AtomicU64::new(next_seq)),
        })
    }

    fn load_account(&self, player: PlayerId) -> Result<Option<PlayerAccount>> {
        let cf = self.db.cf_handle(CF_ACCOUNTS).ok_or_else(|| {
            GrantError::InternalError(Box::new(std::io::Error::other(
                "Accounts column family not found",
            )))
        })?;

        let key = player.0.to_be_bytes();
        let result = self.db.get_cf(cf, key)?;

        if let Some(bytes) = result {
            let account = serde_json::from_slice(&bytes).map_err(|e| {
                GrantError::InternalError(Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Deserialization error: {}", e),
                )))
            })?;
            Ok(Some(account))
        } else {
            Ok(None)
        }
    }

    fn store_account(&self, account: &PlayerAccount) -> Result<()> {
        let cf = self.db.cf_handle(CF_ACCOUNTS).ok_or_else(|| {
            GrantError::InternalError(Box::new(std::io::Error::other(
                "Accounts column family not found",
            )))
        })?;

        let key = account.player.0.to_be_bytes();
        let value = serde_json::to_vec(account).map_err(|e| {
            GrantError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;

        self.db.put_cf(cf, key, value)?;

        Ok(())
    }

    fn append_journal(&self, entry: &JournalEntry) -> Result<()> {
        let cf = self.db.cf_handle(CF_JOURNAL).ok_or_else(|| {
            GrantError::InternalError(Box::new(std::io::Error::other(
                "Journal column family not found",
            )))
        })?;

        let seq = self.journal_seq.fetch_add(1, Ordering::SeqCst);
        let value = serde_json::to_vec(entry).map_err(|e| {
            GrantError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;

        self.db.put_cf(cf, seq.to_be_bytes(), value)?;

        Ok(())
    }

    /// Applied-credit journal, in application order.
    pub fn journal(&self) -> Result<Vec<JournalEntry>> {
        let cf = self.db.cf_handle(CF_JOURNAL).ok_or_else(|| {
            GrantError::InternalError(Box::new(std::io::Error::other(
                "Journal column family not found",
            )))
        })?;

        let mut entries = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let entry: JournalEntry = serde_json::from_slice(&value).map_err(|e| {
                GrantError::InternalError(Box::new(std::io::Error::other(format!(
                    "Failed to deserialize journal entry: {}",
                    e
                ))))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }
}

#[async_trait]
impl Ledger for RocksDbLedger {
    async fn credit(
        &self,
        recipient: PlayerId,
        currency: &Currency,
        amount: Amount,
        ctx: &AuditContext,
    ) -> Result<TransactionStatus> {
        let mut account = self
            .load_account(recipient)?
            .unwrap_or_else(|| PlayerAccount::new(recipient));

        let status = account.credit(&currency.id, amount);
        if status.is_success() {
            self.store_account(&account)?;
            self.append_journal(&JournalEntry {
                player: recipient,
                currency: currency.id.clone(),
                amount,
                initiator: ctx.initiator.clone(),
            })?;
        }

        Ok(status)
    }

    async fn balance(&self, player: PlayerId, currency: &CurrencyId) -> Result<Option<Balance>> {
        Ok(self
            .load_account(player)?
            .and_then(|account| account.balance(currency)))
    }

    async fn balances(&self) -> Result<Vec<BalanceEntry>> {
        let cf = self.db.cf_handle(CF_ACCOUNTS).ok_or_else(|| {
            GrantError::InternalError(Box::new(std::io::Error::other(
                "Accounts column family not found",
            )))
        })?;

        let mut entries = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let account: PlayerAccount = serde_json::from_slice(&value).map_err(|e| {
                GrantError::InternalError(Box::new(std::io::Error::other(format!(
                    "Failed to deserialize account: {}",
                    e
                ))))
            })?;
            for (currency, balance) in &account.balances {
                entries.push(BalanceEntry {
                    player: account.player,
                    currency: currency.clone(),
                    balance: *balance,
                });
            }
        }
        entries.sort_by(|a, b| (a.player, &a.currency).cmp(&(b.player, &b.currency)));

        Ok(entries)
    }
}
