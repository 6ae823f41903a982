use crate::domain::account::BalanceEntry;
use crate::error::Result;
use std::io::Write;

/// Writes a ledger balance snapshot as CSV.
pub struct BalanceWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> BalanceWriter<W> {
    /// Creates a new `BalanceWriter` over any `Write` target (e.g., Stdout).
    pub fn new(target: W) -> Self {
        let writer = csv::WriterBuilder::new().from_writer(target);
        Self { writer }
    }

    /// Serializes every entry, then flushes the target.
    pub fn write_balances(&mut self, entries: Vec<BalanceEntry>) -> Result<()> {
        for entry in entries {
            self.writer.serialize(entry)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::PlayerId;
    use crate::domain::amount::Balance;
    use crate::domain::currency::CurrencyId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_writer_emits_header_and_rows() {
        let mut buffer = Vec::new();
        {
            let mut writer = BalanceWriter::new(&mut buffer);
            writer
                .write_balances(vec![
                    BalanceEntry {
                        player: PlayerId(1),
                        currency: CurrencyId::from_user_input("dollar"),
                        balance: Balance::new(dec!(50.00)),
                    },
                    BalanceEntry {
                        player: PlayerId(2),
                        currency: CurrencyId::from_user_input("gold"),
                        balance: Balance::new(dec!(0.25)),
                    },
                ])
                .unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "player,currency,balance\n1,mintpay:dollar,50.00\n2,mintpay:gold,0.25\n"
        );
    }

    #[test]
    fn test_writer_with_no_entries_writes_nothing() {
        let mut buffer = Vec::new();
        {
            let mut writer = BalanceWriter::new(&mut buffer);
            writer.write_balances(Vec::new()).unwrap();
        }
        assert!(buffer.is_empty());
    }
}
