use crate::domain::account::{Actor, Recipient};
use crate::domain::grant::GrantReceipt;
use crate::domain::message::{MessageParams, TemplateKey};
use crate::domain::ports::{MessageCatalogBox, MessengerBox};

/// Selects and delivers the role- and sign-specific notifications for a
/// grant the ledger has already confirmed.
pub struct Notifier {
    catalog: MessageCatalogBox,
    messenger: MessengerBox,
}

impl Notifier {
    pub fn new(catalog: MessageCatalogBox, messenger: MessengerBox) -> Self {
        Self { catalog, messenger }
    }

    /// Dispatches the notifications for a confirmed grant.
    ///
    /// The removal variant is chosen by scanning the raw amount string for a
    /// literal `-`, and the displayed amount is always the positive
    /// magnitude. The sender copy always goes to the actor; the recipient
    /// copy goes out only when they are online, and an offline recipient is
    /// not an error.
    pub async fn dispatch(
        &self,
        actor: &Actor,
        recipient: &Recipient,
        raw_amount: &str,
        receipt: &GrantReceipt,
    ) {
        let removal = raw_amount.contains('-');
        let display = receipt.currency.format(receipt.amount).replace('-', "");
        let params = MessageParams {
            sender: actor.name.clone(),
            recipient: recipient.name.clone(),
            amount: display,
        };

        let sender_message = self.catalog.render(TemplateKey::sender(removal), &params);
        self.messenger.send_to_actor(actor, sender_message).await;

        if self.messenger.is_online(recipient.id).await {
            let recipient_message = self.catalog.render(TemplateKey::recipient(removal), &params);
            self.messenger
                .send_if_online(recipient.id, recipient_message)
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::PlayerId;
    use crate::domain::amount::Amount;
    use crate::domain::currency::Currency;
    use crate::infrastructure::catalog::StaticMessageCatalog;
    use crate::infrastructure::in_memory::{Delivery, RecordingMessenger};

    fn receipt(raw: &str) -> GrantReceipt {
        GrantReceipt {
            currency: Currency::new("dollar", "$"),
            amount: Amount::parse(raw).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_negative_raw_amount_selects_remove_variants() {
        let messenger = RecordingMessenger::new();
        messenger.set_online(PlayerId(7)).await;
        let notifier = Notifier::new(
            Box::new(StaticMessageCatalog::default()),
            Box::new(messenger.clone()),
        );

        let actor = Actor::named("ops");
        let recipient = Recipient::new(PlayerId(7), "Alice");
        notifier
            .dispatch(&actor, &recipient, "-50", &receipt("-50"))
            .await;

        let sent = messenger.sent().await;
        assert_eq!(sent.len(), 2);
        // The displayed amount is the positive magnitude in both copies.
        assert_eq!(sent[0].0, Delivery::Actor("ops".to_string()));
        assert_eq!(sent[0].1.as_str(), "You removed $50.00 from Alice.");
        assert_eq!(sent[1].0, Delivery::Player(PlayerId(7)));
        assert_eq!(sent[1].1.as_str(), "ops removed $50.00 from your balance.");
    }

    #[tokio::test]
    async fn test_offline_recipient_gets_no_copy() {
        let messenger = RecordingMessenger::new();
        let notifier = Notifier::new(
            Box::new(StaticMessageCatalog::default()),
            Box::new(messenger.clone()),
        );

        let actor = Actor::named("ops");
        let recipient = Recipient::new(PlayerId(7), "Alice");
        notifier
            .dispatch(&actor, &recipient, "50", &receipt("50"))
            .await;

        let sent = messenger.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.as_str(), "You sent $50.00 to Alice.");
    }
}
