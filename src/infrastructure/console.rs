use crate::domain::account::{Actor, PlayerId};
use crate::domain::message::Message;
use crate::domain::ports::Messenger;
use async_trait::async_trait;

/// CLI delivery adapter.
///
/// A command-line process has no player sessions, so every recipient is
/// offline; actor-facing messages go to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMessenger;

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send_to_actor(&self, _actor: &Actor, message: Message) {
        println!("{message}");
    }

    async fn is_online(&self, _player: PlayerId) -> bool {
        false
    }

    async fn send_if_online(&self, _player: PlayerId, _message: Message) {}
}
