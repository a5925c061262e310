//! In-memory registry of connected WebSocket clients.
//!
//! Each connection subscribes under its user id (its "room"); events are
//! fanned out as unbounded channel sends. Delivery is fire-and-forget:
//! a send to a closed receiver just prunes that connection.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::domain::repository::NotifierPort;
use crate::domain::types::Event;

type Subscribers = HashMap<Uuid, Vec<(Uuid, mpsc::UnboundedSender<Event>)>>;

#[derive(Clone, Default)]
pub struct Notifier {
    inner: Arc<RwLock<Subscribers>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection for `user_id`. Returns the connection id and
    /// the event receiver to drain into the socket.
    pub async fn subscribe(&self, user_id: Uuid) -> (Uuid, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn_id = Uuid::new_v4();
        self.inner
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push((conn_id, tx));
        (conn_id, rx)
    }

    pub async fn unsubscribe(&self, user_id: Uuid, conn_id: Uuid) {
        let mut subscribers = self.inner.write().await;
        if let Some(conns) = subscribers.get_mut(&user_id) {
            conns.retain(|(id, _)| *id != conn_id);
            if conns.is_empty() {
                subscribers.remove(&user_id);
            }
        }
    }

    /// Number of live connections across all users.
    pub async fn connection_count(&self) -> usize {
        self.inner.read().await.values().map(Vec::len).sum()
    }
}

impl NotifierPort for Notifier {
    async fn broadcast(&self, event: &Event) {
        let mut subscribers = self.inner.write().await;
        for conns in subscribers.values_mut() {
            conns.retain(|(_, tx)| tx.send(event.clone()).is_ok());
        }
        subscribers.retain(|_, conns| !conns.is_empty());
    }

    async fn notify_user(&self, user_id: Uuid, event: &Event) {
        let mut subscribers = self.inner.write().await;
        if let Some(conns) = subscribers.get_mut(&user_id) {
            conns.retain(|(_, tx)| tx.send(event.clone()).is_ok());
            if conns.is_empty() {
                subscribers.remove(&user_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_event() -> Event {
        Event::ReminderCreated {
            reminder_id: Uuid::now_v7(),
            profile_id: Uuid::now_v7(),
            message: "check".into(),
        }
    }

    #[tokio::test]
    async fn should_deliver_user_scoped_events_to_that_user_only() {
        let notifier = Notifier::new();
        let alice = Uuid::now_v7();
        let bob = Uuid::now_v7();
        let (_, mut alice_rx) = notifier.subscribe(alice).await;
        let (_, mut bob_rx) = notifier.subscribe(bob).await;

        notifier.notify_user(alice, &test_event()).await;

        assert!(alice_rx.try_recv().is_ok());
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn should_broadcast_to_every_connection() {
        let notifier = Notifier::new();
        let (_, mut rx_a) = notifier.subscribe(Uuid::now_v7()).await;
        let (_, mut rx_b) = notifier.subscribe(Uuid::now_v7()).await;

        notifier.broadcast(&test_event()).await;

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_ok());
    }

    #[tokio::test]
    async fn should_prune_closed_connections_on_send() {
        let notifier = Notifier::new();
        let user = Uuid::now_v7();
        let (_, rx) = notifier.subscribe(user).await;
        drop(rx);

        notifier.broadcast(&test_event()).await;
        assert_eq!(notifier.connection_count().await, 0);
    }

    #[tokio::test]
    async fn should_drop_connection_on_unsubscribe() {
        let notifier = Notifier::new();
        let user = Uuid::now_v7();
        let (conn_id, _rx) = notifier.subscribe(user).await;
        assert_eq!(notifier.connection_count().await, 1);

        notifier.unsubscribe(user, conn_id).await;
        assert_eq!(notifier.connection_count().await, 0);
    }
}
