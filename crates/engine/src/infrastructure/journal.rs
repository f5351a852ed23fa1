//! In-memory event journal with live fan-out.

use std::collections::BTreeMap;

use async_trait::async_trait;
use suzerain_domain::{ActorId, JournalEntry, JournalEntryId};
use tokio::sync::{broadcast, RwLock};

use crate::infrastructure::ports::{JournalError, JournalSink};

pub const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// Append-only log keyed by entry id.
///
/// Every accepted entry is also sent to live subscribers. A subscriber that
/// falls more than the channel capacity behind misses entries and can
/// catch up from [`JournalSink::entries_for`].
pub struct InMemoryJournal {
    entries: RwLock<BTreeMap<JournalEntryId, JournalEntry>>,
    sender: broadcast::Sender<JournalEntry>,
}

impl InMemoryJournal {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            entries: RwLock::new(BTreeMap::new()),
            sender,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JournalEntry> {
        self.sender.subscribe()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Every entry, in id order.
    pub async fn all(&self) -> Vec<JournalEntry> {
        self.entries.read().await.values().cloned().collect()
    }
}

impl Default for InMemoryJournal {
    fn default() -> Self {
        Self::new(DEFAULT_BROADCAST_CAPACITY)
    }
}

#[async_trait]
impl JournalSink for InMemoryJournal {
    async fn submit(&self, entry: JournalEntry) -> Result<(), JournalError> {
        let id = entry.id();
        {
            let mut entries = self.entries.write().await;
            if entries.contains_key(&id) {
                return Err(JournalError::DuplicateEntry(id));
            }
            entries.insert(id, entry.clone());
        }

        if self.sender.send(entry).is_err() {
            tracing::trace!(entry_id = %id, "No journal subscribers");
        }
        Ok(())
    }

    async fn entries_for(&self, actor: &ActorId) -> Result<Vec<JournalEntry>, JournalError> {
        Ok(self
            .entries
            .read()
            .await
            .values()
            .filter(|entry| entry.concerns(actor))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use suzerain_domain::{GameDate, JournalDraft, JournalEventType, Persona, RoleTag, Season};

    use super::*;

    fn entry(id: u64, addressee: Persona) -> JournalEntry {
        JournalDraft::new(
            GameDate::new(1194, Season::Spring),
            JournalEventType::OwnershipChallengeNew,
        )
        .with_persona(addressee)
        .stamp(JournalEntryId::from_raw(id), Utc::now())
        .expect("entry")
    }

    fn king() -> ActorId {
        ActorId::new("King_A").expect("id")
    }

    #[tokio::test]
    async fn duplicate_id_rejected() {
        let journal = InMemoryJournal::default();
        journal
            .submit(entry(1, Persona::broadcast()))
            .await
            .expect("first");
        let err = journal
            .submit(entry(1, Persona::broadcast()))
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::DuplicateEntry(_)));
        assert_eq!(journal.len().await, 1);
    }

    #[tokio::test]
    async fn entries_come_back_in_id_order() {
        let journal = InMemoryJournal::default();
        for id in [3, 1, 2] {
            journal
                .submit(entry(id, Persona::broadcast()))
                .await
                .expect("submit");
        }
        let ids: Vec<u64> = journal.all().await.iter().map(|e| e.id().get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn query_by_persona_includes_broadcasts() {
        let journal = InMemoryJournal::default();
        let other = ActorId::new("Baron_C").expect("id");
        journal
            .submit(entry(1, Persona::actor(king(), RoleTag::King)))
            .await
            .expect("submit");
        journal
            .submit(entry(2, Persona::actor(other.clone(), RoleTag::FiefOwner)))
            .await
            .expect("submit");
        journal
            .submit(entry(3, Persona::broadcast()))
            .await
            .expect("submit");

        let seen: Vec<u64> = journal
            .entries_for(&king())
            .await
            .expect("query")
            .iter()
            .map(|e| e.id().get())
            .collect();
        assert_eq!(seen, vec![1, 3]);
    }

    #[tokio::test]
    async fn subscribers_receive_accepted_entries() {
        let journal = InMemoryJournal::new(8);
        let mut receiver = journal.subscribe();
        journal
            .submit(entry(5, Persona::broadcast()))
            .await
            .expect("submit");
        let received = receiver.recv().await.expect("broadcast");
        assert_eq!(received.id(), JournalEntryId::from_raw(5));
    }
}
