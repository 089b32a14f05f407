//! The card store: the user's collection, persisted as a single blob.
//!
//! The collection is append-only. Every mutation re-serializes the whole
//! collection and writes it back under [`COLLECTION_KEY`].

use std::collections::{HashMap, HashSet};

use cardsmith_types::card::{Card, CardId};
use cardsmith_types::error::StoreError;
use tracing::{debug, info};

use super::catalog::Catalog;
use crate::storage::blob_store::BlobStore;

/// Blob key the collection is persisted under.
pub const COLLECTION_KEY: &str = "collection";

/// Why a short handle did not resolve to exactly one card.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no card matches '{0}'")]
    NotFound(String),

    #[error("'{handle}' matches {count} cards; use more characters")]
    Ambiguous { handle: String, count: usize },
}

/// Ordered, append-only card collection backed by a [`BlobStore`].
pub struct CardStore<B: BlobStore> {
    blob: B,
    cards: Vec<Card>,
    index: HashMap<CardId, usize>,
}

impl<B: BlobStore> CardStore<B> {
    /// Restore the collection from the blob store.
    ///
    /// When nothing has been persisted yet, seeds from `catalog` and persists
    /// immediately. A blob that exists but does not decode is reported as
    /// [`StoreError::Corrupt`] and left untouched.
    pub async fn load(blob: B, catalog: &Catalog) -> Result<Self, StoreError> {
        match blob.get(COLLECTION_KEY).await? {
            Some(raw) => {
                let cards: Vec<Card> =
                    serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))?;
                let index = build_index(&cards).map_err(|id| {
                    StoreError::Corrupt(format!("card id {id} appears more than once"))
                })?;
                debug!(count = cards.len(), "restored card collection");
                Ok(Self { blob, cards, index })
            }
            None => {
                let cards = catalog.mint();
                let index = build_index(&cards).map_err(StoreError::DuplicateId)?;
                let store = Self { blob, cards, index };
                store.persist(&store.cards).await?;
                info!(count = store.cards.len(), "seeded card collection from catalog");
                Ok(store)
            }
        }
    }

    /// Append cards to the end of the collection and persist.
    ///
    /// The whole batch is rejected with [`StoreError::DuplicateId`] if any id
    /// already exists or repeats within the batch. On any error the
    /// collection is left exactly as it was.
    pub async fn append(&mut self, incoming: Vec<Card>) -> Result<(), StoreError> {
        if incoming.is_empty() {
            return Ok(());
        }

        let mut seen = HashSet::with_capacity(incoming.len());
        for card in &incoming {
            if self.index.contains_key(&card.id) || !seen.insert(card.id) {
                return Err(StoreError::DuplicateId(card.id));
            }
        }

        let mut merged = Vec::with_capacity(self.cards.len() + incoming.len());
        merged.extend(self.cards.iter().cloned());
        merged.extend(incoming);
        self.persist(&merged).await?;

        let start = self.cards.len();
        for (offset, card) in merged[start..].iter().enumerate() {
            self.index.insert(card.id, start + offset);
        }
        let added = merged.len() - start;
        self.cards = merged;
        debug!(added, total = self.cards.len(), "appended cards to collection");
        Ok(())
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    /// All cards in insertion order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    /// Look a card up by its full id or by a short handle.
    ///
    /// A short handle is any run of trailing hex digits of the id, as printed
    /// by [`CardId::short`]. Hyphens and case are ignored.
    pub fn resolve_handle(&self, handle: &str) -> Result<&Card, LookupError> {
        let needle: String = handle
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_lowercase();
        if needle.is_empty() {
            return Err(LookupError::NotFound(handle.to_string()));
        }

        if let Ok(id) = handle.trim().parse::<CardId>() {
            return self
                .get(&id)
                .ok_or_else(|| LookupError::NotFound(handle.to_string()));
        }

        let matches: Vec<&Card> = self
            .cards
            .iter()
            .filter(|c| c.id.0.simple().to_string().ends_with(&needle))
            .collect();
        match matches.as_slice() {
            [card] => Ok(card),
            [] => Err(LookupError::NotFound(handle.to_string())),
            many => Err(LookupError::Ambiguous {
                handle: handle.to_string(),
                count: many.len(),
            }),
        }
    }

    async fn persist(&self, cards: &[Card]) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(cards).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.blob.put(COLLECTION_KEY, &json).await?;
        Ok(())
    }
}

fn build_index(cards: &[Card]) -> Result<HashMap<CardId, usize>, CardId> {
    let mut index = HashMap::with_capacity(cards.len());
    for (i, card) in cards.iter().enumerate() {
        if index.insert(card.id, i).is_some() {
            return Err(card.id);
        }
    }
    Ok(index)
}
