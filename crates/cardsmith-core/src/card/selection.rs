//! Selection state: which cards are currently in play.
//!
//! Three slots, routed by card category:
//! - structural: UI cards, ordered, at most [`MAX_STRUCTURAL`]
//! - theme: at most one Theme card
//! - voice: Voice cards, ordered, unbounded

use cardsmith_types::card::{Card, CardId, Category};
use serde::Serialize;
use tracing::debug;

use super::store::CardStore;
use crate::storage::blob_store::BlobStore;

/// Maximum number of UI cards in the structural slot.
pub const MAX_STRUCTURAL: usize = 5;

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// The card is now selected (including a theme that replaced another).
    Selected,
    /// The card was selected and has been removed.
    Deselected,
    /// The structural slot is full; nothing changed.
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    structural: Vec<CardId>,
    theme: Option<CardId>,
    voice: Vec<CardId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a card's membership in the slot its category routes to.
    ///
    /// Never fails. Selecting a UI card while the structural slot is full is
    /// a no-op reported as [`ToggleOutcome::Rejected`]. Selecting a theme
    /// replaces any current theme.
    pub fn toggle(&mut self, card: &Card) -> ToggleOutcome {
        let outcome = match card.category {
            Category::Ui => {
                if let Some(pos) = self.structural.iter().position(|id| *id == card.id) {
                    self.structural.remove(pos);
                    ToggleOutcome::Deselected
                } else if self.structural.len() >= MAX_STRUCTURAL {
                    ToggleOutcome::Rejected
                } else {
                    self.structural.push(card.id);
                    ToggleOutcome::Selected
                }
            }
            Category::Theme => {
                if self.theme == Some(card.id) {
                    self.theme = None;
                    ToggleOutcome::Deselected
                } else {
                    self.theme = Some(card.id);
                    ToggleOutcome::Selected
                }
            }
            Category::Voice => {
                if let Some(pos) = self.voice.iter().position(|id| *id == card.id) {
                    self.voice.remove(pos);
                    ToggleOutcome::Deselected
                } else {
                    self.voice.push(card.id);
                    ToggleOutcome::Selected
                }
            }
        };
        debug!(card = %card.id, category = %card.category, ?outcome, "toggled card");
        outcome
    }

    pub fn is_selected(&self, id: &CardId) -> bool {
        self.structural.contains(id) || self.theme.as_ref() == Some(id) || self.voice.contains(id)
    }

    /// Selected ids in assembly order: structural, then theme, then voice.
    pub fn active_ids(&self) -> Vec<CardId> {
        self.structural
            .iter()
            .chain(self.theme.iter())
            .chain(self.voice.iter())
            .copied()
            .collect()
    }

    /// Selected cards in assembly order, resolved against the store.
    ///
    /// Ids the store does not know are skipped.
    pub fn combined_active<'a, B: BlobStore>(&self, store: &'a CardStore<B>) -> Vec<&'a Card> {
        self.active_ids()
            .iter()
            .filter_map(|id| store.get(id))
            .collect()
    }

    pub fn clear_structural(&mut self) {
        self.structural.clear();
    }

    pub fn clear_theme(&mut self) {
        self.theme = None;
    }

    /// Remove one voice card. Unknown ids are ignored.
    pub fn remove_voice(&mut self, id: &CardId) {
        self.voice.retain(|v| v != id);
    }

    pub fn clear_all(&mut self) {
        self.structural.clear();
        self.theme = None;
        self.voice.clear();
    }

    pub fn structural(&self) -> &[CardId] {
        &self.structural
    }

    pub fn theme(&self) -> Option<&CardId> {
        self.theme.as_ref()
    }

    pub fn voice(&self) -> &[CardId] {
        &self.voice
    }

    pub fn is_structural_full(&self) -> bool {
        self.structural.len() >= MAX_STRUCTURAL
    }

    pub fn len(&self) -> usize {
        self.structural.len() + usize::from(self.theme.is_some()) + self.voice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
