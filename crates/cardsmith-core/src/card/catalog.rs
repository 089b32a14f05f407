//! The bundled starter catalog that seeds a fresh collection.

use cardsmith_types::card::{Card, CardDraft, CardId};
use cardsmith_types::error::StoreError;

const STARTER_CATALOG: &str = include_str!("../../assets/starter_catalog.json");

/// A list of card drafts to mint a collection from.
///
/// Catalog entries carry no ids; every seeding mints fresh ones.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    drafts: Vec<CardDraft>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn starter() -> Result<Self, StoreError> {
        Self::from_json(STARTER_CATALOG)
    }

    /// Parse a catalog from a JSON array of drafts.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let drafts: Vec<CardDraft> = serde_json::from_str(json)
            .map_err(|e| StoreError::Serialization(format!("invalid catalog: {e}")))?;
        Ok(Self { drafts })
    }

    pub fn from_drafts(drafts: Vec<CardDraft>) -> Self {
        Self { drafts }
    }

    /// Mint one card per draft, in catalog order, each with a fresh id.
    pub fn mint(&self) -> Vec<Card> {
        self.drafts
            .iter()
            .cloned()
            .map(|draft| draft.into_card(CardId::new()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsmith_types::card::{Category, VOICE_DIRECTIVE_MARKER};
    use std::collections::HashSet;

    #[test]
    fn test_starter_catalog_parses() {
        let catalog = Catalog::starter().unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_starter_catalog_covers_every_category() {
        let cards = Catalog::starter().unwrap().mint();
        for category in Category::ALL {
            assert!(
                cards.iter().any(|c| c.category == category),
                "no {category} card in starter catalog"
            );
        }
    }

    #[test]
    fn test_starter_voice_cards_carry_marker() {
        let cards = Catalog::starter().unwrap().mint();
        for card in cards.iter().filter(|c| c.category == Category::Voice) {
            assert!(card.code.structure.is_empty(), "{}", card.name);
            assert!(card.code.presentation.is_empty(), "{}", card.name);
            assert!(
                card.code.behavior.trim_start().starts_with(VOICE_DIRECTIVE_MARKER),
                "{}",
                card.name
            );
        }
    }

    #[test]
    fn test_mint_assigns_fresh_unique_ids() {
        let catalog = Catalog::starter().unwrap();
        let first = catalog.mint();
        let second = catalog.mint();
        let ids: HashSet<_> = first.iter().chain(second.iter()).map(|c| c.id).collect();
        assert_eq!(ids.len(), catalog.len() * 2);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(StoreError::Serialization(_))
        ));
    }
}
