//! Library browsing: category filters and collection summaries.

use std::fmt;
use std::str::FromStr;

use cardsmith_types::card::{Card, Category, Rarity};
use serde::Serialize;

use super::store::CardStore;
use crate::storage::blob_store::BlobStore;

/// Which cards the library view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LibraryFilter {
    #[default]
    All,
    Category(Category),
}

impl LibraryFilter {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            LibraryFilter::All => true,
            LibraryFilter::Category(category) => card.category == *category,
        }
    }
}

impl fmt::Display for LibraryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryFilter::All => write!(f, "all"),
            LibraryFilter::Category(category) => write!(f, "{}", category.to_string().to_lowercase()),
        }
    }
}

impl FromStr for LibraryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(LibraryFilter::All);
        }
        s.parse::<Category>()
            .map(LibraryFilter::Category)
            .map_err(|_| format!("invalid filter '{s}' (expected all, ui, theme or voice)"))
    }
}

/// Cards matching `filter`, in collection order.
pub fn browse<'a, B: BlobStore>(store: &'a CardStore<B>, filter: LibraryFilter) -> Vec<&'a Card> {
    store.cards().iter().filter(|c| filter.matches(c)).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RarityCount {
    pub rarity: Rarity,
    pub count: usize,
}

/// Totals per category and per rarity.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionSummary {
    pub total: usize,
    pub categories: Vec<CategoryCount>,
    pub rarities: Vec<RarityCount>,
}

impl CollectionSummary {
    pub fn of(cards: &[Card]) -> Self {
        let categories = Category::ALL
            .iter()
            .map(|&category| CategoryCount {
                category,
                count: cards.iter().filter(|c| c.category == category).count(),
            })
            .collect();
        let rarities = Rarity::ALL
            .iter()
            .map(|&rarity| RarityCount {
                rarity,
                count: cards.iter().filter(|c| c.rarity == rarity).count(),
            })
            .collect();
        Self {
            total: cards.len(),
            categories,
            rarities,
        }
    }

    pub fn count_of(&self, category: Category) -> usize {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }
}
