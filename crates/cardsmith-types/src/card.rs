//! Card domain types.
//!
//! A card is an immutable unit of reusable content: a UI fragment, a visual
//! theme, or a writing-voice directive. Cards are minted once (seeded from the
//! bundled catalog, drawn from a pack, or forged) and never edited in place.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Prefix that marks the directive line inside a voice card's `behavior` fragment.
pub const VOICE_DIRECTIVE_MARKER: &str = "// INSTRUCTION:";

/// Unique identifier for a card, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub Uuid);

impl CardId {
    /// Mint a fresh CardId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Last eight hex characters, used as a short handle in listings.
    ///
    /// The leading digits of a v7 id are a timestamp and repeat across cards
    /// minted together, so the handle comes from the random tail.
    pub fn short(&self) -> String {
        let simple = self.0.simple().to_string();
        simple[simple.len() - 8..].to_string()
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Which selection slot a card may occupy and how the assembler treats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Category {
    #[serde(rename = "UI")]
    Ui,
    Theme,
    Voice,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Ui, Category::Theme, Category::Voice];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Ui => write!(f, "UI"),
            Category::Theme => write!(f, "Theme"),
            Category::Voice => write!(f, "Voice"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ui" => Ok(Category::Ui),
            "theme" => Ok(Category::Theme),
            "voice" => Ok(Category::Voice),
            other => Err(format!("invalid card category: '{other}'")),
        }
    }
}

/// Rarity tier. Ordering is meaningful: `Common < Uncommon < ... < Ancient`.
///
/// Purely cosmetic; only generation-time distribution hints refer to it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
    Ancient,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
        Rarity::Ancient,
    ];
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => write!(f, "Common"),
            Rarity::Uncommon => write!(f, "Uncommon"),
            Rarity::Rare => write!(f, "Rare"),
            Rarity::Legendary => write!(f, "Legendary"),
            Rarity::Ancient => write!(f, "Ancient"),
        }
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "common" => Ok(Rarity::Common),
            "uncommon" => Ok(Rarity::Uncommon),
            "rare" => Ok(Rarity::Rare),
            "legendary" => Ok(Rarity::Legendary),
            "ancient" => Ok(Rarity::Ancient),
            other => Err(format!("invalid rarity: '{other}'")),
        }
    }
}

/// The three code fragments carried by a card.
///
/// On the wire (and in storage) the fragments are named after what they hold
/// for UI and Theme cards: `html`, `css`, `js`. Voice cards leave the first two
/// empty and put a single marker-prefixed instruction in `behavior`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CardCode {
    /// Markup fragment.
    #[serde(rename = "html")]
    pub structure: String,
    /// Styling fragment.
    #[serde(rename = "css")]
    pub presentation: String,
    /// Script fragment, or the voice directive for Voice cards.
    #[serde(rename = "js")]
    pub behavior: String,
}

/// A collected card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Display label.
    pub name: String,
    pub category: Category,
    pub rarity: Rarity,
    /// Free-text tags, display only.
    pub tech_stack: Vec<String>,
    /// Free-text style descriptor, forwarded as assembly context.
    pub visual_style: String,
    pub description: String,
    pub code: CardCode,
}

impl Card {
    /// The natural-language directive of a voice card.
    ///
    /// Strips [`VOICE_DIRECTIVE_MARKER`] from the behavior fragment. When the
    /// fragment is empty after stripping, the description stands in. Returns
    /// `None` for non-voice cards.
    pub fn voice_directive(&self) -> Option<&str> {
        if self.category != Category::Voice {
            return None;
        }
        let directive = strip_directive_marker(&self.code.behavior);
        if directive.is_empty() {
            Some(self.description.trim())
        } else {
            Some(directive)
        }
    }
}

/// Remove the directive marker (and surrounding whitespace) from a voice fragment.
pub fn strip_directive_marker(fragment: &str) -> &str {
    let trimmed = fragment.trim();
    trimmed
        .strip_prefix(VOICE_DIRECTIVE_MARKER)
        .unwrap_or(trimmed)
        .trim()
}

/// The card shape produced by the generation capability: every [`Card`] field
/// except the id, which is always minted locally.
///
/// Also the on-disk shape of the bundled starter catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CardDraft {
    pub name: String,
    pub category: Category,
    pub rarity: Rarity,
    pub tech_stack: Vec<String>,
    pub visual_style: String,
    pub description: String,
    pub code: CardCode,
}

impl CardDraft {
    /// Mint a card from this draft under the given id.
    pub fn into_card(self, id: CardId) -> Card {
        Card {
            id,
            name: self.name,
            category: self.category,
            rarity: self.rarity,
            tech_stack: self.tech_stack,
            visual_style: self.visual_style,
            description: self.description,
            code: self.code,
        }
    }
}

/// Structured-output envelope for a pack draw.
///
/// Schema-constrained outputs must have an object at the root, so the pack is
/// wrapped rather than returned as a bare array.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PackDraft {
    pub cards: Vec<CardDraft>,
}
