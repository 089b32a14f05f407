//! Instruction text for the three generation calls.
//!
//! Everything here is pure string building. Sections are wrapped in XML tags
//! and joined with blank lines; the order of the assembly sections is fixed.

use cardsmith_types::card::{Card, Category, VOICE_DIRECTIVE_MARKER};
use cardsmith_types::generation::Artifact;

/// Number of cards a pack draw asks for.
pub const PACK_SIZE: usize = 5;

/// Used in place of voice directives when no voice card is active.
pub const DEFAULT_TONE: &str = "Default: professional, clear and engaging copy.";

/// Used in place of component context when no UI or Theme card is active.
pub const CREATIVE_FREEDOM: &str =
    "No specific component cards were selected. Use your own creativity for the layout.";

/// Everything the assembly call needs, split into the two card streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyRequest {
    pub user_prompt: String,
    /// UI and Theme cards, in active order.
    pub components: Vec<Card>,
    /// Voice cards, in active order.
    pub voices: Vec<Card>,
    /// The immediately prior build, when iterating.
    pub previous_artifact: Option<Artifact>,
}

impl AssemblyRequest {
    /// Split a combined active sequence into component and voice streams,
    /// keeping relative order within each.
    pub fn from_active<'a>(
        user_prompt: impl Into<String>,
        active: impl IntoIterator<Item = &'a Card>,
        previous_artifact: Option<Artifact>,
    ) -> Self {
        let (voices, components): (Vec<Card>, Vec<Card>) = active
            .into_iter()
            .cloned()
            .partition(|card| card.category == Category::Voice);
        Self {
            user_prompt: user_prompt.into(),
            components,
            voices,
            previous_artifact,
        }
    }
}

/// Instructions for a random pack draw.
pub fn pack_instructions() -> String {
    format!(
        r#"<role>
You are a frontend architect who designs collectible UI component trading cards.
</role>

<task>
Generate exactly {PACK_SIZE} distinct new cards.

Rarity distribution:
- 2 Common: functional layouts such as headers, footers, pricing tables, FAQs or forms (category "UI")
- 1 Uncommon: a theme that defines :root custom properties for colors and fonts (category "Theme")
- 1 Rare: a voice card with instructions on how to write copy (category "Voice")
- 1 Legendary: a complex visual such as canvas, WebGL or 3D effects (category "UI")

Current design trends: bento grids, neo-brutalism, dark mode, micro-interactions.
</task>

<rules>
- Every card carries self-contained html, css and js fragments.
- For "Voice" cards, html and css are empty strings and js is a single line starting with {VOICE_DIRECTIVE_MARKER}
- Return a JSON object whose "cards" array holds the {PACK_SIZE} cards.
</rules>"#
    )
}

/// Instructions for forging one card from a user description.
pub fn forge_instructions(description: &str) -> String {
    format!(
        r#"<role>
You are a specialized component fabricator.
</role>

<task>
Create a single card based strictly on this description:
"{description}"
</task>

<rules>
- The code must be self-contained html, css and js.
- If the description asks for a theme, set category to "Theme".
- If it asks for a voice, tone or persona, set category to "Voice": html and css are empty and js is a single line starting with {VOICE_DIRECTIVE_MARKER}
- Otherwise set category to "UI".
- Choose the rarity from the complexity of the result, from Common up to Ancient.
- Return one JSON object, not an array.
</rules>"#,
        description = description.trim()
    )
}

/// Instructions for assembling a complete site from the active cards.
pub fn assembly_instructions(request: &AssemblyRequest) -> String {
    let mut sections = Vec::with_capacity(6);

    sections.push(
        "<role>\nYou are an elite creative technologist and lead frontend engineer. \
         Synthesize the user's vision with the selected cards into one cohesive, \
         production-grade single page website.\n</role>"
            .to_string(),
    );

    sections.push(format!(
        "<user_vision>\n{}\n</user_vision>",
        request.user_prompt.trim()
    ));

    let voice = if request.voices.is_empty() {
        DEFAULT_TONE.to_string()
    } else {
        request
            .voices
            .iter()
            .map(voice_block)
            .collect::<Vec<_>>()
            .join("\n\n")
    };
    sections.push(format!(
        "<voice_and_tone>\nApply these to all text content.\n\n{voice}\n</voice_and_tone>"
    ));

    let components = if request.components.is_empty() {
        CREATIVE_FREEDOM.to_string()
    } else {
        request
            .components
            .iter()
            .enumerate()
            .map(|(i, card)| component_block(i + 1, card))
            .collect::<Vec<_>>()
            .join("\n\n")
    };
    sections.push(format!(
        "<component_arsenal>\n{components}\n</component_arsenal>"
    ));

    if let Some(previous) = &request.previous_artifact {
        sections.push(format!(
            "<existing_codebase>\n\
             The user is iterating on a previous build. Preserve its structure unless \
             asked to refactor, and integrate the new cards and vision into it.\n\n\
             ```html\n{}\n```\n\
             </existing_codebase>",
            previous.as_str().trim_end()
        ));
    }

    sections.push(ARCHITECTURAL_RULES.to_string());

    sections.join("\n\n")
}

fn voice_block(card: &Card) -> String {
    format!(
        "- Persona: {}\n- Instruction: {}\n- Description: {}",
        card.name,
        card.voice_directive().unwrap_or_default(),
        card.description
    )
}

fn component_block(position: usize, card: &Card) -> String {
    format!(
        "<card index=\"{position}\" name=\"{}\" category=\"{}\">\n\
         Description: {}\n\
         Visual style: {}\n\
         <style>\n{}\n</style>\n\
         <!-- structure -->\n{}\n\
         <script>\n{}\n</script>\n\
         </card>",
        card.name,
        card.category,
        card.description,
        card.visual_style,
        card.code.presentation,
        card.code.structure,
        card.code.behavior
    )
}

const ARCHITECTURAL_RULES: &str = "<architectural_rules>
1. Single file output: return only the raw HTML document with embedded CSS and JS. No markdown.
2. Modern layout: semantic HTML5 with Tailwind CSS (via CDN) for the main grid and flexbox structure.
3. Card integration:
   - For Theme cards, extract their :root variables and place them at the very top of the CSS.
   - Weave the components into a proper layout (header, hero, features, footer).
   - Do not paste card code sequentially; nest each piece where it belongs.
   - Use the voice instructions to rewrite placeholder text in the cards to match the persona.
4. Visual consistency: harmonize fonts and colors with the Theme cards.
5. Polish: smooth entry animations and a responsive, mobile-first design.
</architectural_rules>";
