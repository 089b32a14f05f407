//! Standalone preview documents for a single card.

use cardsmith_types::card::{Card, Category};

/// Render a card as a self-contained HTML page.
///
/// UI and Theme cards embed their three fragments as-is. Voice cards have no
/// markup, so the page shows the directive text instead.
pub fn render_card_preview(card: &Card) -> String {
    let (style, body, script) = match card.category {
        Category::Voice => {
            let directive = card.voice_directive().unwrap_or_default();
            (
                VOICE_STYLE.to_string(),
                format!(
                    "<blockquote class=\"voice\"><p>{}</p><cite>{}</cite></blockquote>",
                    escape_html(directive),
                    escape_html(&card.name)
                ),
                String::new(),
            )
        }
        Category::Ui | Category::Theme => (
            card.code.presentation.clone(),
            card.code.structure.clone(),
            card.code.behavior.clone(),
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ margin: 0; display: flex; align-items: center; justify-content: center; min-height: 100vh; overflow: hidden; }}
{style}
</style>
</head>
<body>
{body}
<script>
{script}
</script>
</body>
</html>
"#,
        title = escape_html(&card.name),
    )
}

const VOICE_STYLE: &str = "body { background: #111; color: #eee; font-family: Georgia, serif; }\n\
.voice { max-width: 40rem; padding: 2rem; font-size: 1.5rem; }\n\
.voice cite { display: block; margin-top: 1rem; font-size: 1rem; opacity: 0.6; }";

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::store::test_support::card;

    #[test]
    fn test_ui_preview_embeds_fragments() {
        let hero = card("hero", Category::Ui);
        let html = render_card_preview(&hero);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(&hero.code.structure));
        assert!(html.contains(&hero.code.presentation));
        assert!(html.contains(&hero.code.behavior));
    }

    #[test]
    fn test_voice_preview_shows_directive() {
        let pirate = card("pirate", Category::Voice);
        let html = render_card_preview(&pirate);
        assert!(html.contains("Write like pirate."));
        assert!(!html.contains("// INSTRUCTION:"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
