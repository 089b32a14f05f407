//! Slash command parsing for the studio loop.
//!
//! Lines starting with `/` are commands; any other line is a build prompt.

use console::style;

use cardsmith_core::card::library::LibraryFilter;

#[derive(Debug, PartialEq)]
pub enum StudioCommand {
    Help,
    Library(LibraryFilter),
    Show(String),
    Toggle(String),
    /// Show the current selection.
    Deck,
    ClearStack,
    ClearTheme,
    DropVoice(String),
    Unbox,
    Forge(String),
    Build(String),
    /// Forget the previous build so the next one starts from scratch.
    Fresh,
    /// Export the last build; `None` uses the configured file.
    Export(Option<String>),
    Clear,
    Exit,
    /// Unknown command, or a known one missing its argument.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<StudioCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd.to_lowercase(), Some(rest.trim()).filter(|a| !a.is_empty())),
        None => (trimmed.to_lowercase(), None),
    };

    let required = |make: fn(String) -> StudioCommand, what: &str| match arg {
        Some(a) => make(a.to_string()),
        None => StudioCommand::Unknown(format!("{cmd} requires {what}")),
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => StudioCommand::Help,
        "/library" | "/ls" => match arg.map(str::parse::<LibraryFilter>) {
            None => StudioCommand::Library(LibraryFilter::All),
            Some(Ok(filter)) => StudioCommand::Library(filter),
            Some(Err(e)) => StudioCommand::Unknown(e),
        },
        "/show" => required(StudioCommand::Show, "a card id"),
        "/toggle" | "/t" => required(StudioCommand::Toggle, "a card id"),
        "/deck" => StudioCommand::Deck,
        "/clear-stack" => StudioCommand::ClearStack,
        "/clear-theme" => StudioCommand::ClearTheme,
        "/drop-voice" => required(StudioCommand::DropVoice, "a card id"),
        "/unbox" => StudioCommand::Unbox,
        "/forge" => required(StudioCommand::Forge, "a description"),
        "/build" => required(StudioCommand::Build, "a prompt"),
        "/fresh" => StudioCommand::Fresh,
        "/export" => StudioCommand::Export(arg.map(str::to_string)),
        "/clear" | "/cls" => StudioCommand::Clear,
        "/exit" | "/quit" | "/q" => StudioCommand::Exit,
        other => StudioCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/library [ui|theme|voice]", "Browse the collection"),
        ("/show ID", "Show one card"),
        ("/toggle ID", "Select or deselect a card"),
        ("/deck", "Show the current selection"),
        ("/clear-stack", "Deselect all UI cards"),
        ("/clear-theme", "Deselect the theme"),
        ("/drop-voice ID", "Deselect one voice card"),
        ("/unbox", "Draw a pack of new cards"),
        ("/forge TEXT", "Forge a card from a description"),
        ("/build TEXT", "Build a site (plain text works too)"),
        ("/fresh", "Start the next build from scratch"),
        ("/export [FILE]", "Write the last build to a file"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the session"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (command, about) in rows {
        println!("  {}  {about}", style(format!("{command:<26}")).cyan());
    }
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsmith_types::card::Category;

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("a landing page for a bakery"), None);
    }

    #[test]
    fn test_parse_help_and_exit() {
        assert_eq!(parse("/help"), Some(StudioCommand::Help));
        assert_eq!(parse("/?"), Some(StudioCommand::Help));
        assert_eq!(parse("/quit"), Some(StudioCommand::Exit));
        assert_eq!(parse("  /EXIT  "), Some(StudioCommand::Exit));
    }

    #[test]
    fn test_parse_library_filter() {
        assert_eq!(parse("/library"), Some(StudioCommand::Library(LibraryFilter::All)));
        assert_eq!(
            parse("/ls theme"),
            Some(StudioCommand::Library(LibraryFilter::Category(Category::Theme)))
        );
        assert!(matches!(parse("/library hats"), Some(StudioCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_argument_commands() {
        assert_eq!(parse("/toggle 1a2b3c4d"), Some(StudioCommand::Toggle("1a2b3c4d".to_string())));
        assert_eq!(
            parse("/forge a   neon footer"),
            Some(StudioCommand::Forge("a   neon footer".to_string()))
        );
        assert_eq!(parse("/drop-voice ab12"), Some(StudioCommand::DropVoice("ab12".to_string())));
    }

    #[test]
    fn test_parse_missing_argument() {
        assert_eq!(
            parse("/toggle"),
            Some(StudioCommand::Unknown("/toggle requires a card id".to_string()))
        );
        assert_eq!(
            parse("/build   "),
            Some(StudioCommand::Unknown("/build requires a prompt".to_string()))
        );
    }

    #[test]
    fn test_parse_export_file_is_optional() {
        assert_eq!(parse("/export"), Some(StudioCommand::Export(None)));
        assert_eq!(
            parse("/export out/site.html"),
            Some(StudioCommand::Export(Some("out/site.html".to_string())))
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/foo"), Some(StudioCommand::Unknown("/foo".to_string())));
    }
}
