//! Line commands read from stdin

use anyhow::{bail, Result};

/// Help text listing every command
pub const HELP: &str = "\
commands:
  search <text>   search titles and tags (empty text lists everything)
  open <id>       open a recipe
  close           close the open recipe
  fav [id]        toggle a favorite (defaults to the open recipe)
  go <path>       navigate to /, /favorites or /profile
  back            close the recipe or go back
  theme           switch between light and dark
  show            print the current screen
  help            print this help
  quit            exit";

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a search
    Search(String),
    /// Open a recipe by id
    Open(String),
    /// Close the open recipe
    Close,
    /// Toggle a favorite; `None` means the open recipe
    Fav(Option<String>),
    /// Navigate to a path
    Go(String),
    /// Close the recipe or go back
    Back,
    /// Toggle the theme
    Theme,
    /// Print the current screen
    Show,
    /// Print help
    Help,
    /// Exit
    Quit,
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "search" | "s" => Command::Search(rest.to_string()),
            "open" | "o" => {
                if rest.is_empty() {
                    bail!("usage: open <id>");
                }
                Command::Open(rest.to_string())
            }
            "close" => Command::Close,
            "fav" | "f" => Command::Fav((!rest.is_empty()).then(|| rest.to_string())),
            "go" => {
                if rest.is_empty() {
                    bail!("usage: go <path>");
                }
                Command::Go(rest.to_string())
            }
            "back" => Command::Back,
            "theme" => Command::Theme,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command: {} (try `help`)", other),
        };
        Ok(Some(command))
    }
}
