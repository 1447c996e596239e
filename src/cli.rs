use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::tui::Theme;

#[derive(Parser, Debug, Clone)]
#[command(name = "syntaxhub", about = "Syntax Hub: edit code and run it on a remote Piston service", version)]
#[command(group(ArgGroup::new("mode").args(["run", "list_languages", "list_runtimes"]).multiple(false)))]
pub struct Cli {
    /// Source file to open (or execute with --run).
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Language to start with. Defaults to the file extension, then DEFAULT_LANGUAGE.
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// Colour theme for the editor.
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,

    /// Base URL of the Piston API (overrides PISTON_API_URL).
    #[arg(long = "api-url")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides REQUEST_TIMEOUT).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Execute the file (or stdin) once and print the output instead of opening the editor.
    #[arg(short = 'r', long)]
    pub run: bool,

    /// List the languages the editor offers.
    #[arg(long = "list-languages")]
    pub list_languages: bool,

    /// List runtimes installed on the execution service.
    #[arg(long = "list-runtimes")]
    pub list_runtimes: bool,

    /// Log at debug level.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["syntaxhub", "--run", "--list-languages"]).is_err());
        assert!(Cli::try_parse_from(["syntaxhub", "--list-runtimes"]).is_ok());
    }

    #[test]
    fn parses_editor_options() {
        let cli = Cli::try_parse_from([
            "syntaxhub", "-f", "main.py", "--theme", "light", "--api-url", "http://localhost:2000/api/v2",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("main.py")));
        assert_eq!(cli.theme, Some(Theme::Light));
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:2000/api/v2"));
        assert!(!cli.run);
    }
}
