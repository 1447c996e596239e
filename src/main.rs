mod cli;
mod config;
mod execution;
mod handlers;
mod languages;
mod logging;
mod printer;
mod tui;

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{anyhow, Context, Result};
use config::Config;
use is_terminal::IsTerminal;
use languages::LanguageOption;
use tui::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Load config; CLI flags take precedence over file and env
    let mut cfg = Config::load();
    if let Some(url) = &args.api_url {
        cfg.set("PISTON_API_URL", url.as_str());
    }
    if let Some(secs) = args.timeout {
        cfg.set("REQUEST_TIMEOUT", secs.to_string());
    }

    let _log_guard = logging::init(&cfg, args.verbose)?;

    if args.list_languages {
        handlers::list::languages();
        return Ok(());
    }
    if args.list_runtimes {
        return handlers::list::runtimes(&cfg).await;
    }

    let language = resolve_language(&cfg, args.language.as_deref(), args.file.as_deref())?;

    // Source: --file, else piped stdin, else the language snippet
    let mut source = match &args.file {
        Some(path) => Some(
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?,
        ),
        None => None,
    };
    if source.is_none() && !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        if !buf.is_empty() {
            source = Some(buf);
        }
    }

    if args.run {
        let source = source.unwrap_or_else(|| language.snippet().to_string());
        return handlers::run::run(&cfg, language, source).await;
    }

    let theme = args
        .theme
        .or_else(|| cfg.get("THEME").and_then(|t| Theme::parse(&t)))
        .unwrap_or_default();

    tui::run_editor(&cfg, language, theme, source).await
}

/// `--language`, then the file extension, then `DEFAULT_LANGUAGE`, then the first catalog entry.
fn resolve_language(cfg: &Config, flag: Option<&str>, file: Option<&Path>) -> Result<LanguageOption> {
    if let Some(name) = flag {
        return languages::find(name)
            .ok_or_else(|| anyhow!("unsupported language: {name} (see --list-languages)"));
    }
    if let Some(option) = file
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .and_then(languages::from_extension)
    {
        return Ok(option);
    }
    match cfg.get("DEFAULT_LANGUAGE") {
        Some(name) => languages::find(&name)
            .ok_or_else(|| anyhow!("unsupported DEFAULT_LANGUAGE: {name} (see --list-languages)")),
        None => Ok(languages::default_option()),
    }
}
