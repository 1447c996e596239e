//! Listing handlers for the local catalog and the remote runtimes.

use anyhow::{Context, Result};

use crate::{
    config::Config,
    execution::{ExecutionClient, Runtime},
    languages::{LanguageOption, LANGUAGE_OPTIONS},
    printer::TextPrinter,
};

pub fn languages() {
    let printer = TextPrinter::new("cyan");
    for option in LANGUAGE_OPTIONS {
        printer.print(&format_option(option));
    }
}

pub async fn runtimes(cfg: &Config) -> Result<()> {
    let client = ExecutionClient::from_config(cfg).context("failed to build execution client")?;
    let mut runtimes = client
        .runtimes()
        .await
        .with_context(|| format!("failed to list runtimes from {}", client.base_url()))?;
    runtimes.sort_by(|a, b| a.language.cmp(&b.language).then_with(|| a.version.cmp(&b.version)));

    let selectable = TextPrinter::new("green");
    let plain = TextPrinter::default();
    for runtime in &runtimes {
        let line = format_runtime(runtime);
        if is_selectable(runtime) {
            selectable.print(&line);
        } else {
            plain.print(&line);
        }
    }
    Ok(())
}

fn format_option(option: &LanguageOption) -> String {
    format!("{:<12} {}", option.language, option.version)
}

fn format_runtime(runtime: &Runtime) -> String {
    let mut line = format!("{:<12} {}", runtime.language, runtime.version);
    if let Some(name) = &runtime.runtime {
        line.push_str(&format!(" [{name}]"));
    }
    if !runtime.aliases.is_empty() {
        line.push_str(&format!(" ({})", runtime.aliases.join(", ")));
    }
    line
}

/// Whether the editor's catalog offers this exact runtime.
fn is_selectable(runtime: &Runtime) -> bool {
    LANGUAGE_OPTIONS
        .iter()
        .any(|o| o.language == runtime.language && o.version == runtime.version)
}
