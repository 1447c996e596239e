//! Async event loop for the editor page.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use super::{
    app::{App, Focus},
    events::TuiEvent,
    theme::Theme,
    ui::{output_text_width, render_ui},
};
use crate::{config::Config, execution::ExecutionClient, languages::LanguageOption};

/// Run the full-screen editor until the user quits.
pub async fn run_editor(
    cfg: &Config,
    language: LanguageOption,
    theme: Theme,
    initial_source: Option<String>,
) -> Result<()> {
    if !io::IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!("the editor requires a proper terminal environment"));
    }

    let client = ExecutionClient::from_config(cfg).context("failed to build execution client")?;
    let mut app = match initial_source.as_deref() {
        Some(source) => App::with_source(language, theme, source),
        None => App::new(language, theme),
    };
    tracing::info!(
        language = language.language,
        theme = theme.name(),
        endpoint = client.base_url(),
        config = %cfg.config_path.display(),
        "editor started"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut terminal = setup_or_restore(enter_screen, leave_screen)
        .context("failed to set up the terminal")?;

    let (event_tx, event_rx) = mpsc::unbounded_channel::<TuiEvent>();

    let result = run_app(&mut terminal, &mut app, client, event_tx, event_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableBracketedPaste)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Run `setup`; when it fails, `restore` undoes whatever part of it already happened.
fn setup_or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableBracketedPaste)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Best-effort restore after a failed setup; the setup error is the one reported.
fn leave_screen() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = stdout.execute(DisableBracketedPaste);
    let _ = stdout.execute(LeaveAlternateScreen);
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: ExecutionClient,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
    mut event_rx: mpsc::UnboundedReceiver<TuiEvent>,
) -> Result<()> {
    // Spawn input handler
    let input_tx = event_tx.clone();
    tokio::task::spawn_blocking(move || {
        while !input_tx.is_closed() {
            if !event::poll(Duration::from_millis(100)).unwrap_or(false) {
                continue;
            }
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => input_tx.send(TuiEvent::Key(key)),
                Ok(Event::Paste(text)) => input_tx.send(TuiEvent::Paste(text)),
                Ok(Event::Resize(_, _)) => input_tx.send(TuiEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::error!(error = %err, "terminal input failed");
                    let _ = input_tx.send(TuiEvent::Quit);
                    break;
                }
            };
            if forwarded.is_err() {
                break; // Channel closed
            }
        }
    });

    'outer: loop {
        terminal.draw(|frame| {
            app.set_output_width(output_text_width(frame.area(), app.split_percent));
            render_ui(frame, app);
        })?;

        while let Ok(tui_event) = event_rx.try_recv() {
            match tui_event {
                TuiEvent::Key(key) => {
                    if handle_key_event(app, key, &event_tx) {
                        break 'outer;
                    }
                }
                TuiEvent::Paste(text) => {
                    if app.focus == Focus::Editor {
                        app.editor.insert_str(text.replace("\r\n", "\n"));
                    }
                }
                TuiEvent::Resize => {}
                TuiEvent::Run(request) => {
                    let client = client.clone();
                    let tx = event_tx.clone();
                    tokio::spawn(async move {
                        let result = client.execute(&request).await;
                        let _ = tx.send(TuiEvent::RunFinished(result));
                    });
                }
                TuiEvent::RunFinished(result) => app.finish_run(result),
                TuiEvent::Quit => break 'outer,
            }
        }

        app.tick();
        app.refresh_status();

        // Small delay to prevent busy waiting
        tokio::time::sleep(Duration::from_millis(16)).await; // ~60 FPS
    }

    Ok(())
}

/// Handle keyboard events. Returns true when the user asked to quit.
fn handle_key_event(
    app: &mut App,
    key: crossterm::event::KeyEvent,
    event_tx: &mpsc::UnboundedSender<TuiEvent>,
) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return app.handle_ctrl_c();
    }

    // Help overlay swallows the next key
    if app.show_help {
        app.toggle_help();
        return false;
    }

    if app.focus == Focus::LanguagePicker {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.picker_up(),
            KeyCode::Down | KeyCode::Char('j') => app.picker_down(),
            KeyCode::Enter => app.confirm_picker(),
            KeyCode::Esc => app.close_picker(),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::F(1) => app.toggle_help(),
        KeyCode::F(5) => request_run(app, event_tx),
        KeyCode::Char('r') if ctrl => request_run(app, event_tx),
        KeyCode::Char('l') if ctrl => app.open_picker(),
        KeyCode::Char('t') if ctrl => app.toggle_theme(),
        KeyCode::Left if ctrl => app.narrow_editor(),
        KeyCode::Right if ctrl => app.widen_editor(),
        KeyCode::PageUp => app.scroll_output_up(),
        KeyCode::PageDown => app.scroll_output_down(),
        _ => {
            app.editor.input(key);
        }
    }

    false
}

fn request_run(app: &mut App, event_tx: &mpsc::UnboundedSender<TuiEvent>) {
    if let Some(request) = app.begin_run() {
        tracing::info!(language = %request.language, version = %request.version, "run requested");
        if event_tx.send(TuiEvent::Run(request)).is_err() {
            tracing::error!("event loop closed before the run started");
            app.loading = false;
        }
    }
}
