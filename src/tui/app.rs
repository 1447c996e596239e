//! Editor page state: source text, language, output and the run guard.

use std::time::{Duration, Instant};

use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};
use tui_textarea::TextArea;
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::execution::{ExecuteRequest, ExecuteResponse, ExecutionError};
use crate::languages::{self, LanguageOption, LANGUAGE_OPTIONS};

pub const DEFAULT_SPLIT_PERCENT: u16 = 50;
pub const MIN_EDITOR_PERCENT: u16 = 35;
pub const MIN_OUTPUT_PERCENT: u16 = 25;
const SPLIT_STEP: u16 = 5;

const SPINNER: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];
const DEFAULT_STATUS: &str = "Ctrl+R run | Ctrl+L language | Ctrl+T theme | F1 help";

/// Which part of the page receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    LanguagePicker,
}

/// Application state for the editor page
pub struct App {
    /// Source text being edited
    pub editor: TextArea<'static>,
    /// Currently selected language option
    pub language: LanguageOption,
    /// Output of the last successful run, one entry per line
    pub output: Vec<String>,
    /// True only while a run is in flight
    pub loading: bool,
    pub theme: Theme,
    pub focus: Focus,
    /// Highlighted row in the language picker
    pub picker_index: usize,
    /// Width of the editor pane in percent
    pub split_percent: u16,
    pub output_scroll: u16,
    /// Columns available to output text at the last draw; 0 until known
    pub output_width: u16,
    pub show_help: bool,
    pub status_message: String,
    pub spinner_tick: usize,
    /// Timestamp of last Ctrl+C press for double Ctrl+C detection
    pub last_ctrl_c_time: Option<Instant>,
}

impl App {
    /// Start on `language` with its starter snippet.
    pub fn new(language: LanguageOption, theme: Theme) -> Self {
        Self::with_source(language, theme, language.snippet())
    }

    /// Start on `language` with caller-provided source text.
    pub fn with_source(language: LanguageOption, theme: Theme, source: &str) -> Self {
        let mut app = Self {
            editor: TextArea::default(),
            language,
            output: Vec::new(),
            loading: false,
            theme,
            focus: Focus::Editor,
            picker_index: languages::index_of(&language),
            split_percent: DEFAULT_SPLIT_PERCENT,
            output_scroll: 0,
            output_width: 0,
            show_help: false,
            status_message: DEFAULT_STATUS.to_string(),
            spinner_tick: 0,
            last_ctrl_c_time: None,
        };
        app.set_source(source);
        app
    }

    /// Current editor contents joined with `\n`.
    pub fn source_text(&self) -> String {
        self.editor.lines().join("\n")
    }

    fn set_source(&mut self, text: &str) {
        self.editor = TextArea::new(text.split('\n').map(str::to_string).collect());
        self.style_editor();
    }

    fn style_editor(&mut self) {
        let palette = self.theme.palette();
        self.editor.set_style(Style::default().fg(palette.text).bg(palette.background));
        self.editor.set_cursor_line_style(Style::default().bg(palette.cursor_line));
        self.editor.set_line_number_style(Style::default().fg(palette.line_number));
        self.editor.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title(format!(" {} {} ", self.language.language, self.language.version))
                .title_style(Style::default().fg(palette.title).add_modifier(Modifier::BOLD)),
        );
    }

    /// Switch language and replace the source with its snippet. Unsaved edits are discarded.
    pub fn select_language(&mut self, option: LanguageOption) {
        self.language = option;
        self.picker_index = languages::index_of(&option);
        self.set_source(option.snippet());
        tracing::debug!(language = option.language, version = option.version, "language selected");
    }

    /// Whether the Run control is available.
    pub fn can_run(&self) -> bool {
        !self.loading
    }

    /// Mark a run as in flight and build its request; `None` while another run is pending.
    pub fn begin_run(&mut self) -> Option<ExecuteRequest> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.spinner_tick = 0;
        Some(ExecuteRequest::new(&self.language, self.source_text()))
    }

    /// Settle the in-flight run. Output is replaced on success and left untouched on failure.
    pub fn finish_run(&mut self, result: Result<ExecuteResponse, ExecutionError>) {
        self.loading = false;
        match result {
            Ok(response) => {
                self.output = response.output_lines();
                self.output_scroll = 0;
            }
            Err(err) => {
                tracing::error!(error = %err, "run failed, keeping previous output");
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.style_editor();
    }

    pub fn widen_editor(&mut self) {
        self.split_percent = (self.split_percent + SPLIT_STEP).min(100 - MIN_OUTPUT_PERCENT);
    }

    pub fn narrow_editor(&mut self) {
        self.split_percent = self
            .split_percent
            .saturating_sub(SPLIT_STEP)
            .max(MIN_EDITOR_PERCENT);
    }

    // ----- Language picker -----
    pub fn open_picker(&mut self) {
        self.picker_index = languages::index_of(&self.language);
        self.focus = Focus::LanguagePicker;
    }

    pub fn close_picker(&mut self) {
        self.focus = Focus::Editor;
    }

    pub fn picker_up(&mut self) {
        self.picker_index = self.picker_index.saturating_sub(1);
    }

    pub fn picker_down(&mut self) {
        if self.picker_index + 1 < LANGUAGE_OPTIONS.len() {
            self.picker_index += 1;
        }
    }

    pub fn confirm_picker(&mut self) {
        if let Some(option) = LANGUAGE_OPTIONS.get(self.picker_index).copied() {
            self.select_language(option);
        }
        self.focus = Focus::Editor;
    }

    // ----- Output panel -----
    pub fn scroll_output_up(&mut self) {
        self.output_scroll = self.output_scroll.saturating_sub(1);
    }

    pub fn scroll_output_down(&mut self) {
        if self.output_scroll < self.max_output_scroll() {
            self.output_scroll += 1;
        }
    }

    /// Record the output pane's text width, pulling the scroll offset back if it now overshoots.
    pub fn set_output_width(&mut self, width: u16) {
        self.output_width = width;
        self.output_scroll = self.output_scroll.min(self.max_output_scroll());
    }

    /// Rows the output occupies once long lines wrap at `output_width`.
    fn output_rows(&self) -> usize {
        let width = usize::from(self.output_width);
        if width == 0 {
            return self.output.len();
        }
        self.output
            .iter()
            .map(|line| line.width().div_ceil(width).max(1))
            .sum()
    }

    /// Largest scroll offset that still shows the last row; saturates at `u16::MAX`.
    pub fn max_output_scroll(&self) -> u16 {
        u16::try_from(self.output_rows().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Advance the loading spinner.
    pub fn tick(&mut self) {
        if self.loading {
            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }
    }

    pub fn spinner_frame(&self) -> char {
        SPINNER[(self.spinner_tick / 4) % SPINNER.len()]
    }

    /// Handle Ctrl+C press and detect double press for quit
    /// Returns true if should quit (double Ctrl+C), false otherwise
    pub fn handle_ctrl_c(&mut self) -> bool {
        const DOUBLE_CTRL_C_TIMEOUT: Duration = Duration::from_millis(500);

        let now = Instant::now();

        if let Some(last_time) = self.last_ctrl_c_time {
            if now.duration_since(last_time) <= DOUBLE_CTRL_C_TIMEOUT {
                self.last_ctrl_c_time = None;
                return true;
            }
        }

        self.status_message = "Press Ctrl+C again to quit".to_string();
        self.last_ctrl_c_time = Some(now);
        false
    }

    /// Restore the default hint once the Ctrl+C window has passed.
    pub fn refresh_status(&mut self) {
        if let Some(last) = self.last_ctrl_c_time {
            if last.elapsed() > Duration::from_millis(500) {
                self.last_ctrl_c_time = None;
                self.status_message = DEFAULT_STATUS.to_string();
            }
        }
    }
}
