//! UI layout and rendering logic for the editor page.

use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::{App, Focus};
use super::theme::Palette;
use crate::languages::LANGUAGE_OPTIONS;

/// Header, editor + output, status bar.
fn main_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // Editor + output
            Constraint::Length(1), // Status bar
        ])
        .split(area)
}

fn pane_layout(area: Rect, split_percent: u16) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(split_percent),
            Constraint::Percentage(100 - split_percent),
        ])
        .split(area)
}

/// Columns left for output text in a terminal of size `area`.
pub fn output_text_width(area: Rect, split_percent: u16) -> u16 {
    let panes = pane_layout(main_layout(area)[1], split_percent);
    // Left and right borders
    panes[1].width.saturating_sub(2)
}

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let palette = app.theme.palette();

    let main_layout = main_layout(frame.area());

    render_header(frame, app, &palette, main_layout[0]);

    let panes = pane_layout(main_layout[1], app.split_percent);

    frame.render_widget(&app.editor, panes[0]);
    render_output(frame, app, &palette, panes[1]);
    render_status_bar(frame, app, &palette, main_layout[2]);

    if app.focus == Focus::LanguagePicker {
        render_language_picker(frame, app, &palette);
    }

    if app.show_help {
        render_help_overlay(frame, &palette);
    }
}

fn render_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let right = format!(
        "{} {} | {} ",
        app.language.language,
        app.language.version,
        app.theme.name()
    );
    let title = " Syntax Hub";
    let line = padded_line(
        Span::styled(
            title,
            Style::default().fg(palette.title).add_modifier(Modifier::BOLD),
        ),
        Span::styled(right, Style::default().fg(palette.muted)),
        area.width.saturating_sub(2),
    );

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.header_bg)),
    );
    frame.render_widget(header, area);
}

/// Output panel: header row with the Run control, then one row per output line.
fn render_output(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let button = if !app.can_run() {
        Span::styled(
            format!(" {} Loading ", app.spinner_frame()),
            Style::default()
                .fg(palette.muted)
                .bg(palette.accent)
                .add_modifier(Modifier::DIM),
        )
    } else {
        Span::styled(
            " ▶ Run ",
            Style::default()
                .fg(palette.accent_text)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
    };
    let header_line = padded_line(
        Span::styled(" Output", Style::default().fg(palette.title)),
        button,
        layout[0].width.saturating_sub(2),
    );
    let header = Paragraph::new(header_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.header_bg)),
    );
    frame.render_widget(header, layout[0]);

    let lines: Vec<Line> = app
        .output
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(palette.text))))
        .collect();

    let body = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
                .border_style(Style::default().fg(palette.border)),
        )
        .style(Style::default().bg(palette.background))
        .scroll((app.output_scroll, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, layout[1]);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let (row, col) = app.editor.cursor();
    let status_text = format!("{} | Ln {}, Col {}", app.status_message, row + 1, col + 1);

    let status_paragraph =
        Paragraph::new(status_text).style(Style::default().bg(palette.status_bg).fg(palette.status_fg));

    frame.render_widget(status_paragraph, area);
}

fn render_language_picker(frame: &mut Frame, app: &App, palette: &Palette) {
    let popup_area = centered_rect(40, 50, frame.area());
    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = LANGUAGE_OPTIONS
        .iter()
        .map(|o| {
            let marker = if *o == app.language { "●" } else { " " };
            ListItem::new(format!("{} {} ({})", marker, o.language, o.version))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select language")
                .title_style(Style::default().fg(palette.title).add_modifier(Modifier::BOLD))
                .border_style(Style::default().fg(palette.accent)),
        )
        .style(Style::default().fg(palette.text).bg(palette.background))
        .highlight_style(
            Style::default()
                .fg(palette.accent_text)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.picker_index));
    frame.render_stateful_widget(list, popup_area, &mut state);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, palette: &Palette) {
    let popup_area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, popup_area);

    let help_lines = vec![
        Line::from("Syntax Hub Help"),
        Line::from(""),
        Line::from("Editor:"),
        Line::from("  Ctrl+R / F5   - Run the current source"),
        Line::from("  Ctrl+L        - Choose language (resets source)"),
        Line::from("  Ctrl+T        - Toggle light/dark theme"),
        Line::from("  Ctrl+←/→      - Resize editor and output panes"),
        Line::from(""),
        Line::from("Output:"),
        Line::from("  PgUp/PgDn     - Scroll output"),
        Line::from(""),
        Line::from("  F1            - Toggle this help"),
        Line::from("  Ctrl+C twice  - Quit"),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help (any key to close)")
                .title_style(Style::default().fg(palette.title).add_modifier(Modifier::BOLD)),
        )
        .style(Style::default().fg(palette.text).bg(palette.background))
        .wrap(Wrap { trim: true });

    frame.render_widget(help_paragraph, popup_area);
}

/// Place `left` and `right` on one line, padding between them to fill `width` columns.
fn padded_line<'a>(left: Span<'a>, right: Span<'a>, width: u16) -> Line<'a> {
    let used = left.content.width() + right.content.width();
    let gap = (width as usize).saturating_sub(used).max(1);
    Line::from(vec![left, Span::raw(" ".repeat(gap)), right])
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages;
    use crate::tui::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render_ui(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn shows_run_control_when_idle() {
        let app = App::new(languages::default_option(), Theme::Dark);
        let text = screen(&app);
        assert!(text.contains("Syntax Hub"));
        assert!(text.contains("▶ Run"));
        assert!(!text.contains("Loading"));
    }

    #[test]
    fn shows_loading_while_run_pending() {
        let mut app = App::new(languages::default_option(), Theme::Light);
        app.begin_run();
        let text = screen(&app);
        assert!(text.contains("Loading"));
        assert!(!text.contains("▶ Run"));
    }

    #[test]
    fn renders_output_lines() {
        let mut app = App::new(languages::default_option(), Theme::Dark);
        app.begin_run();
        let response = serde_json::from_str(r#"{"run":{"output":"first line\nsecond line"}}"#).unwrap();
        app.finish_run(Ok(response));
        let text = screen(&app);
        assert!(text.contains("first line"));
        assert!(text.contains("second line"));
    }

    #[test]
    fn picker_lists_every_language() {
        let mut app = App::new(languages::default_option(), Theme::Dark);
        app.open_picker();
        let text = screen(&app);
        for option in LANGUAGE_OPTIONS {
            assert!(text.contains(option.language), "missing {}", option.language);
        }
    }

    #[test]
    fn output_text_width_follows_split() {
        let area = Rect::new(0, 0, 100, 24);
        assert_eq!(output_text_width(area, 50), 48);
        assert_eq!(output_text_width(area, 75), 23);
    }

    #[test]
    fn scrolled_output_shows_wrapped_tail() {
        let mut app = App::new(languages::default_option(), Theme::Dark);
        app.begin_run();
        let long = format!("{}tail", "x".repeat(60));
        let response = serde_json::from_value(serde_json::json!({ "run": { "output": long } })).unwrap();
        app.finish_run(Ok(response));
        app.set_output_width(output_text_width(Rect::new(0, 0, 100, 24), app.split_percent));
        for _ in 0..5 {
            app.scroll_output_down();
        }
        assert_eq!(app.output_scroll, 1);
        assert!(screen(&app).contains("tail"));
    }

    #[test]
    fn padded_line_fills_width() {
        let line = padded_line(Span::raw("ab"), Span::raw("cd"), 10);
        assert_eq!(line.width(), 10);
        let cramped = padded_line(Span::raw("abcdef"), Span::raw("ghij"), 5);
        assert_eq!(cramped.width(), 11);
    }
}
