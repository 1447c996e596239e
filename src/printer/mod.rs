//! Plain and coloured text output for non-interactive modes.

use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextPrinter {
    pub color: Option<&'static str>,
}

impl TextPrinter {
    pub fn new(color: &'static str) -> Self {
        Self { color: Some(color) }
    }

    pub fn render(&self, text: &str) -> String {
        match self.color {
            Some("green") => text.green().to_string(),
            Some("cyan") => text.cyan().to_string(),
            Some("magenta") => text.magenta().to_string(),
            Some("yellow") => text.yellow().to_string(),
            Some("red") => text.red().to_string(),
            _ => text.to_string(),
        }
    }

    pub fn print(&self, text: &str) {
        println!("{}", self.render(text));
    }

    pub fn eprint(&self, text: &str) {
        eprintln!("{}", self.render(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_printer_leaves_text_alone() {
        assert_eq!(TextPrinter::default().render("hello"), "hello");
        assert_eq!(TextPrinter::new("unknown").render("hello"), "hello");
    }

    #[test]
    fn colored_printer_wraps_in_escape_codes() {
        let out = TextPrinter::new("green").render("ok");
        assert!(out.starts_with("\u{1b}["));
        assert!(out.contains("ok"));
    }
}
