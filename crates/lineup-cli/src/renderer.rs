//! Terminal rendering for markdown output
//!
//! Uses termimad for styled output, with a plain-text fallback for
//! `--no-color` and non-interactive use.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            for line in markdown.lines() {
                println!("{}", self.styled_line(line));
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }

    /// Render an operation status to stderr
    pub fn render_error(&self, message: &str) {
        if self.rich_enabled {
            for line in message.lines() {
                eprintln!("{}", self.styled_line(line));
            }
        } else {
            eprint!("{message}");
        }
    }

    // Headers keep their hash marks; status prefixes are colored.
    fn styled_line(&self, line: &str) -> String {
        if line.starts_with('#') {
            format!("\x1b[34m{line}\x1b[0m")
        } else if let Some(rest) = line.strip_prefix("Success:") {
            format!("\x1b[32mSuccess:\x1b[0m{}", self.skin.inline(rest))
        } else if let Some(rest) = line.strip_prefix("Error:") {
            format!("\x1b[31mError:\x1b[0m{}", self.skin.inline(rest))
        } else {
            self.skin.inline(line).to_string()
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_header_lines_are_blue() {
        let renderer = TerminalRenderer::new(true);
        assert_eq!(
            renderer.styled_line("# Featured"),
            "\x1b[34m# Featured\x1b[0m"
        );
    }

    #[test]
    fn test_status_prefixes_are_colored() {
        let renderer = TerminalRenderer::new(true);
        assert!(renderer
            .styled_line("Error: Maximum upcoming program (3 featured)")
            .starts_with("\x1b[31mError:\x1b[0m"));
        assert!(renderer
            .styled_line("Success: done")
            .starts_with("\x1b[32mSuccess:\x1b[0m"));
    }
}
