//! Source-context rendering for diagnostics.
//!
//! A rendered diagnostic shows the line the error occurred on, a caret under
//! the failing offset and the message:
//!
//! ```text
//! main.ql:2:9
//! let a = ;
//!         ^ error QL1002: Expected an identifier or a literal but found ';'.
//! ```

use crate::Diagnostic;
use quill_core::text::{LineMap, TextPos};

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Renders diagnostics against one source text.
pub struct ContextRenderer<'s> {
    source: &'s str,
    line_map: LineMap,
    use_color: bool,
}

impl<'s> ContextRenderer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            line_map: LineMap::new(source),
            use_color: false,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Render a diagnostic. Diagnostics without a span render as their
    /// message line only.
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        let Some(span) = diagnostic.span else {
            out.push_str(&self.message_line(diagnostic));
            out.push('\n');
            return out;
        };

        let pos = self.anchor(span.start);
        if let Some(ref file) = diagnostic.file {
            let lc = self.line_map.line_and_column_of(pos as TextPos);
            if self.use_color {
                out.push_str(&format!("{}{}:{}{}\n", CYAN, file, lc, RESET));
            } else {
                out.push_str(&format!("{}:{}\n", file, lc));
            }
        }

        let (line_start, line_end) = self.line_bounds(pos);
        let line = &self.source[line_start..line_end];
        out.push_str(line);
        out.push('\n');

        // Tabs are kept so the caret lines up with the source line.
        for ch in self.source[line_start..pos].chars() {
            out.push(if ch == '\t' { '\t' } else { ' ' });
        }
        out.push_str("^ ");
        out.push_str(&self.message_line(diagnostic));
        out.push('\n');
        out
    }

    fn message_line(&self, diagnostic: &Diagnostic) -> String {
        if self.use_color {
            let color = if diagnostic.is_error() { RED } else { YELLOW };
            format!(
                "{}{}{}{} {}{}{}: {}",
                BOLD,
                color,
                diagnostic.category,
                RESET,
                CYAN,
                diagnostic.code_label(),
                RESET,
                diagnostic.message_text
            )
        } else {
            format!(
                "{} {}: {}",
                diagnostic.category,
                diagnostic.code_label(),
                diagnostic.message_text
            )
        }
    }

    /// Clamp an offset into the source. An offset sitting right after a
    /// trailing newline (end of file) is pulled back onto the last line.
    fn anchor(&self, pos: TextPos) -> usize {
        let bytes = self.source.as_bytes();
        let mut pos = (pos as usize).min(bytes.len());
        if pos == bytes.len() && pos > 0 && bytes[pos - 1] == b'\n' {
            pos -= 1;
            if pos > 0 && bytes[pos - 1] == b'\r' {
                pos -= 1;
            }
        }
        while !self.source.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn line_bounds(&self, pos: usize) -> (usize, usize) {
        let bytes = self.source.as_bytes();
        let start = memchr::memrchr(b'\n', &bytes[..pos]).map_or(0, |i| i + 1);
        let mut end = memchr::memchr(b'\n', &bytes[pos..]).map_or(bytes.len(), |i| pos + i);
        if end > start && bytes[end - 1] == b'\r' {
            end -= 1;
        }
        (start, end)
    }
}

/// Render a diagnostic against its source text without color.
pub fn render_with_context(source: &str, diagnostic: &Diagnostic) -> String {
    ContextRenderer::new(source).render(diagnostic)
}
