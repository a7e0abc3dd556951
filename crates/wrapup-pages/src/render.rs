//! Terminal rendering of tldr markup.
//!
//! Pages are line oriented; the first character of a line decides how it is
//! drawn:
//!
//! | first char | class            | output                                      |
//! |------------|------------------|---------------------------------------------|
//! | `#`        | title            | two blank lines, then title color           |
//! | `>`        | description      | description color                           |
//! | `-`        | example bullet   | one blank line, bullet kept, text color     |
//! | `` ` ``    | example command  | tab-indented, `{{placeholders}}` underlined |
//! | (none)     | blank            | nothing                                     |
//! | other      | other            | verbatim                                    |
//!
//! Every emitted line is indented by two spaces and ends with [`RESET`].

use std::io::{self, BufRead, Write};

/// Resets all attributes.
pub const RESET: &str = "\x1b[0m";
/// Starts underlined text.
pub const UNDERLINE: &str = "\x1b[04m";

const INDENT: &str = "  ";

/// Escape sequences used for each part of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTheme {
    /// Page title (`# tar`).
    pub title: String,
    /// Page description (`> Archiving utility.`).
    pub description: String,
    /// Example description (`- Create an archive:`).
    pub example_text: String,
    /// Example command (`` `tar cf {{target.tar}}` ``).
    pub example_code: String,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            title: "\x1b[1m".to_owned(),
            description: "\x1b[34m".to_owned(),
            example_text: "\x1b[36m".to_owned(),
            example_code: "\x1b[33m".to_owned(),
        }
    }
}

/// Kind of a markup line, decided by its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Title,
    Description,
    ExampleBullet,
    ExampleCommand,
    Blank,
    Other,
}

/// Classify a line by its first character.
#[must_use]
pub fn classify(line: &str) -> LineClass {
    match line.chars().next() {
        None => LineClass::Blank,
        Some('#') => LineClass::Title,
        Some('>') => LineClass::Description,
        Some('-') => LineClass::ExampleBullet,
        Some('`') => LineClass::ExampleCommand,
        Some(_) => LineClass::Other,
    }
}

/// Renders tldr markup as ANSI-colored text.
#[derive(Debug, Clone, Default)]
pub struct MarkupRenderer {
    theme: ColorTheme,
}

impl MarkupRenderer {
    #[must_use]
    pub fn new(theme: ColorTheme) -> Self {
        Self { theme }
    }

    /// Render every line of `input` into `out`, followed by two blank lines.
    ///
    /// Lines that are not valid UTF-8 are decoded lossily, so a stray byte
    /// shows up as U+FFFD instead of cutting the page short.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error from reading `input` or writing `out`.
    pub fn render<R: BufRead, W: Write + ?Sized>(
        &self,
        mut input: R,
        out: &mut W,
    ) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(strip_line_ending(&buf));
            if let Some(rendered) = self.render_line(&line) {
                out.write_all(rendered.as_bytes())?;
            }
        }
        out.write_all(b"\n\n")
    }

    /// Render a single line, including any spacing emitted before it.
    ///
    /// Returns `None` for blank lines, which produce no output at all.
    #[must_use]
    pub fn render_line(&self, line: &str) -> Option<String> {
        let rendered = match classify(line) {
            LineClass::Blank => return None,
            LineClass::Title => format!(
                "\n\n{INDENT}{}{}{RESET}\n",
                self.theme.title,
                &line[1..]
            ),
            LineClass::Description => format!(
                "{INDENT}{}{}{RESET}\n",
                self.theme.description,
                &line[1..]
            ),
            LineClass::ExampleBullet => format!("\n{INDENT}{}{RESET}\n", self.bullet(line)),
            LineClass::ExampleCommand => match self.command(line) {
                Some(command) => format!("{INDENT}\t{command}{RESET}\n"),
                None => {
                    tracing::debug!("unterminated inline code, passing through: {line}");
                    format!("{INDENT}{line}{RESET}\n")
                }
            },
            LineClass::Other => format!("{INDENT}{line}{RESET}\n"),
        };
        Some(rendered)
    }

    /// Keep the bullet glyph, replace the character after it with the text
    /// color and a space.
    fn bullet(&self, line: &str) -> String {
        let mut rest = line[1..].chars();
        rest.next();
        format!("-{} {}", self.theme.example_text, rest.as_str())
    }

    /// Color an inline command template.
    ///
    /// Returns `None` when the closing backtick is missing.
    fn command(&self, line: &str) -> Option<String> {
        let code = &self.theme.example_code;
        let body = &line[1..];
        let close = body.find('`')?;

        let mut colored = String::with_capacity(line.len() + 32);
        colored.push_str(code);
        colored.push_str(&body[..close]);
        colored.push_str(RESET);
        colored.push_str(&body[close + 1..]);

        Some(self.placeholders(&colored))
    }

    /// Underline each `{{placeholder}}`, restoring the code color after it.
    fn placeholders(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 16);
        let mut rest = text;
        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            out.push_str(UNDERLINE);
            rest = &rest[open + 2..];
            if let Some(close) = rest.find("}}") {
                out.push_str(&rest[..close]);
                out.push_str(RESET);
                out.push_str(&self.theme.example_code);
                rest = &rest[close + 2..];
            }
        }
        out.push_str(rest);
        out
    }
}

/// Drop a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
