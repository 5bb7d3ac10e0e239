//! Plain-text dump of a translation table.
//!
//! One line per source row, rows sorted by source token with NULL first:
//!
//! ```text
//! maison house:0.7000 home:0.2900
//! ```
//!
//! Targets are listed by descending probability; entries below the
//! threshold are left out.
//!
//! The NULL token is written as `NULL`. A corpus word that reads `NULL` or
//! starts with a backslash gets one extra leading backslash (`\NULL`), so
//! the two never print alike.

use lexalign_core::{AlignError, Lexicon, Result, Token};
use std::borrow::Cow;
use std::io::Write;

/// Default threshold below which entries are not printed.
pub const DEFAULT_MIN_PROBABILITY: f64 = 0.0001;

/// Render a token for the dump.
pub fn dump_token(token: &Token) -> Cow<'_, str> {
    match token.as_word() {
        None => Cow::Borrowed("NULL"),
        Some(word) if word == "NULL" || word.starts_with('\\') => {
            Cow::Owned(format!("\\{}", word))
        }
        Some(word) => Cow::Borrowed(word),
    }
}

/// Format one source row.
pub fn format_row(lexicon: &Lexicon, source: &Token, min: f64) -> String {
    let mut line = dump_token(source).into_owned();
    for (target, p) in lexicon.row(source) {
        if p < min {
            continue;
        }
        line.push_str(&format!(" {}:{:.4}", dump_token(&target), p));
    }
    line
}

/// Write every row of `lexicon` to `writer`.
pub fn write_table<W: Write>(lexicon: &Lexicon, min: f64, mut writer: W) -> Result<()> {
    for source in lexicon.sources() {
        writeln!(writer, "{}", format_row(lexicon, &source, min))
            .map_err(|e| AlignError::Save(format!("Failed to write table: {}", e)))?;
    }
    writer
        .flush()
        .map_err(|e| AlignError::Save(format!("Failed to write table: {}", e)))
}
