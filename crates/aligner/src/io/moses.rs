//! Moses-style alignment output.
//!
//! Each sentence pair becomes one line of `i-j` links, where `i` and `j` are
//! 0-based word positions in the source and target sentence. Links from or
//! to NULL are not written.

use crate::decode::Alignment;
use lexalign_core::{AlignError, Result};
use std::io::Write;

/// Format the links of one sentence pair.
pub fn format_links<I>(alignments: I) -> String
where
    I: IntoIterator<Item = Alignment>,
{
    let mut out = String::new();
    for alignment in alignments {
        let Some(j) = alignment.target_position() else {
            continue;
        };
        if alignment.source_position == 0 || j == 0 {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("{}-{}", alignment.source_position - 1, j - 1));
    }
    out
}

/// Writes one line of links per sentence pair.
pub struct MosesWriter<W: Write> {
    writer: W,
    lines: usize,
}

impl<W: Write> MosesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Write the links of one sentence pair.
    pub fn write_sentence<I>(&mut self, alignments: I) -> Result<()>
    where
        I: IntoIterator<Item = Alignment>,
    {
        writeln!(self.writer, "{}", format_links(alignments))
            .map_err(|e| AlignError::Save(format!("Failed to write alignments: {}", e)))?;
        self.lines += 1;
        Ok(())
    }

    /// Number of lines written.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer
            .flush()
            .map_err(|e| AlignError::Save(format!("Failed to write alignments: {}", e)))?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Link;
    use lexalign_core::Token;

    fn link(source_position: usize, target_position: Option<usize>) -> Alignment {
        Alignment {
            source_position,
            source: Token::word("w"),
            link: match target_position {
                Some(position) => Link::Aligned {
                    position,
                    target: Token::word("t"),
                    probability: 0.5,
                },
                None => Link::Unaligned,
            },
        }
    }

    #[test]
    fn test_null_links_are_skipped() {
        let alignments = vec![
            link(0, Some(0)),
            link(1, Some(2)),
            link(2, Some(0)),
            link(3, None),
            link(4, Some(1)),
        ];
        assert_eq!(format_links(alignments), "0-1 3-0");
    }

    #[test]
    fn test_writer_emits_one_line_per_sentence() {
        let mut writer = MosesWriter::new(Vec::new());
        writer.write_sentence(vec![link(1, Some(1))]).unwrap();
        writer.write_sentence(Vec::new()).unwrap();
        assert_eq!(writer.lines(), 2);

        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(out, "0-0\n\n");
    }
}
