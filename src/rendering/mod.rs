//! Resolving query captures into positioned, styled chunks, and printing
//! them to the terminal.

use std::io::{self, Write};

use crate::highlighting::{Style, Theme};
use crate::parsing::{Capture, Grammar};

/// Minimal valid preamble anchoring each block's parse. The grammar needs
/// a package clause before it will recognize anything that follows; the
/// two rows it occupies are dropped again before printing.
const PREAMBLE: &str = "package main\n\n";
const PREAMBLE_ROWS: usize = 2;

/// A styled run of contiguous text within one rendered line. The text may
/// carry leading filler bytes no capture covered.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub style: Style,
    pub text: String,
}

/// One rendered line: chunks in column order, concatenating to the line's
/// text with no gaps.
pub type Line = Vec<Chunk>;

/// Highlight one repaired block: anchor it with the preamble, parse and
/// query it, resolve the capture stream, and discard the preamble rows.
pub fn highlight(block: &str, grammar: &mut Grammar, theme: &Theme) -> Vec<Line> {
    let source = format!("{}{}", PREAMBLE, block);
    let captures = grammar.captures(source.as_bytes());

    let mut lines = resolve(source.as_bytes(), &captures, grammar.capture_names(), theme);
    lines.drain(..PREAMBLE_ROWS.min(lines.len()));
    lines
}

/// Fold a capture stream into per-line chunk lists. Captures sharing a
/// start byte merge into the chunk already created for that token; gaps
/// between captured tokens are reconstructed from the source buffer.
pub fn resolve(
    source: &[u8],
    captures: &[Capture],
    names: &[&str],
    theme: &Theme,
) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut length = 0; // reconstructed byte length of the current line
    let mut last_start: Option<usize> = None;

    for capture in captures {
        while capture.row >= lines.len() {
            // Rows between captures still materialize, as empty lines.
            lines.push(Vec::new());
            length = 0;
        }

        // Each chunk gets its own copy of the style, so merges never
        // reach back into chunks that already resolved to the default.
        let style = names
            .get(capture.index)
            .map(|name| theme.style(name))
            .unwrap_or_default();

        if last_start == Some(capture.start) {
            // A second grammar rule firing on the same token refines the
            // existing chunk instead of duplicating it.
            if let Some(last) = lines
                .last_mut()
                .and_then(|line| line.last_mut())
            {
                last.style = last
                    .style
                    .merge(style);
                continue;
            }
        }

        let filler = capture
            .column
            .saturating_sub(length);
        let from = capture
            .start
            .saturating_sub(filler);
        let text = match source.get(from..capture.end) {
            Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            None => continue,
        };

        length += text.len();
        last_start = Some(capture.start);
        if let Some(line) = lines.last_mut() {
            line.push(Chunk { style, text });
        }
    }

    // Rows after the last capture (the block's separating blank line)
    // still have to come out as lines.
    let rows = source
        .iter()
        .filter(|&&byte| byte == b'\n')
        .count();
    while lines.len() < rows {
        lines.push(Vec::new());
    }

    lines
}

/// Write resolved lines to the terminal, each chunk wrapped in its
/// style's escape sequence. Append-only and safe to stream; no state
/// beyond the current line.
pub fn print(out: &mut impl Write, lines: &[Line]) -> io::Result<()> {
    for line in lines {
        for chunk in line {
            out.write_all(
                chunk
                    .style
                    .wrap(&chunk.text)
                    .as_bytes(),
            )?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}
