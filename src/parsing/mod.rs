//! Go grammar loading and highlight-query capture extraction.

use std::fmt;

use streaming_iterator::StreamingIterator;
use tracing::debug;
use tree_sitter::{Language, Parser, Query, QueryCursor};

/// The highlight query run against every parsed block. Configuration
/// data: the theme is index-aligned with the capture names this query
/// declares. The non-standard editor predicates it carries (#lua-match?,
/// #not-has-parent?) are kept as inert general predicates.
static HIGHLIGHTS: &str = include_str!("highlights.scm");

/// One query capture: a byte span, its start position, and the index of
/// the capture rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub row: usize,
    pub column: usize,
    pub start: usize,
    pub end: usize,
    pub index: usize,
}

/// The Go grammar could not be loaded or the highlight query did not
/// compile. Fatal at startup; nothing can be highlighted without them.
#[derive(Debug)]
pub struct GrammarError {
    pub problem: String,
    pub details: String,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.problem, self.details)
    }
}

/// The parse-and-query capability: a parser configured for Go plus the
/// compiled highlight query, reused across blocks.
pub struct Grammar {
    parser: Parser,
    query: Query,
}

impl Grammar {
    pub fn load() -> Result<Grammar, GrammarError> {
        let language: Language = tree_sitter_go::LANGUAGE.into();

        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|error| GrammarError {
                problem: "Incompatible Go grammar".to_string(),
                details: error.to_string(),
            })?;

        let query = Query::new(&language, HIGHLIGHTS).map_err(|error| GrammarError {
            problem: "Malformed highlight query".to_string(),
            details: error.to_string(),
        })?;

        Ok(Grammar { parser, query })
    }

    /// The query's declared capture names. `Capture::index` is a
    /// position in this list.
    pub fn capture_names(&self) -> &[&str] {
        self.query
            .capture_names()
    }

    /// Parse one block and collect its highlight captures in emission
    /// order. A buffer the parser gives up on degrades to no captures
    /// rather than failing the whole render.
    pub fn captures(&mut self, source: &[u8]) -> Vec<Capture> {
        let tree = match self.parser.parse(source, None) {
            Some(tree) => tree,
            None => return Vec::new(),
        };

        let mut cursor = QueryCursor::new();
        let mut stream = cursor.captures(&self.query, tree.root_node(), source);

        let mut captures = Vec::new();
        while let Some((matched, which)) = stream.next() {
            let capture = matched.captures[*which];
            let position = capture
                .node
                .start_position();
            captures.push(Capture {
                row: position.row,
                column: position.column,
                start: capture
                    .node
                    .start_byte(),
                end: capture
                    .node
                    .end_byte(),
                index: capture.index as usize,
            });
        }

        debug!("collected {} captures", captures.len());
        captures
    }
}
