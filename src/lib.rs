//! Syntax highlighting for `go doc` output.
//!
//! `go doc` prints something that looks like Go source but isn't: prose
//! paragraphs sit next to bodyless declarations, with nothing terminated
//! the way a compiler would want. The pipeline here repairs that text into
//! parseable fragments, feeds each blank-line-bounded block to tree-sitter,
//! and renders the resulting captures as colourized chunks on the terminal.

pub mod fixup;
pub mod godoc;
pub mod highlighting;
pub mod parsing;
pub mod rendering;
