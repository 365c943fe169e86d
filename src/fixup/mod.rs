//! Repair of `go doc` output into parseable Go fragments.
//!
//! The documentation text looks like Go but is not: prose paragraphs sit
//! between declarations, declarations have no bodies, and nothing is
//! terminated. The rewriter here wraps prose runs in synthesized comment
//! blocks, tracks multi-line brace/paren groups, and inserts blank
//! separators between top-level declarations so the segmenter can cut the
//! result into independently parseable blocks.
//!
//! These are pattern matches over go doc's known output shapes, not a
//! general grammar repair: a paragraph that happens to open with a
//! declaration keyword will be misread as code, and an unbalanced brace
//! inside a string literal will confuse the depth tracking. The grammar
//! downstream is tuned against exactly this behavior.

mod segments;

pub use segments::segments;

/// First words that mark a line as a real declaration rather than prose.
const KEYWORDS: [&str; 5] = ["const", "var", "type", "func", "package"];

/// Rewrite raw documentation text into repaired lines, blank lines
/// included as block separators. Only the last one or two emitted lines
/// are ever mutated retroactively (comment closure and reopening).
pub fn repair(doc: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut in_block = false;
    // Leading-whitespace prefix of the currently open synthesized
    // comment, if any.
    let mut comment: Option<String> = None;

    for raw in doc.split('\n') {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            if let Some(prefix) = comment.take() {
                close(&mut lines, &prefix);
            }
            lines.push(String::new());
            continue;
        }

        let word = trimmed
            .split_whitespace()
            .next()
            .unwrap_or("");

        if !in_block && comment.is_none() && !KEYWORDS.contains(&word) {
            // Prose. The grammar cannot parse it as-is, so it becomes a
            // comment at the line's original indentation, tabs standing
            // in for each four-space run.
            let indent = raw[..raw.len() - raw.trim_start().len()].replace("    ", "\t");

            match reopen(&mut lines) {
                Some(prefix) => {
                    // Merged back into the previous comment; the current
                    // line continues it below.
                    comment = Some(prefix);
                }
                None => {
                    lines.push(format!("{}/* {}", indent, trimmed));
                    comment = Some(indent);
                    continue;
                }
            }
        }

        if let Some(prefix) = &comment {
            let columns =
                prefix.matches(' ').count() + prefix.matches('\t').count() * 4;
            let content = raw.get(columns..).unwrap_or(trimmed);
            lines.push(format!("{} * {}", prefix, content));
            continue;
        }

        if trimmed.ends_with('{') || trimmed.ends_with('(') {
            in_block = true;
        } else if trimmed.starts_with('}') || trimmed.starts_with(')') {
            in_block = false;
        } else if !raw.starts_with(['\t', ' '])
            && lines
                .last()
                .map_or(true, |last| !last.is_empty())
        {
            // Top-level declarations must be blank-separated for the
            // segmenter.
            lines.push(String::new());
        }
        lines.push(raw.to_string());
    }

    // Input can end mid-paragraph; the segmenter flushes that remainder
    // as a block, so the comment has to be terminated here too.
    if let Some(prefix) = comment.take() {
        close(&mut lines, &prefix);
    }

    lines
}

/// Close the synthesized comment at a paragraph boundary. A single-line
/// comment gets its terminator appended in place; otherwise the
/// terminator goes on its own line at the comment's indentation.
fn close(lines: &mut Vec<String>, prefix: &str) {
    match lines.last_mut() {
        Some(last) if last.trim().starts_with("/*") => {
            last.push_str(" */");
        }
        _ => lines.push(format!("{} */", prefix)),
    }
}

/// Reattach to a comment block that a blank line just closed: strip the
/// closing marker (splicing the line out entirely if nothing else is on
/// it) and turn the separating blank into a continuation line. Returns
/// the recovered indentation prefix, or None when the lines above are
/// not a freshly closed comment.
fn reopen(lines: &mut Vec<String>) -> Option<String> {
    let count = lines.len();
    if count <= 2 || !lines[count - 2].ends_with("*/") {
        return None;
    }

    let closed = lines[count - 2].clone();
    let stripped = &closed[..closed.len() - 2];
    if stripped.trim().is_empty() {
        lines.remove(count - 2);
    } else {
        lines[count - 2] = stripped.to_string();
    }

    let star = closed.find('*').unwrap_or(1);
    let prefix = closed[..star.saturating_sub(1)].to_string();
    if let Some(last) = lines.last_mut() {
        *last = format!("{} *", prefix);
    }

    Some(prefix)
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn prose_becomes_comment() {
        let lines = repair("Foo does a thing.\n\n");

        assert_eq!(lines[0], "/* Foo does a thing. */");
        assert_eq!(lines[1], "");
    }

    #[test]
    fn paragraph_closes_at_blank_line() {
        let lines = repair("Alpha beta.\nGamma delta.\n\n");

        assert_eq!(
            lines,
            vec![
                "/* Alpha beta.".to_string(),
                " * Gamma delta.".to_string(),
                " */".to_string(),
                "".to_string(),
                "".to_string(),
            ]
        );
    }

    #[test]
    fn indented_prose_keeps_alignment() {
        let lines = repair("    First sentence.\n    Second sentence.\n\n");

        assert_eq!(lines[0], "\t/* First sentence.");
        assert_eq!(lines[1], "\t * Second sentence.");
        assert_eq!(lines[2], "\t */");
    }

    #[test]
    fn adjacent_paragraphs_reopen_the_comment() {
        let lines = repair("package demo\n\nAlpha.\n\nBeta.\n\n");

        // The closing marker between the two paragraphs is gone; there is
        // exactly one open and one close across the merged comment.
        let text = lines.join("\n");
        assert_eq!(text.matches("/*").count(), 1);
        assert_eq!(text.matches("*/").count(), 1);
        assert!(lines.contains(&" * Beta.".to_string()));
    }

    #[test]
    fn reopening_splices_out_a_lone_terminator() {
        let lines = repair("    Alpha.\n    Beta.\n\n    Gamma.\n\n");

        // The terminator that was alone on its line is gone; only the
        // final close of the merged comment remains, and the separating
        // blank became a bare continuation line.
        let text = lines.join("\n");
        assert_eq!(text.matches("*/").count(), 1);
        assert!(lines.contains(&"\t *".to_string()));
        assert!(lines.contains(&"\t * Gamma.".to_string()));
    }

    #[test]
    fn declarations_pass_through_unmodified() {
        let lines = repair("const Answer = 42\n\n");

        assert!(lines.contains(&"const Answer = 42".to_string()));
        assert!(!lines
            .iter()
            .any(|line| line.contains("/*")));
    }

    #[test]
    fn grouped_declarations_are_not_prose() {
        let lines = repair("var (\n    A = 1\n)\n\n");

        // Lines inside the paren group must not be wrapped as comments
        // even though they start with non-keyword words.
        assert_eq!(
            lines,
            vec![
                "var (".to_string(),
                "    A = 1".to_string(),
                ")".to_string(),
                "".to_string(),
                "".to_string(),
            ]
        );
    }

    #[test]
    fn top_level_declarations_get_separated() {
        let lines = repair("type A int\ntype B int\n\n");

        let text = lines.join("\n");
        assert!(text.contains("type A int\n\ntype B int"));
    }

    #[test]
    fn comment_open_at_end_of_input_is_closed() {
        let lines = repair("Prose at end of input");

        assert_eq!(lines, vec!["/* Prose at end of input */".to_string()]);

        let lines = repair("    First.\n    Second.");

        assert_eq!(
            lines,
            vec![
                "\t/* First.".to_string(),
                "\t * Second.".to_string(),
                "\t */".to_string(),
            ]
        );
    }

    #[test]
    fn every_opened_comment_is_closed() {
        let doc = "Prose one.\n\n    Indented prose.\nMore of it.\n\nfunc literal\n\n";
        let lines = repair(doc);

        let text = lines.join("\n");
        assert_eq!(text.matches("/*").count(), text.matches("*/").count());
        // No open-comment state survives past a blank line: the last
        // non-blank line of each paragraph carries or precedes a close.
        assert!(!text.ends_with("*"));
    }
}
