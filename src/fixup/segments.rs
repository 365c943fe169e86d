//! Splitting repaired text into independently parseable blocks.

/// Cut repaired lines into blocks at blank-line boundaries, each block
/// keeping its trailing blank. Parsing the whole document at once loses
/// highlighting partway through, because accumulated malformed constructs
/// desynchronize the grammar; re-anchoring at every blank line bounds the
/// blast radius of any one bad fragment to a single paragraph.
pub fn segments(lines: &[String]) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut buffer = String::new();

    for line in lines {
        buffer.push_str(line);
        buffer.push('\n');
        if line.is_empty() {
            blocks.push(std::mem::take(&mut buffer));
        }
    }

    // Input not ending in a blank line still forms a final block.
    if !buffer.is_empty() {
        blocks.push(buffer);
    }

    blocks
}

#[cfg(test)]
mod check {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter()
            .map(|line| line.to_string())
            .collect()
    }

    #[test]
    fn blocks_end_at_blank_lines() {
        let blocks = segments(&lines(&["const A = 1", "", "const B = 2", ""]));

        assert_eq!(blocks, vec!["const A = 1\n\n", "const B = 2\n\n"]);
    }

    #[test]
    fn one_paragraph_per_block() {
        let blocks = segments(&lines(&["var (", "\tA = 1", ")", "", "type T int", ""]));

        for block in &blocks {
            // The only blank-terminated paragraph in each block is the
            // block itself.
            assert_eq!(block.matches("\n\n").count(), 1);
            assert!(block.ends_with("\n\n"));
        }
    }

    #[test]
    fn concatenation_reproduces_the_text() {
        let repaired = lines(&["/* Prose. */", "", "const A = 1", "", "func literal"]);
        let blocks = segments(&repaired);

        assert_eq!(blocks.concat(), repaired.join("\n") + "\n");
    }

    #[test]
    fn trailing_content_is_flushed() {
        let blocks = segments(&lines(&["const A = 1"]));

        assert_eq!(blocks, vec!["const A = 1\n"]);
    }
}
