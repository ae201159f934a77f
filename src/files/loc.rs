//! Line-of-code counting
//!
//! Classifies each line of a source file as code, comment, or blank.
//! Tracks `//` line comments and `/* ... */` block comments; a line
//! holding both code and a trailing comment counts as code.

use crate::models::LocStats;

/// Count lines in `content`, classifying each as code, comment, or blank.
pub fn count_lines(content: &str) -> LocStats {
    let mut stats = LocStats::default();
    let mut in_block_comment = false;

    for line in content.lines() {
        stats.total += 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            stats.blank += 1;
            continue;
        }

        if in_block_comment {
            stats.comment += 1;
            if trimmed.contains("*/") {
                in_block_comment = false;
            }
            continue;
        }

        if trimmed.starts_with("//") {
            stats.comment += 1;
            continue;
        }

        if trimmed.starts_with("/*") {
            stats.comment += 1;
            if !trimmed.contains("*/") {
                in_block_comment = true;
            }
            continue;
        }

        stats.code += 1;
        // A block comment opened mid-line spills over to following lines.
        if let Some(pos) = trimmed.rfind("/*") {
            if !trimmed[pos..].contains("*/") {
                in_block_comment = true;
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_basic_mix() {
        let src = "const a = 1;\n\n// comment\nconst b = 2;\n";
        let stats = count_lines(src);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.code, 2);
        assert_eq!(stats.comment, 1);
        assert_eq!(stats.blank, 1);
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let src = "/*\n * docs\n */\nconst a = 1;\n";
        let stats = count_lines(src);
        assert_eq!(stats.comment, 3);
        assert_eq!(stats.code, 1);
    }

    #[test]
    fn test_trailing_comment_counts_as_code() {
        let src = "const a = 1; // inline\n";
        let stats = count_lines(src);
        assert_eq!(stats.code, 1);
        assert_eq!(stats.comment, 0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(count_lines(""), LocStats::default());
    }
}
