#![forbid(unsafe_code)]

//! Byte offset to line/column conversion

/// Precomputed line start offsets for one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Line 0 starts at offset 0; every `\n` starts a new line.
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert byte offset to line and column numbers (1-indexed)
    ///
    /// Uses binary search on the precomputed line starts.
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let line_idx = self
            .line_starts
            .partition_point(|&o| o <= offset)
            .saturating_sub(1);

        let line = (line_idx + 1) as u32;
        let col = (offset - self.line_starts[line_idx] + 1) as u32;

        (line, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_starts() {
        assert_eq!(LineIndex::new("a\nbc\n").line_starts, vec![0, 2, 5]);
        assert_eq!(LineIndex::new("").line_starts, vec![0]);
        assert_eq!(LineIndex::new("single line").line_starts, vec![0]);
    }

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("line1\nline2\nline3");

        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(4), (1, 5));
        // Newline belongs to the line it ends
        assert_eq!(index.line_col(5), (1, 6));
        assert_eq!(index.line_col(6), (2, 1));
        assert_eq!(index.line_col(12), (3, 1));
    }
}
