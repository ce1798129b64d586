//! Line-start indexing for fast line/column lookup in script sources.

/// Precomputed line starts of a source text.
///
/// Built once per file so that every call site found by the scanner can be
/// resolved to a 1-indexed `(line, column)` pair with a binary search.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<u32>,
}

impl LineIndex {
    /// Indexes the line starts of `content`.
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, byte) in content.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset into 1-indexed (line, column) coordinates.
    ///
    /// Columns count bytes, not characters.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }
}
