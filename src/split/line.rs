//! Classification of raw source lines

/// Marker that opens a list entry
const ITEM_MARKER: &str = "- ";

/// Block-scalar indicator; entries ending with it are not supported
const BLOCK_SCALAR: &str = ">-";

/// One source line, classified by its trimmed shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Nothing but whitespace
    Blank,

    /// `key:` introducing a nesting level
    Header { key: &'a str, depth: usize },

    /// `- value` list entry
    Item(&'a str),

    /// `- ... >-` entry, dropped without opening a list
    BlockScalar,

    /// Anything outside the key/list grammar
    Other,
}

impl<'a> Line<'a> {
    /// Classify `raw`, measuring header depth in units of `indent_unit`
    pub fn classify(raw: &'a str, indent_unit: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Line::Blank;
        }

        if let Some(key) = trimmed.strip_suffix(':') {
            return Line::Header {
                key,
                depth: depth_of(raw, indent_unit),
            };
        }

        if let Some(item) = trimmed.strip_prefix(ITEM_MARKER) {
            if item.ends_with(BLOCK_SCALAR) {
                return Line::BlockScalar;
            }
            return Line::Item(item);
        }

        Line::Other
    }
}

/// Count the non-overlapping indent units in the leading whitespace of `raw`
pub fn depth_of(raw: &str, indent_unit: &str) -> usize {
    let indent = &raw[..raw.len() - raw.trim_start().len()];
    indent.matches(indent_unit).count()
}
