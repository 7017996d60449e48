//! Line-by-line flattening of nested key/list text into artifacts
//!
//! The flattener keeps the chain of open header names as an explicit list of
//! segments. A list stays open until the next header (or end of input)
//! closes it; only then is the chain cut back to the new header's depth.

use crate::split::line::Line;
use crate::types::{Artifact, SplitConfig};

/// Streaming parser that turns source lines into closed-list artifacts
pub struct Flattener {
    separator: String,
    indent_unit: String,

    /// Open header names, outermost first
    path: Vec<String>,

    /// Items collected since the current list opened
    pending: Vec<String>,

    /// Whether an item has been seen under the current path
    list_open: bool,
}

impl Flattener {
    pub fn new(config: &SplitConfig) -> Self {
        Flattener {
            separator: config.separator.clone(),
            indent_unit: config.indent_unit(),
            path: Vec::new(),
            pending: Vec::new(),
            list_open: false,
        }
    }

    /// Feed one raw line; returns the artifact it closed, if any
    pub fn push_line(&mut self, raw: &str) -> Option<Artifact> {
        match Line::classify(raw, &self.indent_unit) {
            Line::Header { key, depth } => {
                let closed = if self.list_open {
                    let artifact = self.close();
                    // Vec::truncate keeps everything when depth exceeds the live segments
                    self.path.truncate(depth);
                    artifact
                } else {
                    None
                };

                self.path.push(key.to_string());
                self.pending.clear();
                self.list_open = false;
                closed
            }
            Line::Item(item) => {
                self.list_open = true;
                self.pending.push(item.to_string());
                None
            }
            Line::BlockScalar | Line::Blank | Line::Other => None,
        }
    }

    /// Flush whatever is pending at end of input
    pub fn finish(mut self) -> Option<Artifact> {
        if self.path.is_empty() && !self.list_open {
            return None;
        }
        self.close()
    }

    /// Name the current path would be written under
    pub fn current_name(&self) -> String {
        self.path.join(&self.separator)
    }

    fn close(&mut self) -> Option<Artifact> {
        let lines = std::mem::take(&mut self.pending);
        if self.path.is_empty() {
            log::warn!("Dropping {} item(s) that appear before any header", lines.len());
            return None;
        }

        let artifact = Artifact::new(self.current_name(), lines);
        log::debug!(
            "Closed list {} with {} line(s) at depth {}",
            artifact.name(),
            artifact.lines().len(),
            self.path.len()
        );
        Some(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(input: &str) -> Vec<Artifact> {
        let mut flattener = Flattener::new(&SplitConfig::default());
        let mut artifacts: Vec<Artifact> = input
            .lines()
            .filter_map(|line| flattener.push_line(line))
            .collect();
        artifacts.extend(flattener.finish());
        artifacts
    }

    fn artifact(name: &str, lines: &[&str]) -> Artifact {
        Artifact::new(name, lines.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_empty_source() {
        assert!(flatten("").is_empty());
        assert!(flatten("\n   \n\n").is_empty());
    }

    #[test]
    fn test_single_list() {
        let input = "colors:\n    - red\n    - green\n";
        assert_eq!(flatten(input), vec![artifact("colors", &["red", "green"])]);
    }

    #[test]
    fn test_depth_truncation() {
        let input = "\
a:
    - x
b:
    c:
        - y
d:
";
        assert_eq!(
            flatten(input),
            vec![
                artifact("a", &["x"]),
                artifact("b_c", &["y"]),
                artifact("d", &[]),
            ]
        );
    }

    #[test]
    fn test_sibling_lists_share_parent() {
        let input = "\
colors:
    warm:
        - red
        - orange
    cold:
        - blue
";
        assert_eq!(
            flatten(input),
            vec![
                artifact("colors_warm", &["red", "orange"]),
                artifact("colors_cold", &["blue"]),
            ]
        );
    }

    #[test]
    fn test_headers_without_items_stack_up() {
        // No list was open when `b:` arrived, so nothing was cut
        let input = "a:\nb:\n    - x\n";
        assert_eq!(flatten(input), vec![artifact("a_b", &["x"])]);
    }

    #[test]
    fn test_depth_beyond_live_segments_keeps_whole_path() {
        let input = "\
a:
    - x
            deep:
                - y
";
        assert_eq!(
            flatten(input),
            vec![artifact("a", &["x"]), artifact("a_deep", &["y"])]
        );
    }

    #[test]
    fn test_block_scalar_does_not_open_a_list() {
        let input = "\
a:
    - something>-
b:
    - kept
";
        // `a` never opened a list, so `b` nests under it
        assert_eq!(flatten(input), vec![artifact("a_b", &["kept"])]);
    }

    #[test]
    fn test_block_scalar_inside_list_is_dropped() {
        let input = "a:\n    - one\n    - two >-\n    - three\n";
        assert_eq!(flatten(input), vec![artifact("a", &["one", "three"])]);
    }

    #[test]
    fn test_other_lines_ignored() {
        let input = "a:\n    # note\n    - one\n    plain text\n    k: v\n    - two\n";
        assert_eq!(flatten(input), vec![artifact("a", &["one", "two"])]);
    }

    #[test]
    fn test_keys_containing_separator_stay_whole() {
        let input = "\
my_group:
    first:
        - 1
    second:
        - 2
";
        assert_eq!(
            flatten(input),
            vec![
                artifact("my_group_first", &["1"]),
                artifact("my_group_second", &["2"]),
            ]
        );
    }

    #[test]
    fn test_items_before_any_header_are_dropped() {
        let input = "- orphan\na:\n    - x\n";
        assert_eq!(flatten(input), vec![artifact("a", &["x"])]);
        assert!(flatten("- orphan\n").is_empty());
    }

    #[test]
    fn test_custom_separator() {
        let config = SplitConfig {
            separator: "-".to_string(),
            ..SplitConfig::default()
        };
        let mut flattener = Flattener::new(&config);
        for line in ["a:", "    b:", "        - x"] {
            assert!(flattener.push_line(line).is_none());
        }
        assert_eq!(flattener.current_name(), "a-b");
        assert_eq!(flattener.finish(), Some(artifact("a-b", &["x"])));
    }

    #[test]
    fn test_artifact_count_matches_closing_events() {
        let input = "\
a:
    - 1
b:
    - 2
c:
    - 3
";
        let artifacts = flatten(input);
        // Two header-after-list transitions plus the final flush
        assert_eq!(artifacts.len(), 3);
        let names: Vec<&str> = artifacts.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
