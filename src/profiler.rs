//! Typed tree for the indented `Key: Value` text printed by `system_profiler`.
//!
//! Every section parser projects out of this one shape instead of scanning raw
//! lines on its own. Entry order and duplicate keys are preserved, since
//! several volumes or devices may share a name.

/// A node in the profiler tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfilerValue {
    Leaf(String),
    Block(ProfilerBlock),
}

/// An ordered group of entries at one indentation level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilerBlock {
    entries: Vec<(String, ProfilerValue)>,
}

struct Line<'a> {
    indent: usize,
    key: &'a str,
    value: Option<&'a str>,
}

impl ProfilerBlock {
    /// Parse raw `system_profiler` output. Never fails: lines that are not
    /// `key: value` pairs or block headers are skipped.
    pub fn parse(text: &str) -> Self {
        let lines = tokenize(text);
        let mut pos = 0;
        build(&lines, &mut pos, None)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ProfilerValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Direct child leaf with a non-empty value.
    pub fn leaf(&self, key: &str) -> Option<&str> {
        self.entries().find_map(|(k, v)| match v {
            ProfilerValue::Leaf(value) if k == key && !value.is_empty() => Some(value.as_str()),
            _ => None,
        })
    }

    /// First of several candidate keys that is present as a direct leaf.
    pub fn leaf_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.leaf(key))
    }

    /// Direct child block.
    pub fn block(&self, key: &str) -> Option<&ProfilerBlock> {
        self.blocks().find(|(k, _)| *k == key).map(|(_, block)| block)
    }

    /// Direct child blocks in source order.
    pub fn blocks(&self) -> impl Iterator<Item = (&str, &ProfilerBlock)> {
        self.entries().filter_map(|(key, value)| match value {
            ProfilerValue::Block(block) => Some((key, block)),
            ProfilerValue::Leaf(_) => None,
        })
    }

    /// Depth-first search for a leaf anywhere below this block.
    pub fn find_leaf(&self, key: &str) -> Option<&str> {
        if let Some(value) = self.leaf(key) {
            return Some(value);
        }
        self.blocks().find_map(|(_, block)| block.find_leaf(key))
    }

    /// Every non-empty leaf with this key, depth-first.
    pub fn find_leaves(&self, key: &str) -> Vec<&str> {
        let mut found = Vec::new();
        self.collect_leaves(key, &mut found);
        found
    }

    fn collect_leaves<'a>(&'a self, key: &str, found: &mut Vec<&'a str>) {
        for (k, value) in self.entries() {
            match value {
                ProfilerValue::Leaf(v) if k == key && !v.is_empty() => found.push(v),
                ProfilerValue::Block(block) => block.collect_leaves(key, found),
                ProfilerValue::Leaf(_) => {}
            }
        }
    }

    /// Depth-first search for a block anywhere below this block.
    pub fn find_block(&self, key: &str) -> Option<&ProfilerBlock> {
        if let Some(block) = self.block(key) {
            return Some(block);
        }
        self.blocks().find_map(|(_, block)| block.find_block(key))
    }

    /// Descend through single top-level wrapper blocks (`Hardware:` ->
    /// `Hardware Overview:`) until a block with more than one child or with
    /// leaves is reached.
    pub fn unwrap_single(&self) -> &ProfilerBlock {
        let mut current = self;
        while current.entries.len() == 1 {
            match &current.entries[0].1 {
                ProfilerValue::Block(inner) => current = inner,
                ProfilerValue::Leaf(_) => break,
            }
        }
        current
    }
}

fn indent_width(raw: &str) -> usize {
    raw.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

fn tokenize(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (key, value) = if let Some((key, value)) = trimmed.split_once(": ") {
            (key.trim(), Some(value.trim()))
        } else if let Some(key) = trimmed.strip_suffix(':') {
            (key.trim(), None)
        } else {
            continue;
        };

        if key.is_empty() {
            continue;
        }
        lines.push(Line {
            indent: indent_width(raw),
            key,
            value,
        });
    }
    lines
}

fn build(lines: &[Line<'_>], pos: &mut usize, parent_indent: Option<usize>) -> ProfilerBlock {
    let mut block = ProfilerBlock::default();
    while let Some(line) = lines.get(*pos) {
        if parent_indent.is_some_and(|parent| line.indent <= parent) {
            break;
        }
        *pos += 1;

        let value = match line.value {
            Some(value) => ProfilerValue::Leaf(value.to_string()),
            None => match lines.get(*pos) {
                Some(next) if next.indent > line.indent => {
                    ProfilerValue::Block(build(lines, pos, Some(line.indent)))
                }
                _ => ProfilerValue::Leaf(String::new()),
            },
        };
        block.entries.push((line.key.to_string(), value));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
Hardware:

    Hardware Overview:

      Model Name: MacBook Pro
      Model Identifier: Mac14,9
      Chip: Apple M2 Pro
      Activation Lock Status:
      Displays:
        Color LCD:
          Resolution: 3024 x 1964 Retina
          Connection Type: Internal
      Ethernet Address: a4:83:e7:01:02:03
stray line without a colon
";

    #[test]
    fn builds_nested_blocks() {
        let tree = ProfilerBlock::parse(SAMPLE);
        let overview = tree
            .block("Hardware")
            .and_then(|hw| hw.block("Hardware Overview"))
            .unwrap();
        assert_eq!(overview.leaf("Model Name"), Some("MacBook Pro"));
        assert_eq!(overview.leaf("Chip"), Some("Apple M2 Pro"));

        let lcd = overview.block("Displays").and_then(|d| d.block("Color LCD")).unwrap();
        assert_eq!(lcd.leaf("Resolution"), Some("3024 x 1964 Retina"));
    }

    #[test]
    fn header_without_children_is_empty_leaf() {
        let tree = ProfilerBlock::parse(SAMPLE);
        let overview = tree.find_block("Hardware Overview").unwrap();
        assert_eq!(overview.leaf("Activation Lock Status"), None);
        assert!(overview
            .entries()
            .any(|(k, v)| k == "Activation Lock Status" && *v == ProfilerValue::Leaf(String::new())));
    }

    #[test]
    fn values_keep_embedded_colons() {
        let tree = ProfilerBlock::parse(SAMPLE);
        assert_eq!(tree.find_leaf("Ethernet Address"), Some("a4:83:e7:01:02:03"));
    }

    #[test]
    fn unwrap_single_skips_wrappers() {
        let tree = ProfilerBlock::parse(SAMPLE);
        assert_eq!(tree.unwrap_single().leaf("Model Identifier"), Some("Mac14,9"));
    }

    #[test]
    fn garbage_yields_empty_tree() {
        assert!(ProfilerBlock::parse("").is_empty());
        assert!(ProfilerBlock::parse("no structure here\nat all").is_empty());
    }

    #[test]
    fn duplicate_keys_are_preserved_in_order() {
        let text = "Storage:\n\n    Data:\n      Capacity: 1 GB\n    Data:\n      Capacity: 2 GB\n";
        let tree = ProfilerBlock::parse(text);
        let caps: Vec<_> = tree.find_leaves("Capacity");
        assert_eq!(caps, vec!["1 GB", "2 GB"]);
    }
}
