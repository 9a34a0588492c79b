//! Pattern-based buffer predicates for disabling the statusline or forcing
//! the inactive layout.

use regex_lite::Regex;
use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error as _;

use crate::host::BufferInfo;

const FORCE_INACTIVE_FILETYPES: &[&str] = &[
    "^NvimTree$",
    "^packer$",
    "^startify$",
    "^fugitive$",
    "^fugitiveblame$",
    "^qf$",
    "^help$",
];
const FORCE_INACTIVE_BUFTYPES: &[&str] = &["^terminal$"];

/// An unanchored regular expression.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, regex_lite::Error> {
        Regex::new(pattern).map(Pattern)
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pattern = String::deserialize(deserializer)?;
        Pattern::new(&pattern)
            .map_err(|err| D::Error::custom(format!("invalid pattern `{pattern}`: {err}")))
    }
}

/// Matches a buffer when any pattern in any list matches the corresponding
/// buffer fact.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BufferPolicy {
    pub filetypes: Vec<Pattern>,
    pub buftypes: Vec<Pattern>,
    pub bufnames: Vec<Pattern>,
}

impl BufferPolicy {
    /// Plugin and help windows that should always look inactive.
    pub fn default_force_inactive() -> Self {
        Self {
            filetypes: compile(FORCE_INACTIVE_FILETYPES),
            buftypes: compile(FORCE_INACTIVE_BUFTYPES),
            bufnames: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filetypes.is_empty() && self.buftypes.is_empty() && self.bufnames.is_empty()
    }

    pub fn matches(&self, buffer: &BufferInfo) -> bool {
        any_match(&self.filetypes, &buffer.filetype)
            || any_match(&self.buftypes, &buffer.buftype)
            || any_match(&self.bufnames, &buffer.name)
    }
}

fn any_match(patterns: &[Pattern], value: &str) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(value))
}

fn compile(patterns: &[&str]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|pattern| Pattern::new(pattern).ok())
        .collect()
}
