//! Trim sets and the remap table derived from a [`Config`].

use crate::Config;
use std::collections::{HashMap, HashSet};

/// Lookup tables built once from the trim and remap strings of a configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tables {
    leading: HashSet<char>,
    trailing: HashSet<char>,
    remap: HashMap<char, char>,
}

impl Tables {
    pub fn new(config: &Config) -> Tables {
        let leading = config
            .around_trim
            .chars()
            .chain(config.leading_trim.chars())
            .collect();
        let trailing = config
            .around_trim
            .chars()
            .chain(config.trailing_trim.chars())
            .collect();
        let chars: Vec<char> = config.remap.chars().collect();
        let remap = chars
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        Tables {
            leading,
            trailing,
            remap,
        }
    }

    #[inline]
    pub fn is_leading_trim(&self, c: char) -> bool {
        self.leading.contains(&c)
    }

    #[inline]
    pub fn is_trailing_trim(&self, c: char) -> bool {
        self.trailing.contains(&c)
    }

    #[inline]
    pub fn remap(&self, c: char) -> char {
        self.remap.get(&c).copied().unwrap_or(c)
    }

    /// Removes the longest suffix of `cell` made of trailing trim characters.
    pub fn trim_end(&self, cell: &mut String) {
        let keep = cell
            .char_indices()
            .rev()
            .find(|(_, c)| !self.is_trailing_trim(*c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        cell.truncate(keep);
    }
}
