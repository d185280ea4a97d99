//! Birth/survival rules for life-like automata.
//!
//! A rule is two sets of neighbor counts: a dead cell with a count in
//! `births` comes alive, a live cell with a count in `survivals` stays alive.
//! Everything else is dead in the next generation.

use std::collections::{BTreeMap, BTreeSet};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Parsed birth/survival predicates.
///
/// Rule strings are parsed permissively: a token whose leading letter is
/// neither `B` nor `S` is kept under that letter in [`RuleSet::extra`] and
/// never consulted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Neighbor counts that bring a dead cell to life.
    #[serde(default)]
    births: BTreeSet<u8>,

    /// Neighbor counts that keep a live cell alive.
    #[serde(default)]
    survivals: BTreeSet<u8>,

    /// Tables keyed by unrecognized leading letters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    extra: BTreeMap<char, BTreeSet<u8>>,
}

impl RuleSet {
    /// Create a rule set from explicit birth and survival counts.
    pub fn new(
        births: impl IntoIterator<Item = u8>,
        survivals: impl IntoIterator<Item = u8>,
    ) -> Self {
        Self {
            births: births.into_iter().collect(),
            survivals: survivals.into_iter().collect(),
            extra: BTreeMap::new(),
        }
    }

    /// Conway's Game of Life, `B3/S23`.
    pub fn conway() -> Self {
        Self::new([3], [2, 3])
    }

    /// Resolve a rule specification into a rule set.
    pub fn from_spec(spec: RuleSpec) -> Self {
        match spec {
            RuleSpec::Structured(rules) => rules,
            RuleSpec::Text(text) => Self::parse(&text),
            RuleSpec::Default => Self::conway(),
        }
    }

    /// Parse a `/`-separated rule string such as `B3/S23`.
    ///
    /// Parsing never fails. Each token contributes every digit after its
    /// leading letter to the table named by that letter (case-insensitive).
    pub fn parse(input: &str) -> Self {
        let mut rules = Self::new([], []);
        let upper = input.to_uppercase();

        for token in upper.split('/') {
            let mut chars = token.trim().chars();
            let Some(key) = chars.next() else {
                continue;
            };

            let table = match key {
                'B' => &mut rules.births,
                'S' => &mut rules.survivals,
                other => rules.extra.entry(other).or_default(),
            };
            table.extend(
                chars
                    .filter_map(|c| c.to_digit(10))
                    .map(|digit| digit as u8),
            );
        }

        rules
    }

    /// Whether a dead cell with `neighbors` live neighbors is born.
    pub fn is_birth(&self, neighbors: u8) -> bool {
        self.births.contains(&neighbors)
    }

    /// Whether a live cell with `neighbors` live neighbors survives.
    pub fn is_survival(&self, neighbors: u8) -> bool {
        self.survivals.contains(&neighbors)
    }

    pub fn births(&self) -> &BTreeSet<u8> {
        &self.births
    }

    pub fn survivals(&self) -> &BTreeSet<u8> {
        &self.survivals
    }

    /// Tables collected under unrecognized leading letters.
    pub fn extra(&self) -> &BTreeMap<char, BTreeSet<u8>> {
        &self.extra
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::conway()
    }
}

impl FromStr for RuleSet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn digits(set: &BTreeSet<u8>) -> String {
            set.iter().map(|n| n.to_string()).collect()
        }

        write!(f, "B{}/S{}", digits(&self.births), digits(&self.survivals))?;
        for (key, set) in &self.extra {
            write!(f, "/{}{}", key, digits(set))?;
        }
        Ok(())
    }
}

/// How the rules of an automaton are specified.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    /// Rule notation such as `B36/S23`.
    Text(String),

    /// An already-built rule set.
    Structured(RuleSet),

    /// Conway's rule.
    #[default]
    Default,
}

impl From<&str> for RuleSpec {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<RuleSet> for RuleSpec {
    fn from(rules: RuleSet) -> Self {
        Self::Structured(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[u8]) -> BTreeSet<u8> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_parse_conway() {
        let rules = RuleSet::parse("B3/S23");
        assert_eq!(rules.births(), &set(&[3]));
        assert_eq!(rules.survivals(), &set(&[2, 3]));
        assert_eq!(rules, RuleSet::conway());
    }

    #[test]
    fn test_parse_any_order_and_case() {
        let rules = RuleSet::parse("s23/b36");
        assert_eq!(rules.births(), &set(&[3, 6]));
        assert_eq!(rules.survivals(), &set(&[2, 3]));
    }

    #[test]
    fn test_parse_digit_sets_are_order_independent() {
        for (text, births, survivals) in [
            ("B1357/S1357", &[1, 3, 5, 7][..], &[1, 3, 5, 7][..]),
            ("B3678/S34678", &[3, 6, 7, 8], &[3, 4, 6, 7, 8]),
            ("B63/S32", &[3, 6], &[2, 3]),
            ("B2/S", &[2], &[]),
        ] {
            let rules = RuleSet::parse(text);
            assert_eq!(rules.births(), &set(births), "births of {text}");
            assert_eq!(rules.survivals(), &set(survivals), "survivals of {text}");
        }
    }

    #[test]
    fn test_parse_is_permissive() {
        let rules = RuleSet::parse(" B3 / x12 / S2a3 //");
        assert_eq!(rules.births(), &set(&[3]));
        assert_eq!(rules.survivals(), &set(&[2, 3]));
        assert_eq!(rules.extra().get(&'X'), Some(&set(&[1, 2])));
    }

    #[test]
    fn test_predicates() {
        let rules = RuleSet::conway();
        assert!(rules.is_birth(3));
        assert!(!rules.is_birth(2));
        assert!(rules.is_survival(2));
        assert!(rules.is_survival(3));
        assert!(!rules.is_survival(4));
        assert!(!rules.is_survival(0));
    }

    #[test]
    fn test_from_spec() {
        assert_eq!(RuleSet::from_spec(RuleSpec::Default), RuleSet::conway());
        assert_eq!(
            RuleSet::from_spec("B36/S23".into()),
            RuleSet::new([3, 6], [2, 3])
        );
        let highlife = RuleSet::new([3, 6], [2, 3]);
        assert_eq!(RuleSet::from_spec(highlife.clone().into()), highlife);
    }

    #[test]
    fn test_display_notation() {
        assert_eq!(RuleSet::parse("S32/B3").to_string(), "B3/S23");
        assert_eq!(RuleSet::parse("B3/S23/Q9").to_string(), "B3/S23/Q9");
    }

    #[test]
    fn test_structured_missing_tables_default_empty() {
        let rules: RuleSet = serde_json::from_str(r#"{"births":[3]}"#).unwrap();
        assert_eq!(rules.births(), &set(&[3]));
        assert!(rules.survivals().is_empty());

        let spec: RuleSpec = serde_json::from_str(r#""B2/S""#).unwrap();
        assert_eq!(spec, RuleSpec::Text("B2/S".into()));
    }
}
