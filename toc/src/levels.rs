//! Heading level specification (`levels` attribute)

use crate::error::TocError;
use itertools::Itertools;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Default value of the `levels` attribute
pub const DEFAULT_LEVELS: &str = "H1,H2";

static LEVEL_TOKEN: OnceLock<Regex> = OnceLock::new();

fn level_token() -> &'static Regex {
    LEVEL_TOKEN.get_or_init(|| Regex::new(r"^H?([1-6])$").expect("valid level regex"))
}

/// A heading rank, 1 through 6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Canonical tag form, e.g. `H2`
    pub fn tag(self) -> String {
        format!("H{}", self.0)
    }

    /// Level of a heading tag name such as `h3` or `H3`
    pub fn from_tag(tag: &str) -> Option<Self> {
        let digit = tag.strip_prefix(['h', 'H'])?;
        digit.parse::<u8>().ok().and_then(Self::new)
    }

    /// Parse one `levels` token after whitespace removal and upper-casing
    fn from_token(token: &str) -> Result<Self, TocError> {
        level_token()
            .captures(token)
            .and_then(|caps| caps[1].parse::<u8>().ok())
            .and_then(Self::new)
            .ok_or_else(|| TocError::InvalidLevel {
                token: token.to_string(),
            })
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

/// Ordered, duplicate-free set of heading levels to include
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingLevelSpec {
    levels: Vec<HeadingLevel>,
}

impl Default for HeadingLevelSpec {
    fn default() -> Self {
        Self {
            levels: vec![HeadingLevel(1), HeadingLevel(2)],
        }
    }
}

impl HeadingLevelSpec {
    /// Parse a comma-separated list such as `"H1,H2"`, `"1,2"` or `"h1, 3"`
    ///
    /// Whitespace anywhere in the input is dropped and tokens are upper-cased
    /// before matching. Digits map to the tag of the same rank.
    ///
    /// # Returns
    /// * `Ok(HeadingLevelSpec)` - Levels in first-seen order
    /// * `Err(TocError::InvalidLevel)` - A token names no heading tag
    pub fn parse(input: &str) -> Result<Self, TocError> {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        Self::from_tokens(compact.split(','))
    }

    /// Build from already-split tokens (tag names or digits)
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, TocError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let levels: Vec<HeadingLevel> = tokens
            .into_iter()
            .map(|t| {
                let token: String = t
                    .as_ref()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect::<String>()
                    .to_uppercase();
                HeadingLevel::from_token(&token)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            levels: levels.into_iter().unique().collect(),
        })
    }

    pub fn levels(&self) -> &[HeadingLevel] {
        &self.levels
    }

    /// Canonical tag names, e.g. `["H1", "H2"]`
    pub fn tags(&self) -> Vec<String> {
        self.levels.iter().map(|l| l.tag()).collect()
    }

    pub fn contains(&self, level: HeadingLevel) -> bool {
        self.levels.contains(&level)
    }
}

impl fmt::Display for HeadingLevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.levels.iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_and_tags_are_equivalent() {
        let digits = HeadingLevelSpec::parse("1,2").unwrap();
        let tags = HeadingLevelSpec::parse("H1,H2").unwrap();
        assert_eq!(digits, tags);
        assert_eq!(digits.tags(), vec!["H1", "H2"]);
    }

    #[test]
    fn test_whitespace_and_case_are_normalized() {
        let spec = HeadingLevelSpec::parse(" h1 , 3,H 4").unwrap();
        assert_eq!(spec.to_string(), "H1,H3,H4");
    }

    #[test]
    fn test_duplicates_collapse_in_first_seen_order() {
        let spec = HeadingLevelSpec::parse("H3,1,h3,H1").unwrap();
        assert_eq!(spec.to_string(), "H3,H1");
    }

    #[test]
    fn test_invalid_tokens_are_rejected() {
        for input in ["H7", "P", "0", "H1,,H2", "", "12"] {
            let err = HeadingLevelSpec::parse(input).unwrap_err();
            assert!(matches!(err, TocError::InvalidLevel { .. }), "{input}");
        }
    }

    #[test]
    fn test_default_matches_default_attribute() {
        assert_eq!(
            HeadingLevelSpec::default(),
            HeadingLevelSpec::parse(DEFAULT_LEVELS).unwrap()
        );
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(HeadingLevel::from_tag("h3"), HeadingLevel::new(3));
        assert_eq!(HeadingLevel::from_tag("H6"), HeadingLevel::new(6));
        assert_eq!(HeadingLevel::from_tag("hr"), None);
        assert_eq!(HeadingLevel::from_tag("h7"), None);
    }

    #[test]
    fn test_from_tokens_accepts_list() {
        let spec = HeadingLevelSpec::from_tokens(["h2", "3"]).unwrap();
        assert_eq!(spec.tags(), vec!["H2", "H3"]);
    }
}
