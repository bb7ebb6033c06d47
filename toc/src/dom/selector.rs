//! Selector subset used to resolve the widget's `src` container
//!
//! Supports compound selectors made of an optional tag name (or `*`), `#id`
//! and `.class` parts, chained with the descendant combinator.

use super::{Document, NodeId};
use crate::error::TocError;

/// One compound selector, e.g. `article#post.content`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(tag) = doc.tag_name(node) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| t != tag) {
            return false;
        }
        if self.id.is_some() && doc.id(node) != self.id.as_deref() {
            return false;
        }
        self.classes.iter().all(|c| doc.has_class(node, c))
    }
}

/// A parsed selector: compounds joined by descendant combinators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

impl Selector {
    /// Parse a selector string
    ///
    /// # Returns
    /// * `Ok(Selector)` - The parsed selector
    /// * `Err(TocError::InvalidSelector)` - Empty input or unsupported syntax
    pub fn parse(input: &str) -> Result<Self, TocError> {
        let invalid = || TocError::InvalidSelector {
            selector: input.to_string(),
        };

        let compounds = input
            .split_whitespace()
            .map(|part| Self::parse_compound(part).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()?;

        if compounds.is_empty() {
            return Err(invalid());
        }
        Ok(Self { compounds })
    }

    fn parse_compound(part: &str) -> Option<Compound> {
        let mut compound = Compound::default();
        let mut rest = part;

        if let Some(after) = rest.strip_prefix('*') {
            rest = after;
        } else {
            let end = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
            if end > 0 {
                compound.tag = Some(rest[..end].to_ascii_lowercase());
                rest = &rest[end..];
            }
        }

        while let Some(marker) = rest.chars().next() {
            let body = &rest[marker.len_utf8()..];
            let end = body.find(|c: char| !is_ident_char(c)).unwrap_or(body.len());
            if end == 0 {
                return None;
            }
            let name = body[..end].to_string();
            match marker {
                '#' if compound.id.is_none() => compound.id = Some(name),
                '.' => compound.classes.push(name),
                _ => return None,
            }
            rest = &body[end..];
        }

        Some(compound)
    }

    /// Whether `node` matches this selector within `doc`
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some((last, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(doc, node) {
            return false;
        }

        let mut remaining = ancestors.iter().rev().peekable();
        let mut current = doc.parent(node);
        while let Some(compound) = remaining.peek() {
            let Some(candidate) = current else {
                return false;
            };
            if compound.matches(doc, candidate) {
                remaining.next();
            }
            current = doc.parent(candidate);
        }
        true
    }
}
