//! Nested list tree built from a container's headings
//!
//! The tree is a description of the `<ul class="content">` output: lists hold
//! link items and nested lists in document order. Nesting depth follows the
//! relative change between consecutive headings, one list level per step.

use crate::config::TocItem;
use crate::dom::{Document, NodeId};
use crate::levels::{HeadingLevel, HeadingLevelSpec};

/// A link to a heading (or to a directly supplied item)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocLink {
    /// Target element id (without `#`)
    pub id: String,
    /// Link text
    pub text: String,
    /// Heading level, `None` for directly supplied items
    pub level: Option<HeadingLevel>,
}

impl TocLink {
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

/// An entry of a [`ListNode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChild {
    Item(TocLink),
    List(ListNode),
}

/// A list container (`<ul>`) and its nested children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListNode {
    pub children: Vec<ListChild>,
}

impl ListNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of links in this list and all nested lists
    pub fn len(&self) -> usize {
        self.children
            .iter()
            .map(|c| match c {
                ListChild::Item(_) => 1,
                ListChild::List(list) => list.len(),
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All links in document order
    pub fn links(&self) -> Vec<&TocLink> {
        self.links_with_depth().into_iter().map(|(_, l)| l).collect()
    }

    /// Nesting depth of each link in document order (root list is depth 0)
    pub fn depths(&self) -> Vec<usize> {
        self.links_with_depth().into_iter().map(|(d, _)| d).collect()
    }

    fn links_with_depth(&self) -> Vec<(usize, &TocLink)> {
        let mut out = Vec::new();
        self.collect(0, &mut out);
        out
    }

    fn collect<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a TocLink)>) {
        for child in &self.children {
            match child {
                ListChild::Item(link) => out.push((depth, link)),
                ListChild::List(list) => list.collect(depth + 1, out),
            }
        }
    }
}

/// An open list during construction, tagged with the level that opened it
struct OpenList {
    level: u8,
    list: ListNode,
}

/// Stack of open lists; the bottom entry is the root list
struct ListCursor {
    stack: Vec<OpenList>,
}

impl ListCursor {
    /// Root level matches the initial "last level" of 1
    fn new() -> Self {
        Self {
            stack: vec![OpenList {
                level: 1,
                list: ListNode::new(),
            }],
        }
    }

    fn top_level(&self) -> u8 {
        self.stack.last().map_or(1, |open| open.level)
    }

    /// Close open lists deeper than `level`, then open one list if `level` is
    /// still deeper than the current list
    fn seek(&mut self, level: u8) {
        while self.stack.len() > 1 && level < self.top_level() {
            self.close();
        }
        if level > self.top_level() {
            self.stack.push(OpenList {
                level,
                list: ListNode::new(),
            });
        }
    }

    fn close(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        if let Some(done) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.list.children.push(ListChild::List(done.list));
            }
        }
    }

    fn push(&mut self, link: TocLink) {
        if let Some(open) = self.stack.last_mut() {
            open.list.children.push(ListChild::Item(link));
        }
    }

    fn finish(mut self) -> ListNode {
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack.pop().map(|open| open.list).unwrap_or_default()
    }
}

/// Pick an id for a heading without one: `h{level}-{index}`, suffixed with
/// `-{n}` while another element already owns it
fn synthesize_id(doc: &Document, level: HeadingLevel, index: usize) -> String {
    let base = format!("h{}-{}", level.get(), index);
    let mut candidate = base.clone();
    let mut n = 1;
    while doc.get_element_by_id(&candidate).is_some() {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    candidate
}

/// Scan `container` for headings in `levels` and build the nested list
///
/// Every matched heading ends with a non-empty id (an existing id is kept)
/// and a `data-lvl` attribute. Each build starts from a fresh root list.
pub fn build_heading_list(
    doc: &mut Document,
    container: NodeId,
    levels: &HeadingLevelSpec,
) -> ListNode {
    let tags = levels.tags();
    let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();
    let headings = doc.query_all_by_tags(container, &tag_refs);
    log::debug!(
        "Building table of contents from {} headings ({})",
        headings.len(),
        levels
    );

    let mut cursor = ListCursor::new();
    for (index, heading) in headings.into_iter().enumerate() {
        let Some(level) = doc.tag_name(heading).and_then(HeadingLevel::from_tag) else {
            continue;
        };

        let id = match doc.id(heading) {
            Some(existing) => existing.to_string(),
            None => {
                let id = synthesize_id(doc, level, index);
                doc.set_id(heading, &id);
                id
            }
        };
        doc.set_data(heading, "lvl", &level.get().to_string());

        let text = doc.text_content(heading);
        cursor.seek(level.get());
        cursor.push(TocLink {
            id,
            text,
            level: Some(level),
        });
    }

    cursor.finish()
}

/// Flat list of directly supplied items, in input order
pub fn build_item_list(items: &[TocItem]) -> ListNode {
    ListNode {
        children: items
            .iter()
            .map(|item| {
                ListChild::Item(TocLink {
                    id: item.id.clone(),
                    text: item.title.clone(),
                    level: None,
                })
            })
            .collect(),
    }
}
