//! Document snapshot the widget reads headings from and writes ids into
//!
//! The document is an arena of element and text nodes addressed by [`NodeId`].
//! Elements may carry a layout box in document coordinates, which the page
//! uses for viewport tests and scrolling.

use crate::error::TocError;
use std::sync::atomic::{AtomicU64, Ordering};

mod markdown;
mod selector;

pub use selector::Selector;

/// Handle to a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Identity of a [`Document`], distinct for every document created
///
/// Clones share the identity of the document they were cloned from, since
/// every [`NodeId`] of the original is valid in the clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Layout box in document coordinates (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// The same box shifted by a scroll offset
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Element {
    /// Lower-case tag name
    tag: String,
    /// Attributes other than `class`, in insertion order
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    rect: Option<Rect>,
}

#[derive(Debug, Clone)]
struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// A live document snapshot
///
/// Node lookups with an id from another document yield nothing instead of
/// panicking.
#[derive(Debug, Clone)]
pub struct Document {
    doc_id: DocumentId,
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with an `<html>` root element
    pub fn new() -> Self {
        let mut doc = Self {
            doc_id: DocumentId::next(),
            nodes: Vec::new(),
            root: NodeId(0),
        };
        doc.root = doc.create_element("html");
        doc
    }

    pub fn doc_id(&self) -> DocumentId {
        self.doc_id
    }

    /// Whether `node` addresses a node of this document's arena
    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    /// The document element (`<html>`)
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Language tag of the document element, if set and non-empty
    pub fn lang(&self) -> Option<&str> {
        self.get_attribute(self.root, "lang").filter(|l| !l.is_empty())
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            classes: Vec::new(),
            rect: None,
        }))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Append `child` as the last child of `parent`, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            log::warn!("Ignoring append of {:?} to {:?}: unknown node", child, parent);
            return;
        }
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match self.nodes.get(node.0) {
            Some(data) => &data.children,
            None => &[],
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node.0)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Text(text) => Some(text.as_str()),
            NodeKind::Element(_) => None,
        }
    }

    /// Lower-case tag name, `None` for text nodes
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.tag.as_str())
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        let el = self.element(node)?;
        el.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute; `class` replaces the class list. No-op on text nodes.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(el) = self.element_mut(node) else {
            return;
        };
        let name = name.to_ascii_lowercase();
        if name == "class" {
            el.classes = value.split_whitespace().map(str::to_string).collect();
            return;
        }
        match el.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => el.attributes.push((name, value.to_string())),
        }
    }

    /// The element's id, if present and non-empty
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.get_attribute(node, "id").filter(|id| !id.is_empty())
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.set_attribute(node, "id", id);
    }

    /// Set `data-{key}` on an element
    pub fn set_data(&mut self, node: NodeId, key: &str, value: &str) {
        self.set_attribute(node, &format!("data-{key}"), value);
    }

    pub fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        self.get_attribute(node, &format!("data-{key}"))
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        match self.element(node) {
            Some(el) => &el.classes,
            None => &[],
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    /// Toggle a class. With `force` set, only adds (`Some(true)`) or only
    /// removes (`Some(false)`). Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str, force: Option<bool>) -> bool {
        let present = self.has_class(node, class);
        if force.unwrap_or(!present) {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
        self.has_class(node, class)
    }

    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.element(node).and_then(|el| el.rect)
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(el) = self.element_mut(node) {
            el.rect = Some(rect);
        }
    }

    /// Width and height of the laid-out content (furthest right and bottom edges)
    pub fn content_size(&self) -> (f64, f64) {
        self.nodes
            .iter()
            .filter_map(|n| match &n.kind {
                NodeKind::Element(el) => el.rect,
                NodeKind::Text(_) => None,
            })
            .fold((0.0_f64, 0.0_f64), |(w, h), r| {
                (w.max(r.right()), h.max(r.bottom()))
            })
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, node: NodeId) -> String {
        std::iter::once(node)
            .chain(self.descendants(node))
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// All descendants of `node` in document (pre-)order, excluding `node`
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// First element in document order whose id equals `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|n| self.id(*n) == Some(id))
    }

    /// First element in document order matching a selector
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, TocError> {
        let parsed = Selector::parse(selector)?;
        Ok(std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|n| parsed.matches(self, *n)))
    }

    /// Descendant elements of `container` whose tag is one of `tags`, in document order
    pub fn query_all_by_tags(&self, container: NodeId, tags: &[&str]) -> Vec<NodeId> {
        self.descendants(container)
            .into_iter()
            .filter(|n| {
                self.tag_name(*n)
                    .is_some_and(|tag| tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
            })
            .collect()
    }
}
