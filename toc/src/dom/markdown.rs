//! Build a document snapshot from Markdown
//!
//! Converts pulldown-cmark's event stream into elements under
//! `<main><article class="content">`, then stacks the article's blocks
//! vertically so every block, nested ones included, has a layout box.

use super::{Document, NodeId, Rect};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

/// Width of the laid-out content column
pub const CONTENT_WIDTH: f64 = 800.0;

/// Height of a heading block
const HEADING_HEIGHT: f64 = 48.0;

/// Height of one line of body text
const LINE_HEIGHT: f64 = 24.0;

/// Vertical gap between blocks
const BLOCK_GAP: f64 = 16.0;

/// Horizontal inset of blocks nested in quotes, lists and tables
const NESTED_INDENT: f64 = 24.0;

/// Rough characters per line used to estimate paragraph height
const CHARS_PER_LINE: usize = 90;

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

fn is_heading(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn is_block(tag: &str) -> bool {
    is_heading(tag)
        || matches!(
            tag,
            "p" | "blockquote" | "pre" | "ol" | "ul" | "li" | "table" | "thead" | "tr" | "td"
                | "div"
        )
}

fn element_tag(tag: &Tag<'_>) -> &'static str {
    match tag {
        Tag::Paragraph => "p",
        Tag::Heading { level, .. } => heading_tag(*level),
        Tag::BlockQuote(_) => "blockquote",
        Tag::CodeBlock(_) => "pre",
        Tag::List(Some(_)) => "ol",
        Tag::List(None) => "ul",
        Tag::Item => "li",
        Tag::Table(_) => "table",
        Tag::TableHead => "thead",
        Tag::TableRow => "tr",
        Tag::TableCell => "td",
        Tag::Emphasis => "em",
        Tag::Strong => "strong",
        Tag::Strikethrough => "s",
        Tag::Link { .. } => "a",
        Tag::Image { .. } => "img",
        _ => "div",
    }
}

impl Document {
    /// Parse Markdown into a document with a laid-out `<article class="content">`
    ///
    /// Heading attributes (`# Title {#intro .lead}`) are honored, so headings
    /// written with an explicit id keep it.
    ///
    /// # Returns
    /// * `(Document, NodeId)` - The document and the article container
    pub fn from_markdown(content: &str) -> (Self, NodeId) {
        let mut doc = Self::new();
        let main = doc.create_element("main");
        doc.append_child(doc.root(), main);
        let article = doc.create_element("article");
        doc.set_attribute(article, "class", "content");
        doc.append_child(main, article);

        let options = Options::ENABLE_HEADING_ATTRIBUTES | Options::ENABLE_TABLES;
        let mut open: Vec<NodeId> = vec![article];

        for event in Parser::new_ext(content, options) {
            let parent = open.last().copied().unwrap_or(article);
            match event {
                Event::Start(tag) => {
                    let el = doc.create_element(element_tag(&tag));
                    if let Tag::Heading { id, classes, .. } = &tag {
                        if let Some(id) = id {
                            doc.set_id(el, id);
                        }
                        for class in classes {
                            doc.add_class(el, class);
                        }
                    }
                    doc.append_child(parent, el);
                    open.push(el);
                }
                Event::End(_) => {
                    open.pop();
                }
                Event::Text(text) | Event::Code(text) => {
                    let t = doc.create_text(&text);
                    doc.append_child(parent, t);
                }
                Event::SoftBreak | Event::HardBreak => {
                    let t = doc.create_text(" ");
                    doc.append_child(parent, t);
                }
                _ => {}
            }
        }

        doc.layout_blocks(article);
        (doc, article)
    }

    /// Stack the container's blocks top to bottom and size the container
    fn layout_blocks(&mut self, container: NodeId) {
        let height = self.layout_children(container, 0.0, 0.0, CONTENT_WIDTH);
        self.set_rect(container, Rect::new(0.0, 0.0, CONTENT_WIDTH, height));
    }

    /// Lay out the block children of `parent` from `(x, y)`; returns the height used
    fn layout_children(&mut self, parent: NodeId, x: f64, y: f64, width: f64) -> f64 {
        let mut offset = 0.0;
        for block in self.children(parent).to_vec() {
            if !self.tag_name(block).is_some_and(is_block) {
                continue;
            }
            let height = self.layout_block(block, x, y + offset, width);
            offset += height + BLOCK_GAP;
        }
        offset
    }

    fn layout_block(&mut self, block: NodeId, x: f64, y: f64, width: f64) -> f64 {
        let tag = self.tag_name(block).unwrap_or_default();
        let has_blocks = self
            .children(block)
            .iter()
            .any(|c| self.tag_name(*c).is_some_and(is_block));

        let height = if is_heading(tag) {
            HEADING_HEIGHT
        } else if has_blocks {
            let inner = width - NESTED_INDENT;
            let used = self.layout_children(block, x + NESTED_INDENT, y, inner);
            (used - BLOCK_GAP).max(LINE_HEIGHT)
        } else {
            let chars = self.text_content(block).chars().count();
            let lines = chars.div_ceil(CHARS_PER_LINE).max(1);
            LINE_HEIGHT * lines as f64
        };
        self.set_rect(block, Rect::new(x, y, width, height));
        height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_become_elements() {
        let (doc, article) = Document::from_markdown("# Intro\n\ntext\n\n## Setup {#setup}\n");
        let headings = doc.query_all_by_tags(article, &["h1", "h2"]);
        assert_eq!(headings.len(), 2);
        assert_eq!(doc.text_content(headings[0]), "Intro");
        assert_eq!(doc.id(headings[0]), None);
        assert_eq!(doc.id(headings[1]), Some("setup"));
    }

    #[test]
    fn test_blocks_are_stacked() {
        let (doc, article) = Document::from_markdown("# A\n\nbody\n\n## B\n");
        let blocks: Vec<Rect> = doc
            .children(article)
            .iter()
            .filter_map(|b| doc.rect(*b))
            .collect();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].top(), 0.0);
        assert_eq!(blocks[1].top(), HEADING_HEIGHT + BLOCK_GAP);
        assert!(blocks[2].top() > blocks[1].bottom());
    }

    #[test]
    fn test_nested_blocks_get_boxes_inside_parent() {
        let (doc, article) = Document::from_markdown("# Top\n\n> ## Quoted\n>\n> text\n\n- item\n");
        let quote = doc.query_all_by_tags(article, &["blockquote"])[0];
        let quoted = doc.query_all_by_tags(article, &["h2"])[0];
        let outer = doc.rect(quote).expect("quote laid out");
        let inner = doc.rect(quoted).expect("nested heading laid out");

        assert_eq!(outer.top(), HEADING_HEIGHT + BLOCK_GAP);
        assert_eq!(inner.top(), outer.top());
        assert_eq!(inner.left(), NESTED_INDENT);
        assert_eq!(inner.right(), outer.right());
        assert!(inner.bottom() < outer.bottom());

        let item = doc.query_all_by_tags(article, &["li"])[0];
        assert!(doc.rect(item).is_some_and(|r| r.top() > outer.bottom()));
    }

    #[test]
    fn test_inline_markup_keeps_text() {
        let (doc, article) = Document::from_markdown("## Using `cargo` *fast*\n");
        let h2 = doc.query_all_by_tags(article, &["h2"])[0];
        assert_eq!(doc.text_content(h2), "Using cargo fast");
    }
}
