//! The table-of-contents widget: lifecycle and render entry point
//!
//! `connect` sets up the host-facing state and collaborators once; `render`
//! is a function of the configuration and the current page, producing a
//! [`TocView`] the host mounts. Link activation goes through `activate`.

use crate::config::{RenderMode, TocConfig, TocItem};
use crate::controllers::{ControllerFactory, StickyController, ToggleController, WidgetInfo};
use crate::dom::{DocumentId, NodeId};
use crate::error::TocError;
use crate::html;
use crate::i18n::{self, Locale};
use crate::navigator::{self, MarkerTiming};
use crate::page::{ClickEvent, Page};
use crate::tree::{self, ListNode, TocLink};

const DEFAULT_ROLE: &str = "navigation";
const CLASS_NAME: &str = "toc";

/// Which kind of list the content holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Nested list built from headings
    Headings,
    /// Flat list of supplied items
    Items,
    /// Neither `src` nor items configured; no content
    Empty,
}

/// Output of one render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocView {
    pub role: String,
    pub aria_label: String,
    pub class_name: String,
    /// Toggle collaborator markup, rendered before the content
    pub toggle: Option<String>,
    pub kind: ListKind,
    /// `None` for [`ListKind::Empty`]
    pub content: Option<ListNode>,
}

impl TocView {
    /// All links in document order
    pub fn links(&self) -> Vec<&TocLink> {
        self.content.as_ref().map(ListNode::links).unwrap_or_default()
    }

    pub fn to_html(&self) -> String {
        html::view_to_html(self)
    }
}

/// A connected table-of-contents widget
pub struct TocWidget {
    config: TocConfig,
    locale: Locale,
    info: WidgetInfo,
    sticky: Option<Box<dyn StickyController>>,
    toggle: Option<Box<dyn ToggleController>>,
    /// Resolved `src` container and the document it belongs to
    source: Option<(DocumentId, NodeId)>,
}

impl TocWidget {
    /// Connect the widget: set role, label and class, and build collaborators
    pub fn connect(
        config: TocConfig,
        locale: Locale,
        controllers: &mut dyn ControllerFactory,
    ) -> Self {
        let info = WidgetInfo {
            role: config
                .role
                .clone()
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            aria_label: i18n::translate("toc", &locale).to_string(),
            class_name: CLASS_NAME.to_string(),
        };

        let sticky = config
            .sticky_mode()
            .map(|mode| controllers.sticky(&info, mode));
        let toggle = config
            .toggle_options()
            .map(|options| controllers.toggle(options));

        log::debug!(
            "Connected table of contents (locale {}, sticky: {}, toggle: {})",
            locale,
            sticky.is_some(),
            toggle.is_some()
        );

        Self {
            config,
            locale,
            info,
            sticky,
            toggle,
            source: None,
        }
    }

    pub fn config(&self) -> &TocConfig {
        &self.config
    }

    pub fn info(&self) -> &WidgetInfo {
        &self.info
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn has_sticky(&self) -> bool {
        self.sticky.is_some()
    }

    pub fn has_toggle(&self) -> bool {
        self.toggle.is_some()
    }

    /// Change the source selector; the cached container is dropped
    pub fn set_src(&mut self, src: Option<String>) {
        if self.config.src != src {
            self.source = None;
        }
        self.config.src = src;
    }

    pub fn set_levels(&mut self, levels: impl Into<String>) {
        self.config.levels = levels.into();
    }

    pub fn set_items(&mut self, items: Vec<TocItem>) {
        self.config.items = items;
    }

    /// Render toggle markup and content from the current page
    ///
    /// # Returns
    /// * `Ok(TocView)` - The rendered view
    /// * `Err(TocError)` - The source selector or levels are invalid, or the
    ///   selector matched nothing
    pub fn render(&mut self, page: &mut Page) -> Result<TocView, TocError> {
        let toggle = self.toggle.as_ref().map(|t| t.render());

        let (kind, content) = match self.config.render_mode()? {
            RenderMode::Source { selector, levels } => {
                let container = self.resolve_source(page, &selector)?;
                let list = tree::build_heading_list(page.document_mut(), container, &levels);
                (ListKind::Headings, Some(list))
            }
            RenderMode::Items { items } => (ListKind::Items, Some(tree::build_item_list(&items))),
            RenderMode::Empty => (ListKind::Empty, None),
        };

        Ok(TocView {
            role: self.info.role.clone(),
            aria_label: self.info.aria_label.clone(),
            class_name: self.info.class_name.clone(),
            toggle,
            kind,
            content,
        })
    }

    /// The `src` container, cached per document
    fn resolve_source(&mut self, page: &Page, selector: &str) -> Result<NodeId, TocError> {
        let doc = page.document();
        match self.source {
            Some((doc_id, cached)) if doc_id == doc.doc_id() => return Ok(cached),
            Some(_) => log::debug!("Page changed; resolving {} again", selector),
            None => {}
        }
        let found = doc
            .query_selector(selector)?
            .ok_or_else(|| TocError::SourceNotFound {
                selector: selector.to_string(),
            })?;
        self.source = Some((doc.doc_id(), found));
        Ok(found)
    }

    /// Handle a click on the link to `target_id`
    ///
    /// # Returns
    /// * `Ok((ClickEvent, MarkerTiming))` - The handled event (default prevented)
    ///   and how the active marker is applied
    /// * `Err(TocError::TargetNotFound)` - No element has that id
    pub fn activate(
        &self,
        page: &mut Page,
        target_id: &str,
    ) -> Result<(ClickEvent, MarkerTiming), TocError> {
        let mut event = ClickEvent::new();
        let timing = navigator::scroll_to_heading(page, &mut event, target_id)?;
        Ok((event, timing))
    }
}
