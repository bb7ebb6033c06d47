//! toc - table-of-contents navigation widget
//!
//! Scans a content container for headings and renders a nested list of
//! links mirroring the heading hierarchy, or renders a flat list of supplied
//! items. Clicking a link smooth-scrolls to its target and flags it with a
//! temporary "active" class.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod controllers;
pub mod dom;
pub mod error;
pub mod html;
pub mod i18n;
pub mod levels;
pub mod navigator;
pub mod page;
pub mod tree;
pub mod widget;

pub use config::{RenderMode, StickyMode, TocConfig, TocItem, ToggleOptions};
pub use controllers::{
    ControllerFactory, NoControllers, StickyController, ToggleController, WidgetInfo,
};
pub use dom::{Document, DocumentId, NodeId, Rect};
pub use error::TocError;
pub use i18n::{translate, Locale};
pub use levels::{HeadingLevel, HeadingLevelSpec};
pub use navigator::{scroll_to_heading, MarkerTiming, ACTIVE_CLASS, ACTIVE_MARKER_MS};
pub use page::{ClickEvent, Page, ScrollOptions, Viewport};
pub use tree::{build_heading_list, ListChild, ListNode, TocLink};
pub use widget::{ListKind, TocView, TocWidget};
