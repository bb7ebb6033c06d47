//! Seams for the sticky-position and expand/collapse collaborators
//!
//! The widget only constructs these; their behavior lives with the host.

use crate::config::{StickyMode, ToggleOptions};

/// What a collaborator learns about the widget it is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetInfo {
    pub role: String,
    pub aria_label: String,
    pub class_name: String,
}

/// Sticky-position behavior; the widget consumes nothing from it
pub trait StickyController {}

/// Expand/collapse behavior
pub trait ToggleController {
    /// Markup rendered before the widget's content
    fn render(&self) -> String;
}

/// Builds collaborators when the widget connects
pub trait ControllerFactory {
    fn sticky(&mut self, widget: &WidgetInfo, mode: StickyMode) -> Box<dyn StickyController>;

    fn toggle(&mut self, options: ToggleOptions) -> Box<dyn ToggleController>;
}

/// Factory producing inert collaborators
#[derive(Debug, Clone, Copy, Default)]
pub struct NoControllers;

struct InertSticky;

impl StickyController for InertSticky {}

struct InertToggle;

impl ToggleController for InertToggle {
    fn render(&self) -> String {
        String::new()
    }
}

impl ControllerFactory for NoControllers {
    fn sticky(&mut self, _widget: &WidgetInfo, _mode: StickyMode) -> Box<dyn StickyController> {
        Box::new(InertSticky)
    }

    fn toggle(&mut self, _options: ToggleOptions) -> Box<dyn ToggleController> {
        Box::new(InertToggle)
    }
}
