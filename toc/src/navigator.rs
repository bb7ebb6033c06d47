//! Smooth-scroll navigation to a heading with a temporary "active" marker

use crate::error::TocError;
use crate::page::{ClickEvent, ListenerOptions, Page, ScrollOptions};

/// Class marking the element that was just navigated to
pub const ACTIVE_CLASS: &str = "scrolledTo";

/// How long the active marker stays, counted from the click
pub const ACTIVE_MARKER_MS: u64 = 4000;

/// How the active marker was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerTiming {
    /// Target was fully visible; marker applied right away
    Immediate,
    /// Marker waits for the next scroll-completion signal
    OnScrollEnd,
}

/// Scroll to the element with `target_id` and flag it as active
///
/// The marker is removed [`ACTIVE_MARKER_MS`] after the call whichever path
/// applied it. Repeated navigation leaves earlier removal timers pending;
/// removal is idempotent.
///
/// # Returns
/// * `Ok(MarkerTiming)` - Which path applied the marker
/// * `Err(TocError::TargetNotFound)` - No element has that id
pub fn scroll_to_heading(
    page: &mut Page,
    event: &mut ClickEvent,
    target_id: &str,
) -> Result<MarkerTiming, TocError> {
    event.prevent_default();

    let target = page
        .document()
        .get_element_by_id(target_id)
        .ok_or_else(|| TocError::TargetNotFound {
            id: target_id.to_string(),
        })?;

    let in_view = page.is_in_viewport(target);
    page.document_mut().toggle_class(target, ACTIVE_CLASS, Some(false));
    page.scroll_into_view(target, ScrollOptions::default());

    let timing = if in_view {
        page.document_mut().add_class(target, ACTIVE_CLASS);
        MarkerTiming::Immediate
    } else {
        page.add_scrollend_listener(ListenerOptions::default(), move |doc| {
            doc.add_class(target, ACTIVE_CLASS);
        });
        MarkerTiming::OnScrollEnd
    };
    log::debug!("Navigating to #{} ({:?})", target_id, timing);

    page.set_timeout(ACTIVE_MARKER_MS, move |doc| {
        doc.remove_class(target, ACTIVE_CLASS);
    });

    Ok(timing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, NodeId, Rect};
    use crate::page::{Viewport, SMOOTH_SCROLL_MS};

    fn page_with_headings() -> (Page, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body);
        doc.set_rect(body, Rect::new(0.0, 0.0, 800.0, 4000.0));
        let near = doc.create_element("h2");
        doc.set_id(near, "near");
        doc.set_rect(near, Rect::new(0.0, 100.0, 400.0, 40.0));
        doc.append_child(body, near);
        let far = doc.create_element("h2");
        doc.set_id(far, "far");
        doc.set_rect(far, Rect::new(0.0, 3000.0, 400.0, 40.0));
        doc.append_child(body, far);
        let page = Page::with_viewport(
            doc,
            Viewport {
                width: 800.0,
                height: 600.0,
            },
        );
        (page, near, far)
    }

    #[test]
    fn test_visible_target_marked_immediately() {
        let (mut page, near, _) = page_with_headings();
        let mut event = ClickEvent::new();
        let timing = scroll_to_heading(&mut page, &mut event, "near").unwrap();
        assert_eq!(timing, MarkerTiming::Immediate);
        assert!(event.default_prevented());
        assert!(page.document().has_class(near, ACTIVE_CLASS));
        assert_eq!(page.scrollend_listener_count(), 0);
    }

    #[test]
    fn test_offscreen_target_marked_on_scroll_end() {
        let (mut page, _, far) = page_with_headings();
        let mut event = ClickEvent::new();
        let timing = scroll_to_heading(&mut page, &mut event, "far").unwrap();
        assert_eq!(timing, MarkerTiming::OnScrollEnd);
        assert!(!page.document().has_class(far, ACTIVE_CLASS));

        page.advance(SMOOTH_SCROLL_MS);
        assert!(page.document().has_class(far, ACTIVE_CLASS));
        assert!(page.is_in_viewport(far));
        assert_eq!(page.scrollend_listener_count(), 0);
    }

    #[test]
    fn test_marker_removed_after_four_seconds() {
        let (mut page, near, _) = page_with_headings();
        scroll_to_heading(&mut page, &mut ClickEvent::new(), "near").unwrap();
        page.advance(ACTIVE_MARKER_MS - 1);
        assert!(page.document().has_class(near, ACTIVE_CLASS));
        page.advance(1);
        assert!(!page.document().has_class(near, ACTIVE_CLASS));
    }

    #[test]
    fn test_existing_marker_cleared_before_scroll() {
        let (mut page, _, far) = page_with_headings();
        page.document_mut().add_class(far, ACTIVE_CLASS);
        scroll_to_heading(&mut page, &mut ClickEvent::new(), "far").unwrap();
        assert!(!page.document().has_class(far, ACTIVE_CLASS));
    }

    #[test]
    fn test_missing_target_is_lookup_error() {
        let (mut page, _, _) = page_with_headings();
        let mut event = ClickEvent::new();
        let err = scroll_to_heading(&mut page, &mut event, "gone").unwrap_err();
        assert!(matches!(err, TocError::TargetNotFound { ref id } if id == "gone"));
        assert!(event.default_prevented());
    }
}
