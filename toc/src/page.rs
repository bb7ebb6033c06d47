//! Page: a document plus viewport, scroll position and a cooperative event loop
//!
//! Everything runs on one thread against a virtual clock. Smooth scrolls
//! complete after [`SMOOTH_SCROLL_MS`] and then emit a single scroll-completion
//! signal; timers fire in due order when the clock is advanced.

use crate::dom::{Document, NodeId};
use std::collections::BTreeMap;

/// Duration of a smooth scroll animation
pub const SMOOTH_SCROLL_MS: u64 = 300;

/// Work deferred to a later turn of the event loop
pub type Task = Box<dyn FnOnce(&mut Document)>;

/// Visible area of the page (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Alignment along one axis when scrolling an element into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlign {
    Start,
    #[default]
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOptions {
    pub block: ScrollAlign,
    pub inline: ScrollAlign,
    pub behavior: ScrollBehavior,
}

/// Options for a scroll-completion listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    pub once: bool,
    pub passive: bool,
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self {
            once: true,
            passive: true,
        }
    }
}

/// A link activation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the browser's own fragment navigation
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Handle returned by [`Page::set_timeout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimerId(u64);

struct ScrollAnimation {
    target: (f64, f64),
    ends_at: u64,
}

/// The live page the widget is mounted in
pub struct Page {
    doc: Document,
    viewport: Viewport,
    scroll: (f64, f64),
    now: u64,
    next_timer: u64,
    /// (due time, id) -> task; ids grow monotonically so equal due times run FIFO
    timers: BTreeMap<(u64, TimerId), Task>,
    scrollend: Vec<(ListenerOptions, Box<dyn FnMut(&mut Document)>)>,
    animation: Option<ScrollAnimation>,
    /// Instant scrolls report completion on the next turn
    scrollend_queued: bool,
}

impl Page {
    pub fn new(doc: Document) -> Self {
        Self::with_viewport(doc, Viewport::default())
    }

    pub fn with_viewport(doc: Document, viewport: Viewport) -> Self {
        Self {
            doc,
            viewport,
            scroll: (0.0, 0.0),
            now: 0,
            next_timer: 0,
            timers: BTreeMap::new(),
            scrollend: Vec::new(),
            animation: None,
            scrollend_queued: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current scroll offset `(x, y)`
    pub fn scroll_position(&self) -> (f64, f64) {
        self.scroll
    }

    /// Milliseconds since the page was created
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Whether a smooth scroll is still animating
    pub fn is_scrolling(&self) -> bool {
        self.animation.is_some()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn scrollend_listener_count(&self) -> usize {
        self.scrollend.len()
    }

    /// Whether every edge of the element lies inside the viewport
    ///
    /// Elements without a layout box are never in view.
    pub fn is_in_viewport(&self, node: NodeId) -> bool {
        let Some(rect) = self.doc.rect(node) else {
            return false;
        };
        let r = rect.translated(-self.scroll.0, -self.scroll.1);
        r.top() >= 0.0
            && r.left() >= 0.0
            && r.bottom() <= self.viewport.height
            && r.right() <= self.viewport.width
    }

    fn max_scroll(&self) -> (f64, f64) {
        let (width, height) = self.doc.content_size();
        (
            (width - self.viewport.width).max(0.0),
            (height - self.viewport.height).max(0.0),
        )
    }

    fn aligned_offset(align: ScrollAlign, start: f64, size: f64, view: f64) -> f64 {
        match align {
            ScrollAlign::Start => start,
            ScrollAlign::Center => start + size / 2.0 - view / 2.0,
            ScrollAlign::End => start + size - view,
        }
    }

    /// Scroll so the element is aligned per `options`, clamped to the scrollable area
    ///
    /// # Returns
    /// * `true` - The scroll position will change (a completion signal follows)
    /// * `false` - Already in position; no scroll and no completion signal
    pub fn scroll_into_view(&mut self, node: NodeId, options: ScrollOptions) -> bool {
        let Some(rect) = self.doc.rect(node) else {
            return false;
        };
        let (max_x, max_y) = self.max_scroll();
        let target = (
            Self::aligned_offset(options.inline, rect.left(), rect.width, self.viewport.width)
                .clamp(0.0, max_x),
            Self::aligned_offset(options.block, rect.top(), rect.height, self.viewport.height)
                .clamp(0.0, max_y),
        );

        let current = self
            .animation
            .as_ref()
            .map_or(self.scroll, |animation| animation.target);
        if target == current {
            return false;
        }

        match options.behavior {
            ScrollBehavior::Smooth => {
                self.animation = Some(ScrollAnimation {
                    target,
                    ends_at: self.now.saturating_add(SMOOTH_SCROLL_MS),
                });
            }
            ScrollBehavior::Instant => {
                self.animation = None;
                self.scroll = target;
                self.scrollend_queued = true;
            }
        }
        true
    }

    /// Register a scroll-completion listener
    pub fn add_scrollend_listener<F>(&mut self, options: ListenerOptions, listener: F)
    where
        F: FnMut(&mut Document) + 'static,
    {
        self.scrollend.push((options, Box::new(listener)));
    }

    /// Deliver a scroll-completion signal to the registered listeners
    ///
    /// One-shot listeners are removed before they run.
    pub fn dispatch_scrollend(&mut self) {
        let listeners = std::mem::take(&mut self.scrollend);
        let mut kept = Vec::new();
        for (options, mut listener) in listeners {
            listener(&mut self.doc);
            if !options.once {
                kept.push((options, listener));
            }
        }
        self.scrollend = kept;
    }

    /// Run `task` once `delay_ms` have elapsed
    pub fn set_timeout<F>(&mut self, delay_ms: u64, task: F) -> TimerId
    where
        F: FnOnce(&mut Document) + 'static,
    {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers
            .insert((self.now.saturating_add(delay_ms), id), Box::new(task));
        id
    }

    /// Cancel a pending timer; returns whether it was still pending
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let key = self.timers.keys().find(|(_, t)| *t == id).copied();
        key.and_then(|k| self.timers.remove(&k)).is_some()
    }

    /// Advance the clock by `ms`, running scroll completion and timers in order
    ///
    /// At equal times a scroll completion runs before timers.
    pub fn advance(&mut self, ms: u64) {
        let until = self.now.saturating_add(ms);
        loop {
            if self.scrollend_queued {
                self.scrollend_queued = false;
                self.dispatch_scrollend();
                continue;
            }

            let scroll_due = self
                .animation
                .as_ref()
                .map(|a| a.ends_at)
                .filter(|t| *t <= until);
            let timer_due = self
                .timers
                .keys()
                .next()
                .map(|(due, _)| *due)
                .filter(|t| *t <= until);

            match (scroll_due, timer_due) {
                (Some(s), t) if !matches!(t, Some(t) if t < s) => {
                    self.now = s;
                    if let Some(animation) = self.animation.take() {
                        self.scroll = animation.target;
                    }
                    log::debug!("Scroll finished at {:?} (t={}ms)", self.scroll, self.now);
                    self.dispatch_scrollend();
                }
                (_, Some(t)) => {
                    self.now = t;
                    if let Some((_, task)) = self.timers.pop_first() {
                        task(&mut self.doc);
                    }
                }
                _ => break,
            }
        }
        self.now = until;
    }
}
