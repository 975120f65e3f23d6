//! In-page event capture
//!
//! One `EventCapture` per page. It subscribes to the native events of
//! interest, normalizes each into an [`ElementEvent`] with a resolved target
//! descriptor, and hands it to the sink. Capture is best-effort: an event
//! whose target cannot be resolved is dropped, never surfaced as an error,
//! because a dropped record must not interrupt the user's live session.
//!
//! Capture does no domain-level noise reduction; that is the reducer's job.
//! Its contract is event-kind correctness only.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use pagetrace_core::{ElementEvent, EventKind, Result};

use crate::page::{DomEventKind, EventHandler, ListenerId, PageHandle, RawEvent, RawPayload};

/// Capture tuning.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// A scroll event is recorded only if a wheel event happened within this
    /// many milliseconds before it. Scrolls outside the window are system
    /// initiated (focus changes, in-page navigation) and are not user intent.
    pub wheel_window_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            wheel_window_ms: 100,
        }
    }
}

/// Receives each emitted event, in emission order, never batched.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ElementEvent);
}

impl EventSink for crossbeam_channel::Sender<ElementEvent> {
    fn emit(&self, event: ElementEvent) {
        let _ = self.send(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn emit(&self, event: ElementEvent) {
        (**self).emit(event);
    }
}

/// Live capture on one page.
///
/// Every listener registered by [`EventCapture::start`] has a matching,
/// guaranteed de-registration on [`EventCapture::stop`] or drop, including
/// when `start` itself fails partway through registration.
pub struct EventCapture<P: PageHandle + 'static, S: EventSink + 'static> {
    inner: Arc<CaptureInner<P, S>>,
    listeners: Vec<ListenerId>,
}

struct CaptureInner<P, S> {
    page: Arc<P>,
    page_index: u32,
    sink: S,
    wheel_window_ms: u64,
    /// Timestamp of the most recent wheel event on this page.
    last_wheel: Mutex<Option<u64>>,
}

impl<P: PageHandle + 'static, S: EventSink + 'static> EventCapture<P, S> {
    /// Begins listening on `page`, emitting to `sink`.
    pub fn start(page: Arc<P>, page_index: u32, sink: S, config: &CaptureConfig) -> Result<Self> {
        let inner = Arc::new(CaptureInner {
            page,
            page_index,
            sink,
            wheel_window_ms: config.wheel_window_ms,
            last_wheel: Mutex::new(None),
        });

        let mut listeners = Vec::with_capacity(DomEventKind::ALL.len());
        for kind in DomEventKind::ALL {
            let dispatch = Arc::clone(&inner);
            let handler: EventHandler = Box::new(move |raw| dispatch.handle(raw));
            match inner.page.subscribe(kind, handler) {
                Ok(id) => listeners.push(id),
                Err(err) => {
                    // A partial start leaves nothing registered behind.
                    for id in listeners.drain(..) {
                        inner.page.unsubscribe(id);
                    }
                    return Err(err);
                }
            }
        }

        debug!(page = page_index, "event capture started");
        Ok(Self { inner, listeners })
    }

    pub fn page_index(&self) -> u32 {
        self.inner.page_index
    }

    /// Unregisters every listener `start` installed. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        for id in self.listeners.drain(..) {
            self.inner.page.unsubscribe(id);
        }
        debug!(page = self.inner.page_index, "event capture stopped");
    }
}

impl<P: PageHandle + 'static, S: EventSink + 'static> Drop for EventCapture<P, S> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<P: PageHandle, S: EventSink> CaptureInner<P, S> {
    fn handle(&self, raw: RawEvent) {
        match &raw.payload {
            RawPayload::Wheel => {
                // Wheel events are timestamped for scroll correlation only.
                *self.last_wheel.lock() = Some(raw.time);
            }
            RawPayload::Click => self.record_click(&raw),
            RawPayload::Input => self.record_input(&raw),
            RawPayload::Keydown { key } => self.record_key(&raw, key, true),
            RawPayload::Keyup { key } => self.record_key(&raw, key, false),
            RawPayload::Paste { text } => self.record_paste(&raw, text.as_deref()),
            RawPayload::Scroll => self.record_scroll(&raw),
        }
    }

    fn record_click(&self, raw: &RawEvent) {
        // The nearest clickable ancestor is the more stable replay target:
        // a click on an icon glyph inside a button must resolve to the
        // button, not the glyph.
        let node = self.page.clickable_ancestor(raw.target);
        let Some(target) = self.page.resolve(node) else {
            return;
        };
        self.emit(raw, target, EventKind::Click);
    }

    fn record_input(&self, raw: &RawEvent) {
        // Only selection controls. Free-text inputs are already covered by
        // the key events.
        if !self.page.is_selection_control(raw.target) {
            return;
        }
        let Some(value) = self.page.selection_value(raw.target) else {
            return;
        };
        let Some(target) = self.page.resolve(raw.target) else {
            return;
        };
        self.emit(raw, target, EventKind::Input { value });
    }

    fn record_key(&self, raw: &RawEvent, key: &str, down: bool) {
        let Some(target) = self.page.resolve(raw.target) else {
            return;
        };
        let kind = if down {
            EventKind::Keydown {
                value: key.to_string(),
            }
        } else {
            EventKind::Keyup {
                value: key.to_string(),
            }
        };
        self.emit(raw, target, kind);
    }

    fn record_paste(&self, raw: &RawEvent, text: Option<&str>) {
        let Some(text) = text else {
            return;
        };
        let Some(target) = self.page.resolve(raw.target) else {
            return;
        };
        self.emit(
            raw,
            target,
            EventKind::Paste {
                value: text.to_string(),
            },
        );
    }

    fn record_scroll(&self, raw: &RawEvent) {
        let last_wheel = *self.last_wheel.lock();
        let wheel_initiated =
            last_wheel.is_some_and(|t| raw.time.saturating_sub(t) <= self.wheel_window_ms);
        if !wheel_initiated {
            // Not wheel initiated. Keyboard scrolls (PgUp/PgDown/Space) are
            // covered by the key events; anything else here is the system
            // scrolling on its own.
            debug!(page = self.page_index, "ignored non-wheel scroll");
            return;
        }

        // body is frequently not the element whose offsets changed; the
        // page's designated scrolling root is.
        let node = if self.page.is_document_root(raw.target) {
            self.page.scrolling_root()
        } else {
            raw.target
        };
        let Some(target) = self.page.resolve(node) else {
            return;
        };
        let value = self.page.scroll_offset(node);
        self.emit(raw, target, EventKind::Scroll { value });
    }

    fn emit(&self, raw: &RawEvent, target: pagetrace_core::ElementDescriptor, kind: EventKind) {
        let event = ElementEvent {
            page: self.page_index,
            time: raw.time,
            is_trusted: raw.is_trusted,
            target,
            kind,
        };
        debug!(
            page = self.page_index,
            kind = raw.payload.kind().as_str(),
            "recorded event"
        );
        self.sink.emit(event);
    }
}
