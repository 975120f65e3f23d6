//! Normalized element events
//!
//! One `ElementEvent` per observed native browser event, already filtered and
//! normalized by the capture layer. Events are immutable after emission and are
//! consumed in arrival order by the step reducer.

use serde::{Deserialize, Serialize};

use crate::descriptor::ElementDescriptor;

/// Horizontal and vertical scroll offset of an element, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollValue {
    pub x: i64,
    pub y: i64,
}

/// One observed native browser event, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementEvent {
    /// Index of the logical page/tab/frame the event originated from.
    pub page: u32,
    /// Capture timestamp in milliseconds.
    pub time: u64,
    /// True only for events originated by real user input, false for
    /// script-dispatched synthetic events.
    pub is_trusted: bool,
    /// Descriptor of the element the event acted on. Always resolvable:
    /// events whose target cannot be resolved are dropped before emission.
    pub target: ElementDescriptor,
    /// Action kind and its payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// The closed set of captured action kinds.
///
/// Modeled as a tagged union so every reducer's match is exhaustive; adding a
/// kind forces each consumer to decide how to handle it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum EventKind {
    Click,
    /// Selection-control change. Free-text inputs are covered by key events.
    Input { value: String },
    Keydown { value: String },
    Keyup { value: String },
    Paste { value: String },
    Scroll { value: ScrollValue },
}

impl EventKind {
    pub fn is_scroll(&self) -> bool {
        matches!(self, EventKind::Scroll { .. })
    }
}

/// A recorded session: the event stream captured across all of its pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedSession {
    pub name: String,
    pub events: Vec<ElementEvent>,
}

impl RecordedSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Vec::new(),
        }
    }
}
