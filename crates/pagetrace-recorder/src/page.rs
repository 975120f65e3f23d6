//! Injected page capability
//!
//! Capture never touches a global `document` or `window`. Everything it needs
//! from the browser side comes through [`PageHandle`], so multiple pages can
//! run independent captures and tests can run against a fake. The concrete
//! implementation (browser binding plus the DOM-to-selector resolver) lives
//! outside this crate.

use pagetrace_core::{ElementDescriptor, Result, ScrollValue};

/// Identifier of one concrete DOM node within a page handle.
///
/// Only meaningful to the handle that issued it; never persisted. The durable
/// reference to an element is the [`ElementDescriptor`] it resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Native event kinds the capture layer subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventKind {
    Click,
    Input,
    Keydown,
    Keyup,
    Paste,
    Scroll,
    /// Observed only to timestamp wheel activity for scroll correlation,
    /// never forwarded to the sink.
    Wheel,
}

impl DomEventKind {
    pub const ALL: [DomEventKind; 7] = [
        DomEventKind::Click,
        DomEventKind::Input,
        DomEventKind::Keydown,
        DomEventKind::Keyup,
        DomEventKind::Paste,
        DomEventKind::Scroll,
        DomEventKind::Wheel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DomEventKind::Click => "click",
            DomEventKind::Input => "input",
            DomEventKind::Keydown => "keydown",
            DomEventKind::Keyup => "keyup",
            DomEventKind::Paste => "paste",
            DomEventKind::Scroll => "scroll",
            DomEventKind::Wheel => "wheel",
        }
    }
}

/// Kind-specific payload of one native event.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    Click,
    Input,
    Keydown { key: String },
    Keyup { key: String },
    Paste { text: Option<String> },
    Scroll,
    Wheel,
}

impl RawPayload {
    pub fn kind(&self) -> DomEventKind {
        match self {
            RawPayload::Click => DomEventKind::Click,
            RawPayload::Input => DomEventKind::Input,
            RawPayload::Keydown { .. } => DomEventKind::Keydown,
            RawPayload::Keyup { .. } => DomEventKind::Keyup,
            RawPayload::Paste { .. } => DomEventKind::Paste,
            RawPayload::Scroll => DomEventKind::Scroll,
            RawPayload::Wheel => DomEventKind::Wheel,
        }
    }
}

/// One native event as delivered by the page handle.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub target: NodeId,
    /// Page-relative timestamp in milliseconds.
    pub time: u64,
    /// True only for events originated by real user input.
    pub is_trusted: bool,
    pub payload: RawPayload,
}

/// Registration handle for one subscribed listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub type EventHandler = Box<dyn Fn(RawEvent) + Send + Sync>;

/// Capability handle onto one live page.
///
/// Listener registration must use the event-capture phase, so a descendant's
/// `stopPropagation` cannot suppress observation, and must not block default
/// browser behavior. Handlers run to completion on arrival of each native
/// event and are never re-entered for the same event.
pub trait PageHandle: Send + Sync {
    /// Registers `handler` for `kind`. The returned id de-registers exactly
    /// this listener. Registration failure means the environment cannot
    /// support capture; it is the one error that propagates.
    fn subscribe(&self, kind: DomEventKind, handler: EventHandler) -> Result<ListenerId>;

    /// Removes a previously registered listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: ListenerId);

    /// Resolves a node into a stable descriptor via the external resolver.
    /// `None` when the node is detached and no descriptor can be produced.
    fn resolve(&self, node: NodeId) -> Option<ElementDescriptor>;

    /// Nearest ancestor with a native interactive role, or the node itself
    /// when no such ancestor exists.
    fn clickable_ancestor(&self, node: NodeId) -> NodeId;

    /// True when the node is a selection control (a dropdown/select element).
    fn is_selection_control(&self, node: NodeId) -> bool;

    /// Current value of a selection control.
    fn selection_value(&self, node: NodeId) -> Option<String>;

    /// True when the node is the document or its body.
    fn is_document_root(&self, node: NodeId) -> bool;

    /// The element whose offsets actually change when the page itself
    /// scrolls. Stands in for document/body scroll targets.
    fn scrolling_root(&self) -> NodeId;

    /// Current scroll offsets of the node.
    fn scroll_offset(&self, node: NodeId) -> ScrollValue;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_kind_matches_subscription_kind() {
        let payloads = [
            RawPayload::Click,
            RawPayload::Input,
            RawPayload::Keydown { key: "a".into() },
            RawPayload::Keyup { key: "a".into() },
            RawPayload::Paste { text: None },
            RawPayload::Scroll,
            RawPayload::Wheel,
        ];
        for (payload, kind) in payloads.into_iter().zip(DomEventKind::ALL) {
            assert_eq!(payload.kind(), kind);
        }
    }
}
