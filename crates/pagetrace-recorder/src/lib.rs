//! pagetrace-recorder - Browser interaction capture and step reduction
//!
//! Turns a human's live interaction with a page into a minimal, replayable
//! sequence of steps:
//!
//! - [`capture::EventCapture`] observes one page through an injected
//!   [`page::PageHandle`] and emits normalized element events to a sink.
//! - [`recorder::SessionRecorder`] assembles per-page captures into one
//!   recorded session over a channel.
//! - [`reduce::build_steps`] collapses the captured event stream into ordered
//!   canonical steps for the code generator.
//! - [`storage::SessionStorage`] persists sessions as JSON lines between
//!   capture and batched reduction.

pub mod capture;
pub mod page;
pub mod recorder;
pub mod reduce;
pub mod storage;

pub use capture::{CaptureConfig, EventCapture, EventSink};
pub use page::{DomEventKind, EventHandler, ListenerId, NodeId, PageHandle, RawEvent, RawPayload};
pub use recorder::{Receiver, Sender, SessionRecorder};
pub use reduce::build_steps;
pub use storage::SessionStorage;

pub mod prelude {
    pub use crate::capture::{CaptureConfig, EventCapture, EventSink};
    pub use crate::page::{
        DomEventKind, EventHandler, ListenerId, NodeId, PageHandle, RawEvent, RawPayload,
    };
    pub use crate::recorder::{Receiver, Sender, SessionRecorder};
    pub use crate::reduce::build_steps;
    pub use crate::storage::SessionStorage;
    pub use pagetrace_core::prelude::*;
}
