//! pagetrace-core - Shared data contract for recorded browser interactions
//!
//! Defines the normalized event and step shapes exchanged between the in-page
//! capture layer, the step reducer, and the external code generator. Everything
//! serializes to flat, field-named JSON so records can cross a page or process
//! boundary and be buffered in storage between capture and reduction.

pub mod descriptor;
pub mod error;
pub mod events;
pub mod steps;

pub use descriptor::ElementDescriptor;
pub use error::{Error, ErrorCode, Result};
pub use events::{ElementEvent, EventKind, RecordedSession, ScrollValue};
pub use steps::{Step, StepAction};

pub mod prelude {
    pub use crate::descriptor::ElementDescriptor;
    pub use crate::error::{Error, ErrorCode, Result};
    pub use crate::events::{ElementEvent, EventKind, RecordedSession, ScrollValue};
    pub use crate::steps::{Step, StepAction};
}
