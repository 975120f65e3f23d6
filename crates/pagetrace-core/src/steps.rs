//! Canonical replay steps
//!
//! A `Step` is one replayable action derived from one or more element events.
//! Steps are a reduction, not a one-to-one mapping: a run of scroll events
//! collapses into a single step, while a click maps directly.

use serde::{Deserialize, Serialize};

use crate::descriptor::ElementDescriptor;
use crate::events::ScrollValue;

/// Action to perform during replay, with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum StepAction {
    Click,
    Input { value: String },
    Keydown { value: String },
    Keyup { value: String },
    Paste { value: String },
    Scroll { value: ScrollValue },
}

/// One canonical, replayable action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(flatten)]
    pub action: StepAction,
    /// Element to act on during replay.
    pub html: ElementDescriptor,
    /// Page the step executes on.
    pub page: u32,
    /// Position of the triggering event in the source sequence. Used only to
    /// order steps across action kinds during merge.
    pub index: usize,
    /// True while a later event in the same logical gesture could still
    /// supersede the recorded value. Final once a following event proves the
    /// gesture ended.
    pub can_change: bool,
}
