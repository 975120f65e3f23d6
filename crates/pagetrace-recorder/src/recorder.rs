//! Session assembly
//!
//! A `SessionRecorder` wires any number of per-page captures into one shared
//! event channel. Pages get ascending indexes as they are attached; the `page`
//! field on each emitted event is the only coupling a consumer needs to
//! interleave the per-page streams.

use std::sync::Arc;

pub use crossbeam_channel::{Receiver, Sender};
use crossbeam_channel::unbounded;

use pagetrace_core::{ElementEvent, RecordedSession, Result};

use crate::capture::{CaptureConfig, EventCapture};
use crate::page::PageHandle;

/// Collects the event streams of one or more pages into a recorded session.
pub struct SessionRecorder<P: PageHandle + 'static> {
    config: CaptureConfig,
    tx: Sender<ElementEvent>,
    rx: Receiver<ElementEvent>,
    captures: Vec<EventCapture<P, Sender<ElementEvent>>>,
}

impl<P: PageHandle + 'static> SessionRecorder<P> {
    pub fn new() -> Self {
        Self::with_config(CaptureConfig::default())
    }

    pub fn with_config(config: CaptureConfig) -> Self {
        // Unbounded so emission never blocks the native event handling path
        // and never drops an emitted event.
        let (tx, rx) = unbounded();
        Self {
            config,
            tx,
            rx,
            captures: Vec::new(),
        }
    }

    /// Starts capture on `page` and returns the page index assigned to it.
    pub fn attach_page(&mut self, page: Arc<P>) -> Result<u32> {
        let index = self.captures.len() as u32;
        let capture = EventCapture::start(page, index, self.tx.clone(), &self.config)?;
        self.captures.push(capture);
        Ok(index)
    }

    /// The event channel, for consumers that process events as they arrive.
    pub fn receiver(&self) -> &Receiver<ElementEvent> {
        &self.rx
    }

    /// Moves every event captured so far into `session`.
    pub fn drain(&mut self, session: &mut RecordedSession) {
        while let Ok(event) = self.rx.try_recv() {
            session.events.push(event);
        }
    }

    /// Stops every capture, then drains the remaining events into `session`.
    pub fn stop(mut self, session: &mut RecordedSession) {
        for capture in &mut self.captures {
            capture.stop();
        }
        self.drain(session);
    }
}

impl<P: PageHandle + 'static> Default for SessionRecorder<P> {
    fn default() -> Self {
        Self::new()
    }
}
