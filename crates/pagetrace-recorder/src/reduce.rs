//! Event-stream reduction
//!
//! Collapses a captured event sequence into the minimal ordered list of steps
//! a replay engine should execute. One independent builder per action kind
//! scans the full sequence and considers only events of its kind; the merge
//! concatenates every builder's output and sorts ascending by the triggering
//! event's index. Ties cannot occur since each event has exactly one kind and
//! one index.
//!
//! Every builder ignores events with `is_trusted = false`: input sequences may
//! come from untrusted storage, and script-dispatched events are not user
//! intent. Reduction is pure and deterministic; re-running it over the same
//! sequence yields the same steps.

use pagetrace_core::{ElementEvent, EventKind, Step, StepAction};

/// Reduces a finite, already-captured event sequence into replay steps.
pub fn build_steps(events: &[ElementEvent]) -> Vec<Step> {
    let mut steps = Vec::new();
    steps.extend(build_click_steps(events));
    steps.extend(build_input_steps(events));
    steps.extend(build_keydown_steps(events));
    steps.extend(build_keyup_steps(events));
    steps.extend(build_paste_steps(events));
    steps.extend(build_scroll_steps(events));
    steps.sort_by_key(|step| step.index);
    steps
}

/// One step per trusted click. Clicks are already discrete, complete actions.
pub fn build_click_steps(events: &[ElementEvent]) -> Vec<Step> {
    events
        .iter()
        .enumerate()
        .filter_map(|(i, event)| match &event.kind {
            EventKind::Click if event.is_trusted => Some(step(event, StepAction::Click, i)),
            _ => None,
        })
        .collect()
}

/// One step per trusted selection change.
pub fn build_input_steps(events: &[ElementEvent]) -> Vec<Step> {
    events
        .iter()
        .enumerate()
        .filter_map(|(i, event)| match &event.kind {
            EventKind::Input { value } if event.is_trusted => Some(step(
                event,
                StepAction::Input {
                    value: value.clone(),
                },
                i,
            )),
            _ => None,
        })
        .collect()
}

pub fn build_keydown_steps(events: &[ElementEvent]) -> Vec<Step> {
    events
        .iter()
        .enumerate()
        .filter_map(|(i, event)| match &event.kind {
            EventKind::Keydown { value } if event.is_trusted => Some(step(
                event,
                StepAction::Keydown {
                    value: value.clone(),
                },
                i,
            )),
            _ => None,
        })
        .collect()
}

pub fn build_keyup_steps(events: &[ElementEvent]) -> Vec<Step> {
    events
        .iter()
        .enumerate()
        .filter_map(|(i, event)| match &event.kind {
            EventKind::Keyup { value } if event.is_trusted => Some(step(
                event,
                StepAction::Keyup {
                    value: value.clone(),
                },
                i,
            )),
            _ => None,
        })
        .collect()
}

pub fn build_paste_steps(events: &[ElementEvent]) -> Vec<Step> {
    events
        .iter()
        .enumerate()
        .filter_map(|(i, event)| match &event.kind {
            EventKind::Paste { value } if event.is_trusted => Some(step(
                event,
                StepAction::Paste {
                    value: value.clone(),
                },
                i,
            )),
            _ => None,
        })
        .collect()
}

/// Collapses each run of consecutive scroll events into the run's last event:
/// only the final offset matters for replay. A run ends when the next event is
/// anything other than a scroll. When the run is the tail of the sequence the
/// step is marked `can_change`, since a live stream could still extend it.
pub fn build_scroll_steps(events: &[ElementEvent]) -> Vec<Step> {
    let mut steps = Vec::new();

    for (i, event) in events.iter().enumerate() {
        let EventKind::Scroll { value } = &event.kind else {
            continue;
        };
        // ignore system initiated scrolls
        if !event.is_trusted {
            continue;
        }
        // skip to the last scroll of the run
        let next = events.get(i + 1);
        if next.is_some_and(|e| e.kind.is_scroll()) {
            continue;
        }

        let mut scroll = step(event, StepAction::Scroll { value: *value }, i);
        scroll.can_change = next.is_none();
        steps.push(scroll);
    }

    steps
}

fn step(event: &ElementEvent, action: StepAction, index: usize) -> Step {
    Step {
        action,
        html: event.target.clone(),
        page: event.page,
        index,
        can_change: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagetrace_core::{ElementDescriptor, ScrollValue};
    use serde_json::json;

    fn target(name: &str) -> ElementDescriptor {
        ElementDescriptor::new(json!({ "node": name }))
    }

    fn event(kind: EventKind, trusted: bool, name: &str) -> ElementEvent {
        ElementEvent {
            page: 0,
            time: 0,
            is_trusted: trusted,
            target: target(name),
            kind,
        }
    }

    fn scroll(trusted: bool, name: &str, y: i64) -> ElementEvent {
        event(
            EventKind::Scroll {
                value: ScrollValue { x: 0, y },
            },
            trusted,
            name,
        )
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(build_steps(&[]).is_empty());
    }

    #[test]
    fn output_is_non_decreasing_in_index() {
        let events = vec![
            event(EventKind::Click, true, "a"),
            scroll(true, "pane", 10),
            scroll(true, "pane", 40),
            event(EventKind::Keydown { value: "Tab".into() }, true, "a"),
            event(EventKind::Paste { value: "x".into() }, true, "a"),
            event(EventKind::Input { value: "one".into() }, true, "sel"),
        ];
        let steps = build_steps(&events);
        assert!(steps.windows(2).all(|w| w[0].index <= w[1].index));
    }

    #[test]
    fn untrusted_scrolls_contribute_nothing() {
        let events = vec![scroll(false, "pane", 10), scroll(false, "pane", 40)];
        assert!(build_scroll_steps(&events).is_empty());
    }

    #[test]
    fn untrusted_events_of_any_kind_are_ignored() {
        let events = vec![
            event(EventKind::Click, false, "a"),
            event(EventKind::Keydown { value: "a".into() }, false, "a"),
            event(EventKind::Keyup { value: "a".into() }, false, "a"),
            event(EventKind::Paste { value: "p".into() }, false, "a"),
            event(EventKind::Input { value: "v".into() }, false, "a"),
        ];
        assert!(build_steps(&events).is_empty());
    }

    #[test]
    fn scroll_run_collapses_to_its_last_event() {
        let events = vec![
            scroll(true, "pane", 10),
            scroll(true, "pane", 25),
            scroll(true, "pane", 40),
            event(EventKind::Click, true, "a"),
        ];
        let steps = build_scroll_steps(&events);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].index, 2);
        assert_eq!(
            steps[0].action,
            StepAction::Scroll {
                value: ScrollValue { x: 0, y: 40 }
            }
        );
        assert!(!steps[0].can_change);
    }

    #[test]
    fn trailing_scroll_run_can_still_change() {
        let events = vec![scroll(true, "pane", 10), scroll(true, "pane", 40)];
        let steps = build_scroll_steps(&events);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].index, 1);
        assert!(steps[0].can_change);
    }

    #[test]
    fn separate_scroll_runs_each_produce_a_step() {
        let events = vec![
            scroll(true, "pane", 10),
            scroll(true, "pane", 40),
            event(EventKind::Click, true, "a"),
            scroll(true, "other", 5),
        ];
        let steps = build_scroll_steps(&events);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].index, 1);
        assert!(!steps[0].can_change);
        assert_eq!(steps[1].index, 3);
        assert!(steps[1].can_change);
    }

    #[test]
    fn discrete_kinds_map_one_to_one() {
        let events = vec![
            event(EventKind::Keydown { value: "a".into() }, true, "field"),
            event(EventKind::Keyup { value: "a".into() }, true, "field"),
            event(EventKind::Paste { value: "hi".into() }, true, "field"),
            event(EventKind::Input { value: "two".into() }, true, "sel"),
        ];
        let steps = build_steps(&events);
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].action, StepAction::Keydown { value: "a".into() });
        assert_eq!(steps[1].action, StepAction::Keyup { value: "a".into() });
        assert_eq!(steps[2].action, StepAction::Paste { value: "hi".into() });
        assert_eq!(steps[3].action, StepAction::Input { value: "two".into() });
        assert!(steps.iter().all(|s| !s.can_change));
    }

    #[test]
    fn reduction_is_idempotent() {
        let events = vec![
            event(EventKind::Click, true, "a"),
            scroll(true, "pane", 10),
            scroll(true, "pane", 40),
        ];
        assert_eq!(build_steps(&events), build_steps(&events));
    }

    #[test]
    fn click_scroll_run_keydown_scenario() {
        let events = vec![
            event(EventKind::Click, true, "button"),
            scroll(true, "a", 10),
            scroll(true, "a", 40),
            event(
                EventKind::Keydown {
                    value: "Enter".into(),
                },
                true,
                "button",
            ),
        ];

        let steps = build_steps(&events);
        assert_eq!(steps.len(), 3);

        assert_eq!(steps[0].action, StepAction::Click);
        assert_eq!(steps[0].index, 0);

        assert_eq!(
            steps[1].action,
            StepAction::Scroll {
                value: ScrollValue { x: 0, y: 40 }
            }
        );
        assert_eq!(steps[1].index, 2);
        assert!(!steps[1].can_change);

        assert_eq!(
            steps[2].action,
            StepAction::Keydown {
                value: "Enter".into()
            }
        );
        assert_eq!(steps[2].index, 3);
    }

    // Same scenario truncated after the second scroll: the run is the tail,
    // so its step may still change.
    #[test]
    fn truncated_scenario_marks_scroll_as_changeable() {
        let events = vec![
            event(EventKind::Click, true, "button"),
            scroll(true, "a", 10),
            scroll(true, "a", 40),
        ];

        let steps = build_steps(&events);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].index, 2);
        assert!(steps[1].can_change);
    }

    #[test]
    fn cross_page_events_keep_their_page_and_order() {
        let mut first = event(EventKind::Click, true, "a");
        first.page = 0;
        let mut second = event(EventKind::Click, true, "b");
        second.page = 1;

        let steps = build_steps(&[first, second]);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].page, 0);
        assert_eq!(steps[1].page, 1);
    }
}
