//! Event payloads emitted by the stepper and its steps

use crossterm::event::{Event, KeyEvent, MouseEvent};
use ratatui::layout::Rect;

/// What caused a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Requested through the API rather than by user input
    Programmatic,
}

impl Trigger {
    /// The raw terminal event behind this trigger, if any
    pub fn native(&self) -> Option<Event> {
        match self {
            Trigger::Key(key) => Some(Event::Key(*key)),
            Trigger::Mouse(mouse) => Some(Event::Mouse(*mouse)),
            Trigger::Programmatic => None,
        }
    }
}

/// Snapshot of the stepper handle carried by stepper-level events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepperRef {
    /// Area the stepper occupied at its last render
    pub element: Option<Rect>,
}

/// Snapshot of a single step carried by step-level events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRef {
    pub index: usize,
    /// Area the step occupied at its last render
    pub element: Option<Rect>,
}

/// A step asking the stepper to commit it
#[derive(Debug, Clone, PartialEq)]
pub struct StepChangeEvent {
    pub value: usize,
    pub target: StepRef,
    pub trigger: Trigger,
}

/// A step reporting that it received input focus
#[derive(Debug, Clone, PartialEq)]
pub struct StepFocusEvent {
    pub target: StepRef,
    pub trigger: Trigger,
}

/// Emitted to `on_change` when a commit passes the gate
#[derive(Debug, Clone, PartialEq)]
pub struct StepperChangeEvent {
    /// Requested step index
    pub value: usize,
    pub target: StepperRef,
    pub trigger: Trigger,
    pub native: Option<Event>,
}

/// Emitted to `on_focus` when a step receives input focus
#[derive(Debug, Clone, PartialEq)]
pub struct StepperFocusEvent {
    pub target: StepperRef,
    pub trigger: Trigger,
    pub native: Option<Event>,
}

/// Emitted to `on_navigate` when the keyboard cursor moves
#[derive(Debug, Clone, PartialEq)]
pub struct StepperNavigateEvent {
    pub target: StepperRef,
    pub prev_index: usize,
    pub next_index: usize,
    pub trigger: Trigger,
}

pub type ChangeHandler = Box<dyn FnMut(&StepperChangeEvent)>;
pub type FocusHandler = Box<dyn FnMut(&StepperFocusEvent)>;
pub type NavigateHandler = Box<dyn FnMut(&StepperNavigateEvent)>;
