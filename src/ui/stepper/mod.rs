//! Stepper widget: a row (or column) of steps with a keyboard cursor.
//!
//! The committed `value` belongs to the caller. The stepper only owns the
//! keyboard cursor (`focused_index`) and asks for a new value through
//! `on_change`; nothing changes on screen until the caller calls
//! [`Stepper::set_value`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    Frame,
};

mod context;
mod events;
mod icons;
mod step;
mod types;

pub use context::StepperContext;
pub use events::*;
pub use icons::{glyph_for_icon, DEFAULT_ERROR_ICON, DEFAULT_SUCCESS_ICON};
pub use step::*;
pub use types::*;


/// Rows given to each step in vertical orientation
const VERTICAL_STEP_HEIGHT: u16 = 2;

/// Cursor movement requested by a navigation key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorMove {
    Prev,
    Next,
    First,
    Last,
}

/// Stepper controller and widget
pub struct Stepper {
    items: Vec<StepDescriptor>,
    /// Committed step, owned by the caller
    value: usize,
    linear: bool,
    disabled: bool,
    orientation: Orientation,
    display_mode: DisplayMode,
    dir: TextDirection,
    animation_duration: AnimationDuration,
    success_icon: Option<String>,
    error_icon: Option<String>,
    focus_sync: FocusSync,
    /// Custom step renderer
    item: Option<Box<dyn StepRenderer>>,
    on_change: Option<ChangeHandler>,
    on_focus: Option<FocusHandler>,
    on_navigate: Option<NavigateHandler>,
    // ─── Owned state ────────────────────────────────────────────────────────
    /// Keyboard cursor, seeded from `value`
    focused_index: usize,
    /// Whether input focus is inside the stepper
    has_focus: bool,
    /// Area of the last render
    element: Option<Rect>,
    /// Step areas of the last render, by step index
    step_areas: Vec<Rect>,
}

impl Stepper {
    /// Create a stepper over `items` with the caller's committed `value`
    pub fn new(items: Vec<StepDescriptor>, value: usize) -> Self {
        Self {
            items,
            value,
            linear: false,
            disabled: false,
            orientation: Orientation::default(),
            display_mode: DisplayMode::default(),
            dir: TextDirection::default(),
            animation_duration: AnimationDuration::default(),
            success_icon: None,
            error_icon: None,
            focus_sync: FocusSync::default(),
            item: None,
            on_change: None,
            on_focus: None,
            on_navigate: None,
            focused_index: value,
            has_focus: false,
            element: None,
            step_areas: Vec::new(),
        }
    }

    // ─── Builder ────────────────────────────────────────────────────────────

    pub fn linear(mut self, linear: bool) -> Self {
        self.linear = linear;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn display_mode(mut self, display_mode: DisplayMode) -> Self {
        self.display_mode = display_mode;
        self
    }

    pub fn dir(mut self, dir: TextDirection) -> Self {
        self.dir = dir;
        self
    }

    pub fn animation_duration(mut self, animation_duration: AnimationDuration) -> Self {
        self.animation_duration = animation_duration;
        self
    }

    pub fn success_icon(mut self, icon: impl Into<String>) -> Self {
        self.success_icon = Some(icon.into());
        self
    }

    pub fn error_icon(mut self, icon: impl Into<String>) -> Self {
        self.error_icon = Some(icon.into());
        self
    }

    pub fn focus_sync(mut self, focus_sync: FocusSync) -> Self {
        self.focus_sync = focus_sync;
        self
    }

    /// Replace the default step composition
    pub fn item(mut self, renderer: impl StepRenderer + 'static) -> Self {
        self.item = Some(Box::new(renderer));
        self
    }

    pub fn on_change(mut self, handler: impl FnMut(&StepperChangeEvent) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn on_focus(mut self, handler: impl FnMut(&StepperFocusEvent) + 'static) -> Self {
        self.on_focus = Some(Box::new(handler));
        self
    }

    pub fn on_navigate(mut self, handler: impl FnMut(&StepperNavigateEvent) + 'static) -> Self {
        self.on_navigate = Some(Box::new(handler));
        self
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn items(&self) -> &[StepDescriptor] {
        &self.items
    }

    pub fn num_steps(&self) -> usize {
        self.items.len()
    }

    pub fn value(&self) -> usize {
        self.value
    }

    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_linear(&self) -> bool {
        self.linear
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Area of the last render
    pub fn element(&self) -> Option<Rect> {
        self.element
    }

    /// Area of a step at the last render
    pub fn step_element(&self, index: usize) -> Option<Rect> {
        self.step_areas.get(index).copied()
    }

    // ─── Caller-driven updates ──────────────────────────────────────────────

    /// Apply the caller's committed value.
    ///
    /// The cursor only follows under [`FocusSync::FollowValue`].
    pub fn set_value(&mut self, value: usize) {
        if value == self.value {
            return;
        }
        tracing::debug!(from = self.value, to = value, "stepper value updated by caller");
        self.value = value;
        if self.focus_sync == FocusSync::FollowValue && value < self.items.len() {
            self.focused_index = value;
        }
    }

    /// Replace the steps. A cursor past the new end is pulled back onto the last step.
    pub fn set_items(&mut self, items: Vec<StepDescriptor>) {
        self.items = items;
        self.step_areas.clear();
        if let Some(last) = self.items.len().checked_sub(1) {
            if self.focused_index > last {
                tracing::debug!(from = self.focused_index, to = last, "cursor clamped to new steps");
                self.focused_index = last;
            }
        }
    }

    pub fn set_linear(&mut self, linear: bool) {
        self.linear = linear;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_display_mode(&mut self, display_mode: DisplayMode) {
        self.display_mode = display_mode;
    }

    pub fn set_dir(&mut self, dir: TextDirection) {
        self.dir = dir;
    }

    // ─── Shared context ─────────────────────────────────────────────────────

    /// Navigation state for the current pass
    pub fn context(&self) -> StepperContext<'_> {
        StepperContext {
            value: self.value,
            linear: self.linear,
            display_mode: self.display_mode,
            orientation: self.orientation,
            dir: self.dir,
            num_steps: self.items.len(),
            success_icon: self.success_icon.as_deref(),
            error_icon: self.error_icon.as_deref(),
            transition: self.animation_duration.resolve(),
            custom_item: self.item.is_some(),
            has_focus: self.has_focus,
        }
    }

    /// Props the stepper hands to the step at `index`
    pub fn step_props(&self, index: usize) -> Option<StepProps<'_>> {
        let descriptor = self.items.get(index)?;
        Some(StepProps {
            index,
            descriptor,
            disabled: self.disabled || descriptor.disabled,
            focused: index == self.focused_index,
            current: index == self.value,
            element: self.step_element(index),
        })
    }

    // ─── Imperative handle ──────────────────────────────────────────────────

    pub fn handle(&mut self) -> StepperHandle<'_> {
        StepperHandle { stepper: self }
    }

    fn target(&self) -> StepperRef {
        StepperRef {
            element: self.element,
        }
    }

    /// Move input focus to the first tabbable step. No-op without one.
    pub fn focus(&mut self) {
        let Some(index) = self.first_tabbable() else {
            tracing::trace!("stepper has no tabbable step to focus");
            return;
        };
        self.has_focus = true;
        self.focus_step(index, Trigger::Programmatic);
    }

    pub fn blur(&mut self) {
        self.has_focus = false;
    }

    fn first_tabbable(&self) -> Option<usize> {
        let ctx = self.context();
        (0..self.items.len()).find(|&index| {
            self.step_props(index)
                .is_some_and(|props| StepItem::new(props, &ctx).tab_index() >= 0)
        })
    }

    // ─── Input ──────────────────────────────────────────────────────────────

    /// Interpret a key press while the stepper has focus.
    ///
    /// Left/Right are mirrored under RTL; Up/Down never are.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind != KeyEventKind::Press || !self.has_focus {
            return KeyOutcome::Ignored;
        }

        let trigger = Trigger::Key(key);
        let rtl = self.dir.is_rtl();
        match key.code {
            KeyCode::Left => {
                let mv = if rtl { CursorMove::Next } else { CursorMove::Prev };
                self.move_cursor(mv, trigger);
            }
            KeyCode::Right => {
                let mv = if rtl { CursorMove::Prev } else { CursorMove::Next };
                self.move_cursor(mv, trigger);
            }
            KeyCode::Up => self.move_cursor(CursorMove::Prev, trigger),
            KeyCode::Down => self.move_cursor(CursorMove::Next, trigger),
            KeyCode::Home => self.move_cursor(CursorMove::First, trigger),
            KeyCode::End => self.move_cursor(CursorMove::Last, trigger),
            KeyCode::Enter | KeyCode::Char(' ') => self.commit_focused(trigger),
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    /// Left click on a step: focus it, then activate it
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> KeyOutcome {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return KeyOutcome::Ignored;
        }
        let position = Position::new(mouse.column, mouse.row);
        let Some(index) = self
            .step_areas
            .iter()
            .position(|area| area.contains(position))
        else {
            return KeyOutcome::Ignored;
        };

        let trigger = Trigger::Mouse(mouse);
        // A disabled stepper never takes keyboard focus
        if !self.disabled {
            self.has_focus = true;
        }
        self.focus_step(index, trigger);
        self.click_step(index, trigger);
        KeyOutcome::Handled
    }

    /// Ask to commit `candidate` as the new value.
    ///
    /// Returns whether `on_change` fired.
    pub fn request_change(&mut self, candidate: usize) -> bool {
        self.dispatch_change(candidate, Trigger::Programmatic)
    }

    /// Where a cursor move lands, clamped into the step range
    fn cursor_target(&self, mv: CursorMove) -> Option<usize> {
        let last = self.items.len().checked_sub(1)?;
        let current = self.focused_index.min(last);
        Some(match mv {
            CursorMove::Prev => current.saturating_sub(1),
            CursorMove::Next => (current + 1).min(last),
            CursorMove::First => 0,
            CursorMove::Last => last,
        })
    }

    fn move_cursor(&mut self, mv: CursorMove, trigger: Trigger) {
        let Some(next) = self.cursor_target(mv) else {
            return;
        };
        let prev = self.focused_index;
        if next == prev {
            return;
        }
        self.focused_index = next;
        tracing::trace!(prev, next, ?mv, "stepper cursor moved");

        let event = StepperNavigateEvent {
            target: self.target(),
            prev_index: prev,
            next_index: next,
            trigger,
        };
        if let Some(handler) = self.on_navigate.as_mut() {
            handler(&event);
        }
    }

    /// Enter/Space on the cursor step; disabled steps are skipped
    fn commit_focused(&mut self, trigger: Trigger) {
        match self.items.get(self.focused_index) {
            Some(step) if !step.disabled => {
                self.dispatch_change(self.focused_index, trigger);
            }
            Some(_) => {
                tracing::debug!(index = self.focused_index, "commit skipped: step disabled");
            }
            None => {
                tracing::debug!(index = self.focused_index, "commit skipped: cursor out of range");
            }
        }
    }

    fn click_step(&mut self, index: usize, trigger: Trigger) {
        let request = {
            let ctx = self.context();
            self.step_props(index)
                .and_then(|props| StepItem::new(props, &ctx).activate(trigger))
        };
        if let Some(request) = request {
            self.handle_step_change(&request);
        }
    }

    fn focus_step(&mut self, index: usize, trigger: Trigger) {
        let request = {
            let ctx = self.context();
            self.step_props(index)
                .and_then(|props| StepItem::new(props, &ctx).receive_focus(trigger))
        };
        if let Some(request) = request {
            self.handle_step_focus(&request);
        }
    }

    /// Change request coming up from a step
    pub fn handle_step_change(&mut self, event: &StepChangeEvent) -> bool {
        self.dispatch_change(event.value, event.trigger)
    }

    /// Focus report coming up from a step; never moves the cursor
    pub fn handle_step_focus(&mut self, event: &StepFocusEvent) {
        if self.disabled {
            return;
        }
        let target = self.target();
        if let Some(handler) = self.on_focus.as_mut() {
            handler(&StepperFocusEvent {
                target,
                trigger: event.trigger,
                native: event.trigger.native(),
            });
        }
    }

    /// The single gate every commit goes through
    fn dispatch_change(&mut self, candidate: usize, trigger: Trigger) -> bool {
        let allowed = !self.linear || candidate.abs_diff(self.value) <= 1;
        let exists = candidate < self.items.len();
        if candidate == self.value || self.disabled || !allowed || !exists {
            tracing::debug!(
                candidate,
                value = self.value,
                num_steps = self.items.len(),
                linear = self.linear,
                disabled = self.disabled,
                "change request rejected"
            );
            return false;
        }

        let target = self.target();
        let Some(handler) = self.on_change.as_mut() else {
            return false;
        };
        handler(&StepperChangeEvent {
            value: candidate,
            target,
            trigger,
            native: trigger.native(),
        });
        tracing::debug!(candidate, value = self.value, "change requested");
        self.focused_index = candidate;
        true
    }

    // ─── Rendering ──────────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.render_to_buffer(area, frame.buffer_mut());
    }

    /// Lay out and draw every step, recording areas for hit testing
    pub fn render_to_buffer(&mut self, area: Rect, buf: &mut Buffer) {
        self.element = Some(area);
        self.step_areas = self.layout_steps(area);

        let ctx = self.context();
        let renderer: &dyn StepRenderer = self.item.as_deref().unwrap_or(&DefaultStep);
        for (index, step_area) in self.step_areas.iter().enumerate() {
            if let Some(props) = self.step_props(index) {
                renderer.render(&StepItem::new(props, &ctx), *step_area, buf);
            }
        }
    }

    fn layout_steps(&self, area: Rect) -> Vec<Rect> {
        let count = self.items.len();
        if count == 0 {
            return Vec::new();
        }

        match self.orientation {
            Orientation::Horizontal => {
                let mut areas = Layout::horizontal(vec![Constraint::Ratio(1, count as u32); count])
                    .split(area)
                    .to_vec();
                // Mirrored visually only; areas stay indexed by step
                if self.dir.is_rtl() {
                    areas.reverse();
                }
                areas
            }
            Orientation::Vertical => {
                let constraints = std::iter::repeat(Constraint::Length(VERTICAL_STEP_HEIGHT))
                    .take(count)
                    .chain(std::iter::once(Constraint::Min(0)));
                Layout::vertical(constraints).split(area)[..count].to_vec()
            }
        }
    }
}

/// Handle returned by [`Stepper::handle`]
pub struct StepperHandle<'a> {
    stepper: &'a mut Stepper,
}

impl StepperHandle<'_> {
    /// Area the stepper occupied at its last render
    pub fn element(&self) -> Option<Rect> {
        self.stepper.element()
    }

    pub fn focus(&mut self) {
        self.stepper.focus();
    }
}
