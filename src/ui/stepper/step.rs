//! A single step: derived flags, accessibility attributes and rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::context::StepperContext;
use super::events::{StepChangeEvent, StepFocusEvent, StepRef, Trigger};
use super::icons::{glyph_for_icon, DEFAULT_ERROR_ICON, DEFAULT_SUCCESS_ICON};
use super::types::{DisplayMode, StepDescriptor, OPTIONAL_TEXT};

/// Per-step props computed by the stepper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepProps<'a> {
    pub index: usize,
    pub descriptor: &'a StepDescriptor,
    /// Step or whole stepper disabled
    pub disabled: bool,
    /// Step holds the keyboard cursor
    pub focused: bool,
    /// Step is the committed value
    pub current: bool,
    /// Area from the last render
    pub element: Option<Rect>,
}

/// Style flags a renderer can key off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepFlags {
    pub first: bool,
    pub last: bool,
    pub done: bool,
    pub current: bool,
    pub optional: bool,
    pub disabled: bool,
    pub focused: bool,
    pub error: bool,
    pub success: bool,
}

/// Accessibility attributes of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AriaAttributes {
    /// `aria-current="step"`
    pub current: bool,
    pub disabled: bool,
    pub invalid: bool,
    pub tab_index: i32,
}

impl AriaAttributes {
    /// Attribute list as it would be written on the step link.
    /// Unset boolean attributes are omitted.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("tabindex", self.tab_index.to_string())];
        if self.current {
            pairs.push(("aria-current", "step".to_string()));
        }
        if self.disabled {
            pairs.push(("aria-disabled", "true".to_string()));
        }
        if self.invalid {
            pairs.push(("aria-invalid", "true".to_string()));
        }
        pairs
    }
}

/// Content of the indicator slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indicator<'a> {
    /// Success or error glyph
    Validation(&'a str),
    /// Custom icon identifier from the descriptor
    Icon(&'a str),
    /// Custom text or the 1-based ordinal
    Text(String),
}

impl Indicator<'_> {
    pub fn glyph(&self) -> &str {
        match self {
            Indicator::Validation(glyph) => glyph,
            Indicator::Icon(name) => glyph_for_icon(name),
            Indicator::Text(text) => text,
        }
    }
}

/// Content of the label slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelSlot<'a> {
    pub text: Option<&'a str>,
    pub validation: Option<&'a str>,
    pub optional: Option<&'static str>,
}

/// One step as seen during a render or dispatch pass
#[derive(Debug, Clone, Copy)]
pub struct StepItem<'a> {
    pub props: StepProps<'a>,
    pub ctx: &'a StepperContext<'a>,
}

impl<'a> StepItem<'a> {
    pub fn new(props: StepProps<'a>, ctx: &'a StepperContext<'a>) -> Self {
        Self { props, ctx }
    }

    pub fn index(&self) -> usize {
        self.props.index
    }

    pub fn descriptor(&self) -> &'a StepDescriptor {
        self.props.descriptor
    }

    pub fn is_first(&self) -> bool {
        self.props.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.ctx.num_steps > 0 && self.props.index == self.ctx.num_steps - 1
    }

    pub fn is_done(&self) -> bool {
        self.props.index < self.ctx.value
    }

    pub fn is_current(&self) -> bool {
        self.props.current
    }

    /// Pointer affordance only; the stepper re-checks on commit
    pub fn visual_allow_click(&self) -> bool {
        self.ctx.allows_click(self.props.index)
    }

    pub fn flags(&self) -> StepFlags {
        let is_valid = self.props.descriptor.is_valid;
        StepFlags {
            first: self.is_first(),
            last: self.is_last(),
            done: self.is_done(),
            current: self.is_current(),
            optional: self.props.descriptor.optional,
            disabled: self.props.disabled,
            focused: self.props.focused,
            error: is_valid == Some(false),
            success: is_valid == Some(true),
        }
    }

    /// Roving tab stop unless the descriptor overrides it
    pub fn tab_index(&self) -> i32 {
        self.props
            .descriptor
            .tab_index
            .unwrap_or(if self.props.focused { 0 } else { -1 })
    }

    pub fn aria(&self) -> AriaAttributes {
        AriaAttributes {
            current: self.is_current(),
            disabled: self.props.disabled || !self.visual_allow_click(),
            invalid: self.props.descriptor.is_valid == Some(false),
            tab_index: self.tab_index(),
        }
    }

    pub fn title(&self) -> Option<&'a str> {
        self.props.descriptor.label.as_deref()
    }

    /// Validation glyph goes into the label rather than the indicator
    pub fn is_in_label(&self) -> bool {
        let descriptor = self.props.descriptor;
        self.ctx.display_mode == DisplayMode::Labels
            || (descriptor.icon.is_some() && descriptor.label.is_some())
    }

    pub fn validation_glyph(&self) -> Option<&'a str> {
        let name = match self.props.descriptor.is_valid? {
            true => self.ctx.success_icon.unwrap_or(DEFAULT_SUCCESS_ICON),
            false => self.ctx.error_icon.unwrap_or(DEFAULT_ERROR_ICON),
        };
        Some(glyph_for_icon(name))
    }

    /// Indicator slot; absent in label-only mode
    pub fn indicator(&self) -> Option<Indicator<'a>> {
        if self.ctx.display_mode == DisplayMode::Labels {
            return None;
        }
        let descriptor = self.props.descriptor;
        let validation = self.validation_glyph();

        let indicator = match (descriptor.icon.as_deref(), validation) {
            (Some(_), Some(glyph)) if !self.is_in_label() => Indicator::Validation(glyph),
            (Some(icon), _) => Indicator::Icon(icon),
            (None, Some(glyph)) => Indicator::Validation(glyph),
            (None, None) => Indicator::Text(
                descriptor
                    .text
                    .clone()
                    .unwrap_or_else(|| (self.props.index + 1).to_string()),
            ),
        };
        Some(indicator)
    }

    pub fn label(&self) -> LabelSlot<'a> {
        LabelSlot {
            text: self.props.descriptor.label.as_deref(),
            validation: if self.is_in_label() {
                self.validation_glyph()
            } else {
                None
            },
            optional: self.props.descriptor.optional.then_some(OPTIONAL_TEXT),
        }
    }

    pub fn step_ref(&self) -> StepRef {
        StepRef {
            index: self.props.index,
            element: self.props.element,
        }
    }

    /// Primary activation. Adjacency is not checked here; the stepper owns that gate.
    pub fn activate(&self, trigger: Trigger) -> Option<StepChangeEvent> {
        if self.props.disabled {
            return None;
        }
        Some(StepChangeEvent {
            value: self.props.index,
            target: self.step_ref(),
            trigger,
        })
    }

    pub fn receive_focus(&self, trigger: Trigger) -> Option<StepFocusEvent> {
        if self.props.disabled {
            return None;
        }
        Some(StepFocusEvent {
            target: self.step_ref(),
            trigger,
        })
    }
}

/// Visual composition of a step.
///
/// Swapping the renderer never changes flags, attributes or events.
pub trait StepRenderer {
    fn render(&self, step: &StepItem<'_>, area: Rect, buf: &mut Buffer);
}

/// Indicator plus label composition used when no custom renderer is set
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStep;

impl DefaultStep {
    pub fn indicator_style(flags: &StepFlags) -> Style {
        let style = Style::default();
        if flags.current {
            style
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if flags.disabled {
            style.fg(Color::DarkGray)
        } else if flags.error {
            style.fg(Color::Red)
        } else if flags.success || flags.done {
            style.fg(Color::Green)
        } else {
            style.fg(Color::Gray)
        }
    }

    pub fn label_style(step: &StepItem<'_>) -> Style {
        let flags = step.flags();
        let mut style = if flags.current {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if flags.disabled || !step.visual_allow_click() {
            Style::default().fg(Color::DarkGray)
        } else if flags.error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::White)
        };
        if flags.focused && step.ctx.has_focus {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    fn indicator_span(step: &StepItem<'_>) -> Option<Span<'static>> {
        let indicator = step.indicator()?;
        Some(Span::styled(
            format!("({})", indicator.glyph()),
            Self::indicator_style(&step.flags()),
        ))
    }

    fn label_spans(step: &StepItem<'_>) -> Vec<Span<'static>> {
        let slot = step.label();
        let mut spans = Vec::new();
        if let Some(text) = slot.text {
            spans.push(Span::styled(text.to_string(), Self::label_style(step)));
        }
        if let Some(glyph) = slot.validation {
            let color = if step.flags().error {
                Color::Red
            } else {
                Color::Green
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(glyph.to_string(), Style::default().fg(color)));
        }
        if let Some(optional) = slot.optional {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                optional,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        spans
    }
}

impl StepRenderer for DefaultStep {
    fn render(&self, step: &StepItem<'_>, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let indicator = Self::indicator_span(step);
        let label = Self::label_spans(step);

        if step.ctx.is_vertical() || area.height < 2 {
            // Single line: indicator then label
            let mut spans = Vec::new();
            if let Some(indicator) = indicator {
                spans.push(indicator);
                spans.push(Span::raw(" "));
            }
            spans.extend(label);
            let alignment = if step.ctx.dir.is_rtl() {
                Alignment::Right
            } else {
                Alignment::Left
            };
            Paragraph::new(Line::from(spans))
                .alignment(alignment)
                .render(area, buf);
            return;
        }

        let mut lines = Vec::new();
        if let Some(indicator) = indicator {
            lines.push(Line::from(indicator));
        }
        lines.push(Line::from(label));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::stepper::types::{Orientation, TextDirection};
    use std::time::Duration;

    fn ctx(value: usize, linear: bool, display_mode: DisplayMode) -> StepperContext<'static> {
        StepperContext {
            value,
            linear,
            display_mode,
            orientation: Orientation::Horizontal,
            dir: TextDirection::Ltr,
            num_steps: 4,
            success_icon: None,
            error_icon: None,
            transition: Duration::ZERO,
            custom_item: false,
            has_focus: true,
        }
    }

    fn props(index: usize, descriptor: &StepDescriptor, value: usize) -> StepProps<'_> {
        StepProps {
            index,
            descriptor,
            disabled: descriptor.disabled,
            focused: false,
            current: index == value,
            element: None,
        }
    }

    #[test]
    fn test_position_flags() {
        let descriptor = StepDescriptor::labeled("A");
        let context = ctx(1, false, DisplayMode::Steps);

        let first = StepItem::new(props(0, &descriptor, 1), &context);
        assert!(first.is_first());
        assert!(first.is_done());
        assert!(!first.is_current());

        let current = StepItem::new(props(1, &descriptor, 1), &context);
        assert!(current.is_current());
        assert!(!current.is_done());

        let last = StepItem::new(props(3, &descriptor, 1), &context);
        assert!(last.is_last());
        assert!(!last.is_done());
    }

    #[test]
    fn test_aria_current_only_on_value() {
        let descriptor = StepDescriptor::labeled("A");
        let context = ctx(2, false, DisplayMode::Steps);
        let current = StepItem::new(props(2, &descriptor, 2), &context).aria();
        let other = StepItem::new(props(1, &descriptor, 2), &context).aria();
        assert!(current.current);
        assert!(!other.current);
        assert!(current
            .to_pairs()
            .contains(&("aria-current", "step".to_string())));
        assert!(!other.to_pairs().iter().any(|(k, _)| *k == "aria-current"));
    }

    #[test]
    fn test_aria_disabled_when_visually_gated() {
        let descriptor = StepDescriptor::labeled("A");
        let context = ctx(0, true, DisplayMode::Steps);
        let near = StepItem::new(props(1, &descriptor, 0), &context);
        let far = StepItem::new(props(3, &descriptor, 0), &context);
        assert!(!near.aria().disabled);
        assert!(far.aria().disabled);
        assert!(!far.visual_allow_click());
    }

    #[test]
    fn test_aria_disabled_when_item_disabled() {
        let descriptor = StepDescriptor::labeled("A").disabled();
        let context = ctx(0, false, DisplayMode::Steps);
        let step = StepItem::new(props(1, &descriptor, 0), &context);
        assert!(step.aria().disabled);
        assert!(step
            .aria()
            .to_pairs()
            .contains(&("aria-disabled", "true".to_string())));
    }

    #[test]
    fn test_aria_invalid_only_when_explicitly_invalid() {
        let context = ctx(0, false, DisplayMode::Steps);
        let invalid = StepDescriptor::labeled("A").with_valid(false);
        let valid = StepDescriptor::labeled("A").with_valid(true);
        let unset = StepDescriptor::labeled("A");
        assert!(StepItem::new(props(1, &invalid, 0), &context).aria().invalid);
        assert!(!StepItem::new(props(1, &valid, 0), &context).aria().invalid);
        assert!(!StepItem::new(props(1, &unset, 0), &context).aria().invalid);
    }

    #[test]
    fn test_roving_tab_index() {
        let descriptor = StepDescriptor::labeled("A");
        let context = ctx(0, false, DisplayMode::Steps);
        let mut focused = props(1, &descriptor, 0);
        focused.focused = true;
        assert_eq!(StepItem::new(focused, &context).tab_index(), 0);
        assert_eq!(
            StepItem::new(props(2, &descriptor, 0), &context).tab_index(),
            -1
        );
    }

    #[test]
    fn test_explicit_tab_index_wins() {
        let descriptor = StepDescriptor::labeled("A").with_tab_index(3);
        let context = ctx(0, false, DisplayMode::Steps);
        assert_eq!(
            StepItem::new(props(2, &descriptor, 0), &context).tab_index(),
            3
        );
    }

    #[test]
    fn test_explicit_zero_tab_index_is_an_override() {
        let descriptor = StepDescriptor::labeled("A").with_tab_index(0);
        let context = ctx(0, false, DisplayMode::Steps);
        // Not focused, yet tabbable
        assert_eq!(
            StepItem::new(props(2, &descriptor, 0), &context).tab_index(),
            0
        );
    }

    #[test]
    fn test_indicator_defaults_to_ordinal() {
        let descriptor = StepDescriptor::labeled("A");
        let context = ctx(0, false, DisplayMode::Steps);
        let step = StepItem::new(props(2, &descriptor, 0), &context);
        assert_eq!(step.indicator(), Some(Indicator::Text("3".to_string())));
    }

    #[test]
    fn test_indicator_uses_custom_text() {
        let descriptor = StepDescriptor::default().with_text("A");
        let context = ctx(0, false, DisplayMode::Steps);
        let step = StepItem::new(props(2, &descriptor, 0), &context);
        assert_eq!(step.indicator(), Some(Indicator::Text("A".to_string())));
    }

    #[test]
    fn test_validation_glyph_replaces_ordinal() {
        let context = ctx(0, false, DisplayMode::Steps);
        let valid = StepDescriptor::labeled("A").with_valid(true);
        let invalid = StepDescriptor::labeled("A").with_valid(false);
        assert_eq!(
            StepItem::new(props(1, &valid, 0), &context).indicator(),
            Some(Indicator::Validation("✓"))
        );
        assert_eq!(
            StepItem::new(props(1, &invalid, 0), &context).indicator(),
            Some(Indicator::Validation("⚠"))
        );
    }

    #[test]
    fn test_icon_overrides_are_used() {
        let mut context = ctx(0, false, DisplayMode::Steps);
        context.success_icon = Some("check-circle");
        context.error_icon = Some("close-circle");
        let valid = StepDescriptor::default().with_valid(true);
        let invalid = StepDescriptor::default().with_valid(false);
        assert_eq!(
            StepItem::new(props(1, &valid, 0), &context).validation_glyph(),
            Some("✔")
        );
        assert_eq!(
            StepItem::new(props(1, &invalid, 0), &context).validation_glyph(),
            Some("✖")
        );
    }

    #[test]
    fn test_icon_with_label_moves_validation_into_label() {
        let descriptor = StepDescriptor::labeled("Cart")
            .with_icon("cart")
            .with_valid(false);
        let context = ctx(0, false, DisplayMode::Steps);
        let step = StepItem::new(props(1, &descriptor, 0), &context);
        assert!(step.is_in_label());
        assert_eq!(step.indicator(), Some(Indicator::Icon("cart")));
        assert_eq!(step.label().validation, Some("⚠"));
    }

    #[test]
    fn test_icon_without_label_shows_validation_in_indicator() {
        let descriptor = StepDescriptor::default().with_icon("cart").with_valid(true);
        let context = ctx(0, false, DisplayMode::Steps);
        let step = StepItem::new(props(1, &descriptor, 0), &context);
        assert!(!step.is_in_label());
        assert_eq!(step.indicator(), Some(Indicator::Validation("✓")));
        assert_eq!(step.label().validation, None);
    }

    #[test]
    fn test_labels_mode_has_no_indicator() {
        let descriptor = StepDescriptor::labeled("A").with_valid(true).optional();
        let context = ctx(0, false, DisplayMode::Labels);
        let step = StepItem::new(props(1, &descriptor, 0), &context);
        assert_eq!(step.indicator(), None);
        let label = step.label();
        assert_eq!(label.text, Some("A"));
        assert_eq!(label.validation, Some("✓"));
        assert_eq!(label.optional, Some(OPTIONAL_TEXT));
    }

    #[test]
    fn test_activation_ignores_linear_gate() {
        let descriptor = StepDescriptor::labeled("A");
        let context = ctx(0, true, DisplayMode::Steps);
        let far = StepItem::new(props(3, &descriptor, 0), &context);
        assert!(!far.visual_allow_click());
        let request = far.activate(Trigger::Programmatic).unwrap();
        assert_eq!(request.value, 3);
        assert_eq!(request.target.index, 3);
    }

    #[test]
    fn test_disabled_step_requests_nothing() {
        let descriptor = StepDescriptor::labeled("A").disabled();
        let context = ctx(0, false, DisplayMode::Steps);
        let step = StepItem::new(props(1, &descriptor, 0), &context);
        assert!(step.activate(Trigger::Programmatic).is_none());
        assert!(step.receive_focus(Trigger::Programmatic).is_none());
    }

    #[test]
    fn test_default_renderer_draws_indicator_and_label() {
        let descriptor = StepDescriptor::labeled("Ship").optional();
        let context = ctx(0, false, DisplayMode::Steps);
        let step = StepItem::new(props(1, &descriptor, 0), &context);
        let area = Rect::new(0, 0, 24, 2);
        let mut buf = Buffer::empty(area);
        DefaultStep.render(&step, area, &mut buf);

        let rows: Vec<String> = (0..2u16)
            .map(|y| (0..24u16).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect();
        assert!(rows[0].contains("(2)"));
        assert!(rows[1].contains("Ship"));
        assert!(rows[1].contains(OPTIONAL_TEXT));
    }
}
