//! Status card renderer for the demo.
//!
//! Reads the `status` and `detail` descriptor extension fields. When a step
//! carries no `status`, one is derived from its flags.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::stepper::{StepItem, StepRenderer};

/// Visual state of a status card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Success,
    Error,
    Active,
    Pending,
    Disabled,
}

impl StepStatus {
    /// Parse the `status` extension field
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "success" | "done" => Some(StepStatus::Success),
            "error" | "failed" => Some(StepStatus::Error),
            "active" | "running" => Some(StepStatus::Active),
            "pending" => Some(StepStatus::Pending),
            "disabled" => Some(StepStatus::Disabled),
            _ => None,
        }
    }

    /// Explicit `status` field, or a status derived from the step's flags
    pub fn of(step: &StepItem<'_>) -> Self {
        let flags = step.flags();
        if flags.disabled {
            return StepStatus::Disabled;
        }
        if let Some(status) = step.descriptor().extra_str("status").and_then(Self::parse) {
            return status;
        }
        if flags.error {
            StepStatus::Error
        } else if flags.current {
            StepStatus::Active
        } else if flags.success || flags.done {
            StepStatus::Success
        } else {
            StepStatus::Pending
        }
    }

    pub fn color(self) -> Color {
        match self {
            StepStatus::Success => Color::Green,
            StepStatus::Error => Color::Red,
            StepStatus::Active => Color::Cyan,
            StepStatus::Pending => Color::Gray,
            StepStatus::Disabled => Color::DarkGray,
        }
    }
}

/// Card with a colored top border, a title line and a detail line
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusStep;

impl StepRenderer for StatusStep {
    fn render(&self, step: &StepItem<'_>, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let status = StepStatus::of(step);
        let flags = step.flags();

        let mut title_style = Style::default().fg(status.color());
        if flags.current {
            title_style = title_style.add_modifier(Modifier::BOLD);
        }
        if flags.focused && step.ctx.has_focus {
            title_style = title_style.add_modifier(Modifier::UNDERLINED);
        }

        let glyph = step
            .indicator()
            .map(|indicator| indicator.glyph().to_string())
            .unwrap_or_default();
        let mut title = Vec::new();
        if !glyph.is_empty() {
            title.push(Span::styled(glyph, title_style));
            title.push(Span::raw(" "));
        }
        title.push(Span::styled(
            step.title().unwrap_or_default().to_string(),
            title_style,
        ));

        let mut lines = vec![Line::from(title)];
        if let Some(detail) = step.descriptor().extra_str("detail") {
            lines.push(Line::from(Span::styled(
                detail.to_string(),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let alignment = if step.ctx.is_vertical() {
            Alignment::Left
        } else {
            Alignment::Center
        };
        Paragraph::new(lines)
            .alignment(alignment)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(status.color())),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::stepper::{StepDescriptor, Stepper};

    fn rows(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_parse_status_aliases() {
        assert_eq!(StepStatus::parse("done"), Some(StepStatus::Success));
        assert_eq!(StepStatus::parse("FAILED"), Some(StepStatus::Error));
        assert_eq!(StepStatus::parse("running"), Some(StepStatus::Active));
        assert_eq!(StepStatus::parse("unknown"), None);
    }

    #[test]
    fn test_status_derived_from_flags() {
        let stepper = Stepper::new(
            vec![
                StepDescriptor::labeled("A"),
                StepDescriptor::labeled("B"),
                StepDescriptor::labeled("C").with_valid(false),
                StepDescriptor::labeled("D").disabled(),
                StepDescriptor::labeled("E"),
            ],
            1,
        );
        let ctx = stepper.context();
        let status = |index| StepStatus::of(&StepItem::new(stepper.step_props(index).unwrap(), &ctx));
        assert_eq!(status(0), StepStatus::Success);
        assert_eq!(status(1), StepStatus::Active);
        assert_eq!(status(2), StepStatus::Error);
        assert_eq!(status(3), StepStatus::Disabled);
        assert_eq!(status(4), StepStatus::Pending);
    }

    #[test]
    fn test_explicit_status_wins_over_flags() {
        let stepper = Stepper::new(
            vec![StepDescriptor::labeled("A").with_extra("status", "error")],
            0,
        );
        let ctx = stepper.context();
        let step = StepItem::new(stepper.step_props(0).unwrap(), &ctx);
        assert_eq!(StepStatus::of(&step), StepStatus::Error);
    }

    #[test]
    fn test_renders_border_title_and_detail() {
        let mut stepper = Stepper::new(
            vec![
                StepDescriptor::labeled("Build").with_extra("detail", "2m 10s"),
                StepDescriptor::labeled("Deploy"),
            ],
            0,
        )
        .item(StatusStep);
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        stepper.render_to_buffer(area, &mut buf);

        let rows = rows(&buf);
        assert!(rows[0].starts_with('─'));
        assert!(rows[1].contains("1 Build"));
        assert!(rows[1].contains("2 Deploy"));
        assert!(rows[2].contains("2m 10s"));
        assert_eq!(buf[(0, 0)].fg, Color::Cyan);
        assert_eq!(buf[(15, 0)].fg, Color::Gray);
    }
}
