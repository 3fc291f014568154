//! Demo application: owns the committed value and feeds it back to the stepper.

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::config::Config;
use crate::ui::keybindings::{shortcuts_by_category_for_context, ShortcutContext};
use crate::ui::stepper::{Orientation, StepDescriptor, Stepper};
use crate::ui::TerminalGuard;

pub struct App {
    config: Config,
    stepper: Stepper,
    /// Values requested through `on_change`, applied on the next update
    changes: Receiver<usize>,
    show_help: bool,
    should_quit: bool,
    status_message: Option<String>,
}

impl App {
    pub fn new(config: Config, steps: Option<Vec<StepDescriptor>>) -> Self {
        let items = steps.unwrap_or_else(|| config.steps.clone());
        let (tx, changes) = mpsc::channel();

        let stepper = config
            .stepper
            .build(items)
            .on_change(move |event| {
                tracing::info!(value = event.value, "step change requested");
                // Receiver outlives the stepper; a send error only happens on shutdown
                let _ = tx.send(event.value);
            })
            .on_focus(|event| {
                tracing::trace!(trigger = ?event.trigger, "step focused");
            })
            .on_navigate(|event| {
                tracing::trace!(
                    prev = event.prev_index,
                    next = event.next_index,
                    "cursor moved"
                );
            });

        Self {
            config,
            stepper,
            changes,
            show_help: false,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn run(&mut self) -> Result<()> {
        let guard = TerminalGuard::new(self.config.ui.mouse)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.clear()?;

        self.stepper.focus();
        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);
        tracing::info!(
            steps = self.stepper.num_steps(),
            value = self.stepper.value(),
            mouse = guard.mouse_enabled(),
            "stepper demo started"
        );

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                let event = event::read()?;
                self.handle_event(&event);
            }
        }

        drop(guard);
        tracing::info!(value = self.stepper.value(), "stepper demo finished");
        Ok(())
    }

    /// Route one terminal event, then apply any requested change
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Mouse(mouse) => {
                self.stepper.handle_mouse(*mouse);
            }
            _ => {}
        }
        self.apply_changes();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        if self.stepper.handle_key(key).is_handled() {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => {
                if self.stepper.has_focus() {
                    self.stepper.blur();
                } else {
                    self.stepper.focus();
                }
            }
            _ => {}
        }
    }

    /// The caller side of the controlled value: accept every request
    fn apply_changes(&mut self) {
        while let Ok(value) = self.changes.try_recv() {
            self.stepper.set_value(value);
            let label = self
                .stepper
                .items()
                .get(value)
                .and_then(|step| step.label.clone())
                .unwrap_or_else(|| format!("Step {}", value + 1));
            self.status_message = Some(format!("Selected {}", label));
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let stepper_height = match self.config.stepper.orientation {
            Orientation::Horizontal => Constraint::Length(5),
            Orientation::Vertical => Constraint::Min(0),
        };
        let [header, body, info, footer] = Layout::vertical([
            Constraint::Length(1),
            stepper_height,
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " stepline ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))),
            header,
        );

        let block = Block::default().borders(Borders::ALL).border_style(
            if self.stepper.has_focus() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        );
        let inner = block.inner(body);
        frame.render_widget(block, body);
        self.stepper.render(frame, inner);

        self.render_info(frame, info);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" ←→ ", Style::default().fg(Color::Cyan)),
                Span::raw("move  "),
                Span::styled("Enter ", Style::default().fg(Color::Cyan)),
                Span::raw("select  "),
                Span::styled("Tab ", Style::default().fg(Color::Cyan)),
                Span::raw("focus  "),
                Span::styled("? ", Style::default().fg(Color::Cyan)),
                Span::raw("help  "),
                Span::styled("q ", Style::default().fg(Color::Cyan)),
                Span::raw("quit"),
            ])),
            footer,
        );

        if self.show_help {
            self.render_help(frame);
        }
    }

    fn render_info(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(format!(
            " value: {}  cursor: {}  linear: {}  focused: {}",
            self.stepper.value(),
            self.stepper.focused_index(),
            self.stepper.is_linear(),
            self.stepper.has_focus(),
        ))];
        if let Some(message) = &self.status_message {
            lines.push(Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(Color::Green),
            )));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_help(&self, frame: &mut Frame) {
        let mut lines = Vec::new();
        for context in ShortcutContext::all() {
            lines.push(Line::from(Span::styled(
                context.display_name(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for (_, shortcuts) in shortcuts_by_category_for_context(*context) {
                for shortcut in shortcuts {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("  {}", shortcut.key_display_padded()),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::raw(shortcut.description),
                    ]));
                }
            }
            lines.push(Line::default());
        }

        let height = (lines.len() as u16).saturating_add(2);
        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(frame.area());
        let [area] = Layout::horizontal([Constraint::Length(50)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help ")),
            area,
        );
    }
}
