//! Centralized keyboard shortcuts registry.
//!
//! Single source of truth for the keys the stepper intercepts and the keys the
//! demo application binds. Consumed by the help overlay and the `shortcuts`
//! subcommand.

use crossterm::event::KeyCode;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key
    pub alt_key: Option<KeyCode>,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    /// Category for grouping in help/docs
    pub category: ShortcutCategory,
    /// Context where this shortcut is active
    pub context: ShortcutContext,
}

/// Categories for organizing shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Navigation,
    Actions,
}

/// Contexts where shortcuts are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Intercepted by the stepper while it has focus
    Stepper,
    /// Bound by the demo application
    Demo,
}

impl ShortcutCategory {
    /// Display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutCategory::General => "General",
            ShortcutCategory::Navigation => "Navigation",
            ShortcutCategory::Actions => "Actions",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::General,
            ShortcutCategory::Navigation,
            ShortcutCategory::Actions,
        ]
    }
}

impl ShortcutContext {
    /// Display name for this context
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutContext::Stepper => "Stepper",
            ShortcutContext::Demo => "Demo",
        }
    }

    /// All contexts in display order
    pub fn all() -> &'static [ShortcutContext] {
        &[ShortcutContext::Stepper, ShortcutContext::Demo]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Tab", "Enter/Space")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    /// Format key for help overlay (left-padded to 12 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<12}", self.key_display())
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => format!("{:?}", key),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // === Stepper Context ===
    Shortcut {
        key: KeyCode::Left,
        alt_key: None,
        description: "Previous step (next under RTL)",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Stepper,
    },
    Shortcut {
        key: KeyCode::Right,
        alt_key: None,
        description: "Next step (previous under RTL)",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Stepper,
    },
    Shortcut {
        key: KeyCode::Up,
        alt_key: None,
        description: "Previous step",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Stepper,
    },
    Shortcut {
        key: KeyCode::Down,
        alt_key: None,
        description: "Next step",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Stepper,
    },
    Shortcut {
        key: KeyCode::Home,
        alt_key: None,
        description: "First step",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Stepper,
    },
    Shortcut {
        key: KeyCode::End,
        alt_key: None,
        description: "Last step",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Stepper,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: Some(KeyCode::Char(' ')),
        description: "Select focused step",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Stepper,
    },
    // === Demo Context ===
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: Some(KeyCode::Esc),
        description: "Quit",
        category: ShortcutCategory::General,
        context: ShortcutContext::Demo,
    },
    Shortcut {
        key: KeyCode::Char('?'),
        alt_key: None,
        description: "Toggle help",
        category: ShortcutCategory::General,
        context: ShortcutContext::Demo,
    },
    Shortcut {
        key: KeyCode::Tab,
        alt_key: None,
        description: "Focus / unfocus the stepper",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Demo,
    },
];

/// Get all shortcuts for a given context
pub fn shortcuts_for_context(context: ShortcutContext) -> impl Iterator<Item = &'static Shortcut> {
    SHORTCUTS.iter().filter(move |s| s.context == context)
}

/// Whether the stepper intercepts this key
pub fn is_stepper_key(key: KeyCode) -> bool {
    shortcuts_for_context(ShortcutContext::Stepper)
        .any(|s| s.key == key || s.alt_key == Some(key))
}

/// Get shortcuts grouped by category for a given context
pub fn shortcuts_by_category_for_context(
    context: ShortcutContext,
) -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    let mut result = Vec::new();
    for category in ShortcutCategory::all() {
        let shortcuts: Vec<&Shortcut> = SHORTCUTS
            .iter()
            .filter(|s| s.context == context && s.category == *category)
            .collect();
        if !shortcuts.is_empty() {
            result.push((*category, shortcuts));
        }
    }
    result
}

/// Render the registry as a markdown table per context
pub fn shortcuts_markdown() -> String {
    let mut out = String::new();
    for context in ShortcutContext::all() {
        out.push_str(&format!("## {}\n\n", context.display_name()));
        out.push_str("| Key | Action | Category |\n|---|---|---|\n");
        for (category, shortcuts) in shortcuts_by_category_for_context(*context) {
            for shortcut in shortcuts {
                out.push_str(&format!(
                    "| `{}` | {} | {} |\n",
                    shortcut.key_display(),
                    shortcut.description,
                    category.display_name()
                ));
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_shortcuts_have_descriptions() {
        for shortcut in SHORTCUTS {
            assert!(
                !shortcut.description.is_empty(),
                "Shortcut {:?} has empty description",
                shortcut.key
            );
        }
    }

    #[test]
    fn test_key_display_with_alt() {
        let shortcut = Shortcut {
            key: KeyCode::Enter,
            alt_key: Some(KeyCode::Char(' ')),
            description: "Test",
            category: ShortcutCategory::Actions,
            context: ShortcutContext::Stepper,
        };
        assert_eq!(shortcut.key_display(), "Enter/Space");
    }

    #[test]
    fn test_key_display_special_keys() {
        assert_eq!(format_keycode(&KeyCode::Home), "Home");
        assert_eq!(format_keycode(&KeyCode::End), "End");
        assert_eq!(format_keycode(&KeyCode::Left), "←");
        assert_eq!(format_keycode(&KeyCode::Esc), "Esc");
    }

    #[test]
    fn test_stepper_intercepts_exactly_the_navigation_keys() {
        for code in [
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::Enter,
            KeyCode::Char(' '),
        ] {
            assert!(is_stepper_key(code), "{code:?} should be intercepted");
        }
        assert!(!is_stepper_key(KeyCode::Tab));
        assert!(!is_stepper_key(KeyCode::Char('q')));
        assert!(!is_stepper_key(KeyCode::PageDown));
    }

    #[test]
    fn test_shortcuts_by_category_for_context() {
        let grouped = shortcuts_by_category_for_context(ShortcutContext::Stepper);
        let categories: Vec<_> = grouped.iter().map(|(cat, _)| *cat).collect();
        assert_eq!(
            categories,
            vec![ShortcutCategory::Navigation, ShortcutCategory::Actions]
        );
    }

    #[test]
    fn test_markdown_lists_every_context() {
        let md = shortcuts_markdown();
        assert!(md.contains("## Stepper"));
        assert!(md.contains("## Demo"));
        assert!(md.contains("| `Enter/Space` | Select focused step | Actions |"));
    }
}
