//! Type definitions for the stepper widget

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Transition applied to the indicator when `animation_duration` is left unset
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(400);

/// Marker appended to the label of optional steps
pub const OPTIONAL_TEXT: &str = "(Optional)";

/// Caller-supplied description of one step.
///
/// Position in the list is the only identity a step has.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepDescriptor {
    /// Text shown in the label slot (and used as the step title)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Text shown in the indicator instead of the ordinal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Icon identifier shown in the indicator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Validity: unset, valid or invalid
    #[serde(default, alias = "isValid", skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub disabled: bool,
    /// Explicit tab index; overrides the roving tab stop.
    /// `Some(0)` is a real override that makes the step tabbable, only `None` falls back.
    #[serde(default, alias = "tabIndex", skip_serializing_if = "Option::is_none")]
    pub tab_index: Option<i32>,
    /// Free-form fields passed through to custom renderers
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl StepDescriptor {
    /// Create a descriptor with only a label
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_valid(mut self, is_valid: bool) -> Self {
        self.is_valid = Some(is_valid);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Attach an extension field for custom renderers
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Read an extension field as a string
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_json::Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// What each step shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Indicator plus label
    #[default]
    Steps,
    /// Label only
    Labels,
}

/// Text direction; only Left/Right are mirrored under RTL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn is_rtl(self) -> bool {
        self == TextDirection::Rtl
    }
}

/// Indicator transition: `false` disables it, `true` uses the default,
/// a number is an explicit duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimationDuration {
    Enabled(bool),
    Millis(u64),
}

impl Default for AnimationDuration {
    fn default() -> Self {
        AnimationDuration::Enabled(true)
    }
}

impl AnimationDuration {
    pub fn resolve(self) -> Duration {
        match self {
            AnimationDuration::Enabled(true) => DEFAULT_ANIMATION_DURATION,
            AnimationDuration::Enabled(false) => Duration::ZERO,
            AnimationDuration::Millis(ms) => Duration::from_millis(ms),
        }
    }
}

/// What happens to the keyboard cursor when the caller changes `value`
/// without going through a commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusSync {
    /// Cursor stays where it is (it was only seeded from `value` once)
    #[default]
    Preserve,
    /// Cursor jumps to the new value when it names an existing step
    FollowValue,
}

/// Whether the stepper consumed an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The event was interpreted; its default action is suppressed
    Handled,
    /// The event is not ours; pass it on
    Ignored,
}

impl KeyOutcome {
    pub fn is_handled(self) -> bool {
        self == KeyOutcome::Handled
    }
}
