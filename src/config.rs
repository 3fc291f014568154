use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ui::stepper::{
    AnimationDuration, DisplayMode, FocusSync, Orientation, StepDescriptor, Stepper, TextDirection,
};
use crate::ui::StatusStep;

/// Prefix for environment overrides, e.g. `STEPLINE__STEPPER__LINEAR=true`
pub const ENV_PREFIX: &str = "STEPLINE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub stepper: StepperConfig,
    /// Steps shown by the demo, in order
    #[serde(default)]
    pub steps: Vec<StepDescriptor>,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which renderer draws each step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    /// Indicator plus label
    Default,
    /// Status card driven by the `status` and `detail` step fields
    #[default]
    Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepperConfig {
    /// Initially committed step
    #[serde(default)]
    pub value: usize,
    #[serde(default)]
    pub linear: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub display_mode: DisplayMode,
    #[serde(default)]
    pub dir: TextDirection,
    /// `false`, `true` or milliseconds
    #[serde(default)]
    pub animation_duration: AnimationDuration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_icon: Option<String>,
    #[serde(default)]
    pub focus_sync: FocusSync,
    #[serde(default)]
    pub custom_renderer: RendererKind,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            value: 0,
            linear: false,
            disabled: false,
            orientation: Orientation::default(),
            display_mode: DisplayMode::default(),
            dir: TextDirection::default(),
            animation_duration: AnimationDuration::default(),
            success_icon: None,
            error_icon: None,
            focus_sync: FocusSync::default(),
            custom_renderer: RendererKind::default(),
        }
    }
}

impl StepperConfig {
    /// Build a stepper over `items` with these options. Handlers are left to the caller.
    pub fn build(&self, items: Vec<StepDescriptor>) -> Stepper {
        let mut stepper = Stepper::new(items, self.value)
            .linear(self.linear)
            .disabled(self.disabled)
            .orientation(self.orientation)
            .display_mode(self.display_mode)
            .dir(self.dir)
            .animation_duration(self.animation_duration)
            .focus_sync(self.focus_sync);
        if let Some(icon) = &self.success_icon {
            stepper = stepper.success_icon(icon.clone());
        }
        if let Some(icon) = &self.error_icon {
            stepper = stepper.error_icon(icon.clone());
        }
        if self.custom_renderer == RendererKind::Status {
            stepper = stepper.item(StatusStep);
        }
        stepper
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Capture the mouse so steps can be clicked
    #[serde(default = "default_mouse")]
    pub mouse: bool,
}

fn default_tick_rate() -> u64 {
    250
}

fn default_mouse() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            mouse: default_mouse(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,

    /// Log directory; defaults to the platform state directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
            dir: None,
        }
    }
}

/// Steps shown when nothing is configured
fn default_steps() -> Vec<StepDescriptor> {
    vec![
        StepDescriptor::labeled("Success")
            .with_valid(true)
            .with_extra("status", "success")
            .with_extra("detail", "optional"),
        StepDescriptor::labeled("Error")
            .with_valid(false)
            .with_extra("status", "error")
            .with_extra("detail", "optional"),
        StepDescriptor::labeled("Active")
            .with_extra("status", "active")
            .with_extra("detail", "optional"),
        StepDescriptor::labeled("Default")
            .with_extra("status", "default")
            .with_extra("detail", "optional"),
        StepDescriptor::labeled("Disabled")
            .disabled()
            .with_extra("status", "disabled")
            .with_extra("detail", "optional"),
        StepDescriptor::labeled("Pending")
            .with_extra("status", "pending")
            .with_extra("detail", "optional"),
    ]
}

impl Config {
    /// User config file in `~/.config/stepline/`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stepline").join("config.toml"))
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Embedded defaults so the demo runs without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Get absolute path to the logs directory
    pub fn logs_path(&self) -> PathBuf {
        if let Some(dir) = &self.logging.dir {
            let path = PathBuf::from(dir);
            return if path.is_absolute() {
                path
            } else {
                std::env::current_dir().unwrap_or_default().join(path)
            };
        }
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|dir| dir.join("stepline").join("logs"))
            .unwrap_or_else(|| PathBuf::from(".stepline").join("logs"))
    }

    /// Stepper built from the `stepper` and `steps` sections
    pub fn build_stepper(&self) -> Stepper {
        self.stepper.build(self.steps.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stepper: StepperConfig::default(),
            steps: default_steps(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
