use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use stepline::app::App;
use stepline::config::Config;
use stepline::logging;
use stepline::steps::load_steps;
use stepline::ui::keybindings::shortcuts_markdown;
use stepline::ui::stepper::{StepDescriptor, StepItem, Stepper};
use stepline::ui::install_panic_hook;

#[derive(Parser)]
#[command(name = "stepline")]
#[command(about = "Keyboard-driven stepper demo for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Load steps from a .json or .toml file instead of the config
    #[arg(short, long)]
    steps: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the keyboard shortcuts as markdown
    Shortcuts,

    /// Print each step's flags and accessibility attributes
    Steps {
        /// Committed value to evaluate against (default: configured value)
        #[arg(short, long)]
        value: Option<usize>,

        /// Evaluate with the linear gate on
        #[arg(short, long)]
        linear: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    let steps = match &cli.steps {
        Some(path) => Some(
            load_steps(path).with_context(|| format!("Failed to load steps from {}", path.display()))?,
        ),
        None => None,
    };

    match cli.command {
        Some(Commands::Shortcuts) => {
            print!("{}", shortcuts_markdown());
        }
        Some(Commands::Steps { value, linear }) => {
            cmd_steps(&config, steps, value, linear);
        }
        None => {
            run_tui(config, steps, logging_handle.log_file_path)?;
        }
    }

    Ok(())
}

fn run_tui(
    config: Config,
    steps: Option<Vec<StepDescriptor>>,
    log_file_path: Option<PathBuf>,
) -> Result<()> {
    install_panic_hook();

    let mut app = App::new(config, steps);
    let result = app.run();

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_steps(config: &Config, steps: Option<Vec<StepDescriptor>>, value: Option<usize>, linear: bool) {
    let mut stepper_config = config.stepper.clone();
    if let Some(value) = value {
        stepper_config.value = value;
    }
    stepper_config.linear |= linear;
    let stepper: Stepper = stepper_config.build(steps.unwrap_or_else(|| config.steps.clone()));

    println!(
        "Steps ({} total, value {}, {})",
        stepper.num_steps(),
        stepper.value(),
        if stepper.is_linear() { "linear" } else { "free" }
    );
    println!("{}", "─".repeat(60));

    let ctx = stepper.context();
    for index in 0..stepper.num_steps() {
        let Some(props) = stepper.step_props(index) else {
            continue;
        };
        let step = StepItem::new(props, &ctx);
        let glyph = step
            .indicator()
            .map(|indicator| indicator.glyph().to_string())
            .unwrap_or_else(|| "-".to_string());
        let flags = step.flags();
        let mut names = Vec::new();
        for (set, name) in [
            (flags.first, "first"),
            (flags.last, "last"),
            (flags.done, "done"),
            (flags.current, "current"),
            (flags.optional, "optional"),
            (flags.disabled, "disabled"),
            (flags.focused, "focused"),
            (flags.error, "error"),
            (flags.success, "success"),
        ] {
            if set {
                names.push(name);
            }
        }
        let aria = step
            .aria()
            .to_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ");

        println!(
            "{:>2} ({}) {:<16} [{}] {}",
            index,
            glyph,
            step.title().unwrap_or("-"),
            names.join(","),
            aria
        );
    }
}
