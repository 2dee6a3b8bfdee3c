//! CLI - Command Line Interface for detailcast
//!
//! Every screen action is scriptable: subcommands run the real presenter
//! against a recording view and print what the screen would have done.
//!
//! # Examples
//!
//! ```bash
//! # Open the detail screen in the terminal
//! detailcast --media arrival.json
//!
//! # What does the play button do on an old, large-screen host?
//! detailcast play arrival.json --large-screen --tier 19 --json
//!
//! # Classify a swarm
//! detailcast health --seeds 120 --peers 40
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::config::Config;
use crate::models::DeviceProfile;

/// Viewport height assumed by CLI decisions when none is given
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 48;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Screen opened without a media record
    MissingSubject = 3,
    /// Media file unreadable or malformed
    InvalidMedia = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// detailcast - media detail screen with playback routing
///
/// Run with --media to open the interactive detail screen.
/// Use subcommands to print route decisions for automation.
#[derive(Parser, Debug)]
#[command(
    name = "detailcast",
    version,
    about = "Media detail screen with playback routing and casting hand-off",
    long_about = "Shows a movie or show and routes playback into staged loading, \
                  the direct player or the trailer player, quiescing casting \
                  whenever the screen comes back.\n\n\
                  Run with --media to launch the interactive screen.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  detailcast --media arrival.json              Open the detail screen\n\
                  detailcast layout arrival.json --landscape   Print layout decision\n\
                  detailcast play arrival.json --tier 19       Print play route\n\
                  detailcast health -s 120 -p 40               Classify a swarm"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Media record (JSON) to open; subcommands fall back to it
    #[arg(long, short = 'm', global = true)]
    pub media: Option<PathBuf>,

    /// Force the large-screen layout
    #[arg(long, global = true)]
    pub large_screen: bool,

    /// Treat the surface as landscape
    #[arg(long, global = true)]
    pub landscape: bool,

    /// Platform capability tier
    #[arg(long, global = true)]
    pub tier: Option<u32>,

    /// Vertical viewport extent used for layout
    #[arg(long, global = true)]
    pub viewport_height: Option<u32>,

    /// Subcommand to run (omit for the interactive screen)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Take the subcommand, filling its media file from --media when omitted
    pub fn take_command(&mut self) -> Option<Command> {
        let media = self.media.clone();
        self.command.take().map(|command| command.with_default_media(media))
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }

    /// Config from --config, else the default location
    pub fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Ok(Config::load()),
        }
    }

    /// Platform tier: flag, then config/environment
    pub fn platform_tier(&self, config: &Config) -> u32 {
        self.tier.unwrap_or_else(|| config.platform_tier())
    }

    /// Device profile for scripted decisions
    pub fn device_profile(&self, config: &Config) -> DeviceProfile {
        DeviceProfile {
            is_large_screen: self.large_screen,
            is_portrait: !self.landscape,
            platform_tier: self.platform_tier(config),
            viewport_height: self.viewport_height.unwrap_or(DEFAULT_VIEWPORT_HEIGHT),
        }
    }

    /// Device profile for a terminal of `cols` x `rows`, honoring overrides
    pub fn terminal_profile(&self, config: &Config, cols: u16, rows: u16) -> DeviceProfile {
        let mut profile = DeviceProfile::for_terminal(
            cols,
            rows,
            self.platform_tier(config),
            config.large_screen_min_columns(),
        );
        profile.is_large_screen |= self.large_screen;
        if self.landscape {
            profile.is_portrait = false;
        }
        if let Some(height) = self.viewport_height {
            profile.viewport_height = height;
        }
        profile
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the layout the screen applies on activation
    #[command(visible_alias = "l")]
    Layout(LayoutCmd),

    /// Print the route taken by the play affordance
    #[command(visible_alias = "p")]
    Play(PlayCmd),

    /// Print the route taken by a trailer request
    #[command(visible_alias = "t")]
    Trailer(TrailerCmd),

    /// Classify swarm health
    #[command(visible_alias = "h")]
    Health(HealthCmd),
}

impl Command {
    /// Use `media` as the media file when the subcommand names none
    pub fn with_default_media(self, media: Option<PathBuf>) -> Self {
        match self {
            Command::Layout(mut cmd) => {
                cmd.file = cmd.file.or(media);
                Command::Layout(cmd)
            }
            Command::Play(mut cmd) => {
                cmd.file = cmd.file.or(media);
                Command::Play(cmd)
            }
            Command::Trailer(mut cmd) => {
                cmd.file = cmd.file.or(media);
                Command::Trailer(cmd)
            }
            Command::Health(cmd) => Command::Health(cmd),
        }
    }
}

/// Activate the screen and report what it rendered
#[derive(Args, Debug)]
pub struct LayoutCmd {
    /// Media record (JSON file)
    pub file: Option<PathBuf>,
}

/// Activate the screen and press play
#[derive(Args, Debug)]
pub struct PlayCmd {
    /// Media record (JSON file)
    pub file: Option<PathBuf>,

    /// Request the direct player instead of staged loading
    #[arg(long)]
    pub direct: bool,
}

/// Activate the screen and request the trailer
#[derive(Args, Debug)]
pub struct TrailerCmd {
    /// Media record (JSON file)
    pub file: Option<PathBuf>,

    /// Trailer URL (defaults to the record's trailer)
    #[arg(long, short = 'u')]
    pub url: Option<String>,
}

/// Swarm counts to classify
#[derive(Args, Debug)]
pub struct HealthCmd {
    /// Seed count
    #[arg(long, short = 's')]
    pub seeds: u32,

    /// Peer count
    #[arg(long, short = 'p')]
    pub peers: u32,
}

// =============================================================================
// Output
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Output handler for CLI commands
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet and JSON mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
        assert!(cli.media.is_none());
    }

    #[test]
    fn test_cli_profile_defaults() {
        let cli = Cli::parse_from(["detailcast", "--tier", "19", "layout", "m.json"]);
        let profile = cli.device_profile(&Config::default());
        assert!(!profile.is_large_screen);
        assert!(profile.is_portrait);
        assert_eq!(profile.platform_tier, 19);
        assert_eq!(profile.viewport_height, DEFAULT_VIEWPORT_HEIGHT);
    }

    #[test]
    fn test_terminal_profile_overrides() {
        let cli = Cli::parse_from(["detailcast", "--large-screen", "--landscape"]);
        let profile = cli.terminal_profile(&Config::default(), 80, 60);
        assert!(profile.is_large_screen);
        assert!(!profile.is_portrait);
        assert_eq!(profile.viewport_height, 60);
    }

    #[test]
    fn test_positional_file_beats_global_media() {
        let mut cli = Cli::parse_from(["detailcast", "--media", "a.json", "layout", "b.json"]);
        match cli.take_command() {
            Some(Command::Layout(cmd)) => assert_eq!(cmd.file, Some(PathBuf::from("b.json"))),
            other => panic!("Expected Layout command, got {:?}", other),
        }
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::MissingSubject), 3);
        assert_eq!(i32::from(ExitCode::InvalidMedia), 4);
    }
}
