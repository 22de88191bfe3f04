//! Command line options.

use clap::{Parser, ValueEnum};
use level_common::thresholds::{BULLSEYE_MAX_RADIUS, SENSITIVITY_DEG};
use level_common::{Capability, TiltError, TiltMapper};

#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "Desktop simulator for the Nivel Pro bubble level")]
pub struct Cli {
    /// Tilt in degrees that drives a gauge to full deflection
    #[arg(long, default_value_t = SENSITIVITY_DEG)]
    pub sensitivity: f32,

    /// Bullseye clamp radius, percent of the ring diameter
    #[arg(long, default_value_t = BULLSEYE_MAX_RADIUS)]
    pub max_radius: f32,

    /// Which kind of sensor API the simulated device exposes
    #[arg(long, value_enum, default_value_t = PlatformKind::Gated)]
    pub platform: PlatformKind,

    /// How the simulated permission prompt answers
    #[arg(long, value_enum, default_value_t = PromptAnswer::Allow)]
    pub prompt: PromptAnswer,

    /// How long the simulated prompt stays open, in milliseconds
    #[arg(long, default_value_t = 600)]
    pub prompt_delay_ms: u64,

    /// Initial motion source (toggle at runtime with M)
    #[arg(long, value_enum, default_value_t = MotionMode::Keys)]
    pub motion: MotionMode,

    /// Window pixel scale
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=4))]
    pub scale: u32,

    /// Skip the boot console
    #[arg(long)]
    pub no_boot: bool,

    /// Log filter used when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Build the tilt mapper from the sensitivity and radius options.
    pub fn mapper(&self) -> Result<TiltMapper, TiltError> { TiltMapper::new(self.sensitivity, self.max_radius) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlatformKind {
    /// Events flow without asking
    Passive,
    /// An explicit permission prompt is required
    Gated,
    /// No orientation API at all
    Absent,
}

impl From<PlatformKind> for Capability {
    fn from(kind: PlatformKind) -> Self {
        match kind {
            PlatformKind::Passive => Self::Passive,
            PlatformKind::Gated => Self::PermissionGated,
            PlatformKind::Absent => Self::Absent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PromptAnswer {
    Allow,
    Deny,
    /// The prompt itself errors out
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MotionMode {
    /// Tilt with I/J/K/L
    Keys,
    /// Slow automatic sweep across both axes
    Sweep,
}

impl MotionMode {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Keys => Self::Sweep,
            Self::Sweep => Self::Keys,
        }
    }
}
