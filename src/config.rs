use crate::rules::Rule;
use crate::timer::TimerConfig;
use crate::view::ViewConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Game of Life on an unbounded plane with a rewindable generation history.
#[derive(Debug, Parser)]
#[command(name = "life-history", version, about)]
pub struct Args {
    /// Life 1.05 pattern file used as the seed (defaults to a built-in pattern)
    #[arg(long, value_name = "PATH")]
    pub pattern: Option<PathBuf>,

    /// Rule in survivals/births digit notation, e.g. 23/3; overrides the file's #R line
    #[arg(long, value_name = "S/B")]
    pub rule: Option<Rule>,

    /// Playback interval in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub interval: u64,

    /// Start with playback running
    #[arg(long)]
    pub play: bool,

    /// Initial window width
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Initial window height
    #[arg(long, default_value_t = 640)]
    pub height: u32,
}

/// Immutable start-up configuration handed to the application state.
#[derive(Debug, Clone)]
pub struct Config {
    pub pattern: Option<PathBuf>,
    pub rule: Option<Rule>,
    pub timer: TimerConfig,
    pub view: ViewConfig,
    pub window_size: (u32, u32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: None,
            rule: None,
            timer: TimerConfig::default(),
            view: ViewConfig::default(),
            window_size: (1024, 640),
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            pattern: args.pattern,
            rule: args.rule,
            timer: TimerConfig {
                interval: Duration::from_millis(args.interval),
                running: args.play,
            },
            view: ViewConfig::default(),
            window_size: (args.width.max(1), args.height.max(1)),
        }
    }
}
