use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use prism_renderer::DEFAULT_BUCKET_SIZE;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "A Whitted-style ray tracer", version)]
pub struct Args {
    /// Scene file (JSON). Renders the built-in demo scene when omitted.
    pub scene: Option<PathBuf>,

    /// Output image path (format chosen from the extension)
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Maximum recursion depth, overriding the scene file
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Bucket edge length in pixels for parallel rendering
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Render on the main thread only
    #[arg(long)]
    pub serial: bool,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["prism"]).unwrap();
        assert!(args.scene.is_none());
        assert_eq!(args.output, PathBuf::from("render.png"));
        assert_eq!(args.bucket_size, DEFAULT_BUCKET_SIZE);
        assert!(args.depth.is_none());
        assert!(!args.serial);
        assert!(matches!(args.log_level, LogLevel::Info));
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "prism",
            "demos/scene.json",
            "-o",
            "out.png",
            "--depth",
            "5",
            "--bucket-size",
            "16",
            "-j",
            "2",
            "--serial",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.scene, Some(PathBuf::from("demos/scene.json")));
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(args.depth, Some(5));
        assert_eq!(args.bucket_size, 16);
        assert_eq!(args.threads, Some(2));
        assert!(args.serial);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Args::try_parse_from(["prism", "--log-level", "loud"]).is_err());
    }
}
