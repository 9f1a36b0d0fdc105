use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

use crate::grid::{GridSize, INITIAL_LENGTH};

/// Largest board side; keeps the board within a u16 terminal width.
const MAX_SIDE: u16 = 500;

#[derive(Debug, Parser)]
#[command(name = "serpent-sprint")]
#[command(version, about = "Terminal snake: eat, grow, don't crash")]
pub struct Settings {
    /// Grid width in cells
    #[arg(long, default_value_t = 30)]
    pub width: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = 22)]
    pub height: u16,

    /// Snake steps per second
    #[arg(long, default_value_t = 12)]
    pub tick_rate: u32,

    /// Seed for food placement, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// File the log is written to
    #[arg(long, default_value = "serpent-sprint.log")]
    pub log_file: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        // The initial snake extends two cells left of the center column
        let min_width = INITIAL_LENGTH as u16 + 1;
        if self.width < min_width || self.height < 1 {
            bail!(
                "grid {}x{} is too small, need at least {}x1",
                self.width,
                self.height,
                min_width
            );
        }
        if self.width > MAX_SIDE || self.height > MAX_SIDE {
            bail!(
                "grid {}x{} is too large, at most {}x{}",
                self.width,
                self.height,
                MAX_SIDE,
                MAX_SIDE
            );
        }
        if !(1..=1000).contains(&self.tick_rate) {
            bail!("tick rate must be between 1 and 1000, got {}", self.tick_rate);
        }
        Ok(())
    }

    pub fn grid_size(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Settings {
        let args = std::iter::once("serpent-sprint").chain(args.iter().copied());
        Settings::try_parse_from(args).expect("valid arguments")
    }

    #[test]
    fn test_defaults() {
        let settings = parse(&[]);
        assert_eq!(settings.grid_size(), GridSize::default());
        assert_eq!(settings.tick_rate, 12);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.log_file, PathBuf::from("serpent-sprint.log"));
        assert_eq!(settings.log_level, LogLevel::Info);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_custom_values() {
        let settings = parse(&[
            "--width",
            "12",
            "--height",
            "8",
            "--tick-rate",
            "20",
            "--seed",
            "99",
            "--log-level",
            "debug",
        ]);
        assert_eq!(
            settings.grid_size(),
            GridSize {
                width: 12,
                height: 8
            }
        );
        assert_eq!(settings.tick_interval(), Duration::from_millis(50));
        assert_eq!(settings.seed, Some(99));
        assert_eq!(LevelFilter::from(settings.log_level), LevelFilter::Debug);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_tick_interval() {
        let settings = parse(&["--tick-rate", "8"]);
        assert_eq!(settings.tick_interval(), Duration::from_millis(125));
    }

    #[test]
    fn test_rejects_tiny_grid() {
        assert!(parse(&["--width", "3"]).validate().is_err());
        assert!(parse(&["--height", "0"]).validate().is_err());
        assert!(parse(&["--width", "4", "--height", "1"]).validate().is_ok());
    }

    #[test]
    fn test_smallest_grid_is_playable() {
        let settings = parse(&["--width", "4", "--height", "1", "--seed", "5"]);
        assert!(settings.validate().is_ok());

        let mut sim = crate::grid::GridSimulation::with_seed(settings.grid_size(), 5);
        assert_eq!(sim.len(), INITIAL_LENGTH);
        assert_eq!(sim.food(), Some(crate::grid::Cell::new(3, 0)));
        assert_eq!(sim.step(), crate::grid::StepResult::Ate);
        assert_eq!(sim.step(), crate::grid::StepResult::Collided);
    }

    #[test]
    fn test_rejects_huge_grid() {
        assert!(parse(&["--width", "501"]).validate().is_err());
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        assert!(parse(&["--tick-rate", "0"]).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Settings::try_parse_from(["serpent-sprint", "--width", "wide"]).is_err());
        assert!(Settings::try_parse_from(["serpent-sprint", "--log-level", "loud"]).is_err());
    }
}
