//! The input-simulation command: one pointer action per invocation.
//!
//! Output on stdout is part of the contract with the control server, which
//! parses `Current cursor position: (X, Y)` from it. Errors go to stderr and
//! turn into exit status 1.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::event::{MouseButton, Target};
use crate::injector::MouseInjector;
use crate::simulator::Simulator;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Clone, clap::Args)]
pub struct ClickArgs {
    /// X coordinate (default: current position)
    #[arg(long, allow_negative_numbers = true)]
    pub x: Option<i32>,

    /// Y coordinate (default: current position)
    #[arg(long, allow_negative_numbers = true)]
    pub y: Option<i32>,

    /// Mouse button to click
    #[arg(long, value_enum, default_value_t = MouseButton::Left)]
    pub button: MouseButton,

    /// Number of clicks to perform
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub clicks: i32,

    /// Time between clicks in seconds
    #[arg(long, default_value_t = 0.1)]
    pub interval: f64,

    /// Delay before clicking in seconds
    #[arg(long, default_value_t = 0.0)]
    pub delay: f64,

    /// Show current cursor position and exit
    #[arg(long)]
    pub show_position: bool,
}

impl ClickArgs {
    /// True when any click option differs from its default.
    pub fn is_set(&self) -> bool {
        let defaults = Self::default();
        self.x.is_some()
            || self.y.is_some()
            || self.show_position
            || self.button != defaults.button
            || self.clicks != defaults.clicks
            || self.interval != defaults.interval
            || self.delay != defaults.delay
    }
}

impl Default for ClickArgs {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            button: MouseButton::Left,
            clicks: 1,
            interval: 0.1,
            delay: 0.0,
            show_position: false,
        }
    }
}

/// Runs the command. `open` creates the input backend and is only called
/// once the arguments have been validated.
pub fn run<I, F, O, E>(
    args: &ClickArgs,
    config: &SimulationConfig,
    open: F,
    out: &mut O,
    err: &mut E,
) -> io::Result<u8>
where
    I: MouseInjector,
    F: FnOnce() -> Result<I, SimulationError>,
    O: Write,
    E: Write,
{
    if args.show_position {
        let position = open().and_then(|injector| injector.position());
        return match position {
            Ok(position) => {
                writeln!(out, "Current cursor position: {}", position)?;
                Ok(EXIT_OK)
            }
            Err(e) => {
                writeln!(err, "Error getting cursor position: {}", e)?;
                Ok(EXIT_FAILURE)
            }
        };
    }

    let target = match Target::from_coordinates(args.x, args.y) {
        Ok(target) => target,
        Err(e) => {
            writeln!(err, "Error: {}", e)?;
            return Ok(EXIT_FAILURE);
        }
    };

    let interval = match seconds(args.interval) {
        Some(interval) => interval,
        None => {
            writeln!(err, "Error: --interval must be a non-negative number of seconds")?;
            return Ok(EXIT_FAILURE);
        }
    };

    let delay = if args.delay > 0.0 {
        match seconds(args.delay) {
            Some(delay) => Some(delay),
            None => {
                writeln!(err, "Error: --delay must be a finite number of seconds")?;
                return Ok(EXIT_FAILURE);
            }
        }
    } else {
        None
    };

    if let Some(delay) = delay {
        writeln!(out, "Waiting {} seconds before clicking...", args.delay)?;
        out.flush()?;
        thread::sleep(delay);
    }

    let result = open().and_then(|injector| {
        let mut simulator = Simulator::new(injector, config.clone());
        simulator.click(target, args.button, args.clicks, interval)
    });

    match result {
        Ok(position) => {
            let place = match target {
                Target::At(_) => "position",
                Target::Current => "current position",
            };
            writeln!(
                out,
                "Clicked {} button {} time(s) at {} {}",
                args.button, args.clicks, place, position
            )?;
            Ok(EXIT_OK)
        }
        Err(e) => {
            log::debug!("Click failed: {:?}", e);
            writeln!(err, "Error performing click: {}", e)?;
            Ok(EXIT_FAILURE)
        }
    }
}

fn seconds(value: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(value).ok()
}
