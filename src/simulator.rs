use std::thread;
use std::time::Duration;

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::event::{MouseButton, PointerPosition, Target};
use crate::injector::MouseInjector;

/// Runs click sequences on top of a [`MouseInjector`], applying the
/// fail-safe check and the post-action pause.
pub struct Simulator<I> {
    injector: I,
    config: SimulationConfig,
    /// Last position this simulator moved the pointer to.
    placed_at: Option<PointerPosition>,
}

impl<I: MouseInjector> Simulator<I> {
    pub fn new(injector: I, config: SimulationConfig) -> Self {
        Self {
            injector,
            config,
            placed_at: None,
        }
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }

    pub fn position(&self) -> Result<PointerPosition, SimulationError> {
        self.injector.position()
    }

    /// Clicks `button` `clicks` times at `target` and returns the position
    /// the clicks landed on. Non-positive `clicks` performs no click.
    pub fn click(
        &mut self,
        target: Target,
        button: MouseButton,
        clicks: i32,
        interval: Duration,
    ) -> Result<PointerPosition, SimulationError> {
        if let Target::At(position) = target {
            self.fail_safe_check()?;
            self.injector.move_to(position)?;
            self.placed_at = Some(position);
            self.pause();
        }

        for n in 1..=clicks.max(0) {
            if n > 1 && !interval.is_zero() {
                thread::sleep(interval);
            }
            self.fail_safe_check()?;
            self.injector.click(button, n as i64)?;
            self.pause();
        }

        match target {
            Target::At(position) => Ok(position),
            Target::Current => self.injector.position(),
        }
    }

    fn fail_safe_check(&self) -> Result<(), SimulationError> {
        if !self.config.failsafe {
            return Ok(());
        }
        let position = self.injector.position()?;
        if self.placed_at == Some(position) {
            return Ok(());
        }
        let (width, height) = self.injector.screen_size()?;
        let corners = [
            (0, 0),
            (width - 1, 0),
            (0, height - 1),
            (width - 1, height - 1),
        ];
        if corners.contains(&(position.x, position.y)) {
            log::warn!("Pointer in screen corner {}, aborting", position);
            return Err(SimulationError::FailSafe {
                x: position.x,
                y: position.y,
            });
        }
        Ok(())
    }

    fn pause(&self) {
        let pause = self.config.pause();
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }
}
