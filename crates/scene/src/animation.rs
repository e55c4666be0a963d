//! Scripted animation for the demo roster.
//!
//! Each animated group owns its own state; nothing is shared between groups.

use crate::roster::ShapeRecord;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Advancing,
    Reversing,
}

/// Direction to move for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stride {
    Forward,
    Backward,
    Hold,
}

/// Two-state machine bouncing a coordinate between `lower` and `upper`.
///
/// While advancing it strides forward until the coordinate passes `upper`,
/// then turns around on the same tick. While reversing it strides backward
/// until the coordinate is at or below `lower`, then holds for that tick
/// and advances again from the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingPong {
    phase: Phase,
    lower: f32,
    upper: f32,
}

impl PingPong {
    pub fn new(lower: f32, upper: f32) -> Self {
        Self {
            phase: Phase::Advancing,
            lower,
            upper,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn step(&mut self, x: f32) -> Stride {
        match self.phase {
            Phase::Advancing if x <= self.upper => Stride::Forward,
            Phase::Advancing => {
                self.phase = Phase::Reversing;
                tracing::debug!(x, "ping-pong reversing");
                Stride::Backward
            }
            Phase::Reversing if x > self.lower => Stride::Backward,
            Phase::Reversing => {
                self.phase = Phase::Advancing;
                tracing::debug!(x, "ping-pong advancing");
                Stride::Hold
            }
        }
    }
}

/// A driver shape shuttling along a diagonal, a mirror shape moving the
/// opposite way, and a pulse shape growing while the driver advances and
/// shrinking while it reverses.
///
/// Steps are per tick, not per second.
#[derive(Debug, Clone, PartialEq)]
pub struct Shuttle {
    pub driver: usize,
    pub mirror: usize,
    pub pulse: usize,
    pub step: Vec3,
    pub grow: Vec3,
    pub shrink: Vec3,
    machine: PingPong,
}

impl Shuttle {
    pub fn new(driver: usize, mirror: usize, pulse: usize) -> Self {
        Self {
            driver,
            mirror,
            pulse,
            step: Vec3::new(0.001, 0.001, 0.0),
            grow: Vec3::new(1.001, 1.001, 1.0),
            shrink: Vec3::new(0.999, 0.999, 1.0),
            machine: PingPong::new(0.0, 1.0),
        }
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// Advance one tick. Indices outside `roster` are skipped.
    pub fn tick(&mut self, roster: &mut [ShapeRecord]) {
        let Some(driver) = roster.get(self.driver) else {
            return;
        };
        let x = driver.entity.transform().position().x;

        let offset = match self.machine.step(x) {
            Stride::Forward => self.step,
            Stride::Backward => -self.step,
            Stride::Hold => Vec3::ZERO,
        };
        if offset != Vec3::ZERO {
            if let Some(s) = roster.get_mut(self.driver) {
                s.entity.transform_mut().move_absolute(offset);
            }
            if let Some(s) = roster.get_mut(self.mirror) {
                s.entity.transform_mut().move_absolute(-offset);
            }
        }

        let factor = match self.machine.phase() {
            Phase::Advancing => self.grow,
            Phase::Reversing => self.shrink,
        };
        if let Some(s) = roster.get_mut(self.pulse) {
            s.entity.transform_mut().scale_by(factor);
        }
    }
}

/// Constant spin, in radians per second about each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub target: usize,
    pub rate: Vec3,
}

impl Spin {
    /// Roll about Z at `degrees_per_second`.
    pub fn roll(target: usize, degrees_per_second: f32) -> Self {
        Self {
            target,
            rate: Vec3::new(0.0, 0.0, degrees_per_second.to_radians()),
        }
    }

    pub fn tick(&self, dt: f32, roster: &mut [ShapeRecord]) {
        if let Some(s) = roster.get_mut(self.target) {
            s.entity.transform_mut().rotate(self.rate * dt);
        }
    }
}
