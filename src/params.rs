/*
 * Simulation Parameters Module
 *
 * This module defines the parameter records that feed the steering rule:
 * - TuningParams: the five values the driver hands to the flock every frame
 * - SteeringConstants: the tuning knobs that shape the flock's look and feel,
 *   loaded from the config file and fixed for a run
 * - ControlState: the slider/toggle state behind the UI, with change detection
 */

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-frame inputs to the steering rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningParams {
    /// Base movement speed in units per second.
    pub speed: f32,
    /// Widens the radius inside which a boid matches heading instead of
    /// chasing the flock center.
    pub cohesion: f32,
    /// Added to the body radius to form the minimum comfortable spacing.
    pub avoidance: f32,
    /// Shrinks the turning deadband, making boids more responsive.
    pub adherence: f32,
    /// Wrap across edges instead of turning back from them.
    pub wrap: bool,
}

impl Default for TuningParams {
    fn default() -> Self {
        Self {
            speed: 150.0,
            cohesion: 0.0,
            avoidance: 0.0,
            adherence: 0.0,
            wrap: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConstants {
    pub cell_size: f32,
    pub body_radius: f32,
    pub max_neighbors: usize,
    pub edge_margin: f32,
    // Turn rates are in degrees per second
    pub turn_rate: f32,
    pub max_edge_turn_rate: f32,
    pub turn_deadband: f32,
    pub adherence_gain: f32,
    pub speed_boost_per_missing_neighbor: f32,
    pub heading_jitter: f32,
    pub sprite_half_extent: f32,
    pub spawn_margin: f32,
}

impl Default for SteeringConstants {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            body_radius: 17.0,
            max_neighbors: 7,
            edge_margin: 42.0,
            turn_rate: 120.0,
            max_edge_turn_rate: 1200.0,
            turn_deadband: 0.5,
            adherence_gain: 0.05,
            speed_boost_per_missing_neighbor: 5.0,
            heading_jitter: 4.0,
            sprite_half_extent: 7.5,
            spawn_margin: 50.0,
        }
    }
}

impl SteeringConstants {
    /// Smallest heading error worth turning for, given the adherence factor.
    #[inline]
    pub fn deadband(&self, adherence: f32) -> f32 {
        self.turn_deadband / (1.0 + adherence.max(0.0) * self.adherence_gain)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::NonPositive("steering.cell_size", self.cell_size));
        }
        if self.max_neighbors == 0 {
            return Err(ConfigError::ZeroNeighbors);
        }
        let non_negative = [
            ("steering.body_radius", self.body_radius),
            ("steering.edge_margin", self.edge_margin),
            ("steering.turn_rate", self.turn_rate),
            ("steering.max_edge_turn_rate", self.max_edge_turn_rate),
            ("steering.turn_deadband", self.turn_deadband),
            ("steering.adherence_gain", self.adherence_gain),
            ("steering.speed_boost_per_missing_neighbor", self.speed_boost_per_missing_neighbor),
            ("steering.heading_jitter", self.heading_jitter),
            ("steering.sprite_half_extent", self.sprite_half_extent),
            ("steering.spawn_margin", self.spawn_margin),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative(name, value));
            }
        }
        Ok(())
    }
}

// Slider and toggle state owned by the UI
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub cohesion: f32,
    pub avoidance: f32,
    pub adherence: f32,
    pub speed_bonus: f32,
    pub wrap: bool,
    pub show_fps: bool,

    previous_values: Option<ControlSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ControlSnapshot {
    cohesion: f32,
    avoidance: f32,
    adherence: f32,
    speed_bonus: f32,
    wrap: bool,
    show_fps: bool,
}

impl ControlState {
    pub fn new(wrap: bool, show_fps: bool) -> Self {
        Self {
            cohesion: 0.0,
            avoidance: 0.0,
            adherence: 0.0,
            speed_bonus: 0.0,
            wrap,
            show_fps,
            previous_values: None,
        }
    }

    fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            cohesion: self.cohesion,
            avoidance: self.avoidance,
            adherence: self.adherence,
            speed_bonus: self.speed_bonus,
            wrap: self.wrap,
            show_fps: self.show_fps,
        }
    }

    // Remember current values so the next detect_changes can compare against them
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    /// Whether anything moved since the last snapshot. With no snapshot
    /// taken yet nothing counts as changed.
    pub fn detect_changes(&self) -> bool {
        self.previous_values
            .map_or(false, |prev| prev != self.snapshot())
    }

    /// Build this frame's tuning record. Sliders are clamped here because the
    /// steering rule does not validate its inputs.
    pub fn tuning(&self, base_speed: f32) -> TuningParams {
        let factor = Self::factor_range();
        let speed = Self::speed_range();
        TuningParams {
            speed: (base_speed + self.speed_bonus.clamp(*speed.start(), *speed.end())).max(0.0),
            cohesion: self.cohesion.clamp(*factor.start(), *factor.end()),
            avoidance: self.avoidance.clamp(*factor.start(), *factor.end()),
            adherence: self.adherence.clamp(*factor.start(), *factor.end()),
            wrap: self.wrap,
        }
    }

    // Parameter ranges for UI sliders
    pub fn factor_range() -> std::ops::RangeInclusive<f32> {
        0.0..=100.0
    }

    pub fn speed_range() -> std::ops::RangeInclusive<f32> {
        0.0..=100.0
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(false, false)
    }
}
