//! Difficulty ramp
//!
//! Both curves are linear in elapsed run time. Speed is sampled once per
//! entity at spawn; the obstacle interval is recomputed after every spawn.

use crate::tuning::Tuning;

/// Downward speed (px/s) for entities spawned at `elapsed_sec`
#[inline]
pub fn current_speed(tuning: &Tuning, elapsed_sec: f32) -> f32 {
    tuning.base_speed + elapsed_sec.max(0.0) * tuning.speed_growth
}

/// Obstacle timer interval (ms) after a spawn at `elapsed_sec`, floor-clamped
#[inline]
pub fn obstacle_interval_ms(tuning: &Tuning, elapsed_sec: f32) -> f32 {
    let ramped =
        tuning.base_spawn_interval_ms - elapsed_sec.max(0.0) * tuning.spawn_interval_decay_ms;
    ramped.max(tuning.min_spawn_interval_ms)
}
