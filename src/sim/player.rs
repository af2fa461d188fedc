//! Player boat controller
//!
//! Keyboard input sets velocity directly (no inertia). Pointer input, when
//! present, places the boat under the pointer. In the locked scheme the boat
//! only moves sideways and leans into its motion.

use glam::Vec2;

use super::state::Player;
use super::tick::TickInput;
use crate::consts::DRAG_VELOCITY_SCALE;
use crate::lerp;
use crate::tuning::{ControlScheme, Tuning};

/// Below this the boat counts as stationary for tilt purposes
const STILL_EPSILON: f32 = 0.01;

/// Velocity implied by the held keys
pub fn velocity_from_input(input: &TickInput, tuning: &Tuning) -> Vec2 {
    let vx = if input.left {
        -tuning.player_speed
    } else if input.right {
        tuning.player_speed
    } else {
        0.0
    };

    let vy = match tuning.control {
        ControlScheme::Locked => 0.0,
        ControlScheme::TopDown => {
            let speed = tuning.player_speed * tuning.vertical_factor;
            if input.up {
                -speed
            } else if input.down {
                speed
            } else {
                0.0
            }
        }
    };

    Vec2::new(vx, vy)
}

/// Advance the player by one tick
pub fn update_player(player: &mut Player, input: &TickInput, tuning: &Tuning, dt: f32) {
    player.vel = velocity_from_input(input, tuning);
    player.pos += player.vel * dt;

    if let Some(pointer_x) = input.pointer_x {
        player.pos.x = pointer_x;
    }

    // World bounds
    let half = player.half_size();
    player.pos.x = clamp_span(player.pos.x, half.x, tuning.screen_width - half.x);
    match tuning.control {
        ControlScheme::Locked => {
            player.pos.y = tuning.screen_height - tuning.player_bottom_offset;
        }
        ControlScheme::TopDown => {
            player.pos.y = clamp_span(player.pos.y, half.y, tuning.screen_height - half.y);
        }
    }

    if tuning.control == ControlScheme::Locked {
        let target = tilt_target(player.vel.x, player.pos.x - player.last_x, tuning.tilt_max_deg);
        player.tilt_deg = lerp(player.tilt_deg, target, tuning.tilt_lerp);
    }
    player.last_x = player.pos.x;
}

/// Lean angle to ease toward: keyed velocity wins, otherwise the drag
/// displacement of this frame stands in for velocity
pub fn tilt_target(vx: f32, dx: f32, max_deg: f32) -> f32 {
    let effective = if vx.abs() > STILL_EPSILON {
        vx
    } else {
        dx * DRAG_VELOCITY_SCALE
    };
    if effective.abs() > STILL_EPSILON {
        max_deg * effective.signum()
    } else {
        0.0
    }
}

/// Clamp that tolerates a span narrower than the object
fn clamp_span(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        (min + max) / 2.0
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EntityId, Vehicle};

    fn player(tuning: &Tuning) -> Player {
        Player::new(EntityId(1), Vehicle::Powerboat, tuning)
    }

    #[test]
    fn test_keys_set_velocity_instantly() {
        let tuning = Tuning::default();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        assert_eq!(velocity_from_input(&left, &tuning), Vec2::new(-200.0, 0.0));
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(velocity_from_input(&both, &tuning).x, -200.0);
        assert_eq!(velocity_from_input(&TickInput::default(), &tuning), Vec2::ZERO);
    }

    #[test]
    fn test_vertical_only_in_top_down() {
        let up = TickInput {
            up: true,
            ..Default::default()
        };
        assert_eq!(velocity_from_input(&up, &Tuning::default()).y, 0.0);
        let vy = velocity_from_input(&up, &Tuning::classic()).y;
        assert!((vy + 120.0).abs() < 1e-3, "got {vy}");
    }

    #[test]
    fn test_locked_scheme_keeps_y() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        let input = TickInput {
            right: true,
            down: true,
            ..Default::default()
        };
        update_player(&mut p, &input, &tuning, 0.5);
        assert_eq!(p.pos, Vec2::new(340.0, 720.0));
    }

    #[test]
    fn test_top_down_clamps_to_bounds() {
        let tuning = Tuning::classic();
        let mut p = player(&tuning);
        let input = TickInput {
            down: true,
            ..Default::default()
        };
        update_player(&mut p, &input, &tuning, 10.0);
        assert_eq!(p.pos.y, tuning.screen_height - p.half_size().y);
    }

    #[test]
    fn test_pointer_overrides_and_clamps() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        let half = p.half_size().x;
        let input = TickInput {
            pointer_x: Some(-100.0),
            ..Default::default()
        };
        update_player(&mut p, &input, &tuning, 1.0 / 60.0);
        assert_eq!(p.pos.x, half);

        let input = TickInput {
            pointer_x: Some(300.0),
            ..Default::default()
        };
        update_player(&mut p, &input, &tuning, 1.0 / 60.0);
        assert_eq!(p.pos.x, 300.0);
    }

    #[test]
    fn test_tilt_eases_toward_heading() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        update_player(&mut p, &input, &tuning, 1.0 / 60.0);
        assert!((p.tilt_deg - 1.2).abs() < 1e-4);
        for _ in 0..200 {
            update_player(&mut p, &input, &tuning, 1.0 / 60.0);
        }
        // Pinned against the right edge: velocity still says right
        assert!((p.tilt_deg - 8.0).abs() < 1e-3);

        for _ in 0..200 {
            update_player(&mut p, &TickInput::default(), &tuning, 1.0 / 60.0);
        }
        assert!(p.tilt_deg.abs() < 1e-3);
    }

    #[test]
    fn test_tilt_from_drag() {
        assert_eq!(tilt_target(0.0, -3.0, 8.0), -8.0);
        assert_eq!(tilt_target(0.0, 2.0, 8.0), 8.0);
        assert_eq!(tilt_target(0.0, 0.0, 8.0), 0.0);
        assert_eq!(tilt_target(-200.0, 5.0, 8.0), -8.0);
    }
}
