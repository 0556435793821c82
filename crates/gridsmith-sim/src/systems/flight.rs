//! Free-flight movement system.
//!
//! Flying participants move in the plane of their head rotation at cruise or
//! sprint speed, with separate up/down controls. Velocity is integrated into
//! the head pose each tick: position += velocity * dt.

use glam::{Quat, Vec3};

use gridsmith_core::config::FlightConfig;
use gridsmith_core::constants::DT;

use crate::participant::Participant;

/// Latest movement input for one participant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveInput {
    pub horizontal: f32,
    pub vertical: f32,
    pub up: bool,
    pub down: bool,
    pub sprint: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlightState {
    pub flying: bool,
    pub input: MoveInput,
    pub velocity: Vec3,
}

/// Velocity for `input` given the head orientation. Down wins over up.
pub fn compute_velocity(input: &MoveInput, head_rotation: Quat, config: &FlightConfig) -> Vec3 {
    let speed = if input.sprint {
        config.sprint_speed
    } else {
        config.move_speed
    };
    let planar = head_rotation
        * Vec3::new(
            input.horizontal.clamp(-1.0, 1.0),
            0.0,
            input.vertical.clamp(-1.0, 1.0),
        )
        * speed;

    let mut vertical = 0.0;
    if input.up {
        vertical = speed;
    }
    if input.down {
        vertical = -speed;
    }

    Vec3::new(planar.x, vertical, planar.z)
}

/// Update velocities and integrate head positions for all participants.
pub fn run<'a>(participants: impl Iterator<Item = &'a mut Participant>, config: &FlightConfig) {
    for participant in participants {
        let flight = &mut participant.flight;
        if !flight.flying {
            flight.velocity = Vec3::ZERO;
            continue;
        }
        flight.velocity = compute_velocity(&flight.input, participant.pose.rotation, config);
        participant.pose.position += flight.velocity * DT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_follows_head_yaw() {
        let config = FlightConfig::default();
        let input = MoveInput {
            vertical: 1.0,
            ..Default::default()
        };

        let v = compute_velocity(&input, Quat::IDENTITY, &config);
        assert!((v - Vec3::new(0.0, 0.0, config.move_speed)).length() < 1e-5);

        let turned = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let v = compute_velocity(&input, turned, &config);
        assert!((v - Vec3::new(config.move_speed, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_sprint_and_vertical() {
        let config = FlightConfig::default();
        let input = MoveInput {
            up: true,
            sprint: true,
            ..Default::default()
        };
        let v = compute_velocity(&input, Quat::IDENTITY, &config);
        assert_eq!(v, Vec3::new(0.0, config.sprint_speed, 0.0));

        let both = MoveInput {
            up: true,
            down: true,
            ..Default::default()
        };
        let v = compute_velocity(&both, Quat::IDENTITY, &config);
        assert_eq!(v.y, -config.move_speed);
    }

    #[test]
    fn test_pitch_does_not_leak_into_vertical() {
        let config = FlightConfig::default();
        let input = MoveInput {
            vertical: 1.0,
            ..Default::default()
        };
        let looking_down = Quat::from_rotation_x(std::f32::consts::FRAC_PI_4);
        let v = compute_velocity(&input, looking_down, &config);
        assert_eq!(v.y, 0.0);
        assert!(v.z > 0.0);
    }
}
