//! Locomotion Tunables
//!
//! Flat set of numeric parameters shared by every behavior. Values can be
//! built in code (`LocomotionTunables::default()` plus struct update syntax)
//! or loaded from a JSON document in which every field is optional.
//!
//! # Example
//!
//! ```rust,ignore
//! use locomotion_engine::config::LocomotionTunables;
//!
//! let floaty = LocomotionTunables {
//!     jump_amount: 14.0,
//!     jump_cut_multiplier: 3.0,
//!     ..LocomotionTunables::default()
//! };
//!
//! let from_disk = LocomotionTunables::load("tunables.json")?;
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::LocomotionError;

/// Geometry of the box used for the ground-contact test.
///
/// Half-extents are `body_scale / divisors` per axis, so larger divisors give
/// a thinner probe. The box sits at `offset` from the body origin, rotated
/// with the body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundCheckConfig {
    /// Probe center relative to the body origin (the feet), in body space
    pub offset: Vec3,
    /// World scale of the character body
    pub body_scale: Vec3,
    /// Per-axis divisors applied to `body_scale` to get half-extents
    pub divisors: Vec3,
    /// Layers that count as ground
    pub layer_mask: u32,
}

impl Default for GroundCheckConfig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 0.05, 0.0),
            body_scale: Vec3::new(1.0, 2.0, 1.0),
            divisors: Vec3::new(2.5, 20.0, 2.5),
            layer_mask: 1,
        }
    }
}

impl GroundCheckConfig {
    /// Half-extents of the probe box.
    pub fn half_extents(&self) -> Vec3 {
        self.body_scale / self.divisors
    }
}

/// Parameters for every locomotion behavior.
///
/// Speeds are in m/s, rates are per-second interpolation factors, angles are
/// in degrees. `Default` returns the values the demo simulation is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionTunables {
    /// Top horizontal speed; `speed_target` is clamped to +/- this value
    pub max_speed: f32,
    /// Facing interpolation rate on the ground and for plain jumps
    pub turning_speed: f32,
    /// Rate at which speed bleeds off while idle
    pub deccel_speed: f32,
    /// Rate at which speed approaches the input target
    pub accel_speed: f32,

    /// Upward impulse applied by a jump
    pub jump_amount: f32,
    /// Releasing jump early caps upward velocity at `jump_amount / jump_cut_multiplier`
    pub jump_cut_multiplier: f32,
    /// Facing interpolation rate during a rollout
    pub air_turn_control_speed: f32,
    /// Speed approach rate during a rollout
    pub air_deccel_speed: f32,

    /// Upward impulse applied when a dive starts
    pub vertical_dive_height: f32,
    /// Horizontal speed added when a dive starts
    pub horizontal_dive_amount: f32,
    /// Cap on horizontal speed while diving
    pub diving_max_speed: f32,

    /// Linear speed loss per second while sliding
    pub slide_deccel_amount: f32,
    /// Minimum horizontal speed when a slide starts
    pub slide_initial_speed: f32,

    /// Horizontal speed when a rollout starts
    pub rollout_speed: f32,
    /// Upward impulse applied when a rollout starts
    pub roll_height: f32,

    /// Maximum downward speed while sliding down a wall
    pub wall_slide_speed: f32,

    /// Ground-contact probe geometry
    pub ground_check: GroundCheckConfig,
}

impl Default for LocomotionTunables {
    fn default() -> Self {
        Self {
            max_speed: 8.0,
            turning_speed: 10.0,
            deccel_speed: 8.0,
            accel_speed: 6.0,
            jump_amount: 10.0,
            jump_cut_multiplier: 2.0,
            air_turn_control_speed: 4.0,
            air_deccel_speed: 2.0,
            vertical_dive_height: 4.0,
            horizontal_dive_amount: 6.0,
            diving_max_speed: 14.0,
            slide_deccel_amount: 6.0,
            slide_initial_speed: 10.0,
            rollout_speed: 9.0,
            roll_height: 7.0,
            wall_slide_speed: 3.0,
            ground_check: GroundCheckConfig::default(),
        }
    }
}

impl LocomotionTunables {
    /// Parse tunables from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, LocomotionError> {
        let tunables: Self = serde_json::from_str(json)?;
        tunables.validate()?;
        Ok(tunables)
    }

    /// Read and parse a JSON tunables file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LocomotionError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LocomotionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject values the behaviors cannot work with.
    pub fn validate(&self) -> Result<(), LocomotionError> {
        let scalars = [
            ("max_speed", self.max_speed),
            ("turning_speed", self.turning_speed),
            ("deccel_speed", self.deccel_speed),
            ("accel_speed", self.accel_speed),
            ("jump_amount", self.jump_amount),
            ("jump_cut_multiplier", self.jump_cut_multiplier),
            ("air_turn_control_speed", self.air_turn_control_speed),
            ("air_deccel_speed", self.air_deccel_speed),
            ("vertical_dive_height", self.vertical_dive_height),
            ("horizontal_dive_amount", self.horizontal_dive_amount),
            ("diving_max_speed", self.diving_max_speed),
            ("slide_deccel_amount", self.slide_deccel_amount),
            ("slide_initial_speed", self.slide_initial_speed),
            ("rollout_speed", self.rollout_speed),
            ("roll_height", self.roll_height),
            ("wall_slide_speed", self.wall_slide_speed),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(LocomotionError::invalid(field, format!("must be finite, got {value}")));
            }
            // Rates, heights and speeds are magnitudes.
            if value < 0.0 {
                return Err(LocomotionError::invalid(
                    field,
                    format!("must not be negative, got {value}"),
                ));
            }
        }

        if self.max_speed <= 0.0 {
            return Err(LocomotionError::invalid(
                "max_speed",
                format!("must be positive, got {}", self.max_speed),
            ));
        }
        if self.jump_cut_multiplier <= 0.0 {
            return Err(LocomotionError::invalid(
                "jump_cut_multiplier",
                format!("must be positive, got {}", self.jump_cut_multiplier),
            ));
        }

        let check = &self.ground_check;
        if !(check.offset.is_finite() && check.body_scale.is_finite()) {
            return Err(LocomotionError::invalid(
                "ground_check",
                "offset and body_scale must be finite",
            ));
        }
        if !check.divisors.is_finite() || check.divisors.min_element() <= 0.0 {
            return Err(LocomotionError::invalid(
                "ground_check.divisors",
                format!("every divisor must be positive, got {}", check.divisors),
            ));
        }
        if check.layer_mask == 0 {
            return Err(LocomotionError::invalid(
                "ground_check.layer_mask",
                "no ground layers selected",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tunables_are_valid() {
        assert!(LocomotionTunables::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tunables =
            LocomotionTunables::from_json_str(r#"{ "max_speed": 12.0, "jump_amount": 15.0 }"#)
                .unwrap();
        assert_eq!(tunables.max_speed, 12.0);
        assert_eq!(tunables.jump_amount, 15.0);
        assert_eq!(tunables.accel_speed, LocomotionTunables::default().accel_speed);
        assert_eq!(tunables.ground_check, GroundCheckConfig::default());
    }

    #[test]
    fn test_nested_ground_check_json() {
        let tunables = LocomotionTunables::from_json_str(
            r#"{ "ground_check": { "divisors": [2.0, 10.0, 2.0], "layer_mask": 3 } }"#,
        )
        .unwrap();
        assert_eq!(tunables.ground_check.divisors, Vec3::new(2.0, 10.0, 2.0));
        assert_eq!(tunables.ground_check.layer_mask, 3);
        assert_eq!(tunables.ground_check.offset, GroundCheckConfig::default().offset);
    }

    #[test]
    fn test_zero_jump_cut_multiplier_rejected() {
        let result = LocomotionTunables::from_json_str(r#"{ "jump_cut_multiplier": 0.0 }"#);
        assert!(matches!(
            result,
            Err(LocomotionError::InvalidTunable { field: "jump_cut_multiplier", .. })
        ));
    }

    #[test]
    fn test_non_positive_divisor_rejected() {
        let tunables = LocomotionTunables {
            ground_check: GroundCheckConfig {
                divisors: Vec3::new(2.0, 0.0, 2.0),
                ..GroundCheckConfig::default()
            },
            ..LocomotionTunables::default()
        };
        assert!(tunables.validate().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let tunables = LocomotionTunables {
            accel_speed: f32::NAN,
            ..LocomotionTunables::default()
        };
        assert!(matches!(
            tunables.validate(),
            Err(LocomotionError::InvalidTunable { field: "accel_speed", .. })
        ));
    }

    #[test]
    fn test_negative_magnitudes_rejected() {
        let result = LocomotionTunables::from_json_str(r#"{ "wall_slide_speed": -3.0 }"#);
        assert!(matches!(
            result,
            Err(LocomotionError::InvalidTunable { field: "wall_slide_speed", .. })
        ));

        let tunables = LocomotionTunables {
            accel_speed: -1.0,
            ..LocomotionTunables::default()
        };
        assert!(matches!(
            tunables.validate(),
            Err(LocomotionError::InvalidTunable { field: "accel_speed", .. })
        ));

        let zero_rate = LocomotionTunables {
            air_deccel_speed: 0.0,
            ..LocomotionTunables::default()
        };
        assert!(zero_rate.validate().is_ok());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = LocomotionTunables::from_json_str("{ max_speed: }");
        assert!(matches!(result, Err(LocomotionError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = LocomotionTunables::load("/definitely/not/here/tunables.json");
        assert!(matches!(result, Err(LocomotionError::Io { .. })));
    }

    #[test]
    fn test_half_extents() {
        let check = GroundCheckConfig::default();
        let half = check.half_extents();
        assert!((half.x - 0.4).abs() < 1e-6);
        assert!((half.y - 0.1).abs() < 1e-6);
        assert!((half.z - 0.4).abs() < 1e-6);
    }
}
