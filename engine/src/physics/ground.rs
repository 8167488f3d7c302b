//! Ground-Contact Probe
//!
//! The controller decides "grounded" with a box overlap test: a thin box
//! below the character's feet, rotated with the body, tested against
//! geometry on the ground layers.
//!
//! [`GroundPlane`] is a reference [`GroundProbe`]: a solid half-space below
//! a base height plus any number of axis-aligned ground boxes (platforms,
//! ledges). The oriented probe is tested through its world-space bounding
//! box, which is conservative for rotated probes.

use glam::{Mat3, Quat, Vec3};

use crate::config::GroundCheckConfig;

/// Ground query the physics collaborator answers.
pub trait GroundProbe {
    /// Whether a box overlaps any collider on `layer_mask`.
    ///
    /// # Arguments
    /// * `center` - World-space box center
    /// * `half_extents` - Half size along the box's local axes
    /// * `orientation` - Box rotation
    /// * `layer_mask` - Bit set of layers that count as ground
    fn overlap_box(&self, center: Vec3, half_extents: Vec3, orientation: Quat, layer_mask: u32)
    -> bool;
}

/// Geometry of the ground-check box for one body pose.
///
/// Exposed for debug drawing; it has no behavioral effect beyond the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundCheckBox {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub orientation: Quat,
}

impl GroundCheckBox {
    /// Place the configured probe relative to a body pose.
    pub fn from_pose(position: Vec3, rotation: Quat, config: &GroundCheckConfig) -> Self {
        Self {
            center: position + rotation * config.offset,
            half_extents: config.half_extents(),
            orientation: rotation,
        }
    }

    /// Run the probe against a ground query.
    pub fn test(&self, probe: &dyn GroundProbe, layer_mask: u32) -> bool {
        probe.overlap_box(self.center, self.half_extents, self.orientation, layer_mask)
    }

    /// Full size of the box, as drawn by a wireframe gizmo.
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }
}

/// World-space half-extents of an oriented box's bounding box.
fn world_half_extents(half_extents: Vec3, orientation: Quat) -> Vec3 {
    let basis = Mat3::from_quat(orientation);
    basis.x_axis.abs() * half_extents.x
        + basis.y_axis.abs() * half_extents.y
        + basis.z_axis.abs() * half_extents.z
}

/// Axis-aligned piece of ground geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundBox {
    pub min: Vec3,
    pub max: Vec3,
    /// Layer bits this box belongs to
    pub layers: u32,
}

impl GroundBox {
    pub fn new(min: Vec3, max: Vec3, layers: u32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            layers,
        }
    }

    fn overlaps(&self, min: Vec3, max: Vec3) -> bool {
        self.min.cmple(max).all() && min.cmple(self.max).all()
    }

    fn contains_xz(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.z >= self.min.z && point.z <= self.max.z
    }
}

/// Tolerance for stepping onto a box whose top is just above the feet.
const STEP_TOLERANCE: f32 = 0.05;

/// Solid ground below `height` plus optional boxes.
#[derive(Debug, Clone)]
pub struct GroundPlane {
    /// Height of the base ground surface; `None` means a bottomless world
    pub height: Option<f32>,
    /// Layer bits of the base ground surface
    pub layers: u32,
    boxes: Vec<GroundBox>,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self::flat(0.0)
    }
}

impl GroundPlane {
    /// Infinite flat ground at `height` on layer 1.
    pub fn flat(height: f32) -> Self {
        Self {
            height: Some(height),
            layers: 1,
            boxes: Vec::new(),
        }
    }

    /// No base ground at all; only added boxes count.
    pub fn void() -> Self {
        Self {
            height: None,
            layers: 1,
            boxes: Vec::new(),
        }
    }

    /// Add a ground box.
    pub fn with_box(mut self, ground_box: GroundBox) -> Self {
        self.boxes.push(ground_box);
        self
    }

    /// Height a body at `position` rests on, or `f32::NEG_INFINITY` if none.
    ///
    /// Only surfaces at or below the feet (within a small step tolerance)
    /// qualify, so walking off a platform drops to the surface underneath.
    pub fn support_height(&self, position: Vec3) -> f32 {
        let mut support = self.height.unwrap_or(f32::NEG_INFINITY);
        for ground_box in &self.boxes {
            let top = ground_box.max.y;
            if ground_box.contains_xz(position) && top <= position.y + STEP_TOLERANCE {
                support = support.max(top);
            }
        }
        support
    }
}

impl GroundProbe for GroundPlane {
    fn overlap_box(
        &self,
        center: Vec3,
        half_extents: Vec3,
        orientation: Quat,
        layer_mask: u32,
    ) -> bool {
        let extent = world_half_extents(half_extents, orientation);
        let (min, max) = (center - extent, center + extent);

        if let Some(height) = self.height {
            if layer_mask & self.layers != 0 && min.y <= height {
                return true;
            }
        }

        self.boxes
            .iter()
            .any(|ground_box| layer_mask & ground_box.layers != 0 && ground_box.overlaps(min, max))
    }
}
