//! Light sources.

use glint_math::Vec3;

use crate::Color;

/// Distance attenuation of a point light.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Falloff {
    #[default]
    None,
    /// Intensity scaled by `1/d`
    Linear,
    /// Intensity scaled by `1/d²`
    Quadratic,
}

impl Falloff {
    /// Decode the integer falloff code of the scene format.
    ///
    /// `1` is linear, `2` is quadratic, anything else is no falloff.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Falloff::Linear,
            2 => Falloff::Quadratic,
            _ => Falloff::None,
        }
    }

    /// Attenuation factor at distance `d`.
    pub fn attenuation(&self, d: f32) -> f32 {
        if d <= 0.0 {
            return 1.0;
        }
        match self {
            Falloff::None => 1.0,
            Falloff::Linear => 1.0 / d,
            Falloff::Quadratic => 1.0 / (d * d),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    /// Parallel light travelling along `direction` (unit length)
    Directional { direction: Vec3 },
    /// Light emitted from a position
    Point { position: Vec3, falloff: Falloff },
    /// Constant light reaching every surface
    Ambient,
}

/// A light source with a color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
}

impl Light {
    /// Directional light travelling along `direction`. The direction is normalized.
    pub fn directional(direction: Vec3, color: Color) -> Self {
        Self {
            kind: LightKind::Directional {
                direction: direction.normalize_or_zero(),
            },
            color,
        }
    }

    pub fn point(position: Vec3, falloff: Falloff, color: Color) -> Self {
        Self {
            kind: LightKind::Point { position, falloff },
            color,
        }
    }

    pub fn ambient(color: Color) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
        }
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self.kind, LightKind::Ambient)
    }

    /// Unit direction from the light towards `p`. Zero for ambient lights.
    pub fn direction_at(&self, p: Vec3) -> Vec3 {
        match self.kind {
            LightKind::Directional { direction } => direction,
            LightKind::Point { position, .. } => (p - position).normalize_or_zero(),
            LightKind::Ambient => Vec3::ZERO,
        }
    }

    /// Distance from `p` to the light.
    ///
    /// Infinite for directional lights, zero for ambient lights.
    pub fn distance_to(&self, p: Vec3) -> f32 {
        match self.kind {
            LightKind::Directional { .. } => f32::INFINITY,
            LightKind::Point { position, .. } => (p - position).length(),
            LightKind::Ambient => 0.0,
        }
    }

    /// Light color arriving at `p`, after falloff.
    pub fn intensity_at(&self, p: Vec3) -> Color {
        match self.kind {
            LightKind::Point { falloff, .. } => self.color * falloff.attenuation(self.distance_to(p)),
            _ => self.color,
        }
    }
}
