//! Phong surface coefficients and the illumination formula.

use glint_math::Vec3;

/// Linear RGB color. Channels are unbounded until the image is written.
pub type Color = Vec3;

/// Phong material: ambient, diffuse and specular reflectance, the specular
/// exponent and the mirror reflectance used for recursive bounces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Ambient coefficient
    pub ka: Color,

    /// Diffuse coefficient
    pub kd: Color,

    /// Specular coefficient
    pub ks: Color,

    /// Specular exponent
    pub p: f32,

    /// Mirror reflectance
    pub kr: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: Color::ZERO,
            kd: Color::ZERO,
            ks: Color::ZERO,
            p: 1.0,
            kr: Color::ZERO,
        }
    }
}

impl Material {
    pub fn new(ka: Color, kd: Color, ks: Color, p: f32, kr: Color) -> Self {
        Self { ka, kd, ks, p, kr }
    }

    /// Builder: set the ambient coefficient.
    pub fn with_ambient(mut self, ka: Color) -> Self {
        self.ka = ka;
        self
    }

    /// Builder: set the diffuse coefficient.
    pub fn with_diffuse(mut self, kd: Color) -> Self {
        self.kd = kd;
        self
    }

    /// Builder: set the specular coefficient and exponent.
    pub fn with_specular(mut self, ks: Color, p: f32) -> Self {
        self.ks = ks;
        self.p = p;
        self
    }

    /// Builder: set the mirror reflectance.
    pub fn with_reflectance(mut self, kr: Color) -> Self {
        self.kr = kr;
        self
    }

    /// True if reflection bounces contribute anything.
    pub fn is_reflective(&self) -> bool {
        self.kr != Color::ZERO
    }

    /// Phong contribution of one light.
    ///
    /// `n` is the unit surface normal, `v` points from the surface to the
    /// viewer, `l` points from the light to the surface.
    ///
    /// `C = (ka + kd*max(-L·N, 0) + ks*max(R·V, 0)^p) * I` with
    /// `R = L - 2(L·N)N`.
    pub fn phong(&self, n: Vec3, v: Vec3, l: Vec3, intensity: Color) -> Color {
        let l_dot_n = l.dot(n);
        let diffuse = (-l_dot_n).max(0.0);
        let r = l - 2.0 * l_dot_n * n;
        let specular = r.dot(v).max(0.0).powf(self.p);

        (self.ka + self.kd * diffuse + self.ks * specular) * intensity
    }
}
