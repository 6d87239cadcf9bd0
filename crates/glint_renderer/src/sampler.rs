//! Jittered per-pixel sample positions.

use rand::Rng;

/// N×N stratified sampling with uniform jitter inside each sub-pixel cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    per_axis: u32,
}

impl Sampler {
    /// `per_axis` samples in each direction (at least 1).
    pub fn new(per_axis: u32) -> Self {
        Self {
            per_axis: per_axis.max(1),
        }
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.per_axis * self.per_axis
    }

    /// Image coordinates `(u, v)` of every sample in pixel `(x, y)`.
    ///
    /// Pixel rows count down from the top of the image, `v` counts up from
    /// the bottom, so row 0 maps to `v` near 1.
    pub fn pixel_samples<R: Rng + ?Sized>(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Vec<(f32, f32)> {
        let n = self.per_axis as f32;
        let mut samples = Vec::with_capacity(self.samples_per_pixel() as usize);

        for j in 0..self.per_axis {
            for i in 0..self.per_axis {
                let jx = rng.gen::<f32>() - 0.5;
                let jy = rng.gen::<f32>() - 0.5;

                let px = x as f32 + (i as f32 + 0.5 + jx) / n;
                let py = y as f32 + (j as f32 + 0.5 + jy) / n;

                samples.push((px / width as f32, 1.0 - py / height as f32));
            }
        }
        samples
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_count() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(Sampler::new(3).pixel_samples(0, 0, 10, 10, &mut rng).len(), 9);
        assert_eq!(Sampler::new(0).samples_per_pixel(), 1);
        assert_eq!(Sampler::default().samples_per_pixel(), 4);
    }

    #[test]
    fn test_samples_stay_in_their_cells() {
        let mut rng = StdRng::seed_from_u64(99);
        let sampler = Sampler::new(4);
        let (width, height) = (8, 4);

        for _ in 0..50 {
            let samples = sampler.pixel_samples(5, 1, width, height, &mut rng);
            for (k, (u, v)) in samples.into_iter().enumerate() {
                let (i, j) = ((k % 4) as f32, (k / 4) as f32);
                let px = u * width as f32 - 5.0;
                let py = (1.0 - v) * height as f32 - 1.0;

                assert!(px >= i / 4.0 - 1e-4 && px <= (i + 1.0) / 4.0 + 1e-4, "px {px}");
                assert!(py >= j / 4.0 - 1e-4 && py <= (j + 1.0) / 4.0 + 1e-4, "py {py}");
            }
        }
    }

    #[test]
    fn test_orientation() {
        let mut rng = StdRng::seed_from_u64(1);
        let sampler = Sampler::new(1);

        let (u, v) = sampler.pixel_samples(0, 0, 100, 100, &mut rng)[0];
        assert!(u < 0.01 && v > 0.99, "top-left pixel: ({u}, {v})");

        let (u, v) = sampler.pixel_samples(99, 99, 100, 100, &mut rng)[0];
        assert!(u > 0.99 && v < 0.01, "bottom-right pixel: ({u}, {v})");
    }
}
