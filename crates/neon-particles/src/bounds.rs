use glam::{Vec2, Vec3};
use rand::Rng;

/// Region ambient particles are spawned in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// Flat screen-space rectangle, z = 0.
    Rect { min: Vec2, max: Vec2 },
    /// Axis-aligned cube centered on the origin.
    Cube { half_extent: f32 },
    /// Ball centered on the origin.
    Sphere { radius: f32 },
}

impl Bounds {
    /// Draw a point uniformly at random inside the bounds.
    pub fn sample(&self, rng: &mut impl Rng) -> Vec3 {
        match *self {
            Bounds::Rect { min, max } => Vec3::new(
                uniform(rng, min.x, max.x),
                uniform(rng, min.y, max.y),
                0.0,
            ),
            Bounds::Cube { half_extent } => {
                let h = half_extent.abs();
                if !h.is_finite() {
                    return Vec3::ZERO;
                }
                Vec3::new(
                    uniform(rng, -h, h),
                    uniform(rng, -h, h),
                    uniform(rng, -h, h),
                )
            }
            Bounds::Sphere { radius } => {
                let r = radius.abs();
                if r == 0.0 || !r.is_finite() {
                    return Vec3::ZERO;
                }
                // Rejection sampling keeps the distribution uniform in volume.
                loop {
                    let p = Vec3::new(
                        uniform(rng, -r, r),
                        uniform(rng, -r, r),
                        uniform(rng, -r, r),
                    );
                    if p.length_squared() <= r * r {
                        return p;
                    }
                }
            }
        }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        match *self {
            Bounds::Rect { min, max } => {
                p.z == 0.0 && p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
            }
            Bounds::Cube { half_extent } => p.abs().max_element() <= half_extent.abs(),
            Bounds::Sphere { radius } => p.length() <= radius.abs() + f32::EPSILON,
        }
    }

    pub fn is_volumetric(&self) -> bool {
        !matches!(self, Bounds::Rect { .. })
    }
}

/// Uniform sample in `lo..hi`, or `lo` for an empty range.
pub(crate) fn uniform(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_samples_stay_inside() {
        let mut rng = rng();
        let shapes = [
            Bounds::Rect {
                min: Vec2::new(0.0, 0.0),
                max: Vec2::new(80.0, 48.0),
            },
            Bounds::Cube { half_extent: 10.0 },
            Bounds::Sphere { radius: 5.0 },
        ];
        for bounds in shapes {
            for _ in 0..500 {
                assert!(bounds.contains(bounds.sample(&mut rng)), "{bounds:?}");
            }
        }
    }

    #[test]
    fn test_degenerate_bounds() {
        let mut rng = rng();
        let empty = Bounds::Rect {
            min: Vec2::new(3.0, 4.0),
            max: Vec2::new(3.0, 4.0),
        };
        assert_eq!(empty.sample(&mut rng), Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(Bounds::Sphere { radius: 0.0 }.sample(&mut rng), Vec3::ZERO);
    }

    #[test]
    fn test_non_finite_bounds_do_not_hang() {
        let mut rng = rng();
        for r in [f32::NAN, f32::INFINITY] {
            assert_eq!(Bounds::Sphere { radius: r }.sample(&mut rng), Vec3::ZERO);
            assert_eq!(
                Bounds::Cube { half_extent: r }.sample(&mut rng),
                Vec3::ZERO
            );
        }
    }
}
