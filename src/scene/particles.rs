//! Fibonacci-sphere particle distribution.
//!
//! Places `N` points approximately evenly over a sphere by stepping `y`
//! uniformly through `(-1, 1)` and rotating each successive point by the
//! golden angle. The result has no clustering at the poles and is a pure
//! function of `(count, radius)`.

use glam::Vec3;

use crate::error::HaloError;

/// Azimuthal increment between consecutive points, `π (3 − √5)` radians
/// (≈ 2.39996, the golden angle).
#[must_use]
pub fn golden_angle() -> f64 {
    std::f64::consts::PI * (3.0 - 5.0_f64.sqrt())
}

/// An immutable, ordered set of particle positions on a sphere surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSet {
    positions: Vec<Vec3>,
    radius: f32,
}

impl ParticleSet {
    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the set holds no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Radius of the sphere the particles were distributed over.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Particle positions in generation order.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Iterate over particle positions in generation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vec3> {
        self.positions.iter()
    }

    /// Tightly packed `x, y, z` floats, ready for a GPU buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}

impl<'a> IntoIterator for &'a ParticleSet {
    type Item = &'a Vec3;
    type IntoIter = std::slice::Iter<'a, Vec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

/// Distribute `count` points over the sphere of the given `radius` along a
/// golden-angle spiral.
///
/// A count of zero yields an empty set. Positions are computed in `f64` and
/// stored as `f32`.
///
/// # Errors
///
/// Returns [`HaloError::InvalidArgument`] if `count` is negative or `radius`
/// is not a finite positive number, or if storage for `count` points cannot
/// be allocated. Validation runs before any computation.
pub fn distribute(count: i64, radius: f32) -> Result<ParticleSet, HaloError> {
    if count < 0 {
        return Err(HaloError::invalid(format!(
            "particle count must be >= 0, got {count}"
        )));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(HaloError::invalid(format!(
            "sphere radius must be a finite positive number, got {radius}"
        )));
    }

    let n = usize::try_from(count).map_err(|_| {
        HaloError::invalid(format!("particle count {count} is not addressable"))
    })?;
    let mut positions = Vec::new();
    positions.try_reserve_exact(n).map_err(|e| {
        HaloError::invalid(format!("cannot allocate {n} particles: {e}"))
    })?;
    if n == 0 {
        return Ok(ParticleSet { positions, radius });
    }

    let increment = golden_angle();
    let offset = 2.0 / n as f64;
    let scale = f64::from(radius);

    for i in 0..n {
        let i = i as f64;
        let y = i * offset - 1.0 + offset / 2.0;
        let r = (1.0 - y * y).sqrt();
        let phi = i * increment;
        positions.push(Vec3::new(
            (scale * phi.cos() * r) as f32,
            (scale * y) as f32,
            (scale * phi.sin() * r) as f32,
        ));
    }

    log::debug!("distributed {n} particles on sphere of radius {radius}");
    Ok(ParticleSet { positions, radius })
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn distance_error(p: Vec3, radius: f32) -> f64 {
        (p.as_dvec3().length() - f64::from(radius)).abs()
    }

    #[test]
    fn every_point_lies_on_the_sphere() {
        for &(n, radius) in &[(1, 1.0), (4, 1.0), (8000, 1.6), (257, 42.5)] {
            let set = distribute(n, radius).unwrap();
            assert_eq!(set.len(), n as usize);
            for p in &set {
                assert!(
                    distance_error(*p, radius) < 1e-6 * f64::from(radius),
                    "{p:?} is off the sphere of radius {radius}"
                );
            }
        }
    }

    #[test]
    fn random_inputs_keep_count_and_radius() {
        let mut rng = rand::rng();
        for _ in 0..32 {
            let n = rng.random_range(1..2000_i64);
            let radius = rng.random_range(0.01_f32..100.0);
            let set = distribute(n, radius).unwrap();
            assert_eq!(set.len(), n as usize);
            assert!(set
                .iter()
                .all(|p| distance_error(*p, radius) < 1e-6 * f64::from(radius)));
        }
    }

    #[test]
    fn identical_inputs_are_bit_identical() {
        let a = distribute(8000, 1.6).unwrap();
        let b = distribute(8000, 1.6).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn y_coordinates_step_evenly_through_open_interval() {
        let n = 500;
        let radius = 2.0_f32;
        let set = distribute(n, radius).unwrap();
        let step = 2.0 * radius / n as f32;

        let ys: Vec<f32> = set.iter().map(|p| p.y).collect();
        assert!(ys.iter().all(|&y| y > -radius && y < radius));
        for pair in ys.windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-5);
        }
    }

    #[test]
    fn consecutive_points_never_coincide() {
        let set = distribute(1000, 1.0).unwrap();
        for pair in set.positions().windows(2) {
            assert!(pair[0].distance(pair[1]) > 1e-4);
        }
    }

    #[test]
    fn four_points_match_hand_computed_layout() {
        let set = distribute(4, 1.0).unwrap();
        let expected_y = [-0.75, -0.25, 0.25, 0.75];
        let expected_phi = [0.0, 2.39996, 4.79993, 7.19989];

        for (i, p) in set.iter().enumerate() {
            assert!((p.y - expected_y[i]).abs() < 1e-6);
            assert!((p.length() - 1.0).abs() < 1e-6);

            let phi = f64::from(p.z).atan2(f64::from(p.x));
            let want = expected_phi[i] % std::f64::consts::TAU;
            let diff = (phi - want).rem_euclid(std::f64::consts::TAU);
            assert!(diff < 1e-4 || std::f64::consts::TAU - diff < 1e-4);
        }
    }

    #[test]
    fn single_point_uses_half_offset_row() {
        let set = distribute(1, 1.6).unwrap();
        assert_eq!(set.len(), 1);
        let p = set.positions()[0];
        // offset = 2, so y = radius * (-1 + 1/N)
        assert!((p.y - 1.6 * (-1.0 + 1.0)).abs() < 1e-6);
        assert!((p.x - 1.6).abs() < 1e-6);
        assert!((p.length() - 1.6).abs() < 1e-6);
    }

    #[test]
    fn zero_count_is_empty_not_an_error() {
        let set = distribute(0, 1.0).unwrap();
        assert!(set.is_empty());
        assert!(set.as_bytes().is_empty());
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(matches!(
            distribute(-5, 1.0),
            Err(HaloError::InvalidArgument(_))
        ));
        assert!(matches!(
            distribute(10, 0.0),
            Err(HaloError::InvalidArgument(_))
        ));
        assert!(matches!(
            distribute(10, -1.0),
            Err(HaloError::InvalidArgument(_))
        ));
        assert!(matches!(
            distribute(10, f32::NAN),
            Err(HaloError::InvalidArgument(_))
        ));
    }

    #[test]
    fn unallocatable_count_is_an_error_not_a_panic() {
        let result = std::panic::catch_unwind(|| distribute(i64::MAX, 1.0));
        assert!(matches!(result, Ok(Err(HaloError::InvalidArgument(_)))));
    }

    #[test]
    fn golden_angle_constant() {
        assert!((golden_angle() - 2.399_963).abs() < 1e-6);
    }

    #[test]
    fn bytes_are_tightly_packed_xyz() {
        let set = distribute(3, 1.0).unwrap();
        assert_eq!(set.as_bytes().len(), 3 * 3 * size_of::<f32>());
    }
}
