use bevy::prelude::*;

/// 3D spatial bounds of scene geometry in a common coordinate space.
/// Used for camera framing and for fitting dropped models to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl SceneBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest bounds around a set of points. `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::new(first, first);
        for point in points {
            bounds.include(point);
        }
        Some(bounds)
    }

    /// Grow the bounds to contain `point`.
    pub fn include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Smallest bounds containing both operands.
    pub fn union(&self, other: &SceneBounds) -> SceneBounds {
        SceneBounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Calculate centre point for camera framing and origin fitting.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Calculate size dimensions along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest axis extent; the quantity the fit scale divides by.
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    /// The eight corner points of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
        ]
    }

    /// Axis-aligned bounds of this box under an affine transform.
    ///
    /// Transforms the eight corners and re-wraps them, which is exact for
    /// the translate/rotate/scale matrices decoded from model nodes.
    pub fn transformed(&self, matrix: &Mat4) -> SceneBounds {
        let corners = self.corners().map(|corner| matrix.transform_point3(corner));
        // corners() never yields an empty set
        SceneBounds::from_points(corners).unwrap_or(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_and_size() {
        let bounds = SceneBounds::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 2.0, 4.0));
        assert_relative_eq!(bounds.center().x, 5.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.center().y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.center().z, 2.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.size().x, 10.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max_dimension(), 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_from_points() {
        let bounds = SceneBounds::from_points([
            Vec3::new(1.0, 5.0, -2.0),
            Vec3::new(-3.0, 0.0, 4.0),
            Vec3::new(2.0, 1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Vec3::new(-3.0, 0.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(2.0, 5.0, 4.0));

        assert!(SceneBounds::from_points([]).is_none());
    }

    #[test]
    fn test_union() {
        let a = SceneBounds::new(Vec3::ZERO, Vec3::ONE);
        let b = SceneBounds::new(Vec3::splat(-2.0), Vec3::splat(0.5));
        let joined = a.union(&b);
        assert_eq!(joined.min, Vec3::splat(-2.0));
        assert_eq!(joined.max, Vec3::ONE);
    }

    #[test]
    fn test_transformed_translation_and_scale() {
        let bounds = SceneBounds::new(Vec3::ZERO, Vec3::ONE);
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::IDENTITY,
            Vec3::new(1.0, 0.0, -1.0),
        );
        let moved = bounds.transformed(&matrix);
        assert_relative_eq!(moved.min.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(moved.min.z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(moved.max.x, 3.0, epsilon = 1e-6);
        assert_relative_eq!(moved.max.y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(moved.max.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_transformed_rotation_stays_axis_aligned() {
        let bounds = SceneBounds::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let matrix = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let rotated = bounds.transformed(&matrix);
        // A quarter turn of a symmetric cube maps onto itself.
        assert_relative_eq!(rotated.min.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(rotated.max.z, 1.0, epsilon = 1e-5);
    }
}
