use bevy::prelude::*;

use crate::engine::scene::bounds::SceneBounds;

/// Centre-to-origin offset and uniform fit scale for a dropped model.
///
/// Realised in the scene as a two-level hierarchy: the root entity carries
/// the uniform scale, a pivot child carries the centring offset, so a point
/// `p` of the model ends up at `(p + offset) * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormaliseTransform {
    pub offset: Vec3,
    pub scale: f32,
}

impl NormaliseTransform {
    /// Where the transform places a world-space point of the model.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        (point + self.offset) * self.scale
    }
}

/// Fit a model's bounds to a sphere of `fit_radius` around the origin.
///
/// The offset moves the bounds centroid to the origin; the scale shrinks or
/// grows the model so its largest axis extent equals `fit_radius`. A
/// degenerate model (zero extent on every axis) keeps its size: the scale
/// falls back to 1 rather than dividing by zero.
pub fn fit_to_radius(bounds: &SceneBounds, fit_radius: f32) -> NormaliseTransform {
    let offset = -bounds.center();
    let max_dimension = bounds.max_dimension();

    let scale = if max_dimension > f32::EPSILON {
        fit_radius / max_dimension
    } else {
        warn!("model has no spatial extent, skipping fit scale");
        1.0
    };

    NormaliseTransform { offset, scale }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn normalised_bounds(bounds: &SceneBounds, fit_radius: f32) -> SceneBounds {
        let transform = fit_to_radius(bounds, fit_radius);
        SceneBounds::from_points(bounds.corners().map(|corner| transform.apply(corner))).unwrap()
    }

    #[test]
    fn test_known_model_offsets_and_scale() {
        // Geometry spanning x in [0,10], y in [0,2], z in [0,4].
        let bounds = SceneBounds::new(Vec3::ZERO, Vec3::new(10.0, 2.0, 4.0));
        let transform = fit_to_radius(&bounds, 2.0);

        assert_relative_eq!(transform.offset.x, -5.0, epsilon = 1e-6);
        assert_relative_eq!(transform.offset.y, -1.0, epsilon = 1e-6);
        assert_relative_eq!(transform.offset.z, -2.0, epsilon = 1e-6);
        assert_relative_eq!(transform.scale, 0.2, epsilon = 1e-6);

        let fitted = normalised_bounds(&bounds, 2.0);
        assert_relative_eq!(fitted.min.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(fitted.max.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(fitted.min.y, -0.2, epsilon = 1e-6);
        assert_relative_eq!(fitted.max.y, 0.2, epsilon = 1e-6);
        assert_relative_eq!(fitted.min.z, -0.4, epsilon = 1e-6);
        assert_relative_eq!(fitted.max.z, 0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_centred_at_origin() {
        let bounds = SceneBounds::new(Vec3::new(3.0, -7.0, 12.5), Vec3::new(9.0, -1.0, 20.5));
        let fitted = normalised_bounds(&bounds, 2.0);
        let centre = fitted.center();
        assert_relative_eq!(centre.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(centre.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(centre.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_largest_extent_matches_fit_radius() {
        let bounds = SceneBounds::new(Vec3::new(-0.02, 0.0, -0.01), Vec3::new(0.02, 0.05, 0.01));
        let fitted = normalised_bounds(&bounds, 2.0);
        assert_relative_eq!(fitted.max_dimension(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_model_keeps_unit_scale() {
        // Single point: no extent on any axis.
        let bounds = SceneBounds::new(Vec3::new(3.0, 4.0, 5.0), Vec3::new(3.0, 4.0, 5.0));
        let transform = fit_to_radius(&bounds, 2.0);

        assert!(transform.scale.is_finite());
        assert_relative_eq!(transform.scale, 1.0, epsilon = 1e-6);
        // The point still moves to the origin.
        let moved = transform.apply(Vec3::new(3.0, 4.0, 5.0));
        assert_relative_eq!(moved.length(), 0.0, epsilon = 1e-6);
    }
}
