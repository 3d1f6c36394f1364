use glam::{Mat4, Vec3};

/// Axis-aligned bounding box in model space
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Inverted box that any `include` call replaces
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::empty(), |mut aabb, p| {
            aabb.include(p);
            aabb
        })
    }

    pub fn include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Radius of the bounding sphere around `center`
    pub fn radius(&self) -> f32 {
        self.extent().length() * 0.5
    }

    /// Transform that centres the box on the origin and scales its bounding
    /// sphere to `target_radius`. Degenerate boxes are only centred.
    pub fn fit_transform(&self, target_radius: f32) -> Mat4 {
        if self.is_empty() {
            return Mat4::IDENTITY;
        }
        let radius = self.radius();
        let scale = if radius > f32::EPSILON {
            target_radius / radius
        } else {
            1.0
        };
        Mat4::from_scale(Vec3::splat(scale)) * Mat4::from_translation(-self.center())
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::empty()
    }
}
