//! Ray picking against primitives.

use codecity_core::{
    draw::{Primitive, PrimitiveKind},
    geometry::{Size3, Vec3},
};

const EPSILON: f32 = 1e-6;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Creates a ray; `direction` is normalized. Returns `None` for a zero
    /// direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let length = direction.length();
        (length > EPSILON && length.is_finite()).then(|| Self {
            origin,
            direction: direction.scale(1.0 / length),
        })
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Returns the point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin.add(self.direction.scale(t))
    }
}

/// Returns the distance along `ray` to the nearest front-facing hit on
/// `primitive`, if any. Labels are never hit.
pub fn intersect(primitive: &Primitive, ray: &Ray) -> Option<f32> {
    // Work in the primitive's frame: centered and unrotated.
    let origin = ray
        .origin
        .sub(primitive.position())
        .rotate_y(-primitive.rotation());
    let direction = ray.direction.rotate_y(-primitive.rotation());
    let half = half_extents(primitive.dimensions());

    match primitive.kind() {
        PrimitiveKind::Box => intersect_box(origin, direction, half),
        PrimitiveKind::Cylinder { radius } => {
            intersect_cylinder(origin, direction, *radius, half.y())
        }
        PrimitiveKind::Label { .. } => None,
    }
}

/// Slab test against the box `[-half, half]`.
fn intersect_box(origin: Vec3, direction: Vec3, half: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for (o, d, h) in [
        (origin.x(), direction.x(), half.x()),
        (origin.y(), direction.y(), half.y()),
        (origin.z(), direction.z(), half.z()),
    ] {
        if d.abs() < EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let (t0, t1) = ((-h - o) / d, (h - o) / d);
        let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    nearest_non_negative(t_near, t_far)
}

/// Hit test against an upright cylinder of `radius` spanning
/// `[-half_height, half_height]`, caps included.
fn intersect_cylinder(origin: Vec3, direction: Vec3, radius: f32, half_height: f32) -> Option<f32> {
    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && best.is_none_or(|current| t < current) {
            best = Some(t);
        }
    };

    // Side: (ox + t dx)² + (oz + t dz)² = r²
    let a = direction.x() * direction.x() + direction.z() * direction.z();
    if a > EPSILON {
        let b = 2.0 * (origin.x() * direction.x() + origin.z() * direction.z());
        let c = origin.x() * origin.x() + origin.z() * origin.z() - radius * radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let root = discriminant.sqrt();
            for t in [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)] {
                let y = origin.y() + t * direction.y();
                if (-half_height..=half_height).contains(&y) {
                    consider(t);
                }
            }
        }
    }

    // Caps.
    if direction.y().abs() > EPSILON {
        for cap in [-half_height, half_height] {
            let t = (cap - origin.y()) / direction.y();
            let (x, z) = (origin.x() + t * direction.x(), origin.z() + t * direction.z());
            if x * x + z * z <= radius * radius {
                consider(t);
            }
        }
    }

    best
}

fn nearest_non_negative(t_near: f32, t_far: f32) -> Option<f32> {
    if t_far < 0.0 {
        None
    } else if t_near >= 0.0 {
        Some(t_near)
    } else {
        // Origin inside the volume.
        Some(t_far)
    }
}

fn half_extents(size: Size3) -> Vec3 {
    Vec3::new(size.width() / 2.0, size.height() / 2.0, size.depth() / 2.0)
}
