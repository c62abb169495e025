//! Brute-force sphere ray tracer.
//!
//! Every function here is pure: the scene is read-only and nothing is cached
//! between calls, so pixels can be traced in any order.

use glam::Vec3;

use crate::scene::{Light, Scene, Sphere};

/// Returned for rays that hit nothing in range.
pub const BACKGROUND_COLOR: Vec3 = Vec3::ONE;

/// How a hit sphere is turned into a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// The sphere's albedo as is.
    Flat,
    /// Albedo scaled by ambient, diffuse and specular light.
    #[default]
    Lit,
}

/// Both parametric roots of `origin + t * direction` against `sphere`,
/// larger root first, or `None` when the ray misses.
pub fn intersect_ray_sphere(origin: Vec3, direction: Vec3, sphere: &Sphere) -> Option<(f32, f32)> {
    // |o + t*d - c|^2 = r^2
    // (d.d)t^2 + 2(co.d)t + (co.co - r^2) = 0, where co = o - c
    let co = origin - sphere.center;

    let a = direction.dot(direction);
    let b = 2.0 * co.dot(direction);
    let c = co.dot(co) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t0 = (-b + sqrt_d) / (2.0 * a);
    let t1 = (-b - sqrt_d) / (2.0 * a);
    Some((t0, t1))
}

/// Nearest sphere whose intersection lies strictly inside `(t_min, t_max)`.
///
/// Spheres are scanned in scene order and only a strictly smaller `t`
/// replaces the current best, so on a tie the earlier sphere wins.
pub fn closest_intersection<'s>(
    spheres: &'s [Sphere],
    origin: Vec3,
    direction: Vec3,
    t_min: f32,
    t_max: f32,
) -> Option<(&'s Sphere, f32)> {
    let mut closest: Option<(&Sphere, f32)> = None;

    for sphere in spheres {
        let Some((t0, t1)) = intersect_ray_sphere(origin, direction, sphere) else {
            continue;
        };

        for t in [t0, t1] {
            let in_range = t_min < t && t < t_max;
            let nearer = closest.map_or(true, |(_, best)| t < best);
            if in_range && nearer {
                closest = Some((sphere, t));
            }
        }
    }

    closest
}

/// Total light intensity reaching `point`. Not clamped, so it can exceed 1.
///
/// `normal` must be unit length. `view` points from the surface back towards
/// the eye. A `specular` of `0` skips the specular term.
pub fn compute_lighting(point: Vec3, normal: Vec3, view: Vec3, lights: &[Light], specular: u32) -> f32 {
    let mut total = 0.0;

    for light in lights {
        let (light_intensity, l) = match *light {
            Light::Ambient { intensity: ambient } => {
                total += ambient;
                continue;
            }
            Light::Point {
                intensity,
                position,
            } => (intensity, position - point),
            Light::Directional {
                intensity,
                direction,
            } => (intensity, direction),
        };

        // Diffuse
        let n_dot_l = normal.dot(l);
        if n_dot_l > 0.0 {
            total += light_intensity * n_dot_l / (normal.length() * l.length());
        }

        // Specular
        if specular != 0 {
            let r = 2.0 * normal * n_dot_l - l;
            let r_dot_v = r.dot(view);
            if r_dot_v > 0.0 {
                let cos = r_dot_v / (r.length() * view.length());
                total += light_intensity * cos.powf(specular as f32);
            }
        }
    }

    total
}

/// Color seen along a ray with full lighting.
pub fn trace_ray(scene: &Scene, origin: Vec3, direction: Vec3, t_min: f32, t_max: f32) -> Vec3 {
    trace_ray_with(scene, origin, direction, t_min, t_max, Shading::Lit)
}

/// Color seen along a ray, clamped to `[0, 1]`. Misses return
/// [`BACKGROUND_COLOR`].
pub fn trace_ray_with(
    scene: &Scene,
    origin: Vec3,
    direction: Vec3,
    t_min: f32,
    t_max: f32,
    shading: Shading,
) -> Vec3 {
    let Some((sphere, t)) = closest_intersection(&scene.spheres, origin, direction, t_min, t_max)
    else {
        return BACKGROUND_COLOR;
    };

    let color = match shading {
        Shading::Flat => sphere.albedo,
        Shading::Lit => {
            let point = origin + t * direction;
            let normal = (point - sphere.center).normalize();
            let view = origin - point;
            sphere.albedo * compute_lighting(point, normal, view, &scene.lights, sphere.specular)
        }
    };

    color.clamp(Vec3::ZERO, Vec3::ONE)
}
