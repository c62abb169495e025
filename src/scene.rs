use glam::Vec3;

/// Immutable description of everything a frame is traced against.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>, lights: Vec<Light>) -> Self {
        Self { spheres, lights }
    }

    /// Three unlit spheres, used by the flat-shaded tracer.
    pub fn basic() -> Self {
        Self {
            spheres: vec![
                Sphere::new(Vec3::new(0.0, -1.0, 3.0), 1.0, Vec3::new(1.0, 0.0, 0.0)),
                Sphere::new(Vec3::new(2.0, 0.0, 4.0), 1.0, Vec3::new(0.0, 0.0, 1.0)),
                Sphere::new(Vec3::new(-2.0, 0.0, 4.0), 1.0, Vec3::new(0.0, 1.0, 0.0)),
            ],
            lights: Vec::new(),
        }
    }

    /// Four spheres resting on a large yellow "floor" sphere, lit by one
    /// light of each kind.
    pub fn lit() -> Self {
        Self {
            spheres: vec![
                Sphere::new(Vec3::new(0.0, -1.0, 3.0), 1.0, Vec3::new(1.0, 0.0, 0.0))
                    .with_specular(500),
                Sphere::new(Vec3::new(2.0, 0.0, 4.0), 1.0, Vec3::new(0.0, 0.0, 1.0))
                    .with_specular(500),
                Sphere::new(Vec3::new(-2.0, 0.0, 4.0), 1.0, Vec3::new(0.0, 1.0, 0.0))
                    .with_specular(10),
                Sphere::new(Vec3::new(0.0, -5001.0, 0.0), 5000.0, Vec3::new(1.0, 1.0, 0.0))
                    .with_specular(1000),
            ],
            lights: vec![
                Light::Ambient { intensity: 0.2 },
                Light::Point {
                    intensity: 0.6,
                    position: Vec3::new(2.0, 1.0, 0.0),
                },
                Light::Directional {
                    intensity: 0.2,
                    direction: Vec3::new(1.0, 4.0, 4.0),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,

    /// Unlit base color, components in [0, 1].
    pub albedo: Vec3,
    /// Phong exponent. `0` disables the specular term.
    pub specular: u32,
}

impl Sphere {
    /// Panics if `radius` is not strictly positive.
    pub fn new(center: Vec3, radius: f32, albedo: Vec3) -> Self {
        assert!(
            radius > 0.0,
            "sphere radius must be positive, got {radius}"
        );
        Self {
            center,
            radius,
            albedo,
            specular: 0,
        }
    }

    pub fn with_specular(mut self, specular: u32) -> Self {
        self.specular = specular;
        self
    }

    /// The albedo viewed as an `[r, g, b]` triple.
    pub fn color(&self) -> [f32; 3] {
        self.albedo.to_array()
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 0.5,
            albedo: Vec3::ONE,
            specular: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient { intensity: f32 },
    Point { intensity: f32, position: Vec3 },
    /// `direction` points towards the light and need not be normalized.
    Directional { intensity: f32, direction: Vec3 },
}

impl Light {
    pub fn intensity(&self) -> f32 {
        match *self {
            Light::Ambient { intensity }
            | Light::Point { intensity, .. }
            | Light::Directional { intensity, .. } => intensity,
        }
    }
}
