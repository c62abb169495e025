use std::{env, path::PathBuf};

use glam::Vec3;
use thiserror::Error;

use crate::viewport::Viewport;

pub const RAYTRACER_WIDTH: u32 = 800;
pub const RAYTRACER_HEIGHT: u32 = 800;
pub const GRADIENT_WIDTH: u32 = 800;
pub const GRADIENT_HEIGHT: u32 = 600;

/// Nearest accepted intersection; anything between the eye and the
/// viewport plane is ignored.
pub const T_MIN: f32 = 1.0;
pub const T_MAX: f32 = f32::INFINITY;

pub const DEFAULT_SNAPSHOT_PATH: &str = "render.png";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be an integer, got {value:?}")]
    NotANumber { name: &'static str, value: String },
    #[error("{name} must be a positive even number, got {value}")]
    InvalidDimension { name: &'static str, value: u32 },
}

/// Everything needed to turn a scene into a full canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Ray origin for every pixel.
    pub eye: Vec3,
    pub viewport: Viewport,
    pub t_min: f32,
    pub t_max: f32,
    pub snapshot_path: PathBuf,
}

impl CanvasConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            eye: Vec3::ZERO,
            viewport: Viewport::default(),
            t_min: T_MIN,
            t_max: T_MAX,
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }

    /// Start from `defaults` and apply `CANVAS_WIDTH`, `CANVAS_HEIGHT` and
    /// `SNAPSHOT_PATH` when they are set.
    pub fn from_env(defaults: Self) -> Result<Self, ConfigError> {
        Self::from_lookup(defaults, |key| env::var(key).ok())
    }

    fn from_lookup(
        mut config: Self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup("CANVAS_WIDTH") {
            config.width = parse_dimension("CANVAS_WIDTH", &value)?;
        }
        if let Some(value) = lookup("CANVAS_HEIGHT") {
            config.height = parse_dimension("CANVAS_HEIGHT", &value)?;
        }
        if let Some(value) = lookup("SNAPSHOT_PATH") {
            config.snapshot_path = PathBuf::from(value);
        }
        Ok(config)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new(RAYTRACER_WIDTH, RAYTRACER_HEIGHT)
    }
}

fn parse_dimension(name: &'static str, value: &str) -> Result<u32, ConfigError> {
    let parsed: u32 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::NotANumber {
            name,
            value: value.to_owned(),
        })?;
    if parsed == 0 || parsed % 2 != 0 {
        return Err(ConfigError::InvalidDimension {
            name,
            value: parsed,
        });
    }
    Ok(parsed)
}
