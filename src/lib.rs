pub mod application;
pub mod canvas;
pub mod config;
pub mod display;
pub mod gradient;
pub mod logger;
pub mod raytracer;
pub mod renderer;
pub mod scene;
pub mod texture;
pub mod viewport;
