use std::collections::HashSet;

use glam::Vec3;
use tiny_tracer_lib::{
    canvas::{pack_rgba, render, PixelBuffer},
    config::CanvasConfig,
    raytracer::{trace_ray, trace_ray_with, Shading, BACKGROUND_COLOR},
    scene::{Light, Scene, Sphere},
    viewport::canvas_to_viewport,
};

const RED: u32 = 0xff0000ff;
const WHITE: u32 = 0xffffffff;

fn red_sphere_scene() -> Scene {
    Scene::new(
        vec![Sphere::new(Vec3::new(0.0, -1.0, 3.0), 1.0, Vec3::new(1.0, 0.0, 0.0))],
        vec![Light::Ambient { intensity: 1.0 }],
    )
}

#[test]
fn ambient_lit_sphere_front_is_pure_albedo() {
    let scene = red_sphere_scene();
    let config = CanvasConfig::default();

    // The sphere center projects to y = -1/3 of the viewport.
    let direction = canvas_to_viewport(0, -266, config.width, config.height, &config.viewport);
    let color = trace_ray(&scene, config.eye, direction, config.t_min, config.t_max);
    assert_eq!(color, Vec3::new(1.0, 0.0, 0.0));

    let mut buffer = PixelBuffer::new(config.width, config.height);
    render(&scene, &config, Shading::Lit, &mut buffer);
    assert_eq!(buffer.get(400, 399 + 266), RED);
}

#[test]
fn ray_past_every_sphere_sees_background() {
    let scene = red_sphere_scene();
    let config = CanvasConfig::default();

    let direction = canvas_to_viewport(-400, 399, config.width, config.height, &config.viewport);
    let color = trace_ray(&scene, config.eye, direction, config.t_min, config.t_max);
    assert_eq!(color, BACKGROUND_COLOR);

    let mut buffer = PixelBuffer::new(config.width, config.height);
    render(&scene, &config, Shading::Lit, &mut buffer);
    assert_eq!(buffer.get(0, 0), WHITE);
}

#[test]
fn sphere_behind_the_viewport_plane_is_ignored() {
    // Entirely between the eye and t_min.
    let scene = Scene::new(
        vec![Sphere::new(Vec3::new(0.0, 0.0, 0.5), 0.25, Vec3::X)],
        vec![Light::Ambient { intensity: 1.0 }],
    );
    let color = trace_ray(&scene, Vec3::ZERO, Vec3::Z, 1.0, f32::INFINITY);
    assert_eq!(color, BACKGROUND_COLOR);
}

#[test]
fn overlapping_spheres_resolve_to_first_in_scene_order() {
    let center = Vec3::new(0.0, 0.0, 4.0);
    let scene = Scene::new(
        vec![
            Sphere::new(center, 1.0, Vec3::new(0.0, 1.0, 0.0)),
            Sphere::new(center, 1.0, Vec3::new(0.0, 0.0, 1.0)),
        ],
        vec![Light::Ambient { intensity: 1.0 }],
    );
    let color = trace_ray(&scene, Vec3::ZERO, Vec3::Z, 1.0, f32::INFINITY);
    assert_eq!(color, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn overexposed_light_is_clamped() {
    let mut scene = red_sphere_scene();
    scene.spheres[0].albedo = Vec3::new(0.9, 0.3, 0.1);
    scene.spheres[0].specular = 10;
    scene.lights = vec![
        Light::Ambient { intensity: 1.5 },
        Light::Point {
            intensity: 2.0,
            position: Vec3::new(0.0, 2.0, 0.0),
        },
        Light::Directional {
            intensity: 3.0,
            direction: Vec3::new(0.0, 0.0, -1.0),
        },
    ];

    let config = CanvasConfig::default();
    let mut buffer = PixelBuffer::new(config.width, config.height);
    render(&scene, &config, Shading::Lit, &mut buffer);

    let direction = canvas_to_viewport(0, -266, config.width, config.height, &config.viewport);
    let color = trace_ray(&scene, config.eye, direction, config.t_min, config.t_max);
    assert!(color.cmpge(Vec3::ZERO).all() && color.cmple(Vec3::ONE).all());
    // Ambient alone already pushes red past 1.
    assert_eq!(color.x, 1.0);
    assert_eq!(buffer.get(400, 665) >> 24, 0xff);
}

#[test]
fn flat_render_uses_only_albedos_and_background() {
    let scene = Scene::basic();
    let config = CanvasConfig::new(64, 64);
    let mut buffer = PixelBuffer::new(64, 64);
    render(&scene, &config, Shading::Flat, &mut buffer);

    let seen: HashSet<u32> = buffer.as_slice().iter().copied().collect();
    let allowed: HashSet<u32> = scene
        .spheres
        .iter()
        .map(|s| pack_rgba(s.albedo))
        .chain([WHITE])
        .collect();
    assert!(seen.is_subset(&allowed));
    assert!(seen.contains(&RED));
    assert!(seen.contains(&WHITE));
}

#[test]
fn lit_render_keeps_hue_of_red_sphere() {
    let scene = Scene::lit();
    let config = CanvasConfig::default();
    let direction = canvas_to_viewport(0, -266, config.width, config.height, &config.viewport);

    let lit = trace_ray_with(&scene, config.eye, direction, config.t_min, config.t_max, Shading::Lit);
    assert!(lit.x > 0.0);
    assert_eq!((lit.y, lit.z), (0.0, 0.0));

    let flat = trace_ray_with(&scene, config.eye, direction, config.t_min, config.t_max, Shading::Flat);
    assert_eq!(flat, Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn padded_buffer_renders_like_packed_one() {
    let scene = Scene::lit();
    let config = CanvasConfig::new(32, 16);

    let mut packed = PixelBuffer::new(32, 16);
    let mut padded = PixelBuffer::with_pitch(32, 16, 32 * 4 + 64);
    render(&scene, &config, Shading::Lit, &mut packed);
    render(&scene, &config, Shading::Lit, &mut padded);

    assert_eq!(packed.to_rgba_image(), padded.to_rgba_image());
}
