//! Shows a [`PixelBuffer`] in a window.
//!
//! F5 repaints the canvas, F12 writes it to the configured snapshot path.

use std::{convert::Infallible, time::Instant};

use wgpu::{CommandEncoderDescriptor, RenderPassColorAttachment, RenderPassDescriptor, TextureViewDescriptor};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
};

use crate::{
    application::{AppState, Layer, Screen},
    canvas::{render, PixelBuffer},
    config::CanvasConfig,
    gradient::fill_gradient,
    raytracer::Shading,
    renderer::{IndexBuffer, QuadPipeline, VertexBuffer, QUAD_INDICES, QUAD_VERTICES},
    scene::Scene,
    texture::{canvas_format, Texture},
};

/// Something that can fill a whole canvas.
pub trait Painter: 'static {
    fn paint(&self, canvas: &CanvasConfig, buffer: &mut PixelBuffer);
}

pub struct Gradient;

impl Painter for Gradient {
    fn paint(&self, _canvas: &CanvasConfig, buffer: &mut PixelBuffer) {
        fill_gradient(buffer);
    }
}

pub struct RayTracer {
    pub scene: Scene,
    pub shading: Shading,
}

impl Painter for RayTracer {
    fn paint(&self, canvas: &CanvasConfig, buffer: &mut PixelBuffer) {
        render(&self.scene, canvas, self.shading, buffer);
    }
}

pub struct CanvasSetup<P> {
    pub painter: P,
    pub canvas: CanvasConfig,
}

pub struct CanvasLayer<P: Painter> {
    painter: P,
    canvas: CanvasConfig,
    buffer: PixelBuffer,
    dirty: bool,
    texture: Texture,
    texture_bind_group: wgpu::BindGroup,
    pipeline: QuadPipeline,
    vertex_buffer: VertexBuffer,
    index_buffer: IndexBuffer,
}

impl<P: Painter> CanvasLayer<P> {
    fn repaint(&mut self) {
        paint_timed(&self.painter, &self.canvas, &mut self.buffer);
        self.dirty = true;
    }

    fn save_snapshot(&self) {
        if let Err(e) = self.buffer.save_png(&self.canvas.snapshot_path) {
            tracing::error!(
                "failed to save snapshot to {}: {e}",
                self.canvas.snapshot_path.display()
            );
        }
    }
}

fn paint_timed<P: Painter>(painter: &P, canvas: &CanvasConfig, buffer: &mut PixelBuffer) {
    let start = Instant::now();
    painter.paint(canvas, buffer);
    tracing::info!(
        "painted {}x{} canvas in {:.1?}",
        canvas.width,
        canvas.height,
        start.elapsed()
    );
}

impl<P: Painter> Layer for CanvasLayer<P> {
    type Config = CanvasSetup<P>;
    type LayerErr = Infallible;

    fn start(screen: &mut Screen, _app: &AppState, config: Self::Config) -> Self {
        let CanvasSetup { painter, canvas } = config;

        let mut buffer = PixelBuffer::new(canvas.width, canvas.height);
        paint_timed(&painter, &canvas, &mut buffer);

        let texture = Texture::from_image(
            &screen.device,
            &screen.queue,
            &buffer.to_rgba_image(),
            canvas_format(screen.config.format),
            Some("Canvas texture"),
        );
        let pipeline = QuadPipeline::new(&screen.device, screen.config.format);

        let texture_bind_group = screen.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pipeline.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
            label: Some("canvas_bind_group"),
        });

        let vertex_buffer = VertexBuffer::init_immediate(
            &screen.device,
            bytemuck::cast_slice(QUAD_VERTICES),
            Some("Vertex Buffer"),
        );
        let index_buffer =
            IndexBuffer::init_immediate_u16(&screen.device, QUAD_INDICES, Some("Index Buffer"));

        Self {
            painter,
            canvas,
            buffer,
            dirty: false,
            texture,
            texture_bind_group,
            pipeline,
            vertex_buffer,
            index_buffer,
        }
    }

    fn process_event(&mut self, event: &Event<()>, _screen: &mut Screen) {
        if let Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(keycode),
                            ..
                        },
                    ..
                },
            ..
        } = event
        {
            match keycode {
                VirtualKeyCode::F5 => self.repaint(),
                VirtualKeyCode::F12 => self.save_snapshot(),
                _ => {}
            }
        }
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>, _app: &AppState, _screen: &mut Screen) {
        tracing::debug!("surface resized to {}x{}", new_size.width, new_size.height);
    }

    fn update(&mut self, _app: &AppState, screen: &mut Screen) {
        if self.dirty {
            self.texture
                .update_data(&screen.queue, &self.buffer.to_rgba_image());
            self.dirty = false;
        }
    }

    fn render(&mut self, _app: &AppState, screen: &mut Screen) -> Result<(), wgpu::SurfaceError> {
        let output = screen.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&TextureViewDescriptor::default());
        let mut encoder = screen
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });

            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(0, &self.texture_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.buffer().slice(..));
            render_pass.set_index_buffer(
                self.index_buffer.buffer().slice(..),
                self.index_buffer.format(),
            );
            render_pass.draw_indexed(0..self.index_buffer.count(), 0, 0..1);
        }

        screen.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn shutdown(&mut self, app: &AppState, _screen: &mut Screen) -> Result<(), Self::LayerErr> {
        tracing::info!("exiting after {} frames", app.frame());
        Ok(())
    }
}
