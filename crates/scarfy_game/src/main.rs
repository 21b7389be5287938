//! Scarfy Running -- main loop and application entry point.
//!
//! Architecture: winit drives the event loop via `ApplicationHandler`. Each
//! `RedrawRequested` runs exactly one variable-step update:
//!
//!   1. `begin_frame()` -- measure the wall-clock delta since the last redraw
//!   2. `World::update()` -- physics, scrolling, animation, collision, outcome
//!   3. `compose_frame()` -- back-to-front quads plus an optional banner
//!   4. Upload the mesh, draw quads batched by texture, composite the egui HUD
//!
//! Redraws are scheduled with `ControlFlow::WaitUntil` at the target frame rate.
//! The simulated delta is never clamped or fixed.

mod assets;
mod collision;
mod config;
mod parallax;
mod player;
#[cfg(test)]
mod replay;
mod scene;
mod world;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use assets::{verify_assets_present, SheetDims, TextureSlot};
use config::GameConfig;
use player::PlayerInput;
use scarfy_core::input::{InputState, Key};
use scarfy_core::time::TimeState;
use scarfy_hud::{Banner, HudOverlay, OverlayStats};
use scarfy_platform::window::PlatformConfig;
use scarfy_render::{
    quad_indices, Camera2D, GpuContext, SpritePipeline, SpriteVertex, Texture,
};
use scene::{compose_frame, FrameDraw};
use world::World;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// A contiguous run of indices that share the same texture binding.
/// Consecutive quads using the same texture are merged into one call.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawCall {
    texture: TextureSlot,
    index_start: u32,
    index_count: u32,
}

struct GpuSpriteTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// All mutable engine state lives here. Constructed in
/// `ApplicationHandler::resumed` once the window and GPU surface exist, and
/// dropped on exit, which releases every texture exactly once.
struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    time: TimeState,
    input: InputState,
    camera: Camera2D,
    sprite_pipeline: SpritePipeline,
    hud: HudOverlay,

    config: GameConfig,
    dims: SheetDims,
    world: World,
    textures: HashMap<TextureSlot, GpuSpriteTexture>,

    // The sprite mesh is rebuilt on the CPU each frame, then streamed into these
    // GPU buffers. Buffers grow (power-of-two) but never shrink.
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    draw_calls: Vec<DrawCall>,
    sprite_count: usize,
    banner: Option<Banner>,
}

impl EngineState {
    fn new(window: Arc<Window>, config: GameConfig) -> Result<Self, String> {
        verify_assets_present(Path::new("."))?;

        let gpu = GpuContext::new(window.clone())?;
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let hud = HudOverlay::new(&gpu.device, gpu.surface_format, &window);

        let mut dims = SheetDims::default();
        let mut textures = HashMap::new();
        for slot in TextureSlot::ALL {
            let texture = load_texture_asset(&gpu.device, &gpu.queue, &sprite_pipeline, slot)?;
            let (w, h) = texture.texture.size;
            dims.set(slot, Vec2::new(w as f32, h as f32));
            textures.insert(slot, texture);
        }

        let world = World::new(&config, &dims);
        log::info!(
            "World ready: player at ({:.0}, {:.0}), finish line at x={:.0}",
            world.player.sprite.position.x,
            world.player.sprite.position.y,
            world.finish_line
        );

        let (view_w, view_h) = config.window_size();
        let camera = Camera2D::new(view_w, view_h);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        Ok(Self {
            window,
            gpu,
            time: TimeState::new(config.target_fps),
            input: InputState::new(),
            camera,
            sprite_pipeline,
            hud,
            config,
            dims,
            world,
            textures,
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            draw_calls: Vec::new(),
            sprite_count: 0,
            banner: None,
        })
    }

    /// Advance the world by one measured frame and rebuild the sprite mesh.
    fn update(&mut self) {
        let dt = self.time.begin_frame();
        let input = PlayerInput {
            jump_pressed: self.input.is_just_pressed(Key::Space),
        };
        self.world.update(input, dt, &self.config);

        let frame = compose_frame(&self.world, &self.config, &self.dims);
        let (vertices, indices, draw_calls) = build_mesh(&frame);
        self.ensure_mesh_capacity(vertices.len(), indices.len());
        if !vertices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&indices));
        }
        self.sprite_count = frame.quads.len();
        self.draw_calls = draw_calls;
        self.banner = frame.banner;
    }

    fn overlay_stats(&self) -> OverlayStats {
        let player = &self.world.player;
        OverlayStats {
            draw_calls: self.draw_calls.len() as u32,
            sprite_count: self.sprite_count as u32,
            outcome_label: self.world.outcome().label().to_string(),
            player_y: player.sprite.position.y,
            player_velocity: player.velocity,
            airborne: player.airborne,
            finish_distance: self.world.finish_line - player.sprite.position.x,
        }
    }

    fn render(&mut self) {
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.build_uniform()]),
        );

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let stats = self.overlay_stats();
        let (egui_primitives, egui_textures_delta) =
            self.hud
                .prepare(&self.window, &self.time, self.banner.as_ref(), &stats);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut last_bound: Option<TextureSlot> = None;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            for draw in &self.draw_calls {
                let Some(texture) = self.textures.get(&draw.texture) else {
                    continue;
                };
                if last_bound != Some(draw.texture) {
                    render_pass.set_bind_group(1, &texture.bind_group, &[]);
                    last_bound = Some(draw.texture);
                }
                render_pass.draw_indexed(
                    draw.index_start..(draw.index_start + draw.index_count),
                    0,
                    0..1,
                );
            }
        }

        self.hud.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.hud
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.hud.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }
}

impl Drop for EngineState {
    fn drop(&mut self) {
        log::info!("Releasing {} textures", self.textures.len());
    }
}

struct App {
    platform: PlatformConfig,
    config: GameConfig,
    state: Option<EngineState>,
}

impl App {
    fn new() -> Self {
        let config = GameConfig::default();
        let (width, height) = config.window_size();
        Self {
            platform: PlatformConfig {
                width,
                height,
                ..PlatformConfig::default()
            },
            config,
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let started = scarfy_platform::window::create_window(event_loop, &self.platform)
            .and_then(|window| {
                log::info!(
                    "Window created: {}x{}",
                    self.platform.width,
                    self.platform.height
                );
                EngineState::new(window, self.config)
            });
        match started {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("Startup failed: {err}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &self.state else {
            return;
        };
        let deadline = state.time.next_frame_deadline();
        if Instant::now() >= deadline {
            state.window.request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let egui_consumed = state.hud.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(key),
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }
                if state.input.is_just_pressed(Key::Escape) {
                    log::info!("Escape pressed, exiting.");
                    event_loop.exit();
                    return;
                }
                if state.input.is_just_pressed(Key::F3) {
                    state.hud.toggle_debug();
                }

                state.update();
                state.render();
                state.input.end_frame();
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.take() {
            log::info!(
                "Exiting after {} frames ({:.1}s), outcome: {}",
                state.time.frame_count,
                state.time.total_time,
                state.world.outcome()
            );
        }
    }
}

/// Flatten a composed frame into one vertex/index stream plus batched draw calls.
fn build_mesh(frame: &FrameDraw) -> (Vec<SpriteVertex>, Vec<u32>, Vec<DrawCall>) {
    let mut vertices = Vec::with_capacity(frame.quads.len() * 4);
    let mut indices = Vec::with_capacity(frame.quads.len() * 6);
    let mut draw_calls = Vec::new();

    for quad in &frame.quads {
        let base = vertices.len() as u32;
        vertices.extend_from_slice(&SpriteVertex::quad(quad.dest_array(), quad.uv, WHITE));
        let draw_start = indices.len() as u32;
        indices.extend_from_slice(&quad_indices(base));
        push_draw_call(&mut draw_calls, quad.texture, draw_start, 6);
    }

    (vertices, indices, draw_calls)
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Append a draw call, merging with the previous one when the texture matches
/// and indices are contiguous. Quads arrive back to front, so each parallax
/// pair and the enemy row collapse into single `draw_indexed` calls.
fn push_draw_call(
    draw_calls: &mut Vec<DrawCall>,
    texture: TextureSlot,
    index_start: u32,
    index_count: u32,
) {
    if let Some(last) = draw_calls.last_mut() {
        let contiguous = last.index_start + last.index_count == index_start;
        if last.texture == texture && contiguous {
            last.index_count += index_count;
            return;
        }
    }
    draw_calls.push(DrawCall {
        texture,
        index_start,
        index_count,
    });
}

fn load_texture_asset(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &SpritePipeline,
    slot: TextureSlot,
) -> Result<GpuSpriteTexture, String> {
    let path = slot.path();
    let bytes =
        std::fs::read(path).map_err(|e| format!("Failed to read texture '{path}': {e}"))?;
    let texture = Texture::from_bytes(device, queue, &bytes, path)?;
    log::info!(
        "Loaded {} texture '{}' ({}x{})",
        slot,
        path,
        texture.size.0,
        texture.size.1
    );
    let bind_group = pipeline.create_texture_bind_group(device, &texture);
    Ok(GpuSpriteTexture {
        texture,
        bind_group,
    })
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::Space => Some(Key::Space),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Scarfy Running starting...");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {err}");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {err}");
        std::process::exit(1);
    }
}
