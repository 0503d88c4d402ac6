use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use glam::Mat4;

use crate::camera::Camera;
use crate::config::{
    CAMERA_ORBIT_SPEED, CAMERA_ZOOM_SPEED, ICOSPHERE_SUBDIVISIONS, NOISE_SEED_DENSITY,
    TINT_TABLE, UPDATE_PERIOD,
};
use crate::geometry::{cube, icosphere, square, GpuMesh};
use crate::gpu::{
    DoubleBuffer, FrameUniforms, GpuContext, PresentPass, SceneUniforms, SeedPass, UpdatePass,
};
use crate::scheduler::{FramePhase, SimulationScheduler};
use crate::sim::{pattern, RuleParameters};

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    buffers: Option<DoubleBuffer>,
    uniforms: Option<FrameUniforms>,
    update_pass: Option<UpdatePass>,
    present_pass: Option<PresentPass>,
    seed_pass: Option<SeedPass>,
    meshes: Vec<GpuMesh>,
    active_mesh: usize,
    camera: Camera,
    scheduler: SimulationScheduler,
    params: RuleParameters,
    tint_index: usize,
    fps_counter: FpsCounter,
}

const MESH_NAMES: [&str; 3] = ["cube", "icosphere", "square"];

impl App {
    pub fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            buffers: None,
            uniforms: None,
            update_pass: None,
            present_pass: None,
            seed_pass: None,
            meshes: Vec::new(),
            active_mesh: 0,
            camera: Camera::default(),
            scheduler: SimulationScheduler::new(UPDATE_PERIOD),
            params: RuleParameters::default(),
            tint_index: 0,
            fps_counter: FpsCounter::new(),
        }
    }

    fn render(&mut self) {
        let gpu = self.gpu.as_ref().unwrap();
        let buffers = self.buffers.as_mut().unwrap();
        let uniforms = self.uniforms.as_ref().unwrap();
        let update_pass = self.update_pass.as_ref().unwrap();
        let present_pass = self.present_pass.as_ref().unwrap();
        let seed_pass = self.seed_pass.as_ref().unwrap();
        let mesh = &self.meshes[self.active_mesh];

        // Get surface texture before consuming a scheduler phase, so a lost
        // swapchain frame does not skip a generation
        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        buffers.ensure_initialized(&gpu.device, gpu.config.width, gpu.config.height);

        let phase = self.scheduler.advance();

        let scene = SceneUniforms::new(
            Mat4::IDENTITY,
            self.camera.view_proj(),
            TINT_TABLE[self.tint_index],
            self.scheduler.tick() as f32,
        );
        uniforms.write_scene(&gpu.queue, &scene);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        match phase {
            FramePhase::SeedThenPresent => {
                seed_pass.encode(&mut encoder, &gpu.device, buffers, uniforms, mesh);
            }
            FramePhase::UpdateThenPresent => {
                // Snapshot the (UI-mutable) parameters for this generation
                uniforms.write_rule(&gpu.queue, &self.params);
                update_pass.encode(&mut encoder, &gpu.device, buffers, uniforms, mesh);
                buffers.swap();
            }
            FramePhase::PresentOnly => {}
        }

        // Presentation always reads the post-swap current surface
        present_pass.encode(
            &mut encoder,
            &gpu.device,
            &view,
            gpu.depth_view(),
            uniforms,
            buffers.current().view(),
            buffers.sampler(),
            mesh,
        );

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                let mode = if self.params.conway { "life" } else { "smooth" };
                window.set_title(&format!(
                    "smoothcell - {:.0} FPS - {} on {}",
                    fps, mode, MESH_NAMES[self.active_mesh]
                ));
            }
        }
    }

    fn apply_preset(&mut self, name: &str, preset: RuleParameters) {
        self.params = preset;
        log::info!("Preset: {}", name);
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            // Rule presets
            KeyCode::Digit1 => self.apply_preset("scanlines", RuleParameters::scanlines()),
            KeyCode::Digit2 => self.apply_preset("smoky grid", RuleParameters::smoky_grid()),
            KeyCode::Digit3 => self.apply_preset("game of life", RuleParameters::game_of_life()),
            KeyCode::Digit4 => {
                self.apply_preset("game of life (fine)", RuleParameters::game_of_life_fine())
            }
            KeyCode::Digit5 => self.apply_preset("foam", RuleParameters::foam()),
            KeyCode::Digit6 => self.apply_preset("maze", RuleParameters::maze()),
            KeyCode::Digit7 => self.apply_preset("smokestack", RuleParameters::smokestack()),

            // Individual rule nudges
            KeyCode::KeyC => {
                self.params.conway = !self.params.conway;
                log::info!("Conway thresholding: {}", self.params.conway);
            }
            KeyCode::KeyG => {
                self.params.range_radius = 3 - self.params.range_radius;
                log::info!("Range radius: {}", self.params.range_radius);
            }
            KeyCode::KeyH => {
                self.params.half_nearest = 3 - self.params.half_nearest;
                log::info!("Half nearest: {}", self.params.half_nearest);
            }
            KeyCode::BracketLeft => {
                self.params.increment = (self.params.increment - 0.05).max(0.0);
                log::info!("Increment: {:.2}", self.params.increment);
            }
            KeyCode::BracketRight => {
                self.params.increment = (self.params.increment + 0.05).min(1.0);
                log::info!("Increment: {:.2}", self.params.increment);
            }
            KeyCode::Comma => {
                self.params.neighbor_min -= 0.5;
                log::info!("Neighbor min: {:.1}", self.params.neighbor_min);
            }
            KeyCode::Period => {
                self.params.neighbor_min += 0.5;
                log::info!("Neighbor min: {:.1}", self.params.neighbor_min);
            }
            KeyCode::KeyK => {
                self.params.neighbor_max -= 0.5;
                log::info!("Neighbor max: {:.1}", self.params.neighbor_max);
            }
            KeyCode::KeyL => {
                self.params.neighbor_max += 0.5;
                log::info!("Neighbor max: {:.1}", self.params.neighbor_max);
            }

            // Seeding
            KeyCode::KeyR => {
                self.scheduler.request_seed();
                log::info!("Automata reset requested");
            }
            KeyCode::KeyN => {
                if let (Some(gpu), Some(buffers)) = (&self.gpu, &self.buffers) {
                    if buffers.is_initialized() {
                        let (width, height) = buffers.size();
                        let pixels = pattern::noise_pixels(
                            width,
                            height,
                            NOISE_SEED_DENSITY,
                            &mut rand::thread_rng(),
                        );
                        buffers.write_pixels(&gpu.queue, &pixels);
                        log::info!("Noise-seeded current surface");
                    }
                }
            }

            // Display
            KeyCode::KeyM => {
                self.active_mesh = (self.active_mesh + 1) % self.meshes.len().max(1);
                log::info!("Display mesh: {}", MESH_NAMES[self.active_mesh]);
            }
            KeyCode::KeyX => {
                self.tint_index = (self.tint_index + 1) % TINT_TABLE.len();
            }

            // Camera (WASD orbit, Q/E zoom)
            KeyCode::KeyW | KeyCode::ArrowUp => self.camera.orbit(0.0, CAMERA_ORBIT_SPEED),
            KeyCode::KeyS | KeyCode::ArrowDown => self.camera.orbit(0.0, -CAMERA_ORBIT_SPEED),
            KeyCode::KeyA | KeyCode::ArrowLeft => self.camera.orbit(-CAMERA_ORBIT_SPEED, 0.0),
            KeyCode::KeyD | KeyCode::ArrowRight => self.camera.orbit(CAMERA_ORBIT_SPEED, 0.0),
            KeyCode::KeyQ | KeyCode::Minus => self.camera.zoom(CAMERA_ZOOM_SPEED),
            KeyCode::KeyE | KeyCode::Equal => self.camera.zoom(1.0 / CAMERA_ZOOM_SPEED),

            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing smoothcell...");

        let window_attrs = Window::default_attributes()
            .with_title("smoothcell")
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 1024));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()));

        log::info!("Uploading display meshes...");
        self.meshes = vec![
            GpuMesh::upload(&gpu.device, "cube", &cube()),
            GpuMesh::upload(&gpu.device, "icosphere", &icosphere(ICOSPHERE_SUBDIVISIONS)),
            GpuMesh::upload(&gpu.device, "square", &square()),
        ];

        log::info!("Creating pipelines...");
        let buffers = DoubleBuffer::new(&gpu.device);
        let uniforms = FrameUniforms::new(&gpu.device);
        let update_pass = UpdatePass::new(&gpu.device);
        let present_pass = PresentPass::new(&gpu.device, gpu.format());
        let seed_pass = SeedPass::new(&gpu.device);

        self.camera.set_aspect(gpu.config.width, gpu.config.height);

        log::info!("Initialization complete");
        log::info!("Controls:");
        log::info!("  1-7: Rule presets");
        log::info!("  C: Toggle conway thresholding, G: range radius, H: half nearest");
        log::info!("  [/]: Increment, ,/.: neighbor min, K/L: neighbor max");
        log::info!("  R: Reset automata, N: noise seed");
        log::info!("  M: Cycle display mesh, X: cycle tint");
        log::info!("  WASD/Arrows: Orbit, Q/E: zoom");
        log::info!("  Escape: Quit");

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.buffers = Some(buffers);
        self.uniforms = Some(uniforms);
        self.update_pass = Some(update_pass);
        self.present_pass = Some(present_pass);
        self.seed_pass = Some(seed_pass);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                    self.camera.set_aspect(new_size.width, new_size.height);
                    // Reset-on-resize: surfaces are reallocated at the new
                    // dimensions and the automaton restarts from the seed
                    if let Some(buffers) = &mut self.buffers {
                        buffers.invalidate();
                        self.scheduler.request_seed();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if self.gpu.is_some() {
                    self.render();
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
