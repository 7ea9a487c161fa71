use crate::app::App;
use crate::config::Config;
use crate::lif::LifPattern;
use crate::render;
use crate::ui::{self, Panel};
use anyhow::Context as _;
use std::sync::Arc;
use std::time::Instant;
use winit::{dpi::PhysicalSize, window::Window};

// GUI Imports
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui_winit::State as EguiWinitState;

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub window: Arc<Window>,

    pub app: App,

    // GUI state
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
    pub panel: Panel,
}

impl State {
    pub async fn new(window: Arc<Window>, seed: LifPattern, config: &Config) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .context("failed to find an appropriate adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("failed to create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no texture formats")?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state = EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), &window, None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, surface_config.format, None, 1);
        log::info!("egui initialized.");

        let app = App::new(seed, config, logical_size(size, window.scale_factor()), Instant::now());
        let panel = Panel::new(*app.model.interval_ms.get());

        log::info!("wgpu initialized successfully.");

        Ok(Self {
            surface,
            device,
            queue,
            config: surface_config,
            size,
            window,
            app,
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            panel,
        })
    }

    /// Reconfigures the surface. The simulation is left alone.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.app.resize(logical_size(new_size, self.window.scale_factor()));
        }
    }

    /// Draws the displayed generation with the control panel on top.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, recreating...");
                self.resize(self.size);
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };
        let output_view = output_frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        // --- Egui Frame ---
        let raw_input = self.egui_winit_state.take_egui_input(&self.window);
        self.egui_ctx.begin_frame(raw_input);

        render::paint(
            &self.egui_ctx.layer_painter(egui::LayerId::background()),
            self.app.simulation.grid(),
            &self.app.view,
        );
        let actions = ui::show(&self.egui_ctx, &self.app, &mut self.panel);

        let full_output = self.egui_ctx.end_frame();
        self.egui_winit_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let now = Instant::now();
        for action in actions {
            self.app.apply(action, now);
        }

        let paint_jobs = self.egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        // Upload egui data to GPU
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui Encoder"),
        });
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let upload_buffers = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue
            .submit(upload_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        output_frame.present();
        Ok(())
    }
}

fn logical_size(size: PhysicalSize<u32>, scale_factor: f64) -> [f32; 2] {
    let logical = size.to_logical::<f32>(scale_factor);
    [logical.width, logical.height]
}
