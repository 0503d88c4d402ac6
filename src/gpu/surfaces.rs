use wgpu::{Device, Queue, Sampler, Texture, TextureView};

use crate::config::SURFACE_FORMAT;

/// One generation of the grid: a viewport-sized RGBA8 texture plus the view
/// the passes attach to. Sampling is always nearest-neighbor; any filtering
/// would blend adjacent cell states and corrupt the rule.
pub struct SimulationSurface {
    texture: Texture,
    view: TextureView,
}

impl SimulationSurface {
    fn allocate(device: &Device, label: &str, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SURFACE_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    pub fn view(&self) -> &TextureView {
        &self.view
    }
}

/// Current/next labeling for the two slots. Swapping flips the label only;
/// surface contents never move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Labels {
    front: usize,
}

impl Labels {
    fn new() -> Self {
        Self { front: 0 }
    }

    fn current(self) -> usize {
        self.front
    }

    fn next(self) -> usize {
        1 - self.front
    }

    fn swap(&mut self) {
        self.front = 1 - self.front;
    }
}

/// The ping-pong pair of simulation surfaces. Surfaces are allocated lazily
/// on first use and only reallocated after an explicit `invalidate` (the
/// reset-on-resize policy).
pub struct DoubleBuffer {
    slots: Option<[SimulationSurface; 2]>,
    labels: Labels,
    width: u32,
    height: u32,
    sampler: Sampler,
}

impl DoubleBuffer {
    pub fn new(device: &Device) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("surface-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        Self {
            slots: None,
            labels: Labels::new(),
            width: 0,
            height: 0,
            sampler,
        }
    }

    /// Allocate both surfaces if not already done. Idempotent: existing
    /// handles are reused, so calling this every frame allocates nothing.
    pub fn ensure_initialized(&mut self, device: &Device, width: u32, height: u32) {
        if self.slots.is_some() {
            return;
        }
        log::info!("Allocating {}x{} simulation surfaces", width, height);
        self.slots = Some([
            SimulationSurface::allocate(device, "simulation-surface-a", width, height),
            SimulationSurface::allocate(device, "simulation-surface-b", width, height),
        ]);
        self.labels = Labels::new();
        self.width = width;
        self.height = height;
    }

    /// Drop both surfaces; the next `ensure_initialized` reallocates
    pub fn invalidate(&mut self) {
        self.slots = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.slots.is_some()
    }

    fn slots(&self) -> &[SimulationSurface; 2] {
        self.slots.as_ref().expect("simulation surfaces not initialized")
    }

    /// The surface holding the latest completed generation
    pub fn current(&self) -> &SimulationSurface {
        &self.slots()[self.labels.current()]
    }

    /// The surface the next generation will be written into
    pub fn next(&self) -> &SimulationSurface {
        &self.slots()[self.labels.next()]
    }

    /// Exchange the current/next labels. O(1), no copy; the just-written
    /// "next" becomes "current" and is immediately presentable.
    pub fn swap(&mut self) {
        self.labels.swap();
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Upload CPU-generated RGBA8 pixels into the current surface
    pub fn write_pixels(&self, queue: &Queue, pixels: &[u8]) {
        assert_eq!(pixels.len() as u32, self.width * self.height * 4);
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.slots()[self.labels.current()].texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.width * 4),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_start_distinct() {
        let labels = Labels::new();
        assert_ne!(labels.current(), labels.next());
    }

    #[test]
    fn test_swap_exchanges_labels() {
        let mut labels = Labels::new();
        let (current, next) = (labels.current(), labels.next());
        labels.swap();
        assert_eq!(labels.current(), next);
        assert_eq!(labels.next(), current);
    }

    #[test]
    fn test_swap_is_involutive() {
        let mut labels = Labels::new();
        let original = labels;
        labels.swap();
        assert_ne!(labels, original);
        labels.swap();
        assert_eq!(labels, original);
    }

    #[test]
    fn test_labels_never_alias() {
        let mut labels = Labels::new();
        for _ in 0..7 {
            labels.swap();
            assert_ne!(labels.current(), labels.next());
            assert!(labels.current() < 2 && labels.next() < 2);
        }
    }
}
