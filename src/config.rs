/// The automaton advances one generation every Nth display frame;
/// presentation happens every frame.
pub const UPDATE_PERIOD: u32 = 5;

/// Background the simulation surfaces are cleared to. Luminance 0.3 reads
/// as "dead" to both rule modes.
pub const SURFACE_CLEAR: wgpu::Color = wgpu::Color {
    r: 0.3,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

/// Screen clear color behind the display geometry
pub const SCREEN_CLEAR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};

/// Depth buffer format for the display pass
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Simulation surface texel format. Must stay a byte-normalized color
/// format; the rule thresholds assume channel values in [0, 1].
pub const SURFACE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

// ============================================
// Camera
// ============================================

/// Initial camera distance from the origin
pub const DEFAULT_CAMERA_DISTANCE: f32 = 5.0;

/// Orbit step in radians per key press
pub const CAMERA_ORBIT_SPEED: f32 = 0.08;

/// Multiplicative zoom step per key press
pub const CAMERA_ZOOM_SPEED: f32 = 1.1;

/// Vertical field of view in radians
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

// ============================================
// Display geometry
// ============================================

/// Icosphere subdivision level for the sphere display mesh
pub const ICOSPHERE_SUBDIVISIONS: u32 = 4;

/// Tint colors cycled by the control surface, RGBA in [0, 1]
pub const TINT_TABLE: [[f32; 4]; 4] = [
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 0.55, 0.25, 1.0],
    [0.35, 0.75, 1.0, 1.0],
    [0.55, 1.0, 0.55, 1.0],
];

// ============================================
// Seeding
// ============================================

/// Fraction of texels set live by the noise seed
pub const NOISE_SEED_DENSITY: f64 = 0.18;
