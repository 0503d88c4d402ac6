mod context;
mod present;
mod seed;
mod surfaces;
mod uniforms;
mod update;

pub use context::GpuContext;
pub use present::PresentPass;
pub use seed::SeedPass;
pub use surfaces::DoubleBuffer;
pub use uniforms::{FrameUniforms, SceneUniforms};
pub use update::UpdatePass;
