use glam::Mat4;
use wgpu::{Buffer, BufferUsages, Device, Queue};

use crate::sim::RuleParameters;

/// Per-frame scene parameters shared by all three passes (224 bytes,
/// 16-byte aligned to match the WGSL struct)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix, for normal transformation
    pub model_inv_transpose: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    /// Display tint, RGBA in [0, 1]
    pub color: [f32; 4],
    /// Tick counter, the display shader's time parameter
    pub time: f32,
    /// Pads the trailing f32 out to the WGSL struct's 16-byte stride
    pub _padding: [f32; 3],
}

impl SceneUniforms {
    pub fn new(model: Mat4, view_proj: Mat4, color: [f32; 4], time: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            model_inv_transpose: model.inverse().transpose().to_cols_array_2d(),
            view_proj: view_proj.to_cols_array_2d(),
            color,
            time,
            _padding: [0.0; 3],
        }
    }
}

/// Rule parameters as the update shader sees them (32 bytes). All scalars
/// are uploaded as f32 except the conway switch, mirroring the original
/// uniform interface.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RuleUniforms {
    pub grid_size: f32,
    pub offset_size: f32,
    pub range_radius: f32,
    pub increment: f32,
    pub neighbor_max: f32,
    pub neighbor_min: f32,
    pub half_nearest: f32,
    pub conway: u32,
}

impl From<&RuleParameters> for RuleUniforms {
    fn from(params: &RuleParameters) -> Self {
        Self {
            grid_size: params.grid_size,
            offset_size: params.offset_size,
            range_radius: params.range_radius as f32,
            increment: params.increment,
            neighbor_max: params.neighbor_max,
            neighbor_min: params.neighbor_min,
            half_nearest: params.half_nearest as f32,
            conway: params.conway as u32,
        }
    }
}

/// Owns the two uniform buffers the passes bind. Scene uniforms are written
/// every frame; rule uniforms only at the start of an update frame, which is
/// what makes the parameter snapshot atomic from the shader's point of view.
pub struct FrameUniforms {
    pub scene_buffer: Buffer,
    pub rule_buffer: Buffer,
}

impl FrameUniforms {
    pub fn new(device: &Device) -> Self {
        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene-uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let rule_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("rule-uniforms"),
            size: std::mem::size_of::<RuleUniforms>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            scene_buffer,
            rule_buffer,
        }
    }

    pub fn write_scene(&self, queue: &Queue, scene: &SceneUniforms) {
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(scene));
    }

    /// Snapshot the rule parameters for this generation
    pub fn write_rule(&self, queue: &Queue, params: &RuleParameters) {
        let uniforms = RuleUniforms::from(params);
        queue.write_buffer(&self.rule_buffer, 0, bytemuck::bytes_of(&uniforms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_uniforms_size() {
        // Three mat4x4 + vec4 + f32 padded to 16
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 224);
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
    }

    #[test]
    fn test_rule_uniforms_size() {
        assert_eq!(std::mem::size_of::<RuleUniforms>(), 32);
    }

    #[test]
    fn test_conway_flag_mapping() {
        let mut params = RuleParameters::game_of_life();
        assert_eq!(RuleUniforms::from(&params).conway, 1);
        params.conway = false;
        assert_eq!(RuleUniforms::from(&params).conway, 0);
    }

    #[test]
    fn test_identity_model_has_identity_inverse_transpose() {
        let scene = SceneUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, [1.0; 4], 0.0);
        assert_eq!(scene.model, scene.model_inv_transpose);
    }

    #[test]
    fn test_rule_snapshot_carries_all_fields() {
        let params = RuleParameters::foam();
        let uniforms = RuleUniforms::from(&params);
        assert_eq!(uniforms.grid_size, 354.0);
        assert_eq!(uniforms.offset_size, 354.0);
        assert_eq!(uniforms.range_radius, 2.0);
        assert_eq!(uniforms.half_nearest, 2.0);
        assert_eq!(uniforms.neighbor_min, 6.5);
        assert_eq!(uniforms.neighbor_max, 12.0);
    }
}
