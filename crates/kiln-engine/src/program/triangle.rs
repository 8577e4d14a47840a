//! The fixed triangle drawn by the example programs.

use super::{AttributeSpec, ProgramDesc};

/// Three 2D positions in clip space.
pub const VERTICES: [f32; 6] = [0.0, 0.5, 0.5, -0.5, -0.5, -0.5];

pub const VERTEX_COUNT: u32 = 3;

pub const VERTEX_SHADER: &str = r#"
@vertex
fn vs_main(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 0.0, 1.0);
}
"#;

pub const FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;

pub fn program_desc() -> ProgramDesc<'static> {
    ProgramDesc {
        label: "triangle",
        vertex_source: VERTEX_SHADER,
        vertex_entry: "vs_main",
        fragment_source: FRAGMENT_SHADER,
        fragment_entry: "fs_main",
        attribute: AttributeSpec::float("position", 2),
        vertices: &VERTICES,
        topology: wgpu::PrimitiveTopology::TriangleList,
    }
}
