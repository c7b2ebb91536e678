//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// sRGB hex channel triple to a linear color (the surface is sRGB)
pub fn srgb(r: u8, g: u8, b: u8, alpha: f32) -> [f32; 4] {
    let lin = |c: u8| (c as f32 / 255.0).powf(2.2);
    [lin(r), lin(g), lin(b), alpha]
}

/// Same color with a different alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub water_top: [f32; 4],
    pub water_mid: [f32; 4],
    pub water_bottom: [f32; 4],
    pub light_ray: [f32; 4],
    pub coral_top: [f32; 4],
    pub coral_top_light: [f32; 4],
    pub coral_bottom: [f32; 4],
    pub coral_bottom_light: [f32; 4],
    pub crab_shell: [f32; 4],
    pub crab_shell_mid: [f32; 4],
    pub crab_shell_light: [f32; 4],
    pub crab_eye: [f32; 4],
    pub crab_pupil: [f32; 4],
    pub sand_top: [f32; 4],
    pub sand_bottom: [f32; 4],
    pub seaweed: [f32; 4],
    pub rock: [f32; 4],
    pub bubble: [f32; 4],
}

impl Palette {
    /// Default deep-sea look
    pub fn ocean() -> Self {
        Self {
            water_top: srgb(0x04, 0x1C, 0x32, 1.0),
            water_mid: srgb(0x06, 0x46, 0x63, 1.0),
            water_bottom: srgb(0x04, 0x29, 0x3A, 1.0),
            light_ray: srgb(0x67, 0xE8, 0xF9, 0.06),
            coral_top: srgb(0xE9, 0x1E, 0x63, 1.0),
            coral_top_light: srgb(0xFF, 0x40, 0x81, 1.0),
            coral_bottom: srgb(0x9C, 0x27, 0xB0, 1.0),
            coral_bottom_light: srgb(0xBA, 0x68, 0xC8, 1.0),
            crab_shell: srgb(0xFF, 0x6B, 0x4A, 1.0),
            crab_shell_mid: srgb(0xFF, 0x8A, 0x6A, 1.0),
            crab_shell_light: srgb(0xFF, 0xA0, 0x7A, 1.0),
            crab_eye: srgb(0xFF, 0xFF, 0xFF, 1.0),
            crab_pupil: srgb(0x1A, 0x1A, 0x2E, 1.0),
            sand_top: srgb(0x5D, 0x4E, 0x37, 1.0),
            sand_bottom: srgb(0x3D, 0x32, 0x27, 1.0),
            seaweed: srgb(0x2E, 0x7D, 0x32, 1.0),
            rock: srgb(0x4A, 0x4A, 0x4A, 1.0),
            bubble: srgb(0x67, 0xE8, 0xF9, 1.0),
        }
    }

    /// Flat, strongly separated colors
    pub fn high_contrast() -> Self {
        Self {
            water_top: srgb(0x00, 0x00, 0x00, 1.0),
            water_mid: srgb(0x00, 0x00, 0x00, 1.0),
            water_bottom: srgb(0x00, 0x00, 0x00, 1.0),
            light_ray: srgb(0x00, 0x00, 0x00, 0.0),
            coral_top: srgb(0xFF, 0x00, 0xFF, 1.0),
            coral_top_light: srgb(0xFF, 0x00, 0xFF, 1.0),
            coral_bottom: srgb(0xFF, 0x00, 0xFF, 1.0),
            coral_bottom_light: srgb(0xFF, 0x00, 0xFF, 1.0),
            crab_shell: srgb(0xFF, 0xFF, 0x00, 1.0),
            crab_shell_mid: srgb(0xFF, 0xFF, 0x00, 1.0),
            crab_shell_light: srgb(0xFF, 0xFF, 0x00, 1.0),
            crab_eye: srgb(0xFF, 0xFF, 0xFF, 1.0),
            crab_pupil: srgb(0x00, 0x00, 0x00, 1.0),
            sand_top: srgb(0xFF, 0xFF, 0xFF, 1.0),
            sand_bottom: srgb(0xFF, 0xFF, 0xFF, 1.0),
            seaweed: srgb(0x00, 0xFF, 0x00, 1.0),
            rock: srgb(0x80, 0x80, 0x80, 1.0),
            bubble: srgb(0x00, 0xFF, 0xFF, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(srgb(0, 0, 0, 1.0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(srgb(255, 255, 255, 0.5), [1.0, 1.0, 1.0, 0.5]);
        // Mid grey is darker in linear space
        assert!(srgb(128, 128, 128, 1.0)[0] < 0.5);
    }

    #[test]
    fn test_vertex_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }
}
