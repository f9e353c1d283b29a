//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
///
/// Positions are screen pixels until `RenderState::render` maps them to NDC.
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

/// Theme-independent colors
pub mod colors {
    use crate::theme::{Rgba, rgb};

    pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
    pub const PLAYER_LEGS: Rgba = rgb(0x333333);
    pub const COIN_RIM: Rgba = rgb(0xDAA520);
    pub const COIN_MARK: Rgba = rgb(0xB8860B);
    pub const COIN_GLOW: Rgba = [1.0, 215.0 / 255.0, 0.0, 0.3];
    pub const HIGHLIGHT: Rgba = [1.0, 1.0, 1.0, 0.3];
    pub const CLEAR: Rgba = [0.02, 0.02, 0.05, 1.0];
}
