//! Mesh descriptions attached to scene nodes

use burst_core::Color;
use serde::{Deserialize, Serialize};

/// Procedural geometry shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Geometry {
    /// Regular tetrahedron inscribed in a sphere of `radius`.
    /// `detail` subdivides the faces; 0 is the plain 4-face solid.
    Tetrahedron { radius: f32, detail: u32 },
    Cube { size: f32 },
}

impl Geometry {
    /// Bounding-sphere radius
    pub fn radius(&self) -> f32 {
        match *self {
            Geometry::Tetrahedron { radius, .. } => radius,
            Geometry::Cube { size } => size * 3f32.sqrt() * 0.5,
        }
    }

    /// Triangle count of the generated mesh
    pub fn triangle_count(&self) -> usize {
        match *self {
            Geometry::Tetrahedron { detail, .. } => 4 * (detail as usize + 1).pow(2),
            Geometry::Cube { .. } => 12,
        }
    }
}

/// Phong-style surface description
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub specular: Color,
    pub shininess: f32,
    pub flat_shading: bool,
    /// Set whenever a property changes; cleared by whoever uploads it
    #[serde(skip)]
    pub needs_update: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            specular: Color::from_hex(0x111111),
            shininess: 30.0,
            flat_shading: false,
            needs_update: false,
        }
    }
}

impl Material {
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.needs_update = true;
    }
}

/// Geometry + material pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }
}
