//! Burst configuration (parsed from TOML)

use burst_core::{BurstError, Color, Result};
use burst_scene::{Geometry, Material, Mesh};
use burst_tween::Ease;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

/// Look of a freshly constructed particle. The burst color replaces the
/// material color on every explode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleStyle {
    /// Tetrahedron radius
    pub radius: f32,
    /// Tetrahedron subdivision level
    pub detail: u32,
    pub color: Color,
    pub specular: Color,
    pub shininess: f32,
    pub flat_shading: bool,
}

impl Default for ParticleStyle {
    fn default() -> Self {
        Self {
            radius: 0.3,
            detail: 0,
            color: Color::from_hex(0x009999),
            specular: Color::WHITE,
            shininess: 0.0,
            flat_shading: true,
        }
    }
}

impl ParticleStyle {
    pub fn mesh(&self) -> Mesh {
        Mesh::new(
            Geometry::Tetrahedron {
                radius: self.radius,
                detail: self.detail,
            },
            Material {
                color: self.color,
                specular: self.specular,
                shininess: self.shininess,
                flat_shading: self.flat_shading,
                needs_update: false,
            },
        )
    }
}

/// Tunables of a burst. Every key is optional in the TOML form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles start at a random distance in [0, spawn_radius) from the
    /// burst point, on the horizontal plane
    pub spawn_radius: f32,
    /// Added to the start distance to get the travel target distance
    pub spread_increment: f32,
    /// Full width of the random heading change, in radians
    pub angle_jitter: f32,
    /// Seconds
    pub duration_min: f32,
    pub duration_max: f32,
    /// Upper bound of each random target rotation angle, in radians
    pub rotation_max: f32,
    /// Uniform scale particles shrink toward
    pub end_scale: f32,
    /// Full width of the random height offset of the travel target
    pub height_jitter: f32,
    /// Upper bound of the random start delay of the travel tween
    pub max_delay: f32,
    /// Ease of the rotation and scale tweens
    pub ease: Ease,
    /// Ease of the travel tween
    pub position_ease: Ease,
    pub style: ParticleStyle,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            spawn_radius: 1.5,
            spread_increment: 3.0,
            angle_jitter: FRAC_PI_2,
            duration_min: 0.3,
            duration_max: 0.5,
            rotation_max: 12.0,
            end_scale: 0.1,
            height_jitter: 0.5,
            max_delay: 0.05,
            ease: Ease::Power1Out,
            position_ease: Ease::Power2Out,
            style: ParticleStyle::default(),
        }
    }
}

impl ParticleConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Longest time a particle can stay active
    pub fn max_lifetime(&self) -> f32 {
        self.max_delay + self.duration_max
    }

    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("spawn_radius", self.spawn_radius),
            ("spread_increment", self.spread_increment),
            ("angle_jitter", self.angle_jitter),
            ("duration_min", self.duration_min),
            ("duration_max", self.duration_max),
            ("rotation_max", self.rotation_max),
            ("height_jitter", self.height_jitter),
            ("max_delay", self.max_delay),
            ("style.radius", self.style.radius),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(BurstError::ConfigError(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.duration_min > self.duration_max {
            return Err(BurstError::ConfigError(format!(
                "duration_min ({}) exceeds duration_max ({})",
                self.duration_min, self.duration_max
            )));
        }
        if !self.end_scale.is_finite() {
            return Err(BurstError::ConfigError("end_scale must be finite".into()));
        }
        Ok(())
    }
}
