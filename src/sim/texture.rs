//! Procedural asteroid surface textures
//!
//! A texture is a square RGBA image holding a gray, noise-speckled disc. It is
//! generated once per asteroid and never changes afterwards; the compositor
//! warps it onto the asteroid's lumpy outline.

use bytemuck::{Pod, Zeroable};
use noise::{NoiseFn, OpenSimplex};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// RGBA8 pixel
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(level: u8, a: u8) -> Self {
        Self::new(level, level, level, a)
    }
}

/// Square-or-rectangular pixel buffer, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Image {
    /// Fully transparent image
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at (x, y), `None` outside the buffer
    pub fn get(&self, x: i64, y: i64) -> Option<Rgba> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.pixels[self.index(x as u32, y as u32)])
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba) {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.pixels[index] = pixel;
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Raw RGBA8 bytes, ready to upload to a renderer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Count of pixels with any opacity
    pub fn opaque_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0).count()
    }
}

/// How alpha fades between `fade_start` and the rim
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeFalloff {
    /// Straight ramp down to zero at the rim
    Linear,
    /// `(1 - u)^exponent` over the fade band, softer or harder than linear
    Power { exponent: f32 },
}

impl EdgeFalloff {
    /// Opacity in [0, 1] for progress `u` through the fade band (0 = start, 1 = rim)
    fn opacity(&self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        match *self {
            EdgeFalloff::Linear => 1.0 - u,
            EdgeFalloff::Power { exponent } => (1.0 - u).powf(exponent),
        }
    }
}

/// Texture synthesis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureParams {
    /// Noise layers summed per pixel
    pub octaves: u32,
    /// Noise frequency of the first octave, per pixel
    pub base_frequency: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
    /// Amplitude multiplier per octave
    pub persistence: f64,
    /// Floor lifted into the normalized value (`v * (1 - c) + c`)
    pub contrast_floor: f32,
    /// Darkest gray level
    pub base_gray: u8,
    /// Gray levels above `base_gray` the noise can reach
    pub gray_range: u8,
    /// Fraction of the radius where alpha starts fading
    pub fade_start: f32,
    pub falloff: EdgeFalloff,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            base_frequency: 0.1,
            lacunarity: 2.0,
            persistence: 0.5,
            contrast_floor: 0.2,
            base_gray: 64,
            gray_range: 160,
            fade_start: 0.8,
            falloff: EdgeFalloff::Linear,
        }
    }
}

impl TextureParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.octaves == 0 {
            return Err(ConfigError::Invalid {
                field: "texture.octaves",
                reason: "must be at least 1",
            });
        }
        if !(0.0..1.0).contains(&self.fade_start) {
            return Err(ConfigError::Invalid {
                field: "texture.fade_start",
                reason: "must be within [0, 1)",
            });
        }
        if matches!(self.falloff, EdgeFalloff::Power { exponent } if exponent <= 0.0) {
            return Err(ConfigError::Invalid {
                field: "texture.falloff.exponent",
                reason: "must be positive",
            });
        }
        if self.base_gray as u16 + self.gray_range as u16 > 255 {
            return Err(ConfigError::Invalid {
                field: "texture.gray_range",
                reason: "base_gray + gray_range must not exceed 255",
            });
        }
        Ok(())
    }

    /// Sum of octave amplitudes, the bound of the summed noise
    fn amplitude_sum(&self) -> f64 {
        (0..self.octaves)
            .map(|o| self.persistence.powi(o as i32))
            .sum()
    }
}

/// Generate a `2 * radius` square texture from `seed`.
///
/// Pixels inside the disc get a gray level from fractal noise; pixels outside
/// stay transparent. Identical inputs always produce identical bytes.
pub fn synthesize_texture(radius: f32, seed: u32, params: &TextureParams) -> Image {
    let size = (radius * 2.0).max(0.0) as u32;
    let mut image = Image::new(size, size);
    if size == 0 {
        return image;
    }

    let noise = OpenSimplex::new(seed);
    let amplitude_sum = params.amplitude_sum();
    let fade_band = (1.0 - params.fade_start).max(f32::EPSILON);

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - radius;
            let dy = y as f32 - radius;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance >= radius {
                continue;
            }

            let mut value = 0.0;
            let mut amplitude = 1.0;
            let mut frequency = params.base_frequency;
            for _ in 0..params.octaves {
                value += amplitude * noise.get([x as f64 * frequency, y as f64 * frequency]);
                amplitude *= params.persistence;
                frequency *= params.lacunarity;
            }

            // [-amplitude_sum, amplitude_sum] -> [0, 1]
            let normalized = ((value / amplitude_sum + 1.0) * 0.5).clamp(0.0, 1.0) as f32;
            let lifted = normalized * (1.0 - params.contrast_floor) + params.contrast_floor;
            let level = params.base_gray as f32 + lifted * params.gray_range as f32;

            let edge = distance / radius;
            let alpha = if edge < params.fade_start {
                1.0
            } else {
                params.falloff.opacity((edge - params.fade_start) / fade_band)
            };

            image.set(
                x,
                y,
                Rgba::gray(level.clamp(0.0, 255.0) as u8, (alpha * 255.0) as u8),
            );
        }
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_size() {
        let image = synthesize_texture(20.0, 42, &TextureParams::default());
        assert_eq!(image.width(), 40);
        assert_eq!(image.height(), 40);
        assert_eq!(image.as_bytes().len(), 40 * 40 * 4);
    }

    #[test]
    fn test_texture_deterministic() {
        let params = TextureParams::default();
        let a = synthesize_texture(30.0, 777, &params);
        let b = synthesize_texture(30.0, 777, &params);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_texture_seed_changes_pattern() {
        let params = TextureParams::default();
        let a = synthesize_texture(30.0, 1, &params);
        let b = synthesize_texture(30.0, 2, &params);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_corners_transparent_center_opaque() {
        let image = synthesize_texture(25.0, 9, &TextureParams::default());
        assert_eq!(image.get(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(image.get(49, 49), Some(Rgba::TRANSPARENT));
        let center = image.get(25, 25).unwrap();
        assert_eq!(center.a, 255);
        assert_eq!(center.r, center.g);
        assert_eq!(center.g, center.b);
    }

    #[test]
    fn test_gray_within_window() {
        let params = TextureParams::default();
        let image = synthesize_texture(40.0, 5, &params);
        let low = params.base_gray as f32 + params.contrast_floor * params.gray_range as f32;
        let high = params.base_gray as u16 + params.gray_range as u16;
        for p in image.pixels().iter().filter(|p| p.a > 0) {
            assert!(p.r as f32 >= low.floor());
            assert!(p.r as u16 <= high);
        }
    }

    #[test]
    fn test_alpha_fades_toward_rim() {
        let image = synthesize_texture(50.0, 3, &TextureParams::default());
        // Row through the centre: 0.5 of the radius is solid, 0.95 is faded
        let inner = image.get(75, 50).unwrap();
        let outer = image.get(97, 50).unwrap();
        assert_eq!(inner.a, 255);
        assert!(outer.a < 255);
        assert!(outer.a > 0);
    }

    #[test]
    fn test_power_falloff() {
        let linear = EdgeFalloff::Linear;
        let soft = EdgeFalloff::Power { exponent: 0.5 };
        assert!((linear.opacity(0.5) - 0.5).abs() < 1e-6);
        assert!(soft.opacity(0.5) > linear.opacity(0.5));
        assert_eq!(soft.opacity(1.0), 0.0);
    }

    #[test]
    fn test_params_validation() {
        let mut params = TextureParams::default();
        assert!(params.validate().is_ok());
        params.fade_start = 1.0;
        assert!(params.validate().is_err());
        params.fade_start = 0.8;
        params.gray_range = 250;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_image_indexing_wide_buffer() {
        let mut image = Image::new(70_000, 2);
        assert_eq!(image.pixels().len(), 140_000);
        image.set(69_999, 1, Rgba::WHITE);
        assert_eq!(image.get(69_999, 1), Some(Rgba::WHITE));
        assert_eq!(image.get(69_999, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(image.get(70_000, 1), None);
    }

    #[test]
    fn test_zero_radius() {
        let image = synthesize_texture(0.0, 1, &TextureParams::default());
        assert_eq!(image.width(), 0);
        assert!(image.pixels().is_empty());
    }
}
