//! Deformed sprite compositing
//!
//! Warps an asteroid's circular surface texture onto its lumpy outline and
//! caches the result. The expensive per-pixel warp only runs when the outline
//! itself changes; moving or spinning the asteroid reuses the cached buffer
//! and applies rotation as a cheap separate transform.

use glam::Vec2;

use super::shape::{ControlPoints, SILHOUETTE_SAMPLES, angle_bucket};
use super::texture::Image;
use crate::cartesian_to_polar;

/// Headroom on the output buffer so the widest lobes are never clipped
pub const OVERSIZE: f32 = 1.2;

/// Map `texture` (a disc of `base_radius`) onto the outline described by `control`.
///
/// Every output pixel inside the outline samples the texture at the point
/// obtained by scaling its offset from the centre by `base_radius / outline`,
/// so the irregular outline lands on the texture's rim.
pub fn composite(texture: &Image, base_radius: f32, control: &ControlPoints) -> Image {
    let scale = OVERSIZE.max(control.max_value());
    let size = (base_radius * 2.0 * scale).max(0.0) as u32;
    let mut out = Image::new(size, size);

    let center = Vec2::splat(size as f32 / 2.0);
    let tex_center = Vec2::splat(base_radius);
    let outline = control.radius_table(base_radius);

    for y in 0..size {
        for x in 0..size {
            let offset = Vec2::new(x as f32, y as f32) - center;
            let (distance, angle) = cartesian_to_polar(offset);
            let edge = outline[angle_bucket(angle)];
            if edge <= f32::EPSILON || distance > edge {
                continue;
            }

            let sample = tex_center + offset * (base_radius / edge);
            if let Some(pixel) = texture.get(sample.x.floor() as i64, sample.y.floor() as i64) {
                out.set(x, y, pixel);
            }
        }
    }

    out
}

impl Image {
    /// Copy rotated by `angle` radians about the centre (clockwise on a y-down screen).
    ///
    /// The result is sized to the rotated bounding box; uncovered pixels are
    /// transparent. Nearest-neighbour sampling.
    pub fn rotated(&self, angle: f32) -> Image {
        if self.width() == 0 || self.height() == 0 {
            return self.clone();
        }

        let (sin, cos) = angle.sin_cos();
        let (w, h) = (self.width() as f32, self.height() as f32);
        // Shave float noise so a quarter turn of an NxM image stays MxN
        let out_w = ((w * cos.abs() + h * sin.abs()) - 1e-3).ceil().max(1.0) as u32;
        let out_h = ((w * sin.abs() + h * cos.abs()) - 1e-3).ceil().max(1.0) as u32;

        let mut out = Image::new(out_w, out_h);
        let src_center = Vec2::new(w, h) / 2.0;
        let dst_center = Vec2::new(out_w as f32, out_h as f32) / 2.0;
        let inverse = Vec2::from_angle(-angle);

        for y in 0..out_h {
            for x in 0..out_w {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - dst_center;
                let s = inverse.rotate(d) + src_center;
                if let Some(pixel) = self.get(s.x.floor() as i64, s.y.floor() as i64) {
                    out.set(x, y, pixel);
                }
            }
        }

        out
    }
}

/// Cached warped sprite, keyed by the local outline it was built for
#[derive(Debug, Clone, Default)]
pub struct DeformedSprite {
    key: Vec<Vec2>,
    image: Option<Image>,
    builds: u32,
}

impl DeformedSprite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached sprite, rebuilding it first if the outline differs from the last build.
    ///
    /// Returns the sprite and whether a rebuild happened.
    pub fn get_or_build(
        &mut self,
        texture: &Image,
        base_radius: f32,
        control: &ControlPoints,
    ) -> (&Image, bool) {
        let key = control.local_silhouette(base_radius, SILHOUETTE_SAMPLES);
        if self.key != key {
            self.image = None;
        }
        self.key = key;

        let rebuilt = self.image.is_none();
        if rebuilt {
            self.builds += 1;
            log::debug!(
                "Compositing {}px sprite (build #{})",
                (base_radius * 2.0) as u32,
                self.builds
            );
        }
        let image = self
            .image
            .get_or_insert_with(|| composite(texture, base_radius, control));
        (image, rebuilt)
    }

    /// Drop the cached buffer
    pub fn invalidate(&mut self) {
        self.image = None;
        self.key.clear();
    }

    /// Times the sprite has been composited
    pub fn builds(&self) -> u32 {
        self.builds
    }

    pub fn is_cached(&self) -> bool {
        self.image.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::texture::{Rgba, TextureParams, synthesize_texture};
    use std::f32::consts::FRAC_PI_2;

    fn unit_circle() -> ControlPoints {
        ControlPoints::from_values(&[1.0; 8])
    }

    #[test]
    fn test_composite_size_has_headroom() {
        let texture = synthesize_texture(20.0, 1, &TextureParams::default());
        let sprite = composite(&texture, 20.0, &unit_circle());
        assert_eq!(sprite.width(), 48);
        assert_eq!(sprite.height(), 48);
    }

    #[test]
    fn test_composite_circle_matches_texture_center() {
        let texture = synthesize_texture(20.0, 11, &TextureParams::default());
        let sprite = composite(&texture, 20.0, &unit_circle());
        assert_eq!(sprite.get(24, 24), texture.get(20, 20));
    }

    #[test]
    fn test_composite_masks_outside_outline() {
        let texture = synthesize_texture(20.0, 11, &TextureParams::default());
        let sprite = composite(&texture, 20.0, &unit_circle());
        // 22px right of centre is beyond a 20px circle
        assert_eq!(sprite.get(46, 24), Some(Rgba::TRANSPARENT));
        assert_eq!(sprite.get(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_composite_lobe_extends_past_base_radius() {
        let texture = synthesize_texture(20.0, 4, &TextureParams::default());
        let bulge = ControlPoints::from_values(&[1.2; 8]);
        let sprite = composite(&texture, 20.0, &bulge);
        // 22px right of centre is inside a 24px outline and maps to the texture interior
        let pixel = sprite.get(46, 24).unwrap();
        assert!(pixel.a > 0);
    }

    #[test]
    fn test_cache_reused_for_same_outline() {
        let texture = synthesize_texture(15.0, 2, &TextureParams::default());
        let control = ControlPoints::from_values(&[0.9, 1.1, 1.0, 1.2]);
        let mut cache = DeformedSprite::new();

        let (_, rebuilt) = cache.get_or_build(&texture, 15.0, &control);
        assert!(rebuilt);
        let (_, rebuilt) = cache.get_or_build(&texture, 15.0, &control);
        assert!(!rebuilt);
        assert_eq!(cache.builds(), 1);
    }

    #[test]
    fn test_cache_rebuilt_when_outline_changes() {
        let texture = synthesize_texture(15.0, 2, &TextureParams::default());
        let mut cache = DeformedSprite::new();
        cache.get_or_build(&texture, 15.0, &unit_circle());

        let other = ControlPoints::from_values(&[0.8, 1.2]);
        let (_, rebuilt) = cache.get_or_build(&texture, 15.0, &other);
        assert!(rebuilt);
        assert_eq!(cache.builds(), 2);

        cache.invalidate();
        assert!(!cache.is_cached());
    }

    #[test]
    fn test_rotate_identity() {
        let texture = synthesize_texture(10.0, 8, &TextureParams::default());
        assert_eq!(texture.rotated(0.0), texture);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut image = Image::new(4, 2);
        image.set(0, 0, Rgba::WHITE);
        let rotated = image.rotated(FRAC_PI_2);
        assert_eq!(rotated.width(), 2);
        assert_eq!(rotated.height(), 4);
        // Clockwise on screen: top-left lands top-right
        assert_eq!(rotated.get(1, 0), Some(Rgba::WHITE));
        assert_eq!(rotated.opaque_pixel_count(), 1);
    }

    #[test]
    fn test_rotate_grows_bounding_box() {
        let image = Image::new(10, 10);
        let rotated = image.rotated(std::f32::consts::FRAC_PI_4);
        assert_eq!(rotated.width(), 15);
        assert_eq!(rotated.height(), 15);
    }
}
