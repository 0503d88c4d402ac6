use rand::Rng;

/// Live texel value written by the noise seed
const LIVE: [u8; 4] = [255, 255, 255, 255];

/// Dead texel value; matches the 0.3-gray surface clear so unseeded and
/// seeded-dead regions are indistinguishable
const DEAD: [u8; 4] = [77, 77, 77, 255];

/// Generate a `width * height` RGBA8 pixel block with roughly `density`
/// of the texels live, for upload into the current simulation surface.
pub fn noise_pixels<R: Rng>(width: u32, height: u32, density: f64, rng: &mut R) -> Vec<u8> {
    let count = (width * height) as usize;
    let mut pixels = Vec::with_capacity(count * 4);
    for _ in 0..count {
        let texel = if rng.gen::<f64>() < density { LIVE } else { DEAD };
        pixels.extend_from_slice(&texel);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rule::{luminance, ALIVE_THRESHOLD};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pixel_block_size() {
        let mut rng = StdRng::seed_from_u64(7);
        let pixels = noise_pixels(100, 100, 0.2, &mut rng);
        assert_eq!(pixels.len(), 100 * 100 * 4);
    }

    #[test]
    fn test_density_roughly_honored() {
        let mut rng = StdRng::seed_from_u64(7);
        let pixels = noise_pixels(256, 256, 0.2, &mut rng);
        let live = pixels.chunks_exact(4).filter(|t| t[0] == 255).count();
        let fraction = live as f64 / (256.0 * 256.0);
        assert!((fraction - 0.2).abs() < 0.02, "live fraction {fraction}");
    }

    #[test]
    fn test_texels_land_on_either_side_of_threshold() {
        let live_lum = luminance([1.0, 1.0, 1.0]);
        let dead_lum = luminance([77.0 / 255.0; 3]);
        assert!(live_lum > ALIVE_THRESHOLD);
        assert!(dead_lum < ALIVE_THRESHOLD);
    }

    #[test]
    fn test_opaque_alpha() {
        let mut rng = StdRng::seed_from_u64(3);
        let pixels = noise_pixels(16, 16, 0.5, &mut rng);
        assert!(pixels.chunks_exact(4).all(|t| t[3] == 255));
    }
}
