//! CPU mirror of the generation rule in `shaders/automata.wgsl`.
//!
//! The shader and this module implement the same math; the tests here pin
//! the rule's semantics (Game-of-Life boundary behavior, determinism) where
//! a GPU readback would otherwise be needed.

use crate::sim::RuleParameters;

/// Rec. 709 luminance; a texel's "live weight" in [0, 1]
pub fn luminance(rgb: [f32; 3]) -> f32 {
    0.2126 * rgb[0] + 0.7152 * rgb[1] + 0.0722 * rgb[2]
}

/// A live weight above this counts as "alive" for discrete thresholding
pub const ALIVE_THRESHOLD: f32 = 0.5;

/// Enumerate the neighborhood offsets for the given radius.
///
/// `half_nearest == 1` includes diagonals (the full Moore ring, 8 offsets at
/// radius 1); `half_nearest == 2` restricts the ring to axis-aligned offsets
/// (4 at radius 1). The center cell is never included.
pub fn neighbor_offsets(range_radius: u32, half_nearest: u32) -> Vec<(i32, i32)> {
    let r = range_radius as i32;
    let mut offsets = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            if dx == 0 && dy == 0 {
                continue;
            }
            if half_nearest >= 2 && dx != 0 && dy != 0 {
                continue;
            }
            offsets.push((dx, dy));
        }
    }
    offsets
}

/// Advance a single cell given its live weight and its neighborhood's summed
/// live weight. Returns the new live weight.
pub fn step_cell(params: &RuleParameters, current: f32, neighbor_sum: f32) -> f32 {
    let in_range = neighbor_sum >= params.neighbor_min && neighbor_sum <= params.neighbor_max;
    if params.conway {
        let alive = current > ALIVE_THRESHOLD;
        let survives = alive && in_range;
        let born = !alive && (neighbor_sum - 3.0).abs() < 0.5;
        if survives || born {
            1.0
        } else {
            0.0
        }
    } else {
        let target = if in_range { 1.0 } else { 0.0 };
        current + (target - current) * params.increment
    }
}

/// Advance a whole grid of live weights by one generation, sampling
/// clamp-to-edge at one cell per texel (`grid_size == offset_size`).
pub fn step_grid(params: &RuleParameters, width: usize, height: usize, cells: &[f32]) -> Vec<f32> {
    assert_eq!(cells.len(), width * height);
    let offsets = neighbor_offsets(params.range_radius, params.half_nearest);
    let at = |x: i32, y: i32| -> f32 {
        let x = x.clamp(0, width as i32 - 1) as usize;
        let y = y.clamp(0, height as i32 - 1) as usize;
        cells[y * width + x]
    };
    let mut next = Vec::with_capacity(cells.len());
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let sum: f32 = offsets.iter().map(|&(dx, dy)| at(x + dx, y + dy)).sum();
            next.push(step_cell(params, at(x, y), sum));
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn life() -> RuleParameters {
        RuleParameters::game_of_life()
    }

    #[test]
    fn test_neighborhood_shapes() {
        assert_eq!(neighbor_offsets(1, 1).len(), 8);
        assert_eq!(neighbor_offsets(1, 2).len(), 4);
        assert_eq!(neighbor_offsets(2, 1).len(), 24);
        assert_eq!(neighbor_offsets(2, 2).len(), 8);
    }

    #[test]
    fn test_neighborhood_excludes_center() {
        for (r, h) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            assert!(!neighbor_offsets(r, h).contains(&(0, 0)));
        }
    }

    #[test]
    fn test_isolated_cell_dies() {
        assert_eq!(step_cell(&life(), 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_three_neighbors_survive_and_birth() {
        assert_eq!(step_cell(&life(), 1.0, 3.0), 1.0);
        assert_eq!(step_cell(&life(), 0.0, 3.0), 1.0);
    }

    #[test]
    fn test_two_neighbors_below_survival_band() {
        // The preset band [2.5, 3.5] admits only a sum of 3: stricter than
        // classic S23, per the thresholding contract
        assert_eq!(step_cell(&life(), 1.0, 2.0), 0.0);
        assert_eq!(step_cell(&life(), 0.0, 2.0), 0.0);
    }

    #[test]
    fn test_overpopulation_kills() {
        assert_eq!(step_cell(&life(), 1.0, 4.0), 0.0);
    }

    #[test]
    fn test_block_is_still_life() {
        // 4x4 grid with a 2x2 block in the middle
        let mut cells = vec![0.0f32; 16];
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            cells[y * 4 + x] = 1.0;
        }
        let next = step_grid(&life(), 4, 4, &cells);
        assert_eq!(next, cells);
    }

    #[test]
    fn test_row_of_three_births_column_then_starves() {
        // Under the [2.5, 3.5] band the ends and center of a horizontal
        // triple all die (1 and 2 neighbors), while the cells above and
        // below the center see exactly 3 and are born; the resulting
        // isolated pair then starves.
        let mut cells = vec![0.0f32; 25];
        for x in 1..4 {
            cells[2 * 5 + x] = 1.0;
        }
        let once = step_grid(&life(), 5, 5, &cells);
        let mut pair = vec![0.0f32; 25];
        pair[5 + 2] = 1.0;
        pair[3 * 5 + 2] = 1.0;
        assert_eq!(once, pair);
        assert!(step_grid(&life(), 5, 5, &once).iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_uniform_grid_steps_uniformly() {
        // Clamp-to-edge duplicates edge values, so on a uniform grid every
        // cell sees the same neighbor sum and the next generation is uniform
        // too: the cleared seed background stays a flat field
        let params = RuleParameters::smokestack();
        let cells = vec![0.3f32; 36];
        let next = step_grid(&params, 6, 6, &cells);
        assert!(next.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_step_is_deterministic() {
        let params = RuleParameters::smokestack();
        let cells: Vec<f32> = (0..64).map(|i| (i as f32 * 0.37).fract()).collect();
        let a = step_grid(&params, 8, 8, &cells);
        let b = step_grid(&params, 8, 8, &cells);
        // Bit-identical, not approximately equal
        assert_eq!(a, b);
    }

    #[test]
    fn test_continuous_blend_rate() {
        let mut params = RuleParameters::maze();
        params.increment = 0.0;
        assert_eq!(step_cell(&params, 0.4, 20.0), 0.4);
        params.increment = 1.0;
        assert_eq!(step_cell(&params, 0.4, 8.0), 1.0);
        params.increment = 0.5;
        let stepped = step_cell(&params, 0.4, 8.0);
        assert!((stepped - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_inverted_thresholds_degenerate_but_total() {
        // neighbor_max < neighbor_min is tolerated: nothing is ever in range
        let mut params = life();
        params.neighbor_min = 3.5;
        params.neighbor_max = 2.5;
        assert_eq!(step_cell(&params, 1.0, 3.0), 0.0);
    }

    #[test]
    fn test_luminance_weights() {
        assert!((luminance([1.0, 1.0, 1.0]) - 1.0).abs() < 1e-6);
        assert_eq!(luminance([0.0, 0.0, 0.0]), 0.0);
        assert!(luminance([0.0, 1.0, 0.0]) > luminance([1.0, 0.0, 0.0]));
    }
}
