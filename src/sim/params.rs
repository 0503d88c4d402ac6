/// Tunable configuration of the automaton. Mutated freely by the control
/// surface; the update pass snapshots it into a uniform buffer at the start
/// of each generation, so the shader never sees a torn parameter set.
///
/// `neighbor_max >= neighbor_min` is assumed, not enforced. A violating set
/// produces a degenerate (everything dies) but non-crashing automaton.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuleParameters {
    /// Logical cell-grid side length; fragment positions are quantized to
    /// this resolution before sampling
    pub grid_size: f32,
    /// Texel sampling stride denominator. Neighbor offsets step by
    /// `1 / offset_size` in UV space; decoupling it from `grid_size`
    /// stretches or shrinks the neighborhood relative to the cell size.
    pub offset_size: f32,
    /// Neighbor-sampling radius, 1 or 2
    pub range_radius: u32,
    /// Blend rate toward the target state in continuous mode, in [0, 1]
    pub increment: f32,
    /// Upper viability threshold for the live-neighbor sum
    pub neighbor_max: f32,
    /// Lower viability threshold for the live-neighbor sum
    pub neighbor_min: f32,
    /// 1 = include diagonal neighbors (Moore), 2 = axis-aligned only
    pub half_nearest: u32,
    /// true = discrete Game-of-Life thresholding, false = continuous smoothing
    pub conway: bool,
}

impl Default for RuleParameters {
    fn default() -> Self {
        Self {
            grid_size: 512.0,
            offset_size: 1024.0,
            range_radius: 1,
            increment: 0.0,
            neighbor_max: 12.0,
            neighbor_min: 6.5,
            half_nearest: 1,
            conway: false,
        }
    }
}

impl RuleParameters {
    /// Continuous rule over a coarse grid; drifting horizontal bands
    pub fn scanlines() -> Self {
        Self {
            grid_size: 512.0,
            offset_size: 1024.0,
            range_radius: 2,
            increment: 0.1,
            neighbor_max: 12.0,
            neighbor_min: 7.0,
            half_nearest: 1,
            conway: false,
        }
    }

    /// Continuous rule with a slightly offset grid; soft billowing cells
    pub fn smoky_grid() -> Self {
        Self {
            grid_size: 500.0,
            ..Self::scanlines()
        }
    }

    /// Classic Game of Life on a 310-cell grid
    pub fn game_of_life() -> Self {
        Self {
            grid_size: 310.0,
            offset_size: 310.0,
            range_radius: 1,
            increment: 1.0,
            neighbor_max: 3.5,
            neighbor_min: 2.5,
            half_nearest: 1,
            conway: true,
        }
    }

    /// Game of Life at a finer grid resolution
    pub fn game_of_life_fine() -> Self {
        Self {
            grid_size: 368.0,
            offset_size: 368.0,
            ..Self::game_of_life()
        }
    }

    /// Wide-ring hard stepping over axis-aligned neighbors; foam-like froth
    pub fn foam() -> Self {
        Self {
            grid_size: 354.0,
            offset_size: 354.0,
            range_radius: 2,
            increment: 1.0,
            neighbor_max: 12.0,
            neighbor_min: 6.5,
            half_nearest: 2,
            conway: false,
        }
    }

    /// Slow axis-aligned relaxation; settles into maze-like corridors
    pub fn maze() -> Self {
        Self {
            grid_size: 300.0,
            offset_size: 300.0,
            increment: 0.1,
            ..Self::foam()
        }
    }

    /// Decoupled sampling stride makes the smoothed state billow upward
    pub fn smokestack() -> Self {
        Self {
            grid_size: 512.0,
            offset_size: 1024.0,
            ..Self::foam()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_continuous() {
        let params = RuleParameters::default();
        assert!(!params.conway);
        assert_eq!(params.range_radius, 1);
    }

    #[test]
    fn test_life_presets_use_conway_thresholds() {
        for params in [
            RuleParameters::game_of_life(),
            RuleParameters::game_of_life_fine(),
        ] {
            assert!(params.conway);
            assert_eq!(params.range_radius, 1);
            assert_eq!(params.half_nearest, 1);
            assert_eq!(params.neighbor_min, 2.5);
            assert_eq!(params.neighbor_max, 3.5);
            // One texel step per cell: the neighborhood is exactly adjacent cells
            assert_eq!(params.grid_size, params.offset_size);
        }
    }

    #[test]
    fn test_presets_keep_thresholds_ordered() {
        for params in [
            RuleParameters::default(),
            RuleParameters::scanlines(),
            RuleParameters::smoky_grid(),
            RuleParameters::game_of_life(),
            RuleParameters::game_of_life_fine(),
            RuleParameters::foam(),
            RuleParameters::maze(),
            RuleParameters::smokestack(),
        ] {
            assert!(params.neighbor_max >= params.neighbor_min);
            assert!(params.range_radius == 1 || params.range_radius == 2);
            assert!(params.half_nearest == 1 || params.half_nearest == 2);
            assert!((0.0..=1.0).contains(&params.increment));
        }
    }
}
