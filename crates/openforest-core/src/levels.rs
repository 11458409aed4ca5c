//! Level-derived planet statistics.
//!
//! A planet's level (1 through 5) determines its baseline resource caps,
//! growth rates, and combat/mobility stats at generation time. These are
//! pure functions of the level; later upgrades (§4.4 step 2) add deltas on
//! top of whatever `stats_for_level` produced, they never re-derive from
//! level again.

/// The baseline stat block a freshly generated planet of a given level
/// starts with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStats {
    pub energy_cap: f64,
    pub energy_growth: f64,
    pub silver_cap: f64,
    pub silver_growth: f64,
    pub defense: f64,
    pub speed: f64,
    pub sensor_range: f64,
}

/// Computes the baseline stats for level `level` (clamped into `[1, 5]`).
pub fn stats_for_level(level: u8) -> LevelStats {
    let l = level.clamp(1, 5) as f64;
    LevelStats {
        energy_cap: 40.0 + 40.0 * l,
        energy_growth: 1.0 + 0.6 * l,
        silver_cap: 30.0 + 30.0 * l,
        silver_growth: 0.6 + 0.35 * l,
        defense: 0.8 + 0.25 * l,
        speed: 0.6 + 0.08 * l,
        sensor_range: 0.18 + 0.06 * l,
    }
}

/// Cumulative distribution used by the world generator to roll a planet's
/// level from a uniform `[0, 1)` draw: `(level, cumulative upper bound)`
/// pairs in ascending order. A draw that falls through every bound (should
/// not happen given the bounds sum to 1.0, but floating point) resolves to
/// level 1.
pub const LEVEL_DISTRIBUTION: [(u8, f64); 5] = [
    (1, 0.4),
    (2, 0.65),
    (3, 0.85),
    (4, 0.95),
    (5, 1.0),
];

/// Rolls a level from a uniform `[0, 1)` draw against [`LEVEL_DISTRIBUTION`].
pub fn roll_level(draw: f64) -> u8 {
    for (level, upper) in LEVEL_DISTRIBUTION {
        if draw < upper {
            return level;
        }
    }
    1
}
