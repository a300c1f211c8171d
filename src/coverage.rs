//! Coverage policy: how much of the region one iteration scrolls.

use rand::Rng;

use crate::types::CoverageConfig;

/// Draw the coverage fraction for one iteration.
///
/// Usually the configured full fraction; occasionally a partial scroll so
/// consecutive iterations do not advance by an identical page height.
pub fn draw_coverage<R: Rng>(config: &CoverageConfig, rng: &mut R) -> f64 {
    if rng.random_bool(config.partial_chance.clamp(0.0, 1.0)) {
        rng.random_range(config.partial_min..config.partial_max)
    } else {
        config.full
    }
}

/// Distance one iteration should cover: coverage x region height x scale.
pub fn scroll_distance(coverage: f64, region_height: i32, scale: f64) -> f64 {
    coverage * f64::from(region_height) * scale
}
