//! Resource growth (§4.4 step 1): every planet's energy and silver grow
//! by its stored rate each tick, clamped to its cap.

use openforest_core::math::clamp;
use openforest_core::types::Planet;

pub fn apply_growth(planets: &mut [Planet]) {
    for planet in planets.iter_mut() {
        planet.energy = clamp(planet.energy + planet.energy_growth, 0.0, planet.energy_cap);
        planet.silver = clamp(planet.silver + planet.silver_growth, 0.0, planet.silver_cap);
    }
}
