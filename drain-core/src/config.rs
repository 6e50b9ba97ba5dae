use crate::types::Coord;

/// Parameters for [`crate::generator::generate_random_drains`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Number of drains to generate.
    pub count: usize,
    pub wall_left_x: Coord,
    pub wall_right_x: Coord,
    pub wall_min_height: Coord,
    pub wall_max_height: Coord,
    /// Exclusive upper bound on drains sharing one height; must exceed 1.
    pub max_drains_per_height: usize,
    /// Master seed. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 20,
            wall_left_x: 10,
            wall_right_x: 40,
            wall_min_height: 10,
            wall_max_height: 100,
            max_drains_per_height: 5,
            seed: Some(1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Rain falling from the top edge, per unit of wall width.
    pub water_amount_per_unit_of_length: f64,
    pub generator: GeneratorConfig,
    /// Raindrops scattered for display.
    pub raindrop_count: usize,
    pub raindrop_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            water_amount_per_unit_of_length: 1.0,
            generator: GeneratorConfig::default(),
            raindrop_count: 10_000,
            raindrop_seed: Some(0),
        }
    }
}
