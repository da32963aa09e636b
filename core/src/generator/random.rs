use ndarray::Array2;

use super::*;

/// Places mines uniformly at random without replacement, reproducible from `seed`.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generator seeded from the thread-local RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let shape = config.shape();
        let total_cells = shape.total_cells();

        let mines = if config.mines >= total_cells {
            log::warn!(
                "Minefield would be full, requested {} mines but only {} cells, keeping one cell free",
                config.mines,
                total_cells
            );
            total_cells.saturating_sub(1)
        } else {
            config.mines
        };

        let mut mine_mask: Array2<bool> = Array2::default(shape.bounds().to_nd_index());
        let mut free_cells: Vec<Coord2> = shape.iter_coords().collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for _ in 0..mines {
            let pick = rng.random_range(0..free_cells.len());
            let coords = free_cells.swap_remove(pick);
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(shape, mine_mask);
        log::debug!(
            "Generated size {} minefield with {} mines from seed {}",
            shape.size(),
            layout.mine_count(),
            self.seed
        );
        layout
    }
}
