use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::SystemTime;

use crate::error::FieldError;
use crate::field::{Coord, Field, PALETTE, PALETTE_SIZE};

pub struct FieldGenerator {
    rng: ChaCha8Rng,
    seed: u64,
}

impl FieldGenerator {
    pub fn new(seed: u64) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        FieldGenerator { rng, seed }
    }

    /// Seeds from the wall clock, so every run gets a different field.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fills a `height` x `width` field with colors drawn uniformly from the
    /// first `num_colors` palette entries.
    pub fn generate(
        &mut self,
        height: usize,
        width: usize,
        num_colors: usize,
    ) -> Result<Field, FieldError> {
        validate_color_count(num_colors)?;

        let mut field = Field::new(height, width);
        for row in 0..height {
            for col in 0..width {
                let color = PALETTE[self.rng.gen_range(0..num_colors)];
                field.set_color(Coord::new(row as isize, col as isize), color);
            }
        }

        Ok(field)
    }
}

pub fn validate_color_count(num_colors: usize) -> Result<(), FieldError> {
    if num_colors == 0 || num_colors > PALETTE_SIZE {
        return Err(FieldError::ColorCount(num_colors));
    }
    Ok(())
}
