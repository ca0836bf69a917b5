//! Uniform random policy

use rand::{Rng, RngCore};

use crate::ai::policy::CountryPolicy;
use crate::decisions::Decision;
use crate::world::country::Country;

pub struct RandomPolicy;

impl CountryPolicy for RandomPolicy {
    fn choose(&self, _actor: &Country, options: &[Decision], rng: &mut dyn RngCore) -> Option<usize> {
        if options.is_empty() {
            return None;
        }
        Some(rng.gen_range(0..options.len()))
    }
}
