//! Injectable source of simulated load draws.

use rand::Rng;
use rand::rngs::StdRng;

/// Supplies random integer loads for [`crate::model::RoomRegistry::simulate_all`].
///
/// Implementations must return a value in the inclusive range
/// `[lower, upper]`; callers guarantee `lower <= upper`.
pub trait LoadSource {
    fn draw_watts(&mut self, lower: u32, upper: u32) -> u32;
}

impl LoadSource for StdRng {
    fn draw_watts(&mut self, lower: u32, upper: u32) -> u32 {
        self.random_range(lower..=upper)
    }
}

impl<S: LoadSource + ?Sized> LoadSource for &mut S {
    fn draw_watts(&mut self, lower: u32, upper: u32) -> u32 {
        (**self).draw_watts(lower, upper)
    }
}
