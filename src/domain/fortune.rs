/// Fortunes shown on the final screen.
///
/// One is drawn uniformly when the final screen is entered and kept for as
/// long as that screen is active.

use rand::seq::SliceRandom;
use rand::Rng;

pub const FORTUNES: [&str; 8] = [
    "the seeds you planted in the dark are already growing.",
    "a door you stopped knocking on was never your door.",
    "you will be brave at exactly the right moment.",
    "someone you haven't met yet is already glad you exist.",
    "the plot twist is in your favor.",
    "rest is part of the work. so is joy.",
    "you are allowed to begin again, as many times as it takes.",
    "God's Not Finished.",
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Fortune(&'static str);

impl Fortune {
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // FORTUNES is non-empty, so choose always succeeds.
        Fortune(FORTUNES.choose(rng).copied().unwrap_or(FORTUNES[0]))
    }

    pub fn text(&self) -> &'static str {
        self.0
    }
}
