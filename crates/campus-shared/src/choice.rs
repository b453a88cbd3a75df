//! Injectable random choice for cosmetic phrasing.
//!
//! Reply wording varies between calls; tests swap in a seeded or fixed
//! chooser to make it reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Picks an index in `0..len`. `len` is never zero.
pub trait Chooser: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// Pick one option through a chooser
pub fn choose<'a>(chooser: &dyn Chooser, options: &[&'a str]) -> &'a str {
    if options.is_empty() {
        return "";
    }
    let idx = chooser.pick(options.len()).min(options.len() - 1);
    options[idx]
}

/// Uniform choice from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomChooser;

impl Chooser for RandomChooser {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible choice from a seeded RNG
#[derive(Debug)]
pub struct SeededChooser {
    rng: Mutex<StdRng>,
}

impl SeededChooser {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Chooser for SeededChooser {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..len)
    }
}

/// Always the first option
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChooser;

impl Chooser for FirstChooser {
    fn pick(&self, _len: usize) -> usize {
        0
    }
}
