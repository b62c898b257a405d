//! Randomized input arrays.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Element;

/// Every generated value falls in this range.
pub const VALUE_RANGE: RangeInclusive<u32> = 10..=509;

/// Fills `size` elements with values drawn uniformly from [`VALUE_RANGE`] using the thread rng.
pub fn random_elements(size: usize) -> Vec<Element> {
    fill(&mut rand::thread_rng(), size)
}

fn fill<R: Rng>(rng: &mut R, size: usize) -> Vec<Element> {
    (0..size)
        .map(|_| Element::new(rng.gen_range(VALUE_RANGE)))
        .collect()
}

/// Owns the current input array and the rng that produces the next one.
///
/// ```
/// use orstviz_steps::InputSource;
///
/// let mut source = InputSource::seeded(20, 7);
/// assert_eq!(source.elements().len(), 20);
///
/// source.set_size(5);
/// assert_eq!(source.elements().len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct InputSource {
    rng: StdRng,
    size: usize,
    elements: Vec<Element>,
}

impl InputSource {
    /// Creates a source seeded from the operating system and generates a first array.
    pub fn new(size: usize) -> Self {
        Self::with_rng(StdRng::from_entropy(), size)
    }

    /// Creates a source whose sequence of arrays is fully determined by `seed`.
    pub fn seeded(size: usize, seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), size)
    }

    fn with_rng(mut rng: StdRng, size: usize) -> Self {
        let elements = fill(&mut rng, size);
        Self {
            rng,
            size,
            elements,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Replaces the current array with a fresh one of the current size.
    pub fn regenerate(&mut self) -> &[Element] {
        self.elements = fill(&mut self.rng, self.size);
        &self.elements
    }

    /// Changes the size and regenerates.
    pub fn set_size(&mut self, size: usize) -> &[Element] {
        self.size = size;
        self.regenerate()
    }
}
