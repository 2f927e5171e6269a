//! Randomness port used by every generator.
//!
//! Generators never touch an RNG directly; they draw through
//! [`RandomSource::next_in_range`] so tests can replay a fixed sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, ScrambleError};

/// Source of uniformly distributed integers
pub trait RandomSource {
    /// Draw a value in `min..=max`
    fn next_in_range(&mut self, min: i64, max: i64) -> Result<i64>;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_in_range(&mut self, min: i64, max: i64) -> Result<i64> {
        (**self).next_in_range(min, max)
    }
}

/// Pick one element uniformly (one draw)
pub fn pick<T: Copy, S: RandomSource + ?Sized>(source: &mut S, items: &[T]) -> Result<T> {
    if items.is_empty() {
        return Err(ScrambleError::EmptyRange { min: 0, max: -1 });
    }
    let index = source.next_in_range(0, items.len() as i64 - 1)?;
    Ok(items[index as usize])
}

/// Production source backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_in_range(&mut self, min: i64, max: i64) -> Result<i64> {
        if min > max {
            return Err(ScrambleError::EmptyRange { min, max });
        }
        Ok(self.rng.gen_range(min..=max))
    }
}

/// Replays a fixed list of values.
///
/// Each stored value is wrapped into the requested range, so any sequence is
/// usable for any draw. Running out of values is an error.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<i64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<i64>) -> Self {
        Self {
            values,
            cursor: 0,
        }
    }

    /// Number of values consumed so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_in_range(&mut self, min: i64, max: i64) -> Result<i64> {
        if min > max {
            return Err(ScrambleError::EmptyRange { min, max });
        }
        let value = *self
            .values
            .get(self.cursor)
            .ok_or(ScrambleError::RandomSourceExhausted { draws: self.cursor })?;
        self.cursor += 1;

        let span = max as i128 - min as i128 + 1;
        let offset = (value as i128 - min as i128).rem_euclid(span);
        Ok((min as i128 + offset) as i64)
    }
}
