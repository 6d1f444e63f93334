//! Quote Picker: uniform random selection over a loaded collection.
//!
//! The random source is a type parameter so tests can plug in a seeded or
//! stepping generator while the binary uses the thread-local one.

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::models::Quote;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot pick a quote from an empty collection")]
pub struct EmptyCollectionError;

/// Choose one quote with equal probability for every index.
///
/// An empty slice returns [`EmptyCollectionError`] without touching `rng`.
pub fn pick<'a, R>(quotes: &'a [Quote], rng: &mut R) -> Result<&'a Quote, EmptyCollectionError>
where
    R: Rng + ?Sized,
{
    quotes.choose(rng).ok_or(EmptyCollectionError)
}

/// Owns the random source between picks. Nothing else is remembered, so the
/// same quote can come up twice in a row.
#[derive(Debug, Clone)]
pub struct QuotePicker<R = ThreadRng> {
    rng: R,
}

impl QuotePicker<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for QuotePicker<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> QuotePicker<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn pick<'a>(&mut self, quotes: &'a [Quote]) -> Result<&'a Quote, EmptyCollectionError> {
        pick(quotes, &mut self.rng)
    }
}
