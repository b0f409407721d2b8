//! Fixed-capacity sample ring buffer with a full-window average.
//!
//! The buffer is zero-filled at construction and never has a partial
//! state: [`SampleBuffer::average`] always divides by the full capacity
//! `N`, so the first readings after start-up are pulled towards zero.

use core::ops::{Add, Div};

/// Numeric sample type stored in a [`SampleBuffer`].
///
/// The average is computed in the sample's own precision.
pub trait Sample: Copy + Add<Output = Self> + Div<Output = Self> {
    const ZERO: Self;

    /// Convert the window length into the sample type for the division.
    fn from_count(n: usize) -> Self;
}

impl Sample for f32 {
    const ZERO: Self = 0.0;

    fn from_count(n: usize) -> Self {
        n as f32
    }
}

impl Sample for f64 {
    const ZERO: Self = 0.0;

    fn from_count(n: usize) -> Self {
        n as f64
    }
}

/// Circular buffer of the `N` most recent samples.
#[derive(Debug, Clone)]
pub struct SampleBuffer<T: Sample, const N: usize> {
    ring: [T; N],
    head: usize,
}

impl<T: Sample, const N: usize> SampleBuffer<T, N> {
    const NON_EMPTY: () = assert!(N > 0, "SampleBuffer capacity must be > 0");

    /// Window length.
    pub const CAPACITY: usize = N;

    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self {
            ring: [T::ZERO; N],
            head: 0,
        }
    }

    /// Overwrite the oldest slot with `value`.
    pub fn push(&mut self, value: T) {
        self.ring[self.head] = value;
        self.head = (self.head + 1) % N;
    }

    /// Mean of all `N` slots.
    pub fn average(&self) -> T {
        let sum = self.ring.iter().fold(T::ZERO, |acc, &v| acc + v);
        sum / T::from_count(N)
    }

    /// Slot the next `push` will overwrite.
    pub fn write_index(&self) -> usize {
        self.head
    }
}

impl<T: Sample, const N: usize> Default for SampleBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
