use std::collections::VecDeque;

/// Number of closing prices retained for indicator computation
pub const HISTORY_CAPACITY: usize = 100;

/// Bounded FIFO window of closing prices, oldest first.
///
/// Owned by a single stream processor; it is never shared across tasks.
#[derive(Debug, Clone, Default)]
pub struct PriceHistory {
    prices: VecDeque<f64>,
}

impl PriceHistory {
    pub fn new() -> Self {
        Self {
            prices: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Append the newest close, evicting the oldest entries beyond capacity.
    pub fn append(&mut self, price: f64) {
        self.prices.push_back(price);
        while self.prices.len() > HISTORY_CAPACITY {
            self.prices.pop_front();
        }
    }

    /// Ordered copy of the current window.
    pub fn snapshot(&self) -> Vec<f64> {
        self.prices.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<f64> {
        self.prices.back().copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        HISTORY_CAPACITY
    }
}
