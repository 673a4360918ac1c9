//! Rolling window of predicted rows
//!
//! The corrector at row `k` needs the predicted rows `k − 1`, `k` and
//! `k + 1`, and the predictor runs one row ahead of it. Keeping just those
//! three rows bounds the predictor's storage independently of the grid
//! size.

/// Three-slot ring buffer
///
/// After `push(a); push(b); push(c)` the window reads
/// `previous = a`, `current = b`, `incoming = c`.
///
/// # Example
///
/// ```rust
/// use pns_rs::solver::PredictorWindow;
///
/// let mut window = PredictorWindow::filled(0);
/// for value in 1..=4 {
///     window.push(value);
/// }
/// assert_eq!((window.previous(), window.current(), window.incoming()), (2, 3, 4));
/// ```
#[derive(Debug, Clone)]
pub struct PredictorWindow<T: Copy> {
    slots: [T; 3],
    /// Slot holding the most recent push
    head: usize,
}

impl<T: Copy> PredictorWindow<T> {
    /// Window with every slot set to `value`
    pub fn filled(value: T) -> Self {
        Self { slots: [value; 3], head: 2 }
    }

    /// Insert `value` as the incoming row; the oldest row drops out
    pub fn push(&mut self, value: T) {
        self.head = (self.head + 1) % 3;
        self.slots[self.head] = value;
    }

    /// Row pushed two pushes ago
    pub fn previous(&self) -> T {
        self.slots[(self.head + 1) % 3]
    }

    /// Row pushed one push ago
    pub fn current(&self) -> T {
        self.slots[(self.head + 2) % 3]
    }

    /// Most recently pushed row
    pub fn incoming(&self) -> T {
        self.slots[self.head]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_window_reads_fill_value() {
        let window = PredictorWindow::filled(7.5);
        assert_eq!(window.previous(), 7.5);
        assert_eq!(window.current(), 7.5);
        assert_eq!(window.incoming(), 7.5);
    }

    #[test]
    fn test_push_shifts_slots() {
        let mut window = PredictorWindow::filled(0);

        window.push(1);
        assert_eq!((window.previous(), window.current(), window.incoming()), (0, 0, 1));

        window.push(2);
        assert_eq!((window.previous(), window.current(), window.incoming()), (0, 1, 2));

        window.push(3);
        assert_eq!((window.previous(), window.current(), window.incoming()), (1, 2, 3));
    }

    #[test]
    fn test_long_sequence_keeps_last_three() {
        let mut window = PredictorWindow::filled(0usize);
        for value in 1..=100 {
            window.push(value);
            if value >= 3 {
                assert_eq!(window.previous(), value - 2);
                assert_eq!(window.current(), value - 1);
                assert_eq!(window.incoming(), value);
            }
        }
    }
}
