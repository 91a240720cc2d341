//! Periodic tick gate

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Gate for a callback which should run every `period_cycles` executive
/// cycles, but only while armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ticker {
    period_cycles: u32,
    armed: bool,
    elapsed_cycles: u32,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Ticker {
    /// Create a new disarmed ticker. A period of zero is treated as one.
    pub fn new(period_cycles: u32) -> Self {
        Self {
            period_cycles: period_cycles.max(1),
            armed: false,
            elapsed_cycles: 0,
        }
    }

    /// Arm the ticker. Arming an already armed ticker keeps its phase.
    pub fn arm(&mut self) {
        if !self.armed {
            self.armed = true;
            self.elapsed_cycles = 0;
        }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.elapsed_cycles = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period_cycles(&self) -> u32 {
        self.period_cycles
    }

    /// Advance by one cycle, returning `true` if the tick fires on this cycle.
    pub fn poll(&mut self) -> bool {
        if !self.armed {
            return false;
        }

        self.elapsed_cycles += 1;

        if self.elapsed_cycles >= self.period_cycles {
            self.elapsed_cycles = 0;
            true
        }
        else {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn count_fires(ticker: &mut Ticker, cycles: usize) -> usize {
        (0..cycles).filter(|_| ticker.poll()).count()
    }

    #[test]
    fn test_disarmed_never_fires() {
        let mut t = Ticker::new(10);

        assert_eq!(count_fires(&mut t, 100), 0);
    }

    #[test]
    fn test_fires_every_period() {
        let mut t = Ticker::new(10);
        t.arm();

        // First fire on the tenth poll after arming
        assert_eq!(count_fires(&mut t, 9), 0);
        assert!(t.poll());
        assert_eq!(count_fires(&mut t, 30), 3);
    }

    #[test]
    fn test_rearm_keeps_phase() {
        let mut t = Ticker::new(4);
        t.arm();
        assert_eq!(count_fires(&mut t, 3), 0);

        t.arm();
        assert!(t.poll());
    }

    #[test]
    fn test_disarm_resets_phase() {
        let mut t = Ticker::new(4);
        t.arm();
        assert_eq!(count_fires(&mut t, 3), 0);

        t.disarm();
        assert!(!t.is_armed());
        assert!(!t.poll());

        t.arm();
        assert_eq!(count_fires(&mut t, 3), 0);
        assert!(t.poll());
    }

    #[test]
    fn test_zero_period() {
        let mut t = Ticker::new(0);
        t.arm();

        assert_eq!(t.period_cycles(), 1);
        assert_eq!(count_fires(&mut t, 5), 5);
    }
}
