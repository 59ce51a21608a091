use std::fmt;
use std::time::Duration;

/// One of the three lamps of the signal head.
///
/// Dwell times and the successor table live here so the controller and the
/// countdown reporter read the same numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Red,
    Yellow,
    Green,
}

impl Phase {
    /// Phases in the order the controller drives them.
    pub const CYCLE: [Self; 3] = [Self::Red, Self::Yellow, Self::Green];

    pub const INITIAL: Self = Self::Red;

    pub const fn dwell(self) -> Duration {
        Duration::from_secs(self.dwell_secs())
    }

    /// Whole seconds the phase stays lit; the countdown starts from this value.
    pub const fn dwell_secs(self) -> u64 {
        match self {
            Self::Red => 5,
            Self::Yellow => 2,
            Self::Green => 5,
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Red => Self::Yellow,
            Self::Yellow => Self::Green,
            Self::Green => Self::Red,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Yellow => "YELLOW",
            Self::Green => "GREEN",
        }
    }

    /// Advisory shown to drivers while the phase is active.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Red => "Stop! Red signal.",
            Self::Yellow => "Caution! Signal about to change.",
            Self::Green => "Go ahead! Green signal.",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successor_follows_cycle_order() {
        for (idx, phase) in Phase::CYCLE.iter().enumerate() {
            let expected = Phase::CYCLE[(idx + 1) % Phase::CYCLE.len()];
            assert_eq!(phase.next(), expected, "successor of {phase}");
        }
        assert_eq!(Phase::CYCLE[0], Phase::INITIAL);
    }

    #[test]
    fn dwell_table_matches_reference_timing() {
        assert_eq!(Phase::Red.dwell(), Duration::from_secs(5));
        assert_eq!(Phase::Yellow.dwell(), Duration::from_secs(2));
        assert_eq!(Phase::Green.dwell(), Duration::from_secs(5));
        let full_cycle: Duration = Phase::CYCLE.iter().map(|p| p.dwell()).sum();
        assert_eq!(full_cycle, Duration::from_secs(12));
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(Phase::Yellow.to_string(), "YELLOW");
        assert_eq!(format!("{}", Phase::Green), "GREEN");
    }
}
