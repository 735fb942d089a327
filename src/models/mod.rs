use serde::{Deserialize, Serialize};

/// One bar of a generated market series.
///
/// Bars are indexed densely from 0; there are no timestamps because the
/// series is synthetic and gap-free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub index: usize,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Fractional return that produced this bar's close from the prior close.
    pub return_pct: f64,
}

/// Strategy exposure state. The crossover strategy is long/flat only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Flat,
    Long,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_point_creation() {
        let bar = PricePoint {
            index: 0,
            open: 100.0,
            high: 101.2,
            low: 99.5,
            close: 100.8,
            return_pct: 0.008,
        };

        assert_eq!(bar.index, 0);
        assert!(bar.low <= bar.open.min(bar.close));
        assert!(bar.high >= bar.open.max(bar.close));
    }

    #[test]
    fn test_position_equality() {
        assert_eq!(Position::Flat, Position::Flat);
        assert_ne!(Position::Flat, Position::Long);
    }
}
