//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (period + 1).
//! Seed: EMA[0] = close[0], so there is no absent prefix.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }

    /// Smoothing factor derived from the nominal window.
    pub fn alpha(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let alpha = self.alpha();
        let mut prev: Option<f64> = None;

        closes
            .iter()
            .map(|&close| {
                let ema = match prev {
                    None => close,
                    Some(p) => alpha * close + (1.0 - alpha) * p,
                };
                prev = Some(ema);
                Some(ema)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_period_1_equals_close() {
        let result = Ema::new(1).compute(&[100.0, 200.0, 300.0]);
        assert_approx(result[0].unwrap(), 100.0, DEFAULT_EPSILON);
        assert_approx(result[1].unwrap(), 200.0, DEFAULT_EPSILON);
        assert_approx(result[2].unwrap(), 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_3_known_values() {
        // Closes: 10, 11, 12, 13
        // alpha = 2/(3+1) = 0.5
        // EMA[0] = 10
        // EMA[1] = 0.5*11 + 0.5*10   = 10.5
        // EMA[2] = 0.5*12 + 0.5*10.5 = 11.25
        // EMA[3] = 0.5*13 + 0.5*11.25 = 12.125
        let result = Ema::new(3).compute(&[10.0, 11.0, 12.0, 13.0]);
        assert_eq!(result[0], Some(10.0));
        assert_approx(result[1].unwrap(), 10.5, DEFAULT_EPSILON);
        assert_approx(result[2].unwrap(), 11.25, DEFAULT_EPSILON);
        assert_approx(result[3].unwrap(), 12.125, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_has_no_absent_prefix() {
        let result = Ema::new(20).compute(&[5.0, 6.0, 7.0]);
        assert!(result.iter().all(|v| v.is_some()));
        assert_eq!(result[0], Some(5.0));
    }

    #[test]
    fn ema_alpha_and_lookback() {
        assert_approx(Ema::new(10).alpha(), 2.0 / 11.0, DEFAULT_EPSILON);
        assert_approx(Ema::new(20).alpha(), 2.0 / 21.0, DEFAULT_EPSILON);
        assert_eq!(Ema::new(20).lookback(), 0);
        assert_eq!(Ema::new(20).name(), "ema_20");
    }

    #[test]
    fn ema_empty_series() {
        assert!(Ema::new(10).compute(&[]).is_empty());
    }
}
