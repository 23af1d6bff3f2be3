/// Exponential Moving Average in the recursive, non-adjusted form
/// `ema = alpha * x + (1 - alpha) * ema_prev`, seeded with the first value.
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f64,
    ema: Option<f64>,
}

impl Ema {
    /// Span-based smoothing, `alpha = 2 / (span + 1)`.
    pub fn new(span: usize) -> Self {
        assert!(span > 0, "EMA span must be > 0");
        Self::with_alpha(2.0 / (span as f64 + 1.0))
    }

    /// Direct smoothing factor, e.g. `1/14` for Wilder-style averages.
    pub fn with_alpha(alpha: f64) -> Self {
        assert!(
            alpha > 0.0 && alpha <= 1.0,
            "EMA alpha must be in (0, 1]"
        );
        Self { alpha, ema: None }
    }

    pub fn push(&mut self, value: f64) -> f64 {
        let next = match self.ema {
            Some(prev) => self.alpha * value + (1.0 - self.alpha) * prev,
            None => value,
        };
        self.ema = Some(next);
        next
    }

    pub fn value(&self) -> Option<f64> {
        self.ema
    }

    pub fn is_ready(&self) -> bool {
        self.ema.is_some()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

/// Runs `ema` across a column. Leading undefined rows stay undefined; later
/// undefined rows repeat the previous average.
pub fn ema_series(values: &[Option<f64>], mut ema: Ema) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|value| match value {
            Some(v) => Some(ema.push(*v)),
            None => ema.value(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_from_first_value() {
        let mut ema = Ema::new(3);
        assert_eq!(ema.value(), None);
        assert!((ema.push(10.0) - 10.0).abs() < f64::EPSILON);
        // alpha = 0.5
        assert!((ema.push(20.0) - 15.0).abs() < f64::EPSILON);
        assert!((ema.push(20.0) - 17.5).abs() < f64::EPSILON);
    }

    #[test]
    fn series_carries_through_gaps() {
        let values = vec![None, Some(4.0), None, Some(8.0)];
        let out = ema_series(&values, Ema::with_alpha(0.5));
        assert_eq!(out, vec![None, Some(4.0), Some(4.0), Some(6.0)]);
    }

    #[test]
    #[should_panic(expected = "EMA alpha must be in (0, 1]")]
    fn zero_alpha_panics() {
        Ema::with_alpha(0.0);
    }
}
