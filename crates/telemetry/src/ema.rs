/// Exponential moving average step: `alpha * raw + (1 - alpha) * previous`.
#[inline]
#[must_use]
pub fn ema(raw: f64, previous: f64, alpha: f64) -> f64 {
    alpha * raw + (1.0 - alpha) * previous
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_one_tracks_raw() {
        assert_eq!(ema(80.0, 20.0, 1.0), 80.0);
    }

    #[test]
    fn steady_input_is_a_fixed_point() {
        assert_eq!(ema(42.0, 42.0, 0.3), 42.0);
    }

    #[test]
    fn weights_previous_by_complement() {
        assert!((ema(60.0, 50.0, 0.3) - 53.0).abs() < 1e-9);
    }
}
