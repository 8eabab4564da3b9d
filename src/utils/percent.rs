//! Percentage helpers shared by grades and dashboards

/// Rounds to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, rounded; zero when `whole` is not positive
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    round2(part / whole * 100.0)
}

/// Integer ratio as a rounded percentage
pub fn ratio(part: u64, whole: u64) -> f64 {
    percentage(part as f64, whole as f64)
}

/// Rounded arithmetic mean; zero for an empty input
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0u64), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        round2(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_by_zero_yields_zero() {
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(ratio(3, 0), 0.0);
        assert_eq!(mean(Vec::new()), 0.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(ratio(1, 3), 33.33);
        assert_eq!(ratio(2, 3), 66.67);
        assert_eq!(percentage(17.0, 20.0), 85.0);
        assert_eq!(mean([50.0, 100.0]), 75.0);
    }
}
