use crate::series::observation::{CumulativePoint, ReturnObservation, SeriesError};

//validates returns eagerly, in index order; first violation wins
fn validate(series: &[ReturnObservation]) -> Result<(), SeriesError> {
    for (index, obs) in series.iter().enumerate() {
        if !obs.periodic_return.is_finite() || obs.periodic_return <= -1.0 {
            return Err(SeriesError::InvalidReturn {
                index,
                value: obs.periodic_return,
            });
        }

        if index > 0 && obs.timestamp <= series[index - 1].timestamp {
            return Err(SeriesError::UnorderedSeries { index });
        }
    }

    Ok(())
}

//compounds a series of periodic returns into cumulative returns
//cum[0] = r[0], cum[i] = (1 + cum[i-1]) * (1 + r[i]) - 1
pub fn compound(series: &[ReturnObservation]) -> Result<Vec<CumulativePoint>, SeriesError> {
    validate(series)?;

    let mut curve = Vec::with_capacity(series.len());
    let mut prev = 0.0;

    for (i, obs) in series.iter().enumerate() {
        //anchored at the first period's return, not at zero
        let cumulative = if i == 0 {
            obs.periodic_return
        } else {
            (1.0 + prev) * (1.0 + obs.periodic_return) - 1.0
        };

        curve.push(CumulativePoint::new(obs.timestamp, cumulative));
        prev = cumulative;
    }

    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn series(returns: &[f64]) -> Vec<ReturnObservation> {
        returns
            .iter()
            .enumerate()
            .map(|(i, &r)| ReturnObservation::new(day(i as u32 + 1), r))
            .collect()
    }

    #[test]
    fn test_first_element_identity() {
        let curve = compound(&series(&[0.037, -0.002, 0.011])).unwrap();
        assert_eq!(curve[0].cumulative_return, 0.037);
    }

    #[test]
    fn test_recurrence_law() {
        let input = series(&[0.01, -0.03, 0.025, 0.0, 0.004]);
        let curve = compound(&input).unwrap();

        for i in 1..curve.len() {
            let lhs = 1.0 + curve[i].cumulative_return;
            let rhs = (1.0 + curve[i - 1].cumulative_return) * (1.0 + input[i].periodic_return);
            assert!((lhs - rhs).abs() <= 1e-9 * rhs.abs());
        }
    }

    #[test]
    fn test_zero_returns_stay_zero() {
        let curve = compound(&series(&[0.0, 0.0, 0.0, 0.0])).unwrap();
        assert!(curve.iter().all(|p| p.cumulative_return == 0.0));
    }

    #[test]
    fn test_positive_returns_grow_monotonically() {
        let curve = compound(&series(&[0.01, 0.002, 0.05, 0.013])).unwrap();

        for i in 1..curve.len() {
            assert!(curve[i].cumulative_return > curve[i - 1].cumulative_return);
        }
    }

    #[test]
    fn test_empty_series() {
        let curve = compound(&[]).unwrap();
        assert!(curve.is_empty());
    }

    #[test]
    fn test_concrete_scenario() {
        //0.01; (1.01 * 1.02) - 1 = 0.0302; (1.0302 * 0.99) - 1 = 0.019898
        let curve = compound(&series(&[0.01, 0.02, -0.01])).unwrap();
        let expected = [0.01, 0.0302, 0.019898];

        assert_eq!(curve.len(), 3);
        for (point, want) in curve.iter().zip(expected) {
            assert!((point.cumulative_return - want).abs() < 1e-6);
        }
    }

    #[test]
    fn test_timestamps_preserved_in_order() {
        let input = series(&[0.01, 0.02, 0.03]);
        let curve = compound(&input).unwrap();

        for (obs, point) in input.iter().zip(&curve) {
            assert_eq!(obs.timestamp, point.timestamp);
        }
    }

    #[test]
    fn test_total_loss_rejected() {
        let result = compound(&series(&[-1.5]));
        assert!(matches!(
            result,
            Err(SeriesError::InvalidReturn { index: 0, .. })
        ));

        let result = compound(&series(&[0.01, -1.0]));
        assert!(matches!(
            result,
            Err(SeriesError::InvalidReturn { index: 1, .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = compound(&series(&[0.01, f64::NAN]));
        assert!(matches!(
            result,
            Err(SeriesError::InvalidReturn { index: 1, .. })
        ));

        let result = compound(&series(&[f64::INFINITY]));
        assert!(matches!(
            result,
            Err(SeriesError::InvalidReturn { index: 0, .. })
        ));
    }

    #[test]
    fn test_unordered_timestamps_rejected() {
        let duplicate = vec![
            ReturnObservation::new(day(1), 0.01),
            ReturnObservation::new(day(1), 0.02),
        ];
        assert!(matches!(
            compound(&duplicate),
            Err(SeriesError::UnorderedSeries { index: 1 })
        ));

        let backwards = vec![
            ReturnObservation::new(day(5), 0.01),
            ReturnObservation::new(day(4), 0.02),
        ];
        assert!(matches!(
            compound(&backwards),
            Err(SeriesError::UnorderedSeries { index: 1 })
        ));
    }

    #[test]
    fn test_no_partial_output_on_failure() {
        //validation runs before any compounding, so a late poison value
        //fails the whole call
        let result = compound(&series(&[0.01, 0.02, f64::NAN]));
        assert!(result.is_err());
    }
}
