//! Interpolated precision.
//!
//! Interpolated precision at recall `r` is the highest precision observed at
//! any recall `>= r`. With rows sorted by ascending recall this is a suffix
//! maximum over the precision column. Two routes to it are kept:
//!
//! * [`interpolate`] – backward pass with a strict `>` comparison;
//! * [`envelope`] – running maximum over the reversed column.
//!
//! They agree on NaN-free input. A NaN precision is left in place by
//! [`interpolate`] but spreads to every earlier index in [`envelope`].

/// Backward pass: each entry becomes the max of itself and the entry after it.
///
/// Only positional adjacency matters; `recall` is accepted so callers pass
/// the pair they plot, and its values are not inspected.
pub fn interpolate(precision: &[f64], recall: &[f64]) -> Vec<f64> {
    debug_assert_eq!(precision.len(), recall.len());
    let mut interpolated = precision.to_vec();
    for i in (0..interpolated.len().saturating_sub(1)).rev() {
        if interpolated[i + 1] > interpolated[i] {
            interpolated[i] = interpolated[i + 1];
        }
    }
    interpolated
}

/// Reversed running maximum: element `i` is `max(precision[i..])`.
pub fn envelope(precision: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = precision
        .iter()
        .rev()
        .scan(f64::NEG_INFINITY, |acc, &p| {
            *acc = if acc.is_nan() || p.is_nan() {
                f64::NAN
            } else {
                acc.max(p)
            };
            Some(*acc)
        })
        .collect();
    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn interp(p: &[f64]) -> Vec<f64> {
        let recall: Vec<f64> = (0..p.len()).map(|i| i as f64 / 10.0).collect();
        interpolate(p, &recall)
    }

    fn suffix_max(p: &[f64], i: usize) -> f64 {
        p[i..].iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    #[test]
    fn fills_dips_from_the_right() {
        assert_eq!(
            interp(&[0.5, 0.8, 0.3, 0.9, 0.2]),
            vec![0.9, 0.9, 0.9, 0.9, 0.2]
        );
    }

    #[test]
    fn constant_input_is_unchanged() {
        assert_eq!(interp(&[0.1, 0.1, 0.1]), vec![0.1, 0.1, 0.1]);
    }

    #[test]
    fn empty_and_single() {
        assert!(interp(&[]).is_empty());
        assert_eq!(interp(&[0.42]), vec![0.42]);
        assert!(envelope(&[]).is_empty());
        assert_eq!(envelope(&[0.42]), vec![0.42]);
    }

    #[test]
    fn every_entry_is_the_suffix_maximum() {
        let inputs: [&[f64]; 4] = [
            &[0.2, 0.1, 0.4, 0.3, 0.05, 0.3],
            &[1.0, 0.0, 1.0, 0.0],
            &[0.0, 0.25, 0.5, 0.75, 1.0],
            &[0.9, 0.7, 0.7, 0.1],
        ];
        for p in inputs {
            let out = interp(p);
            assert_eq!(out.len(), p.len());
            for i in 0..p.len() {
                assert_eq!(out[i], suffix_max(p, i), "input {p:?}, index {i}");
            }
        }
    }

    #[test]
    fn suffix_max_sequence_is_a_fixed_point() {
        let p = [0.9, 0.8, 0.8, 0.3, 0.1];
        assert_eq!(interp(&p), p.to_vec());
    }

    #[test]
    fn idempotent() {
        let once = interp(&[0.3, 0.6, 0.2, 0.5, 0.4, 0.1]);
        assert_eq!(interp(&once), once);
    }

    #[test]
    fn envelope_matches_interpolation_without_nan() {
        let p = [0.5, 0.8, 0.3, 0.9, 0.2, 0.25, 0.1];
        assert_eq!(envelope(&p), interp(&p));
    }

    #[test]
    fn nan_handling_differs_between_the_two_routes() {
        let p = [0.2, f64::NAN, 0.5, 0.1];

        let i = interp(&p);
        assert_eq!(i[0], 0.2);
        assert!(i[1].is_nan());
        assert_eq!(i[2..], [0.5, 0.1]);

        let e = envelope(&p);
        assert!(e[0].is_nan());
        assert!(e[1].is_nan());
        assert_eq!(e[2..], [0.5, 0.1]);
    }

    proptest! {
        #[test]
        fn output_is_suffix_maximum(p in vec(0.0..=1.0f64, 0..64)) {
            let out = interp(&p);
            prop_assert_eq!(out.len(), p.len());
            for i in 0..p.len() {
                prop_assert_eq!(out[i], suffix_max(&p, i));
            }
        }

        #[test]
        fn interpolation_is_idempotent(p in vec(0.0..=1.0f64, 0..64)) {
            let once = interp(&p);
            prop_assert_eq!(interp(&once), once);
        }

        #[test]
        fn envelope_agrees_with_interpolation(p in vec(0.0..=1.0f64, 0..64)) {
            prop_assert_eq!(envelope(&p), interp(&p));
        }
    }
}
