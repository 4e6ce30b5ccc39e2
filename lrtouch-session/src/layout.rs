use lrtouch_core::{Layout, Trial};
use rand::Rng;

/// Fresh left/right placement for one presentation of `trial`.
///
/// Each call flips its own fair coin, so repeated presentations of the same
/// trial are independent.
pub fn compute_layout<R: Rng + ?Sized>(trial: &Trial, rng: &mut R) -> Layout {
    Layout::arrange(trial, rng.random_bool(0.5))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lrtouch_catalog::ImageCatalog;
    use lrtouch_core::Side;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // chi-square critical value, 1 degree of freedom, p = 0.001
    const CHI2_CRIT: f64 = 10.828;

    #[test]
    fn target_side_is_balanced() {
        let mut catalog = ImageCatalog::default();
        let trial = Trial::new("cat", "dog", &mut catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 4000;
        let left = (0..n)
            .filter(|_| compute_layout(&trial, &mut rng).correct_side == Side::Left)
            .count() as f64;
        let expected = n as f64 / 2.0;
        let right = n as f64 - left;
        let chi2 = (left - expected).powi(2) / expected + (right - expected).powi(2) / expected;
        assert!(chi2 < CHI2_CRIT, "left={left} chi2={chi2}");
    }

    proptest! {
        #[test]
        fn layout_holds_exactly_the_pair(target in "[a-z]{1,8}", distractor in "[A-Z]{1,8}", seed in any::<u64>()) {
            let mut catalog = ImageCatalog::default();
            let trial = Trial::new(&target, &distractor, &mut catalog).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let layout = compute_layout(&trial, &mut rng);
            let mut shown = [layout.left.to_string(), layout.right.to_string()];
            let mut pair = [target.clone(), distractor.clone()];
            shown.sort();
            pair.sort();
            prop_assert_eq!(shown, pair);
            prop_assert_eq!(layout.image_on(layout.correct_side), &trial.target);
        }
    }
}
