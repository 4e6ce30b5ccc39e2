use rand::Rng;
use rand::seq::SliceRandom;

/// A uniformly random permutation of `items`; the input is left as is.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut order = items.to_vec();
    order.shuffle(rng);
    order
}
