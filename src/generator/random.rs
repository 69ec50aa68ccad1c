use rand::prelude::IndexedRandom;
use rand::Rng;

/// Picks one item uniformly, drawing from the thread-local OS-seeded generator.
///
/// Returns `None` only when `items` is empty.
pub fn pick_random<T>(items: &[T]) -> Option<&T> {
    pick_random_with(items, &mut rand::rng())
}

pub fn pick_random_with<'a, T>(items: &'a [T], rng: &mut impl Rng) -> Option<&'a T> {
    items.choose(rng)
}

/// Independent picks, so the same item may come back more than once.
pub fn pick_many<T>(items: &[T], count: usize) -> Vec<&T> {
    let mut rng = rand::rng();
    (0..count)
        .filter_map(|_| pick_random_with(items, &mut rng))
        .collect()
}
