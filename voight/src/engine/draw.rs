//! Random draws from content pools.

use rand::Rng;

/// Draw `count` distinct items from `pool` by rejection sampling.
///
/// Picks a uniformly random index, discards picks already drawn, and repeats
/// until `count` unique items are collected, so the result order reflects
/// draw order rather than pool order. The caller must guarantee
/// `pool.len() >= count` (checked when the catalog loads); a short pool would
/// loop forever.
pub fn draw_unique<T: Clone + PartialEq>(pool: &[T], count: usize) -> Vec<T> {
    debug_assert!(
        pool.len() >= count,
        "pool of {} cannot yield {count} unique items",
        pool.len()
    );

    let mut rng = rand::rng();
    let mut drawn = Vec::with_capacity(count);

    while drawn.len() < count {
        let pick = &pool[rng.random_range(0..pool.len())];
        if drawn.contains(pick) {
            continue;
        }
        drawn.push(pick.clone());
    }

    drawn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_exact_count_of_distinct_items() {
        let pool: Vec<u32> = (0..10).collect();

        for _ in 0..50 {
            let drawn = draw_unique(&pool, 3);
            assert_eq!(drawn.len(), 3);
            for item in &drawn {
                assert!(pool.contains(item));
            }
            for (i, item) in drawn.iter().enumerate() {
                assert!(!drawn[..i].contains(item));
            }
        }
    }

    #[test]
    fn test_full_pool_draw_is_a_permutation() {
        let pool = vec!["a", "b", "c"];

        for _ in 0..20 {
            let mut drawn = draw_unique(&pool, 3);
            drawn.sort_unstable();
            assert_eq!(drawn, pool);
        }
    }

    #[test]
    fn test_zero_count_draws_nothing() {
        let drawn = draw_unique(&[1, 2, 3], 0);
        assert!(drawn.is_empty());

        let empty: Vec<u32> = Vec::new();
        assert!(draw_unique(&empty, 0).is_empty());
    }
}
