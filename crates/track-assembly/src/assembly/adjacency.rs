//! Neighbor adjacency over the assembled chain.
//!
//! Counter-clockwise chains link `i → i+1`, clockwise chains `i → i−1`, both
//! wrapping around, so the links form a single cycle.

use crate::geom::Winding;

/// Forward neighbor of link `i` in a chain of `n` links.
///
/// Pre: `i < n`.
#[inline]
pub fn next_index(winding: Winding, i: usize, n: usize) -> usize {
    debug_assert!(i < n);
    match winding {
        Winding::CounterClockwise => (i + 1) % n,
        Winding::Clockwise => (i + n - 1) % n,
    }
}

/// `next[i]` for every link.
pub fn neighbors(winding: Winding, n: usize) -> Vec<usize> {
    (0..n).map(|i| next_index(winding, i, n)).collect()
}

/// Call `connect(i, next)` once per link, in index order.
pub fn connect_neighbors<F: FnMut(usize, usize)>(winding: Winding, n: usize, mut connect: F) {
    for i in 0..n {
        connect(i, next_index(winding, i, n));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ccw_links_forward_with_wraparound() {
        assert_eq!(neighbors(Winding::CounterClockwise, 4), vec![1, 2, 3, 0]);
    }

    #[test]
    fn cw_links_backward_with_wraparound() {
        assert_eq!(neighbors(Winding::Clockwise, 4), vec![3, 0, 1, 2]);
    }

    #[test]
    fn single_link_is_its_own_neighbor() {
        assert_eq!(neighbors(Winding::CounterClockwise, 1), vec![0]);
        assert_eq!(neighbors(Winding::Clockwise, 1), vec![0]);
    }

    #[test]
    fn adjacency_is_one_cycle() {
        for w in [Winding::CounterClockwise, Winding::Clockwise] {
            let n = 37;
            let next = neighbors(w, n);
            let mut seen = vec![false; n];
            let mut i = 0;
            for _ in 0..n {
                assert!(!seen[i]);
                seen[i] = true;
                i = next[i];
            }
            assert_eq!(i, 0);
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn connect_visits_in_index_order() {
        let mut pairs = Vec::new();
        connect_neighbors(Winding::Clockwise, 3, |i, j| pairs.push((i, j)));
        assert_eq!(pairs, vec![(0, 2), (1, 0), (2, 1)]);
    }
}
