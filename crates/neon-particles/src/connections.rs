//! Nearest-neighbour connections between particles.

use std::collections::HashSet;

use glam::Vec3;

/// A line between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Lower particle index.
    pub a: usize,
    /// Higher particle index.
    pub b: usize,
    /// 1.0 when the particles coincide, approaching 0.0 at the cutoff distance.
    pub strength: f32,
}

/// Connect every point to at most `k_nearest` other points strictly closer
/// than `max_distance`.
///
/// Brute force O(n²): fine for the tens to low hundreds of particles a
/// terminal holds. An edge picked by both endpoints is emitted once.
pub fn nearest_connections(
    positions: &[Vec3],
    max_distance: f32,
    k_nearest: usize,
) -> Vec<Connection> {
    if k_nearest == 0 || max_distance <= 0.0 || positions.len() < 2 {
        return Vec::new();
    }

    let max_sq = max_distance * max_distance;
    let mut seen = HashSet::new();
    let mut connections = Vec::new();
    let mut candidates: Vec<(f32, usize)> = Vec::new();

    for (i, a) in positions.iter().enumerate() {
        candidates.clear();
        candidates.extend(
            positions
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(j, b)| (a.distance_squared(*b), j))
                .filter(|&(dist_sq, _)| dist_sq < max_sq),
        );
        candidates.sort_unstable_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)));

        for &(dist_sq, j) in candidates.iter().take(k_nearest) {
            let key = (i.min(j), i.max(j));
            if seen.insert(key) {
                connections.push(Connection {
                    a: key.0,
                    b: key.1,
                    strength: 1.0 - dist_sq.sqrt() / max_distance,
                });
            }
        }
    }

    connections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize, spacing: f32) -> Vec<Vec3> {
        (0..n)
            .map(|i| Vec3::new(i as f32 * spacing, 0.0, 0.0))
            .collect()
    }

    #[test]
    fn test_respects_max_distance() {
        let points = line(5, 2.0);
        let connections = nearest_connections(&points, 2.5, 3);
        // Only direct neighbours are within 2.5.
        assert_eq!(connections.len(), 4);
        for c in &connections {
            assert_eq!(c.b - c.a, 1);
            assert!((c.strength - 0.2).abs() < 1e-5);
        }
    }

    #[test]
    fn test_distance_cutoff_is_strict() {
        let points = line(2, 2.0);
        assert!(nearest_connections(&points, 2.0, 3).is_empty());
    }

    #[test]
    fn test_k_nearest_per_source() {
        // Gaps of 1, 2, 3, 4: each point's single nearest neighbour is the
        // point to its left, except the first which picks the second.
        let points: Vec<Vec3> = [0.0, 1.0, 3.0, 6.0, 10.0]
            .into_iter()
            .map(|x| Vec3::new(x, 0.0, 0.0))
            .collect();
        let connections = nearest_connections(&points, 100.0, 1);
        let pairs: Vec<_> = connections.iter().map(|c| (c.a, c.b)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn test_edge_count_is_bounded() {
        let points: Vec<Vec3> = (0..20)
            .map(|i| Vec3::new((i % 5) as f32, (i / 5) as f32, 0.0))
            .collect();
        let connections = nearest_connections(&points, 100.0, 3);
        assert!(connections.len() <= points.len() * 3);
        assert!(!connections.is_empty());
    }

    #[test]
    fn test_pairs_are_unique() {
        let points = line(10, 1.0);
        let connections = nearest_connections(&points, 5.0, 3);
        let unique: HashSet<_> = connections.iter().map(|c| (c.a, c.b)).collect();
        assert_eq!(unique.len(), connections.len());
        assert!(connections.iter().all(|c| c.a < c.b));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(nearest_connections(&[], 10.0, 3).is_empty());
        assert!(nearest_connections(&[Vec3::ZERO], 10.0, 3).is_empty());
        assert!(nearest_connections(&line(4, 1.0), 10.0, 0).is_empty());
        assert!(nearest_connections(&line(4, 1.0), 0.0, 3).is_empty());
    }
}
