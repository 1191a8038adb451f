//! Octree spatial partitioning.
//!
//! Divides a fixed world bound into hierarchical octants for sub-linear
//! proximity queries. Nodes subdivide lazily once they hold more points than
//! their capacity. The tree is rebuilt from scratch every tick: every tracked
//! position changes each step, so discarding the partition is cheaper than
//! repairing it.

use glam::Vec3;
use tracing::warn;

use arena_core::types::Aabb;

/// Configuration for octree behavior.
#[derive(Debug, Clone, Copy)]
pub struct OctreeConfig {
    /// Points a leaf holds before it subdivides.
    pub node_capacity: usize,
    /// Leaves at this depth never subdivide.
    pub max_depth: u32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            node_capacity: arena_core::constants::OCTREE_NODE_CAPACITY,
            max_depth: arena_core::constants::OCTREE_MAX_DEPTH,
        }
    }
}

#[derive(Debug)]
struct Node<T> {
    bounds: Aabb,
    points: Vec<(Vec3, T)>,
    children: Option<Box<[Node<T>; 8]>>,
    depth: u32,
}

impl<T: Copy> Node<T> {
    fn new(bounds: Aabb, depth: u32) -> Self {
        Self {
            bounds,
            points: Vec::new(),
            children: None,
            depth,
        }
    }

    fn insert(&mut self, point: Vec3, payload: T, config: &OctreeConfig) {
        if let Some(children) = self.children.as_mut() {
            let octant = self.bounds.octant_of(point);
            children[octant].insert(point, payload, config);
            return;
        }

        self.points.push((point, payload));
        if self.points.len() > config.node_capacity && self.depth < config.max_depth {
            self.subdivide(config);
        }
    }

    /// Split into 8 children and push every held point down one level.
    fn subdivide(&mut self, config: &OctreeConfig) {
        let bounds = self.bounds;
        let depth = self.depth + 1;
        let mut children: Box<[Node<T>; 8]> =
            Box::new(std::array::from_fn(|i| Node::new(bounds.octant(i), depth)));

        for (point, payload) in self.points.drain(..) {
            children[bounds.octant_of(point)].insert(point, payload, config);
        }
        self.children = Some(children);
    }

    fn query(&self, range: &Aabb, out: &mut Vec<T>) {
        if !self.bounds.intersects(range) {
            return;
        }

        match &self.children {
            Some(children) => {
                for child in children.iter() {
                    child.query(range, out);
                }
            }
            None => {
                out.extend(
                    self.points
                        .iter()
                        .filter(|(point, _)| range.contains(*point))
                        .map(|(_, payload)| *payload),
                );
            }
        }
    }

    fn node_count(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map_or(0, |children| children.iter().map(Node::node_count).sum())
    }
}

/// Point octree over a fixed bound, storing copyable payloads (entity ids).
#[derive(Debug)]
pub struct Octree<T> {
    root: Node<T>,
    config: OctreeConfig,
    len: usize,
}

impl<T: Copy> Octree<T> {
    pub fn new(bounds: Aabb, config: OctreeConfig) -> Self {
        Self {
            root: Node::new(bounds, 0),
            config,
            len: 0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.root.bounds
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a point. Returns false, storing nothing, if the point is outside the bound.
    pub fn insert(&mut self, point: Vec3, payload: T) -> bool {
        if !self.root.bounds.contains(point) {
            warn!(?point, "octree insert outside bounds rejected");
            return false;
        }
        self.root.insert(point, payload, &self.config);
        self.len += 1;
        true
    }

    /// Payloads whose stored point lies inside `range`.
    pub fn query(&self, range: &Aabb) -> Vec<T> {
        let mut out = Vec::new();
        self.query_into(range, &mut out);
        out
    }

    /// Like [`Octree::query`], writing into a reused buffer. The buffer is cleared first.
    pub fn query_into(&self, range: &Aabb, out: &mut Vec<T>) {
        out.clear();
        self.root.query(range, out);
    }

    /// Drop every point and the whole subdivision tree.
    pub fn clear(&mut self) {
        self.root = Node::new(self.root.bounds, 0);
        self.len = 0;
    }

    /// Total nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn world() -> Aabb {
        Aabb::around(Vec3::ZERO, 50.0)
    }

    #[test]
    fn insert_outside_bounds_is_rejected() {
        let mut tree = Octree::new(world(), OctreeConfig::default());
        assert!(!tree.insert(Vec3::new(51.0, 0.0, 0.0), 1u32));
        assert!(tree.is_empty());
        assert!(tree.query(&world()).is_empty());
    }

    #[test]
    fn subdivides_only_past_capacity() {
        let config = OctreeConfig {
            node_capacity: 4,
            max_depth: 8,
        };
        let mut tree = Octree::new(world(), config);
        for i in 0..4 {
            tree.insert(Vec3::new(i as f32, 0.0, 0.0), i);
        }
        assert_eq!(tree.node_count(), 1);

        tree.insert(Vec3::new(-10.0, 0.0, 0.0), 4);
        assert_eq!(tree.node_count(), 9);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn coincident_points_stop_at_max_depth() {
        let config = OctreeConfig {
            node_capacity: 2,
            max_depth: 3,
        };
        let mut tree = Octree::new(world(), config);
        for i in 0..50 {
            assert!(tree.insert(Vec3::splat(1.0), i));
        }
        assert_eq!(tree.query(&Aabb::around(Vec3::splat(1.0), 0.01)).len(), 50);
    }

    #[test]
    fn clear_empties_tree() {
        let mut tree = Octree::new(world(), OctreeConfig::default());
        for i in 0..100 {
            tree.insert(Vec3::new(i as f32 * 0.5 - 25.0, 0.0, 0.0), i);
        }
        tree.clear();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.node_count(), 1);
        assert!(tree.query(&world()).is_empty());
    }

    #[test]
    fn query_matches_brute_force() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for round in 0..20 {
            let mut tree = Octree::new(world(), OctreeConfig::default());
            let mut points = Vec::new();
            for id in 0..300u32 {
                let p = Vec3::new(
                    rng.gen_range(-50.0..=50.0),
                    rng.gen_range(-2.0..=2.0),
                    rng.gen_range(-50.0..=50.0),
                );
                assert!(tree.insert(p, id));
                points.push((p, id));
            }

            for _ in 0..25 {
                let center = Vec3::new(
                    rng.gen_range(-60.0..60.0),
                    rng.gen_range(-3.0..3.0),
                    rng.gen_range(-60.0..60.0),
                );
                let range = Aabb::around(center, rng.gen_range(0.5..30.0));

                let mut got = tree.query(&range);
                got.sort_unstable();
                let mut want: Vec<u32> = points
                    .iter()
                    .filter(|(p, _)| range.contains(*p))
                    .map(|(_, id)| *id)
                    .collect();
                want.sort_unstable();
                assert_eq!(got, want, "round {round} range {range:?}");
            }
        }
    }
}
