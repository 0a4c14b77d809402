//! Idle particle pool

use crate::particle::Particle;
use burst_core::NodeId;
use std::collections::VecDeque;

/// Idle particles waiting for the next burst.
///
/// Grows on demand and is never pre-sized. Borrowing takes from the back,
/// returning pushes to the front, so the most recently retired particle is
/// the last one reused.
#[derive(Debug, Default)]
pub struct ParticlePool {
    idle: VecDeque<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow an idle particle, if any
    pub fn take(&mut self) -> Option<Particle> {
        self.idle.pop_back()
    }

    /// Return a retired particle to the front of the pool
    pub fn release(&mut self, particle: Particle) {
        self.idle.push_front(particle);
    }

    pub fn len(&self) -> usize {
        self.idle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idle.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.idle.iter().any(|p| p.node() == node)
    }

    /// Idle particles, front to back
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.idle.iter()
    }

    /// Remove every idle particle
    pub fn drain(&mut self) -> Vec<Particle> {
        self.idle.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParticleStyle;
    use burst_scene::SceneGraph;

    #[test]
    fn pool_starts_empty() {
        let mut pool = ParticlePool::new();
        assert!(pool.is_empty());
        assert!(pool.take().is_none());
    }

    #[test]
    fn take_from_back_release_to_front() {
        let mut scene = SceneGraph::new();
        let style = ParticleStyle::default();
        let mut pool = ParticlePool::new();

        let a = Particle::new(&mut scene, &style);
        let b = Particle::new(&mut scene, &style);
        let (a_node, b_node) = (a.node(), b.node());

        pool.release(a);
        pool.release(b);
        // Front to back: b, a
        let order: Vec<NodeId> = pool.iter().map(Particle::node).collect();
        assert_eq!(order, vec![b_node, a_node]);

        let first = pool.take().unwrap();
        assert_eq!(first.node(), a_node);
        assert_eq!(pool.len(), 1);
        assert!(pool.contains(b_node));
        assert!(!pool.contains(a_node));
    }

    #[test]
    fn drain_empties_pool() {
        let mut scene = SceneGraph::new();
        let style = ParticleStyle::default();
        let mut pool = ParticlePool::new();
        for _ in 0..3 {
            pool.release(Particle::new(&mut scene, &style));
        }
        assert_eq!(pool.drain().len(), 3);
        assert!(pool.is_empty());
    }
}
