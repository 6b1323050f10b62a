use std::cmp::Ordering;

/// Heap entry of the shortest path searches
#[derive(Copy, Clone, Debug)]
pub(super) struct State<N> {
    pub(super) cost: f64,
    pub(super) node: N,
}

impl<N> PartialEq for State<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for State<N> {}

// Implement Ord for State to use in BinaryHeap
impl<N> Ord for State<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other.cost.total_cmp(&self.cost)
    }
}

impl<N> PartialOrd for State<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
