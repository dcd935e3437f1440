//! Disjoint-set partition of the original vertices.
//!
//! The driver merges the two endpoints of every executed contraction here,
//! so at each iteration boundary the partition describes a valid clustering.
//! Union by rank with path compression keeps `find` and `merge` near
//! constant amortised time.

/// Union-find structure tracking which vertices share a cluster.
///
/// # Examples
/// ```
/// use tsugite_core::Partition;
///
/// let mut partition = Partition::new(4);
/// assert!(partition.merge(0, 2));
/// assert!(!partition.merge(2, 0));
/// assert_eq!(partition.number_of_sets(), 3);
/// assert_eq!(partition.element_labeling(), vec![0, 1, 0, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct Partition {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl Partition {
    /// Creates a partition where every element is a singleton.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            sets: len,
        }
    }

    /// Returns the number of elements covered by the partition.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.parent.len() }

    /// Returns `true` when the partition covers no elements.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.parent.is_empty() }

    /// Returns the current number of disjoint sets.
    #[must_use]
    #[rustfmt::skip]
    pub fn number_of_sets(&self) -> usize { self.sets }

    /// Returns the representative of the set containing `element`.
    ///
    /// # Panics
    /// Panics when `element` is out of range.
    pub fn find(&mut self, mut element: usize) -> usize {
        let mut root = element;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[element] != root {
            let next = self.parent[element];
            self.parent[element] = root;
            element = next;
        }

        root
    }

    /// Joins the sets containing `a` and `b`.
    ///
    /// Returns `false` without changing the set count when both elements
    /// already share a set.
    ///
    /// # Panics
    /// Panics when either element is out of range.
    pub fn merge(&mut self, a: usize, b: usize) -> bool {
        let mut left = self.find(a);
        let mut right = self.find(b);
        if left == right {
            return false;
        }
        if self.rank[left] < self.rank[right] {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if self.rank[left] == self.rank[right] {
            self.rank[left] = self.rank[left].saturating_add(1);
        }
        self.sets -= 1;
        true
    }

    /// Returns whether `a` and `b` belong to the same set.
    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Produces a dense 0-based label per element.
    ///
    /// Labels are assigned in order of first appearance when scanning the
    /// elements by index, so element `0` always receives label `0` and the
    /// labels span exactly `0..number_of_sets()`.
    pub fn element_labeling(&mut self) -> Vec<usize> {
        let mut label_of_root = vec![usize::MAX; self.len()];
        let mut next = 0;
        (0..self.len())
            .map(|element| {
                let root = self.find(element);
                if label_of_root[root] == usize::MAX {
                    label_of_root[root] = next;
                    next += 1;
                }
                label_of_root[root]
            })
            .collect()
    }
}
