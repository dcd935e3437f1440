//! Correlation-clustering problem instances.

/// Signed edge list over `vertex_count` vertices.
///
/// `weights[i]` is the weight of `edges[i]`. Parallel edges are allowed and
/// are summed by the solver. The instance is not validated on construction;
/// [`crate::GreedyJoining::solve_instance`] checks it before solving.
///
/// # Examples
/// ```
/// use tsugite_core::Instance;
///
/// let instance = Instance::new("demo", 3, vec![[0, 1], [1, 2]], vec![1.0, -2.0]);
/// assert_eq!(instance.name(), "demo");
/// assert_eq!(instance.vertex_count(), 3);
/// assert_eq!(instance.edge_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    name: String,
    vertex_count: usize,
    edges: Vec<[usize; 2]>,
    weights: Vec<f64>,
}

impl Instance {
    /// Creates an instance from parallel edge and weight lists.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        vertex_count: usize,
        edges: Vec<[usize; 2]>,
        weights: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex_count,
            edges,
            weights,
        }
    }

    /// Returns the human-readable instance name.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }

    /// Returns the number of vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns the input edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[[usize; 2]] { &self.edges }

    /// Returns the input weights.
    #[must_use]
    #[rustfmt::skip]
    pub fn weights(&self) -> &[f64] { &self.weights }

    /// Returns the number of input edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edges.len() }
}
