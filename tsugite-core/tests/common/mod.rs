use tsugite_core::{ClusterId, Instance, JoiningSolution};

/// Three vertices where `{0,1}` attract strongly, `{1,2}` attract weakly and
/// `{0,2}` repel strongly.
#[must_use]
pub fn conflicted_triangle() -> Instance {
    Instance::new(
        "triangle",
        3,
        vec![[0, 1], [1, 2], [0, 2]],
        vec![5.0, 3.0, -10.0],
    )
}

/// Two disjoint positive chains joined by a repulsive bridge.
#[must_use]
pub fn bridged_chains() -> Instance {
    Instance::new(
        "chains",
        6,
        vec![[0, 1], [1, 2], [3, 4], [4, 5], [2, 3]],
        vec![2.0, 2.5, 1.0, 1.5, -4.0],
    )
}

#[must_use]
pub fn label_ids(solution: &JoiningSolution) -> Vec<u64> {
    solution.labels().iter().map(|id: &ClusterId| id.get()).collect()
}
