use std::fmt;

/// Type alias for a single edge tuple: (from, to, capacity, cost)
pub type Edge = (usize, usize, i64, i64);

/// Formats a vertex sequence as space separated indices, e.g. `0 1 3`.
pub fn format_path(path: &[usize]) -> String {
    path.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One round of the augmentation loop.
///
/// Fields:
/// - `path`: Vertices from source to sink, in order.
/// - `flow`: Bottleneck residual capacity pushed along `path`.
/// - `unit_cost`: Cost of sending one unit along `path` (its shortest-path distance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Augmentation {
    pub path: Vec<usize>,
    pub flow: i64,
    pub unit_cost: i64,
}

impl Augmentation {
    /// Total cost contributed by this round (`flow * unit_cost`).
    pub fn cost(&self) -> i64 {
        self.flow * self.unit_cost
    }
}

impl fmt::Display for Augmentation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Found flow: {} path: {}", self.flow, format_path(&self.path))
    }
}

/// A source-to-sink path recovered from the final flow together with the flow it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowPath {
    pub path: Vec<usize>,
    pub flow: i64,
}

/// Outcome of walking one saturated edge out of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecomposedPath {
    /// The walk reached the sink.
    Complete(FlowPath),

    /// The walk ran out of saturated edges before the sink. Holds the vertices visited.
    DeadEnd(Vec<usize>),
}

impl DecomposedPath {
    /// Flow carried by a completed path; dead ends carry nothing.
    pub fn flow(&self) -> i64 {
        match self {
            DecomposedPath::Complete(p) => p.flow,
            DecomposedPath::DeadEnd(_) => 0,
        }
    }
}

impl fmt::Display for DecomposedPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecomposedPath::Complete(p) => {
                write!(f, "Found flow: {} path: {}", p.flow, format_path(&p.path))
            }
            DecomposedPath::DeadEnd(partial) => {
                write!(f, "Dead end after path: {}", format_path(partial))
            }
        }
    }
}
