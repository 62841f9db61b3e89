use common::error::Error;
use common::types::Edge;
use std::collections::HashSet;
use std::ops::Index;

/// Dense square matrix stored row-major in a single contiguous buffer.
///
/// - `values[row * dim + col]` -> entry `(row, col)`
/// - `values[row * dim..(row + 1) * dim]` -> the whole of `row`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    dim: usize,
    values: Vec<i64>,
}

impl Matrix {
    /// Allocates a `dim x dim` matrix of zeros.
    ///
    /// # Errors
    /// Returns `Error::NetworkTooLarge` if `dim * dim` overflows or cannot be allocated.
    pub fn zeros(dim: usize) -> Result<Self, Error> {
        let len = dim.checked_mul(dim).ok_or(Error::NetworkTooLarge(dim))?;

        let mut values = Vec::new();
        values
            .try_reserve_exact(len)
            .map_err(|_| Error::NetworkTooLarge(dim))?;
        values.resize(len, 0);

        Ok(Self { dim, values })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the entry at `(row, col)`, or `None` when either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        if row >= self.dim || col >= self.dim {
            return None;
        }
        Some(self.values[row * self.dim + col])
    }

    /// Contiguous slice of all entries in `row`.
    pub fn row(&self, row: usize) -> &[i64] {
        &self.values[row * self.dim..(row + 1) * self.dim]
    }

    /// Minimum entry over the consecutive vertex pairs of `path`.
    ///
    /// Returns `None` for a path with fewer than two vertices (no edges) or one
    /// that leaves the matrix.
    pub fn path_bottleneck(&self, path: &[usize]) -> Option<i64> {
        path.windows(2)
            .map(|pair| self.get(pair[0], pair[1]))
            .try_fold(None, |acc: Option<i64>, entry| {
                let entry = entry?;
                Some(Some(acc.map_or(entry, |min| min.min(entry))))
            })
            .flatten()
    }

    fn set(&mut self, row: usize, col: usize, value: i64) {
        self.values[row * self.dim + col] = value;
    }

    fn add(&mut self, row: usize, col: usize, delta: i64) {
        self.values[row * self.dim + col] += delta;
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = i64;

    fn index(&self, (row, col): (usize, usize)) -> &i64 {
        &self.values[row * self.dim + col]
    }
}

/// Capacitated, cost-weighted flow network with its residual state.
///
/// `capacity` and `cost` are fixed at construction; `residual` is the only
/// state that changes, and only through [`FlowNetwork::push_flow`].
///
/// For every constructed edge `(u, v)` with cost `c`, `cost[v][u] == -c`, so the
/// reverse residual edge undoes the forward edge's cost exactly.
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    vertex_count: usize,
    capacity: Matrix,
    cost: Matrix,
    residual: Matrix,
}

impl FlowNetwork {
    /// Builds a network from `(from, to, capacity, cost)` tuples.
    ///
    /// Later tuples for the same `(from, to)` pair overwrite earlier ones.
    /// Self-loops are stored but never carry flow.
    ///
    /// # Errors
    /// - `Error::EmptyNetwork` if `vertex_count` is zero.
    /// - `Error::InvalidEdge` if an endpoint lies outside `[0, vertex_count)`.
    /// - `Error::NegativeCapacity` if a capacity is below zero.
    /// - `Error::AntiparallelEdge` if both `(u, v)` and `(v, u)` are given.
    /// - `Error::NetworkTooLarge` if the matrices cannot be allocated.
    pub fn from_edges(vertex_count: usize, edges: &[Edge]) -> Result<Self, Error> {
        if vertex_count == 0 {
            return Err(Error::EmptyNetwork);
        }

        let mut capacity = Matrix::zeros(vertex_count)?;
        let mut cost = Matrix::zeros(vertex_count)?;
        let mut residual = Matrix::zeros(vertex_count)?;
        let mut constructed: HashSet<(usize, usize)> = HashSet::with_capacity(edges.len());

        for &(from, to, cap, weight) in edges {
            if from >= vertex_count || to >= vertex_count {
                return Err(Error::InvalidEdge {
                    from,
                    to,
                    vertex_count,
                });
            }
            if cap < 0 {
                return Err(Error::NegativeCapacity {
                    from,
                    to,
                    capacity: cap,
                });
            }
            if from != to && constructed.contains(&(to, from)) {
                return Err(Error::AntiparallelEdge { from, to });
            }
            constructed.insert((from, to));

            capacity.set(from, to, cap);
            cost.set(from, to, weight);
            if from != to {
                cost.set(to, from, -weight);
            }
            residual.set(from, to, cap);
        }

        Ok(Self {
            vertex_count,
            capacity,
            cost,
            residual,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn source(&self) -> usize {
        0
    }

    pub fn sink(&self) -> usize {
        self.vertex_count - 1
    }

    pub fn capacity(&self) -> &Matrix {
        &self.capacity
    }

    pub fn cost(&self) -> &Matrix {
        &self.cost
    }

    pub fn residual(&self) -> &Matrix {
        &self.residual
    }

    /// Pushes `flow` units along every consecutive pair of `path`.
    ///
    /// Each pair `(a, b)` loses `flow` on `residual[a][b]` and gains it on
    /// `residual[b][a]`. Every index is checked before the first write, so the
    /// residual is either updated along the whole path or left untouched.
    ///
    /// # Errors
    /// Returns `Error::NodeIndexOutOfBounds` for the first vertex outside the network.
    pub fn push_flow(&mut self, path: &[usize], flow: i64) -> Result<(), Error> {
        if let Some(&bad) = path.iter().find(|&&v| v >= self.vertex_count) {
            return Err(Error::NodeIndexOutOfBounds(bad));
        }

        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            self.residual.add(a, b, -flow);
            self.residual.add(b, a, flow);
        }
        Ok(())
    }

    /// Flow currently carried by the original edge `(from, to)`; zero if no such edge exists.
    pub fn flow_on(&self, from: usize, to: usize) -> i64 {
        match self.capacity.get(from, to) {
            Some(cap) if cap > 0 => cap - self.residual[(from, to)],
            _ => 0,
        }
    }

    /// Outflow minus inflow of `vertex`, measured over original edges.
    pub fn net_outflow(&self, vertex: usize) -> i64 {
        (0..self.vertex_count)
            .map(|other| self.flow_on(vertex, other) - self.flow_on(other, vertex))
            .sum()
    }

    /// Sum of `flow * cost` over every original edge.
    pub fn total_cost(&self) -> i64 {
        let n = self.vertex_count;
        (0..n)
            .flat_map(|row| (0..n).map(move |col| (row, col)))
            .map(|(row, col)| self.flow_on(row, col) * self.cost[(row, col)])
            .sum()
    }
}
