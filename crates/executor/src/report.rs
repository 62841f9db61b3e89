use std::fmt::Write;

use mcmf_core::{Decomposition, FlowSummary, Matrix};

const CELL_WIDTH: usize = 5;

/// Renders a labelled matrix with a header row and column of vertex indices.
pub fn format_matrix(label: &str, matrix: &Matrix) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n {} ", label);

    let _ = write!(out, "{:width$}", "", width = CELL_WIDTH);
    for col in 0..matrix.dim() {
        let _ = write!(out, "{:>width$}", col, width = CELL_WIDTH);
    }
    out.push('\n');

    for row in 0..matrix.dim() {
        let _ = write!(out, "{:>width$}", row, width = CELL_WIDTH);
        for value in matrix.row(row) {
            let _ = write!(out, "{:>width$}", value, width = CELL_WIDTH);
        }
        out.push('\n');
    }
    out
}

/// Everything printed for one solved network.
pub struct NetworkReport<'a> {
    pub name: &'a str,
    pub capacity: &'a Matrix,
    pub cost: &'a Matrix,
    pub residual: &'a Matrix,
    pub summary: &'a FlowSummary,
    pub decomposition: &'a Decomposition,
}

impl NetworkReport<'_> {
    pub fn render(&self, print_matrices: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n****Find Flow {}", self.name);

        if print_matrices {
            out.push_str(&format_matrix("Edge Cost", self.cost));
            out.push_str(&format_matrix("Capacity", self.capacity));
        }

        for augmentation in &self.summary.augmentations {
            let _ = writeln!(out, "{}", augmentation);
        }

        if print_matrices {
            out.push_str(&format_matrix("Residual", self.residual));
        }

        let _ = writeln!(out, "Final paths");
        for path in &self.decomposition.paths {
            let _ = writeln!(out, "{}", path);
        }
        let _ = writeln!(out, "total flow: {}", self.summary.max_flow);
        let _ = writeln!(out, "total cost: {}", self.summary.total_cost);

        let decomposed = self.decomposition.total_flow();
        if decomposed != self.summary.max_flow {
            let _ = writeln!(out, "decomposed flow: {}", decomposed);
        }
        out
    }
}
