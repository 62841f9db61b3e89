pub mod decomposition;
pub mod flow;
pub mod network;
pub mod solver;
pub mod traits;

pub use decomposition::{Decomposition, decompose};
pub use flow::{FlowSummary, MinCostMaxFlow, min_cost_max_flow};
pub use network::{FlowNetwork, Matrix};
