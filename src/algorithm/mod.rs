pub mod bellman_ford;
pub mod dijkstra;
pub mod johnson;
pub mod traits;

pub use traits::{ShortestPathAlgorithm, ShortestPathResult};
