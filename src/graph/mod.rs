pub mod directed;
pub mod generators;
pub mod indexed;
pub mod traits;

pub use directed::DirectedGraph;
pub use indexed::IndexedNetwork;
pub use traits::{Graph, MutableGraph};
