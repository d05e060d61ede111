//! Graph model: attributed nodes and edges, loading, load memoization.

pub mod attr;
pub mod loader;
pub mod model;
pub mod source;

pub use attr::{AttrMap, AttrValue};
pub use loader::{load_graph, LoadError, LoadResult};
pub use model::{EdgeRecord, Graph, GraphError, GraphResult};
pub use source::{GraphSource, SourceSignature};
