//! Semantic model: symbols and single-snapshot name resolution.

mod model;
mod symbols;

pub use model::SemanticModel;
pub use symbols::{SymbolData, SymbolId, SymbolKind};
