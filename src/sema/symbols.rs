//! Symbol identities for the semantic model.

use smol_str::SmolStr;

use crate::parser::SyntaxNodePtr;

/// Stable identity for a declared name, independent of how many syntax
/// nodes reference it. Two reference nodes are the same variable iff
/// their resolved ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// What kind of declaration a symbol came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A plain local variable.
    Local,
    /// A function parameter.
    Param,
    /// A top-level function.
    Function,
}

/// Data for one symbol.
///
/// `decl_sites` normally holds exactly one pointer; a name re-declared in
/// the same scope accumulates all of its declaring sites here, which marks
/// the symbol as ambiguous for analyses that require a unique declaration.
#[derive(Debug, Clone)]
pub struct SymbolData {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub decl_sites: Vec<SyntaxNodePtr>,
}
