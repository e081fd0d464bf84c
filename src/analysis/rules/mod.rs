//! Built-in rules and their fixes.

pub mod async_suffix;
pub mod declare_at_use;
pub mod missing_braces;

pub use async_suffix::{ASYNC_SUFFIX, AsyncSuffix, AsyncSuffixFix};
pub use declare_at_use::{DECLARE_AT_USE, DeclareAtUse, DeclareAtUseFix};
pub use missing_braces::{MISSING_BRACES, MissingBraces, MissingBracesFix};
