//! Java typing rules over the [`crate::TypeStore`] model.
//!
//! Everything here is purely declarative: nothing inspects runtime values, so the same rules
//! serve completion ranking, overload resolution and the evaluator.

pub mod conversion;
pub mod format;
pub mod subtyping;
