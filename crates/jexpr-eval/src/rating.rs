use jexpr_fuzzy::{rate_name, NameMatch};
use jexpr_types::{rate_type_match, Type, TypeMatch, TypeStore};

use crate::expectation::Expectation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessMatch {
    Full,
    /// A static member reached through an instance expression.
    StaticViaInstance,
}

/// How well a candidate fits the caret position. Compared lexicographically by name, type and
/// access; smaller is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchRating {
    pub name: NameMatch,
    pub ty: TypeMatch,
    pub access: AccessMatch,
}

impl MatchRating {
    pub fn new(name: NameMatch, ty: TypeMatch, access: AccessMatch) -> Self {
        Self { name, ty, access }
    }

    /// A name-only rating for things without a type (packages, keywords).
    pub fn for_name(prefix: &str, candidate: &str) -> Self {
        Self::new(rate_name(prefix, candidate), TypeMatch::Full, AccessMatch::Full)
    }

    pub fn is_match(&self) -> bool {
        self.name.is_match()
    }
}

/// Best match of `ty` against the types the caller expects. Without expectations every type
/// fits.
pub fn rate_expected_type(store: &TypeStore, ty: &Type, expectation: &Expectation) -> TypeMatch {
    match expectation.allowed_types() {
        None => TypeMatch::Full,
        Some(allowed) => allowed
            .iter()
            .map(|expected| rate_type_match(store, ty, expected))
            .min()
            .unwrap_or(TypeMatch::None),
    }
}
