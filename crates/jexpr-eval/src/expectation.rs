use jexpr_types::Type;

/// What the caller would like a sub-parse to produce.
///
/// Expectations only rank completions and return types; they never reject a syntactically
/// valid parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub objects: bool,
    pub classes: bool,
    pub packages: bool,
    allowed_types: Option<Vec<Type>>,
}

impl Default for Expectation {
    fn default() -> Self {
        Self::any()
    }
}

impl Expectation {
    pub fn any() -> Self {
        Self {
            objects: true,
            classes: true,
            packages: true,
            allowed_types: None,
        }
    }

    pub fn object() -> Self {
        Self {
            objects: true,
            classes: false,
            packages: false,
            allowed_types: None,
        }
    }

    pub fn class() -> Self {
        Self {
            objects: false,
            classes: true,
            packages: false,
            allowed_types: None,
        }
    }

    /// An object of one of `types`. An empty list means "anything".
    pub fn object_of(types: Vec<Type>) -> Self {
        Self {
            allowed_types: (!types.is_empty()).then_some(types),
            ..Self::object()
        }
    }

    pub fn allowed_types(&self) -> Option<&[Type]> {
        self.allowed_types.as_deref()
    }
}
