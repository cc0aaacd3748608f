//! Caret-aware parsing, evaluation and code completion for Java expressions.
//!
//! An expression is parsed once per [`EvaluationMode`] by a set of small grammar rules that run
//! side by side at every ambiguous position and whose outcomes are merged by confidence (see
//! [`ErrorPriority`]). When the caret is reached, the rule that reached it reports ranked
//! [`CodeCompletion`]s instead of a result; no other code path checks the caret.
//!
//! Classes, fields, methods and constructors come from a [`jexpr_types::TypeStore`]. Invocation
//! only happens in evaluating modes, and only once the overload to call is known.

mod completion;
mod engine;
mod error;
mod executable;
mod expectation;
mod members;
mod object_info;
mod object_tree;
mod operators;
mod outcome;
mod parsers;
mod providers;
mod rating;
mod settings;
mod toolbox;

pub use completion::{CodeCompletion, CompletionKind, Completions, ExecutableArgumentInfo};
pub use engine::ExpressionEngine;
pub use error::{ParseException, ParseExceptionKind};
pub use executable::CONSTRUCTOR_NAME;
pub use object_info::{ObjectInfo, ValueSetter};
pub use object_tree::ObjectTreeNode;
pub use outcome::{AmbiguityError, ErrorKind, ErrorPriority, ParseError, ParseOutcome, ParseResult};
pub use providers::{CompletionProvider, CompletionProviders, PathCompletionProvider, StringCompletionRequest};
pub use rating::{AccessMatch, MatchRating};
pub use settings::{Settings, Variable};
pub use toolbox::EvaluationMode;
