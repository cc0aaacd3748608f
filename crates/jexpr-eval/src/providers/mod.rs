//! Completion providers for string literal arguments.
//!
//! A provider is registered for one parameter of one executable and is asked for suggestions
//! whenever the caret sits inside a string literal passed at that position.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use jexpr_syntax::CompletionInfo;
use jexpr_types::TypeStore;

use crate::completion::CodeCompletion;
use crate::object_info::ObjectInfo;

mod paths;

pub use paths::PathCompletionProvider;

/// What a provider gets to see about the call being completed.
pub struct StringCompletionRequest<'a> {
    pub store: &'a TypeStore,
    /// Binary name of the class declaring the executable.
    pub class_name: &'a str,
    /// Method name, or [`crate::CONSTRUCTOR_NAME`] for constructors.
    pub executable: &'a str,
    pub parameter_index: usize,
    /// The object the method is called on; `null` for static methods and constructors.
    pub receiver: &'a ObjectInfo,
    /// Arguments before the one being completed. Values are indeterminate unless evaluating.
    pub previous_arguments: &'a [ObjectInfo],
    pub info: CompletionInfo,
    /// The whole expression text the ranges in `info` refer to.
    pub source: &'a str,
}

impl StringCompletionRequest<'_> {
    /// The literal's content before the caret.
    pub fn prefix(&self) -> &str {
        self.info.prefix(self.source)
    }
}

pub trait CompletionProvider {
    fn completions(&self, request: &StringCompletionRequest<'_>) -> Vec<CodeCompletion>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ProviderKey {
    class_name: String,
    executable: String,
    parameter_index: usize,
}

#[derive(Default, Clone)]
pub struct CompletionProviders {
    providers: HashMap<ProviderKey, Rc<dyn CompletionProvider>>,
}

impl fmt::Debug for CompletionProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionProviders")
            .field("registered", &self.providers.len())
            .finish()
    }
}

impl CompletionProviders {
    pub fn register(
        &mut self,
        class_name: impl Into<String>,
        executable: impl Into<String>,
        parameter_index: usize,
        provider: Rc<dyn CompletionProvider>,
    ) {
        let key = ProviderKey {
            class_name: class_name.into(),
            executable: executable.into(),
            parameter_index,
        };
        tracing::debug!(
            target: "jexpr.eval",
            class = %key.class_name,
            executable = %key.executable,
            parameter_index,
            "registered string completion provider"
        );
        self.providers.insert(key, provider);
    }

    pub fn with(
        mut self,
        class_name: impl Into<String>,
        executable: impl Into<String>,
        parameter_index: usize,
        provider: Rc<dyn CompletionProvider>,
    ) -> Self {
        self.register(class_name, executable, parameter_index, provider);
        self
    }

    pub fn lookup(
        &self,
        class_name: &str,
        executable: &str,
        parameter_index: usize,
    ) -> Option<&Rc<dyn CompletionProvider>> {
        self.providers.get(&ProviderKey {
            class_name: class_name.to_owned(),
            executable: executable.to_owned(),
            parameter_index,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
