use jexpr_syntax::TokenStream;
use jexpr_types::TypeStore;

use crate::completion::{CodeCompletion, Completions, ExecutableArgumentInfo};
use crate::error::{ParseException, ParseExceptionKind};
use crate::expectation::Expectation;
use crate::object_info::ObjectInfo;
use crate::outcome::{ErrorPriority, ParseError, ParseOutcome, ParseResult};
use crate::parsers::parse_expression;
use crate::providers::CompletionProviders;
use crate::settings::Settings;
use crate::toolbox::{EvaluationMode, Toolbox};

/// Entry point: evaluation, code completion and parameter hints for one class index and one set
/// of settings.
///
/// ```
/// use jexpr_eval::{ExpressionEngine, ObjectInfo, Settings};
/// use jexpr_types::{TypeStore, Value};
///
/// let store = TypeStore::with_minimal_jdk();
/// let settings = Settings::default();
/// let engine = ExpressionEngine::new(&store, &settings);
/// let result = engine.evaluate("1 + 2 * 3", &ObjectInfo::null()).unwrap();
/// assert!(matches!(result.value, Value::Int(7)));
/// ```
pub struct ExpressionEngine<'a> {
    store: &'a TypeStore,
    settings: &'a Settings,
    providers: CompletionProviders,
}

impl<'a> ExpressionEngine<'a> {
    pub fn new(store: &'a TypeStore, settings: &'a Settings) -> Self {
        Self {
            store,
            settings,
            providers: CompletionProviders::default(),
        }
    }

    pub fn with_providers(mut self, providers: CompletionProviders) -> Self {
        self.providers = providers;
        self
    }

    /// One parse of the whole `text` in `mode`. With a caret, reaching it yields completions.
    pub fn parse(
        &self,
        text: &str,
        caret: Option<usize>,
        this: &ObjectInfo,
        mode: EvaluationMode,
    ) -> ParseOutcome {
        let tb = Toolbox {
            store: self.store,
            settings: self.settings,
            providers: &self.providers,
            this,
            mode,
        };
        let mut tokens = TokenStream::new(text, caret);
        parse_expression(&tb, &mut tokens, &Expectation::any())
            .and_then(|result| {
                if tokens.is_at_end() {
                    Ok(result)
                } else {
                    Err(ParseError::syntax(
                        tokens.position(),
                        "Unexpected text after the expression",
                        ErrorPriority::RightParser,
                    )
                    .into())
                }
            })
            .into()
    }

    /// Evaluates `text` with `this` as the context object.
    ///
    /// Without dynamic typing, a pass that invokes nothing runs first so that errors anywhere in
    /// the expression are reported before any code has run.
    pub fn evaluate(&self, text: &str, this: &ObjectInfo) -> Result<ObjectInfo, ParseException> {
        if self.settings.dynamic_typing {
            return self.evaluate_in(text, this, EvaluationMode::DynamicTyping);
        }
        self.evaluate_in(text, this, EvaluationMode::WithoutEvaluation)?;
        tracing::debug!(target: "jexpr.eval", text, "checked without evaluation, evaluating");
        self.evaluate_in(text, this, EvaluationMode::StaticTyping)
    }

    fn evaluate_in(
        &self,
        text: &str,
        this: &ObjectInfo,
        mode: EvaluationMode,
    ) -> Result<ObjectInfo, ParseException> {
        match self.parse(text, None, this, mode) {
            ParseOutcome::Result(ParseResult::Object(info)) => Ok(info),
            ParseOutcome::Result(other) => Err(ParseException::new(
                0,
                ParseExceptionKind::Semantic,
                format!("Expression evaluates to {} instead of an object", other.kind_name()),
            )),
            ParseOutcome::Error(err) => Err(err.into()),
            ParseOutcome::Ambiguous(err) => Err(err.into()),
            ParseOutcome::Completions(_) => {
                Err(ParseError::internal(0, "completions requested without a caret").into())
            }
        }
    }

    /// Ranked suggestions for the caret position. An empty list means nothing fits; an error
    /// means the text before the caret cannot be parsed.
    pub fn completions(
        &self,
        text: &str,
        caret: usize,
        this: &ObjectInfo,
    ) -> Result<Vec<CodeCompletion>, ParseException> {
        match self.complete(text, caret, this)? {
            Some(mut completions) => {
                completions.sort();
                Ok(completions.items)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Signatures of the call whose argument list contains the caret, if any.
    pub fn executable_argument_info(
        &self,
        text: &str,
        caret: usize,
        this: &ObjectInfo,
    ) -> Result<Option<ExecutableArgumentInfo>, ParseException> {
        Ok(self
            .complete(text, caret, this)?
            .and_then(|completions| completions.argument_info))
    }

    fn complete(
        &self,
        text: &str,
        caret: usize,
        this: &ObjectInfo,
    ) -> Result<Option<Completions>, ParseException> {
        if caret > text.len() || !text.is_char_boundary(caret) {
            return Err(ParseException::new(
                caret,
                ParseExceptionKind::Internal,
                format!("Caret {caret} is not a position in the text"),
            ));
        }
        let mode = if self.settings.dynamic_typing {
            EvaluationMode::DynamicTyping
        } else {
            EvaluationMode::WithoutEvaluation
        };
        tracing::debug!(target: "jexpr.eval", text, caret, ?mode, "completing");

        match self.parse(text, Some(caret), this, mode) {
            ParseOutcome::Completions(completions) => Ok(Some(completions)),
            ParseOutcome::Result(_) => Ok(None),
            ParseOutcome::Error(err) if err.position >= caret => {
                tracing::debug!(target: "jexpr.eval", position = err.position, "error after the caret");
                Ok(None)
            }
            ParseOutcome::Error(err) => Err(err.into()),
            ParseOutcome::Ambiguous(err) if err.position >= caret => Ok(None),
            ParseOutcome::Ambiguous(err) => Err(err.into()),
        }
    }
}
