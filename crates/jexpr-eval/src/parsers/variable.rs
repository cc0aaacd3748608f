use jexpr_syntax::TokenStream;

use crate::completion::CompletionKind;
use crate::expectation::Expectation;
use crate::object_info::{ObjectInfo, ValueSetter};
use crate::outcome::{ErrorPriority, Interrupt, ParseError, ParseResult, Parsed};
use crate::parsers::member::name_before_call;
use crate::parsers::tail::parse_object_tail;
use crate::parsers::{read_identifier_or_complete, Parser};
use crate::rating::AccessMatch;
use crate::toolbox::Toolbox;

/// Names of variables declared in the settings.
pub(crate) struct VariableParser;

impl Parser<ObjectInfo> for VariableParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        _this: &ObjectInfo,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        let token = read_identifier_or_complete(tokens, expectation, |scope| {
            tb.settings
                .variables
                .iter()
                .filter_map(|variable| {
                    scope.suggest(
                        tb,
                        variable.name(),
                        Some(variable.declared_type()),
                        AccessMatch::Full,
                        CompletionKind::Variable,
                    )
                })
                .collect()
        })?;
        if tokens.peek_char() == Some('(') {
            return Err(name_before_call(tokens, "variable", token.text));
        }

        let Some(variable) = tb.settings.variable(token.text) else {
            return Err(ParseError::semantic(
                token.begin,
                format!("Unknown variable '{}'", token.text),
                ErrorPriority::WrongParser,
            )
            .into());
        };

        let mut info = ObjectInfo::new(variable.value(), variable.declared_type().clone());
        if !variable.is_final() {
            info = info.with_setter(ValueSetter::Variable(variable.clone()));
        }
        parse_object_tail(tb, tokens, info, expectation)
            .map_err(Interrupt::at_least(ErrorPriority::PotentiallyRightParser))
    }
}
