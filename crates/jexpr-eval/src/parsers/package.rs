use jexpr_syntax::TokenStream;
use jexpr_types::Type;

use crate::completion::{CodeCompletion, CompletionKind};
use crate::expectation::Expectation;
use crate::object_info::ObjectInfo;
use crate::outcome::{ErrorPriority, Interrupt, ParseError, ParseResult, Parsed, TokenResultExt};
use crate::parsers::class::{class_completions, parse_class_tail};
use crate::parsers::{read_identifier_or_complete, CompletionScope, Parser};
use crate::rating::AccessMatch;
use crate::toolbox::Toolbox;

/// Last segments of the packages below `parent` (top-level packages for `None`).
pub(crate) fn package_name_completions(
    tb: &Toolbox<'_>,
    scope: &CompletionScope<'_>,
    parent: Option<&str>,
) -> Vec<CodeCompletion> {
    tb.store
        .sub_packages(parent)
        .into_iter()
        .filter_map(|package| {
            let segment = package.rsplit('.').next().unwrap_or(package);
            scope.suggest(tb, segment, None, AccessMatch::Full, CompletionKind::Package)
        })
        .collect()
}

/// Sub-packages and top-level classes of `package`.
pub(crate) fn package_member_completions(
    tb: &Toolbox<'_>,
    scope: &CompletionScope<'_>,
    package: &str,
) -> Vec<CodeCompletion> {
    let mut found = package_name_completions(tb, scope, Some(package));
    found.extend(class_completions(tb, scope, &tb.store.top_level_classes_in(package)));
    found
}

/// A package name, which may continue into a fully qualified class.
pub(crate) struct PackageParser;

impl Parser<ObjectInfo> for PackageParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        _this: &ObjectInfo,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        let token = read_identifier_or_complete(tokens, expectation, |scope| {
            package_name_completions(tb, scope, None)
        })?;
        if !tb.store.is_package(token.text) {
            return Err(ParseError::semantic(
                token.begin,
                format!("Unknown package '{}'", token.text),
                ErrorPriority::WrongParser,
            )
            .into());
        }
        parse_package_tail(tb, tokens, token.text.to_owned(), expectation)
            .map_err(Interrupt::at_least(ErrorPriority::PotentiallyRightParser))
    }
}

fn parse_package_tail(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    package: String,
    expectation: &Expectation,
) -> Parsed<ParseResult> {
    if tokens.peek_char() != Some('.') {
        return Ok(ParseResult::Package(package));
    }
    tokens.read_char('.').or_fail(ErrorPriority::RightParser)?;
    let token = read_identifier_or_complete(tokens, expectation, |scope| {
        package_member_completions(tb, scope, &package)
    })?;

    let qualified = format!("{package}.{}", token.text);
    if let Some(id) = tb.store.class_id(&qualified) {
        return parse_class_tail(tb, tokens, Type::class(id, vec![]), expectation);
    }
    if tb.store.is_package(&qualified) {
        return parse_package_tail(tb, tokens, qualified, expectation);
    }
    Err(ParseError::semantic(
        token.begin,
        format!("Unknown class or package '{qualified}'"),
        ErrorPriority::PotentiallyRightParser,
    )
    .into())
}
