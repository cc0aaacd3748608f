//! Class names in expressions and in type positions (casts, `instanceof`, `new`).

use jexpr_syntax::TokenStream;
use jexpr_types::{simple_name_of, ClassId, PrimitiveType, Type, Value};

use crate::completion::{CodeCompletion, CompletionKind};
use crate::expectation::Expectation;
use crate::object_info::ObjectInfo;
use crate::outcome::{ErrorPriority, Interrupt, ParseError, ParseResult, Parsed, TokenResultExt};
use crate::parsers::member::{FieldParser, MemberContext, MethodParser};
use crate::parsers::package::{package_member_completions, package_name_completions};
use crate::parsers::tail::parse_object_tail;
use crate::parsers::{read_identifier_or_complete, CompletionScope, Parser};
use crate::rating::AccessMatch;
use crate::toolbox::{merge, Toolbox};

const IMPLICIT_PACKAGE: &str = "java.lang";

/// The class an unqualified name refers to: explicit imports first, then imported packages,
/// then `java.lang`, then the default package.
pub(crate) fn resolve_unqualified(tb: &Toolbox<'_>, name: &str) -> Option<ClassId> {
    let store = tb.store;
    let settings = tb.settings;
    settings
        .imported_classes
        .iter()
        .filter(|imported| simple_name_of(imported) == name)
        .find_map(|imported| store.class_id(imported))
        .or_else(|| {
            settings
                .imported_packages
                .iter()
                .find_map(|package| store.class_id(&format!("{package}.{name}")))
        })
        .or_else(|| store.class_id(&format!("{IMPLICIT_PACKAGE}.{name}")))
        .or_else(|| store.class_id(name))
}

/// Every class reachable by its simple name, in resolution order.
fn unqualified_classes(tb: &Toolbox<'_>) -> Vec<ClassId> {
    let store = tb.store;
    let settings = tb.settings;
    let mut found: Vec<ClassId> = settings
        .imported_classes
        .iter()
        .filter_map(|imported| store.class_id(imported))
        .collect();
    let packages = settings
        .imported_packages
        .iter()
        .map(String::as_str)
        .chain([IMPLICIT_PACKAGE, ""]);
    for package in packages {
        for id in store.top_level_classes_in(package) {
            if !found.contains(&id) {
                found.push(id);
            }
        }
    }
    found
}

pub(crate) fn class_completions(
    tb: &Toolbox<'_>,
    scope: &CompletionScope<'_>,
    classes: &[ClassId],
) -> Vec<CodeCompletion> {
    classes
        .iter()
        .filter_map(|id| {
            let name = simple_name_of(tb.store.class_name(*id));
            scope.suggest(tb, name, None, AccessMatch::Full, CompletionKind::Class)
        })
        .collect()
}

/// An unqualified class name, followed by its class tail.
pub(crate) struct ClassParser;

impl Parser<ObjectInfo> for ClassParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        _this: &ObjectInfo,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        let token = read_identifier_or_complete(tokens, expectation, |scope| {
            class_completions(tb, scope, &unqualified_classes(tb))
        })?;
        let Some(id) = resolve_unqualified(tb, token.text) else {
            return Err(ParseError::semantic(
                token.begin,
                format!("Unknown class '{}'", token.text),
                ErrorPriority::WrongParser,
            )
            .into());
        };
        parse_class_tail(tb, tokens, Type::class(id, vec![]), expectation)
            .map_err(Interrupt::at_least(ErrorPriority::PotentiallyRightParser))
    }
}

/// After a class: `.class`, static members, nested classes, or nothing.
pub(crate) fn parse_class_tail(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    ty: Type,
    expectation: &Expectation,
) -> Parsed<ParseResult> {
    if tokens.peek_char() != Some('.') {
        return Ok(ParseResult::Class(ty));
    }
    tokens.read_char('.').or_fail(ErrorPriority::RightParser)?;
    merge(
        tb,
        tokens,
        &MemberContext::Static(ty),
        expectation,
        &[&FieldParser, &MethodParser, &ClassMemberParser],
    )
}

/// `Outer.Inner` and `Type.class`.
struct ClassMemberParser;

impl Parser<MemberContext> for ClassMemberParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        context: &MemberContext,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        let MemberContext::Static(ty) = context else {
            return Err(ParseError::syntax(
                tokens.position(),
                "Expected a class",
                ErrorPriority::WrongParser,
            )
            .into());
        };
        let nested = ty
            .class_id()
            .map(|id| tb.store.nested_classes_of(id))
            .unwrap_or_default();

        let token = read_identifier_or_complete(tokens, expectation, |scope| {
            let class_type = class_object_type(tb, ty);
            let mut found = class_completions(tb, scope, &nested);
            found.extend(scope.suggest(
                tb,
                "class",
                Some(&class_type),
                AccessMatch::Full,
                CompletionKind::Keyword,
            ));
            found
        })?;

        if token.text == "class" {
            let literal = ObjectInfo::new(Value::Class(ty.clone()), class_object_type(tb, ty));
            return parse_object_tail(tb, tokens, literal, expectation)
                .map_err(Interrupt::at_least(ErrorPriority::PotentiallyRightParser));
        }
        let Some(id) = nested
            .iter()
            .copied()
            .find(|id| simple_name_of(tb.store.class_name(*id)) == token.text)
        else {
            return Err(ParseError::semantic(
                token.begin,
                format!("Unknown nested class '{}'", token.text),
                ErrorPriority::WrongParser,
            )
            .into());
        };
        parse_class_tail(tb, tokens, Type::class(id, vec![]), expectation)
            .map_err(Interrupt::at_least(ErrorPriority::PotentiallyRightParser))
    }
}

/// `Class<T>` for `T.class`.
fn class_object_type(tb: &Toolbox<'_>, ty: &Type) -> Type {
    Type::class(tb.store.well_known().class, vec![ty.clone()])
}

/// A type name: primitive (when allowed), unqualified, qualified or nested class, with any
/// number of `[]` suffixes.
pub(crate) fn parse_type(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    allow_primitives: bool,
) -> Parsed<Type> {
    let expectation = Expectation::class();
    let token = read_identifier_or_complete(tokens, &expectation, |scope| {
        let mut found = Vec::new();
        if allow_primitives {
            found.extend(PrimitiveType::ALL.iter().filter_map(|primitive| {
                scope.suggest(tb, primitive.name(), None, AccessMatch::Full, CompletionKind::Keyword)
            }));
        }
        found.extend(class_completions(tb, scope, &unqualified_classes(tb)));
        found.extend(package_name_completions(tb, scope, None));
        found
    })?;

    let primitive = PrimitiveType::from_name(token.text).filter(|_| allow_primitives);
    let mut ty = if let Some(primitive) = primitive {
        Type::Primitive(primitive)
    } else if let Some(id) = resolve_unqualified(tb, token.text) {
        parse_nested_type(tb, tokens, id, &expectation)?
    } else if tb.store.is_package(token.text) {
        let id = parse_qualified_class(tb, tokens, token.text, &expectation)?;
        parse_nested_type(tb, tokens, id, &expectation)?
    } else {
        return Err(ParseError::semantic(
            token.begin,
            format!("Unknown type '{}'", token.text),
            ErrorPriority::WrongParser,
        )
        .into());
    };

    while tokens.peek_char() == Some('[') {
        let mut probe = tokens.clone();
        if probe.read_char('[').is_err() || probe.peek_char() != Some(']') {
            break;
        }
        tokens.read_char('[').or_fail(ErrorPriority::WrongParser)?;
        tokens.read_char(']').or_fail(ErrorPriority::WrongParser)?;
        ty = Type::array(ty);
    }
    Ok(ty)
}

/// `.Inner` suffixes of a class in a type position.
fn parse_nested_type(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    mut id: ClassId,
    expectation: &Expectation,
) -> Parsed<Type> {
    while tokens.peek_char() == Some('.') {
        tokens.read_char('.').or_fail(ErrorPriority::WrongParser)?;
        let nested = tb.store.nested_classes_of(id);
        let token = read_identifier_or_complete(tokens, expectation, |scope| {
            class_completions(tb, scope, &nested)
        })?;
        id = nested
            .into_iter()
            .find(|nested| simple_name_of(tb.store.class_name(*nested)) == token.text)
            .ok_or_else(|| {
                Interrupt::from(ParseError::semantic(
                    token.begin,
                    format!("Unknown nested class '{}'", token.text),
                    ErrorPriority::WrongParser,
                ))
            })?;
    }
    Ok(Type::class(id, vec![]))
}

/// `a.b.C` after the first package segment `a` has been read.
fn parse_qualified_class(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    first: &str,
    expectation: &Expectation,
) -> Parsed<ClassId> {
    let mut package = first.to_owned();
    loop {
        tokens.read_char('.').or_fail(ErrorPriority::WrongParser)?;
        let token = read_identifier_or_complete(tokens, expectation, |scope| {
            package_member_completions(tb, scope, &package)
        })?;
        let qualified = format!("{package}.{}", token.text);
        if let Some(id) = tb.store.class_id(&qualified) {
            return Ok(id);
        }
        if !tb.store.is_package(&qualified) {
            return Err(ParseError::semantic(
                token.begin,
                format!("Unknown class or package '{qualified}'"),
                ErrorPriority::WrongParser,
            )
            .into());
        }
        package = qualified;
    }
}
