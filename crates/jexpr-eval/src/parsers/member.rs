//! Field reads and method calls, on `this` or after a `.`.

use jexpr_syntax::TokenStream;
use jexpr_types::{Thrown, Type, Value};

use crate::completion::{CodeCompletion, CompletionKind};
use crate::executable::{invoke, ExecutableInfo};
use crate::expectation::Expectation;
use crate::members::{fields, methods, FieldRef, MethodRef};
use crate::object_info::{ObjectInfo, ValueSetter};
use crate::outcome::{ErrorPriority, Interrupt, ParseError, ParseResult, Parsed, TokenResultExt};
use crate::parsers::arguments::{parse_arguments, resolve};
use crate::parsers::tail::parse_object_tail;
use crate::parsers::{read_identifier_or_complete, CompletionScope, Parser};
use crate::rating::AccessMatch;
use crate::toolbox::Toolbox;

/// What members are looked up on.
#[derive(Debug, Clone)]
pub(crate) enum MemberContext {
    /// An object. `implicit` for unqualified names resolved against `this`.
    Instance { target: ObjectInfo, implicit: bool },
    /// A class: only static members are visible.
    Static(Type),
}

impl MemberContext {
    fn lookup_type(&self, tb: &Toolbox<'_>) -> Type {
        match self {
            MemberContext::Instance { target, .. } => tb.lookup_type(target),
            MemberContext::Static(ty) => ty.clone(),
        }
    }

    fn static_only(&self) -> bool {
        matches!(self, MemberContext::Static(_))
    }

    fn access_of(&self, is_static: bool) -> AccessMatch {
        match self {
            MemberContext::Instance { implicit: false, .. } if is_static => {
                AccessMatch::StaticViaInstance
            }
            _ => AccessMatch::Full,
        }
    }

    fn receiver(&self) -> ObjectInfo {
        match self {
            MemberContext::Instance { target, .. } => target.clone(),
            MemberContext::Static(_) => ObjectInfo::null(),
        }
    }
}

fn on_this(this: &ObjectInfo) -> MemberContext {
    MemberContext::Instance {
        target: this.clone(),
        implicit: true,
    }
}

pub(crate) struct FieldParser;

impl Parser<ObjectInfo> for FieldParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        this: &ObjectInfo,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        Parser::<MemberContext>::parse(self, tb, tokens, &on_this(this), expectation)
    }
}

impl Parser<MemberContext> for FieldParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        context: &MemberContext,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        let ty = context.lookup_type(tb);
        let visible = fields(tb.store, &ty, context.static_only(), tb.settings.minimum_access);
        let has_length = matches!(ty, Type::Array(_)) && !context.static_only();

        let token = read_identifier_or_complete(tokens, expectation, |scope| {
            let mut found: Vec<CodeCompletion> = visible
                .iter()
                .filter_map(|field| {
                    scope.suggest(
                        tb,
                        &field.def.name,
                        Some(&field.def.ty),
                        context.access_of(field.def.is_static),
                        CompletionKind::Field,
                    )
                })
                .collect();
            if has_length {
                found.extend(scope.suggest(
                    tb,
                    "length",
                    Some(&Type::int()),
                    AccessMatch::Full,
                    CompletionKind::Field,
                ));
            }
            found
        })?;
        if tokens.peek_char() == Some('(') {
            return Err(name_before_call(tokens, "field", token.text));
        }

        let info = if has_length && token.text == "length" {
            array_length(tb, context, token.begin)?
        } else {
            let Some(field) = visible.iter().find(|field| field.def.name == token.text) else {
                return Err(ParseError::semantic(
                    token.begin,
                    format!("Unknown field '{}'", token.text),
                    ErrorPriority::WrongParser,
                )
                .into());
            };
            read_field(tb, context, *field, token.begin)?
        };
        parse_object_tail(tb, tokens, info, expectation)
            .map_err(Interrupt::at_least(ErrorPriority::PotentiallyRightParser))
    }
}

/// A name directly followed by `(` is a call, left to [`MethodParser`].
pub(crate) fn name_before_call(tokens: &TokenStream<'_>, what: &str, name: &str) -> Interrupt {
    ParseError::syntax(
        tokens.position(),
        format!("'{name}' is called like a method, not read as a {what}"),
        ErrorPriority::WrongParser,
    )
    .into()
}

fn read_field(
    tb: &Toolbox<'_>,
    context: &MemberContext,
    field: FieldRef<'_>,
    position: usize,
) -> Parsed<ObjectInfo> {
    let def = field.def;
    let (value, setter) = if def.is_static {
        let value = tb
            .store
            .static_value(field.owner, &def.name)
            .unwrap_or_else(|| Value::default_for(&def.ty));
        let setter = ValueSetter::StaticField {
            class: field.owner,
            name: def.name.clone(),
        };
        (value, setter)
    } else {
        let MemberContext::Instance { target, .. } = context else {
            return Err(ParseError::internal(
                position,
                format!("instance field '{}' looked up statically", def.name),
            )
            .into());
        };
        match &target.value {
            Value::Object(object) => {
                let value = object
                    .field(&def.name)
                    .unwrap_or_else(|| Value::default_for(&def.ty));
                let setter = ValueSetter::Field {
                    object: object.clone(),
                    name: def.name.clone(),
                };
                (value, setter)
            }
            Value::Null if tb.evaluates() => {
                return Err(ParseError::evaluation(
                    position,
                    Thrown::null_pointer(format!(
                        "Cannot read field \"{}\" because the value is null",
                        def.name
                    )),
                )
                .into());
            }
            _ => (Value::Indeterminate, ValueSetter::Unevaluated),
        }
    };

    let info = ObjectInfo::new(value, def.ty.clone());
    Ok(if def.is_final {
        info
    } else {
        info.with_setter(setter)
    })
}

fn array_length(tb: &Toolbox<'_>, context: &MemberContext, position: usize) -> Parsed<ObjectInfo> {
    let MemberContext::Instance { target, .. } = context else {
        return Err(ParseError::internal(position, "array length without an array").into());
    };
    let value = match &target.value {
        Value::Array(array) => Value::Int(array.len() as i32),
        Value::Null if tb.evaluates() => {
            return Err(ParseError::evaluation(
                position,
                Thrown::null_pointer("Cannot read the array length because the value is null"),
            )
            .into());
        }
        _ => Value::Indeterminate,
    };
    Ok(ObjectInfo::new(value, Type::int()))
}

pub(crate) struct MethodParser;

impl Parser<ObjectInfo> for MethodParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        this: &ObjectInfo,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        Parser::<MemberContext>::parse(self, tb, tokens, &on_this(this), expectation)
    }
}

impl Parser<MemberContext> for MethodParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        context: &MemberContext,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        let ty = context.lookup_type(tb);
        let visible = methods(tb.store, &ty, context.static_only(), tb.settings.minimum_access);

        let token = read_identifier_or_complete(tokens, expectation, |scope| {
            method_completions(tb, scope, &visible, context)
        })?;

        if tokens.peek_char() != Some('(') {
            return Err(ParseError::syntax(
                tokens.position(),
                format!("Expected `(` after method name '{}'", token.text),
                ErrorPriority::WrongParser,
            )
            .into());
        }
        let candidates: Vec<ExecutableInfo<'_>> = visible
            .iter()
            .filter(|method| method.def.name == token.text)
            .flat_map(|method| ExecutableInfo::for_method(*method))
            .collect();
        if candidates.is_empty() {
            return Err(ParseError::semantic(
                token.begin,
                format!("Unknown method '{}'", token.text),
                ErrorPriority::PotentiallyRightParser,
            )
            .into());
        }

        let raise = Interrupt::at_least(ErrorPriority::PotentiallyRightParser);
        tokens
            .read_char('(')
            .or_fail(ErrorPriority::PotentiallyRightParser)?;
        let receiver = context.receiver();
        let arguments = parse_arguments(tb, tokens, &candidates, &receiver).map_err(&raise)?;
        let method = resolve(tb, &candidates, &arguments, token.text, token.begin)?;
        let result = invoke(tb, &method, &receiver, &arguments, token.begin)?;
        parse_object_tail(tb, tokens, result, expectation).map_err(&raise)
    }
}

/// `name(,,)` with the caret after `(` when there are parameters to fill in.
fn method_completions(
    tb: &Toolbox<'_>,
    scope: &CompletionScope<'_>,
    visible: &[MethodRef<'_>],
    context: &MemberContext,
) -> Vec<CodeCompletion> {
    visible
        .iter()
        .filter_map(|method| {
            let def = method.def;
            let rating = scope.rate(
                tb,
                &def.name,
                Some(&def.return_type),
                context.access_of(def.is_static),
            );
            if !rating.is_match() {
                return None;
            }
            let view = ExecutableInfo::for_method(*method).into_iter().next()?;
            let text = view.completion_text();
            let caret = if def.params.is_empty() {
                text.len()
            } else {
                def.name.len() + 1
            };
            Some(
                CodeCompletion::replacing(&scope.info, CompletionKind::Method, text, rating)
                    .with_display_text(view.signature(tb.store))
                    .with_caret_offset(caret),
            )
        })
        .collect()
}
