//! `{Top#Child#Leaf}` paths into the custom hierarchy of the settings.

use jexpr_syntax::{TokenError, TokenStream};

use crate::completion::{CodeCompletion, CompletionKind, Completions};
use crate::expectation::Expectation;
use crate::object_info::ObjectInfo;
use crate::object_tree::ObjectTreeNode;
use crate::outcome::{token_error, ErrorPriority, Interrupt, ParseError, ParseResult, Parsed, TokenResultExt};
use crate::parsers::tail::parse_object_tail;
use crate::parsers::{CompletionScope, Parser};
use crate::rating::AccessMatch;
use crate::toolbox::Toolbox;

const SEPARATOR: char = '#';
const DELIMITERS: [char; 2] = [SEPARATOR, '}'];

pub(crate) struct CustomHierarchyParser;

impl Parser<ObjectInfo> for CustomHierarchyParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        _this: &ObjectInfo,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        let Some(root) = tb.settings.custom_hierarchy.as_deref() else {
            return Err(ParseError::syntax(
                tokens.position(),
                "No custom hierarchy is available",
                ErrorPriority::WrongParser,
            )
            .into());
        };
        tokens.read_char('{').or_fail(ErrorPriority::WrongParser)?;

        let mut node = root;
        loop {
            node = read_child(tb, tokens, node, expectation)?;
            let separator = tokens
                .read_one_of(&["#", "}"])
                .map_err(|err| token_error(err, ErrorPriority::RightParser))?;
            if separator.text == "}" {
                break;
            }
        }

        let Some((value, declared_type)) = node.value() else {
            return Err(ParseError::semantic(
                tokens.position(),
                format!("'{}' is a group without a value", node.name()),
                ErrorPriority::RightParser,
            )
            .into());
        };
        let info = ObjectInfo::new(value.clone(), declared_type.clone());
        parse_object_tail(tb, tokens, info, expectation)
            .map_err(Interrupt::at_least(ErrorPriority::RightParser))
    }
}

fn read_child<'n>(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    parent: &'n ObjectTreeNode,
    expectation: &Expectation,
) -> Parsed<&'n ObjectTreeNode> {
    let token = match tokens.read_until(&DELIMITERS) {
        Ok(token) => token,
        Err(TokenError::Caret(info)) => {
            let scope = CompletionScope {
                info,
                prefix: info.prefix(tokens.text()).trim(),
                expectation,
            };
            let found: Vec<CodeCompletion> = parent
                .children()
                .iter()
                .filter_map(|child| {
                    let ty = child.value().map(|(_, ty)| ty);
                    scope.suggest(tb, child.name(), ty, AccessMatch::Full, CompletionKind::ObjectTreeNode)
                })
                .collect();
            return Err(Interrupt::Completions(Completions::new(found)));
        }
        Err(err) => return Err(token_error(err, ErrorPriority::RightParser)),
    };

    let name = token.text.trim();
    parent.child(name).ok_or_else(|| {
        ParseError::semantic(
            token.begin,
            format!("Unknown hierarchy node '{name}'"),
            ErrorPriority::RightParser,
        )
        .into()
    })
}
