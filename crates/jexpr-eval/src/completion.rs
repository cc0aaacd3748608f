use std::ops::Range;

use jexpr_syntax::CompletionInfo;

use crate::rating::MatchRating;

/// What a completion inserts. Declaration order is the tie-break priority after the rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompletionKind {
    Variable,
    ObjectTreeNode,
    Field,
    Method,
    Class,
    Package,
    Keyword,
    /// Text inside a string literal, supplied by a completion provider.
    StringLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCompletion {
    /// Byte range of the text the completion replaces.
    pub insertion_range: Range<usize>,
    pub caret_position_after_insertion: usize,
    pub text_to_insert: String,
    pub display_text: String,
    pub rating: MatchRating,
    pub kind: CompletionKind,
}

impl CodeCompletion {
    /// Replaces the token described by `info` with `text`; the caret ends up after it.
    pub fn replacing(
        info: &CompletionInfo,
        kind: CompletionKind,
        text: impl Into<String>,
        rating: MatchRating,
    ) -> Self {
        let text = text.into();
        Self {
            insertion_range: info.token_begin..info.token_end,
            caret_position_after_insertion: info.token_begin + text.len(),
            display_text: text.clone(),
            text_to_insert: text,
            rating,
            kind,
        }
    }

    pub fn with_display_text(mut self, display: impl Into<String>) -> Self {
        self.display_text = display.into();
        self
    }

    /// Place the caret `offset` bytes into the inserted text.
    pub fn with_caret_offset(mut self, offset: usize) -> Self {
        self.caret_position_after_insertion = self.insertion_range.start + offset;
        self
    }

    fn key(&self) -> (usize, usize, &str, &str, CompletionKind) {
        (
            self.insertion_range.start,
            self.insertion_range.end,
            &self.text_to_insert,
            &self.display_text,
            self.kind,
        )
    }
}

/// Parameter hints for the executable call the caret is in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableArgumentInfo {
    pub current_argument_index: usize,
    /// Every candidate with its signature and whether it still fits the arguments before the
    /// caret.
    pub signatures: Vec<(String, bool)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completions {
    pub items: Vec<CodeCompletion>,
    pub argument_info: Option<ExecutableArgumentInfo>,
}

impl Completions {
    pub fn new(items: Vec<CodeCompletion>) -> Self {
        Self {
            items,
            argument_info: None,
        }
    }

    /// Union with `other`. Duplicates keep the better rating; the first argument info wins.
    pub fn merge(&mut self, other: Completions) {
        for item in other.items {
            match self.items.iter_mut().find(|existing| existing.key() == item.key()) {
                Some(existing) => {
                    if item.rating < existing.rating {
                        existing.rating = item.rating;
                    }
                }
                None => self.items.push(item),
            }
        }
        if self.argument_info.is_none() {
            self.argument_info = other.argument_info;
        }
    }

    /// Best rating first, then by kind; remaining ties keep encounter order.
    pub fn sort(&mut self) {
        self.items
            .sort_by(|a, b| a.rating.cmp(&b.rating).then(a.kind.cmp(&b.kind)));
    }
}
