use std::fs;
use std::path::{Path, PathBuf};

use crate::completion::{CodeCompletion, CompletionKind};
use crate::providers::{CompletionProvider, StringCompletionRequest};
use crate::rating::MatchRating;

/// Completes file system paths inside string literals.
///
/// Relative paths resolve against `base_dir`, or against the directory named by an earlier
/// string argument when [`PathCompletionProvider::relative_to_argument`] is set. Directories
/// are suggested with a trailing `/` so completion can continue into them.
#[derive(Debug, Clone)]
pub struct PathCompletionProvider {
    base_dir: PathBuf,
    base_argument: Option<usize>,
}

impl PathCompletionProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            base_argument: None,
        }
    }

    pub fn relative_to_argument(mut self, index: usize) -> Self {
        self.base_argument = Some(index);
        self
    }

    fn base(&self, request: &StringCompletionRequest<'_>) -> PathBuf {
        let from_argument = self
            .base_argument
            .and_then(|idx| request.previous_arguments.get(idx))
            .and_then(|arg| arg.value.as_str());
        match from_argument {
            Some(dir) if Path::new(dir).is_absolute() => PathBuf::from(dir),
            Some(dir) => self.base_dir.join(dir),
            None => self.base_dir.clone(),
        }
    }
}

impl CompletionProvider for PathCompletionProvider {
    fn completions(&self, request: &StringCompletionRequest<'_>) -> Vec<CodeCompletion> {
        let prefix = request.prefix();
        let (dir_part, name_part) = match prefix.rfind('/') {
            Some(idx) => prefix.split_at(idx + 1),
            None => ("", prefix),
        };
        let dir = self.base(request).join(dir_part);

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(
                    target: "jexpr.eval",
                    dir = %dir.display(),
                    error = %err,
                    "cannot list directory for path completion"
                );
                return Vec::new();
            }
        };

        let mut names: Vec<(String, bool)> = entries
            .flatten()
            .map(|entry| {
                let is_dir = entry.file_type().is_ok_and(|ty| ty.is_dir());
                (entry.file_name().to_string_lossy().into_owned(), is_dir)
            })
            .collect();
        names.sort();

        let info = request.info;
        names
            .into_iter()
            .filter_map(|(name, is_dir)| {
                let rating = MatchRating::for_name(name_part, &name);
                if !rating.is_match() {
                    return None;
                }
                let suffix = if is_dir { "/" } else { "" };
                let text = format!("{dir_part}{name}{suffix}");
                Some(CodeCompletion {
                    insertion_range: info.text_begin..info.text_end,
                    caret_position_after_insertion: info.text_begin + text.len(),
                    display_text: format!("{name}{suffix}"),
                    text_to_insert: text,
                    rating,
                    kind: CompletionKind::StringLiteral,
                })
            })
            .collect()
    }
}
