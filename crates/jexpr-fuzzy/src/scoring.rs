/// How well a candidate name matches the text typed so far.
///
/// Variants are ordered best first; the derived `Ord` therefore sorts better matches before
/// worse ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NameMatch {
    /// `candidate == query`.
    Exact,
    /// Equal when ignoring ASCII case.
    IgnoreCase,
    /// `candidate` starts with `query` (ASCII case-insensitive).
    Prefix,
    /// Camel-hump abbreviation (`gVA` for `getValueAsInt`), or a candidate that is itself a
    /// prefix of the typed text.
    Subsequence,
    None,
}

impl NameMatch {
    pub fn is_match(self) -> bool {
        self != NameMatch::None
    }
}

#[inline]
fn fold_byte(b: u8) -> u8 {
    b.to_ascii_lowercase()
}

fn starts_with_case_insensitive(candidate: &[u8], query: &[u8]) -> bool {
    if query.len() > candidate.len() {
        return false;
    }
    candidate
        .iter()
        .zip(query.iter())
        .all(|(&c, &q)| fold_byte(c) == fold_byte(q))
}

#[inline]
fn is_separator(b: u8) -> bool {
    matches!(b, b'_' | b'$' | b'.' | b'#' | b' ')
}

fn compute_word_starts(candidate: &[u8]) -> Vec<bool> {
    let mut starts = Vec::with_capacity(candidate.len());
    for (i, &b) in candidate.iter().enumerate() {
        if i == 0 {
            starts.push(true);
            continue;
        }

        let prev = candidate[i - 1];
        let boundary = is_separator(prev)
            || (prev.is_ascii_lowercase() && b.is_ascii_uppercase())
            || (prev.is_ascii_alphabetic() && b.is_ascii_digit())
            || (prev.is_ascii_digit() && b.is_ascii_alphabetic());
        starts.push(boundary);
    }
    starts
}

/// Camel-hump match of `query` against `candidate`.
///
/// Every query byte must appear in order. The first byte is anchored at the start of the
/// candidate, and upper-case query bytes must land on a word start (`V` in `getValue`).
/// Choosing the leftmost admissible position for every byte is optimal because the constraints
/// only depend on the position being matched.
pub fn camel_hump_match(query: &str, candidate: &str) -> bool {
    let q = query.as_bytes();
    let c = candidate.as_bytes();
    if q.is_empty() {
        return true;
    }
    if q.len() > c.len() || fold_byte(q[0]) != fold_byte(c[0]) {
        return false;
    }

    let word_starts = compute_word_starts(c);
    let mut j = 1;
    for &qb in &q[1..] {
        let needs_word_start = qb.is_ascii_uppercase();
        loop {
            if j >= c.len() {
                return false;
            }
            let admissible =
                fold_byte(c[j]) == fold_byte(qb) && (!needs_word_start || word_starts[j]);
            j += 1;
            if admissible {
                break;
            }
        }
    }
    true
}

/// Classify `candidate` against the typed `query`.
pub fn rate_name(query: &str, candidate: &str) -> NameMatch {
    if candidate == query {
        return NameMatch::Exact;
    }
    if candidate.eq_ignore_ascii_case(query) {
        return NameMatch::IgnoreCase;
    }

    let q = query.as_bytes();
    let c = candidate.as_bytes();
    if starts_with_case_insensitive(c, q) {
        return NameMatch::Prefix;
    }
    if camel_hump_match(query, candidate) {
        return NameMatch::Subsequence;
    }
    // The user typed past an existing name (`xy` while only `x` exists).
    if !c.is_empty() && starts_with_case_insensitive(q, c) {
        return NameMatch::Subsequence;
    }
    NameMatch::None
}
