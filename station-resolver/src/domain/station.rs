//! Station candidates and hint-based selection.

/// A station record returned by the station lookup.
///
/// Several stations may share a name (one per line serving it), so a
/// lookup returns a list of candidates, each with its own postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub prefecture: String,
    pub line: String,
    pub postal: String,
}

impl Candidate {
    pub fn new(
        name: impl Into<String>,
        prefecture: impl Into<String>,
        line: impl Into<String>,
        postal: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prefecture: prefecture.into(),
            line: line.into(),
            postal: postal.into(),
        }
    }
}

/// Choose the candidate to resolve.
///
/// With a hint, the first candidate whose line or prefecture equals the
/// hint wins, checking the line before the prefecture of each candidate.
/// Without a hint, the first candidate wins. Returns `None` when nothing
/// qualifies.
pub fn select_candidate<'a>(
    candidates: &'a [Candidate],
    hint: Option<&str>,
) -> Option<&'a Candidate> {
    match hint {
        Some(hint) => candidates
            .iter()
            .find(|c| c.line == hint || c.prefecture == hint),
        None => candidates.first(),
    }
}
