use crate::ranker::ScoredChunk;

/// Drop every scored chunk whose section title contains any denylist term as
/// a case-insensitive substring. Survivors keep their order and scores; this
/// never re-sorts.
#[must_use]
pub fn apply_denylist(ranked: Vec<ScoredChunk>, denylist: &[String]) -> Vec<ScoredChunk> {
    if denylist.is_empty() {
        return ranked;
    }

    let terms: Vec<String> = denylist.iter().map(|t| t.to_lowercase()).collect();
    let total = ranked.len();

    let kept: Vec<ScoredChunk> = ranked
        .into_iter()
        .filter(|scored| {
            let title = scored.chunk.section_title.to_lowercase();
            !terms.iter().any(|term| title.contains(term.as_str()))
        })
        .collect();

    tracing::debug!(kept = kept.len(), total, "applied title denylist");
    kept
}
