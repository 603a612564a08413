//! Final filtering and de-duplication of candidate lists.

use indexmap::IndexMap;

use super::types::CompletionCandidate;

/// Drops undotted candidates whose label does not start with the typed word.
///
/// Comparison ignores case. Dotted labels (`e.ID`, `HR.EMP`) are kept as-is
/// since the host matches them against the whole dotted token.
pub fn filter_by_typed_prefix(candidates: &mut Vec<CompletionCandidate>, typed: &str) {
    if typed.is_empty() {
        return;
    }
    let typed = typed.to_uppercase();
    candidates.retain(|candidate| {
        candidate.label.contains('.') || candidate.label.to_uppercase().starts_with(&typed)
    });
}

/// Collapses candidates sharing a label.
///
/// The first occurrence fixes the position, the last one supplies the value.
pub fn dedupe(candidates: Vec<CompletionCandidate>) -> Vec<CompletionCandidate> {
    let mut by_label: IndexMap<String, CompletionCandidate> =
        IndexMap::with_capacity(candidates.len());
    for candidate in candidates {
        by_label.insert(candidate.label.clone(), candidate);
    }
    by_label.into_values().collect()
}
