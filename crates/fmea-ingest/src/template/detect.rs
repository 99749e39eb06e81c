//! Template signature matching against flattened header labels.

use fmea_model::{SignatureRule, TemplateSpec};

use crate::header::label_key;

/// Weight of a rule pinned to one column.
pub const POSITIONAL_RULE_SCORE: u32 = 2;
/// Weight of a rule that may match any column.
pub const FREE_RULE_SCORE: u32 = 1;

fn rule_matches(rule: &SignatureRule, keys: &[String]) -> bool {
    let wanted = label_key(&rule.contains);
    match rule.column {
        Some(column) => keys.get(column).is_some_and(|key| key.contains(&wanted)),
        None => keys.iter().any(|key| key.contains(&wanted)),
    }
}

/// Scores how well `labels` fit a template's signature.
///
/// Returns `None` unless every rule matches. Templates without a signature
/// are never detected and must be chosen explicitly.
pub fn signature_score(template: &TemplateSpec, labels: &[String]) -> Option<u32> {
    if template.signature.is_empty() {
        return None;
    }
    let keys: Vec<String> = labels.iter().map(|label| label_key(label)).collect();
    template
        .signature
        .iter()
        .map(|rule| {
            rule_matches(rule, &keys).then_some(if rule.column.is_some() {
                POSITIONAL_RULE_SCORE
            } else {
                FREE_RULE_SCORE
            })
        })
        .sum()
}

/// A scored candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection<'t> {
    pub template: &'t TemplateSpec,
    pub score: u32,
}

/// Picks the highest-scoring candidate; earlier candidates win ties.
pub fn best_match<'t>(
    candidates: impl IntoIterator<Item = Detection<'t>>,
) -> Option<Detection<'t>> {
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(current) if current.score >= candidate.score => Some(current),
        _ => Some(candidate),
    })
}
