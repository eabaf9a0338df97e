//! Span merger and conflict resolver
//!
//! Collapses raw spans from both detectors into a non-overlapping, sorted
//! set of resolved entities. Conflict resolution is a deterministic priority
//! order; agreement between detectors on the same category raises the
//! combined confidence instead of producing duplicates.

use crate::classify::SensitivityClassifier;
use crate::domain::{DetectionSource, RawSpan, ResolvedEntity};
use std::cmp::Ordering;

/// Merge raw spans into resolved entities
///
/// Output invariants: entities are pairwise non-overlapping and sorted
/// ascending by `start`; every input span either backs exactly one entity's
/// evidence or was discarded. Resolution is greedy over a fixed priority:
/// validator-corroborated spans first, then higher confidence, then longer
/// spans, then pattern over statistical source. Ties fall back to position
/// so the result never depends on input order.
pub fn resolve_spans(
    mut spans: Vec<RawSpan>,
    classifier: &SensitivityClassifier,
) -> Vec<ResolvedEntity> {
    spans.retain(|s| !s.is_empty());
    spans.sort_by(compare_priority);

    let mut entities: Vec<ResolvedEntity> = Vec::new();
    let mut claimed: Vec<usize> = Vec::new();

    for (idx, span) in spans.iter().enumerate() {
        if claimed.contains(&idx) {
            continue;
        }

        if entities
            .iter()
            .any(|e| span.start < e.end && e.start < span.end)
        {
            // Loses to an already accepted entity of another category.
            // Same-category overlaps were folded in when the winner won.
            continue;
        }

        let mut confidence = span.confidence;
        let mut evidence = vec![span.clone()];

        // Fold lower-priority overlapping spans of the same category into
        // the winner's evidence, boosting agreement multiplicatively.
        for (other_idx, other) in spans.iter().enumerate().skip(idx + 1) {
            if claimed.contains(&other_idx) {
                continue;
            }
            if other.category == span.category && span.overlaps(other) {
                confidence = combine_confidence(confidence, other.confidence);
                evidence.push(other.clone());
                claimed.push(other_idx);
            }
        }

        let tier = classifier.tier(span.category);
        entities.push(ResolvedEntity {
            start: span.start,
            end: span.end,
            category: span.category,
            confidence,
            tier,
            evidence,
        });
    }

    entities.sort_by_key(|e| (e.start, e.end));
    entities
}

/// Independent-agreement combination, capped at 1.0
fn combine_confidence(a: f32, b: f32) -> f32 {
    (1.0 - (1.0 - a) * (1.0 - b)).min(1.0)
}

/// Priority order for conflict resolution, strongest first
fn compare_priority(a: &RawSpan, b: &RawSpan) -> Ordering {
    b.is_validated()
        .cmp(&a.is_validated())
        .then_with(|| b.confidence.total_cmp(&a.confidence))
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| source_rank(a.source).cmp(&source_rank(b.source)))
        .then_with(|| a.start.cmp(&b.start))
        .then_with(|| a.end.cmp(&b.end))
        .then_with(|| a.category.label().cmp(b.category.label()))
}

fn source_rank(source: DetectionSource) -> u8 {
    match source {
        DetectionSource::Pattern => 0,
        DetectionSource::Statistical => 1,
    }
}
