use super::super::domain::Candidate;

/// Scores strictly above this value count as the positive answer; exactly 0.5
/// is negative.
pub const POSITIVE_THRESHOLD: f64 = 0.5;

/// Closed set of scoring rules a question can be bound to.
///
/// Every variant is a pure function of the candidate, so two evaluations of the
/// same question against the same candidate always agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoringKind {
    /// 1.0 when the candidate carries any of the tags.
    AnyTag(&'static [&'static str]),
    /// 1.0 when the candidate carries the tag.
    Tag(&'static str),
    /// 1.0 when the lowercased candidate name contains any of the fragments.
    NameContainsAny(&'static [&'static str]),
    /// Same score for every candidate.
    Fixed(f64),
    /// Routes a candidate to the first answer whose tag list it intersects,
    /// else to `fallback`. Route `i` belongs to answer `i`.
    TagRoutes {
        routes: &'static [&'static [&'static str]],
        fallback: usize,
    },
}

impl ScoringKind {
    /// Affinity with the positive (first) answer, always within [0, 1].
    pub fn affinity(&self, candidate: &Candidate) -> f64 {
        let raw = match self {
            ScoringKind::AnyTag(tags) => indicator(candidate.has_any_tag(tags)),
            ScoringKind::Tag(tag) => indicator(candidate.has_tag(tag)),
            ScoringKind::NameContainsAny(fragments) => {
                let name = candidate.name.to_lowercase();
                indicator(fragments.iter().any(|fragment| name.contains(fragment)))
            }
            ScoringKind::Fixed(score) => *score,
            ScoringKind::TagRoutes { .. } => indicator(self.route(candidate, usize::MAX) == 0),
        };

        if raw.is_nan() {
            0.0
        } else {
            raw.clamp(0.0, 1.0)
        }
    }

    /// Index of the answer this candidate is expected to give among
    /// `answer_count` declared answers. Never exceeds `answer_count - 1`.
    pub fn route(&self, candidate: &Candidate, answer_count: usize) -> usize {
        let last = answer_count.saturating_sub(1);
        let index = match self {
            ScoringKind::TagRoutes { routes, fallback } => routes
                .iter()
                .position(|tags| candidate.has_any_tag(tags))
                .unwrap_or(*fallback),
            _ => {
                if self.affinity(candidate) > POSITIVE_THRESHOLD {
                    0
                } else {
                    1
                }
            }
        };
        index.min(last)
    }
}

fn indicator(matched: bool) -> f64 {
    if matched {
        1.0
    } else {
        0.0
    }
}
