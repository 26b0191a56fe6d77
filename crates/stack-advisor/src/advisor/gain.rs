use super::domain::Candidate;
use super::questions::Question;
use std::sync::Arc;

/// Score of asking `question` against `candidates`: `log2(n)` minus the
/// entropy of the answer groups the question induces. Zero for one or no
/// candidates.
pub fn information_gain(question: &Question, candidates: &[Arc<Candidate>]) -> f64 {
    let total = candidates.len();
    if total <= 1 {
        return 0.0;
    }

    let mut groups = vec![0usize; question.answers.len().max(2)];
    for candidate in candidates {
        let index = question.classify(candidate).min(groups.len() - 1);
        groups[index] += 1;
    }

    let gain = (total as f64).log2() - entropy(&groups, total);
    gain.max(0.0)
}

/// Shannon entropy (base 2) of group sizes summing to `total`. Empty groups
/// contribute nothing. Terms are summed in ascending group size so the same
/// partition yields the same bits whatever order its groups come in.
pub fn entropy(groups: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    let mut sizes: Vec<usize> = groups.iter().copied().filter(|count| *count > 0).collect();
    sizes.sort_unstable();

    sizes
        .iter()
        .map(|count| {
            let probability = *count as f64 / total as f64;
            probability * (1.0 / probability).log2()
        })
        .sum()
}

/// Lower bound on yes/no questions needed to single out one of `count`
/// candidates.
pub fn minimum_questions(count: usize) -> u32 {
    if count <= 1 {
        return 0;
    }
    (count as f64).log2().ceil() as u32
}
