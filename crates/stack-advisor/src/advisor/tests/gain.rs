use super::common::*;
use crate::advisor::questions::ScoringKind;
use crate::advisor::{apply_answer, entropy, information_gain, minimum_questions};

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn gain_is_zero_without_choice_to_make() {
    let question = frontend_question();
    approx(information_gain(&question, &[]), 0.0);

    let single = shared(vec![stack("Django", &["backend"])]);
    approx(information_gain(&question, &single), 0.0);
}

#[test]
fn even_split_scores_log_n_minus_one_bit() {
    let candidates = shared(four_stacks());
    approx(information_gain(&frontend_question(), &candidates), 1.0);
}

#[test]
fn non_splitting_question_scores_full_log_n() {
    let candidates = shared(four_stacks());
    let question = boolean("always_yes", ScoringKind::Fixed(1.0));
    approx(information_gain(&question, &candidates), 2.0);
}

#[test]
fn half_score_is_treated_as_negative_answer() {
    let candidates = shared(four_stacks());
    let question = boolean("coin_edge", ScoringKind::Fixed(0.5));

    approx(information_gain(&question, &candidates), 2.0);
    assert_eq!(apply_answer(&candidates, &question, "No").len(), 4);
    assert!(apply_answer(&candidates, &question, "Yes").is_empty());
}

#[test]
fn multiple_choice_partitions_by_tag_routes() {
    let candidates = shared(vec![
        stack("Next", &["vercel"]),
        stack("Lambda", &["aws"]),
        stack("Compose", &["docker"]),
        stack("Plain", &["python"]),
    ]);
    // groups: edge 1, cloud 1, self-hosted 2 -> entropy 1.5
    approx(information_gain(&deployment_question(), &candidates), 0.5);
}

#[test]
fn entropy_ignores_empty_groups() {
    approx(entropy(&[0, 4], 4), 0.0);
    approx(entropy(&[2, 0, 2], 4), 1.0);
    approx(entropy(&[], 0), 0.0);
}

#[test]
fn entropy_ignores_group_order() {
    for groups in [[3, 2, 2], [5, 3, 1], [7, 4, 2], [11, 6, 5]] {
        let total: usize = groups.iter().sum();
        let mut reversed = groups;
        reversed.reverse();
        assert_eq!(
            entropy(&groups, total).to_bits(),
            entropy(&reversed, total).to_bits()
        );
    }
}

#[test]
fn gain_stays_finite_for_unlabelled_questions() {
    let candidates = shared(four_stacks());
    let mut question = deployment_question();
    question.answers.clear();

    let gain = information_gain(&question, &candidates);
    assert!(gain.is_finite());
    assert!(gain >= 0.0);
}

#[test]
fn minimum_questions_is_ceil_log2() {
    assert_eq!(minimum_questions(0), 0);
    assert_eq!(minimum_questions(1), 0);
    assert_eq!(minimum_questions(2), 1);
    assert_eq!(minimum_questions(3), 2);
    assert_eq!(minimum_questions(8), 3);
    assert_eq!(minimum_questions(15), 4);
}
