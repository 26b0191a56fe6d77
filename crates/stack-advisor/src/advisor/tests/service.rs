use chrono::{Duration, Utc};
use std::sync::Arc;

use super::common::*;
use crate::advisor::sessions::{
    AdvisorSessionService, RepositoryError, SessionId, SessionRepository, SessionServiceError,
};
use crate::advisor::{Catalog, SessionStatus};

#[test]
fn start_registers_session_with_full_catalog() {
    let (service, repository) = build_service();

    let view = service.start().expect("session starts");
    assert!(view.session_id.0.starts_with("session-"));
    assert_eq!(view.status_label, "Active");
    assert_eq!(view.state.remaining_count, Catalog::standard().len());
    assert_eq!(
        view.next_question.as_ref().map(|question| question.id),
        Some("mobile_app")
    );
    assert!(view.recommendation.is_none());
    assert!(repository
        .fetch(&view.session_id)
        .expect("fetch succeeds")
        .is_some());
}

#[test]
fn sessions_receive_distinct_ids() {
    let (service, _) = build_service();
    let first = service.start().expect("first session");
    let second = service.start().expect("second session");
    assert_ne!(first.session_id, second.session_id);
}

#[test]
fn each_service_numbers_its_own_sessions() {
    let (first_service, _) = build_service();
    let (second_service, _) = build_service();

    let first = first_service.start().expect("first session");
    let second = second_service.start().expect("second session");
    assert_eq!(first.session_id.0, "session-000001");
    assert_eq!(second.session_id.0, "session-000001");
    assert_eq!(
        first_service.start().expect("follow-up session").session_id.0,
        "session-000002"
    );
}

#[test]
fn expire_idle_drops_only_stale_sessions() {
    let (service, repository) = build_service();
    let stale = service.start().expect("stale session").session_id;
    let fresh = service.start().expect("fresh session").session_id;

    let handle = repository
        .fetch(&stale)
        .expect("fetch succeeds")
        .expect("stale present");
    handle.lock().expect("session lock").updated_at = Utc::now() - Duration::hours(2);

    let removed = service.expire_idle(Duration::minutes(30)).expect("sweep runs");
    assert_eq!(removed, 1);
    assert!(repository.fetch(&stale).expect("fetch succeeds").is_none());
    assert!(repository.fetch(&fresh).expect("fetch succeeds").is_some());
    assert_eq!(service.expire_idle(Duration::minutes(30)).expect("sweep runs"), 0);
}

#[test]
fn answering_as_a_stack_converges_on_it() {
    let (service, _) = build_service();
    let target = Arc::clone(
        service
            .catalog()
            .find("ruby on rails")
            .expect("rails in standard catalog"),
    );
    let id = service.start().expect("session starts").session_id;

    let mut view = service.view(&id).expect("view session");
    while let Some(question) = view.next_question.clone() {
        let answer = question
            .expected_answer(&target)
            .expect("standard questions declare every route");
        view = service
            .answer(&id, question.id, answer)
            .expect("answer applied");
    }

    assert_eq!(view.state.status, SessionStatus::Converged);
    assert_eq!(view.status_label, "Converged");
    assert_eq!(
        view.recommendation.map(|candidate| candidate.name.clone()),
        Some("Ruby on Rails".to_string())
    );
    assert_eq!(view.path_summary.len(), view.state.history.len());
    assert!(view.updated_at >= view.started_at);
}

#[test]
fn unknown_question_is_reported() {
    let (service, _) = build_service();
    let id = service.start().expect("session starts").session_id;

    match service.answer(&id, "favourite_colour", "Blue") {
        Err(SessionServiceError::UnknownQuestion(question_id)) => {
            assert_eq!(question_id, "favourite_colour")
        }
        other => panic!("expected unknown question, got {other:?}"),
    }
    assert_eq!(service.view(&id).expect("view").state.asked_count, 0);
}

#[test]
fn repeated_answer_is_reported_and_ignored() {
    let (service, _) = build_service();
    let id = service.start().expect("session starts").session_id;

    let first = service.answer(&id, "mobile_app", "No").expect("first answer");
    match service.answer(&id, "mobile_app", "Yes") {
        Err(SessionServiceError::AlreadyAnswered(_)) => {}
        other => panic!("expected already answered, got {other:?}"),
    }

    let after = service.view(&id).expect("view");
    assert_eq!(after.state, first.state);
}

#[test]
fn reset_restarts_the_walk() {
    let (service, _) = build_service();
    let id = service.start().expect("session starts").session_id;
    service.answer(&id, "mobile_app", "Yes").expect("answer");

    let view = service.reset(&id).expect("reset");
    assert_eq!(view.state.asked_count, 0);
    assert!(view.path_summary.is_empty());
    assert_eq!(view.state.remaining_count, Catalog::standard().len());
}

#[test]
fn end_removes_the_session() {
    let (service, repository) = build_service();
    let id = service.start().expect("session starts").session_id;

    service.end(&id).expect("end session");
    assert!(repository.fetch(&id).expect("fetch succeeds").is_none());
    assert!(matches!(
        service.view(&id),
        Err(SessionServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn missing_session_is_not_found() {
    let (service, _) = build_service();
    let missing = SessionId("session-missing".to_string());

    assert!(matches!(
        service.next_question(&missing),
        Err(SessionServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
        service.answer(&missing, "mobile_app", "Yes"),
        Err(SessionServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn repository_failures_propagate() {
    let service = AdvisorSessionService::new(
        Arc::new(UnavailableRepository),
        Arc::new(Catalog::standard()),
    );

    assert!(matches!(
        service.start(),
        Err(SessionServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}

#[test]
fn custom_bank_drives_questions() {
    let repository = Arc::new(MemoryRepository::default());
    let service = AdvisorSessionService::with_bank(
        repository,
        Arc::new(catalog(four_stacks())),
        bank(vec![frontend_question()]),
    );

    let id = service.start().expect("session starts").session_id;
    let question = service
        .next_question(&id)
        .expect("lookup")
        .expect("question available");
    assert_eq!(question.id, "primary_focus");

    let view = service.answer(&id, "primary_focus", "No").expect("answer");
    assert_eq!(view.state.remaining_count, 2);
    assert_eq!(view.state.status, SessionStatus::Exhausted);
    assert!(view.next_question.is_none());
}
