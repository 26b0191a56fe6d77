//! Session storage, service and HTTP routes around [`super::Walker`].

pub mod repository;
pub mod router;
pub mod service;

pub use repository::{
    RepositoryError, SessionHandle, SessionId, SessionRecord, SessionRepository,
};
pub use router::{advisor_router, AnswerRequest};
pub use service::{AdvisorSessionService, SessionServiceError, SessionView};
