//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub(crate) mod certificate;
pub mod connect;
pub mod disconnect;
pub mod link_status;
pub mod ou_search;
pub(crate) mod pipeline;
pub mod validation;
pub mod workflow;

pub use connect::connect;
pub use disconnect::disconnect;
pub use link_status::{LinkStatus, link_status};
pub use ou_search::search_organizational_units;
pub use workflow::{Collaborators, Ports, WorkflowOptions};
