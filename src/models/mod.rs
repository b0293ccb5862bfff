//! Domain models
//!
//! This module contains the judging domain models shared by the judges,
//! the service layer and the HTTP handlers.

pub mod judge_request;
pub mod language;
pub mod test_case;
pub mod verdict;

pub use judge_request::*;
pub use language::*;
pub use test_case::*;
pub use verdict::*;
