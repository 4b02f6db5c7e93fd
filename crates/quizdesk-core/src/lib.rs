//! quizdesk-core: Quiz model, structural validation, and answer scoring.
//!
//! This crate defines the quiz data model, the rules a quiz definition must
//! satisfy before it is stored, the grading of submitted answers, and the
//! service layer that ties them to a pluggable store.

pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod service;
pub mod traits;
pub mod validate;
