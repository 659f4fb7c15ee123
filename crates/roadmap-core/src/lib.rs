//! roadmap-core: self-assessment scoring and placement recommendation.
//!
//! The engine is two pure functions: [`scoring::aggregate`] turns an
//! [`answers::AnswerSet`] and a [`model::QuestionBank`] into per-domain
//! competency estimates, and [`recommend::recommend`] collapses those into a
//! single curriculum stage with a confidence value. Everything else in this
//! crate loads the configuration those functions take and persists what they
//! return.

pub mod answers;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod recommend;
pub mod reference;
pub mod report;
pub mod scoring;
pub mod statistics;

pub use answers::AnswerSet;
pub use model::{Assessment, Domain, Level, Question, QuestionBank, StageTable, Strategy};
pub use recommend::{recommend, Recommendation};
pub use scoring::{aggregate, AggregateResult, DomainScore};
