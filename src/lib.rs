//! Student stress assessment and coping recommendations.
//!
//! Fuses a base stress prediction with emotional state, trigger events,
//! free-text heuristics, and course context into a stress tier, then builds
//! tiered recommendations and nearby mental-health resources.

pub mod baseline;
pub mod batch;
pub mod config;
pub mod course;
pub mod emotion;
pub mod engine;
pub mod error;
pub mod location;
pub mod models;
pub mod recommend;
pub mod reference;
pub mod report;
pub mod risk;

pub use engine::RecommendationEngine;
pub use error::{AdvisorError, Result};
pub use models::{AssessmentRequest, CompositeResult, StressTier, UserProfile};
pub use reference::ReferenceData;
