pub mod catalog;
pub mod client;
pub mod domain;
pub mod payload;
pub mod results;
pub mod session;
pub mod views;

pub use catalog::OptionCatalog;
pub use client::{GatewayError, HttpScoringClient, ScoringGateway};
pub use domain::{FoundedYearBucket, MultiSelectField, SelectionState, StrategyType};
pub use payload::{assemble, RecommendationRequest};
pub use results::{DecodeError, InvestorProfile, MatchResult, OneOrMany, SimilarStartup};
pub use session::{MatchSession, Notification, NotificationKind, SubmitOutcome};
pub use views::{render, ChipStrip, ProfileCard, ResultCard, SimilarityCard};
