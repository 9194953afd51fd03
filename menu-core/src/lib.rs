//! Core library for the `menu` bot.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The four run stages (weather, clock, recommendation, issue) behind traits
//! - Shared domain models and stage-tagged errors
//!
//! It is used by `menu-cli`, but the pipeline can be driven by any binary.

pub mod clock;
pub mod config;
pub mod error;
mod http;
pub mod menu;
pub mod model;
pub mod pipeline;
pub mod publish;
pub mod recommend;
pub mod weather;

pub use clock::{Clock, FixedClock, SystemClock, read_local_time};
pub use config::{Config, Settings};
pub use error::{Stage, StageError};
pub use menu::{MenuItem, MenuRecommendation};
pub use model::{CreatedIssue, IssueRequest, TimeSnapshot, WeatherReading};
pub use pipeline::{Draft, LOCATION, Pipeline, RunReport};
pub use publish::{GitHubIssues, IssuePublisher};
pub use recommend::{CompletionModel, GeminiModel, Prompt, recommend_menu};
pub use weather::{KmaPortal, WeatherSource};
