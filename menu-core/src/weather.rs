use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::StageError, model::WeatherReading};

pub mod kma;

pub use kma::{KMA_SEOUL_URL, KmaPortal, PageLayout};

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self) -> Result<WeatherReading, StageError>;
}
