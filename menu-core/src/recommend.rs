use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::StageError,
    model::{TimeSnapshot, WeatherReading},
};

pub mod gemini;
pub mod prompt;

pub use gemini::GeminiModel;
pub use prompt::Prompt;

/// A text-completion backend.
#[async_trait]
pub trait CompletionModel: Send + Sync + Debug {
    async fn generate(&self, prompt: &Prompt) -> Result<String, StageError>;
}

/// Ask `model` for three delivery menus suited to the time and weather.
///
/// The reply is returned as-is apart from surrounding whitespace; checking it
/// against the template is [`crate::menu::MenuRecommendation`]'s job.
pub async fn recommend_menu(
    model: &dyn CompletionModel,
    location: &str,
    time: &TimeSnapshot,
    weather: &WeatherReading,
) -> Result<String, StageError> {
    let prompt = Prompt::new(location, time, weather);
    tracing::debug!(content = %prompt.content, "built prompt");

    let text = model.generate(&prompt).await?;
    let text = text.trim();

    if text.is_empty() {
        return Err(StageError::Generation("model returned an empty response".into()));
    }

    tracing::info!("recommended menu:\n{text}");
    Ok(text.to_string())
}
