use crate::{
    clock::Clock,
    error::StageError,
    menu::MenuRecommendation,
    model::{CreatedIssue, IssueRequest, TimeSnapshot, WeatherReading},
    publish::IssuePublisher,
    recommend::{CompletionModel, recommend_menu},
    weather::WeatherSource,
};

/// The one city this bot knows about.
pub const LOCATION: &str = "서울";

/// Everything produced before publishing.
#[derive(Debug, Clone)]
pub struct Draft {
    pub weather: WeatherReading,
    pub time: TimeSnapshot,
    pub recommendation: MenuRecommendation,
}

impl Draft {
    pub fn issue(&self) -> IssueRequest {
        IssueRequest::menu(self.recommendation.issue_body())
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub draft: Draft,
    pub issue: CreatedIssue,
}

/// Weather → clock → recommendation → issue, strictly in that order.
#[derive(Debug)]
pub struct Pipeline {
    weather: Box<dyn WeatherSource>,
    clock: Box<dyn Clock>,
    model: Box<dyn CompletionModel>,
}

impl Pipeline {
    pub fn new(
        weather: Box<dyn WeatherSource>,
        clock: Box<dyn Clock>,
        model: Box<dyn CompletionModel>,
    ) -> Self {
        Self {
            weather,
            clock,
            model,
        }
    }

    /// Run every stage except publishing.
    pub async fn prepare(&self) -> Result<Draft, StageError> {
        let weather = self.weather.fetch().await?;
        let time = self.clock.now();
        tracing::debug!(?time, "read local time");

        let text = recommend_menu(self.model.as_ref(), LOCATION, &time, &weather).await?;
        let recommendation = MenuRecommendation::parse(text);
        if !recommendation.is_well_formed() {
            tracing::warn!(
                items = recommendation.items().len(),
                "recommendation does not follow the template, wrapping raw text"
            );
        }

        Ok(Draft {
            weather,
            time,
            recommendation,
        })
    }

    /// Run all four stages. Each call files a new issue.
    pub async fn run(&self, publisher: &dyn IssuePublisher) -> Result<RunReport, StageError> {
        let draft = self.prepare().await?;
        let issue = publisher.publish(&draft.issue()).await?;
        Ok(RunReport { draft, issue })
    }
}
