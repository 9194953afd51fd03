use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::{error::StageError, http, model::WeatherReading};

use super::WeatherSource;

/// KMA world-weather page for Seoul.
pub const KMA_SEOUL_URL: &str =
    "https://www.weather.go.kr/w/theme/world-weather.do?continentCode=C01&countryCode=127&cityCode=231";

/// Where the two values live on the page. The portal has no semantic ids, so
/// these are positional and break whenever the markup changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub condition: &'static str,
    pub temperature: &'static str,
}

impl PageLayout {
    pub const WORLD_WEATHER: PageLayout = PageLayout {
        condition: "body > div.container > section > div > div.cont-wrap > div > div > div > div.box-b.clearfix > div.box-left > div.weather-box01.clearfix > ul > li.first > p",
        temperature: "body > div.container > section > div > div.cont-wrap > div > div > div > div.box-b.clearfix > div.box-left > div.weather-box01.clearfix > ul > li:nth-child(2) > span",
    };

    /// Pull both fields out of a page. Empty text counts as a failed extraction.
    pub fn extract(&self, html: &str) -> Result<WeatherReading, StageError> {
        let doc = Html::parse_document(html);

        let condition = select_text(&doc, self.condition, "weather condition")?;
        let temperature = select_text(&doc, self.temperature, "temperature")?;

        Ok(WeatherReading {
            condition,
            temperature,
        })
    }
}

fn select_text(doc: &Html, selector: &str, field: &'static str) -> Result<String, StageError> {
    let selector = Selector::parse(selector).map_err(|e| {
        tracing::error!(field, error = %e, "invalid selector in page layout");
        StageError::Extraction { field }
    })?;

    let text: String = doc
        .select(&selector)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string();

    if text.is_empty() {
        return Err(StageError::Extraction { field });
    }

    Ok(text)
}

#[derive(Debug, Clone)]
pub struct KmaPortal {
    url: String,
    layout: PageLayout,
    http: Client,
}

impl KmaPortal {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_url(KMA_SEOUL_URL)
    }

    pub fn with_url(url: impl Into<String>) -> reqwest::Result<Self> {
        Ok(Self {
            url: url.into(),
            layout: PageLayout::WORLD_WEATHER,
            http: http::client(http::REQUEST_TIMEOUT)?,
        })
    }

    async fn fetch_page(&self) -> Result<String, StageError> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| StageError::Network(format!("request to {} failed: {e}", self.url)))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| StageError::Network(format!("failed to read page body: {e}")))?;

        if !status.is_success() {
            return Err(StageError::Network(format!(
                "weather portal responded with status {}: {}",
                status,
                http::truncate_body(&body),
            )));
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherSource for KmaPortal {
    async fn fetch(&self) -> Result<WeatherReading, StageError> {
        tracing::debug!(url = %self.url, "fetching weather page");

        let page = self.fetch_page().await?;
        let reading = self.layout.extract(&page)?;

        tracing::info!(
            condition = %reading.condition,
            temperature = %reading.temperature,
            "current weather"
        );
        Ok(reading)
    }
}
