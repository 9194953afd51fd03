use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

/// Issue title used for every run.
pub const ISSUE_TITLE: &str = "오늘의 메뉴 추천";

/// Current conditions as scraped from the weather portal. Both fields are
/// kept as the page renders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReading {
    pub condition: String,
    pub temperature: String,
}

/// Local calendar/time fields for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSnapshot {
    pub year: i32,
    /// 1–12
    pub month: u32,
    /// 1–31
    pub date: u32,
    /// 0–6, 0 = Sunday
    pub day: u32,
    /// 0–23
    pub hour: u32,
    /// 0–59
    pub min: u32,
}

impl TimeSnapshot {
    pub fn from_datetime<T: Datelike + Timelike>(dt: &T) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            date: dt.day(),
            day: dt.weekday().num_days_from_sunday(),
            hour: dt.hour(),
            min: dt.minute(),
        }
    }

    /// Korean weekday name without the trailing "요일".
    pub fn weekday_ko(&self) -> &'static str {
        match self.day {
            0 => "일",
            1 => "월",
            2 => "화",
            3 => "수",
            4 => "목",
            5 => "금",
            _ => "토",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IssueRequest {
    pub title: String,
    pub body: String,
}

impl IssueRequest {
    pub fn menu(body: impl Into<String>) -> Self {
        Self {
            title: ISSUE_TITLE.to_string(),
            body: body.into(),
        }
    }
}

/// Whatever the tracker tells us about the new issue. Nothing here is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub html_url: Option<String>,
}
