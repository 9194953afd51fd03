//! End-to-end runs of the pipeline against mock weather, Gemini and GitHub servers.

use menu_core::{FixedClock, GeminiModel, GitHubIssues, KmaPortal, Pipeline, Stage, TimeSnapshot};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPLY: &str = "# 오늘 뭐 먹지?</br>2024년 6월 1일 12시 30분 서울의 날씨는 18℃이고, 맑아요. 오늘의 점메추는 산뜻한 메뉴!</br>1. **냉면**: 시원하게</br>2. **포케**: 가볍게</br>3. **쌀국수**: 든든하게</br>";

fn weather_page(condition: &str, temperature: &str) -> String {
    format!(
        r#"<html><body><div class="container"><section><div><div class="cont-wrap">
<div><div><div><div class="box-b clearfix"><div class="box-left"><div class="weather-box01 clearfix">
<ul><li class="first"><p>{condition}</p></li><li><span>{temperature}</span></li></ul>
</div></div></div></div></div></div>
</div></div></section></div></body></html>"#
    )
}

fn lunchtime() -> FixedClock {
    FixedClock(TimeSnapshot {
        year: 2024,
        month: 6,
        date: 1,
        day: 6,
        hour: 12,
        min: 30,
    })
}

struct Servers {
    weather: MockServer,
    gemini: MockServer,
    github: MockServer,
}

impl Servers {
    async fn start() -> Self {
        Self {
            weather: MockServer::start().await,
            gemini: MockServer::start().await,
            github: MockServer::start().await,
        }
    }

    fn pipeline(&self) -> Pipeline {
        Pipeline::new(
            Box::new(KmaPortal::with_url(self.weather.uri()).unwrap()),
            Box::new(lunchtime()),
            Box::new(GeminiModel::new_with_base_url("gem-key", self.gemini.uri()).unwrap()),
        )
    }

    fn publisher(&self) -> GitHubIssues {
        GitHubIssues::new_with_base_url("ghp_token", "octocat", "lunch", self.github.uri()).unwrap()
    }

    async fn serve_weather(&self, condition: &str, temperature: &str) {
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(weather_page(condition, temperature), "text/html; charset=utf-8"),
            )
            .mount(&self.weather)
            .await;
    }

    async fn serve_reply(&self, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-exp-1206:generateContent"))
            .and(header("x-goog-api-key", "gem-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": format!("\n{REPLY}\n") }] } }]
            })))
            .expect(expected_calls)
            .mount(&self.gemini)
            .await;
    }
}

#[tokio::test]
async fn full_run_files_the_model_reply() {
    let servers = Servers::start().await;
    servers.serve_weather("맑음", "18").await;
    servers.serve_reply(1).await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/lunch/issues"))
        .and(header("Authorization", "Bearer ghp_token"))
        .and(body_partial_json(json!({ "title": "오늘의 메뉴 추천", "body": REPLY })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 3,
            "html_url": "https://github.com/octocat/lunch/issues/3"
        })))
        .expect(1)
        .mount(&servers.github)
        .await;

    let report = servers
        .pipeline()
        .run(&servers.publisher())
        .await
        .expect("run succeeds");

    assert_eq!(report.draft.weather.condition, "맑음");
    assert_eq!(report.draft.recommendation.text(), REPLY);
    assert_eq!(report.draft.recommendation.items().len(), 3);
    assert_eq!(report.issue.number, Some(3));

    let requests = servers.gemini.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let content = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(content.contains("2024.년6월.1일 12시 30분 서울의 날씨는 맑음이고 온도는 18도야"));
}

#[tokio::test]
async fn changed_page_layout_stops_the_run() {
    let servers = Servers::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>점검 중</body></html>"))
        .mount(&servers.weather)
        .await;
    servers.serve_reply(0).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&servers.github)
        .await;

    let err = servers.pipeline().run(&servers.publisher()).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Weather);
}

#[tokio::test]
async fn rejected_issue_reports_github_message() {
    let servers = Servers::start().await;
    servers.serve_weather("흐림", "21.0").await;
    servers.serve_reply(1).await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        )
        .expect(1)
        .mount(&servers.github)
        .await;

    let err = servers.pipeline().run(&servers.publisher()).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Publish);
    assert!(err.to_string().contains("Bad credentials"));
}

#[tokio::test]
async fn two_runs_create_two_issues() {
    let servers = Servers::start().await;
    servers.serve_weather("맑음", "18").await;
    servers.serve_reply(2).await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/lunch/issues"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&servers.github)
        .await;

    let pipeline = servers.pipeline();
    let publisher = servers.publisher();
    pipeline.run(&publisher).await.unwrap();
    pipeline.run(&publisher).await.unwrap();
}
