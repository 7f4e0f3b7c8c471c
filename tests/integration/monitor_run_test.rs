// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::fixtures::{run_date, site, use_case_for, Workspace, SUBJECT};
use crate::helpers::recording_notifier::RecordingNotifier;
use sitewatch::domain::models::site::{KeywordStatus, SiteStatus};
use sitewatch::utils::errors::MonitorError;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_healthy_sites_send_no_alert() {
    let server = MockServer::start().await;
    mount(&server, "/english/", 200, "home").await;
    mount(&server, "/english/2024-03-05/readings", 200, "Today's Gospel").await;
    mount(&server, "/deutsch/", 200, "home").await;
    mount(&server, "/deutsch/2024-03-05/readings", 200, "Das Evangelium").await;

    let workspace = Workspace::new(&[
        site("English", &server.uri(), "gospel"),
        site("Deutsch", &server.uri(), "EVANGELIUM"),
    ]);
    let notifier = Arc::new(RecordingNotifier::new());
    let use_case = workspace.use_case(notifier.clone(), 1);

    let summary = use_case
        .run(run_date(), workspace.log_writer().await)
        .await
        .unwrap();

    assert_eq!(summary.results.len(), 2);
    assert_eq!(summary.failures(), 0);
    assert!(summary.notification.is_none());
    assert!(notifier.sent().is_empty());

    let log = workspace.log_content();
    assert_eq!(log.lines().count(), 12);
    assert!(log.contains(" - English - Main website: UP\n"));
    assert!(log.contains(&format!(
        "  URL: {}/deutsch/2024-03-05/readings\n",
        server.uri()
    )));
    assert!(log.contains(" - Deutsch - Gospel content: FOUND\n\n"));
}

#[tokio::test]
async fn test_failures_send_exactly_one_alert() {
    let server = MockServer::start().await;
    mount(&server, "/english/", 200, "home").await;
    mount(&server, "/english/2024-03-05/readings", 200, "gospel").await;
    mount(&server, "/italiano/", 500, "").await;
    mount(&server, "/italiano/2024-03-05/readings", 200, "Vangelo").await;
    mount(&server, "/polski/", 200, "home").await;
    mount(&server, "/polski/2024-03-05/readings", 200, "brak czytań").await;

    let workspace = Workspace::new(&[
        site("English", &server.uri(), "gospel"),
        site("Italiano", &server.uri(), "vangelo"),
        site("Polski", &server.uri(), "Ewangelia"),
    ]);
    let notifier = Arc::new(RecordingNotifier::new());
    let use_case = workspace.use_case(notifier.clone(), 1);

    let summary = use_case
        .run(run_date(), workspace.log_writer().await)
        .await
        .unwrap();

    assert_eq!(summary.failures(), 2);
    assert_eq!(summary.results[1].main_status, SiteStatus::Down);
    assert_eq!(summary.results[2].keyword_status, KeywordStatus::NotFound);
    assert_eq!(summary.notification.unwrap().status_code, 201);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    let message = &sent[0];
    assert_eq!(message.subject, SUBJECT);
    assert!(!message.plain_text.contains("English"));
    for language in ["italiano", "polski"] {
        assert!(message.plain_text.contains(&format!("{}/{}/", server.uri(), language)));
        assert!(message
            .plain_text
            .contains(&format!("{}/{}/2024-03-05/readings", server.uri(), language)));
    }
    assert!(message.plain_text.contains("Italiano:\n"));
    assert!(message.plain_text.contains("Polski:\n"));
    assert!(message.html_content.contains("<br>"));
}

#[tokio::test]
async fn test_missing_content_endpoint() {
    let server = MockServer::start().await;
    mount(&server, "/english/", 200, "home").await;

    let workspace = Workspace::new(&[site("English", &server.uri(), "gospel")]);
    let notifier = Arc::new(RecordingNotifier::new());
    let use_case = workspace.use_case(notifier.clone(), 1);

    let summary = use_case
        .run(run_date(), workspace.log_writer().await)
        .await
        .unwrap();

    let result = &summary.results[0];
    assert_eq!(result.main_status, SiteStatus::Up);
    assert_eq!(result.content_status, SiteStatus::Down);
    assert_eq!(result.keyword_status, KeywordStatus::NotFound);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_undecodable_content_is_reported_not_found() {
    let server = MockServer::start().await;
    mount(&server, "/english/", 200, "home").await;
    Mock::given(method("GET"))
        .and(path("/english/2024-03-05/readings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"gospel \xE2\x80".to_vec(), "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let workspace = Workspace::new(&[site("English", &server.uri(), "gospel")]);
    let notifier = Arc::new(RecordingNotifier::new());
    let use_case = workspace.use_case(notifier.clone(), 1);

    let summary = use_case
        .run(run_date(), workspace.log_writer().await)
        .await
        .unwrap();

    assert_eq!(summary.results[0].content_status, SiteStatus::Up);
    assert_eq!(summary.results[0].keyword_status, KeywordStatus::NotFound);
    assert_eq!(notifier.sent().len(), 1);
    assert!(workspace
        .log_content()
        .contains(" - English - Gospel content: NOT_FOUND\n"));
}

#[tokio::test]
async fn test_slow_site_times_out_as_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/english/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    mount(&server, "/english/2024-03-05/readings", 200, "gospel").await;

    let workspace = Workspace::new(&[site("English", &server.uri(), "gospel")]);
    let notifier = Arc::new(RecordingNotifier::new());
    let use_case = workspace.use_case(notifier, 1);

    let summary = use_case
        .run(run_date(), workspace.log_writer().await)
        .await
        .unwrap();

    assert_eq!(summary.results[0].main_status, SiteStatus::Down);
    assert_eq!(summary.results[0].keyword_status, KeywordStatus::Found);
}

#[tokio::test]
async fn test_concurrent_checks_keep_configuration_order() {
    let server = MockServer::start().await;
    let languages = ["Alpha", "Bravo", "Charlie", "Delta"];
    for (i, language) in languages.iter().enumerate() {
        let base = format!("/{}", language.to_lowercase());
        // Earlier sites answer slower so completion order is reversed
        let delay = Duration::from_millis(100 * (languages.len() - i) as u64);
        Mock::given(method("GET"))
            .and(path(format!("{}/", base)))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&server)
            .await;
        mount(&server, &format!("{}/2024-03-05/readings", base), 200, "gospel").await;
    }

    let sites: Vec<_> = languages
        .iter()
        .map(|l| site(l, &server.uri(), "gospel"))
        .collect();
    let workspace = Workspace::new(&sites);
    let use_case = workspace.use_case(Arc::new(RecordingNotifier::new()), 4);

    let summary = use_case
        .run(run_date(), workspace.log_writer().await)
        .await
        .unwrap();

    let order: Vec<_> = summary
        .results
        .iter()
        .map(|r| r.site.language.as_str())
        .collect();
    assert_eq!(order, languages);

    let log = workspace.log_content();
    let positions: Vec<_> = languages
        .iter()
        .map(|l| log.find(&format!(" - {} - Main website", l)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_missing_sites_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let use_case = use_case_for(
        &dir.path().join("missing.json"),
        Arc::new(RecordingNotifier::new()),
        1,
    );
    let log = sitewatch::infrastructure::storage::result_log::ResultLogWriter::open(
        dir.path().join("log.txt"),
    )
    .await
    .unwrap();

    let err = use_case.run(run_date(), log).await.unwrap_err();
    assert!(matches!(err, MonitorError::SiteConfig(_)));
}

#[tokio::test]
async fn test_log_accumulates_across_runs() {
    let server = MockServer::start().await;
    mount(&server, "/english/", 200, "home").await;
    mount(&server, "/english/2024-03-05/readings", 200, "gospel").await;

    let workspace = Workspace::new(&[site("English", &server.uri(), "gospel")]);
    let use_case = workspace.use_case(Arc::new(RecordingNotifier::new()), 1);

    for _ in 0..2 {
        use_case
            .run(run_date(), workspace.log_writer().await)
            .await
            .unwrap();
    }

    assert_eq!(workspace.log_content().lines().count(), 12);
}
