use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use apppicks_tauri::api::types::{AppsOfTheWeek, GuidelineReport, ModerationReport, QualityStatusPage};
use apppicks_tauri::week::WeekRange;
use apppicks_tauri::{AppPicksError, CatalogClient};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e))
}

/// Serve exactly one canned HTTP response on a local port. The raw request
/// text is sent back through the returned channel.
fn serve_once(status: &str, body: &str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 8192];
        let n = stream.read(&mut buf).unwrap();
        tx.send(String::from_utf8_lossy(&buf[..n]).to_string()).unwrap();
        stream.write_all(response.as_bytes()).unwrap();
    });
    (base, rx)
}

/// Serve one canned response per route, matched on the request path prefix,
/// for as many connections as there are routes.
fn serve_routes(routes: Vec<(&'static str, &'static str, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    thread::spawn(move || {
        for _ in 0..routes.len() {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 8192];
            let n = stream.read(&mut buf).unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let path = request.split_whitespace().nth(1).unwrap_or_default().to_string();
            let (_, status, body) = routes
                .iter()
                .find(|(prefix, _, _)| path.starts_with(prefix))
                .unwrap_or_else(|| panic!("unexpected request for {}", path));
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        }
    });
    base
}

#[test]
fn test_apps_of_the_week_fixture() {
    let parsed: AppsOfTheWeek = serde_json::from_str(&fixture("apps_of_the_week.json")).unwrap();
    let positions: Vec<u8> = parsed.apps.iter().map(|a| a.position).collect();
    assert_eq!(positions, vec![1, 2, 4]);
}

#[test]
fn test_quality_status_fixture() {
    let page: QualityStatusPage = serde_json::from_str(&fixture("quality_status.json")).unwrap();
    let passing: Vec<&str> = page
        .apps
        .iter()
        .filter(|a| a.quality_moderation_status.passes)
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(passing, vec!["org.gimp.GIMP", "org.kde.krita"]);
}

#[test]
fn test_moderation_report_fixture() {
    let raw: ModerationReport = serde_json::from_str(&fixture("moderation_report.json")).unwrap();
    let report = GuidelineReport::from(raw);

    assert_eq!(report.guidelines.len(), 3);
    assert!(report.guidelines[0].read_only);
    assert_eq!(report.guidelines[1].passed, None);
    assert_eq!(report.guidelines[2].passed, Some(false));
    assert_eq!(report.guidelines[2].category, "screenshots");
    assert!(report.review_requested_at.is_some());
}

#[test]
fn test_week_range_matches_iso_calendar() {
    let week = WeekRange::parse("2026-12-31").unwrap();
    assert_eq!((week.year(), week.number()), (2026, 53));
    assert_eq!(week.monday.to_string(), "2026-12-28");
}

#[tokio::test]
async fn test_get_sends_bearer_token() {
    let (base, requests) = serve_once("200 OK", &fixture("apps_of_the_week.json"));
    let client = CatalogClient::new(&base, Some("secret-token".to_string())).unwrap();

    let date = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let week = client.apps_of_the_week(date).await.unwrap();
    assert_eq!(week.apps.len(), 3);

    let request = requests.recv().unwrap();
    assert!(request.starts_with("GET /app-picks/apps-of-the-week/2026-10-19 "));
    assert!(request.to_lowercase().contains("authorization: bearer secret-token"));
}

#[tokio::test]
async fn test_missing_app_of_the_day_is_none() {
    let (base, _requests) = serve_once("404 Not Found", r#"{"detail": "not found"}"#);
    let client = CatalogClient::new(&base, None).unwrap();

    let date = chrono::NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
    assert_eq!(client.app_of_the_day(date).await.unwrap(), None);
}

#[tokio::test]
async fn test_rejected_token_is_unauthorized() {
    let (base, _requests) = serve_once("401 Unauthorized", r#"{"detail": "not logged in"}"#);
    let client = CatalogClient::new(&base, Some("expired".to_string())).unwrap();

    let err = client.user_info().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(matches!(err, AppPicksError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_fullscreen_flag_goes_in_query() {
    let (base, requests) = serve_once("200 OK", "null");
    let client = CatalogClient::new(&base, Some("t".to_string())).unwrap();

    client.set_fullscreen_app("org.gimp.GIMP", true).await.unwrap();
    let request = requests.recv().unwrap();
    assert!(request.starts_with("POST /quality-moderation/org.gimp.GIMP/fullscreen?is_fullscreen_app=true "));
}

#[tokio::test]
async fn test_invalid_position_is_rejected_before_sending() {
    let client = CatalogClient::new("http://127.0.0.1:9", None).unwrap();
    let err = client.set_app_of_the_week("org.gimp.GIMP", 43, 2026, 6).await.unwrap_err();
    assert!(matches!(err, AppPicksError::InvalidInput(_)));

    let err = client.set_app_of_the_week("", 43, 2026, 1).await.unwrap_err();
    assert!(matches!(err, AppPicksError::InvalidInput(_)));
}

#[tokio::test]
async fn test_guideline_report_carries_branding() {
    let base = serve_routes(vec![
        ("/quality-moderation/", "200 OK", fixture("moderation_report.json")),
        ("/appstream/", "200 OK", fixture("appstream_branding.json")),
    ]);
    let client = CatalogClient::new(&base, Some("t".to_string())).unwrap();

    let report = client.guideline_report("org.gimp.GIMP").await.unwrap();
    assert_eq!(report.guidelines.len(), 3);
    let branding = report.branding.unwrap();
    assert_eq!(branding.icon.as_deref(), Some("https://dl.example.org/icons/org.gimp.GIMP.png"));
    assert_eq!(branding.primary_light.as_deref(), Some("#faa298"));
    assert_eq!(branding.primary_dark.as_deref(), Some("#7f2c22"));
}

#[tokio::test]
async fn test_guideline_report_survives_missing_appstream() {
    let base = serve_routes(vec![
        ("/quality-moderation/", "200 OK", fixture("moderation_report.json")),
        ("/appstream/", "500 Internal Server Error", r#"{"detail": "boom"}"#.to_string()),
    ]);
    let client = CatalogClient::new(&base, Some("t".to_string())).unwrap();

    let report = client.guideline_report("org.gimp.GIMP").await.unwrap();
    assert_eq!(report.guidelines.len(), 3);
    assert!(report.branding.is_none());
}
