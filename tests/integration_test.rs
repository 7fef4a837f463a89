use chrono::{Duration as ChronoDuration, Utc};
use folio::client::{ApiClient, FetchCause};
use folio::coordinator::load_portfolio;
use folio::lifecycle::{setup_tracing, PortfolioServer};
use folio::model::{Education, Experience, Profile, Project, Technology};
use folio::render::PortfolioView;
use folio::resource::ResourceKind;
use folio::server::Database;
use pretty_assertions::assert_eq;
use std::net::SocketAddr;
use std::sync::Arc;

fn local() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

fn seeded() -> Database {
    let db = Database::open_in_memory().unwrap();
    let now = Utc::now();

    let mut profile = Profile::new("Ada Lovelace", "Software Engineer", "Writes programs.");
    profile.bio_extended = "Writes programs for engines.".to_string();
    profile.github_url = Some("https://github.com/ada".to_string());
    db.insert_profile(&profile).unwrap();

    let mut older = Project::new("Analytical Engine", "Notes on the engine");
    older.created_at = now - ChronoDuration::days(30);
    let mut newer = Project::new("folio", "This portfolio");
    newer.created_at = now;
    newer.technologies = vec!["Rust".to_string(), "SQLite".to_string()];
    db.insert_project(&older).unwrap();
    db.insert_project(&newer).unwrap();

    db.insert_experience(&Experience::new("Engineer", "Acme", "2022 - Present", 1)).unwrap();
    db.insert_experience(&Experience::new("Intern", "Initech", "2021", 2)).unwrap();
    db.insert_education(&Education::new("BSc Mathematics", "University", "2017 - 2021", 1)).unwrap();

    let mut docker = Technology::new("Docker", 7);
    docker.icon = Some("IconBrandDocker".to_string());
    db.insert_technology(&Technology::new("DataDog", 7)).unwrap();
    db.insert_technology(&docker).unwrap();
    let mut rust = Technology::new("Rust", 1);
    rust.url = Some("https://www.rust-lang.org".to_string());
    db.insert_technology(&rust).unwrap();
    db
}

/// Full path: SQLite store -> axum routes -> reqwest client -> load coordinator -> render.
#[tokio::test]
async fn test_end_to_end_load() {
    setup_tracing();
    let server = PortfolioServer::start(seeded(), local()).await.unwrap();
    let client = ApiClient::new(server.api_url(), ApiClient::DEFAULT_TIMEOUT).unwrap();

    let data = load_portfolio(Arc::new(client)).await.unwrap();

    let profile = data.profile.as_ref().unwrap();
    assert_eq!(profile.name, "Ada Lovelace");
    assert_eq!(profile.linkedin_url, None);

    let titles: Vec<&str> = data.projects.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["folio", "Analytical Engine"]);
    assert_eq!(data.projects[0].technologies, vec!["Rust", "SQLite"]);

    let positions: Vec<&str> = data.experiences.iter().map(|e| e.position.as_str()).collect();
    assert_eq!(positions, vec!["Engineer", "Intern"]);

    let techs: Vec<&str> = data.technologies.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(techs, vec!["Rust", "DataDog", "Docker"]);

    let page = PortfolioView(&data).to_string();
    assert!(page.contains("Writes programs for engines."));
    assert!(page.contains("[rs] Rust <https://www.rust-lang.org>"));
    assert!(page.contains("[docker] Docker\n"));
    assert!(page.find("folio").unwrap() < page.find("Analytical Engine").unwrap());

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_database_has_no_profile() {
    let server = PortfolioServer::start(Database::open_in_memory().unwrap(), local())
        .await
        .unwrap();
    let client = ApiClient::new(server.api_url(), ApiClient::DEFAULT_TIMEOUT).unwrap();

    let err = client.profile().await.unwrap_err();
    assert!(matches!(err.cause, FetchCause::NotFound));

    let data = load_portfolio(Arc::new(client)).await.unwrap();
    assert!(data.profile.is_none());
    assert!(data.projects.is_empty());

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_http_surface() {
    let server = PortfolioServer::start(Database::open_in_memory().unwrap(), local())
        .await
        .unwrap();
    let base = format!("http://{}", server.local_addr());
    let http = reqwest::Client::new();

    let root = http.get(&base).send().await.unwrap();
    assert_eq!(root.status(), 200);
    assert_eq!(root.text().await.unwrap(), "Portfolio API is running!");

    let profile = http.get(format!("{base}/api/profile")).send().await.unwrap();
    assert_eq!(profile.status(), 404);
    let body: serde_json::Value = profile.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"message": "Profile not found"}));

    for kind in ResourceKind::ALL.into_iter().filter(|k| !k.is_singleton()) {
        let response = http
            .get(format!("{base}/api{}", kind.path()))
            .header("Origin", "http://example.com")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200, "{kind}");
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, serde_json::json!([]));
    }

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_on_disk_database_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio.sqlite");

    let db = Database::open(&path).unwrap();
    db.insert_profile(&Profile::new("Ada", "Engineer", "Bio")).unwrap();
    drop(db);

    let server = PortfolioServer::start(Database::open(&path).unwrap(), local())
        .await
        .unwrap();
    let client = ApiClient::new(server.api_url(), ApiClient::DEFAULT_TIMEOUT).unwrap();
    assert_eq!(client.profile().await.unwrap().name, "Ada");

    server.shutdown().await.unwrap();
}
