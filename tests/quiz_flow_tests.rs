// Router-level tests for the quiz flow
//
// Tests cover:
// - Session start, cookie transport and redirects
// - Submit -> result round trip through the redirect URL
// - Client and server error boundaries for piece ids
// - Public profile view
// - Lazy session creation
// - Image proxy and stylesheet

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use incipit::api::{app_state::AppState, build_app};
use incipit::config::{AppConfig, NameMatchPolicy, SessionCreation};
use incipit::models::CatalogEntry;
use incipit::services::Catalog;
use std::io::Write;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestApp {
    router: Router,
    state: AppState,
    _stylesheet: tempfile::NamedTempFile,
}

fn catalog(image_base: &str) -> Catalog {
    Catalog::from_entries(vec![
        CatalogEntry::new(
            0,
            "Bach",
            "Toccata and Fugue",
            "D minor",
            &format!("{}/scores/0.png", image_base),
        ),
        CatalogEntry::new(
            0,
            "Beethoven",
            "Moonlight Sonata",
            "C# minor",
            &format!("{}/scores/1.png", image_base),
        ),
        CatalogEntry::new(
            0,
            "Mozart",
            "Eine kleine Nachtmusik",
            "G major",
            &format!("{}/scores/2.png", image_base),
        ),
    ])
    .unwrap()
}

fn test_app_with(mut config: AppConfig, image_base: &str) -> TestApp {
    let mut stylesheet = tempfile::NamedTempFile::new().unwrap();
    write!(stylesheet, "body {{ font-family: serif; }}").unwrap();
    config.catalog.stylesheet = stylesheet.path().to_path_buf();
    config.images.timeout = 2;

    let state = AppState::new(config, catalog(image_base)).unwrap();
    TestApp {
        router: build_app(state.clone()),
        state,
        _stylesheet: stylesheet,
    }
}

fn test_app() -> TestApp {
    test_app_with(AppConfig::development(), "http://127.0.0.1:9")
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, uri: &str, cookie: Option<&str>, form: &str) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap())
            .await
    }

    /// Start a named session and return the `sid=...` cookie pair.
    async fn start(&self, name: &str) -> String {
        let response = self
            .post_form("/start", None, &format!("name={}", name))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/piece");
        cookie_pair(&response)
    }
}

fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .unwrap()
        .to_string()
}

fn cookie_pair(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn token_of(cookie: &str) -> &str {
    cookie.split_once('=').unwrap().1
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn shown_piece(html: &str) -> usize {
    let marker = "name=\"id\" value=\"";
    let start = html.find(marker).expect("hidden id field") + marker.len();
    let end = start + html[start..].find('"').unwrap();
    html[start..end].parse().unwrap()
}

fn answer(piece: usize) -> &'static str {
    match piece {
        0 => "name=toccata+and+fugue&composer=bach&key=d+minor",
        1 => "name=Moonlight+Sonata&composer=Beethoven&key=C%23+minor",
        _ => "name=Eine+kleine+Nachtmusik&composer=MOZART&key=g+major",
    }
}

#[tokio::test]
async fn test_start_page_without_session() {
    let app = test_app();
    let response = app.get("/", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
    assert!(body_text(response).await.contains("action=\"/start\""));
}

#[tokio::test]
async fn test_full_round() {
    let app = test_app();
    let cookie = app.start("Clara").await;

    let response = app.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/piece");

    let response = app.get("/piece", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let piece = shown_piece(&body_text(response).await);

    let form = format!("{}&id={}", answer(piece), piece);
    let response = app.post_form("/submit", Some(&cookie), &form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let result_url = location(&response);
    assert_eq!(
        result_url,
        format!("/result?results=c%2Cn2%2Ck&item={}", piece)
    );

    let response = app.get(&result_url, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Perfect!"));
    assert!(html.contains("Clara: 10 points from 1 pieces"));

    // Next piece differs from the one just answered
    let response = app.get("/piece", Some(&cookie)).await;
    assert_ne!(shown_piece(&body_text(response).await), piece);
}

#[tokio::test]
async fn test_partial_answer_scores_three() {
    let app = test_app();
    let cookie = app.start("").await;

    let response = app
        .post_form("/submit", Some(&cookie), "name=moonlight&composer=&key=&id=1")
        .await;
    assert_eq!(location(&response), "/result?results=n1&item=1");

    let session = app
        .state
        .session_service
        .lookup(token_of(&cookie))
        .await
        .unwrap();
    assert_eq!(session.score, 3);
    assert_eq!(session.piece_count, 1);
    assert_eq!(session.last_piece, Some(1));
}

#[tokio::test]
async fn test_substring_policy_scores_fragment() {
    let mut config = AppConfig::development();
    config.scoring.name_policy = NameMatchPolicy::Substring;
    let app = test_app_with(config, "http://127.0.0.1:9");
    let cookie = app.start("").await;

    let response = app
        .post_form("/submit", Some(&cookie), "name=light+son&id=1")
        .await;
    assert_eq!(location(&response), "/result?results=n1&item=1");

    // Same guess under word overlap earns nothing
    let app = test_app();
    let cookie = app.start("").await;
    let response = app
        .post_form("/submit", Some(&cookie), "name=light+son&id=1")
        .await;
    assert_eq!(location(&response), "/result?results=n0&item=1");
}

#[tokio::test]
async fn test_tab_separated_guess_keeps_word_boundaries() {
    let app = test_app();
    let cookie = app.start("").await;

    let response = app
        .post_form("/submit", Some(&cookie), "name=Toccata%09Fugue&id=0")
        .await;
    assert_eq!(location(&response), "/result?results=n1&item=0");
}

#[tokio::test]
async fn test_missing_session_redirects_home() {
    let app = test_app();

    for response in [
        app.get("/piece", None).await,
        app.get("/piece", Some("sid=never-issued")).await,
        app.get("/result?results=c&item=0", None).await,
        app.post_form("/submit", None, "name=x&id=0").await,
        app.post_form("/submit", Some("sid=never-issued"), "name=x&id=0")
            .await,
    ] {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }
}

#[tokio::test]
async fn test_bad_piece_ids() {
    let app = test_app();
    let cookie = app.start("Clara").await;

    let response = app
        .post_form("/submit", Some(&cookie), "name=x&id=abc")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.post_form("/submit", Some(&cookie), "name=x").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.post_form("/submit", Some(&cookie), "name=x&id=3").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = app.get("/result?results=c&item=x", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.get("/result?results=c&item=3", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Upper bound itself is valid
    let response = app.get("/result?results=c&item=2", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let session = app
        .state
        .session_service
        .lookup(token_of(&cookie))
        .await
        .unwrap();
    assert_eq!(session.piece_count, 0);
}

#[tokio::test]
async fn test_malformed_result_token_scores_zero() {
    let app = test_app();
    let cookie = app.start("").await;

    let response = app
        .get("/result?results=%2C%2Cn9%2Czz&item=0", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("+0 points"));
}

#[tokio::test]
async fn test_start_rejects_overlong_name() {
    let app = test_app();
    let response = app
        .post_form("/start", None, &format!("name={}", "x".repeat(65)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_public_profile() {
    let app = test_app();
    let cookie = app.start("Robert").await;
    app.post_form("/submit", Some(&cookie), "composer=bach&id=0")
        .await;

    let session = app
        .state
        .session_service
        .lookup(token_of(&cookie))
        .await
        .unwrap();
    let uri = format!(
        "/profile?user={}",
        urlencoding::encode(&session.view_token)
    );

    let response = app.get(&uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public"
    );
    let html = body_text(response).await;
    assert!(html.contains("Robert"));
    assert!(html.contains("<dd>3</dd>"));

    let response = app.get("/profile?user=nobody", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/profile", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lazy_session_creation() {
    let mut config = AppConfig::development();
    config.session.creation = SessionCreation::Lazy;
    let app = test_app_with(config, "http://127.0.0.1:9");

    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/piece");

    let response = app.get("/piece", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = cookie_pair(&response);

    let session = app
        .state
        .session_service
        .lookup(token_of(&cookie))
        .await
        .unwrap();
    assert_eq!(session.display_name, "");

    // Returning visitor keeps the same session
    let response = app.get("/piece", Some(&cookie)).await;
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(app.state.session_service.count().await, 1);
}

#[tokio::test]
async fn test_image_proxy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scores/0.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(b"PNGDATA".to_vec()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/scores/1.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let app = test_app_with(AppConfig::development(), &server.uri());

    let response = app.get("/images/0.png", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    assert_eq!(body_text(response).await, "PNGDATA");

    let response = app.get("/images/1.png", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("{}/scores/1.png", server.uri()));

    let response = app.get("/images/0.jpg", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/images/3.png", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_image_redirect_when_proxy_disabled() {
    let mut config = AppConfig::development();
    config.images.proxy_enabled = false;
    let app = test_app_with(config, "https://scores.example.org");

    let response = app.get("/images/2.png", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "https://scores.example.org/scores/2.png"
    );
}

#[tokio::test]
async fn test_stylesheet_and_health() {
    let app = test_app();

    let response = app.get("/style.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=5"
    );
    assert!(body_text(response).await.contains("font-family"));

    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = app.start("").await;
    app.post_form("/submit", Some(&cookie), "composer=bach&id=0")
        .await;
    let response = app.get("/metrics", None).await;
    let metrics = body_text(response).await;
    assert!(metrics.contains("sessions_created_total 1"));
    assert!(metrics.contains("guesses_total 1"));
    assert!(metrics.contains("points_awarded_total 3"));
}
