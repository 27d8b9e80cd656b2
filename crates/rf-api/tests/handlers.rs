use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use chrono::{FixedOffset, TimeZone, Utc};
use rf_api::handlers::CheckResponse;
use rf_api::{configure_routes, AppState};
use rf_core::controller::{FeedController, LOAD_ERROR_MESSAGE};
use rf_core::memory::InMemoryKv;
use rf_core::models::Post;
use rf_core::store::{KvPostStore, POSTS_KEY};
use rf_core::time::{DisplayZone, FixedClock};
use rf_core::traits::{KeyValueStore, PostStore};

type Store = Arc<KvPostStore<InMemoryKv>>;

fn state() -> (web::Data<AppState>, Store) {
    let store: Store = Arc::new(KvPostStore::new(InMemoryKv::new()));
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap());
    let zone = DisplayZone::Fixed(FixedOffset::east_opt(0).unwrap());
    let controller = FeedController::new(Box::new(Arc::clone(&store)), Box::new(clock), zone);
    (web::Data::new(AppState { controller }), store)
}

macro_rules! app {
    ($data:expr) => {
        test::init_service(App::new().app_data($data.clone()).configure(configure_routes)).await
    };
}

async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[actix_web::test]
async fn empty_feed_shows_placeholder() {
    let (data, _store) = state();
    let app = app!(data);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Nothing here yet..."));
}

#[actix_web::test]
async fn publish_stores_and_redirects() {
    let (data, store) = state();
    let app = app!(data);

    let req = test::TestRequest::post()
        .uri("/publish")
        .set_form([("title", "Hello"), ("content", "World")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("Location").unwrap(), "/");
    assert_eq!(
        store.load_all().unwrap(),
        vec![Post::new("Hello", "World", Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap())]
    );

    let page = body_text(test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await).await;
    assert!(page.contains("Hello"));
    assert!(page.contains("01.05.2024 08:30"));
    assert!(!page.contains("Nothing here yet..."));
}

#[actix_web::test]
async fn empty_title_is_rejected_with_warning() {
    let (data, store) = state();
    let app = app!(data);

    let req = test::TestRequest::post()
        .uri("/publish")
        .set_form([("title", ""), ("content", "kept draft")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_text(resp).await;
    assert!(page.contains("Title cannot be empty"));
    assert!(!page.contains("Post cannot be empty"));
    assert!(page.contains("kept draft"));
    assert!(store.load_all().unwrap().is_empty());
}

#[actix_web::test]
async fn crlf_newline_counts_as_one_character() {
    let (data, store) = state();
    let app = app!(data);
    let typed = format!("{}\n", "a".repeat(199));

    let live: CheckResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/check")
            .set_json(serde_json::json!({ "field": "content", "value": &typed }))
            .to_request(),
    )
    .await;
    assert_eq!(live.warning, None);

    let submitted = format!("{}\r\n", "a".repeat(199));
    let req = test::TestRequest::post()
        .uri("/publish")
        .set_form([("title", "Lines"), ("content", submitted.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let stored = store.load_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content, typed);
}

#[actix_web::test]
async fn feed_is_newest_first() {
    let (data, _store) = state();
    let app = app!(data);

    for title in ["Alpha", "Bravo", "Charlie"] {
        let req = test::TestRequest::post()
            .uri("/publish")
            .set_form([("title", title), ("content", "body")])
            .to_request();
        test::call_service(&app, req).await;
    }

    let page = body_text(test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await).await;
    let positions: Vec<_> = ["Charlie", "Bravo", "Alpha"]
        .iter()
        .map(|t| page.find(t).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let stored: Vec<Post> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
    let titles: Vec<_> = stored.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Alpha", "Bravo", "Charlie"]);
}

#[actix_web::test]
async fn clear_empties_history() {
    let (data, store) = state();
    let app = app!(data);
    store
        .append(Post::new("Old", "post", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()))
        .unwrap();

    let resp = test::call_service(&app, test::TestRequest::post().uri("/clear").to_request()).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(store.load_all().unwrap().is_empty());
    let page = body_text(test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await).await;
    assert!(page.contains("Nothing here yet..."));
    assert!(!page.contains("Old"));
}

#[actix_web::test]
async fn live_check_reports_length_only() {
    let (data, _store) = state();
    let app = app!(data);

    let empty: CheckResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/check")
            .set_json(serde_json::json!({ "field": "title", "value": "" }))
            .to_request(),
    )
    .await;
    assert_eq!(empty.warning, None);

    let long: CheckResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/check")
            .set_json(serde_json::json!({ "field": "content", "value": "x".repeat(201) }))
            .to_request(),
    )
    .await;
    assert_eq!(long.warning.as_deref(), Some("Post is longer than 200 characters"));
}

#[actix_web::test]
async fn corrupt_history_renders_load_error() {
    let (data, store) = state();
    store.inner().set(POSTS_KEY, "definitely not json").unwrap();
    let app = app!(data);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains(LOAD_ERROR_MESSAGE));

    let req = test::TestRequest::post()
        .uri("/publish")
        .set_form([("title", "New"), ("content", "post")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(store.inner().get(POSTS_KEY).unwrap().as_deref(), Some("definitely not json"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    test::call_service(&app, test::TestRequest::post().uri("/clear").to_request()).await;
    let page = body_text(test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await).await;
    assert!(!page.contains(LOAD_ERROR_MESSAGE));
}
