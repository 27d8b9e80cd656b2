//! # rf-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the feed controller.
//! Store work is blocking, so every handler touching it runs on the blocking pool.

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use askama::Template;
use rf_core::controller::FeedController;
use rf_core::error::AppError;
use rf_core::validation::Field;
use rf_ui::{FeedPage, HtmlFeed};
use serde::{Deserialize, Serialize};
use tracing::error;

/// State shared across all actix-web workers.
pub struct AppState {
    pub controller: FeedController,
}

#[derive(Debug, Deserialize)]
pub struct PublishForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub field: Field,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Renders the feed page from the stored history.
pub async fn index(data: web::Data<AppState>) -> impl Responder {
    let restored = web::block(move || {
        let mut feed = HtmlFeed::new();
        restore_into(&data.controller, &mut feed).map(|()| feed)
    })
    .await;

    match restored {
        Ok(Ok(feed)) => render(StatusCode::OK, FeedPage::new(&feed)),
        Ok(Err(err)) => storage_failure(&err),
        Err(err) => blocking_failure(err),
    }
}

/// Validates and stores a post.
///
/// Success redirects back to the page, which leaves the form empty.
/// A rejected post re-renders the page with the inputs kept and the warning shown.
pub async fn publish(data: web::Data<AppState>, form: web::Form<PublishForm>) -> impl Responder {
    let PublishForm { title, content } = form.into_inner();
    // Form submission sends CRLF; the live check counts the LF the input holds.
    let title = normalize_newlines(title);
    let content = normalize_newlines(content);

    let outcome = web::block(move || {
        let mut feed = HtmlFeed::new();
        restore_into(&data.controller, &mut feed)?;
        let published = data.controller.publish(&title, &content, &mut feed);
        Ok::<_, AppError>((feed, published, title, content))
    })
    .await;

    let (feed, published, title, content) = match outcome {
        Ok(Ok(parts)) => parts,
        Ok(Err(err)) => return storage_failure(&err),
        Err(err) => return blocking_failure(err),
    };

    let status = match published {
        Ok(_) => return see_other("/"),
        Err(AppError::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        // The history on disk is unreadable; the page already carries the load error.
        Err(AppError::CorruptData(_)) => StatusCode::CONFLICT,
        Err(err) => return storage_failure(&err),
    };
    render(status, FeedPage::with_drafts(&feed, &title, &content))
}

/// Deletes the whole history.
pub async fn clear(data: web::Data<AppState>) -> impl Responder {
    let cleared = web::block(move || data.controller.clear(&mut HtmlFeed::new())).await;

    match cleared {
        Ok(Ok(())) => see_other("/"),
        Ok(Err(err)) => storage_failure(&err),
        Err(err) => blocking_failure(err),
    }
}

/// The keystroke check: reports an over-long value, never an empty one.
pub async fn check(data: web::Data<AppState>, req: web::Json<CheckRequest>) -> impl Responder {
    let CheckRequest { field, value } = req.into_inner();
    let mut feed = HtmlFeed::new();
    data.controller.on_input(field, &value, &mut feed);

    HttpResponse::Ok().json(CheckResponse {
        warning: feed.warning(field).map(str::to_string),
    })
}

/// Stored history as JSON, oldest first.
pub async fn posts(data: web::Data<AppState>) -> impl Responder {
    let loaded = web::block(move || data.controller.store().load_all()).await;

    match loaded {
        Ok(Ok(posts)) => HttpResponse::Ok().json(posts),
        Ok(Err(err)) => storage_failure(&err),
        Err(err) => blocking_failure(err),
    }
}

/// Unreadable history still renders (the feed shows the load error); other failures do not.
fn restore_into(controller: &FeedController, feed: &mut HtmlFeed) -> Result<(), AppError> {
    match controller.restore(feed) {
        Ok(_) | Err(AppError::CorruptData(_)) => Ok(()),
        Err(err) => Err(err),
    }
}

fn normalize_newlines(value: String) -> String {
    if value.contains('\r') {
        value.replace("\r\n", "\n")
    } else {
        value
    }
}

fn render(status: StatusCode, page: FeedPage<'_>) -> HttpResponse {
    match page.render() {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(err) => {
            error!(error = %err, "template rendering failed");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

fn storage_failure(err: &AppError) -> HttpResponse {
    error!(error = %err, "feed storage failed");
    HttpResponse::InternalServerError().json(ErrorBody { error: err.to_string() })
}

fn blocking_failure(err: actix_web::error::BlockingError) -> HttpResponse {
    error!(error = %err, "blocking task failed");
    HttpResponse::InternalServerError().finish()
}
