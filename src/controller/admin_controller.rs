use std::sync::Arc;

use anyhow::Context;
use axum::extract::Path;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Extension, Form, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::controller::AppState;
use crate::models::blog::NewBlogPost;
use crate::models::content::{FooterContent, HeroContent, NavContent};
use crate::models::faq::NewFaq;
use crate::repositories::postgres_repo::PostgresConnectionRepo;
use crate::session::{require_admin, session_token, SESSION_COOKIE};

pub fn router(app_state: AppState) -> Router {
    let postgres_repo = Arc::new(PostgresConnectionRepo::new(
        app_state.postgres_connection.clone()
    ));

    // Every route except login sits behind the session guard, composed here
    // at registration time.
    let guarded = Router::new()
        .route("/admin/logout", post(logout))
        .route("/admin/bookings", get(list_bookings))
        .route("/admin/contact_submissions", get(list_contact_submissions))
        .route("/admin/blogs", post(create_blog))
        .route("/admin/blogs/:blog_id", put(update_blog).delete(delete_blog))
        .route("/admin/faqs", post(create_faq))
        .route("/admin/faqs/:faq_id", put(update_faq).delete(delete_faq))
        .route("/admin/content/nav", put(update_nav))
        .route("/admin/content/hero", put(update_hero))
        .route("/admin/content/footer", put(update_footer))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_admin,
        ));

    Router::new()
        .route("/admin/login", post(login))
        .merge(guarded)
        .layer(Extension(postgres_repo))
        .layer(Extension(app_state))
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn login(
    Extension(app_state): Extension<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    if form.username != app_state.config.admin_username
        || form.password != app_state.config.admin_password
    {
        return (
            StatusCode::UNAUTHORIZED,
            "Invalid credentials. Please try again.",
        )
            .into_response();
    }

    let token = app_state.sessions.issue().await;
    info!("Admin session issued");

    let cookie = match session_cookie(&token) {
        Ok(cookie) => cookie,
        Err(e) => {
            warn!("Failed to build the session cookie due to: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to log in, please try again.",
            )
                .into_response();
        }
    };

    let mut response = (
        StatusCode::OK,
        json!({ "message": "Logged in successfully!", "token": token }).to_string(),
    )
        .into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    response
}

fn session_cookie(token: &str) -> anyhow::Result<HeaderValue> {
    let cookie = format!("{}={}; HttpOnly; Path=/", SESSION_COOKIE, token);
    HeaderValue::from_str(&cookie).context("Failed to build the session cookie header")
}

pub async fn logout(
    Extension(app_state): Extension<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        app_state.sessions.revoke(&token).await;
    }
    (StatusCode::OK, "You have been logged out.")
}

pub async fn list_bookings(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
) -> impl IntoResponse {
    return match postgres_repo.list_demo_bookings().await {
        Ok(bookings) => (StatusCode::OK, json!(bookings).to_string()).into_response(),
        Err(e) => {
            warn!("Something went wrong retrieving demo bookings due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve demo bookings, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn list_contact_submissions(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
) -> impl IntoResponse {
    return match postgres_repo.list_contact_submissions().await {
        Ok(submissions) => (StatusCode::OK, json!(submissions).to_string()).into_response(),
        Err(e) => {
            warn!("Something went wrong retrieving contact submissions due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve contact submissions, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn create_blog(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
    Form(form): Form<NewBlogPost>,
) -> impl IntoResponse {
    return match postgres_repo.insert_blog(&form).await {
        Ok(blog_id) => (
            StatusCode::OK,
            json!({ "message": "Blog post added successfully!", "blog_id": blog_id }).to_string(),
        )
            .into_response(),
        Err(e) => {
            warn!("Something went wrong adding the blog post due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to add the blog post, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn update_blog(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
    Path(blog_id): Path<i32>,
    Form(form): Form<NewBlogPost>,
) -> impl IntoResponse {
    return match postgres_repo.update_blog(blog_id, &form).await {
        Ok(true) => (StatusCode::OK, "Blog post updated successfully!").into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Blog post not found!").into_response(),
        Err(e) => {
            warn!("Something went wrong updating blog {} due to: {}", blog_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update the blog post, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn delete_blog(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
    Path(blog_id): Path<i32>,
) -> impl IntoResponse {
    return match postgres_repo.delete_blog(blog_id).await {
        Ok(true) => (StatusCode::OK, "Blog post deleted successfully!").into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Blog post not found!").into_response(),
        Err(e) => {
            warn!("Something went wrong deleting blog {} due to: {}", blog_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to delete the blog post, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn create_faq(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
    Form(form): Form<NewFaq>,
) -> impl IntoResponse {
    return match postgres_repo.insert_faq(&form).await {
        Ok(faq_id) => (
            StatusCode::OK,
            json!({ "message": "FAQ added successfully!", "faq_id": faq_id }).to_string(),
        )
            .into_response(),
        Err(e) => {
            warn!("Something went wrong adding the FAQ due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to add the FAQ, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn update_faq(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
    Path(faq_id): Path<i32>,
    Form(form): Form<NewFaq>,
) -> impl IntoResponse {
    return match postgres_repo.update_faq(faq_id, &form).await {
        Ok(true) => (StatusCode::OK, "FAQ updated successfully!").into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "FAQ not found!").into_response(),
        Err(e) => {
            warn!("Something went wrong updating FAQ {} due to: {}", faq_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update the FAQ, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn delete_faq(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
    Path(faq_id): Path<i32>,
) -> impl IntoResponse {
    return match postgres_repo.delete_faq(faq_id).await {
        Ok(true) => (StatusCode::OK, "FAQ deleted successfully!").into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "FAQ not found!").into_response(),
        Err(e) => {
            warn!("Something went wrong deleting FAQ {} due to: {}", faq_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to delete the FAQ, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn update_nav(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
    Form(form): Form<NavContent>,
) -> impl IntoResponse {
    return match postgres_repo.update_nav(&form).await {
        Ok(()) => (StatusCode::OK, "Content updated successfully!").into_response(),
        Err(e) => {
            warn!("Something went wrong updating nav content due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update content, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn update_hero(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
    Form(form): Form<HeroContent>,
) -> impl IntoResponse {
    return match postgres_repo.update_hero(&form).await {
        Ok(()) => (StatusCode::OK, "Content updated successfully!").into_response(),
        Err(e) => {
            warn!("Something went wrong updating hero content due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update content, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn update_footer(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
    Form(form): Form<FooterContent>,
) -> impl IntoResponse {
    return match postgres_repo.update_footer(&form).await {
        Ok(()) => (StatusCode::OK, "Content updated successfully!").into_response(),
        Err(e) => {
            warn!("Something went wrong updating footer content due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update content, please try again.",
            )
                .into_response()
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_a_valid_http_only_header() {
        let token = uuid::Uuid::new_v4().to_string();
        let header = session_cookie(&token).unwrap();
        let value = header.to_str().unwrap();
        assert_eq!(
            value,
            format!("{}={}; HttpOnly; Path=/", SESSION_COOKIE, token)
        );
    }
}
