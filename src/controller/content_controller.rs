use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Router};
use serde_json::json;
use tracing::warn;

use crate::controller::AppState;
use crate::models::faq::Faq;
use crate::repositories::postgres_repo::PostgresConnectionRepo;

pub fn router(app_state: AppState) -> Router {
    let postgres_repo = Arc::new(PostgresConnectionRepo::new(
        app_state.postgres_connection
    ));

    Router::new()
        .route("/content", get(get_site_content))
        .route("/blogs", get(list_blogs))
        .route("/blogs/:blog_id", get(get_blog))
        .route("/faqs", get(get_faqs))
        .route_layer(Extension(postgres_repo))
}

/// Everything the landing page needs in one payload: editable sections,
/// the latest blog posts and the FAQs grouped by category.
pub async fn get_site_content(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
) -> Response {
    let content = site_content(&postgres_repo).await;

    return match content {
        Ok(content) => (StatusCode::OK, content.to_string()).into_response(),
        Err(e) => {
            warn!("Something went wrong retrieving site content due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve site content, please try again.",
            )
                .into_response()
        }
    };
}

async fn site_content(
    postgres_repo: &PostgresConnectionRepo,
) -> anyhow::Result<serde_json::Value> {
    let nav = postgres_repo.fetch_nav().await?;
    let hero = postgres_repo.fetch_hero().await?;
    let footer = postgres_repo.fetch_footer().await?;
    let latest_blogs = postgres_repo.latest_blogs().await?;
    let faqs = postgres_repo.list_faqs().await?;

    Ok(json!({
        "nav": nav,
        "hero": hero,
        "footer": footer,
        "latest_blogs": latest_blogs,
        "faqs_by_category": group_faqs_by_category(faqs),
    }))
}

pub async fn list_blogs(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
) -> impl IntoResponse {
    return match postgres_repo.list_blogs().await {
        Ok(blogs) => (StatusCode::OK, json!(blogs).to_string()).into_response(),
        Err(e) => {
            warn!("Something went wrong retrieving blog posts due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve blog posts, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn get_blog(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
    Path(blog_id): Path<i32>,
) -> impl IntoResponse {
    return match postgres_repo.fetch_blog(blog_id).await {
        Ok(Some(blog)) => (StatusCode::OK, json!(blog).to_string()).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Blog post not found!").into_response(),
        Err(e) => {
            warn!("Something went wrong retrieving blog {} due to: {}", blog_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve the blog post, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn get_faqs(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
) -> impl IntoResponse {
    return match postgres_repo.list_faqs().await {
        Ok(faqs) => (
            StatusCode::OK,
            json!(group_faqs_by_category(faqs)).to_string(),
        )
            .into_response(),
        Err(e) => {
            warn!("Something went wrong retrieving FAQs due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve FAQs, please try again.",
            )
                .into_response()
        }
    };
}

fn group_faqs_by_category(faqs: Vec<Faq>) -> HashMap<String, Vec<Faq>> {
    let mut grouped: HashMap<String, Vec<Faq>> = HashMap::new();
    for faq in faqs {
        grouped.entry(faq.category.clone()).or_default().push(faq);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq(faq_id: i32, category: &str) -> Faq {
        Faq {
            faq_id,
            category: category.to_string(),
            question: format!("Question {}", faq_id),
            answer: format!("Answer {}", faq_id),
        }
    }

    #[test]
    fn faqs_group_under_their_category() {
        let grouped = group_faqs_by_category(vec![
            faq(1, "Billing"),
            faq(2, "Product"),
            faq(3, "Billing"),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["Billing"].len(), 2);
        assert_eq!(grouped["Product"][0].faq_id, 2);
    }
}
