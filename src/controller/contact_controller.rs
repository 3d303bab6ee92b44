use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Extension, Form, Router};
use serde_json::json;
use tracing::warn;

use crate::config::Config;
use crate::controller::AppState;
use crate::models::contact::NewContactSubmission;
use crate::notifier::Notifier;
use crate::repositories::postgres_repo::PostgresConnectionRepo;
use crate::repositories::ContactStore;

pub fn router(app_state: AppState) -> Router {
    let postgres_repo = Arc::new(PostgresConnectionRepo::new(
        app_state.postgres_connection.clone()
    ));

    Router::new()
        .route("/contact", post(submit_contact))
        .route_layer(Extension(postgres_repo))
        .layer(Extension(app_state.notifier.clone()))
        .layer(Extension(app_state.config))
}

pub struct ContactOutcome {
    pub saved: bool,
    pub admin_notified: bool,
    pub confirmation_sent: bool,
}

pub async fn submit_contact(
    Extension(postgres_repo): Extension<Arc<PostgresConnectionRepo>>,
    Extension(notifier): Extension<Arc<dyn Notifier>>,
    Extension(config): Extension<Config>,
    Form(form): Form<NewContactSubmission>,
) -> impl IntoResponse {
    let outcome = process_submission(
        postgres_repo.as_ref(),
        notifier.as_ref(),
        &config.admin_email,
        &form,
    )
    .await;

    (
        StatusCode::OK,
        json!({
            "saved": outcome.saved,
            "admin_notified": outcome.admin_notified,
            "confirmation_sent": outcome.confirmation_sent,
        })
        .to_string(),
    )
}

/// Stores the submission, notifies the operator and confirms to the sender.
/// The three outcomes are independent, one failing never aborts the others.
pub async fn process_submission(
    store: &dyn ContactStore,
    notifier: &dyn Notifier,
    admin_email: &str,
    form: &NewContactSubmission,
) -> ContactOutcome {
    let saved = match store.insert_contact_submission(form).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Something went wrong storing the contact submission due to: {}", e);
            false
        }
    };

    let admin_subject = format!(
        "New Contact Submission from {} {}",
        form.first_name, form.last_name
    );
    let admin_body = format!(
        "New contact submission received:\n\nName: {} {}\nJob Title: {}\nCompany: {}\n\
         Phone: {}\nEmail: {}\nIndustry: {}\nNumber of Employees: {}\nAdditional Details: {}",
        form.first_name,
        form.last_name,
        form.job_title,
        form.company_name,
        form.phone_number,
        form.email,
        form.industry,
        form.num_employees,
        form.additional_details.clone().unwrap_or_default()
    );
    let admin_notified = match notifier.send(admin_email, &admin_subject, &admin_body).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to send the contact notification to the operator due to: {}", e);
            false
        }
    };

    let user_body = format!(
        "Dear {},\n\nThank you for reaching out to FortiFund. We have received your submission \
         and will get back to you soon.\n\nBest regards,\nThe FortiFund Team",
        form.first_name
    );
    let confirmation_sent = match notifier
        .send(&form.email, "Thank you for contacting FortiFund!", &user_body)
        .await
    {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to send the contact confirmation to {} due to: {}", form.email, e);
            false
        }
    };

    ContactOutcome {
        saved,
        admin_notified,
        confirmation_sent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryContactStore, RecordingNotifier};

    const ADMIN: &str = "admin@fortifund.example";

    fn submission() -> NewContactSubmission {
        NewContactSubmission {
            first_name: "Dana".to_string(),
            last_name: "Whitfield".to_string(),
            job_title: "CFO".to_string(),
            company_name: "Whitfield Holdings".to_string(),
            phone_number: "555-0114".to_string(),
            email: "dana@whitfield.example".to_string(),
            industry: "Finance".to_string(),
            num_employees: "11-50".to_string(),
            additional_details: None,
        }
    }

    #[tokio::test]
    async fn reports_all_three_outcomes_on_success() {
        let store = MemoryContactStore::default();
        let notifier = RecordingNotifier::default();

        let outcome = process_submission(&store, &notifier, ADMIN, &submission()).await;

        assert!(outcome.saved);
        assert!(outcome.admin_notified);
        assert!(outcome.confirmation_sent);
        assert_eq!(store.submissions().await.len(), 1);
        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, ADMIN);
        assert_eq!(sent[1].to, "dana@whitfield.example");
    }

    #[tokio::test]
    async fn failed_store_still_sends_both_mails() {
        let store = MemoryContactStore::default();
        store.break_storage().await;
        let notifier = RecordingNotifier::default();

        let outcome = process_submission(&store, &notifier, ADMIN, &submission()).await;

        assert!(!outcome.saved);
        assert!(outcome.admin_notified);
        assert!(outcome.confirmation_sent);
        assert_eq!(notifier.sent().await.len(), 2);
    }

    #[tokio::test]
    async fn failed_operator_mail_still_confirms_to_the_sender() {
        let store = MemoryContactStore::default();
        let notifier = RecordingNotifier::default();
        notifier.fail_for(ADMIN).await;

        let outcome = process_submission(&store, &notifier, ADMIN, &submission()).await;

        assert!(outcome.saved);
        assert!(!outcome.admin_notified);
        assert!(outcome.confirmation_sent);
        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "dana@whitfield.example");
    }
}
