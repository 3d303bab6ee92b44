use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;
use tracing::warn;

use crate::models::reservation::{NewReservation, Reservation, ISO_DATE};
use crate::notifier::Notifier;
use crate::repositories::ReservationStore;

pub const CONFIRMATION_SUBJECT: &str = "Your Forti-Fund Demo Booking Confirmation";

/// Raw booking form as submitted by the demo page. The meeting date is kept
/// as a string here so date validation produces a domain error instead of a
/// deserialization failure.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SlotRequest {
    pub firm_name: String,
    pub company_type: String,
    pub person_name: String,
    pub title: Option<String>,
    pub email: String,
    pub team_size: Option<String>,
    pub meeting_date: String,
    pub meeting_time: String,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("selected date and time is already booked")]
    SlotTaken,
    #[error("meeting date must be a valid YYYY-MM-DD calendar date")]
    InvalidDate,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub struct BookingOutcome {
    pub reservation: Reservation,
    /// The booking stands even when the confirmation email failed.
    pub confirmation_sent: bool,
}

pub struct BookingService {
    store: Arc<dyn ReservationStore>,
    notifier: Arc<dyn Notifier>,
}

impl BookingService {
    pub fn new(store: Arc<dyn ReservationStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Books the requested slot. The insert and the conflict check are one
    /// atomic statement in the store, so two concurrent requests for the same
    /// slot cannot both succeed. The confirmation email carries no meeting
    /// link, the sweeper delivers that shortly before the appointment.
    pub async fn book_slot(&self, request: SlotRequest) -> Result<BookingOutcome, BookingError> {
        let meeting_date = Date::parse(&request.meeting_date, ISO_DATE)
            .map_err(|_| BookingError::InvalidDate)?;
        let link = meeting_link(&request.meeting_date, &request.meeting_time);

        let reservation = NewReservation {
            firm_name: request.firm_name,
            company_type: request.company_type,
            person_name: request.person_name,
            title: request.title,
            email: request.email,
            team_size: request.team_size,
            meeting_date,
            meeting_time: request.meeting_time,
        };

        let reservation = self
            .store
            .insert_reservation(&reservation, &link)
            .await?
            .ok_or(BookingError::SlotTaken)?;

        let confirmation_sent = match self
            .notifier
            .send(
                &reservation.email,
                CONFIRMATION_SUBJECT,
                &confirmation_body(&reservation),
            )
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Failed to send booking confirmation to {} due to: {}",
                    reservation.email, e
                );
                false
            }
        };

        Ok(BookingOutcome {
            reservation,
            confirmation_sent,
        })
    }

    pub async fn booked_dates(&self) -> anyhow::Result<Vec<String>> {
        self.store.booked_dates().await
    }

    pub async fn booked_slots_by_date(&self) -> anyhow::Result<HashMap<String, Vec<String>>> {
        let slots = self.store.booked_slots().await?;
        Ok(group_slots_by_date(slots))
    }
}

/// The meeting link is a pure function of the slot: digits of the date and
/// time embedded in a fixed URL template.
pub fn meeting_link(meeting_date: &str, meeting_time: &str) -> String {
    format!(
        "https://meet.jit.si/fortifund-demo-{}-{}",
        meeting_date.replace('-', ""),
        meeting_time.replace(':', "")
    )
}

fn confirmation_body(reservation: &Reservation) -> String {
    format!(
        "Dear {},\n\nYour demo is booked for {} at {}.\nWe will send you the meeting link \
         shortly before your scheduled time.\n\nThank you!\nForti-Fund Team",
        reservation.person_name,
        reservation.meeting_date_iso(),
        reservation.meeting_time
    )
}

/// Groups (date, time) pairs under their date key, preserving the incoming
/// order within each date's list.
pub fn group_slots_by_date(slots: Vec<(String, String)>) -> HashMap<String, Vec<String>> {
    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
    for (date, time) in slots {
        grouped.entry(date).or_default().push(time);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, RecordingNotifier};

    fn slot_request(meeting_date: &str, meeting_time: &str) -> SlotRequest {
        SlotRequest {
            firm_name: "Acme Capital".to_string(),
            company_type: "Venture fund".to_string(),
            person_name: "Jordan Reyes".to_string(),
            title: Some("Partner".to_string()),
            email: "jordan@acme.example".to_string(),
            team_size: Some("11-50".to_string()),
            meeting_date: meeting_date.to_string(),
            meeting_time: meeting_time.to_string(),
        }
    }

    fn service() -> (Arc<MemoryStore>, Arc<RecordingNotifier>, BookingService) {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = BookingService::new(store.clone(), notifier.clone());
        (store, notifier, service)
    }

    #[tokio::test]
    async fn booking_a_free_slot_persists_and_confirms() {
        let (_store, notifier, service) = service();

        let outcome = service
            .book_slot(slot_request("2024-06-01", "10:00"))
            .await
            .unwrap();

        assert!(outcome.confirmation_sent);
        assert!(outcome.reservation.meeting_link.contains("20240601"));
        assert!(outcome.reservation.meeting_link.contains("1000"));
        assert_eq!(service.booked_dates().await.unwrap(), vec!["2024-06-01"]);

        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "jordan@acme.example");
        // The link is only delivered by the sweeper, never at booking time.
        assert!(!sent[0].body.contains("meet.jit.si"));
    }

    #[tokio::test]
    async fn rebooking_the_same_slot_is_rejected() {
        let (_store, _notifier, service) = service();

        service
            .book_slot(slot_request("2024-06-01", "10:00"))
            .await
            .unwrap();
        let second = service.book_slot(slot_request("2024-06-01", "10:00")).await;

        assert!(matches!(second, Err(BookingError::SlotTaken)));
        assert_eq!(service.booked_dates().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn distinct_times_share_a_date_key() {
        let (_store, _notifier, service) = service();

        service
            .book_slot(slot_request("2024-06-01", "10:00"))
            .await
            .unwrap();
        service
            .book_slot(slot_request("2024-06-01", "11:00"))
            .await
            .unwrap();

        let grouped = service.booked_slots_by_date().await.unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["2024-06-01"], vec!["10:00", "11:00"]);
    }

    #[tokio::test]
    async fn invalid_meeting_date_is_rejected() {
        let (_store, _notifier, service) = service();

        let result = service.book_slot(slot_request("2024-13-40", "10:00")).await;

        assert!(matches!(result, Err(BookingError::InvalidDate)));
        assert!(service.booked_dates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn notifier_failure_does_not_roll_back_the_booking() {
        let (_store, notifier, service) = service();
        notifier.fail_for("jordan@acme.example").await;

        let outcome = service
            .book_slot(slot_request("2024-06-01", "10:00"))
            .await
            .unwrap();

        assert!(!outcome.confirmation_sent);
        assert_eq!(service.booked_dates().await.unwrap().len(), 1);
    }

    #[test]
    fn meeting_link_is_a_pure_function_of_the_slot() {
        let first = meeting_link("2024-06-01", "10:00");
        let second = meeting_link("2024-06-01", "10:00");
        assert_eq!(first, second);
        assert_eq!(first, "https://meet.jit.si/fortifund-demo-20240601-1000");
    }

    #[test]
    fn grouping_covers_every_slot_exactly_once() {
        let slots = vec![
            ("2024-06-01".to_string(), "10:00".to_string()),
            ("2024-06-02".to_string(), "09:00".to_string()),
            ("2024-06-01".to_string(), "11:00".to_string()),
        ];

        let grouped = group_slots_by_date(slots);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["2024-06-01"], vec!["10:00", "11:00"]);
        assert_eq!(grouped["2024-06-02"], vec!["09:00"]);
        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, 3);
    }
}
