use async_trait::async_trait;

use crate::models::contact::NewContactSubmission;
use crate::models::reservation::{NewReservation, Reservation};

pub mod postgres_repo;

/// Storage seam for demo-booking reservations. The booking service is the
/// only writer, the sweeper reads and flips the link_sent flag.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Inserts the reservation unless its (meeting_date, meeting_time) slot
    /// is already taken. Returns None on a slot conflict, nothing is written
    /// in that case.
    async fn insert_reservation(
        &self,
        reservation: &NewReservation,
        meeting_link: &str,
    ) -> anyhow::Result<Option<Reservation>>;

    /// ISO date strings, one entry per reservation, not deduplicated.
    async fn booked_dates(&self) -> anyhow::Result<Vec<String>>;

    /// (ISO date, time token) pairs in insertion order.
    async fn booked_slots(&self) -> anyhow::Result<Vec<(String, String)>>;

    /// Reservations whose "YYYY-MM-DD HH:MM" stamp lies inside the inclusive
    /// window and whose meeting link has not been sent yet.
    async fn unsent_in_window(
        &self,
        window_start: &str,
        window_end: &str,
    ) -> anyhow::Result<Vec<Reservation>>;

    async fn mark_link_sent(&self, booking_id: i32) -> anyhow::Result<()>;
}

/// Storage seam for the contact form.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert_contact_submission(
        &self,
        submission: &NewContactSubmission,
    ) -> anyhow::Result<()>;
}
