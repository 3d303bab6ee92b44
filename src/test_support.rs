//! In-memory doubles for the storage and mail seams, used by the booking,
//! contact and sweeper tests.

use std::collections::HashSet;

use anyhow::anyhow;
use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::models::contact::NewContactSubmission;
use crate::models::reservation::{NewReservation, Reservation};
use crate::notifier::Notifier;
use crate::repositories::{ContactStore, ReservationStore};

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Reservation>>,
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn insert_reservation(
        &self,
        reservation: &NewReservation,
        meeting_link: &str,
    ) -> anyhow::Result<Option<Reservation>> {
        let mut rows = self.rows.lock().await;
        let taken = rows.iter().any(|row| {
            row.meeting_date == reservation.meeting_date
                && row.meeting_time == reservation.meeting_time
        });
        if taken {
            return Ok(None);
        }

        let row = Reservation {
            booking_id: rows.len() as i32 + 1,
            firm_name: reservation.firm_name.clone(),
            company_type: reservation.company_type.clone(),
            person_name: reservation.person_name.clone(),
            title: reservation.title.clone(),
            email: reservation.email.clone(),
            team_size: reservation.team_size.clone(),
            meeting_date: reservation.meeting_date,
            meeting_time: reservation.meeting_time.clone(),
            meeting_link: meeting_link.to_string(),
            link_sent: false,
            created_at: OffsetDateTime::now_utc(),
        };
        rows.push(row.clone());
        Ok(Some(row))
    }

    async fn booked_dates(&self) -> anyhow::Result<Vec<String>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().map(|row| row.meeting_date_iso()).collect())
    }

    async fn booked_slots(&self) -> anyhow::Result<Vec<(String, String)>> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .map(|row| (row.meeting_date_iso(), row.meeting_time.clone()))
            .collect())
    }

    async fn unsent_in_window(
        &self,
        window_start: &str,
        window_end: &str,
    ) -> anyhow::Result<Vec<Reservation>> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|row| {
                let stamp = row.slot_stamp();
                !row.link_sent && stamp.as_str() >= window_start && stamp.as_str() <= window_end
            })
            .cloned()
            .collect())
    }

    async fn mark_link_sent(&self, booking_id: i32) -> anyhow::Result<()> {
        let mut rows = self.rows.lock().await;
        for row in rows.iter_mut() {
            if row.booking_id == booking_id {
                row.link_sent = true;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryContactStore {
    submissions: Mutex<Vec<NewContactSubmission>>,
    broken: Mutex<bool>,
}

impl MemoryContactStore {
    pub async fn submissions(&self) -> Vec<NewContactSubmission> {
        self.submissions.lock().await.clone()
    }

    /// Makes every insert fail.
    pub async fn break_storage(&self) {
        *self.broken.lock().await = true;
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn insert_contact_submission(
        &self,
        submission: &NewContactSubmission,
    ) -> anyhow::Result<()> {
        if *self.broken.lock().await {
            return Err(anyhow!("simulated storage failure"));
        }
        self.submissions.lock().await.push(submission.clone());
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentMail>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingNotifier {
    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().await.clone()
    }

    /// Makes every send to this recipient fail.
    pub async fn fail_for(&self, recipient: &str) {
        self.failing.lock().await.insert(recipient.to_string());
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        if self.failing.lock().await.contains(to) {
            return Err(anyhow!("simulated send failure for {}", to));
        }
        self.sent.lock().await.push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
