use std::sync::Arc;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::models::reservation::Reservation;
use crate::notifier::Notifier;
use crate::repositories::ReservationStore;

pub const SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5 * 60);
pub const LINK_WINDOW_MINUTES: i64 = 10;
pub const LINK_SUBJECT: &str = "Your Forti-Fund Demo Meeting Link";

const MINUTE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Periodic task that mails meeting links shortly before the appointment.
/// Owned explicitly: dependencies are injected and the spawned task is held
/// by a handle with a defined stop.
pub struct Sweeper {
    store: Arc<dyn ReservationStore>,
    notifier: Arc<dyn Notifier>,
    operator_email: String,
}

pub struct SweeperHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        let _ = self.task.await;
    }
}

impl Sweeper {
    pub fn new(
        store: Arc<dyn ReservationStore>,
        notifier: Arc<dyn Notifier>,
        operator_email: String,
    ) -> Self {
        Self {
            store,
            notifier,
            operator_email,
        }
    }

    pub fn start(self) -> SweeperHandle {
        let (shutdown, mut shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            // First tick lands one interval after start, not at boot.
            let start = tokio::time::Instant::now() + SWEEP_INTERVAL;
            let mut ticker = tokio::time::interval_at(start, SWEEP_INTERVAL);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.run_once(OffsetDateTime::now_utc()).await {
                            error!("Meeting link sweep failed due to: {}", e);
                        }
                    }
                    _ = &mut shutdown_rx => {
                        info!("Meeting link sweeper shutting down");
                        break;
                    }
                }
            }
        });

        SweeperHandle { shutdown, task }
    }

    /// One sweep pass: select reservations whose slot falls inside the
    /// inclusive [now, now + 10 minutes] window and whose link has not been
    /// sent, and mail each one. A failure for one reservation never stops
    /// the rest of the pass.
    pub async fn run_once(&self, now: OffsetDateTime) -> anyhow::Result<()> {
        let (window_start, window_end) = window_bounds(now)?;
        let due = self.store.unsent_in_window(&window_start, &window_end).await?;

        for reservation in due {
            if let Err(e) = self.dispatch_links(&reservation).await {
                warn!(
                    "Failed to send the meeting link for booking {} due to: {}",
                    reservation.booking_id, e
                );
            }
        }
        Ok(())
    }

    async fn dispatch_links(&self, reservation: &Reservation) -> anyhow::Result<()> {
        self.notifier
            .send(&reservation.email, LINK_SUBJECT, &link_body(reservation))
            .await?;
        // Marked only after the registrant mail went out, so a failed send
        // is picked up again while the slot stays inside the window.
        self.store.mark_link_sent(reservation.booking_id).await?;

        let operator_subject = format!("Demo Meeting Link for {}", reservation.person_name);
        if let Err(e) = self
            .notifier
            .send(
                &self.operator_email,
                &operator_subject,
                &operator_body(reservation),
            )
            .await
        {
            warn!(
                "Failed to send the operator summary for booking {} due to: {}",
                reservation.booking_id, e
            );
        }
        Ok(())
    }
}

/// Window bounds as "YYYY-MM-DD HH:MM" stamps. Formatting to minute
/// precision is also what truncates `now` to the minute.
pub fn window_bounds(now: OffsetDateTime) -> anyhow::Result<(String, String)> {
    let start = now.format(MINUTE_STAMP)?;
    let end = (now + Duration::minutes(LINK_WINDOW_MINUTES)).format(MINUTE_STAMP)?;
    Ok((start, end))
}

fn link_body(reservation: &Reservation) -> String {
    format!(
        "Dear {},\n\nHere is your meeting link for your demo scheduled at {} {}:\n{}\n\n\
         Thank you!\nForti-Fund Team",
        reservation.person_name,
        reservation.meeting_date_iso(),
        reservation.meeting_time,
        reservation.meeting_link
    )
}

fn operator_body(reservation: &Reservation) -> String {
    format!(
        "Meeting for {} ({}) at {} {}: {}",
        reservation.person_name,
        reservation.email,
        reservation.meeting_date_iso(),
        reservation.meeting_time,
        reservation.meeting_link
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservation::NewReservation;
    use crate::test_support::{MemoryStore, RecordingNotifier};
    use time::macros::{date, datetime};
    use time::Date;

    const OPERATOR: &str = "operator@fortifund.example";

    async fn seed(store: &MemoryStore, meeting_date: Date, meeting_time: &str, email: &str) {
        let reservation = NewReservation {
            firm_name: "Acme Capital".to_string(),
            company_type: "Venture fund".to_string(),
            person_name: "Jordan Reyes".to_string(),
            title: None,
            email: email.to_string(),
            team_size: None,
            meeting_date,
            meeting_time: meeting_time.to_string(),
        };
        let link = crate::booking::meeting_link(
            &meeting_date.format(crate::models::reservation::ISO_DATE).unwrap(),
            meeting_time,
        );
        store
            .insert_reservation(&reservation, &link)
            .await
            .unwrap()
            .unwrap();
    }

    fn sweeper(store: Arc<MemoryStore>, notifier: Arc<RecordingNotifier>) -> Sweeper {
        Sweeper::new(store, notifier, OPERATOR.to_string())
    }

    #[test]
    fn window_spans_ten_minutes_truncated_to_the_minute() {
        let now = datetime!(2024-06-01 09:55:42.5 UTC);
        let (start, end) = window_bounds(now).unwrap();
        assert_eq!(start, "2024-06-01 09:55");
        assert_eq!(end, "2024-06-01 10:05");
    }

    #[tokio::test]
    async fn sweeps_slots_inside_the_window_only() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        // now + 7 minutes is due, now + 15 minutes is not.
        seed(&store, date!(2024 - 06 - 01), "10:02", "due@acme.example").await;
        seed(&store, date!(2024 - 06 - 01), "10:10", "later@acme.example").await;

        sweeper(store, notifier.clone())
            .run_once(datetime!(2024-06-01 09:55 UTC))
            .await
            .unwrap();

        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "due@acme.example");
        assert!(sent[0].body.contains("https://meet.jit.si/fortifund-demo-20240601-1002"));
        assert_eq!(sent[1].to, OPERATOR);
    }

    #[tokio::test]
    async fn repeated_sweep_does_not_resend() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        seed(&store, date!(2024 - 06 - 01), "10:02", "due@acme.example").await;

        let sweeper = sweeper(store, notifier.clone());
        let now = datetime!(2024-06-01 09:55 UTC);
        sweeper.run_once(now).await.unwrap();
        sweeper.run_once(now).await.unwrap();

        assert_eq!(notifier.sent().await.len(), 2);
    }

    #[tokio::test]
    async fn one_failed_reservation_does_not_block_the_rest() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        seed(&store, date!(2024 - 06 - 01), "10:01", "broken@acme.example").await;
        seed(&store, date!(2024 - 06 - 01), "10:02", "fine@acme.example").await;
        notifier.fail_for("broken@acme.example").await;

        sweeper(store.clone(), notifier.clone())
            .run_once(datetime!(2024-06-01 09:55 UTC))
            .await
            .unwrap();

        let sent = notifier.sent().await;
        assert!(sent.iter().any(|mail| mail.to == "fine@acme.example"));
        assert!(sent.iter().all(|mail| mail.to != "broken@acme.example"));
        // The failed reservation stays unsent and is retried by a later pass.
        let still_due = store
            .unsent_in_window("2024-06-01 09:55", "2024-06-01 10:05")
            .await
            .unwrap();
        assert_eq!(still_due.len(), 1);
        assert_eq!(still_due[0].email, "broken@acme.example");
    }

    #[tokio::test(start_paused = true)]
    async fn first_sweep_waits_one_interval() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        // Seed a slot due right away so a boot-time sweep would mail it.
        let due = OffsetDateTime::now_utc() + Duration::minutes(5);
        let meeting_time = format!("{:02}:{:02}", due.hour(), due.minute());
        seed(&store, due.date(), &meeting_time, "boot@acme.example").await;

        let handle = sweeper(store, notifier.clone()).start();
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert!(notifier.sent().await.is_empty());

        tokio::time::advance(SWEEP_INTERVAL).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert_eq!(notifier.sent().await.len(), 2);

        handle.stop().await;
    }

    #[tokio::test]
    async fn handle_stops_the_background_task() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let handle = sweeper(store, notifier).start();
        handle.stop().await;
    }
}
