use serde::{Deserialize, Serialize};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// A persisted demo booking occupying one (meeting_date, meeting_time) slot.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Reservation {
    pub booking_id: i32,
    pub firm_name: String,
    pub company_type: String,
    pub person_name: String,
    pub title: Option<String>,
    pub email: String,
    pub team_size: Option<String>,
    #[serde(with = "iso_date")]
    pub meeting_date: Date,
    pub meeting_time: String,
    pub meeting_link: String,
    pub link_sent: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Reservation {
    pub fn meeting_date_iso(&self) -> String {
        self.meeting_date.format(ISO_DATE).unwrap()
    }

    /// "YYYY-MM-DD HH:MM" key used for the due-link window comparison.
    pub fn slot_stamp(&self) -> String {
        format!("{} {}", self.meeting_date_iso(), self.meeting_time)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewReservation {
    pub firm_name: String,
    pub company_type: String,
    pub person_name: String,
    pub title: Option<String>,
    pub email: String,
    pub team_size: Option<String>,
    #[serde(with = "iso_date")]
    pub meeting_date: Date,
    pub meeting_time: String,
}
