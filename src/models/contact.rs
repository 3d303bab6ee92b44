use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ContactSubmission {
    pub submission_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub company_name: String,
    pub phone_number: String,
    pub email: String,
    pub industry: String,
    pub num_employees: String,
    pub additional_details: String,
    #[serde(with = "time::serde::rfc3339")]
    pub submission_date: OffsetDateTime,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub company_name: String,
    pub phone_number: String,
    pub email: String,
    pub industry: String,
    pub num_employees: String,
    pub additional_details: Option<String>,
}
