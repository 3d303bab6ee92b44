use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Faq {
    pub faq_id: i32,
    pub category: String,
    pub question: String,
    pub answer: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewFaq {
    pub category: String,
    pub question: String,
    pub answer: String,
}
