pub mod blog;
pub mod contact;
pub mod content;
pub mod faq;
pub mod reservation;
