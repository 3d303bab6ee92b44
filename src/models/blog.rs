use serde::{Deserialize, Serialize};
use time::Date;

use crate::models::reservation::iso_date;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Blog {
    pub blog_id: i32,
    pub heading: String,
    pub subheading: String,
    pub author: String,
    #[serde(with = "iso_date")]
    pub publish_date: Date,
    pub content: String,
    pub thumbnail_image_filename: Option<String>,
    pub thumbnail_image_alt_text: Option<String>,
}

/// Form payload for creating or updating a blog post. The thumbnail is a
/// filename reference, file uploads are handled outside this service.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewBlogPost {
    pub heading: String,
    pub subheading: Option<String>,
    pub author: String,
    #[serde(with = "iso_date")]
    pub publish_date: Date,
    pub content: String,
    pub image_filename: Option<String>,
    pub image_alt_text: Option<String>,
}
