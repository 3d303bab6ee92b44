use serde::{Deserialize, Serialize};

/// Single-row editable sections of the marketing site. Each table holds
/// exactly one row with id = 1, seeded at schema bootstrap.

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NavContent {
    pub logo: String,
    pub anchor1: String,
    pub anchor2: String,
    pub anchor3: String,
    pub dropdown1: String,
    pub dropdown2: String,
    pub cta_label: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HeroContent {
    pub heading: String,
    pub description: String,
    pub image: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FooterContent {
    pub logo: String,
    pub social_icon1: String,
    pub social_link1: String,
    pub social_icon2: String,
    pub social_link2: String,
    pub social_icon3: String,
    pub social_link3: String,
    pub social_icon4: String,
    pub social_link4: String,
}
