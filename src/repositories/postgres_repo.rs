use anyhow::{anyhow, Context};
use async_trait::async_trait;
use bb8_postgres::bb8::{Pool, PooledConnection};
use bb8_postgres::tokio_postgres::{NoTls, Row};
use bb8_postgres::PostgresConnectionManager;
use tracing::warn;

use crate::models::blog::{Blog, NewBlogPost};
use crate::models::contact::{ContactSubmission, NewContactSubmission};
use crate::models::content::{FooterContent, HeroContent, NavContent};
use crate::models::faq::{Faq, NewFaq};
use crate::models::reservation::{NewReservation, Reservation};
use crate::repositories::{ContactStore, ReservationStore};

pub const RETRY_LIMIT: usize = 5;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS nav_content (
    nav_id INTEGER PRIMARY KEY,
    logo TEXT NOT NULL DEFAULT '',
    anchor1 TEXT NOT NULL DEFAULT '',
    anchor2 TEXT NOT NULL DEFAULT '',
    anchor3 TEXT NOT NULL DEFAULT '',
    dropdown1 TEXT NOT NULL DEFAULT '',
    dropdown2 TEXT NOT NULL DEFAULT '',
    cta_label TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS hero_content (
    hero_id INTEGER PRIMARY KEY,
    heading TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    image TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS footer_content (
    footer_id INTEGER PRIMARY KEY,
    logo TEXT NOT NULL DEFAULT '',
    social_icon1 TEXT NOT NULL DEFAULT '',
    social_link1 TEXT NOT NULL DEFAULT '',
    social_icon2 TEXT NOT NULL DEFAULT '',
    social_link2 TEXT NOT NULL DEFAULT '',
    social_icon3 TEXT NOT NULL DEFAULT '',
    social_link3 TEXT NOT NULL DEFAULT '',
    social_icon4 TEXT NOT NULL DEFAULT '',
    social_link4 TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS images (
    image_id SERIAL PRIMARY KEY,
    image_filename TEXT NOT NULL,
    alt_text TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS blogs (
    blog_id SERIAL PRIMARY KEY,
    heading TEXT NOT NULL,
    subheading TEXT NOT NULL DEFAULT '',
    author TEXT NOT NULL,
    publish_date DATE NOT NULL,
    content TEXT NOT NULL,
    thumbnail_image_id INTEGER REFERENCES images (image_id)
);
CREATE TABLE IF NOT EXISTS faqs (
    faq_id SERIAL PRIMARY KEY,
    category TEXT NOT NULL,
    question TEXT NOT NULL,
    answer TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS contact_submissions (
    submission_id SERIAL PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    job_title TEXT NOT NULL,
    company_name TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    email TEXT NOT NULL,
    industry TEXT NOT NULL,
    num_employees TEXT NOT NULL,
    additional_details TEXT NOT NULL DEFAULT '',
    submission_date TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE TABLE IF NOT EXISTS demo_bookings (
    booking_id SERIAL PRIMARY KEY,
    firm_name TEXT NOT NULL,
    company_type TEXT NOT NULL,
    person_name TEXT NOT NULL,
    title TEXT,
    email TEXT NOT NULL,
    team_size TEXT,
    meeting_date DATE NOT NULL,
    meeting_time TEXT NOT NULL,
    meeting_link TEXT NOT NULL,
    link_sent BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE UNIQUE INDEX IF NOT EXISTS demo_bookings_slot_idx
    ON demo_bookings (meeting_date, meeting_time);
INSERT INTO nav_content (nav_id) VALUES (1) ON CONFLICT DO NOTHING;
INSERT INTO hero_content (hero_id) VALUES (1) ON CONFLICT DO NOTHING;
INSERT INTO footer_content (footer_id) VALUES (1) ON CONFLICT DO NOTHING;
";

const RESERVATION_COLUMNS: &str = "booking_id, firm_name, company_type, person_name, title, \
    email, team_size, meeting_date, meeting_time, meeting_link, link_sent, created_at";

pub struct PostgresConnectionRepo {
    postgres_connection: Pool<PostgresConnectionManager<NoTls>>,
}

impl PostgresConnectionRepo {
    pub fn new(
        postgres_connection: Pool<PostgresConnectionManager<NoTls>>,
    ) -> Self {
        Self {
            postgres_connection
        }
    }

    async fn get_postgres_connection(
        &self,
    ) -> anyhow::Result<PooledConnection<PostgresConnectionManager<NoTls>>> {
        for _ in 0..RETRY_LIMIT {
            match self.postgres_connection.get().await {
                Ok(conn) => return Ok(conn),
                Err(e) => {
                    warn!("Failed to retrieve postgres connection due to: {}, retrying in 3s", e);
                    tokio::time::sleep(tokio::time::Duration::from_secs(3)).await;
                    continue;
                }
            }
        }

        Err(anyhow!("Failed to retrieve a valid connection from postgres pool, BAILING"))
    }

    /// Creates every table the service needs and seeds the single-row
    /// content sections. Safe to run on every boot.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        let conn = self.get_postgres_connection().await?;
        conn.batch_execute(SCHEMA)
            .await
            .context("Failed to bootstrap the database schema")?;
        Ok(())
    }

    pub async fn list_demo_bookings(&self) -> anyhow::Result<Vec<Reservation>> {
        let conn = self.get_postgres_connection().await?;
        let stmt = format!(
            "SELECT {} FROM demo_bookings ORDER BY meeting_date DESC;",
            RESERVATION_COLUMNS
        );

        let rows = conn
            .query(&stmt, &[])
            .await
            .context("Failed to retrieve demo bookings")?;
        Ok(rows.into_iter().map(parse_row_into_reservation).collect())
    }

    pub async fn list_blogs(&self) -> anyhow::Result<Vec<Blog>> {
        let conn = self.get_postgres_connection().await?;
        let rows = conn
            .query(
                "SELECT b.blog_id, b.heading, b.subheading, b.author, b.publish_date, b.content, \
                    i.image_filename AS thumbnail_image_filename, \
                    i.alt_text AS thumbnail_image_alt_text \
                FROM blogs b \
                LEFT JOIN images i ON b.thumbnail_image_id = i.image_id \
                ORDER BY b.publish_date DESC;",
                &[],
            )
            .await
            .context("Failed to retrieve blog posts")?;
        Ok(rows.into_iter().map(parse_row_into_blog).collect())
    }

    /// Newest nine posts, the set the landing page surfaces.
    pub async fn latest_blogs(&self) -> anyhow::Result<Vec<Blog>> {
        let conn = self.get_postgres_connection().await?;
        let rows = conn
            .query(
                "SELECT b.blog_id, b.heading, b.subheading, b.author, b.publish_date, b.content, \
                    i.image_filename AS thumbnail_image_filename, \
                    i.alt_text AS thumbnail_image_alt_text \
                FROM blogs b \
                LEFT JOIN images i ON b.thumbnail_image_id = i.image_id \
                ORDER BY b.publish_date DESC \
                LIMIT 9;",
                &[],
            )
            .await
            .context("Failed to retrieve latest blog posts")?;
        Ok(rows.into_iter().map(parse_row_into_blog).collect())
    }

    pub async fn fetch_blog(&self, blog_id: i32) -> anyhow::Result<Option<Blog>> {
        let conn = self.get_postgres_connection().await?;
        let row = conn
            .query_opt(
                "SELECT b.blog_id, b.heading, b.subheading, b.author, b.publish_date, b.content, \
                    i.image_filename AS thumbnail_image_filename, \
                    i.alt_text AS thumbnail_image_alt_text \
                FROM blogs b \
                LEFT JOIN images i ON b.thumbnail_image_id = i.image_id \
                WHERE b.blog_id = $1;",
                &[&blog_id],
            )
            .await
            .context("Failed to retrieve the blog post")?;
        Ok(row.map(parse_row_into_blog))
    }

    pub async fn insert_blog(&self, post: &NewBlogPost) -> anyhow::Result<i32> {
        let conn = self.get_postgres_connection().await?;

        let mut thumbnail_image_id: Option<i32> = None;
        if let Some(filename) = &post.image_filename {
            let alt_text = post
                .image_alt_text
                .clone()
                .unwrap_or_else(|| format!("Thumbnail for {}", post.heading));
            let row = conn
                .query_one(
                    "INSERT INTO images (image_filename, alt_text) VALUES ($1, $2) \
                        RETURNING image_id;",
                    &[filename, &alt_text],
                )
                .await
                .context("Failed to store the blog thumbnail image")?;
            thumbnail_image_id = Some(row.get("image_id"));
        }

        let subheading = post.subheading.clone().unwrap_or_default();
        let row = conn
            .query_one(
                "INSERT INTO blogs (heading, subheading, author, publish_date, content, thumbnail_image_id) \
                    VALUES ($1, $2, $3, $4, $5, $6) \
                    RETURNING blog_id;",
                &[
                    &post.heading,
                    &subheading,
                    &post.author,
                    &post.publish_date,
                    &post.content,
                    &thumbnail_image_id,
                ],
            )
            .await
            .context("Failed to insert the blog post")?;
        Ok(row.get("blog_id"))
    }

    pub async fn update_blog(&self, blog_id: i32, post: &NewBlogPost) -> anyhow::Result<bool> {
        let conn = self.get_postgres_connection().await?;

        let existing = conn
            .query_opt(
                "SELECT thumbnail_image_id FROM blogs WHERE blog_id = $1;",
                &[&blog_id],
            )
            .await
            .context("Failed to look up the blog post")?;
        let Some(existing) = existing else {
            return Ok(false);
        };

        let mut thumbnail_image_id: Option<i32> = existing.get("thumbnail_image_id");
        if let Some(filename) = &post.image_filename {
            let alt_text = post
                .image_alt_text
                .clone()
                .unwrap_or_else(|| format!("Thumbnail for {}", post.heading));
            match thumbnail_image_id {
                Some(image_id) => {
                    conn.execute(
                        "UPDATE images SET image_filename = $1, alt_text = $2 WHERE image_id = $3;",
                        &[filename, &alt_text, &image_id],
                    )
                    .await
                    .context("Failed to update the blog thumbnail image")?;
                }
                None => {
                    let row = conn
                        .query_one(
                            "INSERT INTO images (image_filename, alt_text) VALUES ($1, $2) \
                                RETURNING image_id;",
                            &[filename, &alt_text],
                        )
                        .await
                        .context("Failed to store the blog thumbnail image")?;
                    thumbnail_image_id = Some(row.get("image_id"));
                }
            }
        }

        let subheading = post.subheading.clone().unwrap_or_default();
        conn.execute(
            "UPDATE blogs SET heading = $1, subheading = $2, author = $3, publish_date = $4, \
                content = $5, thumbnail_image_id = $6 \
                WHERE blog_id = $7;",
            &[
                &post.heading,
                &subheading,
                &post.author,
                &post.publish_date,
                &post.content,
                &thumbnail_image_id,
                &blog_id,
            ],
        )
        .await
        .context("Failed to update the blog post")?;
        Ok(true)
    }

    pub async fn delete_blog(&self, blog_id: i32) -> anyhow::Result<bool> {
        let conn = self.get_postgres_connection().await?;

        let existing = conn
            .query_opt(
                "SELECT thumbnail_image_id FROM blogs WHERE blog_id = $1;",
                &[&blog_id],
            )
            .await
            .context("Failed to look up the blog post")?;
        let Some(existing) = existing else {
            return Ok(false);
        };
        let thumbnail_image_id: Option<i32> = existing.get("thumbnail_image_id");

        conn.execute("DELETE FROM blogs WHERE blog_id = $1;", &[&blog_id])
            .await
            .context("Failed to delete the blog post")?;
        if let Some(image_id) = thumbnail_image_id {
            conn.execute("DELETE FROM images WHERE image_id = $1;", &[&image_id])
                .await
                .context("Failed to delete the blog thumbnail image")?;
        }
        Ok(true)
    }

    pub async fn list_faqs(&self) -> anyhow::Result<Vec<Faq>> {
        let conn = self.get_postgres_connection().await?;
        let rows = conn
            .query(
                "SELECT faq_id, category, question, answer FROM faqs ORDER BY category, faq_id;",
                &[],
            )
            .await
            .context("Failed to retrieve FAQs")?;
        Ok(rows.into_iter().map(parse_row_into_faq).collect())
    }

    pub async fn insert_faq(&self, faq: &NewFaq) -> anyhow::Result<i32> {
        let conn = self.get_postgres_connection().await?;
        let row = conn
            .query_one(
                "INSERT INTO faqs (category, question, answer) VALUES ($1, $2, $3) \
                    RETURNING faq_id;",
                &[&faq.category, &faq.question, &faq.answer],
            )
            .await
            .context("Failed to insert the FAQ")?;
        Ok(row.get("faq_id"))
    }

    pub async fn update_faq(&self, faq_id: i32, faq: &NewFaq) -> anyhow::Result<bool> {
        let conn = self.get_postgres_connection().await?;
        let updated = conn
            .execute(
                "UPDATE faqs SET category = $1, question = $2, answer = $3 WHERE faq_id = $4;",
                &[&faq.category, &faq.question, &faq.answer, &faq_id],
            )
            .await
            .context("Failed to update the FAQ")?;
        Ok(updated > 0)
    }

    pub async fn delete_faq(&self, faq_id: i32) -> anyhow::Result<bool> {
        let conn = self.get_postgres_connection().await?;
        let deleted = conn
            .execute("DELETE FROM faqs WHERE faq_id = $1;", &[&faq_id])
            .await
            .context("Failed to delete the FAQ")?;
        Ok(deleted > 0)
    }

    pub async fn list_contact_submissions(&self) -> anyhow::Result<Vec<ContactSubmission>> {
        let conn = self.get_postgres_connection().await?;
        let rows = conn
            .query(
                "SELECT submission_id, first_name, last_name, job_title, company_name, \
                    phone_number, email, industry, num_employees, additional_details, submission_date \
                FROM contact_submissions \
                ORDER BY submission_date DESC;",
                &[],
            )
            .await
            .context("Failed to retrieve contact submissions")?;
        Ok(rows
            .into_iter()
            .map(parse_row_into_contact_submission)
            .collect())
    }

    pub async fn fetch_nav(&self) -> anyhow::Result<Option<NavContent>> {
        let conn = self.get_postgres_connection().await?;
        let row = conn
            .query_opt("SELECT * FROM nav_content WHERE nav_id = 1;", &[])
            .await
            .context("Failed to retrieve nav content")?;
        Ok(row.map(parse_row_into_nav))
    }

    pub async fn fetch_hero(&self) -> anyhow::Result<Option<HeroContent>> {
        let conn = self.get_postgres_connection().await?;
        let row = conn
            .query_opt("SELECT * FROM hero_content WHERE hero_id = 1;", &[])
            .await
            .context("Failed to retrieve hero content")?;
        Ok(row.map(parse_row_into_hero))
    }

    pub async fn fetch_footer(&self) -> anyhow::Result<Option<FooterContent>> {
        let conn = self.get_postgres_connection().await?;
        let row = conn
            .query_opt("SELECT * FROM footer_content WHERE footer_id = 1;", &[])
            .await
            .context("Failed to retrieve footer content")?;
        Ok(row.map(parse_row_into_footer))
    }

    pub async fn update_nav(&self, nav: &NavContent) -> anyhow::Result<()> {
        let conn = self.get_postgres_connection().await?;
        conn.execute(
            "UPDATE nav_content SET \
                logo = $1, anchor1 = $2, anchor2 = $3, anchor3 = $4, \
                dropdown1 = $5, dropdown2 = $6, cta_label = $7 \
                WHERE nav_id = 1;",
            &[
                &nav.logo,
                &nav.anchor1,
                &nav.anchor2,
                &nav.anchor3,
                &nav.dropdown1,
                &nav.dropdown2,
                &nav.cta_label,
            ],
        )
        .await
        .context("Failed to update nav content")?;
        Ok(())
    }

    pub async fn update_hero(&self, hero: &HeroContent) -> anyhow::Result<()> {
        let conn = self.get_postgres_connection().await?;
        conn.execute(
            "UPDATE hero_content SET heading = $1, description = $2, image = $3 \
                WHERE hero_id = 1;",
            &[&hero.heading, &hero.description, &hero.image],
        )
        .await
        .context("Failed to update hero content")?;
        Ok(())
    }

    pub async fn update_footer(&self, footer: &FooterContent) -> anyhow::Result<()> {
        let conn = self.get_postgres_connection().await?;
        conn.execute(
            "UPDATE footer_content SET \
                logo = $1, \
                social_icon1 = $2, social_link1 = $3, \
                social_icon2 = $4, social_link2 = $5, \
                social_icon3 = $6, social_link3 = $7, \
                social_icon4 = $8, social_link4 = $9 \
                WHERE footer_id = 1;",
            &[
                &footer.logo,
                &footer.social_icon1,
                &footer.social_link1,
                &footer.social_icon2,
                &footer.social_link2,
                &footer.social_icon3,
                &footer.social_link3,
                &footer.social_icon4,
                &footer.social_link4,
            ],
        )
        .await
        .context("Failed to update footer content")?;
        Ok(())
    }
}

#[async_trait]
impl ReservationStore for PostgresConnectionRepo {
    async fn insert_reservation(
        &self,
        reservation: &NewReservation,
        meeting_link: &str,
    ) -> anyhow::Result<Option<Reservation>> {
        let conn = self.get_postgres_connection().await?;
        // The unique index on (meeting_date, meeting_time) makes the conflict
        // check and the insert a single atomic statement.
        let stmt = format!(
            "INSERT INTO demo_bookings \
                (firm_name, company_type, person_name, title, email, team_size, meeting_date, meeting_time, meeting_link) \
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
                ON CONFLICT (meeting_date, meeting_time) DO NOTHING \
                RETURNING {};",
            RESERVATION_COLUMNS
        );

        let row = conn
            .query_opt(
                &stmt,
                &[
                    &reservation.firm_name,
                    &reservation.company_type,
                    &reservation.person_name,
                    &reservation.title,
                    &reservation.email,
                    &reservation.team_size,
                    &reservation.meeting_date,
                    &reservation.meeting_time,
                    &meeting_link,
                ],
            )
            .await
            .context("Failed to insert the demo booking")?;
        Ok(row.map(parse_row_into_reservation))
    }

    async fn booked_dates(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.get_postgres_connection().await?;
        let rows = conn
            .query(
                "SELECT to_char(meeting_date, 'YYYY-MM-DD') AS meeting_date FROM demo_bookings;",
                &[],
            )
            .await
            .context("Failed to retrieve booked dates")?;
        Ok(rows.into_iter().map(|row| row.get("meeting_date")).collect())
    }

    async fn booked_slots(&self) -> anyhow::Result<Vec<(String, String)>> {
        let conn = self.get_postgres_connection().await?;
        let rows = conn
            .query(
                "SELECT to_char(meeting_date, 'YYYY-MM-DD') AS meeting_date, meeting_time \
                FROM demo_bookings \
                ORDER BY booking_id;",
                &[],
            )
            .await
            .context("Failed to retrieve booked slots")?;
        Ok(rows
            .into_iter()
            .map(|row| (row.get("meeting_date"), row.get("meeting_time")))
            .collect())
    }

    async fn unsent_in_window(
        &self,
        window_start: &str,
        window_end: &str,
    ) -> anyhow::Result<Vec<Reservation>> {
        let conn = self.get_postgres_connection().await?;
        let stmt = format!(
            "SELECT {} FROM demo_bookings \
                WHERE link_sent = FALSE \
                AND to_char(meeting_date, 'YYYY-MM-DD') || ' ' || meeting_time BETWEEN $1 AND $2;",
            RESERVATION_COLUMNS
        );

        let rows = conn
            .query(&stmt, &[&window_start, &window_end])
            .await
            .context("Failed to retrieve due demo bookings")?;
        Ok(rows.into_iter().map(parse_row_into_reservation).collect())
    }

    async fn mark_link_sent(&self, booking_id: i32) -> anyhow::Result<()> {
        let conn = self.get_postgres_connection().await?;
        conn.execute(
            "UPDATE demo_bookings SET link_sent = TRUE WHERE booking_id = $1;",
            &[&booking_id],
        )
        .await
        .context("Failed to mark the meeting link as sent")?;
        Ok(())
    }
}

#[async_trait]
impl ContactStore for PostgresConnectionRepo {
    async fn insert_contact_submission(
        &self,
        submission: &NewContactSubmission,
    ) -> anyhow::Result<()> {
        let conn = self.get_postgres_connection().await?;
        let additional_details = submission.additional_details.clone().unwrap_or_default();
        conn.execute(
            "INSERT INTO contact_submissions \
                (first_name, last_name, job_title, company_name, phone_number, email, industry, num_employees, additional_details) \
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9);",
            &[
                &submission.first_name,
                &submission.last_name,
                &submission.job_title,
                &submission.company_name,
                &submission.phone_number,
                &submission.email,
                &submission.industry,
                &submission.num_employees,
                &additional_details,
            ],
        )
        .await
        .context("Failed to store the contact submission")?;
        Ok(())
    }
}

fn parse_row_into_reservation(
    row: Row
) -> Reservation {
    Reservation {
        booking_id: row.get("booking_id"),
        firm_name: row.get("firm_name"),
        company_type: row.get("company_type"),
        person_name: row.get("person_name"),
        title: row.get("title"),
        email: row.get("email"),
        team_size: row.get("team_size"),
        meeting_date: row.get("meeting_date"),
        meeting_time: row.get("meeting_time"),
        meeting_link: row.get("meeting_link"),
        link_sent: row.get("link_sent"),
        created_at: row.get("created_at"),
    }
}

fn parse_row_into_blog(
    row: Row
) -> Blog {
    Blog {
        blog_id: row.get("blog_id"),
        heading: row.get("heading"),
        subheading: row.get("subheading"),
        author: row.get("author"),
        publish_date: row.get("publish_date"),
        content: row.get("content"),
        thumbnail_image_filename: row.get("thumbnail_image_filename"),
        thumbnail_image_alt_text: row.get("thumbnail_image_alt_text"),
    }
}

fn parse_row_into_faq(
    row: Row
) -> Faq {
    Faq {
        faq_id: row.get("faq_id"),
        category: row.get("category"),
        question: row.get("question"),
        answer: row.get("answer"),
    }
}

fn parse_row_into_contact_submission(
    row: Row
) -> ContactSubmission {
    ContactSubmission {
        submission_id: row.get("submission_id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        job_title: row.get("job_title"),
        company_name: row.get("company_name"),
        phone_number: row.get("phone_number"),
        email: row.get("email"),
        industry: row.get("industry"),
        num_employees: row.get("num_employees"),
        additional_details: row.get("additional_details"),
        submission_date: row.get("submission_date"),
    }
}

fn parse_row_into_nav(
    row: Row
) -> NavContent {
    NavContent {
        logo: row.get("logo"),
        anchor1: row.get("anchor1"),
        anchor2: row.get("anchor2"),
        anchor3: row.get("anchor3"),
        dropdown1: row.get("dropdown1"),
        dropdown2: row.get("dropdown2"),
        cta_label: row.get("cta_label"),
    }
}

fn parse_row_into_hero(
    row: Row
) -> HeroContent {
    HeroContent {
        heading: row.get("heading"),
        description: row.get("description"),
        image: row.get("image"),
    }
}

fn parse_row_into_footer(
    row: Row
) -> FooterContent {
    FooterContent {
        logo: row.get("logo"),
        social_icon1: row.get("social_icon1"),
        social_link1: row.get("social_link1"),
        social_icon2: row.get("social_icon2"),
        social_link2: row.get("social_link2"),
        social_icon3: row.get("social_icon3"),
        social_link3: row.get("social_link3"),
        social_icon4: row.get("social_icon4"),
        social_link4: row.get("social_link4"),
    }
}
