use clap::Parser;

#[derive(Parser, Clone)]
pub struct Config {
    #[clap(env, long)]
    pub environment: String,

    /// Comma-separated list of allowed CORS origins.
    #[clap(env, long)]
    pub origin_urls: String,

    #[clap(env, long, default_value = "127.0.0.1")]
    pub db_host: String,
    #[clap(env, long, default_value = "5432")]
    pub db_port: u16,
    #[clap(env, long)]
    pub db_user: String,
    #[clap(env, long)]
    pub db_password: String,
    #[clap(env, long)]
    pub db_name: String,

    #[clap(env, long)]
    pub smtp_server: String,
    #[clap(env, long, default_value = "587")]
    pub smtp_port: u16,
    #[clap(env, long)]
    pub smtp_username: String,
    #[clap(env, long)]
    pub smtp_password: String,

    #[clap(env, long)]
    pub admin_username: String,
    #[clap(env, long)]
    pub admin_password: String,
    /// Operator inbox for contact notifications and meeting summaries.
    #[clap(env, long)]
    pub admin_email: String,
}
