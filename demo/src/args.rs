use clap::Parser;

#[derive(Debug, Clone, Parser)]
pub struct Args {
    /// Postgres connection string.
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Port the HTTP server listens on.
    #[clap(long, env = "PORT", default_value = "3000")]
    pub port: u16,
}
