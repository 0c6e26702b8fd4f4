use std::io::Read;
use std::sync::Arc;

use opentelemetry_tide::TideExt;
use structopt::StructOpt;

pub mod album;
pub mod db;
pub mod models;
pub mod telemetry;
pub mod web;

#[derive(Clone, Debug)]
pub struct State {
    pub args: Arc<Args>,
    pub db: sqlx::postgres::PgPool,
    pub tera: Arc<tera::Tera>,
    pub cache_busting_string: Option<String>,
}

#[derive(Debug)]
pub enum Error {
    TemplateParseError(tera::Error),
    TelemetryInitError(anyhow::Error),
    DatabaseError(sqlx::Error),
    ListenError(std::io::Error),
}

impl From<Error> for i32 {
    fn from(error: Error) -> i32 {
        match error {
            Error::TemplateParseError(_) => 3,
            Error::TelemetryInitError(_) => 4,
            Error::DatabaseError(_) => 5,
            Error::ListenError(_) => 6,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::TemplateParseError(err) => {
                write!(f, "Template parsing error: {}", err)
            },
            Error::TelemetryInitError(err) => {
                write!(f, "Failed to init telemetry: {}", err)
            },
            Error::DatabaseError(err) => {
                write!(f, "Failed to connect to database: {}", err)
            },
            Error::ListenError(err) => {
                write!(f, "Failed to start HTTP server: {}", err)
            },
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct Args {
    /// Host address to bind to.
    #[structopt(long, default_value = "localhost", env = "LENS_ARTISTRY_BIND_ADDRESS")]
    pub address: String,
    /// Port to bind to.
    #[structopt(long, default_value = "8166", env = "LENS_ARTISTRY_BIND_PORT")]
    pub port: u16,

    /// PostgreSQL database url.
    #[structopt(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Site base URL, used for canonical links and the sitemap.
    #[structopt(long, env = "LENS_ARTISTRY_BASE_URL")]
    pub base_url: String,

    /// Path to Tera templates directory
    #[structopt(
        long,
        parse(from_os_str),
        default_value = "./templates",
        env = "LENS_ARTISTRY_TEMPLATE_PATH"
    )]
    pub template_path: std::path::PathBuf,

    /// Studio name shown in the navigation bar and footer.
    #[structopt(long, default_value = "LENS ARTISTRY", env = "LENS_ARTISTRY_SITE_NAME")]
    pub site_name: String,

    /// Contact e-mail address.
    #[structopt(
        long,
        default_value = "photo@lensartistry.ru",
        env = "LENS_ARTISTRY_CONTACT_EMAIL"
    )]
    pub contact_email: String,

    /// Contact phone number.
    #[structopt(
        long,
        default_value = "+7 (999) 123-45-67",
        env = "LENS_ARTISTRY_CONTACT_PHONE"
    )]
    pub contact_phone: String,

    /// Instagram profile link.
    #[structopt(long, env = "LENS_ARTISTRY_INSTAGRAM_URL")]
    pub instagram_url: Option<String>,

    /// Facebook page link.
    #[structopt(long, env = "LENS_ARTISTRY_FACEBOOK_URL")]
    pub facebook_url: Option<String>,

    /// Messenger link.
    #[structopt(long, env = "LENS_ARTISTRY_MESSENGER_URL")]
    pub messenger_url: Option<String>,
}

pub fn load_templates(template_path: &std::path::Path) -> Result<tera::Tera, tera::Error> {
    tera::Tera::new(&template_path.join("**/*.html").to_string_lossy())
}

fn read_cache_busting_string(template_path: &std::path::Path) -> Option<String> {
    let mut file = std::fs::File::open(template_path.join("cache-buster")).ok()?;
    let mut data = String::new();
    if let Err(err) = file.read_to_string(&mut data) {
        tracing::warn!(%err, "couldn't read cache busting string from file");
        return None;
    }
    data.split_whitespace().next().map(|s| s.to_string())
}

pub async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    let args = Arc::new(Args::from_args());

    telemetry::init().map_err(Error::TelemetryInitError)?;

    let pool = db::get_pool(&args.database_url)
        .await
        .map_err(Error::DatabaseError)?;

    let tera = load_templates(&args.template_path).map_err(Error::TemplateParseError)?;
    let cache_busting_string = read_cache_busting_string(&args.template_path);

    let state = State {
        args: args.clone(),
        db: pool,
        tera: Arc::new(tera),
        cache_busting_string,
    };
    let mut app = tide::with_state(state);

    app.with_default_tracing_middleware();

    web::mount(&mut app);

    let address: &str = args.address.as_ref();
    tracing::info!(address, port = args.port, "listening");
    app.listen((address, args.port))
        .await
        .map_err(Error::ListenError)?;

    Ok(())
}
