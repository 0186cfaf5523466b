use tracing_subscriber::{EnvFilter, fmt};

pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::from_default_env()
        .add_directive("photo_catalog=debug".parse()?)
        .add_directive("sea_orm=info".parse()?)
        .add_directive("sqlx=warn".parse()?);

    fmt().with_env_filter(filter).init();

    Ok(())
}
