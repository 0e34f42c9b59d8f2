use marketplace_api::{config::AppConfig, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let state = db::connect(&config).await?;
    db::init(&state, &config).await?;
    println!("Schema ready and demo data seeded in {}", config.database_url);
    Ok(())
}
