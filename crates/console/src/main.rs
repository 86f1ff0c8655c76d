use inventory_console::{App, Result, config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(config.log_file.as_deref())?;
    tracing::info!(base_url = %config.base_url, "starting console");

    let mut app = App::new(config)?;
    app.run().await?;
    Ok(())
}
