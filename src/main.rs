use klaviomat::{config::get_or_init_config, App, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        klaviomat::init_production_tracing();
    }
    #[cfg(debug_assertions)]
    {
        klaviomat::init_dbg_tracing();
    }

    let config = get_or_init_config().clone();
    let app = App::build_from_config(config).await?;

    klaviomat::serve(app.listener, app.app_state).await?;

    Ok(())
}
