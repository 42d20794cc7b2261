mod api;
mod domain;
mod routes;
mod shared;
mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;
    shared::data::db::initialize_database(db_path.to_str()).await?;
    tracing::info!("Database ready at {}", db_path.display());

    let app = routes::configure_routes();

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
