use ctrlc::set_handler;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    quill_server::init_tracing();

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    let config = quill_server::load_config()?;
    let (binding_addr, state) = quill_server::init(config)?;
    let router = quill_server::router(state);

    let listener = TcpListener::bind(&binding_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
