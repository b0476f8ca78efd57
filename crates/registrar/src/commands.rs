//! CLI command implementations.

use std::sync::Arc;

use color_eyre::eyre::Result;

use registrar_server::{Server, ServerConfig};
use registrar_store::{MemoryStore, StudentStore};

/// Start the HTTP server over a fresh in-memory store.
pub async fn serve(host: String, port: u16, cors: bool) -> Result<()> {
    tracing::info!("Starting registrar server...");

    let addr = format!("{}:{}", host, port).parse()?;
    let config = ServerConfig::builder().addr(addr).cors(cors).build();

    // Records live for the process lifetime only.
    let store: Arc<dyn StudentStore> = Arc::new(MemoryStore::new());

    let server = Server::new(config, store);
    server.run().await?;

    Ok(())
}

/// Print version info.
pub fn version() {
    println!("registrar {}", env!("CARGO_PKG_VERSION"));
}
