//! Larynx - Language Server Skeleton Binary
//!
//! Speaks the protocol on stdin/stdout with a handler that implements
//! only `initialize`; every other request answers MethodNotFound.
//! Useful for probing editor wiring without a real backend attached.

use async_trait::async_trait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use larynx::models::{InitializeParams, InitializeResult};
use larynx::{Handled, LanguageServer, Server};

/// Backend with no capabilities beyond the handshake.
struct Skeleton;

#[async_trait]
impl LanguageServer for Skeleton {
    async fn initialize(&mut self, params: InitializeParams) -> Handled<InitializeResult> {
        tracing::info!("Initialized for {}", params.root_uri);
        Ok(InitializeResult::default())
    }
}

fn main() {
    // Logs go to stderr; stdout is the protocol channel.
    // Use RUST_LOG=larynx=trace to see wire traffic.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "larynx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(async_main()) {
        eprintln!("{}", e);
        std::process::exit(2);
    }
}

async fn async_main() -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let mut server = Server::new(stdin, stdout, Skeleton);
    server.run().await?;
    Ok(())
}
