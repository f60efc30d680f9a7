//! Vitrine storefront server
//!
//! Renders storefront pages on request.
//!
//! ## Usage
//!
//! ```bash
//! vitrine-server --config vitrine.toml
//! vitrine-server --port 8080 --base /shop/
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use vitrine_conf::Settings;
use vitrine_pages::DocumentTemplate;
use vitrine_shop::logging::init_tracing;
use vitrine_shop::{Catalog, Renderer, ShopServer, ShopService};

#[derive(Parser)]
#[command(name = "vitrine-server")]
#[command(about = "Serve server-rendered storefront pages", long_about = None)]
#[command(version)]
struct Cli {
	/// Settings file (TOML)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Interface to listen on
	#[arg(long)]
	host: Option<String>,

	/// Port to listen on
	#[arg(short, long)]
	port: Option<u16>,

	/// Public path the site is mounted under
	#[arg(long)]
	base: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	init_tracing("vitrine_shop=info,vitrine_pages=info");
	let cli = Cli::parse();

	let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
	if let Some(host) = cli.host {
		settings.host = host;
	}
	if let Some(port) = cli.port {
		settings.port = port;
	}
	if let Some(base) = cli.base {
		settings.base = base;
	}

	let catalog = Catalog::from_path(&settings.items_path).context("loading catalog")?;
	let template = DocumentTemplate::from_path(&settings.template_path)
		.with_context(|| format!("reading template {}", settings.template_path.display()))?;
	let renderer = Renderer::from_settings(Arc::new(catalog), &settings);
	let service = ShopService::new(Arc::new(renderer), Arc::new(template));

	let addr: SocketAddr = settings
		.bind_address()
		.parse()
		.with_context(|| format!("invalid listen address {}", settings.bind_address()))?;
	let server = ShopServer::bind(addr, service).await?;
	tracing::info!(
		"storefront server started at http://{}{}/",
		server.local_addr()?,
		settings.base_path()
	);

	server
		.serve_until(async {
			if let Err(err) = tokio::signal::ctrl_c().await {
				tracing::error!(error = %err, "failed to listen for shutdown signal");
			}
		})
		.await?;
	Ok(())
}
