//! Vitrine static site generator
//!
//! Writes the home page and every product page as static HTML.
//!
//! ## Usage
//!
//! ```bash
//! vitrine-ssg --config vitrine.toml --output dist
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use vitrine_conf::Settings;
use vitrine_pages::DocumentTemplate;
use vitrine_shop::logging::init_tracing;
use vitrine_shop::{Catalog, Renderer, StaticSite};

#[derive(Parser)]
#[command(name = "vitrine-ssg")]
#[command(about = "Generate static storefront pages", long_about = None)]
#[command(version)]
struct Cli {
	/// Settings file (TOML)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Output directory (overrides settings)
	#[arg(short, long, value_name = "DIR")]
	output: Option<PathBuf>,

	/// Public path the site is mounted under
	#[arg(long)]
	base: Option<String>,
}

fn main() -> anyhow::Result<()> {
	init_tracing("vitrine_shop=info");
	let cli = Cli::parse();

	let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
	if let Some(output) = cli.output {
		settings.output_dir = output;
	}
	if let Some(base) = cli.base {
		settings.base = base;
	}

	let catalog = Catalog::from_path(&settings.items_path).context("loading catalog")?;
	let template = DocumentTemplate::from_path(&settings.template_path)
		.with_context(|| format!("reading template {}", settings.template_path.display()))?;
	let renderer = Renderer::from_settings(Arc::new(catalog), &settings);

	let site = StaticSite::new(&renderer, &template, &settings.output_dir);
	let report = site.generate();
	tracing::info!(
		written = report.written.len(),
		failed = report.failed.len(),
		output = %settings.output_dir.display(),
		"static site generated"
	);

	if !report.is_complete() {
		anyhow::bail!("{} page(s) failed to generate", report.failed.len());
	}
	Ok(())
}
