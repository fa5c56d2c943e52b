// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! bing-images - search Bing for images from the command line.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bing_cli_config::{load_config_with_cli, BingConfig, CliOverrides};
use bing_common_secret::SecretString;
use bing_search_images::{
	ImageResult, ImageSearchClient, ImageSearchRequest, ImageSearchResponse, ReqwestTransport,
	ResponseFormat, ReturnShape,
};

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
	Json,
	Xml,
}

impl From<FormatArg> for ResponseFormat {
	fn from(v: FormatArg) -> Self {
		match v {
			FormatArg::Json => ResponseFormat::Json,
			FormatArg::Xml => ResponseFormat::Xml,
		}
	}
}

/// Search Bing for images
#[derive(Parser, Debug)]
#[command(name = "bing-images", version, about, long_about = None)]
struct Args {
	/// Path to a configuration file (default: ~/.config/bing-images/config.toml)
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Bing API key (overrides BING_API_KEY and the config file)
	#[arg(long)]
	api_key: Option<String>,

	/// Log level when RUST_LOG is unset
	#[arg(short, long, default_value = "warn")]
	log_level: String,

	/// Output logs as JSON
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Search for images
	Search {
		/// Search text
		query: String,
		/// Number of results to request
		#[arg(short = 'n', long)]
		max_results: Option<u32>,
		/// Adult filter: Off, Moderate or Strict
		#[arg(long)]
		adult: Option<String>,
		/// Image filter expression, e.g. Size:Medium
		#[arg(long)]
		image_filters: Option<String>,
		/// Query options, e.g. EnableHighlighting
		#[arg(long)]
		options: Option<String>,
		/// Response format requested from the API
		#[arg(long, value_enum)]
		format: Option<FormatArg>,
		/// Print the API response as-is instead of normalized results
		#[arg(long)]
		raw: bool,
		/// Print normalized results as JSON
		#[arg(long)]
		json: bool,
	},
	/// Print the effective configuration (API key redacted)
	Config,
}

fn init_tracing(level: &str, json: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	if json {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().json().with_writer(std::io::stderr))
			.init();
	} else {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().compact().with_writer(std::io::stderr))
			.init();
	}
}

/// Layer command-line flags over the configured search defaults.
fn build_request(defaults: &ImageSearchRequest, command: &Command) -> ImageSearchRequest {
	let mut request = defaults.clone();
	if let Command::Search {
		query,
		max_results,
		adult,
		image_filters,
		options,
		format,
		raw,
		..
	} = command
	{
		request.query = query.clone();
		if let Some(n) = max_results {
			request = request.with_max_results(*n);
		}
		if let Some(adult) = adult {
			request.adult_filter = adult.clone();
		}
		if let Some(filters) = image_filters {
			request.image_filters = filters.clone();
		}
		if let Some(options) = options {
			request.options = options.clone();
		}
		if let Some(format) = format {
			request.format = (*format).into();
		}
		if *raw {
			request.return_shape = ReturnShape::Object;
		}
	}
	request
}

fn build_client(config: &BingConfig, api_key: SecretString) -> Result<ImageSearchClient> {
	let mut transport = ReqwestTransport::with_timeout(Duration::from_secs(config.api.timeout_secs))
		.context("failed to create HTTP transport")?;
	if let Some(base_url) = &config.api.base_url {
		debug!(base_url = %base_url, "using base URL override");
		transport = transport.with_base_url(base_url.clone());
	}
	if config.api.allow_cleartext {
		warn!("cleartext base URL allowed, the API key may be sent unencrypted");
		transport = transport.allow_cleartext();
	}
	Ok(ImageSearchClient::with_transport(api_key, Box::new(transport)))
}

fn print_images(images: &[ImageResult]) {
	if images.is_empty() {
		println!("No images found.");
		return;
	}
	for (i, image) in images.iter().enumerate() {
		let content_type = if image.content_type.is_empty() {
			"unknown type"
		} else {
			image.content_type.as_str()
		};
		println!(
			"{:>2}. {} ({}x{}, {}, {} bytes)",
			i + 1,
			image.title,
			image.width,
			image.height,
			content_type,
			image.file_size
		);
		println!("    {}", image.media_url);
		println!("    source: {}", image.source_url);
	}
}

async fn run_search(config: BingConfig, api_key: SecretString, command: &Command) -> Result<()> {
	let request = build_request(&config.search, command);
	if request.query.trim().is_empty() {
		anyhow::bail!("Search query cannot be empty");
	}
	if api_key.is_empty() {
		warn!("no API key configured; set BING_API_KEY or pass --api-key");
	}
	let json_output = matches!(command, Command::Search { json: true, .. });

	let mut client = build_client(&config, api_key)?;

	info!(query = %request.query, "searching images");
	let response = client
		.get_images(&request)
		.await
		.context("image search failed")?;

	match &response {
		ImageSearchResponse::Images(images) if !json_output => print_images(images),
		_ => println!("{}", serde_json::to_string_pretty(&response.to_json()?)?),
	}
	Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(&args.log_level, args.json_logs);

	let cli = CliOverrides {
		api_key: args.api_key.clone().map(SecretString::new),
	};
	let config = load_config_with_cli(args.config.as_deref(), cli)
		.context("failed to load configuration")?;
	let api_key = config.api_key();

	match &args.command {
		Command::Search { .. } => run_search(config, api_key, &args.command).await,
		Command::Config => {
			print!(
				"{}",
				toml::to_string_pretty(&config).context("failed to render configuration")?
			);
			Ok(())
		}
	}
}
