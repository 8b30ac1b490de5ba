// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Vellum CLI - manage sessions and posts on a Vellum CMS server.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vellum_cms::CmsClient;
use vellum_cms_config::{load_config_with_cli, CliOverrides, LogFormat, LogLevel, LoggingConfig};

mod auth;
mod locale;
mod post;

/// Vellum - multilingual CMS client
#[derive(Parser, Debug)]
#[command(name = "vellum", version, about, long_about = None)]
struct Args {
	/// Path to custom configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// CMS server URL (overrides config)
	#[arg(long, env = "VELLUM_BASE_URL")]
	base_url: Option<String>,

	/// Token file (overrides config)
	#[arg(long)]
	token_path: Option<PathBuf>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Sign in and persist the session token
	Login {
		email: String,
		/// Password; read from stdin when omitted
		#[arg(long, env = "VELLUM_PASSWORD", hide_env_values = true)]
		password: Option<String>,
	},
	/// Create an account and sign in
	Register {
		email: String,
		#[arg(long)]
		name: Option<String>,
		/// Password; read from stdin when omitted
		#[arg(long, env = "VELLUM_PASSWORD", hide_env_values = true)]
		password: Option<String>,
	},
	/// Forget the persisted session token
	Logout,
	/// Show the signed-in user and granted permissions
	Whoami,
	/// Check permissions for the current session (exit code 1 if denied)
	Can {
		#[arg(required = true)]
		permissions: Vec<String>,
		/// Require every permission instead of any
		#[arg(long)]
		all: bool,
	},
	/// Post operations
	Post {
		#[command(subcommand)]
		command: post::PostCommand,
	},
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		Self {
			base_url: args.base_url.clone(),
			default_locale: None,
			token_path: args.token_path.clone(),
			log_level: args.log_level.clone(),
			log_format: if args.json_logs {
				Some("json".to_string())
			} else {
				None
			},
			config_file: args.config.clone(),
		}
	}
}

fn log_level_to_tracing(level: LogLevel) -> tracing::Level {
	match level {
		LogLevel::Trace => tracing::Level::TRACE,
		LogLevel::Debug => tracing::Level::DEBUG,
		LogLevel::Info => tracing::Level::INFO,
		LogLevel::Warn => tracing::Level::WARN,
		LogLevel::Error => tracing::Level::ERROR,
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("vellum={}", log_level_to_tracing(logging.level))));

	// stdout carries command output
	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().pretty().with_writer(std::io::stderr))
				.init();
		}
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	let config = load_config_with_cli(CliOverrides::from(&args)).context("failed to load configuration")?;
	init_tracing(&config.logging);
	debug!(base_url = %config.base_url, token_path = %config.token_path.display(), "starting");

	let client = CmsClient::from_config(&config).context("failed to build CMS client")?;

	match args.command {
		Command::Login { email, password } => auth::login(&client, &email, password).await,
		Command::Register {
			email,
			name,
			password,
		} => auth::register(&client, email, name, password).await,
		Command::Logout => auth::logout(&client).await,
		Command::Whoami => auth::whoami(&client).await,
		Command::Can { permissions, all } => {
			let granted = auth::can(&client, &permissions, all).await?;
			if !granted {
				std::process::exit(1);
			}
			Ok(())
		}
		Command::Post { command } => post::run(&client, &config, command).await,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_can_with_multiple_permissions() {
		let args = Args::try_parse_from(["vellum", "can", "post.create", "event.*", "--all"]).unwrap();
		match args.command {
			Command::Can { permissions, all } => {
				assert_eq!(permissions, vec!["post.create", "event.*"]);
				assert!(all);
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn can_requires_a_permission() {
		assert!(Args::try_parse_from(["vellum", "can"]).is_err());
	}

	#[test]
	fn overrides_carry_global_flags() {
		let args = Args::try_parse_from([
			"vellum",
			"--base-url",
			"https://cms.example.org",
			"--json-logs",
			"-l",
			"debug",
			"whoami",
		])
		.unwrap();
		let overrides = CliOverrides::from(&args);
		assert_eq!(overrides.base_url.as_deref(), Some("https://cms.example.org"));
		assert_eq!(overrides.log_format.as_deref(), Some("json"));
		assert_eq!(overrides.log_level.as_deref(), Some("debug"));
	}

	#[test]
	fn parses_post_get_with_locale() {
		let args = Args::try_parse_from(["vellum", "post", "get", "p1", "--locale", "en"]).unwrap();
		assert!(matches!(args.command, Command::Post { .. }));
	}
}
