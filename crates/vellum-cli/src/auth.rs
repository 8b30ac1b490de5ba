// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use tracing::{info, instrument};

use vellum_cms::{CmsClient, RegisterRequest, Session};

fn read_password(password: Option<String>) -> Result<String> {
	if let Some(password) = password {
		return Ok(password);
	}

	eprint!("Password: ");
	io::stderr().flush()?;
	let mut line = String::new();
	io::stdin()
		.lock()
		.read_line(&mut line)
		.context("failed to read password from stdin")?;

	let password = line.trim_end_matches(['\r', '\n']).to_string();
	if password.is_empty() {
		bail!("password must not be empty");
	}
	Ok(password)
}

fn print_session(session: &Session) {
	match &session.user {
		Some(user) => {
			println!("Signed in as {} <{}>", user.display_name(), user.email);
			if !user.roles.is_empty() {
				println!("Roles: {}", user.roles.join(", "));
			}
			let mut permissions: Vec<&str> = session.permissions.iter().collect();
			permissions.sort_unstable();
			if permissions.is_empty() {
				println!("Permissions: (none)");
			} else {
				println!("Permissions: {}", permissions.join(", "));
			}
		}
		None => println!("Not signed in"),
	}
}

#[instrument(skip_all, fields(email = %email))]
pub async fn login(client: &CmsClient, email: &str, password: Option<String>) -> Result<()> {
	let password = read_password(password)?;
	let session = client
		.sessions()
		.login(email, &password)
		.await
		.context("login failed")?;
	info!("login complete");
	print_session(&session);
	Ok(())
}

#[instrument(skip_all, fields(email = %email))]
pub async fn register(
	client: &CmsClient,
	email: String,
	name: Option<String>,
	password: Option<String>,
) -> Result<()> {
	let password = read_password(password)?;
	let session = client
		.sessions()
		.register(RegisterRequest {
			email,
			password,
			name,
		})
		.await
		.context("registration failed")?;
	print_session(&session);
	Ok(())
}

pub async fn logout(client: &CmsClient) -> Result<()> {
	client
		.sessions()
		.logout()
		.await
		.context("failed to remove stored token")?;
	println!("Logged out");
	Ok(())
}

pub async fn whoami(client: &CmsClient) -> Result<()> {
	let session = client
		.sessions()
		.restore()
		.await
		.context("failed to restore session")?;
	print_session(&session);
	Ok(())
}

/// Prints one line per permission and returns whether the check passed.
pub async fn can(client: &CmsClient, permissions: &[String], all: bool) -> Result<bool> {
	client
		.sessions()
		.restore()
		.await
		.context("failed to restore session")?;

	let sessions = client.sessions();
	for permission in permissions {
		let verdict = if sessions.has_permission(permission) {
			"granted"
		} else {
			"denied"
		};
		println!("{permission}: {verdict}");
	}

	Ok(if all {
		sessions.has_all_permissions(permissions)
	} else {
		sessions.has_any_permission(permissions)
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn explicit_password_is_used_verbatim() {
		assert_eq!(read_password(Some("  spaced ".to_string())).unwrap(), "  spaced ");
	}
}
