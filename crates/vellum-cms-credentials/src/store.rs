// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Token storage backends.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::CredentialError;
use crate::token::AuthToken;

/// On-disk token representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedToken {
	pub token: String,
	pub saved_at: DateTime<Utc>,
}

type PersistedTokenFile = HashMap<String, PersistedToken>;

/// Trait for token storage backends.
#[async_trait]
pub trait TokenStore: Send + Sync + std::fmt::Debug {
	/// Load the token stored under `key`.
	async fn load(&self, key: &str) -> Result<Option<AuthToken>, CredentialError>;

	/// Store `token` under `key`, replacing any previous value.
	async fn save(&self, key: &str, token: &AuthToken) -> Result<(), CredentialError>;

	/// Remove the token under `key`. Removing a missing key is not an error.
	async fn delete(&self, key: &str) -> Result<(), CredentialError>;

	async fn exists(&self, key: &str) -> Result<bool, CredentialError> {
		Ok(self.load(key).await?.is_some())
	}
}

/// File-based token store with JSON format.
///
/// The file is written atomically (temp file + rename) with 0600 permissions
/// on Unix.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
	path: PathBuf,
}

impl FileTokenStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// When the token under `key` was written, if any.
	pub async fn saved_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, CredentialError> {
		let file = self.read_file().await?;
		Ok(file.get(key).map(|p| p.saved_at))
	}

	async fn read_file(&self) -> Result<PersistedTokenFile, CredentialError> {
		if !fs::try_exists(&self.path).await? {
			return Ok(HashMap::new());
		}

		let contents = fs::read_to_string(&self.path).await?;
		if contents.trim().is_empty() {
			return Ok(HashMap::new());
		}
		Ok(serde_json::from_str(&contents)?)
	}

	async fn write_file(&self, file: &PersistedTokenFile) -> Result<(), CredentialError> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent).await?;
		}

		let contents = serde_json::to_string_pretty(file)?;

		let temp_path = self.path.with_extension("tmp");
		let mut handle = fs::File::create(&temp_path).await?;
		handle.write_all(contents.as_bytes()).await?;
		handle.sync_all().await?;
		drop(handle);

		#[cfg(unix)]
		{
			use std::os::unix::fs::PermissionsExt;
			let perms = std::fs::Permissions::from_mode(0o600);
			if let Err(e) = fs::set_permissions(&temp_path, perms).await {
				warn!(path = ?temp_path, error = %e, "failed to set token file permissions to 0600");
			}
		}

		fs::rename(&temp_path, &self.path).await?;

		debug!(path = ?self.path, "token store written");
		Ok(())
	}
}

#[async_trait]
impl TokenStore for FileTokenStore {
	async fn load(&self, key: &str) -> Result<Option<AuthToken>, CredentialError> {
		let file = self.read_file().await?;
		Ok(file.get(key).map(|p| AuthToken::new(p.token.clone())))
	}

	async fn save(&self, key: &str, token: &AuthToken) -> Result<(), CredentialError> {
		let mut file = self.read_file().await?;
		file.insert(
			key.to_string(),
			PersistedToken {
				token: token.expose().to_string(),
				saved_at: Utc::now(),
			},
		);
		self.write_file(&file).await
	}

	async fn delete(&self, key: &str) -> Result<(), CredentialError> {
		let mut file = self.read_file().await?;
		if file.remove(key).is_none() {
			return Ok(());
		}
		self.write_file(&file).await
	}
}

/// In-memory token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
	tokens: tokio::sync::RwLock<HashMap<String, AuthToken>>,
}

impl MemoryTokenStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// A store pre-seeded with one token, as if a previous run had logged in.
	pub fn with_token(key: &str, token: AuthToken) -> Self {
		let mut tokens = HashMap::new();
		tokens.insert(key.to_string(), token);
		Self {
			tokens: tokio::sync::RwLock::new(tokens),
		}
	}
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
	async fn load(&self, key: &str) -> Result<Option<AuthToken>, CredentialError> {
		Ok(self.tokens.read().await.get(key).cloned())
	}

	async fn save(&self, key: &str, token: &AuthToken) -> Result<(), CredentialError> {
		self
			.tokens
			.write()
			.await
			.insert(key.to_string(), token.clone());
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), CredentialError> {
		self.tokens.write().await.remove(key);
		Ok(())
	}
}
