// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bearer-token persistence for Vellum.
//!
//! The SDK keeps exactly one token per client under a fixed storage key,
//! [`TOKEN_STORAGE_KEY`]. It is read at startup, written on login or
//! registration and removed on logout or when the server rejects it.
//!
//! # Features
//!
//! - **AuthToken**: redacted in `Debug`/`Display`, zeroized on drop
//! - **TokenStore trait**: abstract interface for token backends
//! - **FileTokenStore**: JSON file with 0600 permissions on Unix
//! - **MemoryTokenStore**: in-memory storage for tests and short-lived tools
//!
//! # Example
//!
//! ```rust,no_run
//! use vellum_cms_credentials::{AuthToken, FileTokenStore, TokenStore, TOKEN_STORAGE_KEY};
//!
//! # tokio_test::block_on(async {
//! let store = FileTokenStore::new("/tmp/vellum/credentials.json");
//! store.save(TOKEN_STORAGE_KEY, &AuthToken::new("eyJhbGciOi...")).await.unwrap();
//! let loaded = store.load(TOKEN_STORAGE_KEY).await.unwrap();
//! assert!(loaded.is_some());
//! # });
//! ```

mod error;
mod store;
mod token;

pub use error::CredentialError;
pub use store::{FileTokenStore, MemoryTokenStore, PersistedToken, TokenStore};
pub use token::{AuthToken, REDACTED};

/// The key under which the session token is persisted.
pub const TOKEN_STORAGE_KEY: &str = "auth_token";
