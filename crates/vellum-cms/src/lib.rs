// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client SDK for the Vellum multilingual CMS.
//!
//! # Quick Start
//!
//! ```ignore
//! use vellum_cms::{CmsClient, MetaInput, NewPost, TranslationInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = vellum_cms_config::load_config()?;
//!     let client = CmsClient::from_config(&config)?;
//!
//!     // Picks up the token saved by a previous login, if any
//!     client.sessions().restore().await?;
//!     if !client.sessions().has_permission("post.create") {
//!         return Ok(());
//!     }
//!
//!     let post = client
//!         .posts()
//!         .create_post(
//!             &NewPost::new("spring-concert", "ko"),
//!             &TranslationInput::new("ko", "봄 음악회"),
//!             &[MetaInput::text("venue", "Main Hall")],
//!         )
//!         .await?;
//!
//!     println!("created {}", post.id);
//!     Ok(())
//! }
//! ```
//!
//! # Partial writes
//!
//! Creates and updates are several requests. If one fails after the first has
//! landed, [`CmsError::Publish`] reports the failed [`PublishStage`] and the
//! post id; nothing is rolled back.

mod api;
mod client;
mod error;
mod posts;
mod session;
#[cfg(test)]
mod testing;
mod transport;

pub use api::ApiClient;
pub use client::{CmsClient, CmsClientBuilder};
pub use error::{CmsError, PublishStage, Result};
pub use posts::PostPublisher;
pub use session::{LoginRequest, RegisterRequest, Session, SessionManager};
pub use transport::{HttpTransport, Transport};

// Re-export the pieces callers need alongside the client
pub use reqwest::Method;
pub use vellum_cms_core::{
	get_meta_array, get_meta_boolean, get_meta_number, get_meta_object, get_meta_text,
	get_meta_timestamp, get_meta_value, get_translation, get_translation_safe, resolve_locale,
	Meta, MetaInput, MetaValue, NewPost, PermissionSet, Post, PostId, PostPatch, PostStatus,
	PostView, Translation, TranslationInput, User,
};
pub use vellum_cms_credentials::{
	AuthToken, FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_STORAGE_KEY,
};
