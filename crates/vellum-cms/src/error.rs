// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the CMS SDK.

use std::fmt;

use thiserror::Error;
use vellum_cms_core::PostId;
use vellum_cms_credentials::CredentialError;

/// Result type for CMS SDK operations.
pub type Result<T> = std::result::Result<T, CmsError>;

/// Errors that can occur when using the CMS SDK.
#[derive(Debug, Error)]
pub enum CmsError {
	/// The request never produced a response (DNS, connect, TLS, timeout).
	#[error("HTTP request failed: {0}")]
	Network(#[from] reqwest::Error),

	/// Server answered with a non-2xx status.
	#[error("server error (HTTP {status}): {message}")]
	Status { status: u16, message: String },

	/// The operation needs an authenticated session and there is none.
	#[error("not authenticated")]
	Unauthorized,

	/// Response body did not match the expected shape.
	#[error("failed to decode response: {0}")]
	Decode(#[from] serde_json::Error),

	/// Invalid or missing base URL.
	#[error("invalid base URL: {0}")]
	InvalidBaseUrl(String),

	/// Token persistence failed.
	#[error("credential store error: {0}")]
	Credentials(#[from] CredentialError),

	/// A step of a multi-request create or update failed.
	///
	/// Steps before `stage` have been committed on the server and stay
	/// committed. `post_id` is `None` only when creating the base record
	/// itself failed.
	#[error("{stage} failed{}: {source}", for_post(.post_id))]
	Publish {
		stage: PublishStage,
		post_id: Option<PostId>,
		#[source]
		source: Box<CmsError>,
	},
}

impl CmsError {
	/// HTTP status code if the server responded, looking through
	/// [`CmsError::Publish`].
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			Self::Publish { source, .. } => source.status(),
			_ => None,
		}
	}

	/// True for a missing session or a `401` from the server, looking
	/// through [`CmsError::Publish`].
	pub fn is_unauthorized(&self) -> bool {
		match self {
			Self::Unauthorized => true,
			Self::Status { status, .. } => *status == 401,
			Self::Publish { source, .. } => source.is_unauthorized(),
			_ => false,
		}
	}

	pub(crate) fn publish(stage: PublishStage, post_id: Option<&PostId>, source: CmsError) -> Self {
		Self::Publish {
			stage,
			post_id: post_id.cloned(),
			source: Box::new(source),
		}
	}
}

fn for_post(post_id: &Option<PostId>) -> String {
	match post_id {
		Some(id) => format!(" for post {id}"),
		None => String::new(),
	}
}

/// The step of a create or update that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStage {
	/// `POST /api/posts`
	CreateBase,
	/// `PATCH /api/posts/:id`
	UpdateBase,
	/// `POST /api/posts/:id/translations`
	Translation { locale: String },
	/// `POST /api/posts/:id/meta`, zero-based position in the input list.
	Meta { index: usize, key: String },
	/// `GET /api/posts/:id` after an update.
	Refetch,
}

impl fmt::Display for PublishStage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CreateBase => write!(f, "creating base record"),
			Self::UpdateBase => write!(f, "updating base record"),
			Self::Translation { locale } => write!(f, "upserting {locale} translation"),
			Self::Meta { index, key } => write!(f, "upserting meta #{index} ({key})"),
			Self::Refetch => write!(f, "re-fetching post"),
		}
	}
}
