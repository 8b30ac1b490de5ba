// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the core crate.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while parsing core values.
#[derive(Debug, Error)]
pub enum CoreError {
	#[error("invalid id: {0}")]
	InvalidId(String),

	#[error("unknown post status: {0}")]
	UnknownStatus(String),
}
