// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The bearer token type.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// The redaction placeholder used in all output.
pub const REDACTED: &str = "[REDACTED]";

/// A session bearer token.
///
/// `Debug` and `Display` never show the value, so the token is safe to pass
/// through `tracing` fields. The backing memory is zeroed on drop. Call
/// [`AuthToken::expose`] at the one place the raw value is needed: the
/// `Authorization` header.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AuthToken(String);

impl AuthToken {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Value for an `Authorization` header.
	pub fn bearer_header(&self) -> String {
		format!("Bearer {}", self.0)
	}
}

impl fmt::Debug for AuthToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("AuthToken").field(&REDACTED).finish()
	}
}

impl fmt::Display for AuthToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug_is_redacted() {
		let token = AuthToken::new("eyJ-super-secret");
		let debug = format!("{token:?}");
		assert!(!debug.contains("eyJ-super-secret"));
		assert!(debug.contains(REDACTED));
	}

	#[test]
	fn display_is_redacted() {
		let token = AuthToken::new("eyJ-super-secret");
		assert_eq!(format!("{token}"), REDACTED);
	}

	#[test]
	fn option_token_debug_is_redacted() {
		let token = Some(AuthToken::new("eyJ-super-secret"));
		assert!(!format!("{token:?}").contains("eyJ-super-secret"));
	}

	#[test]
	fn bearer_header_exposes_value() {
		let token = AuthToken::new("abc");
		assert_eq!(token.expose(), "abc");
		assert_eq!(token.bearer_header(), "Bearer abc");
	}
}
