// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identifier newtypes.
//!
//! The server generates every id and hands them out as opaque strings, so the
//! newtypes wrap `String` rather than a UUID. They exist to keep a post id from
//! being passed where a translation id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);

		impl $name {
			/// Wrap a server-issued id.
			pub fn new(id: impl Into<String>) -> Self {
				Self(id.into())
			}

			/// Borrow the id as a string slice.
			pub fn as_str(&self) -> &str {
				&self.0
			}

			/// Consume the wrapper.
			pub fn into_inner(self) -> String {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl FromStr for $name {
			type Err = CoreError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				let trimmed = s.trim();
				if trimmed.is_empty() || trimmed.contains('/') {
					return Err(CoreError::InvalidId(s.to_string()));
				}
				Ok(Self(trimmed.to_string()))
			}
		}

		impl From<&str> for $name {
			fn from(id: &str) -> Self {
				Self(id.to_string())
			}
		}
	};
}

define_id_type!(PostId, "Unique identifier for a post.");
define_id_type!(TranslationId, "Unique identifier for a post translation.");
define_id_type!(MetaId, "Unique identifier for a metadata record.");
define_id_type!(UserId, "Unique identifier for a user.");
