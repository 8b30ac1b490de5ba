// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// An authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub id: UserId,
	pub email: String,
	#[serde(default)]
	pub name: Option<String>,
	/// Role names as assigned by the backend (e.g. `admin`, `editor`).
	/// Permissions are derived server-side and delivered separately.
	#[serde(default)]
	pub roles: Vec<String>,
}

impl User {
	pub fn display_name(&self) -> &str {
		self.name.as_deref().unwrap_or(&self.email)
	}

	pub fn has_role(&self, role: &str) -> bool {
		self.roles.iter().any(|r| r == role)
	}
}
