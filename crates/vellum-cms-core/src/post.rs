// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Post and translation records, plus the payloads used to write them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::ids::{PostId, TranslationId};
use crate::meta::Meta;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
	#[default]
	Draft,
	Published,
	Archived,
}

impl fmt::Display for PostStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Draft => write!(f, "draft"),
			Self::Published => write!(f, "published"),
			Self::Archived => write!(f, "archived"),
		}
	}
}

impl FromStr for PostStatus {
	type Err = CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"draft" => Ok(Self::Draft),
			"published" => Ok(Self::Published),
			"archived" => Ok(Self::Archived),
			_ => Err(CoreError::UnknownStatus(s.to_string())),
		}
	}
}

/// A post as returned by the server.
///
/// `translations` and `meta` are only populated by endpoints that include
/// them; the create endpoint returns the bare base record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
	pub id: PostId,
	pub slug: String,
	pub primary_locale: String,
	#[serde(default)]
	pub status: PostStatus,
	#[serde(default)]
	pub published_at: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
	#[serde(default)]
	pub translations: Vec<Translation>,
	#[serde(default)]
	pub meta: Vec<Meta>,
}

/// A locale-specific rendering of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
	pub id: TranslationId,
	pub post_id: PostId,
	/// Locale tag as stored; never validated against a known set.
	pub locale: String,
	pub title: String,
	#[serde(default)]
	pub subtitle: Option<String>,
	#[serde(default)]
	pub excerpt: Option<String>,
	#[serde(default)]
	pub content: Option<String>,
	#[serde(default)]
	pub seo_title: Option<String>,
	#[serde(default)]
	pub seo_description: Option<String>,
	#[serde(default)]
	pub created_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub updated_at: Option<DateTime<Utc>>,
}

/// Base-record payload for `POST /api/posts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
	pub slug: String,
	pub primary_locale: String,
	#[serde(default)]
	pub status: PostStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub published_at: Option<DateTime<Utc>>,
}

impl NewPost {
	pub fn new(slug: impl Into<String>, primary_locale: impl Into<String>) -> Self {
		Self {
			slug: slug.into(),
			primary_locale: primary_locale.into(),
			status: PostStatus::Draft,
			published_at: None,
		}
	}
}

/// Partial update for `PATCH /api/posts/:id`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub slug: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub primary_locale: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<PostStatus>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub published_at: Option<DateTime<Utc>>,
}

impl PostPatch {
	/// True when no field is set and the PATCH call can be skipped.
	pub fn is_empty(&self) -> bool {
		self.slug.is_none()
			&& self.primary_locale.is_none()
			&& self.status.is_none()
			&& self.published_at.is_none()
	}
}

/// Translation payload for `POST /api/posts/:id/translations`.
///
/// The server upserts by `locale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationInput {
	pub locale: String,
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subtitle: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub excerpt: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub seo_title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub seo_description: Option<String>,
}

impl TranslationInput {
	pub fn new(locale: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			locale: locale.into(),
			title: title.into(),
			subtitle: None,
			excerpt: None,
			content: None,
			seo_title: None,
			seo_description: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn post_decodes_without_nested_collections() {
		let post: Post = serde_json::from_value(json!({
			"id": "p1",
			"slug": "spring-concert",
			"primaryLocale": "ko",
			"createdAt": "2025-03-01T09:00:00Z",
			"updatedAt": "2025-03-01T09:00:00Z"
		}))
		.unwrap();

		assert_eq!(post.id.as_str(), "p1");
		assert_eq!(post.status, PostStatus::Draft);
		assert!(post.translations.is_empty());
		assert!(post.meta.is_empty());
	}

	#[test]
	fn post_with_malformed_meta_timestamp_still_decodes() {
		let post: Post = serde_json::from_value(json!({
			"id": "p1",
			"slug": "spring-concert",
			"primaryLocale": "ko",
			"createdAt": "2025-03-01T09:00:00Z",
			"updatedAt": "2025-03-01T09:00:00Z",
			"meta": [
				{ "id": "m1", "postId": "p1", "key": "venue", "valueText": "Main Hall" },
				{ "id": "m2", "postId": "p1", "key": "startsAt", "valueTimestamp": "05/01/2025 10:30" }
			]
		}))
		.unwrap();

		assert_eq!(post.meta.len(), 2);
		assert_eq!(crate::get_meta_text(&post.meta, "venue"), Some("Main Hall"));
		assert_eq!(crate::get_meta_timestamp(&post.meta, "startsAt"), None);
	}

	#[test]
	fn empty_patch_serializes_to_empty_object() {
		let patch = PostPatch::default();
		assert!(patch.is_empty());
		assert_eq!(serde_json::to_value(&patch).unwrap(), json!({}));
	}

	#[test]
	fn patch_with_status_is_not_empty() {
		let patch = PostPatch {
			status: Some(PostStatus::Published),
			..Default::default()
		};
		assert!(!patch.is_empty());
		assert_eq!(
			serde_json::to_value(&patch).unwrap(),
			json!({ "status": "published" })
		);
	}

	#[test]
	fn translation_input_omits_unset_fields() {
		let input = TranslationInput::new("en", "Spring Concert");
		assert_eq!(
			serde_json::to_value(&input).unwrap(),
			json!({ "locale": "en", "title": "Spring Concert" })
		);
	}

	#[test]
	fn status_display_matches_wire_format() {
		for status in [PostStatus::Draft, PostStatus::Published, PostStatus::Archived] {
			let wire = serde_json::to_value(status).unwrap();
			assert_eq!(wire, json!(status.to_string()));
			assert_eq!(status.to_string().parse::<PostStatus>().unwrap(), status);
		}
		assert!("deleted".parse::<PostStatus>().is_err());
	}
}
