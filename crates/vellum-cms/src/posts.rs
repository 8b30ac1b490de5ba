// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Multi-request post writes.
//!
//! A logical create or update is a base-record call, one translation upsert
//! and one upsert per metadata item, issued strictly one after another. There
//! is no transaction around them: when a later step fails, earlier steps stay
//! committed and the returned [`CmsError::Publish`] names the failed step and
//! the post it left behind.

use serde::de::IgnoredAny;
use tracing::{debug, info, instrument, warn};
use vellum_cms_core::{MetaInput, NewPost, Post, PostId, PostPatch, TranslationInput};

use crate::api::ApiClient;
use crate::error::{CmsError, PublishStage, Result};

#[derive(Debug, Clone)]
pub struct PostPublisher {
	api: ApiClient,
}

impl PostPublisher {
	pub fn new(api: ApiClient) -> Self {
		Self { api }
	}

	/// Create the base record, then its translation, then each meta item.
	///
	/// Returns the base record exactly as the create call returned it; the
	/// translation and meta written afterwards are not reflected.
	#[instrument(skip_all, fields(slug = %post.slug, meta_count = meta.len()))]
	pub async fn create_post(
		&self,
		post: &NewPost,
		translation: &TranslationInput,
		meta: &[MetaInput],
	) -> Result<Post> {
		let created: Post = self
			.api
			.post("/api/posts", post)
			.await
			.map_err(|e| CmsError::publish(PublishStage::CreateBase, None, e))?;
		debug!(post_id = %created.id, "base record created");

		self.write_children(&created.id, translation, meta).await?;

		info!(post_id = %created.id, "post created");
		Ok(created)
	}

	/// Patch the base record if anything changed, upsert the translation and
	/// each meta item, then re-fetch the post.
	#[instrument(skip_all, fields(post_id = %id, meta_count = meta.len()))]
	pub async fn update_post(
		&self,
		id: &PostId,
		patch: &PostPatch,
		translation: &TranslationInput,
		meta: &[MetaInput],
	) -> Result<Post> {
		if patch.is_empty() {
			debug!("empty patch, skipping base update");
		} else {
			let _: IgnoredAny = self
				.api
				.patch(&post_path(id), patch)
				.await
				.map_err(|e| CmsError::publish(PublishStage::UpdateBase, Some(id), e))?;
			debug!("base record updated");
		}

		self.write_children(id, translation, meta).await?;

		let post = self
			.get_post(id)
			.await
			.map_err(|e| committed_failure(PublishStage::Refetch, id, e))?;

		info!(translations = post.translations.len(), "post updated");
		Ok(post)
	}

	/// `GET /api/posts/:id`, with translations and meta.
	#[instrument(skip_all, fields(post_id = %id))]
	pub async fn get_post(&self, id: &PostId) -> Result<Post> {
		self.api.get(&post_path(id)).await
	}

	async fn write_children(
		&self,
		id: &PostId,
		translation: &TranslationInput,
		meta: &[MetaInput],
	) -> Result<()> {
		let _: IgnoredAny = self
			.api
			.post(&format!("{}/translations", post_path(id)), translation)
			.await
			.map_err(|e| {
				committed_failure(
					PublishStage::Translation {
						locale: translation.locale.clone(),
					},
					id,
					e,
				)
			})?;
		debug!(locale = %translation.locale, "translation upserted");

		let meta_path = format!("{}/meta", post_path(id));
		for (index, item) in meta.iter().enumerate() {
			let _: IgnoredAny = self.api.post(&meta_path, item).await.map_err(|e| {
				committed_failure(
					PublishStage::Meta {
						index,
						key: item.key.clone(),
					},
					id,
					e,
				)
			})?;
			debug!(index, key = %item.key, "meta upserted");
		}

		Ok(())
	}
}

fn post_path(id: &PostId) -> String {
	format!("/api/posts/{id}")
}

/// A step failed after at least one earlier write landed on the server.
fn committed_failure(stage: PublishStage, id: &PostId, source: CmsError) -> CmsError {
	warn!(post_id = %id, stage = %stage, error = %source, "publish step failed, earlier writes remain");
	CmsError::publish(stage, Some(id), source)
}
