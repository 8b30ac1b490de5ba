// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `vellum post ...`
//!
//! Create and update read a JSON document:
//!
//! ```json
//! {
//!   "post": { "slug": "spring-concert", "primaryLocale": "ko" },
//!   "translation": { "locale": "ko", "title": "봄 음악회" },
//!   "meta": [{ "key": "venue", "valueText": "Main Hall" }]
//! }
//! ```
//!
//! Updates use `"patch"` instead of `"post"`; it may be omitted.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Deserialize;
use tracing::instrument;

use vellum_cms::{CmsClient, MetaInput, NewPost, Post, PostId, PostPatch, PostView, TranslationInput};
use vellum_cms_config::CmsConfig;

use crate::locale::display_locale;

#[derive(Subcommand, Debug)]
pub enum PostCommand {
	/// Fetch a post and show it in one locale
	Get {
		id: PostId,
		/// Locale to display; defaults to the system locale if supported,
		/// else the configured default
		#[arg(long)]
		locale: Option<String>,
		/// Print the display projection as JSON
		#[arg(long)]
		json: bool,
	},
	/// Create a post with its translation and metadata
	Create {
		#[arg(long)]
		file: PathBuf,
	},
	/// Update a post, upsert its translation and metadata
	Update {
		id: PostId,
		#[arg(long)]
		file: PathBuf,
	},
}

#[derive(Debug, Deserialize)]
struct CreateDocument {
	post: NewPost,
	translation: TranslationInput,
	#[serde(default)]
	meta: Vec<MetaInput>,
}

#[derive(Debug, Deserialize)]
struct UpdateDocument {
	#[serde(default)]
	patch: PostPatch,
	translation: TranslationInput,
	#[serde(default)]
	meta: Vec<MetaInput>,
}

fn read_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
	let content = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read {}", path.display()))?;
	serde_json::from_str(&content).with_context(|| format!("invalid document {}", path.display()))
}

pub async fn run(client: &CmsClient, config: &CmsConfig, command: PostCommand) -> Result<()> {
	match command {
		PostCommand::Get { id, locale, json } => {
			let locale = locale.unwrap_or_else(|| display_locale(&config.default_locale).to_string());
			get(client, &id, &locale, json).await
		}
		PostCommand::Create { file } => create(client, &file).await,
		PostCommand::Update { id, file } => update(client, &id, &file).await,
	}
}

#[instrument(skip_all, fields(post_id = %id, locale = %locale))]
async fn get(client: &CmsClient, id: &PostId, locale: &str, json: bool) -> Result<()> {
	client.sessions().restore().await.context("failed to restore session")?;
	let post = client
		.posts()
		.get_post(id)
		.await
		.with_context(|| format!("failed to fetch post {id}"))?;
	let view = PostView::project(&post, locale);

	if json {
		println!("{}", serde_json::to_string_pretty(&view)?);
	} else {
		print_view(&view);
	}
	Ok(())
}

#[instrument(skip_all, fields(file = %file.display()))]
async fn create(client: &CmsClient, file: &Path) -> Result<()> {
	let doc: CreateDocument = read_document(file)?;
	client.sessions().restore().await.context("failed to restore session")?;

	let post = client
		.posts()
		.create_post(&doc.post, &doc.translation, &doc.meta)
		.await
		.context("failed to create post")?;

	print_summary("Created", &post);
	Ok(())
}

#[instrument(skip_all, fields(post_id = %id, file = %file.display()))]
async fn update(client: &CmsClient, id: &PostId, file: &Path) -> Result<()> {
	let doc: UpdateDocument = read_document(file)?;
	client.sessions().restore().await.context("failed to restore session")?;

	let post = client
		.posts()
		.update_post(id, &doc.patch, &doc.translation, &doc.meta)
		.await
		.with_context(|| format!("failed to update post {id}"))?;

	print_summary("Updated", &post);
	Ok(())
}

fn print_summary(action: &str, post: &Post) {
	println!("{action} post {} ({}, {})", post.id, post.slug, post.status);
}

fn print_view(view: &PostView) {
	println!("{}", view.title);
	if let Some(subtitle) = &view.subtitle {
		println!("{subtitle}");
	}
	println!();
	println!("id:       {}", view.id);
	println!("slug:     {}", view.slug);
	println!("status:   {}", view.status);
	if view.is_fallback {
		println!("locale:   {} (no translations)", view.locale);
	} else {
		println!("locale:   {}", view.locale);
	}
	if let Some(published_at) = view.published_at {
		println!("published {}", published_at.to_rfc3339());
	}
	for meta in &view.meta {
		match serde_json::to_string(&meta.value) {
			Ok(value) => println!("meta      {} = {value}", meta.key),
			Err(_) => println!("meta      {}", meta.key),
		}
	}
	if let Some(content) = &view.content {
		println!();
		println!("{content}");
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use vellum_cms::{MetaValue, PostStatus};

	fn write_temp(content: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(content.as_bytes()).unwrap();
		file
	}

	#[test]
	fn create_document_parses_wire_shaped_meta() {
		let file = write_temp(
			r#"{
				"post": { "slug": "spring-concert", "primaryLocale": "ko" },
				"translation": { "locale": "ko", "title": "봄 음악회" },
				"meta": [
					{ "key": "venue", "valueText": "Main Hall" },
					{ "key": "capacity", "valueNumber": 300 }
				]
			}"#,
		);

		let doc: CreateDocument = read_document(file.path()).unwrap();
		assert_eq!(doc.post.status, PostStatus::Draft);
		assert_eq!(doc.translation.title, "봄 음악회");
		assert_eq!(doc.meta[0].value, MetaValue::Text("Main Hall".to_string()));
		assert_eq!(doc.meta[1].value, MetaValue::Number(300.0));
	}

	#[test]
	fn update_document_patch_is_optional() {
		let file = write_temp(r#"{ "translation": { "locale": "en", "title": "Spring Concert" } }"#);

		let doc: UpdateDocument = read_document(file.path()).unwrap();
		assert!(doc.patch.is_empty());
		assert!(doc.meta.is_empty());
	}

	#[test]
	fn meta_without_value_is_rejected() {
		let file = write_temp(
			r#"{ "translation": { "locale": "en", "title": "t" }, "meta": [{ "key": "empty" }] }"#,
		);
		assert!(read_document::<UpdateDocument>(file.path()).is_err());
	}

	#[test]
	fn missing_file_names_path() {
		let err = read_document::<UpdateDocument>(Path::new("/nonexistent/post.json")).unwrap_err();
		assert!(err.to_string().contains("/nonexistent/post.json"));
	}
}
