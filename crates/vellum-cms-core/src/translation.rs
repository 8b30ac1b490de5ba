// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation resolution and display projection.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ids::{PostId, TranslationId};
use crate::meta::Meta;
use crate::post::{Post, PostStatus, Translation};

/// Pick the best translation of `post` for `locale`.
///
/// Resolution order (highest to lowest priority):
/// 1. Translation whose locale equals `locale`
/// 2. Translation in the post's primary locale (not guaranteed to exist)
/// 3. The first translation in stored order
///
/// Returns `None` only when the post has no translations at all.
pub fn get_translation<'a>(post: &'a Post, locale: &str) -> Option<&'a Translation> {
	let translations = &post.translations;
	if translations.is_empty() {
		return None;
	}

	translations
		.iter()
		.find(|t| t.locale == locale)
		.or_else(|| {
			translations
				.iter()
				.find(|t| t.locale == post.primary_locale)
		})
		.or_else(|| translations.first())
}

/// Like [`get_translation`], but never empty-handed.
///
/// A post without translations gets a placeholder with id
/// `fallback-<postId>`, the slug as title and the requested `locale` stored
/// verbatim.
pub fn get_translation_safe<'a>(post: &'a Post, locale: &str) -> Cow<'a, Translation> {
	match get_translation(post, locale) {
		Some(t) => Cow::Borrowed(t),
		None => Cow::Owned(Translation {
			id: TranslationId::new(format!("fallback-{}", post.id)),
			post_id: post.id.clone(),
			locale: locale.to_string(),
			title: post.slug.clone(),
			subtitle: None,
			excerpt: None,
			content: None,
			seo_title: None,
			seo_description: None,
			created_at: None,
			updated_at: None,
		}),
	}
}

/// Display-ready projection of a post in one locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
	pub id: PostId,
	pub slug: String,
	pub status: PostStatus,
	pub published_at: Option<DateTime<Utc>>,
	/// Locale of the translation actually used, which may differ from the one
	/// requested.
	pub locale: String,
	pub is_fallback: bool,
	pub title: String,
	pub subtitle: Option<String>,
	pub excerpt: Option<String>,
	pub content: Option<String>,
	pub seo_title: String,
	pub seo_description: Option<String>,
	pub meta: Vec<Meta>,
}

impl PostView {
	pub fn project(post: &Post, locale: &str) -> Self {
		let translation = get_translation_safe(post, locale);
		let is_fallback = matches!(translation, Cow::Owned(_));
		let translation = translation.into_owned();

		let seo_title = translation
			.seo_title
			.clone()
			.unwrap_or_else(|| translation.title.clone());
		let seo_description = translation
			.seo_description
			.clone()
			.or_else(|| translation.excerpt.clone());

		Self {
			id: post.id.clone(),
			slug: post.slug.clone(),
			status: post.status,
			published_at: post.published_at,
			locale: translation.locale,
			is_fallback,
			title: translation.title,
			subtitle: translation.subtitle,
			excerpt: translation.excerpt,
			content: translation.content,
			seo_title,
			seo_description,
			meta: post.meta.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use proptest::prelude::*;

	fn translation(post_id: &str, locale: &str, title: &str) -> Translation {
		Translation {
			id: TranslationId::new(format!("t-{locale}")),
			post_id: PostId::new(post_id),
			locale: locale.to_string(),
			title: title.to_string(),
			subtitle: None,
			excerpt: None,
			content: None,
			seo_title: None,
			seo_description: None,
			created_at: None,
			updated_at: None,
		}
	}

	fn post(primary: &str, translations: Vec<Translation>) -> Post {
		let ts = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
		Post {
			id: PostId::new("p1"),
			slug: "spring-concert".to_string(),
			primary_locale: primary.to_string(),
			status: PostStatus::Published,
			published_at: Some(ts),
			created_at: ts,
			updated_at: ts,
			translations,
			meta: Vec::new(),
		}
	}

	#[test]
	fn no_translations_yields_none() {
		assert!(get_translation(&post("ko", vec![]), "en").is_none());
	}

	#[test]
	fn exact_locale_wins() {
		let p = post(
			"ko",
			vec![translation("p1", "ko", "봄 음악회"), translation("p1", "en", "Spring Concert")],
		);
		assert_eq!(get_translation(&p, "en").unwrap().title, "Spring Concert");
	}

	#[test]
	fn falls_back_to_primary_locale() {
		let p = post(
			"ko",
			vec![translation("p1", "en", "Spring Concert"), translation("p1", "ko", "봄 음악회")],
		);
		assert_eq!(get_translation(&p, "zh").unwrap().locale, "ko");
	}

	#[test]
	fn falls_back_to_first_when_primary_missing() {
		let p = post(
			"ko",
			vec![translation("p1", "ja", "春のコンサート"), translation("p1", "en", "Spring Concert")],
		);
		assert_eq!(get_translation(&p, "zh").unwrap().locale, "ja");
	}

	#[test]
	fn safe_variant_synthesizes_placeholder() {
		let p = post("ko", vec![]);
		let t = get_translation_safe(&p, "en");

		assert!(matches!(t, Cow::Owned(_)));
		assert_eq!(t.id.as_str(), "fallback-p1");
		assert_eq!(t.post_id.as_str(), "p1");
		assert_eq!(t.title, "spring-concert");
		assert_eq!(t.locale, "en");
		assert!(t.subtitle.is_none());
		assert!(t.content.is_none());
		assert!(t.created_at.is_none());
	}

	#[test]
	fn safe_variant_keeps_unknown_locale_verbatim() {
		let p = post("ko", vec![]);
		let t = get_translation_safe(&p, "xx-not-a-locale");
		assert_eq!(t.locale, "xx-not-a-locale");
	}

	#[test]
	fn safe_variant_borrows_existing_translation() {
		let p = post("ko", vec![translation("p1", "ko", "봄 음악회")]);
		assert!(matches!(get_translation_safe(&p, "en"), Cow::Borrowed(_)));
	}

	#[test]
	fn view_uses_resolved_locale_and_seo_fallbacks() {
		let mut ko = translation("p1", "ko", "봄 음악회");
		ko.excerpt = Some("정기 공연".to_string());
		let p = post("ko", vec![ko]);

		let view = PostView::project(&p, "en");
		assert_eq!(view.locale, "ko");
		assert!(!view.is_fallback);
		assert_eq!(view.seo_title, "봄 음악회");
		assert_eq!(view.seo_description.as_deref(), Some("정기 공연"));
	}

	#[test]
	fn view_of_untranslated_post_is_marked_fallback() {
		let view = PostView::project(&post("ko", vec![]), "en");
		assert!(view.is_fallback);
		assert_eq!(view.title, "spring-concert");
		assert_eq!(view.locale, "en");
	}

	mod property_tests {
		use super::*;

		fn arb_locale() -> impl Strategy<Value = String> {
			prop_oneof![
				Just("ko".to_string()),
				Just("en".to_string()),
				Just("ja".to_string()),
				Just("zh".to_string()),
			]
		}

		proptest! {
			#[test]
			fn resolution_is_some_iff_translations_exist(
				locales in prop::collection::vec(arb_locale(), 0..4),
				primary in arb_locale(),
				requested in arb_locale(),
			) {
				let translations = locales
					.iter()
					.map(|l| translation("p1", l, l))
					.collect::<Vec<_>>();
				let p = post(&primary, translations);
				prop_assert_eq!(get_translation(&p, &requested).is_some(), !locales.is_empty());
			}

			#[test]
			fn exact_match_is_always_preferred(
				locales in prop::collection::vec(arb_locale(), 1..4),
				primary in arb_locale(),
			) {
				let translations = locales
					.iter()
					.map(|l| translation("p1", l, l))
					.collect::<Vec<_>>();
				let p = post(&primary, translations);
				for locale in &locales {
					prop_assert_eq!(&get_translation(&p, locale).unwrap().locale, locale);
				}
			}
		}
	}
}
