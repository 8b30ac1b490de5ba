// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Vellum content-management SDK.
//!
//! This crate is pure: no I/O, no async. It provides:
//!
//! - **Domain types**: [`Post`], [`Translation`], [`Meta`], [`User`] and the
//!   payloads sent when writing them
//! - **Permissions**: [`PermissionSet`] with exact, wildcard-suffix and global
//!   wildcard matching
//! - **Meta accessors**: [`get_meta_value`] and its typed variants
//! - **Translation resolution**: [`get_translation`], [`get_translation_safe`]
//!   and the display projection [`PostView`]
//!
//! # Example
//!
//! ```
//! use vellum_cms_core::PermissionSet;
//!
//! let perms = PermissionSet::from_iter(["event.*", "post.read"]);
//! assert!(perms.has_permission("event.create"));
//! assert!(!perms.has_permission("post.delete"));
//! ```

mod error;
mod ids;
mod locale;
mod meta;
mod permission;
mod post;
mod translation;
mod user;

pub use error::{CoreError, Result};
pub use ids::{MetaId, PostId, TranslationId, UserId};
pub use locale::{resolve_locale, DEFAULT_LOCALE, SUPPORTED_LOCALES};
pub use meta::{
	get_meta_array, get_meta_boolean, get_meta_number, get_meta_object, get_meta_text,
	get_meta_timestamp, get_meta_value, Meta, MetaInput, MetaValue,
};
pub use permission::{PermissionSet, GLOBAL_WILDCARD};
pub use post::{NewPost, Post, PostPatch, PostStatus, Translation, TranslationInput};
pub use translation::{get_translation, get_translation_safe, PostView};
pub use user::User;
