// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session state and the permission queries built on it.
//!
//! A [`SessionManager`] is the only writer of the session. Readers either
//! take a snapshot with [`SessionManager::current`] or follow changes through
//! the `watch` receiver from [`SessionManager::subscribe`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use vellum_cms_core::{PermissionSet, User};
use vellum_cms_credentials::{AuthToken, TokenStore, TOKEN_STORAGE_KEY};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::api::ApiClient;
use crate::error::{CmsError, Result};

/// Snapshot of who is signed in and what they may do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
	pub user: Option<User>,
	pub token: Option<AuthToken>,
	pub permissions: PermissionSet,
}

impl Session {
	pub fn is_authenticated(&self) -> bool {
		self.user.is_some()
	}
}

#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginRequest {
	pub email: String,
	pub password: String,
}

impl std::fmt::Debug for LoginRequest {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LoginRequest")
			.field("email", &self.email)
			.field("password", &"[REDACTED]")
			.finish()
	}
}

#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct RegisterRequest {
	pub email: String,
	pub password: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

impl std::fmt::Debug for RegisterRequest {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RegisterRequest")
			.field("email", &self.email)
			.field("password", &"[REDACTED]")
			.field("name", &self.name)
			.finish()
	}
}

/// Body of a successful login or registration.
#[derive(Deserialize)]
struct AuthResponse {
	token: String,
	user: User,
	#[serde(default)]
	permissions: PermissionSet,
}

/// Body of `GET /api/auth/me`.
#[derive(Deserialize)]
struct MeResponse {
	user: User,
	#[serde(default)]
	permissions: PermissionSet,
}

pub struct SessionManager {
	api: ApiClient,
	store: Arc<dyn TokenStore>,
	state: watch::Sender<Session>,
}

impl SessionManager {
	/// Start with an anonymous session. Call [`SessionManager::restore`] to
	/// pick up a persisted token.
	pub fn new(api: ApiClient, store: Arc<dyn TokenStore>) -> Self {
		let (state, _) = watch::channel(Session::default());
		Self { api, store, state }
	}

	/// Snapshot of the current session.
	pub fn current(&self) -> Session {
		self.state.borrow().clone()
	}

	/// Receiver that observes every session replacement.
	pub fn subscribe(&self) -> watch::Receiver<Session> {
		self.state.subscribe()
	}

	pub fn is_authenticated(&self) -> bool {
		self.state.borrow().is_authenticated()
	}

	/// The signed-in user, or [`CmsError::Unauthorized`].
	pub fn require_user(&self) -> Result<User> {
		self.state.borrow().user.clone().ok_or(CmsError::Unauthorized)
	}

	pub fn has_permission(&self, permission: &str) -> bool {
		self.state.borrow().permissions.has_permission(permission)
	}

	pub fn has_any_permission<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
		self.state.borrow().permissions.has_any_permission(permissions)
	}

	pub fn has_all_permissions<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
		self.state.borrow().permissions.has_all_permissions(permissions)
	}

	/// Load the persisted token and resolve it through `/api/auth/me`.
	///
	/// A `401` deletes the persisted token and yields an anonymous session.
	/// Any other failure is returned and the token stays persisted.
	#[instrument(skip_all)]
	pub async fn restore(&self) -> Result<Session> {
		let Some(token) = self.store.load(TOKEN_STORAGE_KEY).await? else {
			debug!("no persisted token, session is anonymous");
			self.reset().await;
			return Ok(self.current());
		};

		match self.api.get_with_token::<MeResponse>("/api/auth/me", &token).await {
			Ok(me) => {
				self.api.set_token(Some(token.clone())).await;
				info!(user_id = %me.user.id, permissions = me.permissions.len(), "session restored");
				self.publish(Session {
					user: Some(me.user),
					token: Some(token),
					permissions: me.permissions,
				});
				Ok(self.current())
			}
			Err(e) if e.status() == Some(401) => {
				warn!("persisted token rejected, clearing session");
				self.store.delete(TOKEN_STORAGE_KEY).await?;
				self.reset().await;
				Ok(self.current())
			}
			Err(e) => Err(e),
		}
	}

	#[instrument(skip_all, fields(email = %email))]
	pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
		let request = LoginRequest {
			email: email.to_string(),
			password: password.to_string(),
		};
		let response: AuthResponse = self.api.post("/api/auth/login", &request).await?;
		self.establish(response).await
	}

	#[instrument(skip_all, fields(email = %request.email))]
	pub async fn register(&self, request: RegisterRequest) -> Result<Session> {
		let response: AuthResponse = self.api.post("/api/auth/register", &request).await?;
		self.establish(response).await
	}

	/// Forget the persisted token and reset to anonymous.
	#[instrument(skip_all)]
	pub async fn logout(&self) -> Result<()> {
		self.store.delete(TOKEN_STORAGE_KEY).await?;
		self.reset().await;
		info!("logged out");
		Ok(())
	}

	async fn establish(&self, response: AuthResponse) -> Result<Session> {
		let AuthResponse {
			token,
			user,
			permissions,
		} = response;
		let token = AuthToken::new(token);

		self.store.save(TOKEN_STORAGE_KEY, &token).await?;
		self.api.set_token(Some(token.clone())).await;

		info!(user_id = %user.id, permissions = permissions.len(), "session established");
		self.publish(Session {
			user: Some(user),
			token: Some(token),
			permissions,
		});
		Ok(self.current())
	}

	async fn reset(&self) {
		self.api.set_token(None).await;
		self.publish(Session::default());
	}

	fn publish(&self, session: Session) {
		self.state.send_replace(session);
	}
}

impl std::fmt::Debug for SessionManager {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionManager")
			.field("session", &*self.state.borrow())
			.finish_non_exhaustive()
	}
}
