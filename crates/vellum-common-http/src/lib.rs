// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Vellum.
//!
//! Every outbound request from Vellum crates goes through a client built
//! here so the User-Agent is consistent. There is no retry layer; callers
//! see the first failure.

mod client;

pub use client::{builder, builder_with_user_agent, new_client, user_agent};
