// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Extractors for geometry types from other crates.
//!
//! Enabled via feature flags to keep the core free of geometry dependencies.

#[cfg(feature = "kurbo")]
pub mod kurbo;
