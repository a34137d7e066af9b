// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the section registry.

use alloc::string::String;

/// A configuration call named a section in a way that cannot be honored.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The section id is not registered.
    #[error("section `{0}` doesn't exist")]
    UnknownSection(String),
    /// A section with this id is already registered.
    #[error("section `{0}` already exists")]
    DuplicateSection(String),
}
