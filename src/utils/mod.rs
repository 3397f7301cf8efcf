// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and business logic.

pub mod names;

/// First and second word tokens of a display name.
pub use names::{first_name, last_name};
