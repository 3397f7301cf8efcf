// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic: loading the people list and deriving projections of it.

pub mod loader;
pub mod transforms;
