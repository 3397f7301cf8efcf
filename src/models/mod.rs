// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types shared between UI and loading logic.

pub mod person;

pub use person::{MalformedNameError, Person, RawPerson};
