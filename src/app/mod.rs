// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the people browser.

use anyhow::{Result, anyhow};
use eframe::egui;
use egui_phosphor::Variant;

use crate::config::AppConfig;
use crate::logic::loader;
use crate::mvu::CommandEnv;
use crate::ui::NameGameApp;

/// Build the shared HTTP client, then run the main egui event loop until the window closes.
pub fn run(config: AppConfig) -> Result<()> {
    let env = CommandEnv {
        client: loader::build_client(config.timeout)?,
        thumbnail_size: config.thumbnail_size,
    };

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 800.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    tracing::info!(endpoint = %config.endpoint, "starting namegame");
    eframe::run_native(
        "Name Game",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(NameGameApp::new(&config, env)))
        }),
    )
    .map_err(|err| anyhow!("UI event loop failed: {err}"))
}
