// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for browsing the people list.
//! Handles layout, the toolbar, and wiring user actions to the MVU kernel.

pub mod components;

use std::sync::Arc;

use eframe::egui;

use crate::config::AppConfig;
use crate::mvu::{self, AppModel, Command, CommandEnv, Msg};
use crate::ui::components::people_table::{self, PeopleTableMsg};

/// Stateful egui application holding the model and the worker channels.
pub struct NameGameApp {
    model: AppModel,
    inbox: Vec<Msg>,
    thumbnail_size: f32,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl NameGameApp {
    /// Spawn the command workers and queue the initial people load.
    pub fn new(config: &AppConfig, env: CommandEnv) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let env = Arc::new(env);
        for _ in 0..config.workers {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let env = Arc::clone(&env);
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, &env);
                    let _ = msg_tx.send(msg);
                }
            });
        }
        tracing::debug!(workers = config.workers, "command workers started");

        Self {
            model: AppModel::new(config.endpoint.clone()),
            inbox: vec![Msg::Reload],
            thumbnail_size: config.thumbnail_size as f32,
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for NameGameApp {
    /// Drains worker results, applies queued messages to the model, and
    /// dispatches the resulting commands. Runs before every [`Self::ui`].
    fn logic(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process pending messages in arrival order until exhausted.
        let mut msgs = std::mem::take(&mut self.inbox);
        msgs.reverse();
        while let Some(msg) = msgs.pop() {
            match msg {
                Msg::ThumbnailDecoded { url, image } => {
                    let texture = ctx.load_texture(
                        format!("thumb-{url}"),
                        image,
                        egui::TextureOptions::default(),
                    );
                    msgs.push(Msg::ThumbnailReady { url, texture });
                }
                other => {
                    let mut commands = Vec::new();
                    mvu::update(&mut self.model, other, &mut commands);
                    for cmd in commands {
                        if self.cmd_tx.send(cmd).is_ok() {
                            self.model.pending_commands += 1;
                        }
                    }
                }
            }
        }
    }

    /// Renders the top bar, error modal, status bar, and people table.
    /// Interactions are queued in the inbox for the next [`Self::logic`] pass.
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        let ctx = ui.ctx().clone();

        egui::Panel::top("top_bar").show_inside(ui, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Name Game");
                ui.separator();
                self.render_search(ui);
                ui.separator();
                self.render_list_actions(ui);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_switch(ui);
                    ui.separator();
                    self.render_reload_button(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(&ctx);

        egui::Panel::bottom("status_panel")
            .resizable(false)
            .show_inside(ui, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            let rows = people_table::table_rows(&self.model.visible);
            let table_msgs =
                people_table::view(ui, &rows, &self.model.thumbnails, self.thumbnail_size);
            self.inbox.extend(table_msgs.into_iter().map(|m| match m {
                PeopleTableMsg::LoadThumbnail(url) => Msg::LoadThumbnail(url),
            }));
        });

        if !self.inbox.is_empty() || self.model.pending_commands > 0 {
            ctx.request_repaint();
        }
    }
}

impl NameGameApp {
    /// Render the search box; every edit re-filters the canonical list.
    fn render_search(&mut self, ui: &mut egui::Ui) {
        ui.label(egui_phosphor::regular::MAGNIFYING_GLASS);
        let mut query = self.model.query.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut query)
                    .hint_text("Search by name")
                    .desired_width(200.0),
            )
            .changed()
        {
            self.inbox.push(Msg::SearchChanged(query));
        }
    }

    /// Shuffle and sort buttons. Each one starts again from the full list.
    fn render_list_actions(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.model.people.is_empty();

        let shuffle = egui::Button::new(format!("{} Shuffle", egui_phosphor::regular::SHUFFLE));
        if ui.add_enabled(enabled, shuffle).clicked() {
            self.inbox.push(Msg::Shuffle);
        }

        let by_first = egui::Button::new(format!(
            "{} Sort (First Name)",
            egui_phosphor::regular::SORT_ASCENDING
        ));
        if ui
            .add_enabled(enabled, by_first)
            .on_hover_text("Sorts by the full name")
            .clicked()
        {
            self.inbox.push(Msg::SortByFirstName);
        }

        let by_last = egui::Button::new(format!(
            "{} Sort (Last Name)",
            egui_phosphor::regular::SORT_ASCENDING
        ));
        if ui.add_enabled(enabled, by_last).clicked() {
            self.inbox.push(Msg::SortByLastName);
        }
    }

    fn render_reload_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(format!(
            "{} Reload",
            egui_phosphor::regular::ARROW_CLOCKWISE
        ));
        if ui
            .add_enabled(!self.model.loading, button)
            .on_disabled_hover_text("Already loading")
            .clicked()
        {
            self.inbox.push(Msg::Reload);
        }
    }

    /// Render a simple modal window for load errors.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Could not load people")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Retry").clicked() {
                            self.inbox.push(Msg::DismissError);
                            self.inbox.push(Msg::Reload);
                        }
                        if ui.button("OK").clicked() {
                            self.inbox.push(Msg::DismissError);
                        }
                    });
                });
        }
    }

    /// Render the visible/total counts plus the latest status message.
    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!(
                "Showing {} of {}",
                self.model.visible.len(),
                self.model.people.len()
            ));
            if let Some(text) = &self.model.status {
                ui.separator();
                ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(68)));
            }
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                    "{} task(s) running in background",
                    self.model.pending_commands
                ));
            }
        });
    }
}
