// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! People table: thumbnail, first name, and last name per visible person.

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::models::Person;
use crate::mvu::ThumbnailCache;
use crate::utils::{first_name, last_name};

/// Messages emitted by the table view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeopleTableMsg {
    /// A visible row needs the thumbnail for this raw photo URL.
    LoadThumbnail(String),
}

/// Display projection of one person.
///
/// First and last names are re-derived from the full name at render time,
/// independent of the stored last name. Missing tokens render empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowView {
    pub photo_url: String,
    pub first_name: String,
    pub last_name: String,
}

/// Project the visible list into table rows.
pub fn table_rows(visible: &[Person]) -> Vec<RowView> {
    visible
        .iter()
        .map(|person| RowView {
            photo_url: person.url().to_string(),
            first_name: first_name(person.name()).unwrap_or_default().to_string(),
            last_name: last_name(person.name()).unwrap_or_default().to_string(),
        })
        .collect()
}

/// Render the table and return thumbnail requests for rows scrolled into view.
pub fn view(
    ui: &mut egui::Ui,
    rows: &[RowView],
    thumbnails: &ThumbnailCache,
    thumbnail_size: f32,
) -> Vec<PeopleTableMsg> {
    let mut msgs = Vec::new();

    if rows.is_empty() {
        ui.label(
            egui::RichText::new("No people to show.")
                .italics()
                .color(egui::Color32::from_gray(110)),
        );
        return msgs;
    }

    let row_height = thumbnail_size + 8.0;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(thumbnail_size + 12.0))
        .column(Column::initial(200.0).at_least(100.0))
        .column(Column::remainder().at_least(100.0))
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.strong("Thumbnail");
            });
            header.col(|ui| {
                ui.strong("First Name");
            });
            header.col(|ui| {
                ui.strong("Last Name");
            });
        })
        .body(|body| {
            body.rows(row_height, rows.len(), |mut row| {
                let Some(person) = rows.get(row.index()) else {
                    return;
                };
                row.col(|ui| {
                    render_thumbnail(ui, &person.photo_url, thumbnails, thumbnail_size, &mut msgs);
                });
                row.col(|ui| {
                    ui.label(person.first_name.as_str());
                });
                row.col(|ui| {
                    ui.label(person.last_name.as_str());
                });
            });
        });

    msgs
}

/// Draw the cached texture, a placeholder, or request the photo on first sight.
fn render_thumbnail(
    ui: &mut egui::Ui,
    url: &str,
    thumbnails: &ThumbnailCache,
    max: f32,
    msgs: &mut Vec<PeopleTableMsg>,
) {
    if let Some(texture) = thumbnails.get(url) {
        let size = texture.size_vec2();
        let scale = (max / size.x).min(max / size.y).min(1.0);
        ui.add(egui::Image::new((texture.id(), size * scale)));
        return;
    }

    if thumbnails.has_failed(url) {
        ui.label(
            egui::RichText::new(egui_phosphor::regular::USER)
                .size(max * 0.6)
                .color(egui::Color32::from_gray(140)),
        )
        .on_hover_text("Photo unavailable");
        return;
    }

    if !thumbnails.is_pending(url) {
        msgs.push(PeopleTableMsg::LoadThumbnail(url.to_string()));
    }
    ui.add(egui::Spinner::new().size(max * 0.3));
}

/// Decode downloaded photo bytes into a texture-ready image no larger than `max` pixels per side.
pub(crate) fn decode_thumbnail(bytes: &[u8], max: u32) -> Result<egui::ColorImage, String> {
    let dyn_img = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let resized = dyn_img.thumbnail(max, max).to_rgba8();
    let size = [resized.width() as usize, resized.height() as usize];
    let pixels = resized.into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}
