// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel: application state, messages, and commands.
//!
//! The model is only mutated by [`update`]. Each list action replaces the
//! visible list with a transform of the canonical list; nothing is edited in place.

use std::collections::{HashMap, HashSet};

use eframe::egui;
use reqwest::blocking::Client;
use url::Url;

use crate::logic::loader::{self, LoadError, LoadedPeople};
use crate::logic::transforms;
use crate::models::Person;
use crate::ui::components::people_table::decode_thumbnail;

/// Top-level application state.
pub struct AppModel {
    /// Endpoint the people list is loaded from; photo URLs resolve against it.
    pub endpoint: Url,
    /// Canonical list as loaded; replaced only by a new load.
    pub people: Vec<Person>,
    /// Projection currently shown in the table.
    pub visible: Vec<Person>,
    /// Current search box text.
    pub query: String,
    /// Whether a people load is in flight.
    pub loading: bool,
    /// Photo thumbnails keyed by the raw `url` of each person.
    pub thumbnails: ThumbnailCache,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

/// Thumbnail textures plus the bookkeeping that keeps each photo requested at most once.
#[derive(Default)]
pub struct ThumbnailCache {
    textures: HashMap<String, egui::TextureHandle>,
    pending: HashSet<String>,
    failed: HashSet<String>,
}

impl ThumbnailCache {
    pub fn get(&self, url: &str) -> Option<&egui::TextureHandle> {
        self.textures.get(url)
    }

    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    /// True when the thumbnail has not been loaded, requested, or given up on.
    fn wants(&self, url: &str) -> bool {
        !self.textures.contains_key(url) && !self.pending.contains(url) && !self.failed.contains(url)
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    Reload,
    PeopleLoaded(Result<LoadedPeople, LoadError>),
    Shuffle,
    SortByFirstName,
    SortByLastName,
    SearchChanged(String),
    LoadThumbnail(String),
    ThumbnailDecoded {
        url: String,
        image: egui::ColorImage,
    },
    ThumbnailReady {
        url: String,
        texture: egui::TextureHandle,
    },
    ThumbnailFailed {
        url: String,
        reason: String,
    },
    DismissError,
}

/// Commands represent side-effects executed on worker threads.
pub enum Command {
    LoadPeople { endpoint: Url },
    LoadThumbnail { key: String, url: Url },
}

/// Shared resources the workers need to execute commands.
pub struct CommandEnv {
    pub client: Client,
    pub thumbnail_size: u32,
}

impl AppModel {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            people: Vec::new(),
            visible: Vec::new(),
            query: String::new(),
            loading: false,
            thumbnails: ThumbnailCache::default(),
            status: None,
            error: None,
            pending_commands: 0,
        }
    }
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Reload => {
            if model.loading {
                return;
            }
            model.loading = true;
            model.status = Some(format!("Loading people from {}…", model.endpoint));
            cmds.push(Command::LoadPeople {
                endpoint: model.endpoint.clone(),
            });
        }
        Msg::PeopleLoaded(result) => {
            model.loading = false;
            match result {
                Ok(loaded) => {
                    let message = loaded_message(&loaded);
                    model.people = loaded.people;
                    model.visible = model.people.clone();
                    model.query.clear();
                    surface_event(model, message, false);
                }
                Err(err) => {
                    tracing::error!(kind = ?err.kind(), "failed to load people: {err}");
                    model.people.clear();
                    model.visible.clear();
                    surface_event(model, format!("Failed to load people:\n\n{err}"), true);
                }
            }
        }
        Msg::Shuffle => {
            tracing::debug!(people = model.people.len(), "shuffle");
            model.query.clear();
            model.visible = transforms::shuffle(&model.people);
        }
        Msg::SortByFirstName => {
            tracing::debug!(people = model.people.len(), "sort by first name");
            model.query.clear();
            model.visible = transforms::sort_by_first_name(&model.people);
        }
        Msg::SortByLastName => {
            tracing::debug!(people = model.people.len(), "sort by last name");
            model.query.clear();
            model.visible = transforms::sort_by_last_name(&model.people);
        }
        Msg::SearchChanged(query) => {
            model.visible = transforms::filter_by_name(&query, &model.people);
            tracing::debug!(query = %query, matches = model.visible.len(), "search");
            model.query = query;
        }
        Msg::LoadThumbnail(raw) => {
            if !model.thumbnails.wants(&raw) {
                return;
            }
            match loader::resolve_photo_url(&model.endpoint, &raw) {
                Ok(url) => {
                    model.thumbnails.pending.insert(raw.clone());
                    cmds.push(Command::LoadThumbnail { key: raw, url });
                }
                Err(err) => {
                    tracing::warn!(url = %raw, "unusable photo URL: {err}");
                    model.thumbnails.failed.insert(raw);
                }
            }
        }
        Msg::ThumbnailDecoded { url, image } => {
            // Texture creation needs the egui context and happens in the UI shell.
            let _ = (url, image);
        }
        Msg::ThumbnailReady { url, texture } => {
            model.thumbnails.pending.remove(&url);
            model.thumbnails.textures.insert(url, texture);
        }
        Msg::ThumbnailFailed { url, reason } => {
            tracing::warn!(url = %url, "thumbnail unavailable: {reason}");
            model.thumbnails.pending.remove(&url);
            model.thumbnails.failed.insert(url);
        }
        Msg::DismissError => model.error = None,
    }
}

/// Execute a command synchronously on the calling worker and return a resulting message.
pub fn run_command(cmd: Command, env: &CommandEnv) -> Msg {
    match cmd {
        Command::LoadPeople { endpoint } => {
            Msg::PeopleLoaded(loader::load_people(&env.client, &endpoint))
        }
        Command::LoadThumbnail { key, url } => {
            tracing::debug!(%url, "fetching thumbnail");
            let image = loader::fetch_photo(&env.client, &url)
                .map_err(|err| err.to_string())
                .and_then(|bytes| decode_thumbnail(&bytes, env.thumbnail_size));
            match image {
                Ok(image) => Msg::ThumbnailDecoded { url: key, image },
                Err(reason) => Msg::ThumbnailFailed { url: key, reason },
            }
        }
    }
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}

fn loaded_message(loaded: &LoadedPeople) -> String {
    match loaded.skipped.len() {
        0 => format!("Loaded {} people.", loaded.people.len()),
        skipped => format!(
            "Loaded {} people; skipped {skipped} without a last name.",
            loaded.people.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::logic::loader::{LoadErrorKind, people_from_response};

    const PEOPLE: &str = r#"[
        {"name": "Viju Legard", "url": "//img.example.com/viju.jpg"},
        {"name": "Matt Seibert", "url": "//img.example.com/matt.jpg"},
        {"name": "Zoe Adams", "url": "//img.example.com/zoe.jpg"},
        {"name": "Prince", "url": "//img.example.com/prince.jpg"}
    ]"#;

    fn model() -> AppModel {
        AppModel::new(Url::parse("http://api.example.com/").unwrap())
    }

    fn loaded_model() -> AppModel {
        let mut model = model();
        let mut cmds = Vec::new();
        update(&mut model, Msg::Reload, &mut cmds);
        let loaded = people_from_response(200, PEOPLE).unwrap();
        update(&mut model, Msg::PeopleLoaded(Ok(loaded)), &mut cmds);
        model
    }

    fn names(list: &[Person]) -> Vec<&str> {
        list.iter().map(Person::name).collect()
    }

    #[test]
    fn reload_enqueues_a_single_load() {
        let mut model = model();
        let mut cmds = Vec::new();

        update(&mut model, Msg::Reload, &mut cmds);
        update(&mut model, Msg::Reload, &mut cmds);

        assert!(model.loading);
        assert_eq!(cmds.len(), 1, "second reload should wait for the first");
        match cmds.pop().unwrap() {
            Command::LoadPeople { endpoint } => assert_eq!(endpoint, model.endpoint),
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn successful_load_populates_both_lists() {
        let model = loaded_model();

        assert!(!model.loading);
        assert_eq!(names(&model.people), vec!["Viju Legard", "Matt Seibert", "Zoe Adams"]);
        assert_eq!(model.visible, model.people);
        assert!(model.error.is_none());
        assert_eq!(
            model.status.as_deref(),
            Some("Loaded 3 people; skipped 1 without a last name.")
        );
    }

    #[test]
    fn failed_load_leaves_lists_empty_and_sets_error() {
        let mut model = model();
        let mut cmds = Vec::new();
        update(&mut model, Msg::Reload, &mut cmds);

        update(&mut model, Msg::PeopleLoaded(Err(LoadError::Status(500))), &mut cmds);

        assert!(!model.loading);
        assert!(model.people.is_empty());
        assert!(model.visible.is_empty());
        assert!(model.error.as_deref().unwrap().contains("500"));

        update(&mut model, Msg::DismissError, &mut cmds);
        assert!(model.error.is_none());
    }

    #[test]
    fn list_actions_on_empty_model_are_harmless() {
        let mut model = model();
        let mut cmds = Vec::new();

        for msg in [
            Msg::Shuffle,
            Msg::SortByFirstName,
            Msg::SortByLastName,
            Msg::SearchChanged("viju".into()),
        ] {
            update(&mut model, msg, &mut cmds);
            assert!(model.visible.is_empty());
        }
        assert!(cmds.is_empty());
    }

    #[test]
    fn shuffle_replaces_visible_without_touching_canonical() {
        let mut model = loaded_model();
        let canonical = model.people.clone();
        let mut cmds = Vec::new();

        update(&mut model, Msg::Shuffle, &mut cmds);

        assert_eq!(model.people, canonical);
        let mut visible = names(&model.visible);
        let mut expected = names(&canonical);
        visible.sort_unstable();
        expected.sort_unstable();
        assert_eq!(visible, expected);
    }

    #[test]
    fn sort_actions_order_the_visible_list() {
        let mut model = loaded_model();
        let mut cmds = Vec::new();

        update(&mut model, Msg::SortByFirstName, &mut cmds);
        assert_eq!(names(&model.visible), vec!["Matt Seibert", "Viju Legard", "Zoe Adams"]);

        update(&mut model, Msg::SortByLastName, &mut cmds);
        assert_eq!(names(&model.visible), vec!["Zoe Adams", "Viju Legard", "Matt Seibert"]);
    }

    #[test]
    fn search_filters_canonical_list_each_time() {
        let mut model = loaded_model();
        let mut cmds = Vec::new();

        update(&mut model, Msg::SearchChanged("VIJ".into()), &mut cmds);
        assert_eq!(names(&model.visible), vec!["Viju Legard"]);
        assert_eq!(model.query, "VIJ");

        update(&mut model, Msg::SearchChanged("a".into()), &mut cmds);
        assert_eq!(names(&model.visible), vec!["Viju Legard", "Matt Seibert", "Zoe Adams"]);

        update(&mut model, Msg::SearchChanged(String::new()), &mut cmds);
        assert_eq!(model.visible, model.people);
    }

    #[test]
    fn sorting_after_search_starts_from_everyone() {
        let mut model = loaded_model();
        let mut cmds = Vec::new();

        update(&mut model, Msg::SearchChanged("zoe".into()), &mut cmds);
        update(&mut model, Msg::SortByFirstName, &mut cmds);

        assert_eq!(model.visible.len(), 3);
        assert!(model.query.is_empty());
    }

    #[test]
    fn thumbnail_requests_are_deduplicated() {
        let mut model = loaded_model();
        let mut cmds = Vec::new();
        let raw = "//img.example.com/viju.jpg".to_string();

        update(&mut model, Msg::LoadThumbnail(raw.clone()), &mut cmds);
        update(&mut model, Msg::LoadThumbnail(raw.clone()), &mut cmds);

        assert_eq!(cmds.len(), 1);
        assert!(model.thumbnails.is_pending(&raw));
        match cmds.pop().unwrap() {
            Command::LoadThumbnail { key, url } => {
                assert_eq!(key, raw);
                assert_eq!(url.as_str(), "http://img.example.com/viju.jpg");
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn failed_thumbnails_are_not_requested_again() {
        let mut model = loaded_model();
        let mut cmds = Vec::new();
        let raw = "//img.example.com/matt.jpg".to_string();

        update(&mut model, Msg::LoadThumbnail(raw.clone()), &mut cmds);
        update(
            &mut model,
            Msg::ThumbnailFailed {
                url: raw.clone(),
                reason: "404".into(),
            },
            &mut cmds,
        );
        cmds.clear();
        update(&mut model, Msg::LoadThumbnail(raw.clone()), &mut cmds);

        assert!(cmds.is_empty());
        assert!(model.thumbnails.has_failed(&raw));
        assert!(!model.thumbnails.is_pending(&raw));
    }

    #[test]
    fn unresolvable_photo_url_fails_without_a_command() {
        let mut model = loaded_model();
        let mut cmds = Vec::new();

        update(&mut model, Msg::LoadThumbnail("http://[oops".into()), &mut cmds);

        assert!(cmds.is_empty());
        assert!(model.thumbnails.has_failed("http://[oops"));
    }

    async fn serve(template: ResponseTemplate) -> (MockServer, Url) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(template)
            .mount(&server)
            .await;
        let url = Url::parse(&server.uri()).unwrap();
        (server, url)
    }

    // Workers run commands on plain threads; the blocking client must not be dropped inside the runtime.
    async fn run_blocking(cmd: Command) -> Msg {
        tokio::task::spawn_blocking(move || {
            let env = CommandEnv {
                client: loader::build_client(Duration::from_secs(5)).unwrap(),
                thumbnail_size: 64,
            };
            run_command(cmd, &env)
        })
        .await
        .expect("command worker panicked")
    }

    #[tokio::test]
    async fn load_command_feeds_people_into_the_model() {
        let (_server, endpoint) =
            serve(ResponseTemplate::new(200).set_body_string(PEOPLE)).await;

        let msg = run_blocking(Command::LoadPeople { endpoint }).await;
        let mut model = model();
        let mut cmds = Vec::new();
        update(&mut model, msg, &mut cmds);

        assert_eq!(names(&model.people), vec!["Viju Legard", "Matt Seibert", "Zoe Adams"]);
        assert_eq!(model.visible, model.people);
        assert!(model.error.is_none());
    }

    #[tokio::test]
    async fn load_command_reports_server_error_as_message() {
        let (_server, endpoint) =
            serve(ResponseTemplate::new(500).set_body_string("upstream down")).await;

        let msg = run_blocking(Command::LoadPeople { endpoint }).await;

        match msg {
            Msg::PeopleLoaded(Err(err)) => {
                assert_eq!(err.kind(), LoadErrorKind::Status);
                assert!(matches!(err, LoadError::Status(500)));
            }
            _ => panic!("expected a failed load"),
        }
    }

    #[tokio::test]
    async fn load_command_reports_transport_failure_as_message() {
        let endpoint = Url::parse("http://namegame.invalid/").unwrap();

        let msg = run_blocking(Command::LoadPeople { endpoint }).await;

        match msg {
            Msg::PeopleLoaded(Err(err)) => assert_eq!(err.kind(), LoadErrorKind::Transport),
            _ => panic!("expected a failed load"),
        }
    }

    #[tokio::test]
    async fn thumbnail_command_decodes_fetched_photo() {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(128, 64, Rgba([10, 20, 30, 255]));
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        let (_server, url) = serve(ResponseTemplate::new(200).set_body_bytes(png)).await;
        let key = "//img.example.com/viju.jpg".to_string();

        let msg = run_blocking(Command::LoadThumbnail { key: key.clone(), url }).await;

        match msg {
            Msg::ThumbnailDecoded { url, image } => {
                assert_eq!(url, key);
                assert_eq!(image.size, [64, 32]);
            }
            _ => panic!("expected a decoded thumbnail"),
        }
    }

    #[tokio::test]
    async fn thumbnail_command_reports_missing_photo() {
        let (_server, url) = serve(ResponseTemplate::new(404)).await;
        let key = "//img.example.com/gone.jpg".to_string();

        let msg = run_blocking(Command::LoadThumbnail { key: key.clone(), url }).await;

        assert!(matches!(msg, Msg::ThumbnailFailed { url, .. } if url == key));
    }
}
