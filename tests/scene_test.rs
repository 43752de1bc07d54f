//! Startup and refresh of localized text through the public API.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use googletest::prelude::*;
use tempfile::TempDir;
use world_localization::config::ConfigManager;
use world_localization::{
    LocalizationScene,
    LocalizedText,
    TextSurface,
};

#[derive(Clone, Default)]
struct Label(Rc<RefCell<String>>);

impl Label {
    fn text(&self) -> String {
        self.0.borrow().clone()
    }
}

impl TextSurface for Label {
    fn set_text(&mut self, text: &str) {
        *self.0.borrow_mut() = text.to_string();
    }
}

fn attach(scene: &mut LocalizationScene, key: &str) -> Label {
    let label = Label::default();
    scene.attach(LocalizedText::new(key, key).with_surface(label.clone()));
    label
}

#[googletest::test]
fn project_config_drives_scene_startup() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("lang")).unwrap();
    fs::write(root.join("lang/en.json"), r#"{"hello": "Hi!", "bye": "Bye!"}"#).unwrap();
    fs::write(root.join("lang/base.json"), r#"{"hello": "Hi!", "extra": "Extra!"}"#).unwrap();
    fs::write(
        root.join(".world-localization.json"),
        r#"{
  "primarySource": "lang/en.json",
  "fallbackSource": "lang/base.json",
  "showKeyInFallbackText": true
}"#,
    )
    .unwrap();

    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(root.to_path_buf())).unwrap();
    let settings = config_manager.get_settings();

    let mut scene = LocalizationScene::from_settings(settings);
    let hello = attach(&mut scene, "hello");
    let extra = attach(&mut scene, "extra");
    let missing = attach(&mut scene, "missing");

    let primary = settings.primary_source_file(root).unwrap();
    let fallback = settings.fallback_source_file(root).unwrap();
    let summary = scene.activate_from_sources(Some(&primary), Some(&fallback));

    expect_that!(summary.updated, eq(3));
    expect_that!(hello.text(), eq("Hi!"));
    expect_that!(extra.text(), eq("Extra!\n[Missing Key \"extra\"]"));
    expect_that!(missing.text(), eq("[Missing Key \"missing\"]"));
}

#[googletest::test]
fn refresh_after_language_change_updates_every_element() {
    let mut scene = LocalizationScene::new(Default::default());
    let title = attach(&mut scene, "title");
    let start = attach(&mut scene, "menu.start");
    scene.activate(Some(r#"{"title": "World", "menu.start": "Start"}"#), None);

    scene.handler().setup_primary_language(r#"{"title": "Welt"}"#);
    scene.handler().setup_fallback_language(r#"{"menu.start": "Start"}"#);
    scene.refresh();

    expect_that!(title.text(), eq("Welt"));
    expect_that!(start.text(), eq("Start"));
}

#[googletest::test]
fn broken_primary_language_falls_back_per_key() {
    let mut scene = LocalizationScene::new(Default::default());
    let title = attach(&mut scene, "title");

    scene.activate(Some("{ broken"), Some(r#"{"title": "World"}"#));

    expect_that!(title.text(), eq("World"));
}
