#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use std::path::{Path, PathBuf};

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::prelude::*;

#[cfg(feature = "desktop")]
use ui::core::config::{self, DashboardConfig};
use ui::views::Dashboard;

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Embedded shared theme (ui/assets/theme/main.css); no separate desktop /assets needed.

#[cfg(feature = "desktop")]
const CONFIG_FILE: &str = "riskatlas.json";

#[cfg(feature = "desktop")]
fn main() {
    dioxus::logger::initialize_default();

    let resource_dir = resolve_resource_dir();
    config::register(load_config(&resource_dir));

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("Risk Atlas – v{}", env!("CARGO_PKG_VERSION")))
                        .with_maximized(true),
                )
                .with_resource_directory(resource_dir),
        )
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    LaunchBuilder::server().launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Always inline embedded CSS (no external file dependency for desktop builds)
        document::Style { "{MAIN_CSS_INLINE}" }

        Dashboard {}
    }
}

/// Reads `riskatlas.json` from the resource directory when present. Relative
/// data paths in it (and in the defaults) resolve against that directory.
#[cfg(feature = "desktop")]
fn load_config(resource_dir: &Path) -> DashboardConfig {
    let path = resource_dir.join(CONFIG_FILE);
    let mut config = match std::fs::read_to_string(&path) {
        Ok(text) => match DashboardConfig::from_json(&text) {
            Ok(config) => {
                tracing::info!(target: "riskatlas::desktop", path = %path.display(), "loaded config");
                config
            }
            Err(err) => {
                tracing::warn!(target: "riskatlas::desktop", path = %path.display(), "ignoring invalid config: {err}");
                DashboardConfig::default()
            }
        },
        Err(_) => DashboardConfig::default(),
    };

    config.data_source = resolve_source(resource_dir, &config.data_source);
    config.topology_source = resolve_source(resource_dir, &config.topology_source);
    config
}

#[cfg(feature = "desktop")]
fn resolve_source(resource_dir: &Path, source: &str) -> String {
    if source.contains("://") || Path::new(source).is_absolute() {
        source.to_string()
    } else {
        resource_dir.join(source).to_string_lossy().into_owned()
    }
}

#[cfg(feature = "desktop")]
fn resolve_resource_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        // During `cargo run` / `dx serve` load directly from the crate.
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets")))
            .unwrap_or_else(|| PathBuf::from("assets"))
    }
}
