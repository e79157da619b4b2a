use dioxus::prelude::*;

mod components;
mod error;
mod filesystem;
mod image_processing;
mod services;

use components::HomeScreen;

const STYLE: &str = include_str!("../assets/main.css");

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("snapshare"),
    );

    #[cfg(not(target_os = "android"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[component]
fn App() -> Element {
    rsx! {
        document::Style { {STYLE} }
        HomeScreen {}
    }
}
