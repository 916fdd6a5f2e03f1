#![allow(non_snake_case)]

use dioxus::{
    desktop::{Config, LogicalSize, WindowBuilder},
    prelude::*,
};
use ratioscope::chart::route::Route;

#[component]
fn App() -> Element {
    rsx! {
        div { class: "main_div", Router::<Route> {} }
    }
}

fn main() {
    env_logger::init();

    LaunchBuilder::new()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title("Ratioscope")
                    .with_always_on_top(false)
                    .with_inner_size(LogicalSize::new(1100.0, 900.0)),
            ),
        )
        .launch(App);
}
