use dioxus::prelude::*;

use crate::chart::chart_window::ChartWindow;

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    ChartWindow,
}
