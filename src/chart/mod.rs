pub mod chart_window;
pub mod controls;
pub mod coords;
pub mod drawings;
pub mod plot;
pub mod range_slider;
pub mod route;

pub use chart_window::ChartWindow;
