//! Drawing annotations: entity model, store, creation, editing, rendering.

pub mod attributes_modal;
pub mod creation;
pub mod drag;
pub mod layer;
pub mod model;
pub mod store;

pub use attributes_modal::AttributesModal;
pub use layer::DrawingLayer;
