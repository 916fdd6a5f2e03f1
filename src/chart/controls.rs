//! Toolbar for picking the active drawing tool and store-wide actions.

use dioxus::prelude::*;

use crate::chart::drawings::creation::CreationState;
use crate::chart::drawings::model::DrawingKind;
use crate::chart::drawings::store::DrawingState;

const TOOLS: [DrawingKind; 6] = [
    DrawingKind::Select,
    DrawingKind::HorizontalLine,
    DrawingKind::TrendLine,
    DrawingKind::Rectangle,
    DrawingKind::Ellipse,
    DrawingKind::Text,
];

#[component]
pub fn DrawingToolbar(mut creation: Signal<CreationState>) -> Element {
    let mut store = use_context::<Signal<DrawingState>>();

    let active = use_memo(move || creation.read().active_tool());
    let has_selection = use_memo(move || store.read().selected().is_some());
    let has_drawings = use_memo(move || !store.read().is_empty());

    rsx! {
        div { class: "toolbar",
            for kind in TOOLS {
                button {
                    class: if *active.read() == Some(kind) { "tool-button active" } else { "tool-button" },
                    onclick: move |_| {
                        // Clicking the active tool toggles it off.
                        let already = creation.peek().active_tool() == Some(kind);
                        let next = if already { None } else { Some(kind) };
                        creation.write().select_tool(next);
                        if next.is_some() && kind != DrawingKind::Select {
                            store.write().set_selected(None);
                        }
                    },
                    "{kind.label()}"
                }
            }

            button {
                class: "tool-button danger",
                disabled: !has_selection(),
                onclick: move |_| {
                    let selected = store.peek().selected();
                    if let Some(id) = selected {
                        store.write().remove_drawing(id);
                    }
                },
                "Delete"
            }
            button {
                class: "tool-button danger",
                disabled: !has_drawings(),
                onclick: move |_| store.write().clear_all(),
                "Clear All"
            }
        }
    }
}
