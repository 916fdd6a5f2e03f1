//! Two-thumb selector for the visible slice of the series, in percent of the
//! full range. The thumbs are kept at least one percent apart so the slice
//! never collapses to nothing.

use dioxus::prelude::*;

const MIN_GAP: f64 = 1.0;

#[component]
pub fn RangeSlider(mut range: Signal<(f64, f64)>) -> Element {
    let (start, end) = *range.read();

    rsx! {
        div { class: "range-slider",
            label { "From" }
            input {
                r#type: "range",
                min: "0",
                max: "100",
                step: "0.5",
                value: "{start}",
                oninput: move |evt: Event<FormData>| {
                    if let Ok(value) = evt.value().parse::<f64>() {
                        let mut r = range.write();
                        r.0 = value.clamp(0.0, r.1 - MIN_GAP);
                    }
                },
            }
            label { "To" }
            input {
                r#type: "range",
                min: "0",
                max: "100",
                step: "0.5",
                value: "{end}",
                oninput: move |evt: Event<FormData>| {
                    if let Ok(value) = evt.value().parse::<f64>() {
                        let mut r = range.write();
                        r.1 = value.clamp(r.0 + MIN_GAP, 100.0);
                    }
                },
            }
            span { class: "range-label", "{start:.0}% to {end:.0}%" }
        }
    }
}
