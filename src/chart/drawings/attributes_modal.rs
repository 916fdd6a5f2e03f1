//! Modal editor for a drawing's visual attributes and anchor points.
//!
//! The modal works on a snapshot of the drawing taken when it opens. Nothing
//! touches the store until Save; Cancel closes with no mutation. Numeric and
//! date fields that fail to parse keep their prior value.

use chrono::{DateTime, NaiveDate};
use dioxus::prelude::*;

use crate::chart::coords::DomainPoint;
use crate::chart::drawings::model::{Drawing, DrawingAttributes, DrawingKind, LineStyle};

const MIN_LINE_WIDTH: f64 = 1.0;
const MAX_LINE_WIDTH: f64 = 10.0;

#[component]
pub fn AttributesModal(
    drawing: Drawing,
    on_save: EventHandler<DrawingAttributes>,
    on_cancel: EventHandler<()>,
) -> Element {
    let kind = drawing.kind;
    let snapshot = drawing.attributes.clone();

    let color = use_signal(|| snapshot.color.clone());
    let line_width = use_signal(|| snapshot.line_width);
    let line_style = use_signal(|| snapshot.line_style);
    let text = use_signal(|| snapshot.text.clone().unwrap_or_default());
    let points = use_signal(|| drawing.points.clone());

    let save = move |_| {
        on_save.call(DrawingAttributes {
            color: color.read().clone(),
            line_width: *line_width.read(),
            line_style: *line_style.read(),
            text: (kind == DrawingKind::Text).then(|| text.read().clone()),
            points: Some(points.read().clone()),
        });
    };

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_cancel.call(()),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { "Edit {kind.label()}" }

                label {
                    "Color"
                    input {
                        r#type: "color",
                        value: "{color}",
                        oninput: {
                            let mut color = color;
                            move |evt: Event<FormData>| color.set(evt.value())
                        },
                    }
                }

                if kind != DrawingKind::Text {
                    label {
                        "Line width"
                        input {
                            r#type: "number",
                            min: "{MIN_LINE_WIDTH}",
                            max: "{MAX_LINE_WIDTH}",
                            step: "1",
                            value: "{line_width}",
                            oninput: {
                                let mut line_width = line_width;
                                move |evt: Event<FormData>| {
                                    if let Ok(parsed) = evt.value().parse::<f64>() {
                                        line_width.set(parsed.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH));
                                    }
                                }
                            },
                        }
                    }
                    label {
                        "Line style"
                        select {
                            value: "{line_style.read().label()}",
                            oninput: {
                                let mut line_style = line_style;
                                move |evt: Event<FormData>| {
                                    line_style.set(LineStyle::from_label(&evt.value()));
                                }
                            },
                            for style in [LineStyle::Solid, LineStyle::Dashed, LineStyle::Dotted] {
                                option { value: "{style.label()}", "{style.label()}" }
                            }
                        }
                    }
                } else {
                    label {
                        "Text"
                        input {
                            r#type: "text",
                            value: "{text}",
                            oninput: {
                                let mut text = text;
                                move |evt: Event<FormData>| text.set(evt.value())
                            },
                        }
                    }
                }

                for index in 0..points.read().len() {
                    PointEditor { index, points, show_date: kind != DrawingKind::HorizontalLine }
                }

                div {
                    class: "modal-buttons",
                    button { onclick: save, "Save" }
                    button { onclick: move |_| on_cancel.call(()), "Cancel" }
                }
            }
        }
    }
}

/// Date and price inputs for one anchor point. Horizontal lines hide the
/// date: their x anchor is decorative and the line spans the full width.
#[component]
fn PointEditor(index: usize, mut points: Signal<Vec<DomainPoint>>, show_date: bool) -> Element {
    let point = match points.read().get(index) {
        Some(point) => *point,
        None => return rsx! {},
    };

    let date = DateTime::from_timestamp_millis(point.x as i64)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    rsx! {
        fieldset {
            legend { "Point {index + 1}" }
            if show_date {
                label {
                    "Date"
                    input {
                        r#type: "date",
                        value: "{date}",
                        oninput: move |evt: Event<FormData>| {
                            let parsed = NaiveDate::parse_from_str(&evt.value(), "%Y-%m-%d");
                            if let Ok(date) = parsed
                                && let Some(midnight) = date.and_hms_opt(0, 0, 0)
                            {
                                if let Some(p) = points.write().get_mut(index) {
                                    p.x = midnight.and_utc().timestamp_millis() as f64;
                                }
                            }
                        },
                    }
                }
            }
            label {
                "Price"
                input {
                    r#type: "number",
                    step: "any",
                    value: "{point.y}",
                    oninput: move |evt: Event<FormData>| {
                        if let Ok(price) = evt.value().parse::<f64>()
                            && let Some(p) = points.write().get_mut(index)
                        {
                            p.y = price;
                        }
                    },
                }
            }
        }
    }
}
