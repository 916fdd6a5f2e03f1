//! SVG overlay that renders drawings and routes pointer interactions.
//!
//! The overlay sits above the chart bitmap. Background clicks feed the
//! creation state machine; clicks on rendered shapes select them; grips on
//! the selected or hovered drawing start a point drag tracked by the svg
//! root's move/up handlers.

use dioxus::prelude::*;

use crate::chart::coords::{ChartMapper, DomainPoint};
use crate::chart::drawings::creation::{ClickOutcome, CreationState};
use crate::chart::drawings::drag::GripDrag;
use crate::chart::drawings::model::{Drawing, DrawingId, DrawingKind};
use crate::chart::drawings::store::DrawingState;

const GRIP_SIZE: f64 = 8.0;

/// Live pixel-space preview of a two-click creation, between the first click
/// and the commit. Not domain-mapped: it is redrawn from raw pixels on every
/// pointer move and discarded on commit.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PreviewStroke {
    kind: DrawingKind,
    start: (f64, f64),
    current: (f64, f64),
}

#[component]
pub fn DrawingLayer(
    mapper: ReadSignal<ChartMapper>,
    mut creation: Signal<CreationState>,
    on_open_attributes: EventHandler<DrawingId>,
) -> Element {
    let mut store = use_context::<Signal<DrawingState>>();
    let mut drag = use_signal(|| None::<GripDrag>);
    let hovered = use_signal(|| None::<DrawingId>);
    let mut preview = use_signal(|| None::<PreviewStroke>);

    let drawings = use_memo(move || store.read().drawings().to_vec());

    // The stroke only means something while the creation machine is pending;
    // a tool switch resets the machine without this component hearing about
    // it, so the stale stroke must be suppressed here.
    let pending_preview =
        use_memo(move || preview_when_pending(creation.read().is_pending(), *preview.read()));

    let cursor = use_memo(move || match creation.read().active_tool() {
        Some(kind) if kind != DrawingKind::Select => "crosshair",
        _ => "default",
    });

    rsx! {
        svg {
            width: "{mapper.read().width()}",
            height: "{mapper.read().height()}",
            view_box: "0 0 {mapper.read().width()} {mapper.read().height()}",
            style: "position: absolute; top: 0; left: 0; z-index: 2; user-select: none; -webkit-user-select: none; cursor: {cursor};",
            oncontextmenu: move |evt| evt.prevent_default(),
            onclick: move |evt| {
                let local = evt.data.coordinates().element();
                let (px, py) = (local.x, local.y);
                let point = mapper.read().to_domain(px, py);
                // The write guard must drop before the match arms read the
                // active tool back.
                let outcome = creation.write().handle_click(point);
                match outcome {
                    ClickOutcome::Ignored => preview.set(None),
                    ClickOutcome::Started => {
                        let kind = creation.read().active_tool();
                        if let Some(kind) = kind {
                            preview.set(Some(PreviewStroke {
                                kind,
                                start: (px, py),
                                current: (px, py),
                            }));
                        }
                    }
                    ClickOutcome::Committed(drawing) => {
                        store.write().add_drawing(drawing);
                        preview.set(None);
                    }
                }
            },
            onmousemove: move |evt| {
                let local = evt.data.coordinates().element();
                let (px, py) = (local.x, local.y);
                if let Some(active) = *drag.read() {
                    // Look the drawing up by id on every step: a deletion
                    // mid-drag turns the move into a no-op.
                    let point = mapper.read().to_domain(px, py);
                    active.apply(&mut store.write(), point);
                } else if preview.read().is_some() {
                    if let Some(stroke) = preview.write().as_mut() {
                        stroke.current = (px, py);
                    }
                }
            },
            onmouseup: move |_| {
                drag.set(None);
            },

            for drawing in drawings.read().iter().cloned() {
                DrawingShape {
                    key: "{drawing.id}",
                    drawing,
                    mapper,
                    drag,
                    hovered,
                    on_open_attributes,
                }
            }

            if let Some(stroke) = pending_preview() {
                CreationPreview { stroke }
            }
        }
    }
}

/// One committed drawing: exhaustive per-kind geometry plus its grips.
#[component]
fn DrawingShape(
    drawing: Drawing,
    mapper: ReadSignal<ChartMapper>,
    drag: Signal<Option<GripDrag>>,
    hovered: Signal<Option<DrawingId>>,
    on_open_attributes: EventHandler<DrawingId>,
) -> Element {
    let mut store = use_context::<Signal<DrawingState>>();
    let id = drawing.id;

    // Undersized point sets (possible only through defensive paths) render as
    // nothing rather than failing.
    if drawing.points.len() < drawing.kind.point_count() {
        return rsx! {};
    }

    let map = mapper.read().clone();
    let is_selected = store.read().selected() == Some(id);
    let is_hovered = *hovered.read() == Some(id);
    let show_grips = is_selected || is_hovered;

    let stroke = drawing.attributes.color.clone();
    let stroke_width = drawing.attributes.line_width;
    let dash = drawing.attributes.line_style.dash_array();

    let mut select = move |evt: Event<MouseData>| {
        evt.stop_propagation();
        store.write().set_selected(Some(id));
    };
    let open_attributes = move |evt: Event<MouseData>| {
        evt.stop_propagation();
        store.write().set_selected(Some(id));
        on_open_attributes.call(id);
    };
    let mut enter = move |_| hovered.set(Some(id));
    let mut leave = move |_| hovered.set(None);

    let grip_map = map.clone();
    let grips = move |points: &[DomainPoint]| {
        let grip_points: Vec<(usize, (f64, f64))> = if show_grips {
            points
                .iter()
                .enumerate()
                .map(|(index, p)| (index, grip_map.to_pixel(*p)))
                .collect()
        } else {
            Vec::new()
        };
        rsx! {
            for (index , (gx , gy)) in grip_points {
                GripBox {
                    key: "{id}-{index}",
                    x: gx,
                    y: gy,
                    drawing_id: id,
                    point_index: index,
                    drag,
                }
            }
        }
    };

    match drawing.kind {
        DrawingKind::HorizontalLine => {
            let y = map.to_pixel(drawing.points[0]).1;
            let margin = map.margin();
            rsx! {
                g {
                    line {
                        x1: "{margin.left}",
                        y1: "{y}",
                        x2: "{map.width() - margin.right}",
                        y2: "{y}",
                        stroke,
                        stroke_width,
                        stroke_dasharray: dash,
                        fill: "none",
                        style: "cursor: pointer;",
                        onclick: move |evt| select(evt),
                        ondoubleclick: open_attributes,
                        onmouseenter: move |evt| enter(evt),
                        onmouseleave: move |evt| leave(evt),
                    }
                    {grips(&drawing.points[..1])}
                }
            }
        }
        DrawingKind::TrendLine => {
            let start = map.to_pixel(drawing.points[0]);
            let end = map.to_pixel(drawing.points[1]);
            rsx! {
                g {
                    line {
                        x1: "{start.0}",
                        y1: "{start.1}",
                        x2: "{end.0}",
                        y2: "{end.1}",
                        stroke,
                        stroke_width,
                        stroke_dasharray: dash,
                        fill: "none",
                        style: "cursor: pointer;",
                        onclick: move |evt| select(evt),
                        ondoubleclick: open_attributes,
                        onmouseenter: move |evt| enter(evt),
                        onmouseleave: move |evt| leave(evt),
                    }
                    {grips(&drawing.points)}
                }
            }
        }
        DrawingKind::Rectangle => {
            let start = map.to_pixel(drawing.points[0]);
            let end = map.to_pixel(drawing.points[1]);
            // Normalized so width/height are non-negative whichever corner
            // was placed first.
            let x = start.0.min(end.0);
            let y = start.1.min(end.1);
            let width = (end.0 - start.0).abs();
            let height = (end.1 - start.1).abs();
            rsx! {
                g {
                    rect {
                        x: "{x}",
                        y: "{y}",
                        width: "{width}",
                        height: "{height}",
                        stroke,
                        stroke_width,
                        stroke_dasharray: dash,
                        fill: "none",
                        style: "cursor: pointer;",
                        onclick: move |evt| select(evt),
                        ondoubleclick: open_attributes,
                        onmouseenter: move |evt| enter(evt),
                        onmouseleave: move |evt| leave(evt),
                    }
                    {grips(&drawing.points)}
                }
            }
        }
        DrawingKind::Ellipse => {
            let start = map.to_pixel(drawing.points[0]);
            let end = map.to_pixel(drawing.points[1]);
            rsx! {
                g {
                    ellipse {
                        cx: "{(start.0 + end.0) / 2.0}",
                        cy: "{(start.1 + end.1) / 2.0}",
                        rx: "{(end.0 - start.0).abs() / 2.0}",
                        ry: "{(end.1 - start.1).abs() / 2.0}",
                        stroke,
                        stroke_width,
                        stroke_dasharray: dash,
                        fill: "none",
                        style: "cursor: pointer;",
                        onclick: move |evt| select(evt),
                        ondoubleclick: open_attributes,
                        onmouseenter: move |evt| enter(evt),
                        onmouseleave: move |evt| leave(evt),
                    }
                    {grips(&drawing.points)}
                }
            }
        }
        DrawingKind::Text => {
            let pos = map.to_pixel(drawing.points[0]);
            let content = drawing
                .attributes
                .text
                .clone()
                .unwrap_or_else(|| "Text".to_string());
            let font_size = drawing.font_size();
            rsx! {
                g {
                    text {
                        x: "{pos.0}",
                        y: "{pos.1}",
                        fill: stroke,
                        font_size: "{font_size}",
                        style: "cursor: pointer;",
                        onclick: move |evt| select(evt),
                        ondoubleclick: open_attributes,
                        onmouseenter: move |evt| enter(evt),
                        onmouseleave: move |evt| leave(evt),
                        "{content}"
                    }
                    {grips(&drawing.points[..1])}
                }
            }
        }
        // The select pseudo-kind owns no geometry and is never committed.
        DrawingKind::Select => rsx! {},
    }
}

#[component]
fn GripBox(
    x: f64,
    y: f64,
    drawing_id: DrawingId,
    point_index: usize,
    drag: Signal<Option<GripDrag>>,
) -> Element {
    rsx! {
        rect {
            x: "{x - GRIP_SIZE / 2.0}",
            y: "{y - GRIP_SIZE / 2.0}",
            width: "{GRIP_SIZE}",
            height: "{GRIP_SIZE}",
            fill: "#ffffff",
            stroke: "#000000",
            stroke_width: 1,
            style: "cursor: pointer;",
            onmousedown: move |evt| {
                // Starting a drag must not bubble into the shape's click
                // handler and toggle the selection.
                evt.stop_propagation();
                drag.set(Some(GripDrag::new(drawing_id, point_index)));
            },
        }
    }
}

/// Resolves the stroke to actually draw: a stroke left over from before the
/// creation machine reset (tool switched or toggled off) is discarded.
fn preview_when_pending(pending: bool, stroke: Option<PreviewStroke>) -> Option<PreviewStroke> {
    if pending { stroke } else { None }
}

/// Dashed pixel-space rubber band shown while a two-click creation is
/// pending. Inert to the pointer so it never swallows the committing click.
#[component]
fn CreationPreview(stroke: PreviewStroke) -> Element {
    let (sx, sy) = stroke.start;
    let (cx, cy) = stroke.current;
    match stroke.kind {
        DrawingKind::TrendLine => rsx! {
            line {
                x1: "{sx}",
                y1: "{sy}",
                x2: "{cx}",
                y2: "{cy}",
                stroke: "#ffffff",
                stroke_width: 2,
                stroke_dasharray: "5,5",
                fill: "none",
                pointer_events: "none",
            }
        },
        DrawingKind::Rectangle => rsx! {
            rect {
                x: "{sx.min(cx)}",
                y: "{sy.min(cy)}",
                width: "{(cx - sx).abs()}",
                height: "{(cy - sy).abs()}",
                stroke: "#ffffff",
                stroke_width: 2,
                stroke_dasharray: "5,5",
                fill: "none",
                pointer_events: "none",
            }
        },
        DrawingKind::Ellipse => rsx! {
            ellipse {
                cx: "{(sx + cx) / 2.0}",
                cy: "{(sy + cy) / 2.0}",
                rx: "{(cx - sx).abs() / 2.0}",
                ry: "{(cy - sy).abs() / 2.0}",
                stroke: "#ffffff",
                stroke_width: 2,
                stroke_dasharray: "5,5",
                fill: "none",
                pointer_events: "none",
            }
        },
        // Single-click kinds and the select pseudo-kind never have a
        // pending stroke to preview.
        DrawingKind::HorizontalLine | DrawingKind::Text | DrawingKind::Select => rsx! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::drawings::creation::CreationState;

    fn stroke() -> PreviewStroke {
        PreviewStroke {
            kind: DrawingKind::Rectangle,
            start: (10.0, 10.0),
            current: (50.0, 40.0),
        }
    }

    #[test]
    fn stroke_survives_while_creation_is_pending() {
        assert_eq!(preview_when_pending(true, Some(stroke())), Some(stroke()));
    }

    #[test]
    fn tool_switch_hides_a_leftover_stroke() {
        let mut creation = CreationState::new();
        creation.select_tool(Some(DrawingKind::Rectangle));
        creation.handle_click(DomainPoint { x: 1.0, y: 2.0 });
        assert!(creation.is_pending());

        // Switching tools resets the machine; the stroke captured for the
        // abandoned rectangle must no longer render.
        creation.select_tool(Some(DrawingKind::Select));
        assert_eq!(preview_when_pending(creation.is_pending(), Some(stroke())), None);

        // Same when the tool is toggled off entirely.
        creation.select_tool(None);
        assert_eq!(preview_when_pending(creation.is_pending(), Some(stroke())), None);
    }

    #[test]
    fn no_stroke_renders_nothing_even_when_pending() {
        assert_eq!(preview_when_pending(true, None), None);
    }
}
