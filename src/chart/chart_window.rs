//! Top-level chart view: symbol selection, data loading, the price and
//! volume panes and the drawing tools.

use chrono::Utc;
use dioxus::prelude::*;

use crate::chart::controls::DrawingToolbar;
use crate::chart::coords::{CHART_MARGIN, ChartMapper};
use crate::chart::drawings::creation::CreationState;
use crate::chart::drawings::model::DrawingId;
use crate::chart::drawings::store::DrawingState;
use crate::chart::drawings::{AttributesModal, DrawingLayer};
use crate::chart::plot;
use crate::chart::range_slider::RangeSlider;
use crate::data::api::AlphaVantageClient;
use crate::data::cache::SeriesCache;
use crate::data::transform::initial_display_range;
use crate::data::{OhlcBar, load_ratio_series};

const PRICE_WIDTH: u32 = 960;
const PRICE_HEIGHT: u32 = 480;
const VOLUME_HEIGHT: u32 = 140;

static CSS_STYLE: Asset = asset!("assets/app.css");

#[component]
pub fn ChartWindow() -> Element {
    let mut base_input = use_signal(|| "GLD".to_string());
    let mut quote_input = use_signal(|| "SLV".to_string());
    let mut symbols = use_signal(|| ("GLD".to_string(), "SLV".to_string()));
    let mut show_volume = use_signal(|| true);
    let mut display_range = use_signal(|| (0.0_f64, 100.0_f64));

    let mut store = use_signal(DrawingState::default);
    use_context_provider(|| store);
    let creation = use_signal(CreationState::default);
    let mut editing = use_signal(|| None::<DrawingId>);

    let series_resource = use_resource(move || {
        let (base, quote) = symbols.read().clone();
        async move {
            let client = AlphaVantageClient::new();
            let cache = SeriesCache::open_default(Utc::now().date_naive());
            load_ratio_series(&client, cache.as_ref(), &base, &quote).await
        }
    });

    // Snap the window to the most recent bars when a new series lands.
    use_effect(move || {
        if let Some(Ok(series)) = &*series_resource.read() {
            display_range.set(initial_display_range(series.len()));
        }
    });

    let visible = use_memo(move || {
        let (start, end) = *display_range.read();
        match &*series_resource.read() {
            Some(Ok(series)) => {
                let len = series.len() as f64;
                let from = ((start / 100.0) * len).floor() as usize;
                let to = (((end / 100.0) * len).ceil() as usize).min(series.len());
                series[from.min(to)..to].to_vec()
            }
            _ => Vec::new(),
        }
    });

    let x_domain = use_memo(move || {
        let bars = visible.read();
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => (first.timestamp_ms(), last.timestamp_ms()),
            _ => (0.0, 1.0),
        }
    });

    let y_domain = use_memo(move || {
        let bars = visible.read();
        let low = bars.iter().map(|bar| bar.low).fold(f64::INFINITY, f64::min);
        let high = bars
            .iter()
            .map(|bar| bar.high)
            .fold(f64::NEG_INFINITY, f64::max);
        if low.is_finite() && high.is_finite() {
            (low * 0.95, high * 1.05)
        } else {
            (0.0, 1.0)
        }
    });

    let editing_drawing = use_memo(move || {
        let id = (*editing.read())?;
        store.read().get(id).cloned()
    });

    let pair_label = use_memo(move || {
        let (base, quote) = symbols.read().clone();
        format!("{base} / {quote}")
    });

    rsx! {
        document::Stylesheet { href: CSS_STYLE }

        div { class: "chart-window",
            div { class: "controls",
                div { class: "control-group",
                    label { "Base" }
                    input {
                        r#type: "text",
                        value: "{base_input}",
                        oninput: move |evt: Event<FormData>| base_input.set(evt.value().to_uppercase()),
                    }
                    label { "Quote" }
                    input {
                        r#type: "text",
                        value: "{quote_input}",
                        oninput: move |evt: Event<FormData>| quote_input.set(evt.value().to_uppercase()),
                    }
                    button {
                        onclick: move |_| {
                            let base = base_input.peek().trim().to_string();
                            let quote = quote_input.peek().trim().to_string();
                            if !base.is_empty() && !quote.is_empty() {
                                symbols.set((base, quote));
                            }
                        },
                        "Load"
                    }
                }
                div { class: "control-group",
                    label { "Volume" }
                    input {
                        r#type: "checkbox",
                        checked: "{show_volume}",
                        oninput: move |evt: Event<FormData>| show_volume.set(evt.checked()),
                    }
                }
                DrawingToolbar { creation }
            }

            h2 { class: "pair-title", "{pair_label}" }

            div { class: "status-message",
                {
                    match &*series_resource.read() {
                        Some(Ok(series)) => rsx! {
                            p { class: "loading-message", "{series.len()} bars loaded." }
                        },
                        Some(Err(e)) => rsx! {
                            p { class: "error-message", "Error: {e}" }
                        },
                        None => rsx! {
                            p { class: "loading-message", "Loading price data..." }
                        },
                    }
                }
            }

            PricePane {
                data: visible,
                x_domain,
                y_domain,
                creation,
                on_open_attributes: move |id| editing.set(Some(id)),
            }

            if *show_volume.read() {
                VolumePane { data: visible, x_domain }
            }

            RangeSlider { range: display_range }

            if let Some(drawing) = editing_drawing() {
                AttributesModal {
                    drawing,
                    on_save: move |attributes| {
                        let id = *editing.peek();
                        if let Some(id) = id {
                            store.write().update_drawing(id, attributes);
                        }
                        editing.set(None);
                    },
                    on_cancel: move |_| editing.set(None),
                }
            }
        }
    }
}

/// Candlestick pane with the drawing overlay stacked on top. The bitmap and
/// the overlay share one [`ChartMapper`] so they stay aligned.
#[component]
fn PricePane(
    data: ReadSignal<Vec<OhlcBar>>,
    x_domain: ReadSignal<(f64, f64)>,
    y_domain: ReadSignal<(f64, f64)>,
    creation: Signal<CreationState>,
    on_open_attributes: EventHandler<DrawingId>,
) -> Element {
    let mut image_src = use_signal(String::new);

    let mapper = use_memo(move || {
        ChartMapper::new(
            PRICE_WIDTH as f64,
            PRICE_HEIGHT as f64,
            x_domain(),
            y_domain(),
            CHART_MARGIN,
        )
    });

    use_effect(move || {
        match plot::render_price_chart(&data.read(), PRICE_WIDTH, PRICE_HEIGHT, x_domain(), y_domain())
        {
            Ok(src) => image_src.set(src),
            Err(e) => log::error!("price chart render failed: {e:#}"),
        }
    });

    rsx! {
        div {
            class: "chart-pane",
            style: "position: relative; width: {PRICE_WIDTH}px; height: {PRICE_HEIGHT}px;",
            img {
                style: "user-select: none; -webkit-user-select: none;",
                src: "{image_src}",
                width: "{PRICE_WIDTH}",
                height: "{PRICE_HEIGHT}",
            }
            DrawingLayer { mapper, creation, on_open_attributes }
        }
    }
}

/// Volume histogram below the price pane. No overlay: drawings live on the
/// price pane only.
#[component]
fn VolumePane(data: ReadSignal<Vec<OhlcBar>>, x_domain: ReadSignal<(f64, f64)>) -> Element {
    let mut image_src = use_signal(String::new);

    use_effect(move || {
        match plot::render_volume_chart(&data.read(), PRICE_WIDTH, VOLUME_HEIGHT, x_domain()) {
            Ok(src) => image_src.set(src),
            Err(e) => log::error!("volume chart render failed: {e:#}"),
        }
    });

    rsx! {
        div {
            class: "chart-pane",
            style: "position: relative; width: {PRICE_WIDTH}px; height: {VOLUME_HEIGHT}px;",
            img {
                style: "user-select: none; -webkit-user-select: none;",
                src: "{image_src}",
                width: "{PRICE_WIDTH}",
                height: "{VOLUME_HEIGHT}",
            }
        }
    }
}
