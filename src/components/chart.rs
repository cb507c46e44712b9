//! Realtime Chart Component
//!
//! Scrolling time-series chart on HTML5 Canvas. A chart is built from a
//! default configuration tree (60 s visible window, 2 s refresh, 1 s
//! ingestion delay, non-zero-based Y axis, top legend) with caller overrides
//! merged in recursively.

use leptos::*;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::GlobalState;

/// Chart colors for different series
const SERIES_COLORS: [&str; 6] = [
    "#FF9800", // Orange (primary)
    "#4CAF50", // Green
    "#2196F3", // Blue
    "#9C27B0", // Purple
    "#F44336", // Red
    "#00BCD4", // Cyan
];

/// Default configuration for a scrolling realtime line chart.
pub fn realtime_chart_defaults() -> Value {
    json!({
        "type": "line",
        "options": {
            "responsive": true,
            "scales": {
                "x": {
                    "type": "realtime",
                    "realtime": {
                        "duration": 60_000,
                        "refresh": 2_000,
                        "delay": 1_000
                    }
                },
                "y": {
                    "beginAtZero": false
                }
            },
            "plugins": {
                "legend": {
                    "display": true,
                    "position": "top"
                },
                "tooltip": {
                    "mode": "index",
                    "intersect": false
                }
            }
        }
    })
}

/// Recursively merge `source` over `target`.
///
/// When both sides hold objects the merge descends per key; any other pair
/// is decided by `source` outright.
pub fn deep_merge(target: &Value, source: &Value) -> Value {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            let mut merged = target_map.clone();
            for (key, source_value) in source_map {
                let value = match target_map.get(key) {
                    Some(target_value) => deep_merge(target_value, source_value),
                    None => source_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        _ => source.clone(),
    }
}

/// Options extracted from a merged chart configuration tree.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    pub duration_ms: i64,
    pub refresh_ms: u32,
    pub delay_ms: i64,
    pub begin_at_zero: bool,
    pub legend: bool,
}

impl ChartOptions {
    pub fn from_config(config: &Value) -> Self {
        let defaults = Self {
            duration_ms: 60_000,
            refresh_ms: 2_000,
            delay_ms: 1_000,
            begin_at_zero: false,
            legend: true,
        };

        Self {
            duration_ms: config
                .pointer("/options/scales/x/realtime/duration")
                .and_then(Value::as_i64)
                .unwrap_or(defaults.duration_ms),
            refresh_ms: config
                .pointer("/options/scales/x/realtime/refresh")
                .and_then(Value::as_u64)
                .map(|v| v as u32)
                .unwrap_or(defaults.refresh_ms),
            delay_ms: config
                .pointer("/options/scales/x/realtime/delay")
                .and_then(Value::as_i64)
                .unwrap_or(defaults.delay_ms),
            begin_at_zero: config
                .pointer("/options/scales/y/beginAtZero")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.begin_at_zero),
            legend: config
                .pointer("/options/plugins/legend/display")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.legend),
        }
    }
}

struct Series {
    label: String,
    points: VecDeque<(i64, f64)>,
}

struct ChartInner {
    canvas: HtmlCanvasElement,
    options: ChartOptions,
    series: RefCell<Vec<Series>>,
    refresh: RefCell<Option<gloo_timers::callback::Interval>>,
}

/// A chart bound to a canvas that scrolls a fixed time window as points
/// arrive.
#[derive(Clone)]
pub struct RealtimeChart {
    inner: Rc<ChartInner>,
}

/// Build a realtime chart from caller overrides merged over
/// [`realtime_chart_defaults`].
pub fn create_realtime_chart(canvas: HtmlCanvasElement, config: Value) -> RealtimeChart {
    let merged = deep_merge(&realtime_chart_defaults(), &config);
    RealtimeChart::new(canvas, ChartOptions::from_config(&merged))
}

impl RealtimeChart {
    pub fn new(canvas: HtmlCanvasElement, options: ChartOptions) -> Self {
        Self {
            inner: Rc::new(ChartInner {
                canvas,
                options,
                series: RefCell::new(Vec::new()),
                refresh: RefCell::new(None),
            }),
        }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.inner.options
    }

    /// Append a point; samples older than the visible window are pruned.
    pub fn push_point(&self, label: &str, timestamp_ms: i64, value: f64) {
        let horizon = chrono::Utc::now().timestamp_millis()
            - self.inner.options.duration_ms
            - self.inner.options.delay_ms;

        let mut series = self.inner.series.borrow_mut();
        let idx = match series.iter().position(|s| s.label == label) {
            Some(idx) => idx,
            None => {
                series.push(Series {
                    label: label.to_string(),
                    points: VecDeque::new(),
                });
                series.len() - 1
            }
        };
        let entry = &mut series[idx];

        entry.points.push_back((timestamp_ms, value));
        while entry.points.front().is_some_and(|(ts, _)| *ts < horizon) {
            entry.points.pop_front();
        }
    }

    /// Start the redraw cadence from the configured refresh interval.
    pub fn start(&self) {
        let chart = self.clone();
        let interval =
            gloo_timers::callback::Interval::new(self.inner.options.refresh_ms, move || {
                chart.draw();
            });
        *self.inner.refresh.borrow_mut() = Some(interval);
    }

    /// Stop redrawing; dropping the interval handle cancels it.
    pub fn stop(&self) {
        self.inner.refresh.borrow_mut().take();
    }

    /// Draw the currently visible window.
    pub fn draw(&self) {
        let canvas = &self.inner.canvas;
        let ctx = match canvas.get_context("2d") {
            Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => return,
            },
            _ => return,
        };

        let width = canvas.width() as f64;
        let height = canvas.height() as f64;

        let margin_left = 60.0;
        let margin_right = 20.0;
        let margin_top = if self.inner.options.legend { 40.0 } else { 20.0 };
        let margin_bottom = 40.0;

        let chart_width = width - margin_left - margin_right;
        let chart_height = height - margin_top - margin_bottom;

        // Visible window ends `delay` ms in the past so in-flight samples
        // don't draw a ragged edge.
        let window_end = chrono::Utc::now().timestamp_millis() - self.inner.options.delay_ms;
        let window_start = window_end - self.inner.options.duration_ms;

        // Clear canvas
        ctx.set_fill_style(&"#1f2937".into()); // gray-800
        ctx.fill_rect(0.0, 0.0, width, height);

        let series = self.inner.series.borrow();

        // Y range over visible points
        let mut y_min = if self.inner.options.begin_at_zero {
            0.0
        } else {
            f64::INFINITY
        };
        let mut y_max = f64::NEG_INFINITY;

        for s in series.iter() {
            for (ts, value) in s.points.iter() {
                if *ts >= window_start && *ts <= window_end {
                    y_min = y_min.min(*value);
                    y_max = y_max.max(*value);
                }
            }
        }

        if !y_min.is_finite() || !y_max.is_finite() {
            y_min = 0.0;
            y_max = 1.0;
        }

        let y_range = y_max - y_min;
        let y_padding = if y_range > 0.0 { y_range * 0.1 } else { 1.0 };
        y_min -= y_padding;
        y_max += y_padding;

        // Grid and y-axis labels
        ctx.set_stroke_style(&"#374151".into()); // gray-700
        ctx.set_line_width(1.0);

        for i in 0..=5 {
            let y = margin_top + (i as f64 / 5.0) * chart_height;
            ctx.begin_path();
            ctx.move_to(margin_left, y);
            ctx.line_to(width - margin_right, y);
            ctx.stroke();

            let value = y_max - (i as f64 / 5.0) * (y_max - y_min);
            ctx.set_fill_style(&"#9ca3af".into()); // gray-400
            ctx.set_font("12px sans-serif");
            let _ = ctx.fill_text(&format!("{value:.1}"), 5.0, y + 4.0);
        }

        // Series polylines
        let window_ms = (window_end - window_start) as f64;
        for (idx, s) in series.iter().enumerate() {
            let visible: Vec<&(i64, f64)> = s
                .points
                .iter()
                .filter(|(ts, _)| *ts >= window_start && *ts <= window_end)
                .collect();
            if visible.is_empty() {
                continue;
            }

            let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
            ctx.set_stroke_style(&color.into());
            ctx.set_line_width(2.0);
            ctx.begin_path();

            for (i, &&(ts, value)) in visible.iter().enumerate() {
                let x = margin_left + ((ts - window_start) as f64 / window_ms) * chart_width;
                let y = margin_top + ((y_max - value) / (y_max - y_min)) * chart_height;
                if i == 0 {
                    ctx.move_to(x, y);
                } else {
                    ctx.line_to(x, y);
                }
            }
            ctx.stroke();
        }

        // Legend across the top
        if self.inner.options.legend {
            ctx.set_font("12px sans-serif");
            let mut x = margin_left;
            for (idx, s) in series.iter().enumerate() {
                let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
                ctx.set_fill_style(&color.into());
                ctx.fill_rect(x, 12.0, 10.0, 10.0);
                ctx.set_fill_style(&"#d1d5db".into()); // gray-300
                let _ = ctx.fill_text(&s.label, x + 14.0, 21.0);
                x += 14.0 + (s.label.len() as f64) * 7.0 + 16.0;
            }
        }

        // X-axis time labels
        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("12px sans-serif");
        for i in 0..=4 {
            let ts = window_start + i * (window_end - window_start) / 4;
            let x = margin_left + (i as f64 / 4.0) * chart_width;
            let label = chrono::DateTime::from_timestamp_millis(ts)
                .map(|dt| {
                    dt.with_timezone(&chrono::Local)
                        .format("%H:%M:%S")
                        .to_string()
                })
                .unwrap_or_default();
            let _ = ctx.fill_text(&label, x - 24.0, height - 10.0);
        }

        if series.iter().all(|s| s.points.is_empty()) {
            ctx.set_fill_style(&"#6b7280".into());
            ctx.set_font("16px sans-serif");
            let _ = ctx.fill_text("Waiting for data...", width / 2.0 - 70.0, height / 2.0);
        }
    }
}

/// Realtime chart fed by the WebSocket register feed.
///
/// FLOAT32 registers become one series each, labelled `device register`. The
/// visible window follows the persisted display preference.
#[component]
pub fn RealtimePowerChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();
    let chart = store_value(None::<RealtimeChart>);

    let window_secs = state.prefs.get_untracked().chart_window_secs;

    create_effect(move |_| {
        let data = state.live_data.get();
        let stamp = state
            .last_update
            .get()
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

        if chart.with_value(|chart| chart.is_none()) {
            if let Some(canvas) = canvas_ref.get() {
                let overrides = json!({
                    "options": {
                        "scales": {
                            "x": {
                                "realtime": { "duration": i64::from(window_secs) * 1000 }
                            }
                        }
                    }
                });
                let built = create_realtime_chart((*canvas).clone(), overrides);
                built.start();
                chart.set_value(Some(built));
            }
        }

        chart.with_value(|chart| {
            if let Some(chart) = chart {
                for (device, readings) in data.iter() {
                    for reading in readings.values() {
                        if reading.data_type != "FLOAT32" {
                            continue;
                        }
                        if let Some(value) = reading.value.as_f64() {
                            let label = format!("{} {}", device, reading.name);
                            chart.push_point(&label, stamp, value);
                        }
                    }
                }
            }
        });
    });

    on_cleanup(move || {
        chart.with_value(|chart| {
            if let Some(chart) = chart {
                chart.stop();
            }
        });
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            height="400"
            class="w-full h-64 md:h-96 rounded-lg"
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deep_merge_preserves_unmentioned_keys() {
        let merged = deep_merge(&json!({"a": {"x": 1, "y": 2}}), &json!({"a": {"y": 3, "z": 4}}));
        assert_eq!(merged, json!({"a": {"x": 1, "y": 3, "z": 4}}));
    }

    #[test]
    fn deep_merge_override_wins_for_non_objects() {
        assert_eq!(deep_merge(&json!({"a": [1, 2]}), &json!({"a": [3]})), json!({"a": [3]}));
        assert_eq!(deep_merge(&json!(1), &json!({"a": 1})), json!({"a": 1}));
        assert_eq!(deep_merge(&json!({"a": 1}), &json!(7)), json!(7));
    }

    #[test]
    fn defaults_describe_a_scrolling_minute() {
        let options = ChartOptions::from_config(&realtime_chart_defaults());
        assert_eq!(
            options,
            ChartOptions {
                duration_ms: 60_000,
                refresh_ms: 2_000,
                delay_ms: 1_000,
                begin_at_zero: false,
                legend: true,
            }
        );
    }

    #[test]
    fn overrides_merge_over_defaults() {
        let overrides = json!({
            "options": {
                "scales": {
                    "x": { "realtime": { "duration": 30_000 } },
                    "y": { "beginAtZero": true }
                }
            }
        });
        let merged = deep_merge(&realtime_chart_defaults(), &overrides);
        let options = ChartOptions::from_config(&merged);

        assert_eq!(options.duration_ms, 30_000);
        assert!(options.begin_at_zero);
        // Untouched defaults survive the merge
        assert_eq!(options.refresh_ms, 2_000);
        assert_eq!(options.delay_ms, 1_000);
        assert!(options.legend);
    }
}
