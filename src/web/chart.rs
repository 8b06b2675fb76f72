use std::fmt::Write;

use crate::color::generate_palette;
use crate::view::ChartSpec;

use super::pages::escape;

// ---------------------------------------------------------------------------
// Line chart → inline SVG
// ---------------------------------------------------------------------------

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 56.0;
/// Wide right margin: the legend lives in it.
const MARGIN_RIGHT: f64 = 150.0;
const MARGIN_TOP: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 40.0;

const PLOT_W: f64 = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
const PLOT_H: f64 = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

/// Render a [`ChartSpec`] as a self-contained SVG fragment.
///
/// Every series is drawn over the spec's shared x labels; cells with no
/// numeric reading (text, empty) simply contribute no vertex, so a series
/// with a gap still draws as one line through its numeric points. A spec
/// with no series renders as an empty frame.
pub fn chart_svg(spec: &ChartSpec) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" \
         width=\"{WIDTH}\" height=\"{HEIGHT}\" role=\"img\">"
    );

    if let Some(title) = &spec.title {
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"26\" text-anchor=\"middle\" font-size=\"16\" \
             fill=\"#1f2937\">{}</text>",
            MARGIN_LEFT + PLOT_W / 2.0,
            escape(title)
        );
    }

    // Axis frame
    let _ = write!(
        svg,
        "<line x1=\"{l:.1}\" y1=\"{t:.1}\" x2=\"{l:.1}\" y2=\"{b:.1}\" stroke=\"#6b7280\"/>\
         <line x1=\"{l:.1}\" y1=\"{b:.1}\" x2=\"{r:.1}\" y2=\"{b:.1}\" stroke=\"#6b7280\"/>",
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = MARGIN_TOP + PLOT_H,
        r = MARGIN_LEFT + PLOT_W,
    );

    let x_labels: &[String] = spec.series.first().map(|s| s.x.as_slice()).unwrap_or(&[]);
    for (i, label) in x_labels.iter().enumerate() {
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\" \
             fill=\"#374151\">{}</text>",
            x_position(i, x_labels.len()),
            MARGIN_TOP + PLOT_H + 18.0,
            escape(label)
        );
    }

    if let Some((min, max)) = numeric_extent(spec) {
        let (ticks, step) = nice_ticks(min, max, 5);
        for tick in &ticks {
            let y = y_position(*tick, min, max);
            let _ = write!(
                svg,
                "<line x1=\"{l:.1}\" y1=\"{y:.1}\" x2=\"{r:.1}\" y2=\"{y:.1}\" \
                 stroke=\"#e5e7eb\"/>\
                 <text x=\"{lx:.1}\" y=\"{ty:.1}\" text-anchor=\"end\" font-size=\"11\" \
                 fill=\"#374151\">{label}</text>",
                l = MARGIN_LEFT,
                r = MARGIN_LEFT + PLOT_W,
                lx = MARGIN_LEFT - 8.0,
                ty = y + 4.0,
                label = tick_label(*tick, step),
            );
        }

        let colors = generate_palette(spec.series.len());
        for (series, color) in spec.series.iter().zip(&colors) {
            let points: Vec<(f64, f64)> = series
                .y
                .iter()
                .enumerate()
                .filter_map(|(i, cell)| {
                    cell.as_f64()
                        .map(|v| (x_position(i, series.x.len()), y_position(v, min, max)))
                })
                .collect();

            if points.len() > 1 {
                let path: Vec<String> = points
                    .iter()
                    .map(|(x, y)| format!("{x:.1},{y:.1}"))
                    .collect();
                let _ = write!(
                    svg,
                    "<polyline points=\"{}\" fill=\"none\" stroke=\"{color}\" \
                     stroke-width=\"2\"/>",
                    path.join(" ")
                );
            }
            // A lone numeric point has no line to belong to; mark it.
            if points.len() == 1 {
                let _ = write!(
                    svg,
                    "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\" fill=\"{color}\"/>",
                    points[0].0, points[0].1
                );
            }
        }

        // Legend, one row per series, in the right gutter.
        let legend_x = MARGIN_LEFT + PLOT_W + 16.0;
        for (i, (series, color)) in spec.series.iter().zip(&colors).enumerate() {
            let y = MARGIN_TOP + 8.0 + i as f64 * 18.0;
            let _ = write!(
                svg,
                "<line x1=\"{legend_x:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" \
                 stroke=\"{color}\" stroke-width=\"2\"/>\
                 <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" fill=\"#374151\">{}</text>",
                legend_x + 18.0,
                legend_x + 24.0,
                y + 4.0,
                escape(&series.name)
            );
        }
    }

    svg.push_str("</svg>");
    svg
}

fn x_position(i: usize, count: usize) -> f64 {
    if count > 1 {
        MARGIN_LEFT + (i as f64 / (count - 1) as f64) * PLOT_W
    } else {
        MARGIN_LEFT + PLOT_W / 2.0
    }
}

fn y_position(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    MARGIN_TOP + PLOT_H - ((value - min) / range) * PLOT_H
}

/// Min/max over every numeric cell of every series, padded so lines do not
/// sit on the frame. `None` when nothing numeric is plottable.
fn numeric_extent(spec: &ChartSpec) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for series in &spec.series {
        for cell in &series.y {
            if let Some(v) = cell.as_f64() {
                min = min.min(v);
                max = max.max(v);
            }
        }
    }
    if min > max {
        return None;
    }
    if min == max {
        // Flat data still needs a visible band.
        return Some((min - 1.0, max + 1.0));
    }
    let pad = (max - min) * 0.05;
    Some((min - pad, max + pad))
}

/// Compute "nice" tick values for an axis range.
fn nice_ticks(min: f64, max: f64, target_count: usize) -> (Vec<f64>, f64) {
    let range = max - min;
    if range.abs() < 1e-10 || target_count == 0 {
        return (Vec::new(), 1.0);
    }
    let rough_step = range / target_count as f64;
    let mag = 10.0f64.powf(rough_step.log10().floor());
    let normalized = rough_step / mag;
    let nice_step = if normalized < 1.5 {
        mag
    } else if normalized < 3.5 {
        mag * 2.0
    } else if normalized < 7.5 {
        mag * 5.0
    } else {
        mag * 10.0
    };
    let start = (min / nice_step).ceil() * nice_step;
    let mut ticks = Vec::new();
    let mut v = start;
    while v <= max + nice_step * 0.01 {
        if v >= min - nice_step * 0.01 {
            ticks.push(v);
        }
        v += nice_step;
    }
    (ticks, nice_step)
}

/// Format a tick value with appropriate decimal places.
fn tick_label(v: f64, step: f64) -> String {
    if step >= 0.95 {
        format!("{v:.0}")
    } else if step >= 0.095 {
        format!("{v:.1}")
    } else if step >= 0.0095 {
        format!("{v:.2}")
    } else {
        format!("{v:.3}")
    }
}
