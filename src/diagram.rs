//! Pure layout computation for the P-h diagram.
//!
//! [`Layout::compute`] turns a saturation dome plus zero to two tagged
//! cycle series into pixel-space geometry: axis ticks, the dome polygon,
//! closed cycle paths and optional vertex markers. It owns every
//! correctness-sensitive step of rendering — guards, the domain union
//! across all series, unit conversion and scale construction — so the SVG
//! view layer only has to echo coordinates it is given. The same inputs
//! always produce the same layout, making re-renders idempotent.

use crate::scale::{LinearScale, LogScale};
use crate::{CyclePoint, SaturationDome};

/// Source data is in base SI units (J/kg, Pa); the diagram displays
/// kJ/kg and kPa.
const UNIT_DIVISOR: f64 = 1000.0;

/// Plot margins in pixels, leaving room for axis labels.
pub const MARGIN_TOP: f64 = 20.0;
pub const MARGIN_RIGHT: f64 = 20.0;
pub const MARGIN_BOTTOM: f64 = 50.0;
pub const MARGIN_LEFT: f64 = 60.0;

const X_TICK_COUNT: usize = 8;

/// Stroke style for a cycle path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// One cycle series handed to the layout, already tagged with how it
/// should be drawn.
#[derive(Debug, Clone, Copy)]
pub struct CycleTrace<'a> {
    pub points: &'a [CyclePoint],
    pub style: LineStyle,
    pub color: &'static str,
}

/// A positioned axis tick with its label text.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel offset along the axis, inside the margins.
    pub pos: f64,
    pub label: String,
}

/// A cycle path in pixel space. The first point is repeated at the end so
/// the loop closes.
#[derive(Debug, Clone, PartialEq)]
pub struct TracePath {
    pub style: LineStyle,
    pub color: &'static str,
    pub points: Vec<(f64, f64)>,
}

/// Fully laid-out diagram geometry in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub outer_width: f64,
    pub outer_height: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub x: LinearScale,
    pub y: LogScale,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    /// Dome polygon vertices in the order the solver supplied them.
    pub dome: Vec<(f64, f64)>,
    pub cycles: Vec<TracePath>,
    /// Cycle vertex markers, present only when a single series is shown.
    pub markers: Vec<(f64, f64)>,
}

impl Layout {
    /// Compute the layout, or `None` when there is nothing valid to draw
    /// (missing/empty dome, degenerate canvas).
    pub fn compute(
        dome: &SaturationDome,
        cycles: &[CycleTrace<'_>],
        outer_width: f64,
        outer_height: f64,
    ) -> Option<Layout> {
        let inner_width = outer_width - MARGIN_LEFT - MARGIN_RIGHT;
        let inner_height = outer_height - MARGIN_TOP - MARGIN_BOTTOM;
        if dome.is_empty() || inner_width <= 0.0 || inner_height <= 0.0 {
            return None;
        }

        // Dome pairs with non-finite coordinates cannot be placed; drop
        // them before they poison the domain.
        let dome_pts: Vec<(f64, f64)> = dome
            .h
            .iter()
            .zip(dome.p.iter())
            .filter(|(h, p)| h.is_finite() && p.is_finite())
            .map(|(h, p)| (h / UNIT_DIVISOR, p / UNIT_DIVISOR))
            .collect();
        if dome_pts.is_empty() {
            return None;
        }

        let filtered: Vec<(&CycleTrace<'_>, Vec<(f64, f64)>)> = cycles
            .iter()
            .map(|trace| {
                let pts: Vec<(f64, f64)> = trace
                    .points
                    .iter()
                    .filter(|pt| pt.h.is_finite() && pt.p.is_finite())
                    .map(|pt| (pt.h / UNIT_DIVISOR, pt.p / UNIT_DIVISOR))
                    .collect();
                (trace, pts)
            })
            .filter(|(_, pts)| !pts.is_empty())
            .collect();

        // The domain is the union over the dome and every cycle point;
        // taking the dome alone clips cycles that leave it.
        let all = || {
            dome_pts
                .iter()
                .chain(filtered.iter().flat_map(|(_, pts)| pts.iter()))
        };
        let h_domain = extent(all().map(|(h, _)| *h))?;
        let p_domain = extent(all().map(|(_, p)| *p))?;

        let x = LinearScale::new(h_domain, (0.0, inner_width));
        let y = LogScale::new(p_domain, (inner_height, 0.0));

        let step = x.tick_step(X_TICK_COUNT);
        let x_ticks = x
            .ticks(X_TICK_COUNT)
            .into_iter()
            .map(|v| Tick {
                pos: x.scale(v),
                label: fmt_tick(v, step),
            })
            .collect();
        let y_ticks = y
            .ticks()
            .into_iter()
            .map(|v| Tick {
                pos: y.scale(v),
                label: format!("{:.0}", v),
            })
            .collect();

        let dome_px = dome_pts
            .iter()
            .map(|&(h, p)| (x.scale(h), y.scale(p)))
            .collect();

        let cycle_paths: Vec<TracePath> = filtered
            .iter()
            .map(|(trace, pts)| {
                let mut points: Vec<(f64, f64)> =
                    pts.iter().map(|&(h, p)| (x.scale(h), y.scale(p))).collect();
                if let Some(&first) = points.first() {
                    points.push(first);
                }
                TracePath {
                    style: trace.style,
                    color: trace.color,
                    points,
                }
            })
            .collect();

        // Vertex markers help read off state points, but with two
        // overlaid cycles they turn into clutter.
        let markers = if cycle_paths.len() == 1 {
            let path = &cycle_paths[0];
            path.points[..path.points.len() - 1].to_vec()
        } else {
            Vec::new()
        };

        Some(Layout {
            outer_width,
            outer_height,
            inner_width,
            inner_height,
            x,
            y,
            x_ticks,
            y_ticks,
            dome: dome_px,
            cycles: cycle_paths,
            markers,
        })
    }
}

/// Min/max over finite values, `None` when no value survives.
fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    (min <= max).then_some((min, max))
}

/// Format a tick label with just enough precision for its step size.
fn fmt_tick(v: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

/// Build SVG path data from pixel points, optionally closing the path.
pub fn svg_path(points: &[(f64, f64)], close: bool) -> String {
    let mut d = String::new();
    for (i, (px, py)) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{}{:.2},{:.2}", cmd, px, py));
    }
    if close && !points.is_empty() {
        d.push('Z');
    }
    d
}
