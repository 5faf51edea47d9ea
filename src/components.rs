//! Pure Yew view components for the VaporCycle UI.
//!
//! This module contains stateless components that render based on props,
//! making them easy to test and reuse. The diagram view is a pure
//! projection of an already-computed [`Layout`]; all geometry decisions
//! live in `vaporcycle::diagram`.

use yew::prelude::*;

use vaporcycle::diagram::{svg_path, Layout, LineStyle, MARGIN_LEFT, MARGIN_TOP};
use vaporcycle::{CycleResults, CycleRole, Refrigerant};

use crate::config::{DIAGRAM_HEIGHT, DIAGRAM_WIDTH};

/// Slider row for a single cycle parameter, echoing the current value.
#[derive(Properties, PartialEq)]
pub struct ParameterSliderProps {
    pub label: AttrValue,
    pub unit: AttrValue,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub oninput: Callback<InputEvent>,
}

#[function_component(ParameterSlider)]
pub fn parameter_slider(props: &ParameterSliderProps) -> Html {
    html! {
        <div class="form-group slider-group">
            <label>
                { props.label.clone() }{ ": " }
                <strong>{ format!("{:.1} {}", props.value, props.unit) }</strong>
            </label>
            <input type="range"
                class="slider"
                min={props.min.to_string()}
                max={props.max.to_string()}
                step={props.step.to_string()}
                value={props.value.to_string()}
                oninput={props.oninput.clone()}
            />
        </div>
    }
}

/// Refrigerant selector over the fixed enumerated set.
#[derive(Properties, PartialEq)]
pub struct RefrigerantSelectProps {
    pub value: Refrigerant,
    pub onchange: Callback<Event>,
}

#[function_component(RefrigerantSelect)]
pub fn refrigerant_select(props: &RefrigerantSelectProps) -> Html {
    html! {
        <div class="form-group">
            <label>{ "Refrigerant:" }</label>
            <select onchange={props.onchange.clone()}>
                { Refrigerant::ALL.iter().map(|r| html! {
                    <option value={r.id()} selected={*r == props.value}>
                        { r.label() }
                    </option>
                }).collect::<Html>() }
            </select>
        </div>
    }
}

/// Render the laid-out P-h diagram as SVG.
///
/// With no layout (no results yet, or the guard declined to draw) an empty
/// canvas of the same size is emitted so the page does not reflow.
pub fn ph_diagram(layout: Option<&Layout>) -> Html {
    let Some(l) = layout else {
        return html! {
            <svg class="ph-diagram"
                width={DIAGRAM_WIDTH.to_string()}
                height={DIAGRAM_HEIGHT.to_string()}
            />
        };
    };

    let dasharray = |style: LineStyle| match style {
        LineStyle::Dashed => "5,5",
        LineStyle::Solid => "none",
    };

    html! {
        <svg class="ph-diagram"
            width={l.outer_width.to_string()}
            height={l.outer_height.to_string()}
        >
            <g transform={format!("translate({},{})", MARGIN_LEFT, MARGIN_TOP)}>
                // Axes with ticks and labels sit behind everything else.
                <line x1="0" y1={l.inner_height.to_string()}
                    x2={l.inner_width.to_string()} y2={l.inner_height.to_string()}
                    stroke="black" />
                { l.x_ticks.iter().map(|t| html! {
                    <g>
                        <line x1={t.pos.to_string()} y1={l.inner_height.to_string()}
                            x2={t.pos.to_string()} y2={(l.inner_height + 6.0).to_string()}
                            stroke="black" />
                        <text x={t.pos.to_string()} y={(l.inner_height + 18.0).to_string()}
                            text-anchor="middle" font-size="10">
                            { t.label.clone() }
                        </text>
                    </g>
                }).collect::<Html>() }
                <text x={(l.inner_width / 2.0).to_string()}
                    y={(l.inner_height + 40.0).to_string()}
                    text-anchor="middle">
                    { "Enthalpy (h) [kJ/kg]" }
                </text>

                <line x1="0" y1="0" x2="0" y2={l.inner_height.to_string()} stroke="black" />
                { l.y_ticks.iter().map(|t| html! {
                    <g>
                        <line x1="-6" y1={t.pos.to_string()} x2="0" y2={t.pos.to_string()}
                            stroke="black" />
                        <text x="-9" y={(t.pos + 3.0).to_string()}
                            text-anchor="end" font-size="10">
                            { t.label.clone() }
                        </text>
                    </g>
                }).collect::<Html>() }
                <text transform="rotate(-90)"
                    x={(-l.inner_height / 2.0).to_string()} y="-45"
                    text-anchor="middle">
                    { "Pressure (P) [kPa]" }
                </text>

                // Saturation dome as a closed, semi-transparent region.
                <path d={svg_path(&l.dome, true)}
                    fill="lightblue" fill-opacity="0.3"
                    stroke="steelblue" stroke-width="1.5" />

                // Cycle paths, already closed by the layout.
                { l.cycles.iter().map(|c| html! {
                    <path d={svg_path(&c.points, false)}
                        fill="none"
                        stroke={c.color}
                        stroke-width="2"
                        stroke-dasharray={dasharray(c.style)} />
                }).collect::<Html>() }

                // State-point markers (single bare cycle only).
                { l.markers.iter().map(|(mx, my)| html! {
                    <circle cx={mx.to_string()} cy={my.to_string()} r="3" fill="red" />
                }).collect::<Html>() }
            </g>
        </svg>
    }
}

/// Scalar performance summary for the results panel.
pub fn render_performance(results: &CycleResults) -> Html {
    let ideal = results.cycle(CycleRole::Ideal);
    let real = results.cycle(CycleRole::Real);

    match (ideal, real) {
        (Some(ideal), Some(real)) => html! {
            <div>
                <h4>{ "Cycle Comparison" }</h4>
                <p><strong>{ "COP (ideal): " }</strong>{ format!("{:.3}", ideal.performance.cop) }</p>
                <p><strong>{ "COP (real): " }</strong>{ format!("{:.3}", real.performance.cop) }</p>
            </div>
        },
        (None, Some(single)) | (Some(single), None) => {
            let perf = &single.performance;
            html! {
                <div>
                    <h4>{ "Cycle Performance" }</h4>
                    <p><strong>{ "COP: " }</strong>{ format!("{:.3}", perf.cop) }</p>
                    { perf.qe.map(|qe| html! {
                        <p><strong>{ "Refrigeration effect: " }</strong>
                            { format!("{:.1} kJ/kg", qe / 1000.0) }</p>
                    }).unwrap_or_default() }
                    { perf.wc.map(|wc| html! {
                        <p><strong>{ "Compressor work: " }</strong>
                            { format!("{:.1} kJ/kg", wc / 1000.0) }</p>
                    }).unwrap_or_default() }
                    { perf.qc.map(|qc| html! {
                        <p><strong>{ "Heat rejected: " }</strong>
                            { format!("{:.1} kJ/kg", qc / 1000.0) }</p>
                    }).unwrap_or_default() }
                </div>
            }
        }
        (None, None) => html! {
            <p class="no-results-message">{ "No results to display" }</p>
        },
    }
}
