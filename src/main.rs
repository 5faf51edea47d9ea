//! Main module for the VaporCycle application using Yew.
//! Wires parameter state, the debounce coalescer, the computation client
//! and the diagram view into the real-time pipeline.

use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use vaporcycle::diagram::{CycleTrace, Layout, LineStyle};
use vaporcycle::solver::{self, RequestSeq};
use vaporcycle::{CycleRole, CycleSeries, ParamField, ParameterSet, RequestState};

mod components;
mod config;
mod hooks;

use components::{ph_diagram, render_performance, ParameterSlider, RefrigerantSelect};
use config::*;
use hooks::use_debounced;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Callback that replaces one numeric field from a slider edit. Invalid
/// raw values are rejected inside `with_field` and leave state untouched.
fn field_callback(
    params: &UseStateHandle<ParameterSet>,
    field: ParamField,
) -> Callback<InputEvent> {
    let params = params.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        params.set(params.with_field(field, &input.value()));
    })
}

/// How each cycle role is drawn: ideal dashed blue, real solid red.
fn trace_for(series: &CycleSeries) -> CycleTrace<'_> {
    match series.role {
        CycleRole::Ideal => CycleTrace {
            points: &series.points,
            style: LineStyle::Dashed,
            color: "blue",
        },
        CycleRole::Real => CycleTrace {
            points: &series.points,
            style: LineStyle::Solid,
            color: "red",
        },
    }
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(Main)]
fn main_component() -> Html {
    let params = use_state(ParameterSet::default);
    let request_state = use_state(RequestState::default);
    let request_seq = use_mut_ref(RequestSeq::default);

    // Rapid slider bursts coalesce here; only a settled snapshot reaches
    // the solver.
    let debounced = use_debounced((*params).clone(), DEBOUNCE_MS);

    // One request per settled snapshot, including the very first. The
    // generation token makes the newest request the only one allowed to
    // commit its resolution.
    {
        let request_state = request_state.clone();
        let request_seq = request_seq.clone();
        use_effect_with(debounced, move |snapshot: &ParameterSet| {
            let snapshot = snapshot.clone();
            request_state.set(RequestState::Loading);
            let token = request_seq.borrow().begin();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = solver::calculate(SOLVER_URL, &snapshot).await;
                if !request_seq.borrow().is_current(token) {
                    log::debug!("discarding superseded solver response (token {})", token);
                    return;
                }
                match outcome {
                    Ok(results) => {
                        log::debug!("cycle computation succeeded (token {})", token);
                        request_state.set(RequestState::Success(Rc::new(results)));
                    }
                    Err(err) => {
                        log::warn!("cycle computation failed: {}", err);
                        request_state.set(RequestState::Failed(err.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let on_refrigerant_change = {
        let params = params.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse() {
                Ok(r) => params.set(params.with_refrigerant(r)),
                Err(err) => log::warn!("{}", err),
            }
        })
    };

    // The efficiency widgets hand over a percentage; the snapshot stores
    // a fraction.
    let on_comp_eff_input = {
        let params = params.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            params.set(params.with_transformed(ParamField::CompEff, &input.value(), |pct| {
                pct / 100.0
            }));
        })
    };
    let on_comp_eff_change = {
        let params = params.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            params.set(params.with_transformed(ParamField::CompEff, &input.value(), |pct| {
                pct / 100.0
            }));
        })
    };

    let layout = request_state.results().and_then(|results| {
        let traces: Vec<CycleTrace<'_>> = results.cycles.iter().map(trace_for).collect();
        Layout::compute(&results.dome, &traces, DIAGRAM_WIDTH, DIAGRAM_HEIGHT)
    });

    html! {
        <div class="container">
            <header class="app-header">
                <h1>{ "VaporCycle Explorer" }</h1>
            </header>
            <main class="main-container">
                <div class="panel input-panel">
                    <h2>{ "Input Parameters" }</h2>

                    <RefrigerantSelect value={params.refrigerant}
                        onchange={on_refrigerant_change} />

                    <ParameterSlider label="Evaporation Temp." unit="°C"
                        value={params.t_evap} min={T_EVAP_MIN} max={T_EVAP_MAX}
                        step={TEMP_STEP}
                        oninput={field_callback(&params, ParamField::TEvap)} />

                    <ParameterSlider label="Condensation Temp." unit="°C"
                        value={params.t_cond} min={T_COND_MIN} max={T_COND_MAX}
                        step={TEMP_STEP}
                        oninput={field_callback(&params, ParamField::TCond)} />

                    <hr />
                    <h4>{ "Real Cycle Parameters" }</h4>

                    <ParameterSlider label="Superheat" unit="°C"
                        value={params.superheat} min={SUPERHEAT_MIN} max={SUPERHEAT_MAX}
                        step={TEMP_STEP}
                        oninput={field_callback(&params, ParamField::Superheat)} />

                    <ParameterSlider label="Subcooling" unit="°C"
                        value={params.subcooling} min={SUBCOOLING_MIN} max={SUBCOOLING_MAX}
                        step={TEMP_STEP}
                        oninput={field_callback(&params, ParamField::Subcooling)} />

                    <ParameterSlider label="Compressor Efficiency" unit="%"
                        value={params.comp_eff * 100.0}
                        min={COMP_EFF_PCT_MIN} max={COMP_EFF_PCT_MAX}
                        step={COMP_EFF_PCT_STEP}
                        oninput={on_comp_eff_input} />
                    <div class="form-group">
                        <input type="number"
                            min={COMP_EFF_PCT_MIN.to_string()}
                            max={COMP_EFF_PCT_MAX.to_string()}
                            step={COMP_EFF_PCT_STEP.to_string()}
                            value={format!("{:.0}", params.comp_eff * 100.0)}
                            onchange={on_comp_eff_change}
                        />
                        <span class="slider-info">{ "Efficiency (%)" }</span>
                    </div>
                </div>

                <div class="panel diagram-panel">
                    <h2>{ "P-h Diagram" }</h2>
                    <div class="diagram-wrapper">
                        if request_state.is_loading() {
                            <div class="loading-overlay">{ "Computing…" }</div>
                        }
                        { ph_diagram(layout.as_ref()) }
                    </div>
                </div>

                <div class="panel results-panel">
                    <h2>{ "Results" }</h2>
                    if let RequestState::Failed(msg) = &*request_state {
                        <p class="error-message">{ msg }</p>
                    }
                    if let Some(results) = request_state.results() {
                        { render_performance(results) }
                    }
                </div>
            </main>
        </div>
    }
}

/// Entry point: initializes the panic hook and the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<Main>::new().render();
}
