//! Client for the remote thermodynamic solver.
//!
//! The solver is a black box behind `POST /calculate`; this module owns
//! the wire contract, classifies failures into [`ComputeError`] and
//! normalizes both response shapes (bare cycle, ideal + real pair) into
//! [`CycleResults`]. [`RequestSeq`] implements the supersession rule: an
//! in-flight request is never aborted, but its eventual resolution is
//! discarded once a newer request has started.

use std::cell::Cell;
use std::fmt;

use gloo_net::http::Request;
use serde::Deserialize;

use crate::{CyclePoint, CycleResults, CycleRole, CycleSeries, ParameterSet, Performance,
            SaturationDome};

/// Classified failure of one computation round-trip.
///
/// All variants surface to the operator as a message string; none of them
/// is fatal to the interaction loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputeError {
    /// The request never produced an HTTP response.
    Transport(String),
    /// The solver answered with a non-success status.
    Solver(u16),
    /// The response body did not match the expected shape.
    BadResponse(String),
}

impl fmt::Display for ComputeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputeError::Transport(msg) => {
                write!(f, "Could not reach the calculation service: {}", msg)
            }
            ComputeError::Solver(status) => {
                write!(f, "The calculation service rejected the request (HTTP {})", status)
            }
            ComputeError::BadResponse(msg) => {
                write!(f, "The calculation service returned unusable data: {}", msg)
            }
        }
    }
}

impl std::error::Error for ComputeError {}

/// One cycle block as the solver serializes it.
#[derive(Debug, Deserialize)]
struct CycleBlock {
    points: Vec<CyclePoint>,
    performance: Performance,
}

/// The two response shapes the solver may produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SolverResponse {
    /// Ideal/real comparison mode.
    Dual {
        ideal: CycleBlock,
        real: CycleBlock,
        saturation_dome: SaturationDome,
    },
    /// Single bare-cycle mode.
    Bare {
        points: Vec<CyclePoint>,
        performance: Performance,
        saturation_dome: SaturationDome,
    },
}

impl SolverResponse {
    fn into_results(self) -> CycleResults {
        match self {
            SolverResponse::Dual {
                ideal,
                real,
                saturation_dome,
            } => CycleResults {
                dome: saturation_dome,
                cycles: vec![
                    CycleSeries {
                        role: CycleRole::Ideal,
                        points: ideal.points,
                        performance: ideal.performance,
                    },
                    CycleSeries {
                        role: CycleRole::Real,
                        points: real.points,
                        performance: real.performance,
                    },
                ],
            },
            SolverResponse::Bare {
                points,
                performance,
                saturation_dome,
            } => CycleResults {
                dome: saturation_dome,
                cycles: vec![CycleSeries {
                    role: CycleRole::Real,
                    points,
                    performance,
                }],
            },
        }
    }
}

/// Parse a solver response body into normalized results.
pub fn parse_response(body: &str) -> Result<CycleResults, ComputeError> {
    serde_json::from_str::<SolverResponse>(body)
        .map(SolverResponse::into_results)
        .map_err(|e| ComputeError::BadResponse(e.to_string()))
}

/// Issue one computation request for a settled parameter snapshot.
///
/// No timeout is imposed here; callers discard stale resolutions through
/// [`RequestSeq`], and a timeout can be layered into this function without
/// touching the request state machine.
pub async fn calculate(
    endpoint: &str,
    params: &ParameterSet,
) -> Result<CycleResults, ComputeError> {
    log::debug!("requesting cycle computation for {:?}", params);

    let response = Request::post(endpoint)
        .json(params)
        .map_err(|e| ComputeError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| ComputeError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(ComputeError::Solver(response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ComputeError::Transport(e.to_string()))?;
    parse_response(&body)
}

/// Monotonically increasing request generation counter.
///
/// Each settle event begins a new generation; a response may only commit
/// to shared state while its token is still the current generation. This
/// makes "last request wins" hold regardless of response arrival order.
#[derive(Debug, Default)]
pub struct RequestSeq(Cell<u64>);

impl RequestSeq {
    /// Start a new request generation and return its token.
    pub fn begin(&self) -> u64 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }

    /// Whether the given token still identifies the newest request.
    pub fn is_current(&self, token: u64) -> bool {
        self.0.get() == token
    }
}
