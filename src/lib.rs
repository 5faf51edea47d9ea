use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default cycle parameters used at session start.
pub mod defaults {
    pub const T_EVAP_C: f64 = -10.0;
    pub const T_COND_C: f64 = 40.0;
    pub const SUPERHEAT_C: f64 = 5.0;
    pub const SUBCOOLING_C: f64 = 5.0;
    pub const COMP_EFF: f64 = 0.75;
}

/// Refrigerants supported by the remote solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Refrigerant {
    R134a,
    R22,
    #[serde(rename = "R410A")]
    R410a,
    R717,
}

impl Refrigerant {
    pub const ALL: [Refrigerant; 4] = [
        Refrigerant::R134a,
        Refrigerant::R22,
        Refrigerant::R410a,
        Refrigerant::R717,
    ];

    /// Identifier used on the wire and as the `<option>` value.
    pub fn id(&self) -> &'static str {
        match self {
            Refrigerant::R134a => "R134a",
            Refrigerant::R22 => "R22",
            Refrigerant::R410a => "R410A",
            Refrigerant::R717 => "R717",
        }
    }

    /// Human-readable label for the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Refrigerant::R134a => "R-134a",
            Refrigerant::R22 => "R-22",
            Refrigerant::R410a => "R-410A",
            Refrigerant::R717 => "Ammonia (R-717)",
        }
    }
}

impl FromStr for Refrigerant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Refrigerant::ALL
            .into_iter()
            .find(|r| r.id() == s)
            .ok_or_else(|| format!("Unknown refrigerant: '{}'", s))
    }
}

impl fmt::Display for Refrigerant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The authoritative parameter snapshot sent to the solver.
///
/// Edits never mutate in place: `with_field` and friends return a new
/// snapshot so the debounce layer can compare against the previous one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSet {
    pub refrigerant: Refrigerant,
    pub t_evap: f64,
    pub t_cond: f64,
    pub superheat: f64,
    pub subcooling: f64,
    /// Compressor isentropic efficiency, stored as a fraction in (0, 1]
    /// even though the UI presents it as a percentage.
    pub comp_eff: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            refrigerant: Refrigerant::R134a,
            t_evap: defaults::T_EVAP_C,
            t_cond: defaults::T_COND_C,
            superheat: defaults::SUPERHEAT_C,
            subcooling: defaults::SUBCOOLING_C,
            comp_eff: defaults::COMP_EFF,
        }
    }
}

/// Numeric fields of [`ParameterSet`] addressable by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    TEvap,
    TCond,
    Superheat,
    Subcooling,
    CompEff,
}

impl ParameterSet {
    /// Replace a single numeric field from a raw UI string.
    ///
    /// A value that does not parse to a finite number is rejected and the
    /// previous snapshot is returned unchanged.
    pub fn with_field(&self, field: ParamField, raw: &str) -> Self {
        self.with_transformed(field, raw, |v| v)
    }

    /// Like [`with_field`](Self::with_field) but applies a transform to the
    /// parsed value before storing it, e.g. percentage to fraction for the
    /// compressor efficiency field.
    pub fn with_transformed(
        &self,
        field: ParamField,
        raw: &str,
        transform: impl Fn(f64) -> f64,
    ) -> Self {
        let parsed = match parse_finite(raw) {
            Some(v) => transform(v),
            None => {
                log::debug!("rejected non-numeric edit '{}' for {:?}", raw, field);
                return self.clone();
            }
        };
        if !parsed.is_finite() {
            log::debug!("rejected non-finite edit '{}' for {:?}", raw, field);
            return self.clone();
        }

        let mut next = self.clone();
        match field {
            ParamField::TEvap => next.t_evap = parsed,
            ParamField::TCond => next.t_cond = parsed,
            ParamField::Superheat => next.superheat = parsed,
            ParamField::Subcooling => next.subcooling = parsed,
            ParamField::CompEff => next.comp_eff = parsed,
        }
        next
    }

    /// Replace the refrigerant, keeping all numeric fields.
    pub fn with_refrigerant(&self, refrigerant: Refrigerant) -> Self {
        let mut next = self.clone();
        next.refrigerant = refrigerant;
        next
    }
}

/// Parse a raw UI string into a finite `f64`, or reject it.
fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A single cycle state point on the P-h plane.
///
/// The solver also reports temperature and entropy per point; only the
/// coordinates the diagram needs are kept.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CyclePoint {
    /// Specific enthalpy in J/kg.
    pub h: f64,
    /// Absolute pressure in Pa.
    pub p: f64,
}

/// Scalar performance summary for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Performance {
    /// Coefficient of performance.
    pub cop: f64,
    /// Refrigeration effect in J/kg, when the solver reports it.
    #[serde(default)]
    pub qe: Option<f64>,
    /// Compressor work in J/kg, when the solver reports it.
    #[serde(default)]
    pub wc: Option<f64>,
    /// Rejected heat in J/kg, when the solver reports it.
    #[serde(default)]
    pub qc: Option<f64>,
}

/// Phase-boundary curve as two equal-length ordered sequences.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SaturationDome {
    pub h: Vec<f64>,
    pub p: Vec<f64>,
}

impl SaturationDome {
    pub fn is_empty(&self) -> bool {
        self.h.is_empty() || self.p.is_empty()
    }
}

/// Which variant of the cycle a point sequence describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleRole {
    Ideal,
    Real,
}

/// One computed cycle: ordered state points plus its performance summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSeries {
    pub role: CycleRole,
    pub points: Vec<CyclePoint>,
    pub performance: Performance,
}

/// Everything a successful solver round-trip produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleResults {
    pub dome: SaturationDome,
    /// Zero, one (bare cycle) or two (ideal + real) series.
    pub cycles: Vec<CycleSeries>,
}

impl CycleResults {
    pub fn cycle(&self, role: CycleRole) -> Option<&CycleSeries> {
        self.cycles.iter().find(|c| c.role == role)
    }
}

/// Lifecycle of the latest computation request.
///
/// Results are owned by the state itself: a transition to `Loading`
/// discards the previous results wholesale, there is no partial merging
/// of stale and fresh data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(Rc<CycleResults>),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn results(&self) -> Option<&CycleResults> {
        match self {
            RequestState::Success(r) => Some(r),
            _ => None,
        }
    }
}

pub mod diagram;
pub mod scale;
pub mod solver;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_edit_replaces_only_that_field() {
        let base = ParameterSet::default();
        let next = base.with_field(ParamField::TCond, "45.5");
        assert_eq!(next.t_cond, 45.5);
        assert_eq!(next.t_evap, base.t_evap);
        assert_eq!(next.comp_eff, base.comp_eff);
        assert_eq!(next.refrigerant, base.refrigerant);
    }

    #[test]
    fn invalid_edit_retains_previous_value() {
        let base = ParameterSet::default();
        assert_eq!(base.with_field(ParamField::TEvap, "abc"), base);
        assert_eq!(base.with_field(ParamField::TEvap, ""), base);
        assert_eq!(base.with_field(ParamField::TEvap, "NaN"), base);
        assert_eq!(base.with_field(ParamField::TEvap, "inf"), base);
    }

    #[test]
    fn percentage_transform_stores_fraction() {
        let base = ParameterSet::default();
        let next = base.with_transformed(ParamField::CompEff, "80", |pct| pct / 100.0);
        assert_eq!(next.comp_eff, 0.8);
    }

    #[test]
    fn invalid_percentage_keeps_last_valid_efficiency() {
        let base =
            ParameterSet::default().with_transformed(ParamField::CompEff, "75", |pct| pct / 100.0);
        let next = base.with_transformed(ParamField::CompEff, "abc", |pct| pct / 100.0);
        assert_eq!(next.comp_eff, 0.75);
        let next = next.with_transformed(ParamField::CompEff, "", |pct| pct / 100.0);
        assert_eq!(next.comp_eff, 0.75);
    }

    #[test]
    fn wire_field_names_match_solver_contract() {
        let params = ParameterSet::default();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["refrigerant"], "R134a");
        assert_eq!(json["t_evap"], -10.0);
        assert_eq!(json["t_cond"], 40.0);
        assert_eq!(json["superheat"], 5.0);
        assert_eq!(json["subcooling"], 5.0);
        assert_eq!(json["comp_eff"], 0.75);
    }

    #[test]
    fn refrigerant_round_trips_through_id() {
        for r in Refrigerant::ALL {
            assert_eq!(r.id().parse::<Refrigerant>(), Ok(r));
        }
        assert!("R12".parse::<Refrigerant>().is_err());
    }
}
