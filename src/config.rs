//! Application-level configuration constants.

// UI behavior
pub const DEBOUNCE_MS: u32 = 300;
pub const SOLVER_URL: &str = "http://127.0.0.1:5000/calculate";

// Diagram canvas in pixels
pub const DIAGRAM_WIDTH: f64 = 640.0;
pub const DIAGRAM_HEIGHT: f64 = 400.0;

// Slider ranges per parameter (UI-enforced bounds)
pub const T_EVAP_MIN: f64 = -40.0;
pub const T_EVAP_MAX: f64 = 10.0;
pub const T_COND_MIN: f64 = 20.0;
pub const T_COND_MAX: f64 = 60.0;
pub const SUPERHEAT_MIN: f64 = 0.0;
pub const SUPERHEAT_MAX: f64 = 20.0;
pub const SUBCOOLING_MIN: f64 = 0.0;
pub const SUBCOOLING_MAX: f64 = 15.0;
pub const TEMP_STEP: f64 = 0.5;

// Compressor efficiency is presented as a percentage
pub const COMP_EFF_PCT_MIN: f64 = 50.0;
pub const COMP_EFF_PCT_MAX: f64 = 100.0;
pub const COMP_EFF_PCT_STEP: f64 = 1.0;
