//! Axis scales for the P-h diagram.
//!
//! Enthalpy maps through a linear scale, pressure through a logarithmic
//! one. Both constructors repair degenerate domains (empty span, values a
//! log scale cannot represent) instead of producing NaN positions, so the
//! renderer never has to guard against them after construction.

/// Maps a linear data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Build a scale, widening a degenerate domain to a unit span around
    /// the single value.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (d0, d1) = domain;
        let domain = if !d0.is_finite() || !d1.is_finite() {
            (0.0, 1.0)
        } else if d0 == d1 {
            (d0 - 0.5, d0 + 0.5)
        } else {
            (d0, d1)
        };
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn scale(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Roughly `count` tick values at 1/2/5-stepped positions.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let step = nice_step(d1 - d0, count.max(1));
        let mut v = (d0 / step).ceil() * step;
        let mut out = Vec::new();
        while v <= d1 + step * 1e-9 {
            out.push(v);
            v += step;
        }
        out
    }

    /// Step size used by [`ticks`](Self::ticks), for label formatting.
    pub fn tick_step(&self, count: usize) -> f64 {
        let (d0, d1) = self.domain;
        nice_step(d1 - d0, count.max(1))
    }
}

/// Round a raw step up to the nearest 1/2/5 multiple of a power of ten.
fn nice_step(span: f64, count: usize) -> f64 {
    let raw = span / count as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let factor = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    mag * factor
}

/// Maps a positive data domain onto a pixel range logarithmically.
///
/// The vertical diagram axis uses an inverted range (higher pressure maps
/// to a smaller pixel coordinate); that is purely a property of the range
/// handed in, the scale itself does not care about orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LogScale {
    /// Build a scale, clamping non-positive domain bounds and widening a
    /// degenerate domain by a factor of two in each direction.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (mut d0, mut d1) = domain;
        if !d1.is_finite() || d1 <= 0.0 {
            d0 = 1.0;
            d1 = 10.0;
        } else if !d0.is_finite() || d0 <= 0.0 {
            // Fall back to three decades below the top of the domain.
            d0 = d1 / 1000.0;
        }
        if d0 == d1 {
            d0 /= 2.0;
            d1 *= 2.0;
        }
        Self {
            domain: (d0, d1),
            range,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn scale(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        // Values at or below zero cannot be represented; pin them to the
        // bottom of the domain rather than returning NaN.
        let v = v.max(d0.min(d1));
        r0 + (v.ln() - d0.ln()) / (d1.ln() - d0.ln()) * (r1 - r0)
    }

    /// Tick values at 1/2/5 multiples of powers of ten inside the domain.
    pub fn ticks(&self) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let lo = d0.log10().floor() as i32;
        let hi = d1.log10().ceil() as i32;
        let mut out = Vec::new();
        for e in lo..=hi {
            for m in [1.0, 2.0, 5.0] {
                let v = m * 10f64.powi(e);
                if v >= d0 * (1.0 - 1e-9) && v <= d1 * (1.0 + 1e-9) {
                    out.push(v);
                }
            }
        }
        if out.is_empty() {
            // Domain narrower than a 1/2/5 grid cell.
            out.push((d0 * d1).sqrt());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_endpoints_and_midpoint() {
        let s = LinearScale::new((100.0, 300.0), (0.0, 500.0));
        assert_eq!(s.scale(100.0), 0.0);
        assert_eq!(s.scale(300.0), 500.0);
        assert_eq!(s.scale(200.0), 250.0);
    }

    #[test]
    fn linear_degenerate_domain_is_widened() {
        let s = LinearScale::new((42.0, 42.0), (0.0, 100.0));
        assert!(s.scale(42.0).is_finite());
        assert_eq!(s.scale(42.0), 50.0);
    }

    #[test]
    fn linear_ticks_cover_domain_with_nice_steps() {
        let s = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        let ticks = s.ticks(5);
        assert!(ticks.len() >= 4);
        assert!(ticks.iter().all(|t| (0.0..=10.0).contains(t)));
        assert_eq!(s.tick_step(5), 2.0);
    }

    #[test]
    fn log_inverted_range_puts_high_pressure_on_top() {
        let s = LogScale::new((50.0, 2000.0), (400.0, 0.0));
        assert!((s.scale(50.0) - 400.0).abs() < 1e-9);
        assert!(s.scale(2000.0).abs() < 1e-9);
        // Monotonically decreasing pixel coordinate.
        assert!(s.scale(100.0) > s.scale(1000.0));
    }

    #[test]
    fn log_repairs_nonpositive_domain() {
        let s = LogScale::new((0.0, 2000.0), (400.0, 0.0));
        assert!(s.domain().0 > 0.0);
        assert!(s.scale(1.0).is_finite());

        let s = LogScale::new((-5.0, -1.0), (400.0, 0.0));
        assert!(s.domain().0 > 0.0 && s.domain().1 > 0.0);
        assert!(s.scale(0.0).is_finite());
    }

    #[test]
    fn log_degenerate_domain_is_widened() {
        let s = LogScale::new((100.0, 100.0), (400.0, 0.0));
        let (d0, d1) = s.domain();
        assert!(d0 < 100.0 && d1 > 100.0);
        assert!(s.scale(100.0).is_finite());
    }

    #[test]
    fn log_ticks_are_one_two_five_decades() {
        let s = LogScale::new((50.0, 2000.0), (400.0, 0.0));
        let ticks = s.ticks();
        assert_eq!(ticks, vec![50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0]);
    }
}
