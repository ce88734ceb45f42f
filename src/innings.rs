//! Innings-pitched arithmetic.
//!
//! Box scores record innings pitched in base-3 pseudo-decimal notation:
//! `.1` is one out, `.2` is two outs, `.0` a full inning. `5.2 + 0.1 = 6.0`.
//! An integer outs count is the canonical representation for accumulation;
//! the notation only exists at the boundary.

/// Convert IP notation to a whole outs count. `2.1` -> 7 outs.
///
/// Negative values are treated symmetrically: `-1.2` -> -5 outs.
pub fn ip_to_outs(ip: f64) -> i64 {
    let mag = ip.abs();
    let whole = mag.trunc();
    let outs_digit = ((mag - whole) * 10.0).round() as i64;
    debug_assert!(outs_digit <= 2, "invalid IP notation {ip}");
    let outs = whole as i64 * 3 + outs_digit;
    if ip < 0.0 { -outs } else { outs }
}

/// Convert an outs count back to IP notation. 7 outs -> `2.1`.
pub fn outs_to_ip(outs: i64) -> f64 {
    let mag = outs.abs();
    let ip = (mag / 3) as f64 + (mag % 3) as f64 / 10.0;
    if outs < 0 { -ip } else { ip }
}

/// Add (or with a negative operand, subtract) two IP-notation values.
/// `5.1 + 8.2 = 14.0`, `4.1 - 1.2 = 2.2`.
pub fn add_ip(a: f64, b: f64) -> f64 {
    outs_to_ip(ip_to_outs(a) + ip_to_outs(b))
}

/// Convert IP notation to true decimal innings for rate math. `5.1` -> 5.333...
pub fn ip_to_decimal(ip: f64) -> f64 {
    ip_to_outs(ip) as f64 / 3.0
}
