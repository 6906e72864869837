//! Linear transfer functions between raw register contents and physical units.

/// Lowest temperature a threshold register can express, in °C.
pub const TEMPERATURE_MIN_C: f32 = -40.0;
/// Highest temperature a threshold register can express, in °C.
pub const TEMPERATURE_MAX_C: f32 = 125.0;
pub const HUMIDITY_MIN_PERCENT: f32 = 0.0;
pub const HUMIDITY_MAX_PERCENT: f32 = 100.0;

/// Span of the temperature transfer function, in °C.
const TEMPERATURE_SPAN_C: f32 = 165.0;
/// Offset applied to the 16-bit temperature result.
///
/// The datasheet gives -40.0; the 16-bit path has always used -40.5 and the
/// 8-bit paths -40.0. Kept until checked against the sensor revision in use.
const TEMPERATURE_RESULT_OFFSET_C: f32 = -40.5;

/// 16-bit temperature result (0x00/0x01) to °C.
pub fn temperature_from_raw16(raw: u16) -> f32 {
    raw as f32 * TEMPERATURE_SPAN_C / 65536.0 + TEMPERATURE_RESULT_OFFSET_C
}

/// 16-bit humidity result (0x02/0x03) to %RH.
pub fn humidity_from_raw16(raw: u16) -> f32 {
    raw as f32 / 65536.0 * 100.0
}

/// 8-bit temperature register (peak latch or threshold) to °C.
pub fn temperature_from_raw8(raw: u8) -> f32 {
    raw as f32 * TEMPERATURE_SPAN_C / 256.0 + TEMPERATURE_MIN_C
}

/// 8-bit humidity register (peak latch or threshold) to %RH.
pub fn humidity_from_raw8(raw: u8) -> f32 {
    raw as f32 / 256.0 * 100.0
}

/// °C to an 8-bit threshold value.
///
/// The input is clamped to the sensor range, truncated, then masked to one
/// byte. At exactly 125 °C the truncated value is 256, which the mask wraps
/// to 0x00.
///
/// The arithmetic runs in f64 so an input just below a code boundary
/// truncates to the lower code instead of rounding up to the next one.
pub fn temperature_to_raw8(celsius: f32) -> u8 {
    let min = f64::from(TEMPERATURE_MIN_C);
    let celsius = f64::from(celsius).clamp(min, f64::from(TEMPERATURE_MAX_C));
    let scaled = 256.0 * (celsius - min) / f64::from(TEMPERATURE_SPAN_C);
    (scaled as u32 & 0xFF) as u8
}

/// %RH to an 8-bit threshold value, with the same clamp-truncate-mask rule as
/// [`temperature_to_raw8`].
pub fn humidity_to_raw8(percent: f32) -> u8 {
    let percent = f64::from(percent).clamp(
        f64::from(HUMIDITY_MIN_PERCENT),
        f64::from(HUMIDITY_MAX_PERCENT),
    );
    let scaled = 256.0 * percent / 100.0;
    (scaled as u32 & 0xFF) as u8
}
