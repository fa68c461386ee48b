//! Audio mathematics utilities and conversion functions.
//!
//! This module provides the scalar building blocks of the MFCC pipeline:
//! the two mel warping conventions (HTK and Slaney) with their inverses, and
//! the floored log/decibel conversions used to compress band energies.
//!
//! All functions are generic over [`RealFloat`] so they can be evaluated in
//! either `f32` or `f64` precision.
//!
//! # Examples
//!
//! ```rust
//! use audio_mfcc::audio_math::{hz_to_mel, hz_to_mel_slaney, mel_to_hz, power_to_db};
//!
//! // Frequency conversions
//! let mel = hz_to_mel(440.0f64); // A4 on the HTK mel scale
//! let hz = mel_to_hz(mel); // Back to Hz
//! assert!((hz - 440.0).abs() < 1e-9);
//!
//! // The Slaney scale puts 1 kHz at 15 mel
//! assert!((hz_to_mel_slaney(1000.0f64) - 15.0).abs() < 1e-12);
//!
//! // Level conversions never return -inf
//! assert!((power_to_db(0.0f64, 1e-10) + 100.0).abs() < 1e-9);
//! ```

use crate::{RealFloat, to_precision};

// =============================================================================
// FREQUENCY CONVERSIONS
// =============================================================================

/// Converts frequency in Hz to the HTK mel scale.
///
/// Uses the formula: `mel = 2595 * log10(1 + hz / 700)`
///
/// # Arguments
/// * `freq_hz` - Frequency in Hz
///
/// # Returns
/// Frequency in mel scale
///
/// # Examples
///
/// ```rust
/// use audio_mfcc::audio_math::hz_to_mel;
///
/// let mel = hz_to_mel(1000.0f64); // ≈ 1000.0
/// assert!((mel - 1000.0).abs() < 0.1);
/// ```
pub fn hz_to_mel<F: RealFloat>(freq_hz: F) -> F {
    to_precision::<F, _>(2595.0) * (F::one() + freq_hz / to_precision::<F, _>(700.0)).log10()
}

/// Converts an HTK mel scale value back to frequency in Hz.
///
/// Inverse of `hz_to_mel`. Uses the formula:
/// `hz = 700 * (10^(mel / 2595) - 1)`
///
/// # Examples
///
/// ```rust
/// use audio_mfcc::audio_math::{hz_to_mel, mel_to_hz};
///
/// let freq = 1000.0f64;
/// let mel = hz_to_mel(freq);
/// let freq_back = mel_to_hz(mel);
/// assert!((freq - freq_back).abs() < 0.1);
/// ```
pub fn mel_to_hz<F: RealFloat>(mel: F) -> F {
    to_precision::<F, _>(700.0)
        * (to_precision::<F, _>(10.0).powf(mel / to_precision::<F, _>(2595.0)) - F::one())
}

/// Linear segment of the Slaney scale: Hz per mel below the break frequency.
const SLANEY_HZ_PER_MEL: f64 = 200.0 / 3.0;
/// Frequency where the Slaney scale switches from linear to logarithmic.
const SLANEY_BREAK_HZ: f64 = 1000.0;
/// Mel value of [`SLANEY_BREAK_HZ`].
const SLANEY_BREAK_MEL: f64 = SLANEY_BREAK_HZ / SLANEY_HZ_PER_MEL;

/// Log step of the Slaney scale above the break frequency, `ln(6.4) / 27`.
fn slaney_log_step<F: RealFloat>() -> F {
    to_precision::<F, _>(6.4).ln() / to_precision::<F, _>(27.0)
}

/// Converts frequency in Hz to the Slaney (Auditory Toolbox) mel scale.
///
/// Linear below 1000 Hz (`hz / (200/3)`, so 1000 Hz maps to 15 mel) and
/// logarithmic above it, with a step of `ln(6.4) / 27` per mel.
///
/// # Examples
///
/// ```rust
/// use audio_mfcc::audio_math::hz_to_mel_slaney;
///
/// assert!((hz_to_mel_slaney(500.0f64) - 7.5).abs() < 1e-12);
/// assert!(hz_to_mel_slaney(4000.0f64) > 15.0);
/// ```
pub fn hz_to_mel_slaney<F: RealFloat>(freq_hz: F) -> F {
    let break_hz = to_precision::<F, _>(SLANEY_BREAK_HZ);
    if freq_hz >= break_hz {
        to_precision::<F, _>(SLANEY_BREAK_MEL) + (freq_hz / break_hz).ln() / slaney_log_step()
    } else {
        freq_hz / to_precision::<F, _>(SLANEY_HZ_PER_MEL)
    }
}

/// Converts a Slaney mel scale value back to frequency in Hz.
///
/// Inverse of `hz_to_mel_slaney`.
///
/// # Examples
///
/// ```rust
/// use audio_mfcc::audio_math::{hz_to_mel_slaney, mel_to_hz_slaney};
///
/// let hz = mel_to_hz_slaney(hz_to_mel_slaney(6000.0f64));
/// assert!((hz - 6000.0).abs() < 1e-6);
/// ```
pub fn mel_to_hz_slaney<F: RealFloat>(mel: F) -> F {
    let break_mel = to_precision::<F, _>(SLANEY_BREAK_MEL);
    if mel >= break_mel {
        to_precision::<F, _>(SLANEY_BREAK_HZ) * ((mel - break_mel) * slaney_log_step()).exp()
    } else {
        mel * to_precision::<F, _>(SLANEY_HZ_PER_MEL)
    }
}

// =============================================================================
// LEVEL CONVERSIONS
// =============================================================================

/// Converts power to decibels.
///
/// Uses the formula: `dB = 10 * log10(max(power, floor))`. With the usual
/// floor of `1e-10` silence maps to -100 dB.
///
/// # Arguments
/// * `power` - Power value
/// * `floor` - Smallest value passed to the logarithm (must be > 0)
///
/// # Examples
///
/// ```rust
/// use audio_mfcc::audio_math::power_to_db;
///
/// let db = power_to_db(1.0f64, 1e-10); // 0.0 dB
/// let db_half = power_to_db(0.5f64, 1e-10); // ≈ -3.01 dB
/// assert!((db_half + 3.0103).abs() < 1e-3);
/// ```
pub fn power_to_db<F: RealFloat>(power: F, floor: F) -> F {
    to_precision::<F, _>(10.0) * power.max(floor).log10()
}

/// Converts linear amplitude to decibels.
///
/// Uses the formula: `dB = 20 * log10(max(amplitude, floor))`, i.e. twice
/// [`power_to_db`].
///
/// # Examples
///
/// ```rust
/// use audio_mfcc::audio_math::amplitude_to_db;
///
/// let db_tenth = amplitude_to_db(0.1f64, 1e-10); // -20.0 dB
/// assert!((db_tenth + 20.0).abs() < 1e-9);
/// assert!((amplitude_to_db(0.0f64, 1e-10) + 200.0).abs() < 1e-9);
/// ```
pub fn amplitude_to_db<F: RealFloat>(amplitude: F, floor: F) -> F {
    to_precision::<F, _>(2.0) * power_to_db(amplitude, floor)
}

/// Natural logarithm of `max(value, floor)`.
///
/// # Examples
///
/// ```rust
/// use audio_mfcc::audio_math::natural_log;
///
/// assert_eq!(natural_log(1.0f64, 1e-10), 0.0);
/// assert!(natural_log(0.0f64, 1e-10).is_finite());
/// ```
pub fn natural_log<F: RealFloat>(value: F, floor: F) -> F {
    value.max(floor).ln()
}

// =============================================================================
// SPACING HELPERS
// =============================================================================

/// Generates `num` linearly spaced values from `start` to `end` inclusive.
pub(crate) fn linspace<F: RealFloat>(start: F, end: F, num: usize) -> Vec<F> {
    if num == 0 {
        return Vec::new();
    }
    if num == 1 {
        return vec![start];
    }

    let step = (end - start) / to_precision::<F, _>(num - 1);
    (0..num)
        .map(|i| start + to_precision::<F, _>(i) * step)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_htk_mel_conversions() {
        // Test round-trip conversion
        let freq = 1000.0f64;
        let mel = hz_to_mel(freq);
        let freq_back = mel_to_hz(mel);
        assert!((freq - freq_back).abs() < 1e-9);

        // The scale is anchored so 1000 Hz ≈ 1000 mels
        assert!((hz_to_mel(1000.0f64) - 1000.0f64).abs() < 1.0f64);
        assert_eq!(hz_to_mel(0.0f64), 0.0);
        assert_eq!(mel_to_hz(0.0f64), 0.0);
    }

    #[test]
    fn test_slaney_mel_conversions() {
        // Linear region
        assert!((hz_to_mel_slaney(200.0f64) - 3.0).abs() < 1e-12);
        assert!((mel_to_hz_slaney(3.0f64) - 200.0).abs() < 1e-9);

        // Break point is continuous from both sides
        assert!((hz_to_mel_slaney(1000.0f64) - 15.0).abs() < 1e-12);
        assert!((hz_to_mel_slaney(999.999f64) - 15.0).abs() < 1e-3);

        // 6.4 kHz is exactly 27 log steps above 1 kHz
        assert!((hz_to_mel_slaney(6400.0f64) - 42.0).abs() < 1e-9);

        for &freq in &[0.0f64, 50.0, 999.0, 1000.0, 1001.0, 8000.0, 22050.0] {
            let back = mel_to_hz_slaney(hz_to_mel_slaney(freq));
            assert!((freq - back).abs() < 1e-6, "{freq} -> {back}");
        }
    }

    #[test]
    fn test_warpings_are_monotonic_and_distinct() {
        let freqs: Vec<f64> = linspace(0.0, 22050.0, 200);
        for pair in freqs.windows(2) {
            assert!(hz_to_mel(pair[1]) > hz_to_mel(pair[0]));
            assert!(hz_to_mel_slaney(pair[1]) > hz_to_mel_slaney(pair[0]));
        }

        // Both scales are compressive but not proportional to each other
        let htk_ratio = hz_to_mel(8000.0f64) / hz_to_mel(1000.0f64);
        let slaney_ratio = hz_to_mel_slaney(8000.0f64) / hz_to_mel_slaney(1000.0f64);
        assert!((htk_ratio - slaney_ratio).abs() > 0.1);
    }

    #[test]
    fn test_level_conversions() {
        assert!((power_to_db(1.0f64, 1e-10) - 0.0).abs() < 1e-12);
        assert!((power_to_db(100.0f64, 1e-10) - 20.0).abs() < 1e-12);
        assert!((amplitude_to_db(100.0f64, 1e-10) - 40.0).abs() < 1e-12);

        // Silence lands on the floor instead of -inf
        assert!((power_to_db(0.0f64, 1e-10) + 100.0).abs() < 1e-9);
        assert!((amplitude_to_db(0.0f64, 1e-10) + 200.0).abs() < 1e-9);
        assert_eq!(power_to_db(0.0f64, 1e-10), power_to_db(1e-10f64, 1e-10));
        assert!((natural_log(0.0f64, 1e-10) - 1e-10f64.ln()).abs() < 1e-12);

        // Values above the floor are untouched by it
        assert_eq!(power_to_db(1e-3f64, 1e-10), power_to_db(1e-3f64, 1e-20));
        assert!((natural_log(std::f64::consts::E, 1e-10) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_f32_precision() {
        let mel: f32 = hz_to_mel(1000.0f32);
        assert!((mel - 1000.0).abs() < 0.1);
        let db: f32 = power_to_db(0.0f32, 1e-10);
        assert!((db + 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_linspace() {
        let points = linspace(0.0f64, 1.0, 5);
        assert_eq!(points, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(linspace(0.0f64, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0f64, 1.0, 1), vec![3.0]);
    }
}
