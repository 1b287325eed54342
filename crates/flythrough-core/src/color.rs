//! Color helpers.

use glam::Vec3;

/// Converts HSL to RGB, all components in `[0, 1]`.
///
/// Hue wraps modulo 1; saturation and lightness are clamped.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    if s <= 0.0 {
        return Vec3::splat(l);
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Vec3::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

/// Converts an sRGB-encoded color to linear RGB.
pub fn srgb_to_linear(color: Vec3) -> Vec3 {
    Vec3::new(
        srgb_channel_to_linear(color.x),
        srgb_channel_to_linear(color.y),
        srgb_channel_to_linear(color.z),
    )
}

fn srgb_channel_to_linear(value: f32) -> f32 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_primary_hues() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), Vec3::new(0.0, 1.0, 0.0)));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hue_wraps() {
        assert!(close(hsl_to_rgb(1.2, 1.0, 0.5), hsl_to_rgb(0.2, 1.0, 0.5)));
    }

    #[test]
    fn test_srgb_to_linear() {
        assert_eq!(srgb_to_linear(Vec3::ZERO), Vec3::ZERO);
        assert!(close(srgb_to_linear(Vec3::ONE), Vec3::ONE));
        // Mid grey is darker in linear space
        let grey = srgb_to_linear(Vec3::splat(0.5));
        assert!((grey.x - 0.214_041).abs() < 1e-4);
        // Low values use the linear segment
        assert!((srgb_to_linear(Vec3::splat(0.02)).x - 0.02 / 12.92).abs() < 1e-7);
    }

    #[test]
    fn test_grey_when_unsaturated() {
        assert_eq!(hsl_to_rgb(0.3, 0.0, 0.25), Vec3::splat(0.25));
    }
}
