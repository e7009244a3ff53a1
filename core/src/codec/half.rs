// IEEE-754 binary16 conversions.
//
// Subnormal halves are not represented: a zero exponent decodes to signed
// zero, and values too small for a normal half encode to signed zero.

const SIGN_MASK: u16 = 0x8000;
const EXP_MASK: u16 = 0x1f;
const FRAC_MASK: u16 = 0x03ff;
const INFINITY: u16 = 0x7c00;
const QUIET_NAN: u16 = 0x7e00;

/// Decode binary16 bits.
pub fn f16_bits_to_f64(bits: u16) -> f64 {
    let sign = if bits & SIGN_MASK != 0 { -1.0 } else { 1.0 };
    let exp = (bits >> 10) & EXP_MASK;
    let frac = bits & FRAC_MASK;

    match exp {
        0 => sign * 0.0,
        EXP_MASK if frac != 0 => f64::NAN,
        EXP_MASK => sign * f64::INFINITY,
        _ => sign * (1.0 + f64::from(frac) / 1024.0) * 2f64.powi(i32::from(exp) - 15),
    }
}

/// Encode to binary16 bits by rebiasing the binary32 exponent and
/// truncating the fraction.
pub fn f32_to_f16_bits(value: f32) -> u16 {
    let bits = value.to_bits();
    let sign = ((bits >> 16) as u16) & SIGN_MASK;
    let exp = ((bits >> 23) & 0xff) as i32;
    let frac = bits & 0x007f_ffff;

    if exp == 0xff {
        return sign | if frac != 0 { QUIET_NAN } else { INFINITY };
    }

    let exp = exp - 127 + 15;
    if exp <= 0 {
        sign
    } else if exp >= 31 {
        sign | INFINITY
    } else {
        sign | ((exp as u16) << 10) | (frac >> 13) as u16
    }
}
