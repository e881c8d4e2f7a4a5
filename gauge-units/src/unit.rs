//! Unit representation with conversion laws

use std::f64::consts::PI;
use std::fmt;

use crate::format::{decimals_for, Style};
use crate::reference::CaliberSource;
use crate::UnitError;

/// Symbol of the caliber unit in the stability group
pub const CALIBER_SYMBOL: &str = "cal";

/// Symbol of the degree unit
pub const DEGREE_SYMBOL: &str = "\u{b0}";

/// Zero-width space, the symbol of plain ratio and coefficient units
pub const ZWSP: &str = "\u{200b}";

/// How a display value maps to the SI value
#[derive(Clone, Copy)]
pub enum Law<'a> {
    /// si = display * factor
    Linear { factor: f64 },
    /// Linear, with the display side rounded to a multiple of `precision`
    Quantized { factor: f64, precision: f64 },
    /// si = display * factor + offset
    Affine { factor: f64, offset: f64 },
    /// si = display * reference diameter, read from the source when converting
    Caliber(Option<&'a dyn CaliberSource>),
}

impl Law<'_> {
    /// Scale factor at this moment; NaN for a caliber law without a usable reference
    fn factor(&self) -> f64 {
        match *self {
            Law::Linear { factor } | Law::Quantized { factor, .. } | Law::Affine { factor, .. } => factor,
            Law::Caliber(source) => source
                .and_then(|s| s.reference_diameter())
                .unwrap_or(f64::NAN),
        }
    }
}

impl PartialEq for Law<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Law::Linear { factor: a }, Law::Linear { factor: b }) => a == b,
            (
                Law::Quantized { factor: a, precision: p },
                Law::Quantized { factor: b, precision: q },
            ) => a == b && p == q,
            (Law::Affine { factor: a, offset: x }, Law::Affine { factor: b, offset: y }) => {
                a == b && x == y
            }
            (Law::Caliber(None), Law::Caliber(None)) => true,
            (Law::Caliber(Some(a)), Law::Caliber(Some(b))) => std::ptr::addr_eq(*a, *b),
            _ => false,
        }
    }
}

impl fmt::Debug for Law<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Law::Linear { factor } => f.debug_struct("Linear").field("factor", factor).finish(),
            Law::Quantized { factor, precision } => f
                .debug_struct("Quantized")
                .field("factor", factor)
                .field("precision", precision)
                .finish(),
            Law::Affine { factor, offset } => f
                .debug_struct("Affine")
                .field("factor", factor)
                .field("offset", offset)
                .finish(),
            Law::Caliber(source) => f
                .debug_tuple("Caliber")
                .field(&source.and_then(|s| s.reference_diameter()))
                .finish(),
        }
    }
}

/// A named conversion law between a quantity's SI value and a display value.
///
/// The lifetime is that of the caliber reference, if any. Units that are not
/// context-bound are `Unit<'static>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit<'a> {
    symbol: String,
    law: Law<'a>,
    style: Style,
}

impl Unit<'static> {
    /// Create a unit with proportional conversion
    pub fn linear(symbol: &str, factor: f64) -> Self {
        Unit {
            symbol: symbol.to_string(),
            law: Law::Linear { factor },
            style: Style::Significant,
        }
    }

    /// Create a unit whose display values are multiples of `precision`
    pub fn quantized(symbol: &str, precision: f64, factor: f64) -> Self {
        Unit {
            symbol: symbol.to_string(),
            law: Law::Quantized { factor, precision },
            style: Style::Fixed(decimals_for(precision)),
        }
    }

    /// Create a unit with offset (temperature scales)
    pub fn affine(symbol: &str, factor: f64, offset: f64) -> Self {
        Unit {
            symbol: symbol.to_string(),
            law: Law::Affine { factor, offset },
            style: Style::Significant,
        }
    }

    /// Angle in degrees, shown with at most one decimal
    pub fn degree() -> Self {
        Unit::linear(DEGREE_SYMBOL, PI / 180.0).with_style(Style::UpTo(1))
    }

    /// Caliber unit with no reference: the neutral placeholder kept in the
    /// canonical stability group
    pub fn unbound_caliber() -> Self {
        Unit {
            symbol: CALIBER_SYMBOL.to_string(),
            law: Law::Caliber(None),
            style: Style::Significant,
        }
    }
}

impl<'a> Unit<'a> {
    /// Caliber unit reading its scale from `source`
    pub fn caliber(source: &'a dyn CaliberSource) -> Self {
        Unit {
            symbol: CALIBER_SYMBOL.to_string(),
            law: Law::Caliber(Some(source)),
            style: Style::Significant,
        }
    }

    /// Builder: override the text formatting rule
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn law(&self) -> &Law<'a> {
        &self.law
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Whether the scale of this unit comes from an external reference
    pub fn is_context_bound(&self) -> bool {
        matches!(self.law, Law::Caliber(_))
    }

    /// Reference diameter of a caliber unit, `None` for other units and for
    /// unbound caliber units
    pub fn caliber_diameter(&self) -> Option<f64> {
        match self.law {
            Law::Caliber(source) => source.and_then(|s| s.reference_diameter()),
            _ => None,
        }
    }

    /// Check the construction invariants: non-empty symbol, finite non-zero
    /// factor, finite offset and positive finite precision
    pub fn validate(&self) -> Result<(), UnitError> {
        let invalid = |why: &str| UnitError::InvalidUnit(format!("{:?}: {}", self.symbol, why));
        if self.symbol.is_empty() {
            return Err(invalid("empty symbol"));
        }
        match self.law {
            Law::Linear { factor } => check_factor(factor).map_err(|e| invalid(e)),
            Law::Quantized { factor, precision } => {
                check_factor(factor).map_err(|e| invalid(e))?;
                if precision.is_finite() && precision > 0.0 {
                    Ok(())
                } else {
                    Err(invalid("precision must be positive"))
                }
            }
            Law::Affine { factor, offset } => {
                check_factor(factor).map_err(|e| invalid(e))?;
                if offset.is_finite() {
                    Ok(())
                } else {
                    Err(invalid("offset must be finite"))
                }
            }
            Law::Caliber(_) => Ok(()),
        }
    }

    /// Convert an SI value to this unit.
    ///
    /// A caliber unit without a usable reference returns NaN.
    pub fn to_display(&self, si: f64) -> f64 {
        match self.law {
            Law::Linear { factor } => si / factor,
            Law::Quantized { factor, precision } => round_to(si / factor, precision),
            Law::Affine { factor, offset } => (si - offset) / factor,
            Law::Caliber(_) => si / self.law.factor(),
        }
    }

    /// Convert a value in this unit to SI.
    ///
    /// A caliber unit without a usable reference returns NaN.
    pub fn to_si(&self, display: f64) -> f64 {
        match self.law {
            Law::Linear { factor } | Law::Quantized { factor, .. } => display * factor,
            Law::Affine { factor, offset } => display * factor + offset,
            Law::Caliber(_) => display * self.law.factor(),
        }
    }

    /// Like [`Unit::to_display`], failing instead of returning NaN
    pub fn checked_to_display(&self, si: f64) -> Result<f64, UnitError> {
        self.ensure_bound()?;
        Ok(self.to_display(si))
    }

    /// Like [`Unit::to_si`], failing instead of returning NaN
    pub fn checked_to_si(&self, display: f64) -> Result<f64, UnitError> {
        self.ensure_bound()?;
        Ok(self.to_si(display))
    }

    fn ensure_bound(&self) -> Result<(), UnitError> {
        if self.is_context_bound() && self.caliber_diameter().is_none() {
            return Err(UnitError::UnboundContext(self.symbol.clone()));
        }
        Ok(())
    }

    /// Round a display value the way this unit presents it
    pub fn round(&self, display: f64) -> f64 {
        if let Law::Quantized { precision, .. } = self.law {
            return round_to(display, precision);
        }
        match self.style {
            Style::Fixed(decimals) | Style::UpTo(decimals) => round_decimals(display, decimals),
            Style::Significant => round_significant(display, 3),
        }
    }

    /// Format an SI value in this unit, without the symbol
    pub fn format(&self, si: f64) -> String {
        self.style.render(self.to_display(si))
    }

    /// Format an SI value in this unit followed by the symbol
    pub fn format_with_symbol(&self, si: f64) -> String {
        format!("{}{}{}", self.format(si), self.separator(), self.symbol)
    }

    /// Separator between value and symbol: none for pure punctuation symbols
    /// such as `%`, `\u{2030}`, `\u{b0}` and the zero-width space
    pub fn separator(&self) -> &'static str {
        if self.symbol.chars().any(char::is_alphanumeric) {
            " "
        } else {
            ""
        }
    }
}

impl fmt::Display for Unit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

fn check_factor(factor: f64) -> Result<(), &'static str> {
    if factor.is_finite() && factor != 0.0 {
        Ok(())
    } else {
        Err("factor must be finite and non-zero")
    }
}

/// Round half away from zero to a multiple of `precision`.
///
/// Unit fractions (0.1, 0.01, 0.25) are handled through their integer
/// reciprocal so that the result is the double nearest to the decimal
/// multiple, which keeps the rounding idempotent.
pub(crate) fn round_to(value: f64, precision: f64) -> f64 {
    let inverse = 1.0 / precision;
    let scale = inverse.round();
    if precision < 1.0 && (inverse - scale).abs() < 1e-9 * scale {
        (value * scale).round() / scale
    } else {
        (value / precision).round() * precision
    }
}

fn round_decimals(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32 - digits + 1;
    if magnitude < 0 {
        let scale = 10f64.powi(-magnitude);
        (value * scale).round() / scale
    } else {
        let step = 10f64.powi(magnitude);
        (value / step).round() * step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millimeter() -> Unit<'static> {
        Unit::linear("mm", 0.001)
    }

    fn fahrenheit() -> Unit<'static> {
        Unit::affine("\u{b0}F", 5.0 / 9.0, 459.67 * 5.0 / 9.0)
    }

    fn bar() -> Unit<'static> {
        Unit::quantized("bar", 0.001, 1.0e5)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_linear_conversion() {
        let mm = millimeter();
        assert!(close(mm.to_si(5.0), 0.005));
        assert!(close(mm.to_display(0.005), 5.0));
        for x in [0.0, 1e-6, 0.3, -2.5, 42.0, 1.0e5] {
            assert!(close(mm.to_si(mm.to_display(x)), x), "round trip of {}", x);
        }
    }

    #[test]
    fn test_affine_conversion() {
        let f = fahrenheit();
        assert!(close(f.to_display(273.15), 32.0));
        assert!(close(f.to_display(373.15), 212.0));
        assert!(close(f.to_si(-40.0), 233.15));
        assert!(close(f.to_si(f.to_display(300.0)), 300.0));
    }

    #[test]
    fn test_quantized_conversion() {
        let b = bar();
        assert_eq!(b.to_display(101_325.0), 1.013);
        // input values are converted as given
        assert!(close(b.to_si(1.0134), 101_340.0));
        let shown = b.to_display(123_456.7);
        assert_eq!(round_to(shown, 0.001), shown);
        assert_eq!(b.format(101_325.0), "1.013");
    }

    #[test]
    fn test_quantized_with_non_decimal_precision() {
        let unit = Unit::quantized("x", 0.3, 1.0);
        assert_eq!(unit.to_display(0.5), 0.6);
        assert_eq!(unit.format(0.5), "0.6");
        assert_eq!(unit.format(1.0), "0.9");
        assert_eq!(Unit::quantized("q", 0.25, 1.0).format(0.3), "0.25");
        assert_eq!(round_to(7.0, 2.5), 7.5);
    }

    #[test]
    fn test_round_to_is_idempotent() {
        for x in [0.1234, -7.777, 1013.25, 0.005, 99.995] {
            for p in [1.0, 0.1, 0.01, 0.001, 5.0, 0.3, 0.25, 2.5] {
                let once = round_to(x, p);
                assert_eq!(round_to(once, p), once, "{} at {}", x, p);
            }
        }
    }

    #[test]
    fn test_degree() {
        let deg = Unit::degree();
        assert!(close(deg.to_display(PI), 180.0));
        assert_eq!(deg.format(PI / 4.0), "45");
        assert_eq!(deg.format_with_symbol(PI / 4.0), "45\u{b0}");
        assert_eq!(deg.round(12.34), 12.3);
    }

    #[test]
    fn test_separator() {
        assert_eq!(millimeter().format_with_symbol(0.005), "5 mm");
        assert_eq!(Unit::quantized("%", 1.0, 0.01).format_with_symbol(0.126), "13%");
        assert_eq!(Unit::quantized(ZWSP, 0.01, 1.0).separator(), "");
        assert_eq!(fahrenheit().separator(), " ");
    }

    #[test]
    fn test_caliber_bound() {
        let diameter = 0.05_f64;
        let cal = Unit::caliber(&diameter);
        assert!(cal.is_context_bound());
        assert!(close(cal.to_display(0.1), 2.0));
        assert!(close(cal.to_si(1.5), 0.075));
        assert_eq!(cal.caliber_diameter(), Some(0.05));
        assert_eq!(cal.format_with_symbol(0.1), "2 cal");
    }

    #[test]
    fn test_caliber_unbound() {
        let cal = Unit::unbound_caliber();
        assert!(cal.to_display(0.1).is_nan());
        assert!(cal.to_si(1.0).is_nan());
        assert_eq!(cal.format(0.1), "N/A");
        assert_eq!(
            cal.checked_to_display(0.1),
            Err(UnitError::UnboundContext("cal".to_string()))
        );
        assert!(millimeter().checked_to_si(1.0).is_ok());
    }

    #[test]
    fn test_caliber_equality_by_reference() {
        let a = 0.05_f64;
        let b = 0.05_f64;
        assert_eq!(Unit::caliber(&a), Unit::caliber(&a));
        assert_ne!(Unit::caliber(&a), Unit::caliber(&b));
        assert_eq!(Unit::unbound_caliber(), Unit::unbound_caliber());
        assert_ne!(Unit::unbound_caliber(), Unit::caliber(&a));
    }

    #[test]
    fn test_validate() {
        assert!(millimeter().validate().is_ok());
        assert!(Unit::linear("", 1.0).validate().is_err());
        assert!(Unit::linear("x", 0.0).validate().is_err());
        assert!(Unit::linear("x", f64::INFINITY).validate().is_err());
        assert!(Unit::quantized("x", 0.0, 1.0).validate().is_err());
        assert!(Unit::affine("x", 1.0, f64::NAN).validate().is_err());
        assert!(Unit::unbound_caliber().validate().is_ok());
    }

    #[test]
    fn test_round() {
        assert_eq!(millimeter().round(12.345), 12.3);
        assert_eq!(millimeter().round(0.012345), 0.0123);
        assert_eq!(millimeter().round(12345.0), 12300.0);
        assert_eq!(bar().round(1.23456), 1.235);
    }
}
