//! Canonical digital address composition and parsing.
//!
//! The canonical form is hyphenated: `<district code>-<lat cell>-<lon
//! cell>` with an optional trailing 4-digit uniqueness suffix, e.g.
//! `GA-1721-6589` or `GA-1721-6589-0042`. The historical concatenated form
//! (`GA17216589`) is accepted on parse only and never emitted.

use crate::error::{GridpostError, Result};
use crate::grid::GridReference;

/// Fixed length of a district code: region letter plus district letter.
pub const DISTRICT_CODE_LEN: usize = 2;

/// Fixed length of the optional uniqueness suffix.
const SUFFIX_LEN: usize = 4;

/// Outcome of parsing a digital address.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAddress {
    pub district_code: String,
    pub grid_ref: GridReference,
    /// Uniqueness suffix, present only in the canonical 4-segment form.
    pub suffix: Option<String>,
}

/// Composer/parser for digital address strings.
///
/// The codec is fixed-width throughout: a known district-code length and a
/// per-axis cell width, so parsing never has to guess where one field ends
/// and the next begins.
///
/// # Example
///
/// ```rust
/// use gridpost::{AddressCodec, GridReference};
///
/// let codec = AddressCodec::new();
/// let reference = GridReference::new(1721, 6589, 4).unwrap();
///
/// let address = codec.compose("GA", &reference, None).unwrap();
/// assert_eq!(address, "GA-1721-6589");
///
/// let parsed = codec.parse(&address).unwrap();
/// assert_eq!(parsed.district_code, "GA");
/// assert_eq!(parsed.grid_ref, reference);
/// ```
#[derive(Debug, Clone)]
pub struct AddressCodec {
    axis_width: u8,
}

impl AddressCodec {
    /// Codec for the canonical deployment (4 digits per axis).
    pub fn new() -> Self {
        Self { axis_width: 4 }
    }

    /// Codec for a non-canonical grid width.
    pub fn with_axis_width(axis_width: u8) -> Result<Self> {
        if !(1..=9).contains(&axis_width) {
            return Err(GridpostError::InvalidInput(format!(
                "axis width must be between 1 and 9, got {axis_width}"
            )));
        }
        Ok(Self { axis_width })
    }

    /// Compose the canonical address string.
    ///
    /// # Errors
    ///
    /// Returns [`GridpostError::InvalidInput`] when the district code is
    /// not exactly [`DISTRICT_CODE_LEN`] uppercase letters/digits, the grid
    /// reference width does not match this codec, or a provided suffix is
    /// not exactly 4 digits.
    pub fn compose(
        &self,
        district_code: &str,
        reference: &GridReference,
        suffix: Option<&str>,
    ) -> Result<String> {
        if !is_valid_district_code(district_code) {
            return Err(GridpostError::InvalidInput(format!(
                "district code '{district_code}' must be exactly {DISTRICT_CODE_LEN} uppercase letters or digits"
            )));
        }
        if reference.width() != self.axis_width {
            return Err(GridpostError::InvalidInput(format!(
                "grid reference width {} does not match address width {}",
                reference.width(),
                self.axis_width
            )));
        }
        if let Some(suffix) = suffix
            && !is_fixed_digits(suffix, SUFFIX_LEN)
        {
            return Err(GridpostError::InvalidInput(format!(
                "address suffix '{suffix}' must be exactly {SUFFIX_LEN} digits"
            )));
        }

        let width = usize::from(self.axis_width);
        let mut address = format!(
            "{district_code}-{lat:0width$}-{lon:0width$}",
            lat = reference.lat_cell(),
            lon = reference.lon_cell(),
        );
        if let Some(suffix) = suffix {
            address.push('-');
            address.push_str(suffix);
        }
        Ok(address)
    }

    /// Parse a digital address in the canonical hyphenated form or the
    /// legacy concatenated form.
    ///
    /// Validation is strict and all-or-nothing: any deviation from the
    /// fixed widths or the code alphabet fails with
    /// [`GridpostError::InvalidFormat`] carrying the offending input, and
    /// no partially parsed result is ever returned.
    pub fn parse(&self, address: &str) -> Result<ParsedAddress> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(format_error(address, "address is empty"));
        }
        if trimmed.contains('-') {
            self.parse_hyphenated(address, trimmed)
        } else {
            self.parse_concatenated(address, trimmed)
        }
    }

    fn parse_hyphenated(&self, original: &str, text: &str) -> Result<ParsedAddress> {
        let segments: Vec<&str> = text.split('-').collect();
        if segments.len() != 3 && segments.len() != 4 {
            return Err(format_error(
                original,
                "expected <code>-<lat>-<lon> with an optional -<suffix>",
            ));
        }

        let district_code = segments[0];
        if !is_valid_district_code(district_code) {
            return Err(format_error(
                original,
                "district code must be exactly 2 uppercase letters or digits",
            ));
        }

        let width = usize::from(self.axis_width);
        if !is_fixed_digits(segments[1], width) || !is_fixed_digits(segments[2], width) {
            return Err(format_error(
                original,
                "cell segments must each be exactly the configured digit width",
            ));
        }

        let suffix = match segments.get(3) {
            Some(segment) if is_fixed_digits(segment, SUFFIX_LEN) => Some((*segment).to_string()),
            Some(_) => {
                return Err(format_error(
                    original,
                    "suffix segment must be exactly 4 digits",
                ));
            }
            None => None,
        };

        let grid_ref = GridReference::parse(
            &format!("{}{}", segments[1], segments[2]),
            self.axis_width,
        )
        .map_err(|e| format_error(original, &e.to_string()))?;

        Ok(ParsedAddress {
            district_code: district_code.to_string(),
            grid_ref,
            suffix,
        })
    }

    fn parse_concatenated(&self, original: &str, text: &str) -> Result<ParsedAddress> {
        let expected = DISTRICT_CODE_LEN + 2 * usize::from(self.axis_width);
        if text.len() != expected || !text.is_ascii() {
            return Err(format_error(
                original,
                "concatenated form must be the district code followed by the full grid reference",
            ));
        }

        let (district_code, digits) = text.split_at(DISTRICT_CODE_LEN);
        if !is_valid_district_code(district_code) {
            return Err(format_error(
                original,
                "district code must be exactly 2 uppercase letters or digits",
            ));
        }

        let grid_ref = GridReference::parse(digits, self.axis_width)
            .map_err(|e| format_error(original, &e.to_string()))?;

        Ok(ParsedAddress {
            district_code: district_code.to_string(),
            grid_ref,
            suffix: None,
        })
    }
}

impl Default for AddressCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn format_error(address: &str, reason: &str) -> GridpostError {
    GridpostError::InvalidFormat {
        address: address.to_string(),
        reason: reason.to_string(),
    }
}

fn is_valid_district_code(code: &str) -> bool {
    code.len() == DISTRICT_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

fn is_fixed_digits(text: &str, len: usize) -> bool {
    text.len() == len && text.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> GridReference {
        GridReference::new(1721, 6589, 4).expect("valid reference")
    }

    #[test]
    fn compose_parse_round_trip() {
        let codec = AddressCodec::new();

        let address = codec.compose("GA", &reference(), None).expect("compose");
        assert_eq!(address, "GA-1721-6589");

        let parsed = codec.parse(&address).expect("parse");
        assert_eq!(parsed.district_code, "GA");
        assert_eq!(parsed.grid_ref, reference());
        assert_eq!(parsed.suffix, None);
    }

    #[test]
    fn compose_parse_round_trip_with_suffix() {
        let codec = AddressCodec::new();

        let address = codec
            .compose("GA", &reference(), Some("0042"))
            .expect("compose");
        assert_eq!(address, "GA-1721-6589-0042");

        let parsed = codec.parse(&address).expect("parse");
        assert_eq!(parsed.suffix.as_deref(), Some("0042"));
        assert_eq!(parsed.grid_ref, reference());
    }

    #[test]
    fn cell_indices_are_zero_padded() {
        let codec = AddressCodec::new();
        let near_origin = GridReference::new(3, 17, 4).expect("valid");
        let address = codec.compose("GA", &near_origin, None).expect("compose");
        assert_eq!(address, "GA-0003-0017");
    }

    #[test]
    fn legacy_concatenated_form_parses() {
        let codec = AddressCodec::new();
        let parsed = codec.parse("GA17216589").expect("parse");
        assert_eq!(parsed.district_code, "GA");
        assert_eq!(parsed.grid_ref, reference());
        assert_eq!(parsed.suffix, None);
    }

    #[test]
    fn compose_rejects_invalid_inputs() {
        let codec = AddressCodec::new();

        for code in ["", "G", "GAC", "ga", "G!"] {
            assert!(
                matches!(
                    codec.compose(code, &reference(), None),
                    Err(GridpostError::InvalidInput(_))
                ),
                "code '{code}' must be rejected"
            );
        }

        let wrong_width = GridReference::new(12, 34, 3).expect("valid");
        assert!(matches!(
            codec.compose("GA", &wrong_width, None),
            Err(GridpostError::InvalidInput(_))
        ));

        for suffix in ["", "42", "00421", "00x2"] {
            assert!(
                matches!(
                    codec.compose("GA", &reference(), Some(suffix)),
                    Err(GridpostError::InvalidInput(_))
                ),
                "suffix '{suffix}' must be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_malformed_addresses_and_carries_the_input() {
        let codec = AddressCodec::new();

        for input in [
            "",
            "GA",
            "GA-1721",
            "GA-17-6589",
            "GA-1721-65890",
            "GA-1721-6589-42",
            "GA-1721-6589-0042-1",
            "ga-1721-6589",
            "G!-1721-6589",
            "GA-17a1-6589",
            "GA1721659",
            "GA172165891",
            "ga17216589",
            "GAXX216589",
        ] {
            match codec.parse(input) {
                Err(GridpostError::InvalidFormat { address, .. }) => {
                    assert_eq!(address, input, "error must carry the offending input");
                }
                other => panic!("'{input}' must fail with InvalidFormat, got {other:?}"),
            }
        }
    }

    #[test]
    fn digit_district_codes_are_accepted() {
        let codec = AddressCodec::new();
        let address = codec.compose("A9", &reference(), None).expect("compose");
        let parsed = codec.parse(&address).expect("parse");
        assert_eq!(parsed.district_code, "A9");
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let codec = AddressCodec::new();
        let parsed = codec.parse("  GA-1721-6589\n").expect("parse");
        assert_eq!(parsed.district_code, "GA");
    }

    #[test]
    fn non_canonical_width_round_trip() {
        let codec = AddressCodec::with_axis_width(5).expect("valid width");
        let reference = GridReference::new(17214, 65900, 5).expect("valid");

        let address = codec.compose("GA", &reference, None).expect("compose");
        assert_eq!(address, "GA-17214-65900");
        assert_eq!(codec.parse(&address).expect("parse").grid_ref, reference);
        assert_eq!(codec.parse("GA1721465900").expect("parse").grid_ref, reference);
    }
}
