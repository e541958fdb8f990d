//! Stateless string converters
//!
//! Number base conversion, base64 and epoch/date formatting. Each converter
//! is a pure function from one string to another; outputs are never case
//! folded.

use crate::error::ConversionError;
use crate::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Epoch values above this are taken to be milliseconds
pub const MILLIS_THRESHOLD: f64 = 10_000_000_000.0;

/// Date layout used in both directions
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Encoded base64 is wrapped at this many characters per line
pub const BASE64_LINE_LENGTH: usize = 64;

/// Converters available alongside the digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Converter {
    /// Decimal integer to uppercase hexadecimal
    DecToHex,
    /// Hexadecimal to unsigned decimal
    HexToDec,
    /// UTF-8 text to base64
    StringToBase64,
    /// Base64 to UTF-8 text
    Base64ToString,
    /// Unix epoch (seconds or milliseconds) to a local date
    EpochToDate,
    /// Local date to Unix epoch seconds
    DateToEpoch,
}

impl Converter {
    /// Every converter, in presentation order
    pub const ALL: [Converter; 6] = [
        Converter::DecToHex,
        Converter::HexToDec,
        Converter::StringToBase64,
        Converter::Base64ToString,
        Converter::EpochToDate,
        Converter::DateToEpoch,
    ];

    /// Stable identifier, also accepted by `FromStr`
    pub fn id(&self) -> &'static str {
        match self {
            Converter::DecToHex => "dec-to-hex",
            Converter::HexToDec => "hex-to-dec",
            Converter::StringToBase64 => "string-to-base64",
            Converter::Base64ToString => "base64-to-string",
            Converter::EpochToDate => "epoch-to-date",
            Converter::DateToEpoch => "date-to-epoch",
        }
    }

    /// Display name for user interfaces
    pub fn display_name(&self) -> &'static str {
        match self {
            Converter::DecToHex => "Dec -> Hex",
            Converter::HexToDec => "Hex -> Dec",
            Converter::StringToBase64 => "String -> Base64",
            Converter::Base64ToString => "Base64 -> String",
            Converter::EpochToDate => "Epoch -> Date",
            Converter::DateToEpoch => "Date -> Epoch",
        }
    }

    /// Apply the converter to an input string
    pub fn apply(&self, input: &str) -> std::result::Result<String, ConversionError> {
        match self {
            Converter::DecToHex => dec_to_hex(input),
            Converter::HexToDec => hex_to_dec(input),
            Converter::StringToBase64 => Ok(string_to_base64(input)),
            Converter::Base64ToString => base64_to_string(input),
            Converter::EpochToDate => epoch_to_date_in(input, &Local),
            Converter::DateToEpoch => date_to_epoch_in(input, &Local),
        }
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Converter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Converter::ALL
            .into_iter()
            .find(|converter| converter.id() == normalized)
            .ok_or_else(|| Error::unsupported_algorithm(s))
    }
}

/// Run a converter, lifting its failure into the library error type
pub fn convert(converter: Converter, input: &str) -> Result<String> {
    converter.apply(input).map_err(Error::from)
}

/// Decimal to uppercase hexadecimal, at least two characters wide
///
/// Narrow values are padded with a leading space (`"5"` becomes `" 5"`);
/// negative values render as their 64-bit two's complement.
pub fn dec_to_hex(input: &str) -> std::result::Result<String, ConversionError> {
    use std::num::IntErrorKind;

    let value: i64 = input.parse().map_err(|err: std::num::ParseIntError| {
        match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                ConversionError::overflow(Converter::DecToHex.id(), err.to_string())
            }
            _ => ConversionError::parse(Converter::DecToHex.id(), err.to_string()),
        }
    })?;

    Ok(format!("{value:2X}"))
}

/// Hexadecimal (optionally `0x` prefixed) to unsigned decimal
///
/// Surrounding whitespace is ignored, so the padded output of
/// [`dec_to_hex`] converts back.
pub fn hex_to_dec(input: &str) -> std::result::Result<String, ConversionError> {
    let id = Converter::HexToDec.id();
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(ConversionError::parse(id, "no hexadecimal digits"));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ConversionError::parse(id, format!("invalid hexadecimal digit '{bad}'")));
    }

    // Every character is a hex digit, so the only remaining failure is size
    u64::from_str_radix(digits, 16)
        .map(|value| value.to_string())
        .map_err(|_| ConversionError::overflow(id, "value does not fit in 64 bits"))
}

/// UTF-8 text to standard padded base64, wrapped at 64 columns with CRLF
pub fn string_to_base64(input: &str) -> String {
    let encoded = STANDARD.encode(input.as_bytes());
    let mut wrapped =
        String::with_capacity(encoded.len() + encoded.len() / BASE64_LINE_LENGTH * 2);

    for (i, ch) in encoded.chars().enumerate() {
        if i > 0 && i % BASE64_LINE_LENGTH == 0 {
            wrapped.push_str("\r\n");
        }
        wrapped.push(ch);
    }
    wrapped
}

/// Standard base64 to UTF-8 text
///
/// Characters outside the base64 alphabet (line breaks, spaces, anything
/// else) are skipped before decoding.
pub fn base64_to_string(input: &str) -> std::result::Result<String, ConversionError> {
    let id = Converter::Base64ToString.id();
    let filtered: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect();

    let bytes = STANDARD
        .decode(filtered.as_bytes())
        .map_err(|err| ConversionError::parse(id, err.to_string()))?;

    String::from_utf8(bytes).map_err(|err| ConversionError::encoding(id, err.to_string()))
}

/// Unix epoch to a local `yyyy-MM-dd HH:mm:ss` date
pub fn epoch_to_date(input: &str) -> std::result::Result<String, ConversionError> {
    epoch_to_date_in(input, &Local)
}

/// Unix epoch to a date in the given time zone
///
/// `"now"` means the current time. Values above [`MILLIS_THRESHOLD`] are
/// milliseconds; fractional seconds are dropped.
pub fn epoch_to_date_in<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
) -> std::result::Result<String, ConversionError>
where
    Tz::Offset: fmt::Display,
{
    let id = Converter::EpochToDate.id();

    let instant: DateTime<Utc> = if input == "now" {
        Utc::now()
    } else {
        let mut seconds: f64 = input
            .parse()
            .map_err(|err: std::num::ParseFloatError| ConversionError::parse(id, err.to_string()))?;
        if !seconds.is_finite() {
            return Err(ConversionError::parse(id, "epoch must be a finite number"));
        }
        if seconds > MILLIS_THRESHOLD {
            seconds /= 1000.0;
        }

        let whole = seconds.floor();
        if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
            return Err(ConversionError::overflow(id, "epoch out of range"));
        }
        DateTime::from_timestamp(whole as i64, 0)
            .ok_or_else(|| ConversionError::overflow(id, "epoch out of range"))?
    };

    Ok(instant.with_timezone(tz).format(DATE_FORMAT).to_string())
}

/// Local `yyyy-MM-dd HH:mm:ss` date to Unix epoch seconds
pub fn date_to_epoch(input: &str) -> std::result::Result<String, ConversionError> {
    date_to_epoch_in(input, &Local)
}

/// Date in the given time zone to Unix epoch seconds
///
/// `"now"` means the current time. A 16 character `yyyy-MM-dd HH:mm` input
/// is completed with `:00`.
pub fn date_to_epoch_in<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
) -> std::result::Result<String, ConversionError> {
    let id = Converter::DateToEpoch.id();

    if input == "now" {
        return Ok(Utc::now().timestamp().to_string());
    }

    let source = if input.chars().count() == 16 {
        format!("{input}:00")
    } else {
        input.to_string()
    };

    let naive = NaiveDateTime::parse_from_str(&source, DATE_FORMAT)
        .map_err(|err| ConversionError::parse(id, err.to_string()))?;
    let local = tz
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| ConversionError::parse(id, "time does not exist in this time zone"))?;

    Ok(local.timestamp().to_string())
}
