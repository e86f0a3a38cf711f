//! Strict dotted-decimal IPv4 validation
//!
//! Echo services return whatever text they like. Before the body is allowed
//! anywhere near a DNS record it must be exactly four base-10 segments, each
//! in `0..=255`. Only ASCII digits are accepted: no sign, no hex prefix, no
//! whitespace inside the literal.
//!
//! The result is re-serialized from the parsed octets, so leading zeros are
//! normalized away (`"01.2.3.4"` becomes `"1.2.3.4"`).

use std::net::Ipv4Addr;
use thiserror::Error;

/// Number of dot-separated segments in an IPv4 literal
const SEGMENT_COUNT: usize = 4;

/// Reasons an IPv4 literal is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Ipv4Error {
    /// Not exactly four segments
    #[error("wrong segment count: {count} segment(s) in {input:?}, expected 4")]
    SegmentCount { count: usize, input: String },

    /// A segment is not a plain decimal number
    #[error("non-numeric segment {segment:?} in {input:?}")]
    NonNumeric { segment: String, input: String },

    /// A segment is numeric but does not fit in an octet
    #[error("segment out of range: {segment} in {input:?}")]
    OutOfRange { segment: String, input: String },
}

/// Validate a raw IPv4 literal
///
/// Surrounding whitespace is trimmed. Segments are checked left to right,
/// so the first offending segment determines the error.
pub fn validate(raw: &str) -> Result<Ipv4Addr, Ipv4Error> {
    let input = raw.trim();
    let segments: Vec<&str> = input.split('.').collect();

    if segments.len() != SEGMENT_COUNT {
        return Err(Ipv4Error::SegmentCount {
            count: segments.len(),
            input: input.to_string(),
        });
    }

    let mut octets = [0u8; SEGMENT_COUNT];
    for (octet, segment) in octets.iter_mut().zip(&segments) {
        *octet = parse_segment(segment, input)?;
    }

    Ok(Ipv4Addr::from(octets))
}

/// Validate a raw IPv4 literal and return its canonical text form
pub fn canonicalize(raw: &str) -> Result<String, Ipv4Error> {
    validate(raw).map(|ip| ip.to_string())
}

fn parse_segment(segment: &str, input: &str) -> Result<u8, Ipv4Error> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Ipv4Error::NonNumeric {
            segment: segment.to_string(),
            input: input.to_string(),
        });
    }

    // All digits: the only way parsing fails now is overflow
    let out_of_range = || Ipv4Error::OutOfRange {
        segment: segment.to_string(),
        input: input.to_string(),
    };
    let value: u32 = segment.parse().map_err(|_| out_of_range())?;
    u8::try_from(value).map_err(|_| out_of_range())
}
