//! Inbound message frame parser
//!
//! A delivered message arrives as a header line and a body line:
//!
//! ```text
//! +CMT: "+15551234567","","25/08/23,14:02:11-24"\r\n
//! Ready\r\n
//! ```
//!
//! The sender is the text between the first and second quote; the body is
//! the remainder after the header line terminator, up to the next line
//! terminator.

use heapless::String;

/// Maximum sender number length
pub const SENDER_CAP: usize = 24;

/// Maximum body length (one SMS)
pub const BODY_CAP: usize = 160;

/// One parsed inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    /// Sender number as quoted in the frame
    pub sender: String<SENDER_CAP>,
    /// Message body with the line terminator stripped
    pub body: String<BODY_CAP>,
}

/// Frame parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Frame is not valid UTF-8
    InvalidEncoding,
    /// No quoted sender field found
    MissingSender,
    /// No body line after the header
    MissingBody,
    /// Sender or body exceeded its capacity
    TooLong,
}

/// Parse a raw transport frame into a structured message
pub fn parse_frame(raw: &[u8]) -> Result<SmsMessage, ParseError> {
    let text = core::str::from_utf8(raw).map_err(|_| ParseError::InvalidEncoding)?;

    let first_quote = text.find('"').ok_or(ParseError::MissingSender)?;
    let after_quote = &text[first_quote + 1..];
    let second_quote = after_quote.find('"').ok_or(ParseError::MissingSender)?;
    let sender_str = &after_quote[..second_quote];

    let after_header = &after_quote[second_quote + 1..];
    let newline = after_header.find('\n').ok_or(ParseError::MissingBody)?;
    let body_line = &after_header[newline + 1..];
    let body_end = body_line
        .find(|c: char| c == '\r' || c == '\n')
        .unwrap_or(body_line.len());
    let body_str = &body_line[..body_end];

    let mut sender: String<SENDER_CAP> = String::new();
    sender.push_str(sender_str).map_err(|_| ParseError::TooLong)?;
    let mut body: String<BODY_CAP> = String::new();
    body.push_str(body_str).map_err(|_| ParseError::TooLong)?;

    Ok(SmsMessage { sender, body })
}
