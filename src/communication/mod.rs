//! Communication protocols
//!
//! The payload's only remote channel is a short-message transport over a
//! serial AT-command modem.

pub mod sms;
