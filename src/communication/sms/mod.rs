//! SMS command channel
//!
//! Three layers, bottom up:
//! - [`link`]: the AT-command transport over a UART (send text, flush the
//!   inbound buffer, read one raw frame).
//! - [`parser`]: structured extraction of sender and body from a raw
//!   message-delivery frame.
//! - [`protocol`]: the handshake/command state machine dispatching remote
//!   commands and queuing confirmations.

pub mod link;
pub mod parser;
pub mod protocol;

pub use link::{SmsLink, FRAME_CAP};
pub use parser::{parse_frame, ParseError, SmsMessage};
pub use protocol::{CommandProtocol, ProtocolState};
