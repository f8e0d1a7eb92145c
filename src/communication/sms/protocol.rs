//! Command protocol state machine
//!
//! Startup path: `PoweredOff → Booting → AwaitingHandshake → Operational`.
//! The handshake runs only on the first program start; its reply must be
//! the exact literal `Ready`, and anything else is a fatal protocol
//! violation. On later starts a command menu is sent instead and the
//! machine goes straight to operational.
//!
//! While operational the machine is polled once per outer scheduler cycle.
//! A queued confirmation ("AwaitingConfirmation") is sent on the next poll
//! before any new inbound message is read.

use core::fmt::Write as _;

use heapless::{String, Vec};

use crate::communication::sms::link::{SmsLink, FRAME_CAP};
use crate::communication::sms::parser::{parse_frame, SmsMessage};
use crate::core::{FatalError, PayloadConfig};
use crate::devices::{PositionReading, StatusIndicator};
use crate::platform::{GpioInterface, TimerInterface, UartInterface};

/// Expected handshake reply, compared exactly
const HANDSHAKE_REPLY: &str = "Ready";

/// Outbound handshake request sent on first start
const HANDSHAKE_REQUEST: &str = "Payload online. Reply 'Ready' to open the command channel.";

/// Command menu sent on subsequent starts in place of the handshake
const COMMAND_MENU: &str = "Payload online. Commands: 1=LED check, 2=position link, 3=buzzer.";

/// Confirmation text capacity
const CONFIRM_CAP: usize = 16;

/// Outbound message body capacity
const BODY_TEXT_CAP: usize = 160;

/// Handshake-wait blink period, ms
const HANDSHAKE_BLINK_MS: u32 = 250;

/// Grace delay letting a frame finish arriving before it is read, ms
const FRAME_SETTLE_MS: u32 = 100;

/// Protocol state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolState {
    /// Modem unpowered
    PoweredOff,
    /// Transport configuration sequence in progress
    Booting,
    /// Blocked waiting for the handshake reply
    AwaitingHandshake,
    /// Normal command operation
    Operational,
    /// A confirmation is queued for the next cycle
    AwaitingConfirmation,
}

/// Command protocol state machine
///
/// Owns the protocol state and the pending confirmation text; the link,
/// timer, and indicator are borrowed per call from the control loop.
#[derive(Debug)]
pub struct CommandProtocol {
    state: ProtocolState,
    pending_confirmation: Option<String<CONFIRM_CAP>>,
    recipient: &'static str,
    first_pass: bool,
}

impl CommandProtocol {
    /// Create the protocol in the powered-off state
    pub fn new(config: &PayloadConfig) -> Self {
        Self {
            state: ProtocolState::PoweredOff,
            pending_confirmation: None,
            recipient: config.recipient,
            first_pass: config.first_pass,
        }
    }

    /// Current protocol state
    pub fn state(&self) -> ProtocolState {
        self.state
    }

    /// Queued confirmation text, if any (for test verification)
    pub fn pending_confirmation(&self) -> Option<&str> {
        self.pending_confirmation.as_deref()
    }

    /// Power-on path: configure the transport, then request the handshake
    /// (first start) or send the command menu (later starts)
    ///
    /// After a first-pass power-on the machine is in `AwaitingHandshake`
    /// and [`CommandProtocol::await_handshake`] must run before sampling
    /// starts.
    pub fn power_on<U, T>(
        &mut self,
        link: &mut SmsLink<U>,
        timer: &mut T,
    ) -> Result<(), FatalError>
    where
        U: UartInterface,
        T: TimerInterface,
    {
        self.state = ProtocolState::Booting;
        link.configure(timer).map_err(FatalError::Link)?;

        if self.first_pass {
            link.send_text(timer, self.recipient, HANDSHAKE_REQUEST)
                .map_err(FatalError::Link)?;
            self.state = ProtocolState::AwaitingHandshake;
        } else {
            link.send_text(timer, self.recipient, COMMAND_MENU)
                .map_err(FatalError::Link)?;
            self.state = ProtocolState::Operational;
        }
        Ok(())
    }

    /// Block until the handshake reply arrives, blinking the indicator
    ///
    /// A reply that does not parse or is not exactly `Ready` is a fatal
    /// protocol violation. No-op unless the machine is awaiting the
    /// handshake.
    pub fn await_handshake<U, T, G>(
        &mut self,
        link: &mut SmsLink<U>,
        timer: &mut T,
        indicator: &mut StatusIndicator<G>,
    ) -> Result<(), FatalError>
    where
        U: UartInterface,
        T: TimerInterface,
        G: GpioInterface,
    {
        if self.state != ProtocolState::AwaitingHandshake {
            return Ok(());
        }

        let frame = Self::wait_for_reply(link, timer, indicator)?;
        indicator.off().map_err(FatalError::Platform)?;

        let msg = parse_frame(&frame).map_err(|_| FatalError::HandshakeViolation)?;
        if msg.body.as_str() == HANDSHAKE_REPLY {
            crate::log_info!("handshake confirmed by {}", msg.sender.as_str());
            self.state = ProtocolState::Operational;
            Ok(())
        } else {
            Err(FatalError::HandshakeViolation)
        }
    }

    /// One protocol poll, called once per outer scheduler cycle
    ///
    /// Sends any queued confirmation first, then reads and dispatches at
    /// most one inbound message.
    pub fn poll<U, T, G>(
        &mut self,
        link: &mut SmsLink<U>,
        timer: &mut T,
        indicator: &mut StatusIndicator<G>,
        latest_position: &PositionReading,
    ) -> Result<(), FatalError>
    where
        U: UartInterface,
        T: TimerInterface,
        G: GpioInterface,
    {
        match self.state {
            ProtocolState::Operational | ProtocolState::AwaitingConfirmation => {}
            _ => return Ok(()),
        }

        if self.state == ProtocolState::AwaitingConfirmation {
            if let Some(text) = self.pending_confirmation.take() {
                link.send_text(timer, self.recipient, text.as_str())
                    .map_err(FatalError::Link)?;
            }
            self.state = ProtocolState::Operational;
        }

        if !link.available() {
            return Ok(());
        }
        timer.delay_ms(FRAME_SETTLE_MS).map_err(FatalError::Platform)?;
        let frame = link.read_frame(timer).map_err(FatalError::Link)?;

        match parse_frame(&frame) {
            Ok(msg) => self.dispatch(&msg, link, timer, indicator, latest_position),
            Err(_) => {
                crate::log_warn!("discarding unparseable inbound frame ({} bytes)", frame.len());
                Ok(())
            }
        }
    }

    fn dispatch<U, T, G>(
        &mut self,
        msg: &SmsMessage,
        link: &mut SmsLink<U>,
        timer: &mut T,
        indicator: &mut StatusIndicator<G>,
        latest_position: &PositionReading,
    ) -> Result<(), FatalError>
    where
        U: UartInterface,
        T: TimerInterface,
        G: GpioInterface,
    {
        let body = msg.body.as_str();
        if body.len() != 1 {
            crate::log_warn!("ignoring malformed command body of length {}", body.len());
            return Ok(());
        }

        match body.as_bytes()[0] {
            b'1' => {
                indicator.command_pulse(timer).map_err(FatalError::Platform)?;
                self.queue_confirmation("LED");
            }
            b'2' => {
                self.send_position_link(link, timer, latest_position)?;
            }
            b'3' => {
                // Reserved actuator command; hardware not fitted yet
                self.queue_confirmation("Buzzer");
            }
            b'0'..=b'9' => {
                crate::log_warn!("unmapped command code {}", body);
            }
            _ => {
                crate::log_warn!("non-numeric command body {}", body);
            }
        }
        Ok(())
    }

    fn send_position_link<U, T>(
        &mut self,
        link: &mut SmsLink<U>,
        timer: &mut T,
        position: &PositionReading,
    ) -> Result<(), FatalError>
    where
        U: UartInterface,
        T: TimerInterface,
    {
        let mut text: String<BODY_TEXT_CAP> = String::new();
        if write!(
            text,
            "Current position: http://maps.google.com/maps?q={:.6},{:.6}",
            position.latitude, position.longitude
        )
        .is_err()
        {
            crate::log_warn!("position link did not fit the message buffer");
            return Ok(());
        }
        link.send_text(timer, self.recipient, text.as_str())
            .map_err(FatalError::Link)
    }

    fn queue_confirmation(&mut self, text: &str) {
        let mut confirmation: String<CONFIRM_CAP> = String::new();
        if confirmation.push_str(text).is_ok() {
            self.pending_confirmation = Some(confirmation);
            self.state = ProtocolState::AwaitingConfirmation;
        }
    }

    fn wait_for_reply<U, T, G>(
        link: &mut SmsLink<U>,
        timer: &mut T,
        indicator: &mut StatusIndicator<G>,
    ) -> Result<Vec<u8, FRAME_CAP>, FatalError>
    where
        U: UartInterface,
        T: TimerInterface,
        G: GpioInterface,
    {
        while !link.available() {
            indicator.blink_step().map_err(FatalError::Platform)?;
            timer.delay_ms(HANDSHAKE_BLINK_MS).map_err(FatalError::Platform)?;
        }
        timer.delay_ms(FRAME_SETTLE_MS).map_err(FatalError::Platform)?;
        link.read_frame(timer).map_err(FatalError::Link)
    }
}
