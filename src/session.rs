//! Live charging session monitoring for Ampora
//!
//! This module reduces the charging telemetry stream into a UI-consumable
//! state: the most recent telemetry reading, a connectivity flag, and the
//! terminal bill produced when the session ends. The state machine here is
//! synchronous and single-consumer; the async feed that drives it from a
//! network stream lives in [`feed`].

pub mod feed;

use crate::logging::get_logger;
use serde::{Deserialize, Serialize};

/// Most recent telemetry reading for an in-progress charging session.
///
/// Overwritten wholesale on every live update; no history is retained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveTelemetry {
    /// Charging current in amperes
    #[serde(default)]
    pub current: f64,

    /// Instantaneous power in kW
    #[serde(default)]
    pub power: f64,

    /// Energy delivered so far in kWh
    #[serde(default)]
    pub energy: f64,

    /// Whether the charger reports an active charge
    #[serde(default)]
    pub charging: bool,
}

/// Final billing figures carried by the terminal session event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BillInfo {
    /// Total energy delivered in kWh
    pub energy: f64,

    /// Amount due in the configured currency
    pub bill: f64,
}

/// Monitor lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitorState {
    /// Connection not yet established
    Connecting,

    /// Connected, no telemetry received yet
    Connected,

    /// At least one live update applied
    Live,

    /// Terminal session event observed; no further telemetry is applied
    Ended,
}

/// One self-describing stream unit, tagged by its `type` discriminator.
///
/// Unrecognized tags fold into `Unknown` and are dropped without touching
/// monitor state.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum StreamMessage {
    #[serde(rename = "LIVE")]
    Live(LiveTelemetry),

    #[serde(rename = "SESSION_END")]
    SessionEnd {
        #[serde(default)]
        energy: f64,
        #[serde(default)]
        bill: f64,
    },

    #[serde(other)]
    Unknown,
}

/// Parse one raw stream frame. Returns `None` for malformed payloads; the
/// caller drops those silently.
pub fn parse_frame(raw: &str) -> Option<StreamMessage> {
    serde_json::from_str(raw).ok()
}

/// State machine over one charging session's stream.
///
/// Owns no connection itself; `apply_frame` is fed by whichever transport
/// drives it. Messages are applied strictly in arrival order, and there is
/// never a concurrent writer, so no locking is needed here.
pub struct SessionMonitor {
    state: MonitorState,
    connected: bool,
    telemetry: LiveTelemetry,
    bill: Option<BillInfo>,
    logger: crate::logging::StructuredLogger,
}

impl SessionMonitor {
    /// Create a monitor in the pre-connection state
    pub fn new() -> Self {
        let logger = get_logger("session");
        Self {
            state: MonitorState::Connecting,
            connected: false,
            telemetry: LiveTelemetry::default(),
            bill: None,
            logger,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Connectivity flag. Connection failure surfaces only here; there is no
    /// distinct error state for a display-only monitor.
    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn telemetry(&self) -> LiveTelemetry {
        self.telemetry
    }

    pub fn bill(&self) -> Option<BillInfo> {
        self.bill
    }

    /// Whether the terminal session event has been observed
    pub fn session_ended(&self) -> bool {
        self.state == MonitorState::Ended
    }

    /// Record connection establishment
    pub fn on_connected(&mut self) {
        self.connected = true;
        if self.state == MonitorState::Connecting {
            self.state = MonitorState::Connected;
        }
        self.logger.debug("Charging feed connected");
    }

    /// Record connection loss. No reconnection is attempted; a fresh monitor
    /// is the explicit way to reconnect.
    pub fn on_disconnected(&mut self) {
        self.connected = false;
        self.logger.debug("Charging feed disconnected");
    }

    /// Apply one raw frame from the stream. Malformed or unknown payloads
    /// are ignored; after the terminal event every frame is ignored.
    pub fn apply_frame(&mut self, raw: &str) {
        match parse_frame(raw) {
            Some(msg) => self.apply_message(msg),
            None => self.logger.trace("Dropped malformed stream frame"),
        }
    }

    /// Apply one parsed message in arrival order
    pub fn apply_message(&mut self, msg: StreamMessage) {
        if self.state == MonitorState::Ended {
            // Terminal: first session-end wins, later frames are discarded
            return;
        }
        match msg {
            StreamMessage::Live(telemetry) => {
                self.telemetry = telemetry;
                self.state = MonitorState::Live;
            }
            StreamMessage::SessionEnd { energy, bill } => {
                self.logger
                    .info(&format!("Session ended: {:.3} kWh, bill {:.2}", energy, bill));
                self.bill = Some(BillInfo { energy, bill });
                self.state = MonitorState::Ended;
            }
            StreamMessage::Unknown => {
                self.logger.trace("Dropped unrecognized stream message");
            }
        }
    }

    /// Clear the terminal state after the user dismisses the bill dialog.
    ///
    /// Returns to the pre-session display state without touching the
    /// connection; the last telemetry reading is kept on screen.
    pub fn reset(&mut self) {
        self.bill = None;
        self.state = if self.connected {
            MonitorState::Connected
        } else {
            MonitorState::Connecting
        };
    }
}

impl Default for SessionMonitor {
    fn default() -> Self {
        Self::new()
    }
}
