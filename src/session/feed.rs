//! Streaming feed driving a [`SessionMonitor`]
//!
//! One feed owns one streaming connection for the lifetime of one page view.
//! Frames are applied to the monitor strictly in arrival order by a single
//! task, and every transition is published as a [`MonitorSnapshot`] through a
//! watch channel. Dropping the feed aborts the task and closes the transport;
//! nothing fires after disposal.

use super::{BillInfo, LiveTelemetry, MonitorState, SessionMonitor};
use crate::config::StreamConfig;
use crate::error::{AmporaError, Result};
use crate::logging::get_logger;
use futures_util::StreamExt;
use std::collections::VecDeque;
use std::pin::Pin;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Whose charging activity the feed is scoped to.
///
/// The identity is an explicit constructor input; nothing is read from
/// ambient storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionScope {
    /// A single user's active session
    User(String),

    /// All sessions visible to an operator
    Operator,
}

impl SessionScope {
    /// Query-string fragment selecting this scope on the feed endpoint
    pub fn query(&self) -> String {
        match self {
            SessionScope::User(user_id) => format!("userId={}", user_id),
            SessionScope::Operator => "role=operator".to_string(),
        }
    }
}

/// Build the feed URL for a scope from stream configuration
pub fn feed_url(config: &StreamConfig, scope: &SessionScope) -> String {
    format!(
        "{}{}?{}",
        config.base_url.trim_end_matches('/'),
        config.path,
        scope.query()
    )
}

/// Transport seam: anything that yields raw stream frames in order.
///
/// `next_frame` returns `Ok(None)` when the peer closed the stream.
#[async_trait::async_trait]
pub trait FrameSource: Send {
    async fn connect(&mut self) -> Result<()>;
    async fn next_frame(&mut self) -> Result<Option<String>>;
}

/// Frame source over a line-delimited event stream served by the backend.
///
/// Payload units arrive as `data: <json>` lines; comment and event-name
/// lines are skipped. One payload line is one self-describing message.
pub struct EventStreamSource {
    url: String,
    auth_token: Option<String>,
    timeout_secs: u64,
    stream: Option<Pin<Box<dyn futures_util::Stream<Item = reqwest::Result<bytes::Bytes>> + Send>>>,
    buffer: Vec<u8>,
    pending: VecDeque<String>,
    closed: bool,
}

impl EventStreamSource {
    /// Create a source for the given feed URL. The bearer token, when
    /// present, authenticates the subscription.
    pub fn new(url: String, auth_token: Option<String>, timeout_secs: u64) -> Self {
        Self {
            url,
            auth_token,
            timeout_secs,
            stream: None,
            buffer: Vec::new(),
            pending: VecDeque::new(),
            closed: false,
        }
    }

    /// Split buffered bytes into complete lines and queue payload lines
    fn drain_buffer(&mut self) {
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(payload) = line.strip_prefix("data:") {
                let payload = payload.trim_start();
                if !payload.is_empty() {
                    self.pending.push_back(payload.to_string());
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl FrameSource for EventStreamSource {
    async fn connect(&mut self) -> Result<()> {
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()?;
        let mut req = client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "text/event-stream");
        if let Some(token) = self.auth_token.as_deref() {
            req = req.bearer_auth(token.trim());
        }
        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(AmporaError::stream(format!(
                "Feed endpoint returned {}",
                resp.status()
            )));
        }
        self.stream = Some(Box::pin(resp.bytes_stream()));
        Ok(())
    }

    async fn next_frame(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(frame) = self.pending.pop_front() {
                return Ok(Some(frame));
            }
            if self.closed {
                return Ok(None);
            }
            let Some(stream) = self.stream.as_mut() else {
                return Err(AmporaError::stream("Feed not connected"));
            };
            match stream.next().await {
                Some(Ok(chunk)) => {
                    self.buffer.extend_from_slice(&chunk);
                    self.drain_buffer();
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    // Flush an unterminated final line before reporting close
                    self.closed = true;
                    if !self.buffer.is_empty() {
                        self.buffer.push(b'\n');
                        self.drain_buffer();
                    }
                }
            }
        }
    }
}

/// Frame source fed through an in-process channel; used in tests and demos
pub struct ChannelSource {
    rx: mpsc::UnboundedReceiver<String>,
}

impl ChannelSource {
    /// Create a source and the sender that scripts it
    pub fn new() -> (mpsc::UnboundedSender<String>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

#[async_trait::async_trait]
impl FrameSource for ChannelSource {
    async fn connect(&mut self) -> Result<()> {
        Ok(())
    }

    async fn next_frame(&mut self) -> Result<Option<String>> {
        Ok(self.rx.recv().await)
    }
}

/// Commands accepted by a running feed
#[derive(Debug, Clone, Copy)]
pub enum FeedCommand {
    /// Clear the terminal state without closing the connection
    Reset,
}

/// Point-in-time view of the monitor, published after every transition
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSnapshot {
    pub state: MonitorState,
    pub connected: bool,
    pub telemetry: LiveTelemetry,
    pub bill: Option<BillInfo>,
}

fn snapshot_of(monitor: &SessionMonitor) -> MonitorSnapshot {
    MonitorSnapshot {
        state: monitor.state(),
        connected: monitor.connected(),
        telemetry: monitor.telemetry(),
        bill: monitor.bill(),
    }
}

/// A running session feed: one connection, one consuming task.
///
/// The handle is the disposal point; dropping it aborts the task so no
/// callback can fire after teardown. Feeds are independent and un-pooled.
pub struct SessionFeed {
    task: JoinHandle<()>,
    snapshot_rx: watch::Receiver<MonitorSnapshot>,
    cmd_tx: mpsc::UnboundedSender<FeedCommand>,
}

impl SessionFeed {
    /// Spawn the consuming task over the given transport
    pub fn spawn(mut source: Box<dyn FrameSource>) -> Self {
        let monitor = SessionMonitor::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(snapshot_of(&monitor));
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<FeedCommand>();

        let task = tokio::spawn(async move {
            let logger = get_logger("feed");
            let mut monitor = monitor;

            match source.connect().await {
                Ok(()) => monitor.on_connected(),
                Err(e) => {
                    // Establishment failure surfaces only as connected=false
                    logger.warn(&format!("Feed connection failed: {}", e));
                    monitor.on_disconnected();
                    let _ = snapshot_tx.send(snapshot_of(&monitor));
                    return;
                }
            }
            let _ = snapshot_tx.send(snapshot_of(&monitor));

            loop {
                tokio::select! {
                    cmd = cmd_rx.recv() => match cmd {
                        Some(FeedCommand::Reset) => {
                            monitor.reset();
                            let _ = snapshot_tx.send(snapshot_of(&monitor));
                        }
                        None => break,
                    },
                    frame = source.next_frame() => match frame {
                        Ok(Some(frame)) => {
                            monitor.apply_frame(&frame);
                            let _ = snapshot_tx.send(snapshot_of(&monitor));
                        }
                        Ok(None) => {
                            monitor.on_disconnected();
                            let _ = snapshot_tx.send(snapshot_of(&monitor));
                            break;
                        }
                        Err(e) => {
                            logger.warn(&format!("Feed read failed: {}", e));
                            monitor.on_disconnected();
                            let _ = snapshot_tx.send(snapshot_of(&monitor));
                            break;
                        }
                    }
                }
            }
        });

        Self {
            task,
            snapshot_rx,
            cmd_tx,
        }
    }

    /// Connect to the configured feed endpoint and spawn the consuming task
    pub fn connect(config: &StreamConfig, scope: SessionScope, auth_token: Option<String>) -> Self {
        let url = feed_url(config, &scope);
        let source = EventStreamSource::new(url, auth_token, config.connect_timeout_secs);
        Self::spawn(Box::new(source))
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<MonitorSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> MonitorSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Snapshot updates as a stream, for reactive consumers
    pub fn snapshot_stream(&self) -> tokio_stream::wrappers::WatchStream<MonitorSnapshot> {
        tokio_stream::wrappers::WatchStream::new(self.snapshot_rx.clone())
    }

    /// Clear the end-of-session state after the bill dialog is dismissed
    pub fn reset(&self) {
        let _ = self.cmd_tx.send(FeedCommand::Reset);
    }

    /// Whether the consuming task has finished (connection closed or lost)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SessionFeed {
    fn drop(&mut self) {
        // Disposal: no callback may fire after this point
        self.task.abort();
    }
}
