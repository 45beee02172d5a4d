//! mpv-backed audio sink.
//!
//! Architecture:
//!
//! ```text
//!   MpvSink (sync, owned by the coordinator)
//!      │  SinkCommand via unbounded mpsc — fire-and-forget
//!      ▼
//!   driver task ──► writer task ← serialises {command, request_id} → socket
//!      ▲            reader task ← JSON lines from socket
//!      │                ├── response (request_id) → matched oneshot
//!      │                └── unsolicited event     → driver
//!      └── SinkEvent (Ended / PlayRejected) → app event loop
//! ```
//!
//! The coordinator never blocks: a refused play comes back later as
//! `SinkEvent::PlayRejected`, which is exactly the contract the core
//! expects.  When mpv cannot be spawned at all the driver degrades to
//! rejecting every play request, and the page runs silent.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info, warn};

#[cfg(unix)]
use tokio::net::UnixStream;

use showcase_core::platform;
use showcase_core::sink::{AudioSink, SinkEvent};

static NEXT_REQ_ID: AtomicU64 = AtomicU64::new(1);

// ── Sink commands ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum SinkCommand {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    SetVolume(f32),
    SetMuted(bool),
}

/// The synchronous half handed to the coordinator.  Sends are
/// non-blocking; the driver task applies them in order.
pub struct MpvSink {
    tx: mpsc::UnboundedSender<SinkCommand>,
}

impl AudioSink for MpvSink {
    fn load(&mut self, url: &str) {
        let _ = self.tx.send(SinkCommand::Load(url.to_string()));
    }
    fn play(&mut self) {
        let _ = self.tx.send(SinkCommand::Play);
    }
    fn pause(&mut self) {
        let _ = self.tx.send(SinkCommand::Pause);
    }
    fn seek(&mut self, secs: f64) {
        let _ = self.tx.send(SinkCommand::Seek(secs));
    }
    fn set_volume(&mut self, volume: f32) {
        let _ = self.tx.send(SinkCommand::SetVolume(volume));
    }
    fn set_muted(&mut self, muted: bool) {
        let _ = self.tx.send(SinkCommand::SetMuted(muted));
    }
}

/// Spawn the driver and return the sink handle.  `event_tx` receives
/// `SinkEvent`s for the app loop to feed into the coordinator.
pub fn spawn(event_tx: mpsc::Sender<SinkEvent>) -> MpvSink {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    tokio::spawn(driver_task(cmd_rx, event_tx));
    MpvSink { tx: cmd_tx }
}

// ── IPC plumbing ──────────────────────────────────────────────────────────────

struct PendingRequest {
    req_id: u64,
    payload: String, // serialised JSON line (already has '\n')
    reply: oneshot::Sender<anyhow::Result<Value>>,
}

#[derive(Clone)]
struct MpvHandle {
    tx: mpsc::Sender<PendingRequest>,
}

impl MpvHandle {
    async fn send(&self, command: Value) -> anyhow::Result<Value> {
        let req_id = NEXT_REQ_ID.fetch_add(1, Ordering::Relaxed);
        let msg = json!({ "command": command, "request_id": req_id });
        let mut raw = serde_json::to_string(&msg)?;
        raw.push('\n');

        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(PendingRequest {
                req_id,
                payload: raw,
                reply: reply_tx,
            })
            .await
            .map_err(|_| anyhow::anyhow!("mpv writer task gone"))?;

        tokio::time::timeout(tokio::time::Duration::from_secs(5), reply_rx)
            .await
            .map_err(|_| anyhow::anyhow!("mpv IPC timeout for req={}", req_id))?
            .map_err(|_| anyhow::anyhow!("mpv reply channel dropped req={}", req_id))?
    }

    async fn set_property(&self, name: &str, value: Value) -> anyhow::Result<()> {
        self.send(json!(["set_property", name, value])).await?;
        Ok(())
    }
}

#[cfg(unix)]
async fn spawn_and_connect(
    mpv_event_tx: mpsc::Sender<Value>,
) -> anyhow::Result<(MpvHandle, tokio::process::Child)> {
    let socket_name = platform::mpv_socket_name();
    let socket_path = std::path::PathBuf::from(&socket_name);
    let _ = tokio::fs::remove_file(&socket_path).await;

    let mpv_binary =
        platform::find_mpv_binary().ok_or_else(|| anyhow::anyhow!("mpv binary not found"))?;

    info!("mpv: spawning {}", mpv_binary.display());
    let child = tokio::process::Command::new(mpv_binary)
        .arg("--no-video")
        .arg("--idle=yes")
        .arg(platform::mpv_socket_arg())
        .arg("--quiet")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()?;

    // Wait for the IPC socket to appear.
    for _ in 0..50 {
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        if socket_path.exists() {
            break;
        }
    }
    if !socket_path.exists() {
        anyhow::bail!("mpv IPC socket did not appear");
    }

    let stream = UnixStream::connect(&socket_path).await?;
    info!("mpv: connected to IPC socket");

    let (read_half, write_half) = stream.into_split();
    let reader = BufReader::new(read_half);

    // pending map: req_id → reply channel; writer inserts, reader resolves.
    let pending: Arc<Mutex<HashMap<u64, oneshot::Sender<anyhow::Result<Value>>>>> =
        Arc::new(Mutex::new(HashMap::new()));
    let (req_tx, req_rx) = mpsc::channel::<PendingRequest>(64);

    tokio::spawn(writer_task(write_half, req_rx, pending.clone()));
    tokio::spawn(reader_task(reader, pending, mpv_event_tx));

    Ok((MpvHandle { tx: req_tx }, child))
}

#[cfg(not(unix))]
async fn spawn_and_connect(
    _mpv_event_tx: mpsc::Sender<Value>,
) -> anyhow::Result<(MpvHandle, tokio::process::Child)> {
    anyhow::bail!("mpv IPC is only wired up for unix sockets on this build")
}

async fn reader_task<R>(
    mut reader: BufReader<R>,
    pending: Arc<Mutex<HashMap<u64, oneshot::Sender<anyhow::Result<Value>>>>>,
    mpv_event_tx: mpsc::Sender<Value>,
) where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                debug!("mpv reader: connection closed");
                let mut map = pending.lock().await;
                for (_, tx) in map.drain() {
                    let _ = tx.send(Err(anyhow::anyhow!("mpv IPC connection closed")));
                }
                break;
            }
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let val: Value = match serde_json::from_str(trimmed) {
                    Ok(v) => v,
                    Err(e) => {
                        debug!("mpv reader: invalid json '{}': {}", trimmed, e);
                        continue;
                    }
                };

                if let Some(req_id) = val.get("request_id").and_then(|v| v.as_u64()) {
                    let mut map = pending.lock().await;
                    if let Some(tx) = map.remove(&req_id) {
                        let result = if val["error"].as_str() == Some("success") {
                            Ok(val)
                        } else {
                            let err =
                                val["error"].as_str().unwrap_or("unknown error").to_string();
                            Err(anyhow::anyhow!("mpv error: {}", err))
                        };
                        let _ = tx.send(result);
                    }
                } else if mpv_event_tx.send(val).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!("mpv reader: read error: {}", e);
                let mut map = pending.lock().await;
                for (_, tx) in map.drain() {
                    let _ = tx.send(Err(anyhow::anyhow!("mpv IPC read error: {}", e)));
                }
                break;
            }
        }
    }
}

async fn writer_task<W>(
    mut writer: W,
    mut rx: mpsc::Receiver<PendingRequest>,
    pending: Arc<Mutex<HashMap<u64, oneshot::Sender<anyhow::Result<Value>>>>>,
) where
    W: tokio::io::AsyncWrite + Unpin,
{
    while let Some(req) = rx.recv().await {
        // Register the reply channel before writing so the reader can
        // always match the response.
        {
            let mut map = pending.lock().await;
            map.insert(req.req_id, req.reply);
        }
        if let Err(e) = writer.write_all(req.payload.as_bytes()).await {
            warn!("mpv writer: write error: {}", e);
            let mut map = pending.lock().await;
            if let Some(tx) = map.remove(&req.req_id) {
                let _ = tx.send(Err(anyhow::anyhow!("mpv write error: {}", e)));
            }
            break;
        }
    }
    debug!("mpv writer: task exiting");
}

// ── Driver ────────────────────────────────────────────────────────────────────

async fn driver_task(
    mut cmd_rx: mpsc::UnboundedReceiver<SinkCommand>,
    event_tx: mpsc::Sender<SinkEvent>,
) {
    let (mpv_event_tx, mut mpv_event_rx) = mpsc::channel::<Value>(64);

    let (handle, _child) = match spawn_and_connect(mpv_event_tx).await {
        Ok(pair) => pair,
        Err(e) => {
            warn!("mpv: unavailable ({}); playback degrades to silence", e);
            // Degraded mode: every play request is refused, the rest is
            // swallowed.  The coordinator treats this as autoplay-policy
            // rejection and the page stays functional without audio.
            while let Some(cmd) = cmd_rx.recv().await {
                if matches!(cmd, SinkCommand::Play) {
                    let _ = event_tx.send(SinkEvent::PlayRejected).await;
                }
            }
            return;
        }
    };

    let mut current_url: Option<String> = None;
    let mut idle = true;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else { break };
                debug!("mpv driver: {:?}", cmd);
                let result = match cmd {
                    SinkCommand::Load(url) => {
                        current_url = Some(url.clone());
                        idle = false;
                        // Load paused; the coordinator decides when to run.
                        match handle.send(json!(["loadfile", url])).await {
                            Ok(_) => handle.set_property("pause", json!(true)).await,
                            Err(e) => Err(e),
                        }
                    }
                    SinkCommand::Play => {
                        // After end-of-file mpv sits idle; re-arm the source.
                        let reload = if idle {
                            match &current_url {
                                Some(url) => {
                                    idle = false;
                                    handle.send(json!(["loadfile", url.clone()])).await.map(|_| ())
                                }
                                None => Ok(()),
                            }
                        } else {
                            Ok(())
                        };
                        match reload {
                            Ok(()) => handle.set_property("pause", json!(false)).await,
                            Err(e) => Err(e),
                        }
                    }
                    SinkCommand::Pause => handle.set_property("pause", json!(true)).await,
                    SinkCommand::Seek(secs) => {
                        if idle {
                            Ok(()) // nothing loaded; the next play reloads from 0
                        } else {
                            // time-pos is unavailable in the first moments
                            // after a load; not worth a rejection.
                            let _ = handle.set_property("time-pos", json!(secs)).await;
                            Ok(())
                        }
                    }
                    SinkCommand::SetVolume(v) => {
                        let pct = (v * 100.0).clamp(0.0, 100.0);
                        handle.set_property("volume", json!(pct)).await
                    }
                    SinkCommand::SetMuted(m) => handle.set_property("mute", json!(m)).await,
                };
                if let Err(e) = result {
                    warn!("mpv driver: command failed: {}", e);
                    let _ = event_tx.send(SinkEvent::PlayRejected).await;
                }
            }

            ev = mpv_event_rx.recv() => {
                let Some(ev) = ev else { break };
                match ev.get("event").and_then(|v| v.as_str()) {
                    Some("start-file") => idle = false,
                    Some("end-file") => {
                        idle = true;
                        match ev.get("reason").and_then(|v| v.as_str()) {
                            Some("eof") => {
                                let _ = event_tx.send(SinkEvent::Ended).await;
                            }
                            Some("error") => {
                                let _ = event_tx.send(SinkEvent::PlayRejected).await;
                            }
                            _ => {} // stop/redirect/quit — superseded by our own commands
                        }
                    }
                    _ => {}
                }
            }
        }
    }
    info!("mpv driver: exiting");
}
