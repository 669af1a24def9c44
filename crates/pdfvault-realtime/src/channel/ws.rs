//! Socket.IO notification channel over WebSocket.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{Mutex, RwLock, broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, info, warn};
use url::Url;

use pdfvault_core::config::RealtimeConfig;
use pdfvault_core::error::ErrorKind;
use pdfvault_core::events::RealtimeEvent;
use pdfvault_core::traits::NotificationChannel;
use pdfvault_core::{AppError, AppResult};

use super::backoff::Backoff;
use crate::codec::{DISCONNECT, PONG, Packet, decode_packet, encode_connect, encode_event};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long `disconnect` waits for the close handshake.
const CLOSE_GRACE: Duration = Duration::from_secs(1);
/// Upper bound for the Engine.IO open and namespace connect exchange.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
/// Socket.IO path used when the configured URL has none.
const SOCKET_IO_PATH: &str = "/socket.io/";

/// Socket.IO client to the notification server.
///
/// `connect` performs the Engine.IO handshake and joins the default
/// namespace, retrying with a doubling delay up to the configured number
/// of attempts. A connection that drops later, or stops receiving server
/// pings, is re-established in the background with the same schedule;
/// emits fail while it is down.
#[derive(Debug, Clone)]
pub struct WsChannel {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// Endpoint, including the Engine.IO and token query parameters.
    endpoint: String,
    /// Sent again as the namespace auth payload.
    token: Option<String>,
    /// Reconnect schedule.
    backoff: Backoff,
    /// Outbound queue depth and inbound broadcast size.
    buffer_size: usize,
    /// Whether a socket is currently open.
    connected: AtomicBool,
    /// Set by `disconnect` to stop reconnecting.
    closing: AtomicBool,
    /// Outbound frame queue of the live session.
    outbound: RwLock<Option<mpsc::Sender<String>>>,
    /// Inbound events.
    events: broadcast::Sender<RealtimeEvent>,
    /// Session task.
    task: Mutex<Option<JoinHandle<()>>>,
}

/// An open socket that has joined the default namespace.
struct Link {
    socket: Socket,
    /// Silence after which the server is presumed gone.
    liveness: Duration,
}

impl WsChannel {
    /// Create a closed channel for `config.url`, authenticating with `token`.
    pub fn new(config: &RealtimeConfig, token: Option<String>) -> AppResult<Self> {
        let token = token.filter(|t| !t.is_empty());
        let buffer_size = config.channel_buffer_size.max(1);
        let (events, _) = broadcast::channel(buffer_size);
        Ok(Self {
            inner: Arc::new(Inner {
                endpoint: endpoint(&config.url, token.as_deref())?,
                token,
                backoff: Backoff::from_config(config),
                buffer_size,
                connected: AtomicBool::new(false),
                closing: AtomicBool::new(false),
                outbound: RwLock::new(None),
                events,
                task: Mutex::new(None),
            }),
        })
    }
}

/// Build the WebSocket URL: default Socket.IO path, Engine.IO v4 over the
/// websocket transport, and the token as an encoded query parameter.
fn endpoint(raw: &str, token: Option<&str>) -> AppResult<String> {
    let mut url = Url::parse(raw)
        .map_err(|e| AppError::configuration(format!("Invalid realtime URL '{raw}': {e}")))?;
    if url.path().is_empty() || url.path() == "/" {
        url.set_path(SOCKET_IO_PATH);
    }

    let has = |key: &str| url.query_pairs().any(|(k, _)| k == key);
    let missing_eio = !has("EIO");
    let missing_transport = !has("transport");
    {
        let mut query = url.query_pairs_mut();
        if missing_eio {
            query.append_pair("EIO", "4");
        }
        if missing_transport {
            query.append_pair("transport", "websocket");
        }
        if let Some(token) = token {
            query.append_pair("token", token);
        }
    }
    Ok(url.into())
}

fn unavailable(message: impl Into<String>, err: tokio_tungstenite::tungstenite::Error) -> AppError {
    AppError::with_source(ErrorKind::ServiceUnavailable, message, err)
}

/// Next decodable packet, skipping binary and control frames.
async fn next_packet(socket: &mut Socket) -> AppResult<Packet> {
    loop {
        match socket.next().await {
            Some(Ok(Message::Text(text))) => return decode_packet(text.as_str()),
            Some(Ok(Message::Close(_))) | None => {
                return Err(AppError::service_unavailable(
                    "Realtime server closed the connection during the handshake",
                ));
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(unavailable("Realtime handshake failed", e)),
        }
    }
}

impl Inner {
    /// Open a link, retrying per the backoff schedule.
    ///
    /// A namespace refusal is returned at once; retrying would get the
    /// same answer.
    async fn open(&self) -> AppResult<Link> {
        let attempts = self.backoff.attempts;
        let mut last_error = None;

        for attempt in 0..attempts {
            if self.closing.load(Ordering::SeqCst) {
                return Err(AppError::service_unavailable(
                    "Realtime channel is shutting down",
                ));
            }
            match self.dial().await {
                Ok(link) => {
                    info!(attempt = attempt + 1, "Realtime channel connected");
                    return Ok(link);
                }
                Err(e) if e.kind == ErrorKind::Authentication => return Err(e),
                Err(e) => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = attempts,
                        error = %e,
                        "Realtime connection attempt failed"
                    );
                    last_error = Some(e);
                    if attempt + 1 < attempts {
                        tokio::time::sleep(self.backoff.delay(attempt)).await;
                    }
                }
            }
        }

        let message = format!("Realtime server unreachable after {attempts} attempts");
        Err(match last_error {
            Some(e) => AppError::with_source(ErrorKind::ServiceUnavailable, message, e),
            None => AppError::service_unavailable(message),
        })
    }

    /// One connection attempt: transport, Engine.IO open, namespace join.
    async fn dial(&self) -> AppResult<Link> {
        let (mut socket, _) = connect_async(self.endpoint.as_str())
            .await
            .map_err(|e| unavailable("Realtime connection failed", e))?;

        match tokio::time::timeout(HANDSHAKE_TIMEOUT, self.handshake(&mut socket)).await {
            Ok(Ok(liveness)) => Ok(Link { socket, liveness }),
            Ok(Err(e)) => {
                let _ = socket.close(None).await;
                Err(e)
            }
            Err(_) => {
                let _ = socket.close(None).await;
                Err(AppError::service_unavailable(
                    "Realtime handshake timed out",
                ))
            }
        }
    }

    async fn handshake(&self, socket: &mut Socket) -> AppResult<Duration> {
        let handshake = match next_packet(socket).await? {
            Packet::Open(handshake) => handshake,
            other => {
                return Err(AppError::service_unavailable(format!(
                    "Realtime server did not open a session: {other:?}"
                )));
            }
        };
        debug!(sid = %handshake.sid, "Realtime transport open");

        let connect = encode_connect(self.token.as_deref());
        socket
            .send(Message::Text(connect.into()))
            .await
            .map_err(|e| unavailable("Realtime handshake failed", e))?;

        loop {
            match next_packet(socket).await? {
                Packet::Connected => return Ok(handshake.liveness()),
                Packet::ConnectError(reason) => {
                    return Err(AppError::authentication(format!(
                        "Realtime server refused the connection: {reason}"
                    )));
                }
                Packet::Ping => socket
                    .send(Message::Text(PONG.into()))
                    .await
                    .map_err(|e| unavailable("Realtime handshake failed", e))?,
                Packet::Close | Packet::Disconnect => {
                    return Err(AppError::service_unavailable(
                        "Realtime server closed the session during the handshake",
                    ));
                }
                _ => {}
            }
        }
    }

    /// Drive one link until it closes. Returns why it stopped.
    async fn pump(&self, link: Link, queue: &mut mpsc::Receiver<String>) -> &'static str {
        let Link { socket, liveness } = link;
        let (mut sink, mut stream) = socket.split();
        let silence = tokio::time::sleep(liveness);
        tokio::pin!(silence);

        loop {
            tokio::select! {
                outgoing = queue.recv() => match outgoing {
                    Some(frame) => {
                        if let Err(e) = sink.send(Message::Text(frame.into())).await {
                            warn!(error = %e, "Realtime send failed");
                            return "send failed";
                        }
                    }
                    None => {
                        let _ = sink.send(Message::Text(DISCONNECT.into())).await;
                        let _ = sink.send(Message::Close(None)).await;
                        return "closed locally";
                    }
                },
                incoming = stream.next() => {
                    silence.as_mut().reset(Instant::now() + liveness);
                    match incoming {
                        Some(Ok(Message::Text(text))) => match decode_packet(text.as_str()) {
                            Ok(Packet::Ping) => {
                                if let Err(e) = sink.send(Message::Text(PONG.into())).await {
                                    warn!(error = %e, "Realtime pong failed");
                                    return "send failed";
                                }
                            }
                            Ok(Packet::Event(event)) => {
                                debug!(event = %event.event, "Realtime event received");
                                let _ = self.events.send(event);
                            }
                            Ok(Packet::Disconnect) => return "disconnected by server",
                            Ok(Packet::Close) => return "closed by server",
                            Ok(_) => {}
                            Err(e) => warn!(error = %e, "Ignoring malformed realtime frame"),
                        },
                        Some(Ok(Message::Close(_))) | None => return "closed by server",
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            warn!(error = %e, "Realtime read failed");
                            return "read failed";
                        }
                    }
                },
                _ = &mut silence => {
                    warn!(timeout_ms = liveness.as_millis() as u64, "No ping from realtime server");
                    return "ping timeout";
                }
            }
        }
    }
}

/// Session task: pump the link, reconnect when it drops.
async fn run_session(inner: Arc<Inner>, mut link: Link, mut queue: mpsc::Receiver<String>) {
    loop {
        let reason = inner.pump(link, &mut queue).await;
        inner.connected.store(false, Ordering::SeqCst);

        if inner.closing.load(Ordering::SeqCst) {
            debug!(reason, "Realtime session ended");
            break;
        }

        warn!(reason, "Realtime connection lost, reconnecting");
        match inner.open().await {
            Ok(next) => {
                link = next;
                inner.connected.store(true, Ordering::SeqCst);
            }
            Err(e) => {
                error!(error = %e, "Realtime reconnect gave up");
                *inner.outbound.write().await = None;
                break;
            }
        }
    }
}

#[async_trait]
impl NotificationChannel for WsChannel {
    async fn connect(&self) -> AppResult<()> {
        let mut task = self.inner.task.lock().await;
        if self.is_connected() {
            return Ok(());
        }
        if let Some(stale) = task.take() {
            stale.abort();
        }

        self.inner.closing.store(false, Ordering::SeqCst);
        let link = self.inner.open().await?;

        let (tx, rx) = mpsc::channel(self.inner.buffer_size);
        *self.inner.outbound.write().await = Some(tx);
        self.inner.connected.store(true, Ordering::SeqCst);
        *task = Some(tokio::spawn(run_session(self.inner.clone(), link, rx)));
        Ok(())
    }

    async fn disconnect(&self) -> AppResult<()> {
        let mut task = self.inner.task.lock().await;
        self.inner.closing.store(true, Ordering::SeqCst);
        // Dropping the sender makes the session send a close frame and exit.
        self.inner.outbound.write().await.take();

        if let Some(mut handle) = task.take() {
            if tokio::time::timeout(CLOSE_GRACE, &mut handle).await.is_err() {
                handle.abort();
            }
        }
        self.inner.connected.store(false, Ordering::SeqCst);
        info!("Realtime channel disconnected");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.inner.connected.load(Ordering::SeqCst)
    }

    async fn emit(&self, event: RealtimeEvent) -> AppResult<()> {
        let sender = if self.is_connected() {
            self.inner.outbound.read().await.clone()
        } else {
            None
        };
        let Some(sender) = sender else {
            warn!(event = %event.event, "Realtime channel not connected, event not sent");
            return Err(AppError::service_unavailable(format!(
                "Realtime channel not connected; '{}' was not sent",
                event.event
            )));
        };

        let frame = encode_event(&event)?;
        sender.send(frame).await.map_err(|_| {
            AppError::service_unavailable(format!(
                "Realtime channel closed while sending '{}'",
                event.event
            ))
        })?;
        debug!(event = %event.event, "Realtime event sent");
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.inner.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::Router;
    use axum::extract::RawQuery;
    use axum::extract::ws::{Message as AxumMessage, WebSocket, WebSocketUpgrade};
    use axum::response::Response;
    use axum::routing::get;
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use pdfvault_core::events::EventName;

    use super::*;

    const OPEN: &str = r#"0{"sid":"s1","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

    async fn send(socket: &mut WebSocket, frame: String) -> bool {
        socket.send(AxumMessage::Text(frame.into())).await.is_ok()
    }

    /// Minimal Socket.IO server: accepts the namespace join, pings once and
    /// answers each admin update with the matching broadcast.
    async fn relay(mut socket: WebSocket, query: Option<String>) {
        if !send(&mut socket, OPEN.to_string()).await {
            return;
        }
        let mut auth = Value::Null;
        while let Some(Ok(msg)) = socket.recv().await {
            let AxumMessage::Text(text) = msg else { continue };
            let text = text.as_str();
            if let Some(payload) = text.strip_prefix("40") {
                auth = serde_json::from_str(payload).unwrap_or(Value::Null);
                if !send(&mut socket, r#"40{"sid":"n1"}"#.to_string()).await
                    || !send(&mut socket, "2".to_string()).await
                {
                    break;
                }
            } else if text == "3" {
                let frame = format!("42{}", json!(["server:pong", {}]));
                if !send(&mut socket, frame).await {
                    break;
                }
            } else if let Some(args) = text.strip_prefix("42") {
                let args: Vec<Value> = serde_json::from_str(args).unwrap();
                let reply = json!([
                    "folder:updated",
                    {"echo": args[1], "query": query, "auth": auth}
                ]);
                if !send(&mut socket, format!("42{reply}")).await {
                    break;
                }
            } else if text == "41" {
                break;
            }
        }
    }

    /// Refuses every namespace join.
    async fn refuse(mut socket: WebSocket) {
        if !send(&mut socket, OPEN.to_string()).await {
            return;
        }
        while let Some(Ok(msg)) = socket.recv().await {
            if matches!(&msg, AxumMessage::Text(text) if text.as_str().starts_with("40")) {
                let _ = send(&mut socket, r#"44{"message":"Not authorized"}"#.to_string()).await;
            }
        }
    }

    async fn spawn_server() -> String {
        let router = Router::new()
            .route(
                "/socket.io/",
                get(|ws: WebSocketUpgrade, RawQuery(query): RawQuery| async move {
                    let response: Response = ws.on_upgrade(move |socket| relay(socket, query));
                    response
                }),
            )
            .route(
                "/refuse/",
                get(|ws: WebSocketUpgrade| async move {
                    let response: Response = ws.on_upgrade(refuse);
                    response
                }),
            );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("ws://{addr}")
    }

    fn config(url: String) -> RealtimeConfig {
        RealtimeConfig {
            url,
            reconnect_attempts: 2,
            reconnect_delay_ms: 10,
            reconnect_delay_max_ms: 20,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_emit_and_receive() {
        let base = spawn_server().await;
        let channel = WsChannel::new(&config(base), Some("tok+1".to_string())).unwrap();
        let mut rx = channel.subscribe();
        channel.connect().await.unwrap();
        assert!(channel.is_connected());

        channel
            .emit(RealtimeEvent::new(
                EventName::AdminFolderUpdate,
                json!({"added": 3}),
            ))
            .await
            .unwrap();

        let mut received = HashMap::new();
        while received.len() < 2 {
            let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .unwrap()
                .unwrap();
            received.insert(event.event.clone(), event);
        }

        // The server's ping was answered.
        assert!(received.contains_key("server:pong"));

        let update = &received["folder:updated"];
        assert!(update.is(EventName::FolderUpdated));
        assert_eq!(update.data["echo"]["added"], 3);
        assert_eq!(update.data["auth"]["token"], "tok+1");
        assert_eq!(
            update.data["query"],
            "EIO=4&transport=websocket&token=tok%2B1"
        );

        channel.disconnect().await.unwrap();
        assert!(!channel.is_connected());
        let err = channel
            .emit(RealtimeEvent::new(EventName::AdminPdfUpdate, json!({})))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }

    #[tokio::test]
    async fn test_refused_namespace_is_not_retried() {
        let base = spawn_server().await;
        let channel = WsChannel::new(&config(format!("{base}/refuse/")), None).unwrap();
        let err = channel.connect().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(err.message.contains("Not authorized"));
        assert!(!channel.is_connected());
    }

    #[tokio::test]
    async fn test_unreachable_server_gives_up() {
        let channel = WsChannel::new(&config("ws://127.0.0.1:9".to_string()), None).unwrap();
        let err = channel.connect().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
        assert!(err.message.contains("2 attempts"));
        assert!(!channel.is_connected());
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            endpoint("ws://h:5000", Some("a b+c")).unwrap(),
            "ws://h:5000/socket.io/?EIO=4&transport=websocket&token=a+b%2Bc"
        );
        assert_eq!(
            endpoint("ws://h/socket.io/?EIO=4&transport=websocket", None).unwrap(),
            "ws://h/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            endpoint("wss://h/rt/", Some("t")).unwrap(),
            "wss://h/rt/?EIO=4&transport=websocket&token=t"
        );
        let err = endpoint("not a url", None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
