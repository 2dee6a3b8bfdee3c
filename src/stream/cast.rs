//! Casting and local streaming hand-off
//!
//! The detail screen never drives casting itself; it only asks the
//! coordinator to quiesce whatever a previously launched flow left running.
//! `CastManager` is the concrete coordinator: it owns the active streaming
//! session, the beam server task and the persistent casting notification.

use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::process::{Child, Command};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Stop operations the detail screen issues on every resume
///
/// Each call is idempotent, safe with nothing active, and returns without
/// waiting for the resource to finish shutting down.
pub trait CastingCoordinator: Send + Sync {
    /// Stop any in-flight local-network streaming session
    fn stop_active_streaming(&self);
    /// Stop the casting server if one is running
    fn stop_casting_server(&self);
    /// Dismiss the persistent casting notification
    fn cancel_casting_notification(&self);
}

// =============================================================================
// Managed Resources
// =============================================================================

/// A local streaming session, optionally backed by a child process
#[derive(Debug)]
pub struct StreamingSession {
    pub id: Uuid,
    pub title: String,
    child: Option<Child>,
}

impl StreamingSession {
    /// Session without a backing process
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            child: None,
        }
    }

    /// Spawn `program` as the streaming process for this session
    pub fn spawn(title: impl Into<String>, program: &str, args: &[&str]) -> std::io::Result<Self> {
        let child = Command::new(program)
            .args(args)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        Ok(Self {
            id: Uuid::new_v4(),
            title: title.into(),
            child: Some(child),
        })
    }

    /// OS pid of the backing process, if any is still attached
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(|c| c.id())
    }
}

/// Handle to a running beam (local casting) server task
#[derive(Debug)]
pub struct BeamServer {
    pub id: Uuid,
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl BeamServer {
    /// Spawn a server task on the current runtime
    ///
    /// `serve` receives the shutdown signal and should return once it fires.
    pub fn spawn<F, Fut>(addr: SocketAddr, serve: F) -> Self
    where
        F: FnOnce(oneshot::Receiver<()>) -> Fut,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(serve(rx));
        Self {
            id: Uuid::new_v4(),
            addr,
            shutdown: Some(tx),
            task,
        }
    }

    /// Signal shutdown without waiting for the task to finish
    fn signal_shutdown(mut self) -> JoinHandle<()> {
        if let Some(tx) = self.shutdown.take() {
            // Receiver gone means the task already ended
            let _ = tx.send(());
        }
        self.task
    }
}

/// Persistent notification shown while casting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastNotification {
    pub session: Uuid,
    pub text: String,
}

// =============================================================================
// Cast Manager
// =============================================================================

/// Concrete casting coordinator
#[derive(Debug, Default)]
pub struct CastManager {
    streaming: Mutex<Option<StreamingSession>>,
    server: Mutex<Option<BeamServer>>,
    notification: Mutex<Option<CastNotification>>,
}

/// Lock ignoring poisoning: the guarded values are plain handles
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the active streaming session, quiescing any previous one
    pub fn begin_streaming(&self, session: StreamingSession) {
        info!(session = %session.id, title = %session.title, "streaming session started");
        if let Some(previous) = lock(&self.streaming).replace(session) {
            warn!(session = %previous.id, "replacing active streaming session");
            release_session(previous);
        }
    }

    /// Register the running beam server, stopping any previous one
    pub fn begin_casting_server(&self, server: BeamServer) {
        info!(server = %server.id, addr = %server.addr, "casting server started");
        if let Some(previous) = lock(&self.server).replace(server) {
            warn!(server = %previous.id, "replacing running casting server");
            previous.signal_shutdown();
        }
    }

    /// Show the persistent casting notification
    pub fn post_notification(&self, notification: CastNotification) {
        *lock(&self.notification) = Some(notification);
    }

    /// Currently posted notification
    pub fn notification(&self) -> Option<CastNotification> {
        lock(&self.notification).clone()
    }

    pub fn streaming_session(&self) -> Option<Uuid> {
        lock(&self.streaming).as_ref().map(|s| s.id)
    }

    pub fn casting_server_addr(&self) -> Option<SocketAddr> {
        lock(&self.server).as_ref().map(|s| s.addr)
    }

    /// True when nothing is streaming, serving or notifying
    pub fn is_idle(&self) -> bool {
        lock(&self.streaming).is_none()
            && lock(&self.server).is_none()
            && lock(&self.notification).is_none()
    }
}

/// Kill the session's process and reap it in the background
fn release_session(mut session: StreamingSession) {
    let Some(mut child) = session.child.take() else {
        return;
    };

    if let Err(e) = child.start_kill() {
        // Already exited
        debug!(session = %session.id, error = %e, "kill on streaming process failed");
    }

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                let _ = child.wait().await;
            });
        }
        // No runtime to reap on; kill_on_drop covers the process
        Err(_) => drop(child),
    }
}

impl CastingCoordinator for CastManager {
    fn stop_active_streaming(&self) {
        match lock(&self.streaming).take() {
            Some(session) => {
                info!(session = %session.id, "stopping streaming session");
                release_session(session);
            }
            None => debug!("no streaming session to stop"),
        }
    }

    fn stop_casting_server(&self) {
        match lock(&self.server).take() {
            Some(server) => {
                info!(server = %server.id, "stopping casting server");
                // Detached: shutdown completes on its own
                drop(server.signal_shutdown());
            }
            None => debug!("no casting server to stop"),
        }
    }

    fn cancel_casting_notification(&self) {
        if lock(&self.notification).take().is_some() {
            debug!("casting notification cancelled");
        }
    }
}
