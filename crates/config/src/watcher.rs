use kiosk_core::Message;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Watches the config file and posts [`Message::ConfigReloaded`] onto the
/// host event bus whenever it is written or replaced.
///
/// The parent directory is watched rather than the file itself so editors
/// that save via rename-over are still picked up.
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher task for `path` that forwards reload
    /// notifications into `bus`. The task ends when `bus` is closed.
    pub fn spawn(path: impl AsRef<Path>, bus: mpsc::Sender<Message>) -> Self {
        let path = path.as_ref().to_path_buf();
        tokio::spawn(watch_loop(path.clone(), bus));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn watch_loop(path: PathBuf, bus: mpsc::Sender<Message>) {
    let (fs_tx, mut fs_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = fs_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        warn!("Not watching '{}' for config changes: {e}", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = fs_rx.recv().await {
        match event {
            Ok(e) if touches_config(&e, &path) => {
                debug!("config event: {:?}", e.kind);
                if bus.send(Message::ConfigReloaded).await.is_err() {
                    break; // host loop gone
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}

/// `true` for writes/creates that concern the watched file.
fn touches_config(event: &Event, path: &Path) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == path.file_name())
}
