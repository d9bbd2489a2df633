//! Verb-keyed conjugation cache mirrored to a JSON file.
//!
//! Reads and writes go through one `RwLock`. Every `put` asks a single
//! background writer to rewrite the whole file; requests that pile up while
//! a write is in flight collapse into one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::{RwLock, oneshot};
use tr_types::{ConjugationTable, Verb};

type Entries = HashMap<Verb, ConjugationTable>;

const FLUSH_QUEUE_CAPACITY: usize = 4;

enum FlushRequest {
    Flush,
    /// Flush, then acknowledge
    Sync(oneshot::Sender<()>),
}

pub struct CacheStore {
    entries: Arc<RwLock<Entries>>,
    flush_tx: Option<AsyncSender<FlushRequest>>,
    path: Option<PathBuf>,
}

impl CacheStore {
    /// `~/.config/tr/conjugations-cache.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("tr").join("conjugations-cache.json"))
    }

    /// Load `path` (missing or corrupt files start empty) and start the writer task.
    /// Must be called inside a tokio runtime.
    pub async fn open(path: PathBuf) -> Self {
        let entries = Arc::new(RwLock::new(load(&path).await));
        let (flush_tx, flush_rx) = kanal::bounded_async(FLUSH_QUEUE_CAPACITY);

        tokio::spawn(flush_worker(entries.clone(), path.clone(), flush_rx));

        Self {
            entries,
            flush_tx: Some(flush_tx),
            path: Some(path),
        }
    }

    /// Cache that never touches disk
    pub fn in_memory() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            flush_tx: None,
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn get(&self, verb: &Verb) -> Option<ConjugationTable> {
        self.entries.read().await.get(verb).cloned()
    }

    /// Store `table` and schedule a background flush. Never waits for the disk.
    pub async fn put(&self, verb: Verb, table: ConjugationTable) {
        {
            let mut entries = self.entries.write().await;
            entries.insert(verb, table);
        }

        let Some(tx) = &self.flush_tx else {
            return;
        };
        match tx.try_send(FlushRequest::Flush) {
            Ok(true) => {}
            Ok(false) => tracing::trace!("cache flush already queued"),
            Err(e) => tracing::warn!("cache writer unavailable: {e}"),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Wait until everything stored so far has been written out
    pub async fn sync(&self) {
        let Some(tx) = &self.flush_tx else {
            return;
        };
        let (ack_tx, ack_rx) = oneshot::channel();
        if tx.send(FlushRequest::Sync(ack_tx)).await.is_err() {
            tracing::warn!("cache writer stopped before sync");
            return;
        }
        let _ = ack_rx.await;
    }
}

async fn load(path: &Path) -> Entries {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no conjugation cache at {}", path.display());
            return Entries::new();
        }
        Err(e) => {
            tracing::warn!("failed to read conjugation cache {}: {e}", path.display());
            return Entries::new();
        }
    };

    match serde_json::from_slice::<HashMap<String, ConjugationTable>>(&data) {
        Ok(raw) => {
            let entries = normalize_keys(raw);
            tracing::info!("loaded {} cached verbs from {}", entries.len(), path.display());
            entries
        }
        Err(e) => {
            tracing::warn!("ignoring corrupt conjugation cache {}: {e}", path.display());
            Entries::new()
        }
    }
}

/// Hand-edited files may carry keys like `"Caminar "`; lookups only ever use normalized verbs
fn normalize_keys(raw: HashMap<String, ConjugationTable>) -> Entries {
    let mut entries = Entries::with_capacity(raw.len());
    for (key, table) in raw {
        let verb = Verb::new(&key);
        if verb.is_empty() || table.is_empty() {
            tracing::debug!("dropping cache entry {key:?}");
            continue;
        }
        entries.entry(verb).or_insert(table);
    }
    entries
}

async fn flush_worker(
    entries: Arc<RwLock<Entries>>,
    path: PathBuf,
    flush_rx: AsyncReceiver<FlushRequest>,
) {
    while let Ok(request) = flush_rx.recv().await {
        let mut waiters = Vec::new();
        if let FlushRequest::Sync(ack) = request {
            waiters.push(ack);
        }
        while let Ok(Some(request)) = flush_rx.try_recv() {
            if let FlushRequest::Sync(ack) = request {
                waiters.push(ack);
            }
        }

        let data = {
            let entries = entries.read().await;
            serde_json::to_vec_pretty(&*entries)
        };

        match data {
            Ok(data) => match write_atomic(&path, &data).await {
                Ok(()) => tracing::debug!("flushed conjugation cache to {}", path.display()),
                Err(e) => tracing::warn!("failed to write conjugation cache {}: {e}", path.display()),
            },
            Err(e) => tracing::warn!("failed to serialize conjugation cache: {e}"),
        }

        for ack in waiters {
            let _ = ack.send(());
        }
    }

    tracing::debug!("cache writer stopping");
}

async fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, data).await?;
    tokio::fs::rename(&tmp, path).await
}
