use crate::Wallet;
use anyhow::{Context as _, Result};
use highlow_types::casino::{Highscores, Stats};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    future::Future,
    path::{Path, PathBuf},
};

/// Persisted record identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Key {
    Wallet,
    Stats,
    Highscores,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Value {
    Wallet(Wallet),
    Stats(Stats),
    Highscores(Highscores),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    Update(Value),
    Delete,
}

pub trait Store {
    fn get(&self, key: &Key) -> impl Future<Output = Result<Option<Value>>>;
    fn insert(&mut self, key: Key, value: Value) -> impl Future<Output = Result<()>>;
    fn delete(&mut self, key: &Key) -> impl Future<Output = Result<()>>;

    fn apply(&mut self, changes: Vec<(Key, Status)>) -> impl Future<Output = Result<()>> {
        async {
            for (key, status) in changes {
                match status {
                    Status::Update(value) => self.insert(key, value).await?,
                    Status::Delete => self.delete(&key).await?,
                }
            }
            Ok(())
        }
    }
}

/// Load the wallet, or a fresh one holding `starting_balance` if none is stored.
pub async fn load_wallet<S: Store>(store: &S, starting_balance: u64) -> Result<Wallet> {
    match store.get(&Key::Wallet).await? {
        Some(Value::Wallet(wallet)) => Ok(wallet),
        Some(other) => anyhow::bail!("wallet key holds {other:?}"),
        None => Ok(Wallet::new(starting_balance)),
    }
}

pub async fn load_stats<S: Store>(store: &S) -> Result<Stats> {
    match store.get(&Key::Stats).await? {
        Some(Value::Stats(stats)) => Ok(stats),
        Some(other) => anyhow::bail!("stats key holds {other:?}"),
        None => Ok(Stats::default()),
    }
}

pub async fn load_highscores<S: Store>(store: &S) -> Result<Highscores> {
    match store.get(&Key::Highscores).await? {
        Some(Value::Highscores(highscores)) => Ok(highscores),
        Some(other) => anyhow::bail!("highscores key holds {other:?}"),
        None => Ok(Highscores::default()),
    }
}

#[derive(Default)]
pub struct Memory {
    state: BTreeMap<Key, Value>,
}

impl Store for Memory {
    async fn get(&self, key: &Key) -> Result<Option<Value>> {
        Ok(self.state.get(key).cloned())
    }

    async fn insert(&mut self, key: Key, value: Value) -> Result<()> {
        self.state.insert(key, value);
        Ok(())
    }

    async fn delete(&mut self, key: &Key) -> Result<()> {
        self.state.remove(key);
        Ok(())
    }
}

/// Single JSON document on disk, rewritten after every mutation.
pub struct FileStore {
    path: PathBuf,
    state: BTreeMap<Key, Value>,
}

impl FileStore {
    /// Open `path`; a missing file starts empty.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("parse store {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("read store {}", path.display()))
            }
        };
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.state).context("encode store")?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }
        tokio::fs::write(&self.path, bytes)
            .await
            .with_context(|| format!("write store {}", self.path.display()))
    }
}

impl Store for FileStore {
    async fn get(&self, key: &Key) -> Result<Option<Value>> {
        Ok(self.state.get(key).cloned())
    }

    async fn insert(&mut self, key: Key, value: Value) -> Result<()> {
        self.state.insert(key, value);
        self.persist().await
    }

    async fn delete(&mut self, key: &Key) -> Result<()> {
        if self.state.remove(key).is_some() {
            self.persist().await?;
        }
        Ok(())
    }
}
