//! Remote cluster list, fetched once in the background at initialization.

use crate::model::Cluster;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// The configuration collaborator that supplies remote clusters.
pub trait ClusterSource: Send + 'static {
    fn fetch_clusters(&self) -> anyhow::Result<Vec<Cluster>>;
}

/// Serves a fixed list, typically the `clusters` section of the config file.
#[derive(Debug, Clone, Default)]
pub struct StaticClusters(pub Vec<Cluster>);

impl ClusterSource for StaticClusters {
    fn fetch_clusters(&self) -> anyhow::Result<Vec<Cluster>> {
        Ok(self.0.clone())
    }
}

/// State of the cluster list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClusterList {
    /// No source configured
    #[default]
    Unavailable,
    /// Fetch in flight
    Pending,
    /// Fetch completed; the list may be empty
    Loaded(Vec<Cluster>),
    /// Fetch failed; not retried
    Failed(String),
}

impl ClusterList {
    /// Loaded clusters, empty in every other state.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        match self {
            Self::Loaded(clusters) => clusters,
            _ => &[],
        }
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Cluster> {
        self.clusters().iter().find(|c| c.name == name)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

type FetchResult = Result<Vec<Cluster>, String>;

/// A fire-and-forget fetch running on its own thread.
#[derive(Debug)]
pub(crate) struct ClusterFetch {
    rx: Receiver<FetchResult>,
}

impl ClusterFetch {
    pub(crate) fn spawn<S: ClusterSource>(source: S) -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let result = source.fetch_clusters().map_err(|e| format!("{e:#}"));
            // receiver gone means the controls were dropped
            let _ = tx.send(result);
        });
        Self { rx }
    }

    /// The result, if the fetch has finished.
    pub(crate) fn try_complete(&self) -> Option<FetchResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(disconnected())),
        }
    }

    /// Block up to `timeout` for the result.
    pub(crate) fn wait(&self, timeout: Duration) -> Option<FetchResult> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(disconnected())),
        }
    }
}

fn disconnected() -> String {
    "cluster fetch ended without a result".to_string()
}

/// Turn a finished fetch into the list state, logging the outcome.
pub(crate) fn settle(result: FetchResult) -> ClusterList {
    match result {
        Ok(clusters) => {
            tracing::info!("Loaded {} remote cluster(s)", clusters.len());
            ClusterList::Loaded(clusters)
        }
        Err(reason) => {
            tracing::warn!("Failed to load remote clusters: {reason}");
            ClusterList::Failed(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl ClusterSource for Broken {
        fn fetch_clusters(&self) -> anyhow::Result<Vec<Cluster>> {
            anyhow::bail!("connection refused")
        }
    }

    struct Panicking;

    impl ClusterSource for Panicking {
        fn fetch_clusters(&self) -> anyhow::Result<Vec<Cluster>> {
            panic!("source crashed")
        }
    }

    #[test]
    fn test_static_fetch_completes() {
        let fetch = ClusterFetch::spawn(StaticClusters(vec![Cluster::new("a", "http://a")]));
        let result = fetch.wait(Duration::from_secs(5)).unwrap();
        let list = settle(result);
        assert_eq!(list.clusters().len(), 1);
        assert!(list.find("a").is_some());
    }

    #[test]
    fn test_failed_fetch_keeps_reason() {
        let fetch = ClusterFetch::spawn(Broken);
        let list = settle(fetch.wait(Duration::from_secs(5)).unwrap());
        assert_eq!(list, ClusterList::Failed("connection refused".to_string()));
        assert!(list.clusters().is_empty());
    }

    #[test]
    fn test_panicking_source_reports_disconnect() {
        let fetch = ClusterFetch::spawn(Panicking);
        let list = settle(fetch.wait(Duration::from_secs(5)).unwrap());
        assert!(matches!(list, ClusterList::Failed(_)));
    }
}
