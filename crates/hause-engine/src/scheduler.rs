//! Recurring post scheduler.
//!
//! One background task per deployed community, firing at the interval
//! derived from the community's posting frequency. Tasks live in a map keyed
//! by community id behind an async mutex, so concurrent deploy/pause calls
//! for the same community serialize instead of racing: at most one cycle per
//! community exists at any time.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use hause_models::{CommunityId, PostOrigin};
use hause_store::StoreError;

use crate::error::{EngineError, Result};
use crate::pipeline::ContentPipeline;

struct SchedulerEntry {
    interval: Duration,
    handle: JoinHandle<()>,
}

/// Manages one recurring posting task per community.
pub struct PostScheduler {
    pipeline: Arc<ContentPipeline>,
    store: Arc<dyn hause_store::CommunityStore>,
    tasks: Mutex<HashMap<CommunityId, SchedulerEntry>>,
}

impl PostScheduler {
    pub fn new(
        pipeline: Arc<ContentPipeline>,
        store: Arc<dyn hause_store::CommunityStore>,
    ) -> Self {
        Self {
            pipeline,
            store,
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Starts the posting cycle for a community.
    ///
    /// The interval comes from the community's posting frequency at the time
    /// of the call; frequency changes take effect on the next start. Starting
    /// an already-scheduled community replaces the existing cycle rather than
    /// stacking a second one.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] if the community does not exist.
    pub async fn start(&self, id: &CommunityId) -> Result<()> {
        let community = self.find_community(id).await?;
        let interval = community.posting_frequency.interval();

        let mut tasks = self.tasks.lock().await;
        if let Some(existing) = tasks.remove(id) {
            warn!(community_id = %id, "Replacing existing posting cycle");
            existing.handle.abort();
        }

        let pipeline = self.pipeline.clone();
        let task_id = id.clone();
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                match pipeline.post_now(&task_id, PostOrigin::Scheduled).await {
                    Ok(_) => {}
                    Err(e) if e.is_not_found() => {
                        // Record deleted out from under us; stop quietly.
                        info!(community_id = %task_id, "Community gone, ending posting cycle");
                        break;
                    }
                    Err(e) => {
                        error!(community_id = %task_id, error = %e, "Scheduled post failed");
                    }
                }
            }
        });

        info!(
            community_id = %id,
            interval_hours = interval.as_secs() / 3600,
            "Started posting cycle"
        );
        tasks.insert(id.clone(), SchedulerEntry { interval, handle });
        Ok(())
    }

    /// Stops the posting cycle for a community. No-op if none is running.
    pub async fn stop(&self, id: &CommunityId) {
        let mut tasks = self.tasks.lock().await;
        if let Some(entry) = tasks.remove(id) {
            entry.handle.abort();
            info!(community_id = %id, "Stopped posting cycle");
        }
    }

    /// Whether a posting cycle is currently registered for the community.
    pub async fn is_scheduled(&self, id: &CommunityId) -> bool {
        self.tasks.lock().await.contains_key(id)
    }

    /// Interval of the community's running cycle, if any.
    pub async fn interval_for(&self, id: &CommunityId) -> Option<Duration> {
        self.tasks.lock().await.get(id).map(|entry| entry.interval)
    }

    /// Number of communities with a running cycle.
    pub async fn task_count(&self) -> usize {
        self.tasks.lock().await.len()
    }

    async fn find_community(&self, id: &CommunityId) -> Result<hause_models::Community> {
        self.store.find(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => EngineError::NotFound(id.to_string()),
            other => EngineError::Store(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_stores, CannedGenerator, MockMessenger};
    use hause_models::{Community, CommunityUpdate, PostingFrequency};
    use hause_store::CommunityStore;

    async fn make_scheduler(
        messenger: Arc<MockMessenger>,
    ) -> (tempfile::TempDir, Arc<dyn CommunityStore>, PostScheduler) {
        let (dir, store, memory) = make_stores().await;
        let pipeline = Arc::new(ContentPipeline::new(
            store.clone(),
            memory,
            Arc::new(CannedGenerator("scheduled content")),
            messenger,
        ));
        let scheduler = PostScheduler::new(pipeline, store.clone());
        (dir, store, scheduler)
    }

    async fn insert_community(
        store: &Arc<dyn CommunityStore>,
        frequency: PostingFrequency,
    ) -> CommunityId {
        let community = Community::new("operator-1", "Test")
            .with_credentials("token-1", "chat-1");
        let id = community.id.clone();
        store.insert(community).await.unwrap();
        store
            .update_fields(
                &id,
                CommunityUpdate {
                    posting_frequency: Some(frequency),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn test_start_registers_interval_from_frequency() {
        let messenger = Arc::new(MockMessenger::new());
        let (_dir, store, scheduler) = make_scheduler(messenger).await;
        let id = insert_community(&store, PostingFrequency::High).await;

        scheduler.start(&id).await.unwrap();

        assert!(scheduler.is_scheduled(&id).await);
        assert_eq!(
            scheduler.interval_for(&id).await,
            Some(Duration::from_secs(6 * 3600))
        );
    }

    #[tokio::test]
    async fn test_start_twice_keeps_one_cycle() {
        let messenger = Arc::new(MockMessenger::new());
        let (_dir, store, scheduler) = make_scheduler(messenger).await;
        let id = insert_community(&store, PostingFrequency::Moderate).await;

        scheduler.start(&id).await.unwrap();
        scheduler.start(&id).await.unwrap();

        assert_eq!(scheduler.task_count().await, 1);
    }

    #[tokio::test]
    async fn test_start_picks_up_frequency_change() {
        let messenger = Arc::new(MockMessenger::new());
        let (_dir, store, scheduler) = make_scheduler(messenger).await;
        let id = insert_community(&store, PostingFrequency::Low).await;

        scheduler.start(&id).await.unwrap();
        assert_eq!(
            scheduler.interval_for(&id).await,
            Some(Duration::from_secs(24 * 3600))
        );

        store
            .update_fields(
                &id,
                CommunityUpdate {
                    posting_frequency: Some(PostingFrequency::High),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        scheduler.start(&id).await.unwrap();
        assert_eq!(
            scheduler.interval_for(&id).await,
            Some(Duration::from_secs(6 * 3600))
        );
    }

    #[tokio::test]
    async fn test_stop_removes_cycle() {
        let messenger = Arc::new(MockMessenger::new());
        let (_dir, store, scheduler) = make_scheduler(messenger).await;
        let id = insert_community(&store, PostingFrequency::Moderate).await;

        scheduler.start(&id).await.unwrap();
        scheduler.stop(&id).await;

        assert!(!scheduler.is_scheduled(&id).await);
        assert_eq!(scheduler.task_count().await, 0);
    }

    #[tokio::test]
    async fn test_stop_unscheduled_is_noop() {
        let messenger = Arc::new(MockMessenger::new());
        let (_dir, _store, scheduler) = make_scheduler(messenger).await;

        scheduler.stop(&CommunityId::from("never-started")).await;
        assert_eq!(scheduler.task_count().await, 0);
    }

    #[tokio::test]
    async fn test_start_missing_community() {
        let messenger = Arc::new(MockMessenger::new());
        let (_dir, _store, scheduler) = make_scheduler(messenger).await;

        let err = scheduler
            .start(&CommunityId::from("nope"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycle_fires_at_interval() {
        let messenger = Arc::new(MockMessenger::new());
        let (_dir, store, scheduler) = make_scheduler(messenger.clone()).await;
        let id = insert_community(&store, PostingFrequency::High).await;

        scheduler.start(&id).await.unwrap();
        assert_eq!(messenger.sent_count().await, 0);

        // The spawned cycle must register its sleep before the clock moves.
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(6 * 3600)).await;
        // Let the spawned cycle run its tick.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert!(messenger.sent_count().await >= 1);

        let loaded = store.find(&id).await.unwrap();
        assert!(!loaded.post_log.is_empty());
        assert_eq!(loaded.post_log[0].origin, hause_models::PostOrigin::Scheduled);
    }
}
