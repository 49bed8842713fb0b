use std::error::Error;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::services::live_match_service::LiveMatchService;

/// Every minute, on the minute.
const TICK_SCHEDULE: &str = "0 * * * * *";

/// Advances the minute of every live fixture once per real-world minute.
pub struct MatchClockService {
    scheduler: Arc<Mutex<JobScheduler>>,
    live_matches: LiveMatchService,
    job_id: Mutex<Option<Uuid>>,
}

impl MatchClockService {
    pub async fn new(live_matches: LiveMatchService) -> Result<Self, Box<dyn Error>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            live_matches,
            job_id: Mutex::new(None),
        })
    }

    pub async fn start(&self) -> Result<(), Box<dyn Error>> {
        let scheduler = self.scheduler.lock().await;

        let live_matches = self.live_matches.clone();
        let tick_job = Job::new_async(TICK_SCHEDULE, move |_uuid, _l| {
            let live_matches = live_matches.clone();
            Box::pin(async move {
                match live_matches.tick_live_fixtures().await {
                    Ok(0) => {}
                    Ok(advanced) => tracing::debug!("Match clock advanced {} fixtures", advanced),
                    Err(e) => tracing::error!("Match clock tick failed: {}", e),
                }
            })
        })?;

        let job_id = scheduler.add(tick_job).await?;
        *self.job_id.lock().await = Some(job_id);
        scheduler.start().await?;

        tracing::info!("Match clock started");
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), Box<dyn Error>> {
        let mut scheduler = self.scheduler.lock().await;
        if let Some(job_id) = self.job_id.lock().await.take() {
            scheduler.remove(&job_id).await?;
        }
        scheduler.shutdown().await?;

        tracing::info!("Match clock stopped");
        Ok(())
    }
}
