use crate::agents::{HandlerRegistry, TaskHandler};
use crate::config::WorkerConfig;
use crate::db::{now_timestamp, Database};
use crate::models::{Agent, AgentStatus, Task};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};
use tokio::time::{interval, sleep, Duration};


/// Error raised while processing a single task
#[derive(Debug)]
pub enum WorkerError {
    Storage(rusqlite::Error),
    /// The handler rejected the task
    Handler(String),
    /// The task left `in_progress` while we were working on it
    LostTask(i64),
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerError::Storage(e) => write!(f, "Database error: {}", e),
            WorkerError::Handler(msg) => write!(f, "{}", msg),
            WorkerError::LostTask(id) => write!(f, "Task {} is no longer in progress", id),
        }
    }
}

impl std::error::Error for WorkerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkerError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for WorkerError {
    fn from(e: rusqlite::Error) -> Self {
        WorkerError::Storage(e)
    }
}

/// What happened to one pending task during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    Failed,
    /// Left untouched (no agent, no handler, or already claimed)
    Skipped,
}

/// Counters shared between the worker and the status endpoint
#[derive(Default)]
pub struct WorkerStats {
    processed: AtomicU64,
    failed: AtomicU64,
    last_tick_at: Mutex<Option<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkerStatus {
    pub enabled: bool,
    pub poll_interval_secs: u64,
    pub work_delay_ms: u64,
    pub last_tick_at: Option<String>,
    pub processed: u64,
    pub failed: u64,
}

impl WorkerStats {
    pub async fn snapshot(&self, config: &WorkerConfig) -> WorkerStatus {
        WorkerStatus {
            enabled: config.enabled,
            poll_interval_secs: config.poll_interval_secs,
            work_delay_ms: config.work_delay_ms,
            last_tick_at: self.last_tick_at.lock().await.clone(),
            processed: self.processed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Background service that polls the task table and hands pending tasks to their agent
pub struct Worker {
    db: Arc<Database>,
    handlers: Arc<HandlerRegistry>,
    config: WorkerConfig,
    stats: Arc<WorkerStats>,
}

impl Worker {
    pub fn new(db: Arc<Database>, handlers: Arc<HandlerRegistry>, config: WorkerConfig) -> Self {
        Worker {
            db,
            handlers,
            config,
            stats: Arc::new(WorkerStats::default()),
        }
    }

    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Run the polling loop until `shutdown_rx` fires (or its sender is dropped)
    pub async fn start(self: Arc<Self>, mut shutdown_rx: oneshot::Receiver<()>) {
        log::info!(
            "Task worker started (poll: {}s, work delay: {}ms)",
            self.config.poll_interval_secs,
            self.config.work_delay_ms
        );

        let mut poll_interval = interval(Duration::from_secs(self.config.poll_interval_secs.max(1)));

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    log::info!("Task worker received shutdown signal");
                    break;
                }
                _ = poll_interval.tick() => {
                    if let Err(e) = self.tick().await {
                        log::error!("Error in worker loop: {}", e);
                    }
                }
            }
        }

        log::info!("Task worker stopped");
    }

    /// Scan for pending tasks and process each one in submission order.
    /// Returns the outcome per task.
    pub async fn tick(&self) -> Result<Vec<(i64, TaskOutcome)>, WorkerError> {
        *self.stats.last_tick_at.lock().await = Some(now_timestamp());

        let pending = self.db.list_pending_tasks()?;
        if !pending.is_empty() {
            log::debug!("Found {} pending task(s)", pending.len());
        }

        let mut outcomes = Vec::with_capacity(pending.len());
        for task in pending {
            let outcome = self.process_task(&task).await;
            match outcome {
                TaskOutcome::Completed => {
                    self.stats.processed.fetch_add(1, Ordering::Relaxed);
                }
                TaskOutcome::Failed => {
                    self.stats.failed.fetch_add(1, Ordering::Relaxed);
                }
                TaskOutcome::Skipped => {}
            }
            outcomes.push((task.id, outcome));
        }

        Ok(outcomes)
    }

    async fn process_task(&self, task: &Task) -> TaskOutcome {
        let agent = match self.db.get_agent(task.agent_id) {
            Ok(Some(agent)) => agent,
            Ok(None) => {
                log::warn!("Task {} references missing agent {}, skipping", task.id, task.agent_id);
                return TaskOutcome::Skipped;
            }
            Err(e) => {
                log::error!("Failed to load agent {} for task {}: {}", task.agent_id, task.id, e);
                return TaskOutcome::Skipped;
            }
        };

        let Some(handler) = self.handlers.get(agent.kind) else {
            log::warn!("No handler registered for {} agents, skipping task {}", agent.kind, task.id);
            return TaskOutcome::Skipped;
        };

        match self.db.claim_task(task.id) {
            Ok(true) => {}
            Ok(false) => {
                log::debug!("Task {} was already claimed", task.id);
                return TaskOutcome::Skipped;
            }
            Err(e) => {
                log::error!("Failed to claim task {}: {}", task.id, e);
                return TaskOutcome::Skipped;
            }
        }

        log::info!("{} processing task {}: {}", agent.name, task.id, task.description);

        match self.run_claimed(task, &agent, handler.as_ref()).await {
            Ok(result) => {
                log::info!("Task {} completed: {}", task.id, result);
                TaskOutcome::Completed
            }
            Err(e) => {
                log::error!("Error processing task {}: {}", task.id, e);
                match self.db.fail_task(task.id, &e.to_string()) {
                    Ok(true) => {}
                    Ok(false) => {
                        log::warn!("Task {} was no longer in progress, failure not recorded", task.id)
                    }
                    Err(db_err) => {
                        log::error!("Failed to mark task {} as failed: {}", task.id, db_err)
                    }
                }
                if let Err(db_err) = self.db.set_agent_status(agent.id, AgentStatus::Error) {
                    log::error!("Failed to set agent {} status: {}", agent.id, db_err);
                }
                TaskOutcome::Failed
            }
        }
    }

    /// Work a claimed (in_progress) task to completion
    async fn run_claimed(
        &self,
        task: &Task,
        agent: &Agent,
        handler: &dyn TaskHandler,
    ) -> Result<String, WorkerError> {
        self.db.set_agent_status(agent.id, AgentStatus::Busy)?;

        if self.config.work_delay_ms > 0 {
            sleep(Duration::from_millis(self.config.work_delay_ms)).await;
        }

        let result = handler
            .handle(&task.description)
            .map_err(WorkerError::Handler)?;

        // Completion, metric and idle status commit together, so a storage error
        // here leaves the task in_progress and the failure path can still record it
        let completed =
            self.db
                .complete_task_with_metric(task.id, &result, agent.id, handler.metric_name(), 1.0)?;
        if !completed {
            return Err(WorkerError::LostTask(task.id));
        }

        Ok(result)
    }
}
