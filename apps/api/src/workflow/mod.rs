//! Resume Optimization Workflow — the state machine that owns a session's
//! resume, job target, and optimization result, and orchestrates the intake
//! adapter and the optimization engine around it.

pub mod handlers;
pub mod manager;
pub mod session;

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobTarget;
use crate::models::profile::ResumeProfile;
use crate::optimize::{OptimizationParameters, OptimizeEngine};
use crate::workflow::manager::SessionManager;
use crate::workflow::session::WorkflowView;

/// Automatic retries for a failed engine run — it models a remote call.
const ENGINE_RETRIES: u32 = 1;

/// Everything an engine run needs, captured under the lock at start time so
/// the run is immune to later edits (those cancel it via the token instead).
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub profile: ResumeProfile,
    pub job: JobTarget,
    pub parameters: OptimizationParameters,
}

/// Validates preconditions, enters `Optimizing`, and captures the run inputs.
/// The caller decides whether to drive the run inline (tests) or spawned.
pub async fn start_optimization(
    sessions: &SessionManager,
    id: Uuid,
) -> Result<(u64, RunInputs), AppError> {
    sessions
        .with_session(id, |session| {
            let token = session.begin_optimize()?;
            let inputs = RunInputs {
                // begin_optimize guarantees the resume is present.
                profile: session
                    .resume()
                    .map(|r| r.profile.clone())
                    .ok_or_else(|| AppError::Validation("Upload a resume first".to_string()))?,
                job: session.job().clone(),
                parameters: session.parameters(),
            };
            Ok((token, inputs))
        })
        .await
}

/// Runs the engine (with retry) and commits the outcome under the session
/// lock. A run whose token went stale commits nothing.
pub async fn drive_optimization(
    sessions: SessionManager,
    engine: Arc<dyn OptimizeEngine>,
    id: Uuid,
    token: u64,
    inputs: RunInputs,
) {
    let mut outcome = engine
        .optimize(&inputs.profile, &inputs.job, &inputs.parameters)
        .await;

    for attempt in 0..ENGINE_RETRIES {
        if outcome.is_ok() {
            break;
        }
        warn!(
            "Engine run {token} for session {id} failed (attempt {}), retrying",
            attempt + 1
        );
        outcome = engine
            .optimize(&inputs.profile, &inputs.job, &inputs.parameters)
            .await;
    }

    let committed = match outcome {
        Ok(result) => {
            let score = result.match_score;
            let committed = sessions
                .with_session(id, |session| Ok(session.complete_optimize(token, result)))
                .await
                .unwrap_or(false);
            if committed {
                info!("Session {id}: optimization complete, match score {score}");
            }
            committed
        }
        Err(e) => {
            warn!("Session {id}: optimization failed after retry: {e}");
            sessions
                .with_session(id, |session| Ok(session.fail_optimize(token)))
                .await
                .unwrap_or(false)
        }
    };

    if !committed {
        warn!("Session {id}: dropped stale optimization run {token}");
    }
}

/// Fire-and-forget run used by the HTTP layer: the response returns the busy
/// view immediately; completion lands via the spawned task.
pub fn spawn_optimization(
    sessions: SessionManager,
    engine: Arc<dyn OptimizeEngine>,
    id: Uuid,
    token: u64,
    inputs: RunInputs,
) {
    tokio::spawn(drive_optimization(sessions, engine, id, token, inputs));
}

/// Re-runs optimization after a parameter change when the service is
/// configured for it. The guarded begin/commit path makes the re-run replace
/// the previous result atomically.
pub async fn reoptimize_if_configured(
    sessions: &SessionManager,
    engine: Arc<dyn OptimizeEngine>,
    id: Uuid,
    auto: bool,
) -> Result<WorkflowView, AppError> {
    if auto {
        let (token, inputs) = start_optimization(sessions, id).await?;
        spawn_optimization(sessions.clone(), engine, id, token, inputs);
    }
    sessions.view(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::models::job::JobTargetUpdate;
    use crate::optimize::engine::{KeywordEngine, OptimizationResult};
    use crate::workflow::session::test_support::raw_resume;
    use crate::workflow::session::WorkflowState;

    /// Engine that fails a configured number of times before succeeding.
    struct FlakyEngine {
        failures: AtomicU32,
        calls: AtomicU32,
    }

    impl FlakyEngine {
        fn failing(times: u32) -> Self {
            FlakyEngine {
                failures: AtomicU32::new(times),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl OptimizeEngine for FlakyEngine {
        async fn optimize(
            &self,
            profile: &ResumeProfile,
            _job: &JobTarget,
            _params: &OptimizationParameters,
        ) -> Result<OptimizationResult, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failures.load(Ordering::SeqCst) > 0 {
                self.failures.fetch_sub(1, Ordering::SeqCst);
                return Err(AppError::Engine("engine unavailable".to_string()));
            }
            Ok(OptimizationResult {
                profile: profile.clone(),
                match_score: 61,
                improvements: vec!["Recovered after transient engine failure".to_string()],
            })
        }
    }

    async fn load_ready_session(sessions: &SessionManager) -> Uuid {
        let view = sessions.create(Uuid::new_v4()).await;
        let id = view.session_id;
        sessions
            .with_session(id, |session| {
                let token = session.begin_intake();
                session.commit_resume(token, raw_resume("jane_smith.pdf"));
                session.update_job(JobTargetUpdate {
                    title: Some("Senior Engineer".to_string()),
                    company: Some("Acme".to_string()),
                    description: Some("Looking for React and TypeScript".to_string()),
                });
                Ok(())
            })
            .await
            .unwrap();
        id
    }

    fn instant_engine() -> Arc<dyn OptimizeEngine> {
        Arc::new(KeywordEngine::new(std::time::Duration::ZERO))
    }

    #[tokio::test]
    async fn test_full_run_lands_in_optimized_with_score() {
        let sessions = SessionManager::new();
        let id = load_ready_session(&sessions).await;

        let (token, inputs) = start_optimization(&sessions, id).await.unwrap();
        assert!(sessions.view(id).await.unwrap().is_processing);

        drive_optimization(sessions.clone(), instant_engine(), id, token, inputs).await;

        let view = sessions.view(id).await.unwrap();
        assert_eq!(view.state, WorkflowState::Optimized);
        assert!(view.match_score.is_some());
        assert!(!view.improvements.is_empty());
        assert!(view.show_parameters);
    }

    #[tokio::test]
    async fn test_double_start_is_rejected_while_pending() {
        let sessions = SessionManager::new();
        let id = load_ready_session(&sessions).await;

        let (token, inputs) = start_optimization(&sessions, id).await.unwrap();
        let second = start_optimization(&sessions, id).await;
        assert!(matches!(second, Err(AppError::Conflict(_))));

        drive_optimization(sessions.clone(), instant_engine(), id, token, inputs).await;
        assert_eq!(
            sessions.view(id).await.unwrap().state,
            WorkflowState::Optimized
        );
    }

    #[tokio::test]
    async fn test_reupload_mid_run_discards_the_completion() {
        let sessions = SessionManager::new();
        let id = load_ready_session(&sessions).await;

        let (token, inputs) = start_optimization(&sessions, id).await.unwrap();

        // Re-upload before driving the run to completion.
        sessions
            .with_session(id, |session| {
                let intake = session.begin_intake();
                session.commit_resume(intake, raw_resume("newer.pdf"));
                Ok(())
            })
            .await
            .unwrap();

        drive_optimization(sessions.clone(), instant_engine(), id, token, inputs).await;

        let view = sessions.view(id).await.unwrap();
        assert_eq!(view.state, WorkflowState::ResumeLoaded);
        assert!(view.match_score.is_none());
        assert_eq!(view.resume_filename.as_deref(), Some("newer.pdf"));
    }

    #[tokio::test]
    async fn test_engine_failure_retries_once_then_recovers_state() {
        let sessions = SessionManager::new();
        let id = load_ready_session(&sessions).await;

        let engine = Arc::new(FlakyEngine::failing(u32::MAX));
        let (token, inputs) = start_optimization(&sessions, id).await.unwrap();
        drive_optimization(sessions.clone(), engine.clone(), id, token, inputs).await;

        // One initial call plus one retry.
        assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
        let view = sessions.view(id).await.unwrap();
        assert_eq!(view.state, WorkflowState::ResumeLoaded);
        assert!(view.match_score.is_none());
    }

    #[tokio::test]
    async fn test_single_transient_failure_succeeds_on_retry() {
        let sessions = SessionManager::new();
        let id = load_ready_session(&sessions).await;

        let engine = Arc::new(FlakyEngine::failing(1));
        let (token, inputs) = start_optimization(&sessions, id).await.unwrap();
        drive_optimization(sessions.clone(), engine.clone(), id, token, inputs).await;

        assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
        let view = sessions.view(id).await.unwrap();
        assert_eq!(view.state, WorkflowState::Optimized);
        assert_eq!(view.match_score, Some(61));
    }

    #[tokio::test]
    async fn test_rerun_replaces_previous_result() {
        let sessions = SessionManager::new();
        let id = load_ready_session(&sessions).await;
        let engine = instant_engine();

        let (token, inputs) = start_optimization(&sessions, id).await.unwrap();
        drive_optimization(sessions.clone(), engine.clone(), id, token, inputs).await;
        let first = sessions.view(id).await.unwrap().match_score;

        // Sharpen the target and explicitly re-run from Optimized.
        sessions
            .with_session(id, |session| {
                session.update_job(JobTargetUpdate {
                    description: Some("the and of with".to_string()),
                    ..Default::default()
                });
                Ok(())
            })
            .await
            .unwrap();
        let (token, inputs) = start_optimization(&sessions, id).await.unwrap();
        drive_optimization(sessions.clone(), engine, id, token, inputs).await;

        let second = sessions.view(id).await.unwrap().match_score;
        assert!(first.is_some() && second.is_some());
        assert_ne!(first, second);
    }
}
