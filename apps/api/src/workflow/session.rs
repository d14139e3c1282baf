//! The workflow session — owns a user's resume/job/optimization state and
//! enforces every transition of the machine:
//!
//! `Empty → ResumeLoaded → Optimizing → Optimized → (reset) → ResumeLoaded`
//!
//! Asynchronous work (file decode, engine runs) is fenced with monotonically
//! increasing sequence tokens: a completion carrying a stale token is
//! dropped, never committed. That makes re-upload-while-pending cancellation
//! and last-writer-wins decode fall out of the same mechanism.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobTarget, JobTargetUpdate};
use crate::models::profile::{RawResume, ResumeProfile};
use crate::optimize::{OptimizationParameters, OptimizationResult, ParameterUpdate};
use crate::templates::TemplateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowState {
    Empty,
    ResumeLoaded,
    Optimizing,
    Optimized,
}

/// View-facing snapshot of a session, shaped for the two-pane dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowView {
    pub session_id: Uuid,
    pub state: WorkflowState,
    pub resume_filename: Option<String>,
    pub job: JobTarget,
    pub can_optimize: bool,
    pub is_processing: bool,
    pub show_parameters: bool,
    pub parameters: OptimizationParameters,
    pub selected_template: TemplateId,
    pub match_score: Option<u8>,
    pub improvements: Vec<String>,
}

#[derive(Debug)]
pub struct WorkflowSession {
    pub id: Uuid,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    state: WorkflowState,
    resume: Option<RawResume>,
    job: JobTarget,
    parameters: OptimizationParameters,
    template: TemplateId,
    result: Option<OptimizationResult>,
    /// Current optimization run token; bumping it orphans any in-flight run.
    run_seq: u64,
    /// Current intake token; a decode finishing under an older token loses.
    intake_seq: u64,
}

impl WorkflowSession {
    pub fn new(owner: Uuid) -> Self {
        WorkflowSession {
            id: Uuid::new_v4(),
            owner,
            created_at: Utc::now(),
            state: WorkflowState::Empty,
            resume: None,
            job: JobTarget::default(),
            parameters: OptimizationParameters::default(),
            template: TemplateId::default(),
            result: None,
            run_seq: 0,
            intake_seq: 0,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn job(&self) -> &JobTarget {
        &self.job
    }

    pub fn parameters(&self) -> OptimizationParameters {
        self.parameters
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn result(&self) -> Option<&OptimizationResult> {
        self.result.as_ref()
    }

    pub fn resume(&self) -> Option<&RawResume> {
        self.resume.as_ref()
    }

    /// The profile currently on display: the optimized one when a result is
    /// live, otherwise the raw upload.
    pub fn display_profile(&self) -> Option<&ResumeProfile> {
        match &self.result {
            Some(result) if self.state == WorkflowState::Optimized => Some(&result.profile),
            _ => self.resume.as_ref().map(|r| &r.profile),
        }
    }

    // ── Intake ──────────────────────────────────────────────────────────

    /// Marks the start of a file decode and returns its token. The matching
    /// commit only lands if no newer intake began in the meantime.
    pub fn begin_intake(&mut self) -> u64 {
        self.intake_seq += 1;
        self.intake_seq
    }

    /// Installs a decoded resume. Valid from any state; replaces the previous
    /// upload wholesale, discards any optimization result, and cancels an
    /// in-flight run. Returns false (no transition) for a stale token.
    pub fn commit_resume(&mut self, token: u64, raw: RawResume) -> bool {
        if token != self.intake_seq {
            return false;
        }
        self.cancel_pending_run();
        self.resume = Some(raw);
        self.result = None;
        self.state = WorkflowState::ResumeLoaded;
        true
    }

    /// Installs decoded job-description text. No state transition, but an
    /// in-flight run is cancelled: the target it was tailoring against is gone.
    pub fn commit_job_description(&mut self, token: u64, text: String) -> bool {
        if token != self.intake_seq {
            return false;
        }
        self.cancel_pending_run();
        if self.state == WorkflowState::Optimizing {
            self.state = WorkflowState::ResumeLoaded;
        }
        self.job.description = Some(text);
        true
    }

    // ── Job details ─────────────────────────────────────────────────────

    /// Free-form edits to the job fields; never a transition.
    pub fn update_job(&mut self, update: JobTargetUpdate) {
        self.job.apply(update);
    }

    // ── Optimization ────────────────────────────────────────────────────

    /// Validates preconditions and enters `Optimizing`, returning the run
    /// token the eventual completion must present.
    pub fn begin_optimize(&mut self) -> Result<u64, AppError> {
        if self.state == WorkflowState::Optimizing {
            return Err(AppError::Conflict(
                "An optimization is already running".to_string(),
            ));
        }
        if self.resume.is_none() {
            return Err(AppError::Validation(
                "Upload a resume before optimizing".to_string(),
            ));
        }
        if !self.job.is_ready() {
            return Err(AppError::Validation(
                "Provide a job description, or both a job title and company".to_string(),
            ));
        }
        self.state = WorkflowState::Optimizing;
        self.run_seq += 1;
        Ok(self.run_seq)
    }

    /// Commits a finished run. A stale token means the run was cancelled —
    /// the result is dropped and nothing transitions.
    pub fn complete_optimize(&mut self, token: u64, result: OptimizationResult) -> bool {
        if token != self.run_seq || self.state != WorkflowState::Optimizing {
            return false;
        }
        self.result = Some(result);
        self.state = WorkflowState::Optimized;
        true
    }

    /// Records a failed run (post-retry): back to `ResumeLoaded`, never
    /// stuck in `Optimizing`. Stale failures are ignored.
    pub fn fail_optimize(&mut self, token: u64) -> bool {
        if token != self.run_seq || self.state != WorkflowState::Optimizing {
            return false;
        }
        self.result = None;
        self.state = WorkflowState::ResumeLoaded;
        true
    }

    fn cancel_pending_run(&mut self) {
        if self.state == WorkflowState::Optimizing {
            self.run_seq += 1;
        }
    }

    /// Discards the optimization result, keeping the uploaded resume and the
    /// selected template, and re-enables the job-detail form.
    pub fn reset_optimization(&mut self) -> Result<(), AppError> {
        match self.state {
            WorkflowState::Optimized => {
                self.result = None;
                self.state = WorkflowState::ResumeLoaded;
                Ok(())
            }
            WorkflowState::Optimizing => Err(AppError::Conflict(
                "Wait for the running optimization to finish".to_string(),
            )),
            _ => Err(AppError::Validation(
                "Nothing to reset — no optimization result".to_string(),
            )),
        }
    }

    // ── Tuning & presentation ───────────────────────────────────────────

    /// Slider updates are only meaningful once a result exists.
    pub fn update_parameters(&mut self, update: ParameterUpdate) -> Result<(), AppError> {
        if self.state != WorkflowState::Optimized {
            return Err(AppError::Validation(
                "Run an optimization before tuning parameters".to_string(),
            ));
        }
        self.parameters.apply(update);
        Ok(())
    }

    /// Template selection is available in any state once a resume exists;
    /// it touches nothing but the template.
    pub fn select_template(&mut self, template: TemplateId) -> Result<(), AppError> {
        if self.resume.is_none() {
            return Err(AppError::Validation(
                "Upload a resume before choosing a template".to_string(),
            ));
        }
        self.template = template;
        Ok(())
    }

    pub fn view(&self) -> WorkflowView {
        WorkflowView {
            session_id: self.id,
            state: self.state,
            resume_filename: self.resume.as_ref().map(|r| r.filename.clone()),
            job: self.job.clone(),
            can_optimize: self.resume.is_some()
                && self.job.is_ready()
                && self.state != WorkflowState::Optimizing,
            is_processing: self.state == WorkflowState::Optimizing,
            show_parameters: self.state == WorkflowState::Optimized,
            parameters: self.parameters,
            selected_template: self.template,
            match_score: self.result.as_ref().map(|r| r.match_score),
            improvements: self
                .result
                .as_ref()
                .map(|r| r.improvements.clone())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::intake::extract::build_profile;

    pub fn raw_resume(filename: &str) -> RawResume {
        RawResume {
            filename: filename.to_string(),
            raw_text: "decoded text".to_string(),
            profile: build_profile(filename, "decoded text"),
        }
    }

    pub fn loaded_session() -> WorkflowSession {
        let mut session = WorkflowSession::new(Uuid::new_v4());
        let token = session.begin_intake();
        assert!(session.commit_resume(token, raw_resume("jane_smith.pdf")));
        session
    }

    pub fn fake_result(score: u8) -> OptimizationResult {
        OptimizationResult {
            profile: build_profile("jane_smith.pdf", ""),
            match_score: score,
            improvements: vec!["Added keywords from job description".to_string()],
        }
    }
}
