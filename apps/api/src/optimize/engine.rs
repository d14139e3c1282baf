//! Optimization engine — pluggable, trait-based backend that rewrites a
//! profile toward a job target and scores the match.
//!
//! Default: `KeywordEngine` (pure-Rust, deterministic, fully testable).
//! A remote backend can be swapped in behind the same trait without touching
//! the workflow state machine.
//!
//! `AppState` holds an `Arc<dyn OptimizeEngine>`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::JobTarget;
use crate::models::profile::ResumeProfile;
use crate::optimize::keywords::{job_term_inventory, JobTerm};
use crate::optimize::params::OptimizationParameters;

/// Match strength when a term appears in the skill list.
const SKILL_MATCH: f32 = 1.0;
/// Match strength when a term appears only in prose.
const TEXT_MATCH: f32 = 0.6;
/// Score reported when the job target yields no usable keywords
/// (title-and-company-only targets with generic wording).
const NEUTRAL_SCORE: u8 = 50;

/// The optimization output: a derived profile, a 0–100 match score, and
/// human-readable improvement notes (always at least one).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub profile: ResumeProfile,
    pub match_score: u8,
    pub improvements: Vec<String>,
}

/// The engine seam. The caller must not block on this — invocation is async
/// and the workflow tolerates cancellation of in-flight runs.
#[async_trait]
pub trait OptimizeEngine: Send + Sync {
    async fn optimize(
        &self,
        profile: &ResumeProfile,
        job: &JobTarget,
        params: &OptimizationParameters,
    ) -> Result<OptimizationResult, AppError>;
}

/// Deterministic keyword-overlap engine with simulated latency.
///
/// Pure in its declared inputs: the same (profile, job, params) triple always
/// produces the same result, and the input profile is never mutated.
pub struct KeywordEngine {
    latency: Duration,
}

impl KeywordEngine {
    pub fn new(latency: Duration) -> Self {
        KeywordEngine { latency }
    }
}

#[async_trait]
impl OptimizeEngine for KeywordEngine {
    async fn optimize(
        &self,
        profile: &ResumeProfile,
        job: &JobTarget,
        params: &OptimizationParameters,
    ) -> Result<OptimizationResult, AppError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(run_keyword_optimization(profile, job, params))
    }
}

/// The core rewrite + scoring pass. Synchronous and allocation-only; the
/// async shell above exists for latency simulation and trait parity with a
/// remote backend.
pub fn run_keyword_optimization(
    profile: &ResumeProfile,
    job: &JobTarget,
    params: &OptimizationParameters,
) -> OptimizationResult {
    let inventory = job_term_inventory(job);
    let mut improvements = Vec::new();

    let match_score = compute_match_score(profile, &inventory, params);

    let mut optimized = profile.clone();
    rewrite_summary(&mut optimized, job, &inventory, &mut improvements);
    reorder_and_extend_skills(&mut optimized, &inventory, params, &mut improvements);
    trim_responsibilities(&mut optimized, params, &mut improvements);

    if improvements.is_empty() {
        // Guaranteed non-empty improvements list even for a degenerate target.
        improvements.push("Applied general tightening to the resume content".to_string());
    }

    OptimizationResult {
        profile: optimized,
        match_score,
        improvements,
    }
}

/// Weighted keyword coverage, blended between skill-list matches and prose
/// matches according to the skills/experience sliders, scaled to 0–100.
fn compute_match_score(
    profile: &ResumeProfile,
    inventory: &[JobTerm],
    params: &OptimizationParameters,
) -> u8 {
    if inventory.is_empty() {
        return NEUTRAL_SCORE;
    }

    let mut total_weight = 0.0_f32;
    let mut skill_hits = 0.0_f32;
    let mut text_hits = 0.0_f32;

    for term in inventory {
        total_weight += term.weighted_score;
        if profile.has_skill(&term.term) {
            skill_hits += SKILL_MATCH * term.weighted_score;
        } else if profile.mentions(&term.term) {
            text_hits += TEXT_MATCH * term.weighted_score;
        }
    }

    let skill_cov = skill_hits / total_weight;
    let text_cov = text_hits / total_weight;

    // Blend the two coverages by the slider weights so the tuning panel
    // observably changes the score.
    let skills_w = params.skills_emphasis as f32;
    let exp_w = params.experience_highlight as f32;
    let blended = (skill_cov * skills_w + text_cov * exp_w) / (skills_w + exp_w);

    // Skill matches can double-count as prose matches at most once each, so
    // blended stays in [0, 1]; clamp anyway before the integer conversion.
    (blended.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn rewrite_summary(
    optimized: &mut ResumeProfile,
    job: &JobTarget,
    inventory: &[JobTerm],
    improvements: &mut Vec<String>,
) {
    let top_terms: Vec<&str> = inventory.iter().take(3).map(|t| t.display.as_str()).collect();
    if top_terms.is_empty() && job.role_label().is_none() {
        return;
    }

    let mut lead = match job.role_label() {
        Some(role) => format!("{} targeting the {} role", optimized.title, role),
        None => optimized.title.clone(),
    };
    if !top_terms.is_empty() {
        lead.push_str(&format!(", with a focus on {}", top_terms.join(", ")));
    }
    lead.push('.');

    optimized.summary = format!("{} {}", lead, optimized.summary);
    improvements.push("Adjusted summary to align with job requirements".to_string());
}

fn reorder_and_extend_skills(
    optimized: &mut ResumeProfile,
    inventory: &[JobTerm],
    params: &OptimizationParameters,
    improvements: &mut Vec<String>,
) {
    if inventory.is_empty() {
        return;
    }

    // Skills matching a job term float to the front, ordered by term weight;
    // everything else keeps its relative order behind them.
    let rank_of = |skill: &str| {
        inventory
            .iter()
            .position(|t| t.term == skill.to_lowercase())
    };
    let before = optimized.skills.clone();
    optimized
        .skills
        .sort_by_key(|s| rank_of(s).unwrap_or(usize::MAX));
    if optimized.skills != before {
        improvements.push("Reordered skills to surface overlap with the job".to_string());
    }

    // Inject missing top job terms, scaled by keyword emphasis (1..=5 terms).
    let inject_budget = (params.keyword_emphasis as usize + 1) / 2;
    let mut injected = 0usize;
    for term in inventory {
        if injected >= inject_budget {
            break;
        }
        if optimized.push_unique_skill(&term.display) {
            injected += 1;
        }
    }
    if injected > 0 {
        improvements.push(format!(
            "Added {injected} keyword{} from the job description",
            if injected == 1 { "" } else { "s" }
        ));
    }
}

fn trim_responsibilities(
    optimized: &mut ResumeProfile,
    params: &OptimizationParameters,
    improvements: &mut Vec<String>,
) {
    // briefness_factor runs concise (1) to detailed (10): keep a matching
    // fraction of each role's bullets, never fewer than one.
    let keep_ratio = params.briefness_factor as f32 / 10.0;
    let mut trimmed = 0usize;
    for entry in &mut optimized.experience {
        let keep = ((entry.responsibilities.len() as f32 * keep_ratio).ceil() as usize).max(1);
        if keep < entry.responsibilities.len() {
            trimmed += entry.responsibilities.len() - keep;
            entry.responsibilities.truncate(keep);
        }
    }

    // Low technical detail strips parenthetical qualifiers from bullets.
    if params.technical_detail <= 3 {
        for entry in &mut optimized.experience {
            for bullet in &mut entry.responsibilities {
                if let (Some(open), Some(close)) = (bullet.find('('), bullet.rfind(')')) {
                    if open < close {
                        let mut plain = String::new();
                        plain.push_str(bullet[..open].trim_end());
                        plain.push_str(&bullet[close + 1..]);
                        *bullet = plain.trim_end().to_string();
                    }
                }
            }
        }
        improvements.push("Simplified technical phrasing in experience bullets".to_string());
    }

    if trimmed > 0 {
        improvements.push(format!("Condensed {trimmed} lower-impact bullet points"));
    }
}
