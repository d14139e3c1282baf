//! Keyword inventory — extracts a weighted term list from the job target.
//!
//! Terms from the job title carry more weight than terms from the
//! description body; weighting is frequency × position weight.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::job::JobTarget;

const TITLE_WEIGHT: f32 = 1.0;
const BODY_WEIGHT: f32 = 0.6;

/// A single term from the job target, weighted by where and how often it appears.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTerm {
    /// Lowercased match key.
    pub term: String,
    /// Casing as first seen, for display and injection into skills.
    pub display: String,
    pub frequency: u32,
    pub position_weight: f32,
    pub weighted_score: f32,
}

/// Words too generic to signal anything about the role.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "com", "for", "from", "has", "have", "in",
    "is", "it", "its", "of", "on", "or", "our", "that", "the", "their", "they", "this", "to",
    "was", "we", "were", "will", "with", "you", "your", "looking", "developer", "engineer",
    "experience", "years", "team", "work", "working", "strong", "plus", "required", "preferred",
    "skills", "ability", "about", "role", "job", "candidate", "must", "nice",
];

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#' || c == '.'))
        .map(|w| w.trim_matches('.'))
        .filter(|w| w.len() >= 2 && !w.starts_with(|c: char| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Builds the weighted term inventory for a job target, sorted by weighted
/// score descending (ties broken alphabetically for determinism).
pub fn job_term_inventory(job: &JobTarget) -> Vec<JobTerm> {
    let mut terms: HashMap<String, JobTerm> = HashMap::new();

    let mut absorb = |text: &str, weight: f32| {
        for token in tokenize(text) {
            let key = token.to_lowercase();
            if is_stopword(&key) {
                continue;
            }
            let entry = terms.entry(key.clone()).or_insert_with(|| JobTerm {
                term: key,
                display: token.clone(),
                frequency: 0,
                position_weight: weight,
                weighted_score: 0.0,
            });
            entry.frequency += 1;
            if weight > entry.position_weight {
                entry.position_weight = weight;
            }
        }
    };

    if let Some(title) = &job.title {
        absorb(title, TITLE_WEIGHT);
    }
    if let Some(description) = &job.description {
        absorb(description, BODY_WEIGHT);
    }

    let mut inventory: Vec<JobTerm> = terms
        .into_values()
        .map(|mut t| {
            t.weighted_score = t.frequency as f32 * t.position_weight;
            t
        })
        .collect();

    inventory.sort_by(|a, b| {
        b.weighted_score
            .partial_cmp(&a.weighted_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.term.cmp(&b.term))
    });
    inventory
}
