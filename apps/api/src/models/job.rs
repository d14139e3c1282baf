//! Job target — the role a resume is being tailored toward.

use serde::{Deserialize, Serialize};

/// The target job. All fields are free-form and independently editable;
/// readiness is a precondition checked when optimization is requested,
/// not an invariant enforced continuously.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTarget {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
}

/// Partial update for job fields. `None` leaves a field untouched;
/// an empty string clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobTargetUpdate {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl JobTarget {
    /// Optimization precondition: a non-empty description, or both a title
    /// and a company. Either alone is enough context to tailor against.
    pub fn is_ready(&self) -> bool {
        non_empty(&self.description) || (non_empty(&self.title) && non_empty(&self.company))
    }

    /// Human-readable label of the target role, when one can be named.
    pub fn role_label(&self) -> Option<String> {
        match (&self.title, &self.company) {
            (Some(t), Some(c)) if !t.trim().is_empty() && !c.trim().is_empty() => {
                Some(format!("{} at {}", t.trim(), c.trim()))
            }
            (Some(t), _) if !t.trim().is_empty() => Some(t.trim().to_string()),
            _ => None,
        }
    }

    pub fn apply(&mut self, update: JobTargetUpdate) {
        let normalize = |v: String| {
            let trimmed = v.trim().to_string();
            if trimmed.is_empty() { None } else { Some(trimmed) }
        };
        if let Some(title) = update.title {
            self.title = normalize(title);
        }
        if let Some(company) = update.company {
            self.company = normalize(company);
        }
        if let Some(description) = update.description {
            self.description = normalize(description);
        }
    }
}
