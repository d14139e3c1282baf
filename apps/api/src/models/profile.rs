//! Structured resume data — the machine-readable decomposition of a resume
//! that flows through intake, optimization, and rendering.

use serde::{Deserialize, Serialize};

/// A single position held, with its bullet points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub period: String,
    pub responsibilities: Vec<String>,
}

/// A single degree or certification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub year: String,
}

/// Structured resume. `skills` is order-preserving for display and kept
/// duplicate-free via [`ResumeProfile::push_unique_skill`].
///
/// Invariant: a profile produced by a successful intake has non-empty
/// `summary` and `skills`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub title: String,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
}

impl ResumeProfile {
    /// Appends a skill unless an equal skill (case-insensitive) is already listed.
    pub fn push_unique_skill(&mut self, skill: &str) -> bool {
        let lower = skill.to_lowercase();
        if self.skills.iter().any(|s| s.to_lowercase() == lower) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// True if the term appears in the skill list (case-insensitive exact match).
    pub fn has_skill(&self, term: &str) -> bool {
        let lower = term.to_lowercase();
        self.skills.iter().any(|s| s.to_lowercase() == lower)
    }

    /// True if the term appears anywhere in the profile's prose — title,
    /// summary, or experience bullets. Substring match, case-insensitive.
    pub fn mentions(&self, term: &str) -> bool {
        let lower = term.to_lowercase();
        if self.title.to_lowercase().contains(&lower) || self.summary.to_lowercase().contains(&lower)
        {
            return true;
        }
        self.experience.iter().any(|e| {
            e.title.to_lowercase().contains(&lower)
                || e.responsibilities
                    .iter()
                    .any(|r| r.to_lowercase().contains(&lower))
        })
    }
}

/// An uploaded resume: the original file identity, its decoded text, and the
/// structured profile extracted from it. Owned exclusively by the workflow
/// session — replaced wholesale on re-upload, discarded on reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResume {
    pub filename: String,
    pub raw_text: String,
    pub profile: ResumeProfile,
}

#[cfg(test)]
pub fn sample_profile() -> ResumeProfile {
    ResumeProfile {
        name: "John Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        phone: "555-123-4567".to_string(),
        title: "Senior Software Engineer".to_string(),
        summary: "Experienced software engineer with expertise in React, Node.js, and cloud \
                  infrastructure. 8+ years building scalable web applications and leading \
                  development teams."
            .to_string(),
        experience: vec![
            ExperienceEntry {
                title: "Senior Software Engineer".to_string(),
                company: "Tech Solutions Inc.".to_string(),
                period: "2018 - Present".to_string(),
                responsibilities: vec![
                    "Lead a team of 5 engineers developing a SaaS platform".to_string(),
                    "Architect and implement microservices using Node.js and AWS".to_string(),
                    "Optimize React frontend performance (bundle size down 40%)".to_string(),
                ],
            },
            ExperienceEntry {
                title: "Software Engineer".to_string(),
                company: "WebDev Agency".to_string(),
                period: "2015 - 2018".to_string(),
                responsibilities: vec![
                    "Developed responsive web applications using React and Redux".to_string(),
                    "Implemented RESTful APIs using Express.js".to_string(),
                ],
            },
        ],
        education: vec![EducationEntry {
            degree: "M.S. Computer Science".to_string(),
            school: "Tech University".to_string(),
            year: "2015".to_string(),
        }],
        skills: vec![
            "JavaScript".to_string(),
            "React".to_string(),
            "Node.js".to_string(),
            "AWS".to_string(),
            "TypeScript".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_unique_skill_dedupes_case_insensitively() {
        let mut profile = sample_profile();
        assert!(!profile.push_unique_skill("react"));
        assert!(profile.push_unique_skill("GraphQL"));
        assert!(!profile.push_unique_skill("graphql"));
        assert_eq!(profile.skills.last().map(String::as_str), Some("GraphQL"));
    }

    #[test]
    fn test_mentions_searches_title_summary_and_bullets() {
        let profile = sample_profile();
        assert!(profile.mentions("cloud infrastructure"));
        assert!(profile.mentions("SaaS"));
        assert!(profile.mentions("senior software"));
        assert!(!profile.mentions("kubernetes"));
    }

    #[test]
    fn test_has_skill_is_exact_not_substring() {
        let profile = sample_profile();
        assert!(profile.has_skill("aws"));
        assert!(!profile.has_skill("Java")); // "JavaScript" must not match
    }

    #[test]
    fn test_profile_round_trips_through_json() {
        let profile = sample_profile();
        let json = serde_json::to_string(&profile).unwrap();
        let recovered: ResumeProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, profile);
    }
}
