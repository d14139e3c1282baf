//! Renders a structured profile into a presentational tree, and flattens
//! that tree into a contract-level export artifact.
//!
//! Rendering is pure: same profile + template in, same tree out. Format
//! fidelity (real PDF/DOCX) is the export collaborator's responsibility.

use serde::{Deserialize, Serialize};

use crate::models::profile::ResumeProfile;
use crate::templates::TemplateId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderBlock {
    Heading { text: String },
    Paragraph { text: String },
    Bullets { items: Vec<String> },
    Contact { email: String, phone: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedSection {
    pub id: String,
    pub blocks: Vec<RenderBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedResume {
    pub template: TemplateId,
    pub sections: Vec<RenderedSection>,
}

/// A download artifact. Plain text here; a production renderer swaps in
/// behind the same shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: String,
    pub content: String,
}

fn header_section(profile: &ResumeProfile, with_contact: bool) -> RenderedSection {
    let mut blocks = vec![
        RenderBlock::Heading {
            text: profile.name.clone(),
        },
        RenderBlock::Paragraph {
            text: profile.title.clone(),
        },
    ];
    if with_contact {
        blocks.push(RenderBlock::Contact {
            email: profile.email.clone(),
            phone: profile.phone.clone(),
        });
    }
    RenderedSection {
        id: "header".to_string(),
        blocks,
    }
}

fn summary_section(profile: &ResumeProfile) -> RenderedSection {
    RenderedSection {
        id: "summary".to_string(),
        blocks: vec![
            RenderBlock::Heading {
                text: "Summary".to_string(),
            },
            RenderBlock::Paragraph {
                text: profile.summary.clone(),
            },
        ],
    }
}

fn experience_section(profile: &ResumeProfile) -> RenderedSection {
    let mut blocks = vec![RenderBlock::Heading {
        text: "Experience".to_string(),
    }];
    for entry in &profile.experience {
        blocks.push(RenderBlock::Paragraph {
            text: format!("{} — {} ({})", entry.title, entry.company, entry.period),
        });
        blocks.push(RenderBlock::Bullets {
            items: entry.responsibilities.clone(),
        });
    }
    RenderedSection {
        id: "experience".to_string(),
        blocks,
    }
}

fn education_section(profile: &ResumeProfile) -> RenderedSection {
    let items = profile
        .education
        .iter()
        .map(|e| format!("{}, {} ({})", e.degree, e.school, e.year))
        .collect();
    RenderedSection {
        id: "education".to_string(),
        blocks: vec![
            RenderBlock::Heading {
                text: "Education".to_string(),
            },
            RenderBlock::Bullets { items },
        ],
    }
}

fn skills_section(profile: &ResumeProfile) -> RenderedSection {
    RenderedSection {
        id: "skills".to_string(),
        blocks: vec![
            RenderBlock::Heading {
                text: "Skills".to_string(),
            },
            RenderBlock::Paragraph {
                text: profile.skills.join(" · "),
            },
        ],
    }
}

/// Arranges the profile's sections per template. Section ORDER and chrome
/// vary; the content never does.
pub fn render(profile: &ResumeProfile, template: TemplateId) -> RenderedResume {
    let sections = match template {
        // Modern and Creative lead with the narrative.
        TemplateId::Modern | TemplateId::Creative => vec![
            header_section(profile, true),
            summary_section(profile),
            skills_section(profile),
            experience_section(profile),
            education_section(profile),
        ],
        // Simple and Professional lead with experience.
        TemplateId::Simple | TemplateId::Professional => vec![
            header_section(profile, true),
            experience_section(profile),
            education_section(profile),
            skills_section(profile),
        ],
        // Executive foregrounds the summary, education last.
        TemplateId::Executive => vec![
            header_section(profile, true),
            summary_section(profile),
            experience_section(profile),
            skills_section(profile),
            education_section(profile),
        ],
        // Minimal collapses contact details entirely.
        TemplateId::Minimal => vec![
            header_section(profile, false),
            experience_section(profile),
            skills_section(profile),
        ],
    };

    RenderedResume { template, sections }
}

/// Flattens the rendered tree into a plain-text artifact with a suggested
/// filename. Idempotent; no workflow state is touched.
pub fn export(profile: &ResumeProfile, template: TemplateId) -> ExportArtifact {
    let rendered = render(profile, template);
    let mut out = String::new();

    for section in &rendered.sections {
        for block in &section.blocks {
            match block {
                RenderBlock::Heading { text } => {
                    out.push_str(text);
                    out.push('\n');
                    out.push_str(&"=".repeat(text.chars().count()));
                    out.push('\n');
                }
                RenderBlock::Paragraph { text } => {
                    out.push_str(text);
                    out.push('\n');
                }
                RenderBlock::Bullets { items } => {
                    for item in items {
                        out.push_str("  - ");
                        out.push_str(item);
                        out.push('\n');
                    }
                }
                RenderBlock::Contact { email, phone } => {
                    out.push_str(&format!("{email} | {phone}\n"));
                }
            }
        }
        out.push('\n');
    }

    let slug = profile.name.to_lowercase().replace(' ', "-");
    ExportArtifact {
        filename: format!("{}-{}.txt", slug, serde_variant_name(template)),
        content_type: "text/plain".to_string(),
        content: out,
    }
}

fn serde_variant_name(template: TemplateId) -> &'static str {
    match template {
        TemplateId::Modern => "modern",
        TemplateId::Simple => "simple",
        TemplateId::Professional => "professional",
        TemplateId::Creative => "creative",
        TemplateId::Executive => "executive",
        TemplateId::Minimal => "minimal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::sample_profile;

    #[test]
    fn test_render_is_pure_presentation() {
        let profile = sample_profile();
        let a = render(&profile, TemplateId::Modern);
        let b = render(&profile, TemplateId::Simple);
        // Different arrangement, same underlying content.
        assert_ne!(a.sections, b.sections);
        let has_name = |r: &RenderedResume| {
            r.sections.iter().any(|s| {
                s.blocks
                    .iter()
                    .any(|b| matches!(b, RenderBlock::Heading { text } if *text == profile.name))
            })
        };
        assert!(has_name(&a));
        assert!(has_name(&b));
    }

    #[test]
    fn test_simple_leads_with_experience_after_header() {
        let rendered = render(&sample_profile(), TemplateId::Simple);
        assert_eq!(rendered.sections[0].id, "header");
        assert_eq!(rendered.sections[1].id, "experience");
    }

    #[test]
    fn test_minimal_drops_contact_block() {
        let rendered = render(&sample_profile(), TemplateId::Minimal);
        let has_contact = rendered.sections.iter().any(|s| {
            s.blocks
                .iter()
                .any(|b| matches!(b, RenderBlock::Contact { .. }))
        });
        assert!(!has_contact);
    }

    #[test]
    fn test_export_artifact_carries_name_and_template_in_filename() {
        let artifact = export(&sample_profile(), TemplateId::Executive);
        assert_eq!(artifact.filename, "john-doe-executive.txt");
        assert_eq!(artifact.content_type, "text/plain");
        assert!(artifact.content.contains("John Doe"));
        assert!(artifact.content.contains("Experience"));
    }

    #[test]
    fn test_export_is_idempotent() {
        let profile = sample_profile();
        let a = export(&profile, TemplateId::Modern);
        let b = export(&profile, TemplateId::Modern);
        assert_eq!(a.content, b.content);
    }
}
