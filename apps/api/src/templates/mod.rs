// Template & Preview Selector — pure presentation. A template controls how a
// structured profile is arranged for preview/export, never its content.

pub mod render;

use serde::{Deserialize, Serialize};

pub use render::{render, ExportArtifact, RenderBlock, RenderedResume, RenderedSection};

/// Gallery of visual templates. Selection is independent of the optimization
/// lifecycle and survives optimization resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Simple,
    Professional,
    Creative,
    Executive,
    Minimal,
}

impl TemplateId {
    /// Ordered gallery listing, as shown in the selector modal.
    pub fn all() -> &'static [TemplateId] {
        &[
            TemplateId::Modern,
            TemplateId::Simple,
            TemplateId::Professional,
            TemplateId::Creative,
            TemplateId::Executive,
            TemplateId::Minimal,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateId::Modern => "Modern",
            TemplateId::Simple => "Simple",
            TemplateId::Professional => "Professional",
            TemplateId::Creative => "Creative",
            TemplateId::Executive => "Executive",
            TemplateId::Minimal => "Minimal",
        }
    }
}
