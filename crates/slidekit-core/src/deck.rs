//! Pre-loaded slide content.
//!
//! A deck is read once (from TOML, JSON or the built-in sample) and handed to
//! controllers as plain [`Slide`] identifiers. Controllers never look at
//! titles or bodies; only the front-ends do.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::slider::Slide;
use crate::{Error, Result};

/// Content of a single slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl SlideContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: None,
            body: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// All slide content for one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub projects: Vec<SlideContent>,
    #[serde(default)]
    pub testimonials: Vec<SlideContent>,
}

impl Deck {
    /// Load a deck from a file; `.json` files are parsed as JSON, anything
    /// else as TOML
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let deck = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_toml_str(&content)?,
        };
        tracing::debug!(
            path = %path.display(),
            projects = deck.projects.len(),
            testimonials = deck.testimonials.len(),
            "Loaded deck"
        );
        Ok(deck)
    }

    /// Parse a deck from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let deck: Deck = toml::from_str(content)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Parse a deck from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        let deck: Deck = serde_json::from_str(content)?;
        deck.validate()?;
        Ok(deck)
    }

    fn validate(&self) -> Result<()> {
        for (section, slides) in [("projects", &self.projects), ("testimonials", &self.testimonials)] {
            if let Some(pos) = slides.iter().position(|s| s.title.trim().is_empty()) {
                return Err(Error::Deck(format!(
                    "{} entry {} has an empty title",
                    section,
                    pos + 1
                )));
            }
        }
        Ok(())
    }

    /// Built-in content used when no deck file is given
    pub fn sample() -> Self {
        Self {
            projects: vec![
                SlideContent::new("Lakeside House")
                    .with_category("residential")
                    .with_body("Timber-framed family home on the north shore."),
                SlideContent::new("Harbour Lofts")
                    .with_category("commercial")
                    .with_body("Warehouse conversion into twelve studio offices."),
                SlideContent::new("Garden Annex")
                    .with_category("residential")
                    .with_body("Single-storey extension opening onto the garden."),
                SlideContent::new("Market Hall")
                    .with_category("commercial")
                    .with_body("Restored 1890s market hall with a new glass roof."),
                SlideContent::new("Hillside Villa")
                    .with_category("residential")
                    .with_body("Split-level villa built into a south-facing slope."),
                SlideContent::new("Riverside Clinic")
                    .with_category("commercial")
                    .with_body("Day clinic with eight treatment rooms."),
                SlideContent::new("Courtyard Mews")
                    .with_category("residential")
                    .with_body("Four terraced houses around a shared courtyard."),
            ],
            testimonials: vec![
                SlideContent::new("Anna K.")
                    .with_body("They finished on time and the house is exactly what we drew on a napkin."),
                SlideContent::new("Martin B.")
                    .with_body("Clear pricing, no surprises, and a site that was spotless every evening."),
                SlideContent::new("Lea & Tom")
                    .with_body("We would hire the same team again for the next project."),
            ],
        }
    }

    /// Slide identifiers for the projects section
    pub fn project_slides(&self) -> Vec<Slide> {
        to_slides(&self.projects)
    }

    /// Slide identifiers for the testimonials section
    pub fn testimonial_slides(&self) -> Vec<Slide> {
        to_slides(&self.testimonials)
    }
}

fn to_slides(content: &[SlideContent]) -> Vec<Slide> {
    content
        .iter()
        .enumerate()
        .map(|(id, c)| Slide {
            id,
            category: c.category.clone(),
        })
        .collect()
}
