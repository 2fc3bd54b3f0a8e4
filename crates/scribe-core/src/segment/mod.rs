//! Segmentation boundary: raw transcript → named sections.
//!
//! Providers deliver either a header-delimited text summary
//! ([`HeaderSegmenter`]) or an already-segmented JSON object
//! ([`JsonSegmenter`]). Section names are resolved to parsers through a
//! provider [`Vocabulary`].

mod header;
mod json;
mod vocabulary;

pub use header::*;
pub use json::*;
pub use vocabulary::*;

use thiserror::Error;

use crate::models::SectionContent;

/// Segmentation errors.
#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid segmentation output: {0}")]
    InvalidFormat(String),
}

pub type SegmentResult<T> = Result<T, SegmentError>;

/// Turns raw transcript text into named sections.
pub trait Segmenter {
    fn segment(&self, transcript: &str) -> SegmentResult<Sections>;
}

/// One named section.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSection {
    pub name: String,
    pub content: SectionContent,
}

/// Sections in transcript order, unique by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sections(Vec<NamedSection>);

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a section. A repeated name replaces the earlier content but
    /// keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, content: SectionContent) {
        let name = name.into();
        match self.0.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.content = content,
            None => self.0.push(NamedSection { name, content }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SectionContent> {
        self.0.iter().find(|s| s.name == name).map(|s| &s.content)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamedSection> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, NamedSection> {
        self.0.iter_mut()
    }

    /// Section names in order.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Sections {
    type Item = &'a NamedSection;
    type IntoIter = std::slice::Iter<'a, NamedSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<N: Into<String>> FromIterator<(N, SectionContent)> for Sections {
    fn from_iter<I: IntoIterator<Item = (N, SectionContent)>>(iter: I) -> Self {
        let mut sections = Sections::new();
        for (name, content) in iter {
            sections.insert(name, content);
        }
        sections
    }
}
