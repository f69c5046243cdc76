//! Content brief value types.
//!
//! These are the generation target. A brief is constructed once per pipeline run
//! and is not modified after it lands in the pipeline state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive bounds for `OutlineSection::suggested_word_count`.
pub const SECTION_WORD_COUNT_MIN: u32 = 100;
pub const SECTION_WORD_COUNT_MAX: u32 = 2000;

/// Inclusive bounds for `ContentGap::opportunity_score`.
pub const OPPORTUNITY_SCORE_MIN: u8 = 1;
pub const OPPORTUNITY_SCORE_MAX: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    UltimateGuide,
    HowTo,
    Comparison,
    Listicle,
    Review,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::UltimateGuide,
        ContentType::HowTo,
        ContentType::Comparison,
        ContentType::Listicle,
        ContentType::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UltimateGuide => "ultimate_guide",
            Self::HowTo => "how_to",
            Self::Comparison => "comparison",
            Self::Listicle => "listicle",
            Self::Review => "review",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }

    /// Lenient mapping used when a brief is synthesised from loosely typed
    /// strategy settings. `guide` and unknown values become `UltimateGuide`.
    pub fn from_loose(value: &str) -> Self {
        Self::parse(&normalize_token(value)).unwrap_or(Self::UltimateGuide)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchIntent {
    Informational,
    Commercial,
    Transactional,
    Navigational,
}

impl SearchIntent {
    pub const ALL: [SearchIntent; 4] = [
        SearchIntent::Informational,
        SearchIntent::Commercial,
        SearchIntent::Transactional,
        SearchIntent::Navigational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Commercial => "commercial",
            Self::Transactional => "transactional",
            Self::Navigational => "navigational",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }

    pub fn from_loose(value: &str) -> Self {
        Self::parse(&normalize_token(value)).unwrap_or(Self::Informational)
    }
}

impl fmt::Display for SearchIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize_token(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['-', ' '], "_")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentGap {
    pub topic: String,
    pub description: String,
    /// 1..=10
    pub opportunity_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineSection {
    pub section_id: String,
    pub section_title: String,
    pub short_description: String,
    pub target_keywords: Vec<String>,
    /// 100..=2000
    pub suggested_word_count: u32,
    #[serde(default)]
    pub subsections: Vec<String>,
    #[serde(default)]
    pub research_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer_brief: String,
    #[serde(default)]
    pub target_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBrief {
    pub title: String,
    pub meta_description: String,
    pub content_type: ContentType,
    pub search_intent: SearchIntent,
    pub target_audience: String,
    pub total_word_count: u32,
    /// Never empty for a validated brief.
    pub sections: Vec<OutlineSection>,
    pub faqs: Vec<Faq>,
    pub content_gaps_addressed: Vec<ContentGap>,
    #[serde(default)]
    pub internal_link_opportunities: Vec<String>,
}

/// Title-case the way the outline titles expect: the first letter of every
/// alphabetic run is upper-cased and the rest lower-cased.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
