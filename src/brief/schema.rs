//! Structural contract for content briefs.
//!
//! The validator is the only place the brief shape is enforced. The schema
//! descriptor sent to the inference service is advisory and may be ignored by it.
//! Checks are field-local; the single cross-field rule (title contains the
//! primary keyword) is advisory and never rejects a brief.

use crate::brief::model::{
    ContentBrief, ContentType, SearchIntent, OPPORTUNITY_SCORE_MAX, OPPORTUNITY_SCORE_MIN,
    SECTION_WORD_COUNT_MAX, SECTION_WORD_COUNT_MIN,
};
use crate::error::SchemaViolation;
use serde_json::{json, Map, Value};
use tracing::warn;

/// A brief that passed validation, with any advisory findings.
#[derive(Debug, Clone)]
pub struct ValidatedBrief {
    pub brief: ContentBrief,
    pub advisories: Vec<String>,
}

/// Validates candidate values against the content brief shape.
///
/// Stateless and side-effect free apart from logging advisories; safe to reuse.
#[derive(Debug, Clone, Copy, Default)]
pub struct BriefValidator<'a> {
    primary_keyword: Option<&'a str>,
}

impl<'a> BriefValidator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the title advisory check against this keyword.
    pub fn with_primary_keyword(primary_keyword: &'a str) -> Self {
        Self {
            primary_keyword: Some(primary_keyword),
        }
    }

    /// Parse raw model output as a brief. The whole response must be one JSON
    /// object, optionally wrapped in a Markdown code fence.
    pub fn parse_response(&self, text: &str) -> Result<ValidatedBrief, SchemaViolation> {
        let body = strip_code_fence(text);
        let value: Value = serde_json::from_str(body).map_err(|e| {
            SchemaViolation::single(format!("response is not a JSON document: {}", e))
        })?;
        self.validate_value(&value)
    }

    pub fn validate_value(&self, value: &Value) -> Result<ValidatedBrief, SchemaViolation> {
        let mut value = value.clone();
        integral_floats_to_integers(&mut value);
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaViolation::single("brief must be a JSON object"))?;

        let mut errs = Vec::new();
        let title = required_string(obj, "title", "", &mut errs);
        required_string(obj, "meta_description", "", &mut errs);
        required_enum(obj, "content_type", &ContentType::ALL.map(|v| v.as_str()), &mut errs);
        required_enum(obj, "search_intent", &SearchIntent::ALL.map(|v| v.as_str()), &mut errs);
        required_string(obj, "target_audience", "", &mut errs);
        required_integer(obj, "total_word_count", "", 0, u32::MAX as u64, &mut errs);
        check_sections(obj, &mut errs);
        check_faqs(obj, &mut errs);
        check_content_gaps(obj, &mut errs);
        optional_string_list(obj, "internal_link_opportunities", "", &mut errs);

        if !errs.is_empty() {
            return Err(SchemaViolation { violations: errs });
        }

        let brief: ContentBrief = serde_json::from_value(value.clone())
            .map_err(|e| SchemaViolation::single(format!("brief failed to decode: {}", e)))?;

        let advisories = title.map(|t| self.title_advisories(t)).unwrap_or_default();
        Ok(ValidatedBrief { brief, advisories })
    }

    /// Re-validate an already typed brief. Returns the advisory findings.
    pub fn validate_brief(&self, brief: &ContentBrief) -> Result<Vec<String>, SchemaViolation> {
        let value = serde_json::to_value(brief)
            .map_err(|e| SchemaViolation::single(format!("brief failed to encode: {}", e)))?;
        self.validate_value(&value).map(|validated| validated.advisories)
    }

    fn title_advisories(&self, title: &str) -> Vec<String> {
        let Some(primary) = self.primary_keyword.map(str::trim).filter(|p| !p.is_empty()) else {
            return Vec::new();
        };
        if title.to_lowercase().contains(&primary.to_lowercase()) {
            return Vec::new();
        }
        let message = format!("title should contain primary keyword: {}", primary.to_lowercase());
        warn!(title, primary_keyword = primary, "Brief title does not contain primary keyword");
        vec![message]
    }
}

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_EXACT_FLOAT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Rewrites whole-number floats such as `2400.0` as integers, recursively.
fn integral_floats_to_integers(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(integral_floats_to_integers),
        Value::Object(map) => map.values_mut().for_each(integral_floats_to_integers),
        _ => {
            let whole = value
                .as_f64()
                .filter(|f| value.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_INTEGER);
            if let Some(f) = whole {
                *value = if f < 0.0 {
                    Value::from(f as i64)
                } else {
                    Value::from(f as u64)
                };
            }
        }
    }
}

fn field_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn required_string<'v>(
    obj: &'v Map<String, Value>,
    field: &str,
    prefix: &str,
    errs: &mut Vec<String>,
) -> Option<&'v str> {
    match obj.get(field) {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            errs.push(format!("{} must be a string", field_path(prefix, field)));
            None
        }
        None => {
            errs.push(format!("{} is required", field_path(prefix, field)));
            None
        }
    }
}

fn check_string_list(value: &Value, path: &str, errs: &mut Vec<String>) {
    match value.as_array() {
        Some(items) => {
            if let Some(idx) = items.iter().position(|item| !item.is_string()) {
                errs.push(format!("{}[{}] must be a string", path, idx));
            }
        }
        None => errs.push(format!("{} must be a list of strings", path)),
    }
}

fn required_string_list(obj: &Map<String, Value>, field: &str, prefix: &str, errs: &mut Vec<String>) {
    let path = field_path(prefix, field);
    match obj.get(field) {
        Some(value) => check_string_list(value, &path, errs),
        None => errs.push(format!("{} is required", path)),
    }
}

fn optional_string_list(obj: &Map<String, Value>, field: &str, prefix: &str, errs: &mut Vec<String>) {
    if let Some(value) = obj.get(field) {
        check_string_list(value, &field_path(prefix, field), errs);
    }
}

fn required_integer(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
    min: u64,
    max: u64,
    errs: &mut Vec<String>,
) {
    let path = field_path(prefix, field);
    match obj.get(field) {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) if (min..=max).contains(&v) => {}
            Some(v) => errs.push(format!("{} = {} is outside [{}, {}]", path, v, min, max)),
            None if n.is_i64() => errs.push(format!("{} = {} is outside [{}, {}]", path, n, min, max)),
            None => errs.push(format!("{} must be an integer", path)),
        },
        Some(_) => errs.push(format!("{} must be an integer", path)),
        None => errs.push(format!("{} is required", path)),
    }
}

fn required_enum(obj: &Map<String, Value>, field: &str, allowed: &[&str], errs: &mut Vec<String>) {
    match obj.get(field) {
        Some(Value::String(s)) if allowed.contains(&s.as_str()) => {}
        Some(Value::String(s)) => errs.push(format!(
            "{} = {:?} is not one of [{}]",
            field,
            s,
            allowed.join(", ")
        )),
        Some(_) => errs.push(format!("{} must be a string", field)),
        None => errs.push(format!("{} is required", field)),
    }
}

/// Shared walk over a required list of objects.
fn for_each_object(
    obj: &Map<String, Value>,
    field: &str,
    errs: &mut Vec<String>,
    mut check: impl FnMut(&Map<String, Value>, &str, &mut Vec<String>),
) -> Option<usize> {
    let items = match obj.get(field) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            errs.push(format!("{} must be a list", field));
            return None;
        }
        None => {
            errs.push(format!("{} is required", field));
            return None;
        }
    };
    for (idx, item) in items.iter().enumerate() {
        let prefix = format!("{}[{}]", field, idx);
        match item.as_object() {
            Some(entry) => check(entry, &prefix, errs),
            None => errs.push(format!("{} must be an object", prefix)),
        }
    }
    Some(items.len())
}

fn check_sections(obj: &Map<String, Value>, errs: &mut Vec<String>) {
    let count = for_each_object(obj, "sections", errs, |section, prefix, errs| {
        required_string(section, "section_id", prefix, errs);
        required_string(section, "section_title", prefix, errs);
        required_string(section, "short_description", prefix, errs);
        required_string_list(section, "target_keywords", prefix, errs);
        required_integer(
            section,
            "suggested_word_count",
            prefix,
            SECTION_WORD_COUNT_MIN as u64,
            SECTION_WORD_COUNT_MAX as u64,
            errs,
        );
        optional_string_list(section, "subsections", prefix, errs);
        optional_string_list(section, "research_notes", prefix, errs);
    });
    if count == Some(0) {
        errs.push("sections must not be empty".to_string());
    }
}

fn check_faqs(obj: &Map<String, Value>, errs: &mut Vec<String>) {
    for_each_object(obj, "faqs", errs, |faq, prefix, errs| {
        required_string(faq, "question", prefix, errs);
        required_string(faq, "answer_brief", prefix, errs);
        optional_string_list(faq, "target_keywords", prefix, errs);
    });
}

fn check_content_gaps(obj: &Map<String, Value>, errs: &mut Vec<String>) {
    for_each_object(obj, "content_gaps_addressed", errs, |gap, prefix, errs| {
        required_string(gap, "topic", prefix, errs);
        required_string(gap, "description", prefix, errs);
        required_integer(
            gap,
            "opportunity_score",
            prefix,
            OPPORTUNITY_SCORE_MIN as u64,
            OPPORTUNITY_SCORE_MAX as u64,
            errs,
        );
    });
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    match rest.trim_end().strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

/// JSON Schema descriptor for a content brief.
pub fn brief_json_schema() -> Value {
    let string_list = json!({ "type": "array", "items": { "type": "string" } });
    json!({
        "title": "ContentBrief",
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "meta_description": { "type": "string" },
            "content_type": { "type": "string", "enum": ContentType::ALL.map(|v| v.as_str()) },
            "search_intent": { "type": "string", "enum": SearchIntent::ALL.map(|v| v.as_str()) },
            "target_audience": { "type": "string" },
            "total_word_count": { "type": "integer", "minimum": 0 },
            "sections": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "properties": {
                        "section_id": { "type": "string" },
                        "section_title": { "type": "string" },
                        "short_description": { "type": "string" },
                        "target_keywords": string_list,
                        "suggested_word_count": {
                            "type": "integer",
                            "minimum": SECTION_WORD_COUNT_MIN,
                            "maximum": SECTION_WORD_COUNT_MAX
                        },
                        "subsections": string_list,
                        "research_notes": string_list
                    },
                    "required": [
                        "section_id", "section_title", "short_description",
                        "target_keywords", "suggested_word_count"
                    ]
                }
            },
            "faqs": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "question": { "type": "string" },
                        "answer_brief": { "type": "string" },
                        "target_keywords": string_list
                    },
                    "required": ["question", "answer_brief"]
                }
            },
            "content_gaps_addressed": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "topic": { "type": "string" },
                        "description": { "type": "string" },
                        "opportunity_score": {
                            "type": "integer",
                            "minimum": OPPORTUNITY_SCORE_MIN,
                            "maximum": OPPORTUNITY_SCORE_MAX
                        }
                    },
                    "required": ["topic", "description", "opportunity_score"]
                }
            },
            "internal_link_opportunities": string_list
        },
        "required": [
            "title", "meta_description", "content_type", "search_intent",
            "target_audience", "total_word_count", "sections", "faqs",
            "content_gaps_addressed"
        ]
    })
}

/// Machine-readable format instructions embedded in the user prompt.
pub fn format_instructions() -> String {
    format!(
        "The output must be a single JSON object that conforms to the JSON schema below. \
         Return only the JSON object, without commentary.\n\nOutput schema:\n```\n{:#}\n```",
        brief_json_schema()
    )
}
