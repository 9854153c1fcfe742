//! Enhancement suggestion shape and the local fallback generator.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::analysis::report::has_quantified_metrics;
use crate::llm_client::lenient::{self, lenient_enum};
use crate::models::ResumeData;

/// Skills recruiters screen for regardless of field.
pub const MARKET_SKILLS: &[&str] = &[
    "Problem Solving",
    "Team Leadership",
    "Project Management",
    "Communication",
    "Critical Thinking",
];

/// Summaries shorter than this get an enhancement suggestion.
const MIN_SUMMARY_CHARS: usize = 100;

const GENERIC_SUMMARY: &str = "Results-driven professional with expertise in modern technologies and proven track record of delivering high-impact solutions. Experienced in leading cross-functional teams and driving organizational growth through innovative approaches.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhancementType {
    #[default]
    Comprehensive,
    Skills,
    Summary,
    Experience,
    Keywords,
}

impl EnhancementType {
    fn covers_summary(self) -> bool {
        matches!(self, EnhancementType::Comprehensive | EnhancementType::Summary)
    }

    fn covers_skills(self) -> bool {
        matches!(
            self,
            EnhancementType::Comprehensive | EnhancementType::Skills | EnhancementType::Keywords
        )
    }

    fn covers_experience(self) -> bool {
        matches!(
            self,
            EnhancementType::Comprehensive | EnhancementType::Experience
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Skill,
    Summary,
    Experience,
    Keyword,
    Format,
    Section,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

lenient_enum!(SuggestionType, fallback = SuggestionType::Format, {
    "skill" | "skills" => SuggestionType::Skill,
    "summary" => SuggestionType::Summary,
    "experience" => SuggestionType::Experience,
    "keyword" | "keywords" => SuggestionType::Keyword,
    "format" | "formatting" => SuggestionType::Format,
    "section" => SuggestionType::Section,
});

lenient_enum!(Priority, fallback = Priority::Medium, {
    "critical" => Priority::Critical,
    "high" => Priority::High,
    "medium" => Priority::Medium,
    "low" => Priority::Low,
});

/// A single change the client can apply to Resume Data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementSuggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(default, deserialize_with = "lenient::score")]
    pub confidence: u32,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    pub after: String,
    /// Where to apply the change: `{section, index?, field, value}`.
    #[serde(default)]
    pub applicable_data: Value,
}

/// Shape of the model's reply.
#[derive(Debug, Deserialize)]
pub struct SuggestionEnvelope {
    #[serde(default)]
    pub suggestions: Vec<EnhancementSuggestion>,
}

/// Deterministic suggestions used whenever the model call fails.
pub fn fallback_suggestions(
    resume: &ResumeData,
    kind: EnhancementType,
) -> Vec<EnhancementSuggestion> {
    let mut suggestions = Vec::new();

    if kind.covers_summary() {
        if let Some(s) = summary_suggestion(resume) {
            suggestions.push(s);
        }
    }
    if kind.covers_skills() {
        if let Some(s) = skills_suggestion(resume) {
            suggestions.push(s);
        }
    }
    if kind.covers_experience() {
        suggestions.extend(experience_suggestions(resume));
    }

    suggestions
}

fn summary_suggestion(resume: &ResumeData) -> Option<EnhancementSuggestion> {
    let current = resume.personal_info.summary_text();
    if current.chars().count() >= MIN_SUMMARY_CHARS {
        return None;
    }

    let after = draft_summary(resume);
    Some(EnhancementSuggestion {
        id: "summary_enhancement".to_string(),
        kind: SuggestionType::Summary,
        title: "Enhance Professional Summary".to_string(),
        description: "Create a compelling professional summary that highlights your key achievements and value proposition".to_string(),
        priority: Priority::High,
        confidence: 90,
        impact: "Increases recruiter engagement by 65%".to_string(),
        category: "Content".to_string(),
        before: (!current.is_empty()).then(|| current.to_string()),
        after: after.clone(),
        applicable_data: json!({
            "section": "personalInfo",
            "field": "summary",
            "value": after,
        }),
    })
}

/// Builds a summary from the latest role and top skills when available.
fn draft_summary(resume: &ResumeData) -> String {
    let role = resume
        .personal_info
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            resume
                .work_experience
                .first()
                .map(|w| w.position.trim())
                .filter(|p| !p.is_empty())
        });
    let top_skills: Vec<&str> = resume
        .skills
        .iter()
        .map(|s| s.name.trim())
        .filter(|s| !s.is_empty())
        .take(3)
        .collect();

    match role {
        Some(role) if !top_skills.is_empty() => format!(
            "Results-driven {role} with expertise in {} and a proven track record of delivering high-impact solutions. Experienced in collaborating with cross-functional teams and driving measurable improvements through innovative approaches.",
            top_skills.join(", ")
        ),
        _ => GENERIC_SUMMARY.to_string(),
    }
}

fn skills_suggestion(resume: &ResumeData) -> Option<EnhancementSuggestion> {
    let current: Vec<String> = resume
        .skills
        .iter()
        .map(|s| s.name.trim().to_lowercase())
        .collect();
    let missing: Vec<&str> = MARKET_SKILLS
        .iter()
        .copied()
        .filter(|skill| !current.contains(&skill.to_lowercase()))
        .collect();

    if missing.is_empty() {
        return None;
    }

    let value: Vec<Value> = missing
        .iter()
        .map(|name| json!({ "name": name, "level": "intermediate" }))
        .collect();

    Some(EnhancementSuggestion {
        id: "skills_enhancement".to_string(),
        kind: SuggestionType::Skill,
        title: "Add In-Demand Skills".to_string(),
        description: "Include highly sought-after skills that are trending in the current job market".to_string(),
        priority: Priority::High,
        confidence: 85,
        impact: "Improves ATS compatibility by 40%".to_string(),
        category: "Skills".to_string(),
        before: None,
        after: missing.join(", "),
        applicable_data: json!({
            "section": "skills",
            "field": "add",
            "value": value,
        }),
    })
}

fn experience_suggestions(resume: &ResumeData) -> Vec<EnhancementSuggestion> {
    resume
        .work_experience
        .iter()
        .enumerate()
        .filter(|(_, exp)| {
            !exp.description.trim().is_empty() && !has_quantified_metrics(&exp.description)
        })
        .map(|(index, exp)| {
            let before = exp.description.trim().to_string();
            let after = format!(
                "{before}\n• Quantify the outcome: state the result in numbers (e.g. \"reduced processing time by 30%\" or \"served 10,000+ users\")"
            );
            EnhancementSuggestion {
                id: format!("experience_metrics_{index}"),
                kind: SuggestionType::Experience,
                title: format!(
                    "Quantify Achievements at {}",
                    if exp.company.trim().is_empty() {
                        "this role"
                    } else {
                        exp.company.trim()
                    }
                ),
                description: "This description lists responsibilities without measurable results. Numbers make impact concrete for recruiters and ATS filters.".to_string(),
                priority: Priority::Medium,
                confidence: 80,
                impact: "Makes accomplishments verifiable and memorable".to_string(),
                category: "Experience".to_string(),
                before: Some(before),
                after: after.clone(),
                applicable_data: json!({
                    "section": "workExperience",
                    "index": index,
                    "field": "description",
                    "value": after,
                }),
            }
        })
        .collect()
}
