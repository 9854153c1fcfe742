//! Analysis report shape and the local heuristic used when the model is unavailable.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::llm_client::lenient::{self, lenient_enum};
use crate::models::ResumeData;

/// Numbers, percentages, money, multipliers and outcome verbs.
static METRICS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\d+%|\d+\+|\$\d+|increased|decreased|improved|reduced|\d+x|saved|generated|managed \$|budget of|\d+ years|\d+ people|\d+ team",
    )
    .expect("metrics regex is valid")
});

/// Summaries shorter than this are treated as missing.
const MIN_SUMMARY_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

lenient_enum!(IssueKind, fallback = IssueKind::Info, {
    "error" => IssueKind::Error,
    "warning" => IssueKind::Warning,
    "info" => IssueKind::Info,
});

lenient_enum!(Severity, fallback = Severity::Medium, {
    "critical" => Severity::Critical,
    "high" => Severity::High,
    "medium" => Severity::Medium,
    "low" => Severity::Low,
});

lenient_enum!(Impact, fallback = Impact::Medium, {
    "high" => Impact::High,
    "medium" => Impact::Medium,
    "low" => Impact::Low,
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub category: String,
}

/// Full analysis returned to callers, whether produced by the model or locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(deserialize_with = "lenient::score")]
    pub score: u32,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(deserialize_with = "lenient::score")]
    pub ats_compatibility: u32,
    #[serde(deserialize_with = "lenient::score")]
    pub readability_score: u32,
    #[serde(deserialize_with = "lenient::score")]
    pub completeness_score: u32,
}

/// True when `text` carries any quantified achievement.
pub fn has_quantified_metrics(text: &str) -> bool {
    METRICS_RE.is_match(text)
}

/// Deterministic analysis used whenever the model call fails.
///
/// Starts from 80 and deducts for a weak summary (−20) and for work history
/// without any quantified achievement (−15).
pub fn fallback_analysis(resume: &ResumeData) -> AnalysisReport {
    let mut issues = Vec::new();
    let mut strengths = Vec::new();
    let mut suggestions = Vec::new();
    let mut score: i32 = 80;

    if resume.personal_info.summary_text().chars().count() < MIN_SUMMARY_CHARS {
        issues.push(Issue {
            id: "weak-summary".to_string(),
            kind: IssueKind::Warning,
            title: "Missing or Weak Professional Summary".to_string(),
            description: "Your resume lacks a compelling professional summary. Add a 2-3 sentence summary that highlights your key value proposition.".to_string(),
            severity: Severity::Critical,
            suggestion: "Write a professional summary that includes your years of experience, key skills, and what value you bring to employers.".to_string(),
        });
        score -= 20;
    } else {
        strengths.push("Strong professional summary provided".to_string());
    }

    let has_metrics = resume
        .work_experience
        .iter()
        .any(|exp| has_quantified_metrics(&exp.description));

    if !has_metrics && !resume.work_experience.is_empty() {
        issues.push(Issue {
            id: "no-metrics".to_string(),
            kind: IssueKind::Warning,
            title: "Missing Quantified Achievements".to_string(),
            description: "Your work experience descriptions lack specific numbers and metrics that demonstrate your impact.".to_string(),
            severity: Severity::High,
            suggestion: "Add specific numbers, percentages, dollar amounts, or other metrics to show the results of your work.".to_string(),
        });
        score -= 15;
    } else if has_metrics {
        strengths.push("Includes quantified achievements".to_string());
    }

    let info = &resume.personal_info;
    if info.email.trim().is_empty() || info.phone.trim().is_empty() {
        issues.push(Issue {
            id: "incomplete-contact".to_string(),
            kind: IssueKind::Info,
            title: "Incomplete Contact Details".to_string(),
            description: "Recruiters need at least an email address and a phone number to reach you.".to_string(),
            severity: Severity::Medium,
            suggestion: "Add both an email address and a phone number to the header.".to_string(),
        });
    }

    if resume.skills.is_empty() {
        suggestions.push(Suggestion {
            id: "add-skills".to_string(),
            title: "Add a Skills Section".to_string(),
            description: "List the tools, languages, and competencies you use so applicant tracking systems can match your resume.".to_string(),
            impact: Impact::High,
            category: "Skills".to_string(),
        });
    }

    AnalysisReport {
        score: score.max(0) as u32,
        issues,
        strengths,
        suggestions,
        ats_compatibility: 75,
        readability_score: 80,
        completeness_score: if resume.work_experience.is_empty() {
            60
        } else {
            85
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonalInfo, Skill, WorkExperience};

    fn job(description: &str) -> WorkExperience {
        WorkExperience {
            company: "Acme".into(),
            position: "Engineer".into(),
            description: description.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_metrics_detection() {
        assert!(has_quantified_metrics("Cut latency by 40%"));
        assert!(has_quantified_metrics("Managed $2M budget"));
        assert!(has_quantified_metrics("Led a 6 people squad"));
        assert!(has_quantified_metrics("Improved onboarding"));
        assert!(!has_quantified_metrics("Wrote code and attended meetings"));
    }

    #[test]
    fn test_empty_resume_scores_sixty() {
        let report = fallback_analysis(&ResumeData::default());
        assert_eq!(report.score, 60);
        assert_eq!(report.completeness_score, 60);
        assert!(report.issues.iter().any(|i| i.id == "weak-summary"));
        assert!(!report.issues.iter().any(|i| i.id == "no-metrics"));
    }

    #[test]
    fn test_work_without_metrics_is_penalised() {
        let resume = ResumeData {
            work_experience: vec![job("Wrote code and attended meetings")],
            ..Default::default()
        };
        let report = fallback_analysis(&resume);
        assert_eq!(report.score, 45);
        assert_eq!(report.completeness_score, 85);
        let issue = report.issues.iter().find(|i| i.id == "no-metrics").unwrap();
        assert_eq!(issue.severity, Severity::High);
    }

    #[test]
    fn test_strong_resume_keeps_full_score() {
        let resume = ResumeData {
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                phone: "555-123-4567".into(),
                summary: Some(
                    "Engineer with eight years of experience building reliable data platforms for finance."
                        .into(),
                ),
                ..Default::default()
            },
            work_experience: vec![job("Reduced infrastructure cost by 30%")],
            skills: vec![Skill {
                name: "Rust".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let report = fallback_analysis(&resume);
        assert_eq!(report.score, 80);
        assert!(report.issues.is_empty());
        assert!(report.suggestions.is_empty());
        assert_eq!(report.strengths.len(), 2);
    }

    #[test]
    fn test_report_serializes_camel_case_and_type_tag() {
        let report = fallback_analysis(&ResumeData::default());
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("atsCompatibility").is_some());
        assert_eq!(value["issues"][0]["type"], "warning");
        assert_eq!(value["issues"][0]["severity"], "critical");
    }

    #[test]
    fn test_model_report_deserializes() {
        let json = r#"{
            "score": 72,
            "issues": [{"id": "a", "type": "error", "title": "t", "description": "d",
                        "severity": "low", "suggestion": "s"}],
            "strengths": ["Clear layout"],
            "suggestions": [{"id": "b", "title": "t", "description": "d",
                             "impact": "medium", "category": "Keywords"}],
            "atsCompatibility": 70, "readabilityScore": 81, "completenessScore": 90
        }"#;
        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.score, 72);
        assert_eq!(report.issues[0].kind, IssueKind::Error);
        assert_eq!(report.suggestions[0].impact, Impact::Medium);
    }
}
