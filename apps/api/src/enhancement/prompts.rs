// Enhancement prompt templates.

use std::fmt::Write;

use crate::enhancement::suggestions::EnhancementType;
use crate::llm_client::prompts::{or_placeholder, JSON_ONLY_INSTRUCTION, NOT_PROVIDED};
use crate::models::ResumeData;

pub const ENHANCEMENT_PROMPT_TEMPLATE: &str = r#"You are an elite resume optimization expert with 15+ years of experience helping professionals land top-tier positions. Analyze this resume and provide SPECIFIC, ACTIONABLE improvements.

CURRENT RESUME:
{resume_text}

ANALYSIS REQUIREMENTS:
1. Provide specific, professional improvements that can be directly applied
2. Focus on current job market trends and ATS optimization
3. Suggest quantifiable achievements where possible
4. Enhance action words and impact statements
5. Ensure all suggestions are relevant to the candidate's actual experience

Return a JSON response with this exact structure:
{
  "suggestions": [
    {
      "id": "unique_id",
      "type": "skill" | "summary" | "experience" | "keyword" | "format" | "section",
      "title": "Clear improvement title",
      "description": "Detailed explanation of why this improvement matters",
      "priority": "critical" | "high" | "medium" | "low",
      "confidence": 85,
      "impact": "Specific impact statement",
      "category": "Skills" | "Content" | "Experience" | "Keywords" | "Formatting",
      "before": "Current text (if applicable)",
      "after": "Improved version",
      "applicableData": {
        "section": "which section to modify",
        "index": "index if array item",
        "field": "specific field to update",
        "value": "new value to apply"
      }
    }
  ]
}

FOCUS AREAS:
{focus}

Provide 6-10 high-impact suggestions that are immediately actionable.

{json_only}"#;

pub fn build_enhancement_prompt(resume: &ResumeData, kind: EnhancementType) -> String {
    ENHANCEMENT_PROMPT_TEMPLATE
        .replace("{resume_text}", &build_enhancement_digest(resume))
        .replace("{focus}", focus_areas(kind))
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}

fn focus_areas(kind: EnhancementType) -> &'static str {
    match kind {
        EnhancementType::Comprehensive => {
            "- Professional summary enhancement with stronger action words\n\
             - Experience descriptions with quantified achievements\n\
             - Skills optimization for current market demands\n\
             - ATS-friendly keyword integration\n\
             - Professional formatting improvements\n\
             - Missing critical sections"
        }
        EnhancementType::Skills => {
            "- Skills optimization for current market demands\n\
             - Grouping skills into clear categories\n\
             - Removing outdated or irrelevant skills"
        }
        EnhancementType::Summary => {
            "- Professional summary enhancement with stronger action words\n\
             - A clear value proposition in 2-3 sentences"
        }
        EnhancementType::Experience => {
            "- Experience descriptions with quantified achievements\n\
             - Strong action verbs at the start of every bullet\n\
             - Impact over responsibilities"
        }
        EnhancementType::Keywords => {
            "- ATS-friendly keyword integration\n\
             - Industry terminology that matches the candidate's field"
        }
    }
}

/// Plain-text rendering of the resume used as enhancement context.
pub fn build_enhancement_digest(resume: &ResumeData) -> String {
    let info = &resume.personal_info;
    let mut out = String::new();

    let _ = writeln!(out, "PERSONAL INFO:");
    let _ = writeln!(out, "Name: {}", or_placeholder(&info.full_name, NOT_PROVIDED));
    let _ = writeln!(
        out,
        "Title: {}",
        or_placeholder(info.title.as_deref().unwrap_or(""), NOT_PROVIDED)
    );
    let _ = writeln!(out, "Email: {}", or_placeholder(&info.email, NOT_PROVIDED));
    let _ = writeln!(out, "Phone: {}", or_placeholder(&info.phone, NOT_PROVIDED));
    let _ = writeln!(out, "Location: {}", or_placeholder(&info.location, NOT_PROVIDED));
    let _ = writeln!(out, "Summary: {}", or_placeholder(info.summary_text(), NOT_PROVIDED));

    let _ = writeln!(out, "\nWORK EXPERIENCE:");
    if resume.work_experience.is_empty() {
        let _ = writeln!(out, "No work experience provided");
    }
    for (index, exp) in resume.work_experience.iter().enumerate() {
        let end = if exp.is_current() {
            "Present"
        } else {
            or_placeholder(exp.end_date_text(), NOT_PROVIDED)
        };
        let _ = writeln!(
            out,
            "{}. {} at {}\n   Duration: {} - {}\n   Description: {}",
            index + 1,
            or_placeholder(&exp.position, NOT_PROVIDED),
            or_placeholder(&exp.company, NOT_PROVIDED),
            or_placeholder(&exp.start_date, NOT_PROVIDED),
            end,
            or_placeholder(&exp.description, NOT_PROVIDED)
        );
    }

    let _ = writeln!(out, "\nEDUCATION:");
    if resume.education.is_empty() {
        let _ = writeln!(out, "No education provided");
    }
    for (index, edu) in resume.education.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} in {}\n   School: {}\n   Graduation: {}\n   GPA: {}",
            index + 1,
            or_placeholder(&edu.degree, NOT_PROVIDED),
            or_placeholder(&edu.field, NOT_PROVIDED),
            or_placeholder(edu.school_name(), NOT_PROVIDED),
            or_placeholder(edu.graduation(), NOT_PROVIDED),
            or_placeholder(edu.gpa.as_deref().unwrap_or(""), NOT_PROVIDED)
        );
    }

    let _ = writeln!(out, "\nSKILLS:");
    if resume.skills.is_empty() {
        let _ = writeln!(out, "No skills provided");
    }
    for skill in &resume.skills {
        let _ = writeln!(out, "- {} ({})", skill.name, skill.level.as_str());
    }

    let _ = writeln!(out, "\nPROJECTS:");
    if resume.projects.is_empty() {
        let _ = writeln!(out, "No projects provided");
    }
    for (index, project) in resume.projects.iter().enumerate() {
        let technologies = project.technologies.join(", ");
        let _ = writeln!(
            out,
            "{}. {}\n   Description: {}\n   Technologies: {}\n   URL: {}",
            index + 1,
            or_placeholder(project.display_title(), NOT_PROVIDED),
            or_placeholder(&project.description, NOT_PROVIDED),
            or_placeholder(&technologies, NOT_PROVIDED),
            or_placeholder(project.display_url(), NOT_PROVIDED)
        );
    }

    let _ = writeln!(out, "\nCERTIFICATIONS:");
    if resume.certifications.is_empty() {
        let _ = writeln!(out, "No certifications provided");
    }
    for cert in &resume.certifications {
        let _ = writeln!(out, "- {} from {} ({})", cert.name, cert.issuer, cert.date);
    }

    let _ = writeln!(out, "\nLANGUAGES:");
    if resume.languages.is_empty() {
        let _ = writeln!(out, "No languages provided");
    }
    for lang in &resume.languages {
        let _ = writeln!(
            out,
            "- {}: {}",
            lang.display_name(),
            lang.proficiency.as_str()
        );
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, LanguageProficiency};

    #[test]
    fn test_prompt_focus_follows_enhancement_type() {
        let resume = ResumeData::default();
        let summary = build_enhancement_prompt(&resume, EnhancementType::Summary);
        assert!(summary.contains("value proposition in 2-3 sentences"));
        assert!(!summary.contains("ATS-friendly keyword integration"));

        let full = build_enhancement_prompt(&resume, EnhancementType::Comprehensive);
        assert!(full.contains("Missing critical sections"));
    }

    #[test]
    fn test_digest_lists_languages() {
        let resume = ResumeData {
            languages: vec![Language {
                language: Some("Spanish".into()),
                proficiency: LanguageProficiency::Fluent,
                ..Default::default()
            }],
            ..Default::default()
        };
        let digest = build_enhancement_digest(&resume);
        assert!(digest.contains("- Spanish: fluent"));
        assert!(digest.contains("No work experience provided"));
    }
}
