// Resume analysis prompt templates.

use std::fmt::Write;

use crate::llm_client::prompts::{or_placeholder, JSON_ONLY_INSTRUCTION, NOT_PROVIDED};
use crate::models::ResumeData;

pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this resume and provide personalized feedback. Be specific and actionable based on the actual content provided.

Resume Content:
{resume_text}

Return a JSON response with the following structure:
{
  "score": number (0-100),
  "issues": [
    {
      "id": "unique-id",
      "type": "error" | "warning" | "info",
      "title": "Issue Title",
      "description": "Specific description based on the resume content",
      "severity": "critical" | "high" | "medium" | "low",
      "suggestion": "Specific actionable suggestion"
    }
  ],
  "strengths": ["Specific strengths found in this resume"],
  "suggestions": [
    {
      "id": "unique-id",
      "title": "Suggestion Title",
      "description": "Specific suggestion based on resume analysis",
      "impact": "high" | "medium" | "low",
      "category": "Content" | "Structure" | "Keywords" | "Experience" | "Skills"
    }
  ],
  "atsCompatibility": number (0-100),
  "readabilityScore": number (0-100),
  "completenessScore": number (0-100)
}

Analysis Guidelines:
1. Check if a professional summary exists and is compelling (2-3 sentences that highlight the key value proposition)
2. Look for quantified achievements (numbers, percentages, metrics) in work experience
3. Assess if skills are relevant and properly categorized
4. Check for appropriate work experience descriptions
5. Evaluate education section completeness
6. Look for gaps or missing sections
7. Assess overall structure and formatting
8. Check for industry-specific keywords
9. Evaluate length and conciseness
10. Look for consistency in formatting and dates

Be specific about what is actually missing or weak in THIS resume, not generic advice. If the resume already has good quantified achievements, don't suggest adding them. If it has a good summary, praise it instead of suggesting to add one.

{json_only}"#;

pub fn build_analysis_prompt(resume: &ResumeData) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{resume_text}", &build_analysis_digest(resume))
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}

/// Plain-text rendering of the resume used as analysis context.
pub fn build_analysis_digest(resume: &ResumeData) -> String {
    let info = &resume.personal_info;
    let mut out = String::new();

    let _ = writeln!(out, "PERSONAL INFORMATION:");
    let _ = writeln!(out, "Name: {}", or_placeholder(&info.full_name, NOT_PROVIDED));
    let _ = writeln!(out, "Email: {}", or_placeholder(&info.email, NOT_PROVIDED));
    let _ = writeln!(out, "Phone: {}", or_placeholder(&info.phone, NOT_PROVIDED));
    let _ = writeln!(out, "Location: {}", or_placeholder(&info.location, NOT_PROVIDED));
    let _ = writeln!(
        out,
        "LinkedIn: {}",
        or_placeholder(info.linkedin.as_deref().unwrap_or(""), NOT_PROVIDED)
    );
    let _ = writeln!(
        out,
        "Website: {}",
        or_placeholder(info.website.as_deref().unwrap_or(""), NOT_PROVIDED)
    );

    let _ = writeln!(out, "\nPROFESSIONAL SUMMARY:");
    let _ = writeln!(
        out,
        "{}",
        or_placeholder(info.summary_text(), "No professional summary provided")
    );

    let _ = writeln!(out, "\nWORK EXPERIENCE:");
    for (index, exp) in resume.work_experience.iter().enumerate() {
        let end = if exp.end_date_text().is_empty() && exp.is_current() {
            "Present"
        } else {
            or_placeholder(exp.end_date_text(), "No end date")
        };
        let _ = writeln!(
            out,
            "\n{}. {} at {}",
            index + 1,
            or_placeholder(&exp.position, "No position"),
            or_placeholder(&exp.company, "No company")
        );
        let _ = writeln!(
            out,
            "   Duration: {} - {}",
            or_placeholder(&exp.start_date, "No start date"),
            end
        );
        let _ = writeln!(
            out,
            "   Description: {}",
            or_placeholder(&exp.description, "No description provided")
        );
    }

    let _ = writeln!(out, "\nEDUCATION:");
    for (index, edu) in resume.education.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n{}. {} in {}",
            index + 1,
            or_placeholder(&edu.degree, "No degree"),
            or_placeholder(&edu.field, "No field")
        );
        let _ = writeln!(
            out,
            "   Institution: {}",
            or_placeholder(edu.school_name(), "No institution")
        );
        let _ = writeln!(
            out,
            "   Graduation: {}",
            or_placeholder(edu.graduation(), "No graduation date")
        );
    }

    let _ = writeln!(out, "\nSKILLS:");
    for (index, skill) in resume.skills.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({}) - {}",
            index + 1,
            skill.name,
            skill.level.as_str(),
            or_placeholder(&skill.category, "No category")
        );
    }

    if !resume.projects.is_empty() {
        let _ = writeln!(out, "\nPROJECTS:");
        for (index, project) in resume.projects.iter().enumerate() {
            let technologies = if project.technologies.is_empty() {
                "None listed".to_string()
            } else {
                project.technologies.join(", ")
            };
            let _ = writeln!(
                out,
                "\n{}. {}",
                index + 1,
                or_placeholder(project.display_title(), "No title")
            );
            let _ = writeln!(
                out,
                "   Description: {}",
                or_placeholder(&project.description, "No description")
            );
            let _ = writeln!(out, "   Technologies: {technologies}");
        }
    }

    if !resume.certifications.is_empty() {
        let _ = writeln!(out, "\nCERTIFICATIONS:");
        for (index, cert) in resume.certifications.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} from {} ({})",
                index + 1,
                cert.name,
                cert.issuer,
                cert.date
            );
        }
    }

    out
}
