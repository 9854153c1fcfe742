// Job-match prompt templates.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::job_match::experience::{describe_duration, total_experience_years};
use crate::llm_client::prompts::{or_placeholder, JSON_ONLY_INSTRUCTION, NOT_PROVIDED};
use crate::models::ResumeData;

const UNKNOWN: &str = "Unknown";

pub const JOB_MATCH_PROMPT_TEMPLATE: &str = r#"You are a BRUTAL, no-nonsense hiring manager and technical recruiter with 20+ years of experience. Your job is to give harsh, honest feedback about job compatibility. Don't sugarcoat anything.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Analyze this resume against the job description and provide HARSH, HONEST feedback. Be brutally honest about their chances. If they're not qualified, say it directly. If they're missing critical skills, call it out harshly.

Return a JSON response with this EXACT structure:
{
  "compatibilityScore": number (0-100, be harsh - average should be 30-50),
  "verdict": "REJECT" | "MAYBE" | "INTERVIEW" | "STRONG_MATCH",
  "harshFeedback": "Brutal, honest assessment in 2-3 sentences",
  "criticalGaps": [
    {
      "category": "SKILLS" | "EXPERIENCE" | "EDUCATION" | "CERTIFICATIONS",
      "gap": "Specific missing requirement",
      "severity": "DEALBREAKER" | "CRITICAL" | "MAJOR" | "MINOR",
      "harshComment": "Brutal comment about this gap"
    }
  ],
  "strengths": [
    {
      "point": "What they actually have going for them",
      "relevance": "HIGH" | "MEDIUM" | "LOW"
    }
  ],
  "redFlags": ["List of concerning things about this candidate"],
  "improvements": [
    {
      "action": "What they need to do",
      "timeframe": "How long it would take",
      "difficulty": "EASY" | "HARD" | "NEARLY_IMPOSSIBLE",
      "honestAssessment": "Brutal truth about whether they can actually do this"
    }
  ],
  "competitionAnalysis": {
    "candidateLevel": "BEGINNER" | "JUNIOR" | "MID" | "SENIOR" | "EXPERT",
    "jobLevel": "BEGINNER" | "JUNIOR" | "MID" | "SENIOR" | "EXPERT",
    "realityCheck": "Honest assessment of how they stack up against typical applicants"
  },
  "salaryReality": {
    "theirWorth": "What they're actually worth based on their resume",
    "jobExpectation": "What the job probably pays",
    "gap": "The brutal truth about salary expectations"
  }
}

SCORING GUIDELINES (be harsh):
- 0-20: Completely unqualified
- 21-40: Major gaps, unlikely to succeed even with training
- 41-60: Some potential but significant concerns
- 61-80: Decent candidate with some reservations
- 81-100: Strong match (rare, only for truly excellent fits)

{json_only}"#;

pub fn build_job_match_prompt(
    resume: &ResumeData,
    job_description: &str,
    today: NaiveDate,
) -> String {
    JOB_MATCH_PROMPT_TEMPLATE
        .replace("{resume_text}", &build_job_match_digest(resume, today))
        .replace("{job_description}", job_description.trim())
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}

/// Candidate profile with durations and red-flag markers for blank fields.
pub fn build_job_match_digest(resume: &ResumeData, today: NaiveDate) -> String {
    let info = &resume.personal_info;
    let mut out = String::new();

    let _ = writeln!(out, "CANDIDATE PROFILE:");
    let _ = writeln!(out, "Name: {}", or_placeholder(&info.full_name, UNKNOWN));
    let _ = writeln!(out, "Email: {}", or_placeholder(&info.email, NOT_PROVIDED));
    let _ = writeln!(out, "Location: {}", or_placeholder(&info.location, UNKNOWN));

    let _ = writeln!(out, "\nPROFESSIONAL SUMMARY:");
    let _ = writeln!(
        out,
        "{}",
        or_placeholder(info.summary_text(), "No professional summary - RED FLAG")
    );

    let _ = writeln!(
        out,
        "\nWORK EXPERIENCE ({} positions):",
        resume.work_experience.len()
    );
    for (index, exp) in resume.work_experience.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} at {}\n   Duration: {}\n   Description: {}",
            index + 1,
            or_placeholder(&exp.position, "Unknown Position"),
            or_placeholder(&exp.company, "Unknown Company"),
            describe_duration(exp, today),
            or_placeholder(&exp.description, "No description provided - RED FLAG")
        );
    }

    let _ = writeln!(out, "\nEDUCATION ({} entries):", resume.education.len());
    for (index, edu) in resume.education.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} in {}\n   Institution: {}\n   Graduated: {}",
            index + 1,
            or_placeholder(&edu.degree, UNKNOWN),
            or_placeholder(&edu.field, UNKNOWN),
            or_placeholder(edu.school_name(), UNKNOWN),
            or_placeholder(edu.graduation(), UNKNOWN)
        );
    }

    let _ = writeln!(out, "\nTECHNICAL SKILLS ({} listed):", resume.skills.len());
    for (index, skill) in resume.skills.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({}) - {}",
            index + 1,
            skill.name,
            skill.level.as_str(),
            or_placeholder(&skill.category, "Uncategorized")
        );
    }

    if resume.projects.is_empty() {
        let _ = writeln!(out, "\nPROJECTS: None listed - MAJOR RED FLAG for technical roles");
    } else {
        let _ = writeln!(out, "\nPROJECTS ({} listed):", resume.projects.len());
        for (index, project) in resume.projects.iter().enumerate() {
            let technologies = project.technologies.join(", ");
            let _ = writeln!(
                out,
                "{}. {}\n   Description: {}\n   Technologies: {}",
                index + 1,
                or_placeholder(project.display_title(), "Unnamed Project"),
                or_placeholder(&project.description, "No description"),
                or_placeholder(&technologies, "None listed")
            );
        }
    }

    if resume.certifications.is_empty() {
        let _ = writeln!(out, "\nCERTIFICATIONS: None listed");
    } else {
        let _ = writeln!(
            out,
            "\nCERTIFICATIONS ({} listed):",
            resume.certifications.len()
        );
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

    let _ = write!(
        out,
        "\nTOTAL PROFESSIONAL EXPERIENCE: ~{} years",
        total_experience_years(&resume.work_experience, today)
    );

    out
}
