//! Model-backed structuring of raw resume text.
//!
//! The reply is read as loose JSON and sanitised field by field: lengths are
//! clamped, entries missing their key fields are dropped and lists are capped.
//! Any failure yields `None` so the caller keeps the heuristic result.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{info, warn};

use crate::import::dates::normalize_date;
use crate::import::extract::clean_extracted_text_flat;
use crate::import::prompts::build_structure_prompt;
use crate::import::truncate_chars;
use crate::llm_client::{generate_json, TextGenerator};
use crate::models::{
    new_id, Certification, Education, PersonalInfo, Project, ResumeData, Skill, SkillLevel,
    WorkExperience,
};

/// Text sent to the model by `POST /api/parse-pdf`.
pub const PARSE_PDF_TEXT_LIMIT: usize = 8_000;
/// Text sent to the model by the import routes.
pub const IMPORT_TEXT_LIMIT: usize = 20_000;

/// Shorter input is not worth a model call.
const MIN_INPUT_CHARS: usize = 20;

const MAX_NAME_CHARS: usize = 100;
const MAX_FIELD_CHARS: usize = 100;
const MAX_SUMMARY_CHARS: usize = 1000;
const MAX_SKILLS: usize = 30;
const MAX_SKILL_NAME_CHARS: usize = 50;
const MAX_WORK: usize = 8;
const MAX_WORK_DESCRIPTION_CHARS: usize = 2000;
const MAX_EDUCATION: usize = 5;
const MAX_CERTIFICATIONS: usize = 8;
const MAX_CERT_DESCRIPTION_CHARS: usize = 500;
const MAX_PROJECTS: usize = 6;
const MAX_PROJECT_DESCRIPTION_CHARS: usize = 1000;

/// Asks the model to structure `text` (cut to `max_chars`) into Resume Data.
pub async fn structure_with_ai(
    llm: &dyn TextGenerator,
    text: &str,
    max_chars: usize,
) -> Option<ResumeData> {
    let cleaned = clean_extracted_text_flat(text);
    if cleaned.chars().count() < MIN_INPUT_CHARS {
        warn!("Skipping AI structuring: only {} chars of text", cleaned.chars().count());
        return None;
    }

    let prompt = build_structure_prompt(&truncate_chars(&cleaned, max_chars));
    match generate_json::<Value>(llm, &prompt).await {
        Ok(value) if value.is_object() => {
            let resume = sanitize_structured(&value);
            info!(
                "AI structured resume: {} jobs, {} education, {} skills, {} certifications, {} projects",
                resume.work_experience.len(),
                resume.education.len(),
                resume.skills.len(),
                resume.certifications.len(),
                resume.projects.len()
            );
            Some(resume)
        }
        Ok(_) => {
            warn!("AI structuring returned a non-object reply");
            None
        }
        Err(e) => {
            warn!("AI structuring failed: {e}");
            None
        }
    }
}

/// Trimmed string value; numbers are rendered, anything else is empty.
fn text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn first_text(value: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| text(value, key))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

fn optional(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

fn array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

fn clean_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || "-()+ ".contains(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Turns the model's loose JSON into Resume Data.
pub fn sanitize_structured(value: &Value) -> ResumeData {
    ResumeData {
        personal_info: value
            .get("personalInfo")
            .filter(|v| v.is_object())
            .map(sanitize_personal_info)
            .unwrap_or_default(),
        work_experience: array(value, "workExperience")
            .iter()
            .filter_map(sanitize_work)
            .take(MAX_WORK)
            .collect(),
        education: array(value, "education")
            .iter()
            .filter_map(sanitize_education)
            .take(MAX_EDUCATION)
            .collect(),
        skills: sanitize_skills(array(value, "skills")),
        certifications: array(value, "certifications")
            .iter()
            .filter_map(sanitize_certification)
            .take(MAX_CERTIFICATIONS)
            .collect(),
        projects: array(value, "projects")
            .iter()
            .filter_map(sanitize_project)
            .take(MAX_PROJECTS)
            .collect(),
        ..Default::default()
    }
}

fn sanitize_personal_info(info: &Value) -> PersonalInfo {
    PersonalInfo {
        full_name: truncate_chars(&text(info, "fullName"), MAX_NAME_CHARS),
        email: text(info, "email").to_lowercase(),
        phone: clean_phone(&text(info, "phone")),
        location: truncate_chars(&text(info, "location"), MAX_FIELD_CHARS),
        linkedin: optional(text(info, "linkedin")),
        github: optional(text(info, "github")),
        website: optional(text(info, "website")),
        summary: optional(truncate_chars(&text(info, "summary"), MAX_SUMMARY_CHARS)),
        title: optional(truncate_chars(&text(info, "title"), MAX_FIELD_CHARS)),
    }
}

/// Strings or `{name}` objects; blank entries and repeats are dropped.
fn sanitize_skills(items: &[Value]) -> Vec<Skill> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Object(_) => Some(text(item, "name")),
            _ => None,
        })
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .take(MAX_SKILLS)
        .map(|name| Skill {
            id: new_id("skill"),
            name: truncate_chars(&name, MAX_SKILL_NAME_CHARS),
            level: SkillLevel::Intermediate,
            category: "Technical".to_string(),
        })
        .collect()
}

fn sanitize_work(item: &Value) -> Option<WorkExperience> {
    let company = truncate_chars(&text(item, "company"), MAX_FIELD_CHARS);
    let position = truncate_chars(&first_text(item, &["position", "title"]), MAX_FIELD_CHARS);
    if company.is_empty() || position.is_empty() {
        return None;
    }

    let end_raw = text(item, "endDate");
    let ends_now = matches!(end_raw.to_lowercase().as_str(), "present" | "current");
    let current = ends_now
        || item.get("isCurrentJob").and_then(Value::as_bool).unwrap_or(false)
        || item.get("current").and_then(Value::as_bool).unwrap_or(false);
    let end_date = if current || end_raw.is_empty() {
        None
    } else {
        Some(normalize_date(&end_raw))
    };

    Some(WorkExperience {
        id: new_id("work"),
        company,
        position,
        location: optional(text(item, "location")),
        start_date: normalize_date(&text(item, "startDate")),
        end_date,
        current,
        is_current_job: Some(current),
        description: truncate_chars(&text(item, "description"), MAX_WORK_DESCRIPTION_CHARS),
    })
}

fn sanitize_education(item: &Value) -> Option<Education> {
    let school = truncate_chars(&first_text(item, &["school", "institution"]), MAX_FIELD_CHARS);
    let degree = truncate_chars(&text(item, "degree"), MAX_FIELD_CHARS);
    if school.is_empty() && degree.is_empty() {
        return None;
    }
    let graduation = first_text(item, &["graduationDate", "endDate"]);

    Some(Education {
        id: new_id("edu"),
        institution: school,
        degree,
        field: truncate_chars(&text(item, "field"), MAX_FIELD_CHARS),
        graduation_date: optional(normalize_date(&graduation)),
        gpa: optional(text(item, "gpa")),
        ..Default::default()
    })
}

fn sanitize_certification(item: &Value) -> Option<Certification> {
    let name = truncate_chars(&text(item, "name"), MAX_FIELD_CHARS);
    if name.is_empty() {
        return None;
    }
    Some(Certification {
        id: new_id("cert"),
        name,
        issuer: truncate_chars(&text(item, "issuer"), MAX_FIELD_CHARS),
        date: normalize_date(&first_text(item, &["dateObtained", "date"])),
        description: optional(truncate_chars(
            &text(item, "description"),
            MAX_CERT_DESCRIPTION_CHARS,
        )),
        ..Default::default()
    })
}

fn sanitize_project(item: &Value) -> Option<Project> {
    let name = truncate_chars(&first_text(item, &["name", "title"]), MAX_FIELD_CHARS);
    if name.is_empty() {
        return None;
    }
    let technologies = match item.get("technologies") {
        Some(Value::Array(list)) => list
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    };

    Some(Project {
        id: new_id("proj"),
        title: name,
        description: truncate_chars(&text(item, "description"), MAX_PROJECT_DESCRIPTION_CHARS),
        technologies,
        url: optional(first_text(item, &["url", "link"])),
        ..Default::default()
    })
}
