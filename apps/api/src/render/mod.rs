//! Server-side HTML rendering of Resume Data.
//!
//! Every template shares one document; the theme picks the palette, the
//! header style and whether skills, certifications and languages sit in a
//! sidebar. Views are flattened to plain strings before they reach askama so
//! the markup only has to test for emptiness.

pub mod handlers;

use askama::Template;
use serde::Serialize;

use crate::errors::AppError;
use crate::import::dates::normalize_date;
use crate::import::heuristic::ORIGINAL_CONTENT_TITLE;
use crate::models::{
    Certification, CustomSection, Education, Language, PersonalInfo, Project, ResumeData,
    ResumeTemplate, Skill, WorkExperience,
};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Entry of `GET /api/templates`.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub fn template_info(template: ResumeTemplate) -> TemplateInfo {
    let (name, description) = match template {
        ResumeTemplate::Modern => (
            "Modern",
            "Bold gradient header with a skills sidebar. Suits tech and startup roles.",
        ),
        ResumeTemplate::Classic => (
            "Classic",
            "Traditional single-column serif layout for conservative industries.",
        ),
        ResumeTemplate::Minimal => (
            "Minimal",
            "Clean typography and generous whitespace with no decoration.",
        ),
        ResumeTemplate::Creative => (
            "Creative",
            "Vivid palette with a leading sidebar for design and marketing roles.",
        ),
        ResumeTemplate::Executive => (
            "Executive",
            "Centred header and understated navy palette for senior leadership.",
        ),
        ResumeTemplate::Technical => (
            "Technical",
            "Monospace type and a skills-first sidebar for engineering roles.",
        ),
    };
    TemplateInfo {
        id: template.as_str(),
        name,
        description,
    }
}

pub fn template_catalog() -> Vec<TemplateInfo> {
    ResumeTemplate::ALL.into_iter().map(template_info).collect()
}

struct WorkView {
    position: String,
    company: String,
    location: String,
    dates: String,
    bullets: Vec<String>,
}

struct EducationView {
    degree: String,
    school: String,
    dates: String,
    gpa: String,
}

struct SkillView {
    name: String,
    level: &'static str,
}

struct ProjectView {
    title: String,
    description: String,
    technologies: Vec<String>,
    links: Vec<LinkView>,
}

struct LinkView {
    text: String,
    /// Only http(s) and mailto targets become anchors.
    linkable: bool,
}

fn is_linkable(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

struct CertificationView {
    name: String,
    issuer: String,
    date: String,
}

struct LanguageView {
    name: String,
    proficiency: &'static str,
}

struct CustomSectionView {
    title: String,
    paragraphs: Vec<String>,
}

#[derive(Template)]
#[template(path = "resume.html")]
struct ResumeView {
    theme: &'static str,
    sidebar: bool,
    sidebar_first: bool,
    show_skill_levels: bool,
    name: String,
    headline: String,
    contacts: Vec<String>,
    summary: String,
    work: Vec<WorkView>,
    education: Vec<EducationView>,
    skills: Vec<SkillView>,
    projects: Vec<ProjectView>,
    certifications: Vec<CertificationView>,
    languages: Vec<LanguageView>,
    custom_sections: Vec<CustomSectionView>,
}

/// Renders `data` with `template`, or with its own `selectedTemplate` when
/// no override is given.
pub fn render_resume(data: &ResumeData, template: Option<ResumeTemplate>) -> Result<String, AppError> {
    let template = template.unwrap_or(data.selected_template);
    Ok(build_view(data, template).render()?)
}

/// `<Full_Name>_<template>.pdf`, or `Resume_<template>.pdf` without a name.
pub fn export_file_name(data: &ResumeData, template: ResumeTemplate) -> String {
    let words: Vec<&str> = data.personal_info.full_name.split_whitespace().collect();
    let stem = if words.is_empty() {
        "Resume".to_string()
    } else {
        words.join("_")
    };
    format!("{stem}_{}.pdf", template.as_str())
}

/// "2020-01" → "Jan 2020"; years and unrecognised text pass through.
pub fn display_date(raw: &str) -> String {
    let normalized = normalize_date(raw);
    if let Some((year, month)) = normalized.split_once('-') {
        let month = month.split('-').next().and_then(|m| m.parse::<usize>().ok());
        if let Some(label) = month.and_then(|m| m.checked_sub(1)).and_then(|i| MONTHS.get(i)) {
            if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
                return format!("{label} {year}");
            }
        }
    }
    normalized
}

fn date_range(start: &str, end: &str) -> String {
    match (display_date(start), display_date(end)) {
        (s, e) if s.is_empty() => e,
        (s, e) if e.is_empty() => s,
        (s, e) => format!("{s} – {e}"),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn contacts(info: &PersonalInfo) -> Vec<String> {
    [
        Some(info.email.as_str()),
        Some(info.phone.as_str()),
        Some(info.location.as_str()),
        info.website.as_deref(),
        info.linkedin.as_deref(),
        info.github.as_deref(),
    ]
    .into_iter()
    .filter_map(non_empty)
    .collect()
}

fn work_view(job: &WorkExperience) -> WorkView {
    let end = if job.is_current() {
        "Present".to_string()
    } else {
        job.end_date_text().to_string()
    };
    WorkView {
        position: job.position.trim().to_string(),
        company: job.company.trim().to_string(),
        location: job.location.as_deref().unwrap_or("").trim().to_string(),
        dates: date_range(&job.start_date, &end),
        bullets: description_lines(&job.description),
    }
}

/// One bullet per line, with any leading bullet glyph dropped.
fn description_lines(description: &str) -> Vec<String> {
    description
        .lines()
        .map(|line| line.trim().trim_start_matches(['•', '-', '*', '·']).trim())
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn education_view(edu: &Education) -> EducationView {
    let degree = match (edu.degree.trim(), edu.field.trim()) {
        (degree, "") => degree.to_string(),
        ("", field) => field.to_string(),
        (degree, field) => format!("{degree} in {field}"),
    };
    let dates = if edu.start_date.trim().is_empty() {
        display_date(edu.graduation())
    } else if edu.current {
        date_range(&edu.start_date, "Present")
    } else {
        date_range(&edu.start_date, edu.graduation())
    };
    EducationView {
        degree,
        school: edu.school_name().trim().to_string(),
        dates,
        gpa: edu.gpa.as_deref().unwrap_or("").trim().to_string(),
    }
}

fn skill_view(skill: &Skill) -> SkillView {
    SkillView {
        name: skill.name.trim().to_string(),
        level: skill.level.as_str(),
    }
}

fn project_view(project: &Project) -> ProjectView {
    let links = [Some(project.display_url()), project.github.as_deref()]
        .into_iter()
        .filter_map(non_empty)
        .map(|text| LinkView {
            linkable: is_linkable(&text),
            text,
        })
        .collect();
    ProjectView {
        title: project.display_title().trim().to_string(),
        description: project.description.trim().to_string(),
        technologies: project
            .technologies
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
        links,
    }
}

fn certification_view(cert: &Certification) -> CertificationView {
    CertificationView {
        name: cert.name.trim().to_string(),
        issuer: cert.issuer.trim().to_string(),
        date: display_date(&cert.date),
    }
}

fn language_view(language: &Language) -> LanguageView {
    LanguageView {
        name: language.display_name().trim().to_string(),
        proficiency: language.proficiency.as_str(),
    }
}

fn custom_section_view(section: &CustomSection) -> CustomSectionView {
    CustomSectionView {
        title: section.title.trim().to_string(),
        paragraphs: section
            .content
            .split("\n\n")
            .map(|p| p.trim().replace('\n', " "))
            .filter(|p| !p.is_empty())
            .collect(),
    }
}

fn build_view(data: &ResumeData, template: ResumeTemplate) -> ResumeView {
    let info = &data.personal_info;
    let headline = non_empty(info.title.as_deref())
        .or_else(|| data.work_experience.first().and_then(|job| non_empty(Some(&job.position))))
        .unwrap_or_default();

    ResumeView {
        theme: template.as_str(),
        sidebar: matches!(
            template,
            ResumeTemplate::Modern | ResumeTemplate::Creative | ResumeTemplate::Technical
        ),
        sidebar_first: matches!(template, ResumeTemplate::Creative | ResumeTemplate::Technical),
        show_skill_levels: template == ResumeTemplate::Technical,
        name: non_empty(Some(&info.full_name)).unwrap_or_else(|| "Your Name".to_string()),
        headline,
        contacts: contacts(info),
        summary: info.summary_text().trim().to_string(),
        work: data
            .work_experience
            .iter()
            .filter(|job| !job.position.trim().is_empty() || !job.company.trim().is_empty())
            .map(work_view)
            .collect(),
        education: data
            .education
            .iter()
            .filter(|edu| !edu.degree.trim().is_empty() || !edu.school_name().trim().is_empty())
            .map(education_view)
            .collect(),
        skills: data
            .skills
            .iter()
            .filter(|s| !s.name.trim().is_empty())
            .map(skill_view)
            .collect(),
        projects: data
            .projects
            .iter()
            .filter(|p| !p.display_title().trim().is_empty())
            .map(project_view)
            .collect(),
        certifications: data
            .certifications
            .iter()
            .filter(|c| !c.name.trim().is_empty())
            .map(certification_view)
            .collect(),
        languages: data
            .languages
            .iter()
            .filter(|l| !l.display_name().trim().is_empty())
            .map(language_view)
            .collect(),
        custom_sections: data
            .custom_sections
            .iter()
            .filter(|s| !s.content.trim().is_empty() && s.title.trim() != ORIGINAL_CONTENT_TITLE)
            .map(custom_section_view)
            .collect(),
    }
}
