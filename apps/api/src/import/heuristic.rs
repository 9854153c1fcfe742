//! Regex-driven resume parsing. Always runs during import: it is the base
//! layer that model output is merged onto, and the whole result when the
//! model is unavailable.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::import::dates::normalize_date;
use crate::import::truncate_chars;
use crate::models::catalog::technical_terms_in;
use crate::models::{
    new_id, CustomSection, Education, PersonalInfo, ResumeData, Skill, SkillLevel, WorkExperience,
};

const NAME_SCAN_LINES: usize = 5;
const LOCATION_SCAN_LINES: usize = 8;
const MAX_SKILLS: usize = 15;
const MAX_JOBS: usize = 10;
const MAX_JOB_LINE_CHARS: usize = 120;
const MAX_JOB_DESCRIPTION_CHARS: usize = 500;
const MAX_EDUCATION: usize = 3;
const MAX_SUMMARY_CHARS: usize = 500;
const MAX_PARAGRAPH_SUMMARY_CHARS: usize = 300;
const ORIGINAL_CONTENT_CHARS: usize = 2000;
/// A bare "Present" only counts as dates on a line this short.
const MAX_LONE_MARKER_LINE_CHARS: usize = 25;

pub const ORIGINAL_CONTENT_TITLE: &str = "Original Resume Content";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email regex is valid")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?1?[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})")
        .expect("phone regex is valid")
});

static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(https?://)?(www\.)?linkedin\.com/in/\S+").expect("linkedin regex is valid")
});

static GITHUB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(https?://)?(www\.)?github\.com/\S+").expect("github regex is valid")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("url regex is valid"));

static NAME_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+$").expect("name regex is valid"));

/// City, ST ZIP / City, ST / City, Country, tried in that order.
static LOCATION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b[A-Z][A-Za-z .]*[A-Za-z],\s*[A-Z]{2}\s*\d{5}\b",
        r"\b[A-Z][A-Za-z .]*[A-Za-z],\s*[A-Z]{2}\b",
        r"\b[A-Z][A-Za-z .]*[A-Za-z],\s*[A-Z][a-z]+(?: [A-Z][a-z]+)*\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("location regex is valid"))
    .collect()
});

/// "X at Y", "X - Y", "X, Y", "X | Y", each with an optional "| location".
static JOB_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(.+?)\s+(?:at|@)\s+(.+?)(?:\s*[|•]\s*(.+?))?$",
        r"^(.+?)(?:\s+-\s+|\s*[–—]\s*)(.+?)(?:\s*[|•]\s*(.+?))?$",
        r"^(.+?),\s*(.+?)(?:\s*[|•]\s*(.+?))?$",
        r"^(.+?)\s*\|\s*(.+?)(?:\s*[|•]\s*(.+?))?$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("job regex is valid"))
    .collect()
});

/// Month-year, mm/yyyy and yyyy ranges.
static DATE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?P<start>\b[a-z]+\.?\s+\d{4})\s*(?:[-–—]|\bto\b)\s*(?P<end>[a-z]+\.?\s+\d{4}|present\b|current\b)",
        r"(?i)(?P<start>\b\d{1,2}/\d{4})\s*(?:[-–—]|\bto\b)\s*(?P<end>\d{1,2}/\d{4}|present\b|current\b)",
        r"(?i)(?P<start>\b\d{4})\s*(?:[-–—]|\bto\b)\s*(?P<end>\d{4}\b|present\b|current\b)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("date regex is valid"))
    .collect()
});

/// "Present" or "Since 2021 - Current" on a line of its own.
static LONE_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?P<end>present|current)\b").expect("present marker regex is valid")
});

static SEPARATOR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\s*[|•])+\s*").expect("separator regex is valid"));

static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•\-\*]\s").expect("bullet regex is valid"));

static BULLET_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•\-\*·]\s*").expect("bullet prefix regex is valid"));

static DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:bachelor|master|phd|ph\.d|doctorate|associate|certificate|diploma|mba)")
        .expect("degree regex is valid")
});

static SCHOOL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:university|college|institute|school)\b").expect("school regex is valid")
});

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year regex is valid"));

static EDU_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-–—|,]").expect("education split regex is valid"));

static SKILL_PHRASE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:proficient\s+(?:in|with)|experienced\s+(?:in|with)|knowledge\s+of)[:\s]*([^\n]*)")
        .expect("skill phrase regex is valid")
});

static SKILL_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,•·|;\n]").expect("skill split regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Other,
}

/// Heading lines, optionally followed by ": inline content".
static HEADING_RES: Lazy<Vec<(Section, Regex)>> = Lazy::new(|| {
    [
        (
            Section::Summary,
            r"(?:professional\s+|career\s+)?(?:summary|objective|profile)|about(?:\s+me)?",
        ),
        (
            Section::Experience,
            r"(?:(?:work|professional|relevant)\s+)*experience|employment(?:\s+(?:history|background))?|career\s+history|work\s+history",
        ),
        (
            Section::Education,
            r"education|academic\s+(?:background|qualifications)|qualifications",
        ),
        (
            Section::Skills,
            r"(?:technical\s+|core\s+|key\s+)?skills?|core\s+competencies|technical\s+expertise|expertise|proficiencies|technologies|programming\s+languages|tools|frameworks",
        ),
        (
            Section::Projects,
            r"(?:personal\s+|key\s+|selected\s+)?projects?|portfolio",
        ),
        (
            Section::Certifications,
            r"certifications?|licenses?(?:\s*(?:&|and)\s*certifications?)?|credentials|professional\s+development",
        ),
        (
            Section::Other,
            r"languages|references|awards|honou?rs|interests|publications|volunteering|volunteer\s+experience|activities",
        ),
    ]
    .into_iter()
    .map(|(section, names)| {
        let pattern = format!(r"(?i)^#*\s*(?:{names})\s*(?::\s*(.*))?$");
        (section, Regex::new(&pattern).expect("heading regex is valid"))
    })
    .collect()
});

/// Returns the section a heading line opens and any inline content after ':'.
fn heading_of(line: &str) -> Option<(Section, &str)> {
    if line.chars().count() > 60 && !line.contains(':') {
        return None;
    }
    HEADING_RES.iter().find_map(|(section, re)| {
        re.captures(line).map(|caps| {
            let inline = caps.get(1).map_or("", |m| m.as_str().trim());
            (*section, inline)
        })
    })
}

/// Index and inline content of the first heading for `section`.
fn find_heading<'a>(lines: &[&'a str], section: Section) -> Option<(usize, &'a str)> {
    lines.iter().enumerate().find_map(|(i, line)| match heading_of(line) {
        Some((found, inline)) if found == section => Some((i, inline)),
        _ => None,
    })
}

/// Inline content plus the following paragraph, stopping at a blank line or
/// the next heading.
fn paragraph_after<'a>(lines: &[&'a str], index: usize, inline: &'a str) -> Vec<&'a str> {
    let mut block = Vec::new();
    if !inline.is_empty() {
        block.push(inline);
    }
    for line in lines.iter().skip(index + 1) {
        if line.is_empty() {
            if block.is_empty() {
                continue;
            }
            break;
        }
        if heading_of(line).is_some() {
            break;
        }
        block.push(*line);
    }
    block
}

/// Every non-blank line up to the next heading.
fn section_after<'a>(lines: &[&'a str], index: usize) -> Vec<&'a str> {
    lines
        .iter()
        .skip(index + 1)
        .take_while(|line| heading_of(line).is_none())
        .filter(|line| !line.is_empty())
        .copied()
        .collect()
}

/// Builds Resume Data from plain text with regular expressions only.
pub fn build_resume_from_text(text: &str) -> ResumeData {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    ResumeData {
        personal_info: extract_personal_info(text, &lines),
        work_experience: extract_work_experience(&lines),
        education: extract_education(&lines),
        skills: extract_skills(text, &lines),
        custom_sections: vec![CustomSection {
            id: new_id("section"),
            title: ORIGINAL_CONTENT_TITLE.to_string(),
            content: truncate_chars(text, ORIGINAL_CONTENT_CHARS),
        }],
        ..Default::default()
    }
}

fn extract_personal_info(text: &str, lines: &[&str]) -> PersonalInfo {
    let linkedin = LINKEDIN_RE.find(text).map(|m| m.as_str().to_string());
    let github = GITHUB_RE.find(text).map(|m| m.as_str().to_string());
    let website = URL_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|url| {
            let lower = url.to_lowercase();
            !lower.contains("linkedin.com") && !lower.contains("github.com")
        })
        .map(String::from);

    let summary = extract_summary(text, lines);

    PersonalInfo {
        full_name: extract_name(lines).unwrap_or_default(),
        email: EMAIL_RE
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        phone: PHONE_RE
            .find(text)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        location: extract_location(lines).unwrap_or_default(),
        linkedin,
        github,
        website,
        summary: (!summary.is_empty()).then_some(summary),
        title: None,
    }
}

/// First of the opening lines made of 2-4 capitalised words.
fn extract_name(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .filter(|line| !line.is_empty())
        .take(NAME_SCAN_LINES)
        .find(|line| {
            let len = line.chars().count();
            let words: Vec<&str> = line.split_whitespace().collect();
            len > 5
                && len < 60
                && (2..=4).contains(&words.len())
                && words.iter().all(|w| NAME_WORD_RE.is_match(w))
        })
        .map(|line| line.to_string())
}

fn extract_location(lines: &[&str]) -> Option<String> {
    let header: Vec<&str> = lines
        .iter()
        .filter(|line| !line.is_empty())
        .take(LOCATION_SCAN_LINES)
        .copied()
        .collect();
    LOCATION_RES.iter().find_map(|re| {
        header
            .iter()
            .find_map(|line| re.find(line).map(|m| m.as_str().trim().to_string()))
    })
}

/// The summary/objective/profile paragraph, else the first paragraph longer
/// than 50 chars.
fn extract_summary(text: &str, lines: &[&str]) -> String {
    if let Some((index, inline)) = find_heading(lines, Section::Summary) {
        let block = paragraph_after(lines, index, inline).join(" ");
        let block = block.trim();
        if !block.is_empty() {
            return truncate_chars(block, MAX_SUMMARY_CHARS);
        }
    }

    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .find(|p| p.chars().count() > 50)
        .map(|p| truncate_chars(&p.replace('\n', " "), MAX_PARAGRAPH_SUMMARY_CHARS))
        .unwrap_or_default()
}

fn extract_skills(text: &str, lines: &[&str]) -> Vec<Skill> {
    let listed = if let Some((index, inline)) = find_heading(lines, Section::Skills) {
        Some(paragraph_after(lines, index, inline).join("\n"))
    } else {
        SKILL_PHRASE_RE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    };

    let mut names: Vec<String> = Vec::new();
    if let Some(listed) = listed {
        for token in SKILL_SPLIT_RE.split(&listed) {
            // "Languages: Rust" keeps only "Rust".
            let token = token.rsplit(':').next().unwrap_or(token);
            let token = BULLET_PREFIX_RE.replace(token.trim(), "");
            let token = token.trim().trim_end_matches('.');
            let len = token.chars().count();
            if len > 1 && len < 30 && !contains_ignore_case(&names, token) {
                names.push(token.to_string());
            }
        }
    }

    if names.is_empty() {
        names = technical_terms_in(text)
            .into_iter()
            .map(String::from)
            .collect();
    }

    names
        .into_iter()
        .take(MAX_SKILLS)
        .map(|name| Skill {
            id: new_id("skill"),
            name,
            level: SkillLevel::Intermediate,
            category: "Technical".to_string(),
        })
        .collect()
}

fn contains_ignore_case(names: &[String], candidate: &str) -> bool {
    names.iter().any(|n| n.eq_ignore_ascii_case(candidate))
}

#[derive(Debug, Default)]
struct DateRange {
    start: String,
    end: Option<String>,
    current: bool,
}

/// Finds a date range in `line`, returning it with the line minus the dates.
fn find_date_range(line: &str) -> Option<(DateRange, String)> {
    let short_line = line.chars().count() <= MAX_LONE_MARKER_LINE_CHARS;
    let lone_marker = short_line.then(|| &*LONE_MARKER_RE);
    DATE_RES.iter().chain(lone_marker).find_map(|re| {
        let caps = re.captures(line)?;
        let whole = caps.get(0)?;
        let start = caps
            .name("start")
            .map(|m| normalize_date(m.as_str()))
            .unwrap_or_default();
        let end_raw = caps.name("end").map_or("", |m| m.as_str().trim());
        let current = matches!(end_raw.to_lowercase().as_str(), "present" | "current");
        let end = (!current && !end_raw.is_empty()).then(|| normalize_date(end_raw));

        let rest = format!("{}{}", &line[..whole.start()], &line[whole.end()..]);
        Some((DateRange { start, end, current }, tidy_remainder(&rest)))
    })
}

fn tidy_remainder(rest: &str) -> String {
    let rest = rest.replace("()", "").replace("[]", "");
    let rest = SEPARATOR_RUN_RE.replace_all(&rest, " | ");
    rest.trim_matches(|c: char| c.is_whitespace() || "|•-–—,:()[]".contains(c))
        .to_string()
}

struct JobLine {
    position: String,
    company: String,
    location: Option<String>,
}

fn starts_upper_or_digit(s: &str) -> bool {
    s.chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
}

/// Matches the job-line shapes, rejecting sentences that happen to contain
/// a comma or a dash.
fn parse_job_line(line: &str) -> Option<JobLine> {
    if line.chars().count() >= MAX_JOB_LINE_CHARS || line.ends_with('.') {
        return None;
    }
    JOB_RES.iter().find_map(|re| {
        let caps = re.captures(line)?;
        let position = caps.get(1)?.as_str().trim();
        let company = caps.get(2)?.as_str().trim();
        let plausible = starts_upper_or_digit(position)
            && starts_upper_or_digit(company)
            && position.split_whitespace().count() <= 8
            && company.split_whitespace().count() <= 8;
        plausible.then(|| JobLine {
            position: position.to_string(),
            company: company.to_string(),
            location: caps
                .get(3)
                .map(|m| m.as_str().trim().to_string())
                .filter(|l| !l.is_empty()),
        })
    })
}

#[derive(Default)]
struct JobDraft {
    position: String,
    company: String,
    location: Option<String>,
    dates: Option<DateRange>,
    bullets: Vec<String>,
}

impl JobDraft {
    fn awaiting_dates(&self) -> bool {
        self.dates.is_none() && self.bullets.is_empty()
    }

    fn into_experience(self) -> WorkExperience {
        let dates = self.dates.unwrap_or_default();
        WorkExperience {
            id: new_id("work"),
            company: self.company,
            position: self.position,
            location: self.location,
            start_date: dates.start,
            end_date: if dates.current { None } else { dates.end },
            current: dates.current,
            is_current_job: Some(dates.current),
            description: truncate_chars(&self.bullets.join("\n"), MAX_JOB_DESCRIPTION_CHARS),
        }
    }
}

fn extract_work_experience(lines: &[&str]) -> Vec<WorkExperience> {
    let Some((index, _)) = find_heading(lines, Section::Experience) else {
        return Vec::new();
    };

    let mut jobs = Vec::new();
    let mut draft: Option<JobDraft> = None;

    for line in section_after(lines, index) {
        if line.chars().count() < 3 {
            continue;
        }

        if BULLET_RE.is_match(line) {
            if let Some(job) = draft.as_mut() {
                job.bullets
                    .push(BULLET_PREFIX_RE.replace(line, "• ").into_owned());
            }
            continue;
        }

        let (dates, rest) = match find_date_range(line) {
            Some((dates, rest)) => (Some(dates), rest),
            None => (None, SEPARATOR_RUN_RE.replace_all(line, " | ").into_owned()),
        };

        // A dates line right under a job line belongs to that job.
        if dates.is_some() {
            if let Some(job) = draft.as_mut().filter(|job| job.awaiting_dates()) {
                job.dates = dates;
                if job.location.is_none() && !rest.is_empty() {
                    job.location = Some(rest);
                }
                continue;
            }
        }

        if let Some(job_line) = parse_job_line(&rest) {
            if let Some(done) = draft.take() {
                jobs.push(done.into_experience());
                if jobs.len() >= MAX_JOBS {
                    return jobs;
                }
            }
            draft = Some(JobDraft {
                position: job_line.position,
                company: job_line.company,
                location: job_line.location,
                dates,
                bullets: Vec::new(),
            });
            continue;
        }

        let len = line.chars().count();
        if let Some(job) = draft.as_mut() {
            if len > 15 && len < 300 {
                job.bullets.push(format!("• {line}"));
            }
        }
    }

    if let Some(done) = draft {
        if jobs.len() < MAX_JOBS {
            jobs.push(done.into_experience());
        }
    }
    jobs
}

fn extract_education(lines: &[&str]) -> Vec<Education> {
    let Some((index, _)) = find_heading(lines, Section::Education) else {
        return Vec::new();
    };

    section_after(lines, index)
        .into_iter()
        .filter(|line| DEGREE_RE.is_match(line) || SCHOOL_RE.is_match(line))
        .take(MAX_EDUCATION)
        .map(parse_education_line)
        .collect()
}

fn parse_education_line(line: &str) -> Education {
    let graduation = YEAR_RE.find_iter(line).last().map(|m| m.as_str().to_string());
    let parts: Vec<&str> = EDU_SPLIT_RE
        .split(line)
        .map(str::trim)
        .filter(|p| p.chars().any(char::is_alphabetic))
        .collect();

    let institution = parts
        .iter()
        .find(|p| SCHOOL_RE.is_match(p))
        .or_else(|| parts.last())
        .map_or("", |p| strip_years(p));
    let degree_part = parts
        .iter()
        .find(|p| DEGREE_RE.is_match(p))
        .or_else(|| parts.first())
        .map_or("", |p| strip_years(p));

    let (degree, field) = match degree_part.split_once(" in ") {
        Some((degree, field)) => (degree.trim(), field.trim()),
        None => (degree_part, ""),
    };

    Education {
        id: new_id("edu"),
        institution: institution.to_string(),
        degree: degree.to_string(),
        field: field.to_string(),
        graduation_date: graduation,
        ..Default::default()
    }
}

fn strip_years(part: &str) -> &str {
    match YEAR_RE.find(part) {
        Some(m) if m.start() > 0 => part[..m.start()].trim_end_matches(|c: char| {
            c.is_whitespace() || "(,".contains(c)
        }),
        _ => part,
    }
}
