//! Job-match report shape and the harsh local fallback.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::job_match::experience::total_experience_years;
use crate::models::catalog::{mentions_term, technical_terms_in};
use crate::llm_client::lenient::{self, lenient_enum};
use crate::models::ResumeData;

/// Fallback scores never claim more certainty than this.
const FALLBACK_SCORE_CAP: u32 = 85;

/// Job-description keyword gaps reported at most.
const MAX_KEYWORD_GAPS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Reject,
    Maybe,
    Interview,
    StrongMatch,
}

impl Verdict {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 70 => Verdict::StrongMatch,
            s if s >= 55 => Verdict::Interview,
            s if s >= 40 => Verdict::Maybe,
            _ => Verdict::Reject,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GapCategory {
    Skills,
    Experience,
    Education,
    Certifications,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GapSeverity {
    Dealbreaker,
    Critical,
    Major,
    Minor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Hard,
    NearlyImpossible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    Beginner,
    Junior,
    Mid,
    Senior,
    Expert,
    Unknown,
}

impl Level {
    fn from_years(years: f64) -> Self {
        if years < 1.0 {
            Level::Beginner
        } else if years < 3.0 {
            Level::Junior
        } else {
            Level::Mid
        }
    }
}

lenient_enum!(Verdict, fallback = Verdict::Maybe, {
    "reject" => Verdict::Reject,
    "maybe" => Verdict::Maybe,
    "interview" => Verdict::Interview,
    "strong_match" | "strong" => Verdict::StrongMatch,
});

lenient_enum!(GapCategory, fallback = GapCategory::Skills, {
    "skills" | "skill" => GapCategory::Skills,
    "experience" => GapCategory::Experience,
    "education" => GapCategory::Education,
    "certifications" | "certification" => GapCategory::Certifications,
});

lenient_enum!(GapSeverity, fallback = GapSeverity::Major, {
    "dealbreaker" | "deal_breaker" => GapSeverity::Dealbreaker,
    "critical" => GapSeverity::Critical,
    "major" => GapSeverity::Major,
    "minor" => GapSeverity::Minor,
});

lenient_enum!(Relevance, fallback = Relevance::Medium, {
    "high" => Relevance::High,
    "medium" => Relevance::Medium,
    "low" => Relevance::Low,
});

lenient_enum!(Difficulty, fallback = Difficulty::Hard, {
    "easy" => Difficulty::Easy,
    "hard" => Difficulty::Hard,
    "nearly_impossible" | "impossible" => Difficulty::NearlyImpossible,
});

lenient_enum!(Level, fallback = Level::Unknown, {
    "beginner" | "entry" | "entry_level" => Level::Beginner,
    "junior" => Level::Junior,
    "mid" | "mid_level" | "intermediate" => Level::Mid,
    "senior" => Level::Senior,
    "expert" | "lead" | "principal" => Level::Expert,
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalGap {
    pub category: GapCategory,
    pub gap: String,
    pub severity: GapSeverity,
    pub harsh_comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strength {
    pub point: String,
    pub relevance: Relevance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub action: String,
    pub timeframe: String,
    pub difficulty: Difficulty,
    pub honest_assessment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionAnalysis {
    pub candidate_level: Level,
    pub job_level: Level,
    pub reality_check: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryReality {
    pub their_worth: String,
    pub job_expectation: String,
    pub gap: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchReport {
    #[serde(deserialize_with = "lenient::score")]
    pub compatibility_score: u32,
    pub verdict: Verdict,
    pub harsh_feedback: String,
    #[serde(default)]
    pub critical_gaps: Vec<CriticalGap>,
    #[serde(default)]
    pub strengths: Vec<Strength>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<Improvement>,
    pub competition_analysis: CompetitionAnalysis,
    pub salary_reality: SalaryReality,
}

/// Deterministic assessment used whenever the model call fails.
///
/// Score starts at 30: +20 for three or more years, +15 for projects,
/// +10 for certifications, +10 for a summary over 100 chars, +15 for ten or
/// more skills. The verdict is taken before capping the score at 85.
pub fn fallback_job_match(
    resume: &ResumeData,
    job_description: &str,
    today: NaiveDate,
) -> JobMatchReport {
    let years = total_experience_years(&resume.work_experience, today);
    let has_projects = !resume.projects.is_empty();
    let has_certifications = !resume.certifications.is_empty();
    let has_strong_summary = resume.personal_info.summary_text().chars().count() > 100;

    let mut score: u32 = 30;
    if years >= 3.0 {
        score += 20;
    }
    if has_projects {
        score += 15;
    }
    if has_certifications {
        score += 10;
    }
    if has_strong_summary {
        score += 10;
    }
    if resume.skills.len() >= 10 {
        score += 15;
    }
    let verdict = Verdict::from_score(score);

    let harsh_feedback = if years < 2.0 {
        "Insufficient experience for most professional roles. This looks like an entry-level candidate trying to punch above their weight."
    } else {
        "Average candidate with standard qualifications. Nothing exceptional that would make them stand out from the competition."
    };

    let mut critical_gaps = vec![CriticalGap {
        category: GapCategory::Experience,
        gap: "Limited demonstrable experience".to_string(),
        severity: if years < 1.0 {
            GapSeverity::Dealbreaker
        } else {
            GapSeverity::Major
        },
        harsh_comment:
            "Experience claims don't match the complexity of work typically expected".to_string(),
    }];

    let mut strengths = vec![if resume.skills.len() > 5 {
        Strength {
            point: "Has listed multiple technical skills".to_string(),
            relevance: Relevance::Medium,
        }
    } else {
        Strength {
            point: "At least submitted a resume".to_string(),
            relevance: Relevance::Low,
        }
    }];

    let (matched, missing) = keyword_coverage(resume, job_description);
    critical_gaps.extend(missing.iter().take(MAX_KEYWORD_GAPS).map(|term| CriticalGap {
        category: GapCategory::Skills,
        gap: format!("No evidence of {term}"),
        severity: GapSeverity::Major,
        harsh_comment: format!(
            "The posting asks for {term} and nothing on this resume shows it"
        ),
    }));
    if !matched.is_empty() {
        strengths.push(Strength {
            point: format!("Mentions skills the posting asks for: {}", matched.join(", ")),
            relevance: Relevance::High,
        });
    }

    let mut red_flags = Vec::new();
    if !has_strong_summary {
        red_flags.push("Weak or missing professional summary".to_string());
    }
    if !has_projects {
        red_flags.push("No projects to demonstrate practical skills".to_string());
    }
    if years < 1.0 {
        red_flags.push("Extremely limited professional experience".to_string());
    }

    JobMatchReport {
        compatibility_score: score.min(FALLBACK_SCORE_CAP),
        verdict,
        harsh_feedback: harsh_feedback.to_string(),
        critical_gaps,
        strengths,
        red_flags,
        improvements: vec![Improvement {
            action: "Gain more hands-on experience through real projects".to_string(),
            timeframe: "6-12 months minimum".to_string(),
            difficulty: Difficulty::Hard,
            honest_assessment: "Will require significant time investment and likely starting at a lower level than desired".to_string(),
        }],
        competition_analysis: CompetitionAnalysis {
            candidate_level: Level::from_years(years),
            job_level: Level::Unknown,
            reality_check: "Competing against candidates with more substantial experience and proven track records".to_string(),
        },
        salary_reality: SalaryReality {
            their_worth: if years < 2.0 {
                "Entry-level compensation"
            } else {
                "Junior to mid-level compensation"
            }
            .to_string(),
            job_expectation: "Depends on job requirements".to_string(),
            gap: "Likely expecting more than current market value justifies".to_string(),
        },
    }
}

/// Splits the catalog terms found in the job description into those the
/// resume mentions anywhere and those it does not.
fn keyword_coverage(
    resume: &ResumeData,
    job_description: &str,
) -> (Vec<&'static str>, Vec<&'static str>) {
    let corpus = resume_corpus(resume);
    technical_terms_in(job_description)
        .into_iter()
        .partition(|term| mentions_term(&corpus, term))
}

fn resume_corpus(resume: &ResumeData) -> String {
    let mut parts: Vec<&str> = vec![resume.personal_info.summary_text()];
    if let Some(title) = resume.personal_info.title.as_deref() {
        parts.push(title);
    }
    parts.extend(resume.skills.iter().map(|s| s.name.as_str()));
    for exp in &resume.work_experience {
        parts.push(&exp.position);
        parts.push(&exp.description);
    }
    for project in &resume.projects {
        parts.push(project.display_title());
        parts.push(&project.description);
        parts.extend(project.technologies.iter().map(String::as_str));
    }
    parts.extend(resume.certifications.iter().map(|c| c.name.as_str()));
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Certification, PersonalInfo, Project, Skill, WorkExperience};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn skills(names: &[&str]) -> Vec<Skill> {
        names
            .iter()
            .map(|n| Skill {
                name: n.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(Verdict::from_score(30), Verdict::Reject);
        assert_eq!(Verdict::from_score(40), Verdict::Maybe);
        assert_eq!(Verdict::from_score(55), Verdict::Interview);
        assert_eq!(Verdict::from_score(70), Verdict::StrongMatch);
    }

    #[test]
    fn test_empty_resume_is_rejected() {
        let report = fallback_job_match(&ResumeData::default(), "Any role", today());
        assert_eq!(report.compatibility_score, 30);
        assert_eq!(report.verdict, Verdict::Reject);
        assert_eq!(report.critical_gaps[0].severity, GapSeverity::Dealbreaker);
        assert_eq!(report.red_flags.len(), 3);
        assert_eq!(report.competition_analysis.candidate_level, Level::Beginner);
        assert_eq!(report.competition_analysis.job_level, Level::Unknown);
        assert_eq!(report.strengths[0].relevance, Relevance::Low);
        assert!(report.harsh_feedback.starts_with("Insufficient experience"));
    }

    #[test]
    fn test_full_resume_is_capped() {
        let resume = ResumeData {
            personal_info: PersonalInfo {
                summary: Some("x".repeat(120)),
                ..Default::default()
            },
            work_experience: vec![WorkExperience {
                start_date: "2019-01".into(),
                end_date: Some("2023-01".into()),
                ..Default::default()
            }],
            projects: vec![Project::default()],
            certifications: vec![Certification::default()],
            skills: skills(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]),
            ..Default::default()
        };
        let report = fallback_job_match(&resume, "Senior role", today());
        assert_eq!(report.compatibility_score, 85);
        assert_eq!(report.verdict, Verdict::StrongMatch);
        assert!(report.red_flags.is_empty());
        assert_eq!(report.critical_gaps[0].severity, GapSeverity::Major);
        assert_eq!(report.competition_analysis.candidate_level, Level::Mid);
        assert_eq!(report.salary_reality.their_worth, "Junior to mid-level compensation");
    }

    #[test]
    fn test_job_description_keywords_become_gaps_and_strengths() {
        let resume = ResumeData {
            skills: skills(&["Rust", "Docker"]),
            ..Default::default()
        };
        let report = fallback_job_match(
            &resume,
            "We need Rust, Kubernetes and Docker experience. Go is a plus.",
            today(),
        );
        let gaps: Vec<&str> = report
            .critical_gaps
            .iter()
            .filter(|g| g.category == GapCategory::Skills)
            .map(|g| g.gap.as_str())
            .collect();
        assert_eq!(gaps, vec!["No evidence of Go", "No evidence of Kubernetes"]);
        let strength = report
            .strengths
            .iter()
            .find(|s| s.relevance == Relevance::High)
            .unwrap();
        assert!(strength.point.ends_with("Rust, Docker"));
        assert_eq!(report.compatibility_score, 30);
    }

    #[test]
    fn test_report_serializes_screaming_enums() {
        let report = fallback_job_match(&ResumeData::default(), "role", today());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["verdict"], "REJECT");
        assert_eq!(value["criticalGaps"][0]["severity"], "DEALBREAKER");
        assert_eq!(value["improvements"][0]["difficulty"], "HARD");
        assert_eq!(value["competitionAnalysis"]["jobLevel"], "UNKNOWN");
        assert!(value["salaryReality"].get("theirWorth").is_some());
    }
}
