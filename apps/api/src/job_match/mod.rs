// Job matching: harsh recruiter-style comparison of a resume against a posting.

pub mod experience;
pub mod handlers;
pub mod prompts;
pub mod report;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::llm_client::{generate_json, TextGenerator};
use crate::models::ResumeData;

use self::prompts::build_job_match_prompt;
use self::report::{fallback_job_match, JobMatchReport};

pub async fn match_job(
    llm: &dyn TextGenerator,
    resume: &ResumeData,
    job_description: &str,
) -> JobMatchReport {
    match_job_on(llm, resume, job_description, Local::now().date_naive()).await
}

/// `match_job` with an explicit reference date for durations.
pub async fn match_job_on(
    llm: &dyn TextGenerator,
    resume: &ResumeData,
    job_description: &str,
    today: NaiveDate,
) -> JobMatchReport {
    let prompt = build_job_match_prompt(resume, job_description, today);
    match generate_json::<JobMatchReport>(llm, &prompt).await {
        Ok(report) => {
            info!(
                "Job match produced by model (score {}, verdict {:?})",
                report.compatibility_score, report.verdict
            );
            report
        }
        Err(e) => {
            warn!("Job match falling back to local heuristics: {e}");
            fallback_job_match(resume, job_description, today)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_match::report::{Difficulty, GapSeverity, Level, Verdict};
    use crate::llm_client::stub::StubGenerator;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[tokio::test]
    async fn test_model_reply_is_relayed() {
        let llm = StubGenerator::replying(
            r#"{"compatibilityScore": 22, "verdict": "REJECT",
                "harshFeedback": "Not even close.",
                "criticalGaps": [{"category": "SKILLS", "gap": "No Rust",
                                  "severity": "CRITICAL", "harshComment": "None."}],
                "strengths": [], "redFlags": ["Job hopping"], "improvements": [],
                "competitionAnalysis": {"candidateLevel": "JUNIOR", "jobLevel": "SENIOR",
                                        "realityCheck": "Outclassed."},
                "salaryReality": {"theirWorth": "Low", "jobExpectation": "High", "gap": "Wide"}}"#,
        );
        let report = match_job_on(&llm, &ResumeData::default(), "Senior Rust role", today()).await;
        assert_eq!(report.compatibility_score, 22);
        assert_eq!(report.red_flags, vec!["Job hopping"]);
        assert!(llm.prompts()[0].contains("Senior Rust role"));
    }

    #[tokio::test]
    async fn test_failure_uses_fallback() {
        let llm = StubGenerator::failing();
        let report = match_job_on(&llm, &ResumeData::default(), "Any role", today()).await;
        assert_eq!(report.compatibility_score, 30);
        assert_eq!(report.verdict, Verdict::Reject);
    }

    #[tokio::test]
    async fn test_loosely_typed_reply_is_relayed() {
        let llm = StubGenerator::replying(
            r#"{"compatibilityScore": 71.6, "verdict": "Strong Match",
                "harshFeedback": "Solid.",
                "criticalGaps": [{"category": "Skills", "gap": "No Go",
                                  "severity": "minor", "harshComment": "Learnable."}],
                "strengths": [{"point": "Rust", "relevance": "High"}],
                "improvements": [{"action": "Learn Go", "timeframe": "1 month",
                                  "difficulty": "moderate", "honestAssessment": "Fine."}],
                "competitionAnalysis": {"candidateLevel": "Mid-Level", "jobLevel": "Senior",
                                        "realityCheck": "Close."},
                "salaryReality": {"theirWorth": "Fair", "jobExpectation": "Fair", "gap": "None"}}"#,
        );
        let report = match_job_on(&llm, &ResumeData::default(), "Rust role", today()).await;
        assert_eq!(report.compatibility_score, 72);
        assert_eq!(report.verdict, Verdict::StrongMatch);
        assert_eq!(report.critical_gaps[0].severity, GapSeverity::Minor);
        assert_eq!(report.improvements[0].difficulty, Difficulty::Hard);
        assert_eq!(report.competition_analysis.candidate_level, Level::Mid);
        assert_eq!(report.harsh_feedback, "Solid.");
    }

    #[tokio::test]
    async fn test_incomplete_reply_uses_fallback() {
        let llm = StubGenerator::replying(r#"{"compatibilityScore": 50, "verdict": "HIRE"}"#);
        let report = match_job_on(&llm, &ResumeData::default(), "Any role", today()).await;
        assert!(report.harsh_feedback.starts_with("Insufficient experience"));
    }
}
