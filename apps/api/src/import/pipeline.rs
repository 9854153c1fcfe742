//! The import fallback chain: heuristic parse, model structuring on top,
//! raw text as the last resort.

use serde::Serialize;
use tracing::{info, warn};

use crate::import::heuristic::build_resume_from_text;
use crate::import::structure::structure_with_ai;
use crate::import::truncate_chars;
use crate::llm_client::TextGenerator;
use crate::models::{PersonalInfo, ResumeData};

/// Raw text placed in the summary when nothing else was recognised.
const RAW_SUMMARY_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportSource {
    Ai,
    Heuristic,
    RawText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStage {
    HeuristicParse,
    AiParse,
    AiUnavailable,
    RawTextFallback,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub resume_data: ResumeData,
    pub source: ImportSource,
    pub stages: Vec<ImportStage>,
    pub text_length: usize,
}

/// Runs the whole chain over extracted resume text.
pub async fn import_text(llm: &dyn TextGenerator, text: &str, ai_text_limit: usize) -> ImportOutcome {
    let heuristic = build_resume_from_text(text);
    let ai = structure_with_ai(llm, text, ai_text_limit).await;
    let outcome = combine(heuristic, ai, text);
    info!(
        "Import finished: source={:?}, stages={:?}, {} chars",
        outcome.source, outcome.stages, outcome.text_length
    );
    outcome
}

/// Overlays the model result on the heuristic one and applies the raw-text
/// fallback when neither found a name or any work history.
pub fn combine(heuristic: ResumeData, ai: Option<ResumeData>, raw_text: &str) -> ImportOutcome {
    let mut stages = vec![ImportStage::HeuristicParse];
    let mut ai_contributed = false;

    let mut resume = match ai {
        Some(ai) => {
            stages.push(ImportStage::AiParse);
            ai_contributed = !ai.is_empty();
            merge(heuristic, ai)
        }
        None => {
            stages.push(ImportStage::AiUnavailable);
            heuristic
        }
    };

    let source = if resume.personal_info.full_name.trim().is_empty()
        && resume.work_experience.is_empty()
    {
        warn!("No name or work history recognised; keeping raw text as the summary");
        stages.push(ImportStage::RawTextFallback);
        resume.personal_info.summary = Some(truncate_chars(raw_text.trim(), RAW_SUMMARY_CHARS));
        ImportSource::RawText
    } else if ai_contributed {
        ImportSource::Ai
    } else {
        ImportSource::Heuristic
    };

    ImportOutcome {
        resume_data: resume,
        source,
        stages,
        text_length: raw_text.chars().count(),
    }
}

/// Non-empty model values win field by field; model lists replace heuristic
/// lists only when non-empty.
fn merge(base: ResumeData, ai: ResumeData) -> ResumeData {
    fn pick(base: String, ai: String) -> String {
        if ai.trim().is_empty() {
            base
        } else {
            ai
        }
    }
    fn pick_opt(base: Option<String>, ai: Option<String>) -> Option<String> {
        ai.filter(|s| !s.trim().is_empty()).or(base)
    }
    fn pick_list<T>(base: Vec<T>, ai: Vec<T>) -> Vec<T> {
        if ai.is_empty() {
            base
        } else {
            ai
        }
    }

    let (b, a) = (base.personal_info, ai.personal_info);
    ResumeData {
        personal_info: PersonalInfo {
            full_name: pick(b.full_name, a.full_name),
            email: pick(b.email, a.email),
            phone: pick(b.phone, a.phone),
            location: pick(b.location, a.location),
            linkedin: pick_opt(b.linkedin, a.linkedin),
            github: pick_opt(b.github, a.github),
            website: pick_opt(b.website, a.website),
            summary: pick_opt(b.summary, a.summary),
            title: pick_opt(b.title, a.title),
        },
        work_experience: pick_list(base.work_experience, ai.work_experience),
        education: pick_list(base.education, ai.education),
        skills: pick_list(base.skills, ai.skills),
        certifications: pick_list(base.certifications, ai.certifications),
        projects: pick_list(base.projects, ai.projects),
        languages: pick_list(base.languages, ai.languages),
        custom_sections: base.custom_sections,
        selected_template: base.selected_template,
    }
}
