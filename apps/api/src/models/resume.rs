use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Generates a client-compatible entry id, e.g. `work_3f2a…`.
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// Case-insensitive; anything unrecognised is treated as intermediate.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "beginner" => SkillLevel::Beginner,
            "advanced" => SkillLevel::Advanced,
            "expert" => SkillLevel::Expert,
            _ => SkillLevel::Intermediate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        }
    }
}

impl<'de> Deserialize<'de> for SkillLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(SkillLevel::parse).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageProficiency {
    Basic,
    #[default]
    Conversational,
    Proficient,
    Fluent,
    Native,
}

impl LanguageProficiency {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "basic" | "beginner" | "elementary" => LanguageProficiency::Basic,
            "proficient" | "advanced" | "professional" => LanguageProficiency::Proficient,
            "fluent" => LanguageProficiency::Fluent,
            "native" | "bilingual" => LanguageProficiency::Native,
            _ => LanguageProficiency::Conversational,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageProficiency::Basic => "basic",
            LanguageProficiency::Conversational => "conversational",
            LanguageProficiency::Proficient => "proficient",
            LanguageProficiency::Fluent => "fluent",
            LanguageProficiency::Native => "native",
        }
    }
}

impl<'de> Deserialize<'de> for LanguageProficiency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(LanguageProficiency::parse)
            .unwrap_or_default())
    }
}

/// Visual layout used when rendering a resume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeTemplate {
    #[default]
    Modern,
    Classic,
    Minimal,
    Creative,
    Executive,
    Technical,
}

impl ResumeTemplate {
    pub const ALL: [ResumeTemplate; 6] = [
        ResumeTemplate::Modern,
        ResumeTemplate::Classic,
        ResumeTemplate::Minimal,
        ResumeTemplate::Creative,
        ResumeTemplate::Executive,
        ResumeTemplate::Technical,
    ];

    /// Unknown names fall back to `Modern`, matching the preview behaviour.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "classic" => ResumeTemplate::Classic,
            "minimal" => ResumeTemplate::Minimal,
            "creative" => ResumeTemplate::Creative,
            "executive" => ResumeTemplate::Executive,
            "technical" => ResumeTemplate::Technical,
            _ => ResumeTemplate::Modern,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeTemplate::Modern => "modern",
            ResumeTemplate::Classic => "classic",
            ResumeTemplate::Minimal => "minimal",
            ResumeTemplate::Creative => "creative",
            ResumeTemplate::Executive => "executive",
            ResumeTemplate::Technical => "technical",
        }
    }
}

impl<'de> Deserialize<'de> for ResumeTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(ResumeTemplate::parse).unwrap_or_default())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "de::null_default")]
    pub full_name: String,
    #[serde(deserialize_with = "de::null_default")]
    pub email: String,
    #[serde(deserialize_with = "de::null_default")]
    pub phone: String,
    #[serde(deserialize_with = "de::null_default")]
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PersonalInfo {
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or("").trim()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    #[serde(deserialize_with = "de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "de::null_default")]
    pub company: String,
    #[serde(deserialize_with = "de::null_default")]
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_current_job: Option<bool>,
    #[serde(deserialize_with = "de::null_default")]
    pub description: String,
}

impl WorkExperience {
    /// The form and the importers disagree on which flag they set.
    pub fn is_current(&self) -> bool {
        self.current || self.is_current_job.unwrap_or(false)
    }

    pub fn end_date_text(&self) -> &str {
        self.end_date.as_deref().unwrap_or("").trim()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "de::null_default")]
    pub institution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    pub degree: String,
    #[serde(deserialize_with = "de::null_default")]
    pub field: String,
    #[serde(deserialize_with = "de::null_default")]
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_date: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    pub current: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt_string"
    )]
    pub gpa: Option<String>,
}

impl Education {
    pub fn school_name(&self) -> &str {
        first_non_empty(&[Some(self.institution.as_str()), self.school.as_deref()])
    }

    pub fn graduation(&self) -> &str {
        first_non_empty(&[self.graduation_date.as_deref(), self.end_date.as_deref()])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    #[serde(deserialize_with = "de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "de::null_default")]
    pub name: String,
    pub level: SkillLevel,
    #[serde(deserialize_with = "de::null_default")]
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "de::null_default")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::null_default")]
    pub description: String,
    #[serde(deserialize_with = "de::string_or_list")]
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Project {
    pub fn display_title(&self) -> &str {
        first_non_empty(&[Some(self.title.as_str()), self.name.as_deref()])
    }

    pub fn display_url(&self) -> &str {
        first_non_empty(&[self.url.as_deref(), self.link.as_deref()])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    #[serde(deserialize_with = "de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "de::null_default")]
    pub name: String,
    #[serde(deserialize_with = "de::null_default")]
    pub issuer: String,
    #[serde(alias = "dateObtained", deserialize_with = "de::null_default")]
    pub date: String,
    #[serde(alias = "expirationDate", skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(alias = "url", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    #[serde(deserialize_with = "de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "de::null_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub proficiency: LanguageProficiency,
}

impl Language {
    pub fn display_name(&self) -> &str {
        first_non_empty(&[Some(self.name.as_str()), self.language.as_deref()])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSection {
    #[serde(deserialize_with = "de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "de::null_default")]
    pub title: String,
    #[serde(deserialize_with = "de::null_default")]
    pub content: String,
}

/// The full document edited by the client and exchanged with every route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    #[serde(deserialize_with = "de::null_default")]
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "de::null_default")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(deserialize_with = "de::null_default")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "de::null_default")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "de::null_default")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "de::null_default")]
    pub certifications: Vec<Certification>,
    #[serde(deserialize_with = "de::null_default")]
    pub languages: Vec<Language>,
    #[serde(deserialize_with = "de::null_default")]
    pub custom_sections: Vec<CustomSection>,
    pub selected_template: ResumeTemplate,
}

impl ResumeData {
    /// True when no contact detail, summary or section entry is present.
    pub fn is_empty(&self) -> bool {
        let info = &self.personal_info;
        [&info.full_name, &info.email, &info.phone, &info.location]
            .iter()
            .all(|field| field.trim().is_empty())
            && info.summary_text().is_empty()
            && self.work_experience.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.projects.is_empty()
            && self.certifications.is_empty()
            && self.languages.is_empty()
    }
}

fn first_non_empty<'a>(candidates: &[Option<&'a str>]) -> &'a str {
    candidates
        .iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Null and a missing key both mean the default.
    pub fn null_default<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
    }

    /// Accepts `["a", "b"]`, `"a, b"` or null.
    pub fn string_or_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect(),
            _ => Vec::new(),
        })
    }

    /// GPA shows up both as `"3.8"` and `3.8`.
    pub fn lenient_opt_string<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }
}
