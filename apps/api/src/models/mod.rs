pub mod catalog;
pub mod resume;

pub use resume::{
    new_id, Certification, CustomSection, Education, Language, LanguageProficiency,
    PersonalInfo, Project, ResumeData, ResumeTemplate, Skill, SkillLevel, WorkExperience,
};
