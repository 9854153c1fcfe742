// Import prompt templates.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

pub const STRUCTURE_PROMPT_TEMPLATE: &str = r#"You are an expert resume parser. Extract the information in the resume text below and categorise it.

PARSING RULES:
1. Name: near the top, 2-4 capitalised words, no special characters
2. Email, phone, location, LinkedIn (linkedin.com/in/...), website (not LinkedIn or GitHub)
3. Summary: the paragraph after the contact details that describes the career
4. Work experience: "Software Engineer at Google", "Google - Software Engineer" and "Senior Developer | Microsoft" are job lines; dates look like "2020-2023", "Jan 2020 - Present", "2019 to 2022"
5. Mark a job as current when it ends with "Present" or "Current"
6. Skills: technical skills only, taken from the whole document, not just a skills list
7. Education: degrees ("Bachelor of Science", "B.S.", "MBA") and institutions ("University", "College", "Institute")
8. Convert every date to YYYY-MM

Return this exact structure:
{
  "personalInfo": {
    "fullName": "extracted_full_name",
    "email": "extracted_email",
    "phone": "extracted_phone",
    "location": "extracted_location",
    "linkedin": "extracted_linkedin_url",
    "website": "extracted_website_url",
    "summary": "extracted_summary_or_objective"
  },
  "workExperience": [
    {
      "company": "company_name",
      "position": "job_title",
      "startDate": "YYYY-MM",
      "endDate": "YYYY-MM or empty if current",
      "isCurrentJob": true,
      "description": "description_with_achievements"
    }
  ],
  "education": [
    {
      "school": "institution_name",
      "degree": "degree_type",
      "field": "field_of_study",
      "graduationDate": "YYYY-MM"
    }
  ],
  "skills": ["skill1", "skill2"],
  "certifications": [
    {"name": "certification_name", "issuer": "issuing_organization", "dateObtained": "YYYY-MM"}
  ],
  "projects": [
    {"name": "project_name", "description": "project_description", "technologies": ["tech1", "tech2"]}
  ]
}

RESUME TEXT TO ANALYZE:
{resume_text}

{json_only}"#;

pub fn build_structure_prompt(resume_text: &str) -> String {
    STRUCTURE_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}
