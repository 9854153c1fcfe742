//! Known technical skill names and whole-term matching against free text.

/// Technologies recognised when scanning resumes and job descriptions.
pub const TECHNICAL_SKILLS: &[&str] = &[
    // Programming languages
    "JavaScript", "Python", "Java", "C++", "C#", "PHP", "Ruby", "Go", "Swift", "Kotlin",
    "TypeScript", "Scala", "Rust", "R", "MATLAB", "Perl",
    // Frontend
    "React", "Angular", "Vue.js", "HTML", "CSS", "SASS", "LESS", "Bootstrap", "Tailwind CSS",
    "jQuery", "Webpack", "Vite", "Next.js", "Nuxt.js",
    // Backend
    "Node.js", "Express", "Django", "Flask", "Spring", "Laravel", "ASP.NET", "Ruby on Rails",
    "FastAPI", "Gin", "Echo",
    // Databases
    "SQL", "MongoDB", "PostgreSQL", "MySQL", "Redis", "Oracle", "SQLite", "Cassandra",
    "DynamoDB", "Firebase", "Supabase",
    // Cloud & DevOps
    "AWS", "Azure", "GCP", "Google Cloud", "Docker", "Kubernetes", "Jenkins", "CI/CD",
    "Terraform", "Ansible", "Helm",
    // Tools
    "Git", "GitHub", "GitLab", "Jira", "Linux", "Windows", "macOS", "Figma", "Photoshop",
    "Illustrator", "Sketch", "InVision",
    // Data & analytics
    "Machine Learning", "AI", "Data Science", "Tableau", "Power BI", "Excel", "Pandas",
    "NumPy", "TensorFlow", "PyTorch",
    // Mobile
    "iOS", "Android", "React Native", "Flutter", "Xamarin", "Ionic", "Cordova",
    // Testing
    "Jest", "Cypress", "Selenium", "Unit Testing", "Integration Testing", "TDD", "BDD",
    // Other
    "GraphQL", "REST API", "Microservices", "Blockchain", "IoT", "Agile", "Scrum", "Kanban",
    "SOLID", "Design Patterns",
];

/// Case-insensitive whole-term search: `Go` does not match inside `Google`,
/// while `C++` and `CI/CD` match as written.
pub fn mentions_term(text: &str, term: &str) -> bool {
    let haystack = text.to_lowercase();
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return false;
    }

    let mut from = 0;
    while let Some(pos) = haystack[from..].find(&needle) {
        let start = from + pos;
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric() && c != '+' && c != '#');
        if before_ok && after_ok {
            return true;
        }
        from = start + needle.chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Catalog entries mentioned in `text`, in catalog order.
pub fn technical_terms_in(text: &str) -> Vec<&'static str> {
    TECHNICAL_SKILLS
        .iter()
        .copied()
        .filter(|term| mentions_term(text, term))
        .collect()
}
