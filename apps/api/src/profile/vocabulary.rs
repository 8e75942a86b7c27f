//! Keyword vocabularies used by the deterministic (no-LLM) code paths: resume skill
//! extraction, the keyword analyst and its skill-gap reports.

/// Technical skills recognised in resumes, requirements and trend statements.
pub const TECHNICAL_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "go",
    "rust",
    "c++",
    "c#",
    "sql",
    "postgresql",
    "mysql",
    "mongodb",
    "cassandra",
    "redis",
    "elasticsearch",
    "kafka",
    "spark",
    "hadoop",
    "airflow",
    "kubernetes",
    "docker",
    "aws",
    "azure",
    "gcp",
    "terraform",
    "ansible",
    "react",
    "angular",
    "vue",
    "nodejs",
    "express",
    "django",
    "flask",
    "fastapi",
    "tensorflow",
    "pytorch",
    "scikit-learn",
    "pandas",
    "numpy",
    "git",
    "jenkins",
    "gitlab",
    "github",
    "ci/cd",
    "mlops",
    "devops",
];

/// Career focus areas and the keywords that signal them.
pub const FOCUS_AREAS: &[(&str, &[&str])] = &[
    (
        "Data Engineering",
        &[
            "data pipeline",
            "etl",
            "kafka",
            "spark",
            "airflow",
            "data warehouse",
            "data engineer",
        ],
    ),
    (
        "Machine Learning",
        &[
            "machine learning",
            "tensorflow",
            "pytorch",
            "mlops",
            "scikit-learn",
            "ml engineer",
        ],
    ),
    (
        "Data Science",
        &[
            "data science",
            "data scientist",
            "statistics",
            "pandas",
            "predictive model",
        ],
    ),
    ("Backend Development", &["backend", "api", "microservices", "django", "flask", "fastapi"]),
    ("Frontend Development", &["frontend", "react", "angular", "vue"]),
    ("Cloud Architecture", &["cloud", "aws", "azure", "gcp", "terraform"]),
    ("DevOps", &["devops", "kubernetes", "docker", "ci/cd", "jenkins"]),
];

/// Certifications worth suggesting for a skill.
pub const CERTIFICATIONS: &[(&str, &str)] = &[
    ("aws", "AWS Certified Solutions Architect - Associate"),
    ("azure", "Microsoft Certified: Azure Data Engineer Associate"),
    ("gcp", "Google Cloud Professional Data Engineer"),
    ("kubernetes", "Certified Kubernetes Administrator (CKA)"),
    ("kafka", "Confluent Certified Developer for Apache Kafka"),
    ("spark", "Databricks Certified Associate Developer for Apache Spark"),
    ("terraform", "HashiCorp Certified: Terraform Associate"),
    ("mongodb", "MongoDB Certified Developer Associate"),
];

pub fn certification_for(skill: &str) -> Option<&'static str> {
    CERTIFICATIONS
        .iter()
        .find(|(s, _)| *s == skill)
        .map(|(_, cert)| *cert)
}

/// Whether `text` mentions `term` (both compared lower-cased).
///
/// Single alphanumeric words must match a whole token, so "go" does not match
/// "google"; terms with spaces or punctuation ("ci/cd", "c++", "data pipeline")
/// match as substrings.
pub fn mentions(text: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return false;
    }
    let text = text.to_lowercase();
    if term.chars().all(|c| c.is_alphanumeric()) {
        tokens(&text).any(|t| t == term)
    } else {
        text.contains(&term)
    }
}

/// Lower-case alphanumeric tokens of `text`.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}
