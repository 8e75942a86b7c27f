use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::job::{JobLevel, JobPosting, JobType};
use crate::sources::{JobSource, SearchQuery, SourceError};

/// Built-in board of sample postings. Always available; used when no external
/// board is configured and by local demos.
pub struct SampleBoardSource;

struct SampleListing {
    title: &'static str,
    company: &'static str,
    location: &'static str,
    job_type: JobType,
    level: JobLevel,
    description: &'static str,
    requirements: &'static [&'static str],
    salary_range: &'static str,
    application_url: &'static str,
}

const LISTINGS: &[SampleListing] = &[
    SampleListing {
        title: "Senior Data Engineer",
        company: "TechCorp Inc.",
        location: "Dallas, TX",
        job_type: JobType::FullTime,
        level: JobLevel::Senior,
        description: "We are seeking a Senior Data Engineer with expertise in Apache Kafka, Spark, \
            and cloud technologies. The ideal candidate will have 5+ years of experience building \
            scalable data pipelines and working with big data technologies.",
        requirements: &[
            "5+ years of data engineering experience",
            "Expertise in Apache Kafka and Apache Spark",
            "Experience with cloud platforms (AWS, Azure, GCP)",
            "Strong Python and SQL skills",
            "Experience with data warehousing and ETL processes",
        ],
        salary_range: "$120,000 - $160,000",
        application_url: "https://example.com/job/1",
    },
    SampleListing {
        title: "Machine Learning Engineer",
        company: "AI Solutions Ltd.",
        location: "Austin, TX",
        job_type: JobType::FullTime,
        level: JobLevel::Mid,
        description: "Join our ML team to build cutting-edge AI applications. Work with large \
            datasets, implement ML models, and deploy them to production using modern MLOps practices.",
        requirements: &[
            "3+ years of ML engineering experience",
            "Strong Python programming skills",
            "Experience with TensorFlow or PyTorch",
            "Knowledge of MLOps tools and practices",
            "Bachelor's degree in CS or related field",
        ],
        salary_range: "$90,000 - $130,000",
        application_url: "https://example.com/job/2",
    },
    SampleListing {
        title: "Backend Developer - Python/FastAPI",
        company: "StartupXYZ",
        location: "Remote",
        job_type: JobType::Remote,
        level: JobLevel::Mid,
        description: "Build scalable backend systems using Python and FastAPI. Work with \
            microservices architecture and help scale our platform to handle millions of users.",
        requirements: &[
            "3+ years of Python development experience",
            "Experience with FastAPI or similar frameworks",
            "Knowledge of database design and optimization",
            "Experience with containerization (Docker)",
            "Understanding of microservices architecture",
        ],
        salary_range: "$80,000 - $120,000",
        application_url: "https://example.com/job/3",
    },
    SampleListing {
        title: "Cloud Data Architect",
        company: "Enterprise Solutions Inc.",
        location: "Dallas, TX",
        job_type: JobType::Hybrid,
        level: JobLevel::Senior,
        description: "Lead the design and implementation of cloud-based data architecture \
            solutions. Work with Azure and AWS to build scalable, secure data platforms.",
        requirements: &[
            "7+ years of data architecture experience",
            "Expertise in Azure and AWS cloud platforms",
            "Experience with data lakes and data warehouses",
            "Strong knowledge of data governance and security",
            "Leadership and mentoring experience",
        ],
        salary_range: "$140,000 - $180,000",
        application_url: "https://example.com/job/4",
    },
    SampleListing {
        title: "Data Scientist - AI/ML",
        company: "Research Labs Co.",
        location: "Plano, TX",
        job_type: JobType::FullTime,
        level: JobLevel::Mid,
        description: "Apply advanced analytics and machine learning to solve business problems. \
            Work with large datasets to extract insights and build predictive models.",
        requirements: &[
            "Master's degree in Data Science or related field",
            "4+ years of data science experience",
            "Proficiency in Python, R, and SQL",
            "Experience with scikit-learn, pandas, numpy",
            "Strong statistical analysis skills",
        ],
        salary_range: "$95,000 - $135,000",
        application_url: "https://example.com/job/5",
    },
];

impl SampleListing {
    fn to_posting(&self, source: &str) -> JobPosting {
        JobPosting {
            id: Uuid::new_v4(),
            source: source.to_string(),
            title: self.title.to_string(),
            company: self.company.to_string(),
            location: self.location.to_string(),
            job_type: self.job_type,
            level: self.level,
            description: self.description.to_string(),
            requirements: self.requirements.iter().map(|r| r.to_string()).collect(),
            salary_range: Some(self.salary_range.to_string()),
            posted_date: Some(Utc::now()),
            application_url: self.application_url.to_string(),
            match_score: None,
        }
    }
}

#[async_trait]
impl JobSource for SampleBoardSource {
    fn name(&self) -> &'static str {
        "sample_board"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobPosting>, SourceError> {
        Ok(LISTINGS
            .iter()
            .map(|listing| listing.to_posting(self.name()))
            .filter(|posting| query.accepts(posting))
            .take(query.max_results)
            .collect())
    }
}
