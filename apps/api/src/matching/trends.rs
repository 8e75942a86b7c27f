/// Market-trend statements shipped with the service. Loaded once at startup and
/// shared read-only across requests.
const DEFAULT_TRENDS: &[&str] = &[
    "Kubernetes and container orchestration skills are in high demand",
    "Cloud certifications (Azure, AWS) are increasingly required",
    "Real-time data processing with Kafka and Spark is trending",
    "MLOps and AI engineering roles are growing rapidly",
    "Python remains the most requested programming language",
    "Data governance and privacy skills are becoming essential",
    "DevOps practices are expected for data engineers",
    "NoSQL databases (MongoDB, Cassandra) are in demand",
];

pub fn default_trend_corpus() -> Vec<String> {
    DEFAULT_TRENDS.iter().map(|t| t.to_string()).collect()
}

/// Keeps the trends that mention any of `skills` (case-insensitive substring),
/// in corpus order, capped at `top_n`. Blank skills never match.
pub fn relevant_trends<T, S>(trends: &[T], skills: &[S], top_n: usize) -> Vec<String>
where
    T: AsRef<str>,
    S: AsRef<str>,
{
    let needles: Vec<String> = skills
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    trends
        .iter()
        .map(|t| AsRef::<str>::as_ref(t))
        .filter(|trend| {
            let haystack = trend.to_lowercase();
            needles.iter().any(|n| haystack.contains(n.as_str()))
        })
        .take(top_n)
        .map(str::to_string)
        .collect()
}
