//! Built-in cover letter templates, one per tone. Placeholders are filled with
//! `str::replace`; paragraphs that come out empty are dropped.

pub const PROFESSIONAL_TEMPLATE: &str = "Dear Hiring Manager,

I am writing to express my strong interest in the {job_title} position at {company_name}. With my background in {relevant_field}, I am confident that I would be a valuable addition to your team.

{experience_paragraph}

{skills_paragraph}

{extra_paragraph}

I would welcome the opportunity to discuss how my experience can contribute to {company_name}'s continued success. Thank you for considering my application. I look forward to hearing from you soon.

Sincerely,
{candidate_name}";

pub const ENTHUSIASTIC_TEMPLATE: &str = "Dear {company_name} Team,

I am thrilled to apply for the {job_title} position! My passion for {relevant_field} is exactly what drew me to this role, and I am excited about the possibility of contributing to your work.

{experience_paragraph}

{skills_paragraph}

{extra_paragraph}

I can't wait to discuss how we can work together to achieve great things. Thank you for your time and consideration!

Best regards,
{candidate_name}";

pub const CREATIVE_TEMPLATE: &str = "Hello {company_name} Innovators,

When I discovered the {job_title} opening at {company_name}, I knew I had found my next adventure. My journey through {relevant_field} has been building toward exactly this kind of role.

{experience_paragraph}

{skills_paragraph}

{extra_paragraph}

Great work happens when passion meets opportunity, and I see this role as the intersection of both. Let's create something amazing together!

Warm regards,
{candidate_name}";

/// Collapses the blank lines left behind by empty paragraphs.
pub fn tidy(letter: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in letter.lines().map(str::trim_end) {
        let blank = line.trim().is_empty();
        if blank && out.last().map_or(true, |prev| prev.trim().is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.trim().is_empty()) {
        out.pop();
    }
    out.join("\n")
}
