//! Prompt templates for cover letter generation.

use listings::{JobListing, UserProfile};

/// Longest description excerpt sent to the model, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 1500;

const SYSTEM_TEMPLATE: &str = "You are an expert freelance proposal writer. Your job is to write compelling, \
personalized cover letters for freelance job applications.

Guidelines:
1. Be professional but personable and show genuine interest in the project
2. Open with a hook that shows you understand the client's needs
3. Briefly highlight 2-3 of the most relevant skills or experiences for THIS job
4. Include a concrete example or achievement when relevant
5. End with a clear call to action
6. Keep it concise (150-200 words max)
7. Avoid generic phrases like \"I am the perfect candidate\"
8. Match the tone specified: {tone}

DO NOT:
- Start with \"Dear Hiring Manager\" or a similar generic greeting
- List every skill; only mention what is relevant
- Make the letter too long
- Sound like a template";

pub fn system_prompt(tone: &str) -> String {
    SYSTEM_TEMPLATE.replace("{tone}", tone)
}

/// Render the user message for one job.
pub fn user_prompt(job: &JobListing, profile: &UserProfile) -> String {
    let description: String = job.description().chars().take(MAX_DESCRIPTION_CHARS).collect();
    let skills = if job.skills().is_empty() {
        "Not specified".to_string()
    } else {
        job.skills().join(", ")
    };

    format!(
        "Write a cover letter for this job application.

## JOB DETAILS
Title: {title}
Description: {description}
Required Skills: {skills}
Budget: {budget}

## MY PROFILE
{profile_context}

## INSTRUCTIONS
Write a compelling cover letter that:
1. Shows I understand the client's needs based on the job description
2. Highlights my most relevant experience from my profile
3. Is tailored specifically to this job, not generic
4. Uses a {tone} tone

Cover Letter:",
        title = job.title(),
        budget = job.budget_display(),
        profile_context = profile.to_prompt_context(),
        tone = profile.tone,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        let mut profile = UserProfile::new("Ada", "Backend Engineer");
        profile.tone = "friendly".to_string();
        profile
    }

    #[test]
    fn test_system_prompt_tone() {
        assert!(system_prompt("casual").contains("Match the tone specified: casual"));
    }

    #[test]
    fn test_user_prompt_fields() {
        let job = JobListing::new("API work", "Build endpoints", "https://www.upwork.com/jobs/~1")
            .unwrap()
            .with_hourly_rate("$40/hr")
            .with_skills(["Rust", "Postgres"]);

        let prompt = user_prompt(&job, &profile());
        assert!(prompt.contains("Title: API work"));
        assert!(prompt.contains("Required Skills: Rust, Postgres"));
        assert!(prompt.contains("Budget: $40/hr"));
        assert!(prompt.contains("Name: Ada"));
        assert!(prompt.contains("Uses a friendly tone"));
    }

    #[test]
    fn test_user_prompt_defaults_and_truncation() {
        let long = "x".repeat(MAX_DESCRIPTION_CHARS + 200);
        let job = JobListing::new("Job", long, "https://www.upwork.com/jobs/~1").unwrap();

        let prompt = user_prompt(&job, &profile());
        assert!(prompt.contains("Required Skills: Not specified"));
        assert!(prompt.contains("Budget: Not specified"));
        assert!(prompt.contains(&"x".repeat(MAX_DESCRIPTION_CHARS)));
        assert!(!prompt.contains(&"x".repeat(MAX_DESCRIPTION_CHARS + 1)));
    }

    #[test]
    fn test_placeholders_in_job_text_are_left_alone() {
        let job = JobListing::new(
            "Template {tone} engine",
            "Render {profile_context} and {job_title} tags",
            "https://www.upwork.com/jobs/~1",
        )
        .unwrap();

        let prompt = user_prompt(&job, &profile());
        assert!(prompt.contains("Title: Template {tone} engine"));
        assert!(prompt.contains("Description: Render {profile_context} and {job_title} tags"));
        assert_eq!(prompt.matches("Name: Ada").count(), 1);
    }
}
