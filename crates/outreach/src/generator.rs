//! Cover letter generation for qualified jobs.

use crate::error::{OutreachError, Result};
use crate::prompts::{system_prompt, user_prompt};
use crate::TextGenerator;
use listings::{JobListing, UserProfile};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Writes personalized cover letters from a profile and a job listing.
pub struct CoverLetterGenerator {
    model: Arc<dyn TextGenerator>,
    profile: UserProfile,
}

impl CoverLetterGenerator {
    pub fn new(model: Arc<dyn TextGenerator>, profile: UserProfile) -> Self {
        info!("Cover letter generator ready for profile: {}", profile.name);
        Self { model, profile }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        info!("Profile set for: {}", profile.name);
        self.profile = profile;
    }

    /// Generate a letter for one job.
    ///
    /// The response is trimmed; a blank response is an error.
    pub async fn generate(&self, job: &JobListing) -> Result<String> {
        debug!("Generating cover letter for: {}", job.title());

        let system = system_prompt(&self.profile.tone);
        let user = user_prompt(job, &self.profile);
        let letter = self.model.complete(&system, &user).await?.trim().to_string();

        if letter.is_empty() {
            return Err(OutreachError::EmptyResponse);
        }

        debug!("Generated cover letter ({} chars)", letter.chars().count());
        Ok(letter)
    }

    /// Fill in the cover letter of every job, one request at a time.
    ///
    /// ## Algorithm
    /// For each job in order:
    /// 1. Generate a letter; on failure log it and move on
    /// 2. Attach the letter to the job
    /// 3. Sleep `delay` before the next request
    ///
    /// # Returns
    /// The number of jobs that received a letter
    pub async fn generate_batch(&self, jobs: &mut [JobListing], delay: Duration) -> usize {
        if jobs.is_empty() {
            return 0;
        }

        let total = jobs.len();
        info!("Generating cover letters for {} jobs", total);

        let mut generated = 0;
        for (i, job) in jobs.iter_mut().enumerate() {
            match self.generate(job).await {
                Ok(letter) => {
                    job.set_cover_letter(letter);
                    generated += 1;
                    info!(
                        "Generated cover letter {}/{}: {}",
                        i + 1,
                        total,
                        job.title().chars().take(50).collect::<String>()
                    );
                }
                Err(e) => {
                    error!("Failed to generate for job '{}': {}", job.title(), e);
                }
            }

            if i + 1 < total && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        info!("Cover letter generation complete: {}/{} successful", generated, total);
        generated
    }
}
