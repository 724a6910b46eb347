//! Prompt composition for plan generation.

use crate::roadmap::schema::Goals;

/// Composes the single natural-language prompt sent for plan generation.
/// Skills are comma-joined; the resume text rides along verbatim.
pub fn build_plan_prompt(skills: &[String], goals: &Goals) -> String {
    format!(
        "Given the following user details:\n\
         - Skills: {}\n\
         - Target Role: {} at {}\n\
         - Timeline: {} days\n\
         - Resume: {}\n\
         - Aspirations: {}\n\
         Generate a personalized 30-day interview preparation plan. \
         For each day, include: key topics, practice tasks, daily checkup questions, \
         and progress tracking. Format as a JSON array of 30 days.",
        skills.join(", "),
        goals.target_role,
        goals.target_company,
        goals.timeline,
        goals.resume_content,
        goals.aspirations,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_comma_joined_skills_and_goals() {
        let goals = Goals {
            target_role: "Backend Engineer".to_string(),
            target_company: "Acme".to_string(),
            timeline: "30".to_string(),
            resume_content: "Built things.".to_string(),
            aspirations: "Tech lead".to_string(),
        };
        let prompt = build_plan_prompt(
            &["Rust".to_string(), "SQL".to_string(), "Kafka".to_string()],
            &goals,
        );

        assert!(prompt.contains("Skills: Rust, SQL, Kafka"));
        assert!(prompt.contains("Target Role: Backend Engineer at Acme"));
        assert!(prompt.contains("Timeline: 30 days"));
        assert!(prompt.contains("JSON array of 30 days"));
    }
}
