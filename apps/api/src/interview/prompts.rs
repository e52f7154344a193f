//! Interview question prompt.

use crate::interview::models::InterviewRequest;

/// Number of question/answer pairs the prompt asks for.
pub const QUESTION_COUNT: usize = 10;

/// Renders the generation prompt. Fields are interpolated verbatim.
pub fn build_prompt(request: &InterviewRequest) -> String {
    format!(
        "Generate exactly {QUESTION_COUNT} diverse interview questions with answers for a {job_type} role.

Context:
- Work Experience: {work_experience} years
- Preferred Location: {location}
- Target Company Type: {company_type}

Include:
- 4 Technical questions
- 3 Behavioral questions
- 3 Situational questions

Format strictly as:
1. Question
Answer: Full answer here.

Start every question on a new line with its number, a period and a space.
Put the answer on the following line, starting with \"Answer: \".
",
        job_type = request.job_type,
        work_experience = request.work_experience,
        location = request.location,
        company_type = request.company_type,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> InterviewRequest {
        InterviewRequest {
            job_type: "Data Engineer".into(),
            work_experience: "4".into(),
            company_type: "Fintech".into(),
            location: "Lisbon".into(),
        }
    }

    #[test]
    fn test_prompt_contains_all_fields() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("for a Data Engineer role"));
        assert!(prompt.contains("Work Experience: 4 years"));
        assert!(prompt.contains("Preferred Location: Lisbon"));
        assert!(prompt.contains("Target Company Type: Fintech"));
    }

    #[test]
    fn test_prompt_requests_fixed_mix_and_format() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("exactly 10"));
        assert!(prompt.contains("4 Technical"));
        assert!(prompt.contains("3 Behavioral"));
        assert!(prompt.contains("3 Situational"));
        assert!(prompt.contains("1. Question\nAnswer: Full answer here."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt(&request()), build_prompt(&request()));
    }

    #[test]
    fn test_fields_are_not_escaped() {
        let req = InterviewRequest {
            job_type: "{location} \"quoted\"\nnewline".into(),
            ..request()
        };
        let prompt = build_prompt(&req);
        assert!(prompt.contains("for a {location} \"quoted\"\nnewline role"));
    }

    #[test]
    fn test_empty_request_still_renders() {
        let prompt = build_prompt(&InterviewRequest::default());
        assert!(prompt.contains("for a  role"));
        assert!(!prompt.trim().is_empty());
    }
}
