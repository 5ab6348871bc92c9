// ABOUTME: Canned agent output used when the language model is unavailable
// ABOUTME: Greetings, tough questions, scenarios, and static evaluation scores per mode

use realworlded_core::{Mode, SessionContext};

const DEMO_NOTE: &str =
    "(Note: Full AI capabilities will be enabled once you configure your Gemini API key)";

fn field_or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

pub fn mentor_reply(context: &SessionContext) -> String {
    match context.mode {
        Mode::Education => format!(
            "Hello! I'm your AI Mentor, here to guide you through {subject}.\n\n\
             I can help you with:\n\
             - Understanding real-world applications\n\
             - Getting project ideas\n\
             - Learning how to implement projects\n\
             - Preparing for real-world scenarios\n\n\
             What would you like to explore today?\n\n{DEMO_NOTE}",
            subject = field_or(&context.subject, "programming"),
        ),
        Mode::Business => format!(
            "Hello! I'm your Business Mentor, ready to help you explore the {business_type} industry.\n\n\
             I can help you with:\n\
             - Understanding market opportunities\n\
             - Developing a unique business idea\n\
             - Planning your business strategy\n\
             - Budgeting and financial planning\n\n\
             What aspect of your business idea would you like to discuss?\n\n{DEMO_NOTE}",
            business_type = field_or(&context.business_type, "business"),
        ),
    }
}

pub fn client_reply(mode: Mode) -> String {
    match mode {
        Mode::Education => format!(
            "I'm reviewing your project. Let me ask you some questions:\n\n\
             1. What happens if the application crashes in production?\n\
             2. How would you handle user feedback requesting new features?\n\
             3. Can you walk me through your debugging process?\n\n{DEMO_NOTE}"
        ),
        Mode::Business => format!(
            "I'm interested in your business idea. Let me ask you some tough questions:\n\n\
             1. Why should I invest in your business?\n\
             2. What makes your idea different from existing competitors?\n\
             3. How do you plan to acquire your first 100 customers?\n\
             4. What return do you expect in the first year?\n\n{DEMO_NOTE}"
        ),
    }
}

/// Generic reply for a persona without a tailored fallback
pub fn generic_reply(role: &str) -> String {
    format!(
        "I'm {role}, and I'm here to help you. I'm currently running in demo mode. \
         Please configure your Gemini API key to enable full AI capabilities."
    )
}

pub fn scenario(mode: Mode) -> &'static str {
    match mode {
        Mode::Education => {
            "A client reports that your application crashes whenever they try to save their work. \
             They're frustrated and need a fix immediately. How would you handle this situation?"
        }
        Mode::Business => {
            "I'm concerned about your pricing strategy. Your competitors offer similar products at \
             30% lower prices. How do you justify your pricing, and what's your plan to compete?"
        }
    }
}

/// Static scores and feedback returned when no model evaluation is available
pub struct FallbackScores {
    pub technical: f64,
    pub communication: f64,
    pub creativity: f64,
    pub overall: f64,
    pub strengths: [&'static str; 3],
    pub improvements: [&'static str; 3],
    pub feedback: &'static str,
}

pub fn evaluation(mode: Mode) -> FallbackScores {
    match mode {
        Mode::Education => FallbackScores {
            technical: 7.5,
            communication: 8.0,
            creativity: 7.0,
            overall: 7.5,
            strengths: [
                "Shows a good grasp of the core concepts",
                "Communicates ideas clearly",
                "Approaches problems methodically",
            ],
            improvements: [
                "Practice more real-world debugging scenarios",
                "Go deeper on technical detail in explanations",
                "Think through edge cases earlier",
            ],
            feedback: "You showed a solid understanding of the subject and communicated well. \
                       To improve further, focus on practical application and on handling \
                       unexpected situations. Keep building real-world projects!",
        },
        Mode::Business => FallbackScores {
            technical: 8.0,
            communication: 7.5,
            creativity: 8.5,
            overall: 8.0,
            strengths: [
                "Innovative idea with clear differentiation",
                "Good understanding of the target market",
                "Strong enthusiasm for the venture",
            ],
            improvements: [
                "Develop more detailed financial projections",
                "Explain the expected return on investment more clearly",
                "Back claims with concrete market research",
            ],
            feedback: "Your business idea shows promise and creativity, and you articulated your \
                       vision well. To strengthen the pitch, focus on the financials and support \
                       your claims with data. Practice explaining your expected returns to investors.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentor_reply_uses_subject_or_default() {
        let mut context = SessionContext::new(Mode::Education);
        assert!(mentor_reply(&context).contains("guide you through programming."));

        context.subject = Some("javascript".to_string());
        let reply = mentor_reply(&context);
        assert!(reply.contains("guide you through javascript."));
        assert!(reply.contains("Gemini API key"));
    }

    #[test]
    fn test_business_mentor_reply_uses_business_type() {
        let mut context = SessionContext::new(Mode::Business);
        assert!(mentor_reply(&context).contains("explore the business industry"));

        context.business_type = Some("clothing".to_string());
        assert!(mentor_reply(&context).contains("explore the clothing industry"));
    }

    #[test]
    fn test_client_reply_differs_by_mode() {
        assert!(client_reply(Mode::Education).contains("crashes in production"));
        assert!(client_reply(Mode::Business).contains("first 100 customers"));
        assert!(client_reply(Mode::Business).contains("Gemini API key"));
    }

    #[test]
    fn test_fallback_scores_per_mode() {
        let education = evaluation(Mode::Education);
        assert_eq!(education.overall, 7.5);
        assert_eq!(education.technical, 7.5);

        let business = evaluation(Mode::Business);
        assert_eq!(business.creativity, 8.5);
        assert_eq!(business.overall, 8.0);
    }
}
