// ABOUTME: Stage-based agent routing and keyword-driven stage transitions
// ABOUTME: Decides who answers a message and whether the session moves forward

use realworlded_core::{AgentType, Mode, Stage};

const PROGRAMMING_LANGUAGES: &[&str] = &["c++", "java", "python", "javascript"];
const BUSINESS_SECTORS: &[&str] = &["food", "clothing", "tech", "retail"];

/// Persona responsible for answering at `stage`
pub fn select_agent(stage: Stage) -> AgentType {
    match stage {
        Stage::Started | Stage::SubjectSelected | Stage::ApplicationSelected | Stage::Guidance => {
            AgentType::Mentor
        }
        Stage::Testing | Stage::Simulation => AgentType::Client,
        Stage::BusinessSelected => AgentType::Mentor,
    }
}

/// Stage the session moves to after `message`, judged against the stage at request start.
///
/// Matching is case-insensitive substring search.
pub fn detect_transition(mode: Mode, stage: Stage, message: &str) -> Option<Stage> {
    let text = message.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    match mode {
        Mode::Education => {
            if stage == Stage::Started && contains_any(PROGRAMMING_LANGUAGES) {
                Some(Stage::SubjectSelected)
            } else if text.contains("project") && text.contains("done") {
                Some(Stage::Testing)
            } else {
                None
            }
        }
        Mode::Business => {
            if stage == Stage::Started && contains_any(BUSINESS_SECTORS) {
                Some(Stage::BusinessSelected)
            } else if text.contains("ready") && text.contains("pitch") {
                Some(Stage::Simulation)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Stage::Started, AgentType::Mentor)]
    #[case(Stage::SubjectSelected, AgentType::Mentor)]
    #[case(Stage::ApplicationSelected, AgentType::Mentor)]
    #[case(Stage::Guidance, AgentType::Mentor)]
    #[case(Stage::Testing, AgentType::Client)]
    #[case(Stage::Simulation, AgentType::Client)]
    #[case(Stage::BusinessSelected, AgentType::Mentor)]
    fn test_select_agent(#[case] stage: Stage, #[case] expected: AgentType) {
        assert_eq!(select_agent(stage), expected);
    }

    #[rstest]
    #[case(Stage::Started, "I want to learn Python", Some(Stage::SubjectSelected))]
    #[case(Stage::Started, "C++ please", Some(Stage::SubjectSelected))]
    #[case(Stage::Started, "My project is DONE", Some(Stage::Testing))]
    #[case(Stage::Guidance, "The project is done!", Some(Stage::Testing))]
    #[case(Stage::Guidance, "Maybe java instead?", None)]
    #[case(Stage::SubjectSelected, "what should I build?", None)]
    #[case(Stage::Started, "hello there", None)]
    fn test_education_transitions(
        #[case] stage: Stage,
        #[case] message: &str,
        #[case] expected: Option<Stage>,
    ) {
        assert_eq!(detect_transition(Mode::Education, stage, message), expected);
    }

    #[rstest]
    #[case(Stage::Started, "A street food stall", Some(Stage::BusinessSelected))]
    #[case(Stage::Started, "Something in RETAIL", Some(Stage::BusinessSelected))]
    #[case(Stage::Started, "I'm ready to pitch", Some(Stage::Simulation))]
    #[case(Stage::BusinessSelected, "Ready for the pitch now", Some(Stage::Simulation))]
    #[case(Stage::BusinessSelected, "maybe clothing is better", None)]
    #[case(Stage::BusinessSelected, "I'm ready", None)]
    fn test_business_transitions(
        #[case] stage: Stage,
        #[case] message: &str,
        #[case] expected: Option<Stage>,
    ) {
        assert_eq!(detect_transition(Mode::Business, stage, message), expected);
    }

    #[test]
    fn test_keywords_do_not_cross_modes() {
        assert_eq!(detect_transition(Mode::Business, Stage::Started, "python shop"), None);
        assert_eq!(detect_transition(Mode::Education, Stage::Started, "food truck"), None);
    }
}
