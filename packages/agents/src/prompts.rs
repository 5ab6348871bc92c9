// ABOUTME: Prompt templates for the persona agents, evaluator, and scenario generator
// ABOUTME: Pure string building, kept free of I/O so the layout can be tested directly

use realworlded_core::constants::HISTORY_WINDOW;
use realworlded_core::{MessageRole, Mode, SessionContext};

use crate::persona::Persona;

/// One prior message of a session as seen by the agents
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// "project_idea" -> "Project Idea"
fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One `- Key: value` line per populated context field
pub fn format_context(context: &SessionContext) -> String {
    let lines: Vec<String> = context
        .entries()
        .into_iter()
        .map(|(key, value)| format!("- {}: {}", title_case(key), value))
        .collect();

    if lines.is_empty() {
        "No additional context".to_string()
    } else {
        lines.join("\n")
    }
}

/// The most recent turns, prefixed `User:` or `Assistant:`
pub fn format_history(history: &[ChatTurn]) -> Vec<String> {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|turn| {
            let speaker = if turn.role.is_assistant() { "Assistant" } else { "User" };
            format!("{}: {}", speaker, turn.content)
        })
        .collect()
}

pub fn build_chat_prompt(
    persona: &Persona,
    context: &SessionContext,
    history: &[ChatTurn],
    user_message: &str,
) -> String {
    let mut prompt = format!(
        "{}\n\nCurrent Context:\n{}\n\nRemember to stay in character and help the user achieve their learning goals.\n\n",
        persona.system_block(),
        format_context(context)
    );

    let conversation = format_history(history);
    if !conversation.is_empty() {
        prompt.push_str(&conversation.join("\n"));
        prompt.push_str("\n\n");
    }

    prompt.push_str(&format!("User: {user_message}\n\nAssistant:"));
    prompt
}

/// Full transcript as `ROLE: content` blocks separated by blank lines
pub fn format_transcript(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role.as_str().to_uppercase(), turn.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_evaluation_prompt(
    persona: &Persona,
    context: &SessionContext,
    turns: &[ChatTurn],
) -> String {
    format!(
        r#"{system}

Analyze this conversation and evaluate the user's performance.

Mode: {mode}
Context:
{context}

Conversation:
{transcript}

Provide a detailed evaluation with scores (0-10) for:
1. Technical Skills / Business Acumen (depending on mode)
2. Communication Clarity
3. Creativity and Problem Solving
4. Overall Performance

Also provide:
- 3 key strengths
- 3 areas for improvement
- A detailed feedback paragraph

Respond with JSON only, in this shape:
{{
    "technical_score": 0-10,
    "communication_score": 0-10,
    "creativity_score": 0-10,
    "business_sense_score": 0-10,
    "overall_score": 0-10,
    "strengths": ["strength1", "strength2", "strength3"],
    "improvements": ["improvement1", "improvement2", "improvement3"],
    "detailed_feedback": "paragraph of feedback"
}}"#,
        system = persona.system_block(),
        mode = context.mode,
        context = format_context(context),
        transcript = format_transcript(turns),
    )
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

pub fn build_scenario_prompt(context: &SessionContext) -> String {
    match context.mode {
        Mode::Education => format!(
            r#"Generate a realistic client feedback scenario for a student who built a {project}.

The scenario should:
1. Present a realistic problem or client concern
2. Be specific and detailed
3. Test the student's problem-solving and communication skills
4. Be appropriate for someone learning {subject}

Write only the scenario, in 2-3 sentences, from the client's perspective."#,
            project = or_default(&context.project_idea, "software project"),
            subject = or_default(&context.subject, "programming"),
        ),
        Mode::Business => format!(
            r#"Generate a tough investor question for someone pitching a {business_type} business in {location}.

The business idea: {idea}

The question should be challenging but fair and test:
1. Business understanding
2. Market knowledge
3. Financial planning
4. Strategic thinking

Write only the question, from the investor's perspective."#,
            business_type = or_default(&context.business_type, "business"),
            location = or_default(&context.location, "the area"),
            idea = or_default(&context.business_idea, "a new business venture"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use realworlded_core::{AgentType, Stage};

    fn mentor() -> Persona {
        Persona {
            agent_type: AgentType::Mentor,
            role: "AI Mentor".to_string(),
            goal: "Guide".to_string(),
            backstory: "Experienced".to_string(),
        }
    }

    #[test]
    fn test_title_case_keys() {
        assert_eq!(title_case("project_idea"), "Project Idea");
        assert_eq!(title_case("mode"), "Mode");
        assert_eq!(title_case("current_stage"), "Current Stage");
    }

    #[test]
    fn test_format_context_lines() {
        let mut context = SessionContext::new(Mode::Business);
        context.business_type = Some("food".to_string());
        context.location = Some("Nairobi".to_string());
        context.current_stage = Some(Stage::BusinessSelected);

        assert_eq!(
            format_context(&context),
            "- Mode: business\n- Business Type: food\n- Location: Nairobi\n- Current Stage: business_selected"
        );
    }

    #[test]
    fn test_history_window_keeps_last_ten() {
        let history: Vec<ChatTurn> = (0..14)
            .map(|i| {
                let role = if i % 2 == 0 { MessageRole::User } else { MessageRole::Mentor };
                ChatTurn::new(role, format!("m{i}"))
            })
            .collect();

        let lines = format_history(&history);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "User: m4");
        assert_eq!(lines[9], "Assistant: m13");
    }

    #[test]
    fn test_all_agent_roles_render_as_assistant() {
        let history = vec![
            ChatTurn::new(MessageRole::Client, "Why invest?"),
            ChatTurn::new(MessageRole::Evaluator, "Score: 8"),
        ];
        assert_eq!(
            format_history(&history),
            vec!["Assistant: Why invest?", "Assistant: Score: 8"]
        );
    }

    #[test]
    fn test_chat_prompt_layout() {
        let context = SessionContext::new(Mode::Education);
        let history = vec![
            ChatTurn::new(MessageRole::User, "Hi"),
            ChatTurn::new(MessageRole::Mentor, "Hello!"),
        ];

        let prompt = build_chat_prompt(&mentor(), &context, &history, "I like python");

        assert!(prompt.starts_with("You are AI Mentor.\nGoal: Guide\nBackstory: Experienced\n\nCurrent Context:\n- Mode: education\n"));
        assert!(prompt.ends_with("User: Hi\nAssistant: Hello!\n\nUser: I like python\n\nAssistant:"));
    }

    #[test]
    fn test_chat_prompt_without_history() {
        let prompt = build_chat_prompt(&mentor(), &SessionContext::new(Mode::Education), &[], "Hello");
        assert!(prompt.ends_with("learning goals.\n\nUser: Hello\n\nAssistant:"));
    }

    #[test]
    fn test_transcript_uppercases_roles() {
        let turns = vec![
            ChatTurn::new(MessageRole::User, "My pitch"),
            ChatTurn::new(MessageRole::Client, "Why now?"),
        ];
        assert_eq!(format_transcript(&turns), "USER: My pitch\n\nCLIENT: Why now?");
    }

    #[test]
    fn test_evaluation_prompt_mentions_mode_and_transcript() {
        let context = SessionContext::new(Mode::Business);
        let turns = vec![ChatTurn::new(MessageRole::User, "Tacos for offices")];
        let prompt = build_evaluation_prompt(&mentor(), &context, &turns);

        assert!(prompt.contains("Mode: business\n"));
        assert!(prompt.contains("Conversation:\nUSER: Tacos for offices\n"));
        assert!(prompt.contains("\"overall_score\": 0-10"));
    }

    #[test]
    fn test_scenario_prompt_defaults() {
        let education = build_scenario_prompt(&SessionContext::new(Mode::Education));
        assert!(education.contains("who built a software project."));
        assert!(education.contains("someone learning programming"));

        let mut context = SessionContext::new(Mode::Business);
        context.business_type = Some("retail".to_string());
        let business = build_scenario_prompt(&context);
        assert!(business.contains("pitching a retail business in the area."));
        assert!(business.contains("The business idea: a new business venture"));
    }
}
