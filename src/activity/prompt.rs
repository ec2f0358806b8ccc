use serde_json::{json, Value};

use super::params::{Mode, Register, RequestParameters};

/// Language meanings and explanations are written in.
const MEANING_LANGUAGE: &str = "Indonesian";

/// Natural-language instruction for one request.
pub fn build_prompt(params: &RequestParameters) -> String {
    let level = params.effective_level();
    let category = params.category.as_str();

    match params.mode {
        Mode::Vocabulary => format!(
            "Generate a list of {} English vocabulary words for {} {} learners. For each word, provide its meaning in {} and an example sentence in English.",
            Mode::Vocabulary.expected_len(),
            level,
            category,
            MEANING_LANGUAGE
        ),
        Mode::Exercises => {
            let count = Mode::Exercises.expected_len();
            let topic = match params.register() {
                Some(Register::Idioms) => Some("understanding and using English idioms"),
                Some(Register::Slang) => Some("understanding and using English slang terms"),
                Some(Register::Hood) => {
                    Some("understanding and using English 'hood' language terms or expressions")
                }
                None => None,
            };

            match topic {
                Some(topic) => format!(
                    "Create {} multiple-choice questions for {} English learners specifically about {}. Provide 4 options (A, B, C, D), the correct answer (A, B, C, or D), and a brief explanation in {}.",
                    count, level, topic, MEANING_LANGUAGE
                ),
                None => format!(
                    "Create {} multiple-choice questions for {} {} English learners. Each question should test vocabulary or grammar related to {}. Provide 4 options (A, B, C, D) and indicate the correct answer (A, B, C, or D) and a brief explanation in {}.",
                    count, level, category, category, MEANING_LANGUAGE
                ),
            }
        }
    }
}

/// Structured-output schema the service must answer with.
pub fn response_schema(mode: Mode) -> Value {
    let item = match mode {
        Mode::Vocabulary => json!({
            "type": "OBJECT",
            "properties": {
                "word": { "type": "STRING", "description": "The vocabulary word." },
                "meaning": {
                    "type": "STRING",
                    "description": format!("The meaning of the word in {}.", MEANING_LANGUAGE)
                },
                "example": {
                    "type": "STRING",
                    "description": "An example sentence using the word."
                }
            },
            "required": ["word", "meaning", "example"]
        }),
        Mode::Exercises => json!({
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING", "description": "The question text." },
                "options": {
                    "type": "OBJECT",
                    "properties": {
                        "A": { "type": "STRING" },
                        "B": { "type": "STRING" },
                        "C": { "type": "STRING" },
                        "D": { "type": "STRING" }
                    },
                    "required": ["A", "B", "C", "D"]
                },
                "correctAnswer": {
                    "type": "STRING",
                    "description": "The letter of the correct option (e.g., 'A', 'B')."
                },
                "explanation": {
                    "type": "STRING",
                    "description": format!(
                        "A brief explanation for the answer in {}.",
                        MEANING_LANGUAGE
                    )
                }
            },
            "required": ["question", "options", "correctAnswer", "explanation"]
        }),
    };

    json!({ "type": "ARRAY", "items": item })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(category: &str, level: &str, mode: Mode) -> RequestParameters {
        RequestParameters::new(category, level, mode).unwrap()
    }

    #[test]
    fn vocabulary_prompt_asks_for_five_words() {
        let prompt = build_prompt(&params("casual", "beginner", Mode::Vocabulary));
        assert!(prompt.contains("5 English vocabulary words for beginner casual learners"));
        assert!(prompt.contains("meaning in Indonesian"));
    }

    #[test]
    fn informal_vocabulary_prompt_uses_advanced() {
        let prompt = build_prompt(&params("Slang", "general", Mode::Vocabulary));
        assert!(prompt.contains("for advanced Slang learners"));
        assert!(!prompt.contains("general"));
    }

    #[test]
    fn exercise_prompts_are_specialised_per_register() {
        let idioms = build_prompt(&params("idioms", "beginner", Mode::Exercises));
        assert!(idioms.contains("3 multiple-choice questions for advanced English learners"));
        assert!(idioms.contains("English idioms"));

        let slang = build_prompt(&params("slang", "general", Mode::Exercises));
        assert!(slang.contains("English slang terms"));

        let hood = build_prompt(&params("HOOD", "general", Mode::Exercises));
        assert!(hood.contains("'hood' language"));

        let casual = build_prompt(&params("casual", "business", Mode::Exercises));
        assert!(casual.contains("for business casual English learners"));
        assert!(casual.contains("vocabulary or grammar related to casual"));
    }

    #[test]
    fn every_exercise_prompt_requires_lettered_options_and_explanation() {
        for category in ["idioms", "slang", "hood", "casual"] {
            let prompt = build_prompt(&params(category, "intermediate", Mode::Exercises));
            assert!(prompt.contains("4 options (A, B, C, D)"), "{category}");
            assert!(prompt.contains("correct answer (A, B, C, or D)"), "{category}");
            assert!(prompt.contains("explanation in Indonesian"), "{category}");
        }
    }

    #[test]
    fn schemas_require_every_item_field() {
        let vocabulary = response_schema(Mode::Vocabulary);
        assert_eq!(vocabulary["type"], "ARRAY");
        assert_eq!(
            vocabulary["items"]["required"],
            json!(["word", "meaning", "example"])
        );

        let exercises = response_schema(Mode::Exercises);
        assert_eq!(
            exercises["items"]["required"],
            json!(["question", "options", "correctAnswer", "explanation"])
        );
        assert_eq!(
            exercises["items"]["properties"]["options"]["required"],
            json!(["A", "B", "C", "D"])
        );
    }
}
