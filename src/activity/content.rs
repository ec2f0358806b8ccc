use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use thiserror::Error;

use super::{fetch::RequestError, params::Mode};

/// Option letter of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Letter {
    A,
    B,
    C,
    D,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not one of A, B, C, D")]
pub struct ParseLetterError(String);

impl Letter {
    pub const ALL: [Letter; 4] = [Letter::A, Letter::B, Letter::C, Letter::D];

    pub fn as_str(self) -> &'static str {
        match self {
            Letter::A => "A",
            Letter::B => "B",
            Letter::C => "C",
            Letter::D => "D",
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Letter {
    type Err = ParseLetterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Letter::A),
            "B" => Ok(Letter::B),
            "C" => Ok(Letter::C),
            "D" => Ok(Letter::D),
            _ => Err(ParseLetterError(s.to_string())),
        }
    }
}

impl Serialize for Letter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Letter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Reads the options object, refusing keys that name the same letter twice
/// (`"A"` next to `"a"`, or a repeated `"A"`) instead of keeping the last one.
fn deserialize_options<'de, D>(deserializer: D) -> Result<BTreeMap<Letter, String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionsVisitor;

    impl<'de> Visitor<'de> for OptionsVisitor {
        type Value = BTreeMap<Letter, String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object keyed by the letters A, B, C, D")
        }

        fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
            let mut options = BTreeMap::new();
            while let Some((key, text)) = map.next_entry::<String, String>()? {
                let letter: Letter = key.parse().map_err(de::Error::custom)?;
                if options.insert(letter, text).is_some() {
                    return Err(de::Error::custom(format!(
                        "option {} is given more than once",
                        letter
                    )));
                }
            }
            Ok(options)
        }
    }

    deserializer.deserialize_map(OptionsVisitor)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub word: String,

    /// meaning in the learner's language
    pub meaning: String,

    /// example sentence in English
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    #[serde(deserialize_with = "deserialize_options")]
    pub options: BTreeMap<Letter, String>,
    pub correct_answer: Letter,
    pub explanation: String,
}

impl QuizQuestion {
    pub fn option(&self, letter: Letter) -> Option<&str> {
        self.options.get(&letter).map(String::as_str)
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.option(self.correct_answer)
    }
}

/// Parsed items of one generation request. Never mixes item kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBatch {
    Vocabulary(Vec<VocabularyItem>),
    Exercises(Vec<QuizQuestion>),
}

impl ContentBatch {
    /// Parses the text payload returned by the service and checks every item
    /// has the shape `mode` asked for.
    pub fn parse(mode: Mode, raw: &str) -> Result<Self, RequestError> {
        let batch = match mode {
            Mode::Vocabulary => ContentBatch::Vocabulary(decode(raw)?),
            Mode::Exercises => ContentBatch::Exercises(decode(raw)?),
        };
        batch.validate()?;
        Ok(batch)
    }

    pub fn mode(&self) -> Mode {
        match self {
            ContentBatch::Vocabulary(_) => Mode::Vocabulary,
            ContentBatch::Exercises(_) => Mode::Exercises,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ContentBatch::Vocabulary(items) => items.len(),
            ContentBatch::Exercises(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self) -> Result<(), RequestError> {
        let expected = self.mode().expected_len();
        if self.len() != expected {
            return Err(RequestError::MalformedContent(format!(
                "expected {} {} items, got {}",
                expected,
                self.mode(),
                self.len()
            )));
        }

        match self {
            ContentBatch::Vocabulary(items) => items
                .iter()
                .enumerate()
                .try_for_each(|(index, item)| validate_vocabulary(index, item)),
            ContentBatch::Exercises(items) => items
                .iter()
                .enumerate()
                .try_for_each(|(index, item)| validate_question(index, item)),
        }
    }
}

fn decode<T>(raw: &str) -> Result<Vec<T>, RequestError>
where
    T: de::DeserializeOwned,
{
    serde_json::from_str(raw).map_err(|e| RequestError::MalformedContent(e.to_string()))
}

fn require_text(index: usize, field: &str, value: &str) -> Result<(), RequestError> {
    if value.trim().is_empty() {
        return Err(RequestError::MalformedContent(format!(
            "item {} has an empty '{}'",
            index, field
        )));
    }
    Ok(())
}

fn validate_vocabulary(index: usize, item: &VocabularyItem) -> Result<(), RequestError> {
    require_text(index, "word", &item.word)?;
    require_text(index, "meaning", &item.meaning)?;
    require_text(index, "example", &item.example)
}

fn validate_question(index: usize, item: &QuizQuestion) -> Result<(), RequestError> {
    require_text(index, "question", &item.question)?;
    require_text(index, "explanation", &item.explanation)?;

    for letter in Letter::ALL {
        let text = item.option(letter).ok_or_else(|| {
            RequestError::MalformedContent(format!("item {} has no option {}", index, letter))
        })?;
        require_text(index, letter.as_str(), text)?;
    }

    if item.correct_option().is_none() {
        return Err(RequestError::MalformedContent(format!(
            "item {} has answer {} outside its options",
            index, item.correct_answer
        )));
    }

    Ok(())
}
