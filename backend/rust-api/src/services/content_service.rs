use anyhow::{anyhow, bail, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::metrics::{record_generation, CONTENT_GENERATION_DURATION_SECONDS};
use crate::models::{
    lesson::{ContentOrigin, DoubtAnswer, Generated, LessonContent, LessonPlanRequest},
    quiz::{Question, QuizContent, DEFAULT_PASSING_SCORE},
};
use crate::services::demo_content;

const LESSON_MAX_TOKENS: u32 = 4000;
const QUIZ_MAX_TOKENS: u32 = 3000;
const DOUBT_MAX_TOKENS: u32 = 1500;
const TEMPERATURE: f32 = 0.7;

/// Placeholder key the client ships with when no real key is configured.
const PLACEHOLDER_KEY: &str = "demo-key";

lazy_static! {
    static ref CODE_FENCE: Regex =
        Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$").expect("valid fence pattern");
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Completion-API adapter. Every operation yields content; the origin says how real it is.
pub struct ContentGenerator {
    http: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl ContentGenerator {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.completion_timeout_seconds))
            .build()
            .context("Failed to build completion HTTP client")?;

        Ok(Self {
            http,
            api_url: config.completion_api_url.clone(),
            api_key: config
                .completion_api_key
                .clone()
                .filter(|key| key != PLACEHOLDER_KEY),
            model: config.completion_model.clone(),
        })
    }

    pub fn is_demo(&self) -> bool {
        self.api_key.is_none()
    }

    pub async fn generate_lesson(&self, request: &LessonPlanRequest) -> Generated<LessonContent> {
        let prompt = format!(
            "Create comprehensive study notes for {grade} students on \"{topic}\" in {subject}.\n\n\
             Include:\n\
             1. Learning objectives (5 specific, measurable goals)\n\
             2. Detailed lesson structure with time allocations for a {duration}-minute lesson\n\
             3. Interactive activities suitable for the grade level\n\
             4. 5 amazing facts about {topic} that will wow students\n\
             5. 3 educational jokes related to {topic}\n\
             6. 3 inspiring quotes about learning or {topic}\n\
             7. Complete study notes with key concepts, examples, and explanations\n\
             8. Homework assignments\n\
             9. Real-world applications and examples\n\
             10. Study tips and memory aids\n\n\
             Make it engaging, age-appropriate, and educational. Respond with a single JSON object \
             with the keys learningObjectives, lessonStructure (section, duration, activities), \
             activities (name, description, materials, duration), homework, amazingFacts, jokes, \
             quotes and notes (Markdown).",
            grade = request.grade,
            topic = request.topic,
            subject = request.subject,
            duration = request.duration,
        );

        let outcome = self
            .run(
                "lesson",
                "You are an expert educator creating engaging, comprehensive study materials.",
                &prompt,
                LESSON_MAX_TOKENS,
                |text| parse_lesson(text),
            )
            .await;

        finish("lesson", outcome, || demo_content::lesson(&request.topic))
    }

    pub async fn generate_quiz(&self, topic: &str, grade: &str) -> Generated<QuizContent> {
        let prompt = format!(
            "Create exactly 10 multiple choice questions about \"{topic}\" for {grade} students.\n\n\
             Requirements:\n\
             - Exactly 10 MCQs, no more, no less\n\
             - Each question has 4 options (A, B, C, D)\n\
             - Questions should be age-appropriate for {grade}\n\
             - Include a mix of difficulty levels\n\
             - Each correct answer = 1 mark, wrong answer = 0 marks\n\
             - Add explanations for correct answers\n\
             - Make questions engaging and educational\n\
             - Cover different aspects of the topic\n\n\
             Format as JSON with array of questions, each having: question, options, correctAnswer, explanation"
        );

        let outcome = self
            .run(
                "quiz",
                "You are an expert educator creating engaging quizzes for students.",
                &prompt,
                QUIZ_MAX_TOKENS,
                |text| parse_quiz(text),
            )
            .await;

        finish("quiz", outcome, || demo_content::quiz(topic, grade))
    }

    pub async fn resolve_doubt(&self, question: &str) -> Generated<DoubtAnswer> {
        let prompt = format!(
            "Answer this student's doubt clearly and comprehensively: \"{question}\"\n\n\
             Provide:\n\
             1. A clear, easy-to-understand explanation\n\
             2. Real-world examples if applicable\n\
             3. Study tips to remember the concept\n\
             4. Related topics they might want to explore\n\
             5. Encouragement to keep learning\n\n\
             Make it engaging and educational for students."
        );

        let outcome = self
            .run(
                "doubt",
                "You are a helpful tutor who explains concepts clearly to students of all levels.",
                &prompt,
                DOUBT_MAX_TOKENS,
                |text| {
                    let (related_topics, study_tips) = demo_content::live_doubt_extras();
                    Ok(DoubtAnswer {
                        answer: text.trim().to_string(),
                        related_topics,
                        study_tips,
                    })
                },
            )
            .await;

        finish("doubt", outcome, || demo_content::doubt(question))
    }

    /// `Ok(None)` in demo mode; `Err` carries the degradation reason.
    async fn run<T>(
        &self,
        kind: &str,
        system: &str,
        prompt: &str,
        max_tokens: u32,
        parse: impl FnOnce(&str) -> Result<T>,
    ) -> Result<Option<T>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(None);
        };

        let start = Instant::now();
        let text = self.complete(api_key, system, prompt, max_tokens).await;
        CONTENT_GENERATION_DURATION_SECONDS
            .with_label_values(&[kind])
            .observe(start.elapsed().as_secs_f64());

        parse(&text?).map(Some)
    }

    async fn complete(
        &self,
        api_key: &str,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to call completion API")?;

        if !response.status().is_success() {
            bail!("Completion API returned status: {}", response.status());
        }

        let reply: ChatResponse = response
            .json()
            .await
            .context("Invalid completion API response")?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| anyhow!("Completion API returned no content"))
    }
}

fn finish<T>(
    kind: &str,
    outcome: Result<Option<T>>,
    fallback: impl FnOnce() -> T,
) -> Generated<T> {
    let generated = match outcome {
        Ok(Some(content)) => Generated {
            content,
            origin: ContentOrigin::Live,
        },
        Ok(None) => Generated {
            content: fallback(),
            origin: ContentOrigin::Demo,
        },
        Err(e) => {
            let reason = format!("{:#}", e);
            tracing::warn!("Content generation ({}) degraded to demo payload: {}", kind, reason);
            Generated {
                content: fallback(),
                origin: ContentOrigin::Degraded { reason },
            }
        }
    };
    record_generation(kind, generated.origin.label());
    generated
}

/// Strip an optional Markdown code fence, then trim to the outermost JSON object or array.
pub fn extract_json(text: &str) -> &str {
    let unfenced = CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str());

    let Some(start) = unfenced.find(['{', '[']) else {
        return unfenced.trim();
    };
    let closer = if unfenced[start..].starts_with('{') {
        '}'
    } else {
        ']'
    };
    match unfenced.rfind(closer) {
        Some(end) if end > start => &unfenced[start..=end],
        _ => unfenced.trim(),
    }
}

pub fn parse_lesson(text: &str) -> Result<LessonContent> {
    serde_json::from_str(extract_json(text)).context("Lesson reply is not valid lesson JSON")
}

/// Accepts a bare question array or an object holding `multipleChoice` or `questions`.
pub fn parse_quiz(text: &str) -> Result<QuizContent> {
    let value: serde_json::Value =
        serde_json::from_str(extract_json(text)).context("Quiz reply is not valid JSON")?;

    let (raw_questions, passing_score, time_limit) = match &value {
        serde_json::Value::Array(items) => (items.clone(), None, None),
        serde_json::Value::Object(map) => {
            let items = map
                .get("multipleChoice")
                .or_else(|| map.get("questions"))
                .and_then(|v| v.as_array())
                .cloned()
                .ok_or_else(|| anyhow!("Quiz reply has no question list"))?;
            (
                items,
                map.get("passingScore").and_then(|v| v.as_u64()),
                map.get("timeLimit").and_then(|v| v.as_u64()),
            )
        }
        _ => bail!("Quiz reply is neither an array nor an object"),
    };

    let mut questions = Vec::with_capacity(raw_questions.len());
    for (index, raw) in raw_questions.into_iter().enumerate() {
        match serde_json::from_value::<Question>(raw) {
            Ok(question) if question.is_well_formed() => questions.push(question),
            Ok(_) => tracing::warn!("Dropping quiz question {}: needs 4 options including the answer", index),
            Err(e) => tracing::warn!("Dropping quiz question {}: {}", index, e),
        }
    }

    if questions.is_empty() {
        bail!("Quiz reply contained no usable questions");
    }

    let total = questions.len();
    Ok(QuizContent {
        total_questions: total,
        passing_score: passing_score
            .map(|p| p as usize)
            .unwrap_or(DEFAULT_PASSING_SCORE)
            .min(total),
        time_limit: time_limit
            .map(|t| t as u32)
            .unwrap_or(demo_content::DEMO_QUIZ_TIME_LIMIT),
        multiple_choice: questions,
    })
}
