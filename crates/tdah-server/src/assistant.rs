//! Gemini proxy: text generation plus the read-only SQL guard applied to
//! whatever statement the model proposes.

use serde_json::{Map, Value, json};
use tdah_config::AssistantConfig;
use thiserror::Error;

/// Reply the model gives when a question needs no data.
pub const NO_DATA_MARKER: &str = "unnecessary";

/// Keywords that disqualify a statement from running.
const FORBIDDEN_KEYWORDS: [&str; 17] = [
    "INSERT", "UPDATE", "DELETE", "DROP", "ALTER", "CREATE", "REPLACE", "UPSERT", "ATTACH",
    "DETACH", "PRAGMA", "VACUUM", "REINDEX", "TRUNCATE", "GRANT", "REVOKE", "LOAD_EXTENSION",
];

/// Tables the assistant may never read.
const PRIVATE_TABLES: [&str; 2] = ["PRINCIPALS", "TEACHER_STUDENT"];

/// Name prefixes reserved for SQLite internals (`sqlite_master`,
/// `pragma_table_info`, ...).
const INTERNAL_PREFIXES: [&str; 2] = ["SQLITE_", "PRAGMA_"];

fn is_forbidden_word(word: &str) -> bool {
    FORBIDDEN_KEYWORDS.contains(&word)
        || PRIVATE_TABLES.contains(&word)
        || INTERNAL_PREFIXES.iter().any(|p| word.starts_with(p))
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant is not configured")]
    NotConfigured,

    #[error("assistant upstream failure: {0}")]
    Upstream(String),
}

/// Thin client for the `generateContent` endpoint.
pub struct AssistantClient {
    http: reqwest::Client,
    config: AssistantConfig,
}

impl AssistantClient {
    #[must_use]
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Send one prompt and return the concatenated text of the first candidate.
    ///
    /// `model` overrides the configured model for this call.
    ///
    /// # Errors
    ///
    /// `NotConfigured` without an API key, `Upstream` for transport errors,
    /// non-success statuses, or replies without text.
    pub async fn generate(&self, model: Option<&str>, prompt: &str) -> Result<String, AssistantError> {
        if !self.is_configured() {
            return Err(AssistantError::NotConfigured);
        }
        let url = model.map_or_else(
            || self.config.generate_url(),
            |m| self.config.generate_url_for(m),
        );

        let response = self
            .http
            .post(&url)
            .header("X-goog-api-key", &self.config.api_key)
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .await
            .map_err(|e| AssistantError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Upstream(format!("status {status}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AssistantError::Upstream(e.to_string()))?;
        candidate_text(&body)
            .ok_or_else(|| AssistantError::Upstream("reply carried no text".to_string()))
    }
}

fn candidate_text(body: &Value) -> Option<String> {
    let parts = body
        .pointer("/candidates/0/content/parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    (!text.is_empty()).then_some(text)
}

/// Whether a model name is safe to place in the request path.
#[must_use]
pub fn is_valid_model_name(model: &str) -> bool {
    !model.is_empty()
        && model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Remove Markdown code fences (with an optional language tag) around a reply.
#[must_use]
pub fn strip_code_fences(reply: &str) -> String {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    // Drop the language tag line, if any.
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
        .to_string()
}

/// Whether `sql` is a single `SELECT`/`WITH` statement without write or DDL
/// keywords that names no table besides `students` and `exercises` (and its
/// own CTEs).
///
/// Identifiers are compared word by word after splitting on every
/// non-identifier character, so quoting or schema-qualifying a private table
/// (`"principals"`, `main.principals`) does not get past the check.
#[must_use]
pub fn is_read_only_query(sql: &str) -> bool {
    let statement = sql.trim();
    let statement = statement.strip_suffix(';').unwrap_or(statement).trim_end();
    if statement.is_empty() || statement.contains(';') {
        return false;
    }

    let mut words = statement
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_uppercase);

    match words.next().as_deref() {
        Some("SELECT" | "WITH") => {}
        _ => return false,
    }
    words.all(|w| !is_forbidden_word(&w))
}

/// Prompt asking for one read-only query, or the no-data marker.
#[must_use]
pub fn sql_prompt(question: &str, student_id: Option<i64>) -> String {
    let focus = student_id.map_or_else(String::new, |id| {
        format!("The question is about the student with id {id}.\n")
    });
    format!(
        "You translate questions about student exercise results into SQLite.\n\
         Tables:\n\
         students(id, email, name, surname, gender, course)\n\
         exercises(id, student_id, correct_count, error_count, correct_letters, \
         start_time, end_time, difficulty, exercise_type)\n\
         {focus}\
         Reply with exactly one SELECT statement and nothing else. \
         If no data is needed, reply with the single word {NO_DATA_MARKER}.\n\
         Question: {question}"
    )
}

/// Prompt asking for the final answer, with the rows if any were fetched.
#[must_use]
pub fn answer_prompt(question: &str, rows: Option<&[Map<String, Value>]>) -> String {
    match rows {
        Some(rows) => format!(
            "Answer the question using this data (JSON rows).\n\
             Data: {}\n\
             Question: {question}",
            Value::from(rows.iter().cloned().map(Value::Object).collect::<Vec<_>>())
        ),
        None => format!("Answer the question.\nQuestion: {question}"),
    }
}
