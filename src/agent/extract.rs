use serde_json::Value;

use super::error::{AgentError, Result};

const FENCE: &str = "```";

/// Answer unwrapped from an agent envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Text answer with code fences and surrounding prose removed.
    Text(String),
    /// The agent returned structured data directly in `result`.
    Structured(Value),
}

impl Payload {
    /// Canonical JSON value of the payload. Text payloads must parse as JSON.
    pub fn into_json(self) -> Result<Value> {
        match self {
            Payload::Structured(value) => Ok(value),
            Payload::Text(text) => serde_json::from_str(&text).map_err(|err| {
                AgentError::Extraction(format!(
                    "Failed to parse agent payload as JSON ({err}): {text}"
                ))
            }),
        }
    }
}

/// Envelope layout used by an agent's JSON output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// `{"result": ...}`
    Object,
    /// `[{...}, ..., {"result": ...}]`, only the last element counts.
    LastOfArray,
}

pub fn extract_payload(stdout: &str, shape: EnvelopeShape) -> Result<Payload> {
    let envelope: Value = serde_json::from_str(stdout).map_err(|err| AgentError::Envelope {
        detail: format!("Agent output is not a JSON envelope ({err})"),
        stdout: stdout.to_string(),
    })?;

    let result = match shape {
        EnvelopeShape::Object => envelope.get("result"),
        EnvelopeShape::LastOfArray => envelope
            .as_array()
            .and_then(|items| items.last())
            .and_then(|last| last.get("result")),
    };

    match result {
        None | Some(Value::Null) => Err(AgentError::missing_result(stdout)),
        Some(Value::String(text)) => Ok(Payload::Text(strip_code_fences(text).to_string())),
        Some(value @ Value::Object(_)) => Ok(Payload::Structured(value.clone())),
        Some(other) => Err(AgentError::Extraction(format!(
            "Unknown result type: {} ({other})",
            json_type_name(other)
        ))),
    }
}

/// Removes a Markdown code fence (and any prose before it) from an agent answer.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text;

    if let Some(start) = body.find(FENCE) {
        body = &body[start + FENCE.len()..];
        body = skip_language_tag(body);
    }

    let body = body.trim();
    let body = body.strip_prefix(FENCE).unwrap_or(body).trim_start();
    let body = match body.rfind(FENCE) {
        Some(end) => &body[..end],
        None => body,
    };
    body.trim()
}

fn skip_language_tag(body: &str) -> &str {
    let tag_len = body
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '+'))
        .unwrap_or(body.len());
    if tag_len == 0 {
        return body;
    }

    let (tag, rest) = body.split_at(tag_len);
    let ends_line = rest.is_empty() || rest.starts_with(char::is_whitespace);
    if ends_line || tag.eq_ignore_ascii_case("json") {
        rest
    } else {
        body
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claude_stdout(result: Value) -> String {
        json!({ "type": "result", "result": result }).to_string()
    }

    #[test]
    fn strips_json_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strips_plain_fences() {
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn drops_prose_before_fence() {
        let text = "Based on my analysis, here are the violations:\n\n```json\n{\"issues\": []}\n```";
        assert_eq!(strip_code_fences(text), "{\"issues\": []}");
    }

    #[test]
    fn drops_prose_after_closing_fence() {
        let text = "```json\n{\"issues\": []}\n```\nLet me know if you need more.";
        assert_eq!(strip_code_fences(text), "{\"issues\": []}");
    }

    #[test]
    fn keeps_fence_markers_inside_json_strings() {
        let result = json!(
            "Here you go:\n```json\n{\"issues\":[{\"description\":\"wrap the snippet in ```rust``` fences\"}]}\n```"
        );
        let payload = extract_payload(&claude_stdout(result), EnvelopeShape::Object).unwrap();

        assert_eq!(
            payload.into_json().unwrap(),
            json!({ "issues": [{ "description": "wrap the snippet in ```rust``` fences" }] })
        );
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  {\"issues\": []}\n"), "{\"issues\": []}");
    }

    #[test]
    fn keeps_inline_content_that_is_not_a_tag() {
        assert_eq!(strip_code_fences("```true```"), "true");
        assert_eq!(strip_code_fences("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn markdown_language_tag_is_dropped_for_text_answers() {
        let text = "```markdown\n# no-foo: uses foo\n```";
        assert_eq!(strip_code_fences(text), "# no-foo: uses foo");
    }

    #[test]
    fn every_wrapping_yields_the_same_value() {
        let expected = json!({ "issues": [] });
        let variants = [
            json!("{\"issues\":[]}"),
            json!("```json\n{\"issues\":[]}\n```"),
            json!("```\n{\"issues\":[]}\n```"),
            json!("Here are the results:\n\n```json\n{\"issues\":[]}\n```"),
            json!({ "issues": [] }),
        ];

        for result in variants {
            let payload = extract_payload(&claude_stdout(result.clone()), EnvelopeShape::Object)
                .unwrap_or_else(|err| panic!("extraction failed for {result}: {err}"));
            assert_eq!(payload.into_json().unwrap(), expected, "input: {result}");
        }
    }

    #[test]
    fn missing_result_is_an_envelope_error() {
        for (stdout, shape) in [
            ("{}", EnvelopeShape::Object),
            ("{\"result\": null}", EnvelopeShape::Object),
            ("[]", EnvelopeShape::LastOfArray),
            ("[{\"result\": \"{}\"}, {\"type\": \"done\"}]", EnvelopeShape::LastOfArray),
        ] {
            let err = extract_payload(stdout, shape).unwrap_err();
            assert!(matches!(err, AgentError::Envelope { .. }), "{stdout}");
            assert!(err.to_string().contains("missing 'result'"), "{err}");
            assert!(err.to_string().contains(stdout));
        }
    }

    #[test]
    fn non_json_stdout_is_an_envelope_error() {
        let err = extract_payload("I could not finish the task", EnvelopeShape::Object).unwrap_err();
        assert!(matches!(err, AgentError::Envelope { .. }));
    }

    #[test]
    fn last_array_element_wins_even_when_earlier_ones_are_malformed() {
        let stdout = json!([
            "not an object",
            { "result": 42 },
            { "type": "system" },
            { "type": "result", "result": "```json\n{\"confirmed\": false}\n```" }
        ])
        .to_string();

        let payload = extract_payload(&stdout, EnvelopeShape::LastOfArray).unwrap();
        assert_eq!(payload.into_json().unwrap(), json!({ "confirmed": false }));
    }

    #[test]
    fn unexpected_result_type_is_an_extraction_error() {
        let err = extract_payload(&claude_stdout(json!(7)), EnvelopeShape::Object).unwrap_err();
        assert!(matches!(err, AgentError::Extraction(_)));
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn unparsable_text_fails_only_when_json_is_requested() {
        let payload =
            extract_payload(&claude_stdout(json!("False positive.")), EnvelopeShape::Object).unwrap();
        assert_eq!(payload, Payload::Text("False positive.".to_string()));

        let err = payload.into_json().unwrap_err();
        assert!(matches!(err, AgentError::Extraction(_)));
    }
}
