use crate::config::Config;
use crate::error::ProviderError;
use crate::traits::{ChatMessage, ChatRequest, ChatResponse, Provider, ToolCall, ToolSpec};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessage<'a>>,
    tools: Vec<OpenAITool<'a>>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage<'a> {
    role: &'static str,
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAIToolCallRequest<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct OpenAIToolCallRequest<'a> {
    id: &'a str,
    r#type: &'static str,
    function: OpenAIFunctionRequest<'a>,
}

#[derive(Debug, Serialize)]
struct OpenAIFunctionRequest<'a> {
    name: &'a str,
    arguments: &'a str,
}

#[derive(Debug, Serialize)]
struct OpenAITool<'a> {
    r#type: &'static str,
    function: OpenAIToolFunction<'a>,
}

#[derive(Debug, Serialize)]
struct OpenAIToolFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIToolCall {
    id: String,
    function: OpenAIFunction,
}

#[derive(Debug, Deserialize)]
struct OpenAIFunction {
    name: String,
    arguments: String,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAIProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAIProvider {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: Config::default().model,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone(), config.api_token.clone()).with_model(config.model.clone())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn convert_messages<'a>(&self, messages: &'a [ChatMessage]) -> Vec<OpenAIMessage<'a>> {
        messages
            .iter()
            .map(|m| {
                let tool_calls = m.tool_calls.as_ref().map(|tool_calls| {
                    tool_calls
                        .iter()
                        .map(|tc| OpenAIToolCallRequest {
                            id: &tc.id,
                            r#type: "function",
                            function: OpenAIFunctionRequest {
                                name: &tc.name,
                                arguments: &tc.arguments,
                            },
                        })
                        .collect()
                });

                OpenAIMessage {
                    role: m.role.as_str(),
                    content: m.content.as_deref(),
                    tool_calls,
                    tool_call_id: m.tool_call_id.as_deref(),
                }
            })
            .collect()
    }

    fn convert_tools<'a>(&self, tools: &'a [ToolSpec]) -> Vec<OpenAITool<'a>> {
        tools
            .iter()
            .map(|t| OpenAITool {
                r#type: "function",
                function: OpenAIToolFunction {
                    name: &t.name,
                    description: &t.description,
                    parameters: &t.parameters,
                },
            })
            .collect()
    }
}

#[async_trait]
impl Provider for OpenAIProvider {
    async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatResponse, ProviderError> {
        let openai_request = OpenAIRequest {
            model: &self.model,
            messages: self.convert_messages(request.messages),
            tools: self.convert_tools(request.tools),
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let openai_response: OpenAIResponse = serde_json::from_slice(&bytes)?;

        let Some(choice) = openai_response.choices.into_iter().next() else {
            return Ok(ChatResponse::default());
        };

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|c| ToolCall {
                id: c.id,
                name: c.function.name,
                arguments: c.function.arguments,
            })
            .collect();

        Ok(ChatResponse {
            text: choice.message.content,
            tool_calls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tool_schemas;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OpenAIProvider {
        OpenAIProvider::new(format!("{}/v1/chat/completions", server.uri()), "sk-test")
            .with_model("test-model")
    }

    #[tokio::test]
    async fn sends_model_messages_and_tools() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "messages": [{ "role": "user", "content": "hi" }],
                "tools": [
                    { "type": "function", "function": { "name": "load_skill" } },
                    { "type": "function", "function": { "name": "read_skill_file" } }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "Hello!" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let messages = [ChatMessage::user("hi")];
        let tools = tool_schemas();
        let response = provider(&server)
            .chat(ChatRequest {
                messages: &messages,
                tools: &tools,
            })
            .await
            .unwrap();

        assert_eq!(response.final_text(), Some("Hello!"));
        assert!(!response.has_tool_calls());
    }

    #[tokio::test]
    async fn parses_tool_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": "load_skill", "arguments": "{\"name\":\"greeter\"}" }
                    }]
                } }]
            })))
            .mount(&server)
            .await;

        let messages = [ChatMessage::user("hi")];
        let response = provider(&server)
            .chat(ChatRequest {
                messages: &messages,
                tools: &[],
            })
            .await
            .unwrap();

        assert_eq!(
            response.tool_calls,
            vec![ToolCall {
                id: "call_1".into(),
                name: "load_skill".into(),
                arguments: "{\"name\":\"greeter\"}".into(),
            }]
        );
        assert_eq!(response.text, None);
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .expect(1)
            .mount(&server)
            .await;

        let messages = [ChatMessage::user("hi")];
        let err = provider(&server)
            .chat(ChatRequest {
                messages: &messages,
                tools: &[],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Status { status: 429, ref body } if body == "slow down"));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let messages = [ChatMessage::user("hi")];
        let err = provider(&server)
            .chat(ChatRequest {
                messages: &messages,
                tools: &[],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn empty_choices_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let messages = [ChatMessage::user("hi")];
        let response = provider(&server)
            .chat(ChatRequest {
                messages: &messages,
                tools: &[],
            })
            .await
            .unwrap();

        assert!(response.final_text().is_none());
        assert!(!response.has_tool_calls());
    }
}
