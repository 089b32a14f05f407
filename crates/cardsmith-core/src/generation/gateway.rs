//! Generation gateway: the single entry point for remote generation calls.
//!
//! Wraps a [`BoxLlmProvider`] and adds what the provider does not know about:
//! - schema-constrained decoding of card payloads into [`Card`]s with fresh ids
//! - fence stripping of the assembled artifact
//! - a per-gateway call status with an at-most-one-in-flight guard

use std::sync::{Mutex, MutexGuard};

use cardsmith_types::card::{Card, CardDraft, CardId, PackDraft};
use cardsmith_types::config::ProviderSettings;
use cardsmith_types::error::GenerationError;
use cardsmith_types::generation::{Artifact, GenerationKind, GenerationStatus};
use cardsmith_types::llm::{CompletionRequest, Message, OutputConfig};
use schemars::JsonSchema;
use tracing::{debug, info, warn};

use super::assembler::{self, AssemblyRequest, PACK_SIZE};
use crate::llm::box_provider::BoxLlmProvider;

/// Model and token settings, split by call type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Model for pack draws and forging.
    pub card_model: String,
    /// Model for site assembly.
    pub site_model: String,
    pub card_max_tokens: u32,
    pub site_max_tokens: u32,
}

impl From<&ProviderSettings> for GenerationSettings {
    fn from(settings: &ProviderSettings) -> Self {
        Self {
            card_model: settings.card_model.clone(),
            site_model: settings.site_model.clone(),
            card_max_tokens: settings.card_max_tokens,
            site_max_tokens: settings.site_max_tokens,
        }
    }
}

enum Backend {
    Ready(BoxLlmProvider),
    Unconfigured(String),
}

pub struct GenerationGateway {
    backend: Backend,
    settings: GenerationSettings,
    status: Mutex<GenerationStatus>,
}

impl GenerationGateway {
    pub fn new(provider: BoxLlmProvider, settings: GenerationSettings) -> Self {
        Self {
            backend: Backend::Ready(provider),
            settings,
            status: Mutex::new(GenerationStatus::Idle),
        }
    }

    /// A gateway with no usable provider. Every call fails with
    /// [`GenerationError::Configuration`] carrying `reason`.
    pub fn unconfigured(reason: impl Into<String>, settings: GenerationSettings) -> Self {
        Self {
            backend: Backend::Unconfigured(reason.into()),
            settings,
            status: Mutex::new(GenerationStatus::Idle),
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    pub fn provider_name(&self) -> Option<&str> {
        match &self.backend {
            Backend::Ready(provider) => Some(provider.name()),
            Backend::Unconfigured(_) => None,
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn status(&self) -> GenerationStatus {
        *self.lock_status()
    }

    /// Return a finished call to `Idle`. Does nothing while a call is pending.
    pub fn acknowledge(&self) {
        let mut status = self.lock_status();
        if !status.is_pending() {
            *status = GenerationStatus::Idle;
        }
    }

    /// Draw a pack of new cards. Every card gets a locally minted id.
    pub async fn draw_pack(&self) -> Result<Vec<Card>, GenerationError> {
        let call = self.begin(GenerationKind::Pack)?;
        let result = self.run_draw_pack().await;
        call.finish(result.is_ok());
        result
    }

    /// Forge a single card from a description.
    pub async fn forge(&self, description: &str) -> Result<Card, GenerationError> {
        let call = self.begin(GenerationKind::Forge)?;
        let result = self.run_forge(description).await;
        call.finish(result.is_ok());
        result
    }

    /// Assemble a site from the active cards.
    pub async fn assemble(&self, request: &AssemblyRequest) -> Result<Artifact, GenerationError> {
        let call = self.begin(GenerationKind::Assemble)?;
        let result = self.run_assemble(request).await;
        call.finish(result.is_ok());
        result
    }

    async fn run_draw_pack(&self) -> Result<Vec<Card>, GenerationError> {
        let request = self.card_request(
            assembler::pack_instructions(),
            OutputConfig::json_schema("CardPack", strict_schema::<PackDraft>()?),
        );
        let content = self.complete(&request).await?;
        let drafts = decode_pack(&content)?;
        if drafts.len() != PACK_SIZE {
            warn!(
                expected = PACK_SIZE,
                received = drafts.len(),
                "pack size differs from request"
            );
        }
        let cards: Vec<Card> = drafts
            .into_iter()
            .map(|draft| draft.into_card(CardId::new()))
            .collect();
        info!(count = cards.len(), "drew card pack");
        Ok(cards)
    }

    async fn run_forge(&self, description: &str) -> Result<Card, GenerationError> {
        let request = self.card_request(
            assembler::forge_instructions(description),
            OutputConfig::json_schema("CardDraft", strict_schema::<CardDraft>()?),
        );
        let content = self.complete(&request).await?;
        let draft: CardDraft = decode_json(&content)?;
        let card = draft.into_card(CardId::new());
        info!(card = %card.id, category = %card.category, rarity = %card.rarity, "forged card");
        Ok(card)
    }

    async fn run_assemble(&self, request: &AssemblyRequest) -> Result<Artifact, GenerationError> {
        let completion = CompletionRequest {
            model: self.settings.site_model.clone(),
            messages: vec![Message::user(assembler::assembly_instructions(request))],
            system: None,
            max_tokens: self.settings.site_max_tokens,
            temperature: None,
            stop_sequences: None,
            output_config: None,
        };
        let content = self.complete(&completion).await?;
        let artifact = Artifact::new(strip_fences(&content));
        info!(
            components = request.components.len(),
            voices = request.voices.len(),
            iterating = request.previous_artifact.is_some(),
            bytes = artifact.len(),
            "assembled site"
        );
        Ok(artifact)
    }

    fn card_request(&self, instructions: String, output: OutputConfig) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.card_model.clone(),
            messages: vec![Message::user(instructions)],
            system: None,
            max_tokens: self.settings.card_max_tokens,
            temperature: None,
            stop_sequences: None,
            output_config: Some(output),
        }
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        let provider = match &self.backend {
            Backend::Ready(provider) => provider,
            Backend::Unconfigured(reason) => {
                return Err(GenerationError::Configuration(reason.clone()));
            }
        };
        let response = provider.complete(request).await?;
        debug!(
            provider = provider.name(),
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = %response.stop_reason,
            "generation call completed"
        );
        Ok(response.content)
    }

    fn begin(&self, kind: GenerationKind) -> Result<InFlight<'_>, GenerationError> {
        let mut status = self.lock_status();
        if status.is_pending() {
            warn!(%kind, "generation call refused: another call is pending");
            return Err(GenerationError::Busy);
        }
        *status = GenerationStatus::Pending;
        debug!(%kind, "generation call pending");
        Ok(InFlight {
            status: &self.status,
            kind,
            finished: false,
        })
    }

    fn lock_status(&self) -> MutexGuard<'_, GenerationStatus> {
        self.status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Marks the gateway `Pending` for its lifetime. Dropping it without calling
/// [`InFlight::finish`] (a cancelled call) records `Failed`.
struct InFlight<'a> {
    status: &'a Mutex<GenerationStatus>,
    kind: GenerationKind,
    finished: bool,
}

impl InFlight<'_> {
    fn finish(mut self, succeeded: bool) {
        let next = if succeeded {
            GenerationStatus::Succeeded
        } else {
            GenerationStatus::Failed
        };
        self.set(next);
        self.finished = true;
    }

    fn set(&self, next: GenerationStatus) {
        let mut status = self
            .status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *status = next;
        debug!(kind = %self.kind, status = %next, "generation call finished");
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.set(GenerationStatus::Failed);
        }
    }
}

/// Remove code-fence markers from a model reply.
///
/// If the reply contains a fenced block (an opening fence line, optionally
/// tagged, and a closing fence line), only its contents are kept, so prose
/// around the block is dropped. Otherwise a leading fence with its tag and a
/// trailing fence are removed, even when they share a line with the content.
/// Fences embedded mid-line inside the document are left alone.
pub fn strip_fences(text: &str) -> &str {
    if let Some(inner) = fenced_block(text) {
        return inner.trim();
    }

    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        let tag_len = rest.find(|c: char| !is_fence_tag_char(c)).unwrap_or(rest.len());
        body = &rest[tag_len..];
    }
    if let Some(stripped) = body.trim_end().strip_suffix("```") {
        body = stripped;
    }
    body.trim()
}

/// Contents of the first complete fenced block, if any.
fn fenced_block(text: &str) -> Option<&str> {
    let mut offset = 0;
    let mut start = None;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        match start {
            None => {
                let opens = trimmed
                    .strip_prefix("```")
                    .is_some_and(|tag| tag.chars().all(is_fence_tag_char));
                if opens {
                    start = Some(offset + line.len());
                }
            }
            Some(begin) if trimmed == "```" => return Some(&text[begin..offset]),
            Some(_) => {}
        }
        offset += line.len();
    }
    None
}

fn is_fence_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '_' | '.')
}

fn decode_json<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, GenerationError> {
    serde_json::from_str(strip_fences(content))
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))
}

/// Decode a pack payload: `{"cards": [...]}`, or a bare array of cards.
fn decode_pack(content: &str) -> Result<Vec<CardDraft>, GenerationError> {
    let value: serde_json::Value = decode_json(content)?;
    let drafts = if value.is_array() {
        serde_json::from_value::<Vec<CardDraft>>(value)
    } else {
        serde_json::from_value::<PackDraft>(value).map(|pack| pack.cards)
    }
    .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    if drafts.is_empty() {
        return Err(GenerationError::MalformedResponse(
            "pack contains no cards".to_string(),
        ));
    }
    Ok(drafts)
}

/// JSON schema for `T` with `additionalProperties: false` on every object.
pub fn strict_schema<T: JsonSchema>() -> Result<serde_json::Value, GenerationError> {
    let schema = schemars::schema_for!(T);
    let mut value = serde_json::to_value(schema).map_err(|e| {
        GenerationError::Configuration(format!("failed to build output schema: {e}"))
    })?;
    close_objects(&mut value);
    Ok(value)
}

fn close_objects(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if map.contains_key("properties") {
                map.insert(
                    "additionalProperties".to_string(),
                    serde_json::Value::Bool(false),
                );
            }
            for child in map.values_mut() {
                close_objects(child);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                close_objects(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::store::test_support::{card, draft};
    use crate::llm::provider::LlmProvider;
    use cardsmith_types::card::{Category, Rarity};
    use cardsmith_types::llm::{
        CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Scripted provider. Returns `reply` (or fails) after optionally waiting
    /// on `gate`.
    struct MockProvider {
        capabilities: ProviderCapabilities,
        reply: Result<String, fn() -> LlmError>,
        gate: Option<Arc<Notify>>,
        requests: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl MockProvider {
        fn replying(reply: impl Into<String>) -> Self {
            Self {
                capabilities: ProviderCapabilities {
                    structured_output: true,
                    max_context_tokens: 1_000_000,
                    max_output_tokens: 65_536,
                },
                reply: Ok(reply.into()),
                gate: None,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing(err: fn() -> LlmError) -> Self {
            let mut provider = Self::replying("");
            provider.reply = Err(err);
            provider
        }

        fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn capabilities(&self) -> &ProviderCapabilities {
            &self.capabilities
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match &self.reply {
                Ok(content) => Ok(CompletionResponse {
                    id: "mock-1".to_string(),
                    content: content.clone(),
                    model: request.model.clone(),
                    stop_reason: StopReason::EndTurn,
                    usage: Usage::default(),
                }),
                Err(make) => Err(make()),
            }
        }
    }

    fn settings() -> GenerationSettings {
        GenerationSettings {
            card_model: "card-model".to_string(),
            site_model: "site-model".to_string(),
            card_max_tokens: 1000,
            site_max_tokens: 2000,
        }
    }

    fn gateway(provider: MockProvider) -> GenerationGateway {
        GenerationGateway::new(BoxLlmProvider::new(provider), settings())
    }

    fn pack_json(count: usize) -> String {
        let drafts: Vec<CardDraft> = (0..count)
            .map(|i| draft(&format!("card{i}"), Category::Ui))
            .collect();
        serde_json::to_string(&PackDraft { cards: drafts }).unwrap()
    }

    #[tokio::test]
    async fn test_draw_pack_mints_fresh_ids() {
        let provider = MockProvider::replying(pack_json(5));
        let requests = provider.requests.clone();
        let gateway = gateway(provider);

        let cards = gateway.draw_pack().await.unwrap();
        assert_eq!(cards.len(), 5);
        let ids: std::collections::HashSet<_> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 5);
        assert_eq!(gateway.status(), GenerationStatus::Succeeded);

        let sent = requests.lock().unwrap();
        assert_eq!(sent[0].model, "card-model");
        assert_eq!(sent[0].max_tokens, 1000);
        let output = sent[0].output_config.as_ref().unwrap();
        assert_eq!(output.format.json_schema.name, "CardPack");
    }

    #[tokio::test]
    async fn test_draw_pack_discards_model_ids() {
        let mut value: serde_json::Value = serde_json::from_str(&pack_json(1)).unwrap();
        value["cards"][0]["id"] = serde_json::json!("model-chosen-id");
        let gateway = gateway(MockProvider::replying(value.to_string()));

        let cards = gateway.draw_pack().await.unwrap();
        assert_ne!(cards[0].id.to_string(), "model-chosen-id");
    }

    #[tokio::test]
    async fn test_draw_pack_accepts_bare_array() {
        let drafts = vec![draft("a", Category::Theme), draft("b", Category::Voice)];
        let gateway = gateway(MockProvider::replying(serde_json::to_string(&drafts).unwrap()));
        let cards = gateway.draw_pack().await.unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].category, Category::Voice);
    }

    #[tokio::test]
    async fn test_draw_pack_wrong_enum_is_malformed() {
        let json = pack_json(1).replace("\"UI\"", "\"Widget\"");
        let gateway = gateway(MockProvider::replying(json));
        let err = gateway.draw_pack().await.unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
        assert!(err.is_service_error());
        assert_eq!(gateway.status(), GenerationStatus::Failed);
    }

    #[tokio::test]
    async fn test_draw_pack_missing_field_is_malformed() {
        let json = r#"{"cards":[{"name":"x","category":"UI","rarity":"Rare"}]}"#;
        let gateway = gateway(MockProvider::replying(json));
        assert!(matches!(
            gateway.draw_pack().await,
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_draw_pack_not_json_is_malformed() {
        let gateway = gateway(MockProvider::replying("Sorry, I can't do that."));
        assert!(matches!(
            gateway.draw_pack().await,
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_draw_pack_empty_is_malformed() {
        let gateway = gateway(MockProvider::replying(r#"{"cards":[]}"#));
        assert!(matches!(
            gateway.draw_pack().await,
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_forge_decodes_single_card() {
        let mut forged = draft("pricing", Category::Ui);
        forged.rarity = Rarity::Legendary;
        let json = format!("```json\n{}\n```", serde_json::to_string(&forged).unwrap());
        let provider = MockProvider::replying(json);
        let requests = provider.requests.clone();
        let gateway = gateway(provider);

        let card = gateway.forge("a glowing pricing table").await.unwrap();
        assert_eq!(card.name, "pricing");
        assert_eq!(card.rarity, Rarity::Legendary);

        let sent = requests.lock().unwrap();
        assert!(sent[0].messages[0].content.contains("a glowing pricing table"));
        assert_eq!(
            sent[0].output_config.as_ref().unwrap().format.json_schema.name,
            "CardDraft"
        );
    }

    #[tokio::test]
    async fn test_assemble_strips_fences_and_uses_site_model() {
        let provider = MockProvider::replying("```html\n<!DOCTYPE html><html></html>\n```");
        let requests = provider.requests.clone();
        let gateway = gateway(provider);

        let request = AssemblyRequest::from_active("coffee", [&card("hero", Category::Ui)], None);
        let artifact = gateway.assemble(&request).await.unwrap();
        assert_eq!(artifact.as_str(), "<!DOCTYPE html><html></html>");

        let sent = requests.lock().unwrap();
        assert_eq!(sent[0].model, "site-model");
        assert_eq!(sent[0].max_tokens, 2000);
        assert!(sent[0].output_config.is_none());
        assert!(sent[0].messages[0].content.contains("<user_vision>\ncoffee"));
    }

    #[tokio::test]
    async fn test_service_failure_is_wrapped() {
        let gateway = gateway(MockProvider::failing(|| LlmError::RateLimited {
            retry_after_ms: Some(1000),
        }));
        let err = gateway.forge("anything").await.unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Service(LlmError::RateLimited { .. })
        ));
        assert_eq!(gateway.status(), GenerationStatus::Failed);

        gateway.acknowledge();
        assert_eq!(gateway.status(), GenerationStatus::Idle);
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_reports_configuration() {
        let gateway = GenerationGateway::unconfigured("GEMINI_API_KEY is not set", settings());
        assert!(!gateway.is_configured());
        assert!(gateway.provider_name().is_none());
        let err = gateway.draw_pack().await.unwrap_err();
        assert!(matches!(err, GenerationError::Configuration(_)));
        assert!(!err.is_service_error());
    }

    #[tokio::test]
    async fn test_second_call_while_pending_is_busy() {
        let gate = Arc::new(Notify::new());
        let provider = MockProvider::replying(pack_json(5)).gated(gate.clone());
        let requests = provider.requests.clone();
        let gateway = Arc::new(gateway(provider));

        let first = tokio::spawn({
            let gateway = gateway.clone();
            async move { gateway.draw_pack().await }
        });
        while gateway.status() != GenerationStatus::Pending {
            tokio::task::yield_now().await;
        }

        let second = gateway.forge("another").await;
        assert!(matches!(second, Err(GenerationError::Busy)));
        assert_eq!(gateway.status(), GenerationStatus::Pending);
        assert_eq!(requests.lock().unwrap().len(), 1);

        gate.notify_one();
        let cards = first.await.unwrap().unwrap();
        assert_eq!(cards.len(), 5);
        assert_eq!(gateway.status(), GenerationStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_cancelled_call_records_failed() {
        let gate = Arc::new(Notify::new());
        let gateway = gateway(MockProvider::replying(pack_json(5)).gated(gate));

        let outcome = tokio::time::timeout(Duration::from_millis(20), gateway.draw_pack()).await;
        assert!(outcome.is_err());
        assert_eq!(gateway.status(), GenerationStatus::Failed);

        gateway.acknowledge();
        assert_eq!(gateway.status(), GenerationStatus::Idle);
    }

    #[test]
    fn test_strip_fences() {
        assert_eq!(strip_fences("```html\n<p>x</p>\n```"), "<p>x</p>");
        assert_eq!(strip_fences("```\n<p>x</p>\n```\n"), "<p>x</p>");
        assert_eq!(strip_fences("  <p>x</p>  "), "<p>x</p>");
        assert_eq!(strip_fences("<p>x</p>\n```"), "<p>x</p>");
        let inner = "<pre>```rust\nfn main() {}\n```</pre>";
        assert_eq!(strip_fences(inner), inner);
    }

    #[test]
    fn test_strip_fences_drops_prose_around_block() {
        let reply = "Here is your site:\n```html\n<!DOCTYPE html><html></html>\n```";
        assert_eq!(strip_fences(reply), "<!DOCTYPE html><html></html>");

        let reply = "Sure!\n```html\n<html></html>\n```\nEnjoy the new layout.";
        assert_eq!(strip_fences(reply), "<html></html>");
    }

    #[test]
    fn test_strip_fences_without_newline_after_tag() {
        assert_eq!(
            strip_fences("```html<!DOCTYPE html><html></html>```"),
            "<!DOCTYPE html><html></html>"
        );
        assert_eq!(strip_fences("```html\n<p>x</p>```"), "<p>x</p>");
    }

    #[test]
    fn test_strict_schema_closes_objects() {
        let schema = strict_schema::<PackDraft>().unwrap();
        assert_eq!(schema["additionalProperties"], false);
        let text = schema.to_string();
        assert!(text.contains("\"UI\""));
        assert!(text.contains("\"Ancient\""));
        assert!(text.contains("\"html\""));
    }
}
