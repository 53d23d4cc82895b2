//! CRM credentials, tokens and item payloads.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::model::lead::{LeadInput, BIRTH_DATE_FORMAT};

/// Cultural fit stage every new lead starts in
pub const INITIAL_FIT_STAGE: i64 = 3;
/// Workflow status meaning the cultural fit survey was sent
pub const FIT_SENT_STATUS: i64 = 203;

/// App credentials of one CRM workspace
#[derive(Clone)]
pub struct CrmWorkspace {
    /// Key the workspace token and metadata are cached under
    pub cache_key: String,
    pub client_id: String,
    pub client_secret: String,
    pub app_id: i64,
    pub app_token: String,
}

impl std::fmt::Debug for CrmWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmWorkspace")
            .field("cache_key", &self.cache_key)
            .field("client_id", &self.client_id)
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}

/// Access token granted by the CRM app authentication flow
#[derive(Debug, Clone, Deserialize)]
pub struct CrmToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Item field values keyed by the CRM field slug
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrmFields {
    fields: Map<String, Value>,
}

impl CrmFields {
    /// Maps a validated application onto the selection process app fields
    pub fn from_lead(input: &LeadInput) -> Self {
        let mut fields = Map::new();

        fields.insert("titulo".to_string(), json!(input.name));
        fields.insert(
            "data-de-nascimento".to_string(),
            json!(input.birth_date.format(BIRTH_DATE_FORMAT).to_string()),
        );
        fields.insert(
            "email".to_string(),
            Value::Array(
                input
                    .emails
                    .iter()
                    .map(|email| json!({ "type": email.kind, "value": email.address }))
                    .collect(),
            ),
        );
        fields.insert(
            "telefone".to_string(),
            Value::Array(
                input
                    .phones
                    .iter()
                    .map(|phone| json!({ "type": phone.kind, "value": phone.number }))
                    .collect(),
            ),
        );
        fields.insert(
            "autorizo-receber-informacoes-sobre-os-projetos-de-inter".to_string(),
            json!(input.authorization_id),
        );
        fields.insert(
            "aiesec-mais-proxima-digite-primeira-letra-para-filtrar".to_string(),
            json!(input.committee.id),
        );
        fields.insert("tem-fit-cultural".to_string(), json!(INITIAL_FIT_STAGE));

        Self { fields }
    }

    /// Payload moving an item to another workflow status
    pub fn stage(status: i64) -> Self {
        let mut fields = Map::new();
        fields.insert("status".to_string(), json!(status));

        Self { fields }
    }

    pub fn get(&self, slug: &str) -> Option<&Value> {
        self.fields.get(slug)
    }

    /// Request body expected by the CRM item endpoints
    pub fn envelope(&self) -> Value {
        json!({ "fields": self.fields })
    }
}

/// Extracts the durable item id from a CRM item response
pub fn item_id(item: &Value) -> Option<i64> {
    item.get("item_id").and_then(Value::as_i64)
}

/// Extracts the app scoped item id from a CRM item response
pub fn app_item_id(item: &Value) -> Option<i64> {
    item.get("app_item_id").and_then(Value::as_i64)
}
