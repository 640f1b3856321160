// Client records - the entity served by the GraphQL API

use serde::{Deserialize, Serialize};

/// Opaque client identifier
///
/// Identifiers are assigned when the data is authored and are compared by
/// exact string equality. No normalisation (trimming, case folding) is applied.
///
/// ```rust
/// # use clientbook::ClientId;
/// let id = ClientId::from("2");
/// assert_eq!(id.as_str(), "2");
/// assert_ne!(id, ClientId::from(" 2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn new<S: Into<String>>(id: S) -> Self {
        ClientId(id.into())
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        ClientId(s.to_string())
    }
}

impl From<String> for ClientId {
    fn from(s: String) -> Self {
        ClientId(s)
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A client record
///
/// `name`, `email` and `phone` are free text: nothing validates their format
/// or uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Client {
    pub fn new(
        id: impl Into<ClientId>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Exact identifier match, the only lookup rule the API supports
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_str() == id
    }
}
