use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, IgnoredAny, MapAccess, Visitor},
};
use std::fmt;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    /// Decodes the first JSON value in `body`; anything after it is ignored.
    /// `null` is an empty request and keys match `message` in any case.
    pub fn from_body(body: &[u8]) -> serde_json::Result<Self> {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<Self>>();

        match values.next() {
            Some(value) => Ok(value?.unwrap_or_default()),
            None => Err(de::Error::custom("empty request body")),
        }
    }
}

impl<'de> Deserialize<'de> for ChatRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChatRequestVisitor;

        impl<'de> Visitor<'de> for ChatRequestVisitor {
            type Value = ChatRequest;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a chat request object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ChatRequest, A::Error> {
                let mut request = ChatRequest::default();

                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("message") {
                        // A null message leaves the previous value in place
                        if let Some(message) = map.next_value::<Option<String>>()? {
                            request.message = message;
                        }
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }

                Ok(request)
            }
        }

        deserializer.deserialize_map(ChatRequestVisitor)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub const INVALID_REQUEST: &'static str = "Invalid request";
    pub const SERVICE_UNAVAILABLE: &'static str = "AI service unavailable";

    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
