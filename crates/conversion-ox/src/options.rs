use bon::Builder;

/// How ids are made up for function calls that arrive without one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackIdStrategy {
    /// `call_<unix millis>`. Calls converted within the same millisecond collide.
    #[default]
    Timestamp,
    /// `call_<n>`, counting from 0 within one conversion.
    Counter,
    /// `call_<uuid v4>`
    Uuid,
}

/// Knobs for request conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder)]
pub struct RequestOptions {
    /// Reject turns whose role is neither `user` nor `model` instead of dropping them.
    #[builder(default)]
    pub strict_roles: bool,
    /// How ids are generated for model-turn calls that carry none.
    #[builder(default)]
    pub fallback_ids: FallbackIdStrategy,
}

/// Hands out fallback call ids for a single conversion.
#[derive(Debug)]
pub(crate) struct IdGenerator {
    /// Id format
    strategy: FallbackIdStrategy,
    /// Ids handed out so far
    issued: usize,
}

impl IdGenerator {
    pub(crate) fn new(strategy: FallbackIdStrategy) -> Self {
        Self {
            strategy,
            issued: 0,
        }
    }

    /// A fresh fallback id.
    pub(crate) fn next_id(&mut self) -> String {
        let id = match self.strategy {
            FallbackIdStrategy::Timestamp => {
                format!("call_{}", chrono::Utc::now().timestamp_millis())
            }
            FallbackIdStrategy::Counter => format!("call_{}", self.issued),
            FallbackIdStrategy::Uuid => format!("call_{}", uuid::Uuid::new_v4()),
        };
        self.issued += 1;
        id
    }

    /// The call's own id, or a fresh fallback when it has none (or an empty one).
    pub(crate) fn resolve(&mut self, id: Option<&str>) -> String {
        match id {
            Some(id) if !id.is_empty() => id.to_owned(),
            _ => self.next_id(),
        }
    }
}
