//! Uniform response envelope for host callers.
//!
//! Serialises as `{"succeed":bool,"data":...,"reason":"..."}` with absent
//! fields omitted.

use serde::Serialize;

use crate::core::error::SessionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    pub succeed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            succeed: true,
            data: Some(data),
            reason: None,
        }
    }

    pub fn fail(err: &SessionError) -> Self {
        Self {
            succeed: false,
            data: None,
            reason: Some(err.to_string()),
        }
    }
}

impl Envelope<()> {
    /// Success/failure only, no payload.
    pub fn status(result: Result<(), SessionError>) -> Self {
        match result {
            Ok(()) => Self {
                succeed: true,
                data: None,
                reason: None,
            },
            Err(e) => Self::fail(&e),
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Compact JSON.
    pub fn marshal(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::warn!("envelope serialisation failed: {e}");
            r#"{"succeed":false}"#.to_string()
        })
    }
}

impl<T> From<Result<T, SessionError>> for Envelope<T> {
    fn from(result: Result<T, SessionError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_carries_data_only() {
        let env: Envelope<String> = Ok("/srv/pics".to_string()).into();
        assert_eq!(env.marshal(), r#"{"succeed":true,"data":"/srv/pics"}"#);
    }

    #[test]
    fn failure_carries_reason_only() {
        let env: Envelope<String> = Err(SessionError::NoRootFolder).into();
        assert_eq!(env.marshal(), r#"{"succeed":false,"reason":"no root folder"}"#);
    }

    #[test]
    fn draw_payload_keeps_empty_image_slot() {
        let env = Envelope::ok(["/r/b".to_string(), String::new()]);
        assert_eq!(env.marshal(), r#"{"succeed":true,"data":["/r/b",""]}"#);
    }

    #[test]
    fn status_has_no_data_field() {
        assert_eq!(Envelope::status(Ok(())).marshal(), r#"{"succeed":true}"#);
        assert_eq!(
            Envelope::status(Err(SessionError::NoWinner)).marshal(),
            r#"{"succeed":false,"reason":"no winner"}"#
        );
    }
}
