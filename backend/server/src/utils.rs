use axum::body::Bytes;
use serde::Deserialize;

use crate::error::AppError;

fn one() -> u32 {
    1
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddItem {
    pub item_id: String,
    #[serde(default = "one")]
    pub qty: u32,
}

/// `{"itemId": "momo", "qty": 2}`, qty defaults to 1 and must be at least 1.
pub fn get_add_item(bytes: Bytes) -> Result<AddItem, AppError> {
    let payload: AddItem = serde_json::from_slice(&bytes).map_err(|_| AppError::MalformedPayload)?;

    if payload.qty == 0 || payload.item_id.trim().is_empty() {
        return Err(AppError::MalformedPayload);
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &'static str) -> Result<AddItem, AppError> {
        get_add_item(Bytes::from_static(body.as_bytes()))
    }

    #[test]
    fn test_default_qty() {
        assert_eq!(
            parse(r#"{"itemId":"momo"}"#).unwrap(),
            AddItem {
                item_id: "momo".into(),
                qty: 1
            }
        );
    }

    #[test]
    fn test_explicit_qty() {
        assert_eq!(parse(r#"{"itemId":"momo","qty":3}"#).unwrap().qty, 3);
    }

    #[test]
    fn test_rejects_bad_qty() {
        assert!(matches!(parse(r#"{"itemId":"momo","qty":0}"#), Err(AppError::MalformedPayload)));
        assert!(matches!(parse(r#"{"itemId":"momo","qty":-2}"#), Err(AppError::MalformedPayload)));
    }

    #[test]
    fn test_rejects_missing_or_blank_id() {
        assert!(matches!(parse(r#"{"qty":1}"#), Err(AppError::MalformedPayload)));
        assert!(matches!(parse(r#"{"itemId":"  "}"#), Err(AppError::MalformedPayload)));
        assert!(matches!(parse("not json"), Err(AppError::MalformedPayload)));
    }
}
