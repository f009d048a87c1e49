//! Response envelope shared by all endpoints.
//!
//! Success bodies are `{success, message, data?, meta?}`; pagination
//! metadata rides in `meta` on listing endpoints.

use serde::Serialize;
use taskhive_core::repository::PaginatedResult;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u32,
    pub pages: u64,
    pub limit: u32,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: None,
        }
    }

    /// An envelope with no payload, e.g. logout or permanent delete.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            meta: None,
        }
    }

    pub fn with_meta(message: impl Into<String>, data: T, meta: PaginationMeta) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: Some(meta),
        }
    }
}

impl PaginationMeta {
    pub fn from_result<T>(result: &PaginatedResult<T>) -> Self {
        Self {
            total: result.total,
            page: result.page,
            pages: result.total_pages,
            limit: result.limit,
        }
    }
}
