//! Stateless HTTP request builder and response parser for the
//! recommendations resource.
//!
//! # Design
//! `RecommendationClient` holds only a `base_url`. Each operation is split
//! into a `build_*` method producing an `HttpRequest` from a form snapshot
//! and a `parse_*` method consuming the `HttpResponse`. The caller runs the
//! round-trip in between.
//!
//! Path segments and query values are concatenated as raw text. Whatever
//! encoding happens is left to the transport.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateRecommendation, Recommendation, UpdateRecommendation};

const COLLECTION: &str = "/recommendations";

/// Synchronous, stateless client for the recommendations API.
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    base_url: String,
}

impl RecommendationClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_create(&self, form: &Recommendation) -> Result<HttpRequest, ApiError> {
        let body = CreateRecommendation {
            product_a: form.product_a.clone(),
            product_b: form.product_b.clone(),
            recom_type: form.recom_type.clone(),
            likes: parse_int_prefix(&form.likes),
        };
        self.json_request(HttpMethod::Post, format!("{}{COLLECTION}", self.base_url), &body)
    }

    pub fn build_update(&self, form: &Recommendation) -> Result<HttpRequest, ApiError> {
        let path = format!("{}{COLLECTION}/{}", self.base_url, form.id);
        self.json_request(HttpMethod::Put, path, &passthrough_body(form))
    }

    pub fn build_like(&self, form: &Recommendation) -> Result<HttpRequest, ApiError> {
        let path = format!("{}{COLLECTION}/{}/likes", self.base_url, form.id);
        self.json_request(HttpMethod::Put, path, &passthrough_body(form))
    }

    pub fn build_retrieve(&self, form: &Recommendation) -> HttpRequest {
        self.bare_request(HttpMethod::Get, format!("{}{COLLECTION}/{}", self.base_url, form.id))
    }

    pub fn build_delete(&self, form: &Recommendation) -> HttpRequest {
        self.bare_request(HttpMethod::Delete, format!("{}{COLLECTION}/{}", self.base_url, form.id))
    }

    /// `GET /recommendations?{query}`. The `?` is always present, even when
    /// every filter is blank.
    pub fn build_search(&self, form: &Recommendation) -> HttpRequest {
        let query = search_query(form);
        self.bare_request(HttpMethod::Get, format!("{}{COLLECTION}?{query}", self.base_url))
    }

    /// Create, update, like and retrieve all answer with one entity.
    pub fn parse_recommendation(&self, response: HttpResponse) -> Result<Recommendation, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<Recommendation>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// The delete body is ignored on both branches.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        debug!(%method, %path, %body, "built request");
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    fn bare_request(&self, method: HttpMethod, path: String) -> HttpRequest {
        debug!(%method, %path, "built request");
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }
}

fn passthrough_body(form: &Recommendation) -> UpdateRecommendation {
    UpdateRecommendation {
        product_a: form.product_a.clone(),
        product_b: form.product_b.clone(),
        recom_type: form.recom_type.clone(),
        likes: form.likes.clone(),
    }
}

/// Assemble the search query string from the four filterable slots.
///
/// Fields are visited in the fixed order `product_a, product_b, recom_type,
/// likes`; blank ones are omitted entirely. A likes filter of `"0"` counts
/// as blank.
pub fn search_query(form: &Recommendation) -> String {
    let filters = [
        ("product_a", form.product_a.as_str(), is_present(&form.product_a)),
        ("product_b", form.product_b.as_str(), is_present(&form.product_b)),
        ("recom_type", form.recom_type.as_str(), is_present(&form.recom_type)),
        ("likes", form.likes.as_str(), is_present(&form.likes) && form.likes != "0"),
    ];

    let mut query = String::new();
    for (name, value, present) in filters {
        if !present {
            continue;
        }
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(name);
        query.push('=');
        query.push_str(value);
    }
    query
}

fn is_present(value: &str) -> bool {
    !value.is_empty()
}

/// Integer-prefix coercion used for `likes` on create.
///
/// Skips leading whitespace, accepts one optional sign and an optional
/// `0x`/`0X` hex prefix, then takes the longest run of digits in that radix:
/// `"3abc"` is 3, `"3.7"` is 3, `"0x10"` is 16. Returns `None` when no digit
/// follows or the value does not fit in an `i64`.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let digits_len = rest
        .chars()
        .take_while(|c| c.is_digit(radix))
        .count();
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    let signed = if negative { format!("-{digits}") } else { digits.to_string() };
    i64::from_str_radix(&signed, radix).ok()
}

/// Map a non-2xx status to `ApiError::Http`, keeping the raw body for
/// message extraction.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
