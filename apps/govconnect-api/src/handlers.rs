//! HTTP handlers for the GovConnect API

use axum::{
    extract::{Query, RawQuery, State},
    http::StatusCode,
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

use govconnect_core::{
    access_key, full_description, generic_acknowledgment, refine_body, Composer, ComplaintDraft,
    ContactDetails, Intent, Language, RouteDecision, DEFAULT_SENDER_EMAIL, DEFAULT_SIGNATORY,
};
use govconnect_letter::{filename, render_letter, LetterMeta};

use crate::error::ApiError;
use crate::models::*;
use crate::relay::RelaySubmission;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Classify a free-text query and decide where to send the user. The
/// assistant degrades instead of failing: a classifier outage yields a
/// localized apology and the schemes page with the query preserved.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let text = req.message.trim();
    if text.is_empty() {
        return Err(ApiError::InvalidRequest("message must not be empty".into()));
    }
    let language = Language::from_tag(req.language.as_deref().unwrap_or("en"));

    match state.backend.classify_intent(text).await {
        Ok(result) => {
            let message = match Intent::from_tag(&result.intent) {
                Some(intent) => intent.acknowledgment().to_string(),
                None => generic_acknowledgment(text),
            };
            Ok(Json(ChatResponse {
                message,
                intent: Some(result.intent.clone()),
                decision: RouteDecision::for_tag(&result.intent, text),
                entities: result.entities,
                confidence: result.confidence,
                timestamp: Utc::now(),
            }))
        }
        Err(e) => {
            tracing::warn!("Intent classification unavailable: {}", e);
            Ok(Json(ChatResponse {
                message: state.catalog.text(language, "assistant.unavailable").to_string(),
                intent: None,
                decision: RouteDecision::fallback(text),
                entities: Vec::new(),
                confidence: 0.0,
                timestamp: Utc::now(),
            }))
        }
    }
}

/// Localized assistant strings for a display language.
pub async fn chat_strings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StringsQuery>,
) -> Json<AssistantStrings> {
    let language = Language::from_tag(query.lang.as_deref().unwrap_or("en"));
    Json(AssistantStrings {
        greeting: state.catalog.text(language, "assistant.greeting"),
        cleared: state.catalog.text(language, "assistant.cleared"),
        unavailable: state.catalog.text(language, "assistant.unavailable"),
    })
}

/// Draft a complaint letter. Generation never fails outright: if the
/// backend is unreachable or answers garbage, the fixed local template
/// stands in and the response says so.
pub async fn generate_complaint(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if req.sector.trim().is_empty() || req.description.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "sector and description must both be provided".into(),
        ));
    }

    let description = if req.location.trim().is_empty() && req.pincode.trim().is_empty() {
        req.description.clone()
    } else {
        full_description(&req.location, &req.pincode, &req.description)
    };
    let payload = serde_json::json!({
        "sector": req.sector,
        "description": description,
        "language": req.language,
    });

    let generated = match state.backend.generate_complaint(&payload).await {
        Ok(value) => serde_json::from_value::<GeneratedDraft>(value).ok(),
        Err(e) => {
            tracing::warn!("Draft generation unavailable: {}", e);
            None
        }
    };

    let (draft, fallback) = match generated {
        Some(g) => (
            ComplaintDraft::from_generated(
                &req.sector,
                g.subject,
                g.body,
                g.suggested_department,
                g.official_portal,
            ),
            false,
        ),
        None => (ComplaintDraft::fallback(&req.sector, &req.description), true),
    };

    Ok(Json(GenerateResponse { draft, fallback }))
}

/// Sectors the complaint form offers.
pub async fn complaint_sectors() -> Json<SectorsResponse> {
    Json(SectorsResponse {
        sectors: &govconnect_core::SECTORS,
    })
}

/// Fill or strip the placeholder tokens in a draft body.
pub async fn refine_complaint(Json(req): Json<RefineRequest>) -> Json<RefineResponse> {
    let details = ContactDetails {
        name: req.name,
        email: req.email,
        location: req.location,
        pincode: req.pincode,
    };
    Json(RefineResponse {
        body: refine_body(&req.body, &details),
    })
}

/// Submit a refined complaint through the email relay.
pub async fn send_complaint(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendRequest>,
) -> Result<Json<SendResponse>, ApiError> {
    let mut composer = Composer::new(req.sector.clone(), req.description.clone())
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    composer.details = ContactDetails {
        name: req.name.clone(),
        email: req.email.clone(),
        location: req.location.clone(),
        pincode: req.pincode.clone(),
    };

    let subject = req
        .subject
        .clone()
        .unwrap_or_else(|| format!("Complaint Regarding {} Service Issue", req.sector));
    composer
        .set_draft(ComplaintDraft::from_generated(
            &req.sector,
            subject.clone(),
            req.body.clone(),
            None,
            None,
        ))
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    let refined = composer
        .refined_body()
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    let name = req.name.trim();
    let email = req.email.trim();
    let submission = RelaySubmission {
        access_key: access_key(&req.sector).to_string(),
        name: if name.is_empty() { DEFAULT_SIGNATORY.into() } else { name.into() },
        email: if email.is_empty() { DEFAULT_SENDER_EMAIL.into() } else { email.into() },
        subject,
        message: refined,
    };

    match state.relay.send(submission).await {
        Ok(_) => {
            let record = composer
                .mark_sent(Utc::now())
                .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;
            tracing::info!(
                "Complaint sent for sector {}: {}",
                record.sector,
                record.reference_number
            );
            Ok(Json(SendResponse {
                success: true,
                reference_number: record.reference_number,
                department: govconnect_core::department(&req.sector),
                status: composer.status(),
            }))
        }
        Err(e) => {
            // Draft survives; the citizen can retry from the same form.
            let _ = composer.mark_failed();
            Err(ApiError::Relay(e))
        }
    }
}

/// Export a refined complaint as a downloadable PDF letter.
pub async fn export_complaint(
    Json(req): Json<ExportRequest>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ApiError> {
    if req.sector.trim().is_empty() || req.body.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "sector and body must both be provided".into(),
        ));
    }

    let details = ContactDetails {
        name: req.name,
        email: req.email,
        location: req.location,
        pincode: req.pincode,
    };
    let refined = refine_body(&req.body, &details);

    let attachment = req
        .attachment_base64
        .as_deref()
        .map(|data| BASE64.decode(data))
        .transpose()
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid attachment base64: {}", e)))?;

    let now = Utc::now();
    let meta = LetterMeta {
        reference: govconnect_core::reference_number(now),
        date: now.format("%d/%m/%Y").to_string(),
        sector: req.sector.clone(),
    };
    let pdf = render_letter(&meta, &refined, attachment.as_deref())?;

    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "application/pdf".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"{}\"", filename(&req.sector, now)),
            ),
        ],
        pdf,
    ))
}

/// Resolve map coordinates to a display address for the complaint form.
pub async fn reverse_geocode(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReverseQuery>,
) -> Result<Json<Value>, ApiError> {
    let value = state.backend.reverse_geocode(query.lat, query.lng).await?;
    Ok(Json(value))
}

/// Look up process steps. Accepts the legacy camelCase field name.
pub async fn track_process(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrackRequest>,
) -> Result<Json<Value>, ApiError> {
    let value = state
        .backend
        .post_json(
            "/api/process/track",
            &serde_json::json!({ "process_type": req.process_type }),
        )
        .await?;
    Ok(Json(value))
}

/// List schemes, passing the caller's query string through unchanged.
pub async fn list_schemes(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, ApiError> {
    let path = match query {
        Some(q) => format!("/api/schemes?{q}"),
        None => "/api/schemes".to_string(),
    };
    Ok(Json(state.backend.get_json(&path).await?))
}

pub async fn query_schemes(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.backend.post_json("/api/schemes", &body).await?))
}

pub async fn scheme_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.backend.get_json("/api/schemes/categories").await?))
}

pub async fn check_eligibility(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(
        state
            .backend
            .post_json("/api/schemes/check-eligibility", &body)
            .await?,
    ))
}

pub async fn readiness_score(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(
        state
            .backend
            .post_json("/api/schemes/readiness-score", &body)
            .await?,
    ))
}

pub async fn list_forms(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, ApiError> {
    let path = match query {
        Some(q) => format!("/api/forms?{q}"),
        None => "/api/forms".to_string(),
    };
    Ok(Json(state.backend.get_json(&path).await?))
}

pub async fn form_assist(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.backend.post_json("/api/forms/assist", &body).await?))
}

pub async fn analyze_document(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(
        state
            .backend
            .post_json("/api/forms/analyze-document", &body)
            .await?,
    ))
}

pub async fn validate_document(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(
        state
            .backend
            .post_json("/api/forms/validate-document", &body)
            .await?,
    ))
}

/// Forward an uploaded file to the backend untouched, multipart framing
/// included.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<Json<Value>, ApiError> {
    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    Ok(Json(
        state
            .backend
            .post_bytes("/api/files/upload", content_type, body)
            .await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::Duration;
    use tower::ServiceExt;
    use wiremock::matchers::{
        body_partial_json, body_string_contains, header, method, path, query_param,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::AppConfig;

    fn test_app(backend_url: &str, relay_url: &str) -> Router {
        let config = AppConfig {
            backend_base_url: backend_url.trim_end_matches('/').to_string(),
            relay_url: relay_url.to_string(),
            request_timeout: Duration::from_secs(5),
            backend_retries: 0,
            retry_delay: Duration::from_millis(0),
            port: 0,
        };
        let state = Arc::new(AppState::new(config).unwrap());
        crate::router(state)
    }

    async fn post(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let backend = MockServer::start().await;
        let app = test_app(&backend.uri(), "http://relay.invalid");
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn chat_routes_complaint_queries() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/intent"))
            .and(body_partial_json(json!({"text": "streetlight is broken"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "intent": "complaint",
                "entities": [],
                "confidence": 0.91
            })))
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = post(
            app,
            "/api/chat",
            json!({"message": "streetlight is broken"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["intent"], "complaint");
        assert_eq!(body["route"], "/complaints");
        assert_eq!(body["target"], "/complaints?q=streetlight+is+broken");
        assert_eq!(body["confidence"], 0.91);
        assert!(body["message"].as_str().unwrap().contains("file a complaint"));
    }

    #[tokio::test]
    async fn chat_unknown_intent_falls_back_to_schemes() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/intent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"intent": "weather"})))
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        // "text" is accepted as a legacy alias for "message".
        let (status, body) = post(app, "/api/chat", json!({"text": "rain today"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route"], "/schemes");
        assert!(body["message"].as_str().unwrap().contains("\"rain today\""));
    }

    #[tokio::test]
    async fn chat_survives_classifier_outage() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/intent"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = post(app, "/api/chat", json!({"message": "pension help"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["intent"], Value::Null);
        assert_eq!(body["target"], "/schemes?q=pension+help");
        assert!(body["message"].as_str().unwrap().contains("could not reach"));
    }

    #[tokio::test]
    async fn chat_rejects_blank_message() {
        let backend = MockServer::start().await;
        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, _) = post(app, "/api/chat", json!({"message": "   "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_strings_localize() {
        let backend = MockServer::start().await;
        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = get(app, "/api/chat/strings?lang=hi").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["greeting"].as_str().unwrap().contains("नमस्ते"));
    }

    #[tokio::test]
    async fn generate_uses_backend_draft() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/complaints/generate"))
            .and(body_partial_json(json!({
                "sector": "Electricity",
                "description": "Location of Issue: MG Road, Pincode: 500003\n\nDetails: Power cuts daily"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "subject": "Frequent power cuts on MG Road",
                "body": "Respected Sir/Madam,\n\n...\n\nYours faithfully,\n[Your Name]",
                "suggestedDepartment": "TSSPDCL",
                "officialPortal": "https://tgsouthernpower.org/"
            })))
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = post(
            app,
            "/api/complaints/generate",
            json!({
                "sector": "Electricity",
                "description": "Power cuts daily",
                "location": "MG Road",
                "pincode": "500003"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"], false);
        assert_eq!(body["subject"], "Frequent power cuts on MG Road");
        assert_eq!(body["department"], "TSSPDCL");
        assert_eq!(body["portal"], "https://tgsouthernpower.org/");
    }

    #[tokio::test]
    async fn generate_forwards_citizen_language() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/complaints/generate"))
            .and(body_partial_json(json!({"language": "te"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "subject": "వీధి దీపం పని చేయడం లేదు",
                "body": "గౌరవనీయులైన అధికారిగారికి,"
            })))
            .expect(1)
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = post(
            app,
            "/api/complaints/generate",
            json!({"sector": "GHMC", "description": "Streetlight broken", "language": "te"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"], false);
        assert_eq!(body["subject"], "వీధి దీపం పని చేయడం లేదు");
    }

    #[tokio::test]
    async fn generate_defaults_language_to_english() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/complaints/generate"))
            .and(body_partial_json(json!({"language": "en"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "subject": "s",
                "body": "b"
            })))
            .expect(1)
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, _) = post(
            app,
            "/api/complaints/generate",
            json!({"sector": "GHMC", "description": "Streetlight broken"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn generate_falls_back_when_backend_fails() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/complaints/generate"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = post(
            app,
            "/api/complaints/generate",
            json!({"sector": "GHMC", "description": "Garbage not collected"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"], true);
        assert_eq!(body["subject"], "Complaint Regarding GHMC Service Issue");
        assert!(body["body"].as_str().unwrap().contains("Garbage not collected"));
        assert_eq!(body["department"], "Department of GHMC");
    }

    #[tokio::test]
    async fn generate_requires_sector_and_description() {
        let backend = MockServer::start().await;
        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, _) = post(
            app,
            "/api/complaints/generate",
            json!({"sector": "", "description": "x"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn refine_fills_and_strips_tokens() {
        let backend = MockServer::start().await;
        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = post(
            app,
            "/api/complaints/refine",
            json!({
                "body": "From: [Your Address]\n\nYours faithfully,\n[Your Name]\n[Your Contact Information]",
                "name": "Asha Rao",
                "location": "MG Road",
                "pincode": "500003"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let refined = body["body"].as_str().unwrap();
        assert!(refined.contains("Asha Rao"));
        assert!(refined.contains("MG Road, 500003"));
        assert!(!refined.contains('['));
    }

    #[tokio::test]
    async fn send_success_returns_reference() {
        let backend = MockServer::start().await;
        let relay = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Email sent"
            })))
            .mount(&relay)
            .await;

        let app = test_app(&backend.uri(), &format!("{}/submit", relay.uri()));
        let (status, body) = post(
            app,
            "/api/complaints/send",
            json!({
                "sector": "GHMC",
                "description": "Streetlight broken",
                "body": "Respected Sir/Madam,\n\nStreetlight broken.\n\nYours faithfully,\n[Your Name]"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["status"], "sent");
        assert_eq!(body["department"], "Department of GHMC");
        let reference = body["reference_number"].as_str().unwrap();
        assert!(reference.starts_with("CMP"));
        assert_eq!(reference.len(), 11);
    }

    #[tokio::test]
    async fn sectors_lists_complaint_form_options() {
        let backend = MockServer::start().await;
        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = get(app, "/api/complaints/sectors").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sectors"], json!(["Road Transport", "GHMC", "Electricity"]));
    }

    #[tokio::test]
    async fn send_relay_rejection_is_bad_gateway() {
        let backend = MockServer::start().await;
        let relay = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Invalid access key"
            })))
            .mount(&relay)
            .await;

        let app = test_app(&backend.uri(), &format!("{}/submit", relay.uri()));
        let (status, body) = post(
            app,
            "/api/complaints/send",
            json!({
                "sector": "GHMC",
                "description": "x",
                "body": "y"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], 502);
    }

    #[tokio::test]
    async fn export_returns_pdf_download() {
        let backend = MockServer::start().await;
        let app = test_app(&backend.uri(), "http://relay.invalid");

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/complaints/export")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({
                            "sector": "GHMC",
                            "body": "Respected Sir/Madam,\n\nStreetlight broken.\n\nYours faithfully,\n[Your Name]"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/pdf"
        );
        let disposition = response
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("Complaint_GHMC_"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn export_rejects_bad_attachment_base64() {
        let backend = MockServer::start().await;
        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, _) = post(
            app,
            "/api/complaints/export",
            json!({"sector": "GHMC", "body": "x", "attachment_base64": "!!not-base64!!"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn track_accepts_camel_case_field() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/process/track"))
            .and(body_partial_json(json!({"process_type": "passport"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"steps": []})))
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = post(app, "/api/process/track", json!({"processType": "passport"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["steps"], json!([]));
    }

    #[tokio::test]
    async fn schemes_proxy_passes_query_through() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/schemes"))
            .and(query_param("q", "pension"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"schemes": ["OAP"]})))
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = get(app, "/api/schemes?q=pension").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["schemes"][0], "OAP");
    }

    #[tokio::test]
    async fn reverse_geocode_proxies_backend() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/locator/reverse"))
            .and(query_param("lat", "17.385"))
            .and(query_param("lng", "78.4867"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "display_name": "MG Road, Hyderabad",
                "area": "Hyderabad",
                "pincode": "500003"
            })))
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = get(app, "/api/locator/reverse?lat=17.385&lng=78.4867").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pincode"], "500003");
        assert_eq!(body["area"], "Hyderabad");
    }

    #[tokio::test]
    async fn form_assist_proxies_json_body() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/forms/assist"))
            .and(body_partial_json(json!({"formId": "income-certificate"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "fieldsToFill": [{"section": "Personal Details"}]
            })))
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = post(
            app,
            "/api/forms/assist",
            json!({"formId": "income-certificate", "purpose": "scholarship"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fieldsToFill"][0]["section"], "Personal Details");
    }

    #[tokio::test]
    async fn readiness_score_proxies_json_body() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/schemes/readiness-score"))
            .and(body_partial_json(json!({"schemeId": "pm-kisan"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "score": 75,
                "status": "ready"
            })))
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = post(
            app,
            "/api/schemes/readiness-score",
            json!({"schemeId": "pm-kisan", "documents": ["aadhaar"]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 75);
    }

    #[tokio::test]
    async fn upload_forwards_body_and_content_type() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/files/upload"))
            .and(header(
                "content-type",
                "multipart/form-data; boundary=form-divider",
            ))
            .and(body_string_contains("FILEBYTES"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "fileId": "file_1"
            })))
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/files/upload")
                    .header(
                        "content-type",
                        "multipart/form-data; boundary=form-divider",
                    )
                    .body(Body::from("--form-divider\r\nFILEBYTES\r\n--form-divider--"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["fileId"], "file_1");
    }

    #[tokio::test]
    async fn backend_failure_on_proxy_is_bad_gateway() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/schemes/categories"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&backend)
            .await;

        let app = test_app(&backend.uri(), "http://relay.invalid");
        let (status, body) = get(app, "/api/schemes/categories").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Upstream service unavailable");
    }
}
