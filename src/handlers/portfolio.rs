//! Member portfolio PDF routes.
//!
//! Synchronous generation and job downloads stream the PDF back with an
//! attachment disposition; job creation and job status return the backend's
//! JSON envelope untouched.

use super::response::{app_state, failure_response, proxy_error_response, status_code};
use crate::services::{ProxyRequest, ProxyResponse, parse_json_body};
use actix_web::{
    Error, HttpRequest, HttpResponse,
    http::{
        StatusCode,
        header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    web,
};
use paperclip::actix::api_v2_operation;
use tracing::{info, warn};
use url::form_urlencoded;

const MALFORMED_BODY_MESSAGE: &str = "잘못된 요청 형식입니다.";
const UNEXPECTED_PDF_RESPONSE: &str = "PDF 응답 형식이 올바르지 않습니다.";
const INVALID_PATH_MESSAGE: &str = "잘못된 경로입니다.";

/// Percent-encode one path segment or RFC 5987 value. Spaces become `%20`
/// and `*`, which is not an `attr-char`, becomes `%2A`.
pub fn encode_path_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
}

/// `attachment` disposition with an ASCII `filename` and an RFC 5987
/// `filename*` carrying the exact UTF-8 name.
pub fn attachment_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
        encode_path_segment(filename)
    )
}

/// A path parameter that is safe to splice into a backend path. Dot
/// segments would be resolved by the URL parser and escape the members
/// namespace, so they are rejected.
fn path_param<'a>(req: &'a HttpRequest, name: &str) -> Result<&'a str, HttpResponse> {
    match req.match_info().get(name) {
        Some(value) if !value.is_empty() && value != "." && value != ".." => Ok(value),
        value => {
            warn!(context = "portfolio", param = name, value = ?value, "Rejected path parameter");
            Err(failure_response(StatusCode::BAD_REQUEST, INVALID_PATH_MESSAGE))
        }
    }
}

fn portfolio_path(identifier: &str, suffix: &str) -> String {
    format!(
        "/api/v1/members/{}/portfolio/pdf{suffix}",
        encode_path_segment(identifier)
    )
}

/// Relay the backend body with its own status and content type.
fn relay(response: ProxyResponse) -> HttpResponse {
    if !response.is_success() && response.json().is_none() {
        let status = status_code(response.status);
        return failure_response(status, response.upstream_message());
    }

    let content_type = response
        .content_type
        .clone()
        .unwrap_or_else(|| "application/json".to_string());
    HttpResponse::build(status_code(response.status))
        .insert_header((CONTENT_TYPE, content_type))
        .body(response.body)
}

/// Stream a PDF back as an attachment, or relay whatever the backend said.
fn pdf_response(response: ProxyResponse, identifier: &str) -> HttpResponse {
    if !response.is_success() {
        return relay(response);
    }
    if !response.is_pdf() {
        if response.json().is_some() {
            return relay(response);
        }
        warn!(
            context = "portfolio",
            content_type = ?response.content_type,
            "Backend answered a PDF request with an unexpected body"
        );
        return failure_response(StatusCode::BAD_GATEWAY, UNEXPECTED_PDF_RESPONSE);
    }

    let disposition = response
        .content_disposition
        .clone()
        .unwrap_or_else(|| attachment_disposition(&format!("{identifier}-portfolio.pdf")));

    info!(context = "portfolio", identifier, bytes = response.body.len(), "Portfolio PDF served");
    HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "application/pdf"))
        .insert_header((CONTENT_DISPOSITION, disposition))
        .insert_header((CACHE_CONTROL, "no-store"))
        .body(response.body)
}

#[api_v2_operation(
    summary = "Portfolio PDF",
    description = "Generate a member's portfolio PDF synchronously.",
    tags("Portfolio"),
    responses(
        (status = 200, description = "PDF attachment", content_type = "application/pdf"),
        (status = 504, description = "Generation timed out")
    )
)]
pub async fn portfolio_pdf(req: HttpRequest) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;
    let identifier = match path_param(&req, "identifier") {
        Ok(identifier) => identifier,
        Err(response) => return Ok(response),
    };
    let request = ProxyRequest::get(portfolio_path(identifier, ""), "portfolio", "pdf")
        .with_query(req.query_string())
        .with_timeout(state.config.proxy.pdf_timeout());

    Ok(match state.proxy.fetch(request).await {
        Ok(response) => pdf_response(response, identifier),
        Err(e) => proxy_error_response(&e),
    })
}

/// `POST .../portfolio/pdf/jobs`. A non-empty body must be JSON and is
/// forwarded as-is.
pub async fn create_portfolio_job(req: HttpRequest, body: web::Bytes) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;
    let identifier = match path_param(&req, "identifier") {
        Ok(identifier) => identifier,
        Err(response) => return Ok(response),
    };

    let mut request = ProxyRequest::post(portfolio_path(identifier, "/jobs"), "portfolio", "create_job")
        .with_timeout(state.config.proxy.pdf_timeout());
    if !body.iter().all(u8::is_ascii_whitespace) {
        match parse_json_body(&body) {
            Some(payload) => request = request.with_body(payload),
            None => return Ok(failure_response(StatusCode::BAD_REQUEST, MALFORMED_BODY_MESSAGE)),
        }
    }

    Ok(match state.proxy.fetch(request).await {
        Ok(response) => relay(response),
        Err(e) => proxy_error_response(&e),
    })
}

#[api_v2_operation(
    summary = "Portfolio PDF job status",
    description = "Status envelope of an asynchronous portfolio PDF job, relayed from the backend.",
    tags("Portfolio"),
    responses(
        (status = 200, description = "Job status envelope"),
        (status = 504, description = "Backend timed out")
    )
)]
pub async fn portfolio_job_status(req: HttpRequest) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;
    let identifier = match path_param(&req, "identifier") {
        Ok(identifier) => identifier,
        Err(response) => return Ok(response),
    };
    let job_id = match path_param(&req, "job_id") {
        Ok(job_id) => job_id,
        Err(response) => return Ok(response),
    };
    let suffix = format!("/jobs/{}", encode_path_segment(job_id));
    let request = ProxyRequest::get(portfolio_path(identifier, &suffix), "portfolio", "job_status");

    Ok(match state.proxy.fetch(request).await {
        Ok(response) => relay(response),
        Err(e) => proxy_error_response(&e),
    })
}

#[api_v2_operation(
    summary = "Portfolio PDF job download",
    description = "Download the PDF produced by a finished job.",
    tags("Portfolio"),
    responses(
        (status = 200, description = "PDF attachment", content_type = "application/pdf"),
        (status = 504, description = "Download timed out")
    )
)]
pub async fn portfolio_job_download(req: HttpRequest) -> Result<HttpResponse, Error> {
    let state = app_state(&req)?;
    let identifier = match path_param(&req, "identifier") {
        Ok(identifier) => identifier,
        Err(response) => return Ok(response),
    };
    let job_id = match path_param(&req, "job_id") {
        Ok(job_id) => job_id,
        Err(response) => return Ok(response),
    };
    let suffix = format!("/jobs/{}/download", encode_path_segment(job_id));
    let request = ProxyRequest::get(portfolio_path(identifier, &suffix), "portfolio", "job_download")
        .with_timeout(state.config.proxy.pdf_timeout());

    Ok(match state.proxy.fetch(request).await {
        Ok(response) => pdf_response(response, identifier),
        Err(e) => proxy_error_response(&e),
    })
}
