//! Version information endpoint handler.

use crate::{BuildInfo, models::VersionResponse};
use actix_web::{Error, Result, web};
use paperclip::actix::api_v2_operation;

#[api_v2_operation(
    summary = "Version Information Endpoint",
    description = "Returns the gateway version, commit hash, and build time.",
    tags("Version"),
    responses(
        (status = 200, description = "Successful response", body = VersionResponse)
    )
)]
pub async fn version() -> Result<web::Json<VersionResponse>, Error> {
    let build = BuildInfo::current();

    Ok(web::Json(VersionResponse {
        version: build.version.to_string(),
        commit: build.commit.to_string(),
        build_time: build.build_time.to_string(),
    }))
}
