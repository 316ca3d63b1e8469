//! Certificate handlers.
//!
//! ```text
//! POST /api/v1/courses/{id}/certificate
//! GET  /api/v1/certificates/verify/{code}
//! GET  /api/v1/certificates/{id}
//! GET  /api/v1/users/me/certificates
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Certificate;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Public projection of a [`Certificate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Uuid,
    /// Sixteen upper-case hex characters, safe to share publicly.
    pub verification_code: String,
    #[schema(value_type = String, format = DateTime)]
    pub issued_at: DateTime<Utc>,
}

impl From<Certificate> for CertificateResponse {
    fn from(certificate: Certificate) -> Self {
        Self {
            id: certificate.id,
            course_id: certificate.course_id,
            user_id: certificate.user_id,
            verification_code: certificate.verification_code,
            issued_at: certificate.issued_at,
        }
    }
}

/// Issue a certificate for a course the signed-in user has completed.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/certificate",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 201, description = "Certificate issued", body = CertificateResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 409, description = "Course incomplete or already certified", body = ErrorSchema)
    ),
    tags = ["certificates"],
    operation_id = "issueCertificate"
)]
#[post("/courses/{id}/certificate")]
pub async fn issue_certificate(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let course_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let certificate = state
        .certificates
        .issue_certificate(&course_id, &user_id)
        .await?;
    Ok(HttpResponse::Created().json(CertificateResponse::from(certificate)))
}

/// Look a certificate up by its public verification code.
#[utoipa::path(
    get,
    path = "/api/v1/certificates/verify/{code}",
    params(("code" = String, Path, description = "Verification code")),
    responses(
        (status = 200, description = "Certificate", body = CertificateResponse),
        (status = 404, description = "Unknown code", body = ErrorSchema)
    ),
    tags = ["certificates"],
    operation_id = "verifyCertificate"
)]
#[get("/certificates/verify/{code}")]
pub async fn verify_certificate(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CertificateResponse>> {
    let certificate = state
        .certificates
        .verify_certificate(&path.into_inner())
        .await?;
    Ok(web::Json(certificate.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/certificates/{id}",
    params(("id" = String, Path, description = "Certificate identifier")),
    responses(
        (status = 200, description = "Certificate", body = CertificateResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["certificates"],
    operation_id = "getCertificate"
)]
#[get("/certificates/{id}")]
pub async fn get_certificate(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CertificateResponse>> {
    let certificate = state
        .certificates
        .get_certificate(&path.into_inner())
        .await?;
    Ok(web::Json(certificate.into()))
}

/// Certificates earned by the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/certificates",
    responses(
        (status = 200, description = "Certificates", body = [CertificateResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["certificates"],
    operation_id = "listMyCertificates"
)]
#[get("/users/me/certificates")]
pub async fn list_my_certificates(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CertificateResponse>>> {
    let user_id = session.require_user_id()?;
    let certificates = state.certificates.list_certificates(&user_id).await?;
    Ok(web::Json(certificates.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{fixture_now, id};
    use crate::inbound::http::test_utils::{created_course, id_of, send, signed_up, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;

    #[rstest]
    fn mapper_preserves_every_field() {
        let entity = Certificate::issue(id(500), id(1), fixture_now());
        let response = CertificateResponse::from(entity.clone());
        assert_eq!(response.id, entity.id);
        assert_eq!(response.course_id, entity.course_id);
        assert_eq!(response.user_id, entity.user_id);
        assert_eq!(response.verification_code, entity.verification_code);
        assert_eq!(response.issued_at, entity.issued_at);
    }

    #[actix_web::test]
    async fn certificate_requires_a_completed_course() {
        let app = actix_test::init_service(test_app()).await;
        let (_, cookie) = signed_up(&app, "learner@example.com").await;
        let (course_id, lessons) = created_course(&app, &cookie, 1).await;
        let issue_uri = format!("/api/v1/courses/{course_id}/certificate");

        let (status, body) = send(
            &app,
            actix_test::TestRequest::post().uri(&issue_uri).cookie(cookie.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT, "{body}");

        send(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/lessons/{}/complete", lessons[0]))
                .cookie(cookie.clone()),
        )
        .await;

        let (status, issued) = send(
            &app,
            actix_test::TestRequest::post().uri(&issue_uri).cookie(cookie.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let code = issued["verificationCode"].as_str().expect("code").to_owned();
        assert_eq!(code.len(), 16);

        let (status, _) = send(
            &app,
            actix_test::TestRequest::post().uri(&issue_uri).cookie(cookie.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, verified) = send(
            &app,
            actix_test::TestRequest::get().uri(&format!("/api/v1/certificates/verify/{code}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(id_of(&verified), id_of(&issued));

        let (status, fetched) = send(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/certificates/{}", id_of(&issued))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["courseId"], course_id.to_string());

        let (status, mine) = send(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me/certificates")
                .cookie(cookie),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine.as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn unknown_verification_code_is_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let (status, body) = send(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/certificates/verify/0000000000000000"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }
}
