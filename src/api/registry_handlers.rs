use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::api::handlers::{internal_error, not_found, ApiError, AppState, ErrorResponse};
use crate::gs1::{self, IdentifierKind};
use crate::model::{Id, PaymentStatus, Product, RegistrationStatus};
use crate::registry::{ProcessorStatus, RegistryStatus};
use crate::store::traits::Store;

fn bad_gateway(message: &str) -> ApiError {
    (StatusCode::BAD_GATEWAY, Json(ErrorResponse::new(message)))
}

// ---------------------------------------------------------------------------
// Check digit utilities
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CheckDigitRequest {
    /// Identifier body, i.e. the code without its final digit
    pub body: String,
    pub kind: Option<IdentifierKind>,
}

#[derive(Debug, Serialize)]
pub struct CheckDigitResponse {
    pub body: String,
    pub check_digit: u8,
    /// Full identifier, present when a kind was given and the body
    /// had the right length for it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<String>,
}

pub async fn compute_check_digit(
    Json(request): Json<CheckDigitRequest>,
) -> Result<Json<CheckDigitResponse>, ApiError> {
    let check_digit = gs1::check_digit(&request.body).map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(&e.to_string())),
        )
    })?;

    let complete = match request.kind {
        Some(kind) => Some(gs1::complete(&request.body, kind).map_err(|e| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::new(&e.to_string())),
            )
        })?),
        None => None,
    };

    Ok(Json(CheckDigitResponse {
        body: request.body,
        check_digit,
        complete,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub code: String,
    /// Without a kind the code is treated as a GTIN of any supported length
    pub kind: Option<IdentifierKind>,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub code: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn validate_identifier(Json(request): Json<ValidateRequest>) -> Json<ValidateResponse> {
    let result = match request.kind {
        Some(kind) => gs1::validate(&request.code, kind),
        None => gs1::validate_gtin(&request.code),
    };

    Json(match result {
        Ok(()) => ValidateResponse {
            code: request.code,
            valid: true,
            error: None,
        },
        Err(e) => ValidateResponse {
            code: request.code,
            valid: false,
            error: Some(e.to_string()),
        },
    })
}

// ---------------------------------------------------------------------------
// GS1 registry integration
// ---------------------------------------------------------------------------

async fn load_product_with_gtin<S: Store>(
    ctx: &AppState<S>,
    id: &Id,
) -> Result<(Product, String), ApiError> {
    let product = match ctx.store.get_product(id).await {
        Ok(Some(product)) => product,
        Ok(None) => return Err(not_found("Product")),
        Err(e) => return Err(internal_error(e)),
    };

    let gtin = match &product.gtin {
        Some(gtin) => gtin.clone(),
        None => {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::new("Product has no GTIN assigned")),
            ))
        }
    };

    Ok((product, gtin))
}

/// Submit a product's GTIN to the external registry. One attempt per
/// call; a refusal from the registry is recorded on the product, while
/// a transport failure leaves it untouched so the call can be retried.
pub async fn register_product<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Product>, ApiError> {
    let (mut product, gtin) = load_product_with_gtin(&ctx, &id).await?;

    if product.registration == RegistrationStatus::Registered {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("Product is already registered")),
        ));
    }

    match ctx.gs1_registry.register_gtin(&product, &gtin).await {
        Ok(response) => {
            product.registration = if response.accepted {
                RegistrationStatus::Registered
            } else {
                RegistrationStatus::Submitted
            };
            product.registry_ref = Some(response.reference);
            product.updated_at = chrono::Utc::now();
            info!("Registered GTIN {} for product {}", gtin, product.id);
        }
        Err(e) => {
            warn!("GTIN registration failed for product {}: {}", product.id, e);
            if e.is_rejection() {
                product.registration = RegistrationStatus::Failed;
                product.updated_at = chrono::Utc::now();
                if let Err(e) = ctx.store.upsert_product(product).await {
                    return Err(internal_error(e));
                }
            }
            return Err(bad_gateway(&e.to_string()));
        }
    }

    match ctx.store.upsert_product(product.clone()).await {
        Ok(()) => Ok(Json(product)),
        Err(e) => Err(internal_error(e)),
    }
}

/// Ask the external registry for the current status of a product's GTIN
pub async fn product_registration_status<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<RegistryStatus>, ApiError> {
    let (_, gtin) = load_product_with_gtin(&ctx, &id).await?;

    match ctx.gs1_registry.check_status(&gtin).await {
        Ok(status) => Ok(Json(status)),
        Err(e) => Err(bad_gateway(&format!("Registry lookup failed: {}", e))),
    }
}

// ---------------------------------------------------------------------------
// Payment processor integration
// ---------------------------------------------------------------------------

/// Hand a pending payment to the processor. On a downstream failure
/// the payment stays pending so it can simply be submitted again.
pub async fn submit_payment<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<crate::model::Payment>, ApiError> {
    let mut payment = match ctx.store.get_payment(&id).await {
        Ok(Some(payment)) => payment,
        Ok(None) => return Err(not_found("Payment")),
        Err(e) => return Err(internal_error(e)),
    };

    if payment.status != PaymentStatus::Pending {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(&format!(
                "Payment is {} and cannot be submitted",
                payment.status.as_str()
            ))),
        ));
    }

    match ctx.payment_processor.submit_payment(&payment).await {
        Ok(response) => {
            payment.status = PaymentStatus::Processing;
            payment.processor_ref = Some(response.reference);
            payment.updated_at = chrono::Utc::now();
            info!("Submitted payment {} to processor", payment.id);
        }
        Err(e) => {
            warn!("Payment submission failed for {}: {}", payment.id, e);
            return Err(bad_gateway(&format!("Processor rejected the request: {}", e)));
        }
    }

    match ctx.store.upsert_payment(payment.clone()).await {
        Ok(()) => Ok(Json(payment)),
        Err(e) => Err(internal_error(e)),
    }
}

/// Poll the processor for a submitted payment and fold any terminal
/// status back into the stored record
pub async fn payment_status<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<ProcessorStatus>, ApiError> {
    let mut payment = match ctx.store.get_payment(&id).await {
        Ok(Some(payment)) => payment,
        Ok(None) => return Err(not_found("Payment")),
        Err(e) => return Err(internal_error(e)),
    };

    let reference = match &payment.processor_ref {
        Some(reference) => reference.clone(),
        None => {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::new("Payment has not been submitted")),
            ))
        }
    };

    let status = match ctx.payment_processor.check_payment(&reference).await {
        Ok(status) => status,
        Err(e) => return Err(bad_gateway(&format!("Processor lookup failed: {}", e))),
    };

    if let Some(new_status) = PaymentStatus::parse(&status.status) {
        if new_status != payment.status {
            payment.status = new_status;
            payment.updated_at = chrono::Utc::now();
            if let Err(e) = ctx.store.upsert_payment(payment).await {
                return Err(internal_error(e));
            }
        }
    }

    Ok(Json(status))
}

// ---------------------------------------------------------------------------
// Partner feeds
// ---------------------------------------------------------------------------

/// Fetch a partner's catalog feed and pass the payload through verbatim
pub async fn partner_feed<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let partner = match ctx.store.get_partner(&id).await {
        Ok(Some(partner)) => partner,
        Ok(None) => return Err(not_found("Partner")),
        Err(e) => return Err(internal_error(e)),
    };

    if !partner.active {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("Partner is inactive")),
        ));
    }
    if partner.feed_url.is_none() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new("Partner has no feed URL configured")),
        ));
    }

    match ctx.partner_feeds.fetch_feed(&partner).await {
        Ok(payload) => Ok(Json(payload)),
        Err(e) => Err(bad_gateway(&format!("Feed fetch failed: {}", e))),
    }
}

/// DDEX party exchange is not wired up yet
pub async fn ddex_parties() -> ApiError {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(ErrorResponse::new("DDEX party exchange is not implemented")),
    )
}
