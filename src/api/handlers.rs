use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::AppContext;
use crate::logic::licensing::{self, LicenseDashboard};
use crate::logic::royalties::{self, RoyaltyStatement, RoyaltySummary};
use crate::logic::validate::{
    check_basis_points, check_currency, check_email, check_gln, check_gtin, check_ipi_number,
    check_period, check_positive_amount, check_required, FieldError, FieldErrors,
};
use crate::model::{
    Artist, ArtistStatus, ArtistUpdate, AuthUser, Contract, ContractStatus, ContractUpdate, Demo,
    DemoStatus, DemoUpdate, Id, IpiRecord, IpiRecordUpdate, License, LicenseKind, LicenseStatus,
    LicenseUpdate, Location, LocationKind, LocationUpdate, NewArtist, NewContract, NewDemo,
    NewIpiRecord, NewLicense, NewLocation, NewPartner, NewPayment, NewProduct, Partner,
    PartnerKind, PartnerUpdate, Payment, PaymentStatus, PaymentUpdate, Product, ProductUpdate,
    RegistrationStatus,
};
use crate::store::traits::Store;

pub type AppState<S> = Arc<AppContext<S>>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            fields: None,
        }
    }

    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            error: "Validation failed".to_string(),
            fields: Some(errors.errors),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn internal_error(e: anyhow::Error) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(&e.to_string())),
    )
}

pub(crate) fn not_found(what: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(&format!("{} not found", what))),
    )
}

fn unprocessable(errors: FieldErrors) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::validation(errors)),
    )
}

fn conflict(message: &str) -> ApiError {
    (StatusCode::CONFLICT, Json(ErrorResponse::new(message)))
}

/// Map a storage failure from an insert or update. Two requests can pass
/// the pre-insert uniqueness check at the same time; the loser hits the
/// unique index and must still surface as a conflict, not a server error.
pub(crate) fn upsert_error(e: anyhow::Error, conflict_message: &str) -> ApiError {
    let unique_violation = e.chain().any(|cause| {
        cause
            .downcast_ref::<sqlx::Error>()
            .and_then(|err| err.as_database_error())
            .map(|db| db.is_unique_violation())
            .unwrap_or(false)
    });

    if unique_violation {
        conflict(conflict_message)
    } else {
        internal_error(e)
    }
}

/// Destructive operations are restricted to admin accounts
pub(crate) fn require_admin(user: &AuthUser) -> Result<(), ApiError> {
    if user.is_admin {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new("Admin privileges required")),
        ))
    }
}

async fn check_artist_exists<S: Store>(
    store: &S,
    errors: &mut FieldErrors,
    artist_id: &Id,
) -> Result<(), ApiError> {
    match store.get_artist(artist_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => {
            errors.push("artist_id", "unknown artist");
            Ok(())
        }
        Err(e) => Err(internal_error(e)),
    }
}

// ---------------------------------------------------------------------------
// Artists
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ArtistListQuery {
    pub status: Option<ArtistStatus>,
}

fn validate_artist(artist: &Artist) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required(&mut errors, "name", &artist.name);
    if let Some(email) = &artist.email {
        check_email(&mut errors, "email", email);
    }
    if let Some(ipi) = &artist.ipi_number {
        check_ipi_number(&mut errors, "ipi_number", ipi);
    }
    errors
}

pub async fn list_artists<S: Store>(
    State(ctx): State<AppState<S>>,
    Query(query): Query<ArtistListQuery>,
) -> Result<Json<ListResponse<Artist>>, ApiError> {
    match ctx.store.list_artists(query.status).await {
        Ok(artists) => Ok(Json(ListResponse::new(artists))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn get_artist<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Artist>, ApiError> {
    match ctx.store.get_artist(&id).await {
        Ok(Some(artist)) => Ok(Json(artist)),
        Ok(None) => Err(not_found("Artist")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn create_artist<S: Store>(
    State(ctx): State<AppState<S>>,
    Json(new_artist): Json<NewArtist>,
) -> Result<(StatusCode, Json<Artist>), ApiError> {
    let artist = new_artist.into_artist();
    let errors = validate_artist(&artist);
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_artist(artist.clone()).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(artist))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn update_artist<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
    Json(update): Json<ArtistUpdate>,
) -> Result<Json<Artist>, ApiError> {
    let mut artist = match ctx.store.get_artist(&id).await {
        Ok(Some(artist)) => artist,
        Ok(None) => return Err(not_found("Artist")),
        Err(e) => return Err(internal_error(e)),
    };

    artist.apply_update(update);
    let errors = validate_artist(&artist);
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_artist(artist.clone()).await {
        Ok(()) => Ok(Json(artist)),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn delete_artist<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    require_admin(&user)?;

    match ctx.store.delete_artist(&id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("Artist")),
        Err(e) => Err(internal_error(e)),
    }
}

// ---------------------------------------------------------------------------
// Contracts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ContractListQuery {
    pub artist_id: Option<Id>,
    pub status: Option<ContractStatus>,
}

fn validate_contract(contract: &Contract) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required(&mut errors, "title", &contract.title);
    if let Some(bps) = contract.royalty_rate_bps {
        check_basis_points(&mut errors, "royalty_rate_bps", bps);
    }
    if let (Some(effective), Some(expiry)) = (contract.effective_date, contract.expiry_date) {
        if expiry < effective {
            errors.push("expiry_date", "must not precede the effective date");
        }
    }
    errors
}

pub async fn list_contracts<S: Store>(
    State(ctx): State<AppState<S>>,
    Query(query): Query<ContractListQuery>,
) -> Result<Json<ListResponse<Contract>>, ApiError> {
    match ctx
        .store
        .list_contracts(query.artist_id.as_ref(), query.status)
        .await
    {
        Ok(contracts) => Ok(Json(ListResponse::new(contracts))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn get_contract<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Contract>, ApiError> {
    match ctx.store.get_contract(&id).await {
        Ok(Some(contract)) => Ok(Json(contract)),
        Ok(None) => Err(not_found("Contract")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn create_contract<S: Store>(
    State(ctx): State<AppState<S>>,
    Json(new_contract): Json<NewContract>,
) -> Result<(StatusCode, Json<Contract>), ApiError> {
    let contract = new_contract.into_contract();
    let mut errors = validate_contract(&contract);
    check_artist_exists(&ctx.store, &mut errors, &contract.artist_id).await?;
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_contract(contract.clone()).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(contract))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn update_contract<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
    Json(update): Json<ContractUpdate>,
) -> Result<Json<Contract>, ApiError> {
    let mut contract = match ctx.store.get_contract(&id).await {
        Ok(Some(contract)) => contract,
        Ok(None) => return Err(not_found("Contract")),
        Err(e) => return Err(internal_error(e)),
    };

    contract.apply_update(update);
    let errors = validate_contract(&contract);
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_contract(contract.clone()).await {
        Ok(()) => Ok(Json(contract)),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn delete_contract<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    require_admin(&user)?;

    match ctx.store.delete_contract(&id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("Contract")),
        Err(e) => Err(internal_error(e)),
    }
}

// ---------------------------------------------------------------------------
// Demo submissions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DemoListQuery {
    pub status: Option<DemoStatus>,
}

fn validate_demo(demo: &Demo) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required(&mut errors, "title", &demo.title);
    if let Some(email) = &demo.contact_email {
        check_email(&mut errors, "contact_email", email);
    }
    errors
}

pub async fn list_demos<S: Store>(
    State(ctx): State<AppState<S>>,
    Query(query): Query<DemoListQuery>,
) -> Result<Json<ListResponse<Demo>>, ApiError> {
    match ctx.store.list_demos(query.status).await {
        Ok(demos) => Ok(Json(ListResponse::new(demos))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn get_demo<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Demo>, ApiError> {
    match ctx.store.get_demo(&id).await {
        Ok(Some(demo)) => Ok(Json(demo)),
        Ok(None) => Err(not_found("Demo")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn create_demo<S: Store>(
    State(ctx): State<AppState<S>>,
    Json(new_demo): Json<NewDemo>,
) -> Result<(StatusCode, Json<Demo>), ApiError> {
    let demo = new_demo.into_demo();
    let mut errors = validate_demo(&demo);
    if let Some(artist_id) = &demo.artist_id {
        check_artist_exists(&ctx.store, &mut errors, artist_id).await?;
    }
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_demo(demo.clone()).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(demo))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn update_demo<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
    Json(update): Json<DemoUpdate>,
) -> Result<Json<Demo>, ApiError> {
    let mut demo = match ctx.store.get_demo(&id).await {
        Ok(Some(demo)) => demo,
        Ok(None) => return Err(not_found("Demo")),
        Err(e) => return Err(internal_error(e)),
    };

    demo.apply_update(update);
    let errors = validate_demo(&demo);
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_demo(demo.clone()).await {
        Ok(()) => Ok(Json(demo)),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn delete_demo<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    require_admin(&user)?;

    match ctx.store.delete_demo(&id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("Demo")),
        Err(e) => Err(internal_error(e)),
    }
}

// ---------------------------------------------------------------------------
// Licenses
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LicenseListQuery {
    pub status: Option<LicenseStatus>,
    pub kind: Option<LicenseKind>,
    pub artist_id: Option<Id>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub expiring_within: Option<i64>,
}

/// Ten years, the longest expiry window the dashboard will compute
const MAX_DASHBOARD_WINDOW_DAYS: i64 = 3650;

fn validate_license(license: &License) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required(&mut errors, "licensee", &license.licensee);
    check_required(&mut errors, "work_title", &license.work_title);
    if let Some(fee) = license.fee_cents {
        check_positive_amount(&mut errors, "fee_cents", fee);
    }
    if let (Some(starts), Some(ends)) = (license.starts_on, license.ends_on) {
        if ends < starts {
            errors.push("ends_on", "must not precede the start date");
        }
    }
    errors
}

pub async fn list_licenses<S: Store>(
    State(ctx): State<AppState<S>>,
    Query(query): Query<LicenseListQuery>,
) -> Result<Json<ListResponse<License>>, ApiError> {
    match ctx
        .store
        .list_licenses(query.status, query.kind, query.artist_id.as_ref())
        .await
    {
        Ok(licenses) => Ok(Json(ListResponse::new(licenses))),
        Err(e) => Err(internal_error(e)),
    }
}

/// Aggregated licensing overview, including licenses expiring inside
/// the requested window (30 days by default)
pub async fn license_dashboard<S: Store>(
    State(ctx): State<AppState<S>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<LicenseDashboard>, ApiError> {
    let window = query.expiring_within.unwrap_or(30);
    if !(0..=MAX_DASHBOARD_WINDOW_DAYS).contains(&window) {
        let mut errors = FieldErrors::new();
        errors.push(
            "expiring_within",
            "must be between 0 and 3650 days",
        );
        return Err(unprocessable(errors));
    }

    let licenses = match ctx.store.list_licenses(None, None, None).await {
        Ok(licenses) => licenses,
        Err(e) => return Err(internal_error(e)),
    };

    Ok(Json(licensing::build_dashboard(&licenses, window)))
}

pub async fn get_license<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<License>, ApiError> {
    match ctx.store.get_license(&id).await {
        Ok(Some(license)) => Ok(Json(license)),
        Ok(None) => Err(not_found("License")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn create_license<S: Store>(
    State(ctx): State<AppState<S>>,
    Json(new_license): Json<NewLicense>,
) -> Result<(StatusCode, Json<License>), ApiError> {
    let license = new_license.into_license();
    let mut errors = validate_license(&license);
    if let Some(artist_id) = &license.artist_id {
        check_artist_exists(&ctx.store, &mut errors, artist_id).await?;
    }
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_license(license.clone()).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(license))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn update_license<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
    Json(update): Json<LicenseUpdate>,
) -> Result<Json<License>, ApiError> {
    let mut license = match ctx.store.get_license(&id).await {
        Ok(Some(license)) => license,
        Ok(None) => return Err(not_found("License")),
        Err(e) => return Err(internal_error(e)),
    };

    license.apply_update(update);
    let errors = validate_license(&license);
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_license(license.clone()).await {
        Ok(()) => Ok(Json(license)),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn delete_license<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    require_admin(&user)?;

    match ctx.store.delete_license(&id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("License")),
        Err(e) => Err(internal_error(e)),
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub artist_id: Option<Id>,
    pub registration: Option<RegistrationStatus>,
}

fn validate_product(product: &Product) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required(&mut errors, "title", &product.title);
    if let Some(gtin) = &product.gtin {
        check_gtin(&mut errors, "gtin", gtin);
    }
    errors
}

/// Reject a GTIN already carried by a different product
async fn check_gtin_unique<S: Store>(
    store: &S,
    gtin: &str,
    own_id: Option<&Id>,
) -> Result<(), ApiError> {
    match store.find_product_by_gtin(gtin).await {
        Ok(Some(existing)) if Some(&existing.id) != own_id => Err(conflict(&format!(
            "GTIN {} is already assigned to another product",
            gtin
        ))),
        Ok(_) => Ok(()),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn list_products<S: Store>(
    State(ctx): State<AppState<S>>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ListResponse<Product>>, ApiError> {
    match ctx
        .store
        .list_products(query.artist_id.as_ref(), query.registration)
        .await
    {
        Ok(products) => Ok(Json(ListResponse::new(products))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn get_product<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Product>, ApiError> {
    match ctx.store.get_product(&id).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err(not_found("Product")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn create_product<S: Store>(
    State(ctx): State<AppState<S>>,
    Json(new_product): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = new_product.into_product();
    let mut errors = validate_product(&product);
    if let Some(artist_id) = &product.artist_id {
        check_artist_exists(&ctx.store, &mut errors, artist_id).await?;
    }
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }
    if let Some(gtin) = &product.gtin {
        check_gtin_unique(&ctx.store, gtin, None).await?;
    }

    match ctx.store.upsert_product(product.clone()).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(product))),
        Err(e) => Err(upsert_error(
            e,
            "GTIN is already assigned to another product",
        )),
    }
}

pub async fn update_product<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<Product>, ApiError> {
    let mut product = match ctx.store.get_product(&id).await {
        Ok(Some(product)) => product,
        Ok(None) => return Err(not_found("Product")),
        Err(e) => return Err(internal_error(e)),
    };

    product.apply_update(update);
    let errors = validate_product(&product);
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }
    if let Some(gtin) = &product.gtin {
        check_gtin_unique(&ctx.store, gtin, Some(&product.id)).await?;
    }

    match ctx.store.upsert_product(product.clone()).await {
        Ok(()) => Ok(Json(product)),
        Err(e) => Err(upsert_error(
            e,
            "GTIN is already assigned to another product",
        )),
    }
}

pub async fn delete_product<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    require_admin(&user)?;

    match ctx.store.delete_product(&id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("Product")),
        Err(e) => Err(internal_error(e)),
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LocationListQuery {
    pub kind: Option<LocationKind>,
}

fn validate_location(location: &Location) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required(&mut errors, "name", &location.name);
    if let Some(gln) = &location.gln {
        check_gln(&mut errors, "gln", gln);
    }
    errors
}

pub async fn list_locations<S: Store>(
    State(ctx): State<AppState<S>>,
    Query(query): Query<LocationListQuery>,
) -> Result<Json<ListResponse<Location>>, ApiError> {
    match ctx.store.list_locations(query.kind).await {
        Ok(locations) => Ok(Json(ListResponse::new(locations))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn get_location<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Location>, ApiError> {
    match ctx.store.get_location(&id).await {
        Ok(Some(location)) => Ok(Json(location)),
        Ok(None) => Err(not_found("Location")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn create_location<S: Store>(
    State(ctx): State<AppState<S>>,
    Json(new_location): Json<NewLocation>,
) -> Result<(StatusCode, Json<Location>), ApiError> {
    let location = new_location.into_location();
    let errors = validate_location(&location);
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_location(location.clone()).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(location))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn update_location<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
    Json(update): Json<LocationUpdate>,
) -> Result<Json<Location>, ApiError> {
    let mut location = match ctx.store.get_location(&id).await {
        Ok(Some(location)) => location,
        Ok(None) => return Err(not_found("Location")),
        Err(e) => return Err(internal_error(e)),
    };

    location.apply_update(update);
    let errors = validate_location(&location);
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_location(location.clone()).await {
        Ok(()) => Ok(Json(location)),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn delete_location<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    require_admin(&user)?;

    match ctx.store.delete_location(&id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("Location")),
        Err(e) => Err(internal_error(e)),
    }
}

// ---------------------------------------------------------------------------
// IPI records
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct IpiListQuery {
    pub artist_id: Option<Id>,
}

fn validate_ipi_record(record: &IpiRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required(&mut errors, "party_name", &record.party_name);
    check_ipi_number(&mut errors, "ipi_number", &record.ipi_number);
    errors
}

async fn check_ipi_unique<S: Store>(
    store: &S,
    ipi_number: &str,
    own_id: Option<&Id>,
) -> Result<(), ApiError> {
    match store.find_ipi_by_number(ipi_number).await {
        Ok(Some(existing)) if Some(&existing.id) != own_id => Err(conflict(&format!(
            "IPI number {} is already registered",
            ipi_number
        ))),
        Ok(_) => Ok(()),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn list_ipi_records<S: Store>(
    State(ctx): State<AppState<S>>,
    Query(query): Query<IpiListQuery>,
) -> Result<Json<ListResponse<IpiRecord>>, ApiError> {
    match ctx.store.list_ipi_records(query.artist_id.as_ref()).await {
        Ok(records) => Ok(Json(ListResponse::new(records))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn get_ipi_record<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<IpiRecord>, ApiError> {
    match ctx.store.get_ipi_record(&id).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(not_found("IPI record")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn create_ipi_record<S: Store>(
    State(ctx): State<AppState<S>>,
    Json(new_record): Json<NewIpiRecord>,
) -> Result<(StatusCode, Json<IpiRecord>), ApiError> {
    let record = new_record.into_record();
    let mut errors = validate_ipi_record(&record);
    if let Some(artist_id) = &record.artist_id {
        check_artist_exists(&ctx.store, &mut errors, artist_id).await?;
    }
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }
    check_ipi_unique(&ctx.store, &record.ipi_number, None).await?;

    match ctx.store.upsert_ipi_record(record.clone()).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(record))),
        Err(e) => Err(upsert_error(e, "IPI number is already registered")),
    }
}

pub async fn update_ipi_record<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
    Json(update): Json<IpiRecordUpdate>,
) -> Result<Json<IpiRecord>, ApiError> {
    let mut record = match ctx.store.get_ipi_record(&id).await {
        Ok(Some(record)) => record,
        Ok(None) => return Err(not_found("IPI record")),
        Err(e) => return Err(internal_error(e)),
    };

    record.apply_update(update);
    let errors = validate_ipi_record(&record);
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }
    check_ipi_unique(&ctx.store, &record.ipi_number, Some(&record.id)).await?;

    match ctx.store.upsert_ipi_record(record.clone()).await {
        Ok(()) => Ok(Json(record)),
        Err(e) => Err(upsert_error(e, "IPI number is already registered")),
    }
}

pub async fn delete_ipi_record<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    require_admin(&user)?;

    match ctx.store.delete_ipi_record(&id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("IPI record")),
        Err(e) => Err(internal_error(e)),
    }
}

// ---------------------------------------------------------------------------
// Partners
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PartnerListQuery {
    pub kind: Option<PartnerKind>,
    pub active: Option<bool>,
}

fn validate_partner(partner: &Partner) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_required(&mut errors, "name", &partner.name);
    if let Some(email) = &partner.contact_email {
        check_email(&mut errors, "contact_email", email);
    }
    errors
}

pub async fn list_partners<S: Store>(
    State(ctx): State<AppState<S>>,
    Query(query): Query<PartnerListQuery>,
) -> Result<Json<ListResponse<Partner>>, ApiError> {
    match ctx.store.list_partners(query.kind, query.active).await {
        Ok(partners) => Ok(Json(ListResponse::new(partners))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn get_partner<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Partner>, ApiError> {
    match ctx.store.get_partner(&id).await {
        Ok(Some(partner)) => Ok(Json(partner)),
        Ok(None) => Err(not_found("Partner")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn create_partner<S: Store>(
    State(ctx): State<AppState<S>>,
    Json(new_partner): Json<NewPartner>,
) -> Result<(StatusCode, Json<Partner>), ApiError> {
    let partner = new_partner.into_partner();
    let errors = validate_partner(&partner);
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_partner(partner.clone()).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(partner))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn update_partner<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
    Json(update): Json<PartnerUpdate>,
) -> Result<Json<Partner>, ApiError> {
    let mut partner = match ctx.store.get_partner(&id).await {
        Ok(Some(partner)) => partner,
        Ok(None) => return Err(not_found("Partner")),
        Err(e) => return Err(internal_error(e)),
    };

    partner.apply_update(update);
    let errors = validate_partner(&partner);
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_partner(partner.clone()).await {
        Ok(()) => Ok(Json(partner)),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn delete_partner<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    require_admin(&user)?;

    match ctx.store.delete_partner(&id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("Partner")),
        Err(e) => Err(internal_error(e)),
    }
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PaymentListQuery {
    pub artist_id: Option<Id>,
    pub status: Option<PaymentStatus>,
    pub period: Option<String>,
}

fn validate_payment(payment: &Payment) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_positive_amount(&mut errors, "amount_cents", payment.amount_cents);
    check_currency(&mut errors, "currency", &payment.currency);
    check_period(&mut errors, "period", &payment.period);
    errors
}

pub async fn list_payments<S: Store>(
    State(ctx): State<AppState<S>>,
    Query(query): Query<PaymentListQuery>,
) -> Result<Json<ListResponse<Payment>>, ApiError> {
    match ctx
        .store
        .list_payments(
            query.artist_id.as_ref(),
            query.status,
            query.period.as_deref(),
        )
        .await
    {
        Ok(payments) => Ok(Json(ListResponse::new(payments))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn get_payment<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Payment>, ApiError> {
    match ctx.store.get_payment(&id).await {
        Ok(Some(payment)) => Ok(Json(payment)),
        Ok(None) => Err(not_found("Payment")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn create_payment<S: Store>(
    State(ctx): State<AppState<S>>,
    Json(new_payment): Json<NewPayment>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    let payment = new_payment.into_payment();
    let mut errors = validate_payment(&payment);
    check_artist_exists(&ctx.store, &mut errors, &payment.artist_id).await?;
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_payment(payment.clone()).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(payment))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn update_payment<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
    Json(update): Json<PaymentUpdate>,
) -> Result<Json<Payment>, ApiError> {
    let mut payment = match ctx.store.get_payment(&id).await {
        Ok(Some(payment)) => payment,
        Ok(None) => return Err(not_found("Payment")),
        Err(e) => return Err(internal_error(e)),
    };

    payment.apply_update(update);
    let errors = validate_payment(&payment);
    if !errors.is_empty() {
        return Err(unprocessable(errors));
    }

    match ctx.store.upsert_payment(payment.clone()).await {
        Ok(()) => Ok(Json(payment)),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn delete_payment<S: Store>(
    State(ctx): State<AppState<S>>,
    user: AuthUser,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    require_admin(&user)?;

    match ctx.store.delete_payment(&id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("Payment")),
        Err(e) => Err(internal_error(e)),
    }
}

// ---------------------------------------------------------------------------
// Royalty reporting
// ---------------------------------------------------------------------------

pub async fn artist_royalty_summary<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<RoyaltySummary>, ApiError> {
    match ctx.store.get_artist(&id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(not_found("Artist")),
        Err(e) => return Err(internal_error(e)),
    }

    let payments = match ctx.store.list_payments(Some(&id), None, None).await {
        Ok(payments) => payments,
        Err(e) => return Err(internal_error(e)),
    };

    Ok(Json(royalties::summarize(&id, &payments)))
}

pub async fn artist_royalty_statement<S: Store>(
    State(ctx): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<RoyaltyStatement>, ApiError> {
    let artist = match ctx.store.get_artist(&id).await {
        Ok(Some(artist)) => artist,
        Ok(None) => return Err(not_found("Artist")),
        Err(e) => return Err(internal_error(e)),
    };

    let payments = match ctx.store.list_payments(Some(&id), None, None).await {
        Ok(payments) => payments,
        Err(e) => return Err(internal_error(e)),
    };

    Ok(Json(royalties::build_statement(&artist, &payments)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(is_admin: bool) -> AuthUser {
        AuthUser {
            user_id: "user-1".to_string(),
            email: "someone@label.example".to_string(),
            is_admin,
        }
    }

    #[test]
    fn require_admin_accepts_admin_accounts() {
        assert!(require_admin(&auth_user(true)).is_ok());
    }

    #[test]
    fn require_admin_rejects_member_accounts() {
        let (status, body) = require_admin(&auth_user(false)).unwrap_err();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.error, "Admin privileges required");
    }

    #[derive(Debug)]
    struct DuplicateKey;

    impl std::fmt::Display for DuplicateKey {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("duplicate key value violates unique constraint")
        }
    }

    impl std::error::Error for DuplicateKey {}

    impl sqlx::error::DatabaseError for DuplicateKey {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn upsert_error_maps_unique_violation_to_conflict() {
        let db_error: anyhow::Error = sqlx::Error::Database(Box::new(DuplicateKey)).into();
        let wrapped = db_error.context("Failed to upsert product");

        let (status, body) = upsert_error(wrapped, "GTIN is already assigned to another product");
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error, "GTIN is already assigned to another product");
    }

    #[test]
    fn upsert_error_keeps_other_failures_internal() {
        let (status, _) = upsert_error(anyhow::anyhow!("connection reset"), "unused");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
