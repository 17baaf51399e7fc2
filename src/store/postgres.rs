use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

use crate::model::{
    Artist, ArtistStatus, Contract, ContractKind, ContractStatus, Demo, DemoStatus, Id, IpiRecord,
    IpiRole, License, LicenseKind, LicenseStatus, Location, LocationKind, Partner, PartnerKind,
    PasskeyCredential, Payment, PaymentKind, PaymentStatus, Product, ProductFormat,
    RegistrationStatus, Session, UserAccount,
};
use crate::store::traits::{
    ArtistStore, ContractStore, DemoStore, IpiStore, LicenseStore, LocationStore, PartnerStore,
    PasskeyStore, PaymentStore, ProductStore, SessionStore, Store, UserStore,
};

/// Table definitions, applied idempotently at startup
const MIGRATIONS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS artists (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        sort_name TEXT,
        ipi_number TEXT,
        email TEXT,
        status TEXT NOT NULL,
        notes TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS contracts (
        id TEXT PRIMARY KEY,
        artist_id TEXT NOT NULL,
        title TEXT NOT NULL,
        kind TEXT NOT NULL,
        status TEXT NOT NULL,
        effective_date DATE,
        expiry_date DATE,
        royalty_rate_bps INTEGER,
        terms TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS demos (
        id TEXT PRIMARY KEY,
        artist_id TEXT,
        title TEXT NOT NULL,
        submitted_by TEXT,
        contact_email TEXT,
        status TEXT NOT NULL,
        reviewed_by TEXT,
        notes TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS licenses (
        id TEXT PRIMARY KEY,
        licensee TEXT NOT NULL,
        work_title TEXT NOT NULL,
        artist_id TEXT,
        kind TEXT NOT NULL,
        status TEXT NOT NULL,
        territory TEXT,
        starts_on DATE,
        ends_on DATE,
        fee_cents BIGINT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS products (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        artist_id TEXT,
        format TEXT NOT NULL,
        gtin TEXT UNIQUE,
        release_date DATE,
        label_name TEXT,
        registration TEXT NOT NULL,
        registry_ref TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS locations (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        gln TEXT,
        address TEXT,
        city TEXT,
        country TEXT,
        kind TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS ipi_records (
        id TEXT PRIMARY KEY,
        party_name TEXT NOT NULL,
        ipi_number TEXT NOT NULL UNIQUE,
        role TEXT NOT NULL,
        artist_id TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS partners (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        kind TEXT NOT NULL,
        contact_email TEXT,
        feed_url TEXT,
        active BOOLEAN NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS payments (
        id TEXT PRIMARY KEY,
        artist_id TEXT NOT NULL,
        amount_cents BIGINT NOT NULL,
        currency TEXT NOT NULL,
        period TEXT NOT NULL,
        kind TEXT NOT NULL,
        status TEXT NOT NULL,
        processor_ref TEXT,
        memo TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        display_name TEXT,
        password_hash TEXT NOT NULL,
        salt TEXT NOT NULL,
        is_admin BOOLEAN NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS sessions (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        token_hash TEXT NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL,
        expires_at TIMESTAMPTZ NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS passkeys (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        credential_id TEXT NOT NULL UNIQUE,
        public_key TEXT NOT NULL,
        label TEXT,
        created_at TIMESTAMPTZ NOT NULL
    )"#,
];

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Apply the embedded DDL
    pub async fn migrate(&self) -> Result<()> {
        for statement in MIGRATIONS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to run database migration")?;
        }
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn artist_from_row(row: &sqlx::postgres::PgRow) -> Artist {
    let status: String = row.get("status");
    Artist {
        id: row.get("id"),
        name: row.get("name"),
        sort_name: row.get("sort_name"),
        ipi_number: row.get("ipi_number"),
        email: row.get("email"),
        status: ArtistStatus::parse(&status).unwrap_or(ArtistStatus::Pending), // Default fallback
        notes: row.get("notes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait::async_trait]
impl ArtistStore for PostgresStore {
    async fn get_artist(&self, id: &Id) -> Result<Option<Artist>> {
        let row = sqlx::query("SELECT * FROM artists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch artist")?;

        Ok(row.as_ref().map(artist_from_row))
    }

    async fn list_artists(&self, status: Option<ArtistStatus>) -> Result<Vec<Artist>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM artists
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY name, id
            "#,
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list artists")?;

        Ok(rows.iter().map(artist_from_row).collect())
    }

    async fn upsert_artist(&self, artist: Artist) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO artists (id, name, sort_name, ipi_number, email, status, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                sort_name = EXCLUDED.sort_name,
                ipi_number = EXCLUDED.ipi_number,
                email = EXCLUDED.email,
                status = EXCLUDED.status,
                notes = EXCLUDED.notes,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&artist.id)
        .bind(&artist.name)
        .bind(&artist.sort_name)
        .bind(&artist.ipi_number)
        .bind(&artist.email)
        .bind(artist.status.as_str())
        .bind(&artist.notes)
        .bind(artist.created_at)
        .bind(artist.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to upsert artist")?;

        Ok(())
    }

    async fn delete_artist(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete artist")?;

        Ok(result.rows_affected() > 0)
    }
}

fn contract_from_row(row: &sqlx::postgres::PgRow) -> Contract {
    let kind: String = row.get("kind");
    let status: String = row.get("status");
    Contract {
        id: row.get("id"),
        artist_id: row.get("artist_id"),
        title: row.get("title"),
        kind: ContractKind::parse(&kind).unwrap_or(ContractKind::Recording), // Default fallback
        status: ContractStatus::parse(&status).unwrap_or(ContractStatus::Draft), // Default fallback
        effective_date: row.get("effective_date"),
        expiry_date: row.get("expiry_date"),
        royalty_rate_bps: row.get("royalty_rate_bps"),
        terms: row.get("terms"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait::async_trait]
impl ContractStore for PostgresStore {
    async fn get_contract(&self, id: &Id) -> Result<Option<Contract>> {
        let row = sqlx::query("SELECT * FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch contract")?;

        Ok(row.as_ref().map(contract_from_row))
    }

    async fn list_contracts(
        &self,
        artist_id: Option<&Id>,
        status: Option<ContractStatus>,
    ) -> Result<Vec<Contract>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM contracts
            WHERE ($1::text IS NULL OR artist_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at, id
            "#,
        )
        .bind(artist_id)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list contracts")?;

        Ok(rows.iter().map(contract_from_row).collect())
    }

    async fn upsert_contract(&self, contract: Contract) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO contracts (id, artist_id, title, kind, status, effective_date, expiry_date,
                                   royalty_rate_bps, terms, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                artist_id = EXCLUDED.artist_id,
                title = EXCLUDED.title,
                kind = EXCLUDED.kind,
                status = EXCLUDED.status,
                effective_date = EXCLUDED.effective_date,
                expiry_date = EXCLUDED.expiry_date,
                royalty_rate_bps = EXCLUDED.royalty_rate_bps,
                terms = EXCLUDED.terms,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&contract.id)
        .bind(&contract.artist_id)
        .bind(&contract.title)
        .bind(contract.kind.as_str())
        .bind(contract.status.as_str())
        .bind(contract.effective_date)
        .bind(contract.expiry_date)
        .bind(contract.royalty_rate_bps)
        .bind(&contract.terms)
        .bind(contract.created_at)
        .bind(contract.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to upsert contract")?;

        Ok(())
    }

    async fn delete_contract(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete contract")?;

        Ok(result.rows_affected() > 0)
    }
}

fn demo_from_row(row: &sqlx::postgres::PgRow) -> Demo {
    let status: String = row.get("status");
    Demo {
        id: row.get("id"),
        artist_id: row.get("artist_id"),
        title: row.get("title"),
        submitted_by: row.get("submitted_by"),
        contact_email: row.get("contact_email"),
        status: DemoStatus::parse(&status).unwrap_or(DemoStatus::Received), // Default fallback
        reviewed_by: row.get("reviewed_by"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait::async_trait]
impl DemoStore for PostgresStore {
    async fn get_demo(&self, id: &Id) -> Result<Option<Demo>> {
        let row = sqlx::query("SELECT * FROM demos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch demo")?;

        Ok(row.as_ref().map(demo_from_row))
    }

    async fn list_demos(&self, status: Option<DemoStatus>) -> Result<Vec<Demo>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM demos
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at, id
            "#,
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list demos")?;

        Ok(rows.iter().map(demo_from_row).collect())
    }

    async fn upsert_demo(&self, demo: Demo) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO demos (id, artist_id, title, submitted_by, contact_email, status,
                               reviewed_by, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                artist_id = EXCLUDED.artist_id,
                title = EXCLUDED.title,
                submitted_by = EXCLUDED.submitted_by,
                contact_email = EXCLUDED.contact_email,
                status = EXCLUDED.status,
                reviewed_by = EXCLUDED.reviewed_by,
                notes = EXCLUDED.notes,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&demo.id)
        .bind(&demo.artist_id)
        .bind(&demo.title)
        .bind(&demo.submitted_by)
        .bind(&demo.contact_email)
        .bind(demo.status.as_str())
        .bind(&demo.reviewed_by)
        .bind(&demo.notes)
        .bind(demo.created_at)
        .bind(demo.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to upsert demo")?;

        Ok(())
    }

    async fn delete_demo(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM demos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete demo")?;

        Ok(result.rows_affected() > 0)
    }
}

fn license_from_row(row: &sqlx::postgres::PgRow) -> License {
    let kind: String = row.get("kind");
    let status: String = row.get("status");
    License {
        id: row.get("id"),
        licensee: row.get("licensee"),
        work_title: row.get("work_title"),
        artist_id: row.get("artist_id"),
        kind: LicenseKind::parse(&kind).unwrap_or(LicenseKind::Mechanical), // Default fallback
        status: LicenseStatus::parse(&status).unwrap_or(LicenseStatus::Pending), // Default fallback
        territory: row.get("territory"),
        starts_on: row.get("starts_on"),
        ends_on: row.get("ends_on"),
        fee_cents: row.get("fee_cents"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait::async_trait]
impl LicenseStore for PostgresStore {
    async fn get_license(&self, id: &Id) -> Result<Option<License>> {
        let row = sqlx::query("SELECT * FROM licenses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch license")?;

        Ok(row.as_ref().map(license_from_row))
    }

    async fn list_licenses(
        &self,
        status: Option<LicenseStatus>,
        kind: Option<LicenseKind>,
        artist_id: Option<&Id>,
    ) -> Result<Vec<License>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM licenses
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR kind = $2)
              AND ($3::text IS NULL OR artist_id = $3)
            ORDER BY created_at, id
            "#,
        )
        .bind(status.map(|s| s.as_str()))
        .bind(kind.map(|k| k.as_str()))
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list licenses")?;

        Ok(rows.iter().map(license_from_row).collect())
    }

    async fn upsert_license(&self, license: License) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO licenses (id, licensee, work_title, artist_id, kind, status, territory,
                                  starts_on, ends_on, fee_cents, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO UPDATE SET
                licensee = EXCLUDED.licensee,
                work_title = EXCLUDED.work_title,
                artist_id = EXCLUDED.artist_id,
                kind = EXCLUDED.kind,
                status = EXCLUDED.status,
                territory = EXCLUDED.territory,
                starts_on = EXCLUDED.starts_on,
                ends_on = EXCLUDED.ends_on,
                fee_cents = EXCLUDED.fee_cents,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&license.id)
        .bind(&license.licensee)
        .bind(&license.work_title)
        .bind(&license.artist_id)
        .bind(license.kind.as_str())
        .bind(license.status.as_str())
        .bind(&license.territory)
        .bind(license.starts_on)
        .bind(license.ends_on)
        .bind(license.fee_cents)
        .bind(license.created_at)
        .bind(license.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to upsert license")?;

        Ok(())
    }

    async fn delete_license(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM licenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete license")?;

        Ok(result.rows_affected() > 0)
    }
}

fn product_from_row(row: &sqlx::postgres::PgRow) -> Product {
    let format: String = row.get("format");
    let registration: String = row.get("registration");
    Product {
        id: row.get("id"),
        title: row.get("title"),
        artist_id: row.get("artist_id"),
        format: ProductFormat::parse(&format).unwrap_or(ProductFormat::Album), // Default fallback
        gtin: row.get("gtin"),
        release_date: row.get("release_date"),
        label_name: row.get("label_name"),
        registration: RegistrationStatus::parse(&registration)
            .unwrap_or(RegistrationStatus::Unregistered), // Default fallback
        registry_ref: row.get("registry_ref"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait::async_trait]
impl ProductStore for PostgresStore {
    async fn get_product(&self, id: &Id) -> Result<Option<Product>> {
        let row = sqlx::query("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch product")?;

        Ok(row.as_ref().map(product_from_row))
    }

    async fn list_products(
        &self,
        artist_id: Option<&Id>,
        registration: Option<RegistrationStatus>,
    ) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM products
            WHERE ($1::text IS NULL OR artist_id = $1)
              AND ($2::text IS NULL OR registration = $2)
            ORDER BY created_at, id
            "#,
        )
        .bind(artist_id)
        .bind(registration.map(|r| r.as_str()))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list products")?;

        Ok(rows.iter().map(product_from_row).collect())
    }

    async fn find_product_by_gtin(&self, gtin: &str) -> Result<Option<Product>> {
        let row = sqlx::query("SELECT * FROM products WHERE gtin = $1")
            .bind(gtin)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch product by GTIN")?;

        Ok(row.as_ref().map(product_from_row))
    }

    async fn upsert_product(&self, product: Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, title, artist_id, format, gtin, release_date, label_name,
                                  registration, registry_ref, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                artist_id = EXCLUDED.artist_id,
                format = EXCLUDED.format,
                gtin = EXCLUDED.gtin,
                release_date = EXCLUDED.release_date,
                label_name = EXCLUDED.label_name,
                registration = EXCLUDED.registration,
                registry_ref = EXCLUDED.registry_ref,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&product.id)
        .bind(&product.title)
        .bind(&product.artist_id)
        .bind(product.format.as_str())
        .bind(&product.gtin)
        .bind(product.release_date)
        .bind(&product.label_name)
        .bind(product.registration.as_str())
        .bind(&product.registry_ref)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to upsert product")?;

        Ok(())
    }

    async fn delete_product(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete product")?;

        Ok(result.rows_affected() > 0)
    }
}

fn location_from_row(row: &sqlx::postgres::PgRow) -> Location {
    let kind: String = row.get("kind");
    Location {
        id: row.get("id"),
        name: row.get("name"),
        gln: row.get("gln"),
        address: row.get("address"),
        city: row.get("city"),
        country: row.get("country"),
        kind: LocationKind::parse(&kind).unwrap_or(LocationKind::Office), // Default fallback
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait::async_trait]
impl LocationStore for PostgresStore {
    async fn get_location(&self, id: &Id) -> Result<Option<Location>> {
        let row = sqlx::query("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch location")?;

        Ok(row.as_ref().map(location_from_row))
    }

    async fn list_locations(&self, kind: Option<LocationKind>) -> Result<Vec<Location>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM locations
            WHERE ($1::text IS NULL OR kind = $1)
            ORDER BY name, id
            "#,
        )
        .bind(kind.map(|k| k.as_str()))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list locations")?;

        Ok(rows.iter().map(location_from_row).collect())
    }

    async fn upsert_location(&self, location: Location) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO locations (id, name, gln, address, city, country, kind, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                gln = EXCLUDED.gln,
                address = EXCLUDED.address,
                city = EXCLUDED.city,
                country = EXCLUDED.country,
                kind = EXCLUDED.kind,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&location.id)
        .bind(&location.name)
        .bind(&location.gln)
        .bind(&location.address)
        .bind(&location.city)
        .bind(&location.country)
        .bind(location.kind.as_str())
        .bind(location.created_at)
        .bind(location.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to upsert location")?;

        Ok(())
    }

    async fn delete_location(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete location")?;

        Ok(result.rows_affected() > 0)
    }
}

fn ipi_from_row(row: &sqlx::postgres::PgRow) -> IpiRecord {
    let role: String = row.get("role");
    IpiRecord {
        id: row.get("id"),
        party_name: row.get("party_name"),
        ipi_number: row.get("ipi_number"),
        role: IpiRole::parse(&role).unwrap_or(IpiRole::Performer), // Default fallback
        artist_id: row.get("artist_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait::async_trait]
impl IpiStore for PostgresStore {
    async fn get_ipi_record(&self, id: &Id) -> Result<Option<IpiRecord>> {
        let row = sqlx::query("SELECT * FROM ipi_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch IPI record")?;

        Ok(row.as_ref().map(ipi_from_row))
    }

    async fn list_ipi_records(&self, artist_id: Option<&Id>) -> Result<Vec<IpiRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM ipi_records
            WHERE ($1::text IS NULL OR artist_id = $1)
            ORDER BY party_name, id
            "#,
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list IPI records")?;

        Ok(rows.iter().map(ipi_from_row).collect())
    }

    async fn find_ipi_by_number(&self, ipi_number: &str) -> Result<Option<IpiRecord>> {
        let row = sqlx::query("SELECT * FROM ipi_records WHERE ipi_number = $1")
            .bind(ipi_number)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch IPI record by number")?;

        Ok(row.as_ref().map(ipi_from_row))
    }

    async fn upsert_ipi_record(&self, record: IpiRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ipi_records (id, party_name, ipi_number, role, artist_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                party_name = EXCLUDED.party_name,
                ipi_number = EXCLUDED.ipi_number,
                role = EXCLUDED.role,
                artist_id = EXCLUDED.artist_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&record.id)
        .bind(&record.party_name)
        .bind(&record.ipi_number)
        .bind(record.role.as_str())
        .bind(&record.artist_id)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to upsert IPI record")?;

        Ok(())
    }

    async fn delete_ipi_record(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ipi_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete IPI record")?;

        Ok(result.rows_affected() > 0)
    }
}

fn partner_from_row(row: &sqlx::postgres::PgRow) -> Partner {
    let kind: String = row.get("kind");
    Partner {
        id: row.get("id"),
        name: row.get("name"),
        kind: PartnerKind::parse(&kind).unwrap_or(PartnerKind::Distributor), // Default fallback
        contact_email: row.get("contact_email"),
        feed_url: row.get("feed_url"),
        active: row.get("active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait::async_trait]
impl PartnerStore for PostgresStore {
    async fn get_partner(&self, id: &Id) -> Result<Option<Partner>> {
        let row = sqlx::query("SELECT * FROM partners WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch partner")?;

        Ok(row.as_ref().map(partner_from_row))
    }

    async fn list_partners(
        &self,
        kind: Option<PartnerKind>,
        active: Option<bool>,
    ) -> Result<Vec<Partner>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM partners
            WHERE ($1::text IS NULL OR kind = $1)
              AND ($2::boolean IS NULL OR active = $2)
            ORDER BY name, id
            "#,
        )
        .bind(kind.map(|k| k.as_str()))
        .bind(active)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list partners")?;

        Ok(rows.iter().map(partner_from_row).collect())
    }

    async fn upsert_partner(&self, partner: Partner) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO partners (id, name, kind, contact_email, feed_url, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                kind = EXCLUDED.kind,
                contact_email = EXCLUDED.contact_email,
                feed_url = EXCLUDED.feed_url,
                active = EXCLUDED.active,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&partner.id)
        .bind(&partner.name)
        .bind(partner.kind.as_str())
        .bind(&partner.contact_email)
        .bind(&partner.feed_url)
        .bind(partner.active)
        .bind(partner.created_at)
        .bind(partner.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to upsert partner")?;

        Ok(())
    }

    async fn delete_partner(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete partner")?;

        Ok(result.rows_affected() > 0)
    }
}

fn payment_from_row(row: &sqlx::postgres::PgRow) -> Payment {
    let kind: String = row.get("kind");
    let status: String = row.get("status");
    Payment {
        id: row.get("id"),
        artist_id: row.get("artist_id"),
        amount_cents: row.get("amount_cents"),
        currency: row.get("currency"),
        period: row.get("period"),
        kind: PaymentKind::parse(&kind).unwrap_or(PaymentKind::Royalty), // Default fallback
        status: PaymentStatus::parse(&status).unwrap_or(PaymentStatus::Pending), // Default fallback
        processor_ref: row.get("processor_ref"),
        memo: row.get("memo"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait::async_trait]
impl PaymentStore for PostgresStore {
    async fn get_payment(&self, id: &Id) -> Result<Option<Payment>> {
        let row = sqlx::query("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch payment")?;

        Ok(row.as_ref().map(payment_from_row))
    }

    async fn list_payments(
        &self,
        artist_id: Option<&Id>,
        status: Option<PaymentStatus>,
        period: Option<&str>,
    ) -> Result<Vec<Payment>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM payments
            WHERE ($1::text IS NULL OR artist_id = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR period = $3)
            ORDER BY period, id
            "#,
        )
        .bind(artist_id)
        .bind(status.map(|s| s.as_str()))
        .bind(period)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list payments")?;

        Ok(rows.iter().map(payment_from_row).collect())
    }

    async fn upsert_payment(&self, payment: Payment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, artist_id, amount_cents, currency, period, kind, status,
                                  processor_ref, memo, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                artist_id = EXCLUDED.artist_id,
                amount_cents = EXCLUDED.amount_cents,
                currency = EXCLUDED.currency,
                period = EXCLUDED.period,
                kind = EXCLUDED.kind,
                status = EXCLUDED.status,
                processor_ref = EXCLUDED.processor_ref,
                memo = EXCLUDED.memo,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&payment.id)
        .bind(&payment.artist_id)
        .bind(payment.amount_cents)
        .bind(&payment.currency)
        .bind(&payment.period)
        .bind(payment.kind.as_str())
        .bind(payment.status.as_str())
        .bind(&payment.processor_ref)
        .bind(&payment.memo)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to upsert payment")?;

        Ok(())
    }

    async fn delete_payment(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete payment")?;

        Ok(result.rows_affected() > 0)
    }
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> UserAccount {
    UserAccount {
        id: row.get("id"),
        email: row.get("email"),
        display_name: row.get("display_name"),
        password_hash: row.get("password_hash"),
        salt: row.get("salt"),
        is_admin: row.get("is_admin"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresStore {
    async fn get_user(&self, id: &Id) -> Result<Option<UserAccount>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user")?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by email")?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn upsert_user(&self, user: UserAccount) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, display_name, password_hash, salt, is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                display_name = EXCLUDED.display_name,
                password_hash = EXCLUDED.password_hash,
                salt = EXCLUDED.salt,
                is_admin = EXCLUDED.is_admin,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(&user.salt)
        .bind(user.is_admin)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to upsert user")?;

        Ok(())
    }
}

fn session_from_row(row: &sqlx::postgres::PgRow) -> Session {
    Session {
        id: row.get("id"),
        user_id: row.get("user_id"),
        token_hash: row.get("token_hash"),
        created_at: row.get("created_at"),
        expires_at: row.get("expires_at"),
    }
}

#[async_trait::async_trait]
impl SessionStore for PostgresStore {
    async fn insert_session(&self, session: Session) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, token_hash, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(&session.token_hash)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert session")?;

        Ok(())
    }

    async fn get_session_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>> {
        let row = sqlx::query("SELECT * FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch session")?;

        Ok(row.as_ref().map(session_from_row))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .context("Failed to delete session")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired_sessions(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .context("Failed to delete expired sessions")?;

        Ok(result.rows_affected())
    }
}

fn passkey_from_row(row: &sqlx::postgres::PgRow) -> PasskeyCredential {
    PasskeyCredential {
        id: row.get("id"),
        user_id: row.get("user_id"),
        credential_id: row.get("credential_id"),
        public_key: row.get("public_key"),
        label: row.get("label"),
        created_at: row.get("created_at"),
    }
}

#[async_trait::async_trait]
impl PasskeyStore for PostgresStore {
    async fn insert_passkey(&self, credential: PasskeyCredential) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO passkeys (id, user_id, credential_id, public_key, label, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&credential.id)
        .bind(&credential.user_id)
        .bind(&credential.credential_id)
        .bind(&credential.public_key)
        .bind(&credential.label)
        .bind(credential.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert passkey")?;

        Ok(())
    }

    async fn list_passkeys_for_user(&self, user_id: &Id) -> Result<Vec<PasskeyCredential>> {
        let rows = sqlx::query("SELECT * FROM passkeys WHERE user_id = $1 ORDER BY created_at, id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list passkeys")?;

        Ok(rows.iter().map(passkey_from_row).collect())
    }

    async fn delete_passkey(&self, user_id: &Id, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM passkeys WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete passkey")?;

        Ok(result.rows_affected() > 0)
    }
}

impl Store for PostgresStore {}
