use crate::model::{
    Artist, ArtistStatus, Contract, ContractStatus, Demo, DemoStatus, Id, IpiRecord, License,
    LicenseKind, LicenseStatus, Location, LocationKind, Partner, PartnerKind, PasskeyCredential,
    Payment, PaymentStatus, Product, RegistrationStatus, Session, UserAccount,
};
use anyhow::Result;

#[async_trait::async_trait]
pub trait ArtistStore: Send + Sync {
    async fn get_artist(&self, id: &Id) -> Result<Option<Artist>>;
    async fn list_artists(&self, status: Option<ArtistStatus>) -> Result<Vec<Artist>>;
    async fn upsert_artist(&self, artist: Artist) -> Result<()>;
    async fn delete_artist(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait ContractStore: Send + Sync {
    async fn get_contract(&self, id: &Id) -> Result<Option<Contract>>;
    async fn list_contracts(
        &self,
        artist_id: Option<&Id>,
        status: Option<ContractStatus>,
    ) -> Result<Vec<Contract>>;
    async fn upsert_contract(&self, contract: Contract) -> Result<()>;
    async fn delete_contract(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait DemoStore: Send + Sync {
    async fn get_demo(&self, id: &Id) -> Result<Option<Demo>>;
    async fn list_demos(&self, status: Option<DemoStatus>) -> Result<Vec<Demo>>;
    async fn upsert_demo(&self, demo: Demo) -> Result<()>;
    async fn delete_demo(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait LicenseStore: Send + Sync {
    async fn get_license(&self, id: &Id) -> Result<Option<License>>;
    async fn list_licenses(
        &self,
        status: Option<LicenseStatus>,
        kind: Option<LicenseKind>,
        artist_id: Option<&Id>,
    ) -> Result<Vec<License>>;
    async fn upsert_license(&self, license: License) -> Result<()>;
    async fn delete_license(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    async fn get_product(&self, id: &Id) -> Result<Option<Product>>;
    async fn list_products(
        &self,
        artist_id: Option<&Id>,
        registration: Option<RegistrationStatus>,
    ) -> Result<Vec<Product>>;
    /// GTIN uniqueness check before create/patch
    async fn find_product_by_gtin(&self, gtin: &str) -> Result<Option<Product>>;
    async fn upsert_product(&self, product: Product) -> Result<()>;
    async fn delete_product(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait LocationStore: Send + Sync {
    async fn get_location(&self, id: &Id) -> Result<Option<Location>>;
    async fn list_locations(&self, kind: Option<LocationKind>) -> Result<Vec<Location>>;
    async fn upsert_location(&self, location: Location) -> Result<()>;
    async fn delete_location(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait IpiStore: Send + Sync {
    async fn get_ipi_record(&self, id: &Id) -> Result<Option<IpiRecord>>;
    async fn list_ipi_records(&self, artist_id: Option<&Id>) -> Result<Vec<IpiRecord>>;
    async fn find_ipi_by_number(&self, ipi_number: &str) -> Result<Option<IpiRecord>>;
    async fn upsert_ipi_record(&self, record: IpiRecord) -> Result<()>;
    async fn delete_ipi_record(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait PartnerStore: Send + Sync {
    async fn get_partner(&self, id: &Id) -> Result<Option<Partner>>;
    async fn list_partners(
        &self,
        kind: Option<PartnerKind>,
        active: Option<bool>,
    ) -> Result<Vec<Partner>>;
    async fn upsert_partner(&self, partner: Partner) -> Result<()>;
    async fn delete_partner(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait PaymentStore: Send + Sync {
    async fn get_payment(&self, id: &Id) -> Result<Option<Payment>>;
    async fn list_payments(
        &self,
        artist_id: Option<&Id>,
        status: Option<PaymentStatus>,
        period: Option<&str>,
    ) -> Result<Vec<Payment>>;
    async fn upsert_payment(&self, payment: Payment) -> Result<()>;
    async fn delete_payment(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: &Id) -> Result<Option<UserAccount>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>>;
    async fn upsert_user(&self, user: UserAccount) -> Result<()>;
}

#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert_session(&self, session: Session) -> Result<()>;
    async fn get_session_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>>;
    async fn delete_session(&self, token_hash: &str) -> Result<bool>;
    /// Housekeeping on login; expired rows are never authoritative anyway
    async fn delete_expired_sessions(&self) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait PasskeyStore: Send + Sync {
    async fn insert_passkey(&self, credential: PasskeyCredential) -> Result<()>;
    async fn list_passkeys_for_user(&self, user_id: &Id) -> Result<Vec<PasskeyCredential>>;
    async fn delete_passkey(&self, user_id: &Id, id: &Id) -> Result<bool>;
}

pub trait Store:
    ArtistStore
    + ContractStore
    + DemoStore
    + LicenseStore
    + ProductStore
    + LocationStore
    + IpiStore
    + PartnerStore
    + PaymentStore
    + UserStore
    + SessionStore
    + PasskeyStore
    + Send
    + Sync
{
}
