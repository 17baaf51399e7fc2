use anyhow::Result;
use chrono::{Duration, Utc};
use log::info;

use crate::model::{
    Artist, ArtistStatus, Contract, ContractKind, ContractStatus, Demo, DemoStatus, IpiRecord,
    IpiRole, License, LicenseKind, LicenseStatus, Location, LocationKind, Partner, PartnerKind,
    Payment, PaymentKind, PaymentStatus, Product, ProductFormat, RegistrationStatus, UserAccount,
};
use crate::store::traits::Store;

/// Load a small demonstration roster. Entities carry fixed IDs so the
/// loader can run repeatedly against the same database.
pub async fn load_seed_data<S: Store>(store: &S) -> Result<()> {
    let now = Utc::now();
    let today = now.date_naive();

    // Bootstrap admin account, created once
    if store.find_user_by_email("admin@label.example").await?.is_none() {
        let admin = UserAccount::new(
            "admin@label.example".to_string(),
            Some("Label Admin".to_string()),
            "changeme-admin",
            true,
        );
        store.upsert_user(admin).await?;
        info!("Created seed admin account admin@label.example");
    }

    let artists = vec![
        Artist {
            id: "artist-mira-holt".to_string(),
            name: "Mira Holt".to_string(),
            sort_name: Some("Holt, Mira".to_string()),
            ipi_number: Some("00052210040".to_string()),
            email: Some("mira@label.example".to_string()),
            status: ArtistStatus::Active,
            notes: None,
            created_at: now,
            updated_at: now,
        },
        Artist {
            id: "artist-the-gantry".to_string(),
            name: "The Gantry".to_string(),
            sort_name: Some("Gantry, The".to_string()),
            ipi_number: None,
            email: Some("gantry@label.example".to_string()),
            status: ArtistStatus::Active,
            notes: Some("Four-piece, signed 2024".to_string()),
            created_at: now,
            updated_at: now,
        },
        Artist {
            id: "artist-lena-voss".to_string(),
            name: "Lena Voss".to_string(),
            sort_name: Some("Voss, Lena".to_string()),
            ipi_number: Some("123456789".to_string()),
            email: None,
            status: ArtistStatus::Pending,
            notes: None,
            created_at: now,
            updated_at: now,
        },
    ];
    for artist in artists {
        store.upsert_artist(artist).await?;
    }

    let contracts = vec![
        Contract {
            id: "contract-mira-recording".to_string(),
            artist_id: "artist-mira-holt".to_string(),
            title: "Mira Holt recording agreement".to_string(),
            kind: ContractKind::Recording,
            status: ContractStatus::Active,
            effective_date: Some(today - Duration::days(400)),
            expiry_date: Some(today + Duration::days(330)),
            royalty_rate_bps: Some(1800),
            terms: Some("Three albums, worldwide".to_string()),
            created_at: now,
            updated_at: now,
        },
        Contract {
            id: "contract-gantry-distribution".to_string(),
            artist_id: "artist-the-gantry".to_string(),
            title: "The Gantry distribution deal".to_string(),
            kind: ContractKind::Distribution,
            status: ContractStatus::Active,
            effective_date: Some(today - Duration::days(120)),
            expiry_date: None,
            royalty_rate_bps: Some(2500),
            terms: None,
            created_at: now,
            updated_at: now,
        },
    ];
    for contract in contracts {
        store.upsert_contract(contract).await?;
    }

    store
        .upsert_demo(Demo {
            id: "demo-night-signals".to_string(),
            artist_id: None,
            title: "Night Signals EP".to_string(),
            submitted_by: Some("Peri Anand".to_string()),
            contact_email: Some("peri@example.com".to_string()),
            status: DemoStatus::InReview,
            reviewed_by: Some("A&R desk".to_string()),
            notes: None,
            created_at: now,
            updated_at: now,
        })
        .await?;

    let licenses = vec![
        License {
            id: "license-harbor-sync".to_string(),
            licensee: "Harbor Films".to_string(),
            work_title: "Glasswork".to_string(),
            artist_id: Some("artist-mira-holt".to_string()),
            kind: LicenseKind::Sync,
            status: LicenseStatus::Active,
            territory: Some("US".to_string()),
            starts_on: Some(today - Duration::days(340)),
            ends_on: Some(today + Duration::days(25)),
            fee_cents: Some(250_000),
            created_at: now,
            updated_at: now,
        },
        License {
            id: "license-meridian-mechanical".to_string(),
            licensee: "Meridian Press".to_string(),
            work_title: "Undertow".to_string(),
            artist_id: Some("artist-the-gantry".to_string()),
            kind: LicenseKind::Mechanical,
            status: LicenseStatus::Active,
            territory: Some("EU".to_string()),
            starts_on: Some(today - Duration::days(60)),
            ends_on: Some(today + Duration::days(670)),
            fee_cents: Some(80_000),
            created_at: now,
            updated_at: now,
        },
        License {
            id: "license-old-radio".to_string(),
            licensee: "Old Radio Co".to_string(),
            work_title: "Glasswork".to_string(),
            artist_id: Some("artist-mira-holt".to_string()),
            kind: LicenseKind::Performance,
            status: LicenseStatus::Expired,
            territory: None,
            starts_on: Some(today - Duration::days(900)),
            ends_on: Some(today - Duration::days(170)),
            fee_cents: None,
            created_at: now,
            updated_at: now,
        },
    ];
    for license in licenses {
        store.upsert_license(license).await?;
    }

    let products = vec![
        Product {
            id: "product-glasswork-lp".to_string(),
            title: "Glasswork".to_string(),
            artist_id: Some("artist-mira-holt".to_string()),
            format: ProductFormat::Album,
            gtin: Some("4006381333931".to_string()),
            release_date: Some(today - Duration::days(200)),
            label_name: Some("Label Office".to_string()),
            registration: RegistrationStatus::Registered,
            registry_ref: Some("reg-7781".to_string()),
            created_at: now,
            updated_at: now,
        },
        Product {
            id: "product-undertow-single".to_string(),
            title: "Undertow".to_string(),
            artist_id: Some("artist-the-gantry".to_string()),
            format: ProductFormat::Single,
            gtin: Some("5099991234568".to_string()),
            release_date: Some(today - Duration::days(40)),
            label_name: Some("Label Office".to_string()),
            registration: RegistrationStatus::Unregistered,
            registry_ref: None,
            created_at: now,
            updated_at: now,
        },
    ];
    for product in products {
        store.upsert_product(product).await?;
    }

    store
        .upsert_location(Location {
            id: "location-hq".to_string(),
            name: "Head office".to_string(),
            gln: Some("0614141000036".to_string()),
            address: Some("12 Canal Street".to_string()),
            city: Some("Rotterdam".to_string()),
            country: Some("NL".to_string()),
            kind: LocationKind::Office,
            created_at: now,
            updated_at: now,
        })
        .await?;

    store
        .upsert_ipi_record(IpiRecord {
            id: "ipi-mira-holt".to_string(),
            party_name: "Mira Holt".to_string(),
            ipi_number: "00052210040".to_string(),
            role: IpiRole::Composer,
            artist_id: Some("artist-mira-holt".to_string()),
            created_at: now,
            updated_at: now,
        })
        .await?;

    store
        .upsert_partner(Partner {
            id: "partner-northside".to_string(),
            name: "Northside Distribution".to_string(),
            kind: PartnerKind::Distributor,
            contact_email: Some("feeds@northside.example".to_string()),
            feed_url: Some("https://feeds.northside.example/catalog.json".to_string()),
            active: true,
            created_at: now,
            updated_at: now,
        })
        .await?;

    let payments = vec![
        Payment {
            id: "payment-mira-2025-06".to_string(),
            artist_id: "artist-mira-holt".to_string(),
            amount_cents: 412_50,
            currency: "EUR".to_string(),
            period: "2025-06".to_string(),
            kind: PaymentKind::Royalty,
            status: PaymentStatus::Paid,
            processor_ref: Some("pay-5520".to_string()),
            memo: None,
            created_at: now,
            updated_at: now,
        },
        Payment {
            id: "payment-mira-2025-07".to_string(),
            artist_id: "artist-mira-holt".to_string(),
            amount_cents: 388_00,
            currency: "EUR".to_string(),
            period: "2025-07".to_string(),
            kind: PaymentKind::Royalty,
            status: PaymentStatus::Pending,
            processor_ref: None,
            memo: Some("Streaming royalties".to_string()),
            created_at: now,
            updated_at: now,
        },
        Payment {
            id: "payment-gantry-advance".to_string(),
            artist_id: "artist-the-gantry".to_string(),
            amount_cents: 5_000_00,
            currency: "EUR".to_string(),
            period: "2025-05".to_string(),
            kind: PaymentKind::Advance,
            status: PaymentStatus::Paid,
            processor_ref: Some("pay-5318".to_string()),
            memo: Some("Album advance".to_string()),
            created_at: now,
            updated_at: now,
        },
    ];
    for payment in payments {
        store.upsert_payment(payment).await?;
    }

    info!("Seed roster loaded");
    Ok(())
}
