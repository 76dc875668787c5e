use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::campaign::NewCampaign;
use crate::domain::client::NewClient;
use crate::domain::product::NewProduct;
use crate::repository::{CampaignWriter, ClientReader, ClientWriter, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

struct DemoProduct {
    name: &'static str,
    description: &'static str,
    sku: &'static str,
    price_cents: i64,
    category: &'static str,
}

struct DemoCampaign {
    name: &'static str,
    description: &'static str,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    target_audience: &'static str,
    budget_cents: i64,
}

struct DemoClient {
    name: &'static str,
    description: &'static str,
    campaign: DemoCampaign,
    products: &'static [DemoProduct],
}

const DEMO_CLIENTS: &[DemoClient] = &[
    DemoClient {
        name: "Nike",
        description: "Global sports brand and footwear company",
        campaign: DemoCampaign {
            name: "Summer 2026 Collection",
            description: "New summer sports apparel and footwear line",
            start: (2026, 6, 1),
            end: (2026, 8, 31),
            target_audience: "Athletes and fitness enthusiasts aged 18-35",
            budget_cents: 50_000_000,
        },
        products: &[
            DemoProduct {
                name: "Air Max 2026",
                description: "Latest Air Max running shoe with enhanced cushioning",
                sku: "AM2026-BLK-10",
                price_cents: 14_999,
                category: "Footwear",
            },
            DemoProduct {
                name: "Dri-FIT Pro Training Shirt",
                description: "Moisture-wicking performance training shirt",
                sku: "DFPT-WHT-L",
                price_cents: 4_599,
                category: "Apparel",
            },
            DemoProduct {
                name: "Nike Pro Compression Shorts",
                description: "High-performance compression shorts for training",
                sku: "NPC-BLK-M",
                price_cents: 3_999,
                category: "Apparel",
            },
        ],
    },
    DemoClient {
        name: "Hurley",
        description: "Premium surf and beach lifestyle brand",
        campaign: DemoCampaign {
            name: "Surf Championship 2026",
            description: "Professional surf championship sponsorship campaign",
            start: (2026, 7, 1),
            end: (2026, 9, 30),
            target_audience: "Surfers and beach lifestyle enthusiasts",
            budget_cents: 25_000_000,
        },
        products: &[
            DemoProduct {
                name: "Pro Surf Board Shorts",
                description: "Professional grade board shorts with quick-dry technology",
                sku: "HUR-PBS-001",
                price_cents: 7_999,
                category: "Apparel",
            },
            DemoProduct {
                name: "Phantom Elite Wetsuit",
                description: "Premium wetsuit for professional surfers",
                sku: "HUR-PEW-L",
                price_cents: 29_999,
                category: "Surf Gear",
            },
        ],
    },
    DemoClient {
        name: "Adidas",
        description: "German multinational sports corporation",
        campaign: DemoCampaign {
            name: "Back to School 2026",
            description: "Student athletic gear and sportswear campaign",
            start: (2026, 8, 1),
            end: (2026, 10, 31),
            target_audience: "Students and young athletes aged 12-22",
            budget_cents: 35_000_000,
        },
        products: &[
            DemoProduct {
                name: "Ultraboost 2026",
                description: "Revolutionary running shoe with boost technology",
                sku: "UB2026-GRY-9",
                price_cents: 18_000,
                category: "Footwear",
            },
            DemoProduct {
                name: "Tiro Track Pants",
                description: "Classic athletic track pants for training",
                sku: "TTP-BLK-M",
                price_cents: 5_500,
                category: "Apparel",
            },
            DemoProduct {
                name: "Classic Backpack",
                description: "Durable backpack for students and athletes",
                sku: "ABP-NVY-001",
                price_cents: 4_500,
                category: "Accessories",
            },
        ],
    },
];

/// Populates an empty store with demo clients, campaigns and products.
///
/// Does nothing when any client already exists. Returns whether data was written.
/// When a write fails, every client seeded so far is deleted again (with its
/// campaigns and products) so a later start can retry from an empty store.
pub fn seed_demo_data<R>(repo: &R) -> ServiceResult<bool>
where
    R: ClientReader + ClientWriter + CampaignWriter + ProductWriter + ?Sized,
{
    if repo.count_clients().map_err(ServiceError::from)? > 0 {
        log::debug!("Store already has clients, skipping demo data");
        return Ok(false);
    }

    let mut seeded = Vec::with_capacity(DEMO_CLIENTS.len());
    for demo in DEMO_CLIENTS {
        if let Err(err) = seed_client(repo, demo, &mut seeded) {
            log::error!("Failed to seed demo client {}: {err}", demo.name);
            roll_back_seed(repo, &seeded);
            return Err(err);
        }
    }

    log::info!("Seeded {} demo client(s)", DEMO_CLIENTS.len());
    Ok(true)
}

fn seed_client<R>(repo: &R, demo: &DemoClient, seeded: &mut Vec<i32>) -> ServiceResult<()>
where
    R: ClientWriter + CampaignWriter + ProductWriter + ?Sized,
{
    let client = repo
        .create_client(&NewClient::new(demo.name).with_description(demo.description))
        .map_err(ServiceError::from)?;
    seeded.push(client.id);

    let mut product_ids = Vec::with_capacity(demo.products.len());
    for product in demo.products {
        let new_product = NewProduct::new(client.id, product.name)
            .with_description(product.description)
            .with_sku(product.sku)
            .with_price_cents(product.price_cents)
            .with_category(product.category);
        let created = repo
            .create_product(&new_product)
            .map_err(ServiceError::from)?;
        product_ids.push(created.id);
    }

    let campaign = &demo.campaign;
    let new_campaign = NewCampaign::new(
        client.id,
        campaign.name,
        demo_date(campaign.start)?,
        demo_date(campaign.end)?,
    )
    .with_description(campaign.description)
    .with_target_audience(campaign.target_audience)
    .with_budget_cents(campaign.budget_cents)
    .with_product_ids(product_ids);
    repo.create_campaign(&new_campaign)
        .map_err(ServiceError::from)?;

    Ok(())
}

fn roll_back_seed<R>(repo: &R, client_ids: &[i32])
where
    R: ClientWriter + ?Sized,
{
    for &client_id in client_ids {
        if let Err(err) = repo.delete_client(client_id) {
            log::error!("Failed to roll back demo client {client_id}: {err}");
        }
    }
}

fn demo_date((year, month, day): (i32, u32, u32)) -> ServiceResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ServiceError::Internal(format!("invalid demo date {year}-{month}-{day}")))
}
