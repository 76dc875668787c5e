use std::thread;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use sports_campaigns::domain::campaign::{CampaignListQuery, NewCampaign, UpdateCampaign};
use sports_campaigns::domain::client::{NewClient, UpdateClient};
use sports_campaigns::domain::product::{NewProduct, ProductListQuery, UpdateProduct};
use sports_campaigns::repository::errors::RepositoryError;
use sports_campaigns::repository::{
    AssociationReader, AssociationWriter, CampaignReader, CampaignWriter, ClientReader,
    ClientWriter, ProductReader, ProductWriter, ProjectionReader,
};
use sports_campaigns::schema::campaign_products;

mod common;

fn date(month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

#[test]
fn test_client_repository_crud() {
    let test_db = common::TestDb::new("test_client_repository_crud.db");
    let repo = test_db.repo();

    let nike = repo
        .create_client(&NewClient::new("Nike").with_description("Sports brand"))
        .unwrap();
    assert_eq!(nike.version, 0);
    assert!(nike.updated_at.is_none());
    assert_eq!(repo.count_clients().unwrap(), 1);

    let renamed = repo
        .update_client(nike.id, nike.version, &UpdateClient::new().name("Nike Inc."))
        .unwrap();
    assert_eq!(renamed.name, "Nike Inc.");
    assert_eq!(renamed.description.as_deref(), Some("Sports brand"));
    assert_eq!(renamed.version, 1);
    assert!(renamed.updated_at.is_some());
    assert_eq!(renamed.created_at, nike.created_at);

    let stale = repo
        .update_client(nike.id, 0, &UpdateClient::new().name("Stale"))
        .expect_err("expected stale version to be rejected");
    assert!(matches!(stale, RepositoryError::ConcurrencyConflict));

    repo.delete_client(nike.id).unwrap();
    assert!(repo.get_client_by_id(nike.id).unwrap().is_none());

    let err = repo
        .delete_client(nike.id)
        .expect_err("expected second delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_store_validation_runs_before_any_write() {
    let test_db = common::TestDb::new("test_store_validation_runs_before_any_write.db");
    let repo = test_db.repo();

    let err = repo
        .create_client(&NewClient::new("   "))
        .expect_err("expected blank name to fail");
    assert!(matches!(
        err,
        RepositoryError::Validation { field: "name", .. }
    ));

    let client = repo.create_client(&NewClient::new("Adidas")).unwrap();

    let err = repo
        .create_product(&NewProduct::new(client.id, "Ball").with_price_cents(-1))
        .expect_err("expected negative price to fail");
    assert!(matches!(
        err,
        RepositoryError::Validation { field: "price", .. }
    ));

    let err = repo
        .create_product(&NewProduct::new(client.id, "x".repeat(201)))
        .expect_err("expected long name to fail");
    assert!(matches!(err, RepositoryError::Validation { field: "name", .. }));

    assert!(
        repo.list_products(ProductListQuery::new())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_foreign_keys_are_checked_on_create() {
    let test_db = common::TestDb::new("test_foreign_keys_are_checked_on_create.db");
    let repo = test_db.repo();

    let err = repo
        .create_product(&NewProduct::new(42, "Ghost"))
        .expect_err("expected missing client to fail");
    assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));

    let err = repo
        .create_campaign(&NewCampaign::new(42, "Ghost", date(1, 1), date(2, 1)))
        .expect_err("expected missing client to fail");
    assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));

    assert_eq!(repo.count_clients().unwrap(), 0);
}

#[test]
fn test_sku_is_unique_but_may_be_absent() {
    let test_db = common::TestDb::new("test_sku_is_unique_but_may_be_absent.db");
    let repo = test_db.repo();

    let nike = repo.create_client(&NewClient::new("Nike")).unwrap();
    let adidas = repo.create_client(&NewClient::new("Adidas")).unwrap();

    let shoe = repo
        .create_product(&NewProduct::new(nike.id, "Shoe").with_sku("SKU-1"))
        .unwrap();

    let err = repo
        .create_product(&NewProduct::new(adidas.id, "Copy").with_sku("SKU-1"))
        .expect_err("expected duplicate sku to fail");
    assert!(matches!(err, RepositoryError::UniqueViolation(_)));

    repo.create_product(&NewProduct::new(nike.id, "No sku A"))
        .unwrap();
    let other = repo
        .create_product(&NewProduct::new(adidas.id, "No sku B"))
        .unwrap();

    let err = repo
        .update_product(other.id, other.version, &UpdateProduct::new().sku("SKU-1"))
        .expect_err("expected duplicate sku on update to fail");
    assert!(matches!(err, RepositoryError::UniqueViolation(_)));

    let same = repo
        .update_product(shoe.id, shoe.version, &UpdateProduct::new().sku("SKU-1"))
        .unwrap();
    assert_eq!(same.sku.as_deref(), Some("SKU-1"));
}

#[test]
fn test_update_with_stale_version_changes_nothing() {
    let test_db = common::TestDb::new("test_update_with_stale_version_changes_nothing.db");
    let repo = test_db.repo();

    let client = repo.create_client(&NewClient::new("Hurley")).unwrap();
    let campaign = repo
        .create_campaign(&NewCampaign::new(client.id, "Surf", date(7, 1), date(9, 30)))
        .unwrap();

    let first = repo
        .update_campaign(
            campaign.id,
            campaign.version,
            &UpdateCampaign::new().budget_cents(100),
        )
        .unwrap();
    assert_eq!(first.version, campaign.version + 1);

    let err = repo
        .update_campaign(
            campaign.id,
            campaign.version,
            &UpdateCampaign::new().name("Lost update"),
        )
        .expect_err("expected stale version to be rejected");
    assert!(matches!(err, RepositoryError::ConcurrencyConflict));

    let stored = repo.get_campaign_by_id(campaign.id).unwrap().unwrap();
    assert_eq!(stored.name, "Surf");
    assert_eq!(stored.budget_cents, Some(100));
    assert_eq!(stored.start_date, date(7, 1));
}

#[test]
fn test_delete_client_cascades() {
    let test_db = common::TestDb::new("test_delete_client_cascades.db");
    let repo = test_db.repo();

    let nike = repo.create_client(&NewClient::new("Nike")).unwrap();
    let adidas = repo.create_client(&NewClient::new("Adidas")).unwrap();

    let nike_product = repo
        .create_product(&NewProduct::new(nike.id, "Air Max"))
        .unwrap();
    let nike_campaign = repo
        .create_campaign(
            &NewCampaign::new(nike.id, "Summer", date(6, 1), date(8, 31))
                .with_product_ids(vec![nike_product.id]),
        )
        .unwrap();
    let adidas_product = repo
        .create_product(&NewProduct::new(adidas.id, "Ultraboost"))
        .unwrap();

    repo.delete_client(nike.id).unwrap();

    assert!(repo.get_campaign_by_id(nike_campaign.id).unwrap().is_none());
    assert!(repo.get_product_by_id(nike_product.id).unwrap().is_none());
    assert!(
        repo.get_product_by_id(adidas_product.id)
            .unwrap()
            .is_some()
    );

    let campaigns = repo
        .list_campaigns(CampaignListQuery::new().client(nike.id))
        .unwrap();
    assert!(campaigns.is_empty());

    let mut conn = test_db.pool().get().unwrap();
    let orphan_links = campaign_products::table
        .filter(
            campaign_products::campaign_id
                .eq(nike_campaign.id)
                .or(campaign_products::product_id.eq(nike_product.id)),
        )
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap();
    assert_eq!(orphan_links, 0);

    let err = repo
        .delete_client(nike.id)
        .expect_err("expected second delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_delete_campaign_keeps_products() {
    let test_db = common::TestDb::new("test_delete_campaign_keeps_products.db");
    let repo = test_db.repo();

    let nike = repo.create_client(&NewClient::new("Nike")).unwrap();
    let product = repo
        .create_product(&NewProduct::new(nike.id, "Air Max"))
        .unwrap();
    let campaign = repo
        .create_campaign(
            &NewCampaign::new(nike.id, "Summer", date(6, 1), date(8, 31))
                .with_product_ids(vec![product.id]),
        )
        .unwrap();

    repo.delete_campaign(campaign.id).unwrap();

    assert!(repo.get_product_by_id(product.id).unwrap().is_some());
    assert!(repo.list_campaigns_of(product.id).unwrap().is_empty());

    let err = repo
        .delete_campaign(campaign.id)
        .expect_err("expected missing campaign");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_cross_owner_link_writes_nothing() {
    let test_db = common::TestDb::new("test_cross_owner_link_writes_nothing.db");
    let repo = test_db.repo();

    let nike = repo.create_client(&NewClient::new("Nike")).unwrap();
    let adidas = repo.create_client(&NewClient::new("Adidas")).unwrap();
    let campaign = repo
        .create_campaign(&NewCampaign::new(nike.id, "Summer", date(6, 1), date(8, 31)))
        .unwrap();
    let foreign = repo
        .create_product(&NewProduct::new(adidas.id, "Ultraboost"))
        .unwrap();

    let err = repo
        .link_product(campaign.id, foreign.id)
        .expect_err("expected cross-owner link to fail");
    assert!(matches!(
        err,
        RepositoryError::CrossOwnerViolation { client_id, product_id }
            if client_id == nike.id && product_id == foreign.id
    ));

    assert!(repo.list_products_of(campaign.id).unwrap().is_empty());

    let err = repo
        .create_campaign(
            &NewCampaign::new(nike.id, "Winter", date(11, 1), date(12, 31))
                .with_product_ids(vec![foreign.id]),
        )
        .expect_err("expected cross-owner create to fail");
    assert!(matches!(err, RepositoryError::CrossOwnerViolation { .. }));
    assert_eq!(
        repo.list_campaigns(CampaignListQuery::new().client(nike.id))
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_link_is_idempotent_and_unlink_requires_pair() {
    let test_db = common::TestDb::new("test_link_is_idempotent_and_unlink_requires_pair.db");
    let repo = test_db.repo();

    let nike = repo.create_client(&NewClient::new("Nike")).unwrap();
    let campaign = repo
        .create_campaign(&NewCampaign::new(nike.id, "Summer", date(6, 1), date(8, 31)))
        .unwrap();
    let product = repo
        .create_product(&NewProduct::new(nike.id, "Air Max"))
        .unwrap();

    let first = repo.link_product(campaign.id, product.id).unwrap();
    let second = repo.link_product(campaign.id, product.id).unwrap();
    assert_eq!(first, second);
    assert_eq!(repo.list_products_of(campaign.id).unwrap().len(), 1);

    let untouched = repo.get_campaign_by_id(campaign.id).unwrap().unwrap();
    assert_eq!(untouched.version, campaign.version);
    assert!(untouched.updated_at.is_none());

    let err = repo
        .link_product(campaign.id, 999)
        .expect_err("expected missing product");
    assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));

    repo.unlink_product(campaign.id, product.id).unwrap();
    let err = repo
        .unlink_product(campaign.id, product.id)
        .expect_err("expected absent pair");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_bulk_link_is_all_or_nothing() {
    let test_db = common::TestDb::new("test_bulk_link_is_all_or_nothing.db");
    let repo = test_db.repo();

    let nike = repo.create_client(&NewClient::new("Nike")).unwrap();
    let adidas = repo.create_client(&NewClient::new("Adidas")).unwrap();
    let campaign = repo
        .create_campaign(&NewCampaign::new(nike.id, "Summer", date(6, 1), date(8, 31)))
        .unwrap();
    let shoe = repo
        .create_product(&NewProduct::new(nike.id, "Shoe"))
        .unwrap();
    let shirt = repo
        .create_product(&NewProduct::new(nike.id, "Shirt"))
        .unwrap();
    let foreign = repo
        .create_product(&NewProduct::new(adidas.id, "Pants"))
        .unwrap();

    let err = repo
        .link_products(campaign.id, &[shoe.id, foreign.id, shirt.id])
        .expect_err("expected bulk link to fail");
    assert!(matches!(err, RepositoryError::CrossOwnerViolation { .. }));
    assert!(repo.list_products_of(campaign.id).unwrap().is_empty());

    let inserted = repo
        .link_products(campaign.id, &[shoe.id, shirt.id, shoe.id])
        .unwrap();
    assert_eq!(inserted, 2);

    let again = repo
        .link_products(campaign.id, &[shirt.id, shoe.id])
        .unwrap();
    assert_eq!(again, 0);
    assert_eq!(repo.list_products_of(campaign.id).unwrap().len(), 2);
}

#[test]
fn test_listing_children_of_missing_parent_is_not_found() {
    let test_db = common::TestDb::new("test_listing_children_of_missing_parent_is_not_found.db");
    let repo = test_db.repo();

    assert!(matches!(
        repo.list_products_of(1),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.list_campaigns_of(1),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_projections_report_counts_and_names() {
    let test_db = common::TestDb::new("test_projections_report_counts_and_names.db");
    let repo = test_db.repo();

    let nike = repo.create_client(&NewClient::new("Nike")).unwrap();
    let product = repo
        .create_product(
            &NewProduct::new(nike.id, "Air Max 2026")
                .with_sku("AM2026-BLK-10")
                .with_price_cents(14999)
                .with_category("Footwear"),
        )
        .unwrap();
    let spring = repo
        .create_campaign(&NewCampaign::new(nike.id, "Spring", date(3, 1), date(5, 31)))
        .unwrap();
    let summer = repo
        .create_campaign(
            &NewCampaign::new(nike.id, "Summer", date(6, 1), date(8, 31))
                .with_budget_cents(50_000_000),
        )
        .unwrap();

    // Link the later campaign first so link order differs from id order.
    repo.link_product(summer.id, product.id).unwrap();
    repo.link_product(spring.id, product.id).unwrap();

    let client = repo.get_client_projection(nike.id).unwrap().unwrap();
    assert_eq!(client.campaign_count, 2);
    assert_eq!(client.product_count, 1);

    let projection = repo.get_product_projection(product.id).unwrap().unwrap();
    assert_eq!(projection.client_name, "Nike");
    assert_eq!(projection.campaign_names, vec!["Summer", "Spring"]);
    assert_eq!(projection.price.as_deref(), Some("149.99"));

    let campaign = repo.get_campaign_projection(summer.id).unwrap().unwrap();
    assert_eq!(campaign.client_name, "Nike");
    assert_eq!(campaign.product_count, 1);
    assert_eq!(campaign.budget.as_deref(), Some("500000.00"));

    let footwear = repo
        .list_product_projections(ProductListQuery::new().category("Footwear"))
        .unwrap();
    assert_eq!(footwear.len(), 1);
    let apparel = repo
        .list_product_projections(ProductListQuery::new().category("Apparel"))
        .unwrap();
    assert!(apparel.is_empty());

    assert!(repo.get_client_projection(999).unwrap().is_none());
}

#[test]
fn test_bulk_link_keeps_request_order() {
    let test_db = common::TestDb::new("test_bulk_link_keeps_request_order.db");
    let repo = test_db.repo();

    let nike = repo.create_client(&NewClient::new("Nike")).unwrap();
    let campaign = repo
        .create_campaign(&NewCampaign::new(nike.id, "Summer", date(6, 1), date(8, 31)))
        .unwrap();
    let ids: Vec<i32> = ["Shoe", "Shirt", "Shorts"]
        .into_iter()
        .map(|name| {
            repo.create_product(&NewProduct::new(nike.id, name))
                .unwrap()
                .id
        })
        .collect();

    // Linked in one transaction, so every row may carry the same `added_at`.
    let requested = vec![ids[2], ids[0], ids[1]];
    repo.link_products(campaign.id, &requested).unwrap();

    let linked: Vec<i32> = repo
        .list_products_of(campaign.id)
        .unwrap()
        .into_iter()
        .map(|product| product.id)
        .collect();
    assert_eq!(linked, requested);
}

#[test]
fn test_concurrent_writes_to_disjoint_clients_succeed() {
    let test_db = common::TestDb::new("test_concurrent_writes_to_disjoint_clients_succeed.db");
    let repo = test_db.repo();

    let client_ids: Vec<i32> = (0..8)
        .map(|n| {
            repo.create_client(&NewClient::new(format!("Client {n}")))
                .unwrap()
                .id
        })
        .collect();

    let handles: Vec<_> = client_ids
        .into_iter()
        .map(|client_id| {
            let repo = test_db.repo();
            thread::spawn(move || {
                let mut failures = Vec::new();
                for n in 0..20 {
                    let result = repo
                        .create_product(&NewProduct::new(client_id, format!("Product {n}")))
                        .and_then(|product| {
                            let campaign = repo.create_campaign(&NewCampaign::new(
                                client_id,
                                format!("Campaign {n}"),
                                date(6, 1),
                                date(8, 31),
                            ))?;
                            repo.link_product(campaign.id, product.id)
                        });
                    if let Err(err) = result {
                        failures.push(err.to_string());
                    }
                }
                failures
            })
        })
        .collect();

    let failures: Vec<String> = handles
        .into_iter()
        .flat_map(|handle| handle.join().expect("writer thread panicked"))
        .collect();
    assert!(failures.is_empty(), "failed writes: {failures:?}");

    let projections = repo.list_client_projections().unwrap();
    assert!(
        projections
            .iter()
            .all(|client| client.campaign_count == 20 && client.product_count == 20)
    );
}
