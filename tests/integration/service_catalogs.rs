//! Ordering from service catalogs and waiting on the provisioning request.

use crate::common::builders::CatalogItemBuilder;
use crate::common::fixtures::{
    CATALOG, CLOUD_PROVIDER, INFRA_PROVIDER, TEMPLATE, acceptance_config, seeded_console,
};
use console_acceptance::{WaitError, wait_for_async};
use console_acceptance::catalog::{CatalogBundle, CatalogItem, ServiceCatalog};
use console_acceptance::naming::{random_name, test_vm_name};
use console_acceptance::requests::{
    CellFilter, Header, REQUEST_COMPLETE, RequestState, RequestStatus, wait_for_request,
    wait_for_request_finished,
};
use console_acceptance::vm::{PowerState, VmControl};
use console_acceptance::wait::WaitSpec;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_order_catalog_item() {
    let console = seeded_console().await;
    let config = acceptance_config();
    let vm_name = test_vm_name("order");
    let item_name = random_name("item_");
    let item = CatalogItemBuilder::new(&item_name, CATALOG)
        .template(INFRA_PROVIDER, TEMPLATE, &vm_name)
        .build();
    console.create_catalog_item(&item).await.unwrap();

    console.order(CATALOG, &item_name).await.unwrap();

    let filter = CellFilter::description(&item_name).partial();
    let outcome = wait_for_request(&console, &filter, &config.waits.request)
        .await
        .unwrap();
    let row = outcome.value;
    assert_eq!(row.message, REQUEST_COMPLETE);
    assert_eq!(row.status, RequestStatus::Ok);
    assert_eq!(row.cell(Header::RequestState), "Finished");

    // Two reloads per state, one reload before every retry
    assert_eq!(outcome.attempts, 5);
    assert!(outcome.elapsed >= Duration::from_secs(80));

    let vm = console.get_vm(&format!("{}_0001", vm_name)).await.unwrap();
    assert_eq!(vm.power_state, PowerState::On);
    assert_eq!(vm.provider, INFRA_PROVIDER);
}

#[tokio::test(start_paused = true)]
async fn test_order_through_rest_api() {
    let console = seeded_console().await;
    let config = acceptance_config();
    let item_name = random_name("item_");
    let item = CatalogItemBuilder::new(&item_name, CATALOG)
        .template(CLOUD_PROVIDER, "ami-rhel7", &test_vm_name("rest"))
        .build();
    console.create_catalog_item(&item).await.unwrap();

    let request = console.order(CATALOG, &item_name).await.unwrap();
    let outcome = wait_for_request_finished(&console, &request.id, &config.waits.rest_request)
        .await
        .unwrap();
    assert_eq!(outcome.value.id, request.id);
    assert!(outcome.value.succeeded());
}

#[tokio::test(start_paused = true)]
async fn test_order_catalog_bundle() {
    let console = seeded_console().await;
    let config = acceptance_config();
    let first = CatalogItemBuilder::new("bundle_item_1", CATALOG)
        .template(INFRA_PROVIDER, TEMPLATE, "bundle_vm_1")
        .build();
    let second = CatalogItemBuilder::new("bundle_item_2", CATALOG)
        .template(CLOUD_PROVIDER, "ami-rhel7", "bundle_vm_2")
        .build();
    console.create_catalog_item(&first).await.unwrap();
    console.create_catalog_item(&second).await.unwrap();

    let bundle_name = random_name("bundle_");
    let bundle = CatalogBundle::new(&bundle_name, CATALOG, ["bundle_item_1", "bundle_item_2"]);
    console.create_bundle(&bundle).await.unwrap();
    console.order(CATALOG, &bundle_name).await.unwrap();

    let row = wait_for_request(
        &console,
        &CellFilter::description(&bundle_name),
        &config.waits.request,
    )
    .await
    .unwrap()
    .into_value();
    assert_eq!(row.message, REQUEST_COMPLETE);

    for vm_name in ["bundle_vm_1_0001", "bundle_vm_2_0001"] {
        assert!(console.get_vm(vm_name).await.is_ok(), "{} missing", vm_name);
    }
}

#[tokio::test]
async fn test_no_template_catalog_item() {
    let console = seeded_console().await;
    let item = CatalogItem::new(random_name("item_"), "VMware", CATALOG);
    crate::assert_flash!(
        console.create_catalog_item(&item).await,
        "'Catalog/Name' is required"
    );
}

#[tokio::test]
async fn test_edit_catalog_after_deleting_provider() {
    let console = seeded_console().await;
    let item_name = random_name("item_");
    let item = CatalogItemBuilder::new(&item_name, CATALOG)
        .template(INFRA_PROVIDER, TEMPLATE, &test_vm_name("edit"))
        .build();
    console.create_catalog_item(&item).await.unwrap();
    console.delete_provider(INFRA_PROVIDER).await.unwrap();

    let edited = CatalogItemBuilder::new(&item_name, CATALOG)
        .template(INFRA_PROVIDER, TEMPLATE, &test_vm_name("edit"))
        .description("my edited description")
        .build();
    let flash = console
        .update_catalog_item(&item_name, &edited)
        .await
        .unwrap();
    assert_eq!(
        flash,
        format!("Service Catalog Item \"{}\" was saved", item_name)
    );
}

#[tokio::test(start_paused = true)]
async fn test_request_with_orphaned_template() {
    let console = seeded_console().await;
    let config = acceptance_config();
    let item_name = random_name("item_");
    let item = CatalogItemBuilder::new(&item_name, CATALOG)
        .template(INFRA_PROVIDER, TEMPLATE, &test_vm_name("orphan"))
        .build();
    console.create_catalog_item(&item).await.unwrap();
    let request = console.order(CATALOG, &item_name).await.unwrap();
    console.delete_provider(INFRA_PROVIDER).await.unwrap();

    // The page wait ends on any finished row
    let row = wait_for_request(
        &console,
        &CellFilter::description(&item_name),
        &config.waits.request,
    )
    .await
    .unwrap()
    .into_value();
    assert_eq!(row.state, RequestState::Finished);
    assert_eq!(row.status, RequestStatus::Error);

    // The REST wait reports it as a failure at once
    let err = wait_for_request_finished(&console, &request.id, &config.waits.rest_request)
        .await
        .unwrap_err();
    match err {
        WaitError::Failed {
            reason, attempts, ..
        } => {
            assert_eq!(attempts, 1);
            assert!(reason.contains(INFRA_PROVIDER), "reason: {}", reason);
        }
        other => panic!("expected a failed wait, got {}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_request_wait_times_out() {
    let console = seeded_console().await;
    let item_name = random_name("item_");
    let item = CatalogItemBuilder::new(&item_name, CATALOG)
        .template(INFRA_PROVIDER, TEMPLATE, &test_vm_name("slow"))
        .build();
    console.create_catalog_item(&item).await.unwrap();
    console.order(CATALOG, &item_name).await.unwrap();

    let spec = WaitSpec::from_secs(30, 20).with_message("slow request");
    let result = wait_for_request(&console, &CellFilter::description(&item_name), &spec).await;
    let last = result.as_ref().err().and_then(|e| e.last()).cloned();
    crate::assert_timed_out!(result, 2);

    let row = last.flatten().expect("a matching row was observed");
    assert_eq!(row.state, RequestState::Pending);
}

#[tokio::test(start_paused = true)]
async fn test_request_wait_without_matching_row() {
    let console = seeded_console().await;
    let spec = WaitSpec::from_secs(60, 20);
    let result = wait_for_request(&console, &CellFilter::description("ghost"), &spec).await;
    match result {
        Err(WaitError::TimedOut { last, attempts, .. }) => {
            assert_eq!(attempts, 4);
            assert_eq!(last, Some(None));
        }
        other => panic!("expected a timeout, got {:?}", other.map(|o| o.value)),
    }
}

#[tokio::test(start_paused = true)]
async fn test_provider_deletion_wait() {
    let console = seeded_console().await;
    let config = acceptance_config();
    console.delete_provider(CLOUD_PROVIDER).await.unwrap();

    let outcome = wait_for_async(&config.waits.deletion, async || {
        console.has_provider(CLOUD_PROVIDER).await.map(|exists| !exists)
    })
    .await
    .unwrap();
    assert_eq!(outcome.attempts, 1);

    crate::assert_error_message_contains!(
        console.delete_provider(CLOUD_PROVIDER).await,
        "not found"
    );
    let remaining: Vec<String> = console
        .providers()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(remaining, vec![INFRA_PROVIDER.to_string()]);
}

#[tokio::test]
async fn test_hidden_item_cannot_be_ordered() {
    let console = seeded_console().await;
    let item_name = random_name("item_");
    let item = CatalogItemBuilder::new(&item_name, CATALOG)
        .template(INFRA_PROVIDER, TEMPLATE, &test_vm_name("hidden"))
        .hidden()
        .build();
    console.create_catalog_item(&item).await.unwrap();

    crate::assert_error_message_contains!(
        console.order(CATALOG, &item_name).await,
        "is not available"
    );
}
