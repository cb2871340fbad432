//! Unit tests for CategoryService

use std::sync::Arc;

use crate::errors::DomainError;
use crate::repositories::{CategoryRepository, DonationRepository, MockCategoryRepository, MockDonationRepository};
use crate::services::category::CategoryService;
use crate::services::test_support::{donation, messages};

fn service() -> (CategoryService, MockCategoryRepository, MockDonationRepository) {
    let categories = MockCategoryRepository::new();
    let donations = MockDonationRepository::new();
    let service = CategoryService::new(
        Arc::new(categories.clone()),
        Arc::new(donations.clone()),
        messages(),
    );
    (service, categories, donations)
}

#[tokio::test]
async fn test_sole_category_cannot_be_deleted() {
    let (service, categories, donations) = service();
    let toys = service.create("Toys").await.unwrap();
    let books = service.create("Books").await.unwrap();
    let only_toys = donations.save(donation(None, vec![toys.id], 1)).await.unwrap();
    let mixed = donations
        .save(donation(None, vec![toys.id, books.id], 2))
        .await
        .unwrap();

    let result = service.delete(toys.id).await;

    assert!(matches!(result, Err(DomainError::EntityDeletion { .. })));
    // Nothing was detached
    let mixed_after = donations.find_by_id(mixed.id).await.unwrap().unwrap();
    assert_eq!(mixed_after.category_ids, vec![toys.id, books.id]);
    assert!(categories.find_by_id(toys.id).await.unwrap().is_some());
    assert!(donations.find_by_id(only_toys.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_repeated_link_counts_as_sole_category() {
    let (service, categories, donations) = service();
    let toys = service.create("Toys").await.unwrap();
    let repeated = donations
        .save(donation(None, vec![toys.id, toys.id], 1))
        .await
        .unwrap();

    let result = service.delete(toys.id).await;

    assert!(matches!(result, Err(DomainError::EntityDeletion { .. })));
    let after = donations.find_by_id(repeated.id).await.unwrap().unwrap();
    assert!(!after.category_ids.is_empty());
    assert!(categories.find_by_id(toys.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_detaches_category_from_donations() {
    let (service, categories, donations) = service();
    let toys = service.create("Toys").await.unwrap();
    let books = service.create("Books").await.unwrap();
    let mixed = donations
        .save(donation(None, vec![toys.id, books.id], 2))
        .await
        .unwrap();

    service.delete(toys.id).await.unwrap();

    let after = donations.find_by_id(mixed.id).await.unwrap().unwrap();
    assert_eq!(after.category_ids, vec![books.id]);
    assert!(categories.find_by_id(toys.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_requires_name() {
    let (service, _, _) = service();

    assert!(matches!(
        service.create("  ").await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_unknown_category() {
    let (service, _, _) = service();

    assert!(matches!(
        service.find_by_id(uuid::Uuid::new_v4()).await,
        Err(DomainError::ResourceNotFound { .. })
    ));
}
