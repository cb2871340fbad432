//! Unit tests for DonationService

use chrono::{Duration, NaiveTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Category, Donation, Institution, User};
use crate::domain::events::DomainEvent;
use crate::errors::DomainError;
use crate::repositories::{
    CategoryRepository, DonationRepository, InstitutionRepository, MockCategoryRepository,
    MockDonationRepository, MockInstitutionRepository,
};
use crate::services::donation::{DonationService, NewDonation};
use crate::services::notification::MockEventPublisher;
use crate::services::test_support::{donation, messages};

struct Fixture {
    donations: MockDonationRepository,
    publisher: MockEventPublisher,
    service: DonationService,
    category: Category,
    institution: Institution,
}

async fn fixture() -> Fixture {
    let donations = MockDonationRepository::new();
    let categories = MockCategoryRepository::new();
    let institutions = MockInstitutionRepository::new();
    let publisher = MockEventPublisher::new();
    let category = categories.save(Category::new("Toys")).await.unwrap();
    let institution = institutions
        .save(Institution::new("Dbam o Zdrowie", "Help for children"))
        .await
        .unwrap();

    let service = DonationService::new(
        Arc::new(donations.clone()),
        Arc::new(categories),
        Arc::new(institutions),
        Arc::new(publisher.clone()),
        messages(),
    );

    Fixture {
        donations,
        publisher,
        service,
        category,
        institution,
    }
}

fn form(fixture: &Fixture) -> NewDonation {
    NewDonation {
        quantity: 4,
        street: "Prosta 51".to_string(),
        city: "Warszawa".to_string(),
        zip_code: "00-001".to_string(),
        pick_up_date: (Utc::now() + Duration::days(3)).date_naive(),
        pick_up_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        pick_up_comment: Some("  ".to_string()),
        phone_number: "123456789".to_string(),
        category_ids: vec![fixture.category.id],
        institution_id: fixture.institution.id,
    }
}

#[tokio::test]
async fn test_create_stores_and_publishes() {
    let fixture = fixture().await;
    let donor = User::new("donor@example.com", "hash");

    let details = fixture.service.create(&donor, form(&fixture)).await.unwrap();

    assert_eq!(details.donation.user_id, Some(donor.id));
    assert_eq!(details.donation.pick_up_comment, None);
    assert_eq!(details.category_names(), "Toys");
    assert!(fixture
        .donations
        .find_by_id(details.donation.id)
        .await
        .unwrap()
        .is_some());

    let events = fixture.publisher.events().await;
    assert!(matches!(
        &events[..],
        [DomainEvent::DonationProcessComplete { donation, .. }] if donation.donation.id == details.donation.id
    ));
}

#[tokio::test]
async fn test_create_validates_form() {
    let fixture = fixture().await;
    let donor = User::new("donor@example.com", "hash");
    let mut invalid = form(&fixture);
    invalid.quantity = 0;
    invalid.zip_code = "00001".to_string();
    invalid.phone_number = "12345".to_string();
    invalid.pick_up_date = Utc::now().date_naive();
    invalid.category_ids.clear();

    match fixture.service.create(&donor, invalid).await {
        Err(DomainError::Validation { errors, .. }) => {
            for field in ["quantity", "zip_code", "phone_number", "pick_up_date", "category_ids"] {
                assert!(errors.has_field(field), "missing error for {}", field);
            }
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(fixture.donations.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_links_repeated_category_once() {
    let fixture = fixture().await;
    let donor = User::new("donor@example.com", "hash");
    let mut repeated = form(&fixture);
    repeated.category_ids = vec![fixture.category.id, fixture.category.id];

    let details = fixture.service.create(&donor, repeated).await.unwrap();

    assert_eq!(details.donation.category_ids, vec![fixture.category.id]);
    assert_eq!(details.categories.len(), 1);
    let stored = fixture
        .donations
        .find_by_id(details.donation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.category_ids, vec![fixture.category.id]);
}

#[tokio::test]
async fn test_create_with_unknown_institution() {
    let fixture = fixture().await;
    let donor = User::new("donor@example.com", "hash");
    let mut unknown = form(&fixture);
    unknown.institution_id = Uuid::new_v4();

    assert!(matches!(
        fixture.service.create(&donor, unknown).await,
        Err(DomainError::ResourceNotFound { .. })
    ));
}

#[tokio::test]
async fn test_users_only_see_their_donations() {
    let fixture = fixture().await;
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let own = fixture
        .donations
        .save(donation(Some(owner), vec![fixture.category.id], 1))
        .await
        .unwrap();

    assert_eq!(
        fixture.service.find_user_donations(owner, None).await.unwrap().len(),
        1
    );
    assert!(fixture
        .service
        .find_user_donations(stranger, None)
        .await
        .unwrap()
        .is_empty());
    assert!(matches!(
        fixture.service.find_user_donation(stranger, own.id).await,
        Err(DomainError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        fixture.service.archive_user_donation(stranger, own.id).await,
        Err(DomainError::ResourceNotFound { .. })
    ));

    let archived = fixture
        .service
        .archive_user_donation(owner, own.id)
        .await
        .unwrap();
    assert!(archived.received);
    assert!(archived.received_at.is_some());
}

#[tokio::test]
async fn test_admin_archive_cycle_and_statistics() {
    let fixture = fixture().await;
    let first = fixture
        .donations
        .save(donation(None, vec![fixture.category.id], 3))
        .await
        .unwrap();
    fixture
        .donations
        .save(donation(None, vec![fixture.category.id], 5))
        .await
        .unwrap();

    assert_eq!(fixture.service.count().await.unwrap(), 2);
    assert_eq!(fixture.service.bags().await.unwrap(), 8);

    fixture.service.archive(first.id).await.unwrap();
    let restored = fixture.service.unarchive(first.id).await.unwrap();
    assert!(!restored.received);
    assert_eq!(restored.received_at, None);

    let by_quantity = fixture
        .service
        .find_all(Some("quantity desc"))
        .await
        .unwrap();
    assert_eq!(by_quantity[0].quantity, 5);

    fixture.service.delete(first.id).await.unwrap();
    assert_eq!(fixture.service.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_details_skip_missing_references() {
    let fixture = fixture().await;
    let mut orphan = donation(None, vec![fixture.category.id, Uuid::new_v4()], 1);
    orphan.institution_id = Some(Uuid::new_v4());
    let orphan = fixture.donations.save(orphan).await.unwrap();

    let details = fixture.service.find_details(orphan.id).await.unwrap();

    assert!(details.institution.is_none());
    assert_eq!(details.categories.len(), 1);
}

/// Donation store whose every call fails
struct UnavailableDonations;

#[async_trait::async_trait]
impl DonationRepository for UnavailableDonations {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Donation>, DomainError> {
        Err(DomainError::internal("donation store unavailable"))
    }

    async fn find_all(&self) -> Result<Vec<Donation>, DomainError> {
        Err(DomainError::internal("donation store unavailable"))
    }

    async fn find_by_user_id(&self, _user_id: Uuid) -> Result<Vec<Donation>, DomainError> {
        Err(DomainError::internal("donation store unavailable"))
    }

    async fn find_by_category_id(
        &self,
        _category_id: Uuid,
    ) -> Result<Vec<Donation>, DomainError> {
        Err(DomainError::internal("donation store unavailable"))
    }

    async fn find_by_institution_id(
        &self,
        _institution_id: Uuid,
    ) -> Result<Vec<Donation>, DomainError> {
        Err(DomainError::internal("donation store unavailable"))
    }

    async fn save(&self, _donation: Donation) -> Result<Donation, DomainError> {
        Err(DomainError::internal("donation store unavailable"))
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, DomainError> {
        Err(DomainError::internal("donation store unavailable"))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Err(DomainError::internal("donation store unavailable"))
    }

    async fn sum_quantity(&self) -> Result<u64, DomainError> {
        Err(DomainError::internal("donation store unavailable"))
    }
}

#[tokio::test]
async fn test_storage_failure_is_not_reported_as_missing_donation() {
    let service = DonationService::new(
        Arc::new(UnavailableDonations),
        Arc::new(MockCategoryRepository::new()),
        Arc::new(MockInstitutionRepository::new()),
        Arc::new(MockEventPublisher::new()),
        messages(),
    );
    let owner = Uuid::new_v4();
    let donation_id = Uuid::new_v4();

    assert!(matches!(
        service.find_user_donation(owner, donation_id).await,
        Err(DomainError::Internal { .. })
    ));
    assert!(matches!(
        service.archive_user_donation(owner, donation_id).await,
        Err(DomainError::Internal { .. })
    ));
}
