//! Administration endpoints and their guards

mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, NaiveTime, Utc};
use common::{call, TestContext};
use gh_core::{Donation, DonationRepository};
use gh_shared::error_codes;
use serde_json::json;
use uuid::Uuid;

fn donation(user_id: Uuid, category_ids: Vec<Uuid>) -> Donation {
    Donation {
        id: Uuid::new_v4(),
        quantity: 2,
        street: "Prosta 51".to_string(),
        city: "Warszawa".to_string(),
        zip_code: "00-838".to_string(),
        pick_up_date: Utc::now().date_naive() + Duration::days(2),
        pick_up_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        pick_up_comment: None,
        phone_number: "123456789".to_string(),
        category_ids,
        institution_id: None,
        user_id: Some(user_id),
        created_at: Utc::now(),
        received: false,
        received_at: None,
    }
}

#[actix_web::test]
async fn test_admin_routes_require_an_administrator() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    let user = ctx.seed_user("donor@example.com", false).await;

    let (status, body) = call(
        &app,
        test::TestRequest::get().uri("/api/v1/admin/users").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], error_codes::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/users")
        .insert_header(ctx.bearer(&user))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], error_codes::FORBIDDEN);
}

#[actix_web::test]
async fn test_user_lists_exclude_the_caller() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    let admin = ctx.seed_user("admin@example.com", true).await;
    ctx.seed_user("other.admin@example.com", true).await;
    ctx.seed_user("donor@example.com", false).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/admins")
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let admins = body.as_array().unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0]["email"], "other.admin@example.com");

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/users")
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let (_, body) = call(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["email"], "donor@example.com");
}

#[actix_web::test]
async fn test_last_admin_cannot_be_demoted_or_deleted() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    let admin = ctx.seed_user("admin@example.com", true).await;

    let revoke = format!("/api/v1/admin/users/{}/revoke-admin", admin.id);
    let req = test::TestRequest::post()
        .uri(&revoke)
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], error_codes::ENTITY_DELETION);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/users/{}", admin.id))
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let (status, _) = call(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // With a second administrator the first one may step down
    let second = ctx.seed_user("second@example.com", true).await;
    let req = test::TestRequest::post()
        .uri(&revoke)
        .insert_header(ctx.bearer(&second))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"], json!(["ROLE_USER"]));
}

#[actix_web::test]
async fn test_blocked_admin_does_not_count_as_active() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    let admin = ctx.seed_user("admin@example.com", true).await;
    let other = ctx.seed_user("other@example.com", true).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/users/{}/block", other.id))
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["blocked"], true);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/users/{}/revoke-admin", admin.id))
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let (status, _) = call(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The blocked administrator's token stops working
    let req = test::TestRequest::get()
        .uri("/api/v1/account")
        .insert_header(ctx.bearer(&other))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], error_codes::ACCOUNT_BLOCKED);
}

#[actix_web::test]
async fn test_deleting_a_user_keeps_donations_without_owner() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    let admin = ctx.seed_user("admin@example.com", true).await;
    let donor = ctx.seed_user("donor@example.com", false).await;
    let category = ctx.state.categories.create("Clothes").await.unwrap();
    let stored = ctx
        .repositories
        .donations
        .save(donation(donor.id, vec![category.id]))
        .await
        .unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/users/{}", donor.id))
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let (status, _) = call(&app, req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let kept = ctx
        .repositories
        .donations
        .find_by_id(stored.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.user_id, None);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/admin/users/{}", donor.id))
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let (status, _) = call(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_category_guard() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    let admin = ctx.seed_user("admin@example.com", true).await;
    let clothes = ctx.state.categories.create("Clothes").await.unwrap();
    let toys = ctx.state.categories.create("Toys").await.unwrap();
    let only_clothes = ctx
        .repositories
        .donations
        .save(donation(admin.id, vec![clothes.id]))
        .await
        .unwrap();
    let both = ctx
        .repositories
        .donations
        .save(donation(admin.id, vec![clothes.id, toys.id]))
        .await
        .unwrap();

    let delete = |id: Uuid| {
        test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/categories/{}", id))
            .insert_header(ctx.bearer(&admin))
            .to_request()
    };

    let (status, body) = call(&app, delete(clothes.id)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], error_codes::ENTITY_DELETION);

    // Nothing changed on refusal
    let unchanged = ctx
        .repositories
        .donations
        .find_by_id(both.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.category_ids, vec![clothes.id, toys.id]);

    let (status, _) = call(&app, delete(toys.id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let detached = ctx
        .repositories
        .donations
        .find_by_id(both.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detached.category_ids, vec![clothes.id]);
    assert!(ctx
        .repositories
        .donations
        .find_by_id(only_clothes.id)
        .await
        .unwrap()
        .is_some());
}

#[actix_web::test]
async fn test_deleting_an_institution_clears_references() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    let admin = ctx.seed_user("admin@example.com", true).await;
    let institution = ctx
        .state
        .institutions
        .create("Dbam o Zdrowie", "Help for children from poor families")
        .await
        .unwrap();
    let category = ctx.state.categories.create("Clothes").await.unwrap();
    let mut pending = donation(admin.id, vec![category.id]);
    pending.institution_id = Some(institution.id);
    let stored = ctx.repositories.donations.save(pending).await.unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/institutions/{}", institution.id))
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let (status, _) = call(&app, req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let kept = ctx
        .repositories
        .donations
        .find_by_id(stored.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.institution_id, None);
}

#[actix_web::test]
async fn test_admin_archives_and_unarchives_a_donation() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    let admin = ctx.seed_user("admin@example.com", true).await;
    let category = ctx.state.categories.create("Books").await.unwrap();
    let stored = ctx
        .repositories
        .donations
        .save(donation(admin.id, vec![category.id]))
        .await
        .unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/donations/{}/archive", stored.id))
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], true);
    assert!(body["received_at"].is_string());

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/donations/{}/unarchive", stored.id))
        .insert_header(ctx.bearer(&admin))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], false);
    assert!(body["received_at"].is_null());
}
