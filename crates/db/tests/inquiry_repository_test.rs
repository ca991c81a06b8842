//! Integration tests for the inquiry repository.

use std::collections::BTreeMap;

use niwaki_core::inquiry::{
    CreatePhotoInput, InquiryRepository as _, InquiryStatus, NewInquiry,
};
use niwaki_db::InquiryRepository;
use niwaki_db::migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

/// Connect to a fresh in-memory database with the full schema applied.
async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

fn sample_inquiry(name: &str) -> NewInquiry {
    NewInquiry {
        name: name.to_string(),
        email: Some("taro@example.com".to_string()),
        phone: Some("090-1234-5678".to_string()),
        message: "庭木の剪定をお願いしたいです。".to_string(),
        ..NewInquiry::default()
    }
}

fn sample_photo(inquiry_id: i32, filename: &str) -> CreatePhotoInput {
    CreatePhotoInput {
        inquiry_id,
        file_key: format!("inquiries/{inquiry_id}/abc-{filename}"),
        url: format!("https://photos.example/inquiries/{inquiry_id}/abc-{filename}"),
        filename: filename.to_string(),
        mime_type: "image/jpeg".to_string(),
        file_size: 1024,
    }
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let db = setup_db().await;
    let repo = InquiryRepository::new(db);

    let first = repo
        .create(sample_inquiry("山田太郎"))
        .await
        .expect("Failed to create inquiry");
    let second = repo
        .create(sample_inquiry("佐藤花子"))
        .await
        .expect("Failed to create inquiry");

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first.status, InquiryStatus::New);
    assert_eq!(first.name, "山田太郎");
    assert_eq!(first.created_at, first.updated_at);
}

#[tokio::test]
async fn test_list_newest_first() {
    let db = setup_db().await;
    let repo = InquiryRepository::new(db);

    for name in ["一人目", "二人目", "三人目"] {
        repo.create(sample_inquiry(name))
            .await
            .expect("Failed to create inquiry");
    }

    let listed = repo.list(50, 0).await.expect("Failed to list inquiries");
    let ids: Vec<i32> = listed.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_list_respects_limit_and_offset() {
    let db = setup_db().await;
    let repo = InquiryRepository::new(db);

    for n in 1..=5 {
        repo.create(sample_inquiry(&format!("客{n}")))
            .await
            .expect("Failed to create inquiry");
    }

    let first_page = repo.list(2, 0).await.expect("Failed to list inquiries");
    assert_eq!(
        first_page.iter().map(|i| i.id).collect::<Vec<_>>(),
        vec![5, 4]
    );

    let second_page = repo.list(2, 2).await.expect("Failed to list inquiries");
    assert_eq!(
        second_page.iter().map(|i| i.id).collect::<Vec<_>>(),
        vec![3, 2]
    );
}

#[tokio::test]
async fn test_find_by_id() {
    let db = setup_db().await;
    let repo = InquiryRepository::new(db);

    let created = repo
        .create(sample_inquiry("山田太郎"))
        .await
        .expect("Failed to create inquiry");

    let found = repo
        .find_by_id(created.id)
        .await
        .expect("Query should succeed")
        .expect("Inquiry should exist");
    assert_eq!(found.id, created.id);
    assert_eq!(found.email.as_deref(), Some("taro@example.com"));

    let missing = repo.find_by_id(999).await.expect("Query should succeed");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_exists() {
    let db = setup_db().await;
    let repo = InquiryRepository::new(db);

    let created = repo
        .create(sample_inquiry("山田太郎"))
        .await
        .expect("Failed to create inquiry");

    assert!(repo.exists(created.id).await.expect("Query should succeed"));
    assert!(!repo.exists(999).await.expect("Query should succeed"));
}

#[tokio::test]
async fn test_add_and_list_photos() {
    let db = setup_db().await;
    let repo = InquiryRepository::new(db);

    let inquiry = repo
        .create(sample_inquiry("山田太郎"))
        .await
        .expect("Failed to create inquiry");

    let first = repo
        .add_photo(sample_photo(inquiry.id, "front.jpg"))
        .await
        .expect("Failed to add photo");
    let second = repo
        .add_photo(sample_photo(inquiry.id, "back.jpg"))
        .await
        .expect("Failed to add photo");
    assert!(second.id > first.id);

    let photos = repo
        .list_photos(inquiry.id)
        .await
        .expect("Failed to list photos");
    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0].id, first.id);
    assert_eq!(photos[0].filename.as_deref(), Some("front.jpg"));
    assert_eq!(photos[0].mime_type.as_deref(), Some("image/jpeg"));
    assert_eq!(photos[0].file_size, Some(1024));
    assert!(photos[0].url.ends_with("front.jpg"));
}

#[tokio::test]
async fn test_list_photos_empty_for_unknown_inquiry() {
    let db = setup_db().await;
    let repo = InquiryRepository::new(db);

    let photos = repo
        .list_photos(999)
        .await
        .expect("Failed to list photos");
    assert!(photos.is_empty());
}

#[tokio::test]
async fn test_add_photo_without_inquiry_row() {
    // No foreign key on inquiry_id: the photo table accepts rows on its own.
    let db = setup_db().await;
    let repo = InquiryRepository::new(db);

    let photo = repo
        .add_photo(sample_photo(42, "orphan.jpg"))
        .await
        .expect("Insert should succeed without a matching inquiry");
    assert_eq!(photo.inquiry_id, 42);
}

#[tokio::test]
async fn test_update_status() {
    let db = setup_db().await;
    let repo = InquiryRepository::new(db);

    let inquiry = repo
        .create(sample_inquiry("山田太郎"))
        .await
        .expect("Failed to create inquiry");

    for status in [
        InquiryStatus::Contacted,
        InquiryStatus::Quoted,
        InquiryStatus::Completed,
        InquiryStatus::Cancelled,
        InquiryStatus::New,
    ] {
        let updated = repo
            .update_status(inquiry.id, status)
            .await
            .expect("Failed to update status");
        assert!(updated);

        let found = repo
            .find_by_id(inquiry.id)
            .await
            .expect("Query should succeed")
            .expect("Inquiry should exist");
        assert_eq!(found.status, status);
        assert!(found.updated_at >= found.created_at);
    }
}

#[tokio::test]
async fn test_update_status_unknown_id() {
    let db = setup_db().await;
    let repo = InquiryRepository::new(db);

    let updated = repo
        .update_status(999, InquiryStatus::Contacted)
        .await
        .expect("Query should succeed");
    assert!(!updated);
}

#[tokio::test]
async fn test_utm_params_roundtrip() {
    let db = setup_db().await;
    let repo = InquiryRepository::new(db);

    let mut utm = BTreeMap::new();
    utm.insert("utm_source".to_string(), "google".to_string());
    utm.insert("utm_medium".to_string(), "cpc".to_string());
    utm.insert("gclid".to_string(), "abc123".to_string());

    let input = NewInquiry {
        utm_params: Some(utm.clone()),
        traffic_source: Some("google".to_string()),
        landing_page: Some("/lp/pruning".to_string()),
        ..sample_inquiry("山田太郎")
    };
    let created = repo.create(input).await.expect("Failed to create inquiry");

    let found = repo
        .find_by_id(created.id)
        .await
        .expect("Query should succeed")
        .expect("Inquiry should exist");
    assert_eq!(found.utm_params, Some(utm));
    assert_eq!(found.traffic_source.as_deref(), Some("google"));
    assert_eq!(found.landing_page.as_deref(), Some("/lp/pruning"));
}
