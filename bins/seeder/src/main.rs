//! Database seeder for Niwaki development and testing.
//!
//! Seeds a handful of demo inquiries (one with photo rows) so the admin
//! screens have data to show during local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use niwaki_db::entities::{inquiries, inquiry_photos, sea_orm_active_enums::InquiryStatus};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = niwaki_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo inquiries...");
    seed_inquiries(&db).await;

    println!("Seeding complete!");
}

struct DemoInquiry {
    name: &'static str,
    email: Option<&'static str>,
    phone: Option<&'static str>,
    address: Option<&'static str>,
    service_type: Option<&'static str>,
    message: &'static str,
    utm_params: Option<serde_json::Value>,
    traffic_source: Option<&'static str>,
    landing_page: Option<&'static str>,
    status: InquiryStatus,
    days_ago: i64,
    photos: &'static [&'static str],
}

fn demo_rows() -> Vec<DemoInquiry> {
    vec![
        DemoInquiry {
            name: "山田太郎",
            email: Some("taro.yamada@example.com"),
            phone: Some("090-1234-5678"),
            address: Some("東京都世田谷区桜丘2-3-4"),
            service_type: Some("pruning"),
            message: "庭の松が伸びすぎてしまったので、剪定をお願いしたいです。高さは3メートルほどです。",
            utm_params: Some(serde_json::json!({
                "utm_source": "google",
                "utm_medium": "cpc",
                "utm_campaign": "spring-pruning"
            })),
            traffic_source: Some("google"),
            landing_page: Some("/lp/pruning"),
            status: InquiryStatus::New,
            days_ago: 0,
            photos: &["matsu-front.jpg", "matsu-side.jpg"],
        },
        DemoInquiry {
            name: "佐藤花子",
            email: Some("hanako.sato@example.com"),
            phone: None,
            address: Some("神奈川県川崎市多摩区1-2-3"),
            service_type: Some("felling"),
            message: "裏庭の枯れた杉が台風で倒れそうで心配です。伐採の見積もりをお願いします。",
            utm_params: None,
            traffic_source: Some("town-magazine"),
            landing_page: Some("/"),
            status: InquiryStatus::Contacted,
            days_ago: 2,
            photos: &[],
        },
        DemoInquiry {
            name: "鈴木一郎",
            email: None,
            phone: Some("080-9876-5432"),
            address: None,
            service_type: Some("mowing"),
            message: "空き地の草刈りをお願いしたいです。広さは50平米くらいです。",
            utm_params: None,
            traffic_source: None,
            landing_page: Some("/services/mowing"),
            status: InquiryStatus::Quoted,
            days_ago: 5,
            photos: &[],
        },
        DemoInquiry {
            name: "田中美咲",
            email: Some("misaki.tanaka@example.com"),
            phone: None,
            address: Some("千葉県松戸市栄町3-10"),
            service_type: Some("pruning"),
            message: "玄関前の生け垣がぼさぼさになってきたので、刈り込みをお願いできますか。",
            utm_params: Some(serde_json::json!({ "fbclid": "IwAR2xDemo" })),
            traffic_source: Some("facebook"),
            landing_page: Some("/lp/hedge"),
            status: InquiryStatus::Completed,
            days_ago: 9,
            photos: &[],
        },
        DemoInquiry {
            name: "高橋健",
            email: None,
            phone: Some("070-1111-2222"),
            address: None,
            service_type: None,
            message: "庭のことで相談したいことがあります。折り返しお電話いただけますか。",
            utm_params: None,
            traffic_source: None,
            landing_page: None,
            status: InquiryStatus::Cancelled,
            days_ago: 14,
            photos: &[],
        },
    ]
}

/// Seeds demo inquiries unless some already exist.
async fn seed_inquiries(db: &DatabaseConnection) {
    let existing = inquiries::Entity::find().count(db).await.unwrap_or(0);
    if existing > 0 {
        println!("  {existing} inquiries already present, skipping...");
        return;
    }

    let now = Utc::now();
    let mut inserted = 0;
    for demo in demo_rows() {
        let submitted = now - Duration::days(demo.days_ago);
        let row = inquiries::ActiveModel {
            name: Set(demo.name.to_string()),
            email: Set(demo.email.map(str::to_string)),
            phone: Set(demo.phone.map(str::to_string)),
            address: Set(demo.address.map(str::to_string)),
            service_type: Set(demo.service_type.map(str::to_string)),
            message: Set(demo.message.to_string()),
            utm_params: Set(demo.utm_params),
            traffic_source: Set(demo.traffic_source.map(str::to_string)),
            landing_page: Set(demo.landing_page.map(str::to_string)),
            referrer: Set(None),
            status: Set(demo.status),
            created_at: Set(submitted.into()),
            updated_at: Set(submitted.into()),
            ..Default::default()
        };

        let inquiry = match row.insert(db).await {
            Ok(model) => model,
            Err(e) => {
                eprintln!("Failed to insert inquiry for {}: {e}", demo.name);
                continue;
            }
        };
        inserted += 1;

        for filename in demo.photos {
            let key = format!("inquiries/{}/{}-{filename}", inquiry.id, Uuid::new_v4());
            let photo = inquiry_photos::ActiveModel {
                inquiry_id: Set(inquiry.id),
                file_key: Set(key.clone()),
                url: Set(format!("https://photos.niwaki.example/{key}")),
                filename: Set(Some((*filename).to_string())),
                mime_type: Set(Some("image/jpeg".to_string())),
                file_size: Set(Some(204_800)),
                created_at: Set(submitted.into()),
                ..Default::default()
            };
            if let Err(e) = photo.insert(db).await {
                eprintln!("Failed to insert photo {filename}: {e}");
            }
        }
    }

    println!("  Inserted {inserted} demo inquiries");
}
