//! `SeaORM` Entity for inquiries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::InquiryStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inquiries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub service_type: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub utm_params: Option<Json>,
    #[sea_orm(column_type = "Text", nullable)]
    pub traffic_source: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub landing_page: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub referrer: Option<String>,
    pub status: InquiryStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inquiry_photos::Entity")]
    InquiryPhotos,
}

impl Related<super::inquiry_photos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InquiryPhotos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
