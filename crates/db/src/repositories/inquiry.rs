//! Inquiry repository for database operations.
//!
//! Implements inquiry persistence using SeaORM.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::{
    inquiries, inquiry_photos, sea_orm_active_enums::InquiryStatus as DbInquiryStatus,
};
use niwaki_core::inquiry::{
    CreatePhotoInput, Inquiry, InquiryError, InquiryPhoto, InquiryRepository as InquiryRepoTrait,
    InquiryStatus, NewInquiry,
};

/// Inquiry repository implementation.
#[derive(Debug, Clone)]
pub struct InquiryRepository {
    db: DatabaseConnection,
}

impl InquiryRepository {
    /// Create a new inquiry repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl InquiryRepoTrait for InquiryRepository {
    async fn create(&self, input: NewInquiry) -> Result<Inquiry, InquiryError> {
        let now = Utc::now();
        let utm_params = input
            .utm_params
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| InquiryError::repository(e.to_string()))?;

        let active_model = inquiries::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            service_type: Set(input.service_type),
            message: Set(input.message),
            utm_params: Set(utm_params),
            traffic_source: Set(input.traffic_source),
            landing_page: Set(input.landing_page),
            referrer: Set(input.referrer),
            status: Set(DbInquiryStatus::New),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| InquiryError::repository(e.to_string()))?;

        to_domain(model)
    }

    async fn add_photo(&self, input: CreatePhotoInput) -> Result<InquiryPhoto, InquiryError> {
        let active_model = inquiry_photos::ActiveModel {
            inquiry_id: Set(input.inquiry_id),
            file_key: Set(input.file_key),
            url: Set(input.url),
            filename: Set(Some(input.filename)),
            mime_type: Set(Some(input.mime_type)),
            file_size: Set(Some(input.file_size)),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| InquiryError::repository(e.to_string()))?;

        Ok(photo_to_domain(model))
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Inquiry>, InquiryError> {
        let models = inquiries::Entity::find()
            .order_by_desc(inquiries::Column::CreatedAt)
            .order_by_desc(inquiries::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(|e| InquiryError::repository(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Inquiry>, InquiryError> {
        let model = inquiries::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InquiryError::repository(e.to_string()))?;

        model.map(to_domain).transpose()
    }

    async fn list_photos(&self, inquiry_id: i32) -> Result<Vec<InquiryPhoto>, InquiryError> {
        let models = inquiry_photos::Entity::find()
            .filter(inquiry_photos::Column::InquiryId.eq(inquiry_id))
            .order_by_asc(inquiry_photos::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InquiryError::repository(e.to_string()))?;

        Ok(models.into_iter().map(photo_to_domain).collect())
    }

    async fn update_status(&self, id: i32, status: InquiryStatus) -> Result<bool, InquiryError> {
        let result = inquiries::Entity::update_many()
            .col_expr(
                inquiries::Column::Status,
                Expr::value(to_db_status(status)),
            )
            .col_expr(inquiries::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(inquiries::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| InquiryError::repository(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn exists(&self, id: i32) -> Result<bool, InquiryError> {
        let count: u64 = inquiries::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(|e| InquiryError::repository(e.to_string()))?;

        Ok(count > 0)
    }
}

/// Convert domain status to database enum.
fn to_db_status(status: InquiryStatus) -> DbInquiryStatus {
    match status {
        InquiryStatus::New => DbInquiryStatus::New,
        InquiryStatus::Contacted => DbInquiryStatus::Contacted,
        InquiryStatus::Quoted => DbInquiryStatus::Quoted,
        InquiryStatus::Completed => DbInquiryStatus::Completed,
        InquiryStatus::Cancelled => DbInquiryStatus::Cancelled,
    }
}

/// Convert database status to domain enum.
fn from_db_status(status: &DbInquiryStatus) -> InquiryStatus {
    match status {
        DbInquiryStatus::New => InquiryStatus::New,
        DbInquiryStatus::Contacted => InquiryStatus::Contacted,
        DbInquiryStatus::Quoted => InquiryStatus::Quoted,
        DbInquiryStatus::Completed => InquiryStatus::Completed,
        DbInquiryStatus::Cancelled => InquiryStatus::Cancelled,
    }
}

/// Convert database model to domain model.
///
/// Fails only if a stored utm_params value does not decode as a string map.
fn to_domain(model: inquiries::Model) -> Result<Inquiry, InquiryError> {
    let utm_params = model
        .utm_params
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| InquiryError::repository(e.to_string()))?;

    Ok(Inquiry {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        address: model.address,
        service_type: model.service_type,
        message: model.message,
        utm_params,
        traffic_source: model.traffic_source,
        landing_page: model.landing_page,
        referrer: model.referrer,
        status: from_db_status(&model.status),
        created_at: model.created_at.with_timezone(&chrono::Utc),
        updated_at: model.updated_at.with_timezone(&chrono::Utc),
    })
}

/// Convert database photo model to domain model.
fn photo_to_domain(model: inquiry_photos::Model) -> InquiryPhoto {
    InquiryPhoto {
        id: model.id,
        inquiry_id: model.inquiry_id,
        file_key: model.file_key,
        url: model.url,
        filename: model.filename,
        mime_type: model.mime_type,
        file_size: model.file_size,
        created_at: model.created_at.with_timezone(&chrono::Utc),
    }
}
