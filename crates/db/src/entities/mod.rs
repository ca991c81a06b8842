//! `SeaORM` entity definitions.

pub mod inquiries;
pub mod inquiry_photos;
pub mod sea_orm_active_enums;
