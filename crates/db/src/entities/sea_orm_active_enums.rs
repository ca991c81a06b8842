//! Database enum types.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Inquiry workflow status, stored as a short string column.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    /// Just submitted, nobody has looked at it yet.
    #[sea_orm(string_value = "new")]
    New,
    /// Staff reached out to the customer.
    #[sea_orm(string_value = "contacted")]
    Contacted,
    /// A quote was sent.
    #[sea_orm(string_value = "quoted")]
    Quoted,
    /// Work finished.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Inquiry withdrawn or declined.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}
