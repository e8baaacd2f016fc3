//! `SeaORM` Entity for kmart_daily_records table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "kmart_daily_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub location: String,
    pub category: String,
    pub sub_category: Option<String>,
    pub date: Date,
    pub quantity: i32,
    pub modified_by: Option<String>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
