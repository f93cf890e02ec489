//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use domain::UserOut;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub superuser: bool,
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to the client-facing shape
impl From<Model> for UserOut {
    fn from(model: Model) -> Self {
        UserOut {
            name: model.name,
            email: model.email,
            uuid: model.uuid,
        }
    }
}
