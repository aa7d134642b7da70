use sea_orm::entity::prelude::*;

/// A registered user of the complaint desk.
///
/// `username` is the login key by convention only: the column carries no
/// unique constraint, so registering the same name twice yields two rows.
/// `password` is stored and compared as plain text.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
    pub password: String,
    /// Free-form role label (e.g. "STUDENT", "ADMIN"). Never enforced.
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
