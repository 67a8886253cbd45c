use std::sync::Arc;

use oarlock::Converter;
use sea_orm::{ActiveValue, DatabaseConnection, Set, Transaction};

pub mod users {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub username: String,
        pub password: String,
        pub person_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::persons::Entity",
            from = "Column::PersonId",
            to = "super::persons::Column::Id"
        )]
        Persons,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod persons {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "persons")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Application-side user model, distinct from the persistence entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub person_id: i32,
}

impl Converter<users::Entity> for User {
    fn to_entity(&self) -> users::ActiveModel {
        users::ActiveModel {
            id: if self.id == 0 {
                ActiveValue::NotSet
            } else {
                Set(self.id)
            },
            username: Set(self.username.clone()),
            password: Set(self.password.clone()),
            person_id: Set(self.person_id),
        }
    }

    fn from_entity(entity: users::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            password: entity.password,
            person_id: entity.person_id,
        }
    }
}

/// Drains the mock transaction log. Repositories share the connection, so
/// every repository handle must be dropped before calling this.
pub fn transaction_log(db: Arc<DatabaseConnection>) -> Vec<Transaction> {
    Arc::into_inner(db)
        .expect("a repository still holds the connection")
        .into_transaction_log()
}

pub fn user_row(id: i32, username: &str) -> users::Model {
    users::Model {
        id,
        username: username.to_owned(),
        password: "123".to_owned(),
        person_id: 1,
    }
}
