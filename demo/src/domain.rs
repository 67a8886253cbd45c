use oarlock::Converter;
use sea_orm::{ActiveValue, Set};

use crate::entity::users;

/// Application-side user. Kept separate from the persistence entity so the
/// row shape can evolve without touching handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub person_id: i32,
}

impl Converter<users::Entity> for User {
    fn to_entity(&self) -> users::ActiveModel {
        users::ActiveModel {
            // Zero means "not persisted yet": leave the key to the database.
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
