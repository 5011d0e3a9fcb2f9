//! Registered event team.
//!
//! Teams are created once through the registration flow and are never
//! updated or removed afterwards. Team names are unique across the whole event,
//! which is enforced by the database itself to arbitrate concurrent registrations.

use sea_orm::{entity::prelude::*, FromJsonQueryResult};
use serde::{Deserialize, Serialize};

/// Maximum amount of members a single team may have.
pub const MAX_MEMBERS: usize = 4;

/// Ordered list of team member emails, stored as a JSON array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Emails(pub Vec<String>);

/// Team model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    /// Unique team identifier.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Unique team name.
    #[sea_orm(unique)]
    pub team_name: String,

    /// Team member emails.
    #[sea_orm(column_type = "Json")]
    pub team_emails: Emails,

    /// Team registration timestamp.
    pub created_at: TimeDateTime,
}

/// Team model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::submission::Entity")]
    Submission,
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
