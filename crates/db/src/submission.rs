//! Project submission.
//!
//! A submission either references a registered team through `team_id`,
//! in which case at most one submission per team may exist, or carries
//! the team name and member emails inline without any team reference.

use sea_orm::entity::prelude::*;

use crate::team::Emails;

/// Submission model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub team_emails: Option<Emails>,
    pub github_link: String,
    pub live_demo_link: String,
    pub twitter_post_link: String,
    pub created_at: TimeDateTime,
}

/// Submission model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
