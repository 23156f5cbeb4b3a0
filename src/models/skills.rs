use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Maximum number of skills a lawyer may carry, enforced at write time.
pub const MAX_SKILLS_PER_LAWYER: usize = 5;

/// Selection guard for replacing a lawyer's skill set: at most five ids.
/// An empty selection is valid and clears the set.
pub fn ensure_selection_size(skill_ids: &[Uuid]) -> Result<(), ApiError> {
    if skill_ids.len() > MAX_SKILLS_PER_LAWYER {
        return Err(ApiError::BadRequest(format!(
            "Cannot add more than {MAX_SKILLS_PER_LAWYER} skills"
        )));
    }
    Ok(())
}

/// SeaORM entity for the `skills` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "skills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "lawyer_skills::Entity")]
    LawyerSkills,
}

impl Related<lawyer_skills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LawyerSkills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Join table between lawyers and skills.
pub mod lawyer_skills {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "lawyer_skills")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub lawyer_id: Uuid,
        #[sea_orm(primary_key, auto_increment = false)]
        pub skill_id: Uuid,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::SkillId",
            to = "super::Column::Id"
        )]
        Skill,
        #[sea_orm(
            belongs_to = "crate::models::users::Entity",
            from = "Column::LawyerId",
            to = "crate::models::users::Column::Id"
        )]
        Lawyer,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Skill.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSkill {
    pub name: Option<String>,
}

/// Request body for replacing a lawyer's skill set. An empty list clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignSkills {
    pub skill_ids: Option<Vec<Uuid>>,
}
