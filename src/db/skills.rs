use sea_orm::*;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::skills::{self, ensure_selection_size, lawyer_skills};
use crate::models::users::{self, Role};

/// Create a skill; the name is unique.
pub async fn insert_skill(db: &DatabaseConnection, name: String) -> Result<skills::Model, ApiError> {
    let duplicate = skills::Entity::find()
        .filter(skills::Column::Name.eq(&name))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(ApiError::Conflict(
            "A skill with this name already exists".to_string(),
        ));
    }

    let skill = skills::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        created_at: Set(chrono::Utc::now()),
    };

    Ok(skill.insert(db).await?)
}

pub async fn get_all_skills(db: &DatabaseConnection) -> Result<Vec<skills::Model>, DbErr> {
    skills::Entity::find()
        .order_by_asc(skills::Column::Name)
        .all(db)
        .await
}

/// Replace a lawyer's skill set. An empty list clears all skills; more than
/// five ids is rejected; every id must name an existing skill. The delete and
/// the re-inserts commit together.
pub async fn set_lawyer_skills(
    db: &DatabaseConnection,
    lawyer_id: Uuid,
    skill_ids: Vec<Uuid>,
) -> Result<(), ApiError> {
    ensure_selection_size(&skill_ids)?;

    let txn = db.begin().await?;

    lawyer_skills::Entity::delete_many()
        .filter(lawyer_skills::Column::LawyerId.eq(lawyer_id))
        .exec(&txn)
        .await?;

    for skill_id in &skill_ids {
        let exists = skills::Entity::find_by_id(*skill_id).one(&txn).await?;
        if exists.is_none() {
            return Err(ApiError::not_found(format!("Skill {skill_id}")));
        }

        lawyer_skills::ActiveModel {
            lawyer_id: Set(lawyer_id),
            skill_id: Set(*skill_id),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(())
}

/// The skills attached to one lawyer.
pub async fn get_lawyer_skills(
    db: &DatabaseConnection,
    lawyer_id: Uuid,
) -> Result<Vec<skills::Model>, DbErr> {
    let links = lawyer_skills::Entity::find()
        .filter(lawyer_skills::Column::LawyerId.eq(lawyer_id))
        .all(db)
        .await?;
    let skill_ids: Vec<Uuid> = links.iter().map(|l| l.skill_id).collect();
    if skill_ids.is_empty() {
        return Ok(Vec::new());
    }

    skills::Entity::find()
        .filter(skills::Column::Id.is_in(skill_ids))
        .all(db)
        .await
}

/// Lawyers carrying a given skill.
pub async fn get_lawyers_by_skill(
    db: &DatabaseConnection,
    skill_id: Uuid,
) -> Result<Vec<users::Model>, DbErr> {
    let links = lawyer_skills::Entity::find()
        .filter(lawyer_skills::Column::SkillId.eq(skill_id))
        .all(db)
        .await?;
    let lawyer_ids: Vec<Uuid> = links.iter().map(|l| l.lawyer_id).collect();
    if lawyer_ids.is_empty() {
        return Ok(Vec::new());
    }

    users::Entity::find()
        .filter(users::Column::Id.is_in(lawyer_ids))
        .all(db)
        .await
}

/// Skill-name map over all lawyers: lawyer id → skill names.
pub async fn get_skill_map(
    db: &DatabaseConnection,
) -> Result<HashMap<Uuid, Vec<String>>, DbErr> {
    let lawyers = users::Entity::find()
        .filter(users::Column::Role.eq(Role::Lawyer))
        .all(db)
        .await?;
    let links = lawyer_skills::Entity::find().all(db).await?;
    let skill_names: HashMap<Uuid, String> = skills::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();

    let mut map: HashMap<Uuid, Vec<String>> =
        lawyers.iter().map(|l| (l.id, Vec::new())).collect();
    for link in links {
        if let (Some(names), Some(name)) = (map.get_mut(&link.lawyer_id), skill_names.get(&link.skill_id)) {
            names.push(name.clone());
        }
    }

    Ok(map)
}
