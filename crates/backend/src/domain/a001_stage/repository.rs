use contracts::domain::a001_stage::aggregate::{Stage, StageId};
use contracts::domain::common::AggregateId;

use sea_orm::entity::prelude::*;

use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_stage")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub place: String,
    pub stage_name: String,
    pub cost: f64,
    pub dept: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Stage {
    type Error = DbErr;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let id = StageId::from_string(&m.id).map_err(DbErr::Custom)?;
        Ok(Stage {
            id,
            date: m.date,
            place: m.place,
            stage_name: m.stage_name,
            cost: m.cost,
            dept: m.dept,
        })
    }
}

fn to_active(aggregate: &Stage) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        date: Set(aggregate.date),
        place: Set(aggregate.place.clone()),
        stage_name: Set(aggregate.stage_name.clone()),
        cost: Set(aggregate.cost),
        dept: Set(aggregate.dept.clone()),
    }
}

/// Все записи, новые (по дате) первыми
pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Stage>, DbErr> {
    Entity::find()
        .order_by_desc(Column::Date)
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Stage::try_from)
        .collect()
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: StageId) -> Result<Option<Stage>, DbErr> {
    Entity::find_by_id(id.as_string())
        .one(db)
        .await?
        .map(Stage::try_from)
        .transpose()
}

/// Вставка; возвращает запись в том виде, в каком она сохранена
pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Stage) -> Result<Stage, DbErr> {
    to_active(aggregate).insert(db).await?.try_into()
}

/// Полная перезапись полей; `None`, если записи уже нет
pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &Stage) -> Result<Option<Stage>, DbErr> {
    match to_active(aggregate).update(db).await {
        Ok(model) => Ok(Some(model.try_into()?)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Удаление навсегда; `false`, если записи не было
pub async fn delete<C: ConnectionTrait>(db: &C, id: StageId) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id.as_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
