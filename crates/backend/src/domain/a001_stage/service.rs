use super::repository;
use chrono::Utc;
use contracts::domain::a001_stage::aggregate::{Stage, StageDto, StageId, StagePatch};
use contracts::domain::common::AggregateId;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::shared::error::AppError;

/// Некорректный ID трактуется как отсутствующая запись
fn parse_id(id: &str) -> Result<StageId, AppError> {
    StageId::from_string(id).map_err(|_| AppError::NotFound)
}

/// Создание новой записи
pub async fn create(db: &DatabaseConnection, dto: StageDto) -> Result<Stage, AppError> {
    let aggregate = Stage::new_for_insert(dto, Utc::now())?;
    let saved = repository::insert(db, &aggregate).await?;
    tracing::info!(id = %saved.to_string_id(), "Stage created");
    Ok(saved)
}

/// Получение списка всех записей (по убыванию даты)
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Stage>, AppError> {
    Ok(repository::list_all(db).await?)
}

/// Получение записи по ID
pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<Stage, AppError> {
    let id = parse_id(id)?;
    repository::get_by_id(db, id)
        .await?
        .ok_or(AppError::NotFound)
}

/// Обновление: переданные поля заменяют текущие, затем вся запись проверяется заново
pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    patch: StagePatch,
) -> Result<Stage, AppError> {
    let current = get_by_id(db, id).await?;
    let aggregate = current.apply(patch)?;

    // Запись могла быть удалена между чтением и записью
    let saved = repository::update(db, &aggregate)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(id = %saved.to_string_id(), "Stage updated");
    Ok(saved)
}

/// Удаление записи навсегда
pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<(), AppError> {
    let id = parse_id(id)?;
    if repository::delete(db, id).await? {
        tracing::info!(id = %id.as_string(), "Stage deleted");
        Ok(())
    } else {
        Err(AppError::NotFound)
    }
}

/// Пакетная вставка.
///
/// Сначала проверяется весь пакет, затем все записи вставляются в одной
/// транзакции: сохраняются либо все, либо ни одной.
pub async fn bulk_insert(
    db: &DatabaseConnection,
    dtos: Vec<StageDto>,
) -> Result<Vec<Stage>, AppError> {
    let now = Utc::now();
    let aggregates = dtos
        .into_iter()
        .enumerate()
        .map(|(index, dto)| {
            Stage::new_for_insert(dto, now)
                .map_err(|source| AppError::InvalidBatchItem { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let txn = db.begin().await?;
    let mut saved = Vec::with_capacity(aggregates.len());
    for aggregate in &aggregates {
        saved.push(repository::insert(&txn, aggregate).await?);
    }
    txn.commit().await?;

    tracing::info!("Batch import: {} stages inserted", saved.len());
    Ok(saved)
}
