use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::metadata::{COST, DATE, DEPT, PLACE, STAGE_NAME};
use crate::domain::common::AggregateId;
use crate::shared::metadata::ValidationError;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор записи о стажировке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageId(pub Uuid);

impl StageId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for StageId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(StageId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Стажировка (обучение): дата, место, название, стоимость, код отдела
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Stage {
    /// Auto-generated ID
    #[schema(value_type = String, format = Uuid)]
    pub id: StageId,

    /// Date of stage
    pub date: DateTime<Utc>,

    /// Location
    #[schema(example = "Paris Center", max_length = 50)]
    pub place: String,

    /// Name of stage
    #[serde(rename = "stageName")]
    #[schema(example = "Node JS Training", max_length = 50)]
    pub stage_name: String,

    /// Cost in Euro
    #[schema(example = 150.5, minimum = 0)]
    pub cost: f64,

    /// Dept code, always uppercase
    #[schema(example = "75", min_length = 2, max_length = 2)]
    pub dept: String,
}

impl Stage {
    pub const ENTITY_NAME: &'static str = "Stage";

    /// Создать новую запись для вставки в БД.
    ///
    /// Назначает новый ID, приводит `dept` к верхнему регистру и подставляет
    /// `now`, если дата не передана.
    pub fn new_for_insert(dto: StageDto, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        Self::build(StageId::new_v4(), dto, Some(now))
    }

    /// Применить частичное изменение.
    ///
    /// Переданные поля заменяют текущие значения, отсутствующие сохраняются,
    /// явный `null` очищает поле; затем вся запись проверяется заново.
    /// ID не меняется.
    pub fn apply(&self, patch: StagePatch) -> Result<Self, ValidationError> {
        let merged = StageDto {
            date: patch.date.unwrap_or(Some(self.date)),
            place: patch.place.unwrap_or_else(|| Some(self.place.clone())),
            stage_name: patch
                .stage_name
                .unwrap_or_else(|| Some(self.stage_name.clone())),
            cost: patch.cost.unwrap_or(Some(self.cost)),
            dept: patch.dept.unwrap_or_else(|| Some(self.dept.clone())),
        };
        Self::build(self.id, merged, None)
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    fn build(
        id: StageId,
        dto: StageDto,
        default_date: Option<DateTime<Utc>>,
    ) -> Result<Self, ValidationError> {
        let dto = dto.normalized();
        let mut errors = ValidationError::new(Self::ENTITY_NAME);

        let date = errors.present(&DATE, dto.date.or(default_date));
        let place = errors.text(&PLACE, dto.place);
        let stage_name = errors.text(&STAGE_NAME, dto.stage_name);
        let cost = errors.number(&COST, dto.cost);
        let dept = errors.text(&DEPT, dto.dept);

        match (date, place, stage_name, cost, dept) {
            (Some(date), Some(place), Some(stage_name), Some(cost), Some(dept))
                if errors.is_empty() =>
            {
                Ok(Self {
                    id,
                    date,
                    place,
                    stage_name,
                    cost,
                    dept,
                })
            }
            _ => Err(errors),
        }
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления записи.
///
/// Все поля необязательны на уровне формата; обязательность проверяется
/// при построении [`Stage`]. Неизвестные поля игнорируются.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StageDto {
    /// Defaults to the creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2023-10-27T10:00:00.000Z")]
    pub date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(required = true, example = "Paris Center", min_length = 1, max_length = 50)]
    pub place: Option<String>,

    #[serde(rename = "stageName", default, skip_serializing_if = "Option::is_none")]
    #[schema(required = true, example = "Node JS Training", min_length = 1, max_length = 50)]
    pub stage_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(required = true, example = 150.5, minimum = 0)]
    pub cost: Option<f64>,

    /// Converted to uppercase on write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(required = true, example = "75", min_length = 2, max_length = 2)]
    pub dept: Option<String>,
}

impl StageDto {
    /// Нормализация перед проверкой: код отдела в верхнем регистре
    pub fn normalized(mut self) -> Self {
        self.dept = self.dept.map(|d| d.to_uppercase());
        self
    }
}

/// Частичное изменение записи (PUT).
///
/// Внешний `Option` — было ли поле в запросе, внутренний — его значение
/// (`None` для явного `null`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct StagePatch {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, format = DateTime, example = "2023-10-27T10:00:00.000Z")]
    pub date: Option<Option<DateTime<Utc>>>,

    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Paris Center", min_length = 1, max_length = 50)]
    pub place: Option<Option<String>>,

    #[serde(rename = "stageName", default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Node JS Training", min_length = 1, max_length = 50)]
    pub stage_name: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>, example = 150.5, minimum = 0)]
    pub cost: Option<Option<f64>>,

    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "75", min_length = 2, max_length = 2)]
    pub dept: Option<Option<String>>,
}

/// Поле присутствует в JSON: значение или `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
