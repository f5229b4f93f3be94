use sea_orm::DatabaseConnection;

/// Состояние приложения, передаваемое во все обработчики
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Port the server listens on, advertised in the API docs
    pub port: u16,
}

impl AppState {
    pub fn new(db: DatabaseConnection, port: u16) -> Self {
        Self { db, port }
    }
}
