use axum::extract::FromRef;
use storage::Database;
use storage::models::MemberType;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub default_member_type: MemberType,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
