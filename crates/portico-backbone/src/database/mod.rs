use std::sync::Arc;

use sea_orm::{
    sea_query::{ArrayType, ColumnType, Nullable, ValueType, ValueTypeErr},
    ColIdx, ConnectOptions, Database, DatabaseConnection, DbErr, QueryResult, TryFromU64, TryGetError, TryGetable,
    Value,
};
use ulid::Ulid;

pub(crate) mod migration;
pub(crate) mod organization;
pub(crate) mod organization_member;
pub(crate) mod user;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UlidId(Ulid);

impl UlidId {
    pub fn new(inner: Ulid) -> Self {
        Self(inner)
    }
}

impl std::fmt::Display for UlidId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UlidId> for Value {
    fn from(value: UlidId) -> Self {
        Value::String(Some(Box::new(value.0.to_string())))
    }
}

impl TryGetable for UlidId {
    fn try_get_by<I: ColIdx>(res: &QueryResult, index: I) -> Result<Self, TryGetError> {
        let value: String = res.try_get_by(index)?;

        Ulid::from_string(&value)
            .map(UlidId)
            .map_err(|e| TryGetError::DbErr(DbErr::Type(format!("invalid ulid: {e}"))))
    }
}

impl TryFromU64 for UlidId {
    fn try_from_u64(n: u64) -> Result<Self, DbErr> {
        let value = String::try_from_u64(n)?;
        Ulid::from_string(&value)
            .map(UlidId)
            .map_err(|e| DbErr::Type(format!("invalid ulid: {e}")))
    }
}

impl ValueType for UlidId {
    fn try_from(v: Value) -> Result<Self, ValueTypeErr> {
        match v {
            Value::String(Some(value)) => Ulid::from_string(&value).map(UlidId).map_err(|_| ValueTypeErr),
            _ => Err(ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "UlidId".to_owned()
    }

    fn array_type() -> ArrayType {
        ArrayType::String
    }

    fn column_type() -> ColumnType {
        ColumnType::Char(Some(26))
    }
}

impl Nullable for UlidId {
    fn null() -> Value {
        Value::String(None)
    }
}

pub(crate) enum AuthMethod {
    Credential { username: String, password: Option<String> },
}

pub(crate) async fn connect_to_database(
    host: &str,
    port: u16,
    database_name: &str,
    auth: &AuthMethod,
) -> anyhow::Result<Arc<DatabaseConnection>> {
    let url = match auth {
        AuthMethod::Credential { username, password: Some(password) } => {
            format!("postgres://{username}:{password}@{host}:{port}/{database_name}")
        }
        AuthMethod::Credential { username, password: None } => {
            format!("postgres://{username}@{host}:{port}/{database_name}")
        }
    };

    let connection = Database::connect(ConnectOptions::new(url)).await?;

    Ok(Arc::new(connection))
}
