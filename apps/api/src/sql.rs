//! Small builders over `sqlx::QueryBuilder` shared by the entity stores.
//!
//! `Select` turns optional filter fields into a conjunction of predicates;
//! `UpdateStatement` turns a tri-state patch into a `SET` list that only
//! touches the fields the caller supplied.
//!
//! Searchable text columns have a `<column>_folded` companion holding
//! [`fold`]ed text. Writers keep the pair in step; `Select::contains` only
//! reads the folded side.

use async_graphql::MaybeUndefined;
use sqlx::sqlite::SqliteRow;
use sqlx::{Encode, FromRow, QueryBuilder, Sqlite, SqlitePool, Type};
use tracing::debug;

use crate::errors::AppError;

/// Values that can be bound into a `'static` SQLite query.
pub trait Bindable: for<'q> Encode<'q, Sqlite> + Type<Sqlite> + Send + 'static {}

impl<T> Bindable for T where T: for<'q> Encode<'q, Sqlite> + Type<Sqlite> + Send + 'static {}

/// Unicode lowercasing used for case-insensitive search.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn folded_column(column: &str) -> String {
    format!("{column}_folded")
}

pub struct Select {
    qb: QueryBuilder<'static, Sqlite>,
}

impl Select {
    pub fn from(table: &str) -> Self {
        Self {
            qb: QueryBuilder::new(format!("SELECT * FROM {table} WHERE 1 = 1")),
        }
    }

    /// Case-insensitive substring match against `<column>_folded`.
    /// Empty needles impose no constraint.
    pub fn contains(&mut self, column: &str, needle: Option<&str>) -> &mut Self {
        if let Some(needle) = needle.filter(|n| !n.is_empty()) {
            self.qb
                .push(format!(" AND instr({}, ", folded_column(column)))
                .push_bind(fold(needle))
                .push(") > 0");
        }
        self
    }

    pub fn eq<T: Bindable>(&mut self, column: &str, value: Option<T>) -> &mut Self {
        self.compare(column, "=", value)
    }

    pub fn gte<T: Bindable>(&mut self, column: &str, value: Option<T>) -> &mut Self {
        self.compare(column, ">=", value)
    }

    pub fn lte<T: Bindable>(&mut self, column: &str, value: Option<T>) -> &mut Self {
        self.compare(column, "<=", value)
    }

    fn compare<T: Bindable>(&mut self, column: &str, op: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.qb.push(format!(" AND {column} {op} ")).push_bind(value);
        }
        self
    }

    fn order_newest_first(&mut self) {
        self.qb.push(" ORDER BY created_at DESC, rowid DESC");
    }

    pub fn sql(&self) -> &str {
        self.qb.sql()
    }

    /// Runs the query, newest-created rows first.
    pub async fn fetch_all<R>(mut self, pool: &SqlitePool) -> Result<Vec<R>, AppError>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        self.order_newest_first();
        debug!("select: {}", self.sql());
        Ok(self.qb.build_query_as::<R>().fetch_all(pool).await?)
    }
}

pub struct UpdateStatement {
    qb: QueryBuilder<'static, Sqlite>,
}

impl UpdateStatement {
    /// Starts `UPDATE <table> SET updated_at = <now>`; every patch bumps `updated_at`.
    pub fn new(table: &str, now: String) -> Self {
        let mut qb = QueryBuilder::new(format!("UPDATE {table} SET updated_at = "));
        qb.push_bind(now);
        Self { qb }
    }

    pub fn set<T: Bindable>(&mut self, column: &str, value: T) -> &mut Self {
        self.qb.push(format!(", {column} = ")).push_bind(value);
        self
    }

    /// Nullable column: absent leaves it alone, null clears it, a value sets it.
    pub fn set_nullable<T: Bindable>(&mut self, column: &str, value: MaybeUndefined<T>) -> &mut Self {
        match value {
            MaybeUndefined::Undefined => self,
            MaybeUndefined::Null => self.set(column, None::<T>),
            MaybeUndefined::Value(v) => self.set(column, Some(v)),
        }
    }

    /// Non-nullable column: absent leaves it alone, null is rejected.
    pub fn set_required<T: Bindable>(
        &mut self,
        column: &str,
        field: &str,
        value: MaybeUndefined<T>,
    ) -> Result<&mut Self, AppError> {
        match value {
            MaybeUndefined::Undefined => Ok(self),
            MaybeUndefined::Null => Err(AppError::Validation(format!("{field} cannot be null"))),
            MaybeUndefined::Value(v) => Ok(self.set(column, v)),
        }
    }

    /// `set_nullable` for a searchable text column and its folded companion.
    pub fn set_nullable_text(&mut self, column: &str, value: MaybeUndefined<String>) -> &mut Self {
        let folded = match &value {
            MaybeUndefined::Undefined => MaybeUndefined::Undefined,
            MaybeUndefined::Null => MaybeUndefined::Null,
            MaybeUndefined::Value(text) => MaybeUndefined::Value(fold(text)),
        };
        self.set_nullable(column, value)
            .set_nullable(&folded_column(column), folded)
    }

    /// `set_required` for a searchable text column and its folded companion.
    pub fn set_required_text(
        &mut self,
        column: &str,
        field: &str,
        value: MaybeUndefined<String>,
    ) -> Result<&mut Self, AppError> {
        let folded = value.value().map(|text| fold(text));
        self.set_required(column, field, value)?;
        if let Some(folded) = folded {
            self.set(&folded_column(column), folded);
        }
        Ok(self)
    }

    pub fn sql(&self) -> &str {
        self.qb.sql()
    }

    /// Executes the update against one row, failing with `NotFound` if no row matched.
    pub async fn execute(
        mut self,
        pool: &SqlitePool,
        entity: &str,
        id: &str,
    ) -> Result<(), AppError> {
        self.qb.push(" WHERE id = ").push_bind(id.to_owned());
        debug!("update: {}", self.sql());
        let result = self.qb.build().execute(pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(entity, id));
        }
        Ok(())
    }
}

/// Parses a tri-state date patch field, keeping absent and null distinct.
pub fn date_patch(field: &str, value: MaybeUndefined<String>) -> Result<MaybeUndefined<String>, AppError> {
    Ok(match value {
        MaybeUndefined::Undefined => MaybeUndefined::Undefined,
        MaybeUndefined::Null => MaybeUndefined::Null,
        MaybeUndefined::Value(raw) => MaybeUndefined::Value(crate::db::parse_date(field, &raw)?),
    })
}

/// Parses an optional date from a create input.
pub fn optional_date(field: &str, value: Option<String>) -> Result<Option<String>, AppError> {
    value
        .map(|raw| crate::db::parse_date(field, &raw))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_without_filters_is_unconstrained() {
        let mut select = Select::from("companies");
        select.contains("name", None).eq::<String>("size", None);
        assert_eq!(select.sql(), "SELECT * FROM companies WHERE 1 = 1");
    }

    #[test]
    fn test_select_skips_empty_text() {
        let mut select = Select::from("contacts");
        select.contains("email", Some(""));
        assert_eq!(select.sql(), "SELECT * FROM contacts WHERE 1 = 1");
    }

    #[test]
    fn test_select_ands_predicates() {
        let mut select = Select::from("applications");
        select
            .contains("job_title", Some("rust"))
            .gte("salary_max", Some(100_000))
            .lte("salary_min", Some(150_000));
        assert_eq!(
            select.sql(),
            "SELECT * FROM applications WHERE 1 = 1 \
             AND instr(job_title_folded, ?) > 0 \
             AND salary_max >= ? AND salary_min <= ?"
        );
    }

    #[test]
    fn test_update_only_touches_supplied_fields() {
        let mut update = UpdateStatement::new("applications", "now".into());
        update
            .set_nullable::<String>("location", MaybeUndefined::Undefined)
            .set_nullable::<String>("applied_date", MaybeUndefined::Null);
        update
            .set_required("status", "status", MaybeUndefined::Value("REJECTED".to_string()))
            .unwrap();
        assert_eq!(
            update.sql(),
            "UPDATE applications SET updated_at = ?, applied_date = ?, status = ?"
        );
    }

    #[test]
    fn test_text_updates_keep_folded_column_in_step() {
        let mut update = UpdateStatement::new("contacts", "now".into());
        update
            .set_required_text("name", "name", MaybeUndefined::Value("Zoë".to_string()))
            .unwrap()
            .set_nullable_text("email", MaybeUndefined::Null)
            .set_nullable_text("title", MaybeUndefined::Undefined);
        assert_eq!(
            update.sql(),
            "UPDATE contacts SET updated_at = ?, name = ?, name_folded = ?, \
             email = ?, email_folded = ?"
        );
    }

    #[test]
    fn test_fold_lowercases_beyond_ascii() {
        assert_eq!(fold("ÜBER GmbH"), "über gmbh");
        assert_eq!(fold("SOCIÉTÉ"), "société");
        assert_eq!(fold("ΑΘΗΝΑ"), "αθηνα");
    }

    #[test]
    fn test_update_rejects_null_for_required_column() {
        let mut update = UpdateStatement::new("companies", "now".into());
        let result = update.set_required::<String>("name", "name", MaybeUndefined::Null);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_date_patch_keeps_null_distinct_from_absent() {
        assert!(date_patch("postedDate", MaybeUndefined::Undefined)
            .unwrap()
            .is_undefined());
        assert!(date_patch("postedDate", MaybeUndefined::Null).unwrap().is_null());
        assert_eq!(
            date_patch("postedDate", MaybeUndefined::Value("2024-10-15".into()))
                .unwrap()
                .value()
                .map(String::as_str),
            Some("2024-10-15T00:00:00.000000Z")
        );
    }
}
