//! Dynamic statement builder.
//!
//! Turns records into sparse INSERT/UPDATE statements and filters into a
//! conjunctive WHERE clause. Column names come from compile-time
//! descriptors; every value is bound through a `$n` placeholder.

use amora_core::types::{DbId, STATUS_ACTIVE};
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{Query, QueryAs, QueryScalar};

use crate::record::{Record, SqlValue};

/// Columns and values of a sparse write, positionally aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteSet {
    columns: Vec<&'static str>,
    values: Vec<SqlValue>,
}

impl WriteSet {
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// `$start`, `$start + 1`, ... one per column.
    pub fn placeholders(&self, start: usize) -> Vec<String> {
        (start..start + self.len()).map(|n| format!("${n}")).collect()
    }
}

/// Collect the non-zero fields of `record`.
///
/// Zero-valued fields (`0`, `""`, the Unix epoch, NULL) are left out of the
/// statement entirely, so a caller cannot write a zero value through this
/// path: "set to zero" and "not provided" look the same. Callers that need
/// to clear a column must do so with dedicated SQL.
pub fn build_write<R: Record>(record: &R) -> WriteSet {
    let (columns, values) = record
        .fields()
        .into_iter()
        .filter(|field| !field.value.is_zero())
        .map(|field| (field.column, field.value.to_value()))
        .unzip();
    WriteSet { columns, values }
}

/// A rendered statement and its bind values in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

pub fn insert_statement(table: &str, write: WriteSet) -> Statement {
    let sql = format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        write.columns.join(", "),
        write.placeholders(1).join(", ")
    );
    Statement {
        sql,
        args: write.values,
    }
}

/// `UPDATE ... SET` over the write set, with `id` bound last.
pub fn update_statement(table: &str, write: WriteSet, id: DbId) -> Statement {
    let assignments: Vec<String> = write
        .columns
        .iter()
        .zip(write.placeholders(1))
        .map(|(column, placeholder)| format!("{column} = {placeholder}"))
        .collect();
    let sql = format!(
        "UPDATE {table} SET {} WHERE id = ${}",
        assignments.join(", "),
        write.len() + 1
    );

    let mut args = write.values;
    args.push(SqlValue::BigInt(Some(id)));
    Statement { sql, args }
}

/// WHERE clause body plus its bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    clause: String,
    args: Vec<SqlValue>,
}

impl Predicate {
    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn args(&self) -> &[SqlValue] {
        &self.args
    }
}

/// `1=1`, then `AND column = $n` for every non-zero filter field in
/// declaration order, then `AND status = 1` when `is_active`.
pub fn build_filter<F: Record>(filter: &F, is_active: bool) -> Predicate {
    let mut clause = String::from("1=1");
    let mut args = Vec::new();

    for field in filter.fields() {
        if field.value.is_zero() {
            continue;
        }
        args.push(field.value.to_value());
        clause.push_str(&format!(" AND {} = ${}", field.column, args.len()));
    }
    if is_active {
        clause.push_str(&format!(" AND status = {STATUS_ACTIVE}"));
    }

    Predicate { clause, args }
}

pub fn count_statement(table: &str, predicate: &Predicate) -> Statement {
    Statement {
        sql: format!("SELECT COUNT(*) FROM {table} WHERE {}", predicate.clause),
        args: predicate.args.clone(),
    }
}

pub fn select_statement(
    table: &str,
    columns: &[&str],
    predicate: &Predicate,
    limit: i64,
    offset: i64,
) -> Statement {
    Statement {
        sql: format!(
            "SELECT {} FROM {table} WHERE {} LIMIT {limit} OFFSET {offset}",
            columns.join(", "),
            predicate.clause
        ),
        args: predicate.args.clone(),
    }
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

/// Bind [`SqlValue`]s onto an sqlx query builder in order.
pub trait BindValues: Sized {
    fn bind_value(self, value: SqlValue) -> Self;

    fn bind_all(self, values: Vec<SqlValue>) -> Self {
        values.into_iter().fold(self, Self::bind_value)
    }
}

macro_rules! bind_match {
    ($query:expr, $value:expr) => {
        match $value {
            SqlValue::BigInt(v) => $query.bind(v),
            SqlValue::Int(v) => $query.bind(v),
            SqlValue::Bool(v) => $query.bind(v),
            SqlValue::Text(v) => $query.bind(v),
            SqlValue::Timestamp(v) => $query.bind(v),
        }
    };
}

impl<'q> BindValues for Query<'q, Postgres, PgArguments> {
    fn bind_value(self, value: SqlValue) -> Self {
        bind_match!(self, value)
    }
}

impl<'q, O> BindValues for QueryAs<'q, Postgres, O, PgArguments> {
    fn bind_value(self, value: SqlValue) -> Self {
        bind_match!(self, value)
    }
}

impl<'q, O> BindValues for QueryScalar<'q, Postgres, O, PgArguments> {
    fn bind_value(self, value: SqlValue) -> Self {
        bind_match!(self, value)
    }
}

#[cfg(test)]
mod tests {
    use amora_core::paging::Paging;
    use chrono::TimeZone;

    use super::*;
    use crate::models::premium_feature::{PremiumFeature, PremiumFeatureFilter, PremiumFeatureInput};
    use crate::models::user_activity::UserActivityFilter;

    fn text(s: &str) -> SqlValue {
        SqlValue::Text(Some(s.to_string()))
    }

    fn named(name: &str, flag: &str) -> PremiumFeatureInput {
        PremiumFeatureInput {
            name: name.to_string(),
            flag: flag.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn insert_lists_only_non_zero_fields() {
        let statement = insert_statement("premium_feature", build_write(&named("test", "test")));

        assert_eq!(
            statement.sql,
            "INSERT INTO premium_feature (name, flag) VALUES ($1, $2)"
        );
        assert_eq!(statement.args, vec![text("test"), text("test")]);
    }

    #[test]
    fn write_set_matches_non_zero_fields_exactly() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let cases = [
            (PremiumFeatureInput::default(), vec![]),
            (named("gold", ""), vec!["name"]),
            (named("", "GOLD"), vec!["flag"]),
            (
                PremiumFeatureInput {
                    status: 1,
                    created_at: at,
                    created_by: 4,
                    ..named("gold", "GOLD")
                },
                vec!["name", "flag", "status", "created_at", "created_by"],
            ),
        ];

        for (input, expected) in cases {
            let write = build_write(&input);
            assert_eq!(write.columns(), expected.as_slice());
            assert_eq!(write.values().len(), write.columns().len());
            assert!(write.values().iter().all(|v| !v.is_null()));
        }
    }

    #[test]
    fn update_binds_id_after_assignments() {
        let input = PremiumFeatureInput {
            status: -1,
            deleted_by: 9,
            ..Default::default()
        };
        let statement = update_statement("premium_feature", build_write(&input), 42);

        assert_eq!(
            statement.sql,
            "UPDATE premium_feature SET status = $1, deleted_by = $2 WHERE id = $3"
        );
        assert_eq!(
            statement.args,
            vec![
                SqlValue::BigInt(Some(-1)),
                SqlValue::BigInt(Some(9)),
                SqlValue::BigInt(Some(42)),
            ]
        );
    }

    #[test]
    fn empty_filter_is_vacuously_true() {
        let predicate = build_filter(&PremiumFeatureFilter::default(), false);
        assert_eq!(predicate.clause(), "1=1");
        assert!(predicate.args().is_empty());
    }

    #[test]
    fn filter_fields_follow_declaration_order() {
        let filter = UserActivityFilter {
            liked_user_id: 7,
            user_id: 3,
            ..Default::default()
        };
        let predicate = build_filter(&filter, true);

        assert_eq!(
            predicate.clause(),
            "1=1 AND user_id = $1 AND liked_user_id = $2 AND status = 1"
        );
        assert_eq!(
            predicate.args(),
            &[SqlValue::BigInt(Some(3)), SqlValue::BigInt(Some(7))]
        );
    }

    #[test]
    fn active_listing_statements() {
        let paging = Paging::new(PremiumFeatureFilter::default()).active_only(true);
        let predicate = build_filter(&paging.filter, paging.is_active);

        let count = count_statement("premium_feature", &predicate);
        assert_eq!(
            count.sql,
            "SELECT COUNT(*) FROM premium_feature WHERE 1=1 AND status = 1"
        );

        let select = select_statement(
            "premium_feature",
            <PremiumFeature as Record>::COLUMNS,
            &predicate,
            paging.limit(),
            paging.offset(),
        );
        assert_eq!(
            select.sql,
            "SELECT id, name, flag, status, created_at, created_by, updated_at, updated_by, \
             deleted_at, deleted_by FROM premium_feature WHERE 1=1 AND status = 1 LIMIT 10 OFFSET 0"
        );
        assert!(select.args.is_empty());
    }

    #[test]
    fn count_ignores_paging() {
        let filter = PremiumFeatureFilter {
            name: "gold".into(),
            ..Default::default()
        };
        let predicate = build_filter(&filter, false);
        let count = count_statement("premium_feature", &predicate);

        for page in [1, 2, 7] {
            let paging = Paging::new(()).with_page(page).with_take(25);
            let select = select_statement(
                "premium_feature",
                &["id"],
                &predicate,
                paging.limit(),
                paging.offset(),
            );
            assert!(select.sql.ends_with(&format!("LIMIT 25 OFFSET {}", (page - 1) * 25)));
            assert_eq!(
                count.sql,
                "SELECT COUNT(*) FROM premium_feature WHERE 1=1 AND name = $1"
            );
            assert_eq!(select.args, count.args);
        }
    }

    #[test]
    fn second_page_offsets_by_take() {
        let paging = Paging::new(()).with_page(2).with_take(10);
        let select = select_statement(
            "premium_feature",
            &["id"],
            &build_filter(&PremiumFeatureFilter::default(), false),
            paging.limit(),
            paging.offset(),
        );
        assert_eq!(
            select.sql,
            "SELECT id FROM premium_feature WHERE 1=1 LIMIT 10 OFFSET 10"
        );
    }
}
