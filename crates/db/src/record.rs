//! Compile-time record descriptors.
//!
//! A [`Record`] exposes its mapped columns in declaration order together
//! with a read accessor per field. The [`record!`](crate::record!) macro
//! builds that table from `field => "column"` pairs; its `scan` form also
//! implements [`sqlx::FromRow`] from the same pairs, so the SELECT column
//! list and the scan destinations can never drift apart.
//!
//! ```ignore
//! record!(scan PremiumFeature {
//!     id => "id",
//!     name => "name",
//!     status => "status",
//! });
//! ```

use std::collections::HashSet;
use std::fmt;

use amora_core::types::Timestamp;

use crate::nullable::NullableDataType;

/// An owned, typed bind value. NULLs keep their SQL type so Postgres can
/// infer parameter types for every placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    BigInt(Option<i64>),
    Int(Option<i32>),
    Bool(Option<bool>),
    Text(Option<String>),
    Timestamp(Option<Timestamp>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        match self {
            Self::BigInt(v) => v.is_none(),
            Self::Int(v) => v.is_none(),
            Self::Bool(v) => v.is_none(),
            Self::Text(v) => v.is_none(),
            Self::Timestamp(v) => v.is_none(),
        }
    }
}

/// A mapped field: how to tell whether it holds its zero value and how to
/// read it as a bind value.
pub trait Column: Sync {
    /// `true` for `0`, `false`, `""`, the Unix epoch, and NULL.
    fn is_zero(&self) -> bool;

    fn to_value(&self) -> SqlValue;

    /// SQL NULL of this column's type.
    fn null_value() -> SqlValue
    where
        Self: Sized;
}

macro_rules! scalar_column {
    ($($ty:ty => $variant:ident, $zero:expr);+ $(;)?) => {
        $(impl Column for $ty {
            fn is_zero(&self) -> bool {
                *self == $zero
            }

            fn to_value(&self) -> SqlValue {
                SqlValue::$variant(Some(*self))
            }

            fn null_value() -> SqlValue {
                SqlValue::$variant(None)
            }
        })+
    };
}

scalar_column! {
    i64 => BigInt, 0;
    i32 => Int, 0;
    bool => Bool, false;
    Timestamp => Timestamp, Timestamp::default();
}

impl Column for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_value(&self) -> SqlValue {
        SqlValue::Text(Some(self.clone()))
    }

    fn null_value() -> SqlValue {
        SqlValue::Text(None)
    }
}

impl<T: Column> Column for NullableDataType<T> {
    fn is_zero(&self) -> bool {
        self.value().map_or(true, Column::is_zero)
    }

    fn to_value(&self) -> SqlValue {
        self.value().map_or_else(T::null_value, Column::to_value)
    }

    fn null_value() -> SqlValue {
        T::null_value()
    }
}

/// One `(column, read accessor)` pair of a record.
pub struct Field<'a> {
    pub column: &'static str,
    pub value: &'a dyn Column,
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("column", &self.column)
            .field("value", &self.value.to_value())
            .finish()
    }
}

/// A struct whose fields map onto table columns.
pub trait Record {
    /// Mapped columns in field declaration order.
    const COLUMNS: &'static [&'static str];

    /// Every mapped field, in the same order as [`Record::COLUMNS`].
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Implement [`Record`] (and, with `scan`, [`sqlx::FromRow`]) from
/// `field => "column"` pairs. Unlisted fields are invisible to the
/// persistence layer; a `scan` record must list every field.
#[macro_export]
macro_rules! record {
    (scan $ty:ident { $($field:ident => $column:literal),+ $(,)? }) => {
        $crate::record!($ty { $($field => $column),+ });

        impl<'r> ::sqlx::FromRow<'r, ::sqlx::postgres::PgRow> for $ty {
            fn from_row(
                row: &'r ::sqlx::postgres::PgRow,
            ) -> ::std::result::Result<Self, ::sqlx::Error> {
                use ::sqlx::Row as _;
                ::std::result::Result::Ok(Self {
                    $($field: row.try_get($column)?,)+
                })
            }
        }
    };
    ($ty:ident { $($field:ident => $column:literal),+ $(,)? }) => {
        impl $crate::record::Record for $ty {
            const COLUMNS: &'static [&'static str] = &[$($column),+];

            fn fields(&self) -> ::std::vec::Vec<$crate::record::Field<'_>> {
                ::std::vec![$($crate::record::Field {
                    column: $column,
                    value: &self.$field,
                }),+]
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Wiring-time validation
// ---------------------------------------------------------------------------

/// Lower-case SQL identifier: `[a-z_][a-z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn check_columns(kind: &str, columns: &[&str]) -> Result<(), String> {
    if columns.is_empty() {
        return Err(format!("{kind} maps no columns"));
    }
    let mut seen = HashSet::new();
    for column in columns {
        if !is_identifier(column) {
            return Err(format!("{kind} column `{column}` is not a plain identifier"));
        }
        if !seen.insert(*column) {
            return Err(format!("{kind} maps column `{column}` twice"));
        }
    }
    Ok(())
}

/// Check that an Input/Model/Filter triple can back a repository on `table`.
pub fn check_descriptors<I: Record, M: Record, F: Record>(table: &str) -> Result<(), String> {
    if !is_identifier(table) {
        return Err(format!("table name `{table}` is not a plain identifier"));
    }
    check_columns("input", I::COLUMNS)?;
    check_columns("model", M::COLUMNS)?;
    check_columns("filter", F::COLUMNS)?;

    for required in ["id", "status"] {
        if !M::COLUMNS.contains(&required) {
            return Err(format!("model has no `{required}` column"));
        }
    }
    for (kind, columns) in [("input", I::COLUMNS), ("filter", F::COLUMNS)] {
        if let Some(column) = columns.iter().find(|c| !M::COLUMNS.contains(*c)) {
            return Err(format!("{kind} column `{column}` is not a model column"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[derive(Default)]
    struct Pet {
        id: i64,
        name: String,
        status: i64,
        owner_id: NullableDataType<i64>,
    }

    crate::record!(Pet {
        id => "id",
        name => "name",
        status => "status",
        owner_id => "owner_id",
    });

    #[derive(Default)]
    struct PetInput {
        name: String,
        born_at: Timestamp,
    }

    crate::record!(PetInput {
        name => "name",
        born_at => "born_at",
    });

    #[derive(Default)]
    struct PetFilter {
        name: String,
    }

    crate::record!(PetFilter { name => "name" });

    struct NoStatus {
        id: i64,
    }

    crate::record!(NoStatus { id => "id" });

    #[test]
    fn columns_follow_declaration_order() {
        assert_eq!(Pet::COLUMNS, &["id", "name", "status", "owner_id"]);

        let pet = Pet {
            id: 3,
            name: "Rex".into(),
            ..Default::default()
        };
        let columns: Vec<_> = pet.fields().iter().map(|f| f.column).collect();
        assert_eq!(columns, Pet::COLUMNS);
    }

    #[test]
    fn zero_values() {
        assert!(0_i64.is_zero());
        assert!(!(-1_i64).is_zero());
        assert!(String::new().is_zero());
        assert!(Timestamp::default().is_zero());
        assert!(!chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().is_zero());
        assert!(NullableDataType::<i64>::null().is_zero());
        assert!(NullableDataType::new(0_i64).is_zero());
        assert!(!NullableDataType::new(5_i64).is_zero());
    }

    #[test]
    fn nullable_reads_as_typed_null_or_payload() {
        assert_eq!(NullableDataType::<String>::null().to_value(), SqlValue::Text(None));
        assert_eq!(
            NullableDataType::new(9_i32).to_value(),
            SqlValue::Int(Some(9))
        );
        assert!(NullableDataType::<Timestamp>::null().to_value().is_null());
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("premium_features"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("users; DROP TABLE users"));
        assert!(!is_identifier("Users"));
    }

    #[test]
    fn consistent_triple_passes() {
        assert_eq!(check_descriptors::<PetFilter, Pet, PetFilter>("pets"), Ok(()));
    }

    #[test]
    fn input_column_missing_from_model_is_rejected() {
        let err = check_descriptors::<PetInput, Pet, PetFilter>("pets").unwrap_err();
        assert!(err.contains("born_at"), "{err}");
    }

    #[test]
    fn model_without_status_is_rejected() {
        let err = check_descriptors::<NoStatus, NoStatus, NoStatus>("pets").unwrap_err();
        assert!(err.contains("status"), "{err}");
    }

    #[test]
    fn bad_table_name_is_rejected() {
        assert!(check_descriptors::<PetFilter, Pet, PetFilter>("pets;--").is_err());
    }
}
