//! Database column support for the string-backed enums
//!
//! Each enum is stored as its wire name (`BLOCK_1`, `MALE`, ...), using the
//! `Display`/`FromStr` pair derived by strum.

use crate::{
    profile::{Faculty, Gender},
    time_block::TimeBlock,
};
use sea_orm::Value;

macro_rules! impl_string_value {
    ($ty:ty) => {
        impl sea_orm::sea_query::ValueType for $ty {
            fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
                match v {
                    Value::String(Some(s)) => s
                        .parse()
                        .map_err(|_| sea_orm::sea_query::ValueTypeErr),
                    _ => Err(sea_orm::sea_query::ValueTypeErr),
                }
            }

            fn type_name() -> String {
                stringify!($ty).to_string()
            }

            fn array_type() -> sea_orm::sea_query::ArrayType {
                sea_orm::sea_query::ArrayType::String
            }

            fn column_type() -> sea_orm::sea_query::ColumnType {
                sea_orm::sea_query::ColumnType::Text
            }
        }

        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::String(Some(Box::new(value.to_string())))
            }
        }

        impl sea_orm::TryGetable for $ty {
            fn try_get_by<I: sea_orm::ColIdx>(
                res: &sea_orm::QueryResult,
                index: I,
            ) -> Result<Self, sea_orm::TryGetError> {
                let val: String = res.try_get_by(index)?;

                val.parse().map_err(|_| {
                    sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                        "Failed to parse {} from `{val}`",
                        stringify!($ty)
                    )))
                })
            }
        }

        impl sea_orm::sea_query::Nullable for $ty {
            fn null() -> Value {
                Value::String(None)
            }
        }
    };
}

impl_string_value!(TimeBlock);
impl_string_value!(Gender);
impl_string_value!(Faculty);

#[cfg(test)]
mod test {
    use crate::{profile::Faculty, time_block::TimeBlock};
    use sea_orm::{Value, sea_query::ValueType};

    #[test]
    fn test_time_block_value_round_trip() {
        let value: Value = TimeBlock::Block4.into();
        assert_eq!(value, Value::String(Some(Box::new("BLOCK_4".to_string()))));
        assert_eq!(
            <TimeBlock as ValueType>::try_from(value).unwrap(),
            TimeBlock::Block4
        );
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        let value = Value::String(Some(Box::new("ECONOMICS".to_string())));
        assert!(<Faculty as ValueType>::try_from(value).is_err());
        assert!(<Faculty as ValueType>::try_from(Value::Int(Some(1))).is_err());
    }
}
