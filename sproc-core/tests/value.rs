#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sproc_core::{AsValue, CallError, Value};
    use time::macros::datetime;

    #[test]
    fn typed_nulls() {
        assert!(Value::Null.is_null());
        assert!(String::as_empty_value().is_null());
        assert_eq!(String::as_empty_value(), Value::Varchar(None));
        assert_eq!(<Vec<u8>>::as_empty_value(), Value::Blob(None));
        assert!(!Value::Int32(Some(0)).is_null());
    }

    #[test]
    fn into_values() {
        assert_eq!(42.as_value(), Value::Int32(Some(42)));
        assert_eq!(true.as_value(), Value::Boolean(Some(true)));
        assert_eq!(
            "x".to_owned().as_value(),
            Value::Varchar(Some("x".to_owned()))
        );
        assert_eq!(
            vec![1_u8, 2].as_value(),
            Value::Blob(Some(vec![1, 2].into()))
        );
        let ts = datetime!(2020-01-02 03:04:05);
        assert_eq!(ts.as_value(), Value::Timestamp(Some(ts)));
        assert_eq!(Value::from("x"), Value::Varchar(Some("x".to_owned())));
    }

    #[test]
    fn from_values() {
        assert_eq!(i32::try_from_value(Value::Int32(Some(42))).unwrap(), Some(42));
        assert_eq!(i64::try_from_value(Value::Int32(Some(7))).unwrap(), Some(7));
        assert_eq!(
            i64::try_from_value(Value::Decimal(Some(Decimal::from(21)))).unwrap(),
            Some(21)
        );
        assert_eq!(
            Decimal::try_from_value(Value::Int64(Some(21))).unwrap(),
            Some(Decimal::from(21))
        );
        assert_eq!(
            f64::try_from_value(Value::Decimal(Some(Decimal::new(25, 1)))).unwrap(),
            Some(2.5)
        );
        assert_eq!(
            String::try_from_value(Value::Varchar(Some("x".to_owned()))).unwrap(),
            Some("x".to_owned())
        );
        assert_eq!(
            <Vec<u8>>::try_from_value(Value::Blob(Some(vec![1, 2].into()))).unwrap(),
            Some(vec![1, 2])
        );
    }

    #[test]
    fn nulls_cross_types() {
        // A NULL is a NULL whatever type reads it.
        assert_eq!(i32::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(i32::try_from_value(Value::Varchar(None)).unwrap(), None);
        assert_eq!(String::try_from_value(Value::Int64(None)).unwrap(), None);
    }

    #[test]
    fn mismatches() {
        assert!(matches!(
            i32::try_from_value(Value::Varchar(Some("x".to_owned()))),
            Err(CallError::Conversion(..))
        ));
        assert!(matches!(
            String::try_from_value(Value::Int32(Some(1))),
            Err(CallError::Conversion(..))
        ));
        assert!(matches!(
            i64::try_from_value(Value::Decimal(Some(Decimal::new(15, 1)))),
            Err(CallError::Conversion(..))
        ));
    }
}
