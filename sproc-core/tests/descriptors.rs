#[cfg(test)]
mod tests {
    use sproc_core::{CallError, In, IntoIn, Out, SqlType, TypeCode, types};

    #[test]
    fn type_identity() {
        assert_eq!(types::integer().to_string(), "integer[4]");
        assert_eq!(types::bigint().to_string(), "bigint[-5]");
        assert_eq!(types::blob().to_string(), "blob[2004]");
        assert_eq!(types::integer(), types::integer());
        assert_ne!(types::numeric(), types::decimal());
    }

    #[test]
    fn read_only_types_reject_inputs() {
        let pointer: SqlType<i32> = SqlType::read_only("pointer", TypeCode::OTHER, |_, _| Ok(None));
        assert!(!pointer.has_setter());
        assert!(matches!(
            In::new(Some(1), pointer),
            Err(CallError::Config(..))
        ));
    }

    #[test]
    fn inferred_inputs() {
        let input = 5.into_in();
        assert_eq!(input.value(), Some(&5));
        assert_eq!(input.sql_type(), &types::integer());
        assert_eq!(format!("{input:?}"), "In{integer Some(5)}");

        let absent = None::<&str>.into_in();
        assert_eq!(absent.value(), None);
        assert_eq!(absent.sql_type(), &types::varchar());

        let explicit = In::new(Some(5), types::bigint()).expect("bigint has a bind side");
        assert_eq!(explicit.sql_type(), &types::bigint());
        assert_eq!(explicit.into_in().value(), Some(&5));
    }

    #[test]
    fn holder_lifecycle() {
        let out = Out::of(types::integer());
        assert!(matches!(out.get(), Err(CallError::State(..))));
        out.set_value(Some(5)).expect("the first value goes in");
        assert_eq!(out.get().expect("a value is set"), Some(5));
        assert_eq!(out.get_required().expect("the value is not NULL"), 5);
        assert!(matches!(out.set_value(Some(6)), Err(CallError::State(..))));

        let absent = Out::of(types::varchar());
        absent.set_value(None).expect("NULL goes in too");
        assert_eq!(absent.get().expect("a value is set"), None);
        assert!(matches!(
            absent.get_required(),
            Err(CallError::NullValue(..))
        ));
    }

    #[test]
    fn holder_sharing() {
        let out = Out::of(types::integer());
        let twin = out.clone();
        out.set_value(Some(3)).expect("the first value goes in");
        assert_eq!(twin.get().expect("clones share the cell"), Some(3));
        assert_eq!(out, twin);
        assert_eq!(format!("{out:?}"), "Out{type=integer[4], value=Some(3)}");
        assert_eq!(
            format!("{:?}", Out::of(types::integer())),
            "Out{type=integer[4]}"
        );
    }
}
