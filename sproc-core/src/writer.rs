/// Writes the given values applying the function `f` to each of them,
/// interposing the separator between consecutive outputs.
pub(crate) fn separated_by<T, F: FnMut(&mut String, T)>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) {
    let mut len = out.len();
    for value in values {
        if out.len() > len {
            out.push_str(separator);
            len = out.len();
        }
        f(out, value);
    }
}

/// Assemble the escape-syntax call text for a named call:
/// `{call name(a => ?, b => ?)}`, with a leading `? = ` placeholder when the
/// routine is a function.
pub(crate) fn call_text<'a>(
    name: &str,
    function: bool,
    parameters: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut sql = String::with_capacity(name.len() + 32);
    sql.push_str(if function { "{? = call " } else { "{call " });
    sql.push_str(name);
    sql.push('(');
    separated_by(
        &mut sql,
        parameters,
        |sql, parameter| {
            sql.push_str(parameter);
            sql.push_str(" => ?");
        },
        ", ",
    );
    sql.push_str(")}");
    sql
}

#[cfg(test)]
mod tests {
    use super::call_text;

    #[test]
    fn procedure_text() {
        assert_eq!(call_text("p", false, []), "{call p()}");
        assert_eq!(
            call_text("schema.test_math", false, ["val1", "val2", "out_sum"]),
            "{call schema.test_math(val1 => ?, val2 => ?, out_sum => ?)}"
        );
    }

    #[test]
    fn function_text() {
        assert_eq!(call_text("f", true, []), "{? = call f()}");
        assert_eq!(
            call_text("get_concat", true, ["s1", "s2"]),
            "{? = call get_concat(s1 => ?, s2 => ?)}"
        );
    }
}
