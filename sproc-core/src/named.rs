use crate::{
    CallError, Connection, IntoIn, Out, Result, SqlType, Statement,
    output::{ConsumerOut, OutParam},
    slot::{InOut, Slot, bind_slots, extract_slots},
    writer::call_text,
};

struct NamedSlot {
    name: String,
    slot: Box<dyn Slot>,
}

type ErrorHandler<R> = Box<dyn FnOnce(CallError) -> Result<Option<R>> + Send>;

/// A call to a stored routine addressed by name.
///
/// The call text is assembled when the call runs, from the declared parameter
/// names, so declaration order does not have to match the routine's formal
/// order:
///
/// ```rust,ignore
/// let sum = Out::of(types::bigint());
/// let mlt = Out::of(types::numeric());
/// call("test_math")
///     .input("val2", 2)
///     .input("val1", 10)
///     .output("out_sum", &sum)
///     .output("out_mlt", &mlt)
///     .run(&mut connection)?;
/// ```
///
/// runs `{call test_math(val2 => ?, val1 => ?, out_sum => ?, out_mlt => ?)}`
/// and the database matches each placeholder to its formal parameter by name.
///
/// A function call prepends a `? = ` return placeholder to the synthesized
/// text and [`NamedCall::run`] yields the return value, `None` when the
/// function returned NULL:
///
/// ```rust,ignore
/// let concat = call_returning("get_concat", types::varchar())
///     .input("s1", "qwe")
///     .input("s2", "rty")
///     .run(&mut connection)?;
/// assert_eq!(concat.as_deref(), Some("qwerty"));
/// ```
pub struct NamedCall<R = ()> {
    name: String,
    return_type: Option<SqlType<R>>,
    parameters: Option<Vec<NamedSlot>>,
    handler: Option<ErrorHandler<R>>,
    sql: Option<String>,
}

/// Start declaring a call to the named procedure.
///
/// # Panics
/// Panics on an empty routine name.
pub fn call(name: impl Into<String>) -> NamedCall {
    NamedCall::new(name.into(), None)
}

/// Start declaring a call to the named function, its return value is read
/// back with the given type.
///
/// # Panics
/// Panics on an empty routine name.
pub fn call_returning<R>(name: impl Into<String>, return_type: SqlType<R>) -> NamedCall<R> {
    NamedCall::new(name.into(), Some(return_type))
}

impl<R> NamedCall<R> {
    fn new(name: String, return_type: Option<SqlType<R>>) -> Self {
        assert!(!name.is_empty(), "routine name must not be empty");
        Self {
            name,
            return_type,
            parameters: Some(Vec::new()),
            handler: None,
            sql: None,
        }
    }

    fn push(&mut self, name: impl Into<String>, slot: impl Slot + 'static) {
        self.parameters
            .as_mut()
            .expect("call already executed")
            .push(NamedSlot {
                name: name.into(),
                slot: Box::new(slot),
            });
    }

    /// Declare a named input parameter. Takes anything [`IntoIn`] covers, or
    /// an explicit [`In`](crate::In) for full control of the type.
    ///
    /// # Panics
    /// Panics when the call already ran, declarations cannot be amended
    /// afterwards. The same holds for every other declaration method.
    pub fn input<V: IntoIn>(mut self, name: impl Into<String>, value: V) -> Self
    where
        V::Native: Send + 'static,
    {
        self.push(name, InOut::input(value.into_in()));
        self
    }

    /// Declare a named output parameter shared with the caller's holder.
    pub fn output<T: Send + 'static>(mut self, name: impl Into<String>, out: &Out<T>) -> Self {
        self.push(name, InOut::output(OutParam::Shared(out.clone())));
        self
    }

    /// Declare a named output parameter delivered to a callback after the
    /// call ran.
    pub fn output_with<T: Send + 'static>(
        mut self,
        name: impl Into<String>,
        ty: SqlType<T>,
        consumer: impl FnOnce(Option<T>) + Send + 'static,
    ) -> Self {
        self.push(
            name,
            InOut::output(OutParam::Consumer(ConsumerOut::new(ty, consumer))),
        );
        self
    }

    /// Declare a named output parameter and hand back a fresh holder for it.
    pub fn output_of<T: Send + 'static>(
        &mut self,
        name: impl Into<String>,
        ty: SqlType<T>,
    ) -> Out<T> {
        let out = Out::of(ty);
        self.push(name, InOut::output(OutParam::Shared(out.clone())));
        out
    }

    /// Declare a named parameter as both input and output.
    pub fn in_out<V: IntoIn>(
        mut self,
        name: impl Into<String>,
        value: V,
        out: &Out<V::Native>,
    ) -> Self
    where
        V::Native: Send + 'static,
    {
        self.push(
            name,
            InOut::in_out(value.into_in(), OutParam::Shared(out.clone())),
        );
        self
    }

    /// Input and output on the same named parameter, the output side
    /// delivered to a callback. The output reuses the input's type.
    pub fn in_out_with<V: IntoIn>(
        mut self,
        name: impl Into<String>,
        value: V,
        consumer: impl FnOnce(Option<V::Native>) + Send + 'static,
    ) -> Self
    where
        V::Native: Send + 'static,
    {
        let input = value.into_in();
        let ty = input.sql_type().clone();
        self.push(
            name,
            InOut::in_out(input, OutParam::Consumer(ConsumerOut::new(ty, consumer))),
        );
        self
    }

    /// Install the recovery handler for backend failures. When the database
    /// reports an error anywhere between preparing and extracting, the
    /// handler decides the outcome: substitute a result or return an error.
    /// Errors in how the call is declared or driven bypass it.
    pub fn on_error(
        mut self,
        handler: impl FnOnce(CallError) -> Result<Option<R>> + Send + 'static,
    ) -> Result<Self> {
        if self.handler.is_some() {
            return Err(CallError::config("error handler already set"));
        }
        self.handler = Some(Box::new(handler));
        Ok(self)
    }

    /// The call text synthesized by the last [`NamedCall::run`], `None` while
    /// the call has not run.
    pub fn sql(&self) -> Option<&str> {
        self.sql.as_deref()
    }
}

impl<R: Clone> NamedCall<R> {
    /// Synthesize the call text, prepare it, bind every parameter, execute,
    /// then pull the return value first and the outputs after it, in
    /// declaration order. The statement handle is released on every exit
    /// path, and a call runs at most once.
    pub fn run<C: Connection>(&mut self, connection: &mut C) -> Result<Option<R>> {
        let mut slots = self
            .parameters
            .take()
            .ok_or_else(|| CallError::state("already executed, this call cannot be reused"))?;
        let function = self.return_type.is_some();
        let sql = self.sql.insert(call_text(
            &self.name,
            function,
            slots.iter().map(|parameter| parameter.name.as_str()),
        ));
        log::trace!("{sql}");
        let result = self.return_type.as_ref().map(|ty| Out::of(ty.clone()));
        let outcome = Self::dispatch(connection, sql, &mut slots, result.as_ref());
        match outcome {
            Ok(()) => match result {
                Some(result) => result.get(),
                None => Ok(None),
            },
            Err(error) if error.is_backend() => match self.handler.take() {
                Some(handler) => handler(error),
                None => Err(error),
            },
            Err(error) => Err(error),
        }
    }

    fn dispatch<C: Connection>(
        connection: &mut C,
        sql: &str,
        slots: &mut [NamedSlot],
        result: Option<&Out<R>>,
    ) -> Result<()> {
        let mut statement = connection.prepare_call(sql)?;
        let offset = if result.is_some() { 1 } else { 0 };
        if let Some(result) = result {
            result.register(&mut statement, 1)?;
        }
        bind_slots(
            &mut statement,
            slots.iter_mut().map(|parameter| &mut parameter.slot),
            offset,
        )?;
        statement.execute()?;
        if let Some(result) = result {
            result.extract(&mut statement, 1)?;
        }
        extract_slots(
            &mut statement,
            slots.iter_mut().map(|parameter| &mut parameter.slot),
            offset,
        )
    }
}
