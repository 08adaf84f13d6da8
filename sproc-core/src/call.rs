use crate::{
    CallError, Connection, IntoIn, Out, Result, SqlType, Statement,
    output::{ConsumerOut, OutParam},
    slot::{InOut, Slot, bind_slots, extract_slots},
};

/// A call declared over caller-supplied call text.
///
/// The text uses the escape syntax with one `?` marker per declared
/// parameter, and parameters bind in declaration order, first marker first:
///
/// ```rust,ignore
/// let sum = Out::of(types::integer());
/// let mlt = Out::of(types::integer());
/// call_sql("{call test_math(?, ?, ?, ?)}")
///     .input(5)
///     .input(7)
///     .output(&sum)
///     .output(&mlt)
///     .run(&mut connection)?;
/// assert_eq!(sum.get()?, Some(12));
/// ```
pub struct SqlCall {
    sql: String,
    parameters: Option<Vec<Box<dyn Slot>>>,
}

/// Start declaring a call over explicit call text.
pub fn call_sql(sql: impl Into<String>) -> SqlCall {
    SqlCall {
        sql: sql.into(),
        parameters: Some(Vec::new()),
    }
}

impl SqlCall {
    fn slots(&mut self) -> &mut Vec<Box<dyn Slot>> {
        self.parameters.as_mut().expect("call already executed")
    }

    /// Declare the next placeholder as an input. Takes anything [`IntoIn`]
    /// covers, or an explicit [`In`](crate::In) for full control of the type.
    ///
    /// # Panics
    /// Panics when the call already ran, declarations cannot be amended
    /// afterwards. The same holds for every other declaration method.
    pub fn input<V: IntoIn>(mut self, value: V) -> Self
    where
        V::Native: Send + 'static,
    {
        self.slots().push(Box::new(InOut::input(value.into_in())));
        self
    }

    /// Declare the next placeholder as an output shared with the caller's
    /// holder.
    pub fn output<T: Send + 'static>(mut self, out: &Out<T>) -> Self {
        self.slots()
            .push(Box::new(InOut::output(OutParam::Shared(out.clone()))));
        self
    }

    /// Declare the next placeholder as an output delivered to a callback
    /// after the call ran.
    pub fn output_with<T: Send + 'static>(
        mut self,
        ty: SqlType<T>,
        consumer: impl FnOnce(Option<T>) + Send + 'static,
    ) -> Self {
        self.slots()
            .push(Box::new(InOut::output(OutParam::Consumer(ConsumerOut::new(
                ty, consumer,
            )))));
        self
    }

    /// Declare the next placeholder as an output and hand back a fresh
    /// holder for it.
    pub fn output_of<T: Send + 'static>(&mut self, ty: SqlType<T>) -> Out<T> {
        let out = Out::of(ty);
        self.slots()
            .push(Box::new(InOut::output(OutParam::Shared(out.clone()))));
        out
    }

    /// Declare the next placeholder as both input and output.
    pub fn in_out<V: IntoIn>(mut self, value: V, out: &Out<V::Native>) -> Self
    where
        V::Native: Send + 'static,
    {
        self.slots().push(Box::new(InOut::in_out(
            value.into_in(),
            OutParam::Shared(out.clone()),
        )));
        self
    }

    /// Input and output at the same placeholder, the output side delivered to
    /// a callback. The output reuses the input's type.
    pub fn in_out_with<V: IntoIn>(
        mut self,
        value: V,
        consumer: impl FnOnce(Option<V::Native>) + Send + 'static,
    ) -> Self
    where
        V::Native: Send + 'static,
    {
        let input = value.into_in();
        let ty = input.sql_type().clone();
        self.slots().push(Box::new(InOut::in_out(
            input,
            OutParam::Consumer(ConsumerOut::new(ty, consumer)),
        )));
        self
    }

    /// The call text this call was declared over.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Prepare the statement, bind every declared parameter in order, execute
    /// and pull every output. The statement handle is released on success and
    /// on every failure. A call runs at most once.
    pub fn run<C: Connection>(&mut self, connection: &mut C) -> Result<()> {
        let mut slots = self
            .parameters
            .take()
            .ok_or_else(|| CallError::state("already executed, this call cannot be reused"))?;
        let mut statement = connection.prepare_call(&self.sql)?;
        bind_slots(&mut statement, slots.iter_mut(), 0)?;
        statement.execute()?;
        extract_slots(&mut statement, slots.iter_mut(), 0)
    }
}
