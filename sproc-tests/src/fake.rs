use anyhow::anyhow;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use sproc::{
    AsValue, CallError, Connection, Lob, Result, RowLabeled, RowNames, Rows, Statement, TypeCode,
    Value,
};
use std::{collections::HashMap, sync::Arc};

/// Body of a scripted routine: reads its arguments from the frame and writes
/// its outputs back into it.
pub type Routine = Arc<dyn Fn(&mut Frame) -> anyhow::Result<()> + Send + Sync>;

#[derive(Default)]
struct Counters {
    statements_opened: usize,
    statements_released: usize,
    lobs_taken: usize,
    lobs_freed: usize,
}

#[derive(Default)]
struct FakeDbInner {
    routines: Mutex<HashMap<String, Routine>>,
    counters: Mutex<Counters>,
}

/// Scripted in-memory backend.
///
/// Routines are registered by name and run when a prepared call executes.
/// The backend also counts statement and large-object lifetimes, so tests
/// can assert that every handle a call takes is released again, on failure
/// paths included.
#[derive(Clone, Default)]
pub struct FakeDb {
    inner: Arc<FakeDbInner>,
}

impl FakeDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the body run when `name` is called.
    pub fn routine(
        &self,
        name: impl Into<String>,
        body: impl Fn(&mut Frame) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> &Self {
        self.inner
            .routines
            .lock()
            .insert(name.into(), Arc::new(body));
        self
    }

    pub fn connect(&self) -> FakeConnection {
        FakeConnection { db: self.clone() }
    }

    /// Statement handles prepared and not yet dropped.
    pub fn open_statements(&self) -> usize {
        let counters = self.inner.counters.lock();
        counters.statements_opened - counters.statements_released
    }

    /// Large-object handles taken and not yet dropped.
    pub fn open_lobs(&self) -> usize {
        let counters = self.inner.counters.lock();
        counters.lobs_taken - counters.lobs_freed
    }
}

pub struct FakeConnection {
    db: FakeDb,
}

impl Connection for FakeConnection {
    type Statement<'c>
        = FakeStatement
    where
        Self: 'c;

    fn prepare_call(&mut self, sql: &str) -> Result<FakeStatement> {
        let call = CallText::parse(sql)?;
        let routine = self
            .db
            .inner
            .routines
            .lock()
            .get(&call.name)
            .cloned()
            .ok_or_else(|| anyhow!("routine `{}` does not exist", call.name))?;
        self.db.inner.counters.lock().statements_opened += 1;
        Ok(FakeStatement {
            db: self.db.clone(),
            routine,
            frame: Frame::new(call),
            executed: false,
        })
    }
}

/// Parsed form of the escape-syntax call text. Understands both shapes the
/// builders produce, `{call name(a => ?, b => ?)}` and `{? = call name(?, ?)}`.
struct CallText {
    name: String,
    function: bool,
    /// One entry per argument placeholder, the name for `a => ?` markers and
    /// `None` for bare `?` markers. The return placeholder of a function is
    /// not part of this list.
    parameters: Vec<Option<String>>,
}

impl CallText {
    fn parse(sql: &str) -> Result<CallText> {
        let malformed = || anyhow!("malformed call text `{sql}`");
        let mut rest = sql.trim();
        if !rest.starts_with('{') || !rest.ends_with('}') {
            return Err(malformed().into());
        }
        rest = rest[1..rest.len() - 1].trim();
        let function = if let Some(stripped) = rest.strip_prefix("? =") {
            rest = stripped.trim_start();
            true
        } else {
            false
        };
        rest = rest.strip_prefix("call").ok_or_else(malformed)?.trim_start();
        let open = rest.find('(').ok_or_else(malformed)?;
        if !rest.ends_with(')') {
            return Err(malformed().into());
        }
        let name = rest[..open].trim().to_string();
        if name.is_empty() {
            return Err(malformed().into());
        }
        let arguments = rest[open + 1..rest.len() - 1].trim();
        let mut parameters = Vec::new();
        if !arguments.is_empty() {
            for argument in arguments.split(',') {
                let argument = argument.trim();
                if argument == "?" {
                    parameters.push(None);
                } else if let Some(parameter) = argument.strip_suffix("=> ?") {
                    parameters.push(Some(parameter.trim().to_string()));
                } else {
                    return Err(malformed().into());
                }
            }
        }
        Ok(CallText {
            name,
            function,
            parameters,
        })
    }
}

enum Produced {
    Value(Value),
    RowSet(Vec<RowLabeled>),
    Bytes(Vec<u8>),
}

#[derive(Default)]
struct ParamSlot {
    name: Option<String>,
    bound: Option<Value>,
    registered: Option<TypeCode>,
    produced: Option<Produced>,
}

/// One invocation of a scripted routine: the arguments the call bound and a
/// place to write outputs. For a function call the return value occupies the
/// first placeholder, like it does on the wire.
///
/// Formal parameters are resolved the way a database would: by placeholder
/// name when the call text names them, by formal position (1-based, the
/// return placeholder excluded) when the text uses bare `?` markers.
pub struct Frame {
    name: String,
    function: bool,
    slots: Vec<ParamSlot>,
}

impl Frame {
    fn new(call: CallText) -> Self {
        let mut slots = Vec::with_capacity(call.parameters.len() + 1);
        if call.function {
            slots.push(ParamSlot::default());
        }
        slots.extend(call.parameters.into_iter().map(|name| ParamSlot {
            name,
            ..ParamSlot::default()
        }));
        Self {
            name: call.name,
            function: call.function,
            slots,
        }
    }

    pub fn routine_name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, name: &str, position: u16) -> anyhow::Result<usize> {
        if self.slots.iter().any(|slot| slot.name.is_some()) {
            return self
                .slots
                .iter()
                .position(|slot| slot.name.as_deref() == Some(name))
                .ok_or_else(|| {
                    anyhow!("routine `{}` has no parameter named `{name}`", self.name)
                });
        }
        let offset = if self.function { 1 } else { 0 };
        if position == 0 || position as usize + offset > self.slots.len() {
            return Err(anyhow!(
                "parameter {position} is out of range for routine `{}`",
                self.name
            ));
        }
        Ok(position as usize + offset - 1)
    }

    /// The bound value of the formal parameter, a typed NULL for a NULL bind.
    pub fn argument(&self, name: &str, position: u16) -> anyhow::Result<&Value> {
        let index = self.resolve(name, position)?;
        self.slots[index].bound.as_ref().ok_or_else(|| {
            anyhow!("routine `{}` has no bound argument `{name}`", self.name)
        })
    }

    /// The type code the call registered for the formal output parameter.
    pub fn output_code(&self, name: &str, position: u16) -> anyhow::Result<TypeCode> {
        let index = self.resolve(name, position)?;
        self.slots[index].registered.ok_or_else(|| {
            anyhow!(
                "routine `{}` parameter `{name}` is not registered as an output",
                self.name
            )
        })
    }

    fn produce(&mut self, name: &str, position: u16, produced: Produced) -> anyhow::Result<()> {
        let index = self.resolve(name, position)?;
        let slot = &mut self.slots[index];
        if slot.registered.is_none() {
            return Err(anyhow!(
                "routine `{}` writes to `{name}` which is not registered as an output",
                self.name
            ));
        }
        slot.produced = Some(produced);
        Ok(())
    }

    /// Write an output value, read back by the call through `fetch_out`. An
    /// output never written reads as NULL.
    pub fn set_output(&mut self, name: &str, position: u16, value: Value) -> anyhow::Result<()> {
        self.produce(name, position, Produced::Value(value))
    }

    /// Write a cursor output, read back by the call through `take_rows`.
    pub fn set_rows(
        &mut self,
        name: &str,
        position: u16,
        labels: &[&str],
        rows: Vec<Vec<Value>>,
    ) -> anyhow::Result<()> {
        let labels: RowNames = labels.iter().map(|label| label.to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|row| RowLabeled::new(labels.clone(), row.into()))
            .collect();
        self.produce(name, position, Produced::RowSet(rows))
    }

    /// Write a large-object output, read back by the call through `take_lob`.
    pub fn set_lob(&mut self, name: &str, position: u16, bytes: Vec<u8>) -> anyhow::Result<()> {
        self.produce(name, position, Produced::Bytes(bytes))
    }

    /// Write the function return value, it occupies the first placeholder.
    pub fn set_result(&mut self, value: Value) -> anyhow::Result<()> {
        if !self.function {
            return Err(anyhow!(
                "routine `{}` was not called as a function",
                self.name
            ));
        }
        let slot = &mut self.slots[0];
        if slot.registered.is_none() {
            return Err(anyhow!(
                "the return value of routine `{}` is not registered",
                self.name
            ));
        }
        slot.produced = Some(Produced::Value(value));
        Ok(())
    }

    /// The type code the call registered for the function return value.
    pub fn result_code(&self) -> anyhow::Result<TypeCode> {
        if !self.function {
            return Err(anyhow!(
                "routine `{}` was not called as a function",
                self.name
            ));
        }
        self.slots[0].registered.ok_or_else(|| {
            anyhow!("the return value of routine `{}` is not registered", self.name)
        })
    }

    fn slot_mut(&mut self, index: u16) -> Result<&mut ParamSlot> {
        let count = self.slots.len();
        index
            .checked_sub(1)
            .map(usize::from)
            .and_then(|index| self.slots.get_mut(index))
            .ok_or_else(|| {
                CallError::from(anyhow!(
                    "placeholder {index} is out of range, the call has {count} placeholders"
                ))
            })
    }
}

pub struct FakeStatement {
    db: FakeDb,
    routine: Routine,
    frame: Frame,
    executed: bool,
}

impl FakeStatement {
    fn produced(&mut self, index: u16) -> Result<&mut ParamSlot> {
        if !self.executed {
            return Err(anyhow!("placeholder {index} read before execute").into());
        }
        let slot = self.frame.slot_mut(index)?;
        if slot.registered.is_none() {
            return Err(anyhow!("placeholder {index} was not registered as an output").into());
        }
        Ok(slot)
    }
}

impl Statement for FakeStatement {
    fn bind_in(&mut self, index: u16, _code: TypeCode, value: Value) -> Result<()> {
        let slot = self.frame.slot_mut(index)?;
        if slot.bound.is_some() {
            return Err(anyhow!("placeholder {index} bound twice").into());
        }
        slot.bound = Some(value);
        Ok(())
    }

    fn register_out(&mut self, index: u16, code: TypeCode) -> Result<()> {
        let slot = self.frame.slot_mut(index)?;
        if slot.registered.is_some() {
            return Err(anyhow!("placeholder {index} registered twice").into());
        }
        slot.registered = Some(code);
        Ok(())
    }

    fn execute(&mut self) -> Result<()> {
        if self.executed {
            return Err(anyhow!("statement executed twice").into());
        }
        self.executed = true;
        log::debug!("executing `{}`", self.frame.name);
        (self.routine)(&mut self.frame).map_err(|error| {
            let error = error.context(format!("routine `{}` failed", self.frame.name));
            log::error!("{:#}", error);
            error
        })?;
        Ok(())
    }

    fn fetch_out(&mut self, index: u16) -> Result<Value> {
        let slot = self.produced(index)?;
        match &slot.produced {
            Some(Produced::Value(value)) => Ok(value.clone()),
            Some(_) => Err(anyhow!(
                "placeholder {index} holds a cursor or large object, not a plain value"
            )
            .into()),
            None => Ok(Value::Null),
        }
    }

    fn take_rows(&mut self, index: u16) -> Result<Box<dyn Rows + '_>> {
        let slot = self.produced(index)?;
        match slot.produced.take() {
            Some(Produced::RowSet(rows)) => Ok(Box::new(FakeRows {
                rows: rows.into_iter(),
            })),
            Some(produced) => {
                slot.produced = Some(produced);
                Err(anyhow!("placeholder {index} does not hold a cursor").into())
            }
            None => Err(anyhow!("placeholder {index} does not hold a cursor").into()),
        }
    }

    fn take_lob(&mut self, index: u16) -> Result<Option<Box<dyn Lob + '_>>> {
        let slot = self.produced(index)?;
        match slot.produced.take() {
            Some(Produced::Bytes(bytes)) => {
                let db = self.db.clone();
                db.inner.counters.lock().lobs_taken += 1;
                Ok(Some(Box::new(FakeLob { db, bytes })))
            }
            Some(produced) => {
                slot.produced = Some(produced);
                Err(anyhow!("placeholder {index} does not hold a large object").into())
            }
            None => Ok(None),
        }
    }
}

impl Drop for FakeStatement {
    fn drop(&mut self) {
        self.db.inner.counters.lock().statements_released += 1;
    }
}

struct FakeRows {
    rows: std::vec::IntoIter<RowLabeled>,
}

impl Rows for FakeRows {
    fn next_row(&mut self) -> Result<Option<RowLabeled>> {
        Ok(self.rows.next())
    }
}

struct FakeLob {
    db: FakeDb,
    bytes: Vec<u8>,
}

impl Lob for FakeLob {
    fn size(&mut self) -> Result<u64> {
        Ok(self.bytes.len() as u64)
    }

    fn read_all(&mut self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

impl Drop for FakeLob {
    fn drop(&mut self) {
        self.db.inner.counters.lock().lobs_freed += 1;
    }
}

/// Render an integer result as the value type the call registered for the
/// output, the way a driver converts a native number to the requested type.
pub fn integer_as(code: TypeCode, value: i64) -> Value {
    match code {
        TypeCode::INTEGER => Value::Int32(Some(value as i32)),
        TypeCode::NUMERIC | TypeCode::DECIMAL => Value::Decimal(Some(Decimal::new(value, 0))),
        TypeCode::DOUBLE => Value::Float64(Some(value as f64)),
        _ => Value::Int64(Some(value)),
    }
}

/// A backend loaded with the routines the portable suites call.
pub fn standard_db() -> FakeDb {
    let db = FakeDb::new();
    db.routine("test_math", |frame| {
        let a = i64::try_from_value(frame.argument("val1", 1)?.clone())?
            .ok_or_else(|| anyhow!("val1 is NULL"))?;
        let b = i64::try_from_value(frame.argument("val2", 2)?.clone())?
            .ok_or_else(|| anyhow!("val2 is NULL"))?;
        let sum = integer_as(frame.output_code("out_sum", 3)?, a + b);
        frame.set_output("out_sum", 3, sum)?;
        let product = integer_as(frame.output_code("out_mlt", 4)?, a * b);
        frame.set_output("out_mlt", 4, product)
    });
    db.routine("get_concat", |frame| {
        let a = String::try_from_value(frame.argument("s1", 1)?.clone())?;
        let b = String::try_from_value(frame.argument("s2", 2)?.clone())?;
        let concat = match (a, b) {
            (Some(a), Some(b)) => Value::Varchar(Some(a + &b)),
            _ => Value::Varchar(None),
        };
        frame.set_result(concat)
    });
    db.routine("test_in_out", |frame| {
        let io = i64::try_from_value(frame.argument("io", 1)?.clone())?
            .ok_or_else(|| anyhow!("io is NULL"))?;
        let next = integer_as(frame.output_code("io", 1)?, io + 1);
        frame.set_output("io", 1, next)
    });
    db.routine("echo", |frame| {
        let value = frame.argument("value", 1)?.clone();
        frame.set_output("echoed", 2, value)
    });
    db.routine("blobs_concat", |frame| {
        let mut combined = Vec::new();
        for (name, position) in [("part1", 1), ("part2", 2), ("part3", 3)] {
            if let Some(part) = Vec::<u8>::try_from_value(frame.argument(name, position)?.clone())?
            {
                combined.extend_from_slice(&part);
            }
        }
        frame.set_lob("combined", 4, combined)
    });
    db.routine("find_people", |frame| {
        let min_id = i32::try_from_value(frame.argument("min_id", 1)?.clone())?.unwrap_or(0);
        let rows = [(1, "Ada"), (2, "Brian")]
            .into_iter()
            .filter(|(id, _)| *id >= min_id)
            .map(|(id, name)| vec![Value::from(id), Value::from(name)])
            .collect();
        frame.set_rows("people", 2, &["id", "name"], rows)
    });
    db.routine("broken_people", |frame| {
        frame.set_rows(
            "people",
            1,
            &["id", "name"],
            vec![vec![Value::Int32(None), Value::from("Ghost")]],
        )
    });
    db.routine("raise_error", |_frame| {
        Err(anyhow!("ORA-20001: forced failure"))
    });
    db
}
