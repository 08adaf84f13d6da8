use crate::{In, Result, Statement, output::OutParam};

/// One placeholder of a call: an optional input side and an optional output
/// side addressing the same position. Pure inputs and pure outputs are the
/// degenerate cases, INOUT parameters carry both.
pub(crate) struct InOut<T> {
    input: Option<In<T>>,
    output: Option<OutParam<T>>,
}

impl<T> InOut<T> {
    pub(crate) fn input(input: In<T>) -> Self {
        Self {
            input: Some(input),
            output: None,
        }
    }

    pub(crate) fn output(output: OutParam<T>) -> Self {
        Self {
            input: None,
            output: Some(output),
        }
    }

    pub(crate) fn in_out(input: In<T>, output: OutParam<T>) -> Self {
        Self {
            input: Some(input),
            output: Some(output),
        }
    }
}

/// Type-erased slot, so a single call can hold parameters of mixed native
/// types.
pub(crate) trait Slot: Send {
    /// Bind phase: push the input value, then register the output, both at
    /// the given 1-based placeholder index.
    fn bind(&mut self, statement: &mut dyn Statement, index: u16) -> Result<()>;

    /// Extract phase: pull the output value into its sink.
    fn extract(&mut self, statement: &mut dyn Statement, index: u16) -> Result<()>;
}

impl<T: Send + 'static> Slot for InOut<T> {
    fn bind(&mut self, statement: &mut dyn Statement, index: u16) -> Result<()> {
        if let Some(input) = self.input.take() {
            input.bind(statement, index)?;
        }
        if let Some(output) = &mut self.output {
            output.register(statement, index)?;
        }
        Ok(())
    }

    fn extract(&mut self, statement: &mut dyn Statement, index: u16) -> Result<()> {
        if let Some(output) = &mut self.output {
            output.extract(statement, index)?;
        }
        Ok(())
    }
}

/// Run the bind phase over every slot in declaration order. `offset` shifts
/// the placeholder indices, one for function calls where the return value
/// occupies the first placeholder.
pub(crate) fn bind_slots<'a>(
    statement: &mut dyn Statement,
    slots: impl Iterator<Item = &'a mut Box<dyn Slot>>,
    offset: u16,
) -> Result<()> {
    for (position, slot) in slots.enumerate() {
        slot.bind(statement, position as u16 + offset + 1)?;
    }
    Ok(())
}

/// Run the extract phase over every slot, same order and indexing as
/// [`bind_slots`].
pub(crate) fn extract_slots<'a>(
    statement: &mut dyn Statement,
    slots: impl Iterator<Item = &'a mut Box<dyn Slot>>,
    offset: u16,
) -> Result<()> {
    for (position, slot) in slots.enumerate() {
        slot.extract(statement, position as u16 + offset + 1)?;
    }
    Ok(())
}
