use crate::domain::checkout::CheckoutResult;
use crate::domain::transaction::TransactionStatus;
use crate::error::Result;
use std::io::Write;

/// Writes command results, one value per line and nothing else.
///
/// Diagnostics never go through this writer; they are logged to stderr.
pub struct ResultWriter<W: Write> {
    out: W,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_checkout(&mut self, result: &CheckoutResult) -> Result<()> {
        writeln!(self.out, "{}", result.transaction_id)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn write_status(&mut self, status: TransactionStatus) -> Result<()> {
        writeln!(self.out, "{status}")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
