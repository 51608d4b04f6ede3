//! Interactive collection of a [LookupKey].
use std::io::{BufRead, Write};

use consumption_common::{parse_address, KeyError, LookupKey, RecordId, SupplierId};

pub const USER_PROMPT: &str = "User address: ";
pub const SUPPLIER_PROMPT: &str = "Supplier ID: ";
pub const RECORD_PROMPT: &str = "ID of record: ";

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error("input ended before the {0} was entered")]
    UnexpectedEof(&'static str),
    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),
}

/// Asks for the user address, supplier ID and record ID, in that order.
///
/// Each answer is parsed as soon as it is read, so a bad value stops the
/// questioning right away.
pub fn read_lookup_key(
    mut input: impl BufRead,
    mut prompts: impl Write,
) -> Result<LookupKey, InputError> {
    let user = ask(&mut input, &mut prompts, USER_PROMPT, "user address")?;
    let user = parse_address(&user)?;

    let supplier_id = ask(&mut input, &mut prompts, SUPPLIER_PROMPT, "supplier ID")?;
    let supplier_id = SupplierId::parse(&supplier_id)?;

    let record_id = ask(&mut input, &mut prompts, RECORD_PROMPT, "record ID")?;
    let record_id = RecordId::parse(&record_id)?;

    Ok(LookupKey::new(user, supplier_id, record_id))
}

fn ask(
    input: &mut impl BufRead,
    prompts: &mut impl Write,
    prompt: &str,
    field: &'static str,
) -> Result<String, InputError> {
    prompts.write_all(prompt.as_bytes())?;
    prompts.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(InputError::UnexpectedEof(field));
    }

    Ok(line)
}
