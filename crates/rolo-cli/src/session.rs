//! Interactive command loop
//!
//! Reads commands from any `BufRead`, writes to any `Write`, and drives a
//! borrowed [`Directory`]. End of input behaves like `EXIT`.

use crate::command::{Command, ParseError};
use crate::input::{sanitize, sanitize_phone, validate_phone};
use crate::pager::page_through;
use rolo_core::{Directory, Outcome, RecordStore};
use std::io::{self, BufRead, Write};
use std::time::Instant;

const HELP: &str = "\
=====================================================
 Contact directory - commands
=====================================================
 ADD [name] [phone] [note]  add or update a contact (phone is unique)
 DEL [phone]                delete a contact by phone
 FIND_NAME <prefix>         search by name prefix
 FIND_PHONE <prefix>        search by phone prefix
 LIST                       list all contacts in insertion order
 SAVE                       save now
 HELP                       show this help
 EXIT                       save and quit
-----------------------------------------------------
 results are paged; use NEXT / PREV / BACK
 phones: 11 digits starting with 13/14/15/17/18/19
=====================================================";

/// Write `text`, flush, and read one trimmed line; `None` at end of input
pub(crate) fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> io::Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Command loop over one directory
pub(crate) struct Session<'d, S, R, W> {
    directory: &'d mut Directory<S>,
    input: R,
    output: W,
    page_size: usize,
}

impl<'d, S, R, W> Session<'d, S, R, W>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(directory: &'d mut Directory<S>, input: R, output: W, page_size: usize) -> Self {
        Self {
            directory,
            input,
            output,
            page_size,
        }
    }

    /// Run until `EXIT` or end of input
    pub(crate) fn run(&mut self) -> io::Result<()> {
        if let Some(e) = self.directory.load_error() {
            writeln!(self.output, "warning: could not read saved contacts: {e}")?;
            writeln!(self.output, "warning: starting empty, saving will overwrite the data file")?;
        }
        writeln!(self.output, "contact directory ready ({} contacts)", self.directory.len())?;
        writeln!(self.output, "{HELP}")?;

        loop {
            let Some(line) = prompt(&mut self.input, &mut self.output, "\n> ")? else {
                self.exit()?;
                return Ok(());
            };
            if self.dispatch(&line)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, line: &str) -> io::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(ParseError::Empty) => return Ok(Flow::Continue),
            Err(ParseError::Usage(usage)) => {
                writeln!(self.output, "usage: {usage}")?;
                return Ok(Flow::Continue);
            }
            Err(ParseError::Unknown(word)) => {
                writeln!(self.output, "unknown command {word}, type HELP for the command list")?;
                return Ok(Flow::Continue);
            }
        };
        tracing::debug!(?command, "dispatching");

        match command {
            Command::Add { name, phone, note } => self.add(name, phone, note)?,
            Command::Delete { phone } => self.delete(phone)?,
            Command::FindName(prefix) => {
                let started = Instant::now();
                let hits = self.directory.find_by_name_prefix(&prefix);
                let elapsed = started.elapsed();
                page_through(&mut self.input, &mut self.output, &hits, "name", elapsed, self.page_size)?;
            }
            Command::FindPhone(prefix) => {
                let started = Instant::now();
                let hits = self.directory.find_by_key_prefix(&sanitize_phone(&prefix));
                let elapsed = started.elapsed();
                page_through(&mut self.input, &mut self.output, &hits, "phone", elapsed, self.page_size)?;
            }
            Command::List => {
                let started = Instant::now();
                let all = self.directory.list_all();
                let elapsed = started.elapsed();
                page_through(&mut self.input, &mut self.output, &all, "all", elapsed, self.page_size)?;
            }
            Command::Save => self.save()?,
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Exit => {
                self.exit()?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self, name: Option<String>, phone: Option<String>, note: Option<String>) -> io::Result<()> {
        let interactive = phone.is_none();

        let name = match name {
            Some(name) => name,
            None => match prompt(&mut self.input, &mut self.output, "name > ")? {
                Some(name) => name,
                None => return Ok(()),
            },
        };
        let name = sanitize(&name);
        if name.is_empty() {
            writeln!(self.output, "add failed: name must not be empty")?;
            return Ok(());
        }

        let Some(phone) = self.read_phone("phone (11 digits) > ", phone)? else {
            return Ok(());
        };

        let note = match note {
            Some(note) => note,
            None if interactive => prompt(&mut self.input, &mut self.output, "note (optional) > ")?
                .unwrap_or_default(),
            None => String::new(),
        };
        let note = sanitize(&note);

        match self.directory.add(name, phone, note) {
            Ok(outcome) => self.report(&outcome),
            Err(e) => writeln!(self.output, "add failed: {e}"),
        }
    }

    fn delete(&mut self, phone: Option<String>) -> io::Result<()> {
        let Some(phone) = self.read_phone("phone to delete (11 digits) > ", phone)? else {
            return Ok(());
        };
        match self.directory.delete(&phone) {
            Ok(outcome) => self.report(&outcome),
            Err(e) => writeln!(self.output, "delete failed: {e}"),
        }
    }

    fn save(&mut self) -> io::Result<()> {
        match self.directory.save() {
            Ok(count) => writeln!(self.output, "saved {count} contacts"),
            Err(e) => writeln!(self.output, "save failed, check write permissions: {e}"),
        }
    }

    fn exit(&mut self) -> io::Result<()> {
        writeln!(self.output, "saving before exit...")?;
        self.save()?;
        writeln!(self.output, "bye")
    }

    fn report(&mut self, outcome: &Outcome) -> io::Result<()> {
        writeln!(self.output, "{outcome}")?;
        if !outcome.is_ok() {
            writeln!(self.output, "warning: change kept in memory only, use SAVE to retry")?;
        }
        Ok(())
    }

    /// Phone from `initial` if valid, otherwise prompt until valid
    fn read_phone(&mut self, text: &str, initial: Option<String>) -> io::Result<Option<String>> {
        let mut candidate = initial;
        loop {
            if let Some(raw) = candidate.take() {
                let phone = sanitize_phone(&raw);
                if validate_phone(&phone) {
                    return Ok(Some(phone));
                }
                writeln!(
                    self.output,
                    "invalid phone: need 11 digits starting with 13/14/15/17/18/19, try again"
                )?;
            }
            match prompt(&mut self.input, &mut self.output, text)? {
                Some(line) => candidate = Some(line),
                None => return Ok(None),
            }
        }
    }
}
