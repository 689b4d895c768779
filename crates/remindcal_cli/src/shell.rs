//! Menu-driven reminder shell.
//!
//! # Responsibility
//! - Prompt for command parameters and render store query results.
//! - Persist the store after every mutating command and on exit.
//!
//! # Invariants
//! - Invalid date or month input re-prompts; invalid edit/delete input aborts
//!   only the current command.
//! - End of input behaves like the Exit command.

use crate::config::AppConfig;
use crate::error::CliResult;
use chrono::NaiveDate;
use log::{info, warn};
use remindcal_core::{
    format_date, load_store, month_name, parse_date, parse_year_month, save_store, DayReminders,
    LoadStatus, ReminderStore, StoreError,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const WEEK_DAYS: usize = 7;
const INVALID_DATE_MESSAGE: &str = "Invalid date format. Please use YYYY-MM-DD.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// Loads the store from `config`, runs the menu until Exit or end of input,
/// and saves on the way out.
///
/// # Errors
/// - Unreadable or unwritable data file.
/// - Terminal read/write failure.
pub fn run<R: BufRead, W: Write>(
    config: &AppConfig,
    today: NaiveDate,
    input: R,
    output: W,
) -> CliResult<()> {
    let loaded = load_store(&config.data_file)?;
    let mut shell = Shell {
        input,
        output,
        store: loaded.store,
        data_file: config.data_file.clone(),
    };

    writeln!(shell.output, "Welcome to the Calendar Reminder App!")?;
    if let LoadStatus::Malformed { .. } = loaded.status {
        writeln!(
            shell.output,
            "Error: Could not parse data file. Starting with empty data."
        )?;
    }
    shell.show_today(today)?;
    shell.menu_loop()
}

struct Shell<R, W> {
    input: R,
    output: W,
    store: ReminderStore,
    data_file: PathBuf,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    fn menu_loop(&mut self) -> CliResult<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Select an option (1-8): ")? else {
                break;
            };

            let step = match choice.trim() {
                "1" => self.mutating(Self::add_reminder)?,
                "2" => self.browse_week()?,
                "3" => self.browse_month()?,
                "4" => self.show_date()?,
                "5" => self.mutating(Self::edit_reminder)?,
                "6" => self.mutating(Self::remove_reminder)?,
                "7" => self.search()?,
                "8" => Step::Exit,
                _ => {
                    writeln!(
                        self.output,
                        "Invalid option. Please enter a number between 1 and 8."
                    )?;
                    Step::Continue
                }
            };
            if step == Step::Exit {
                break;
            }
        }

        writeln!(self.output, "Saving calendar and exiting...")?;
        self.save()?;
        writeln!(self.output, "Goodbye!")?;
        info!(
            "event=app_exit module=cli status=ok dates={}",
            self.store.len()
        );
        Ok(())
    }

    fn print_menu(&mut self) -> CliResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Main Menu")?;
        for (number, label) in [
            "Add Reminder",
            "Browse Week",
            "Browse Month",
            "View Reminders for a Specific Date",
            "Edit a Reminder",
            "Delete a Reminder",
            "Search Reminders by Keyword",
            "Exit",
        ]
        .iter()
        .enumerate()
        {
            writeln!(self.output, "{}. {label}", number + 1)?;
        }
        Ok(())
    }

    /// Runs a mutating command, then saves whatever state it left behind.
    fn mutating(&mut self, command: fn(&mut Self) -> CliResult<Step>) -> CliResult<Step> {
        let step = command(self)?;
        self.save()?;
        Ok(step)
    }

    fn save(&mut self) -> CliResult<()> {
        save_store(&self.data_file, &self.store)?;
        Ok(())
    }

    /// Writes `message` and reads one line; `None` at end of input.
    fn prompt(&mut self, message: &str) -> CliResult<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Re-prompts until a valid date is entered; `None` at end of input.
    fn prompt_date(&mut self, message: &str) -> CliResult<Option<NaiveDate>> {
        loop {
            let Some(line) = self.prompt(message)? else {
                return Ok(None);
            };
            match parse_date(&line) {
                Ok(date) => return Ok(Some(date)),
                Err(err) => {
                    warn!("event=input_rejected module=cli status=retry kind=date");
                    writeln!(self.output, "{INVALID_DATE_MESSAGE} ({err})")?;
                }
            }
        }
    }

    fn show_today(&mut self, today: NaiveDate) -> CliResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Today's date: {}", format_date(today))?;
        if self.store.get(today).is_empty() {
            writeln!(self.output, "No reminders for today.")?;
        } else {
            writeln!(self.output, "Reminders for today:")?;
            self.print_numbered(today)?;
        }
        Ok(())
    }

    fn add_reminder(&mut self) -> CliResult<Step> {
        writeln!(self.output)?;
        let Some(date) = self.prompt_date("Enter date for the reminder (YYYY-MM-DD): ")? else {
            return Ok(Step::Exit);
        };
        let Some(text) = self.prompt("Enter the reminder text: ")? else {
            return Ok(Step::Exit);
        };

        match self.store.add(date, &text) {
            Ok(_) => writeln!(self.output, "Reminder added for {}.", format_date(date))?,
            Err(StoreError::EmptyText) => writeln!(self.output, "Empty reminder was not added.")?,
            Err(err) => writeln!(self.output, "Reminder not added: {err}")?,
        }
        Ok(Step::Continue)
    }

    fn browse_week(&mut self) -> CliResult<Step> {
        writeln!(self.output)?;
        let Some(start) = self.prompt_date("Enter the starting date of the week (YYYY-MM-DD): ")?
        else {
            return Ok(Step::Exit);
        };

        let days = self.store.get_range(start, WEEK_DAYS);
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Reminders from {} to next {} days:",
            format_date(start),
            WEEK_DAYS - 1
        )?;
        write_days(&mut self.output, &days)?;
        Ok(Step::Continue)
    }

    fn browse_month(&mut self) -> CliResult<Step> {
        let (year, month) = loop {
            writeln!(self.output)?;
            let Some(year) = self.prompt("Enter year (e.g., 2025): ")? else {
                return Ok(Step::Exit);
            };
            let Some(month) = self.prompt("Enter month number (1-12): ")? else {
                return Ok(Step::Exit);
            };
            match parse_year_month(&year, &month) {
                Ok(parsed) => break parsed,
                Err(err) => {
                    warn!("event=input_rejected module=cli status=retry kind=month");
                    writeln!(self.output, "Invalid input: {err}.")?;
                }
            }
        };

        let days = match self.store.get_month(year, month) {
            Ok(days) => days,
            Err(err) => {
                writeln!(self.output, "Cannot browse month: {err}.")?;
                return Ok(Step::Continue);
            }
        };
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Reminders for {} {year}:",
            month_name(month).unwrap_or("?")
        )?;
        write_days(&mut self.output, &days)?;
        Ok(Step::Continue)
    }

    fn show_date(&mut self) -> CliResult<Step> {
        writeln!(self.output)?;
        let Some(date) = self.prompt_date("Enter the date (YYYY-MM-DD): ")? else {
            return Ok(Step::Exit);
        };

        if self.store.get(date).is_empty() {
            writeln!(self.output, "No reminders for this date.")?;
        } else {
            writeln!(self.output, "Reminders for {}:", format_date(date))?;
            self.print_numbered(date)?;
        }
        Ok(Step::Continue)
    }

    fn edit_reminder(&mut self) -> CliResult<Step> {
        let Some((date, index)) = self.select_reminder("edit")? else {
            return Ok(Step::Continue);
        };
        let Some(text) = self.prompt("Enter the new reminder text: ")? else {
            return Ok(Step::Exit);
        };

        match self.store.edit(date, index, &text) {
            Ok(()) => writeln!(self.output, "Reminder updated.")?,
            Err(StoreError::EmptyText) => {
                writeln!(self.output, "Empty input. Reminder not changed.")?
            }
            Err(err) => writeln!(self.output, "Reminder not changed: {err}")?,
        }
        Ok(Step::Continue)
    }

    fn remove_reminder(&mut self) -> CliResult<Step> {
        let Some((date, index)) = self.select_reminder("delete")? else {
            return Ok(Step::Continue);
        };

        match self.store.remove(date, index) {
            Ok(removed) => writeln!(self.output, "Removed: {removed}")?,
            Err(err) => writeln!(self.output, "Nothing removed: {err}")?,
        }
        Ok(Step::Continue)
    }

    /// Asks for a date and a reminder number on it.
    ///
    /// Returns `None` after printing a message when the command should be
    /// abandoned, including at end of input.
    fn select_reminder(&mut self, action: &str) -> CliResult<Option<(NaiveDate, usize)>> {
        writeln!(self.output)?;
        let Some(line) = self.prompt("Enter the date (YYYY-MM-DD): ")? else {
            return Ok(None);
        };
        let date = match parse_date(&line) {
            Ok(date) => date,
            Err(err) => {
                writeln!(self.output, "{INVALID_DATE_MESSAGE} ({err})")?;
                return Ok(None);
            }
        };
        if self.store.get(date).is_empty() {
            writeln!(self.output, "No reminders found on that date.")?;
            return Ok(None);
        }

        writeln!(self.output)?;
        writeln!(self.output, "Reminders for {}:", format_date(date))?;
        self.print_numbered(date)?;

        let Some(choice) =
            self.prompt(&format!("Enter the number of the reminder to {action}: "))?
        else {
            return Ok(None);
        };
        let Ok(index) = choice.trim().parse::<usize>() else {
            writeln!(self.output, "Please enter a valid number.")?;
            return Ok(None);
        };
        if self.store.check_index(date, index).is_err() {
            writeln!(self.output, "Invalid reminder number.")?;
            return Ok(None);
        }
        Ok(Some((date, index)))
    }

    fn search(&mut self) -> CliResult<Step> {
        writeln!(self.output)?;
        let Some(keyword) = self.prompt("Enter keyword to search: ")? else {
            return Ok(Step::Exit);
        };
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            writeln!(self.output, "Please enter a non-empty keyword.")?;
            return Ok(Step::Continue);
        }

        let hits = self.store.search(&keyword);
        writeln!(self.output)?;
        writeln!(self.output, "Results for keyword: '{keyword}'")?;
        if hits.is_empty() {
            writeln!(self.output, "No reminders matched your keyword.")?;
        }
        for hit in hits {
            writeln!(self.output, "{} - {}. {}", hit.date, hit.index, hit.text)?;
        }
        Ok(Step::Continue)
    }

    fn print_numbered(&mut self, date: NaiveDate) -> CliResult<()> {
        for (idx, reminder) in self.store.get(date).iter().enumerate() {
            writeln!(self.output, "  {}. {reminder}", idx + 1)?;
        }
        Ok(())
    }
}

fn write_days<W: Write>(output: &mut W, days: &[DayReminders<'_>]) -> CliResult<()> {
    for day in days {
        let key = format_date(day.date);
        if day.reminders.is_empty() {
            writeln!(output, "{key}: No reminders.")?;
            continue;
        }
        writeln!(output, "{key}:")?;
        for reminder in day.reminders {
            writeln!(output, "   - {reminder}")?;
        }
    }
    Ok(())
}
