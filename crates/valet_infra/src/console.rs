//! Interactive console. One menu action invokes exactly one engine
//! operation; primitive input validation (numbers, non-empty vehicle ids)
//! happens here so the engine only ever sees well-formed arguments.

use std::io::{self, BufRead, Write};

use valet_core::system::{EntryDecision, ParkingSystem, ReleaseReceipt};

use crate::report::{self, DashboardSnapshot};

/// Menu actions, numbered as presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Quit,
    AddZone,
    AddSlots,
    Entry,
    Occupy,
    ExitVehicle,
    Cancel,
    Search,
    Rollback,
    Dashboard,
    Stats,
}

impl MenuChoice {
    /// Map a menu number to its action.
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            0 => Some(MenuChoice::Quit),
            1 => Some(MenuChoice::AddZone),
            2 => Some(MenuChoice::AddSlots),
            3 => Some(MenuChoice::Entry),
            4 => Some(MenuChoice::Occupy),
            5 => Some(MenuChoice::ExitVehicle),
            6 => Some(MenuChoice::Cancel),
            7 => Some(MenuChoice::Search),
            8 => Some(MenuChoice::Rollback),
            9 => Some(MenuChoice::Dashboard),
            10 => Some(MenuChoice::Stats),
            _ => None,
        }
    }
}

// ─── Input helpers ──────────────────────────────────────────────────────────

/// Prompt once, then read lines until one parses as an integer. None means
/// the input ended.
fn read_int<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<i64>> {
    write!(output, "{prompt}")?;
    output.flush()?;
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim().parse::<i64>() {
            Ok(n) => return Ok(Some(n)),
            Err(_) => {
                write!(output, "Please enter a valid number: ")?;
                output.flush()?;
            }
        }
    }
}

/// Prompt once, then read lines until one is non-empty. None means the
/// input ended.
fn read_text<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(Some(trimmed.to_string()));
        }
    }
}

// Out-of-range numeric input maps onto values the engine already rejects or
// treats as cross-zone, so the console never has to mirror engine rules.

fn to_zone(n: i64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn to_request(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

fn to_count(n: i64) -> u32 {
    u32::try_from(n).unwrap_or(0)
}

fn to_rollback_depth(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

// ─── Session loop ───────────────────────────────────────────────────────────

fn print_menu<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "Menu:")?;
    writeln!(output, " 1) Add zone")?;
    writeln!(output, " 2) Add slots to zone")?;
    writeln!(output, " 3) Vehicle entry (create request)")?;
    writeln!(output, " 4) Vehicle occupy (by request id)")?;
    writeln!(output, " 5) Vehicle exit (by vehicle id)")?;
    writeln!(output, " 6) Cancel request (by id)")?;
    writeln!(output, " 7) Search vehicle")?;
    writeln!(output, " 8) Rollback last K allocations")?;
    writeln!(output, " 9) Show dashboard")?;
    writeln!(output, "10) Show stats")?;
    writeln!(output, " 0) Quit")?;
    Ok(())
}

fn write_release_line<W: Write>(output: &mut W, receipt: &ReleaseReceipt) -> io::Result<()> {
    writeln!(
        output,
        "Released request {}. Duration: {} ticks. Charge: {:.2}",
        receipt.request, receipt.duration_ticks, receipt.charge
    )
}

/// Drive one interactive session to completion over any line-oriented
/// input/output pair.
pub fn run_session<R: BufRead, W: Write>(
    system: &mut ParkingSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    loop {
        print_menu(output)?;
        let Some(n) = read_int(input, output, "Choose option: ")? else {
            break;
        };
        let Some(choice) = MenuChoice::from_number(n) else {
            writeln!(output, "Invalid option")?;
            continue;
        };
        match choice {
            MenuChoice::Quit => break,
            MenuChoice::AddZone => {
                let id = system.add_zone();
                writeln!(output, "Added zone {id}")?;
            }
            MenuChoice::AddSlots => handle_add_slots(system, input, output)?,
            MenuChoice::Entry => handle_entry(system, input, output)?,
            MenuChoice::Occupy => handle_occupy(system, input, output)?,
            MenuChoice::ExitVehicle => handle_exit(system, input, output)?,
            MenuChoice::Cancel => handle_cancel(system, input, output)?,
            MenuChoice::Search => handle_search(system, input, output)?,
            MenuChoice::Rollback => handle_rollback(system, input, output)?,
            MenuChoice::Dashboard => {
                let snapshot = DashboardSnapshot::capture(system);
                write!(output, "{}", report::render_dashboard(&snapshot))?;
            }
            MenuChoice::Stats => {
                write!(output, "{}", report::render_stats(&system.usage_summary()))?;
            }
        }
    }
    Ok(())
}

// ─── Handlers ───────────────────────────────────────────────────────────────

fn handle_add_slots<R: BufRead, W: Write>(
    system: &mut ParkingSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let Some(zone) = read_int(input, output, "Zone id: ")? else {
        return Ok(());
    };
    let Some(count) = read_int(input, output, "Number of slots to add: ")? else {
        return Ok(());
    };
    match system.add_slots(to_zone(zone), to_count(count)) {
        Ok(ids) => writeln!(output, "Added {} slots to zone {}", ids.len(), zone)?,
        Err(err) => writeln!(output, "Rejected: {err}")?,
    }
    Ok(())
}

fn handle_entry<R: BufRead, W: Write>(
    system: &mut ParkingSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let Some(vehicle) = read_text(input, output, "Vehicle id: ")? else {
        return Ok(());
    };
    let Some(zone) = read_int(input, output, "Requested zone id: ")? else {
        return Ok(());
    };
    let receipt = system.entry(vehicle, to_zone(zone));
    match receipt.decision {
        EntryDecision::Allocated { slot, zone, penalty } => writeln!(
            output,
            "Allocated slot {slot} in zone {zone} (penalty {penalty:.1})"
        )?,
        EntryDecision::Queued => writeln!(
            output,
            "No slot available now. Request queued (id={})",
            receipt.request
        )?,
    }
    writeln!(
        output,
        "Request created id={} penalty={:.1}",
        receipt.request,
        receipt.penalty()
    )?;
    Ok(())
}

fn handle_occupy<R: BufRead, W: Write>(
    system: &mut ParkingSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let Some(id) = read_int(input, output, "Request id to occupy: ")? else {
        return Ok(());
    };
    match system.occupy(to_request(id)) {
        Ok(()) => writeln!(output, "Request {id} is now OCCUPIED")?,
        Err(err) => writeln!(output, "Rejected: {err}")?,
    }
    Ok(())
}

fn handle_exit<R: BufRead, W: Write>(
    system: &mut ParkingSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let Some(vehicle) = read_text(input, output, "Vehicle id to exit: ")? else {
        return Ok(());
    };
    match system.exit_by_vehicle(&vehicle) {
        Ok(receipt) => {
            write_release_line(output, &receipt)?;
            writeln!(output, "Exit processed")?;
        }
        Err(err) => writeln!(output, "Rejected: {err}")?,
    }
    Ok(())
}

fn handle_cancel<R: BufRead, W: Write>(
    system: &mut ParkingSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let Some(id) = read_int(input, output, "Request id to cancel: ")? else {
        return Ok(());
    };
    match system.cancel(to_request(id)) {
        Ok(()) => writeln!(output, "Cancelled request {id}")?,
        Err(err) => writeln!(output, "Rejected: {err}")?,
    }
    Ok(())
}

fn handle_search<R: BufRead, W: Write>(
    system: &mut ParkingSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let Some(vehicle) = read_text(input, output, "Vehicle id to search: ")? else {
        return Ok(());
    };
    match system.search_car(&vehicle) {
        Some(id) => writeln!(output, "Found request id: {id}")?,
        None => writeln!(output, "Not found")?,
    }
    Ok(())
}

fn handle_rollback<R: BufRead, W: Write>(
    system: &mut ParkingSystem,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let Some(k) = read_int(input, output, "K to rollback: ")? else {
        return Ok(());
    };
    match system.rollback_last(to_rollback_depth(k)) {
        Ok(()) => writeln!(output, "Rolled back {k} allocations")?,
        Err(err) => writeln!(output, "Rejected: {err}")?,
    }
    Ok(())
}
