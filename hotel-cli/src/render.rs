//! Listing output in table, JSON and CSV form.
//!
//! Tables are tab-separated with uppercase headers; CSV carries the same
//! columns with lowercase headers; JSON is the serialized library types.

use crate::error::CliError;
use crate::utils::format_timestamp;
use hotel::config::OutputFormat;
use hotel::operations::{RoomDetails, RoomSummary};
use hotel::Reservation;
use serde::Serialize;
use std::io::{self, Write};

const ROOM_COLUMNS: [&str; 7] = [
    "number",
    "type",
    "floor",
    "state",
    "available",
    "nightly_rate",
    "max_occupancy",
];

const RESERVATION_COLUMNS: [&str; 10] = [
    "id",
    "room",
    "guest_id",
    "check_in",
    "check_out",
    "nights",
    "guests",
    "status",
    "total_price",
    "created_at",
];

fn room_record(summary: &RoomSummary) -> Vec<String> {
    let room = &summary.room;
    vec![
        room.number.clone(),
        room.room_type.name.to_string(),
        room.floor.to_string(),
        room.state.to_string(),
        if summary.available { "yes" } else { "no" }.to_string(),
        room.nightly_rate().to_string(),
        room.max_occupancy().to_string(),
    ]
}

fn reservation_record(reservation: &Reservation) -> Vec<String> {
    vec![
        reservation.id().0.to_string(),
        reservation.room_number().to_string(),
        reservation.guest_id().0.to_string(),
        reservation.check_in().to_string(),
        reservation.check_out().to_string(),
        reservation.nights().to_string(),
        reservation.guest_count().to_string(),
        reservation.status().to_string(),
        reservation.total_price().to_string(),
        format_timestamp(reservation.created_at()),
    ]
}

/// Print rooms in `format`.
pub fn print_rooms(format: OutputFormat, rooms: &[RoomSummary]) -> Result<(), CliError> {
    let records: Vec<_> = rooms.iter().map(room_record).collect();
    match format {
        OutputFormat::Table => write_table(&ROOM_COLUMNS, &records),
        OutputFormat::Csv => write_csv(&ROOM_COLUMNS, &records),
        OutputFormat::Json => write_json(&rooms),
    }
}

/// Print reservations in `format`.
pub fn print_reservations(format: OutputFormat, reservations: &[Reservation]) -> Result<(), CliError> {
    let records: Vec<_> = reservations.iter().map(reservation_record).collect();
    match format {
        OutputFormat::Table => write_table(&RESERVATION_COLUMNS, &records),
        OutputFormat::Csv => write_csv(&RESERVATION_COLUMNS, &records),
        OutputFormat::Json => write_json(&reservations),
    }
}

/// Print a room's details in `format`.
///
/// CSV carries only the upcoming reservations, since it has one shape per
/// document.
pub fn print_room_details(format: OutputFormat, details: &RoomDetails) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(details),
        OutputFormat::Csv => {
            let records: Vec<_> = details.upcoming.iter().map(reservation_record).collect();
            write_csv(&RESERVATION_COLUMNS, &records)
        }
        OutputFormat::Table => {
            let room = &details.room;
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "Room:\t{}", room.number)?;
            writeln!(handle, "Type:\t{}", room.room_type.name)?;
            writeln!(handle, "Floor:\t{}", room.floor)?;
            writeln!(handle, "State:\t{}", room.state)?;
            writeln!(handle, "Rate:\t{}", room.nightly_rate())?;
            writeln!(handle, "Max occupancy:\t{}", room.max_occupancy())?;
            writeln!(
                handle,
                "Available:\t{}",
                if details.available { "yes" } else { "no" }
            )?;
            if let Some(ref description) = room.description {
                writeln!(handle, "Description:\t{description}")?;
            }
            match details.current {
                Some(ref current) => writeln!(
                    handle,
                    "Current:\t{} {} ({})",
                    current.id(),
                    current.stay(),
                    current.status()
                )?,
                None => writeln!(handle, "Current:\t-")?,
            }
            writeln!(handle)?;
            drop(handle);

            let records: Vec<_> = details.upcoming.iter().map(reservation_record).collect();
            write_table(&RESERVATION_COLUMNS, &records)
        }
    }
}

fn write_table(columns: &[&str], records: &[Vec<String>]) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let header_line = columns
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for record in records {
        writeln!(handle, "{}", record.join("\t"))?;
    }
    Ok(())
}

fn write_csv(columns: &[&str], records: &[Vec<String>]) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());
    writer.write_record(columns)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}
