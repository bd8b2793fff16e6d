//! Listing and admin commands.

use super::common::{print_field, print_info, print_success, print_warning, CliContext};
use crate::api::models::{AppointmentFilter, BookingResponse, BookingStage, Id};
use crate::utils::format;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tracing::info;

pub fn cmd_barbers(all: bool) -> Result<()> {
    let ctx = CliContext::load()?;
    let barbers = ctx
        .block_on(ctx.client.list_barbers())
        .context("Failed to load barbers")?;
    let shown: Vec<_> = barbers.iter().filter(|b| all || b.is_active()).collect();

    if shown.is_empty() {
        print_info("No barbers registered yet.");
        return Ok(());
    }

    println!("Barbers ({}):", shown.len());
    for barber in shown {
        let status = if barber.is_active() { "" } else { " (inactive)" };
        println!("  [{}] {}{}", barber.id, barber.name, status);
        for service in &barber.services {
            println!(
                "      \u{2702} [{}] {} {}",
                service.id,
                service.description,
                format::money(service.price)
            );
        }
        for slot in &barber.time_slots {
            println!("      \u{25F7} [{}] {}", slot.id, slot.label());
        }
    }
    Ok(())
}

/// One-line summary of an appointment for list output.
pub fn appointment_line(booking: &BookingResponse) -> String {
    let day = booking
        .date()
        .map(format::date)
        .unwrap_or_else(|| booking.day.clone());
    format!(
        "#{:<5} {:<12} {:<20} {:<16} {:<14} {} {:<13} {:>10}  {}",
        booking.id,
        day,
        truncate(&booking.name, 20),
        format::phone(&booking.contact),
        truncate(&booking.barber.name, 14),
        format::hour(&booking.time_slot.start),
        truncate(&booking.service.description, 13),
        format::money(booking.price),
        booking.stage.label()
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('\u{2026}');
    cut
}

pub fn cmd_appointments(stage: Option<BookingStage>, name: Option<String>) -> Result<()> {
    let ctx = CliContext::load()?;
    let filter = AppointmentFilter {
        name: name.filter(|n| !n.trim().is_empty()),
        stage,
        ..AppointmentFilter::default()
    };

    let appointments = if filter.is_empty() {
        ctx.block_on(ctx.client.list_appointments())
    } else {
        ctx.block_on(ctx.client.filter_appointments(&filter))
    }
    .context("Failed to load appointments")?;

    if appointments.is_empty() {
        print_info("No appointments found.");
        return Ok(());
    }
    println!("Appointments ({}):", appointments.len());
    for booking in &appointments {
        println!("  {}", appointment_line(booking));
    }
    Ok(())
}

pub fn cmd_stage(id: Id, stage: BookingStage) -> Result<()> {
    let ctx = CliContext::load()?;
    if stage == BookingStage::Canceled {
        print_warning("Use 'barbershop cancel' to cancel; moving the stage anyway.");
    }
    ctx.block_on(ctx.client.update_stage(id, stage))
        .with_context(|| format!("Failed to move appointment {}", id))?;
    info!("CLI: appointment {} -> {}", id, stage.wire_name());
    print_success(&format!("Appointment #{} is now {}", id, stage.label()));
    Ok(())
}

pub fn cmd_cancel(id: Id) -> Result<()> {
    let ctx = CliContext::load()?;
    ctx.block_on(ctx.client.cancel_appointment(id))
        .with_context(|| format!("Failed to cancel appointment {}", id))?;
    info!("CLI: appointment {} canceled", id);
    print_success(&format!("Appointment #{} canceled", id));
    Ok(())
}

pub fn cmd_cash(date: Option<NaiveDate>) -> Result<()> {
    let ctx = CliContext::load()?;
    let day = date.unwrap_or_else(|| Local::now().date_naive());
    let (overview, summary) = ctx.block_on(async {
        tokio::join!(ctx.client.cash_overview(), ctx.client.daily_summary(day))
    });
    let overview = overview.context("Failed to load cash figures")?;
    let summary = summary.with_context(|| format!("Failed to load {}", format::date(day)))?;

    println!("Cash");
    print_field("Revenue", format::money(overview.total_revenue));
    print_field("Bookings", overview.total_appointments);
    print_field("Today", overview.appointments_today);
    print_field("Avg ticket", format::money(overview.average_ticket));
    print_field("Canceled", format::percent(overview.cancellation_rate));
    match &overview.best_seller {
        Some(best) => print_field(
            "Top",
            format!(
                "{} ({} sold, {} of sales)",
                best.description,
                best.sales,
                format::percent(best.share_percent)
            ),
        ),
        None => print_field("Top", "-"),
    }

    println!();
    println!("{} ({} appointments)", format::date_long(day), summary.total());
    for stage in BookingStage::ALL {
        print_field(stage.label(), summary.count(stage));
    }
    Ok(())
}
