//! `slots` and `book`: the customer side of the CLI.
//!
//! `book` drives [`BookingWizard`] step by step, running each effect it
//! returns synchronously, so the same guards apply as in the TUI.

use super::common::{print_field, print_info, print_success, CliContext};
use crate::api::models::{Barber, Id, Service, TimeSlot};
use crate::api::{ApiRequest, ApiResponse};
use crate::booking::{BookingWizard, Transition, WizardEffect};
use crate::screens::services::offered;
use crate::services::RequestService;
use crate::session::{Customer, Session};
use crate::utils::format;
use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use tracing::info;

pub struct BookArgs {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub barber: String,
    pub service: String,
    pub date: NaiveDate,
    pub slot: String,
    pub remember: bool,
}

pub fn cmd_services() -> Result<()> {
    let ctx = CliContext::load()?;
    let services = ctx
        .block_on(ctx.client.list_services())
        .context("Failed to load services")?;
    let services = offered(services);

    if services.is_empty() {
        print_info("No services on offer right now.");
        return Ok(());
    }

    println!("Services ({}):", services.len());
    for service in &services {
        println!(
            "  [{}] {:<30} {:>12}",
            service.id,
            service.description,
            format::money(service.price)
        );
    }
    Ok(())
}

pub fn cmd_slots(barber_id: Id, date: NaiveDate) -> Result<()> {
    let ctx = CliContext::load()?;
    let slots = ctx
        .block_on(ctx.client.available_slots(date, barber_id))
        .context("Failed to load free time slots")?;

    if slots.is_empty() {
        print_info(&format!("No free time slots on {}", format::date(date)));
        return Ok(());
    }
    println!("Free time slots on {} ({}):", format::date(date), slots.len());
    for slot in &slots {
        println!("  [{}] {}", slot.id, slot.label());
    }
    Ok(())
}

/// Barber by numeric id or case-insensitive name, among active barbers.
pub fn find_barber<'a>(barbers: &'a [Barber], query: &str) -> Result<&'a Barber> {
    let query = query.trim();
    let lower = query.to_lowercase();
    let mut active = barbers.iter().filter(|b| b.is_active());
    let found = match query.parse::<Id>() {
        Ok(id) => active.find(|b| b.id == id),
        Err(_) => active.find(|b| b.name.to_lowercase() == lower),
    };
    found.ok_or_else(|| anyhow!("No active barber matches '{}'", query))
}

/// One of `barber`'s services by id or description.
pub fn find_service<'a>(barber: &'a Barber, query: &str) -> Result<&'a Service> {
    let query = query.trim();
    let lower = query.to_lowercase();
    let found = match query.parse::<Id>() {
        Ok(id) => barber.service(id),
        Err(_) => barber
            .services
            .iter()
            .find(|s| s.description.to_lowercase() == lower),
    };
    found.ok_or_else(|| anyhow!("{} does not offer '{}'", barber.name, query))
}

/// A slot by id or by its start time (`09:00`).
pub fn find_slot<'a>(slots: &'a [TimeSlot], query: &str) -> Result<&'a TimeSlot> {
    let query = query.trim();
    let found = match query.parse::<Id>() {
        Ok(id) => slots.iter().find(|s| s.id == id),
        Err(_) => slots.iter().find(|s| format::hour(&s.start) == query),
    };
    found.ok_or_else(|| anyhow!("Time slot '{}' is not free on that day", query))
}

/// Run whatever the wizard asked for and feed the answer back.
fn run_effect(ctx: &CliContext, wizard: &mut BookingWizard, transition: Transition) -> Result<()> {
    let Some(effect) = transition? else {
        return Ok(());
    };
    let what = match &effect {
        WizardEffect::FetchBarbers => "load barbers",
        WizardEffect::FetchSlots(_) => "load free time slots",
        WizardEffect::Submit(_) => "create booking",
    };
    let response = RequestService::run_blocking(&ctx.runtime, &ctx.client, ApiRequest::from(effect));
    let error = match response {
        ApiResponse::Barbers(result) => {
            let error = result.as_ref().err().cloned();
            wizard.apply_barbers(result);
            error
        }
        ApiResponse::Slots { key, result } => {
            let error = result.as_ref().err().cloned();
            wizard.apply_slots(key, result);
            error
        }
        ApiResponse::BookingCreated(result) => {
            let error = result.as_ref().err().cloned();
            wizard.apply_submission(result);
            error
        }
        other => bail!("Unexpected response to '{}': {:?}", what, other),
    };
    match error {
        Some(e) => bail!("Failed to {}: {}", what, e),
        None => Ok(()),
    }
}

pub fn cmd_book(args: BookArgs) -> Result<()> {
    let ctx = CliContext::load()?;
    let customer = ctx.session.customer();
    let contact = args
        .contact
        .or_else(|| customer.map(|c| c.contact.clone()))
        .unwrap_or_default();
    let name = args
        .name
        .or_else(|| customer.map(|c| c.name.clone()))
        .unwrap_or_default();

    let mut wizard = BookingWizard::new(Local::now().date_naive());
    let start = wizard.start();
    run_effect(&ctx, &mut wizard, Ok(start))?;

    // Welcome -> Contact
    let step = wizard.advance();
    run_effect(&ctx, &mut wizard, step)?;
    wizard.set_contact(contact.trim())?;
    let step = wizard.advance();
    run_effect(&ctx, &mut wizard, step)?;

    let barbers = wizard.barbers().value().map(Vec::as_slice).unwrap_or(&[]);
    let barber = find_barber(barbers, &args.barber)?;
    let service_id = find_service(barber, &args.service)?.id;
    let barber_id = barber.id;

    let step = wizard.select_barber(barber_id);
    run_effect(&ctx, &mut wizard, step)?;
    let step = wizard.advance();
    run_effect(&ctx, &mut wizard, step)?;

    wizard.select_service(service_id)?;
    let step = wizard.advance();
    run_effect(&ctx, &mut wizard, step)?;

    let step = wizard.select_date(args.date);
    run_effect(&ctx, &mut wizard, step)?;
    let step = wizard.advance();
    run_effect(&ctx, &mut wizard, step)?;

    let slot_id = find_slot(wizard.available_slots().unwrap_or(&[]), &args.slot)?.id;
    wizard.select_slot(slot_id)?;
    let step = wizard.advance();
    run_effect(&ctx, &mut wizard, step)?;

    wizard.set_name(name.trim())?;
    let step = wizard.submit();
    run_effect(&ctx, &mut wizard, step)?;

    let booking = wizard
        .confirmation()
        .ok_or_else(|| anyhow!("The server did not confirm the booking"))?;
    print_success(&format!("Booking #{} created", booking.id));
    print_field("Client", &booking.name);
    print_field("Contact", format::phone(&booking.contact));
    print_field("Barber", &booking.barber.name);
    print_field("Service", &booking.service.description);
    print_field(
        "Day",
        booking
            .date()
            .map(format::date)
            .unwrap_or_else(|| booking.day.clone()),
    );
    print_field("Time", booking.time_slot.label());
    print_field("Value", format::money(booking.price));
    print_field("Stage", booking.stage.label());

    if args.remember {
        let session = Session::with_customer(Customer {
            id: None,
            name: booking.name.clone(),
            contact: booking.contact.clone(),
        });
        session.save(&ctx.session_path)?;
        info!("Profile saved after booking {}", booking.id);
        print_info("Saved as your profile");
    }
    Ok(())
}
