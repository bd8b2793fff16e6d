//! `profile show|set|clear`: the customer profile used to prefill bookings.

use super::common::{print_field, print_info, print_success};
use super::ProfileCommand;
use crate::session::{Customer, Session};
use crate::utils::format;
use anyhow::{bail, Result};
use std::path::Path;

pub fn cmd_profile(command: ProfileCommand) -> Result<()> {
    run(command, &crate::utils::get_session_path())
}

fn run(command: ProfileCommand, path: &Path) -> Result<()> {
    match command {
        ProfileCommand::Show => {
            let session = Session::load(path)?;
            match session.customer() {
                Some(customer) => {
                    print_field("Name", &customer.name);
                    print_field("Contact", format::phone(&customer.contact));
                }
                None => print_info("No profile saved. Set one with 'barbershop profile set'."),
            }
        }
        ProfileCommand::Set { name, contact } => {
            let name = name.trim().to_string();
            let contact: String = contact.chars().filter(char::is_ascii_digit).collect();
            if name.is_empty() {
                bail!("Name is required");
            }
            if contact.is_empty() {
                bail!("Contact is required");
            }
            Session::with_customer(Customer {
                id: None,
                name,
                contact,
            })
            .save(path)?;
            print_success("Profile saved");
        }
        ProfileCommand::Clear => {
            Session::clear(path)?;
            print_success("Profile cleared");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_normalizes_contact_and_clear_removes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        run(
            ProfileCommand::Set {
                name: " Maria ".to_string(),
                contact: "(18) 99999-0000".to_string(),
            },
            &path,
        )
        .unwrap();
        let session = Session::load(&path).unwrap();
        let customer = session.customer().unwrap();
        assert_eq!(customer.name, "Maria");
        assert_eq!(customer.contact, "18999990000");

        run(ProfileCommand::Show, &path).unwrap();
        run(ProfileCommand::Clear, &path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_set_rejects_blank_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let err = run(
            ProfileCommand::Set {
                name: "  ".to_string(),
                contact: "18999990000".to_string(),
            },
            &path,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
        assert!(!path.exists());
    }
}
