//! Wizard steps and the transition table between them.

use std::fmt;

/// One screen of the booking flow. The flow is strictly linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Welcome,
    Contact,
    SelectBarber,
    SelectService,
    SelectDate,
    SelectTime,
    EnterName,
    Confirmation,
}

/// A piece of data the wizard collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Contact,
    Barber,
    Service,
    Date,
    TimeSlot,
    Name,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Contact,
        Field::Barber,
        Field::Service,
        Field::Date,
        Field::TimeSlot,
        Field::Name,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Contact => "Contact",
            Field::Barber => "Barber",
            Field::Service => "Service",
            Field::Date => "Date",
            Field::TimeSlot => "Time",
            Field::Name => "Name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl WizardStep {
    pub const ALL: [WizardStep; 8] = [
        WizardStep::Welcome,
        WizardStep::Contact,
        WizardStep::SelectBarber,
        WizardStep::SelectService,
        WizardStep::SelectDate,
        WizardStep::SelectTime,
        WizardStep::EnterName,
        WizardStep::Confirmation,
    ];

    /// Forward transition. `Confirmation` is terminal.
    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Welcome => Some(WizardStep::Contact),
            WizardStep::Contact => Some(WizardStep::SelectBarber),
            WizardStep::SelectBarber => Some(WizardStep::SelectService),
            WizardStep::SelectService => Some(WizardStep::SelectDate),
            WizardStep::SelectDate => Some(WizardStep::SelectTime),
            WizardStep::SelectTime => Some(WizardStep::EnterName),
            WizardStep::EnterName => Some(WizardStep::Confirmation),
            WizardStep::Confirmation => None,
        }
    }

    /// Backward transition used for revising earlier answers.
    /// Neither end of the flow has one.
    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Welcome | WizardStep::Confirmation => None,
            WizardStep::Contact => Some(WizardStep::Welcome),
            WizardStep::SelectBarber => Some(WizardStep::Contact),
            WizardStep::SelectService => Some(WizardStep::SelectBarber),
            WizardStep::SelectDate => Some(WizardStep::SelectService),
            WizardStep::SelectTime => Some(WizardStep::SelectDate),
            WizardStep::EnterName => Some(WizardStep::SelectTime),
        }
    }

    /// Field that must be filled before leaving this step.
    pub fn required_field(self) -> Option<Field> {
        match self {
            WizardStep::Welcome | WizardStep::Confirmation => None,
            WizardStep::Contact => Some(Field::Contact),
            WizardStep::SelectBarber => Some(Field::Barber),
            WizardStep::SelectService => Some(Field::Service),
            WizardStep::SelectDate => Some(Field::Date),
            WizardStep::SelectTime => Some(Field::TimeSlot),
            WizardStep::EnterName => Some(Field::Name),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Welcome => "Welcome",
            WizardStep::Contact => "Contact",
            WizardStep::SelectBarber => "Barber",
            WizardStep::SelectService => "Service",
            WizardStep::SelectDate => "Date",
            WizardStep::SelectTime => "Time",
            WizardStep::EnterName => "Your name",
            WizardStep::Confirmation => "Confirmed",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
