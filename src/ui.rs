/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    MainMenu,
    Booking,
    Services,
    Appointments,
    Catalog,
    Cash,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::MainMenu,
        Screen::Booking,
        Screen::Services,
        Screen::Appointments,
        Screen::Catalog,
        Screen::Cash,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::MainMenu => "Main Menu",
            Screen::Booking => "Book an Appointment",
            Screen::Services => "Services",
            Screen::Appointments => "Appointments",
            Screen::Catalog => "Barbers, Services & Time Slots",
            Screen::Cash => "Cash",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Screen::MainMenu => "Book a cut or manage the shop.",
            Screen::Booking => "Pick a barber, a service and a free time slot.",
            Screen::Services => "What the shop offers and what it costs.",
            Screen::Appointments => "Review bookings, move them through stages or cancel them.",
            Screen::Catalog => "Add, edit and (de)activate barbers, services and time slots.",
            Screen::Cash => "Revenue, ticket and cancellation figures, plus a day-by-day breakdown.",
        }
    }
}
