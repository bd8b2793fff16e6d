// Reusable UI widgets

pub mod date_picker;
pub mod dialog;
pub mod menu;
pub mod text_input;
pub mod toast;

pub use date_picker::{DatePicker, DatePickerWidget};
pub use dialog::{Dialog, DialogVariant};
pub use menu::{Menu, MenuItem, MenuState};
pub use text_input::{TextInputWidget, TextInputWidgetExt};
pub use toast::{Toast, ToastManager, ToastVariant, ToastWidget};
