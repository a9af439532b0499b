pub mod card_grid;
pub mod dashboard;
pub mod help_bar;
pub mod location_input;
pub mod weather_card;

pub use skycards_core::Component;

pub use card_grid::{CardGrid, CardGridProps, MAX_COLUMNS};
pub use dashboard::{spinner_frame, DashboardView, DashboardViewProps, SPINNERS};
pub use help_bar::{HelpBar, HelpBarProps};
pub use location_input::{LocationInput, LocationInputProps};
pub use weather_card::{WeatherCard, WeatherCardProps, ERROR_ICON};
