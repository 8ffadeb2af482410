//! Reusable Dioxus RSX components for the COVID dashboard.

mod chart_container;
mod chart_header;
mod continent_selector;
mod country_count;
mod country_select;
mod date_range_picker;
mod error_display;
mod loading_spinner;
mod summary_card;
mod tabs;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use continent_selector::ContinentSelector;
pub use country_count::CountryCountLabel;
pub use country_select::CountrySelect;
pub use date_range_picker::DateRangePicker;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use summary_card::SummaryCard;
pub use tabs::{MeasureTabs, MetricTabs};
