//! Page header with dashboard title and subtitle.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    /// Main title
    pub title: String,
    /// Smaller subtitle line
    #[props(default = String::new())]
    pub subtitle: String,
}

/// Header showing the dashboard title and an optional subtitle.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 16px;",
            h3 {
                style: "margin: 0;",
                "{props.title}"
            }
            if !props.subtitle.is_empty() {
                h5 {
                    style: "margin: 0; font-weight: normal; color: #666;",
                    "{props.subtitle}"
                }
            }
        }
    }
}
