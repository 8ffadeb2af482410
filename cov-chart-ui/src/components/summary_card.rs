//! Summary statistic card.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct SummaryCardProps {
    /// Card caption, e.g. "Total cases"
    pub label: String,
    /// Human-formatted value, e.g. "1M"
    pub value: String,
}

/// One mini container showing an abbreviated number over its caption.
#[component]
pub fn SummaryCard(props: SummaryCardProps) -> Element {
    rsx! {
        div {
            style: "flex: 1; padding: 12px; margin: 0 6px; background: #f9f9f9; \
                    border-radius: 5px; box-shadow: 0 1px 3px rgba(0,0,0,0.15); text-align: center;",
            h6 {
                style: "margin: 0 0 4px 0; font-size: 20px;",
                "{props.value}"
            }
            p {
                style: "margin: 0; font-size: 13px; color: #666;",
                "{props.label}"
            }
        }
    }
}
