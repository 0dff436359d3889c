use std::rc::Rc;
use yew::prelude::*;

use crate::models::insights::ReadingHistory;
use crate::utils::format::money;

#[derive(Properties, PartialEq)]
pub struct ReadingsTableProps {
    pub history: Rc<ReadingHistory>,
    /// Show only the newest N readings
    #[prop_or_default]
    pub limit: Option<usize>,
    /// Include the charged amount column
    #[prop_or(false)]
    pub show_amount: bool,
}

/// Newest-first table of readings across all meters of a property.
#[function_component(ReadingsTable)]
pub fn readings_table(props: &ReadingsTableProps) -> Html {
    let readings = match props.limit {
        Some(limit) => props.history.latest(limit),
        None => props.history.all(),
    };

    if readings.is_empty() {
        return html! { <p class="subtitle">{"No readings for this property yet."}</p> };
    }

    html! {
        <table class="premium-table">
            <thead>
                <tr>
                    <th>{"Meter"}</th>
                    <th>{"Value"}</th>
                    if props.show_amount {
                        <th>{"Charge"}</th>
                    }
                    <th>{"Date"}</th>
                </tr>
            </thead>
            <tbody>
                {
                    readings.iter().map(|reading| {
                        html! {
                            <tr key={reading.id.to_string()}>
                                <td>{reading.meter_label()}</td>
                                <td>{reading.value_with_unit()}</td>
                                if props.show_amount {
                                    <td>
                                        {
                                            reading.amount_value
                                                .map_or("—".to_string(), money)
                                        }
                                    </td>
                                }
                                <td>{reading.reading_date.to_string()}</td>
                            </tr>
                        }
                    }).collect::<Html>()
                }
            </tbody>
        </table>
    }
}
