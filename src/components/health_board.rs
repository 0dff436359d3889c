use chrono::NaiveDate;
use std::rc::Rc;
use yew::prelude::*;

use crate::models::{insights::ReadingHistory, meter::Meter};

#[derive(Properties, PartialEq)]
pub struct HealthBoardProps {
    pub meters: Rc<Vec<Meter>>,
    pub history: Rc<ReadingHistory>,
    pub today: NaiveDate,
}

/// Per-meter health table. The verdicts are heuristic, derived entirely on
/// the client from recent reading cadence.
#[function_component(HealthBoard)]
pub fn health_board(props: &HealthBoardProps) -> Html {
    if props.meters.is_empty() {
        return html! { <p class="subtitle">{"No meters registered yet."}</p> };
    }

    html! {
        <table class="premium-table">
            <thead>
                <tr>
                    <th>{"Meter"}</th>
                    <th>{"Status"}</th>
                    <th>{"Note"}</th>
                </tr>
            </thead>
            <tbody>
                {
                    props.meters.iter().map(|meter| {
                        let health = props.history.health_for(meter.id, props.today);
                        html! {
                            <tr key={meter.id.to_string()}>
                                <td>
                                    <div class="stack">
                                        <span>{meter.resource_type.label()}</span>
                                        <span class="subtitle subtle">{&meter.serial_number}</span>
                                    </div>
                                </td>
                                <td>
                                    <span class={format!("badge tone-{}", health.tone())}>
                                        {health.label()}
                                    </span>
                                </td>
                                <td class="subtitle">{health.hint()}</td>
                            </tr>
                        }
                    }).collect::<Html>()
                }
            </tbody>
        </table>
    }
}
