use charming::{
    Chart as CharmingChart,
    component::{Axis, Grid},
    element::{AxisLabel, AxisType, ItemStyle, LineStyle, SplitLine, Tooltip, Trigger},
    renderer::WasmRenderer,
    series::Line,
};
use chrono::Local;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::hooks::use_analytics::use_analytics;
use crate::models::{analytics::MonthlyPoint, favorites::FavoriteChart};
use crate::utils::resize::on_resize_settled;

const LINE_COLOR: &str = "#7c9bff";

#[derive(Properties, PartialEq)]
pub struct FavoriteCardProps {
    pub favorite: FavoriteChart,
    pub token: AttrValue,
    pub on_remove: Callback<String>,
}

/// One pinned chart on the dashboard. Each card runs its own analytics
/// fetch so a broken pin cannot take the others down.
#[function_component(FavoriteCard)]
pub fn favorite_card(props: &FavoriteCardProps) -> Html {
    let container_ref = use_node_ref();
    let today = Local::now().date_naive();
    let query = props.favorite.query(today);
    let state = use_analytics(Some(props.token.to_string()), Some(query));

    let chart_id = AttrValue::from(format!("favorite-chart-{}", props.favorite.id));
    let points: Option<Vec<MonthlyPoint>> = state.data().map(|summary| summary.monthly.clone());

    {
        let container_ref = container_ref.clone();
        let chart_id = chart_id.clone();

        use_effect_with(
            (points.clone(), container_ref, chart_id),
            |(points, container_ref, chart_id)| {
                let listener = match (points, container_ref.cast::<HtmlElement>()) {
                    (Some(points), Some(container)) => {
                        render_chart(&container, points, chart_id);

                        let points = points.clone();
                        let chart_id = chart_id.clone();
                        Some(on_resize_settled(
                            move || render_chart(&container, &points, &chart_id),
                            150,
                        ))
                    }
                    _ => None,
                };

                move || drop(listener)
            },
        );
    }

    let on_remove = {
        let callback = props.on_remove.clone();
        let id = props.favorite.id.clone();
        Callback::from(move |_: MouseEvent| callback.emit(id.clone()))
    };

    let resource = props
        .favorite
        .resource_type
        .map_or("All resources", |r| r.label());

    html! {
        <div class="favorite-chart">
            <div class="favorite-head">
                <strong>{&props.favorite.name}</strong>
                <button type="button" class="ghost" onclick={on_remove} title="Unpin chart">
                    {"✕"}
                </button>
            </div>
            <p class="subtitle">{props.favorite.range.label()}{" · "}{resource}</p>
            <div class="favorite-chart-slot" ref={container_ref}>
                <div id={chart_id} />
            </div>
            {
                if let Some(message) = state.error() {
                    html! { <p class="subtitle subtle">{"Unavailable: "}{message}</p> }
                } else if state.is_loading() {
                    html! { <p class="subtitle subtle">{"Loading..."}</p> }
                } else {
                    Html::default()
                }
            }
        </div>
    }
}

fn render_chart(container: &HtmlElement, points: &[MonthlyPoint], chart_id: &str) {
    let width = container.client_width().cast_unsigned();
    let height = container.client_height().cast_unsigned();

    if width == 0 || height == 0 {
        return;
    }

    let chart = build_chart(points);
    if let Err(e) = WasmRenderer::new(width, height).render(chart_id, &chart) {
        web_sys::console::error_1(&format!("Render error: {e:?}").into());
    }
}

/// Compact line of monthly totals with the axes hidden.
fn build_chart(points: &[MonthlyPoint]) -> CharmingChart {
    let months: Vec<String> = points.iter().map(|p| p.month.clone()).collect();
    let amounts: Vec<f64> = points.iter().map(|p| p.total_amount).collect();

    CharmingChart::new()
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(Grid::new().left("2%").right("2%").top("8%").bottom("8%"))
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(months)
                .axis_label(AxisLabel::new().show(false)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().show(false))
                .split_line(SplitLine::new().show(false)),
        )
        .series(
            Line::new()
                .data(amounts)
                .show_symbol(false)
                .item_style(ItemStyle::new().color(LINE_COLOR))
                .line_style(LineStyle::new().color(LINE_COLOR).width(2)),
        )
}
