use charming::{
    Chart as CharmingChart,
    component::{Axis, Grid},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, LineStyle, LineStyleType,
        SplitLine, Tooltip, Trigger,
    },
    renderer::WasmRenderer,
    series::Bar,
};
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::models::analytics::MonthlyPoint;
use crate::utils::resize::on_resize_settled;

const BAR_COLOR: &str = "#7c9bff";
const AXIS_COLOR: &str = "#9aa3c0";
const GRID_COLOR: &str = "#2c3354";

#[derive(Properties, PartialEq)]
pub struct ChargeChartProps {
    /// DOM id the chart renders into; must be unique per page.
    pub chart_id: AttrValue,
    pub points: Rc<Vec<MonthlyPoint>>,
}

/// Bar chart of the total charged per month.
#[function_component(ChargeChart)]
pub fn charge_chart(props: &ChargeChartProps) -> Html {
    let container_ref = use_node_ref();
    let series_data = use_memo(props.points.clone(), |points| {
        (
            points.iter().map(|p| p.month.clone()).collect::<Vec<_>>(),
            points.iter().map(|p| p.total_amount).collect::<Vec<_>>(),
        )
    });

    {
        let container_ref = container_ref.clone();
        let chart_id = props.chart_id.clone();

        use_effect_with(
            (series_data, container_ref, chart_id),
            |(series_data, container_ref, chart_id)| {
                let listener = container_ref.cast::<HtmlElement>().map(|container| {
                    render_chart(&container, series_data, chart_id);

                    let series_data = series_data.clone();
                    let chart_id = chart_id.clone();
                    on_resize_settled(
                        move || render_chart(&container, &series_data, &chart_id),
                        150,
                    )
                });

                move || drop(listener)
            },
        );
    }

    html! {
        <div class="chart-container" ref={container_ref}>
            <div id={props.chart_id.clone()} />
        </div>
    }
}

fn render_chart(container: &HtmlElement, series_data: &(Vec<String>, Vec<f64>), chart_id: &str) {
    let width = container.client_width().cast_unsigned();
    let height = container.client_height().cast_unsigned();

    if width == 0 || height == 0 {
        return;
    }

    let chart = build_chart(series_data);
    if let Err(e) = WasmRenderer::new(width, height).render(chart_id, &chart) {
        web_sys::console::error_1(&format!("Render error: {e:?}").into());
    }
}

fn build_chart(series_data: &(Vec<String>, Vec<f64>)) -> CharmingChart {
    let (x_data, y_data) = series_data;

    CharmingChart::new()
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("8%")
                .right("4%")
                .bottom("14%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(x_data.clone())
                .axis_label(AxisLabel::new().rotate(45).color(AXIS_COLOR)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().color(AXIS_COLOR))
                .split_line(
                    SplitLine::new().line_style(
                        LineStyle::new()
                            .color(GRID_COLOR)
                            .type_(LineStyleType::Dashed),
                    ),
                ),
        )
        .series(
            Bar::new()
                .data(y_data.clone())
                .bar_width("60%")
                .item_style(ItemStyle::new().color(BAR_COLOR)),
        )
}
