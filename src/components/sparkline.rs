use gloo::events::EventListener;
use web_sys::HtmlElement;
use yew::prelude::*;

const GRADIENT_ID: &str = "sparkline-fill";

/// Scales raw values into viewbox coordinates, newest value rightmost.
fn scale_points(values: &[f64], width: f64, height: f64, padding: f64) -> Vec<(f64, f64)> {
    if values.len() < 2 {
        return vec![];
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = if (max - min).abs() < f64::EPSILON {
        1.0 // Avoid division by zero for flat lines
    } else {
        max - min
    };

    values
        .iter()
        .enumerate()
        .map(|(i, &val)| {
            let x = (i as f64 / (values.len() - 1) as f64) * width;
            let y = padding + (1.0 - (val - min) / range) * (height - 2.0 * padding);
            (x, y)
        })
        .collect()
}

/// Builds a smooth SVG path through the points via Catmull-Rom control
/// points converted to cubic Beziers.
fn line_path(points: &[(f64, f64)]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };

    let mut path = format!("M {:.2},{:.2}", first.0, first.1);
    for i in 0..points.len() - 1 {
        let p0 = if i > 0 { points[i - 1] } else { points[i] };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = if i + 2 < points.len() {
            points[i + 2]
        } else {
            p2
        };

        let tension = 6.0;
        let cp1x = p1.0 + (p2.0 - p0.0) / tension;
        let cp1y = p1.1 + (p2.1 - p0.1) / tension;
        let cp2x = p2.0 - (p3.0 - p1.0) / tension;
        let cp2y = p2.1 - (p3.1 - p1.1) / tension;

        path.push_str(&format!(
            " C {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            cp1x, cp1y, cp2x, cp2y, p2.0, p2.1
        ));
    }

    path
}

/// Closes the line down to the baseline so the area under it can be filled.
fn area_path(points: &[(f64, f64)], height: f64) -> String {
    let line = line_path(points);
    if line.is_empty() {
        return line;
    }
    let (last, first) = (points[points.len() - 1], points[0]);
    format!(
        "{line} L {:.2},{height:.2} L {:.2},{height:.2} Z",
        last.0, first.0
    )
}

#[derive(Properties, PartialEq)]
pub struct SparklineProps {
    /// Series values in chronological order
    pub values: Vec<f64>,

    /// Height in pixels
    #[prop_or(180)]
    pub height: u32,

    /// Stroke color
    #[prop_or_else(|| "#67e8f9".to_string())]
    pub color: String,

    /// Stroke width
    #[prop_or(2.0)]
    pub stroke_width: f64,
}

/// Gradient-filled area sparkline used by the dashboard estimator.
#[function_component(Sparkline)]
pub fn sparkline(props: &SparklineProps) -> Html {
    let container_ref = use_node_ref();
    let viewbox_width = use_state(|| 1000.0);

    let viewbox_height = props.height as f64;
    let padding = 4.0;

    {
        let container_ref = container_ref.clone();
        let viewbox_width = viewbox_width.clone();

        use_effect_with(container_ref.clone(), move |container_ref| {
            let listener = container_ref.cast::<HtmlElement>().and_then(|container| {
                // Measure initial width
                let width = container.client_width() as f64;
                if width > 0.0 {
                    viewbox_width.set(width);
                }

                // Track the width across window resizes
                let viewbox_width = viewbox_width.clone();
                Some(EventListener::new(
                    &web_sys::window().unwrap(),
                    "resize",
                    move |_| {
                        let width = container.client_width() as f64;
                        if width > 0.0 {
                            viewbox_width.set(width);
                        }
                    },
                ))
            });

            move || drop(listener)
        });
    }

    let points = scale_points(&props.values, *viewbox_width, viewbox_height, padding);
    let line = line_path(&points);
    let area = area_path(&points, viewbox_height);

    let viewbox = format!("0 0 {} {}", *viewbox_width, viewbox_height);
    let style = format!("width: 100%; height: {}px; display: block;", props.height);

    html! {
        <svg
            ref={container_ref}
            {viewbox}
            preserveAspectRatio="none"
            {style}
            class="sparkline"
        >
            <defs>
                <linearGradient id={GRADIENT_ID} x1="0" y1="0" x2="0" y2="1">
                    <stop offset="5%" stop-color={props.color.clone()} stop-opacity="0.7" />
                    <stop offset="95%" stop-color="#1f2937" stop-opacity="0" />
                </linearGradient>
            </defs>
            <path d={area} fill={format!("url(#{GRADIENT_ID})")} stroke="none" />
            <path
                d={line}
                fill="none"
                stroke={props.color.clone()}
                stroke-width={props.stroke_width.to_string()}
                stroke-linecap="round"
                stroke-linejoin="round"
                vector-effect="non-scaling-stroke"
            />
        </svg>
    }
}
