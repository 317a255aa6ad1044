use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wheel_shared::{ColorScheme, Sector};
use yew::prelude::*;

const CANVAS_SIZE: u32 = 650;
const LABEL_FONT_MAX: u32 = 22;
const LABEL_FONT_MIN: u32 = 6;
// Wheel-frame angle 0 is painted at 12 o'clock, where the pointer sits.
const POINTER_OFFSET: f64 = -PI / 2.0;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub sectors: Vec<Sector>,
    /// Clockwise rotation of the wheel in radians.
    pub rotation: f64,
    pub color_scheme: ColorScheme,
    pub is_spinning: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(
            (props.sectors.clone(), props.rotation, props.color_scheme),
            move |(sectors, rotation, color_scheme)| {
                if let Some(context) = canvas_ref.cast::<HtmlCanvasElement>().and_then(|c| context_2d(&c)) {
                    draw_wheel(&context, sectors, *rotation, *color_scheme);
                }
                || ()
            },
        );
    }

    html! {
        <div class="relative">
            <canvas
                ref={canvas_ref}
                width={CANVAS_SIZE.to_string()}
                height={CANVAS_SIZE.to_string()}
                onclick={props.onclick.clone()}
                class="w-full max-w-[650px] h-auto rounded-full cursor-pointer"
                style={if props.is_spinning {
                    "filter: drop-shadow(0px 5px 20px rgba(130, 100, 255, 0.4));"
                } else {
                    "filter: drop-shadow(0px 5px 15px rgba(0, 0, 0, 0.2));"
                }}
            />
        </div>
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn draw_wheel(context: &CanvasRenderingContext2d, sectors: &[Sector], rotation: f64, color_scheme: ColorScheme) {
    let size = f64::from(CANVAS_SIZE);
    let center = size / 2.0;
    let radius = center - 20.0;

    context.clear_rect(0.0, 0.0, size, size);
    if sectors.is_empty() {
        context.begin_path();
        context.set_fill_style_str("#e5e7eb");
        let _ = context.arc(center, center, radius, 0.0, 2.0 * PI);
        context.fill();
        return;
    }

    context.save();
    let _ = context.translate(center, center);
    let _ = context.rotate(rotation);

    for (i, sector) in sectors.iter().enumerate() {
        context.begin_path();
        context.move_to(0.0, 0.0);
        let _ = context.arc(
            0.0,
            0.0,
            radius,
            sector.start_angle + POINTER_OFFSET,
            sector.end_angle + POINTER_OFFSET,
        );
        context.set_fill_style_str(&color_scheme.color(i, sectors.len()));
        context.fill();

        draw_label(context, sector, radius);
    }

    context.restore();
    draw_pointer(context, center, radius);
}

fn draw_label(context: &CanvasRenderingContext2d, sector: &Sector, radius: f64) {
    let text = &sector.entry.text;
    let arc_length = sector.width() * radius;

    context.save();
    let _ = context.rotate(sector.midpoint() + POINTER_OFFSET);

    // Shrink until the label fits both along the radius and across the arc
    let mut font_size = LABEL_FONT_MAX;
    loop {
        context.set_font(&format!("{}px system-ui", font_size));
        let width = context.measure_text(text).map(|m| m.width()).unwrap_or(0.0);
        let fits = width <= radius * 0.55 && f64::from(font_size) <= arc_length;
        if fits || font_size <= LABEL_FONT_MIN {
            break;
        }
        font_size -= 1;
    }

    context.set_fill_style_str("#111");
    context.set_text_baseline("middle");
    if font_size > 18 {
        context.set_text_align("center");
        let _ = context.translate(radius * 0.6, 0.0);
    } else {
        context.set_text_align("right");
        let _ = context.translate(radius * 0.99, 0.0);
    }
    let _ = context.fill_text(text, 0.0, 0.0);
    context.restore();
}

fn draw_pointer(context: &CanvasRenderingContext2d, center: f64, radius: f64) {
    let tip = center - radius + 18.0;
    context.begin_path();
    context.move_to(center - 14.0, center - radius - 14.0);
    context.line_to(center + 14.0, center - radius - 14.0);
    context.line_to(center, tip);
    context.close_path();
    context.set_fill_style_str("#111");
    context.fill();
}
