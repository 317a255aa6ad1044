mod wheel_canvas;
mod wheel_utils;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::window;
use wheel_shared::{uniform, SpinStart, WheelError, WheelSession};
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

use crate::styles;
use wheel_canvas::WheelCanvas;
use wheel_utils::{load_state, save_state, SpinButton, TagToggles, WinnerDisplay};

type FrameLoop = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(frame_loop: &FrameLoop) {
    let Some(window) = window() else {
        return;
    };
    if let Some(callback) = frame_loop.borrow().as_ref() {
        if let Err(err) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {:?}", err);
        }
    }
}

/// Drives the session's animator once per animation frame until the spin is
/// done. The closure lives in `frame_loop`, owned by the page, and only holds
/// a weak handle back to it.
fn run_spin_loop(frame_loop: &FrameLoop, session: Rc<RefCell<WheelSession>>, redraw: UseForceUpdateHandle) {
    let weak_loop: Weak<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::downgrade(frame_loop);
    let mut started_at: Option<f64> = None;

    let callback = Closure::wrap(Box::new(move |timestamp: f64| {
        let origin = *started_at.get_or_insert(timestamp);
        let frame = session.borrow_mut().advance(timestamp - origin);
        redraw.force_update();

        match frame {
            Some(frame) if !frame.done => {
                if let Some(frame_loop) = weak_loop.upgrade() {
                    request_frame(&frame_loop);
                }
            }
            Some(frame) => {
                if let Some(winner) = frame.winner {
                    log::info!("Wheel landed on {:?}", winner.text);
                }
                save_state(&session.borrow());
            }
            None => {}
        }
    }) as Box<dyn FnMut(f64)>);

    *frame_loop.borrow_mut() = Some(callback);
    request_frame(frame_loop);
}

#[function_component(WheelPage)]
pub fn wheel_page() -> Html {
    let session = use_mut_ref(|| WheelSession::restore(load_state().as_deref()));
    let frame_loop: FrameLoop = use_mut_ref(|| None);
    let redraw = use_force_update();
    let error_message = use_state(String::new);

    let start_spin = {
        let session = session.clone();
        let frame_loop = frame_loop.clone();
        let redraw = redraw.clone();
        let error_message = error_message.clone();
        Callback::from(move |_: MouseEvent| {
            let mut rng = rand::thread_rng();
            let started = session.borrow_mut().spin(uniform(&mut rng));
            match started {
                Ok(SpinStart::Started { winner, .. }) => {
                    log::debug!("Spin started, landing on {:?}", winner.text);
                    error_message.set(String::new());
                    run_spin_loop(&frame_loop, session.clone(), redraw.clone());
                }
                Ok(SpinStart::AlreadySpinning) => {}
                Err(WheelError::EmptySelection) => {
                    error_message.set("Nothing to spin: add an entry or enable a tag.".to_string());
                }
                Err(err) => {
                    log::error!("Spin failed: {}", err);
                    error_message.set(err.to_string());
                }
            }
            redraw.force_update();
        })
    };

    let on_toggle_tag = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |tag: String| {
            session.borrow_mut().toggle_tag(&tag);
            save_state(&session.borrow());
            redraw.force_update();
        })
    };

    let on_new_wheel = {
        let session = session.clone();
        let redraw = redraw.clone();
        let error_message = error_message.clone();
        // a pending frame sees an idle session and stops on its own
        Callback::from(move |_: MouseEvent| {
            session.borrow_mut().reset();
            save_state(&session.borrow());
            error_message.set(String::new());
            redraw.force_update();
        })
    };

    let current = session.borrow();
    let summary = current.summary();
    let tags: Vec<(String, bool)> = current
        .tag_universe()
        .into_iter()
        .map(|tag| {
            let enabled = current.tags().is_enabled(&tag);
            (tag, enabled)
        })
        .collect();
    let can_spin = !current.active_entries().is_empty();
    let winner = current.last_winner().map(|w| w.text.clone());
    let under_pointer = match current.pointer_entry() {
        Ok(entry) => entry.map(|e| e.text),
        Err(err) => {
            log::error!("{}", err);
            None
        }
    };

    html! {
        <div class={styles::CONTAINER}>
            <div class="max-w-3xl mx-auto py-8">
                <h1 class={classes!(styles::TEXT_H1, "mb-6", "text-center")}>{"Wheel"}</h1>
                <div class={classes!(styles::CARD, "space-y-6")}>
                    <WheelCanvas
                        sectors={current.layout()}
                        rotation={current.angle()}
                        color_scheme={current.settings().color_scheme}
                        is_spinning={current.is_spinning()}
                        onclick={start_spin.clone()}
                    />
                    if let Some(text) = under_pointer.filter(|_| !current.is_spinning()) {
                        <p class={classes!(styles::TEXT_SMALL, "text-center")}>{format!("Pointer: {}", text)}</p>
                    }
                    <div class="flex justify-center">
                        <div class="w-full max-w-[300px]">
                            <SpinButton
                                is_spinning={current.is_spinning()}
                                can_spin={can_spin}
                                onclick={start_spin}
                            />
                        </div>
                    </div>
                    if !(*error_message).is_empty() {
                        <p class={classes!(styles::TEXT_ERROR, "text-center")}>{&*error_message}</p>
                    }
                    <TagToggles tags={tags} on_toggle={on_toggle_tag} />
                    <p class={classes!(styles::TEXT_BODY, "text-center")}>
                        {format!("{} entries, total weight {}", summary.entries, summary.total_weight)}
                    </p>
                    <WinnerDisplay winner={winner} />
                    <div class="flex justify-center">
                        <button class={styles::BUTTON_SECONDARY} onclick={on_new_wheel}>
                            {"New wheel"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
