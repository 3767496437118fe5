// web/ - Browser host
//
// Wires the sequencer and the background to the live page: one setTimeout
// armed for the sequencer's next deadline, click/Enter for "generate", and
// the requestAnimationFrame loop once the reveal is done.

mod canvas;
mod dom;

pub use canvas::{Animator, CanvasSurface};
pub use dom::DomPage;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, Window};

use crate::config::{Millis, PageConfig};
use crate::error::{HostError, HostResult};
use crate::reveal::{Page, Progress, Sequencer};

/// Optional `<script type="application/json">` block overriding defaults.
const CONFIG_ID: &str = "reveal-config";

struct Host {
    window: Window,
    seq: RefCell<Sequencer<DomPage>>,
    animator: RefCell<Animator>,
    timer: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

thread_local! {
    static HOST: RefCell<Option<Rc<Host>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("syllabus reveal initializing");

    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let doc = window.document().ok_or(HostError::NoDocument)?;

    if doc.ready_state() == "loading" {
        let cb = Closure::once_into_js(move || {
            if let Err(e) = boot() {
                log::error!("init error: {e}");
            }
        });
        doc.add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref())?;
        return Ok(());
    }

    boot()?;
    Ok(())
}

/// The "generate" action, for pages that wire their own control.
#[wasm_bindgen]
pub fn generate() {
    with_host(|host| {
        let accepted = host.seq.borrow_mut().trigger(now(&host.window));
        if accepted {
            pump(host);
        }
    });
}

/// Jump straight to the finished page with the background running.
#[wasm_bindgen]
pub fn skip_intro() {
    with_host(|host| {
        let skipped = host.seq.borrow_mut().skip();
        if skipped {
            host.cancel_timer();
            host.start_background();
        }
    });
}

fn with_host(f: impl FnOnce(&Rc<Host>)) {
    let host = HOST.with(|h| h.borrow().clone());
    match host {
        Some(host) => f(&host),
        None => log::warn!("reveal not initialized yet"),
    }
}

fn boot() -> HostResult<()> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let page = DomPage::current()?;
    let config = load_config(&page);

    let host = Rc::new(Host {
        seq: RefCell::new(Sequencer::new(page.clone(), config.reveal)),
        animator: RefCell::new(Animator::new(window.clone(), config.field)),
        timer: Cell::new(None),
        tick: RefCell::new(None),
        window,
    });

    let weak = Rc::downgrade(&host);
    *host.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Some(host) = weak.upgrade() {
            host.timer.set(None);
            pump(&host);
        }
    }) as Box<dyn FnMut()>));

    bind_controls(&host, &page)?;
    HOST.with(|h| *h.borrow_mut() = Some(host.clone()));

    host.seq.borrow_mut().start(now(&host.window));
    pump(&host);
    Ok(())
}

fn load_config(page: &DomPage) -> PageConfig {
    let Some(block) = page.by_id(CONFIG_ID) else {
        return PageConfig::default();
    };
    let json = page.text(&block);
    match PageConfig::from_json(&json) {
        Ok(cfg) => {
            log::info!("using page config from #{CONFIG_ID}");
            cfg
        }
        Err(e) => {
            log::warn!("{}, using defaults", HostError::from(e));
            PageConfig::default()
        }
    }
}

fn bind_controls(host: &Rc<Host>, page: &DomPage) -> HostResult<()> {
    if let Some(button) = host.seq.borrow().regions().generate_button.clone() {
        let click = Closure::wrap(Box::new(generate) as Box<dyn FnMut()>);
        button.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();
    }

    let keypress = Closure::wrap(Box::new(move |ev: KeyboardEvent| {
        if ev.key() == "Enter" {
            generate();
        }
    }) as Box<dyn FnMut(_)>);
    page.document()
        .add_event_listener_with_callback("keypress", keypress.as_ref().unchecked_ref())?;
    keypress.forget();
    Ok(())
}

/// Fire due work, start the background if the reveal just finished, and
/// re-arm the timer for whatever is next.
fn pump(host: &Rc<Host>) {
    host.cancel_timer();
    let now = now(&host.window);

    let progress = host.seq.borrow_mut().advance(now);
    if progress == Progress::Finished {
        host.start_background();
    }

    let next = host.seq.borrow().next_deadline();
    if let Some(due) = next {
        host.arm(due.saturating_sub(now));
    }
}

impl Host {
    fn arm(&self, delay: Millis) {
        let tick = self.tick.borrow();
        let Some(cb) = tick.as_ref() else { return };
        let delay = delay.min(i32::MAX as Millis) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), delay)
        {
            Ok(id) => self.timer.set(Some(id)),
            Err(e) => log::error!("setTimeout failed: {e:?}"),
        }
    }

    fn cancel_timer(&self) {
        if let Some(id) = self.timer.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }

    /// Starts the particle background unless it is already running.
    fn start_background(&self) {
        let mut animator = self.animator.borrow_mut();
        if animator.is_running() {
            return;
        }
        if let Err(e) = animator.start() {
            log::error!("background failed to start: {e}");
        }
    }
}

fn now(window: &Window) -> Millis {
    window.performance().map(|p| p.now()).unwrap_or(0.0) as Millis
}
