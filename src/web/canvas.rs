// canvas.rs - Particle background on a full-viewport 2D canvas
//
// `Animator` owns the requestAnimationFrame loop. Starting it builds a fresh
// particle set; stopping it cancels the pending frame and drops the set.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::config::FieldConfig;
use crate::error::{HostError, HostResult};
use crate::field::{self, ParticleField, Surface};

pub const CANVAS_ID: &str = "neural-bg";

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    node_color: String,
    link_color: String,
    line_width: f64,
}

impl CanvasSurface {
    pub fn attach(canvas: HtmlCanvasElement, cfg: &FieldConfig) -> HostResult<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(HostError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| HostError::NoContext)?;

        Ok(Self {
            canvas,
            ctx,
            node_color: cfg.node_color.clone(),
            link_color: format!("rgb({})", cfg.link_rgb),
            line_width: cfg.line_width,
        })
    }

    pub fn resize(&self, w: u32, h: u32) {
        self.canvas.set_width(w);
        self.canvas.set_height(h);
    }

    pub fn width(&self) -> u32 { self.canvas.width() }
    pub fn height(&self) -> u32 { self.canvas.height() }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        let (w, h) = (self.width() as f64, self.height() as f64);
        self.ctx.set_global_alpha(1.0);
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(&self.node_color);
        self.ctx.set_stroke_style_str(&self.link_color);
        self.ctx.set_line_width(self.line_width);
    }

    fn dot(&mut self, x: f32, y: f32, radius: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x as f64, y as f64, radius as f64, 0.0, std::f64::consts::TAU);
        self.ctx.fill();
    }

    // Opacity through global alpha keeps the stroke style constant, so no
    // per-link colour strings are built.
    fn link(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, opacity: f32) {
        self.ctx.set_global_alpha(opacity as f64);
        self.ctx.begin_path();
        self.ctx.move_to(x0 as f64, y0 as f64);
        self.ctx.line_to(x1 as f64, y1 as f64);
        self.ctx.stroke();
    }
}

struct Running {
    field: ParticleField,
    surface: CanvasSurface,
}

pub struct Animator {
    window: Window,
    cfg: FieldConfig,
    running: Rc<RefCell<Option<Running>>>,
    handle: Rc<Cell<Option<i32>>>,
    frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

impl Animator {
    pub fn new(window: Window, cfg: FieldConfig) -> Self {
        Self {
            window,
            cfg,
            running: Rc::new(RefCell::new(None)),
            handle: Rc::new(Cell::new(None)),
            frame: Rc::new(RefCell::new(None)),
            on_resize: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.borrow().is_some()
    }

    /// Start (or restart with a fresh particle set). A page without the
    /// canvas is left alone.
    pub fn start(&mut self) -> HostResult<()> {
        self.stop();

        let Some(canvas) = self.find_canvas()? else {
            log::warn!("{}", HostError::NoCanvas(CANVAS_ID.to_string()));
            return Ok(());
        };
        let surface = CanvasSurface::attach(canvas, &self.cfg)?;
        let (w, h) = viewport(&self.window);
        surface.resize(w, h);

        let mut rng = field::seed((js_sys::Math::random() * u32::MAX as f64) as u32);
        let field = ParticleField::new(&self.cfg, w as f32, h as f32, &mut rng);
        log::info!("background: {} particles on {}x{}", field.len(), w, h);

        *self.running.borrow_mut() = Some(Running { field, surface });
        self.install_frame();
        self.install_resize()?;
        self.request();
        Ok(())
    }

    /// Cancel the pending frame and drop the particle set.
    pub fn stop(&mut self) {
        if let Some(id) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        if self.running.borrow_mut().take().is_some() {
            log::debug!("background stopped");
        }
    }

    fn find_canvas(&self) -> HostResult<Option<HtmlCanvasElement>> {
        let doc = self.window.document().ok_or(HostError::NoDocument)?;
        Ok(doc
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok()))
    }

    fn request(&self) {
        if let Some(cb) = self.frame.borrow().as_ref() {
            match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => self.handle.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
            }
        }
    }

    fn install_frame(&self) {
        if self.frame.borrow().is_some() {
            return;
        }

        let window = self.window.clone();
        let running = self.running.clone();
        let handle = self.handle.clone();
        let frame = self.frame.clone();

        *self.frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle.set(None);
            {
                let mut running = running.borrow_mut();
                let Some(run) = running.as_mut() else { return };
                run.field.frame(&mut run.surface);
            }

            if let Some(cb) = frame.borrow().as_ref() {
                handle.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            }
        }) as Box<dyn FnMut()>));
    }

    fn install_resize(&mut self) -> HostResult<()> {
        if self.on_resize.is_some() {
            return Ok(());
        }

        let window = self.window.clone();
        let running = self.running.clone();
        let cb = Closure::wrap(Box::new(move || {
            let (w, h) = viewport(&window);
            if let Some(run) = running.borrow_mut().as_mut() {
                run.surface.resize(w, h);
                run.field.resize(w as f32, h as f32);
            }
        }) as Box<dyn FnMut()>);

        self.window
            .add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())?;
        self.on_resize = Some(cb);
        Ok(())
    }
}

fn viewport(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
    (dim(window.inner_width()), dim(window.inner_height()))
}
