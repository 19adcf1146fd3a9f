// web.rs - Mount the surface onto a page canvas
//
// Everything runs on the page's single thread: the frame callback, resize
// and pointer handlers share the world through Rc<RefCell<_>> and never
// overlap. `RippleMount` owns every registration; dropping it (or calling
// `unmount`) removes the listeners and cancels the pending frame together.
// The window is the `EventHost` behind those registrations.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData, MouseEvent, TouchEvent,
    Window,
};

use crate::config::{GLYPH, GLYPH_FONT, RippleParams};
use crate::host::{EventHost, FrameLoop, Registrations};
use crate::sim::{Mask, RippleWorld};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

struct Surface {
    world: RippleWorld,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Surface {
    fn frame(&mut self) {
        self.world.tick();

        let (w, h) = (self.world.width(), self.world.height());
        if w == 0 || h == 0 { return; }

        let pixels = self.world.raster().pixels();
        match ImageData::new_with_u8_clamped_array_and_sh(Clamped(pixels), w, h) {
            Ok(img) => {
                if let Err(e) = self.ctx.put_image_data(&img, 0.0, 0.0) {
                    log::debug!("putImageData failed: {:?}", e);
                }
            }
            Err(e) => log::debug!("ImageData failed: {:?}", e),
        }
    }

    fn resize(&mut self, w: u32, h: u32) {
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.world.resize(w, h);
        log::debug!("ripple surface resized to {}x{}", w, h);
    }
}

type JsCallback = Box<dyn AsRef<JsValue>>;

fn js_fn(cb: &JsCallback) -> &Function {
    AsRef::<JsValue>::as_ref(&**cb).unchecked_ref()
}

impl EventHost for Window {
    type Callback = JsCallback;
    type Error = JsValue;

    fn listen(&self, event: &'static str, cb: &JsCallback) -> Result<(), JsValue> {
        self.add_event_listener_with_callback(event, js_fn(cb))
    }

    fn unlisten(&self, event: &'static str, cb: &JsCallback) {
        let _ = self.remove_event_listener_with_callback(event, js_fn(cb));
    }

    fn request_frame(&self, cb: &JsCallback) -> Result<i32, JsValue> {
        self.request_animation_frame(js_fn(cb))
    }

    fn cancel_frame(&self, id: i32) {
        let _ = self.cancel_animation_frame(id);
    }
}

/// Live registration of the surface on a page
#[wasm_bindgen]
pub struct RippleMount {
    regs: Registrations<Window>,
}

#[wasm_bindgen]
impl RippleMount {
    /// Stop the loop and detach every listener
    pub fn unmount(mut self) {
        self.regs.release();
        log::info!("ripple surface unmounted");
    }
}

/// Start the surface on `canvas`. Returns nothing (and does nothing) when
/// the canvas or its 2D context is unavailable.
#[wasm_bindgen]
pub fn mount(canvas: Option<HtmlCanvasElement>) -> Option<RippleMount> {
    let mounted = try_mount(canvas);
    match &mounted {
        Some(_) => log::info!("ripple surface mounted"),
        None => log::debug!("ripple surface unavailable, skipping"),
    }
    mounted
}

fn try_mount(canvas: Option<HtmlCanvasElement>) -> Option<RippleMount> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let canvas = canvas?;
    let ctx = context_2d(&canvas)?;

    let params = RippleParams::default();
    let mask = glyph_mask(&document, &params).unwrap_or_else(|| {
        log::debug!("glyph raster unavailable, running without mask");
        Mask::empty(params.width, params.height)
    });

    let (w, h) = viewport_size(&window);
    canvas.set_width(w);
    canvas.set_height(h);

    let surface = Rc::new(RefCell::new(Surface {
        world: RippleWorld::with_mask(params, mask, w, h),
        canvas,
        ctx,
    }));

    let on_resize = {
        let surface = surface.clone();
        let window = window.clone();
        Closure::<dyn FnMut()>::new(move || {
            let (w, h) = viewport_size(&window);
            surface.borrow_mut().resize(w, h);
        })
    };

    let on_pointer = {
        let surface = surface.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
            surface.borrow_mut().world.pointer(e.client_x() as f32, e.client_y() as f32);
        })
    };

    let on_touch = {
        let surface = surface.clone();
        Closure::<dyn FnMut(TouchEvent)>::new(move |e: TouchEvent| {
            // No active touch points: nothing to disturb
            let Some(t) = e.touches().get(0) else { return };
            surface.borrow_mut().world.pointer(t.client_x() as f32, t.client_y() as f32);
        })
    };

    let frames: Rc<FrameLoop<JsCallback>> = FrameLoop::new();
    {
        let again = frames.clone();
        let window = window.clone();
        frames.set(Box::new(Closure::<dyn FnMut()>::new(move || {
            surface.borrow_mut().frame();

            // Re-arm; after teardown the slot is empty and the loop ends
            if let Err(e) = again.arm(&window) {
                log::debug!("requestAnimationFrame failed: {:?}", e);
            }
        })));
    }

    // On failure `regs` drops here and undoes any partial registration
    let mut regs = Registrations::new(window, frames);
    let registered = (|| -> Result<(), JsValue> {
        regs.listen("resize", Box::new(on_resize))?;
        regs.listen("mousemove", Box::new(on_pointer))?;
        regs.listen("touchmove", Box::new(on_touch))?;
        regs.start()?;
        Ok(())
    })();
    if let Err(e) = registered {
        log::debug!("listener registration failed: {:?}", e);
        return None;
    }

    Some(RippleMount { regs })
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn viewport_size(window: &Window) -> (u32, u32) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w.max(0.0) as u32, h.max(0.0) as u32)
}

/// Rasterize the glyph offscreen at grid resolution and threshold its alpha
fn glyph_mask(document: &Document, params: &RippleParams) -> Option<Mask> {
    let (w, h) = (params.width, params.height);

    let off: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
    off.set_width(w as u32);
    off.set_height(h as u32);
    let ctx = context_2d(&off)?;

    ctx.set_fill_style_str("#fff");
    ctx.set_font(GLYPH_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(GLYPH, w as f64 / 2.0, h as f64 / 2.0).ok()?;

    let img = ctx.get_image_data(0.0, 0.0, w as f64, h as f64).ok()?;
    let data = img.data();
    Some(Mask::from_rgba(w, h, &data.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn missing_canvas_mounts_nothing() {
        assert!(mount(None).is_none());
    }

    #[wasm_bindgen_test]
    fn unmount_clears_frame_and_listeners() {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().dyn_into().unwrap();

        let mut mounted = mount(Some(canvas)).expect("canvas has a 2d context");
        assert_eq!(mounted.regs.listener_count(), 3);
        assert!(mounted.regs.frames().is_armed());

        mounted.regs.release();
        assert_eq!(mounted.regs.listener_count(), 0);
        assert!(!mounted.regs.frames().is_armed());
        assert!(mounted.regs.frames().is_stopped());
    }
}
