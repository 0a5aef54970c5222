//! Browser host binding
//!
//! `DodgeGame` is the handle the host page holds. `start` takes over a canvas,
//! installs listeners and runs a `requestAnimationFrame` chain; `stop` tears
//! all of it down. Listeners only post `InputEvent`s into the engine.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, Window};

use super::input::{InputEvent, key_event};
use crate::audio::AudioManager;
use crate::engine::{Engine, SessionStatus};
use crate::renderer::{CanvasPainter, FrameView};
use crate::settings::Settings;
use crate::sim::{GameEvent, Surface};
use crate::EngineError;

type EventCallback = Rc<RefCell<Option<js_sys::Function>>>;
type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Everything the frame callback and listeners share
struct Shared {
    engine: Engine,
    painter: CanvasPainter,
    audio: AudioManager,
    canvas: HtmlCanvasElement,
    view: FrameView,
}

impl Shared {
    fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let events = self.engine.frame(now_ms);
        self.audio.play_events(&events);
        self.view.time_ms = now_ms;
        self.painter.render(self.engine.state(), &self.view);
        events
    }

    fn fit_to_viewport(&mut self, window: &Window) {
        let (width, height) = viewport_size(window);
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.engine.resize(width, height);
    }
}

/// Viewport size in CSS pixels
fn viewport_size(window: &Window) -> (f32, f32) {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (
        read(window.inner_width()) as f32,
        read(window.inner_height()) as f32,
    )
}

/// Hand events to the host callback; never called while `Shared` is borrowed
fn notify(callback: &EventCallback, events: &[GameEvent], score: u32) {
    let Some(callback) = callback.borrow().clone() else {
        return;
    };
    for event in events {
        let name = JsValue::from_str(event.name());
        if let Err(err) = callback.call2(&JsValue::NULL, &name, &JsValue::from(score)) {
            log::warn!("Event callback threw: {:?}", err);
        }
    }
}

/// An attached event listener; detaches itself when dropped
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, EngineError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        // preventDefault must work for rise keys and touch
        options.set_passive(false);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|_| EngineError::Listener(kind))?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Self-rescheduling animation frame chain
struct FrameLoop {
    window: Window,
    closure: FrameClosure,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    fn start(
        window: &Window,
        shared: Rc<RefCell<Shared>>,
        on_event: EventCallback,
    ) -> Result<Self, EngineError> {
        let closure: FrameClosure = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let closure_cb = Rc::clone(&closure);
        let handle_cb = Rc::clone(&handle);
        let window_cb = window.clone();
        *closure.borrow_mut() = Some(Closure::new(move |now: f64| {
            handle_cb.set(None);
            let (events, score) = {
                let mut shared = shared.borrow_mut();
                let events = shared.frame(now);
                (events, shared.engine.score())
            };
            notify(&on_event, &events, score);

            // Empty once the session has been stopped
            if let Some(cb) = closure_cb.borrow().as_ref() {
                match window_cb.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => handle_cb.set(Some(id)),
                    Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
                }
            }
        }));

        let id = {
            let borrowed = closure.borrow();
            let cb = borrowed
                .as_ref()
                .ok_or_else(|| EngineError::Js("frame closure missing".into()))?;
            window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(|err| EngineError::Js(format!("{err:?}")))?
        };
        handle.set(Some(id));

        Ok(Self {
            window: window.clone(),
            closure,
            handle,
        })
    }

    /// Cancel the pending frame and break the closure's self-reference
    fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.closure.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A running session bound to one canvas
struct WebSession {
    shared: Rc<RefCell<Shared>>,
    frame_loop: FrameLoop,
    listeners: Vec<Listener>,
}

impl WebSession {
    fn start(
        canvas: HtmlCanvasElement,
        settings: Settings,
        on_event: EventCallback,
    ) -> Result<Self, EngineError> {
        let window = web_sys::window().ok_or(EngineError::NoWindow)?;
        let painter = CanvasPainter::new(&canvas)?;

        let (width, height) = viewport_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let view = FrameView {
            time_ms: 0.0,
            reduced_motion: settings.reduced_motion,
            mode_label: settings.mode_label(),
        };
        let audio = AudioManager::new(settings.effective_volume());
        let mut engine = Engine::new(settings, Surface::new(width, height), js_sys::Date::now() as u64);
        engine.start();

        let shared = Rc::new(RefCell::new(Shared {
            engine,
            painter,
            audio,
            canvas: canvas.clone(),
            view,
        }));

        let listeners = install_listeners(&window, &canvas, &shared)?;
        let frame_loop = FrameLoop::start(&window, Rc::clone(&shared), on_event)?;
        let _ = canvas.focus();

        log::info!("Session started ({}x{})", width, height);
        Ok(Self {
            shared,
            frame_loop,
            listeners,
        })
    }
}

impl Drop for WebSession {
    fn drop(&mut self) {
        self.frame_loop.cancel();
        self.listeners.clear();
        if let Ok(shared) = self.shared.try_borrow() {
            shared.audio.close();
        }
        log::info!("Session stopped");
    }
}

fn install_listeners(
    window: &Window,
    canvas: &HtmlCanvasElement,
    shared: &Rc<RefCell<Shared>>,
) -> Result<Vec<Listener>, EngineError> {
    let mut listeners = Vec::with_capacity(6);

    {
        let shared = Rc::clone(shared);
        let window_cb = window.clone();
        listeners.push(Listener::attach(window, "resize", move |_event: Event| {
            shared.borrow_mut().fit_to_viewport(&window_cb);
        })?);
    }

    for (kind, pressed) in [("keydown", true), ("keyup", false)] {
        let shared = Rc::clone(shared);
        listeners.push(Listener::attach(window, kind, move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some((input, suppress)) = key_event(&key.code(), pressed) {
                if suppress {
                    event.prevent_default();
                }
                let mut shared = shared.borrow_mut();
                if input == InputEvent::RisePressed {
                    shared.audio.resume();
                }
                shared.engine.post(input);
            }
        })?);
    }

    {
        let shared = Rc::clone(shared);
        listeners.push(Listener::attach(canvas, "pointerdown", move |event: Event| {
            event.prevent_default();
            let mut shared = shared.borrow_mut();
            shared.audio.resume();
            shared.engine.post(InputEvent::RisePressed);
        })?);
    }

    {
        let shared = Rc::clone(shared);
        listeners.push(Listener::attach(window, "pointerup", move |_event: Event| {
            shared.borrow_mut().engine.post(InputEvent::RiseReleased);
        })?);
    }

    {
        let shared = Rc::clone(shared);
        listeners.push(Listener::attach(canvas, "click", move |_event: Event| {
            shared.borrow_mut().engine.post(InputEvent::Click);
        })?);
    }

    Ok(listeners)
}

/// Embeddable game handle exposed to the host page
#[wasm_bindgen]
#[derive(Default)]
pub struct DodgeGame {
    session: Option<WebSession>,
    on_event: EventCallback,
}

#[wasm_bindgen]
impl DodgeGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DodgeGame {
        DodgeGame::default()
    }

    /// Take over `canvas` and begin a session; replaces any running session
    pub fn start(&mut self, canvas: HtmlCanvasElement, config: JsValue) -> Result<(), JsValue> {
        self.stop();
        let settings = Settings::from_js(&config)?;
        self.session = Some(WebSession::start(canvas, settings, Rc::clone(&self.on_event))?);
        Ok(())
    }

    /// Tear down the session; safe to call at any time
    pub fn stop(&mut self) {
        self.session.take();
    }

    /// Current score (0 without a session)
    pub fn score(&self) -> u32 {
        self.with_engine(|engine| engine.score()).unwrap_or(0)
    }

    /// `stopped`, `ready`, `running`, `paused` or `ended`
    pub fn status(&self) -> String {
        self.with_engine(|engine| engine.status())
            .unwrap_or(SessionStatus::Stopped)
            .as_str()
            .to_string()
    }

    /// JSON snapshot of the session, `null` without one
    pub fn snapshot(&self) -> Result<String, JsValue> {
        let snapshot = self.with_engine(|engine| engine.snapshot());
        serde_json::to_string(&snapshot).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Register `callback(eventName, score)`; pass nothing to clear
    #[wasm_bindgen(js_name = setEventCallback)]
    pub fn set_event_callback(&mut self, callback: Option<js_sys::Function>) {
        *self.on_event.borrow_mut() = callback;
    }
}

impl DodgeGame {
    fn with_engine<T>(&self, f: impl FnOnce(&Engine) -> T) -> Option<T> {
        let session = self.session.as_ref()?;
        let shared = session.shared.try_borrow().ok()?;
        Some(f(&shared.engine))
    }
}
