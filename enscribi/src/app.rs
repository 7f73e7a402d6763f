//! Application orchestrator.
//!
//! `App` builds the keyboard: the outer layout renderer, one recognizer
//! shared by every slot, the input slots swallowed into `input/1`..`input/N`,
//! the key injector and the keyboard-mode listener. Afterwards it is a pure
//! dispatcher: every host event goes through [`App::dispatch`], one at a
//! time, in arrival order.

use crate::config::AppConfig;
use enscribi_core::{
    input_part, smart, ClientMessage, Dispatch, InputSlot, KeyInjector, KeyboardHost,
    KeyboardMode, ModeListener, Notifier, Recognizer, Renderer, Result, SharedRenderer, Signal,
    SlotEvent, SmartObject, Stroke, Surface, Visual, VkbdAtoms, WindowHost,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info, trace, warn};

/// Everything the host event loop can deliver to the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Signal raised by the renderer of slot `slot` (0-based).
    Slot { slot: usize, signal: Signal },
    /// Signal raised by the outer layout.
    Layout(Signal),
    /// Ink drawn on the canvas of slot `slot`.
    Stroke { slot: usize, stroke: Stroke },
    ClientMessage(ClientMessage),
    /// The keyboard window changed size.
    Resized { width: i32, height: i32 },
}

pub struct App<H> {
    // Field order is drop order: slots go before the recognizer they use.
    slots: Vec<InputSlot>,
    layout: SharedRenderer,
    recognizer: Rc<dyn Recognizer>,
    injector: KeyInjector<H>,
    listener: ModeListener,
    modes: Notifier<KeyboardMode>,
    config: AppConfig,
}

impl<H> App<H>
where
    H: KeyboardHost + WindowHost + 'static,
{
    pub fn new(
        config: AppConfig,
        surface: &mut dyn Surface,
        host: Rc<RefCell<H>>,
        recognizer: Rc<dyn Recognizer>,
    ) -> Result<Self> {
        config.validate()?;
        let class = smart::register();
        let base = config.base();
        let theme = base
            .theme_find(&base.theme)
            .unwrap_or_else(|| PathBuf::from(&base.theme));

        let mut layout = surface.add_renderer(&theme, &config.layout_group)?;
        layout.move_to(0, 0);
        layout.resize(config.window.width, config.window.height);
        layout.show();
        let layout: SharedRenderer = Rc::new(RefCell::new(layout));

        let injector = KeyInjector::new(Rc::clone(&host));
        let mut slots = Vec::with_capacity(config.slot_count);
        for n in 1..=config.slot_count {
            let mut slot = InputSlot::create(class, surface, base, Some(&layout))?;
            slot.set_recognizer(Rc::clone(&recognizer));

            let injector = injector.clone();
            slot.subscribe(move |event| match event {
                SlotEvent::SelectionConfirmed(text) => {
                    injector.inject_selection(text);
                }
            });

            let part = input_part(n);
            layout.borrow_mut().swallow(&part)?;
            slots.push(slot);
        }

        let listener = {
            let mut host = host.borrow_mut();
            host.configure_window(&config.window.setup())?;
            let atoms = VkbdAtoms::intern(&mut *host);
            ModeListener::new(host.window_id(), atoms)
        };

        let mut app = Self {
            slots,
            layout,
            recognizer,
            injector,
            listener,
            modes: Notifier::new(),
            config,
        };
        app.layout_slots();
        for slot in &mut app.slots {
            slot.show();
        }

        info!(
            slots = app.slots.len(),
            recognizer = app.recognizer.name(),
            window = ?app.listener.window(),
            "keyboard ready"
        );
        Ok(app)
    }

    /// Subscribe to keyboard modes requested by the window manager.
    pub fn subscribe_modes<F>(&mut self, callback: F)
    where
        F: FnMut(&KeyboardMode) + 'static,
    {
        self.modes.subscribe(callback);
    }

    pub fn run<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = AppEvent>,
    {
        for event in events {
            self.dispatch(event);
        }
    }

    pub fn dispatch(&mut self, event: AppEvent) {
        trace!(?event, "dispatch");
        match event {
            AppEvent::Slot { slot, signal } => match self.slots.get_mut(slot) {
                Some(s) => s.handle_signal(&signal),
                None => warn!(slot, ?signal, "signal for unknown slot ignored"),
            },
            AppEvent::Layout(signal) => self.on_layout_signal(signal),
            AppEvent::Stroke { slot, stroke } => match self.slots.get_mut(slot) {
                Some(s) => {
                    s.add_stroke(stroke);
                }
                None => warn!(slot, "stroke for unknown slot ignored"),
            },
            AppEvent::ClientMessage(msg) => {
                self.on_client_message(&msg);
            }
            AppEvent::Resized { width, height } => self.resize(width, height),
        }
    }

    fn on_layout_signal(&mut self, signal: Signal) {
        match signal {
            Signal::KeyPressed(key) => {
                self.injector.press_named(&key);
            }
            Signal::ResultSend => {
                self.flush_all();
            }
            Signal::CandidatesUpdated | Signal::ResultFinished => {
                trace!(?signal, "slot signal raised on layout ignored");
            }
        }
    }

    /// Force every slot to hand over its current result.
    ///
    /// Returns the results that were forwarded, in slot order.
    pub fn flush_all(&mut self) -> Vec<String> {
        let flushed: Vec<String> = self
            .slots
            .iter_mut()
            .filter_map(InputSlot::send_result)
            .collect();
        debug!(count = flushed.len(), "flushed slots");
        flushed
    }

    /// Classify a client message and notify mode subscribers if it was ours.
    ///
    /// The message is never consumed: the caller keeps dispatching it to
    /// other handlers whatever this returns.
    pub fn on_client_message(&mut self, msg: &ClientMessage) -> Dispatch {
        let dispatch = self.listener.on_client_message(msg);
        if let Dispatch::Handled(mode) = dispatch {
            info!(%mode, "keyboard mode requested");
            self.modes.emit(&mode);
        }
        dispatch
    }

    /// Resize the layout and move every slot onto its part.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.layout.borrow_mut().resize(width, height);
        self.layout_slots();
    }

    fn layout_slots(&mut self) {
        let layout = self.layout.borrow();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let Some(geometry) = layout.part_geometry(&input_part(i + 1)) else {
                continue;
            };
            slot.move_to(geometry.x, geometry.y);
            slot.resize(geometry.width, geometry.height);
        }
    }

    pub fn slots(&self) -> &[InputSlot] {
        &self.slots
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut InputSlot> {
        self.slots.get_mut(index)
    }

    pub fn layout(&self) -> &SharedRenderer {
        &self.layout
    }

    pub fn injector(&self) -> &KeyInjector<H> {
        &self.injector
    }

    pub fn listener(&self) -> &ModeListener {
        &self.listener
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Destroy every slot, then release the recognizer.
    pub fn shutdown(mut self) {
        for slot in &mut self.slots {
            slot.destroy();
        }
        self.slots.clear();
        let users = Rc::strong_count(&self.recognizer) - 1;
        info!(
            recognizer = self.recognizer.name(),
            other_users = users,
            "slots destroyed, releasing recognizer"
        );
    }
}
