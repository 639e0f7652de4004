//! Main-thread platform event loop hosting the hotkey dispatcher.
//!
//! On macOS and Windows, OS hotkey presses are delivered through the
//! thread's native message loop, so the dispatcher lives on the main thread
//! inside a `winit` loop. The async runtime talks to it through
//! [`LoopHotkeys`], which ships each request over the loop proxy and awaits
//! the reply.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::{debug, info};
use winit::event::Event;
use winit::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};

use qc_core::ports::{HotkeyBinding, HotkeyError, HotkeyPort};

use super::dispatcher::GlobalHotkeyDispatcher;
use crate::runtime::PlatformEventSender;

type Reply = oneshot::Sender<Result<(), HotkeyError>>;

/// Requests served on the event loop thread.
pub enum HotkeyLoopEvent {
    Register {
        bindings: Vec<HotkeyBinding>,
        reply: Reply,
    },
    UnregisterAll {
        reply: Reply,
    },
    Exit,
}

pub struct HotkeyEventLoop {
    event_loop: EventLoop<HotkeyLoopEvent>,
    dispatcher: GlobalHotkeyDispatcher,
}

impl HotkeyEventLoop {
    /// Build the loop and its dispatcher. Call from the main thread.
    pub fn new(event_tx: PlatformEventSender) -> Result<Self, HotkeyError> {
        let mut builder = EventLoopBuilder::<HotkeyLoopEvent>::with_user_event();
        #[cfg(target_os = "macos")]
        {
            use winit::platform::macos::{ActivationPolicy, EventLoopBuilderExtMacOS};
            builder.with_activation_policy(ActivationPolicy::Accessory);
        }
        let event_loop = builder
            .build()
            .map_err(|e| HotkeyError::Unavailable(format!("event loop: {e}")))?;
        let dispatcher = GlobalHotkeyDispatcher::new(event_tx)?;

        Ok(Self {
            event_loop,
            dispatcher,
        })
    }

    /// A handle usable from any thread. Requests sent after the loop exits
    /// fail with [`HotkeyError::Unavailable`].
    pub fn hotkeys(&self) -> LoopHotkeys {
        LoopHotkeys {
            proxy: Arc::new(Mutex::new(self.event_loop.create_proxy())),
        }
    }

    /// Serve requests until [`LoopHotkeys::exit`] is called. Blocks the
    /// calling thread; the dispatcher is dropped, and its bindings released,
    /// when the loop ends.
    pub fn run(self) -> Result<(), HotkeyError> {
        let Self {
            event_loop,
            mut dispatcher,
        } = self;

        info!("Hotkey event loop running");
        event_loop
            .run(move |event, elwt| match event {
                Event::UserEvent(HotkeyLoopEvent::Register { bindings, reply }) => {
                    send_reply(reply, dispatcher.register(&bindings));
                }
                Event::UserEvent(HotkeyLoopEvent::UnregisterAll { reply }) => {
                    send_reply(reply, dispatcher.unregister_all());
                }
                Event::UserEvent(HotkeyLoopEvent::Exit) => elwt.exit(),
                Event::AboutToWait => elwt.set_control_flow(ControlFlow::Wait),
                _ => {}
            })
            .map_err(|e| HotkeyError::Unavailable(format!("event loop: {e}")))?;
        debug!("Hotkey event loop exited");
        Ok(())
    }
}

fn send_reply(reply: Reply, result: Result<(), HotkeyError>) {
    if reply.send(result).is_err() {
        debug!("Hotkey requester went away before the reply");
    }
}

/// [`HotkeyPort`] backed by a running [`HotkeyEventLoop`].
#[derive(Clone)]
pub struct LoopHotkeys {
    proxy: Arc<Mutex<EventLoopProxy<HotkeyLoopEvent>>>,
}

impl LoopHotkeys {
    /// Ask the event loop to stop. A loop that already exited is ignored.
    pub fn exit(&self) {
        if let Err(err) = self.send(HotkeyLoopEvent::Exit) {
            debug!(error = %err, "Hotkey event loop already gone");
        }
    }

    fn send(&self, event: HotkeyLoopEvent) -> Result<(), HotkeyError> {
        let proxy = self
            .proxy
            .lock()
            .map_err(|_| HotkeyError::Unavailable("event loop proxy poisoned".to_string()))?;
        proxy
            .send_event(event)
            .map_err(|_| HotkeyError::Unavailable("hotkey event loop has exited".to_string()))
    }

    async fn request(&self, make: impl FnOnce(Reply) -> HotkeyLoopEvent) -> Result<(), HotkeyError> {
        let (reply, response) = oneshot::channel();
        self.send(make(reply))?;
        response.await.map_err(|_| {
            HotkeyError::Unavailable("hotkey event loop dropped the request".to_string())
        })?
    }
}

#[async_trait::async_trait]
impl HotkeyPort for LoopHotkeys {
    async fn register(&self, bindings: &[HotkeyBinding]) -> Result<(), HotkeyError> {
        let bindings = bindings.to_vec();
        self.request(move |reply| HotkeyLoopEvent::Register { bindings, reply })
            .await
    }

    async fn unregister_all(&self) -> Result<(), HotkeyError> {
        self.request(|reply| HotkeyLoopEvent::UnregisterAll { reply })
            .await
    }
}
