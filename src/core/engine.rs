//! Host loop driving the game through per-frame callbacks
//!
//! The winit event loop plays the role of the host runtime: it owns the
//! window, forwards device edges to the game the moment they arrive and runs
//! one `update` per redraw.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::core::Time;
use crate::ecs::World;
use crate::input::{Input, Trigger};

/// Window settings for the host loop
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: String::from("Gameplay"),
            width: 1280,
            height: 720,
        }
    }
}

impl EngineConfig {
    /// Replace the window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replace the initial window size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Lifecycle callbacks the host invokes.
///
/// Order within one frame: any number of `on_input_edge` calls as devices
/// report presses, then exactly one `update`.
pub trait Game: 'static {
    /// Once, after the window exists
    fn init(&mut self, engine: &mut EngineContext);

    /// Once per frame
    fn update(&mut self, engine: &mut EngineContext);

    /// Synchronously on every fresh key or mouse press
    fn on_input_edge(&mut self, _engine: &mut EngineContext, _trigger: Trigger) {}

    /// Once, before the loop exits
    fn shutdown(&mut self, _engine: &mut EngineContext) {}
}

/// State shared with the game on every callback
pub struct EngineContext {
    /// Frame timer
    pub time: Time,
    /// Raw device state
    pub input: Input,
    /// ECS world
    pub world: World,
    quit_requested: bool,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            time: Time::new(),
            input: Input::new(),
            world: World::new(),
            quit_requested: false,
        }
    }

    /// Ask the host to stop after the current frame
    pub fn quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The host: owns the window, the context and the game
pub struct Engine<G: Game> {
    config: EngineConfig,
    game: G,
    context: EngineContext,
    window: Option<Arc<Window>>,
    started: bool,
}

impl<G: Game> Engine<G> {
    pub fn new(config: EngineConfig, game: G) -> Self {
        Self {
            config,
            game,
            context: EngineContext::new(),
            window: None,
            started: false,
        }
    }

    /// Initialize logging and block on the event loop until the game quits
    pub fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
        env_logger::init();
        log::info!("Starting host loop: {}", self.config.title);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;

        Ok(())
    }

    fn press(&mut self, trigger: Trigger) {
        self.game.on_input_edge(&mut self.context, trigger);
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        self.context.time.update();
        self.game.update(&mut self.context);

        if self.context.should_quit() {
            self.stop(event_loop);
            return;
        }

        // Just-pressed sets and mouse motion only live for one frame
        self.context.input.update();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop) {
        self.game.shutdown(&mut self.context);
        event_loop.exit();
    }
}

impl<G: Game> ApplicationHandler for Engine<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attributes) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        }

        if !self.started {
            self.started = true;
            self.game.init(&mut self.context);
            log::info!("Game initialized");
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed");
                self.stop(event_loop);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                if self.context.input.process_keyboard(key, event.state) {
                    self.press(Trigger::Key(key));
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if self.context.input.process_mouse_button(button, state) {
                    self.press(Trigger::Mouse(button));
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.context
                .input
                .process_mouse_delta(glam::Vec2::new(dx as f32, dy as f32));
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
