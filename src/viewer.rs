use std::time::Instant;

use glutin::{
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, ElementState, Event, KeyboardInput, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
    Api, ContextBuilder, ContextWrapper, GlProfile, GlRequest, PossiblyCurrent,
};

use crate::{
    check,
    error::Result,
    input::{InputState, KeyboardKey, MouseButton, PressState},
    renderer::Renderer,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Requested core profile version as `(major, minor)`.
    pub gl_version: (u8, u8),
    pub vsync: bool,
    /// Samples per pixel, 0 disables multisampling.
    pub multisampling: u16,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            title: "OpenGlViewer".to_owned(),
            width: 800,
            height: 600,
            gl_version: (3, 3),
            vsync: true,
            multisampling: 0,
        }
    }
}

/// Per-frame information handed to [`App::draw`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Seconds since the viewer started running.
    pub elapsed: f32,
    pub width: u32,
    pub height: u32,
}

/// A tutorial program driven by the [`Viewer`].
///
/// The viewer owns the app for the lifetime of the event loop and hands
/// out `&mut self` to each hook in turn.
pub trait App {
    fn on_key(&mut self, _key: KeyboardKey, _state: PressState) {}

    /// Mouse moved by `(dx, dy)` pixels while `button` was held.
    fn on_mouse_drag(&mut self, _button: MouseButton, _dx: f32, _dy: f32) {}

    fn on_resize(&mut self, _width: u32, _height: u32) {}

    fn draw(&mut self, renderer: &Renderer, frame: &Frame) -> Result<()>;
}

pub struct Viewer {
    context: ContextWrapper<PossiblyCurrent, Window>,
    renderer: Renderer,
    input: InputState,
    control_flow: ControlFlow,
    start: Instant,
}

impl Viewer {
    pub fn new(event_loop: &EventLoop<()>, config: &ViewerConfig) -> Result<Self> {
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let (major, minor) = config.gl_version;
        let context = ContextBuilder::new()
            .with_gl(GlRequest::Specific(Api::OpenGl, (major, minor)))
            .with_gl_profile(GlProfile::Core)
            .with_vsync(config.vsync)
            .with_multisampling(config.multisampling)
            .build_windowed(window, event_loop)?;

        let context = unsafe { context.make_current() }.map_err(|(_, e)| e)?;

        gl::load_with(|symbol| context.get_proc_address(symbol));

        let renderer = Renderer::new();
        let dimensions = context.window().inner_size();
        renderer.set_viewport(dimensions.width, dimensions.height);

        if config.multisampling > 0 {
            check!(unsafe { gl::Enable(gl::MULTISAMPLE) });
        }

        log::info!(
            "created {}x{} window with OpenGL {}.{} core context",
            dimensions.width,
            dimensions.height,
            major,
            minor
        );

        Ok(Self {
            context,
            renderer,
            input: InputState::new(),
            control_flow: ControlFlow::Poll,
            start: Instant::now(),
        })
    }

    pub fn window_size(&self) -> PhysicalSize<u32> {
        self.context.window().inner_size()
    }

    /// Runs the event loop until the window is closed. Never returns.
    pub fn run<A: App + 'static>(mut self, event_loop: EventLoop<()>, mut app: A) -> ! {
        self.start = Instant::now();

        event_loop.run(move |event, _, control_flow| {
            match event {
                Event::LoopDestroyed => log::info!("viewer closed"),
                Event::WindowEvent { event, .. } => self.handle_window_event(event, &mut app),
                Event::DeviceEvent { event, .. } => self.handle_device_event(event, &mut app),
                Event::MainEventsCleared => self.context.window().request_redraw(),
                Event::RedrawRequested(_) => self.redraw(&mut app),
                _ => {}
            }

            *control_flow = self.control_flow;
        })
    }

    fn redraw<A: App>(&mut self, app: &mut A) {
        let dimensions = self.window_size();
        let frame = Frame {
            elapsed: self.start.elapsed().as_secs_f32(),
            width: dimensions.width,
            height: dimensions.height,
        };

        if let Err(e) = app.draw(&self.renderer, &frame) {
            log::error!("draw failed: {}", e);
            self.control_flow = ControlFlow::Exit;
            return;
        }

        if let Err(e) = self.context.swap_buffers() {
            log::error!("failed to swap buffers: {}", e);
            self.control_flow = ControlFlow::Exit;
        }
    }

    fn handle_window_event<A: App>(&mut self, event: WindowEvent, app: &mut A) {
        match event {
            WindowEvent::CloseRequested => self.control_flow = ControlFlow::Exit,
            WindowEvent::Resized(new_dimensions) => {
                self.context.resize(new_dimensions);
                self.renderer
                    .set_viewport(new_dimensions.width, new_dimensions.height);
                app.on_resize(new_dimensions.width, new_dimensions.height);
            }
            WindowEvent::Focused(focused) => self.input.set_focused(focused),
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.mouse_input(button.into(), state.into());
            }
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        virtual_keycode: Some(code),
                        state,
                        ..
                    },
                ..
            } => {
                let key = KeyboardKey::from(code);
                if key.closes_window() && state == ElementState::Pressed {
                    self.control_flow = ControlFlow::Exit;
                    return;
                }

                log::debug!("key {:?} {:?}", key, state);
                app.on_key(key, state.into());
            }
            _ => {}
        }
    }

    fn handle_device_event<A: App>(&mut self, event: DeviceEvent, app: &mut A) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if let Some(button) = self.input.drag_button() {
                app.on_mouse_drag(button, delta.0 as f32, delta.1 as f32);
            }
        }
    }
}
