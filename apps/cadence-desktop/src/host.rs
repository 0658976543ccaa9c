use crate::keymap::{action_from_winit, key_from_winit};
use cadence_common::KeyEvent;
use cadence_engine::{HostError, LoopConfig, WindowHost};
use cadence_input::EventQueue;
use glow::HasContext;
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::raw_window_handle::HasWindowHandle;
use winit::window::{Window, WindowId};

/// Pumps allowed for the platform to hand over the first resume.
const STARTUP_PUMPS: u32 = 100;

/// Window, GL surface and context. Field order is drop order: the surface
/// and context go before the window they draw into.
struct GlWindowState {
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    gl: Arc<glow::Context>,
    window: Window,
    should_close: bool,
    cursor: (f64, f64),
    focus_lost: bool,
}

impl GlWindowState {
    fn create(event_loop: &ActiveEventLoop, config: &LoopConfig) -> Result<Self, HostError> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(true)
            .with_visible(false);

        let template = ConfigTemplateBuilder::new().with_depth_size(24);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, |configs| {
                // The picker must return a config; an empty set is reported
                // by glutin as an error before the picker runs.
                configs
                    .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
                    .expect("display offered no GL configs")
            })
            .map_err(|e| HostError::WindowCreation(e.to_string()))?;
        let window =
            window.ok_or_else(|| HostError::WindowCreation("display built no window".into()))?;

        let handle = window
            .window_handle()
            .map_err(|e| HostError::WindowCreation(e.to_string()))?;
        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(handle.as_raw()));

        let gl_display = gl_config.display();
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attrs) }
            .map_err(|e| HostError::Context(e.to_string()))?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .map_err(|e| HostError::Context(e.to_string()))?;
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attrs) }
            .map_err(|e| HostError::Context(e.to_string()))?;
        let gl_context = not_current
            .make_current(&gl_surface)
            .map_err(|e| HostError::Context(e.to_string()))?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            tracing::warn!("could not set swap interval: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };

        center_on_primary_monitor(event_loop, &window);
        window.set_visible(true);

        let size = window.inner_size();
        tracing::info!(
            title = %config.title,
            width = size.width,
            height = size.height,
            vsync = config.vsync,
            "window created"
        );

        Ok(Self {
            gl_surface,
            gl_context,
            gl: Arc::new(gl),
            window,
            should_close: false,
            cursor: (0.0, 0.0),
            focus_lost: false,
        })
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return;
        };
        self.window.resize_surface(&self.gl_surface, &self.gl_context);
        unsafe { self.gl.viewport(0, 0, w.get() as i32, h.get() as i32) };
        tracing::debug!(width = w.get(), height = h.get(), "viewport resized");
    }

    fn handle(&mut self, event: WindowEvent, events: &mut EventQueue) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window close requested");
                self.should_close = true;
            }
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
            }
            WindowEvent::Focused(false) => {
                tracing::debug!("window lost focus");
                self.focus_lost = true;
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let Some(key) = key_from_winit(code) else {
                    return;
                };
                events.push(KeyEvent::new(key, action_from_winit(event.state, event.repeat)));
            }
            _ => {}
        }
    }
}

fn center_on_primary_monitor(event_loop: &ActiveEventLoop, window: &Window) {
    let Some(monitor) = event_loop.primary_monitor() else {
        tracing::debug!("no primary monitor, leaving window position to the platform");
        return;
    };
    let screen = monitor.size();
    let origin = monitor.position();
    let outer = window.outer_size();
    let x = origin.x + (screen.width as i32 - outer.width as i32) / 2;
    let y = origin.y + (screen.height as i32 - outer.height as i32) / 2;
    window.set_outer_position(PhysicalPosition::new(x, y));
}

/// Handler for the first pump: builds the window once the platform resumes.
struct Startup<'a> {
    config: &'a LoopConfig,
    state: Option<Result<GlWindowState, HostError>>,
}

impl ApplicationHandler for Startup<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            self.state = Some(GlWindowState::create(event_loop, self.config));
        }
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
}

/// Handler for a regular pump: window events into the host and the queue.
struct Pump<'a> {
    state: &'a mut GlWindowState,
    events: &'a mut EventQueue,
}

impl ApplicationHandler for Pump<'_> {
    fn resumed(&mut self, _: &ActiveEventLoop) {}

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        self.state.handle(event, self.events);
    }
}

/// [`WindowHost`] backed by a winit window and a glutin OpenGL 3.3 core
/// context. Events are pumped without blocking, once per fixed step.
pub struct GlutinHost {
    state: GlWindowState,
    event_loop: EventLoop<()>,
}

impl GlutinHost {
    /// Open the window described by `config` and make its context current.
    pub fn new(config: &LoopConfig) -> Result<Self, HostError> {
        let mut event_loop =
            EventLoop::new().map_err(|e| HostError::WindowCreation(e.to_string()))?;
        let mut startup = Startup {
            config,
            state: None,
        };
        for _ in 0..STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::from_millis(10)), &mut startup)
            {
                return Err(HostError::WindowCreation(format!(
                    "event loop exited during startup ({code})"
                )));
            }
            if startup.state.is_some() {
                break;
            }
        }
        let state = startup
            .state
            .ok_or_else(|| HostError::WindowCreation("platform never resumed".into()))??;
        Ok(Self { state, event_loop })
    }

    /// The GL function table, for building the graphics backend.
    pub fn gl(&self) -> Arc<glow::Context> {
        Arc::clone(&self.state.gl)
    }
}

impl WindowHost for GlutinHost {
    fn poll_events(&mut self, events: &mut EventQueue) {
        let mut pump = Pump {
            state: &mut self.state,
            events,
        };
        if let PumpStatus::Exit(code) =
            self.event_loop.pump_app_events(Some(Duration::ZERO), &mut pump)
        {
            tracing::info!(code, "event loop exited");
            self.state.should_close = true;
        }
    }

    fn should_close(&self) -> bool {
        self.state.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.state.should_close = value;
    }

    fn swap_buffers(&mut self) -> Result<(), HostError> {
        self.state
            .gl_surface
            .swap_buffers(&self.state.gl_context)
            .map_err(|e| HostError::Swap(e.to_string()))
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.state.cursor
    }

    fn take_focus_lost(&mut self) -> bool {
        std::mem::take(&mut self.state.focus_lost)
    }
}
