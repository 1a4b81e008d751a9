mod renderer;

use renderer::Renderer;
use rochambeau::constants::FIXED_TIMESTEP;
use rochambeau::{Kind, Simulation, SimulationConfig, Status};
use std::{error::Error, sync::Arc, time::Instant};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

const FPS_SAMPLE_SECS: f64 = 0.5;
const SCATTER_WINDOW_SIZE: u32 = 600;

// `rochambeau [arena|scatter] [seed]`
fn config_from_args() -> Result<SimulationConfig, Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let mut config = match args.next().as_deref() {
        None | Some("arena") => SimulationConfig::arena(),
        Some("scatter") => SimulationConfig::scatter(),
        Some(other) => return Err(format!("unknown preset {other:?}, expected arena or scatter").into()),
    };
    if let Some(seed) = args.next() {
        config.seed = Some(seed.parse()?);
    }
    Ok(config)
}

fn window_size_for(config: &SimulationConfig) -> PhysicalSize<u32> {
    let arena = config.arena_size;
    if arena.x >= 100.0 && arena.y >= 100.0 {
        PhysicalSize::new(arena.x as u32, arena.y as u32)
    } else {
        // Unit-scale arenas get a square window; the shader keeps the aspect
        PhysicalSize::new(SCATTER_WINDOW_SIZE, SCATTER_WINDOW_SIZE)
    }
}

fn title_for(sim: &Simulation, fps: f64) -> String {
    let counts = sim.counts();
    let mut title = format!(
        "Rock Paper Scissors - Step {} - R:{} P:{} S:{} - Speed: {:.1}x - FPS: {:.1}",
        sim.step_count(),
        counts[Kind::Rock],
        counts[Kind::Paper],
        counts[Kind::Scissors],
        sim.speed_multiplier(),
        fps
    );
    match sim.status() {
        Status::Running => {}
        Status::Paused => title.push_str(" [PAUSED]"),
        Status::Exhausted => title.push_str(" - Step limit reached"),
        Status::Resolved { winner } => {
            title.push_str(" - One species left!");
            if let Some(kind) = winner {
                title.push_str(&format!(" {} wins in {:.1}s", kind, sim.elapsed()));
            }
        }
    }
    title
}

/// Feeds wall-clock time to the simulation in fixed slices.
struct FixedStepper {
    last: Instant,
    backlog: f32,
}

impl FixedStepper {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            backlog: 0.0,
        }
    }

    fn advance(&mut self, sim: &mut Simulation) {
        let now = Instant::now();
        let real_dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        if sim.status() != Status::Running {
            self.backlog = 0.0;
            return;
        }
        self.backlog += real_dt;
        while self.backlog >= FIXED_TIMESTEP {
            sim.tick(FIXED_TIMESTEP);
            self.backlog -= FIXED_TIMESTEP;
        }
    }
}

/// Frames per second, averaged over short sampling windows.
struct FpsMeter {
    window_start: Instant,
    frames: u32,
    fps: f64,
}

impl FpsMeter {
    fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn frame(&mut self) -> f64 {
        self.frames += 1;
        let span = self.window_start.elapsed().as_secs_f64();
        if span >= FPS_SAMPLE_SECS {
            self.fps = self.frames as f64 / span;
            self.frames = 0;
            self.window_start = Instant::now();
        }
        self.fps
    }
}

fn handle_key(key: &KeyEvent, sim: &mut Simulation, elwt: &EventLoopWindowTarget<()>) {
    if key.state != ElementState::Pressed || key.repeat {
        return;
    }
    let PhysicalKey::Code(code) = key.physical_key else {
        return;
    };
    match code {
        KeyCode::ArrowUp => sim.adjust_speed(true),
        KeyCode::ArrowDown => sim.adjust_speed(false),
        KeyCode::Space => sim.toggle_pause(),
        KeyCode::KeyR => sim.reset(),
        KeyCode::Escape => elwt.exit(),
        _ => {}
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let config = config_from_args()?;
    let arena_size = config.arena_size;
    let agent_radius = config.agent_radius;
    let mut simulation = Simulation::new(config)?;

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Rock Paper Scissors")
            .with_inner_size(window_size_for(simulation.config()))
            .build(&event_loop)?,
    );
    let mut renderer = pollster::block_on(Renderer::new(window.clone(), arena_size))?;
    let mut stepper = FixedStepper::new();
    let mut fps = FpsMeter::new();

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);
        match event {
            Event::AboutToWait => {
                stepper.advance(&mut simulation);
                window.request_redraw();
            }
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => renderer.resize(size),
                WindowEvent::ScaleFactorChanged { .. } => renderer.resize(window.inner_size()),
                WindowEvent::KeyboardInput { event: key, .. } => {
                    handle_key(&key, &mut simulation, elwt)
                }
                WindowEvent::RedrawRequested => {
                    let current_fps = fps.frame();
                    match renderer.render(simulation.snapshot(), agent_radius) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            renderer.reconfigure()
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Surface out of memory, exiting");
                            elwt.exit();
                        }
                        Err(e) => log::warn!("Dropped frame: {e:?}"),
                    }
                    window.set_title(&title_for(&simulation, current_fps));
                }
                _ => {}
            },
            _ => {}
        }
    })?;
    Ok(())
}
