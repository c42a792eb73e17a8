use std::collections::VecDeque;
use std::time::Duration;

use glam::{Vec2, Vec3};
use instant::Instant;

use crate::card::ObjectId;
use crate::config::SceneConfig;
use crate::content::{DisplayItem, ImageInfo};
use crate::debug::timer::StepTimers;
use crate::error::ImageError;
use crate::input::{InputEvent, PointerSample};
use crate::render::instance::{CardInstance, ParticleInstance};
use crate::scene::{Scene, SceneEvent};

/// Target simulation tick rate (seconds per tick).
const TICK_RATE: f64 = 1.0 / 60.0;
/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;
/// Pause between host frames; stands in for vsync.
const FRAME_PACING: Duration = Duration::from_millis(16);
/// Run length when `LIMINAL_SECONDS` is not set.
const DEFAULT_SECONDS: f64 = 20.0;
/// Viewport width when `LIMINAL_VIEWPORT_WIDTH` is not set.
const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
/// Simulated loader latency, in ticks.
const LOAD_LATENCY_TICKS: u64 = 30;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_min: f64,
    frame_time_max: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_min: f64::MAX,
            frame_time_max: 0.0,
            frames_since_log: 0,
        }
    }

    fn record_frame(&mut self, dt: f64, timers: &StepTimers) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.frame_time_sum += dt;
        self.frame_time_min = self.frame_time_min.min(dt);
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | total frames: {}",
                fps,
                avg_ms,
                self.frame_time_min * 1000.0,
                self.frame_time_max * 1000.0,
                self.frame_count,
            );
            log::info!("step: {} | total {:.1}us", timers.summary(), timers.total_us());
            self.last_log_time = Instant::now();
            self.frame_time_sum = 0.0;
            self.frame_time_min = f64::MAX;
            self.frame_time_max = 0.0;
            self.frames_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

struct HostOptions {
    seed: Option<u64>,
    viewport_width: f32,
    seconds: f64,
}

impl HostOptions {
    fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let seed = match std::env::var("LIMINAL_SEED") {
            Ok(s) => Some(
                s.trim()
                    .parse::<u64>()
                    .map_err(|e| format!("LIMINAL_SEED={s}: {e}"))?,
            ),
            Err(_) => None,
        };
        let viewport_width = match std::env::var("LIMINAL_VIEWPORT_WIDTH") {
            Ok(s) => s
                .trim()
                .parse::<f32>()
                .map_err(|e| format!("LIMINAL_VIEWPORT_WIDTH={s}: {e}"))?,
            Err(_) => DEFAULT_VIEWPORT_WIDTH,
        };
        let seconds = match std::env::var("LIMINAL_SECONDS") {
            Ok(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("LIMINAL_SECONDS={s}: {e}"))?,
            Err(_) => DEFAULT_SECONDS,
        };
        if !viewport_width.is_finite() || viewport_width <= 0.0 {
            return Err(format!("viewport width must be positive, got {viewport_width}").into());
        }
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(format!("run length must be non-negative, got {seconds}").into());
        }
        Ok(Self {
            seed,
            viewport_width,
            seconds,
        })
    }
}

// ---------------------------------------------------------------------------
// Demo content
// ---------------------------------------------------------------------------

fn catalog() -> Vec<DisplayItem> {
    vec![
        DisplayItem::new("tide-01", "works/tide-01.jpg")
            .with_title("Tide")
            .with_year(2019)
            .with_medium("oil on linen"),
        DisplayItem::new("hollow-02", "works/hollow-02.jpg")
            .with_title("Hollow")
            .with_year(2020),
        DisplayItem::new("static-03", "works/static-03.jpg")
            .with_title("Static")
            .with_medium("cyanotype"),
        DisplayItem::new("field-04", "works/missing-04.jpg").with_title("Field"),
        DisplayItem::new("vessel-05", "works/vessel-05.jpg")
            .with_title("Vessel")
            .with_year(2022)
            .with_medium("glazed stoneware"),
        DisplayItem::new("drift-06", "works/drift-06.jpg").with_title("Drift"),
        DisplayItem::new("ember-07", "works/ember-07.jpg")
            .with_title("Ember")
            .with_year(2023),
        DisplayItem::new("lull-08", "works/lull-08.jpg"),
    ]
}

/// Stand-in for the host's image decoder. Results arrive after a fixed
/// latency; locators containing "missing" fail.
struct SimulatedLoader {
    queue: VecDeque<(u64, String, String)>,
}

impl SimulatedLoader {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    fn request(&mut self, tick: u64, item_id: String, locator: String) {
        self.queue.push_back((tick + LOAD_LATENCY_TICKS, item_id, locator));
    }

    fn poll(&mut self, tick: u64) -> Vec<(String, Result<ImageInfo, ImageError>)> {
        let mut done = Vec::new();
        while self.queue.front().is_some_and(|(due, _, _)| *due <= tick) {
            let Some((_, item_id, locator)) = self.queue.pop_front() else {
                break;
            };
            let result = if locator.contains("missing") {
                Err(ImageError::NotFound(locator))
            } else {
                let h = locator.bytes().fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32));
                Ok(ImageInfo {
                    width: 600 + (h % 5) * 200,
                    height: 800,
                })
            };
            done.push((item_id, result));
        }
        done
    }
}

/// Scripted interaction, keyed by tick.
#[derive(Debug, Clone, Copy)]
enum Cue {
    Pointer(Vec2),
    Hover(Option<u32>),
    Click(u32),
    Press(u32),
    DragBy(Vec2),
    Release,
    Cancel,
    Resize(f32),
}

fn script() -> VecDeque<(u64, Cue)> {
    let at = |seconds: f64| (seconds / TICK_RATE).round() as u64;
    VecDeque::from(vec![
        (at(1.0), Cue::Pointer(Vec2::new(0.4, -0.2))),
        (at(2.0), Cue::Hover(Some(0))),
        (at(2.5), Cue::Click(0)),
        // Rejected: object 0 still holds focus.
        (at(3.0), Cue::Click(1)),
        (at(5.0), Cue::Cancel),
        (at(6.0), Cue::Hover(Some(1))),
        (at(6.5), Cue::Press(1)),
        (at(6.7), Cue::DragBy(Vec2::new(60.0, 20.0))),
        (at(7.5), Cue::Release),
        (at(8.0), Cue::Hover(None)),
        (at(8.0), Cue::Pointer(Vec2::new(-0.3, 0.1))),
        (at(12.0), Cue::Resize(600.0)),
    ])
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

struct Host {
    scene: Scene,
    loader: SimulatedLoader,
    cues: VecDeque<(u64, Cue)>,

    // Fixed timestep
    last_frame_time: Option<Instant>,
    accumulator: f64,
    tick_count: u64,

    // Frame timing
    frame_stats: FrameStats,

    // Pointer state for the scripted drag
    press: Option<(u32, Vec2, Vec3)>,

    // Reusable instance buffers (avoid per-frame allocation)
    card_buf: Vec<CardInstance>,
    particle_buf: Vec<ParticleInstance>,
}

impl Host {
    fn new(opts: &HostOptions) -> Self {
        let mut cfg = SceneConfig::default();
        cfg.seed = opts.seed;
        let scene = Scene::new(cfg, catalog(), opts.viewport_width);
        let particles = scene.boids().len();
        let mut host = Self {
            scene,
            loader: SimulatedLoader::new(),
            cues: script(),
            last_frame_time: None,
            accumulator: 0.0,
            tick_count: 0,
            frame_stats: FrameStats::new(),
            press: None,
            card_buf: Vec::new(),
            particle_buf: Vec::with_capacity(particles),
        };
        host.handle_events();
        host
    }

    /// Run fixed-timestep simulation ticks.
    fn run_fixed_update(&mut self, dt: f64) {
        self.accumulator += dt;

        if self.accumulator > MAX_ACCUMULATOR {
            self.accumulator = MAX_ACCUMULATOR;
        }

        while self.accumulator >= TICK_RATE {
            self.apply_cues();
            self.scene.step(TICK_RATE as f32);
            for (item_id, result) in self.loader.poll(self.tick_count) {
                self.scene.resolve_image(&item_id, result);
            }
            self.handle_events();

            self.accumulator -= TICK_RATE;
            self.tick_count += 1;
        }
    }

    fn apply_cues(&mut self) {
        while self.cues.front().is_some_and(|(tick, _)| *tick <= self.tick_count) {
            let Some((_, cue)) = self.cues.pop_front() else {
                break;
            };
            log::debug!("cue {:?}", cue);
            self.apply_cue(cue);
        }
    }

    fn apply_cue(&mut self, cue: Cue) {
        match cue {
            Cue::Pointer(ndc) => self.scene.push_input(InputEvent::PointerNdc(ndc)),
            Cue::Hover(target) => self
                .scene
                .push_input(InputEvent::Hover(target.map(ObjectId))),
            Cue::Click(id) => {
                let Some(world) = self.grab_point(id) else { return };
                let at = PointerSample::new(Vec2::new(640.0, 360.0), world);
                self.scene.push_input(InputEvent::PointerDown {
                    object: ObjectId(id),
                    at,
                });
                self.scene.push_input(InputEvent::PointerUp { at });
            }
            Cue::Press(id) => {
                let Some(world) = self.grab_point(id) else { return };
                let screen = Vec2::new(640.0, 360.0);
                self.press = Some((id, screen, world));
                self.scene.push_input(InputEvent::PointerDown {
                    object: ObjectId(id),
                    at: PointerSample::new(screen, world),
                });
            }
            Cue::DragBy(px) => {
                if let Some((id, screen, world)) = self.press.as_mut() {
                    *screen += px;
                    // Roughly 100 px per world unit at the card band depth.
                    *world += Vec3::new(px.x, -px.y, 0.0) / 100.0;
                    log::debug!("dragging {id} to {screen}");
                    self.scene.push_input(InputEvent::PointerMove {
                        at: PointerSample::new(*screen, *world),
                    });
                }
            }
            Cue::Release => {
                if let Some((_, screen, world)) = self.press.take() {
                    self.scene.push_input(InputEvent::PointerUp {
                        at: PointerSample::new(screen, world),
                    });
                }
            }
            Cue::Cancel => self.scene.push_input(InputEvent::Cancel),
            Cue::Resize(px) => self.scene.set_viewport_width(px),
        }
    }

    fn grab_point(&self, id: u32) -> Option<Vec3> {
        self.scene
            .object(ObjectId(id))
            .map(|obj| obj.pose().position)
    }

    fn handle_events(&mut self) {
        let tick = self.tick_count;
        for event in self.scene.drain_events() {
            match event {
                SceneEvent::FocusChanged(Some(info)) => log::info!(
                    "focused {:?}: {} ({})",
                    info.object,
                    info.item.title.as_deref().unwrap_or("untitled"),
                    info.item.id
                ),
                SceneEvent::FocusChanged(None) => log::info!("focus released"),
                SceneEvent::ImageRequested { item_id, locator } => {
                    log::debug!("loading {locator} for {item_id}");
                    self.loader.request(tick, item_id, locator);
                }
                SceneEvent::CursorChanged(hint) => log::debug!("cursor: {}", hint.css()),
            }
        }
    }

    fn build_instances(&mut self) {
        self.scene
            .build_instances(&mut self.card_buf, &mut self.particle_buf);
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_frame_time
            .map_or(TICK_RATE, |last| now.duration_since(last).as_secs_f64());
        self.last_frame_time = Some(now);

        self.run_fixed_update(dt);
        self.build_instances();
        self.frame_stats.record_frame(dt, self.scene.timers());
    }
}

/// Run the headless host until the configured run length has been simulated.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let opts = HostOptions::from_env()?;
    let mut host = Host::new(&opts);
    log::info!(
        "headless host: seed {}, {:.0}px viewport, {:.1}s",
        host.scene.seed(),
        opts.viewport_width,
        opts.seconds
    );

    let target_ticks = (opts.seconds / TICK_RATE).ceil() as u64;
    while host.tick_count < target_ticks {
        host.frame();
        std::thread::sleep(FRAME_PACING);
    }

    let bytes = bytemuck::cast_slice::<CardInstance, u8>(&host.card_buf).len()
        + bytemuck::cast_slice::<ParticleInstance, u8>(&host.particle_buf).len();
    log::info!(
        "done after {} ticks ({:.1}s simulated): {} cards, {} particles, {} instance bytes",
        host.tick_count,
        host.scene.elapsed(),
        host.card_buf.len(),
        host.particle_buf.len(),
        bytes
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_resolves_after_latency() {
        let mut loader = SimulatedLoader::new();
        loader.request(0, "a".into(), "works/a.jpg".into());
        loader.request(0, "b".into(), "works/missing-b.jpg".into());
        assert!(loader.poll(LOAD_LATENCY_TICKS - 1).is_empty());
        let done = loader.poll(LOAD_LATENCY_TICKS);
        assert_eq!(done.len(), 2);
        assert!(done[0].1.is_ok());
        assert!(matches!(done[1].1, Err(ImageError::NotFound(_))));
    }

    #[test]
    fn script_is_ordered() {
        let cues = script();
        assert!(cues
            .iter()
            .zip(cues.iter().skip(1))
            .all(|(a, b)| a.0 <= b.0));
    }

    #[test]
    fn host_runs_scripted_session() {
        let opts = HostOptions {
            seed: Some(11),
            viewport_width: 1280.0,
            seconds: 0.0,
        };
        let mut host = Host::new(&opts);
        let ticks = (13.0 / TICK_RATE) as u64;
        for _ in 0..ticks {
            host.run_fixed_update(TICK_RATE);
        }
        host.build_instances();
        // Resized to the small class at 12 s.
        assert_eq!(host.card_buf.len(), 3);
        assert_eq!(host.particle_buf.len(), 25);
        assert!(host.scene.focus_holder().is_none());
    }
}
