use std::collections::{HashMap, HashSet};

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::card::{FloatingObject, Frame, ObjectId, Phase, Release};
use crate::config::SceneConfig;
use crate::content::{Content, DisplayItem, ImageInfo, ImageState};
use crate::debug::timer::{StepPhase, StepTimers};
use crate::drift::OffsetSeed;
use crate::error::{FocusError, ImageError};
use crate::flock::{Boid, Bounds, Swarm};
use crate::input::{CursorHint, InputEvent, InputQueue};
use crate::render::instance::{CardInstance, ParticleInstance};
use crate::shading::{Shade, ShadingPrograms, Surface, View};

/// Salt for the generator that picks which items are shown, so that
/// re-populating after a resize keeps the same ordering.
const PICK_SALT: u64 = 0x5eed_ca4d;
/// Salt for placement jitter.
const PLACE_SALT: u64 = 0x91ac_e0ff;
/// Placement jitter as a fraction of a slot's width.
const SLOT_JITTER: f32 = 0.2;
/// Vertical placement jitter (world units).
const BAND_JITTER_Y: f32 = 0.6;

/// Responsive size class of the host viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Small,
    Medium,
    Large,
}

impl ViewportClass {
    pub fn from_width(px: f32) -> Self {
        if px < 640.0 {
            ViewportClass::Small
        } else if px < 1024.0 {
            ViewportClass::Medium
        } else {
            ViewportClass::Large
        }
    }

    pub fn object_count(self) -> usize {
        match self {
            ViewportClass::Small => 3,
            ViewportClass::Medium => 4,
            ViewportClass::Large => 5,
        }
    }

    /// Width of the horizontal band objects are spread across.
    pub fn band_width(self) -> f32 {
        match self {
            ViewportClass::Small => 7.0,
            ViewportClass::Medium => 10.0,
            ViewportClass::Large => 13.0,
        }
    }

    pub fn card_scale(self) -> f32 {
        match self {
            ViewportClass::Small => 0.85,
            ViewportClass::Medium => 0.95,
            ViewportClass::Large => 1.0,
        }
    }
}

/// The focused item, for the host's info overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusInfo {
    pub object: ObjectId,
    pub item: DisplayItem,
}

/// Outbound notifications, drained by the host after each step.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// Focus moved to an item, or was released (`None`).
    FocusChanged(Option<FocusInfo>),
    /// The host should resolve this image and call [`Scene::resolve_image`].
    ImageRequested { item_id: String, locator: String },
    CursorChanged(CursorHint),
}

/// Owns every piece of mutable simulation state for one session.
pub struct Scene {
    cfg: SceneConfig,
    seed: u64,
    /// Accumulated in f64 so long sessions keep a steady step.
    elapsed: f64,
    swarm: Swarm,
    objects: Vec<FloatingObject>,
    items: Vec<DisplayItem>,
    images: HashMap<String, ImageState>,
    requested: HashSet<String>,
    camera: Camera,
    programs: ShadingPrograms,
    viewport: ViewportClass,
    pending_viewport: Option<ViewportClass>,
    /// Object in Focusing, Focused or Unfocusing. At most one.
    focus_slot: Option<ObjectId>,
    /// Object holding pointer capture.
    captured: Option<ObjectId>,
    hovered: Option<ObjectId>,
    pointer_ndc: Vec2,
    cursor: CursorHint,
    input: InputQueue,
    events: Vec<SceneEvent>,
    card_shades: Vec<Shade>,
    particle_shades: Vec<Shade>,
    timers: StepTimers,
}

impl Scene {
    /// Seed, populate the swarm and the floating objects for `viewport_width` px.
    pub fn new(cfg: SceneConfig, items: Vec<DisplayItem>, viewport_width: f32) -> Self {
        let seed = cfg.seed.unwrap_or_else(|| fastrand::u64(..));
        let mut rng = fastrand::Rng::with_seed(seed);
        let swarm = Swarm::populate(cfg.particle_count, &cfg.bounds, cfg.flock, &mut rng);
        let camera = Camera::looking_at(cfg.camera_position, cfg.camera_target);
        let programs = ShadingPrograms::new(cfg.frame_shading, cfg.particle_shading);
        let particle_count = swarm.len();

        let mut scene = Self {
            cfg,
            seed,
            elapsed: 0.0,
            swarm,
            objects: Vec::new(),
            items,
            images: HashMap::new(),
            requested: HashSet::new(),
            camera,
            programs,
            viewport: ViewportClass::from_width(viewport_width),
            pending_viewport: None,
            focus_slot: None,
            captured: None,
            hovered: None,
            pointer_ndc: Vec2::ZERO,
            cursor: CursorHint::Default,
            input: InputQueue::new(),
            events: Vec::new(),
            card_shades: Vec::new(),
            particle_shades: vec![Shade::default(); particle_count],
            timers: StepTimers::new(),
        };
        scene.populate();
        scene.shade();
        log::info!(
            "scene created: seed {:#018x}, {} particles, {} objects ({:?} viewport)",
            seed,
            particle_count,
            scene.objects.len(),
            scene.viewport
        );
        scene
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn config(&self) -> &SceneConfig {
        &self.cfg
    }

    pub fn bounds(&self) -> &Bounds {
        &self.cfg.bounds
    }

    pub fn boids(&self) -> &[Boid] {
        self.swarm.boids()
    }

    pub fn objects(&self) -> &[FloatingObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&FloatingObject> {
        self.objects.get(id.index())
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    pub fn cursor_hint(&self) -> CursorHint {
        self.cursor
    }

    /// Object currently in Focusing, Focused or Unfocusing.
    pub fn focus_holder(&self) -> Option<ObjectId> {
        self.focus_slot
    }

    /// Object that is focusing or focused (not on its way back).
    pub fn focused(&self) -> Option<&FloatingObject> {
        let obj = self.object(self.focus_slot?)?;
        matches!(obj.phase(), Phase::Focusing | Phase::Focused).then_some(obj)
    }

    /// Content of the focused object, for the info overlay.
    pub fn focused_item(&self) -> Option<&DisplayItem> {
        self.focused().map(|obj| &obj.content().item)
    }

    pub fn card_shades(&self) -> &[Shade] {
        &self.card_shades
    }

    pub fn particle_shades(&self) -> &[Shade] {
        &self.particle_shades
    }

    pub fn timers(&self) -> &StepTimers {
        &self.timers
    }

    // -----------------------------------------------------------------------
    // Host-facing operations
    // -----------------------------------------------------------------------

    /// Queue input; applied at the start of the next step.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = SceneEvent> + '_ {
        self.events.drain(..)
    }

    /// Move `id` toward the camera. Rejected (scene untouched) when the id is
    /// unknown, another object holds focus, or the object is being dragged.
    pub fn request_focus(&mut self, id: ObjectId) -> Result<(), FocusError> {
        let result = self.try_focus(id);
        if let Err(e) = &result {
            log::debug!("focus request rejected: {e}");
        }
        result
    }

    /// Send the focused object back to rest. Returns false when nothing is
    /// focused or it is already on its way back.
    pub fn request_unfocus(&mut self) -> bool {
        let Some(id) = self.focus_slot else {
            return false;
        };
        let Some(obj) = self.objects.get_mut(id.index()) else {
            return false;
        };
        if !obj.begin_unfocus() {
            return false;
        }
        log::info!("unfocus {:?}", id);
        self.events.push(SceneEvent::FocusChanged(None));
        true
    }

    /// Loader completion for `item_id`. Never resets interaction state.
    pub fn resolve_image(&mut self, item_id: &str, result: Result<ImageInfo, ImageError>) {
        let Some(item) = self.items.iter().find(|item| item.id == item_id) else {
            log::warn!("image resolved for unknown item {item_id}");
            return;
        };
        let mut content = Content::new(item.clone());
        content.image = self.images.get(item_id).copied().unwrap_or(ImageState::Pending);
        content.resolve(result);
        self.images.insert(item_id.to_owned(), content.image);

        for obj in &mut self.objects {
            if obj.content().item.id == item_id {
                obj.content_mut().image = content.image;
            }
        }
    }

    /// Report the host viewport width. Re-populates when the size class
    /// changes, deferred until no interaction is in progress.
    pub fn set_viewport_width(&mut self, px: f32) {
        let class = ViewportClass::from_width(px);
        if class == self.viewport {
            self.pending_viewport = None;
            return;
        }
        self.pending_viewport = Some(class);
        self.apply_pending_viewport();
    }

    // -----------------------------------------------------------------------
    // Step
    // -----------------------------------------------------------------------

    /// Advance the whole scene by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.cfg.max_step)
        } else {
            0.0
        };
        self.elapsed += dt as f64;

        self.timers.begin();
        self.apply_input();
        // Parallax freezes while anything holds focus so the focus target stays put.
        if self.focus_slot.is_none() {
            self.camera
                .update_parallax(self.pointer_ndc, self.cfg.parallax, dt);
        }
        self.timers.end(StepPhase::Input);

        self.timers.begin();
        self.swarm.step(&self.cfg.bounds, self.elapsed as f32);
        self.timers.end(StepPhase::Flock);

        self.timers.begin();
        self.update_objects(dt);
        self.apply_pending_viewport();
        self.update_cursor();
        self.timers.end(StepPhase::Objects);

        self.timers.begin();
        self.shade();
        self.timers.end(StepPhase::Shading);
    }

    /// Fill renderer instance buffers from the latest step.
    pub fn build_instances(
        &self,
        cards: &mut Vec<CardInstance>,
        particles: &mut Vec<ParticleInstance>,
    ) {
        cards.clear();
        particles.clear();
        for (obj, shade) in self.objects.iter().zip(&self.card_shades) {
            cards.push(CardInstance::from_object(obj, shade));
        }
        for (boid, shade) in self.swarm.boids().iter().zip(&self.particle_shades) {
            particles.push(ParticleInstance::from_boid(boid, shade));
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn try_focus(&mut self, id: ObjectId) -> Result<(), FocusError> {
        if id.index() >= self.objects.len() {
            return Err(FocusError::UnknownObject(id));
        }
        if let Some(active) = self.focus_slot {
            return Err(FocusError::Busy { active });
        }
        let obj = &mut self.objects[id.index()];
        if !obj.begin_focus() {
            return Err(FocusError::NotFocusable(id));
        }
        log::info!("focus {:?} ({})", id, obj.content().item.id);
        self.focus_slot = Some(id);
        self.events.push(SceneEvent::FocusChanged(Some(FocusInfo {
            object: id,
            item: obj.content().item.clone(),
        })));
        Ok(())
    }

    fn apply_input(&mut self) {
        let threshold = self.cfg.interaction.drag_threshold_px;
        while let Some(event) = self.input.pop() {
            match event {
                InputEvent::PointerDown { object, at } => {
                    if self.captured.is_some() || self.focus_slot.is_some() {
                        continue;
                    }
                    if let Some(obj) = self.objects.get_mut(object.index()) {
                        if obj.pointer_down(at.world, at.screen) {
                            self.captured = Some(object);
                        }
                    }
                }
                InputEvent::PointerMove { at } => {
                    let Some(id) = self.captured else { continue };
                    if let Some(obj) = self.objects.get_mut(id.index()) {
                        if obj.pointer_move(at.world, at.screen, threshold) {
                            log::debug!("drag engaged on {:?}", id);
                        }
                    }
                }
                InputEvent::PointerUp { at } => {
                    let Some(id) = self.captured.take() else { continue };
                    let Some(obj) = self.objects.get_mut(id.index()) else {
                        continue;
                    };
                    obj.pointer_move(at.world, at.screen, threshold);
                    match obj.pointer_up() {
                        Release::Click => {
                            let _ = self.request_focus(id);
                        }
                        Release::DragEnd => log::debug!("{:?} released, snapping back", id),
                        Release::Ignored => {}
                    }
                }
                InputEvent::Hover(target) => self.set_hovered(target),
                InputEvent::PointerNdc(ndc) => {
                    if ndc.is_finite() {
                        self.pointer_ndc = ndc;
                    }
                }
                InputEvent::Cancel => {
                    self.request_unfocus();
                }
            }
        }
    }

    fn set_hovered(&mut self, target: Option<ObjectId>) {
        let target = target.filter(|id| id.index() < self.objects.len());
        self.hovered = target;
        for obj in &mut self.objects {
            obj.set_hovered(Some(obj.id()) == target);
        }
    }

    fn update_objects(&mut self, dt: f32) {
        let frame = Frame {
            elapsed: self.elapsed as f32,
            dt,
            camera: &self.camera,
            motion: &self.cfg.motion,
            interaction: &self.cfg.interaction,
        };
        for obj in &mut self.objects {
            obj.update(&frame);
        }

        if let Some(id) = self.focus_slot {
            let settled = self
                .objects
                .get(id.index())
                .map_or(true, |obj| obj.phase() == Phase::Idle);
            if settled {
                log::debug!("focus slot released by {:?}", id);
                self.focus_slot = None;
            }
        }
    }

    fn update_cursor(&mut self) {
        let hint = if let Some(id) = self.captured {
            match self.object(id).and_then(|obj| obj.state().drag()) {
                Some(drag) if drag.engaged => CursorHint::Grabbing,
                Some(_) => CursorHint::Pointer,
                None => CursorHint::Default,
            }
        } else {
            let grabbable = self.focus_slot.is_none()
                && self
                    .hovered
                    .and_then(|id| self.object(id))
                    .is_some_and(|obj| obj.phase() == Phase::Idle);
            if grabbable {
                CursorHint::Grab
            } else {
                CursorHint::Default
            }
        };
        if hint != self.cursor {
            self.cursor = hint;
            self.events.push(SceneEvent::CursorChanged(hint));
        }
    }

    fn shade(&mut self) {
        let t = self.elapsed as f32;
        let view = View::from(&self.camera);
        self.card_shades.clear();
        for obj in &self.objects {
            let surface = Surface::Frame {
                pose: obj.pose(),
                hover: obj.hover(),
            };
            self.card_shades
                .push(self.programs.shade(&surface, t, &view));
        }
        self.particle_shades.clear();
        for boid in self.swarm.boids() {
            let surface = Surface::Particle {
                position: boid.position,
                phase: boid.phase,
                scale: boid.scale,
            };
            self.particle_shades
                .push(self.programs.shade(&surface, t, &view));
        }
    }

    fn is_at_rest(&self) -> bool {
        self.captured.is_none()
            && self.focus_slot.is_none()
            && self.objects.iter().all(|obj| obj.phase() == Phase::Idle)
    }

    fn apply_pending_viewport(&mut self) {
        let Some(class) = self.pending_viewport else {
            return;
        };
        if !self.is_at_rest() {
            return;
        }
        self.pending_viewport = None;
        log::info!("viewport {:?} -> {:?}, re-populating", self.viewport, class);
        self.viewport = class;
        self.populate();
    }

    /// Pick items and place one floating object per item across the band.
    fn populate(&mut self) {
        let count = self.viewport.object_count().min(self.items.len());

        let mut order: Vec<usize> = (0..self.items.len()).collect();
        fastrand::Rng::with_seed(self.seed ^ PICK_SALT).shuffle(&mut order);
        order.truncate(count);

        let mut rng = fastrand::Rng::with_seed(self.seed ^ PLACE_SALT);
        let band = self.viewport.band_width();
        let slot = band / count.max(1) as f32;
        let (z_near, z_far) = self.cfg.band_depth;
        let scale = self.viewport.card_scale();

        self.objects.clear();
        self.hovered = None;
        for (i, &item_idx) in order.iter().enumerate() {
            let jitter = Vec3::new(
                (rng.f32() * 2.0 - 1.0) * SLOT_JITTER * slot,
                (rng.f32() * 2.0 - 1.0) * BAND_JITTER_Y,
                0.0,
            );
            let base = Vec3::new(
                -band * 0.5 + slot * (i as f32 + 0.5),
                self.cfg.band_y,
                z_near + (z_far - z_near) * rng.f32(),
            ) + jitter;

            let item = self.items[item_idx].clone();
            let mut content = Content::new(item);
            content.image = self
                .images
                .get(&content.item.id)
                .copied()
                .unwrap_or(ImageState::Pending);
            if content.image == ImageState::Pending && self.requested.insert(content.item.id.clone()) {
                self.events.push(SceneEvent::ImageRequested {
                    item_id: content.item.id.clone(),
                    locator: content.item.image.clone(),
                });
            }

            self.objects.push(FloatingObject::new(
                ObjectId(i as u32),
                base,
                scale,
                OffsetSeed::derive(self.seed, i),
                content,
                &self.cfg.motion,
                self.elapsed as f32,
            ));
        }
        log::info!("placed {} floating objects", self.objects.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerSample;

    const DT: f32 = 1.0 / 60.0;

    fn items(n: usize) -> Vec<DisplayItem> {
        (0..n)
            .map(|i| {
                DisplayItem::new(format!("item-{i}"), format!("https://img.example/{i}.jpg"))
                    .with_title(format!("Work {i}"))
            })
            .collect()
    }

    fn scene(width: f32) -> Scene {
        Scene::new(SceneConfig::default().with_seed(0xdead_beef), items(8), width)
    }

    fn run(scene: &mut Scene, frames: usize) {
        for _ in 0..frames {
            scene.step(DT);
        }
    }

    fn press(scene: &mut Scene, id: ObjectId, screen: Vec2) -> Vec3 {
        let world = scene.object(id).unwrap().pose().position;
        scene.push_input(InputEvent::PointerDown {
            object: id,
            at: PointerSample::new(screen, world),
        });
        world
    }

    #[test]
    fn population_follows_viewport_class() {
        assert_eq!(scene(400.0).objects().len(), 3);
        assert_eq!(scene(800.0).objects().len(), 4);
        assert_eq!(scene(1600.0).objects().len(), 5);
        let few = Scene::new(SceneConfig::default().with_seed(1), items(2), 1600.0);
        assert_eq!(few.objects().len(), 2);
        assert_eq!(scene(1600.0).boids().len(), 25);
    }

    #[test]
    fn placement_is_spread_and_seeded() {
        let a = scene(1600.0);
        let b = scene(1600.0);
        let xs: Vec<f32> = a.objects().iter().map(|o| o.base_position().x).collect();
        for pair in xs.windows(2) {
            assert!(pair[1] - pair[0] > 1.4, "objects too close: {pair:?}");
        }
        for (oa, ob) in a.objects().iter().zip(b.objects()) {
            assert_eq!(oa.base_position(), ob.base_position());
            assert_eq!(oa.content().item.id, ob.content().item.id);
        }
        let other = Scene::new(SceneConfig::default().with_seed(7), items(8), 1600.0);
        assert_ne!(
            other.objects()[0].base_position(),
            a.objects()[0].base_position()
        );
    }

    #[test]
    fn images_requested_once_per_item() {
        let mut s = scene(1600.0);
        let requests: Vec<_> = s
            .drain_events()
            .filter(|e| matches!(e, SceneEvent::ImageRequested { .. }))
            .collect();
        assert_eq!(requests.len(), 5);
        s.set_viewport_width(400.0);
        assert_eq!(s.drain_events().count(), 0);
    }

    #[test]
    fn only_one_object_holds_focus() {
        let mut s = scene(1600.0);
        assert!(s.request_focus(ObjectId(0)).is_ok());
        assert_eq!(
            s.request_focus(ObjectId(1)),
            Err(FocusError::Busy { active: ObjectId(0) })
        );
        for _ in 0..120 {
            s.step(DT);
            let holders = s.objects().iter().filter(|o| o.state().holds_focus()).count();
            assert!(holders <= 1);
            assert_eq!(s.objects()[1].phase(), Phase::Idle);
        }
        assert_eq!(s.objects()[0].phase(), Phase::Focused);
        assert_eq!(s.focused_item().map(|i| i.id.as_str()), Some(s.objects()[0].content().item.id.as_str()));
    }

    #[test]
    fn unknown_focus_target_is_a_no_op() {
        let mut s = scene(800.0);
        s.drain_events().for_each(drop);
        assert_eq!(
            s.request_focus(ObjectId(99)),
            Err(FocusError::UnknownObject(ObjectId(99)))
        );
        assert_eq!(s.focus_holder(), None);
        assert_eq!(s.drain_events().count(), 0);
    }

    #[test]
    fn short_press_focuses() {
        let mut s = scene(1600.0);
        let world = press(&mut s, ObjectId(2), Vec2::new(300.0, 300.0));
        s.push_input(InputEvent::PointerUp {
            at: PointerSample::new(Vec2::new(302.0, 301.0), world),
        });
        s.step(DT);
        assert_eq!(s.objects()[2].phase(), Phase::Focusing);
        assert_eq!(s.focus_holder(), Some(ObjectId(2)));
    }

    #[test]
    fn drag_snaps_back_and_never_focuses() {
        let mut s = scene(1600.0);
        let world = press(&mut s, ObjectId(1), Vec2::new(300.0, 300.0));
        s.step(DT);
        assert_eq!(s.cursor_hint(), CursorHint::Pointer);
        s.push_input(InputEvent::PointerMove {
            at: PointerSample::new(Vec2::new(340.0, 310.0), world + Vec3::new(1.0, 0.3, 0.0)),
        });
        s.step(DT);
        assert_eq!(s.cursor_hint(), CursorHint::Grabbing);
        s.push_input(InputEvent::PointerUp {
            at: PointerSample::new(Vec2::new(340.0, 310.0), world + Vec3::new(1.0, 0.3, 0.0)),
        });
        s.step(DT);
        assert_eq!(s.objects()[1].phase(), Phase::SnappingBack);
        assert_eq!(s.focus_holder(), None);
        run(&mut s, 100);
        assert_eq!(s.objects()[1].phase(), Phase::Idle);
    }

    #[test]
    fn cancel_unfocuses_and_frees_the_slot() {
        let mut s = scene(1600.0);
        s.request_focus(ObjectId(3)).unwrap();
        run(&mut s, 40);
        s.drain_events().for_each(drop);

        s.push_input(InputEvent::Cancel);
        s.step(DT);
        assert_eq!(s.objects()[3].phase(), Phase::Unfocusing);
        assert!(s.focused().is_none());
        let events: Vec<_> = s.drain_events().collect();
        assert!(events.contains(&SceneEvent::FocusChanged(None)));

        // Still mid-transition: a new focus is rejected.
        assert!(s.request_focus(ObjectId(0)).is_err());
        run(&mut s, 30);
        assert_eq!(s.focus_holder(), None);
        assert!(s.request_focus(ObjectId(0)).is_ok());
    }

    #[test]
    fn image_resolution_keeps_interaction_state() {
        let mut s = scene(1600.0);
        s.request_focus(ObjectId(0)).unwrap();
        run(&mut s, 10);
        let id = s.objects()[0].content().item.id.clone();
        s.resolve_image(&id, Ok(ImageInfo { width: 1200, height: 800 }));
        assert_eq!(s.objects()[0].phase(), Phase::Focusing);
        assert!((s.objects()[0].content().aspect_ratio() - 1.5).abs() < 1e-5);

        let other = s.objects()[1].content().item.id.clone();
        s.resolve_image(&other, Err(ImageError::NotFound(other.clone())));
        assert!(s.objects()[1].content().is_placeholder());
    }

    #[test]
    fn resize_waits_for_rest() {
        let mut s = scene(1600.0);
        s.request_focus(ObjectId(0)).unwrap();
        s.set_viewport_width(500.0);
        assert_eq!(s.objects().len(), 5);
        run(&mut s, 30);
        s.request_unfocus();
        run(&mut s, 30);
        assert_eq!(s.viewport(), ViewportClass::Small);
        assert_eq!(s.objects().len(), 3);
    }

    #[test]
    fn hover_shows_grab_cursor_and_brightens() {
        let mut s = scene(1600.0);
        run(&mut s, 1);
        let before = s.card_shades()[0].intensity;
        s.push_input(InputEvent::Hover(Some(ObjectId(0))));
        run(&mut s, 60);
        assert_eq!(s.cursor_hint(), CursorHint::Grab);
        assert!(s.card_shades()[0].intensity > before);
        s.push_input(InputEvent::Hover(None));
        s.step(DT);
        assert_eq!(s.cursor_hint(), CursorHint::Default);
    }

    #[test]
    fn instances_match_entities() {
        let mut s = scene(800.0);
        run(&mut s, 3);
        let (mut cards, mut particles) = (Vec::new(), Vec::new());
        s.build_instances(&mut cards, &mut particles);
        assert_eq!(cards.len(), 4);
        assert_eq!(particles.len(), 25);
    }

    #[test]
    fn clock_stays_exact_over_a_long_session() {
        let cfg = SceneConfig::default().with_seed(4).with_particle_count(0);
        let mut s = Scene::new(cfg, Vec::new(), 1440.0);
        // One hour at 60 Hz.
        let frames = 60 * 60 * 60;
        run(&mut s, frames);
        let expected = frames as f64 * DT as f64;
        assert!((s.elapsed() - expected).abs() < 1e-6, "{}", s.elapsed());
    }
}
