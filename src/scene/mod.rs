//! The tiered scene: stores, picker, camera, and the frame loop.
//!
//! [`TieredScene`] owns everything mutable. Picking takes `&mut self` and
//! rendering hands out shared borrows inside [`TieredScene::frame`], so the
//! two can never overlap.

mod marker;

use glam::Vec3;
pub use marker::{HitMarker, MARKER_RADIUS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::camera::{Camera, OrbitController, Viewport};
use crate::error::Result;
use crate::input::SceneCommand;
use crate::options::Options;
use crate::picking::{PickOutcome, PickResolver, Selection};
use crate::population::{partition_population, Tier};
use crate::renderer::{
    FrameRenderer, FrameSnapshot, HemisphereLight, ImpostorShading,
    ImpostorView, InstancedTierView,
};
use crate::store::{TierCounts, TierStores};

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// A partitioned population with picking and a camera.
#[derive(Debug)]
pub struct TieredScene {
    options: Options,
    stores: TierStores,
    picker: PickResolver,
    controller: OrbitController,
    light: HemisphereLight,
    shading: ImpostorShading,
    markers: Vec<HitMarker>,
    frame: u64,
}

impl TieredScene {
    /// Generate and partition the population described by `options`.
    ///
    /// Seeds from `options.population.seed`, or from OS entropy when unset.
    pub fn new(options: Options) -> Result<Self> {
        let mut rng = options
            .population
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self::with_rng(options, &mut rng)
    }

    /// Partition a population drawn from a caller-provided RNG.
    pub fn with_rng<R: Rng + ?Sized>(
        options: Options,
        rng: &mut R,
    ) -> Result<Self> {
        let stores =
            partition_population(&options.scene_config(), &options.tiers, rng)?;
        Ok(Self::from_stores(options, stores))
    }

    /// Wrap already-populated stores.
    #[must_use]
    pub fn from_stores(options: Options, stores: TierStores) -> Self {
        let viewport =
            Viewport::new(options.display.width, options.display.height);
        Self {
            picker: PickResolver::new(&options.picking),
            controller: OrbitController::new(&options.camera, viewport),
            light: HemisphereLight::from_options(&options.lighting),
            shading: ImpostorShading::from_options(&options.lighting),
            markers: Vec::new(),
            frame: 0,
            stores,
            options,
        }
    }

    // -- Accessors --

    /// Options the scene was built from.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Tier stores.
    #[must_use]
    pub fn stores(&self) -> &TierStores {
        &self.stores
    }

    /// Active count per tier.
    #[must_use]
    pub fn counts(&self) -> TierCounts {
        self.stores.counts()
    }

    /// Current selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.picker.selection()
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.controller.camera
    }

    /// Camera controller.
    #[must_use]
    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    /// Mutable camera controller.
    pub fn controller_mut(&mut self) -> &mut OrbitController {
        &mut self.controller
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.controller.viewport()
    }

    /// Live hit markers.
    #[must_use]
    pub fn markers(&self) -> &[HitMarker] {
        &self.markers
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    // -- Commands --

    /// Apply an input command. Returns the pick outcome for
    /// [`SceneCommand::Pick`].
    pub fn execute(
        &mut self,
        command: SceneCommand,
    ) -> Result<Option<PickOutcome>> {
        match command {
            SceneCommand::Pick { x, y } => self.pick(x, y).map(Some),
            SceneCommand::Orbit(delta) => {
                self.controller.rotate(delta);
                Ok(None)
            }
            SceneCommand::Pan(delta) => {
                self.controller.pan(delta);
                Ok(None)
            }
            SceneCommand::Zoom(delta) => {
                self.controller.zoom(delta);
                Ok(None)
            }
            SceneCommand::Resize { width, height } => {
                self.controller.resize(width, height);
                Ok(None)
            }
        }
    }

    /// Pick at a pointer position. The position is clamped to the viewport
    /// and a hit marker is spawned on a confirmed selection.
    pub fn pick(&mut self, x: f32, y: f32) -> Result<PickOutcome> {
        let viewport = self.controller.viewport();
        let (x, y) = viewport.clamp(x, y);
        let outcome = self.picker.pick(
            x,
            y,
            &self.controller.camera,
            viewport,
            &mut self.stores,
        )?;
        if let PickOutcome::Selected { point, .. } = outcome {
            self.spawn_marker(point);
        }
        Ok(outcome)
    }

    /// Restore the highlighted element, if any.
    pub fn clear_selection(&mut self) -> Result<bool> {
        self.picker.clear(&mut self.stores)
    }

    fn spawn_marker(&mut self, position: Vec3) {
        self.markers.push(HitMarker::new(
            position,
            self.options.picking.marker_lifetime_secs,
        ));
    }

    // -- Frame loop --

    /// Advance by `dt` seconds and hand one frame to `renderer`.
    ///
    /// Applies damped camera motion, ages hit markers, then drains every
    /// store's dirty color range into the snapshot.
    pub fn frame<F: FrameRenderer + ?Sized>(
        &mut self,
        dt: f32,
        renderer: &mut F,
    ) -> Result<()> {
        let _ = self.controller.update();
        self.markers.retain_mut(|m| m.tick(dt));

        let mut dirty =
            Tier::ALL.map(|tier| self.stores.take_dirty_colors(tier));

        let instanced = self
            .stores
            .instanced()
            .map(|store| InstancedTierView {
                tier: store.tier(),
                segments: store.segments(),
                active_count: store.active_count(),
                transforms: store.transforms(),
                colors: store.colors(),
                dirty: dirty[store.tier().index()].take(),
            })
            .collect();
        let impostors = self.stores.impostors().map(|store| ImpostorView {
            positions: store.positions(),
            colors: store.colors(),
            dirty: dirty[Tier::Far.index()].take(),
            shading: self.shading,
        });

        let snapshot = FrameSnapshot {
            frame: self.frame,
            camera: self.controller.uniform(),
            light: self.light,
            instanced,
            impostors,
            markers: &self.markers,
        };
        renderer.render(&snapshot)?;
        self.frame += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FarTierMode;
    use crate::renderer::RecordingRenderer;

    fn options(count: usize) -> Options {
        let mut opts = Options::default();
        opts.population.count = count;
        opts.population.seed = Some(11);
        opts
    }

    /// Scene with one near element at the origin and nothing else.
    fn single_element_scene() -> TieredScene {
        let opts = options(1);
        let mut stores = TierStores::with_capacity(1, &opts.tiers);
        let _ = stores.append(Tier::Near, Vec3::ZERO, [0.2, 0.4, 0.6]).unwrap();
        TieredScene::from_stores(opts, stores)
    }

    fn center(scene: &TieredScene) -> (f32, f32) {
        let vp = scene.viewport();
        (vp.width as f32 / 2.0, vp.height as f32 / 2.0)
    }

    #[test]
    fn new_scene_partitions_the_whole_population() {
        let scene = TieredScene::new(options(1000)).unwrap();
        assert_eq!(scene.counts().total(), 1000);
        assert!(scene.selection().is_none());
        assert_eq!(scene.camera().eye, Vec3::new(0.0, 0.0, 500.0));
    }

    #[test]
    fn center_click_highlights_and_spawns_marker() {
        let mut scene = single_element_scene();
        let (x, y) = center(&scene);
        let outcome = scene.execute(SceneCommand::Pick { x, y }).unwrap();
        assert!(matches!(
            outcome,
            Some(PickOutcome::Selected { tier: Tier::Near, index: 0, .. })
        ));
        assert_eq!(scene.stores().near.color(0).unwrap(), [1.0, 1.0, 0.0]);
        assert_eq!(scene.markers().len(), 1);
    }

    #[test]
    fn empty_click_restores_and_spawns_nothing() {
        let mut scene = single_element_scene();
        let (x, y) = center(&scene);
        let _ = scene.pick(x, y).unwrap();
        assert_eq!(scene.pick(0.0, 0.0).unwrap(), PickOutcome::Cleared);
        assert_eq!(scene.stores().near.color(0).unwrap(), [0.2, 0.4, 0.6]);
        assert_eq!(scene.markers().len(), 1);
    }

    #[test]
    fn out_of_viewport_pick_is_clamped() {
        let mut scene = single_element_scene();
        assert_eq!(scene.pick(-1e6, 1e6).unwrap(), PickOutcome::Missed);
    }

    #[test]
    fn frames_upload_highlight_changes_to_renderer() {
        let mut scene = single_element_scene();
        let mut renderer = RecordingRenderer::new();
        scene.frame(0.016, &mut renderer).unwrap();
        assert_eq!(renderer.mirror_color(Tier::Near, 0), Some([0.2, 0.4, 0.6]));

        let (x, y) = center(&scene);
        let _ = scene.pick(x, y).unwrap();
        scene.frame(0.016, &mut renderer).unwrap();
        assert_eq!(renderer.mirror_color(Tier::Near, 0), Some([1.0, 1.0, 0.0]));
        assert_eq!(renderer.last_marker_count(), 1);

        let _ = scene.clear_selection().unwrap();
        scene.frame(0.016, &mut renderer).unwrap();
        assert_eq!(renderer.mirror_color(Tier::Near, 0), Some([0.2, 0.4, 0.6]));
        assert_eq!(scene.frame_count(), 3);
    }

    #[test]
    fn markers_expire_after_their_lifetime() {
        let mut scene = single_element_scene();
        let mut renderer = RecordingRenderer::new();
        let (x, y) = center(&scene);
        let _ = scene.pick(x, y).unwrap();
        scene.frame(0.6, &mut renderer).unwrap();
        assert_eq!(scene.markers().len(), 1);
        scene.frame(0.6, &mut renderer).unwrap();
        assert!(scene.markers().is_empty());
        assert_eq!(renderer.last_marker_count(), 0);
    }

    #[test]
    fn dirty_ranges_are_drained_each_frame() {
        let mut scene = TieredScene::new(options(500)).unwrap();
        let mut renderer = RecordingRenderer::new();
        scene.frame(0.016, &mut renderer).unwrap();
        let first = renderer.uploads();
        scene.frame(0.016, &mut renderer).unwrap();
        assert_eq!(renderer.uploads(), first);
        assert!(scene.stores().near.dirty_colors().is_none());
    }

    #[test]
    fn instanced_far_mode_renders_three_tiers() {
        let mut opts = options(2000);
        opts.tiers.far_mode = FarTierMode::Instanced;
        let mut scene = TieredScene::new(opts).unwrap();
        let mut renderer = RecordingRenderer::new();
        scene.frame(0.016, &mut renderer).unwrap();
        assert!(scene.stores().impostors().is_none());
        assert!(renderer.mesh(4).is_some());
        let far = scene.stores().colors(Tier::Far).color(0).unwrap();
        assert_eq!(renderer.mirror_color(Tier::Far, 0), Some(far));
    }

    #[test]
    fn orbit_command_moves_camera_over_frames() {
        let mut scene = single_element_scene();
        let mut renderer = RecordingRenderer::new();
        let _ = scene
            .execute(SceneCommand::Orbit(glam::Vec2::new(50.0, 0.0)))
            .unwrap();
        scene.frame(0.016, &mut renderer).unwrap();
        assert!(scene.camera().eye.x.abs() > 0.0);
        let _ = scene
            .execute(SceneCommand::Resize { width: 640, height: 640 })
            .unwrap();
        assert_eq!(scene.viewport(), Viewport::new(640, 640));
    }

    #[test]
    fn with_rng_matches_the_seeded_constructor() {
        let seeded = TieredScene::new(options(300)).unwrap();
        let replayed =
            TieredScene::with_rng(options(300), &mut StdRng::seed_from_u64(11))
                .unwrap();
        assert_eq!(seeded.counts(), replayed.counts());
        assert_eq!(seeded.stores().near.colors(), replayed.stores().near.colors());
    }
}
