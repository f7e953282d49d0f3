//! Ray picking across every tier, with single-element highlight.
//!
//! [`PickResolver`] is a two-state machine: idle, or one element
//! highlighted with its original color remembered. A pick casts a ray from
//! the camera, gathers candidates from every instanced tier (slab test
//! against each instance's bounding box) and from the impostor tier
//! (closest-approach threshold), then walks them nearest-first.
//!
//! The box test over-selects, so an instanced candidate is only confirmed
//! when the ray also meets the instance's true sphere. A confirmed
//! candidate is ranked and reported at that sphere's near surface. A
//! rejected candidate does not end the pick: resolution continues with the
//! next-nearest candidate of any tier.

mod intersect;

use glam::Vec3;
pub use intersect::{ray_aabb, ray_sphere, Ray};

use crate::camera::{Camera, Viewport};
use crate::error::Result;
use crate::options::{PickMode, PickingOptions};
use crate::population::Tier;
use crate::store::{ImpostorTierStore, InstancedTierStore, TierStores};
use crate::util::color::Rgb;

/// The one highlighted element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Tier of the highlighted element.
    pub tier: Tier,
    /// Index within the tier's store.
    pub index: usize,
    /// Color to restore on clear.
    pub original_color: Rgb,
}

/// Result of a pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickOutcome {
    /// A new element is highlighted.
    Selected {
        /// Tier of the hit.
        tier: Tier,
        /// Index within the tier's store.
        index: usize,
        /// World-space hit point.
        point: Vec3,
        /// Distance along the ray.
        distance: f32,
    },
    /// Nothing was hit and the previous highlight was restored.
    Cleared,
    /// Nothing was hit and state is unchanged.
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PickState {
    Idle,
    Highlighted(Selection),
}

/// One ray hit before confirmation.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    tier: Tier,
    index: usize,
    distance: f32,
    point: Vec3,
    confirmed: bool,
}

/// Resolves pointer picks into highlight changes on the tier stores.
#[derive(Debug, Clone)]
pub struct PickResolver {
    highlight_color: Rgb,
    sphere_radius: f32,
    impostor_threshold: f32,
    mode: PickMode,
    state: PickState,
}

impl PickResolver {
    /// Idle resolver configured from `options`.
    #[must_use]
    pub fn new(options: &PickingOptions) -> Self {
        Self {
            highlight_color: options.highlight_color,
            sphere_radius: options.sphere_radius,
            impostor_threshold: options.impostor_threshold,
            mode: options.mode,
            state: PickState::Idle,
        }
    }

    /// Current selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        match &self.state {
            PickState::Idle => None,
            PickState::Highlighted(selection) => Some(selection),
        }
    }

    /// Color written over selected elements.
    #[must_use]
    pub fn highlight_color(&self) -> Rgb {
        self.highlight_color
    }

    /// Pick at a pointer position in viewport pixels.
    ///
    /// The pointer must already be clamped to the viewport.
    pub fn pick(
        &mut self,
        x: f32,
        y: f32,
        camera: &Camera,
        viewport: Viewport,
        stores: &mut TierStores,
    ) -> Result<PickOutcome> {
        let ray = camera.ray_through_ndc(viewport.to_ndc(x, y));
        self.pick_ray(&ray, stores)
    }

    /// Pick along a world-space ray.
    pub fn pick_ray(
        &mut self,
        ray: &Ray,
        stores: &mut TierStores,
    ) -> Result<PickOutcome> {
        let Some(hit) = self.nearest_confirmed(ray, stores)? else {
            let cleared =
                self.mode == PickMode::ClearOnMiss && self.clear(stores)?;
            return Ok(if cleared {
                PickOutcome::Cleared
            } else {
                PickOutcome::Missed
            });
        };

        // Restore first: re-picking the highlighted element must record
        // its true color, not the highlight.
        let _ = self.clear(stores)?;
        let colors = stores.colors_mut(hit.tier);
        let original_color = colors.color(hit.index)?;
        colors.set_color(hit.index, self.highlight_color)?;
        self.state = PickState::Highlighted(Selection {
            tier: hit.tier,
            index: hit.index,
            original_color,
        });
        log::info!(
            "selected {} #{} at distance {:.2}",
            hit.tier,
            hit.index,
            hit.distance
        );

        Ok(PickOutcome::Selected {
            tier: hit.tier,
            index: hit.index,
            point: hit.point,
            distance: hit.distance,
        })
    }

    /// Restore the highlighted element's color and return to idle.
    ///
    /// Returns whether anything was cleared.
    pub fn clear(&mut self, stores: &mut TierStores) -> Result<bool> {
        let PickState::Highlighted(selection) = self.state else {
            return Ok(false);
        };
        stores
            .colors_mut(selection.tier)
            .set_color(selection.index, selection.original_color)?;
        self.state = PickState::Idle;
        log::debug!("cleared {} #{}", selection.tier, selection.index);
        Ok(true)
    }

    fn nearest_confirmed(
        &self,
        ray: &Ray,
        stores: &TierStores,
    ) -> Result<Option<Candidate>> {
        let mut candidates = Vec::new();
        for store in stores.instanced() {
            self.instanced_candidates(ray, store, &mut candidates)?;
        }
        if let Some(store) = stores.impostors() {
            self.impostor_candidates(ray, store, &mut candidates);
        }
        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let rejected = candidates.iter().take_while(|c| !c.confirmed).count();
        log::debug!(
            "pick: {} candidates, {} rejected before resolution",
            candidates.len(),
            rejected
        );
        Ok(candidates.into_iter().find(|c| c.confirmed))
    }

    fn instanced_candidates(
        &self,
        ray: &Ray,
        store: &InstancedTierStore,
        out: &mut Vec<Candidate>,
    ) -> Result<()> {
        for index in 0..store.active_count() {
            let (center, radius) =
                store.bounding_sphere(index, self.sphere_radius)?;
            let extent = Vec3::splat(radius);
            let Some((t_enter, t_exit)) =
                ray_aabb(ray, center - extent, center + extent)
            else {
                continue;
            };
            // Box survivors rank by the sphere surface once confirmed.
            let candidate = match ray_sphere(ray, center, radius) {
                Some(t) => Candidate {
                    tier: store.tier(),
                    index,
                    distance: t,
                    point: ray.at(t),
                    confirmed: true,
                },
                None => Candidate {
                    tier: store.tier(),
                    index,
                    distance: t_enter.max(0.0),
                    point: ray.at(t_enter.max(0.0).min(t_exit)),
                    confirmed: false,
                },
            };
            out.push(candidate);
        }
        Ok(())
    }

    fn impostor_candidates(
        &self,
        ray: &Ray,
        store: &ImpostorTierStore,
        out: &mut Vec<Candidate>,
    ) {
        let threshold_sq = self.impostor_threshold * self.impostor_threshold;
        for (index, position) in store.positions().iter().enumerate() {
            let position = Vec3::from_array(*position);
            let t = ray.closest_t(position);
            if t < 0.0 {
                continue;
            }
            let point = ray.at(t);
            if point.distance_squared(position) < threshold_sq {
                out.push(Candidate {
                    tier: Tier::Far,
                    index,
                    distance: t,
                    point,
                    confirmed: true,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{FarTierMode, TierOptions};

    const RED: Rgb = [1.0, 0.0, 0.0];
    const GREEN: Rgb = [0.0, 1.0, 0.0];
    const BLUE: Rgb = [0.0, 0.0, 1.0];
    const YELLOW: Rgb = [1.0, 1.0, 0.0];

    fn resolver() -> PickResolver {
        PickResolver::new(&PickingOptions::default())
    }

    fn down_z(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 50.0), Vec3::NEG_Z)
    }

    /// Near at the origin, mid at x = 10, impostor at x = -10, z = -20.
    fn scene() -> TierStores {
        let mut stores = TierStores::with_capacity(4, &TierOptions::default());
        let _ = stores.append(Tier::Near, Vec3::ZERO, RED).unwrap();
        let _ = stores.append(Tier::Mid, Vec3::new(10.0, 0.0, 0.0), GREEN).unwrap();
        let _ = stores
            .append(Tier::Far, Vec3::new(-10.0, 0.0, -20.0), BLUE)
            .unwrap();
        stores
    }

    #[test]
    fn center_ray_selects_and_highlights() {
        let mut stores = scene();
        let mut picker = resolver();
        let outcome = picker.pick_ray(&down_z(0.0, 0.0), &mut stores).unwrap();
        match outcome {
            PickOutcome::Selected { tier, index, point, distance } => {
                assert_eq!((tier, index), (Tier::Near, 0));
                assert!((distance - 49.5).abs() < 1e-4);
                assert!(point.distance(Vec3::new(0.0, 0.0, 0.5)) < 1e-4);
            }
            other => panic!("expected selection, got {other:?}"),
        }
        assert_eq!(stores.near.color(0).unwrap(), YELLOW);
        assert_eq!(
            picker.selection(),
            Some(&Selection { tier: Tier::Near, index: 0, original_color: RED })
        );
    }

    #[test]
    fn box_corner_ray_is_not_a_selection() {
        let mut stores = scene();
        let mut picker = resolver();
        // Inside the box (|x|, |y| < 0.5) but 0.636 from the center.
        let outcome =
            picker.pick_ray(&down_z(0.45, 0.45), &mut stores).unwrap();
        assert_eq!(outcome, PickOutcome::Missed);
        assert_eq!(stores.near.color(0).unwrap(), RED);
        assert!(picker.selection().is_none());
    }

    #[test]
    fn rejected_box_hit_falls_through_to_farther_impostor() {
        let mut stores = TierStores::with_capacity(2, &TierOptions::default());
        let _ = stores.append(Tier::Near, Vec3::ZERO, RED).unwrap();
        let _ = stores
            .append(Tier::Far, Vec3::new(0.45, 0.45, -30.0), BLUE)
            .unwrap();
        let mut picker = resolver();
        let outcome =
            picker.pick_ray(&down_z(0.45, 0.45), &mut stores).unwrap();
        assert!(matches!(
            outcome,
            PickOutcome::Selected { tier: Tier::Far, index: 0, .. }
        ));
        assert_eq!(stores.near.color(0).unwrap(), RED);
        assert_eq!(stores.colors(Tier::Far).color(0).unwrap(), YELLOW);
    }

    #[test]
    fn nearer_candidate_wins_across_tiers() {
        let mut stores = TierStores::with_capacity(2, &TierOptions::default());
        let _ = stores.append(Tier::Mid, Vec3::new(0.0, 0.0, 5.0), GREEN).unwrap();
        let _ = stores.append(Tier::Near, Vec3::ZERO, RED).unwrap();
        let mut picker = resolver();
        let outcome = picker.pick_ray(&down_z(0.0, 0.0), &mut stores).unwrap();
        assert!(matches!(
            outcome,
            PickOutcome::Selected { tier: Tier::Mid, index: 0, .. }
        ));
    }

    #[test]
    fn highlight_round_trip_restores_exact_color() {
        let mut stores = scene();
        let odd = [0.123_456_79, 0.987_654_3, 0.000_001];
        stores.near.set_color(0, odd).unwrap();
        let mut picker = resolver();
        let _ = picker.pick_ray(&down_z(0.0, 0.0), &mut stores).unwrap();
        let outcome = picker.pick_ray(&down_z(0.0, 30.0), &mut stores).unwrap();
        assert_eq!(outcome, PickOutcome::Cleared);
        let restored = stores.near.color(0).unwrap();
        assert_eq!(restored.map(f32::to_bits), odd.map(f32::to_bits));
        assert!(picker.selection().is_none());
    }

    #[test]
    fn sequential_picks_leave_only_the_second_highlighted() {
        let mut stores = scene();
        let mut picker = resolver();
        let _ = picker.pick_ray(&down_z(0.0, 0.0), &mut stores).unwrap();
        let _ = picker.pick_ray(&down_z(10.0, 0.0), &mut stores).unwrap();
        assert_eq!(stores.near.color(0).unwrap(), RED);
        assert_eq!(stores.mid.color(0).unwrap(), YELLOW);
        assert_eq!(picker.selection().unwrap().tier, Tier::Mid);
        assert_eq!(picker.selection().unwrap().original_color, GREEN);
    }

    #[test]
    fn repicking_the_highlighted_element_keeps_its_true_color() {
        let mut stores = scene();
        let mut picker = resolver();
        let _ = picker.pick_ray(&down_z(0.0, 0.0), &mut stores).unwrap();
        let _ = picker.pick_ray(&down_z(0.0, 0.0), &mut stores).unwrap();
        assert_eq!(picker.selection().unwrap().original_color, RED);
        assert!(picker.clear(&mut stores).unwrap());
        assert_eq!(stores.near.color(0).unwrap(), RED);
        assert!(!picker.clear(&mut stores).unwrap());
    }

    #[test]
    fn impostor_threshold_bounds_hits() {
        let mut stores = scene();
        let mut picker = resolver();
        let hit = picker.pick_ray(&down_z(-10.9, 0.0), &mut stores).unwrap();
        assert!(matches!(hit, PickOutcome::Selected { tier: Tier::Far, .. }));
        let _ = picker.clear(&mut stores).unwrap();
        let miss = picker.pick_ray(&down_z(-11.1, 0.0), &mut stores).unwrap();
        assert_eq!(miss, PickOutcome::Missed);
    }

    #[test]
    fn elements_behind_the_ray_are_ignored() {
        let mut stores = scene();
        let mut picker = resolver();
        let away = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::Z);
        assert_eq!(picker.pick_ray(&away, &mut stores).unwrap(), PickOutcome::Missed);
        let behind_impostor = Ray::new(Vec3::new(-10.0, 0.0, -30.0), Vec3::NEG_Z);
        assert_eq!(
            picker.pick_ray(&behind_impostor, &mut stores).unwrap(),
            PickOutcome::Missed
        );
    }

    #[test]
    fn empty_scene_is_a_no_op() {
        let mut stores = TierStores::with_capacity(16, &TierOptions::default());
        let mut picker = resolver();
        assert_eq!(
            picker.pick_ray(&down_z(0.0, 0.0), &mut stores).unwrap(),
            PickOutcome::Missed
        );
        assert!(picker.selection().is_none());
    }

    #[test]
    fn keep_on_miss_leaves_highlight_in_place() {
        let mut stores = scene();
        let mut picker = PickResolver::new(&PickingOptions {
            mode: PickMode::KeepOnMiss,
            ..PickingOptions::default()
        });
        let _ = picker.pick_ray(&down_z(0.0, 0.0), &mut stores).unwrap();
        let outcome = picker.pick_ray(&down_z(0.0, 30.0), &mut stores).unwrap();
        assert_eq!(outcome, PickOutcome::Missed);
        assert_eq!(stores.near.color(0).unwrap(), YELLOW);
        assert!(picker.selection().is_some());
    }

    #[test]
    fn configured_sphere_radius_widens_hits() {
        let mut stores = TierStores::with_capacity(1, &TierOptions::default());
        let _ = stores.append(Tier::Near, Vec3::ZERO, RED).unwrap();
        let mut picker = PickResolver::new(&PickingOptions {
            sphere_radius: 2.0,
            ..PickingOptions::default()
        });
        let outcome = picker.pick_ray(&down_z(1.5, 0.0), &mut stores).unwrap();
        assert!(matches!(outcome, PickOutcome::Selected { .. }));
    }

    #[test]
    fn instanced_far_tier_is_radius_checked() {
        let tiers = TierOptions {
            far_mode: FarTierMode::Instanced,
            ..TierOptions::default()
        };
        let mut stores = TierStores::with_capacity(1, &tiers);
        let _ = stores.append(Tier::Far, Vec3::ZERO, BLUE).unwrap();
        let mut picker = resolver();
        assert_eq!(
            picker.pick_ray(&down_z(0.45, 0.45), &mut stores).unwrap(),
            PickOutcome::Missed
        );
        assert!(matches!(
            picker.pick_ray(&down_z(0.0, 0.2), &mut stores).unwrap(),
            PickOutcome::Selected { tier: Tier::Far, .. }
        ));
    }

    #[test]
    fn screen_pick_through_camera() {
        let mut stores = scene();
        let mut picker = resolver();
        let camera = Camera::from_options(
            &crate::options::CameraOptions::default(),
            16.0 / 9.0,
        );
        let viewport = Viewport::new(1280, 720);
        let outcome = picker
            .pick(640.0, 360.0, &camera, viewport, &mut stores)
            .unwrap();
        assert!(matches!(
            outcome,
            PickOutcome::Selected { tier: Tier::Near, index: 0, .. }
        ));
        let corner = picker.pick(0.0, 0.0, &camera, viewport, &mut stores).unwrap();
        assert_eq!(corner, PickOutcome::Cleared);
    }

    #[test]
    fn grazed_sphere_loses_to_a_nearer_impostor() {
        // The near sphere's box face is at t = 49.5 but the ray meets the
        // sphere itself at t = 49.7, behind the impostor at t = 49.6.
        let mut stores = TierStores::with_capacity(2, &TierOptions::default());
        let _ = stores.append(Tier::Near, Vec3::new(0.4, 0.0, 0.0), RED).unwrap();
        let _ = stores.append(Tier::Far, Vec3::new(0.0, 0.0, 0.4), BLUE).unwrap();
        let mut picker = resolver();
        let outcome = picker.pick_ray(&down_z(0.0, 0.0), &mut stores).unwrap();
        match outcome {
            PickOutcome::Selected { tier, index, distance, .. } => {
                assert_eq!((tier, index), (Tier::Far, 0));
                assert!((distance - 49.6).abs() < 1e-4);
            }
            other => panic!("expected impostor selection, got {other:?}"),
        }
        assert_eq!(stores.near.color(0).unwrap(), RED);
    }

    #[test]
    fn grazed_sphere_loses_to_a_nearer_sphere_surface() {
        // Mid sphere straight on the ray with its surface at t = 49.55.
        let mut stores = TierStores::with_capacity(2, &TierOptions::default());
        let _ = stores.append(Tier::Near, Vec3::new(0.4, 0.0, 0.0), RED).unwrap();
        let _ = stores
            .append(Tier::Mid, Vec3::new(0.0, 0.0, -0.05), GREEN)
            .unwrap();
        let mut picker = resolver();
        let outcome = picker.pick_ray(&down_z(0.0, 0.0), &mut stores).unwrap();
        match outcome {
            PickOutcome::Selected { tier, distance, .. } => {
                assert_eq!(tier, Tier::Mid);
                assert!((distance - 49.55).abs() < 1e-4);
            }
            other => panic!("expected mid selection, got {other:?}"),
        }
    }

    #[test]
    fn off_center_hit_reports_the_sphere_surface() {
        let mut stores = TierStores::with_capacity(1, &TierOptions::default());
        let _ = stores.append(Tier::Near, Vec3::ZERO, RED).unwrap();
        let mut picker = resolver();
        let outcome = picker.pick_ray(&down_z(0.3, 0.0), &mut stores).unwrap();
        let PickOutcome::Selected { point, distance, .. } = outcome else {
            panic!("expected selection, got {outcome:?}");
        };
        assert!((distance - 49.6).abs() < 1e-4);
        assert!((point.length() - 0.5).abs() < 1e-4);
        assert!(point.distance(Vec3::new(0.3, 0.0, 0.4)) < 1e-4);
    }

    #[test]
    fn ray_from_inside_a_sphere_hits_at_zero() {
        let mut stores = TierStores::with_capacity(1, &TierOptions::default());
        let _ = stores.append(Tier::Near, Vec3::ZERO, RED).unwrap();
        let mut picker = resolver();
        let ray = Ray::new(Vec3::new(0.1, 0.0, 0.0), Vec3::X);
        let outcome = picker.pick_ray(&ray, &mut stores).unwrap();
        assert!(matches!(
            outcome,
            PickOutcome::Selected { tier: Tier::Near, distance, .. } if distance == 0.0
        ));
    }
}
