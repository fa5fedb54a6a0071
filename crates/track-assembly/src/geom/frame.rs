//! Chassis reference frame: world → chassis transforms and the wrap plane.
//!
//! The chassis frame is x forward, y left, z up. Wheels of one track lie in a
//! plane of constant y, so the wrap plane keeps chassis (x, z) and the lateral
//! y coordinate is carried separately.

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector2, Vector3};

use super::cfg::ClearanceCfg;
use super::types::{ShoeSpec, TrackGeometry, Wheel};
use crate::assembly::{AssemblyError, LinkPose};

/// Pose of the chassis in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChassisFrame {
    pub iso: Isometry3<f64>,
}

impl Default for ChassisFrame {
    fn default() -> Self {
        Self::identity()
    }
}

impl ChassisFrame {
    #[inline]
    pub fn new(iso: Isometry3<f64>) -> Self {
        Self { iso }
    }
    #[inline]
    pub fn identity() -> Self {
        Self {
            iso: Isometry3::identity(),
        }
    }

    /// World point expressed in the chassis frame.
    #[inline]
    pub fn to_local(&self, p: &Point3<f64>) -> Point3<f64> {
        self.iso.inverse_transform_point(p)
    }

    /// Wrap-plane projection of a chassis-frame point: `(x, z)`.
    #[inline]
    pub fn project(p: &Point3<f64>) -> Vector2<f64> {
        Vector2::new(p.x, p.z)
    }

    /// World pose of a placed link whose wrap plane sits at chassis `y = lateral`.
    pub fn link_to_world(&self, pose: &LinkPose, lateral: f64) -> Isometry3<f64> {
        let c = pose.center();
        let local = Isometry3::from_parts(
            Translation3::new(c.x, lateral, c.y),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), pose.angle),
        );
        self.iso * local
    }

    /// Snapshot the running gear from world-space wheel centers and raw radii.
    ///
    /// `support_centers[i]` pairs with `support_radii[i]`; the lateral offset
    /// of the wrap plane is taken from the drive wheel.
    pub fn track_geometry(
        &self,
        drive: (Point3<f64>, f64),
        idler: (Point3<f64>, f64),
        support_centers: &[Point3<f64>],
        support_radii: &[f64],
        shoe: ShoeSpec,
        clearance: &ClearanceCfg,
    ) -> Result<TrackGeometry, AssemblyError> {
        if support_centers.len() != support_radii.len() {
            return Err(AssemblyError::MismatchedSupports {
                centers: support_centers.len(),
                radii: support_radii.len(),
            });
        }
        let drive_local = self.to_local(&drive.0);
        let wheel = |p: &Point3<f64>, r: f64| Wheel::new(Self::project(&self.to_local(p)), r);
        let supports: Vec<Wheel> = support_centers
            .iter()
            .zip(support_radii)
            .map(|(p, &r)| wheel(p, r))
            .collect();
        let mut geom = TrackGeometry::from_raw(
            Wheel::new(Self::project(&drive_local), drive.1),
            wheel(&idler.0, idler.1),
            &supports,
            shoe,
            clearance,
        );
        geom.lateral = drive_local.y;
        geom.validate()?;
        Ok(geom)
    }
}
